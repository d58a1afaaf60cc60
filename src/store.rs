//! Connection pool setup and table DDL. Tables live in the schema named by `DEALERSHIP_SCHEMA` (default `public`).

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgPoolOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Table DDL in foreign-key dependency order.
const TABLES: &[(&str, &str)] = &[
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            category_id SERIAL PRIMARY KEY,
            name VARCHAR(50) NOT NULL,
            description VARCHAR(255)
        )
        "#,
    ),
    (
        "cars",
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            car_id SERIAL PRIMARY KEY,
            category_id INTEGER NOT NULL REFERENCES categories (category_id),
            modelnum VARCHAR(50) NOT NULL,
            manufacturer VARCHAR(100),
            model_name VARCHAR(100),
            year INTEGER,
            engine_type VARCHAR(50),
            transmission VARCHAR(30),
            color VARCHAR(30),
            mileage INTEGER,
            fuel_capacity NUMERIC(5, 2),
            seating_capacity INTEGER,
            price NUMERIC(10, 2),
            available BOOLEAN NOT NULL DEFAULT TRUE,
            added_date DATE NOT NULL DEFAULT CURRENT_DATE,
            image_link VARCHAR(255)
        )
        "#,
    ),
    (
        "car_inventory",
        r#"
        CREATE TABLE IF NOT EXISTS car_inventory (
            inventory_id SERIAL PRIMARY KEY,
            car_id INTEGER NOT NULL REFERENCES cars (car_id),
            location VARCHAR(100),
            quantity INTEGER NOT NULL,
            notes VARCHAR(255)
        )
        "#,
    ),
    (
        "car_inventory_log",
        r#"
        CREATE TABLE IF NOT EXISTS car_inventory_log (
            log_id SERIAL PRIMARY KEY,
            inventory_id INTEGER NOT NULL REFERENCES car_inventory (inventory_id),
            car_id INTEGER NOT NULL REFERENCES cars (car_id),
            quantity INTEGER NOT NULL,
            unit_price NUMERIC(10, 2),
            total_value NUMERIC(10, 2),
            condition VARCHAR(50),
            warehouse_location VARCHAR(100),
            received_date DATE
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id SERIAL PRIMARY KEY,
            email VARCHAR(100) NOT NULL UNIQUE,
            username VARCHAR(50) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL,
            address VARCHAR(255),
            phone VARCHAR(20),
            dob DATE,
            card_num VARCHAR(20),
            bank_acc VARCHAR(20)
        )
        "#,
    ),
    (
        "employees",
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            emp_id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100) NOT NULL UNIQUE,
            phone VARCHAR(20),
            dob DATE,
            address VARCHAR(255),
            hire_date DATE,
            salary NUMERIC(10, 2),
            position VARCHAR(50),
            department VARCHAR(50),
            status VARCHAR(20) NOT NULL DEFAULT 'active'
        )
        "#,
    ),
    (
        "purchase",
        r#"
        CREATE TABLE IF NOT EXISTS purchase (
            purchase_id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users (user_id),
            amount NUMERIC(10, 2) NOT NULL,
            payment_method VARCHAR(50),
            status VARCHAR(50),
            invoice_number VARCHAR(50),
            purchase_date DATE NOT NULL DEFAULT CURRENT_DATE
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            order_id SERIAL PRIMARY KEY,
            purchase_id INTEGER NOT NULL REFERENCES purchase (purchase_id),
            status VARCHAR(50),
            shipping_address VARCHAR(255),
            tracking_number VARCHAR(50),
            expected_delivery DATE,
            order_date DATE NOT NULL DEFAULT CURRENT_DATE
        )
        "#,
    ),
    (
        "order_item",
        r#"
        CREATE TABLE IF NOT EXISTS order_item (
            order_item_id SERIAL PRIMARY KEY,
            order_id INTEGER NOT NULL REFERENCES orders (order_id),
            car_id INTEGER NOT NULL REFERENCES cars (car_id),
            quantity INTEGER NOT NULL,
            price_at_order NUMERIC(10, 2)
        )
        "#,
    ),
    (
        "shippings",
        r#"
        CREATE TABLE IF NOT EXISTS shippings (
            shipping_id SERIAL PRIMARY KEY,
            order_id INTEGER NOT NULL REFERENCES orders (order_id),
            emp_id INTEGER NOT NULL REFERENCES employees (emp_id),
            shipped_date DATE,
            delivery_date DATE,
            shipping_address VARCHAR(255),
            tracking_number VARCHAR(50),
            shipping_provider VARCHAR(100),
            status VARCHAR(50)
        )
        "#,
    ),
    (
        "reviews",
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            review_id SERIAL PRIMARY KEY,
            purchase_id INTEGER NOT NULL REFERENCES purchase (purchase_id),
            car_id INTEGER NOT NULL REFERENCES cars (car_id),
            user_id INTEGER NOT NULL REFERENCES users (user_id),
            rating INTEGER NOT NULL,
            review_text TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT NOW(),
            is_visible BOOLEAN NOT NULL DEFAULT TRUE,
            helpful_count INTEGER NOT NULL DEFAULT 0,
            employee_feedback TEXT
        )
        "#,
    ),
];

/// Open the pool. Every connection gets `search_path` set to the configured schema.
pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    let schema = config.schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .after_connect(move |conn, _meta| {
            let set_path = format!("SET search_path TO {}", quote_ident(&schema));
            Box::pin(async move {
                sqlx::query(&set_path).execute(&mut *conn).await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Create the schema if needed, then every table. Idempotent.
pub async fn ensure_schema(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    let mut tx = pool.begin().await?;
    for (name, ddl) in TABLES {
        tracing::debug!(table = name, "ensure table");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(schema, tables = TABLES.len(), "schema ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: e.to_string(),
        })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        let created = sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await;
        match created {
            Ok(_) => {}
            // Another process created it between the check and the CREATE.
            Err(sqlx::Error::Database(db))
                if db.code().as_deref() == Some("42P04") || db.is_unique_violation() => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| ConfigError::Invalid {
        key: "DATABASE_URL",
        value: url.to_string(),
    })? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_points_at_postgres_database() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/dealership").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "dealership");
    }

    #[test]
    fn query_string_is_kept_on_admin_url() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost/shop?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "shop");
    }

    #[test]
    fn identifiers_are_double_quoted() {
        assert_eq!(quote_ident("public"), "\"public\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn tables_are_listed_parents_first() {
        let names: Vec<&str> = TABLES.iter().map(|(n, _)| *n).collect();
        let pos = |t: &str| names.iter().position(|n| *n == t).unwrap();
        assert!(pos("categories") < pos("cars"));
        assert!(pos("cars") < pos("car_inventory"));
        assert!(pos("car_inventory") < pos("car_inventory_log"));
        assert!(pos("users") < pos("purchase"));
        assert!(pos("purchase") < pos("orders"));
        assert!(pos("orders") < pos("shippings"));
        assert!(pos("employees") < pos("shippings"));
        assert_eq!(names.len(), 11);
    }
}
