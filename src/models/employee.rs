use super::{Entity, IntoChangeset};
use crate::sql::Changeset;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub emp_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub position: Option<String>,
    pub department: Option<String>,
    /// `active` unless the employee has left; only active staff show up in reports.
    pub status: String,
}

impl Entity for Employee {
    const TABLE: &'static str = "employees";
    const PK: &'static str = "emp_id";
    const NAME: &'static str = "Employee";
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

impl IntoChangeset for NewEmployee {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set("name", self.name)
            .set("email", self.email)
            .set("phone", self.phone)
            .set("dob", self.dob)
            .set("address", self.address)
            .set("hire_date", self.hire_date)
            .set("salary", self.salary)
            .set("position", self.position)
            .set("department", self.department)
            .set_some("status", self.status)
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<NaiveDate>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<Decimal>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

impl IntoChangeset for EmployeeUpdate {
    fn into_changeset(self) -> Changeset {
        Changeset::new()
            .set_some("name", self.name)
            .set_some("email", self.email)
            .set_some("phone", self.phone)
            .set_some("dob", self.dob)
            .set_some("address", self.address)
            .set_some("hire_date", self.hire_date)
            .set_some("salary", self.salary)
            .set_some("position", self.position)
            .set_some("department", self.department)
            .set_some("status", self.status)
    }
}
