//! Typed column values that can be bound into a dynamically built PostgreSQL query.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::query_builder::Separated;
use sqlx::{Postgres, QueryBuilder};

/// One bindable column value. `None` binds a typed SQL NULL.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Int(Option<i32>),
    Bool(Option<bool>),
    Text(Option<String>),
    Decimal(Option<Decimal>),
    Date(Option<NaiveDate>),
    Timestamp(Option<NaiveDateTime>),
}

impl SqlValue {
    pub(crate) fn push_to(self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            SqlValue::Int(v) => qb.push_bind(v),
            SqlValue::Bool(v) => qb.push_bind(v),
            SqlValue::Text(v) => qb.push_bind(v),
            SqlValue::Decimal(v) => qb.push_bind(v),
            SqlValue::Date(v) => qb.push_bind(v),
            SqlValue::Timestamp(v) => qb.push_bind(v),
        };
    }

    pub(crate) fn push_separated(self, sep: &mut Separated<'_, '_, Postgres, &'static str>) {
        match self {
            SqlValue::Int(v) => sep.push_bind(v),
            SqlValue::Bool(v) => sep.push_bind(v),
            SqlValue::Text(v) => sep.push_bind(v),
            SqlValue::Decimal(v) => sep.push_bind(v),
            SqlValue::Date(v) => sep.push_bind(v),
            SqlValue::Timestamp(v) => sep.push_bind(v),
        };
    }
}

macro_rules! impl_from {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for SqlValue {
            fn from(v: $ty) -> Self {
                SqlValue::$variant(Some(v.into()))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(v: Option<$ty>) -> Self {
                SqlValue::$variant(v.map(Into::into))
            }
        }
    };
}

impl_from!(i32, Int);
impl_from!(bool, Bool);
impl_from!(String, Text);
impl_from!(&str, Text);
impl_from!(Decimal, Decimal);
impl_from!(NaiveDate, Date);
impl_from!(NaiveDateTime, Timestamp);
