//! Database models for birthdays.

use birthdays_core::birthdays::{Birthday, NewBirthday};
use chrono::DateTime;
use diesel::prelude::*;

use crate::errors::StorageError;

/// Database model for birthdays
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::birthdays)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BirthdayDB {
    pub id: i32,
    pub name: String,
    /// RFC 3339 timestamp, offset included.
    pub date: String,
    pub is_deleted: bool,
}

/// Database model for creating a new birthday
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::birthdays)]
pub struct NewBirthdayDB {
    pub name: String,
    pub date: String,
    pub is_deleted: bool,
}

// Conversion to domain models
impl TryFrom<BirthdayDB> for Birthday {
    type Error = StorageError;

    fn try_from(db: BirthdayDB) -> Result<Self, Self::Error> {
        let date = DateTime::parse_from_rfc3339(&db.date).map_err(|e| {
            StorageError::SerializationError(format!(
                "birthday {} has an unreadable date '{}': {}",
                db.id, db.date, e
            ))
        })?;
        Ok(Self {
            id: db.id,
            name: db.name,
            date,
            is_deleted: db.is_deleted,
        })
    }
}

impl From<NewBirthday> for NewBirthdayDB {
    fn from(domain: NewBirthday) -> Self {
        Self {
            name: domain.name,
            date: domain.date.to_rfc3339(),
            is_deleted: false,
        }
    }
}
