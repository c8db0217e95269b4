use birthdays_core::birthdays::{Birthday, BirthdayRepositoryTrait, NewBirthday, SoftDeleteOutcome};
use birthdays_core::errors::DatabaseError;
use birthdays_core::Result;

use super::model::{BirthdayDB, NewBirthdayDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::birthdays;
use crate::schema::birthdays::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use std::sync::Arc;

pub struct BirthdayRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BirthdayRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BirthdayRepository { pool, writer }
    }

    fn to_domain(rows: Vec<BirthdayDB>) -> Result<Vec<Birthday>> {
        rows.into_iter()
            .map(|row| Birthday::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[async_trait]
impl BirthdayRepositoryTrait for BirthdayRepository {
    fn get_birthday(&self, birthday_id: i32) -> Result<Option<Birthday>> {
        let mut conn = get_connection(&self.pool)?;
        let row = birthdays
            .find(birthday_id)
            .select(BirthdayDB::as_select())
            .first::<BirthdayDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Birthday::try_from).transpose()?)
    }

    fn list_active(&self) -> Result<Vec<Birthday>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = birthdays
            .filter(is_deleted.eq(false))
            .order(id.asc())
            .select(BirthdayDB::as_select())
            .load::<BirthdayDB>(&mut conn)
            .into_core()?;
        Self::to_domain(rows)
    }

    fn count_birthdays(&self, include_deleted: bool) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let count = if include_deleted {
            birthdays.count().get_result::<i64>(&mut conn)
        } else {
            birthdays
                .filter(is_deleted.eq(false))
                .count()
                .get_result::<i64>(&mut conn)
        }
        .into_core()?;
        Ok(count)
    }

    async fn insert_birthday(&self, new_birthday: NewBirthday) -> Result<Birthday> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Birthday> {
                let new_birthday_db: NewBirthdayDB = new_birthday.into();

                let result_db = diesel::insert_into(birthdays::table)
                    .values(&new_birthday_db)
                    .returning(BirthdayDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted birthday row {}", result_db.id);
                Ok(Birthday::try_from(result_db)?)
            })
            .await
    }

    async fn mark_deleted(&self, birthday_id: i32) -> Result<SoftDeleteOutcome> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SoftDeleteOutcome> {
                let existing = birthdays
                    .find(birthday_id)
                    .select(BirthdayDB::as_select())
                    .first::<BirthdayDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        DatabaseError::NotFound(format!("birthday {} does not exist", birthday_id))
                    })?;

                if existing.is_deleted {
                    return Ok(SoftDeleteOutcome {
                        birthday: Birthday::try_from(existing)?,
                        changed: false,
                    });
                }

                let updated = diesel::update(birthdays.find(birthday_id))
                    .set(is_deleted.eq(true))
                    .returning(BirthdayDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                debug!("Set is_deleted on birthday row {}", birthday_id);
                Ok(SoftDeleteOutcome {
                    birthday: Birthday::try_from(updated)?,
                    changed: true,
                })
            })
            .await
    }
}
