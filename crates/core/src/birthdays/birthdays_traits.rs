use crate::birthdays::birthdays_model::{Birthday, NewBirthday, SoftDeleteOutcome};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for birthday repository operations
#[async_trait]
pub trait BirthdayRepositoryTrait: Send + Sync {
    /// Point lookup that ignores the deleted flag.
    fn get_birthday(&self, birthday_id: i32) -> Result<Option<Birthday>>;
    /// Rows with `is_deleted = false`, oldest first.
    fn list_active(&self) -> Result<Vec<Birthday>>;
    fn count_birthdays(&self, include_deleted: bool) -> Result<i64>;
    async fn insert_birthday(&self, new_birthday: NewBirthday) -> Result<Birthday>;
    async fn mark_deleted(&self, birthday_id: i32) -> Result<SoftDeleteOutcome>;
}

/// Trait for birthday service operations
#[async_trait]
pub trait BirthdayServiceTrait: Send + Sync {
    fn get_birthday(&self, birthday_id: i32) -> Result<Birthday>;
    fn list_active_birthdays(&self) -> Result<Vec<Birthday>>;
    fn count_birthdays(&self, include_deleted: bool) -> Result<i64>;
    async fn create_birthday(&self, new_birthday: NewBirthday) -> Result<Birthday>;
    async fn delete_birthday(&self, birthday_id: i32) -> Result<SoftDeleteOutcome>;
}
