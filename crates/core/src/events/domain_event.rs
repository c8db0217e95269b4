//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::birthdays::Birthday;

/// Domain events emitted by core services after a write has committed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A birthday was inserted.
    BirthdayCreated { birthday: Birthday },

    /// A birthday was soft-deleted.
    BirthdayDeleted { birthday_id: i32 },
}

impl DomainEvent {
    /// Creates a BirthdayCreated event.
    pub fn birthday_created(birthday: Birthday) -> Self {
        Self::BirthdayCreated { birthday }
    }

    /// Creates a BirthdayDeleted event.
    pub fn birthday_deleted(birthday_id: i32) -> Self {
        Self::BirthdayDeleted { birthday_id }
    }
}
