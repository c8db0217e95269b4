//! Birthdays module - domain models, services, and traits.

mod birthdays_model;
mod birthdays_service;
mod birthdays_traits;

pub use birthdays_model::{parse_birthday_date, Birthday, NewBirthday, SoftDeleteOutcome};
pub use birthdays_service::BirthdayService;
pub use birthdays_traits::{BirthdayRepositoryTrait, BirthdayServiceTrait};
