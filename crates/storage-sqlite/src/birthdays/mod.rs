//! SQLite storage implementation for birthdays.

mod model;
mod repository;

pub use model::{BirthdayDB, NewBirthdayDB};
pub use repository::BirthdayRepository;
