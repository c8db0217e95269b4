//! Birthday domain models.

use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::constants::{DATE_INPUT_FORMAT, MAX_NAME_LENGTH};
use crate::errors::{Result, ValidationError};

/// Domain model representing a stored birthday
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Birthday {
    pub id: i32,
    pub name: String,
    pub date: DateTime<FixedOffset>,
    pub is_deleted: bool,
}

impl Birthday {
    /// Calendar date of the birthday in the offset it was recorded with.
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Input model for creating a new birthday
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBirthday {
    pub name: String,
    pub date: DateTime<FixedOffset>,
}

impl NewBirthday {
    /// Builds a birthday from raw form input, validating both fields.
    pub fn parse(name: &str, date: &str) -> Result<Self> {
        let new_birthday = NewBirthday {
            name: name.trim().to_string(),
            date: parse_birthday_date(date)?,
        };
        new_birthday.validate()?;
        Ok(new_birthday)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let length = self.name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::InvalidInput(format!(
                "name is {} characters long, the limit is {}",
                length, MAX_NAME_LENGTH
            ))
            .into());
        }
        Ok(())
    }
}

/// Result of a soft delete.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftDeleteOutcome {
    pub birthday: Birthday,
    /// False when the record was already marked as deleted.
    pub changed: bool,
}

/// Parses a `YYYY-MM-DD` calendar date as midnight in the server's local timezone.
///
/// No timezone is accepted from the input. A midnight that falls in a DST gap
/// is rejected; an ambiguous midnight resolves to the earlier instant.
pub fn parse_birthday_date(input: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("date".to_string()).into());
    }

    if !has_calendar_date_shape(trimmed) {
        return Err(ValidationError::InvalidInput(format!(
            "'{}' is not a YYYY-MM-DD date",
            trimmed
        ))
        .into());
    }

    let day = NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT).map_err(|source| {
        ValidationError::DateParse {
            input: trimmed.to_string(),
            source,
        }
    })?;

    match Local.from_local_datetime(&day.and_time(NaiveTime::MIN)) {
        LocalResult::Single(local) => Ok(local.fixed_offset()),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.fixed_offset()),
        LocalResult::None => Err(ValidationError::InvalidInput(format!(
            "{} has no midnight in the server timezone",
            trimmed
        ))
        .into()),
    }
}

// `%Y` alone also takes signed, short and five-digit years.
fn has_calendar_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
