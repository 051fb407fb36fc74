//! Field rules shared by every entity payload

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Earliest year a diploma book may be opened for
pub const MIN_BOOK_YEAR: i32 = 1900;

/// Require a non-blank text value no longer than `max` characters.
/// Returns the trimmed text.
pub fn required_text<'a>(
    field: &'static str,
    value: Option<&'a str>,
    max: usize,
) -> Result<&'a str, ValidationError> {
    let value = crate::util::non_blank(value).ok_or(ValidationError::missing(field))?;
    max_len(field, value, max)?;
    Ok(value)
}

/// Length limit for an optional text value (counted in characters)
pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(())
}

/// Reject dates after `today`
pub fn not_in_future(
    field: &'static str,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::FutureDate { field });
    }
    Ok(())
}

/// Book years run from 1900 up to next year
pub fn book_year(year: i32, current_year: i32) -> Result<(), ValidationError> {
    let max = current_year + 1;
    if !(MIN_BOOK_YEAR..=max).contains(&year) {
        return Err(ValidationError::YearOutOfRange {
            year,
            min: MIN_BOOK_YEAR,
            max,
        });
    }
    Ok(())
}

/// Full check before opening a new book: year range plus one book per year
pub fn new_book_year(
    year: i32,
    existing_years: impl IntoIterator<Item = i32>,
    current_year: i32,
) -> Result<(), ValidationError> {
    book_year(year, current_year)?;
    if existing_years.into_iter().any(|y| y == year) {
        return Err(ValidationError::DuplicateYear(year));
    }
    Ok(())
}

/// Identifier-like codes: letters, digits and underscore
pub fn identifier(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "may only contain letters, digits and underscores".to_string(),
        });
    }
    Ok(())
}
