//! Pure validation functions for transaction form input.
//!
//! Each validator is independent and side-effect free.
//! [validate_submission] runs all of them and collects every failure, so a
//! form submission can report multiple errors at once instead of stopping
//! at the first.

use time::PrimitiveDateTime;

use crate::Error;

/// The maximum number of characters allowed in a transaction description.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Check that an amount is present and greater than zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `amount` is `None` or not positive.
pub fn validate_amount(amount: Option<f64>) -> Result<(), Error> {
    match amount {
        Some(amount) if amount > 0.0 => Ok(()),
        _ => Err(Error::InvalidAmount),
    }
}

/// Check that a transaction date is present and not in the future.
///
/// `now` is the current moment in the timezone the user entered the date
/// in, see [local_now](crate::timezone::local_now). There is no minimum
/// date.
///
/// # Errors
/// Returns [Error::InvalidDate] if `date` is `None` or strictly later than
/// `now`.
pub fn validate_date(
    date: Option<PrimitiveDateTime>,
    now: PrimitiveDateTime,
) -> Result<(), Error> {
    match date {
        Some(date) if date <= now => Ok(()),
        _ => Err(Error::InvalidDate),
    }
}

/// Check that a description is within the length limit.
///
/// The description is optional, an empty string is valid.
///
/// # Errors
/// Returns [Error::DescriptionTooLong] if `description` is longer than
/// [MAX_DESCRIPTION_LENGTH] characters.
pub fn validate_description(description: &str) -> Result<(), Error> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        Err(Error::DescriptionTooLong)
    } else {
        Ok(())
    }
}

/// Check that a tag is present and a member of the current effective
/// lookup list.
///
/// This is a write-time check only. A tag that was valid when a record was
/// written may be rejected here after being removed from the list; reads
/// never apply this check.
///
/// # Errors
/// Returns [Error::MissingTag] if `tag` is `None` or blank, or
/// [Error::UnknownTag] if it is not in `allowed`.
pub fn validate_tag(tag: Option<&str>, allowed: &[String]) -> Result<(), Error> {
    match tag {
        None => Err(Error::MissingTag),
        Some(tag) if tag.trim().is_empty() => Err(Error::MissingTag),
        Some(tag) if allowed.iter().any(|name| name == tag) => Ok(()),
        Some(tag) => Err(Error::UnknownTag(tag.to_owned())),
    }
}

/// Run every validator over a transaction submission and collect all
/// failures.
///
/// # Errors
/// Returns the non-empty list of every validation error found, in the
/// order amount, date, description, tag.
pub fn validate_submission(
    amount: Option<f64>,
    date: Option<PrimitiveDateTime>,
    description: &str,
    tag: Option<&str>,
    allowed: &[String],
    now: PrimitiveDateTime,
) -> Result<(), Vec<Error>> {
    let errors: Vec<Error> = [
        validate_amount(amount),
        validate_date(date, now),
        validate_description(description),
        validate_tag(tag, allowed),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
