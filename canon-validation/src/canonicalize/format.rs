use chrono::{DateTime, NaiveDate, SecondsFormat};
use data_encoding::BASE64;
use regex::RegexBuilder;
use uuid::Uuid;

use crate::regexes::{COMPILED_PATTERN_MAX_SIZE, MIME_REGEX, PHONE_REGEX};
use crate::{Canonical, DataKind, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonicalizes a UUID to its lower-case hyphenated form.
///
/// Simple, hyphenated, braced and URN notations are accepted.
pub fn validate_uuid(value: &str) -> Result<Canonical, ValidationError> {
    let uuid = Uuid::parse_str(&value.to_lowercase())
        .map_err(|err| ValidationError::format(DataKind::Uuid, err.to_string()))?;
    Ok(Canonical::new(uuid.hyphenated().to_string()))
}

/// Canonicalizes a calendar date in `YYYY-MM-DD` format.
pub fn validate_date(value: &str) -> Result<Canonical, ValidationError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| ValidationError::format(DataKind::Date, err.to_string()))?;
    Ok(Canonical::new(date.format(DATE_FORMAT).to_string()))
}

/// Canonicalizes an RFC 3339 timestamp.
///
/// The offset is kept, a zero offset is written as `Z`. Fractional seconds are written with 3,
/// 6 or 9 digits, or omitted if they are zero.
pub fn validate_datetime(value: &str) -> Result<Canonical, ValidationError> {
    let datetime = DateTime::parse_from_rfc3339(value)
        .map_err(|err| ValidationError::format(DataKind::Datetime, err.to_string()))?;
    Ok(Canonical::new(
        datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ))
}

/// Canonicalizes a MIME type to lower case.
pub fn validate_mime(value: &str) -> Result<Canonical, ValidationError> {
    let lower = value.to_lowercase();
    if !MIME_REGEX.is_match(&lower) {
        return Err(ValidationError::format(DataKind::Mime, "not a MIME type"));
    }
    Ok(Canonical::new(lower))
}

/// Validates a phone number in international format.
///
/// The number is returned as given. It must contain between 7 and 15 digits.
pub fn validate_phone(value: &str) -> Result<Canonical, ValidationError> {
    let kind = DataKind::Phone;
    if !PHONE_REGEX.is_match(value) {
        return Err(ValidationError::format(kind, "not a phone number"));
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ValidationError::format(kind, "expected 7 to 15 digits"));
    }

    Ok(Canonical::new(value))
}

/// Canonicalizes hex encoded bytes to lower case.
pub fn validate_hex(value: &str) -> Result<Canonical, ValidationError> {
    let bytes =
        hex::decode(value).map_err(|err| ValidationError::format(DataKind::Hex, err.to_string()))?;
    Ok(Canonical::new(hex::encode(bytes)))
}

/// Validates standard, padded base64. The value is returned as given.
pub fn validate_base64(value: &str) -> Result<Canonical, ValidationError> {
    BASE64
        .decode(value.as_bytes())
        .map_err(|err| ValidationError::format(DataKind::Base64, err.to_string()))?;
    Ok(Canonical::new(value))
}

/// Validates that the value compiles as a regular expression. The value is returned as given.
pub fn validate_regex(value: &str) -> Result<Canonical, ValidationError> {
    RegexBuilder::new(value)
        .size_limit(COMPILED_PATTERN_MAX_SIZE)
        .build()
        .map_err(|err| ValidationError::format(DataKind::Regex, err.to_string()))?;
    Ok(Canonical::new(value))
}
