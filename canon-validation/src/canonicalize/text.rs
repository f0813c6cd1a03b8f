use crate::canonicalize::{
    validate_email, validate_fqdn, validate_ip, validate_phone, validate_url, validate_uuid,
};
use crate::regexes::DISALLOWED_TEXT_REGEX;
use crate::{Canonical, DataKind, Fingerprint, ValidationError};

type Canonicalizer = fn(&str) -> Result<Canonical, ValidationError>;

/// Structured kinds an adversary name must not be confused with, in probe order.
const ADVERSARY_LOOKALIKES: &[(DataKind, Canonicalizer)] = &[
    (DataKind::Url, validate_url),
    (DataKind::Uuid, validate_uuid),
    (DataKind::Email, validate_email),
    (DataKind::Ip, validate_ip),
    (DataKind::Phone, validate_phone),
    (DataKind::Fqdn, validate_fqdn),
];

/// Replaces every disallowed character with a space and rejects blank results.
fn clean_text(kind: DataKind, value: &str) -> Result<String, ValidationError> {
    let cleaned = DISALLOWED_TEXT_REGEX.replace_all(value, " ");
    if cleaned.trim().is_empty() {
        return Err(ValidationError::format(kind, "blank text"));
    }
    Ok(cleaned.into_owned())
}

/// Canonicalizes free-form text.
///
/// Letters, decimal digits, punctuation, symbols, spaces and line breaks are kept. Every other
/// character, such as tabs or zero-width spaces, is replaced with a space.
///
/// ```
/// use canon_validation::validate_string;
///
/// let canonical = validate_string("Cozy\tBear").unwrap();
/// assert_eq!(canonical.as_str(), Some("Cozy Bear"));
/// assert!(validate_string("\u{200b}\t").is_err());
/// ```
pub fn validate_string(value: &str) -> Result<Canonical, ValidationError> {
    clean_text(DataKind::String, value).map(Canonical::new)
}

/// Canonicalizes free-form text like [`validate_string`], but fingerprints it case insensitively.
///
/// The canonical value keeps its case.
pub fn validate_string_insensitive(value: &str) -> Result<Canonical, ValidationError> {
    let text = clean_text(DataKind::StringInsensitive, value)?;
    let fingerprint = Fingerprint::of_text(&text.to_lowercase());
    Ok(Canonical::with_fingerprint(text, fingerprint))
}

/// Upper-cases the first character of every word and lower-cases all others.
///
/// Words are separated by every character that is neither alphanumeric nor an apostrophe.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut word_start = true;

    for c in value.chars() {
        if word_start {
            let mut upper = c.to_uppercase();
            result.extend(upper.next());
            result.extend(upper.flat_map(char::to_lowercase));
        } else {
            result.extend(c.to_lowercase());
        }
        word_start = !(c.is_alphanumeric() || matches!(c, '\'' | '\u{2019}'));
    }

    result
}

/// Canonicalizes a city name to title case.
pub fn validate_city(value: &str) -> Result<Canonical, ValidationError> {
    Ok(Canonical::new(title_case(value)))
}

/// Canonicalizes a country name to title case.
pub fn validate_country(value: &str) -> Result<Canonical, ValidationError> {
    Ok(Canonical::new(title_case(value)))
}

/// Canonicalizes a file system path to lower case. URLs are rejected.
pub fn validate_path(value: &str) -> Result<Canonical, ValidationError> {
    let lower = value.to_lowercase();
    if lower.contains("://") {
        return Err(ValidationError::format(DataKind::Path, "looks like url"));
    }
    Ok(Canonical::new(lower))
}

/// Validates the free-form name of an adversary.
///
/// Unlike all other canonicalizers, this one rejects values that canonicalize as one of the
/// structured kinds, such as IP addresses, domains or email addresses. Names that pass are
/// returned as given.
///
/// ```
/// use canon_validation::validate_adversary;
///
/// assert!(validate_adversary("APT29").is_ok());
/// assert!(validate_adversary("8.8.8.8").is_err());
/// ```
pub fn validate_adversary(value: &str) -> Result<Canonical, ValidationError> {
    let lookalike = ADVERSARY_LOOKALIKES
        .iter()
        .find(|(_, canonicalize)| canonicalize(value).is_ok());

    if let Some((kind, _)) = lookalike {
        let reason = format!("looks like {kind}");
        return Err(ValidationError::format(DataKind::Adversary, reason));
    }

    Ok(Canonical::new(value))
}
