use crate::canonicalize::validate_uuid;
use crate::regexes::digest_regex;
use crate::{Canonical, DataKind, ValidationError};

/// Canonicalizes a hex digest for one of the hash kinds.
///
/// The value is lower-cased and must then consist of exactly as many hex characters as the
/// algorithm produces. Kinds accepting several lengths try them in order.
///
/// ```
/// use canon_validation::{DataKind, validate_digest};
///
/// let digest = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
/// assert!(validate_digest(DataKind::Sha256, digest).is_ok());
/// assert!(validate_digest(DataKind::Sha1, digest).is_err());
/// ```
pub fn validate_digest(kind: DataKind, value: &str) -> Result<Canonical, ValidationError> {
    let lengths = kind.digest_lengths();
    if lengths.is_empty() {
        return Err(ValidationError::format(kind, "not a digest"));
    }

    let lower = value.to_lowercase();
    let matched = lengths
        .iter()
        .filter_map(|&len| digest_regex(len))
        .any(|regex| regex.is_match(&lower));

    if !matched {
        let lengths: Vec<_> = lengths.iter().map(ToString::to_string).collect();
        let reason = format!("expected {} hex characters", lengths.join(" or "));
        return Err(ValidationError::format(kind, reason));
    }

    Ok(Canonical::new(lower))
}

macro_rules! digest_validators {
    ($($name:ident => $kind:ident, $algorithm:literal;)*) => {
        $(
            #[doc = concat!("Canonicalizes a ", $algorithm, " hex digest.")]
            pub fn $name(value: &str) -> Result<Canonical, ValidationError> {
                validate_digest(DataKind::$kind, value)
            }
        )*
    };
}

digest_validators! {
    validate_md5 => Md5, "MD5";
    validate_sha1 => Sha1, "SHA-1";
    validate_sha224 => Sha224, "SHA-224";
    validate_sha256 => Sha256, "SHA-256";
    validate_sha384 => Sha384, "SHA-384";
    validate_sha512 => Sha512, "SHA-512";
    validate_sha512_224 => Sha512_224, "SHA-512/224";
    validate_sha512_256 => Sha512_256, "SHA-512/256";
    validate_sha3_224 => Sha3_224, "SHA3-224";
    validate_sha3_256 => Sha3_256, "SHA3-256";
    validate_sha3_384 => Sha3_384, "SHA3-384";
    validate_sha3_512 => Sha3_512, "SHA3-512";
}

/// Canonicalizes an object identifier.
///
/// Identifiers are MD5 digests, SHA3-256 digests or UUIDs, probed in that order. A 32 character
/// hex string is therefore always an MD5 digest, even though it also parses as a simple UUID.
pub fn validate_identifier(value: &str) -> Result<Canonical, ValidationError> {
    validate_md5(value)
        .or_else(|_| validate_sha3_256(value))
        .or_else(|_| validate_uuid(value))
        .map_err(|_| ValidationError::format(DataKind::Identifier, "invalid object"))
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    const MD5: &str = "D41D8CD98F00B204E9800998ECF8427E";
    const SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_md5_lengths() {
        assert_eq!(
            validate_md5(MD5).unwrap().as_str(),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert!(validate_md5(&MD5[..16]).is_ok());
        assert!(validate_md5(&MD5[..31]).is_err());
        assert!(validate_md5(&MD5[..20]).is_err());
    }

    #[test]
    fn test_length_message() {
        let err = validate_md5("abc").unwrap_err();
        insta::assert_snapshot!(err, @"invalid md5: expected 32 or 16 hex characters");

        let err = validate_sha512(SHA256).unwrap_err();
        insta::assert_snapshot!(err, @"invalid sha512: expected 128 hex characters");
    }

    #[test]
    fn test_same_shape_different_algorithms() {
        let sha256 = validate_sha256(SHA256).unwrap();
        let sha3_256 = validate_sha3_256(SHA256).unwrap();
        let sha512_256 = validate_sha512_256(SHA256).unwrap();
        assert_eq!(sha256, sha3_256);
        assert_eq!(sha256, sha512_256);
    }

    #[test]
    fn test_non_hex_rejected() {
        let almost = format!("{}g", &SHA256[..63]);
        assert!(validate_sha256(&almost).is_err());
    }

    #[test]
    fn test_digest_of_other_kind() {
        let err = validate_digest(DataKind::Port, SHA256).unwrap_err();
        assert_eq!(err, ValidationError::format(DataKind::Port, "not a digest"));
    }

    #[test]
    fn test_identifier_order() {
        let simple_uuid = "6ba7b8109dad11d180b400c04fd430c8";
        let canonical = validate_identifier(simple_uuid).unwrap();
        assert_eq!(canonical.as_str(), Some(simple_uuid));

        let canonical = validate_identifier(SHA256).unwrap();
        assert_eq!(canonical.as_str(), Some(SHA256));

        let canonical = validate_identifier("{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}").unwrap();
        assert_eq!(canonical.as_str(), Some("6ba7b810-9dad-11d1-80b4-00c04fd430c8"));

        let err = validate_identifier("not-an-object").unwrap_err();
        insta::assert_snapshot!(err, @"invalid identifier: invalid object");
    }
}
