use std::sync::LazyLock;

use regex::Regex;

/// Maximum size of a user supplied regular expression after compilation.
///
/// Larger patterns are rejected by the regex canonicalizer.
pub(crate) const COMPILED_PATTERN_MAX_SIZE: usize = 262_144;

#[rustfmt::skip]
macro_rules! digest {
    ($len:literal) => { concat!("^[0-9a-f]{", stringify!($len), "}$") };
}

macro_rules! regex {
    ($name:ident, $rule:expr) => {
        #[allow(non_snake_case)]
        mod $name {
            use super::*;
            pub static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($rule).unwrap());

            #[test]
            fn matches_whole_input() {
                let pattern = $name.as_str();
                assert!(pattern.starts_with('^') || pattern.starts_with("(?x)"));
                assert!(pattern.trim_end().ends_with('$'));
            }
        }
        pub(crate) use $name::$name;
    };
}

regex!(DIGEST_16_REGEX, digest!(16));
regex!(DIGEST_32_REGEX, digest!(32));
regex!(DIGEST_40_REGEX, digest!(40));
regex!(DIGEST_56_REGEX, digest!(56));
regex!(DIGEST_64_REGEX, digest!(64));
regex!(DIGEST_96_REGEX, digest!(96));
regex!(DIGEST_128_REGEX, digest!(128));

/// Returns the pattern for a lower-case hex digest of the given length.
pub(crate) fn digest_regex(len: usize) -> Option<&'static Regex> {
    Some(match len {
        16 => &DIGEST_16_REGEX,
        32 => &DIGEST_32_REGEX,
        40 => &DIGEST_40_REGEX,
        56 => &DIGEST_56_REGEX,
        64 => &DIGEST_64_REGEX,
        96 => &DIGEST_96_REGEX,
        128 => &DIGEST_128_REGEX,
        _ => return None,
    })
}

regex!(FQDN_REGEX, r"^[a-z0-9]+(?:[-.][a-z0-9]+)*\.[a-z]{2,20}$");

regex!(MAC_REGEX, r"^[0-9A-F]{2}(?:[:-][0-9A-F]{2}){5}$");

regex!(
    PORT_REGEX,
    r"(?x)
        ^(?:
            [1-9][0-9]{0,3}
            | [1-5][0-9]{4}
            | 6[0-4][0-9]{3}
            | 65[0-4][0-9]{2}
            | 655[0-2][0-9]
            | 6553[0-5]
        )/(?:tcp|udp)$
    "
);

regex!(MIME_REGEX, r"^[a-z0-9]+/[a-z0-9]+(?:[+\-.][a-z0-9]+)*$");

regex!(
    PHONE_REGEX,
    r"(?x)
        ^
        (?:\+\d{1,3}[\s-]?)?
        (?:\(?\d{1,4}\)?[\s-]?)?
        \d{1,4}
        (?:[\s-]?\d{1,4}){1,5}
        $
    "
);

// RFC 5322 addr-spec without comments and folding white space. Input is lower-cased first.
regex!(
    EMAIL_REGEX,
    r##"(?x)
        ^
        (?:
            [a-z0-9!\#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!\#$%&'*+/=?^_`{|}~-]+)*
            | "(?:[^"\\\r\n]|\\.)*"
        )
        @
        (?:
            [a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*
            | \[[^\[\]\\\r\n]*\]
        )
        $
    "##
);

/// Matches a single character that is not allowed in free-form text.
pub(crate) static DISALLOWED_TEXT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{Nd}\p{P}\p{S}\r\n ]").unwrap());
