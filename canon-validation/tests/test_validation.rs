use canon_protocol::Value;
use canon_validation::{
    BUILTIN_TYPES, Canonical, DataKind, Fingerprint, Registry, ValidationError, canonicalize,
    validate, validate_adversary,
};
use similar_asserts::assert_eq;

/// A valid sample for every kind, spelled in a non-canonical way where the kind allows it.
fn sample(kind: DataKind) -> Value {
    let text = match kind {
        DataKind::String => "Sofacy\tgroup",
        DataKind::StringInsensitive => "Cobalt Strike",
        DataKind::Ip => "2001:4860:4860:0:0:0:0:8888",
        DataKind::Cidr => "8.8.8.8/24",
        DataKind::Fqdn => "Login.Example-Bank.COM",
        DataKind::Email => "Billing <Billing@Example.com>",
        DataKind::Url => "HTTP://Example.com/Invoice.PDF?Id=42",
        DataKind::Uuid => "{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}",
        DataKind::Md5 => "D41D8CD98F00B204E9800998ECF8427E",
        DataKind::Sha1 => "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709",
        DataKind::Sha224 | DataKind::Sha512_224 | DataKind::Sha3_224 => {
            "D14A028C2A3A2BC9476102BB288234C415A2B01F828EA62AC5B3E42F"
        }
        DataKind::Sha256 | DataKind::Sha512_256 | DataKind::Sha3_256 => {
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855"
        }
        DataKind::Sha384 | DataKind::Sha3_384 => {
            "38B060A751AC96384CD9327EB1B1E36A21FDB71114BE07434C0CC7BF63F6E1DA274EDEBFE76F65FBD51AD2F14898B95B"
        }
        DataKind::Sha512 | DataKind::Sha3_512 => {
            "CF83E1357EEFB8BDF1542850D66D8007D620E4050B5715DC83F4A921D36CE9CE47D0D13C5D85F2B0FF8318D2877EEC2F63B931BD47417A81A538327AF927DA3E"
        }
        DataKind::Integer => "8080",
        DataKind::Float => "52.52",
        DataKind::Boolean => "true",
        DataKind::Date => "2024-05-02",
        DataKind::Datetime => "2024-05-02T10:14:11.208000+00:00",
        DataKind::Mac => "00:1a:2b:3c:4d:5e",
        DataKind::Mime => "Application/PDF",
        DataKind::Phone => "+44 20 7946 0958",
        DataKind::Port => "443/TCP",
        DataKind::Path => r"C:\Users\Public\Invoice.exe",
        DataKind::Hex => "CAFEBABE",
        DataKind::Base64 => "aGVsbG8=",
        DataKind::City => "rio de JANEIRO",
        DataKind::Country => "NEW zealand",
        DataKind::Identifier => "6BA7B810-9DAD-11D1-80B4-00C04FD430C8",
        DataKind::Adversary => "Wizard Spider",
        DataKind::Regex => r"(?i)invoice_\d{4}\.exe",
    };

    Value::from(text)
}

fn check(value: &str, type_name: &str) -> Result<Canonical, ValidationError> {
    validate(&Value::from(value), type_name)
}

#[test]
fn test_every_builtin_kind_has_a_sample() {
    for &kind in DataKind::all() {
        let result = canonicalize(kind, &sample(kind));
        assert!(result.is_ok(), "{kind}: {result:?}");
    }
}

#[test]
fn test_fingerprints_are_deterministic() {
    for &kind in DataKind::all() {
        let first = canonicalize(kind, &sample(kind)).unwrap();
        let second = canonicalize(kind, &sample(kind)).unwrap();
        assert_eq!(first.fingerprint, second.fingerprint, "{kind}");
        assert_eq!(first.fingerprint.as_str().len(), Fingerprint::LEN, "{kind}");
    }
}

#[test]
fn test_canonical_form_is_idempotent() {
    for &kind in DataKind::all() {
        let first = canonicalize(kind, &sample(kind)).unwrap();
        let second = canonicalize(kind, &first.value).unwrap();
        assert_eq!(first, second, "{kind}");
    }
}

#[test]
fn test_canonical_values_of_samples() {
    let canonical: Vec<_> = DataKind::all()
        .iter()
        .map(|&kind| {
            let canonical = canonicalize(kind, &sample(kind)).unwrap();
            format!("{kind}: {}", canonical.value)
        })
        .collect();

    insta::assert_snapshot!(canonical.join("\n"), @r"
    string: Sofacy group
    string-insensitive: Cobalt Strike
    ip: 2001:4860:4860::8888
    cidr: 8.8.8.0/24
    fqdn: login.example-bank.com
    email: billing@example.com
    url: http://example.com/Invoice.PDF?Id=42
    uuid: 6ba7b810-9dad-11d1-80b4-00c04fd430c8
    md5: d41d8cd98f00b204e9800998ecf8427e
    sha1: da39a3ee5e6b4b0d3255bfef95601890afd80709
    sha224: d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f
    sha256: e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
    sha384: 38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b
    sha512: cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e
    sha512-224: d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f
    sha512-256: e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
    sha3-224: d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f
    sha3-256: e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
    sha3-384: 38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b
    sha3-512: cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e
    integer: 8080
    float: 52.52
    boolean: true
    date: 2024-05-02
    datetime: 2024-05-02T10:14:11.208Z
    mac: 00-1A-2B-3C-4D-5E
    mime: application/pdf
    phone: +44 20 7946 0958
    port: 443/tcp
    path: c:\users\public\invoice.exe
    hex: cafebabe
    base64: aGVsbG8=
    city: Rio De Janeiro
    country: New Zealand
    identifier: 6ba7b810-9dad-11d1-80b4-00c04fd430c8
    adversary: Wizard Spider
    regex: (?i)invoice_\d{4}\.exe
    ");
}

#[test]
fn test_case_normalization() {
    let cases = [
        ("md5", "D41D8CD98F00B204E9800998ECF8427E"),
        ("sha1", "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709"),
        ("ip", "2001:DB8:1::AB9:C0A8:102"),
        ("domain", "WWW.EXAMPLE.ORG"),
        ("email-address", "SOC@EXAMPLE.ORG"),
        ("uuid", "6BA7B810-9DAD-11D1-80B4-00C04FD430C8"),
        ("hex", "DEADBEEF"),
    ];

    for (type_name, value) in cases {
        let canonical = check(value, type_name).unwrap();
        let text = canonical.as_str().unwrap();
        assert_eq!(text, text.to_lowercase(), "{type_name}");
    }
}

#[test]
fn test_ip_ranges() {
    for addr in ["127.0.0.1", "169.254.0.1", "224.0.0.1", "192.168.1.1"] {
        let err = check(addr, "ip").unwrap_err();
        assert!(matches!(err, ValidationError::Range { .. }), "{addr}: {err}");
    }

    let canonical = check("8.8.8.8", "ip").unwrap();
    assert_eq!(canonical.as_str(), Some("8.8.8.8"));
    assert_eq!(canonical.fingerprint, Fingerprint::of_text("8.8.8.8"));
}

#[test]
fn test_hash_length_discrimination() {
    let hex32 = "0123456789abcdef0123456789abcdef";
    assert!(check(hex32, "md5").is_ok());
    assert!(check(&hex32[..31], "md5").is_err());

    let hex64 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    assert_eq!(check(hex64, "sha256").unwrap(), check(hex64, "sha3-256").unwrap());
}

#[test]
fn test_identifier_prefers_md5() {
    let hex32 = "6ba7b8109dad11d180b400c04fd430c8";
    let as_identifier = check(hex32, "identifier").unwrap();
    let as_md5 = check(hex32, "md5").unwrap();
    let as_uuid = check(hex32, "uuid").unwrap();

    assert_eq!(as_identifier, as_md5);
    assert!(as_identifier != as_uuid);
}

#[test]
fn test_adversary_inverse_policy() {
    assert!(validate_adversary("8.8.8.8").is_err());
    assert!(validate_adversary("APT29").is_ok());
    assert!(check("8.8.8.8", "adversary").is_err());
    assert_eq!(check("APT29", "adversary").unwrap().as_str(), Some("APT29"));
}

#[test]
fn test_coercion_of_raw_shapes() {
    let canonical = validate(&Value::F64(65001.9), "asn").unwrap();
    assert_eq!(canonical.value, Value::I64(65001));

    let canonical = validate(&Value::from("52.5"), "latitude").unwrap();
    assert_eq!(canonical.value, Value::F64(52.5));

    let canonical = validate(&Value::from("unknown"), "risk-score").unwrap();
    assert_eq!(canonical.value, Value::F64(0.0));

    let canonical = validate(&Value::I64(443), "string").unwrap();
    assert_eq!(canonical.as_str(), Some("443"));
}

#[test]
fn test_entity_id() {
    let canonical = check("Example.com", "domain").unwrap();
    let id = canonical.fingerprint.entity_id("domain");
    assert_eq!(id, format!("domain-{}", Fingerprint::of_text("example.com")));
}

#[test]
fn test_every_builtin_type_resolves() {
    let registry = Registry::builtin();
    assert_eq!(registry.len(), BUILTIN_TYPES.len());
    for &(name, kind) in BUILTIN_TYPES {
        assert_eq!(registry.resolve(name), Some(kind), "{name}");
    }
}

#[test]
fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    assert_send_sync(Registry::builtin());

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| check("Example.com", "domain").unwrap().fingerprint))
        .collect();

    let fingerprints: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert!(fingerprints.windows(2).all(|pair| pair[0] == pair[1]));
}
