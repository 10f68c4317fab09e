use url_builder::{
    uri::{validate_ipv4_address, validate_ipv6_address, UrlParts},
    ErrorKind,
};

#[test]
fn correct_ipv4_addresses() {
    let addresses = [
        "0.0.0.0",
        "1.2.3.0",
        "1.2.3.4",
        "1.2.3.255",
        "1.2.255.4",
        "1.255.3.4",
        "255.2.3.4",
        "255.255.255.255",
    ];

    for address in addresses {
        assert!(validate_ipv4_address(address).is_ok(), "{address}");
    }
}

#[test]
fn bad_ipv4_addresses() {
    let addresses = [
        ("1.2.3", ErrorKind::TooFewAddressParts),
        ("1.2.3.4.5", ErrorKind::TooManyAddressParts),
        ("1.2.3.", ErrorKind::TruncatedHost),
        ("1.2.3.256", ErrorKind::InvalidDecimalOctet),
        ("300.100.50.1", ErrorKind::InvalidDecimalOctet),
        ("1.2.3.0004", ErrorKind::InvalidDecimalOctet),
    ];

    for (address, expected) in addresses {
        let error = validate_ipv4_address(address).unwrap_err();
        assert_eq!(error.to_string(), expected.to_string(), "{address}");
    }
    assert!(matches!(
        validate_ipv4_address("1.2.x.4"),
        Err(ErrorKind::InvalidCharacter(_))
    ));
}

#[test]
fn correct_ipv6_addresses() {
    let addresses = [
        "::",
        "::1",
        "2001:db8:85a3::8a2e:370:7334",
        "2001:db8:85a3:0:0:8a2e:370:7334",
        "::ffff:1.2.3.4",
        "fe80::",
        "1:2:3:4:5:6:1.2.3.4",
    ];

    for address in addresses {
        assert!(validate_ipv6_address(address).is_ok(), "{address}");
    }
}

#[test]
fn bad_ipv6_addresses() {
    assert!(matches!(
        validate_ipv6_address("2001:db8:85a3::8a2e::"),
        Err(ErrorKind::TooManyDoubleColons)
    ));
    assert!(matches!(
        validate_ipv6_address("20001:db8:85a3::1"),
        Err(ErrorKind::TooManyDigits)
    ));
    assert!(matches!(
        validate_ipv6_address("2001:db8:85a3::8a2e:0:"),
        Err(ErrorKind::TruncatedHost)
    ));
    assert!(matches!(
        validate_ipv6_address("1:2:3:4:5:6:7"),
        Err(ErrorKind::TooFewAddressParts)
    ));
    assert!(matches!(
        validate_ipv6_address("1:2:3:4:5:6:7:8:9"),
        Err(ErrorKind::TooManyAddressParts)
    ));
    assert!(matches!(
        validate_ipv6_address("::ffff:1.2.3.256"),
        Err(ErrorKind::InvalidDecimalOctet)
    ));
    assert!(matches!(
        validate_ipv6_address(":1::"),
        Err(ErrorKind::InvalidCharacter(_))
    ));
}

#[test]
fn split_url_into_parts() {
    let parts =
        UrlParts::split("https://user@foo.bar.com:3333/foo/ba%20r;m=v?q1=v1&q2#frag?/").unwrap();
    assert_eq!(parts.scheme(), "https");
    assert_eq!(parts.host(), "foo.bar.com");
    assert_eq!(parts.port(), Some(3333));
    assert_eq!(parts.path(), "/foo/ba%20r;m=v");
    assert_eq!(parts.query(), Some("q1=v1&q2"));
    assert_eq!(parts.fragment(), Some("frag?/"));

    let parts = UrlParts::split("http://[::1]:80").unwrap();
    assert_eq!(parts.host(), "[::1]");
    assert_eq!(parts.port(), Some(80));
    assert_eq!(parts.path(), "");
    assert_eq!(parts.query(), None);
    assert_eq!(parts.fragment(), None);

    // a '?' after the '#' belongs to the fragment
    let parts = UrlParts::split("http://foo.com#a?b").unwrap();
    assert_eq!(parts.query(), None);
    assert_eq!(parts.fragment(), Some("a?b"));
}

#[test]
fn split_rejects_urls_it_cannot_build_from() {
    assert!(matches!(
        UrlParts::split("foo.com/bar"),
        Err(ErrorKind::InvalidScheme(_))
    ));
    assert!(matches!(
        UrlParts::split("mailto:someone@foo.com"),
        Err(ErrorKind::MissingAuthority(_))
    ));
    assert!(matches!(
        UrlParts::split("1http://foo.com"),
        Err(ErrorKind::InvalidScheme(_))
    ));
    assert!(matches!(
        UrlParts::split("http://foo.com:port/"),
        Err(ErrorKind::InvalidPortNumber(_))
    ));
}
