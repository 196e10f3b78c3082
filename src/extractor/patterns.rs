// file: src/extractor/patterns.rs
// description: compiled regex patterns for address and domain extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Four dot-separated 1-3 digit groups plus a 1-2 digit prefix length.
    // Shape only; octets are not range-checked.
    pub static ref IPV4_CIDR: Regex = Regex::new(
        r"\b(?:\d{1,3}\.){3}\d{1,3}/\d{1,2}\b"
    ).expect("IPV4_CIDR regex is valid");

    // Anchored variant for structured fields (CSV column, JSON value).
    pub static ref IPV4_CIDR_EXACT: Regex = Regex::new(
        r"^\d{1,3}(\.\d{1,3}){3}/\d{1,2}$"
    ).expect("IPV4_CIDR_EXACT regex is valid");

    // Colon-separated hextets with :: shorthand tolerated, prefix length
    // optional. Loose on purpose; accepts some malformed-but-shaped strings.
    pub static ref IPV6_CIDR: Regex = Regex::new(
        r"\b(?:[0-9a-fA-F]{0,4}:){1,7}(?::[0-9a-fA-F]{0,4}){0,7}(?:/\d{1,3})?\b"
    ).expect("IPV6_CIDR regex is valid");

    // Same core shape with the prefix length required. Used for prose/HTML
    // sources where bare hextet runs are too noisy.
    pub static ref IPV6_CIDR_PREFIXED: Regex = Regex::new(
        r"\b(?:[0-9a-fA-F]{0,4}:){1,7}(?::[0-9a-fA-F]{0,4}){0,7}/\d{1,3}\b"
    ).expect("IPV6_CIDR_PREFIXED regex is valid");

    // Dot-separated alphanumeric/hyphen labels ending in an alphabetic
    // label of length >= 2, optional leading wildcard marker.
    pub static ref DOMAIN: Regex = Regex::new(
        r"(?i)(?:\*\.)?\b[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*\.[a-z]{2,}\b"
    ).expect("DOMAIN regex is valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_cidr_pattern() {
        assert!(IPV4_CIDR.is_match("ranges: 103.21.244.0/22 and more"));
        assert!(IPV4_CIDR.is_match("17.0.0.0/8"));
        assert!(!IPV4_CIDR.is_match("103.21.244.0"));
        assert!(!IPV4_CIDR.is_match("1.2.3/8"));
    }

    #[test]
    fn test_ipv4_cidr_is_shape_only() {
        // Octets are not bounds-checked.
        assert!(IPV4_CIDR.is_match("999.999.999.999/32"));
    }

    #[test]
    fn test_ipv4_exact_anchoring() {
        assert!(IPV4_CIDR_EXACT.is_match("172.224.224.0/27"));
        assert!(!IPV4_CIDR_EXACT.is_match(" 172.224.224.0/27"));
        assert!(!IPV4_CIDR_EXACT.is_match("172.224.224.0/27,US"));
    }

    #[test]
    fn test_ipv6_cidr_pattern() {
        assert!(IPV6_CIDR.is_match("2400:cb00::/32"));
        assert!(IPV6_CIDR.is_match("2606:4700:4700::1111"));
        assert!(IPV6_CIDR_PREFIXED.is_match("2620:149:a44::/48"));
        assert!(!IPV6_CIDR_PREFIXED.is_match("2620:149:a44::"));
    }

    #[test]
    fn test_domain_pattern() {
        assert!(DOMAIN.is_match("updates.cdn-apple.com"));
        assert!(DOMAIN.is_match("gs.apple.com"));
        assert!(!DOMAIN.is_match("localhost"));
        assert!(!DOMAIN.is_match("8.8.8.8"));
    }

    #[test]
    fn test_domain_wildcard_marker() {
        let m = DOMAIN.find("allow *.push.apple.com on 5223").unwrap();
        assert_eq!(m.as_str(), "*.push.apple.com");
    }
}
