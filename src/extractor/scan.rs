// file: src/extractor/scan.rs
// description: pattern scan over fetched text and html bodies
// reference: internal extraction pipeline

use crate::config::RulesetConfig;
use crate::extractor::patterns::{DOMAIN, IPV4_CIDR, IPV6_CIDR, IPV6_CIDR_PREFIXED};
use crate::models::{Candidate, CandidateKind, RawDocument};

/// Runs the enabled pattern families over a raw body. Candidates come back
/// unfiltered and undeduplicated; the aggregation step owns both.
pub struct TextScanner;

impl TextScanner {
    pub fn scan(document: &RawDocument, rules: &RulesetConfig) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        let body = document.body.as_str();

        if rules.extracts(CandidateKind::Ipv4Cidr) {
            for capture in IPV4_CIDR.find_iter(body) {
                candidates.push(Candidate::new(CandidateKind::Ipv4Cidr, capture.as_str()));
            }
        }

        if rules.extracts(CandidateKind::Ipv6Cidr) {
            let pattern = if rules.ipv6_requires_prefix {
                &*IPV6_CIDR_PREFIXED
            } else {
                &*IPV6_CIDR
            };
            for capture in pattern.find_iter(body) {
                candidates.push(Candidate::new(CandidateKind::Ipv6Cidr, capture.as_str()));
            }
        }

        if rules.extracts(CandidateKind::Domain) {
            for capture in DOMAIN.find_iter(body) {
                candidates.push(Candidate::new(CandidateKind::Domain, capture.as_str()));
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, SourceConfig};
    use pretty_assertions::assert_eq;

    fn doc(body: &str) -> RawDocument {
        RawDocument::new(
            SourceConfig::remote("test", "https://example.com/feed", ContentKind::Text),
            body.to_string(),
        )
    }

    fn rules(kinds: &[CandidateKind], ipv6_requires_prefix: bool) -> RulesetConfig {
        RulesetConfig {
            kinds: kinds.to_vec(),
            ipv6_requires_prefix,
            domain_substrings: vec![],
        }
    }

    #[test]
    fn test_scan_ipv4_from_plain_feed() {
        let document = doc("173.245.48.0/20\n103.21.244.0/22\n");
        let candidates = TextScanner::scan(
            &document,
            &rules(&[CandidateKind::Ipv4Cidr], false),
        );
        let values: Vec<&str> = candidates.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["173.245.48.0/20", "103.21.244.0/22"]);
    }

    #[test]
    fn test_scan_skips_disabled_kinds() {
        let document = doc("17.0.0.0/8 and swcdn.apple.com");
        let candidates = TextScanner::scan(
            &document,
            &rules(&[CandidateKind::Ipv4Cidr], false),
        );
        assert!(candidates.iter().all(|c| c.kind == CandidateKind::Ipv4Cidr));
    }

    #[test]
    fn test_scan_ipv6_prefix_requirement() {
        let document = doc("2620:149:a44::/48 plus bare 2606:4700:4700::1111 here");

        let strict = TextScanner::scan(&document, &rules(&[CandidateKind::Ipv6Cidr], true));
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].value, "2620:149:a44::/48");

        let loose = TextScanner::scan(&document, &rules(&[CandidateKind::Ipv6Cidr], false));
        assert!(loose.iter().any(|c| c.value == "2606:4700:4700::1111"));
    }

    #[test]
    fn test_scan_html_body() {
        let document = doc("<td>67.231.152.0/24</td><td>smtp relay</td>");
        let candidates = TextScanner::scan(
            &document,
            &rules(&[CandidateKind::Ipv4Cidr], false),
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value, "67.231.152.0/24");
    }
}
