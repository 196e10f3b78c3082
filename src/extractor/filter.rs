// file: src/extractor/filter.rs
// description: domain candidate retention policy
// reference: provider known-infrastructure allow-lists

/// Decides which domain candidates survive. Known-infrastructure
/// substrings win outright; everything else must look like a specific
/// multi-label subdomain. IP candidates never pass through here.
pub struct DomainFilter {
    substrings: Vec<String>,
}

impl DomainFilter {
    pub fn new(substrings: &[String]) -> Self {
        Self {
            substrings: substrings.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Lowercases the candidate and returns it when retained.
    pub fn retain(&self, candidate: &str) -> Option<String> {
        let domain = candidate.to_lowercase();

        if self.substrings.iter().any(|s| domain.contains(s.as_str())) {
            return Some(domain);
        }

        if has_specific_shape(&domain) {
            return Some(domain);
        }

        None
    }
}

// At least three dot-separated labels and a final label of length >= 2:
// a bare two-label domain outside the allow-list is too generic to keep.
fn has_specific_shape(domain: &str) -> bool {
    domain.matches('.').count() >= 2
        && domain.rsplit('.').next().is_some_and(|label| label.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(substrings: &[&str]) -> DomainFilter {
        let owned: Vec<String> = substrings.iter().map(|s| s.to_string()).collect();
        DomainFilter::new(&owned)
    }

    #[test]
    fn test_substring_match_wins() {
        let filter = filter(&["apple.com"]);
        assert_eq!(
            filter.retain("foo.apple.com"),
            Some("foo.apple.com".to_string())
        );
        // Bare second-level domains on the allow-list are kept too.
        assert_eq!(filter.retain("apple.com"), Some("apple.com".to_string()));
    }

    #[test]
    fn test_generic_fallback_needs_three_labels() {
        let filter = filter(&["apple.com"]);
        assert_eq!(filter.retain("x.y.z.co"), Some("x.y.z.co".to_string()));
        assert_eq!(filter.retain("a.b"), None);
        assert_eq!(filter.retain("example.org"), None);
    }

    #[test]
    fn test_lowercase_normalization() {
        let filter = filter(&["icloud.com"]);
        assert_eq!(
            filter.retain("Setup.iCloud.Com"),
            Some("setup.icloud.com".to_string())
        );
    }

    #[test]
    fn test_wildcard_labels_count() {
        let filter = filter(&[]);
        assert_eq!(
            filter.retain("*.push.example.net"),
            Some("*.push.example.net".to_string())
        );
    }
}
