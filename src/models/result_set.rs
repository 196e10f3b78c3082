// file: src/models/result_set.rs
// description: per-kind dedup accumulator with deterministic total ordering
// reference: firewall list output ordering

use crate::models::CandidateKind;
use std::collections::HashSet;

/// Deduplicated entries of one kind, destined for one output section.
/// Built incrementally per source, finalized (sorted) once per run.
#[derive(Debug, Clone)]
pub struct ResultSet {
    kind: CandidateKind,
    seen: HashSet<String>,
    entries: Vec<String>,
}

impl ResultSet {
    pub fn new(kind: CandidateKind) -> Self {
        Self {
            kind,
            seen: HashSet::new(),
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> CandidateKind {
        self.kind
    }

    /// Inserts unless the exact string was already present.
    pub fn insert(&mut self, value: String) -> bool {
        if self.seen.insert(value.clone()) {
            self.entries.push(value);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted entries under the kind's total order: IPv4 by octet 4-tuple
    /// then prefix length, IPv6 lexicographically on the lowercased form,
    /// domains lexicographically.
    pub fn finalize(mut self) -> Vec<String> {
        // Raw-string tiebreak keeps the order total even when two distinct
        // spellings share a key, so concurrent source completion order
        // never shows up in the output.
        match self.kind {
            CandidateKind::Ipv4Cidr => self
                .entries
                .sort_by_cached_key(|v| (ipv4_key(v), v.clone())),
            CandidateKind::Ipv6Cidr => self
                .entries
                .sort_by_cached_key(|v| (v.to_lowercase(), v.clone())),
            CandidateKind::Domain => self.entries.sort(),
        }
        self.entries
    }
}

/// Numeric sort key for a shape-matched IPv4 CIDR. Octets are parsed
/// without bounds-checking, matching the permissive extraction shape.
fn ipv4_key(value: &str) -> ([u32; 4], u32) {
    let (addr, prefix) = value.split_once('/').unwrap_or((value, ""));
    let mut octets = [0u32; 4];
    for (slot, part) in octets.iter_mut().zip(addr.split('.')) {
        *slot = part.parse().unwrap_or(0);
    }
    (octets, prefix.parse().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dedup_exact_match() {
        let mut set = ResultSet::new(CandidateKind::Ipv4Cidr);
        assert!(set.insert("8.8.8.0/24".to_string()));
        assert!(!set.insert("8.8.8.0/24".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ipv4_numeric_order() {
        let mut set = ResultSet::new(CandidateKind::Ipv4Cidr);
        for cidr in ["104.16.0.0/13", "23.0.0.0/12", "8.8.8.0/24", "8.8.8.0/23"] {
            set.insert(cidr.to_string());
        }
        assert_eq!(
            set.finalize(),
            vec!["8.8.8.0/23", "8.8.8.0/24", "23.0.0.0/12", "104.16.0.0/13"]
        );
    }

    #[test]
    fn test_ipv4_order_is_not_lexicographic() {
        let mut set = ResultSet::new(CandidateKind::Ipv4Cidr);
        set.insert("9.0.0.0/8".to_string());
        set.insert("100.0.0.0/8".to_string());
        assert_eq!(set.finalize(), vec!["9.0.0.0/8", "100.0.0.0/8"]);
    }

    #[test]
    fn test_ipv6_lowercased_lexicographic_order() {
        let mut set = ResultSet::new(CandidateKind::Ipv6Cidr);
        set.insert("2C0F:F248::/32".to_string());
        set.insert("2400:cb00::/32".to_string());
        let sorted = set.finalize();
        assert_eq!(sorted, vec!["2400:cb00::/32", "2C0F:F248::/32"]);
    }

    #[test]
    fn test_domain_order() {
        let mut set = ResultSet::new(CandidateKind::Domain);
        set.insert("updates.cdn-apple.com".to_string());
        set.insert("apple.com".to_string());
        set.insert("gs.apple.com".to_string());
        assert_eq!(
            set.finalize(),
            vec!["apple.com", "gs.apple.com", "updates.cdn-apple.com"]
        );
    }

    #[test]
    fn test_sort_totality_adjacent_pairs() {
        let mut set = ResultSet::new(CandidateKind::Ipv4Cidr);
        for cidr in [
            "198.41.128.0/17",
            "103.21.244.0/22",
            "172.64.0.0/13",
            "103.22.200.0/22",
            "131.0.72.0/22",
        ] {
            set.insert(cidr.to_string());
        }
        let sorted = set.finalize();
        for pair in sorted.windows(2) {
            assert!(ipv4_key(&pair[0]) <= ipv4_key(&pair[1]));
        }
    }
}
