// file: src/models/candidate.rs
// description: extracted candidate model and kind classification
// reference: firewall allow-list entry kinds

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateKind {
    Ipv4Cidr,
    Ipv6Cidr,
    Domain,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Ipv4Cidr => "ipv4-cidr",
            CandidateKind::Ipv6Cidr => "ipv6-cidr",
            CandidateKind::Domain => "domain",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CandidateKind::Ipv4Cidr => "IPv4 CIDRs",
            CandidateKind::Ipv6Cidr => "IPv6 CIDRs",
            CandidateKind::Domain => "domains",
        }
    }
}

/// A raw extracted string span, prior to filtering. IP candidates keep
/// their matched spelling; domain candidates are lowercased by the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub value: String,
}

impl Candidate {
    pub fn new(kind: CandidateKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Classify a CIDR string from a structured field by address family.
    pub fn classify_ip(value: &str) -> Self {
        let kind = if value.contains(':') {
            CandidateKind::Ipv6Cidr
        } else {
            CandidateKind::Ipv4Cidr
        };
        Self::new(kind, value)
    }
}
