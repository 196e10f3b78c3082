// file: src/extractor/structured.rs
// description: fixed-field extraction for json manifests and csv feeds
// reference: gstatic ipranges manifest and endpoints document layouts

use crate::error::{HarvestError, Result};
use crate::extractor::patterns::IPV4_CIDR_EXACT;
use crate::models::{Candidate, CandidateKind, JsonShape, RawDocument};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PrefixManifest {
    prefixes: Vec<PrefixEntry>,
}

#[derive(Debug, Deserialize)]
struct PrefixEntry {
    #[serde(rename = "ipv4Prefix")]
    ipv4_prefix: Option<String>,
    #[serde(rename = "ipv6Prefix")]
    ipv6_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EndpointScope {
    #[serde(default)]
    ips: Vec<String>,
    #[serde(default)]
    urls: Vec<String>,
}

/// Reads fixed structured fields instead of pattern matching. Json sources
/// must carry the expected top-level shape; csv sources contribute their
/// first column when it is an exact IPv4 CIDR.
pub struct StructuredExtractor;

impl StructuredExtractor {
    pub fn extract_json(document: &RawDocument) -> Result<Vec<Candidate>> {
        match document.source.json_shape.unwrap_or(JsonShape::Prefixes) {
            JsonShape::Prefixes => Self::extract_prefix_manifest(document),
            JsonShape::Scopes => Self::extract_endpoint_scopes(document),
        }
    }

    fn extract_prefix_manifest(document: &RawDocument) -> Result<Vec<Candidate>> {
        let manifest: PrefixManifest =
            serde_json::from_str(&document.body).map_err(|e| HarvestError::MalformedData {
                source_id: document.source.id.clone(),
                message: format!("expected a prefixes manifest: {}", e),
            })?;

        let mut candidates = Vec::new();
        for entry in manifest.prefixes {
            if let Some(prefix) = entry.ipv4_prefix {
                candidates.push(Candidate::new(CandidateKind::Ipv4Cidr, prefix));
            } else if let Some(prefix) = entry.ipv6_prefix {
                candidates.push(Candidate::new(CandidateKind::Ipv6Cidr, prefix));
            }
        }
        Ok(candidates)
    }

    fn extract_endpoint_scopes(document: &RawDocument) -> Result<Vec<Candidate>> {
        let scopes: Vec<EndpointScope> =
            serde_json::from_str(&document.body).map_err(|e| HarvestError::MalformedData {
                source_id: document.source.id.clone(),
                message: format!("expected an endpoint scope array: {}", e),
            })?;

        let mut candidates = Vec::new();
        for scope in scopes {
            for ip in scope.ips {
                candidates.push(Candidate::classify_ip(&ip));
            }
            for url in scope.urls {
                candidates.push(Candidate::new(CandidateKind::Domain, url));
            }
        }
        Ok(candidates)
    }

    pub fn extract_csv(document: &RawDocument) -> Result<Vec<Candidate>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .comment(Some(b'#'))
            .flexible(true)
            .from_reader(document.body.as_bytes());

        let mut candidates = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| HarvestError::MalformedData {
                source_id: document.source.id.clone(),
                message: format!("unreadable csv record: {}", e),
            })?;
            if let Some(first) = record.get(0) {
                let cidr = first.trim();
                if IPV4_CIDR_EXACT.is_match(cidr) {
                    candidates.push(Candidate::new(CandidateKind::Ipv4Cidr, cidr));
                }
            }
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, SourceConfig};
    use pretty_assertions::assert_eq;

    fn json_doc(body: &str, shape: JsonShape) -> RawDocument {
        RawDocument::new(
            SourceConfig::remote("test-json", "https://example.com/feed.json", ContentKind::Json)
                .with_json_shape(shape),
            body.to_string(),
        )
    }

    #[test]
    fn test_prefix_manifest_extraction() {
        let document = json_doc(
            r#"{"prefixes":[{"ipv4Prefix":"8.8.8.0/24"},{"ipv6Prefix":"2001:4860::/32"}]}"#,
            JsonShape::Prefixes,
        );
        let candidates = StructuredExtractor::extract_json(&document).unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0],
            Candidate::new(CandidateKind::Ipv4Cidr, "8.8.8.0/24")
        );
        assert_eq!(
            candidates[1],
            Candidate::new(CandidateKind::Ipv6Cidr, "2001:4860::/32")
        );
    }

    #[test]
    fn test_prefix_manifest_skips_unknown_entries() {
        let document = json_doc(
            r#"{"prefixes":[{"scope":"us-east1"},{"ipv4Prefix":"34.0.0.0/15"}]}"#,
            JsonShape::Prefixes,
        );
        let candidates = StructuredExtractor::extract_json(&document).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_missing_prefixes_is_malformed() {
        let document = json_doc(r#"{"creationTime":"2024-01-01"}"#, JsonShape::Prefixes);
        let err = StructuredExtractor::extract_json(&document).unwrap_err();
        assert!(matches!(err, HarvestError::MalformedData { .. }));
    }

    #[test]
    fn test_endpoint_scopes_extraction() {
        let document = json_doc(
            r#"[{"serviceArea":"Exchange","ips":["13.107.6.152/31","2603:1006::/40"],"urls":["outlook.office.com","*.protection.outlook.com"]},{"serviceArea":"Skype"}]"#,
            JsonShape::Scopes,
        );
        let candidates = StructuredExtractor::extract_json(&document).unwrap();

        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].kind, CandidateKind::Ipv4Cidr);
        assert_eq!(candidates[1].kind, CandidateKind::Ipv6Cidr);
        assert_eq!(candidates[2].kind, CandidateKind::Domain);
        assert_eq!(candidates[3].value, "*.protection.outlook.com");
    }

    #[test]
    fn test_scopes_require_array_shape() {
        let document = json_doc(r#"{"ips":["1.2.3.0/24"]}"#, JsonShape::Scopes);
        assert!(StructuredExtractor::extract_json(&document).is_err());
    }

    #[test]
    fn test_csv_first_column_with_validation() {
        let body = "\
# iCloud Private Relay egress ranges
172.224.224.0/27,US,US-CA,\n\
172.226.29.64/27,GB,,\n\
not-a-cidr,XX,,\n";
        let document = RawDocument::new(
            SourceConfig::remote("relay", "https://example.com/egress.csv", ContentKind::Csv),
            body.to_string(),
        );
        let candidates = StructuredExtractor::extract_csv(&document).unwrap();

        let values: Vec<&str> = candidates.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["172.224.224.0/27", "172.226.29.64/27"]);
        assert!(candidates.iter().all(|c| c.kind == CandidateKind::Ipv4Cidr));
    }

    #[test]
    fn test_csv_ignores_blank_lines() {
        let body = "172.224.224.0/27,US\n\n172.226.29.64/27,GB\n";
        let document = RawDocument::new(
            SourceConfig::remote("relay", "https://example.com/egress.csv", ContentKind::Csv),
            body.to_string(),
        );
        let candidates = StructuredExtractor::extract_csv(&document).unwrap();
        assert_eq!(candidates.len(), 2);
    }
}
