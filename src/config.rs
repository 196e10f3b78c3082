// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{HarvestError, Result};
use crate::models::{CandidateKind, ContentKind, JsonShape, SourceConfig};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub name: String,
    pub title: String,
    pub sources: Vec<SourceConfig>,
    pub ruleset: RulesetConfig,
    pub outputs: Vec<OutputFileConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesetConfig {
    pub kinds: Vec<CandidateKind>,
    #[serde(default)]
    pub ipv6_requires_prefix: bool,
    #[serde(default)]
    pub domain_substrings: Vec<String>,
}

impl RulesetConfig {
    pub fn extracts(&self, kind: CandidateKind) -> bool {
        self.kinds.contains(&kind)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputFileConfig {
    pub file_name: String,
    /// Kinds emitted into this file, in section order.
    pub kinds: Vec<CandidateKind>,
    #[serde(default)]
    pub header: bool,
    #[serde(default)]
    pub section_labels: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("RANGE_HARVEST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| HarvestError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| HarvestError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.name == name)
    }

    pub fn default_config() -> Self {
        Self {
            fetch: FetchConfig {
                timeout_secs: 30,
                user_agent: format!("range_harvest/{}", env!("CARGO_PKG_VERSION")),
                concurrency: 4,
            },
            output: OutputConfig {
                directory: PathBuf::from("./lists"),
            },
            providers: vec![
                cloudflare_provider(),
                apple_provider(),
                google_provider(),
                microsoft_provider(),
                proofpoint_provider(),
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(HarvestError::Config(
                "fetch.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.fetch.concurrency == 0 {
            return Err(HarvestError::Config(
                "fetch.concurrency must be greater than 0".to_string(),
            ));
        }

        if self.providers.is_empty() {
            return Err(HarvestError::Config(
                "at least one provider must be configured".to_string(),
            ));
        }

        for provider in &self.providers {
            if provider.sources.is_empty() {
                return Err(HarvestError::Config(format!(
                    "provider {} has no sources",
                    provider.name
                )));
            }

            if provider.outputs.is_empty() {
                return Err(HarvestError::Config(format!(
                    "provider {} has no output files",
                    provider.name
                )));
            }

            for source in &provider.sources {
                if let crate::models::SourceLocation::Remote(url) = &source.location {
                    Validator::validate_url(url).map_err(|e| {
                        HarvestError::Config(format!(
                            "provider {} source {}: {}",
                            provider.name, source.id, e
                        ))
                    })?;
                }
            }

            for output in &provider.outputs {
                Validator::validate_file_name(&output.file_name)?;
                if output.kinds.is_empty() {
                    return Err(HarvestError::Config(format!(
                        "output file {} lists no kinds",
                        output.file_name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn cloudflare_provider() -> ProviderConfig {
    ProviderConfig {
        name: "cloudflare".to_string(),
        title: "Cloudflare IP Ranges (IPv4 + IPv6)".to_string(),
        sources: vec![
            SourceConfig::remote("ips-v4", "https://www.cloudflare.com/ips-v4", ContentKind::Text),
            SourceConfig::remote("ips-v6", "https://www.cloudflare.com/ips-v6", ContentKind::Text),
        ],
        ruleset: RulesetConfig {
            kinds: vec![CandidateKind::Ipv4Cidr, CandidateKind::Ipv6Cidr],
            ipv6_requires_prefix: false,
            domain_substrings: vec![],
        },
        outputs: vec![OutputFileConfig {
            file_name: "cloudflare-ips.txt".to_string(),
            kinds: vec![CandidateKind::Ipv4Cidr, CandidateKind::Ipv6Cidr],
            header: true,
            section_labels: true,
        }],
    }
}

fn apple_provider() -> ProviderConfig {
    ProviderConfig {
        name: "apple".to_string(),
        title: "Apple Domains and IP Ranges".to_string(),
        sources: vec![
            SourceConfig::remote(
                "support-page",
                "https://support.apple.com/en-us/101555",
                ContentKind::Html,
            ),
            SourceConfig::remote(
                "community-domains",
                "https://raw.githubusercontent.com/0xDanielLopez/apple-domains/main/domains.txt",
                ContentKind::Text,
            ),
            // Enriches the IP list; losing it only shrinks the output.
            SourceConfig::remote(
                "relay-egress",
                "https://mask-api.icloud.com/egress-ip-ranges.csv",
                ContentKind::Csv,
            )
            .supplementary(),
        ],
        ruleset: RulesetConfig {
            kinds: vec![
                CandidateKind::Ipv4Cidr,
                CandidateKind::Ipv6Cidr,
                CandidateKind::Domain,
            ],
            ipv6_requires_prefix: true,
            domain_substrings: vec![
                "apple.com".to_string(),
                "icloud.com".to_string(),
                "mzstatic.com".to_string(),
                "akamaiedge.net".to_string(),
                "aaplimg.com".to_string(),
                "cdn-apple.com".to_string(),
            ],
        },
        outputs: vec![
            OutputFileConfig {
                file_name: "APPLE-DOMAINS.txt".to_string(),
                kinds: vec![CandidateKind::Domain],
                header: false,
                section_labels: false,
            },
            OutputFileConfig {
                file_name: "APPLE-IP-RANGES.txt".to_string(),
                kinds: vec![CandidateKind::Ipv4Cidr, CandidateKind::Ipv6Cidr],
                header: false,
                section_labels: false,
            },
        ],
    }
}

fn google_provider() -> ProviderConfig {
    ProviderConfig {
        name: "google".to_string(),
        title: "Google IP Ranges".to_string(),
        sources: vec![
            SourceConfig::remote("goog", "https://www.gstatic.com/ipranges/goog.json", ContentKind::Json)
                .with_json_shape(JsonShape::Prefixes),
            SourceConfig::remote("cloud", "https://www.gstatic.com/ipranges/cloud.json", ContentKind::Json)
                .with_json_shape(JsonShape::Prefixes),
        ],
        ruleset: RulesetConfig {
            kinds: vec![CandidateKind::Ipv4Cidr, CandidateKind::Ipv6Cidr],
            ipv6_requires_prefix: false,
            domain_substrings: vec![],
        },
        outputs: vec![OutputFileConfig {
            file_name: "ips_google.txt".to_string(),
            kinds: vec![CandidateKind::Ipv4Cidr, CandidateKind::Ipv6Cidr],
            header: false,
            section_labels: false,
        }],
    }
}

fn microsoft_provider() -> ProviderConfig {
    ProviderConfig {
        name: "microsoft".to_string(),
        title: "Microsoft 365 Endpoints".to_string(),
        sources: vec![
            SourceConfig::local("worldwide-endpoints", "worldwide.json", ContentKind::Json)
                .with_json_shape(JsonShape::Scopes)
                .with_missing_hint(
                    "download the worldwide endpoints document from \
                     https://endpoints.office.com/endpoints/worldwide?clientrequestid=<guid> \
                     and save it as worldwide.json in the working directory",
                ),
        ],
        ruleset: RulesetConfig {
            kinds: vec![
                CandidateKind::Ipv4Cidr,
                CandidateKind::Ipv6Cidr,
                CandidateKind::Domain,
            ],
            ipv6_requires_prefix: false,
            domain_substrings: vec![
                "microsoft.com".to_string(),
                "office.com".to_string(),
                "office365.com".to_string(),
                "outlook.com".to_string(),
                "windows.net".to_string(),
                "azure.com".to_string(),
                "live.com".to_string(),
                "lync.com".to_string(),
                "sharepoint.com".to_string(),
                "skype.com".to_string(),
            ],
        },
        outputs: vec![
            OutputFileConfig {
                file_name: "ips.txt".to_string(),
                kinds: vec![CandidateKind::Ipv4Cidr, CandidateKind::Ipv6Cidr],
                header: false,
                section_labels: false,
            },
            OutputFileConfig {
                file_name: "urls.txt".to_string(),
                kinds: vec![CandidateKind::Domain],
                header: false,
                section_labels: false,
            },
        ],
    }
}

fn proofpoint_provider() -> ProviderConfig {
    ProviderConfig {
        name: "proofpoint".to_string(),
        title: "Proofpoint Essentials IP Ranges".to_string(),
        sources: vec![
            SourceConfig::local("connection-details-page", "proofpoint_page.html", ContentKind::Html)
                .with_missing_hint(
                    "log in to https://help.proofpoint.com, open Essentials > Product \
                     Documentation > Email Security > Mail Services > Connection Details, \
                     view the page source (Ctrl+U) and save it as proofpoint_page.html \
                     in the working directory",
                ),
        ],
        ruleset: RulesetConfig {
            kinds: vec![CandidateKind::Ipv4Cidr],
            ipv6_requires_prefix: false,
            domain_substrings: vec![],
        },
        outputs: vec![OutputFileConfig {
            file_name: "proofpoint-ips-fetched.txt".to_string(),
            kinds: vec![CandidateKind::Ipv4Cidr],
            header: true,
            section_labels: false,
        }],
    }
}
