// file: src/utils/validation.rs
// description: configuration validation helpers
// reference: input validation patterns

use crate::error::{HarvestError, Result};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(HarvestError::Config(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    /// Output file names are joined onto the output directory; a path
    /// separator inside one would escape it.
    pub fn validate_file_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(HarvestError::Config(
                "Output file name cannot be empty".to_string(),
            ));
        }

        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(HarvestError::Config(format!(
                "Invalid output file name: {}",
                name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(Validator::validate_file_name("cloudflare-ips.txt").is_ok());
        assert!(Validator::validate_file_name("APPLE-DOMAINS.txt").is_ok());
        assert!(Validator::validate_file_name("").is_err());
        assert!(Validator::validate_file_name("../escape.txt").is_err());
        assert!(Validator::validate_file_name("nested/file.txt").is_err());
    }
}
