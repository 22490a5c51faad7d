use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - site.base_url parses as a URL
/// - site.base_url uses an http(s) scheme
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = Url::parse(&config.site.base_url).map_err(|e| {
        ConfigError::ValidationError(format!("site.base_url is not a valid URL: {}", e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "site.base_url must use http or https, got {}",
            url.scheme()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_validate_valid_config() {
        let config = Config {
            site: SiteConfig::default(),
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_unparseable_url_fails() {
        let config = Config {
            site: SiteConfig {
                base_url: "not a url".to_string(),
            },
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_validate_non_http_scheme_fails() {
        let config = Config {
            site: SiteConfig {
                base_url: "ftp://example.org/".to_string(),
            },
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }
}
