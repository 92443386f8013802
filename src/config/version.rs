//! MoySklad JSON API version definitions.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// MoySklad JSON API version.
///
/// The version is the path segment after the base URL
/// (`https://api.moysklad.ru/api/remap/1.2/entity/...`).
///
/// # Example
///
/// ```rust
/// use moysklad_api::ApiVersion;
///
/// let version: ApiVersion = "1.2".parse().unwrap();
/// assert_eq!(version, ApiVersion::V1_2);
/// assert_eq!(ApiVersion::latest().to_string(), "1.2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// JSON API 1.2
    V1_2,
    /// Version string for releases this crate does not know yet.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest known version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V1_2
    }

    /// Returns `true` for versions this crate was written against.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some((major, minor)) = s.split_once('.') else {
            return false;
        };
        let numeric = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
        numeric(major) && numeric(minor)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1_2 => f.write_str("1.2"),
            Self::Custom(s) => f.write_str(s),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "1.2" => Ok(Self::V1_2),
            _ if Self::is_valid_version_format(s) => Ok(Self::Custom(s.to_string())),
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_version() {
        assert_eq!("1.2".parse::<ApiVersion>().unwrap(), ApiVersion::V1_2);
        assert_eq!(" 1.2 ".parse::<ApiVersion>().unwrap(), ApiVersion::V1_2);
    }

    #[test]
    fn test_api_version_parses_future_versions() {
        let version: ApiVersion = "1.3".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("1.3".to_string()));
        assert!(!version.is_known());
        assert_eq!(version.to_string(), "1.3");
    }

    #[test]
    fn test_api_version_rejects_invalid() {
        assert!("invalid".parse::<ApiVersion>().is_err());
        assert!("1".parse::<ApiVersion>().is_err());
        assert!("1.".parse::<ApiVersion>().is_err());
        assert!("v1.2".parse::<ApiVersion>().is_err());
        assert!("1.2.3".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_api_version_latest() {
        assert!(ApiVersion::latest().is_known());
        assert_eq!(ApiVersion::default(), ApiVersion::V1_2);
    }
}
