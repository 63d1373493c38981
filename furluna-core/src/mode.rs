//! Runtime mode configuration for Furluna.

use serde::{Deserialize, Serialize};

/// Runtime mode for Furluna services.
///
/// Controls whether the hospital listing is built from the real places API
/// or from built-in demo data, so the site can be developed offline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuntimeMode {
    /// Production mode - queries the real places API
    #[default]
    Production,
    /// Development mode - uses demo places, no network access
    Development,
}

impl std::fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "PRODUCTION"),
            Self::Development => write!(f, "DEVELOPMENT"),
        }
    }
}

impl std::str::FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(format!(
                "Invalid runtime mode: '{s}'. Valid options are: production, development"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_mode_parsing() {
        assert_eq!(
            "prod".parse::<RuntimeMode>().unwrap(),
            RuntimeMode::Production
        );
        assert_eq!(
            "Development".parse::<RuntimeMode>().unwrap(),
            RuntimeMode::Development
        );
        assert!("staging".parse::<RuntimeMode>().is_err());
    }

    #[test]
    fn test_default_is_production() {
        assert_eq!(RuntimeMode::default(), RuntimeMode::Production);
        assert_eq!(RuntimeMode::Development.to_string(), "DEVELOPMENT");
    }
}
