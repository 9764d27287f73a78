//! Marker configuration.
//!
//! A marker is `<number><after_number><space_after_number>`, `"1.\u{a0}"`
//! with the defaults. The two trailing pieces are configurable and can be
//! loaded from TOML:
//!
//! ```toml
//! after_number = ")"
//! space_after_number = "\u00a0"
//! ```

use rtv_core::grapheme::len_graphemes;
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

pub const DEFAULT_AFTER_NUMBER: &str = ".";
pub const DEFAULT_SPACE_AFTER_NUMBER: &str = "\u{00A0}";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error(transparent)]
  Parse(#[from] toml::de::Error),
  #[error("`after_number` must not be empty")]
  EmptyAfterNumber,
  #[error("`space_after_number` must be exactly one grapheme, got {0:?}")]
  InvalidSpace(String),
  #[error("marker trailer {0:?} must not contain digits or line breaks")]
  InvalidTrailer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
  pub after_number:       String,
  pub space_after_number: String,
}

impl Default for ListConfig {
  fn default() -> Self {
    Self {
      after_number:       DEFAULT_AFTER_NUMBER.to_string(),
      space_after_number: DEFAULT_SPACE_AFTER_NUMBER.to_string(),
    }
  }
}

impl ListConfig {
  /// Parses and validates a TOML document. Missing keys take their defaults.
  pub fn from_toml(source: &str) -> Result<Self> {
    let config: Self = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    if self.after_number.is_empty() {
      return Err(ConfigError::EmptyAfterNumber);
    }
    if len_graphemes(&self.space_after_number) != 1 {
      return Err(ConfigError::InvalidSpace(self.space_after_number.clone()));
    }

    let trailer = self.trailer();
    if trailer
      .chars()
      .any(|c| c.is_ascii_digit() || c == '\n' || c == '\r')
    {
      return Err(ConfigError::InvalidTrailer(trailer));
    }
    Ok(())
  }

  /// Everything that follows the number in a marker.
  pub fn trailer(&self) -> String {
    format!("{}{}", self.after_number, self.space_after_number)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = ListConfig::default();
    assert_eq!(config.trailer(), ".\u{a0}");
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_from_toml() {
    let config = ListConfig::from_toml("after_number = \")\"").unwrap();
    assert_eq!(config.after_number, ")");
    assert_eq!(config.space_after_number, DEFAULT_SPACE_AFTER_NUMBER);
    assert_eq!(ListConfig::from_toml("").unwrap(), ListConfig::default());

    let config = ListConfig::from_toml("space_after_number = \"\\u2007\"").unwrap();
    assert_eq!(config.trailer(), ".\u{2007}");
  }

  #[test]
  fn test_invalid_configs() {
    assert!(matches!(
      ListConfig::from_toml("after_number = 3"),
      Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
      ListConfig::from_toml("after_number = \"\""),
      Err(ConfigError::EmptyAfterNumber)
    ));
    assert!(matches!(
      ListConfig::from_toml("space_after_number = \"  \""),
      Err(ConfigError::InvalidSpace(_))
    ));
    assert!(matches!(
      ListConfig::from_toml("after_number = \"1.\""),
      Err(ConfigError::InvalidTrailer(_))
    ));
    assert!(matches!(
      ListConfig::from_toml("after_number = \".\\n\""),
      Err(ConfigError::InvalidTrailer(_))
    ));
  }
}
