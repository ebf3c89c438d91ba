//! Database configuration.

use filedb_codec::JsonStyle;

/// Configuration for opening collections and databases.
#[derive(Debug, Clone)]
pub struct Config {
    /// Formatting used when rewriting collection documents.
    pub json_style: JsonStyle,

    /// Whether to fsync each rewritten document before it replaces the old one.
    pub sync_on_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            json_style: JsonStyle::Compact,
            sync_on_write: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document formatting.
    #[must_use]
    pub const fn json_style(mut self, style: JsonStyle) -> Self {
        self.json_style = style;
        self
    }

    /// Switches between indented and compact documents.
    #[must_use]
    pub const fn pretty_json(mut self, value: bool) -> Self {
        self.json_style = if value {
            JsonStyle::Pretty
        } else {
            JsonStyle::Compact
        };
        self
    }

    /// Sets whether to fsync on every write.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.json_style, JsonStyle::Compact);
        assert!(config.sync_on_write);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().pretty_json(true).sync_on_write(false);

        assert_eq!(config.json_style, JsonStyle::Pretty);
        assert!(!config.sync_on_write);
    }
}
