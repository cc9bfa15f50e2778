//! Errors raised while loading, validating or saving the config file.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config failures.
///
/// `Config::load_from` and `Config::save_to` return `anyhow::Result`, so
/// callers that care about the failure mode downcast:
///
/// ```rust,no_run
/// use gzcore_config::ConfigError;
///
/// fn describe(e: &anyhow::Error) {
///     match e.downcast_ref::<ConfigError>() {
///         Some(ConfigError::Validation { field, .. }) => eprintln!("fix {field}"),
///         Some(other) => eprintln!("{other}"),
///         None => eprintln!("{e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Serializing the in-memory config failed.
    #[error("cannot serialize config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A setting is out of range. `field` is the dotted YAML path.
    #[error("{field} must be {expected}, got {value}")]
    Validation {
        field: &'static str,
        expected: String,
        value: i64,
    },
}

impl ConfigError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path) -> impl FnOnce(serde_yaml_ng::Error) -> Self + '_ {
        move |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The offending setting, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = ConfigError::Validation {
            field: "render.screen_blocks",
            expected: "between 0 and 12".to_string(),
            value: 40,
        };
        assert_eq!(
            err.to_string(),
            "render.screen_blocks must be between 0 and 12, got 40"
        );
        assert_eq!(err.field(), Some("render.screen_blocks"));
    }

    #[test]
    fn test_io_error_keeps_path_and_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConfigError::io(Path::new("/tmp/gz.yaml"))(source);
        assert!(err.to_string().starts_with("cannot access config file /tmp/gz.yaml"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.field(), None);
    }
}
