use thiserror::Error;
use std::path::PathBuf;

/// The main result type for propcast-core operations.
pub type PropcastResult<T> = Result<T, PropcastError>;

/// Errors raised while preparing configuration at startup.
///
/// Looking up a key never fails; these only come from parsing a placeholder
/// expression or loading a properties file.
#[derive(Error, Debug)]
pub enum PropcastError {
    #[error("Invalid placeholder '{expression}': {reason}")]
    InvalidPlaceholder { expression: String, reason: String },

    #[error("Could not resolve placeholder '{0}': no source defines it and no default is given")]
    UnresolvedPlaceholder(String),

    #[error("I/O error accessing path {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed properties file {path:?} at line {line}: {reason}")]
    Properties {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_invalid_placeholder() {
        let err = PropcastError::InvalidPlaceholder {
            expression: "${:x}".to_string(),
            reason: "empty key".to_string(),
        };
        assert_eq!(format!("{}", err), "Invalid placeholder '${:x}': empty key");
    }

    #[test]
    fn test_error_display_unresolved_placeholder() {
        let err = PropcastError::UnresolvedPlaceholder("test".to_string());
        assert_eq!(
            format!("{}", err),
            "Could not resolve placeholder 'test': no source defines it and no default is given"
        );
    }

    #[test]
    fn test_error_display_io_error() {
        let path = PathBuf::from("/tmp/application.properties");
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = PropcastError::Io { path, source: io_err };
        // io::Error formatting differs across platforms, check the stable parts.
        assert!(format!("{}", err).contains("I/O error accessing path \"/tmp/application.properties\""));
        assert!(format!("{}", err).contains("file not found"));
    }

    #[test]
    fn test_error_display_properties() {
        let err = PropcastError::Properties {
            path: PathBuf::from("app.properties"),
            line: 3,
            reason: "bad unicode escape".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Malformed properties file \"app.properties\" at line 3: bad unicode escape"
        );
    }
}
