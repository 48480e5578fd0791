//! Error types for ChakraDrive

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ChakraDrive error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid drivebase, hardware or tuning value.
    ///
    /// Raised only while building configuration. A robot must not start
    /// with one of these outstanding.
    #[error("Configuration error: {field} = {value} ({reason})")]
    Config {
        /// Dotted path of the offending field, e.g. `modules[2].drive_id`
        field: String,
        /// Offending value, formatted for display
        value: String,
        /// What the value violated
        reason: &'static str,
    },

    /// Unrecognised robot type name in a profile or on the command line
    #[error("Unknown robot type: {0}")]
    UnknownRobotType(String),

    /// Malformed command line
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Profile serialization error
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Error {
    /// Build a [`Error::Config`] for `field` holding `value`.
    pub fn config(field: impl Into<String>, value: impl ToString, reason: &'static str) -> Self {
        Error::Config {
            field: field.into(),
            value: value.to_string(),
            reason,
        }
    }

    /// True for [`Error::Config`].
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. })
    }

    /// Offending field name, for configuration errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Config { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::config(field, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(Error::config(field, value, "must be > 0"));
    }
    Ok(())
}

/// Reject anything that is not a finite, non-negative number.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::config(field, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(Error::config(field, value, "must be >= 0"));
    }
    Ok(())
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::config(field, value, "must be finite"));
    }
    Ok(())
}
