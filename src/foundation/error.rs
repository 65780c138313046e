/// Convenience result type used across strata.
pub type StrataResult<T> = Result<T, StrataError>;

/// Error taxonomy for construction-time APIs.
///
/// Playback entry points (`play`, `reset`, scroll handlers) never return these; they log and
/// degrade instead.
#[derive(thiserror::Error, Debug)]
pub enum StrataError {
    /// The container a vignette binds to is not present on the surface.
    #[error("missing container for era '{era}': no element matches '{selector}'")]
    MissingContainer {
        /// Era key the vignette was being bound for.
        era: String,
        /// Selector that failed to resolve.
        selector: String,
    },

    /// Invalid geometry, configuration, or builder input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StrataError {
    /// Build a [`StrataError::MissingContainer`] value.
    pub fn missing_container(era: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::MissingContainer {
            era: era.into(),
            selector: selector.into(),
        }
    }

    /// Build a [`StrataError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// `true` for the one error kind the registry turns into an absent entry.
    pub fn is_missing_container(&self) -> bool {
        matches!(self, Self::MissingContainer { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
