/// Convenience result type used across panslide.
pub type PanslideResult<T> = Result<T, PanslideError>;

/// Top-level error taxonomy used by presentation APIs.
#[derive(thiserror::Error, Debug)]
pub enum PanslideError {
    /// A scene lookup by element id found nothing.
    #[error("element not found: '{0}'")]
    ElementNotFound(String),

    /// `undo` (or a viewport change before wiring) ran without a captured snapshot.
    #[error("action not armed: {0}")]
    PrecondNotArmed(String),

    /// Geometry with zero, negative or non-finite extent fed into a division.
    #[error("degenerate geometry: {0}")]
    GeometryDegenerate(String),

    /// Invalid user-provided presentation or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Sequencer used out of order.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanslideError {
    /// Build a [`PanslideError::ElementNotFound`] value.
    pub fn element_not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound(id.into())
    }

    /// Build a [`PanslideError::PrecondNotArmed`] value.
    pub fn not_armed(msg: impl Into<String>) -> Self {
        Self::PrecondNotArmed(msg.into())
    }

    /// Build a [`PanslideError::GeometryDegenerate`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::GeometryDegenerate(msg.into())
    }

    /// Build a [`PanslideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PanslideError::Navigation`] value.
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build a [`PanslideError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Stable short name of the error kind, used in reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ElementNotFound(_) => "element_not_found",
            Self::PrecondNotArmed(_) => "precond_not_armed",
            Self::GeometryDegenerate(_) => "geometry_degenerate",
            Self::Validation(_) => "validation",
            Self::Navigation(_) => "navigation",
            Self::Serde(_) => "serde",
            Self::Other(_) => "other",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
