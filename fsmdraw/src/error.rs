use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
    // field names avoid `source`, which thiserror reserves for error chaining
    #[error("action '{action}' already has an arrow from '{from}' to '{to}'")]
    DuplicateArrow {
        action: String,
        from: String,
        to: String,
    },
    #[error("state '{0}' already exists")]
    DuplicateState(String),
    #[error("invalid diagram structure: {0}")]
    InvalidStructure(String),
    #[error("{what} exceeds the limit of {max}")]
    CapsExceeded { what: &'static str, max: usize },
    #[error("{0} is out of bounds")]
    OutOfBounds(&'static str),
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("invalid {kind} id {id}")]
    InvalidId { kind: &'static str, id: u32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl DiagramError {
    /// Stable machine-readable code, surfaced to JS callers.
    pub fn code(&self) -> &'static str {
        match self {
            DiagramError::DuplicateArrow { .. } => "duplicate_arrow",
            DiagramError::DuplicateState(_) => "duplicate_state",
            DiagramError::InvalidStructure(_) => "invalid_structure",
            DiagramError::CapsExceeded { .. } => "caps_exceeded",
            DiagramError::OutOfBounds(_) => "out_of_bounds",
            DiagramError::NonFinite(_) => "non_finite",
            DiagramError::InvalidId { .. } => "invalid_id",
            DiagramError::InvalidConfig(_) => "invalid_config",
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagramError>;
