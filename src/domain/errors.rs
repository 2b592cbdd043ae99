#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The document is not valid JSON.
    ParseError(String),
    /// The document is JSON but not a `"row,col" -> color` object.
    SchemaError(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::ParseError(msg) => {
                write!(f, "Invalid JSON: {}", msg)
            }
            DomainError::SchemaError(msg) => {
                write!(f, "Invalid color map: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
