use thiserror::Error;

/// Errores del núcleo de parsing.
///
/// Solo el registro de prefijos y la construcción de modos personalizados
/// pueden fallar; el parser en sí es total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl QueryError {
    pub(crate) fn empty_prefix() -> Self {
        QueryError::InvalidArgument("prefix must not be empty or whitespace".to_string())
    }
}
