#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement: {0}")]
    SyntaxError(String),
    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),
    #[error("ID must be positive.")]
    NegativeId,
    #[error("String is too long.")]
    StringTooLong,
}

impl From<sqlparser::parser::ParserError> for PrepareError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        PrepareError::SyntaxError(err.to_string())
    }
}
