use std::{error::Error, fmt};

/// Indicates a syntax error found while verifying a CH program.
///
/// Every variant carries the zero-based source line number it was found on, matching the line
/// indices `labels` point at.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SyntaxError {
    UnknownInstruction { line: usize, text: String },
    WrongArity { line: usize, expected: String, found: usize },
    InvalidType { line: usize, text: String },
    TypeMismatch { line: usize, tipo: String, valor: String },
    UndefinedVariable { line: usize, variable: String },
    ReservedName { line: usize, variable: String },
    MissingLabels { labels: Vec<String> },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyntaxError::UnknownInstruction { line, text } => {
                write!(f, "line {}: unknown instruction '{}'", line, text)
            }
            SyntaxError::WrongArity { line, expected, found } => write!(
                f,
                "line {}: expected {} argument(s), found {}",
                line, expected, found
            ),
            SyntaxError::InvalidType { line, text } => {
                write!(f, "line {}: '{}' is not a valid type", line, text)
            }
            SyntaxError::TypeMismatch { line, tipo, valor } => write!(
                f,
                "line {}: value '{}' is not of type {}",
                line, valor, tipo
            ),
            SyntaxError::UndefinedVariable { line, variable } => write!(
                f,
                "line {}: variable '{}' is not defined before use",
                line, variable
            ),
            SyntaxError::ReservedName { line, variable } => write!(
                f,
                "line {}: '{}' is a reserved name and cannot be declared",
                line, variable
            ),
            SyntaxError::MissingLabels { labels } => {
                write!(f, "undefined labels: {}", labels.join(", "))
            }
        }
    }
}

impl Error for SyntaxError {}
