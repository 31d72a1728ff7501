use chasm::SyntaxError;
use std::{error::Error, fmt};

/// Errors that can surface from loading or stepping a CH machine.
///
/// Nothing is retried: every variant is propagated out of `cargar`/`step` without mutating the
/// state that was passed in, since both operate on a copy.
#[derive(Clone, Debug, PartialEq)]
pub enum ChError {
    /// A program failed verification at load time.
    InvalidProgram(SyntaxError),
    /// The machine does not have enough free memory to admit a program.
    OutOfMemory,
    /// A program's counter pointed outside its own code region.
    SegmentationFault(String),
    /// A runtime arithmetic failure (division/modulo by zero, `0^negative`).
    ExecutionError(String),
}

impl fmt::Display for ChError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChError::InvalidProgram(err) => write!(f, "invalid program: {}", err),
            ChError::OutOfMemory => {
                write!(f, "la máquina no cuenta con la memoria suficiente para almacenar el programa")
            }
            ChError::SegmentationFault(msg) => write!(f, "{}", msg),
            ChError::ExecutionError(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for ChError {}

impl From<SyntaxError> for ChError {
    fn from(err: SyntaxError) -> ChError {
        ChError::InvalidProgram(err)
    }
}

pub type Result<T> = std::result::Result<T, ChError>;
