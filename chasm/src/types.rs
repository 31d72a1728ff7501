use crate::error::SyntaxError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^-?\d+\s*$").unwrap();
    static ref REAL: Regex = Regex::new(r"^-?\d+\.?\d*\s*$").unwrap();
}

/// The four CH variable types. Type tokens are case-insensitive in source.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Tipo {
    C,
    I,
    R,
    L,
}

impl Tipo {
    pub(crate) fn parse(token: &str, line: usize) -> Result<Tipo, SyntaxError> {
        match token.to_uppercase().as_str() {
            "C" => Ok(Tipo::C),
            "I" => Ok(Tipo::I),
            "R" => Ok(Tipo::R),
            "L" => Ok(Tipo::L),
            _ => Err(SyntaxError::InvalidType {
                line,
                text: token.to_string(),
            }),
        }
    }

    /// The default `valor` used when `nueva` omits an initializer.
    pub(crate) fn default_value(self) -> &'static str {
        match self {
            Tipo::C => " ",
            Tipo::I => "0",
            Tipo::R => "0.0",
            Tipo::L => "0",
        }
    }

    /// Checks whether `valor` matches this type's syntax.
    pub(crate) fn matches(self, valor: &str) -> bool {
        match self {
            Tipo::C => true,
            Tipo::I => INTEGER.is_match(valor),
            Tipo::R => REAL.is_match(valor),
            Tipo::L => valor == "0" || valor == "1",
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Tipo::C => "C",
            Tipo::I => "I",
            Tipo::R => "R",
            Tipo::L => "L",
        }
    }
}
