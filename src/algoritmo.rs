use util::{EnumFromStr, ParseEnumError};

/// Ready-queue ordering policy.
///
/// A closed, three-variant set, small enough to implement `EnumFromStr` by hand rather than
/// pull in a derive-macro crate for it.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Algoritmo {
    Fcfs,
    Sjf,
    Rr,
}

impl Default for Algoritmo {
    fn default() -> Algoritmo {
        Algoritmo::Fcfs
    }
}

impl EnumFromStr for Algoritmo {
    fn from_str(s: &str) -> Result<Algoritmo, ParseEnumError> {
        match s.to_uppercase().as_str() {
            "FCFS" => Ok(Algoritmo::Fcfs),
            "SJF" => Ok(Algoritmo::Sjf),
            "RR" => Ok(Algoritmo::Rr),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "Algoritmo",
            }),
        }
    }
}
