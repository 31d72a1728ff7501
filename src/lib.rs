//! Virtual machine for the CH assembler-like language.
//!
//! A [`Maquina`] holds fixed configuration (memory size, kernel reservation, scheduling quantum
//! and policy) plus the keyboard `lea` reads from and the RNG instruction durations are drawn
//! from. [`State`] is the pure value it operates on: memory, per-program metadata, variable and
//! label tables, the ready queue, output logs and the clock. `Maquina::cargar` admits a verified
//! program into a state; `Maquina::paso`/`correr`/`iterar` step it forward.
//!
//! Source verification (syntax checking, normalization, variable/label extraction) lives in the
//! sibling [`chasm`] crate; `Maquina::cargar` calls it before admitting a program.

pub mod algoritmo;
pub mod cell;
pub mod error;
pub mod instructions;
pub mod io;
pub mod machine;
pub mod program;
pub mod state;

pub use algoritmo::Algoritmo;
pub use cell::{Cell, CellType};
pub use error::{ChError, Result};
pub use io::{Keyboard, NullKeyboard};
pub use machine::{Iterador, Maquina};
pub use program::Program;
pub use state::{Asignacion, State};

#[cfg(test)]
mod test;
