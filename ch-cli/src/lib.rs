//! Library half of the `ch` command-line runner: the console keyboard `main.rs` wires into
//! [`ch::Maquina`].

use ch::Keyboard;
use std::io;

/// Reads `lea`'s input from stdin, one line per call, mirroring
/// `chmaquina.maquina.TecladoEnConsola`'s `input()`.
#[derive(Default)]
pub struct TecladoEnConsola;

impl Keyboard for TecladoEnConsola {
    fn lea(&mut self) -> String {
        let mut linea = String::new();
        match io::stdin().read_line(&mut linea) {
            Ok(0) | Err(_) => String::new(),
            Ok(_) => linea.trim_end_matches(['\n', '\r'].as_ref()).to_string(),
        }
    }
}

#[cfg(test)]
mod test;
