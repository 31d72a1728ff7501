/// The core's only input collaborator: something that can block for a line of text.
///
/// The graphical control panel, file dialogs, and the concrete keyboard/printer/screen widgets
/// stay outside this crate; this trait is the thin seam a caller plugs a real input source into.
/// Grounded in `maquina.py::TecladoEnConsola`, the one concrete keyboard the original ships.
pub trait Keyboard {
    fn lea(&mut self) -> String;
}

/// A keyboard that never blocks, always returning the empty string. Useful for tests and for
/// running programs that never call `lea`.
#[derive(Default)]
pub struct NullKeyboard;

impl Keyboard for NullKeyboard {
    fn lea(&mut self) -> String {
        String::new()
    }
}
