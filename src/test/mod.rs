use crate::algoritmo::Algoritmo;
use crate::cell::{Cell, CellType};
use crate::io::Keyboard;
use crate::machine::Maquina;
use crate::state::State;
use chasm::Tipo;

mod scenarios;

/// Always returns the same canned line, mirroring `test_maquina.py::TecladoFalso`.
pub(crate) struct TecladoFalso;

impl Keyboard for TecladoFalso {
    fn lea(&mut self) -> String {
        "entrada de usuario".to_string()
    }
}

pub(crate) fn maquina() -> Maquina {
    Maquina::new_seeded(1024, 128, Box::new(TecladoFalso), None, Algoritmo::Fcfs, 0)
}

/// Loads `fuente` into a fresh machine and runs it to completion (or `pasos` steps).
pub(crate) fn cargar_y_correr(maquina: &mut Maquina, fuente: &str, pasos: Option<usize>) -> State {
    let estado = maquina.encender();
    let cargado = maquina.cargar(&estado, fuente).unwrap();
    maquina.correr(&cargado, pasos).unwrap()
}

/// `asignar_variable`'s `Asignacion::Cell` path (a full cell record replaces the cell outright,
/// rather than just updating `valor`) has no instruction caller — no CH instruction needs it —
/// but `spec.md` §4.2 names it as a primitive of `State` in its own right, mirroring
/// `estado.py::asignar_variable`'s dual `str`-or-`dict` argument. Exercised directly here.
#[test]
fn asignar_variable_con_celda_completa_reemplaza_la_celda() {
    let mut m = maquina();
    let estado = m.encender();
    let mut cargado = m.cargar(&estado, "nueva variable I 1\nretorne 0").unwrap();

    let reemplazo = Cell {
        programa: "000".to_string(),
        nombre: "variable".to_string(),
        tipo: CellType::Dato(Tipo::I),
        valor: "42".to_string(),
    };
    cargado
        .asignar_variable("000", "variable", reemplazo.clone())
        .unwrap();

    assert_eq!(cargado.buscar_variable("000", "variable").unwrap(), reemplazo);
}
