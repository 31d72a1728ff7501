use crate::cell::{Cell, CellType};
use crate::error::ChError;
use crate::program::Program;
use std::collections::HashMap;

/// What to write into a variable cell: either just the `valor` field (preserving type and name)
/// or a full replacement cell.
#[derive(Clone, Debug)]
pub enum Asignacion {
    Valor(String),
    Cell(Cell),
}

impl From<String> for Asignacion {
    fn from(valor: String) -> Asignacion {
        Asignacion::Valor(valor)
    }
}

impl From<Cell> for Asignacion {
    fn from(cell: Cell) -> Asignacion {
        Asignacion::Cell(cell)
    }
}

/// A full snapshot of the machine.
///
/// Every public mutator here acts in place; purity of `step` comes from `Maquina` always calling
/// [`State::copiar`] before mutating, not from `State` itself being immutable — matching
/// `estado.py`'s own shape (the object mutates, the *interpreter* is what copies first).
#[derive(Clone, Debug)]
pub struct State {
    pub memoria: Vec<Option<Cell>>,
    pub variables: HashMap<String, HashMap<String, usize>>,
    pub etiquetas: HashMap<String, HashMap<String, usize>>,
    pub programas: HashMap<String, Program>,
    pub listos: Vec<String>,
    pub pantalla: Vec<(String, String)>,
    pub impresora: Vec<(String, String)>,
    pub terminados: HashMap<String, Program>,
    pub pivote: usize,
    pub tiempo_llegada: u64,
    pub reloj: u64,
}

impl State {
    /// Builds a fresh state sized to the machine's memory. `pivote` starts just past the kernel
    /// region.
    pub fn para(tamano_memoria: usize, tamano_kernel: usize) -> State {
        State {
            memoria: vec![None; tamano_memoria],
            variables: HashMap::new(),
            etiquetas: HashMap::new(),
            programas: HashMap::new(),
            listos: Vec::new(),
            pantalla: Vec::new(),
            impresora: Vec::new(),
            terminados: HashMap::new(),
            pivote: tamano_kernel + 1,
            tiempo_llegada: 0,
            reloj: 0,
        }
    }

    /// Returns a deep copy. `State` has no shared interior mutability, so `Clone` already gives
    /// exactly this; kept as a named method to mirror `estado.py::copiar` at the call sites.
    pub fn copiar(&self) -> State {
        self.clone()
    }

    /// Returns `(program_id, code_string)` for the head of the ready queue, enforcing the
    /// segmentation rule that the fetched cell must belong to that program and be tagged
    /// `CODIGO`.
    pub fn siguiente_instruccion(&self) -> Result<Option<(String, String)>, ChError> {
        let nombre = match self.listos.first() {
            Some(n) => n.clone(),
            None => return Ok(None),
        };
        let programa = &self.programas[&nombre];
        let posicion = programa.inicio + programa.contador;
        let dato = self.memoria.get(posicion).and_then(|c| c.as_ref());

        match dato {
            Some(cell) if cell.tipo == CellType::Codigo && cell.programa == nombre => {
                Ok(Some((nombre.clone(), cell.valor.clone())))
            }
            _ => Err(ChError::SegmentationFault(format!(
                "el programa {} intentó ejecutar código fuera de su región de código",
                nombre
            ))),
        }
    }

    pub fn nada_por_hacer(&self) -> bool {
        self.listos.is_empty()
    }

    pub fn buscar_variable(&self, programa: &str, variable: &str) -> Result<Cell, ChError> {
        let posicion = self.variable_position(programa, variable)?;
        Ok(self.memoria[posicion]
            .clone()
            .expect("invariant: a registered variable position is always occupied"))
    }

    pub fn asignar_variable(
        &mut self,
        programa: &str,
        variable: &str,
        dato: impl Into<Asignacion>,
    ) -> Result<(), ChError> {
        let posicion = self.variable_position(programa, variable)?;
        match dato.into() {
            Asignacion::Valor(valor) => {
                if let Some(cell) = self.memoria[posicion].as_mut() {
                    cell.valor = valor;
                }
            }
            Asignacion::Cell(cell) => {
                self.memoria[posicion] = Some(cell);
            }
        }
        Ok(())
    }

    pub fn asignar_acumulador(
        &mut self,
        programa: &str,
        dato: impl Into<Asignacion>,
    ) -> Result<(), ChError> {
        self.asignar_variable(programa, "acumulador", dato)
    }

    /// Reads the accumulator's `valor`, substituting `por_defecto` when it is empty
    /// `concatene`'s default is `" "`, not `""`.
    pub fn acumulador(&self, programa: &str, por_defecto: &str) -> Result<String, ChError> {
        let valor = self.buscar_variable(programa, "acumulador")?.valor;
        Ok(if valor.is_empty() {
            por_defecto.to_string()
        } else {
            valor
        })
    }

    pub fn vaya(&mut self, programa: &str, etiqueta: &str) -> Result<(), ChError> {
        let destino = *self
            .etiquetas
            .get(programa)
            .and_then(|labels| labels.get(etiqueta))
            .ok_or_else(|| {
                ChError::SegmentationFault(format!(
                    "el programa {} saltó a una etiqueta inexistente '{}'",
                    programa, etiqueta
                ))
            })?;
        self.programas.get_mut(programa).unwrap().contador = destino;
        Ok(())
    }

    pub fn agregar_a_memoria(&mut self, cell: Cell) -> usize {
        let posicion = self.pivote;
        self.memoria[posicion] = Some(cell);
        self.pivote += 1;
        posicion
    }

    pub fn incrementar_contador(&mut self, programa: &str) {
        if let Some(p) = self.programas.get_mut(programa) {
            p.contador += 1;
        }
    }

    pub fn avanzar_tiempo(&mut self, tiempo: u64) {
        self.reloj += tiempo;
        if self.reloj > self.tiempo_llegada {
            self.tiempo_llegada = self.reloj;
        }
    }

    /// Programs whose arrival time has come but that may not yet be in `listos`, in arrival
    /// order.
    pub fn programas_disponibles(&self) -> Vec<String> {
        let mut disponibles: Vec<(&String, &Program)> = self
            .programas
            .iter()
            .filter(|(_, p)| p.tiempo_llegada <= self.reloj)
            .collect();
        disponibles.sort_by_key(|(_, p)| p.tiempo_llegada);
        disponibles.into_iter().map(|(n, _)| n.clone()).collect()
    }

    fn variable_position(&self, programa: &str, variable: &str) -> Result<usize, ChError> {
        self.variables
            .get(programa)
            .and_then(|vars| vars.get(variable))
            .copied()
            .ok_or_else(|| {
                ChError::SegmentationFault(format!(
                    "el programa {} no tiene una variable '{}'",
                    programa, variable
                ))
            })
    }
}
