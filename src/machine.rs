//! The machine itself: configuration, loader, interpreter dispatch and scheduler
//! (`spec.md` §4.3, §4.4, §4.5), grounded in `maquina.py::Maquina`.

use crate::algoritmo::Algoritmo;
use crate::cell::Cell;
use crate::error::{ChError, Result};
use crate::instructions;
use crate::io::{Keyboard, NullKeyboard};
use crate::state::State;
use chasm::verify;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// A CH computer: fixed configuration plus the two external collaborators the core depends on
/// (a keyboard for `lea`, and an RNG for I/O-ish instruction durations). Neither collaborator is
/// part of `State` — they live here so that a `State` snapshot stays a pure value
/// (`spec.md` §9 "global state is absent from the core").
pub struct Maquina {
    pub tamano_memoria: usize,
    pub tamano_kernel: usize,
    pub quantum: u64,
    pub algoritmo: Algoritmo,
    teclado: Box<dyn Keyboard>,
    rng: StdRng,
}

impl Maquina {
    /// Builds a machine with an entropy-seeded RNG. `quantum = None` means unbounded
    /// (`spec.md` §6: "quantum ... or ∞").
    pub fn new(
        tamano_memoria: usize,
        tamano_kernel: usize,
        teclado: Box<dyn Keyboard>,
        quantum: Option<u64>,
        algoritmo: Algoritmo,
    ) -> Maquina {
        Maquina {
            tamano_memoria,
            tamano_kernel,
            quantum: quantum.unwrap_or(u64::max_value()),
            algoritmo,
            teclado,
            rng: StdRng::from_entropy(),
        }
    }

    /// Builds a machine whose instruction-duration RNG is seeded deterministically
    /// (`spec.md` §9 "a deterministic seed must be injectable").
    pub fn new_seeded(
        tamano_memoria: usize,
        tamano_kernel: usize,
        teclado: Box<dyn Keyboard>,
        quantum: Option<u64>,
        algoritmo: Algoritmo,
        seed: u64,
    ) -> Maquina {
        Maquina {
            tamano_memoria,
            tamano_kernel,
            quantum: quantum.unwrap_or(u64::max_value()),
            algoritmo,
            teclado,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Convenience constructor for running without a real keyboard (`spec.md` §6 out-of-scope
    /// concrete devices).
    pub fn sin_teclado(
        tamano_memoria: usize,
        tamano_kernel: usize,
        quantum: Option<u64>,
        algoritmo: Algoritmo,
    ) -> Maquina {
        Maquina::new(
            tamano_memoria,
            tamano_kernel,
            Box::new(NullKeyboard::default()),
            quantum,
            algoritmo,
        )
    }

    /// Returns a fresh initial state for this machine (`spec.md` §4.2 `para`).
    pub fn encender(&self) -> State {
        State::para(self.tamano_memoria, self.tamano_kernel)
    }

    /// Verifies and loads a CH program, returning a new state with the program admitted
    /// (`spec.md` §4.3). Nothing about `estado` is mutated; the returned state is a copy.
    pub fn cargar(&self, estado: &State, fuente: &str) -> Result<State> {
        let verificado = verify(fuente)?;

        let id = format!("{:03}", estado.programas.len() + estado.terminados.len());
        let posicion_inicial = estado.pivote;
        let memoria_disponible = estado.memoria.len() - posicion_inicial;
        let memoria_requerida = verificado.lines.len() + verificado.variables.len();

        if memoria_disponible < memoria_requerida {
            return Err(ChError::OutOfMemory);
        }

        let mut nuevo_estado = estado.copiar();
        nuevo_estado.variables.insert(id.clone(), HashMap::new());
        nuevo_estado.etiquetas.insert(id.clone(), HashMap::new());

        for (numero, linea) in verificado.lines.iter().enumerate() {
            let nombre = format!("L{:03}", numero + 1);
            nuevo_estado.agregar_a_memoria(Cell::codigo(&id, nombre, linea.clone()));
        }

        for variable in &verificado.variables {
            let celda = Cell::dato(
                &id,
                variable.nombre.clone(),
                variable.tipo,
                variable.valor.clone(),
            );
            let posicion = nuevo_estado.agregar_a_memoria(celda);
            nuevo_estado
                .variables
                .get_mut(&id)
                .unwrap()
                .insert(variable.nombre.clone(), posicion);
        }

        let posicion_acumulador = nuevo_estado.agregar_a_memoria(Cell::acumulador(&id));
        nuevo_estado
            .variables
            .get_mut(&id)
            .unwrap()
            .insert("acumulador".to_string(), posicion_acumulador);

        for (nombre, linea) in &verificado.labels {
            nuevo_estado
                .etiquetas
                .get_mut(&id)
                .unwrap()
                .insert(nombre.clone(), *linea);
        }

        let tiempo_llegada = nuevo_estado.tiempo_llegada;
        nuevo_estado.programas.insert(
            id.clone(),
            crate::program::Program {
                inicio: posicion_inicial,
                contador: 0,
                datos: posicion_inicial + verificado.lines.len(),
                fin: posicion_inicial + verificado.lines.len() + verificado.variables.len() + 1,
                tiempo_llegada,
                tiempo_rafaga: verificado.burst,
            },
        );

        // Simulated load latency: each load staggers the next program's arrival
        // (`spec.md` §4.3 step 7).
        let incremento = ((verificado.lines.len() as u64) + 3) / 4;
        nuevo_estado.tiempo_llegada += incremento;

        if tiempo_llegada <= nuevo_estado.reloj {
            nuevo_estado.listos.push(id.clone());
        }

        log::debug!(
            "cargado programa {} ({} líneas, {} variables, llegada {})",
            id,
            verificado.lines.len(),
            verificado.variables.len(),
            tiempo_llegada
        );

        Ok(nuevo_estado)
    }

    /// Executes a single instruction (`spec.md` §4.4). Always operates on a copy of `estado`.
    pub fn paso(&mut self, estado: &State) -> Result<State> {
        let instruccion = estado.siguiente_instruccion()?;
        let (programa, linea) = match instruccion {
            Some(par) => par,
            None => {
                let mut nuevo = estado.copiar();
                nuevo.avanzar_tiempo(1);
                return Ok(nuevo);
            }
        };

        let linea = linea.trim();
        let mut nuevo_estado = estado.copiar();

        // Blank lines and comments are loaded as ordinary CODIGO cells so that label line
        // numbers stay stable (`spec.md` §4.1); at runtime they execute as declarative no-ops,
        // same as `nueva`/`etiqueta`.
        if linea.is_empty() || linea.starts_with("//") {
            nuevo_estado.incrementar_contador(&programa);
            return Ok(nuevo_estado);
        }

        let mut tokens = linea.split_whitespace();
        let operacion = tokens.next().unwrap_or("");
        let argumentos: Vec<&str> = tokens.collect();

        log::trace!("{}: {}", programa, linea);

        match operacion {
            "cargue" => instructions::cargue(&mut nuevo_estado, &programa, &argumentos)?,
            "almacene" => instructions::almacene(&mut nuevo_estado, &programa, &argumentos)?,
            "vaya" => {
                instructions::vaya(&mut nuevo_estado, &programa, &argumentos)?;
                nuevo_estado.avanzar_tiempo(1);
                return Ok(nuevo_estado);
            }
            "vayasi" => {
                instructions::vayasi(&mut nuevo_estado, &programa, &argumentos)?;
                nuevo_estado.avanzar_tiempo(1);
                return Ok(nuevo_estado);
            }
            "lea" => instructions::lea(
                &mut nuevo_estado,
                &programa,
                &argumentos,
                self.teclado.as_mut(),
            )?,
            "sume" | "reste" | "multiplique" | "divida" | "potencia" | "modulo" => {
                instructions::aritmetica(operacion, &mut nuevo_estado, &programa, &argumentos)?
            }
            "concatene" | "elimine" | "extraiga" => {
                instructions::cadena(operacion, &mut nuevo_estado, &programa, &argumentos)?
            }
            "Y" | "O" => instructions::y_o(operacion, &mut nuevo_estado, &programa, &argumentos)?,
            "NO" => instructions::no(&mut nuevo_estado, &programa, &argumentos)?,
            "imprima" => instructions::imprima(&mut nuevo_estado, &programa, &argumentos)?,
            "muestre" => instructions::muestre(&mut nuevo_estado, &programa, &argumentos)?,
            "retorne" => {
                instructions::retorne(&mut nuevo_estado, &programa);
                log::debug!("programa {} terminó", programa);
                return Ok(nuevo_estado);
            }
            "nueva" | "etiqueta" => {}
            _ => unreachable!("verified programs only contain known instructions"),
        }

        let duracion = match operacion {
            "lea" | "imprima" | "muestre" | "almacene" | "cargue" => self.rng.gen_range(1, 10),
            "nueva" | "etiqueta" => 0,
            _ => 1,
        };

        nuevo_estado.incrementar_contador(&programa);
        nuevo_estado.avanzar_tiempo(duracion);
        Ok(nuevo_estado)
    }

    /// Admits newly-arrived programs into `listos` and reorders it per `self.algoritmo`
    /// (`spec.md` §4.5 `planear`).
    pub fn planear(&self, estado: &State) -> State {
        let mut planeado = estado.copiar();

        for nombre in estado.programas_disponibles() {
            if !planeado.listos.contains(&nombre) {
                planeado.listos.push(nombre);
            }
        }

        match self.algoritmo {
            Algoritmo::Rr => {
                if let Some(ultimo) = planeado.listos.pop() {
                    planeado.listos.insert(0, ultimo);
                }
            }
            Algoritmo::Sjf => {
                planeado
                    .listos
                    .sort_by_key(|nombre| estado_burst(estado, nombre));
            }
            Algoritmo::Fcfs => {
                planeado
                    .listos
                    .sort_by_key(|nombre| estado_arrival(estado, nombre));
            }
        }

        log::debug!("replanificado ({:?}): {:?}", self.algoritmo, planeado.listos);

        planeado
    }

    /// Runs the machine one step at a time until `pasos` have been taken (or indefinitely if
    /// `None`) or the ready queue drains (`spec.md` §4.5 `correr`).
    pub fn correr(&mut self, estado: &State, pasos: Option<usize>) -> Result<State> {
        let mut ultimo = estado.copiar();
        let limite = pasos.unwrap_or(usize::max_value());
        let mut iterador = self.iterar(estado);

        for _ in 0..limite {
            match iterador.next() {
                Some(Ok(nuevo)) => ultimo = nuevo,
                Some(Err(err)) => return Err(err),
                None => break,
            }
        }

        Ok(ultimo)
    }

    /// Returns an iterator yielding the state after each step until `nada_por_hacer`
    /// (`spec.md` §4.5 `iterar`).
    pub fn iterar<'m>(&'m mut self, estado: &State) -> Iterador<'m> {
        Iterador {
            maquina: self,
            segmento_inicial: estado.copiar(),
            actual: estado.copiar(),
            detenido: false,
        }
    }
}

fn estado_burst(estado: &State, nombre: &str) -> u32 {
    estado
        .programas
        .get(nombre)
        .map(|p| p.tiempo_rafaga)
        .unwrap_or(0)
}

fn estado_arrival(estado: &State, nombre: &str) -> u64 {
    estado
        .programas
        .get(nombre)
        .map(|p| p.tiempo_llegada)
        .unwrap_or(0)
}

/// Yields successive `State`s from `Maquina::iterar`. Stops permanently after the first error,
/// matching `spec.md` §7's "nothing is retried" / "the driver loop is expected to stop".
pub struct Iterador<'m> {
    maquina: &'m mut Maquina,
    segmento_inicial: State,
    actual: State,
    detenido: bool,
}

impl<'m> Iterator for Iterador<'m> {
    type Item = Result<State>;

    fn next(&mut self) -> Option<Result<State>> {
        if self.detenido || self.actual.nada_por_hacer() {
            return None;
        }

        let mut temporal = match self.maquina.paso(&self.actual) {
            Ok(estado) => estado,
            Err(err) => {
                self.detenido = true;
                return Some(Err(err));
            }
        };

        let tiempo_transcurrido = temporal.reloj - self.segmento_inicial.reloj;
        let quantum_agotado = tiempo_transcurrido >= self.maquina.quantum;
        let programa_terminado = self.segmento_inicial.terminados.len() < temporal.terminados.len();

        if quantum_agotado || programa_terminado {
            temporal = self.maquina.planear(&temporal);
            self.segmento_inicial = temporal.copiar();
        }

        if temporal.nada_por_hacer() {
            temporal = self.maquina.planear(&temporal);
        }

        self.actual = temporal.copiar();
        Some(Ok(temporal))
    }
}
