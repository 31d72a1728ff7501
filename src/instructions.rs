//! One handler per CH instruction, dispatched from `Maquina::paso`.
//!
//! Grounded 1:1 in `maquina.py::paso`'s `if`/`elif` chain: each branch there becomes a function
//! here, taking the already-copied `State` to mutate in place (purity of `paso` itself comes
//! from the caller copying before dispatch, matching the original's own shape).

use crate::error::{ChError, Result};
use crate::io::Keyboard;
use crate::state::State;

pub(crate) fn cargue(estado: &mut State, programa: &str, args: &[&str]) -> Result<()> {
    let variable = args[0];
    let dato = estado.buscar_variable(programa, variable)?;
    estado.asignar_acumulador(programa, dato.valor)?;
    Ok(())
}

pub(crate) fn almacene(estado: &mut State, programa: &str, args: &[&str]) -> Result<()> {
    let variable = args[0];
    let dato = estado.acumulador(programa, "")?;
    estado.asignar_variable(programa, variable, dato)?;
    Ok(())
}

pub(crate) fn vaya(estado: &mut State, programa: &str, args: &[&str]) -> Result<()> {
    estado.vaya(programa, args[0])
}

pub(crate) fn vayasi(estado: &mut State, programa: &str, args: &[&str]) -> Result<()> {
    let (positivo, negativo) = (args[0], args[1]);
    let bandera: f64 = parse_float(&estado.acumulador(programa, "0")?);
    if bandera > 0.0 {
        estado.vaya(programa, positivo)?;
    } else if bandera < 0.0 {
        estado.vaya(programa, negativo)?;
    } else {
        estado.incrementar_contador(programa);
    }
    Ok(())
}

pub(crate) fn lea(
    estado: &mut State,
    programa: &str,
    args: &[&str],
    teclado: &mut dyn Keyboard,
) -> Result<()> {
    let variable = args[0];
    let valor = teclado.lea();
    estado.asignar_variable(programa, variable, valor)?;
    Ok(())
}

/// `sume`/`reste`/`multiplique`/`divida`/`potencia`/`modulo`, sharing a single handler the way
/// the original groups them under one `elif` branch.
pub(crate) fn aritmetica(
    operacion: &str,
    estado: &mut State,
    programa: &str,
    args: &[&str],
) -> Result<()> {
    let variable = args[0];
    let acumulador = parse_float(&estado.acumulador(programa, "0")?);
    let operando = parse_float(&estado.buscar_variable(programa, variable)?.valor);

    let resultado = match operacion {
        "sume" => acumulador + operando,
        "reste" => acumulador - operando,
        "multiplique" => acumulador * operando,
        "divida" => {
            if operando == 0.0 {
                return Err(ChError::ExecutionError(
                    "Se encontró una division por cero.".to_string(),
                ));
            }
            acumulador / operando
        }
        "potencia" => {
            if operando < 0.0 && acumulador == 0.0 {
                return Err(ChError::ExecutionError(
                    "Se encontró una division por cero.".to_string(),
                ));
            }
            acumulador.powf(operando)
        }
        "modulo" => {
            if operando == 0.0 {
                return Err(ChError::ExecutionError(
                    "Se encontró una division por cero.".to_string(),
                ));
            }
            acumulador % operando
        }
        _ => unreachable!("verified programs only contain known arithmetic instructions"),
    };

    estado.asignar_acumulador(programa, format_float(resultado))?;
    Ok(())
}

/// `concatene`/`elimine`/`extraiga`, sharing a single handler. The accumulator's default when
/// empty is `" "` (a single space), not `""`.
pub(crate) fn cadena(
    operacion: &str,
    estado: &mut State,
    programa: &str,
    args: &[&str],
) -> Result<()> {
    let operando = args[0];
    let acumulador = estado.acumulador(programa, " ")?;

    let resultado = match operacion {
        "concatene" => format!("{}{}", acumulador, operando),
        "elimine" => acumulador.replace(operando, ""),
        "extraiga" => {
            let n: usize = operando.trim().parse().unwrap_or(0);
            acumulador.chars().take(n).collect()
        }
        _ => unreachable!("verified programs only contain known string instructions"),
    };

    estado.asignar_acumulador(programa, resultado)?;
    Ok(())
}

/// `Y`/`O`, sharing a single handler.
pub(crate) fn y_o(
    operacion: &str,
    estado: &mut State,
    programa: &str,
    args: &[&str],
) -> Result<()> {
    let (a, b, salida) = (args[0], args[1], args[2]);
    let a = estado.buscar_variable(programa, a)?.valor == "1";
    let b = estado.buscar_variable(programa, b)?.valor == "1";

    let resultado = match operacion {
        "O" => a || b,
        "Y" => a && b,
        _ => unreachable!("verified programs only contain known logic instructions"),
    };

    estado.asignar_variable(programa, salida, bool_str(resultado))?;
    Ok(())
}

pub(crate) fn no(estado: &mut State, programa: &str, args: &[&str]) -> Result<()> {
    let (operando, salida) = (args[0], args[1]);
    let operando = estado.buscar_variable(programa, operando)?.valor == "1";
    estado.asignar_variable(programa, salida, bool_str(!operando))?;
    Ok(())
}

pub(crate) fn imprima(estado: &mut State, programa: &str, args: &[&str]) -> Result<()> {
    let mensaje = estado.buscar_variable(programa, args[0])?.valor;
    estado.impresora.push((programa.to_string(), mensaje));
    Ok(())
}

pub(crate) fn muestre(estado: &mut State, programa: &str, args: &[&str]) -> Result<()> {
    let mensaje = estado.buscar_variable(programa, args[0])?.valor;
    estado.pantalla.push((programa.to_string(), mensaje));
    Ok(())
}

pub(crate) fn retorne(estado: &mut State, programa: &str) {
    if let Some(registro) = estado.programas.remove(programa) {
        estado.terminados.insert(programa.to_string(), registro);
    }
    estado.listos.retain(|p| p != programa);
}

fn parse_float(valor: &str) -> f64 {
    valor.trim().parse().unwrap_or(0.0)
}

/// Renders a float the way Python's `str(float)` does: a bare integral value still carries a
/// trailing `.0` — a factorial program's `muestre`/`imprima` should print `"120.0"`, not `"120"`.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = format!("{}", x);
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

fn bool_str(b: bool) -> String {
    if b { "1" } else { "0" }.to_string()
}
