//! Verifier for the [ch](../ch/index.html) virtual machine's assembler-like language.
//!
//! The single entry point is [`verify`], which checks a CH program for syntax errors,
//! normalizes its source lines, and extracts its variable and label tables. `ch`'s loader calls
//! this before admitting a program into memory, wrapping any [`SyntaxError`] as `InvalidProgram`.
//!
//! # CH Language
//!
//! A CH program is plain text, one instruction per line, whitespace-separated. Comments start
//! with `//` and run to the end of the line. Blank lines and comments are no-ops, kept in place
//! so that label line numbers stay stable across verification.
//!
//! Instructions: `nueva`, `etiqueta`, `vaya`, `vayasi`, `cargue`, `almacene`, `lea`, `sume`,
//! `reste`, `multiplique`, `divida`, `potencia`, `modulo`, `concatene`, `elimine`, `extraiga`,
//! `Y`, `O`, `NO`, `muestre`, `imprima`, `retorne`.

mod context;
mod error;
mod types;


use context::Context;
use std::collections::HashMap;

pub use error::SyntaxError;
pub use types::Tipo;

/// A single `nueva`-declared variable, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub nombre: String,
    pub tipo: Tipo,
    pub valor: String,
}

/// The result of successfully verifying a CH program.
#[derive(Clone, Debug, PartialEq)]
pub struct VerifiedProgram {
    /// Normalized source lines, one per input line (comments/blanks kept as no-ops).
    pub lines: Vec<String>,
    /// Declared variables, in declaration order.
    pub variables: Vec<Variable>,
    /// Label name to zero-based code-line index.
    pub labels: HashMap<String, usize>,
    /// Number of executable lines, used by the scheduler's SJF policy.
    pub burst: u32,
}

/// Verifies a CH program given as source text.
///
/// Returns the normalized lines, the variable table and the label table, or the first
/// [`SyntaxError`] encountered. No fix-up or recovery is attempted — verification stops at the
/// first bad line — nothing here is retried.
pub fn verify(source: &str) -> Result<VerifiedProgram, SyntaxError> {
    let mut ctx = Context::new();
    let mut lines = Vec::new();
    let mut variables = Vec::new();
    let mut labels = HashMap::new();

    for (index, raw) in source.split('\n').enumerate() {
        let normalized = verify_line(raw, index, &mut ctx, &mut variables, &mut labels)?;
        lines.push(normalized);
    }

    let missing = ctx.missing_labels();
    if !missing.is_empty() {
        return Err(SyntaxError::MissingLabels { labels: missing });
    }

    let burst = estimate_burst(&lines);

    log::debug!(
        "verified program: {} lines, {} variables, {} labels, burst {}",
        lines.len(),
        variables.len(),
        labels.len(),
        burst
    );

    Ok(VerifiedProgram {
        lines,
        variables,
        labels,
        burst,
    })
}

/// Number of "executable" lines in an already-normalized program: every line except blanks,
/// comments, `nueva` and `etiqueta`.
pub fn estimate_burst(lines: &[String]) -> u32 {
    lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                return false;
            }
            let op = trimmed.split_whitespace().next().unwrap_or("");
            op != "nueva" && op != "etiqueta"
        })
        .count() as u32
}

fn verify_line(
    raw: &str,
    index: usize,
    ctx: &mut Context,
    variables: &mut Vec<Variable>,
    labels: &mut HashMap<String, usize>,
) -> Result<String, SyntaxError> {
    let leading_trimmed = raw.trim_start();

    if leading_trimmed.is_empty() || leading_trimmed.starts_with("//") {
        return Ok(raw.to_string());
    }

    if leading_trimmed.split_whitespace().next() == Some("nueva") {
        return verify_nueva(leading_trimmed, index, ctx, variables);
    }

    let tokens: Vec<&str> = leading_trimmed.split_whitespace().collect();
    let instruccion = tokens[0];
    let argumentos = &tokens[1..];

    match instruccion {
        "etiqueta" => {
            arity(index, instruccion, argumentos, 2, 2)?;
            let (nombre, linea) = (argumentos[0], argumentos[1]);
            if !Tipo::I.matches(linea) {
                return Err(SyntaxError::TypeMismatch {
                    line: index,
                    tipo: "I".to_string(),
                    valor: linea.to_string(),
                });
            }
            let k: i64 = linea.trim().parse().unwrap_or(0);
            let target = if k >= 1 { (k - 1) as usize } else { 0 };
            ctx.define_label(nombre);
            labels.insert(nombre.to_string(), target);
        }
        "vaya" => {
            arity(index, instruccion, argumentos, 1, 1)?;
            ctx.require_label(argumentos[0]);
        }
        "vayasi" => {
            arity(index, instruccion, argumentos, 2, 2)?;
            ctx.require_label(argumentos[0]);
            ctx.require_label(argumentos[1]);
        }
        "cargue" | "almacene" | "lea" | "sume" | "reste" | "multiplique" | "divida"
        | "potencia" | "modulo" | "concatene" => {
            arity(index, instruccion, argumentos, 1, 1)?;
            if instruccion != "concatene" {
                require_defined(ctx, index, argumentos[0])?;
            }
        }
        "elimine" => {
            arity(index, instruccion, argumentos, 1, 1)?;
        }
        "extraiga" => {
            arity(index, instruccion, argumentos, 1, 1)?;
            if !Tipo::I.matches(argumentos[0]) {
                return Err(SyntaxError::TypeMismatch {
                    line: index,
                    tipo: "I".to_string(),
                    valor: argumentos[0].to_string(),
                });
            }
        }
        "Y" | "O" => {
            arity(index, instruccion, argumentos, 3, 3)?;
            for v in argumentos {
                require_defined(ctx, index, v)?;
            }
        }
        "NO" => {
            arity(index, instruccion, argumentos, 2, 2)?;
            for v in argumentos {
                require_defined(ctx, index, v)?;
            }
        }
        "muestre" | "imprima" => {
            arity(index, instruccion, argumentos, 1, 1)?;
            if argumentos[0] != "acumulador" {
                require_defined(ctx, index, argumentos[0])?;
            }
        }
        "retorne" => {
            arity(index, instruccion, argumentos, 0, 1)?;
            if let Some(valor) = argumentos.get(0) {
                if !Tipo::I.matches(valor) {
                    return Err(SyntaxError::TypeMismatch {
                        line: index,
                        tipo: "I".to_string(),
                        valor: valor.to_string(),
                    });
                }
            }
        }
        _ => {
            return Err(SyntaxError::UnknownInstruction {
                line: index,
                text: leading_trimmed.to_string(),
            });
        }
    }

    Ok(tokens.join(" "))
}

fn verify_nueva(
    line: &str,
    index: usize,
    ctx: &mut Context,
    variables: &mut Vec<Variable>,
) -> Result<String, SyntaxError> {
    let parts = split_at_most(line, 3);
    let argumentos = &parts[1..];

    if argumentos.len() < 2 || argumentos.len() > 3 {
        return Err(SyntaxError::WrongArity {
            line: index,
            expected: "2 to 3".to_string(),
            found: argumentos.len(),
        });
    }

    let variable = argumentos[0];
    if variable == "acumulador" {
        return Err(SyntaxError::ReservedName {
            line: index,
            variable: variable.to_string(),
        });
    }

    let tipo = Tipo::parse(argumentos[1], index)?;

    let valor = if let Some(dado) = argumentos.get(2) {
        if !tipo.matches(dado) {
            return Err(SyntaxError::TypeMismatch {
                line: index,
                tipo: tipo.name().to_string(),
                valor: dado.to_string(),
            });
        }
        dado.to_string()
    } else {
        tipo.default_value().to_string()
    };

    ctx.define_variable(variable);
    variables.push(Variable {
        nombre: variable.to_string(),
        tipo,
        valor: valor.clone(),
    });

    Ok(parts.join(" "))
}

fn arity(
    line: usize,
    instruccion: &str,
    argumentos: &[&str],
    min: usize,
    max: usize,
) -> Result<(), SyntaxError> {
    if argumentos.len() < min || argumentos.len() > max {
        let expected = if min == max {
            format!("{}", min)
        } else {
            format!("{} to {}", min, max)
        };
        return Err(SyntaxError::WrongArity {
            line,
            expected: format!("{} for '{}'", expected, instruccion),
            found: argumentos.len(),
        });
    }
    Ok(())
}

fn require_defined(ctx: &Context, line: usize, variable: &str) -> Result<(), SyntaxError> {
    if !ctx.variable_defined(variable) {
        return Err(SyntaxError::UndefinedVariable {
            line,
            variable: variable.to_string(),
        });
    }
    Ok(())
}

/// Splits `s` on whitespace like Python's `str.split(maxsplit=n)`: at most `n` splits, with the
/// final element preserving every byte after the `n`-th separator run verbatim (including
/// internal multiple spaces). Used for `nueva`, whose literal value may contain spaces.
fn split_at_most(s: &str, n: usize) -> Vec<&str> {
    let mut parts = Vec::with_capacity(n + 1);
    let mut rest = s;

    for _ in 0..n {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            rest = "";
            break;
        }
        match trimmed.find(char::is_whitespace) {
            Some(pos) => {
                parts.push(&trimmed[..pos]);
                rest = &trimmed[pos..];
            }
            None => {
                parts.push(trimmed);
                rest = "";
                break;
            }
        }
    }

    let remainder = rest.trim_start();
    if !remainder.is_empty() {
        parts.push(remainder);
    }

    parts
}
