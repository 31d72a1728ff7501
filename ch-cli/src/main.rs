#[macro_use]
extern crate clap;

use ch::{Algoritmo, ChError, Maquina};
use ch_cli::TecladoEnConsola;
use clap::Arg;
use std::fmt;
use std::fs;
use util::EnumFromStr;

#[derive(Debug)]
enum Error {
    Clap(clap::Error),
    Io(std::io::Error),
    Ch(ChError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Clap(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "{}", err),
            Error::Ch(err) => write!(f, "{}", err),
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Sets the CH program file to run")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("memory")
                .short("m")
                .long("memory")
                .takes_value(true)
                .value_name("MEMORIA")
                .default_value("1024")
                .help("Sets the size of the memory"),
        )
        .arg(
            Arg::with_name("kernel")
                .short("k")
                .long("kernel")
                .takes_value(true)
                .value_name("KERNEL")
                .default_value("128")
                .help("Sets the size of the reserved kernel region"),
        )
        .arg(
            Arg::with_name("quantum")
                .short("q")
                .long("quantum")
                .takes_value(true)
                .value_name("QUANTUM")
                .help("Sets the scheduling quantum (unbounded if omitted)"),
        )
        .arg(
            Arg::with_name("algoritmo")
                .short("a")
                .long("algoritmo")
                .takes_value(true)
                .value_name("ALGORITMO")
                .default_value("FCFS")
                .help("Sets the ready-queue scheduling policy: FCFS, SJF or RR"),
        )
        .get_matches();

    let tamano_memoria = value_t!(matches.value_of("memory"), usize).map_err(Error::Clap)?;
    let tamano_kernel = value_t!(matches.value_of("kernel"), usize).map_err(Error::Clap)?;
    let quantum = matches
        .value_of("quantum")
        .map(|q| value_t!(Some(q), u64).map_err(Error::Clap))
        .transpose()?;
    let algoritmo = Algoritmo::from_str(matches.value_of("algoritmo").unwrap())
        .unwrap_or(Algoritmo::Fcfs);

    let fuente = fs::read_to_string(matches.value_of("PROGRAM").unwrap()).map_err(Error::Io)?;

    let mut maquina = Maquina::new(
        tamano_memoria,
        tamano_kernel,
        Box::new(TecladoEnConsola::default()),
        quantum,
        algoritmo,
    );

    let encendido = maquina.encender();
    let cargado = maquina.cargar(&encendido, &fuente).map_err(Error::Ch)?;
    let final_ = maquina.correr(&cargado, None).map_err(Error::Ch)?;

    for (programa, linea) in &final_.pantalla {
        println!("[{}] {}", programa, linea);
    }
    for (programa, linea) in &final_.impresora {
        println!("(impresora) [{}] {}", programa, linea);
    }

    Ok(())
}
