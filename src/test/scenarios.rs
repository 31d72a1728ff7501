//! Concrete end-to-end scenarios, grounded in `tests/test_maquina.py`.

use super::maquina;
use crate::algoritmo::Algoritmo;
use crate::error::ChError;
use crate::machine::Maquina;

const FACTORIAL: &str = "\
nueva               unidad           I         1
nueva m I 5
nueva respuesta I 1
nueva intermedia I 0
cargue m
almacene respuesta
reste unidad
almacene intermedia
cargue respuesta
multiplique intermedia
almacene respuesta
cargue intermedia
reste unidad
vayasi itere fin
etiqueta itere 8
etiqueta fin 19
muestre respuesta
imprima respuesta
retorne 0";

#[test]
fn escenario_1_retorne_termina_de_inmediato() {
    let mut m = maquina();
    let estado = m.encender();
    let cargado = m.cargar(&estado, "retorne 0").unwrap();
    let nuevo = m.paso(&cargado).unwrap();
    assert!(nuevo.terminados.contains_key("000"));
    assert!(nuevo.nada_por_hacer());
}

#[test]
fn escenario_2_carga_y_acumula() {
    let mut m = maquina();
    let estado = m.encender();
    let cargado = m
        .cargar(&estado, "nueva variable C hola\ncargue variable\nretorne 0")
        .unwrap();
    let nuevo = m.correr(&cargado, Some(2)).unwrap();
    assert_eq!(nuevo.acumulador("000", "").unwrap(), "hola");
}

#[test]
fn escenario_3_factorial() {
    let mut m = maquina();
    let estado = m.encender();
    let cargado = m.cargar(&estado, FACTORIAL).unwrap();
    let nuevo = m.correr(&cargado, None).unwrap();
    assert!(nuevo.impresora.contains(&("000".to_string(), "120.0".to_string())));
    assert!(nuevo.pantalla.contains(&("000".to_string(), "120.0".to_string())));
}

#[test]
fn escenario_3b_dos_programas_factorial() {
    let mut m = maquina();
    let estado = m.encender();
    let estado = m.cargar(&estado, FACTORIAL).unwrap();
    let estado = m.cargar(&estado, FACTORIAL).unwrap();
    let nuevo = m.correr(&estado, None).unwrap();
    assert_eq!(
        nuevo.impresora,
        vec![
            ("000".to_string(), "120.0".to_string()),
            ("001".to_string(), "120.0".to_string())
        ]
    );
}

#[test]
fn escenario_4_segmentacion() {
    let mut m = maquina();
    let estado = m.encender();
    let mut cargado = m.cargar(&estado, "retorne 0").unwrap();
    cargado.programas.get_mut("000").unwrap().inicio += 1;
    let err = m.paso(&cargado).unwrap_err();
    assert!(matches!(err, ChError::SegmentationFault(_)));
}

#[test]
fn escenario_5_sin_memoria_suficiente() {
    let m = Maquina::sin_teclado(10, 9, None, Algoritmo::Fcfs);
    let estado = m.encender();
    let err = m.cargar(&estado, FACTORIAL).unwrap_err();
    assert!(matches!(err, ChError::OutOfMemory));
}

#[test]
fn escenario_6_quantum_uno_intercala_programas_identicos() {
    // With RR and quantum=1, a replan fires after nearly every step, rotating the ready queue
    // so the two programs take turns instead of one running to completion first
    // Both stay in `programas` and the head of `listos` shifts away
    // from "000" partway through, rather than staying pinned there the way FCFS would.
    let mut m = Maquina::sin_teclado(1024, 128, Some(1), Algoritmo::Rr);
    let programa = "nueva var I\nsume var\nsume var\nsume var\nretorne 0";
    let estado = m.encender();
    let estado = m.cargar(&estado, programa).unwrap();
    let estado = m.cargar(&estado, programa).unwrap();
    let nuevo = m.correr(&estado, Some(5)).unwrap();
    assert_eq!(nuevo.programas.len(), 2);
    assert_eq!(nuevo.listos, vec!["000".to_string(), "001".to_string()]);
    assert_eq!(nuevo.programas["000"].contador, 3);
    assert_eq!(nuevo.programas["001"].contador, 2);
}

#[test]
fn escenario_7_cursor_de_llegada() {
    let mut m = maquina();
    let programa = vec!["nueva variable C"; 4].join("\n");
    let mut estado = m.encender();
    for _ in 0..3 {
        estado = m.cargar(&estado, &programa).unwrap();
    }
    assert_eq!(estado.programas["000"].tiempo_llegada, 0);
    assert_eq!(estado.programas["001"].tiempo_llegada, 1);
    assert_eq!(estado.programas["002"].tiempo_llegada, 2);
}

#[test]
fn escenario_7b_cursor_de_llegada_no_multiplo_de_4() {
    let mut m = maquina();
    let programa = vec!["nueva variable C"; 5].join("\n");
    let mut estado = m.encender();
    estado = m.cargar(&estado, &programa).unwrap();
    estado = m.cargar(&estado, &programa).unwrap();
    assert_eq!(estado.programas["000"].tiempo_llegada, 0);
    assert_eq!(estado.programas["001"].tiempo_llegada, 2);
}

#[test]
fn escenario_8_lineas_declarativas_no_consumen_reloj() {
    let mut m = maquina();
    let programa = "nueva variable I 3\netiqueta inicio 1";
    let estado = m.encender();
    let cargado = m.cargar(&estado, programa).unwrap();
    let nuevo = m.correr(&cargado, Some(2)).unwrap();
    assert_eq!(nuevo.reloj, 0);
    assert_eq!(nuevo.programas["000"].contador, 2);
}

#[test]
fn tiempo_de_rafaga_del_programa() {
    let mut m = maquina();
    let programa = "nueva var I\nsume var\nsume var\nsume var\nretorne 0";
    let estado = m.encender();
    let cargado = m.cargar(&estado, programa).unwrap();
    assert_eq!(cargado.programas["000"].tiempo_rafaga, 4);
}
