use ch::Maquina;

#[test]
fn corre_un_programa_completo_sin_teclado() {
    let mut maquina = Maquina::sin_teclado(1024, 128, None, ch::Algoritmo::Fcfs);
    let estado = maquina.encender();
    let cargado = maquina
        .cargar(&estado, "nueva variable C hola\nimprima variable\nretorne 0")
        .unwrap();
    let final_ = maquina.correr(&cargado, None).unwrap();
    assert!(final_
        .impresora
        .contains(&("000".to_string(), "hola".to_string())));
}
