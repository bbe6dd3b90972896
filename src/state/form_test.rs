use super::*;

fn record(nombre: &str) -> UserRecord {
    UserRecord {
        id: "04A1B2C3".into(),
        nombre: nombre.into(),
        ap: "López".into(),
        am: "Ruiz".into(),
        email: "ana@example.com".into(),
        pwd: "secret".into(),
        cell: Some("5551234".into()),
        tipo_id: Some(1),
        tipo: Some("Administrador".into()),
        operador: true,
        activo: false,
    }
}

#[test]
fn blank_form_is_add_mode() {
    let form = UserForm::new();
    assert_eq!(form.mode, FormMode::Add);
    assert!(form.id.is_empty());
    assert!(form.activo);
    assert!(!form.operador);
    assert_eq!(form.tipo_id, DEFAULT_TIPO_ID);
}

#[test]
fn submit_label_follows_mode() {
    assert_eq!(FormMode::Add.submit_label(), "💾 Guardar Usuario");
    assert_eq!(FormMode::Edit.submit_label(), "💾 Actualizar Usuario");
}

#[test]
fn record_opens_in_edit_mode() {
    let form = UserForm::from_record(&record("Ana"));
    assert_eq!(form.mode, FormMode::Edit);
    assert_eq!(form.id, "04A1B2C3");
    assert_eq!(form.nombre, "Ana");
    assert_eq!(form.cell, "5551234");
    assert_eq!(form.tipo_id, 1);
    assert!(form.operador);
    assert!(!form.activo);
}

#[test]
fn unknown_record_opens_in_add_mode_with_name_cleared() {
    let form = UserForm::from_record(&record(UNKNOWN_NAME));
    assert_eq!(form.mode, FormMode::Add);
    assert!(form.nombre.is_empty());
    assert_eq!(form.id, "04A1B2C3");
}

#[test]
fn empty_id_produces_create_request() {
    let mut form = UserForm::new();
    form.nombre = "  Luis ".into();
    let req = form.to_request();
    assert!(req.is_create());
    assert_eq!(req.nombre, "Luis");
}

#[test]
fn existing_id_produces_update_request() {
    let req = UserForm::from_record(&record("Ana")).to_request();
    assert!(!req.is_create());
    assert_eq!(req.id, "04A1B2C3");
    assert!(req.operador);
    assert!(!req.activo);
}

#[test]
fn whitespace_only_id_is_a_create() {
    let mut form = UserForm::new();
    form.id = "   ".into();
    assert!(form.to_request().is_create());
}
