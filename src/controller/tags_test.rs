use super::*;
use crate::controller::test_helpers::MockApi;
use crate::net::types::MessageResponse;

#[test]
fn new_form_defaults_level_to_regular_user() {
    assert_eq!(TagForm::new("04A1", "Ana").level, "2");
}

#[test]
fn request_trims_fields() {
    let request = TagForm::new(" 04A1 ", " Ana ").with_level("1").to_request().unwrap();
    assert_eq!(request, AddTagRequest { id: "04A1".into(), nombre: "Ana".into(), level: "1".into() });
}

#[test]
fn blank_uid_or_name_is_rejected() {
    assert!(matches!(TagForm::new("  ", "Ana").to_request(), Err(TagError::MissingFields)));
    assert!(matches!(TagForm::new("04A1", "").to_request(), Err(TagError::MissingFields)));
}

#[tokio::test]
async fn register_returns_server_message() {
    let api = MockApi::default();
    api.push_tag(Ok(MessageResponse { message: Some("Tarjeta agregada".into()) }));
    let text = register_tag(&api, &TagForm::new("04A1", "Ana")).await.unwrap();
    assert_eq!(text, "Tarjeta agregada");
    assert_eq!(api.tags.lock().unwrap()[0].id, "04A1");
}

#[tokio::test]
async fn register_without_message_says_ok() {
    let api = MockApi::default();
    assert_eq!(register_tag(&api, &TagForm::new("04A1", "Ana")).await.unwrap(), "OK");
}

#[tokio::test]
async fn incomplete_form_sends_nothing() {
    let api = MockApi::default();
    assert!(register_tag(&api, &TagForm::new("", "Ana")).await.is_err());
    assert!(api.tags.lock().unwrap().is_empty());
}

#[tokio::test]
async fn server_error_is_surfaced() {
    let api = MockApi::default();
    api.push_tag(Err(ApiError::Rejected { status: 409, message: "UID ya registrado".into() }));
    let err = register_tag(&api, &TagForm::new("04A1", "Ana")).await.unwrap_err();
    assert_eq!(err.to_string(), "server rejected request (HTTP 409): UID ya registrado");
    assert!(matches!(err, TagError::Api(ref e) if e.user_message() == "UID ya registrado"));
}
