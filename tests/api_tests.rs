//! HTTP surface tests against the `/api` routes.

mod common;

use actix_web::{http::StatusCode, test, web, App};
use common::{controller_component, maintenance_document, text_field};
use informes_server::blocks::TemplateSchema;
use informes_server::{configure_api, AppState, ApiDoc};
use serde_json::{json, Value};
use utoipa::OpenApi;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .service(web::scope("/api").configure(configure_api)),
        )
        .await
    };
}

fn component_template_body() -> Value {
    json!({
        "tipo": "component",
        "nombre": "Controlador",
        "schema": TemplateSchema::new(vec![text_field("serial", "serial")])
    })
}

#[actix_web::test]
async fn test_block_catalog_lists_every_type() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/blocks").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let types: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["type"].as_str())
        .collect();
    assert_eq!(types.len(), 25);
    assert!(types.contains(&"content_placeholder"));
    assert!(types.contains(&"tristate"));
}

#[actix_web::test]
async fn test_placeholder_table() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/placeholders").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let keys: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["key"].as_str())
        .collect();
    assert!(keys.contains(&"componente.etiqueta"));
    assert!(keys.contains(&"intervencion.fecha_inicio"));
}

#[actix_web::test]
async fn test_validate_reports_issues_without_storing() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);
    let schema = TemplateSchema::new(vec![
        text_field("a", "serial"),
        text_field("b", "serial"),
    ]);

    let req = test::TestRequest::post()
        .uri("/api/templates/validate")
        .set_json(&schema)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["issues"][0]["blockId"], json!("b"));
    assert!(state.list_templates().is_empty());
}

#[actix_web::test]
async fn test_put_get_delete_template() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/templates/ctrl")
        .set_json(component_template_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/templates/ctrl").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], json!("ctrl"));
    assert_eq!(body["tipo"], json!("component"));
    assert!(body["updatedAt"].is_string());

    let req = test::TestRequest::delete().uri("/api/templates/ctrl").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/templates/ctrl").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("NotFound"));
}

#[actix_web::test]
async fn test_invalid_template_answers_unprocessable_entity() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);
    let body = json!({
        "tipo": "component",
        "nombre": "Mala",
        "schema": TemplateSchema::new(vec![text_field("a", "Serial-1")])
    });

    let req = test::TestRequest::put()
        .uri("/api/templates/mala")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("InvalidTemplate"));
    assert!(body["message"].as_str().unwrap().contains("Serial-1"));
    assert_eq!(body["issues"][0]["field"], json!("key"));
}

#[actix_web::test]
async fn test_commands_endpoint() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);
    let req = test::TestRequest::put()
        .uri("/api/templates/ctrl")
        .set_json(component_template_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/ctrl/commands")
        .set_json(json!({ "command": "addBlock", "type": "checkbox" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["schema"]["blocks"][1]["type"], json!("checkbox"));
    assert_eq!(body["schema"]["blocks"][1]["config"]["key"], json!("confirmado"));

    let req = test::TestRequest::post()
        .uri("/api/templates/ctrl/commands")
        .set_json(json!({ "command": "removeBlock", "id": "missing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/templates/ctrl/commands")
        .set_json(json!({ "command": "explode" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_freeze_endpoint() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);
    let req = test::TestRequest::put()
        .uri("/api/templates/ctrl")
        .set_json(component_template_body())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/templates/ctrl/freeze")
        .set_json(json!({
            "tipoComponente": "controller_info",
            "orden": 1,
            "etiqueta": "Robot 1",
            "numeroSerie": "SN-1"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["tipoComponente"], json!("controller_info"));
    assert_eq!(body["etiqueta"], json!("Robot 1"));
    assert_eq!(body["numeroSerie"], json!("SN-1"));
    assert_eq!(body["schemaCongelado"]["blocks"][0]["id"], json!("serial"));
}

#[actix_web::test]
async fn test_assemble_with_inline_schema() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);
    let mut robot = controller_component("c1", 1, "Robot 1");
    robot.datos.insert("serial".into(), json!("SN-001"));

    let req = test::TestRequest::post()
        .uri("/api/informes/assemble")
        .set_json(json!({
            "documentSchema": maintenance_document(),
            "componentes": [robot],
            "metadata": { "cliente": { "nombre": "ACME" } }
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["totalPages"], json!(3));
    let blocks = body["blocks"].as_array().unwrap();
    let serial = blocks.iter().find(|b| b["id"] == json!("c1-serial")).unwrap();
    assert_eq!(serial["value"], json!("SN-001"));
    assert_eq!(serial["componentId"], json!("c1"));
    let footer = blocks.iter().find(|b| b["id"] == json!("footer")).unwrap();
    assert_eq!(footer["config"]["text"], json!("ACME"));
    assert_eq!(footer["config"]["_pageNumber"], json!(3));
    assert_eq!(body["toc"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_assemble_with_registered_template() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);
    let req = test::TestRequest::put()
        .uri("/api/templates/doc")
        .set_json(json!({
            "tipo": "document",
            "nombre": "Informe",
            "schema": maintenance_document()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/informes/assemble")
        .set_json(json!({ "documentTemplateId": "doc" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["totalPages"], json!(3));
    let cover = body["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == json!("cover"))
        .cloned()
        .unwrap();
    assert_eq!(cover["config"]["title"], json!("[intervencion.titulo]"));
}

#[actix_web::test]
async fn test_assemble_requires_one_document_source() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/informes/assemble")
        .set_json(json!({ "componentes": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/informes/assemble")
        .set_json(json!({ "documentTemplateId": "missing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_toc_endpoint() {
    let state = web::Data::new(AppState::default());
    let app = init_app!(state);
    let blocks = json!([
        { "id": "t1", "type": "section_title", "config": { "title": "Uno", "level": 1 } },
        { "id": "b", "type": "page_break", "config": {} },
        { "id": "t2", "type": "section_title", "config": { "title": "Dos", "level": 2 } }
    ]);

    let req = test::TestRequest::post()
        .uri("/api/informes/toc")
        .set_json(json!({ "blocks": blocks, "config": { "maxLevel": 1 } }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!([{ "number": 1, "title": "Uno", "level": 1, "pageNumber": 1 }])
    );
}

#[::core::prelude::v1::test]
fn test_openapi_lists_routes() {
    let doc = ApiDoc::openapi();

    assert!(doc.paths.paths.contains_key("/api/informes/assemble"));
    assert!(doc.paths.paths.contains_key("/api/templates/{id}/freeze"));
}
