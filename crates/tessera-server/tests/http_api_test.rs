//! HTTP API integration tests
//!
//! Drives the v1 routes against in-memory SQLite via the actix test
//! service: entry lifecycle, error status codes, list queries.

use actix_web::{App, http::StatusCode, test, web};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};

use tessera_persistence::Migrator;
use tessera_server::{model::AppState, routes};

const TENANT: (&str, &str) = ("x-tenant-id", "diku");

async fn state() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    AppState::new(db)
}

fn entry_body() -> Value {
    json!({
        "module": "CHECKOUT",
        "configName": "other_settings",
        "code": "audioAlertsEnabled",
        "value": "true"
    })
}

fn post_entry(body: &Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/v1/entries")
        .insert_header(TENANT)
        .insert_header(("x-user-id", "amy"))
        .set_json(body)
}

#[actix_web::test]
async fn test_entry_lifecycle() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .service(routes()),
    )
    .await;

    // create
    let resp = test::call_service(&app, post_entry(&entry_body()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["enabled"], true);
    assert_eq!(created["metadata"]["createdBy"], "amy");
    let id = created["id"].as_str().unwrap().to_string();

    // duplicate enabled entry for the same scope key
    let resp = test::call_service(&app, post_entry(&entry_body()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // fetch it back
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/v1/entries/{id}"))
            .insert_header(TENANT)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // replace, flipping the payload
    let mut update = entry_body();
    update["value"] = json!("false");
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/v1/entries/{id}"))
            .insert_header(TENANT)
            .set_json(&update)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let replaced: Value = test::read_body_json(resp).await;
    assert_eq!(replaced["value"], "false");
    assert_eq!(replaced["id"], id.as_str());

    // delete, then the id is gone
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/v1/entries/{id}"))
            .insert_header(TENANT)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/v1/entries/{id}"))
            .insert_header(TENANT)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // audit trail: CREATE, UPDATE, DELETE
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/v1/audit")
            .insert_header(TENANT)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let trail: Value = test::read_body_json(resp).await;
    assert_eq!(trail["totalRecords"], 3);
    let operations: Vec<_> = trail["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["operation"].as_str().unwrap())
        .collect();
    assert_eq!(operations, vec!["CREATE", "UPDATE", "DELETE"]);
}

#[actix_web::test]
async fn test_missing_tenant_header_is_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .service(routes()),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/v1/entries").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_list_with_query_and_facets() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .service(routes()),
    )
    .await;

    for code in ["a", "b"] {
        let mut body = entry_body();
        body["code"] = json!(code);
        let resp = test::call_service(&app, post_entry(&body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let query = r#"{"op":"eq","field":"configName","value":"other_settings"}"#;
    let uri = format!(
        "/v1/entries?query={}&facets=code:5&sort=code:desc",
        urlencoded(query)
    );
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&uri)
            .insert_header(TENANT)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let result: Value = test::read_body_json(resp).await;
    assert_eq!(result["totalRecords"], 2);
    assert_eq!(result["records"][0]["code"], "b");
    assert_eq!(result["facets"]["code"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_malformed_facets_are_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .service(routes()),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/v1/entries?facets=code:2,")
            .insert_header(TENANT)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_probe() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state().await))
            .service(routes()),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/v1/health").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

/// Percent-encode the characters a query-tree JSON needs in a URI
fn urlencoded(raw: &str) -> String {
    raw.replace('"', "%22")
        .replace('{', "%7B")
        .replace('}', "%7D")
        .replace(':', "%3A")
        .replace(',', "%2C")
}
