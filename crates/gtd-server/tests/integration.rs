use axum::http::StatusCode;
use gtd_core::Services;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn app() -> axum::Router {
    gtd_server::build_router(Services::in_memory())
}

/// Send a request via `oneshot` and return (status, parsed JSON body).
async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

async fn put_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, Some(body)).await
}

async fn delete(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, None).await
}

/// Create an action through the API and return its id.
async fn create_action(app: &axum::Router, title: &str) -> u64 {
    let (status, json) = post_json(app.clone(), "/api/actions", json!({ "title": title })).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json["id"].as_u64().unwrap()
}

async fn create_group(app: &axum::Router, kind: &str, name: &str) -> u64 {
    let (status, json) =
        post_json(app.clone(), &format!("/api/{kind}"), json!({ "name": name })).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json["id"].as_u64().unwrap()
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_store_lists_no_actions() {
    let (status, json) = get(app(), "/api/actions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn create_then_get_action() {
    let app = app();
    let id = create_action(&app, "Call the plumber").await;

    let (status, json) = get(app.clone(), &format!("/api/actions/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Call the plumber");
    assert_eq!(json["is_done"], false);
    assert!(json["list_id"].is_null());

    let (_, all) = get(app, "/api/actions").await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_unknown_action_is_404() {
    let (status, json) = get(app(), "/api/actions/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Entity not found.");
    assert!(json.get("payload").is_none());
}

#[tokio::test]
async fn body_missing_title_is_400_with_json_error() {
    let app = app();
    let (status, json) = post_json(app.clone(), "/api/actions", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("title"));

    let (_, all) = get(app, "/api/actions").await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn malformed_move_body_is_400() {
    let app = app();
    let id = create_action(&app, "Misfiled").await;
    let (status, json) = put_json(
        app,
        &format!("/api/actions/{id}/list"),
        json!({ "list": "inbox" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn update_unknown_action_echoes_payload() {
    let (status, json) = post_json(
        app(),
        "/api/actions",
        json!({ "id": 5, "title": "Ghost" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["payload"]["id"], 5);
    assert_eq!(json["payload"]["title"], "Ghost");
}

#[tokio::test]
async fn put_uses_path_id() {
    let app = app();
    let id = create_action(&app, "Draft").await;

    let (status, json) = put_json(
        app.clone(),
        &format!("/api/actions/{id}"),
        json!({ "title": "Final" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], id);

    let (_, json) = get(app, &format!("/api/actions/{id}")).await;
    assert_eq!(json["title"], "Final");
}

#[tokio::test]
async fn delete_action_then_404() {
    let app = app();
    let id = create_action(&app, "Temporary").await;

    let (status, json) = delete(app.clone(), &format!("/api/actions/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);

    let (status, _) = delete(app, &format!("/api/actions/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn complete_sets_done() {
    let app = app();
    let id = create_action(&app, "File taxes").await;

    let (status, json) =
        post_json(app.clone(), &format!("/api/actions/{id}/complete"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_done"], true);
    assert!(json["done_at"].is_string());
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn move_to_list_and_query_members() {
    let app = app();
    let list_id = create_group(&app, "lists", "Errands").await;
    let id = create_action(&app, "Buy stamps").await;
    create_action(&app, "Stay home").await;

    let (status, _) = put_json(
        app.clone(),
        &format!("/api/actions/{id}/list"),
        json!({ "list_id": list_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get(app, &format!("/api/lists/{list_id}/actions")).await;
    assert_eq!(status, StatusCode::OK);
    let members = json.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["title"], "Buy stamps");
}

#[tokio::test]
async fn move_to_unknown_list_names_the_list() {
    let app = app();
    let id = create_action(&app, "Orphan").await;

    let (status, json) = put_json(
        app,
        &format!("/api/actions/{id}/list"),
        json!({ "list_id": 77 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "List not found.");
}

#[tokio::test]
async fn assign_unknown_action_names_the_action() {
    let app = app();
    let project_id = create_group(&app, "projects", "Garden").await;

    let (status, json) = put_json(
        app,
        "/api/actions/42/project",
        json!({ "project_id": project_id }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Action not found.");
}

#[tokio::test]
async fn deleting_project_detaches_members() {
    let app = app();
    let project_id = create_group(&app, "projects", "Move house").await;
    let id = create_action(&app, "Book van").await;
    put_json(
        app.clone(),
        &format!("/api/actions/{id}/project"),
        json!({ "project_id": project_id }),
    )
    .await;

    let (status, json) = delete(app.clone(), &format!("/api/projects/{project_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["detached"], 1);

    let (_, json) = get(app.clone(), &format!("/api/actions/{id}")).await;
    assert!(json["project_id"].is_null());

    let (status, json) = get(app, &format!("/api/projects/{project_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Project not found.");
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rule_violation_is_422() {
    let stores = gtd_core::store::Stores::in_memory();
    let services = Services::new(&stores, gtd_core::rules::RuleSet::enforced());
    let app = gtd_server::build_router(services);

    let (status, json) = post_json(app, "/api/actions", json!({ "title": "  " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("title must not be empty"));
}
