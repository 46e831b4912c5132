//! HttpClient against a local axum server standing in for the Waypoint backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use api::{ApiError, Backend, HttpClient, LegacyEntry};
use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::{ListId, Location, PlaceId, Viewport};

const TOKEN: &str = "secret-token";

#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<String>>>,
}

impl Seen {
    fn push(&self, entry: impl Into<String>) {
        self.requests.lock().unwrap().push(entry.into());
    }

    fn all(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Not authenticated" })),
    )
        .into_response()
}

fn place(id: &str) -> Value {
    json!({
        "name": "Joe Coffee",
        "address": "141 Waverly Pl",
        "latitude": 40.733,
        "longitude": -73.999,
        "place_id": id,
        "category": "catering.cafe.coffee_shop",
        "score": 0.9
    })
}

async fn verify_token(Path(token): Path<String>) -> axum::response::Response {
    if token == TOKEN {
        Json(json!({ "id": 1, "username": "ada" })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Token expired" }))).into_response()
    }
}

async fn login(Form(form): Form<HashMap<String, String>>) -> axum::response::Response {
    if form.get("username").map(String::as_str) == Some("ada")
        && form.get("password").map(String::as_str) == Some("lovelace")
    {
        Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> axum::response::Response {
    if body["username"] == "taken" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "username"], "msg": "Username already taken" }] })),
        )
            .into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn search(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    seen.push(format!(
        "search query={} lat={} long={}",
        params.get("query").cloned().unwrap_or_default(),
        params.get("lat").cloned().unwrap_or_default(),
        params.get("long").cloned().unwrap_or_default(),
    ));
    Json(json!({ "results": [place("p1"), place("p2")] }))
}

async fn search_by_id(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let id = params.get("id").cloned().unwrap_or_default();
    Json(json!({ "result": place(&id) }))
}

async fn lists(headers: HeaderMap) -> axum::response::Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        { "id": 1, "name": "Favorites", "is_default": true },
        { "id": 2, "name": "Planned", "is_default": true },
        { "id": "17", "name": "Brunch", "is_default": false }
    ]))
    .into_response()
}

async fn create_list(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    seen.push(format!("create {}", body["name"].as_str().unwrap_or_default()));
    StatusCode::CREATED.into_response()
}

async fn list_detail(Path(id): Path<String>) -> axum::response::Response {
    if id == "17" {
        Json(json!({ "id": 17, "name": "Brunch", "locations": [place("p1")] })).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "List not found" }))).into_response()
    }
}

async fn delete_list(Path(id): Path<String>) -> axum::response::Response {
    if id == "1" {
        (
            StatusCode::FORBIDDEN,
            Json(json!({ "detail": "Default lists cannot be deleted" })),
        )
            .into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn check_location(Path(place_id): Path<String>) -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Favorites", "added": place_id == "p1" },
        { "id": 2, "name": "Planned", "added": false }
    ]))
}

async fn add_location(
    State(seen): State<Seen>,
    Path(list_id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    seen.push(format!(
        "add {} to {list_id}",
        body["place_id"].as_str().unwrap_or_default()
    ));
    StatusCode::CREATED
}

async fn remove_location(
    State(seen): State<Seen>,
    Path((list_id, place_id)): Path<(String, String)>,
) -> StatusCode {
    seen.push(format!("remove {place_id} from {list_id}"));
    StatusCode::NO_CONTENT
}

async fn server_error() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn legacy_entries() -> Json<Value> {
    Json(json!([{
        "id": 4,
        "location_id": "p1",
        "location_name": "Joe Coffee",
        "address": null,
        "categories": [{ "name": "catering.cafe" }],
        "lat": 40.733,
        "long": -73.999,
        "type": "favorites"
    }]))
}

async fn legacy_add(State(seen): State<Seen>, Json(body): Json<Value>) -> StatusCode {
    seen.push(format!(
        "legacy add {} as {}",
        body["location_id"].as_str().unwrap_or_default(),
        body["type"].as_str().unwrap_or_default()
    ));
    StatusCode::CREATED
}

async fn legacy_remove(State(seen): State<Seen>, Path(id): Path<i64>) -> StatusCode {
    seen.push(format!("legacy remove {id}"));
    StatusCode::NO_CONTENT
}

async fn spawn_server() -> (HttpClient, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/auth/verify-token/{token}", get(verify_token))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(server_error))
        .route("/searchQuery", get(search))
        .route("/searchByID", get(search_by_id))
        .route("/lists", get(lists).post(create_list))
        .route("/lists/{id}", get(list_detail).delete(delete_list))
        .route("/locations/check-location/{place_id}", get(check_location))
        .route("/locations/{list_id}", post(add_location))
        .route("/locations/{list_id}/{place_id}", delete(remove_location))
        .route("/userlist", get(legacy_entries))
        .route("/userlist/", post(legacy_add))
        .route("/userlist/{id}", delete(legacy_remove))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (HttpClient::new(format!("http://{addr}/")), seen)
}

#[tokio::test]
async fn test_login_and_verify() {
    let (client, _) = spawn_server().await;

    let response = client.login("ada", "lovelace").await.unwrap();
    assert_eq!(response.access_token, TOKEN);
    assert!(response.user.is_none());

    let user = client.verify_token(&response.access_token).await.unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(user.id, "1");

    let err = client.login("ada", "wrong").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized(Some("Invalid credentials".to_string())));
    assert!(client.verify_token("nope").await.unwrap_err().is_auth_failure());
}

#[tokio::test]
async fn test_register_validation_detail() {
    let (client, _) = spawn_server().await;
    client.register("bob", "pw").await.unwrap();

    let err = client.register("taken", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));
    assert_eq!(err.user_message(), "Username already taken");
}

#[tokio::test]
async fn test_bearer_credential_is_attached() {
    let (client, _) = spawn_server().await;
    assert!(client.lists().await.unwrap_err().is_auth_failure());

    client.set_credential(Some(TOKEN.to_string()));
    let lists = client.lists().await.unwrap();
    assert_eq!(lists.len(), 3);
    assert_eq!(lists[2].id, ListId::from(17));
    assert!(lists[0].is_default);
    assert!(lists[0].locations.is_empty());
}

#[tokio::test]
async fn test_search_sends_viewport() {
    let (client, seen) = spawn_server().await;
    let results = client
        .search("coffee shop", Viewport::new(40.5, -73.25))
        .await
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(
        seen.all(),
        vec!["search query=coffee shop lat=40.5 long=-73.25".to_string()]
    );

    let detail = client.search_by_id(&PlaceId::new("p9")).await.unwrap();
    assert_eq!(detail.place_id, PlaceId::new("p9"));
    assert_eq!(detail.category_label().as_deref(), Some("Coffee Shop"));
}

#[tokio::test]
async fn test_list_endpoints() {
    let (client, seen) = spawn_server().await;
    client.set_credential(Some(TOKEN.to_string()));

    client.create_list("Brunch").await.unwrap();
    let detail = client.list_detail(&ListId::new("17")).await.unwrap();
    assert_eq!(detail.locations.len(), 1);

    let err = client.list_detail(&ListId::new("99")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "List not found");

    client.delete_list(&ListId::new("17")).await.unwrap();
    let err = client.delete_list(&ListId::new("1")).await.unwrap_err();
    assert_eq!(err.user_message(), "Default lists cannot be deleted");

    assert_eq!(seen.all(), vec!["create Brunch".to_string()]);
}

#[tokio::test]
async fn test_location_endpoints() {
    let (client, seen) = spawn_server().await;
    client.set_credential(Some(TOKEN.to_string()));

    let statuses = client.check_location(&PlaceId::new("p1")).await.unwrap();
    assert!(statuses[0].added);
    assert!(!statuses[1].added);

    let location: Location = serde_json::from_value(place("p1")).unwrap();
    client
        .add_location(&ListId::new("1"), &location)
        .await
        .unwrap();
    client
        .remove_location(&ListId::new("2"), &PlaceId::new("p1"))
        .await
        .unwrap();
    assert_eq!(
        seen.all(),
        vec!["add p1 to 1".to_string(), "remove p1 from 2".to_string()]
    );
}

#[tokio::test]
async fn test_status_without_detail_uses_generic_message() {
    let (client, _) = spawn_server().await;
    let err = client.logout().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Backend {
            status: 500,
            detail: None
        }
    );
    assert_eq!(err.user_message(), "Request failed");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = HttpClient::new("http://127.0.0.1:1");
    let err = client.search("coffee", Viewport::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message(), "Request failed");
}

#[tokio::test]
async fn test_legacy_endpoints() {
    let (client, seen) = spawn_server().await;

    let entries = client.legacy_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    let location = entries[0].to_location();
    assert_eq!(location.address, "");
    assert_eq!(location.category.as_deref(), Some("catering.cafe"));

    client
        .legacy_add(&LegacyEntry::from_location(&location, "planned"))
        .await
        .unwrap();
    client.legacy_remove(4).await.unwrap();
    assert_eq!(
        seen.all(),
        vec![
            "legacy add p1 as planned".to_string(),
            "legacy remove 4".to_string()
        ]
    );
}
