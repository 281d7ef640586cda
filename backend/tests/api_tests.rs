//! HTTP tests against an in-memory library.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use datalens_core::domain::UserId;
use datalens_core::ports::InMemoryLibrary;
use datalens_lib::{AppState, build_router};
use serde_json::{Value, json};
use tower::util::ServiceExt;

fn setup_app() -> (Arc<InMemoryLibrary>, Router) {
  let store = Arc::new(InMemoryLibrary::new());
  let state = AppState::new(store.clone(), store.clone());
  (store, build_router(state))
}

fn request(method: &str, uri: &str, user: Option<UserId>, body: Option<Value>) -> Request<Body> {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(user) = user {
    builder = builder.header("x-user-id", user.to_string());
  }
  match body {
    Some(json) => builder.header(header::CONTENT_TYPE, "application/json").body(Body::from(json.to_string())).unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  }
}

async fn extract_json(body: Body) -> Value {
  let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("Should read body");
  serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
  let response = app.clone().oneshot(req).await.unwrap();
  let status = response.status();
  let location = response.headers().get(header::LOCATION).map(|v| v.to_str().unwrap().to_string());
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
  (status, location, body)
}

fn track(id: &str, name: &str, artist: &str, release_date: &str, genres: &str) -> Value {
  json!({
    "track_id": id,
    "name": name,
    "album": format!("{artist} album"),
    "artist": artist,
    "release_date": release_date,
    "acousticness": 0.2,
    "danceability": 0.6,
    "energy": 0.7,
    "instrumentalness": 0.0,
    "liveness": 0.1,
    "loudness": -6.0,
    "speechiness": 0.04,
    "tempo": 118.0,
    "valence": 0.5,
    "key": 1,
    "mode": 1,
    "time_signature": 4,
    "duration_ms": 200000,
    "popularity": 70,
    "genres": genres,
  })
}

async fn import_library(app: &Router, user: UserId) {
  let tracks = json!([
    track("1", "One", "A", "2017", "pop,dance pop"),
    track("2", "Two", "A", "2017-11", "pop"),
    track("3", "Three", "B", "2017-11-12", "rock"),
    track("4", "Four", "B", "2019-02-01", "rock"),
    track("5", "Five", "B", "2020-05-01", ""),
    track("6", "Six", "C", "2020-05", "jazz"),
  ]);
  let (status, _, body) = call(app, request("POST", "/api/library/tracks", Some(user), Some(tracks))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["added"], 6);
}

async fn select(app: &Router, user: UserId, slot: &str, value: &str) -> Value {
  let uri = format!("/api/editor/slots/{slot}");
  let (status, _, body) = call(app, request("PUT", &uri, Some(user), Some(json!({ "value": value })))).await;
  assert_eq!(status, StatusCode::OK);
  body
}

async fn set_title(app: &Router, user: UserId, title: &str) {
  let req = request("PUT", "/api/editor/title", Some(user), Some(json!({ "title": title })));
  let (status, _, _) = call(app, req).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn health_needs_no_user() {
  let (_, app) = setup_app();

  let response = app.oneshot(request("GET", "/health", None, None)).await.unwrap();

  assert_eq!(response.status(), StatusCode::OK);
  let body = extract_json(response.into_body()).await;
  assert_eq!(body["status"], "ok");
  assert!(body["version"].is_string());
}

#[tokio::test]
async fn user_header_is_required() {
  let (_, app) = setup_app();

  let (status, _, body) = call(&app, request("GET", "/api/charts", None, None)).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"]["code"], "UNAUTHORIZED");

  let mut bad = request("GET", "/api/charts", None, None);
  bad.headers_mut().insert("x-user-id", "not-a-uuid".parse().unwrap());
  let (status, _, _) = call(&app, bad).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_lists_closed_menus() {
  let (_, app) = setup_app();

  let (status, _, body) = call(&app, request("GET", "/api/catalog", Some(UserId::new()), None)).await;

  assert_eq!(status, StatusCode::OK);
  let slots = body.as_array().unwrap();
  assert_eq!(slots.len(), 8);
  assert_eq!(slots[0]["slot"], "kpi_1");
  assert_eq!(slots[0]["kind"], "kpi");
  assert_eq!(slots[0]["options"].as_array().unwrap().len(), 5);
  assert_eq!(slots[4]["slot"], "viz_1");
  assert_eq!(slots[4]["options"].as_array().unwrap().len(), 11);
  assert_eq!(slots[4]["options"][10]["value"], "none");
}

#[tokio::test]
async fn immediate_chart_views() {
  let (_, app) = setup_app();
  let user = UserId::new();
  import_library(&app, user).await;

  let (status, _, body) = call(&app, request("GET", "/api/charts/top_10_artists", Some(user), None)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "chart");
  assert_eq!(body["figure"]["data"][0]["x"], json!(["B", "A", "C"]));
  assert_eq!(body["figure"]["data"][0]["y"], json!([3, 2, 1]));

  let (status, _, body) = call(&app, request("GET", "/api/charts/songs_per_year", Some(user), None)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["figure"]["data"][0]["y"], json!([3, 1, 2]));

  let (status, _, body) = call(&app, request("GET", "/api/charts/not_a_chart", Some(user), None)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "no_chart");
}

#[tokio::test]
async fn overview_renders_all_analytical_charts() {
  let (_, app) = setup_app();
  let user = UserId::new();
  import_library(&app, user).await;

  let (status, _, body) = call(&app, request("GET", "/api/charts", Some(user), None)).await;

  assert_eq!(status, StatusCode::OK);
  let entries = body.as_array().unwrap();
  assert_eq!(entries.len(), 10);
  assert!(entries.iter().all(|e| e["status"] == "chart"));
  assert_eq!(entries[0]["identifier"], "energy_loudness");
  assert_eq!(entries[7]["label"], "Danceability vs Energy");
}

#[tokio::test]
async fn compose_save_and_replay() {
  let (_, app) = setup_app();
  let user = UserId::new();
  import_library(&app, user).await;

  set_title(&app, user, "My dashboard").await;
  let kpi = select(&app, user, "kpi_1", "artist_count").await;
  assert_eq!(kpi["figure"]["data"][0]["value"], 3);
  select(&app, user, "viz_1", "genres").await;
  let wrong = select(&app, user, "viz_2", "song_count").await;
  assert_eq!(wrong["status"], "no_chart");
  assert_eq!(wrong["identifier"], "none");

  let (status, location, body) = call(&app, request("POST", "/api/editor/save", Some(user), None)).await;
  assert_eq!(status, StatusCode::CREATED);
  let location = location.unwrap();
  assert_eq!(body["location"], location);
  assert!(location.starts_with("/dashboard-view/"));

  let (status, _, page) = call(&app, request("GET", &location, Some(user), None)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(page["name"], "My dashboard");
  let widgets = page["widgets"].as_array().unwrap();
  assert_eq!(widgets.len(), 8);
  assert_eq!(widgets[0]["slot"], "kpi_1");
  assert_eq!(widgets[0]["figure"]["data"][0]["value"], 3);
  assert_eq!(widgets[4]["status"], "chart");
  assert_eq!(widgets[4]["figure"]["data"][0]["type"], "treemap");
  assert_eq!(widgets[5]["status"], "no_chart");

  let (_, _, again) = call(&app, request("GET", &location, Some(user), None)).await;
  assert_eq!(page, again);

  let (_, _, list) = call(&app, request("GET", "/api/dashboards", Some(user), None)).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
  assert_eq!(list[0]["location"], location);
}

#[tokio::test]
async fn save_rejections_are_unprocessable() {
  let (store, app) = setup_app();
  let user = UserId::new();

  let (status, _, body) = call(&app, request("POST", "/api/editor/save", Some(user), None)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
  assert_eq!(body["error"]["message"], "dashboard name is required");

  set_title(&app, user, "Empty").await;
  let (status, _, body) = call(&app, request("POST", "/api/editor/save", Some(user), None)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"]["message"], "select at least one chart before saving");

  select(&app, user, "viz_1", "heatmap").await;
  let (status, _, _) = call(&app, request("POST", "/api/editor/save", Some(user), None)).await;
  assert_eq!(status, StatusCode::CREATED);
  let (status, _, body) = call(&app, request("POST", "/api/editor/save", Some(user), None)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"]["message"], "a dashboard named 'Empty' already exists");

  assert_eq!(store.dashboard_rows(), 1);
}

#[tokio::test]
async fn slot_edits_alone_never_persist() {
  let (store, app) = setup_app();
  let user = UserId::new();
  set_title(&app, user, "Draft only").await;

  for slot in ["kpi_1", "kpi_2", "viz_1", "viz_2", "viz_3"] {
    select(&app, user, slot, "none").await;
  }
  select(&app, user, "viz_4", "heatmap").await;

  let (status, _, draft) = call(&app, request("GET", "/api/editor", Some(user), None)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(draft["title"], "Draft only");
  assert_eq!(draft["slots"]["viz_4"], "heatmap");
  assert_eq!(draft["slots"]["kpi_1"], "none");
  assert_eq!(store.dashboard_rows(), 0);
}

#[tokio::test]
async fn unknown_slot_is_not_found() {
  let (_, app) = setup_app();

  let req = request("PUT", "/api/editor/slots/viz_9", Some(UserId::new()), Some(json!({ "value": "heatmap" })));
  let (status, _, _) = call(&app, req).await;

  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_view_hides_invalid_and_foreign_ids() {
  let (_, app) = setup_app();
  let owner = UserId::new();
  set_title(&app, owner, "Mine").await;
  select(&app, owner, "viz_1", "genres").await;
  let (_, location, _) = call(&app, request("POST", "/api/editor/save", Some(owner), None)).await;
  let location = location.unwrap();

  let (status, _, _) = call(&app, request("GET", &location, Some(UserId::new()), None)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _, body) = call(&app, request("GET", "/dashboard-view/12", Some(owner), None)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_dates_fail_one_widget() {
  let (_, app) = setup_app();
  let user = UserId::new();
  let tracks = json!([track("1", "One", "A", "someday", "pop")]);
  call(&app, request("POST", "/api/library/tracks", Some(user), Some(tracks))).await;

  set_title(&app, user, "Dates").await;
  let failed = select(&app, user, "viz_1", "popularity_over_time").await;
  select(&app, user, "viz_2", "popularity_histogram").await;
  let (_, location, _) = call(&app, request("POST", "/api/editor/save", Some(user), None)).await;

  let (status, _, page) = call(&app, request("GET", &location.unwrap(), Some(user), None)).await;

  assert_eq!(failed["status"], "failed");
  assert_eq!(status, StatusCode::OK);
  assert_eq!(page["widgets"][4]["status"], "failed");
  assert_eq!(page["widgets"][5]["status"], "chart");
}

#[tokio::test]
async fn import_validation_and_purge() {
  let (store, app) = setup_app();
  let user = UserId::new();

  let bad = json!([track("1", "", "A", "2017", "pop")]);
  let (status, _, body) = call(&app, request("POST", "/api/library/tracks", Some(user), Some(bad))).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

  import_library(&app, user).await;
  set_title(&app, user, "Gone soon").await;
  select(&app, user, "viz_1", "genres").await;
  call(&app, request("POST", "/api/editor/save", Some(user), None)).await;
  assert_eq!(store.dashboard_rows(), 1);

  let (status, _, _) = call(&app, request("DELETE", "/api/library", Some(user), None)).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(store.dashboard_rows(), 0);

  let (_, _, body) = call(&app, request("GET", "/api/charts/song_count", Some(user), None)).await;
  assert_eq!(body["figure"]["data"][0]["value"], 0);
}

#[tokio::test]
async fn purge_discards_the_editor_draft() {
  let (_, app) = setup_app();
  let user = UserId::new();
  set_title(&app, user, "Half done").await;
  select(&app, user, "viz_1", "genres").await;

  let (status, _, _) = call(&app, request("DELETE", "/api/library", Some(user), None)).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (_, _, draft) = call(&app, request("GET", "/api/editor", Some(user), None)).await;
  assert_eq!(draft["title"], "");
  assert_eq!(draft["slots"]["viz_1"], "none");
}
