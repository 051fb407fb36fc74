// diploma-client/tests/common/mod.rs
// In-memory registry backend for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Json;
use chrono::NaiveDate;
use diploma_client::{DiplomaApi, DiplomaStore, MemoryCache, OneshotHttpClient};
use serde_json::{Value, json};

pub const PREFIX: &str = "/api/diploma";

/// Mutable backend state shared by all handlers
#[derive(Default)]
pub struct Backend {
    pub books: Vec<Value>,
    pub decisions: Vec<Value>,
    pub fields: Vec<Value>,
    pub infos: Vec<Value>,
    /// Requests served so far
    pub hits: usize,
    /// Collections whose list endpoint answers with a 500 envelope
    pub failing: HashSet<&'static str>,
    /// Answer every request with a `null` body
    pub respond_null: bool,
    pub last_query: Option<String>,
    pub last_authorization: Option<String>,
    /// Last generated id suffix
    pub next_id: usize,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

impl Backend {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

pub fn book(id: &str, year: i32) -> Value {
    json!({ "id": id, "year": year, "currentNumber": 0 })
}

pub fn field(id: &str, code: &str, required: bool) -> Value {
    json!({
        "id": id,
        "name": code.to_uppercase(),
        "code": code,
        "dataType": "String",
        "required": required,
        "order": 0
    })
}

pub fn info(id: &str, full_name: &str, student_id: &str, book_id: &str) -> Value {
    json!({
        "id": id,
        "bookNumber": 1,
        "diplomaNumber": format!("DN-{id}"),
        "studentId": student_id,
        "fullName": full_name,
        "dateOfBirth": "2000-01-15",
        "graduationDecisionId": "d1",
        "diplomaBookId": book_id,
        "customFields": {}
    })
}

/// Fixed "today" for tests touching date rules
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn enter(state: &SharedBackend) -> MutexGuard<'_, Backend> {
    let mut backend = state.lock().unwrap();
    backend.hits += 1;
    backend
}

fn reply(backend: &Backend, data: Value) -> Response {
    if backend.respond_null {
        return (StatusCode::OK, "null").into_response();
    }
    Json(json!({ "data": data, "status": 200 })).into_response()
}

fn reject(status: u16, message: &str) -> Response {
    Json(json!({ "status": status, "message": message })).into_response()
}

fn list(backend: &Backend, name: &'static str, items: &[Value]) -> Response {
    if backend.failing.contains(name) {
        return reject(500, &format!("Failed to load {name}"));
    }
    reply(backend, Value::Array(items.to_vec()))
}

fn with_id(mut body: Value, id: String) -> Value {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("id".to_string(), Value::String(id));
    }
    body
}

fn patch(items: &mut [Value], id: &str, changes: &Value) -> Option<Value> {
    let item = items.iter_mut().find(|item| item["id"] == id)?;
    if let (Some(target), Some(changes)) = (item.as_object_mut(), changes.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Some(item.clone())
}

// ========== Handlers ==========

async fn list_books(State(state): State<SharedBackend>, headers: HeaderMap) -> Response {
    let mut backend = enter(&state);
    backend.last_authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    list(&backend, "books", &backend.books)
}

async fn create_book(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = enter(&state);
    let id = backend.next_id("b");
    let created = book(&id, body["year"].as_i64().unwrap_or_default() as i32);
    backend.books.push(created.clone());
    reply(&backend, created)
}

async fn update_book(
    State(state): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = enter(&state);
    match patch(&mut backend.books, &id, &body) {
        Some(updated) => reply(&backend, updated),
        None => reject(404, "Diploma book not found"),
    }
}

async fn delete_book(State(state): State<SharedBackend>, Path(id): Path<String>) -> Response {
    let mut backend = enter(&state);
    backend.books.retain(|b| b["id"] != id.as_str());
    reply(&backend, Value::Null)
}

async fn list_decisions(State(state): State<SharedBackend>) -> Response {
    let backend = enter(&state);
    list(&backend, "decisions", &backend.decisions)
}

async fn create_decision(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = enter(&state);
    let id = backend.next_id("d");
    let created = with_id(body, id);
    backend.decisions.push(created.clone());
    reply(&backend, created)
}

async fn update_decision(
    State(state): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = enter(&state);
    match patch(&mut backend.decisions, &id, &body) {
        Some(updated) => reply(&backend, updated),
        None => reject(404, "Graduation decision not found"),
    }
}

async fn delete_decision(State(state): State<SharedBackend>, Path(id): Path<String>) -> Response {
    let mut backend = enter(&state);
    backend.decisions.retain(|d| d["id"] != id.as_str());
    reply(&backend, Value::Null)
}

async fn list_fields(State(state): State<SharedBackend>) -> Response {
    let backend = enter(&state);
    list(&backend, "fields", &backend.fields)
}

async fn create_field(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = enter(&state);
    let id = backend.next_id("f");
    let created = with_id(body, id);
    backend.fields.push(created.clone());
    reply(&backend, created)
}

async fn update_field(
    State(state): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = enter(&state);
    match patch(&mut backend.fields, &id, &body) {
        Some(updated) => reply(&backend, updated),
        None => reject(404, "Form field not found"),
    }
}

async fn delete_field(State(state): State<SharedBackend>, Path(id): Path<String>) -> Response {
    let mut backend = enter(&state);
    if id == "locked" {
        return reject(409, "Field is in use");
    }
    backend.fields.retain(|f| f["id"] != id.as_str());
    reply(&backend, Value::Null)
}

async fn list_infos(
    State(state): State<SharedBackend>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let backend = enter(&state);
    let infos: Vec<Value> = match query.get("diplomaBookId") {
        Some(book_id) => backend
            .infos
            .iter()
            .filter(|i| i["diplomaBookId"] == book_id.as_str())
            .cloned()
            .collect(),
        None => backend.infos.clone(),
    };
    list(&backend, "infos", &infos)
}

async fn create_info(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = enter(&state);
    let id = backend.next_id("i");
    let mut created = with_id(body, id);
    if let Some(obj) = created.as_object_mut() {
        obj.insert("bookNumber".to_string(), json!(backend.infos.len() + 1));
    }
    backend.infos.push(created.clone());
    reply(&backend, created)
}

async fn update_info(
    State(state): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = enter(&state);
    match patch(&mut backend.infos, &id, &body) {
        Some(updated) => reply(&backend, updated),
        None => reject(404, "Diploma info not found"),
    }
}

async fn delete_info(State(state): State<SharedBackend>, Path(id): Path<String>) -> Response {
    let mut backend = enter(&state);
    backend.infos.retain(|i| i["id"] != id.as_str());
    reply(&backend, Value::Null)
}

async fn search_infos(
    State(state): State<SharedBackend>,
    RawQuery(raw): RawQuery,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut backend = enter(&state);
    backend.last_query = raw;
    let found: Vec<Value> = backend
        .infos
        .iter()
        .filter(|i| {
            query
                .iter()
                .all(|(key, value)| i[key.as_str()].as_str().is_none_or(|v| v == value.as_str()))
        })
        .cloned()
        .collect();
    reply(&backend, Value::Array(found))
}

async fn validate(
    State(state): State<SharedBackend>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let backend = enter(&state);
    let taken = match kind.as_str() {
        "diploma-number" => backend.infos.iter().any(|i| i["diplomaNumber"] == body["diplomaNumber"]),
        "student-id" => backend.infos.iter().any(|i| i["studentId"] == body["studentId"]),
        "diploma-book" => backend.books.iter().any(|b| b["year"] == body["year"]),
        "graduation-decision" => backend.decisions.iter().any(|d| d["number"] == body["number"]),
        _ => return (StatusCode::NOT_FOUND, "unknown check").into_response(),
    };
    let check = if taken {
        json!({ "valid": false, "message": "Already in use" })
    } else {
        json!({ "valid": true })
    };
    reply(&backend, check)
}

/// Registry routes over `state`
pub fn router(state: SharedBackend) -> Router {
    let api = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", put(update_book).delete(delete_book))
        .route("/decisions", get(list_decisions).post(create_decision))
        .route("/decisions/{id}", put(update_decision).delete(delete_decision))
        .route("/fields", get(list_fields).post(create_field))
        .route("/fields/{id}", put(update_field).delete(delete_field))
        .route("/infos", get(list_infos).post(create_info))
        .route("/infos/search", get(search_infos))
        .route("/infos/{id}", put(update_info).delete(delete_info))
        .route("/validate/{kind}", post(validate));
    Router::new().nest(PREFIX, api).with_state(state)
}

/// Backend plus an API wired to it through the in-process transport
pub fn api(backend: Backend) -> (SharedBackend, Arc<MemoryCache>, DiplomaApi<OneshotHttpClient>) {
    let state = Arc::new(Mutex::new(backend));
    let cache = Arc::new(MemoryCache::new());
    let api = DiplomaApi::new(OneshotHttpClient::new(router(state.clone())))
        .with_cache(cache.clone())
        .with_clock(today);
    (state, cache, api)
}

pub fn store(backend: Backend) -> (SharedBackend, DiplomaStore<OneshotHttpClient>) {
    let (state, _cache, api) = api(backend);
    (state, DiplomaStore::new(api))
}

pub fn hits(state: &SharedBackend) -> usize {
    state.lock().unwrap().hits
}
