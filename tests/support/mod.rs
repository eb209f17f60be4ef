//! In-process CouchDB-like store for integration tests.
//!
//! Speaks just enough of the document API for the actions: database create/drop,
//! document POST/GET/PUT/DELETE with revision checks. Every request is recorded.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
};
use cloudant_crud::common::Params;
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;

pub const DATABASE: &str = "db";

/// One request as the store received it.
#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub method: Method,
    /// Path and query.
    pub target: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub databases: HashMap<String, Vec<Map<String, Value>>>,
    pub requests: Vec<Recorded>,
    /// Answer every document PUT with a revision conflict.
    pub conflict_on_put: bool,
    /// Refuse to create databases.
    pub refuse_create: bool,
    /// Answer every request with an empty body.
    pub empty_responses: bool,
    /// Answer document writes and deletes with `ok: false`, changing nothing.
    pub not_ok_on_write: bool,
    /// Answer every document DELETE with a revision conflict.
    pub conflict_on_delete: bool,
    next_id: usize,
}

pub type Shared = Arc<Mutex<Store>>;

impl Store {
    /// A store holding one empty database.
    pub fn with_database() -> Self {
        let mut store = Self::default();
        store.databases.insert(DATABASE.to_string(), Vec::new());
        store
    }

    /// Seed a document; it must carry `_id` and `_rev`.
    pub fn with_document(mut self, document: Value) -> Self {
        let Value::Object(document) = document else {
            panic!("documents are objects");
        };
        self.databases
            .entry(DATABASE.to_string())
            .or_default()
            .push(document);
        self
    }

    pub fn document(&self, id: &str) -> Option<&Map<String, Value>> {
        self.databases
            .get(DATABASE)?
            .iter()
            .find(|document| has_id(document, id))
    }

    pub fn methods(&self) -> Vec<(Method, String)> {
        self.requests
            .iter()
            .map(|request| (request.method.clone(), request.target.clone()))
            .collect()
    }

    fn handle(
        &mut self,
        method: &Method,
        path: &[&str],
        query: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        match (method, path) {
            (&Method::PUT, [database]) => self.create_database(database),
            (&Method::DELETE, [database]) => self.drop_database(database),
            (&Method::POST, [database]) => self.post_document(database, body),
            (&Method::GET, [database, id]) => self.get_document(database, id),
            (&Method::PUT, [database, id]) => self.put_document(database, id, body),
            (&Method::DELETE, [database, id]) => {
                let rev = query.and_then(|query| {
                    query
                        .split('&')
                        .find_map(|pair| pair.strip_prefix("rev="))
                });
                self.delete_document(database, id, rev)
            }
            _ => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({"error": "method_not_allowed", "reason": "Only supported methods allowed."}),
            ),
        }
    }

    fn create_database(&mut self, database: &str) -> (StatusCode, Value) {
        if self.refuse_create {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "unknown_error", "reason": "refused"}),
            );
        }
        if self.databases.contains_key(database) {
            return (
                StatusCode::PRECONDITION_FAILED,
                json!({
                    "error": "file_exists",
                    "reason": "The database could not be created, the file already exists.",
                }),
            );
        }
        self.databases.insert(database.to_string(), Vec::new());
        (StatusCode::CREATED, json!({"ok": true}))
    }

    fn drop_database(&mut self, database: &str) -> (StatusCode, Value) {
        match self.databases.remove(database) {
            Some(_) => (StatusCode::OK, json!({"ok": true})),
            None => missing_database(),
        }
    }

    fn post_document(&mut self, database: &str, body: Option<Value>) -> (StatusCode, Value) {
        let Some(Value::Object(body)) = body else {
            return bad_request();
        };
        let id = match body.get("_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                self.next_id += 1;
                self.next_id.to_string()
            }
        };
        self.write(database, &id, body)
    }

    fn get_document(&self, database: &str, id: &str) -> (StatusCode, Value) {
        let Some(documents) = self.databases.get(database) else {
            return missing_database();
        };
        match documents.iter().find(|document| has_id(document, id)) {
            Some(document) => (StatusCode::OK, Value::Object(document.clone())),
            None => missing_document(),
        }
    }

    fn put_document(
        &mut self,
        database: &str,
        id: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let Some(Value::Object(body)) = body else {
            return bad_request();
        };
        if self.conflict_on_put {
            return conflict();
        }
        self.write(database, id, body)
    }

    fn delete_document(
        &mut self,
        database: &str,
        id: &str,
        rev: Option<&str>,
    ) -> (StatusCode, Value) {
        let Some(documents) = self.databases.get_mut(database) else {
            return missing_database();
        };
        let Some(position) = documents.iter().position(|document| has_id(document, id)) else {
            return missing_document();
        };
        let current = revision(&documents[position]).map(str::to_string);
        if self.conflict_on_delete || rev.is_none() || rev != current.as_deref() {
            return conflict();
        }
        if self.not_ok_on_write {
            return not_ok(id, current.as_deref());
        }
        documents.remove(position);
        (
            StatusCode::OK,
            json!({"ok": true, "id": id, "rev": next_revision(current.as_deref())}),
        )
    }

    /// Store `body` as the next revision of `id`, checking `_rev` against the current one.
    fn write(&mut self, database: &str, id: &str, body: Map<String, Value>) -> (StatusCode, Value) {
        let Some(documents) = self.databases.get_mut(database) else {
            return missing_database();
        };
        let position = documents.iter().position(|document| has_id(document, id));
        let current = position
            .and_then(|position| revision(&documents[position]))
            .map(str::to_string);
        if revision(&body) != current.as_deref() {
            return conflict();
        }
        if self.not_ok_on_write {
            return not_ok(id, current.as_deref());
        }
        let rev = next_revision(current.as_deref());
        let mut document = Map::new();
        document.insert("_id".to_string(), Value::String(id.to_string()));
        document.insert("_rev".to_string(), Value::String(rev.clone()));
        for (key, value) in body {
            if key != "_id" && key != "_rev" {
                document.insert(key, value);
            }
        }
        match position {
            Some(position) => documents[position] = document,
            None => documents.push(document),
        }
        (StatusCode::CREATED, json!({"ok": true, "id": id, "rev": rev}))
    }
}

fn has_id(document: &Map<String, Value>, id: &str) -> bool {
    document.get("_id").and_then(Value::as_str) == Some(id)
}

fn revision(document: &Map<String, Value>) -> Option<&str> {
    document.get("_rev").and_then(Value::as_str)
}

fn next_revision(current: Option<&str>) -> String {
    let generation = current
        .and_then(|rev| rev.split('-').next())
        .and_then(|generation| generation.parse::<u64>().ok())
        .unwrap_or(0);
    format!("{}-x", generation + 1)
}

fn missing_database() -> (StatusCode, Value) {
    (
        StatusCode::NOT_FOUND,
        json!({"error": "not_found", "reason": "Database does not exist."}),
    )
}

fn missing_document() -> (StatusCode, Value) {
    (
        StatusCode::NOT_FOUND,
        json!({"error": "not_found", "reason": "missing"}),
    )
}

fn conflict() -> (StatusCode, Value) {
    (
        StatusCode::CONFLICT,
        json!({"error": "conflict", "reason": "Document update conflict."}),
    )
}

/// A well-formed envelope that does not acknowledge the request.
fn not_ok(id: &str, rev: Option<&str>) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({"ok": false, "id": id, "rev": rev.unwrap_or("0-x")}),
    )
}

fn bad_request() -> (StatusCode, Value) {
    (
        StatusCode::BAD_REQUEST,
        json!({"error": "bad_request", "reason": "invalid UTF-8 JSON"}),
    )
}

async fn handle(
    State(store): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let body = (!body.is_empty()).then(|| serde_json::from_slice(&body).unwrap_or(Value::Null));
    let target = match uri.query() {
        Some(query) => format!("{}?{query}", uri.path()),
        None => uri.path().to_string(),
    };
    let path: Vec<&str> = uri.path().split('/').filter(|segment| !segment.is_empty()).collect();

    let mut store = store.lock().unwrap();
    store.requests.push(Recorded {
        method: method.clone(),
        target,
        content_type: header_value(header::CONTENT_TYPE),
        accept: header_value(header::ACCEPT),
        body: body.clone(),
    });
    if store.empty_responses {
        return (StatusCode::OK, String::new());
    }
    let (status, answer) = store.handle(&method, &path, uri.query(), body);
    (status, answer.to_string())
}

/// Serve `store` on a random local port and return its base URL.
pub async fn spawn(store: Store) -> (String, Shared) {
    let shared = Arc::new(Mutex::new(store));
    let app = Router::new().fallback(handle).with_state(shared.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), shared)
}

/// Invocation parameters for `url`, plus `extra`.
pub fn params(url: &str, extra: Value) -> Params {
    let mut params = Params::new();
    params.insert("services.cloudant.url".to_string(), Value::String(url.to_string()));
    params.insert(
        "services.cloudant.database".to_string(),
        Value::String(DATABASE.to_string()),
    );
    if let Value::Object(extra) = extra {
        params.extend(extra);
    }
    params
}
