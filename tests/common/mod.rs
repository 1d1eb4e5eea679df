#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use lms_console::config::AppConfig;
use lms_console::http::HttpClient;
use lms_console::session::{SessionContext, SessionStore};
use lms_console::storage::{KeyValueStore, MemoryStore};

pub const SUPER_TOKEN: &str = "tok-super";
pub const ADMIN_TOKEN: &str = "tok-admin";
/// Alice's login response carries no token, so the client falls back to this one
pub const DEMO_TOKEN: &str = "demo_token";

const COLLECTIONS: [&str; 4] = ["universities", "courses", "students", "admins"];

/// In-process stand-in for the LMS REST backend.
#[derive(Clone)]
pub struct FakeBackend {
    inner: Arc<Inner>,
}

struct Inner {
    calls: Mutex<HashMap<String, usize>>,
    bearer_seen: Mutex<Vec<Option<String>>>,
    force_unauthorized: AtomicBool,
    failing: Mutex<Option<String>>,
    records: Mutex<HashMap<&'static str, Vec<Value>>>,
    next_id: Mutex<i64>,
}

impl FakeBackend {
    fn new() -> Self {
        let mut records = HashMap::new();
        records.insert("universities", seed_universities());
        records.insert("courses", seed_courses());
        records.insert("students", seed_students());
        records.insert("admins", seed_admins());

        Self {
            inner: Arc::new(Inner {
                calls: Mutex::new(HashMap::new()),
                bearer_seen: Mutex::new(Vec::new()),
                force_unauthorized: AtomicBool::new(false),
                failing: Mutex::new(None),
                records: Mutex::new(records),
                next_id: Mutex::new(1000),
            }),
        }
    }

    /// Number of requests received for e.g. `"POST /auth/login"`.
    pub fn calls(&self, endpoint: &str) -> usize {
        self.inner.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.inner.calls.lock().unwrap().values().sum()
    }

    /// Bearer tokens of guarded requests in arrival order (`None` when absent).
    pub fn bearer_seen(&self) -> Vec<Option<String>> {
        self.inner.bearer_seen.lock().unwrap().clone()
    }

    /// Make every guarded endpoint answer 401.
    pub fn force_unauthorized(&self, on: bool) {
        self.inner.force_unauthorized.store(on, Ordering::SeqCst);
    }

    /// Make one collection answer 500.
    pub fn fail_collection(&self, collection: &str) {
        *self.inner.failing.lock().unwrap() = Some(collection.to_string());
    }

    fn record(&self, endpoint: String) {
        *self.inner.calls.lock().unwrap().entry(endpoint).or_insert(0) += 1;
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
        let bearer = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string);
        self.inner.bearer_seen.lock().unwrap().push(bearer.clone());

        let valid = matches!(bearer.as_deref(), Some(SUPER_TOKEN) | Some(ADMIN_TOKEN) | Some(DEMO_TOKEN));
        if self.inner.force_unauthorized.load(Ordering::SeqCst) || !valid {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "message": "Unauthorized"})),
            ));
        }
        Ok(())
    }

    fn check_failing(&self, collection: &str) -> Result<(), (StatusCode, Json<Value>)> {
        if self.inner.failing.lock().unwrap().as_deref() == Some(collection) {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": format!("{collection} unavailable")})),
            ));
        }
        Ok(())
    }

    fn find(&self, collection: &'static str, id: i64) -> Option<Value> {
        self.inner.records.lock().unwrap()[collection]
            .iter()
            .find(|r| r["id"].as_i64() == Some(id))
            .cloned()
    }
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn not_found(collection: &str, id: i64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("{collection} {id} not found")})),
    )
}

async fn login(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    backend.record("POST /auth/login".into());
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let response = match (email, password) {
        ("superadmin@lms.com", "password") => json!({
            "success": true,
            "token": SUPER_TOKEN,
            "user": {"id": 1, "email": email, "name": "Super Administrator", "role": "super_admin"}
        }),
        ("admin@uni.edu", "password") => json!({
            "success": true,
            "token": ADMIN_TOKEN,
            "user": {"id": 1, "email": email, "name": "Dana Lee", "role": "university_admin", "universityId": 1}
        }),
        ("alice@uni.edu", "password") => json!({
            "success": true,
            "user": {"id": 7, "email": email, "name": "Alice Smith", "role": "student", "universityId": "1"}
        }),
        ("locked@uni.edu", "password") => json!({
            "success": false,
            "message": "Account locked"
        }),
        ("hollow@uni.edu", "password") => json!({
            "success": true,
            "token": "tok-hollow"
        }),
        ("weird@uni.edu", "password") => json!({
            "success": true,
            "token": "tok-weird",
            "user": {"id": 99, "email": email, "name": "Weird", "role": "janitor"}
        }),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": "Invalid email or password"})),
            )
        }
    };
    (StatusCode::OK, Json(response))
}

fn collection_routes(router: Router<FakeBackend>, collection: &'static str) -> Router<FakeBackend> {
    let base = format!("/api/{collection}");
    let item = format!("/api/{collection}/:id");

    router
        .route(
            &base,
            get(move |State(b): State<FakeBackend>, headers: HeaderMap| async move {
                b.record(format!("GET /{collection}"));
                b.authorize(&headers)?;
                b.check_failing(collection)?;
                let records = b.inner.records.lock().unwrap()[collection].clone();
                Reply::Ok(Json(Value::Array(records)))
            })
            .post(
                move |State(b): State<FakeBackend>, headers: HeaderMap, Json(mut body): Json<Value>| async move {
                    b.record(format!("POST /{collection}"));
                    b.authorize(&headers)?;
                    if body.get("id").is_some() {
                        return Err((
                            StatusCode::BAD_REQUEST,
                            Json(json!({"message": "id must not be sent on create"})),
                        ));
                    }
                    let id = {
                        let mut next = b.inner.next_id.lock().unwrap();
                        *next += 1;
                        *next
                    };
                    body["id"] = json!(id);
                    b.inner
                        .records
                        .lock()
                        .unwrap()
                        .get_mut(collection)
                        .unwrap()
                        .push(body.clone());
                    Reply::Ok(Json(body))
                },
            ),
        )
        .route(
            &item,
            get(
                move |State(b): State<FakeBackend>, headers: HeaderMap, Path(id): Path<i64>| async move {
                    b.record(format!("GET /{collection}/:id"));
                    b.authorize(&headers)?;
                    b.find(collection, id)
                        .map(Json)
                        .ok_or_else(|| not_found(collection, id))
                },
            )
            .put(
                move |State(b): State<FakeBackend>,
                      headers: HeaderMap,
                      Path(id): Path<i64>,
                      Json(mut body): Json<Value>| async move {
                    b.record(format!("PUT /{collection}/:id"));
                    b.authorize(&headers)?;
                    let mut records = b.inner.records.lock().unwrap();
                    let list = records.get_mut(collection).unwrap();
                    let slot = list
                        .iter_mut()
                        .find(|r| r["id"].as_i64() == Some(id))
                        .ok_or_else(|| not_found(collection, id))?;
                    body["id"] = json!(id);
                    *slot = body.clone();
                    Reply::Ok(Json(body))
                },
            )
            .delete(
                move |State(b): State<FakeBackend>, headers: HeaderMap, Path(id): Path<i64>| async move {
                    b.record(format!("DELETE /{collection}/:id"));
                    b.authorize(&headers)?;
                    let mut records = b.inner.records.lock().unwrap();
                    let list = records.get_mut(collection).unwrap();
                    let before = list.len();
                    list.retain(|r| r["id"].as_i64() != Some(id));
                    if list.len() == before {
                        return Err(not_found(collection, id));
                    }
                    Reply::Ok(Json(json!({"success": true})))
                },
            ),
        )
}

fn router(backend: FakeBackend) -> Router {
    let mut router = Router::new()
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/logout",
            post(|State(b): State<FakeBackend>, headers: HeaderMap| async move {
                b.record("POST /auth/logout".into());
                b.authorize(&headers)?;
                Reply::Ok(Json(json!({"success": true})))
            }),
        )
        .route(
            "/api/auth/me",
            get(|State(b): State<FakeBackend>, headers: HeaderMap| async move {
                b.record("GET /auth/me".into());
                b.authorize(&headers)?;
                Reply::Ok(Json(json!({
                    "user": {"id": 1, "email": "superadmin@lms.com", "name": "Super Administrator", "role": "super_admin"}
                })))
            }),
        );
    for collection in COLLECTIONS {
        router = collection_routes(router, collection);
    }
    router.with_state(backend)
}

pub struct TestBackend {
    pub base_url: String,
    pub backend: FakeBackend,
}

/// Start a fake backend on a free port for the current test's runtime.
pub async fn spawn_backend() -> Result<TestBackend> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind fake backend")?;
    let backend = FakeBackend::new();
    let app = router(backend.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend");
    });

    Ok(TestBackend {
        base_url: format!("http://127.0.0.1:{port}/api"),
        backend,
    })
}

/// Client-side stack wired the way the `lms` binary wires it, over memory storage.
pub struct Console {
    pub storage: Arc<dyn KeyValueStore>,
    pub session: Arc<SessionContext>,
    pub http: HttpClient,
    pub store: SessionStore,
}

impl Console {
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::with_storage(base_url, Arc::new(MemoryStore::new()))
    }

    pub fn with_storage(base_url: &str, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let config = AppConfig::with_base_url(base_url);
        let session = SessionContext::new(storage.clone());
        let http = HttpClient::new(&config.api, session.clone())?;
        let store = SessionStore::new(session.clone(), http.clone(), &config.security);
        store.initialize();
        Ok(Self {
            storage,
            session,
            http,
            store,
        })
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.get(key).unwrap()
    }
}

/// Backend plus a console already logged in as `email`.
pub async fn logged_in(email: &str) -> Result<(TestBackend, Console)> {
    let server = spawn_backend().await?;
    let console = Console::connect(&server.base_url)?;
    anyhow::ensure!(console.store.login(email, "password").await, "login as {email} failed");
    Ok((server, console))
}

/// Base URL on which nothing is listening.
pub fn dead_base_url() -> String {
    let port = portpicker::pick_unused_port().expect("free port");
    format!("http://127.0.0.1:{port}/api")
}

fn seed_universities() -> Vec<Value> {
    vec![
        json!({"id": 1, "uniName": "State University", "estYear": 1965, "address": "1 College Ave",
               "status": "ACTIVE", "adminName": "Dana Lee", "students": 2, "courses": 2}),
        json!({"id": 2, "uniName": "Tech Institute", "estYear": "2001", "address": "9 Circuit Rd",
               "status": "ACTIVE", "adminName": "Evan Park", "students": 1, "courses": 1}),
    ]
}

fn seed_courses() -> Vec<Value> {
    vec![
        json!({"id": 101, "courseName": "CS101", "description": "Intro to CS", "credits": 3,
               "instructor": "Dr. Grey", "universityId": 1, "status": "ACTIVE", "capacity": 30}),
        json!({"id": 102, "courseName": "MATH201", "description": "Linear Algebra", "credits": 4,
               "instructor": "Dr. Noether", "universityId": "1", "status": "ACTIVE"}),
        json!({"id": 201, "courseName": "PHYS301", "description": "Quantum Mechanics", "credits": 5,
               "instructor": "Dr. Bohr", "universityId": 2, "status": "INACTIVE"}),
    ]
}

fn seed_students() -> Vec<Value> {
    vec![
        json!({"id": 7, "studentId": "S-2024-001", "fullName": "Alice Smith", "email": "alice@uni.edu",
               "major": "Computer Science", "year": 2, "phoneNumber": "555-0100", "universityId": 1}),
        json!({"id": 8, "studentId": "S-2024-002", "fullName": "Bob Jones", "email": "bob@uni.edu",
               "major": "Mathematics", "year": 3, "phoneNumber": "555-0101", "universityId": "1"}),
        json!({"id": 9, "studentId": "T-2024-001", "fullName": "Carol White", "email": "carol@tech.edu",
               "major": "Physics", "year": 1, "phoneNumber": "555-0102", "universityId": 2}),
    ]
}

fn seed_admins() -> Vec<Value> {
    vec![
        json!({"id": 1, "adminName": "Dana Lee", "uniName": "State University", "role": "ADMIN",
               "status": "ACTIVE", "email": "admin@uni.edu", "phnnum": 5550199, "department": "Registrar", "students": 2}),
        json!({"id": 2, "adminName": "Evan Park", "uniName": "Tech Institute", "role": "ADMIN",
               "status": "ACTIVE", "email": "evan@tech.edu", "phnnum": "555-0299", "department": "IT", "students": 1}),
    ]
}
