//! In-process stand-in for the site backend.
//!
//! Implements every endpoint the client talks to, keeps its records in
//! memory, and tracks the login through a `session` cookie. Endpoints under
//! `/supportorgs` and `/auth/check` require the cookie.

#![allow(dead_code)]

use std::{
  net::{SocketAddr, TcpListener},
  sync::{Arc, Mutex},
  time::Duration,
};

use axum::{
  extract::{Extension, Path},
  http::{header, HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, post, put},
  Json,
  Router,
};
use serde_json::{json, Map, Value};
use supportsite::client::{ClientConfig, HttpClient};

pub const EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "hunter2";
pub const USER_ID: i64 = 7;
const SESSION_COOKIE: &str = "session=valid";

#[derive(Default)]
pub struct Backend {
  pub about_me: Value,
  pub support_page: Value,
  pub orgs: Vec<Value>,
  pub next_id: i64,
  /// Every request as `METHOD path`, in arrival order.
  pub requests: Vec<String>,
  /// Last body received per `METHOD path`.
  pub bodies: Vec<(String, Value)>,
  /// Paths that answer 500 while listed here.
  pub failing: Vec<String>,
  /// One-shot delays: the next request to the path is answered late, with
  /// the data as it was when the request arrived.
  pub delays: Vec<(String, Duration)>,
}

impl Backend {
  fn take_delay(&mut self, path: &str) -> Option<Duration> {
    let index = self.delays.iter().position(|(delayed, _)| delayed == path)?;
    Some(self.delays.remove(index).1)
  }
}

#[derive(Clone)]
pub struct MockBackend {
  pub addr: SocketAddr,
  pub state: Arc<Mutex<Backend>>,
}

impl MockBackend {
  pub async fn start() -> Self {
    let state = Arc::new(Mutex::new(Backend {
      about_me: json!({
        "aboutMeText": "I help people find support.",
        "aboutMeProfileLink": "https://x.com/someone",
        "aboutMeImage": "/images/me.png",
      }),
      support_page: json!({
        "supportPageHeader": "Get Support",
        "supportPageIntro": "These organizations can help.",
        "userId": 1,
      }),
      next_id: 1,
      ..Backend::default()
    }));

    let app = Router::new()
      .route("/aboutme", get(get_about_me).put(put_about_me))
      .route("/supportpage", get(get_support_page).put(put_support_page))
      .route("/supportorgs", get(list_orgs).post(create_org))
      .route("/supportorgs/:id", put(update_org).delete(delete_org))
      .route("/auth/register", post(register))
      .route("/auth/login", post(login))
      .route("/auth/logout", post(logout))
      .route("/auth/check", get(check))
      .layer(Extension(state.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let server = axum::Server::from_tcp(listener)
      .unwrap()
      .serve(app.into_make_service());
    tokio::spawn(server);

    Self { addr, state }
  }

  pub fn url(&self) -> String {
    format!("http://{}", self.addr)
  }

  pub fn client(&self) -> HttpClient {
    HttpClient::new(&ClientConfig::new(self.url())).unwrap()
  }

  pub fn with<T>(&self, f: impl FnOnce(&mut Backend) -> T) -> T {
    f(&mut self.state.lock().unwrap())
  }

  pub fn seed_org(&self, name: &str, description: &str) -> i64 {
    self.with(|backend| {
      let id = backend.next_id;
      backend.next_id += 1;
      backend.orgs.push(json!({
        "id": id,
        "supportOrgName": name,
        "supportOrgDescription": description,
        "ownerId": USER_ID,
      }));
      id
    })
  }

  pub fn fail(&self, path: &str) {
    self.with(|backend| backend.failing.push(path.to_string()));
  }

  pub fn delay_next(&self, path: &str, delay: Duration) {
    self.with(|backend| backend.delays.push((path.to_string(), delay)));
  }

  pub fn recover(&self) {
    self.with(|backend| backend.failing.clear());
  }

  pub fn requests(&self) -> Vec<String> {
    self.with(|backend| backend.requests.clone())
  }

  pub fn last_body(&self, request: &str) -> Option<Value> {
    self.with(|backend| {
      backend
        .bodies
        .iter()
        .rev()
        .find(|(seen, _)| seen == request)
        .map(|(_, body)| body.clone())
    })
  }
}

/// A base url nothing listens on.
pub fn unreachable_client() -> HttpClient {
  let listener = TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  HttpClient::new(&ClientConfig::new(format!("http://{}", addr))).unwrap()
}

type Shared = Extension<Arc<Mutex<Backend>>>;

fn logged_in(headers: &HeaderMap) -> bool {
  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|value| value.to_str().ok())
    .any(|value| value.split(';').any(|pair| pair.trim() == SESSION_COOKIE))
}

/// Records the request and answers 500 if the path is set to fail.
fn enter(backend: &mut Backend, request: String, body: Option<&Value>) -> Option<Response> {
  backend.requests.push(request.clone());
  if let Some(body) = body {
    backend.bodies.push((request.clone(), body.clone()));
  }

  let path = request.split_once(' ').map(|(_, path)| path).unwrap_or("");
  if backend.failing.iter().any(|failing| failing == path) {
    return Some((StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response());
  }

  None
}

fn unauthorized() -> Response {
  (
    StatusCode::UNAUTHORIZED,
    Json(json!({ "message": "not logged in" })),
  )
    .into_response()
}

async fn get_about_me(Extension(state): Shared) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "GET /aboutme".into(), None) {
    return response;
  }

  Json(backend.about_me.clone()).into_response()
}

async fn put_about_me(Extension(state): Shared, Json(body): Json<Value>) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "PUT /aboutme".into(), Some(&body)) {
    return response;
  }

  backend.about_me = body.clone();
  Json(body).into_response()
}

async fn get_support_page(Extension(state): Shared) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "GET /supportpage".into(), None) {
    return response;
  }

  Json(backend.support_page.clone()).into_response()
}

async fn put_support_page(Extension(state): Shared, Json(body): Json<Value>) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "PUT /supportpage".into(), Some(&body)) {
    return response;
  }

  backend.support_page = body.clone();
  Json(body).into_response()
}

async fn list_orgs(Extension(state): Shared, headers: HeaderMap) -> Response {
  let (orgs, delay) = {
    let mut backend = state.lock().unwrap();
    if let Some(response) = enter(&mut backend, "GET /supportorgs".into(), None) {
      return response;
    }
    if !logged_in(&headers) {
      return unauthorized();
    }

    (
      Value::Array(backend.orgs.clone()),
      backend.take_delay("/supportorgs"),
    )
  };

  if let Some(delay) = delay {
    tokio::time::sleep(delay).await;
  }

  Json(orgs).into_response()
}

async fn create_org(
  Extension(state): Shared,
  headers: HeaderMap,
  Json(body): Json<Value>,
) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "POST /supportorgs".into(), Some(&body)) {
    return response;
  }
  if !logged_in(&headers) {
    return unauthorized();
  }

  let id = backend.next_id;
  backend.next_id += 1;

  let mut org = body.as_object().cloned().unwrap_or_else(Map::new);
  org.insert("id".into(), json!(id));
  org.insert("ownerId".into(), json!(USER_ID));
  let org = Value::Object(org);

  backend.orgs.push(org.clone());
  (StatusCode::CREATED, Json(org)).into_response()
}

async fn update_org(
  Extension(state): Shared,
  Path(id): Path<i64>,
  headers: HeaderMap,
  Json(body): Json<Value>,
) -> Response {
  let mut backend = state.lock().unwrap();
  let request = format!("PUT /supportorgs/{}", id);
  if let Some(response) = enter(&mut backend, request, Some(&body)) {
    return response;
  }
  if !logged_in(&headers) {
    return unauthorized();
  }

  match backend.orgs.iter_mut().find(|org| org["id"] == json!(id)) {
    Some(org) => {
      *org = body.clone();
      org["id"] = json!(id);
      Json(org.clone()).into_response()
    },
    None => (StatusCode::NOT_FOUND, "no such org").into_response(),
  }
}

async fn delete_org(Extension(state): Shared, Path(id): Path<i64>, headers: HeaderMap) -> Response {
  let mut backend = state.lock().unwrap();
  let request = format!("DELETE /supportorgs/{}", id);
  if let Some(response) = enter(&mut backend, request, None) {
    return response;
  }
  if !logged_in(&headers) {
    return unauthorized();
  }

  let before = backend.orgs.len();
  backend.orgs.retain(|org| org["id"] != json!(id));

  if backend.orgs.len() == before {
    return (StatusCode::NOT_FOUND, "no such org").into_response();
  }

  // Empty body on purpose.
  StatusCode::NO_CONTENT.into_response()
}

async fn register(Extension(state): Shared, Json(body): Json<Value>) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "POST /auth/register".into(), Some(&body)) {
    return response;
  }

  if body["email"] == json!(EMAIL) {
    return (
      StatusCode::CONFLICT,
      Json(json!({ "message": "already registered" })),
    )
      .into_response();
  }

  (
    StatusCode::CREATED,
    Json(json!({ "userId": 8, "email": body["email"] })),
  )
    .into_response()
}

async fn login(Extension(state): Shared, Json(body): Json<Value>) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "POST /auth/login".into(), Some(&body)) {
    return response;
  }

  if body["email"] != json!(EMAIL) || body["password"] != json!(PASSWORD) {
    return (
      StatusCode::UNAUTHORIZED,
      Json(json!({ "message": "bad credentials" })),
    )
      .into_response();
  }

  (
    [(header::SET_COOKIE, format!("{}; Path=/", SESSION_COOKIE))],
    Json(json!({ "isLoggedIn": true, "user": { "userId": USER_ID, "email": EMAIL } })),
  )
    .into_response()
}

async fn logout(Extension(state): Shared, Json(body): Json<Value>) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "POST /auth/logout".into(), Some(&body)) {
    return response;
  }

  (
    [(header::SET_COOKIE, "session=; Path=/; Max-Age=0".to_string())],
    Json(json!({ "message": "logged out" })),
  )
    .into_response()
}

async fn check(Extension(state): Shared, headers: HeaderMap) -> Response {
  let mut backend = state.lock().unwrap();
  if let Some(response) = enter(&mut backend, "GET /auth/check".into(), None) {
    return response;
  }
  if !logged_in(&headers) {
    return unauthorized();
  }

  Json(json!({ "isLoggedIn": true, "user": { "userId": USER_ID, "email": EMAIL } }))
    .into_response()
}
