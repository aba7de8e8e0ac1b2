//! Shared test infrastructure: a scripted stand-in for the content API and
//! helpers for driving the console through `actix_web::test`.
//!
//! - `FakeApi::start()` - real HTTP server on 127.0.0.1:0 that answers from
//!   a route script and records every request it sees
//! - `console(fake.client(), fake.api_url())` - the console app wired to the fake
//! - `Browser` - carries the session cookie between calls

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Server, ServerHandle, Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, middleware, test, web};
use regex::Regex;
use serde_json::Value;

use portal_admin::api::ApiClient;
use portal_admin::auth::middleware::route_guard;
use portal_admin::config::AppConfig;
use portal_admin::{AppState, routes};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_EMAIL: &str = "admin@haridwarlive.in";
pub const ADMIN_PASS: &str = "admin123";
pub const ADMIN_TOKEN: &str = "tok-admin";
pub const HOTEL_TOKEN: &str = "tok-hotel";
pub const HOTEL_ID: &str = "h1";
pub const BOUNDARY: &str = "----portal-test-boundary";

// ============================================================================
// FAKE CONTENT API
// ============================================================================

/// One request as the fake API received it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string, e.g. `/api/news?page=1&limit=10`.
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Clone, Default)]
struct Script {
    routes: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    log: Arc<Mutex<Vec<Recorded>>>,
}

async fn answer(req: HttpRequest, body: web::Bytes, script: web::Data<Script>) -> HttpResponse {
    let method = req.method().to_string();
    let full = req.uri().path_and_query().map(|p| p.to_string()).unwrap_or_default();
    let get = |name: header::HeaderName| req.headers().get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    script.log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: full.clone(),
        authorization: get(header::AUTHORIZATION),
        content_type: get(header::CONTENT_TYPE),
        body: body.to_vec(),
    });

    let routes = script.routes.lock().unwrap();
    let hit = routes
        .get(&(method.clone(), full))
        .or_else(|| routes.get(&(method, req.path().to_string())));
    match hit {
        Some((status, body)) => HttpResponse::build(actix_web::http::StatusCode::from_u16(*status).unwrap())
            .content_type("application/json")
            .body(body.clone()),
        None => HttpResponse::NotFound().body("no scripted route"),
    }
}

pub struct FakeApi {
    /// `http://127.0.0.1:{port}`; the API root is `{base}/api`.
    pub base: String,
    script: Script,
    handle: ServerHandle,
}

impl FakeApi {
    pub async fn start() -> Self {
        let script = Script::default();
        let data = web::Data::new(script.clone());
        let server = HttpServer::new(move || App::new().app_data(data.clone()).default_service(web::to(answer)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind fake API");
        let addr = server.addrs()[0];
        let server: Server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);
        FakeApi { base: format!("http://{addr}"), script, handle }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), &self.api_url())
    }

    /// Script a response. `path` is relative to the API root unless it
    /// starts with `/storage`, which stands in for the object store.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) {
        let full = if path.starts_with("/storage") { path.to_string() } else { format!("/api{path}") };
        self.script
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), full), (status, body.to_string()));
    }

    /// Presign answers with an upload URL on this same server.
    pub fn on_presign(&self, key: &str) {
        let upload_url = format!("{}/storage/{key}", self.base);
        self.on("POST", "/upload/generate-presigned-url", 200, serde_json::json!({"uploadURL": upload_url, "key": key}));
        self.on("PUT", &format!("/storage/{key}"), 200, Value::Null);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.log.lock().unwrap().clone()
    }

    /// Requests matching `method` whose path starts with `prefix` (API paths
    /// without the `/api` root, storage paths as-is).
    pub fn calls(&self, method: &str, prefix: &str) -> Vec<Recorded> {
        let full = if prefix.starts_with("/storage") { prefix.to_string() } else { format!("/api{prefix}") };
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path.starts_with(&full))
            .collect()
    }

    pub fn clear_log(&self) {
        self.script.log.lock().unwrap().clear();
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn hotel_json(id: &str, title: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "email": "desk@ganga.in",
        "password": "secret",
        "title": title,
        "description": "Rooms facing the ghats",
        "address": "Har Ki Pauri, Haridwar",
        "locationUrl": "https://maps.example.com/ganga",
        "amenities": ["Wifi", "Parking"],
        "contact": {"phone": "+91 99999 00000", "email": "stay@ganga.in"},
        "roomsAvailable": 12,
        "likes": 4,
        "image": "https://cdn.example.com/uploads/old.jpg",
        "key": "uploads/old.jpg",
        "createdAt": "2024-03-01T10:00:00.000Z"
    })
}

pub fn booking_json(id: &str, name: &str, status: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "name": name,
        "email": "guest@example.com",
        "phone": "9876543210",
        "date": "2024-04-10",
        "totalDays": "3",
        "message": "Ground floor please",
        "status": status,
        "hotelId": {"_id": HOTEL_ID, "title": "Ganga View"},
        "createdAt": "2024-03-05T08:30:00.000Z"
    })
}

// ============================================================================
// CONSOLE APP
// ============================================================================

/// The console app talking to `api_url`. Takes owned inputs so the returned
/// app borrows nothing from the test.
pub fn console(
    api: ApiClient,
    api_url: String,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = web::Data::new(AppState { api, config: AppConfig::for_api(&api_url) });
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(state)
        .wrap(middleware::from_fn(route_guard))
        .wrap(session)
        .configure(routes)
}

/// Multipart body for a dialog post: text fields plus an optional
/// `(file_name, content_type, bytes)` image.
pub fn multipart(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn csrf_from(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]+)""#).unwrap();
    re.captures(html).expect("page has no CSRF token")[1].to_string()
}

/// Undo the HTML escaping of `&` in rendered attributes, in either the
/// named or the numeric form.
pub fn decode_amp(html: &str) -> String {
    html.replace("&#38;", "&").replace("&amp;", "&")
}

/// Holds the session cookie across requests, like a browser would.
#[derive(Default)]
pub struct Browser {
    cookie: Option<Cookie<'static>>,
}

impl Browser {
    pub fn get(&self, uri: &str) -> test::TestRequest {
        self.with_cookie(test::TestRequest::get().uri(uri))
    }

    pub fn post_form(&self, uri: &str, form: &[(&str, &str)]) -> test::TestRequest {
        self.with_cookie(test::TestRequest::post().uri(uri).set_form(form))
    }

    pub fn post_multipart(&self, uri: &str, body: Vec<u8>) -> test::TestRequest {
        self.with_cookie(
            test::TestRequest::post()
                .uri(uri)
                .insert_header((header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}")))
                .set_payload(body),
        )
    }

    fn with_cookie(&self, req: test::TestRequest) -> test::TestRequest {
        match &self.cookie {
            Some(c) => req.cookie(c.clone()),
            None => req,
        }
    }

    /// Pick up any session cookie change from a response.
    pub fn absorb<B>(&mut self, resp: &ServiceResponse<B>) {
        if let Some(c) = resp.response().cookies().find(|c| c.name() == "id") {
            self.cookie = if c.value().is_empty() { None } else { Some(c.into_owned()) };
        }
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    /// Send `req`, absorb the cookie, return status, Location and body.
    pub async fn send<S, B>(&mut self, app: &S, req: test::TestRequest) -> (u16, String, String)
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let resp = test::call_service(app, req.to_request()).await;
        self.absorb(&resp);
        let status = resp.status().as_u16();
        let loc = location(&resp);
        let body = test::read_body(resp).await;
        (status, loc, String::from_utf8_lossy(&body).into_owned())
    }

    /// Load the admin login page, post the credentials, and return the
    /// redirect target.
    pub async fn sign_in_admin<S, B>(&mut self, app: &S) -> String
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let (_, _, html) = self.send(app, self.get("/login")).await;
        let csrf = csrf_from(&html);
        let form = [("email", ADMIN_EMAIL), ("password", ADMIN_PASS), ("csrf_token", csrf.as_str())];
        let (status, loc, _) = self.send(app, self.post_form("/login", &form)).await;
        assert_eq!(status, 303);
        loc
    }

    /// CSRF token of the current session, read off a page that renders it.
    pub async fn csrf<S, B>(&mut self, app: &S, page: &str) -> String
    where
        S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
        B: MessageBody,
    {
        let (_, _, html) = self.send(app, self.get(page)).await;
        csrf_from(&html)
    }
}

pub fn script_admin_login(fake: &FakeApi) {
    fake.on("POST", "/auth/login", 200, serde_json::json!({"token": ADMIN_TOKEN}));
}

pub fn script_hotel_login(fake: &FakeApi) {
    fake.on(
        "POST",
        "/hotels/auth",
        200,
        serde_json::json!({"hotel": [{"_id": HOTEL_ID, "title": "Ganga View"}], "token": HOTEL_TOKEN}),
    );
}
