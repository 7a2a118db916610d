//! In-process mock of the helpdesk backend.
//!
//! # Design
//! Binds an axum router to `127.0.0.1:0` and records the `Authorization`
//! header of every request it receives, so tests can assert on exactly
//! what the client sent.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const VALID_EMAIL: &str = "admin@example.com";
pub const VALID_PASSWORD: &str = "hunter2";
pub const ISSUED_TOKEN: &str = "issued-token-1";

#[derive(Clone, Default)]
pub struct Recorder {
    auth_headers: Arc<Mutex<Vec<Option<String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    fn record(&self, headers: &HeaderMap) {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        self.auth_headers.lock().unwrap().push(value);
    }

    fn record_body(&self, body: Value) {
        self.bodies.lock().unwrap().push(body);
    }

    /// Authorization header of every request, in arrival order
    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth_headers.lock().unwrap().clone()
    }

    pub fn last_auth_header(&self) -> Option<String> {
        self.auth_headers().last().cloned().flatten()
    }

    pub fn request_count(&self) -> usize {
        self.auth_headers.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub recorder: Recorder,
}

pub async fn start() -> MockBackend {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/api/tickets/{id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route(
            "/api/tickets/{id}/comments",
            get(list_comments).post(add_comment),
        )
        .route("/api/agents", get(list_agents))
        .route("/api/agents/{id}", put(update_agent))
        .route("/api/customers/{id}", put(update_customer))
        .route("/api/departments", post(create_named))
        .route("/api/roles", post(create_named))
        .route("/api/categories", post(create_named))
        .route("/api/status/{code}", get(fixed_status))
        .route("/api/not-json", get(not_json))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/users/{id}/active", axum::routing::patch(set_user_active))
        .route("/api/email-config", get(email_config).put(update_email_config))
        .route("/api/email-config/test", post(accept))
        .route("/api/notifications", get(list_notifications))
        .route("/api/notifications/unread-count", get(unread_count))
        .route("/api/notifications/{id}/read", post(accept))
        .route("/api/notifications/read-all", post(accept))
        .route("/api/sla/{id}", put(update_sla))
        .with_state(recorder.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}/api"),
        recorder,
    }
}

fn ticket(id: i64, subject: &str) -> Value {
    json!({
        "id": id,
        "subject": subject,
        "description": "",
        "status": "open",
        "priority": "medium",
        "customerId": 7,
        "agentId": null,
        "departmentId": null,
        "categoryId": null,
        "slaId": null,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": null,
        "dueAt": null
    })
}

fn user() -> Value {
    json!({ "id": 1, "name": "Admin", "email": VALID_EMAIL, "role": "administrator", "active": true })
}

fn has_issued_token(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ISSUED_TOKEN}"))
}

async fn list_tickets(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record(&headers);
    Json(json!([ticket(1, "Printer jammed"), ticket(2, "VPN down")]))
}

async fn get_ticket(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, String)> {
    rec.record(&headers);
    if id == 1 {
        Ok(Json(ticket(1, "Printer jammed")))
    } else {
        Err((StatusCode::NOT_FOUND, format!("ticket {id} not found")))
    }
}

async fn create_ticket(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record(&headers);
    rec.record_body(body.clone());
    let subject = body["subject"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, Json(ticket(3, &subject)))
}

async fn update_ticket(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.record(&headers);
    rec.record_body(body.clone());
    let mut updated = ticket(id, "Printer jammed");
    if let Some(status) = body.get("status") {
        updated["status"] = status.clone();
    }
    if let Some(agent) = body.get("agentId") {
        updated["agentId"] = agent.clone();
    }
    Json(updated)
}

async fn delete_ticket(State(rec): State<Recorder>, headers: HeaderMap) -> StatusCode {
    rec.record(&headers);
    StatusCode::NO_CONTENT
}

async fn list_comments(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record(&headers);
    Json(json!([{
        "id": 10, "ticketId": 1, "authorName": "Dana", "body": "Looking into it",
        "internal": false, "createdAt": "2024-03-01T09:30:00Z"
    }]))
}

async fn add_comment(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record(&headers);
    rec.record_body(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 11, "ticketId": id, "authorName": "Admin", "body": body["body"],
            "internal": body["internal"], "createdAt": "2024-03-01T10:00:00Z"
        })),
    )
}

async fn list_agents(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record(&headers);
    Json(json!([{ "id": 3, "name": "Dana Ruiz", "email": "dana@example.com" }]))
}

async fn fixed_status(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(code): Path<u16>,
) -> (StatusCode, String) {
    rec.record(&headers);
    let status = StatusCode::from_u16(code).unwrap();
    (status, format!("status {code}"))
}

async fn not_json(State(rec): State<Recorder>, headers: HeaderMap) -> &'static str {
    rec.record(&headers);
    "<html>maintenance</html>"
}

async fn login(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    rec.record(&headers);
    if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
        Ok(Json(json!({ "token": ISSUED_TOKEN, "user": user() })))
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid credentials"))
    }
}

async fn me(
    State(rec): State<Recorder>,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, &'static str)> {
    rec.record(&headers);
    if has_issued_token(&headers) {
        Ok(Json(user()))
    } else {
        Err((StatusCode::UNAUTHORIZED, "token expired"))
    }
}

async fn set_user_active(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.record(&headers);
    rec.record_body(body.clone());
    Json(json!({ "id": id, "name": "Robin", "email": "robin@example.com", "active": body["active"] }))
}

async fn email_config(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record(&headers);
    Json(json!({
        "smtpHost": "smtp.example.com", "smtpPort": 587, "username": "helpdesk",
        "fromAddress": "support@example.com", "fromName": "Support", "useTls": true
    }))
}

async fn update_email_config(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.record(&headers);
    rec.record_body(body.clone());
    Json(json!({
        "smtpHost": body.get("smtpHost").cloned().unwrap_or(json!("smtp.example.com")),
        "smtpPort": 587, "username": "helpdesk",
        "fromAddress": "support@example.com", "fromName": "Support", "useTls": true
    }))
}

async fn accept(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    rec.record(&headers);
    rec.record_body(body);
    StatusCode::NO_CONTENT
}

async fn list_notifications(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record(&headers);
    Json(json!([
        { "id": 1, "message": "Ticket #2 assigned to you", "link": "/tickets/2", "read": false, "createdAt": "2024-03-01T09:00:00Z" },
        { "id": 2, "message": "Welcome", "link": null, "read": true, "createdAt": "2024-02-01T09:00:00Z" }
    ]))
}

async fn unread_count(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record(&headers);
    Json(json!({ "count": 1 }))
}

async fn update_sla(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.record(&headers);
    rec.record_body(body.clone());
    Json(json!({
        "id": id, "name": "Urgent", "priority": "urgent",
        "firstResponseMinutes": body["firstResponseMinutes"], "resolutionMinutes": 240
    }))
}

/// `base` with every field of `body` written over it
fn with_fields(mut base: Value, body: &Value) -> Value {
    if let (Some(target), Some(fields)) = (base.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    base
}

async fn create_named(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record(&headers);
    rec.record_body(body.clone());
    (StatusCode::CREATED, Json(with_fields(json!({ "id": 5 }), &body)))
}

async fn update_agent(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.record(&headers);
    rec.record_body(body.clone());
    let agent = json!({ "id": id, "name": "Dana Ruiz", "email": "dana@example.com", "active": true });
    Json(with_fields(agent, &body))
}

async fn update_customer(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.record(&headers);
    rec.record_body(body.clone());
    let customer = json!({ "id": id, "name": "Lee Park", "email": "lee@example.com", "company": null });
    Json(with_fields(customer, &body))
}
