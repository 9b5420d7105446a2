//! In-process fake of the exam backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const TOKEN: &str = "test-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const PASSWORD: &str = "secret";

#[derive(Clone, Default)]
pub struct Backend {
    pub submissions: Arc<Mutex<Vec<Value>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
    pub generate_requests: Arc<Mutex<Vec<Value>>>,
    /// `"<METHOD> <path> <query-or-body>"` for every accepted profile and admin write.
    pub writes: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.writes.lock().unwrap().push(entry);
    }
}

/// Serve the fake on an ephemeral port and return its base url.
pub async fn spawn(backend: Backend) -> String {
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/papers", get(list_papers))
        .route("/api/papers/generate", post(generate))
        .route("/api/papers/{id}", get(fetch_paper).delete(delete_paper))
        .route("/api/papers/{id}/download", get(download))
        .route("/api/papers/{id}/download-answers", get(download))
        .route("/api/quiz/submit", post(submit))
        .route("/api/quiz/attempts", get(attempts))
        .route("/api/quiz/stats", get(stats))
        .route("/api/auth/profile", put(update_name))
        .route("/api/profile/mobile", put(update_mobile))
        .route("/api/subscriptions/plans", get(public_plans))
        .route("/api/transactions", get(user_transactions))
        .route("/api/transactions/{id}/receipt", get(receipt))
        .route("/api/admin/stats", get(admin_stats))
        .route("/api/admin/users", get(admin_users))
        .route("/api/admin/users/{id}/role", put(admin_user_role))
        .route("/api/admin/users/{id}/status", put(admin_user_status))
        .route("/api/admin/users/{id}/details", put(admin_user_details))
        .route("/api/admin/plans", get(admin_plans).post(admin_create_plan))
        .route(
            "/api/admin/plans/{id}",
            put(admin_update_plan).delete(admin_delete_plan),
        )
        .route("/api/admin/plans/{id}/status", put(admin_plan_status))
        .route(
            "/api/admin/transactions",
            get(admin_transactions).post(admin_record_transaction),
        )
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn paper_json() -> Value {
    json!({
        "id": "p1",
        "paper_title": "Biology Mock",
        "exam_type": "NEET",
        "subject": "Biology",
        "topics": ["Cell Biology"],
        "total_marks": 5,
        "duration_minutes": 10,
        "language": "English",
        "questions": [
            {"id": "q1", "type": "mcq", "question": "Powerhouse of the cell?", "marks": 4,
             "options": ["A", "B", "C", "D"]},
            {"id": "q2", "type": "true_false", "question": "DNA is single stranded.", "marks": 1}
        ],
        "answer_key": [
            {"question_id": "q1", "correct_answer": "B", "explanation": "Mitochondria."},
            {"question_id": "q2", "correct_answer": "False"}
        ],
        "created_at": "2023-11-14T22:13:20Z"
    })
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str())
}

fn user_json() -> Value {
    json!({"id": "u1", "email": "asha@example.com", "name": "Asha", "role": "user"})
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == PASSWORD {
        Json(json!({"message": "Login successful", "token": TOKEN, "user": user_json()}))
            .into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn me(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    let mut user = user_json();
    user["total_papers_generated"] = json!(1);
    user["papers_limit"] = json!(5);
    Json(user).into_response()
}

async fn list_papers(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    let mut summary = paper_json();
    if let Some(object) = summary.as_object_mut() {
        object.remove("questions");
        object.remove("answer_key");
    }
    Json(json!({ "papers": [summary] })).into_response()
}

async fn fetch_paper(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    match id.as_str() {
        "p1" => Json(paper_json()).into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(paper_json()).into_response()
        }
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => detail(StatusCode::NOT_FOUND, "Paper not found"),
    }
}

async fn delete_paper(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    if id != "p1" {
        return detail(StatusCode::NOT_FOUND, "Paper not found");
    }
    backend.deleted.lock().unwrap().push(id);
    Json(json!({"message": "Paper deleted successfully"})).into_response()
}

async fn download(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    if id != "p1" {
        return detail(StatusCode::NOT_FOUND, "Paper not found");
    }
    ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 fake".to_vec()).into_response()
}

async fn generate(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    backend.generate_requests.lock().unwrap().push(body);
    detail(
        StatusCode::FORBIDDEN,
        "Free paper limit reached. Please subscribe to generate more papers.",
    )
}

async fn submit(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    backend.submissions.lock().unwrap().push(body.clone());

    if body["paper_id"] != "p1" {
        return detail(StatusCode::NOT_FOUND, "Paper not found");
    }
    let answers = body["answers"].as_object().cloned().unwrap_or_default();
    if answers.is_empty() {
        return detail(StatusCode::BAD_REQUEST, "No answers submitted");
    }

    let key = paper_json()["answer_key"].as_array().cloned().unwrap_or_default();
    let score = key
        .iter()
        .filter(|entry| {
            let id = entry["question_id"].as_str().unwrap_or_default();
            let expected = entry["correct_answer"].as_str().unwrap_or_default();
            answers
                .get(id)
                .and_then(Value::as_str)
                .is_some_and(|given| given.trim().eq_ignore_ascii_case(expected))
        })
        .count();
    let total = key.len();
    Json(json!({
        "message": "Quiz submitted successfully",
        "result": {
            "score": score,
            "total_questions": total,
            "percentage": score as f64 * 100.0 / total as f64,
            "correct_answers": score,
            "answer_key": key,
        }
    }))
    .into_response()
}

fn attempt_json(id: &str, score: u32, completed_at: &str) -> Value {
    json!({
        "id": id,
        "paper_id": "p1",
        "score": score,
        "total_questions": 2,
        "correct_answers": score,
        "percentage": f64::from(score) * 50.0,
        "completed_at": completed_at,
    })
}

async fn attempts(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    Json(json!({
        "attempts": [
            attempt_json("a1", 1, "2023-11-14T22:13:20Z"),
            attempt_json("a2", 2, "2023-11-15T08:00:00Z"),
        ]
    }))
    .into_response()
}

async fn stats(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    Json(json!({
        "total_attempts": 2,
        "average_score": 1.5,
        "highest_score": 2.0,
        "recent_attempts": [attempt_json("a2", 2, "2023-11-15T08:00:00Z")],
    }))
    .into_response()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Admin routes: user tokens get 403, anything else 401.
fn admin_gate(headers: &HeaderMap) -> Option<Response> {
    match bearer(headers) {
        Some(ADMIN_TOKEN) => None,
        Some(TOKEN) => Some(detail(StatusCode::FORBIDDEN, "Admin access required")),
        _ => Some(detail(StatusCode::UNAUTHORIZED, "Invalid token")),
    }
}

fn message(text: &str) -> Response {
    Json(json!({ "message": text })).into_response()
}

fn query_text(query: &HashMap<String, String>) -> String {
    let mut pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    pairs.join("&")
}

async fn update_name(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    if !query.contains_key("name") {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "field required");
    }
    backend.record(format!("PUT /auth/profile {}", query_text(&query)));
    message("Profile updated successfully")
}

async fn update_mobile(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    backend.record(format!("PUT /profile/mobile {}", query_text(&query)));
    message("Mobile number updated successfully")
}

pub fn plan_json(id: &str, name: &str, papers_limit: i64, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": 599.0,
        "currency": "INR",
        "papers_limit": papers_limit,
        "duration_days": 30,
        "features": ["All exam types", "Download PDF"],
        "is_active": active,
        "created_at": "2023-11-14T22:13:20Z"
    })
}

fn all_plans() -> Vec<Value> {
    vec![
        plan_json("pro", "Pro", 150, true),
        plan_json("unlimited", "Unlimited", -1, true),
        plan_json("legacy", "Legacy", 10, false),
    ]
}

async fn public_plans() -> Response {
    Json(json!({ "plans": all_plans() })).into_response()
}

pub fn transaction_json(id: &str, user_id: &str) -> Value {
    json!({
        "id": id,
        "transaction_number": format!("TXN20231114{}", id.to_uppercase()),
        "user_id": user_id,
        "user_name": "Asha",
        "user_email": "asha@example.com",
        "user_mobile": "9876543210",
        "plan_id": "pro",
        "plan_name": "Pro",
        "amount": 599.0,
        "currency": "INR",
        "payment_method": "Manual",
        "status": "completed",
        "validity_start": "2023-11-14T22:13:20Z",
        "validity_end": "2023-12-14T22:13:20Z",
        "created_at": "2023-11-14T22:13:20Z"
    })
}

async fn user_transactions(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    Json(json!({ "transactions": [transaction_json("t1", "u1")] })).into_response()
}

async fn receipt(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    match id.as_str() {
        "t1" => ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 receipt".to_vec())
            .into_response(),
        "t2" => detail(StatusCode::FORBIDDEN, "Access denied"),
        _ => detail(StatusCode::NOT_FOUND, "Transaction not found"),
    }
}

async fn admin_stats(headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    Json(json!({
        "total_users": 2,
        "total_papers": 7,
        "total_attempts": 12,
        "active_subscriptions": 1
    }))
    .into_response()
}

async fn admin_users(headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    let mut user = user_json();
    user["mobile"] = json!("9876543210");
    user["is_active"] = json!(true);
    let admin = json!({
        "id": "admin1", "email": "admin@example.com", "name": "Admin", "role": "admin",
        "subscription_plan": "Unlimited", "papers_limit": -1
    });
    Json(json!({ "users": [user, admin] })).into_response()
}

async fn admin_user_role(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    if !matches!(query.get("role").map(String::as_str), Some("user" | "admin")) {
        return detail(StatusCode::BAD_REQUEST, "Invalid role");
    }
    backend.record(format!("PUT /admin/users/{id}/role {}", query_text(&query)));
    message("User role updated successfully")
}

async fn admin_user_status(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    if id == "admin1" {
        return detail(StatusCode::BAD_REQUEST, "Cannot deactivate your own account");
    }
    backend.record(format!("PUT /admin/users/{id}/status {}", query_text(&query)));
    message("User updated successfully")
}

async fn admin_user_details(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    if id != "u1" {
        return detail(StatusCode::NOT_FOUND, "User not found");
    }
    backend.record(format!("PUT /admin/users/{id}/details {body}"));
    message("User details updated successfully")
}

async fn admin_plans(headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    Json(json!({ "plans": all_plans() })).into_response()
}

async fn admin_create_plan(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    backend.record(format!("POST /admin/plans {body}"));
    let mut plan = body;
    plan["id"] = json!("new-plan");
    plan["is_active"] = json!(true);
    Json(json!({ "message": "Plan created successfully", "plan": plan })).into_response()
}

async fn admin_update_plan(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    if id != "pro" {
        return detail(StatusCode::NOT_FOUND, "Plan not found");
    }
    backend.record(format!("PUT /admin/plans/{id} {body}"));
    message("Plan updated successfully")
}

async fn admin_delete_plan(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    backend.record(format!("DELETE /admin/plans/{id}"));
    message("Plan deactivated successfully")
}

async fn admin_plan_status(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    backend.record(format!("PUT /admin/plans/{id}/status {}", query_text(&query)));
    message("Plan updated successfully")
}

async fn admin_transactions(headers: HeaderMap) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    Json(json!({
        "transactions": [transaction_json("t2", "u2"), transaction_json("t1", "u1")]
    }))
    .into_response()
}

async fn admin_record_transaction(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = admin_gate(&headers) {
        return denied;
    }
    backend.record(format!("POST /admin/transactions {body}"));
    let user_id = body["user_id"].as_str().unwrap_or_default().to_string();
    let mut transaction = transaction_json("t9", &user_id);
    transaction["amount"] = body["amount"].clone();
    Json(json!({ "message": "Transaction created successfully", "transaction": transaction }))
        .into_response()
}
