//! In-process hospital backend for HTTP-level tests.
//!
//! Serves the REST surface on `127.0.0.1:0` with axum and records every
//! request line so tests can assert on exact paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use crate::api::RestClient;
use crate::config::PortalConfig;
use crate::context::PortalContext;
use crate::session::Session;
use crate::ui::RecordingUi;

/// Nothing listens on port 1.
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";
pub const ADMIN_TOKEN: &str = "adm-7f3c";
pub const DOCTOR_TOKEN: &str = "doc-91ab";
pub const PATIENT_TOKEN: &str = "pat-55e0";

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const DOCTOR_EMAIL: &str = "grey@clinic.test";
pub const PATIENT_EMAIL: &str = "ana@mail.test";
/// Shared by the seeded doctor and patient accounts.
pub const ACCOUNT_PASSWORD: &str = "secret1";

/// Day with seeded appointments for doctor 1.
pub fn appointment_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
}

#[derive(Debug, Clone)]
struct SeedDoctor {
    id: u64,
    name: String,
    email: String,
    phone: String,
    specialty: String,
    times: Vec<String>,
}

impl SeedDoctor {
    fn new(id: u64, name: &str, email: &str, specialty: &str, times: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: format!("555000000{id}"),
            specialty: specialty.into(),
            times: times.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "specialty": self.specialty,
            "availableTimes": self.times,
        })
    }
}

#[derive(Debug)]
struct BackendState {
    doctors: Mutex<Vec<SeedDoctor>>,
    next_id: Mutex<u64>,
    requests: Mutex<Vec<(String, String)>>,
    delays: Mutex<HashMap<String, Duration>>,
    fail_directory: AtomicBool,
}

impl BackendState {
    fn seeded() -> Self {
        Self {
            doctors: Mutex::new(vec![
                SeedDoctor::new(
                    1,
                    "Dr. Meredith Grey",
                    DOCTOR_EMAIL,
                    "cardiology",
                    &["09:00-10:00", "10:00-11:00"],
                ),
                SeedDoctor::new(
                    2,
                    "Dr. Derek Shepherd",
                    "shepherd@clinic.test",
                    "neurology",
                    &["11:00-12:00"],
                ),
                SeedDoctor::new(
                    3,
                    "Dr. Miranda Bailey",
                    "bailey@clinic.test",
                    "surgery",
                    &["09:00-10:00", "14:00-15:00"],
                ),
            ]),
            next_id: Mutex::new(4),
            requests: Mutex::new(Vec::new()),
            delays: Mutex::new(HashMap::new()),
            fail_directory: AtomicBool::new(false),
        }
    }

    async fn delay_for(&self, term: &str) {
        let delay = self.delays.lock().unwrap().get(term).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn matches_term(term: &str, value: &str) -> bool {
    term == "all" || value.to_lowercase().contains(&term.to_lowercase())
}

// ═══════════════════════════════════════════════════════════
// Handlers
// ═══════════════════════════════════════════════════════════

async fn record(State(state): State<Arc<BackendState>>, req: Request, next: Next) -> Response {
    state
        .requests
        .lock()
        .unwrap()
        .push((req.method().to_string(), req.uri().path().to_string()));
    next.run(req).await
}

async fn list_doctors(State(state): State<Arc<BackendState>>) -> Response {
    if state.fail_directory.load(Ordering::SeqCst) {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "database offline");
    }
    let doctors: Vec<Value> = state.doctors.lock().unwrap().iter().map(SeedDoctor::to_json).collect();
    Json(json!({ "doctors": doctors })).into_response()
}

async fn filter_doctors(
    State(state): State<Arc<BackendState>>,
    Path((name, time, specialty)): Path<(String, String, String)>,
) -> Response {
    state.delay_for(&name).await;
    if name == "boom" {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "filter exploded");
    }
    let doctors: Vec<Value> = state
        .doctors
        .lock()
        .unwrap()
        .iter()
        .filter(|d| matches_term(&name, &d.name))
        .filter(|d| time == "all" || d.times.iter().any(|t| t == &time))
        .filter(|d| specialty == "all" || d.specialty.eq_ignore_ascii_case(&specialty))
        .map(SeedDoctor::to_json)
        .collect();
    Json(json!({ "doctors": doctors })).into_response()
}

async fn save_doctor(
    State(state): State<Arc<BackendState>>,
    Path(token): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if token != ADMIN_TOKEN {
        return message(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    let field = |key: &str| body[key].as_str().unwrap_or_default().to_string();
    let email = field("email");
    let mut doctors = state.doctors.lock().unwrap();
    if doctors.iter().any(|d| d.email == email) {
        return message(StatusCode::BAD_REQUEST, "email exists");
    }
    let mut next_id = state.next_id.lock().unwrap();
    doctors.push(SeedDoctor {
        id: *next_id,
        name: field("name"),
        email,
        phone: field("phone"),
        specialty: field("specialty"),
        times: body["availableTimes"]
            .as_array()
            .map(|a| a.iter().filter_map(|t| t.as_str().map(String::from)).collect())
            .unwrap_or_default(),
    });
    *next_id += 1;
    message(StatusCode::CREATED, "Doctor added to db")
}

async fn delete_doctor(
    State(state): State<Arc<BackendState>>,
    Path((id, token)): Path<(String, String)>,
) -> Response {
    if token != ADMIN_TOKEN {
        return message(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    let mut doctors = state.doctors.lock().unwrap();
    let before = doctors.len();
    doctors.retain(|d| d.id.to_string() != id);
    if doctors.len() == before {
        return message(StatusCode::NOT_FOUND, "Doctor not found with id");
    }
    message(StatusCode::OK, "Doctor deleted successfully")
}

async fn admin_login(Json(body): Json<Value>) -> Response {
    if body["username"] == ADMIN_USERNAME && body["password"] == ADMIN_PASSWORD {
        Json(json!({ "token": ADMIN_TOKEN })).into_response()
    } else {
        message(StatusCode::UNAUTHORIZED, "Invalid credentials!")
    }
}

async fn doctor_login(Json(body): Json<Value>) -> Response {
    if body["email"] == DOCTOR_EMAIL && body["password"] == ACCOUNT_PASSWORD {
        Json(json!({ "token": DOCTOR_TOKEN, "doctorId": 1 })).into_response()
    } else {
        message(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn patient_login(Json(body): Json<Value>) -> Response {
    if body["email"] == PATIENT_EMAIL && body["password"] == ACCOUNT_PASSWORD {
        Json(json!({ "token": PATIENT_TOKEN, "patientId": 11 })).into_response()
    } else {
        message(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn patient_details(Path((id, token)): Path<(String, String)>) -> Response {
    if token != PATIENT_TOKEN {
        return message(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    if id != "11" {
        return message(StatusCode::NOT_FOUND, "Patient not found");
    }
    Json(json!({
        "patient": {
            "id": 11,
            "name": "Ana Lima",
            "email": PATIENT_EMAIL,
            "phone": "5559998888",
            "address": "12 Rua Augusta",
        }
    }))
    .into_response()
}

async fn appointments(
    State(state): State<Arc<BackendState>>,
    Path((doctor_id, date, name, token)): Path<(String, String, String, String)>,
) -> Response {
    state.delay_for(&name).await;
    if token != DOCTOR_TOKEN {
        return message(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    let day = appointment_day().format("%Y-%m-%d").to_string();
    let booked = [
        json!({
            "patientId": 11,
            "patientName": "Ana Lima",
            "patientPhone": "5559998888",
            "patientEmail": PATIENT_EMAIL,
            "prescriptionLink": "/prescriptions/11",
        }),
        json!({
            "patientId": 12,
            "patientName": "Bruno Costa",
            "patientPhone": "5557776666",
            "patientEmail": "bruno@mail.test",
        }),
    ];
    let appointments: Vec<Value> = if doctor_id == "1" && date == day {
        booked
            .into_iter()
            .filter(|a| name == "null" || matches_term(&name, a["patientName"].as_str().unwrap_or_default()))
            .collect()
    } else {
        Vec::new()
    };
    Json(json!({ "appointments": appointments })).into_response()
}

// ═══════════════════════════════════════════════════════════
// FakeBackend
// ═══════════════════════════════════════════════════════════

pub struct FakeBackend {
    pub base_url: String,
    state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::seeded());
        let app = Router::new()
            .route("/doctor", get(list_doctors))
            .route("/doctor/filter/:name/:time/:specialty", get(filter_doctors))
            .route("/doctor/save/:token", post(save_doctor))
            .route("/doctor/login", post(doctor_login))
            .route("/doctor/:id/:token", delete(delete_doctor))
            .route("/admin", post(admin_login))
            .route("/patient/login", post(patient_login))
            .route("/patient/:id/:token", get(patient_details))
            .route(
                "/appointments/:doctor_id/:date/:name/:token",
                get(appointments),
            )
            .layer(axum::middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    pub fn admin_token(&self) -> String {
        ADMIN_TOKEN.to_string()
    }

    /// `(method, raw path)` of every request received, in arrival order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, path)| path)
            .collect()
    }

    pub fn doctor_count(&self) -> usize {
        self.state.doctors.lock().unwrap().len()
    }

    /// Make `GET /doctor` answer 500.
    pub fn fail_directory(&self) {
        self.state.fail_directory.store(true, Ordering::SeqCst);
    }

    /// Hold responses whose name term equals `term` for `delay`.
    pub fn delay_term(&self, term: &str, delay: Duration) {
        self.state.delays.lock().unwrap().insert(term.to_string(), delay);
    }

    /// Context wired to this backend with a recording UI and in-memory session.
    pub fn context(&self) -> PortalContext<RestClient, RecordingUi> {
        self.context_with(PortalConfig::default())
    }

    pub fn context_with(&self, config: PortalConfig) -> PortalContext<RestClient, RecordingUi> {
        let config = PortalConfig {
            api_base_url: self.base_url.clone(),
            ..config
        };
        let api = RestClient::from_config(&config).unwrap();
        PortalContext::new(api, RecordingUi::new(), Session::in_memory(), config)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Context pointing at a port nobody listens on.
pub fn unreachable_context() -> PortalContext<RestClient, RecordingUi> {
    let config = PortalConfig {
        api_base_url: UNREACHABLE_BASE_URL.to_string(),
        ..PortalConfig::default()
    };
    let api = RestClient::from_config(&config).unwrap();
    PortalContext::new(api, RecordingUi::new(), Session::in_memory(), config)
}
