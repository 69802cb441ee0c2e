#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::{json, Value};

use utm_desk::auth::Claims;
use utm_desk::config::{ApiConfig, AppConfig, Environment, GoogleConfig, SheetsConfig};
use utm_desk::sheets::SheetsRepository;

pub const PRIVATE_KEY: &str = include_str!("../fixtures/service_account_key.pem");
pub const PUBLIC_KEY: &str = include_str!("../fixtures/service_account_pub.pem");
pub const SERVICE_ACCOUNT: &str = "utm-desk@marketing-ops.iam.gserviceaccount.com";
pub const SPREADSHEET_ID: &str = "test-spreadsheet";

/// In-memory stand-in for the OAuth2 token endpoint and the Sheets values API
#[derive(Default)]
pub struct FakeState {
    pub sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
    pub token_requests: AtomicUsize,
    pub last_claims: Mutex<Option<Claims>>,
    /// Replaces the token endpoint's reply when set
    pub token_reply: Mutex<Option<(StatusCode, Value)>>,
    /// Replaces every values API reply when set
    pub sheets_reply: Mutex<Option<(StatusCode, Value)>>,
    audience: Mutex<String>,
}

pub struct FakeGoogle {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

impl FakeGoogle {
    pub async fn spawn() -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind fake google")?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let state = Arc::new(FakeState::default());
        *state.audience.lock().unwrap() = format!("{}/token", base_url);

        let app = Router::new()
            .route("/token", post(token))
            .route("/v4/spreadsheets/:id/values/:range", get(get_values).post(append_values))
            .with_state(state.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { base_url, state })
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            environment: Environment::Development,
            google: GoogleConfig::new(SERVICE_ACCOUNT, PRIVATE_KEY)
                .with_token_uri(format!("{}/token", self.base_url)),
            sheets: SheetsConfig::new(SPREADSHEET_ID).with_api_base(self.base_url.clone()),
            api: ApiConfig { port: 0 },
        }
    }

    pub fn repository(&self) -> SheetsRepository {
        SheetsRepository::from_config(&self.config()).expect("http client")
    }

    pub fn seed(&self, sheet: &str, rows: &[&[&str]]) {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        self.state.sheets.lock().unwrap().insert(sheet.to_string(), rows);
    }

    pub fn rows(&self, sheet: &str) -> Vec<Vec<String>> {
        self.state
            .sheets
            .lock()
            .unwrap()
            .get(sheet)
            .cloned()
            .unwrap_or_default()
    }

    pub fn token_requests(&self) -> usize {
        self.state.token_requests.load(Ordering::SeqCst)
    }

    pub fn reply_to_token_with(&self, status: StatusCode, body: Value) {
        *self.state.token_reply.lock().unwrap() = Some((status, body));
    }

    pub fn reply_to_sheets_with(&self, status: StatusCode, body: Value) {
        *self.state.sheets_reply.lock().unwrap() = Some((status, body));
    }

    pub fn restore_sheets(&self) {
        *self.state.sheets_reply.lock().unwrap() = None;
    }
}

#[derive(Deserialize)]
struct TokenForm {
    grant_type: String,
    assertion: String,
}

async fn token(State(state): State<Arc<FakeState>>, Form(form): Form<TokenForm>) -> Response {
    let n = state.token_requests.fetch_add(1, Ordering::SeqCst) + 1;

    if let Some((status, body)) = state.token_reply.lock().unwrap().clone() {
        return (status, Json(body)).into_response();
    }

    if form.grant_type != "urn:ietf:params:oauth:grant-type:jwt-bearer" {
        return google_token_error("unsupported_grant_type", "Invalid grant_type");
    }

    let key = DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).expect("fixture public key");
    let mut validation = Validation::new(Algorithm::RS256);
    let audience = state.audience.lock().unwrap().clone();
    validation.set_audience(&[audience]);
    validation.set_required_spec_claims(&["exp", "iat", "aud", "iss", "sub"]);

    match decode::<Claims>(&form.assertion, &key, &validation) {
        Ok(data) => {
            *state.last_claims.lock().unwrap() = Some(data.claims);
            Json(json!({
                "access_token": format!("fake-token-{}", n),
                "expires_in": 3599,
                "token_type": "Bearer"
            }))
            .into_response()
        }
        Err(_) => google_token_error("invalid_grant", "Invalid JWT Signature."),
    }
}

fn google_token_error(error: &str, description: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": error, "error_description": description })),
    )
        .into_response()
}

fn google_api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "error": { "code": status.as_u16(), "message": message, "status": "FAILED_PRECONDITION" }
        })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Bearer fake-token-"))
        .unwrap_or(false)
}

fn sheet_name(range: &str) -> String {
    range.split('!').next().unwrap_or(range).to_string()
}

async fn get_values(
    State(state): State<Arc<FakeState>>,
    Path((id, range)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some((status, body)) = state.sheets_reply.lock().unwrap().clone() {
        return (status, Json(body)).into_response();
    }
    if !authorized(&headers) {
        return google_api_error(StatusCode::UNAUTHORIZED, "Request had invalid authentication credentials.");
    }
    if id != SPREADSHEET_ID {
        return google_api_error(StatusCode::NOT_FOUND, "Requested entity was not found.");
    }

    let rows = state
        .sheets
        .lock()
        .unwrap()
        .get(&sheet_name(&range))
        .cloned()
        .unwrap_or_default();

    // Google leaves out `values` entirely for an empty range
    if rows.is_empty() {
        Json(json!({ "range": range, "majorDimension": "ROWS" })).into_response()
    } else {
        Json(json!({ "range": range, "majorDimension": "ROWS", "values": rows })).into_response()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendBody {
    values: Vec<Vec<String>>,
    major_dimension: String,
}

async fn append_values(
    State(state): State<Arc<FakeState>>,
    Path((id, range)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<AppendBody>,
) -> Response {
    if let Some((status, body)) = state.sheets_reply.lock().unwrap().clone() {
        return (status, Json(body)).into_response();
    }
    if !authorized(&headers) {
        return google_api_error(StatusCode::UNAUTHORIZED, "Request had invalid authentication credentials.");
    }
    if id != SPREADSHEET_ID {
        return google_api_error(StatusCode::NOT_FOUND, "Requested entity was not found.");
    }

    let Some(range) = range.strip_suffix(":append") else {
        return google_api_error(StatusCode::NOT_FOUND, "Unknown method");
    };
    if params.get("valueInputOption").map(String::as_str) != Some("RAW")
        || params.get("insertDataOption").map(String::as_str) != Some("INSERT_ROWS")
        || body.major_dimension != "ROWS"
    {
        return google_api_error(StatusCode::BAD_REQUEST, "Unexpected append options");
    }

    state
        .sheets
        .lock()
        .unwrap()
        .entry(sheet_name(range))
        .or_default()
        .extend(body.values.iter().cloned());

    Json(json!({
        "spreadsheetId": id,
        "updates": { "updatedRange": range, "updatedRows": body.values.len() }
    }))
    .into_response()
}
