//! In-process stand-in for the web app, plus spreadsheet helpers.

#![allow(dead_code)]

use axum::{
    http::{header::COOKIE, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use calamine::{open_workbook_auto, Reader};
use rust_xlsxwriter::Workbook;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;

pub const GOOD_TOKEN: &str = "good-token";
pub const EMPTY_SESSION_TOKEN: &str = "empty-session";

fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string()
}

fn has_session(headers: &HeaderMap, token: &str) -> bool {
    cookie_header(headers).contains(&format!("next-auth.session-token={token}"))
}

async fn auth_session(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if has_session(&headers, GOOD_TOKEN) {
        (
            StatusCode::OK,
            Json(json!({ "user": { "email": "csm@example.com" }, "expires": "2099-01-01" })),
        )
    } else if has_session(&headers, EMPTY_SESSION_TOKEN) {
        (StatusCode::OK, Json(json!({})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })))
    }
}

async fn transcribe(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !has_session(&headers, GOOD_TOKEN) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })));
    }

    let url = body.get("driveUrl").and_then(Value::as_str).unwrap_or("");
    if url.contains("fail") {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Transcription backend unavailable" })),
        )
    } else if url.contains("segments") {
        (
            StatusCode::OK,
            Json(json!({ "transcript": { "segments": [{ "text": "a" }, { "text": "b" }] } })),
        )
    } else if url.contains("silent") {
        (StatusCode::OK, Json(json!({ "transcript": { "text": "" } })))
    } else {
        (
            StatusCode::OK,
            Json(json!({ "formattedTranscript": format!("transcript for {url}") })),
        )
    }
}

/// Start the mock web app on an ephemeral port and return its base URL.
pub async fn spawn_mock_app() -> String {
    let app = Router::new()
        .route("/api/auth/session", get(auth_session))
        .route("/api/transcribe", post(transcribe));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Write a single-sheet workbook; `rows[0]` is the header.
pub fn write_sheet(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

/// All rows of the first sheet, as strings.
pub fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
