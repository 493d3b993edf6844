//! `GET /favicon.ico` — no icon; answer without touching the store.

use axum::http::StatusCode;

pub async fn handler() -> StatusCode { StatusCode::NO_CONTENT }
