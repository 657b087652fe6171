pub mod locations;
pub mod skus;

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::database::Database;

// Polled by the frontend's status indicator. Anything but 200 flips the
// indicator to offline; no error body needed.
pub async fn health(State(db): State<Database>) -> Result<Json<Value>, StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(&db)
        .await
        .map_err(|err| {
            log::warn!("health check failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(Json(json!({ "status": "ok" })))
}
