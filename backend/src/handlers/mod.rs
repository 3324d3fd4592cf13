pub mod contests;
pub mod payments;
pub mod submissions;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
