//! Request-shape checking against a declared [`Schema`].

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{rejection::RawPathParamsRejection, Query, RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::{
    error::AppError,
    validation::{evaluate, DataSource, Schema, ValidationError},
};

/// Middleware state binding one route to its schema.
#[derive(Debug, Clone, Copy)]
pub struct RequestSchema {
    pub schema: &'static Schema,
    pub max_body_bytes: usize,
}

impl RequestSchema {
    pub fn new(schema: &'static Schema, max_body_bytes: usize) -> Self {
        Self {
            schema,
            max_body_bytes,
        }
    }
}

/// Checks body, params and query in that order and stops at the first source
/// that has errors. Errors within one source are all reported.
pub fn check_request(
    schema: &Schema,
    body: &Map<String, Value>,
    params: &Map<String, Value>,
    query: &Map<String, Value>,
) -> Result<(), Vec<ValidationError>> {
    for (source, rules) in schema.sources() {
        let data = match source {
            DataSource::Body => body,
            DataSource::Params => params,
            DataSource::Query => query,
        };
        let errors = evaluate(data, rules);
        if !errors.is_empty() {
            tracing::debug!(
                schema = schema.name,
                source = source.as_str(),
                error_count = errors.len(),
                "Request rejected by validation"
            );
            return Err(errors);
        }
    }
    Ok(())
}

/// Rejects the request with `400 Validation failed` when it does not match
/// the route's schema; otherwise hands it on unchanged.
pub async fn validate_request(
    State(guard): State<RequestSchema>,
    path_params: Result<RawPathParams, RawPathParamsRejection>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let schema = guard.schema;

    let (parts, body) = request.into_parts();
    let (body_data, body) = if schema.body.is_some() {
        let bytes = to_bytes(body, guard.max_body_bytes).await.map_err(|err| {
            tracing::debug!(error = %err, "Failed to buffer request body");
            AppError::BadRequest(format!(
                "Request body could not be read or exceeds {} bytes",
                guard.max_body_bytes
            ))
        })?;
        (parse_body(&bytes)?, Body::from(bytes))
    } else {
        (Map::new(), body)
    };

    let params = match path_params {
        Ok(raw) => raw
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect(),
        Err(_) => Map::new(),
    };

    let query = if schema.query.is_some() {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::BadRequest("Invalid query string".to_string()))?;
        pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect()
    } else {
        Map::new()
    };

    check_request(schema, &body_data, &params, &query).map_err(AppError::Validation)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn parse_body(bytes: &Bytes) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
        Err(_) => Err(AppError::BadRequest("Invalid JSON body".to_string())),
    }
}
