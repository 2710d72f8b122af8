use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use super::client::UpstreamError;

pub const POSSIBLE_REASON_KEY: &str = "possible_reason";

/// Envelope key the translated upstream body is returned under
pub const DETAIL_KEY: &str = "detail";

/// Hint attached to upstream errors that carry no explanation of their own
pub const FREE_SUBSCRIPTION_HINT: &str =
    "You are using a Free subscription and try requesting data available in other subscriptions.";

/// Upstream failure as returned to the local client
#[derive(Debug, Clone, PartialEq)]
pub struct LocalErrorResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Map an upstream failure to the local response.
///
/// The status is kept. Object bodies get `possible_reason` unless one is
/// already present; any other body is passed through unchanged.
pub fn translate(error: UpstreamError) -> LocalErrorResponse {
    let UpstreamError { status, mut body } = error;

    if let Value::Object(map) = &mut body {
        map.entry(POSSIBLE_REASON_KEY)
            .or_insert_with(|| Value::String(FREE_SUBSCRIPTION_HINT.to_string()));
    }

    LocalErrorResponse { status, body }
}

impl IntoResponse for LocalErrorResponse {
    fn into_response(self) -> Response {
        let mut envelope = Map::new();
        envelope.insert(DETAIL_KEY.to_string(), self.body);
        (self.status, Json(Value::Object(envelope))).into_response()
    }
}
