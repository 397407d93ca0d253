//! HTTP mapping of engine errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use tierpilot_core::error::{ClientCode, TierPilotError};

/// Handler error. Catalog and internal failures are reported with a
/// generic message; details stay in the logs.
#[derive(Debug)]
pub struct ApiError(pub TierPilotError);

impl From<TierPilotError> for ApiError {
    fn from(e: TierPilotError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let (status, message) = match code {
            ClientCode::BadRequest => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ClientCode::CatalogUnavailable | ClientCode::Internal => {
                tracing::error!(error = %self.0, "flow evaluation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "evaluation failed".to_string())
            }
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": message,
        }));
        (status, body).into_response()
    }
}
