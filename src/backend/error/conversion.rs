/**
 * Error Conversion
 *
 * `IntoResponse` for `ApiError`, producing the same JSON envelope the
 * success path uses:
 *
 * ```json
 * {"success": false, "error": "board not found"}
 * ```
 */
use crate::backend::error::types::ApiError;
use axum::response::{IntoResponse, Response};
use axum::Json;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(ref e) = self {
            tracing::error!("[API] database error: {}", e);
        }

        let status = self.status_code();
        let body = serde_json::json!({
            "success": false,
            "error": self.client_message(),
        });
        (status, Json(body)).into_response()
    }
}
