//! HTTP error responses

use axum::{
    extract::rejection::BytesRejection,
    http::{header::ALLOW, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use deployer_core::DeployError;
use serde_json::{json, Value};

/// An error on its way out as an HTTP response.
///
/// Body shape: `{ success: false, error, code, details? }`.
#[derive(Debug)]
pub enum ApiError {
    Deploy(DeployError),

    /// The request was refused before reaching a handler's logic.
    Request {
        status: StatusCode,
        code: &'static str,
        message: String,
    },

    MethodNotAllowed { allow: &'static str },
}

impl From<DeployError> for ApiError {
    fn from(e: DeployError) -> Self {
        ApiError::Deploy(e)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        let status = rejection.status();
        let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "payload_too_large"
        } else {
            "unreadable_body"
        };
        ApiError::Request {
            status,
            code,
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Deploy(e) => deploy_status(e),
            ApiError::Request { status, .. } => *status,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Deploy(e) => e.code(),
            ApiError::Request { code, .. } => code,
            ApiError::MethodNotAllowed { .. } => "method_not_allowed",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Deploy(DeployError::Provider { message, .. }) => message.clone(),
            ApiError::Deploy(DeployError::Protocol { .. }) => {
                "Invalid response from deployment provider".to_string()
            }
            ApiError::Deploy(other) => other.to_string(),
            ApiError::Request { message, .. } => message.clone(),
            ApiError::MethodNotAllowed { .. } => "Method not allowed".to_string(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            ApiError::Deploy(DeployError::Provider { details, .. }) => Some(details.clone()),
            ApiError::Deploy(DeployError::Protocol { excerpt, .. }) => {
                Some(Value::String(excerpt.clone()))
            }
            _ => None,
        }
    }
}

fn deploy_status(e: &DeployError) -> StatusCode {
    match e {
        DeployError::Validation(_) => StatusCode::BAD_REQUEST,
        DeployError::Configuration(_) | DeployError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DeployError::Provider { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        // A 2xx with a body we cannot read is still a bad upstream answer.
        DeployError::Protocol { status, .. } => match status.map(StatusCode::from_u16) {
            Some(Ok(code)) if code.is_client_error() || code.is_server_error() => code,
            Some(_) => StatusCode::BAD_GATEWAY,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "error": self.message(),
            "code": self.code(),
        });
        if let Some(details) = self.details() {
            body["details"] = details;
        }

        let mut response = (self.status(), Json(body)).into_response();
        if let ApiError::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}
