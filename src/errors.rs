use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::JsonResponse;

#[derive(Debug, PartialEq, Eq)]
pub enum RequestError {
    Validation(&'static str),
    Conflict(&'static str),
    NotAuthenticated(&'static str),
    Forbidden(&'static str),
    NotFound(&'static str),
    ServerError,
}

#[derive(serde::Serialize)]
pub struct RequestErrorJson {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RequestErrorJson {
    pub fn with_message(message: &str) -> RequestErrorJson {
        RequestErrorJson {
            success: false,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn with_error(error: &str) -> RequestErrorJson {
        RequestErrorJson {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJson> {
        let (status_code, json) = match self {
            RequestError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                RequestErrorJson::with_message(message),
            ),
            // duplicate unique keys are reported as a plain 400
            RequestError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                RequestErrorJson::with_message(message),
            ),
            RequestError::NotAuthenticated(message) => (
                StatusCode::UNAUTHORIZED,
                RequestErrorJson::with_message(message),
            ),
            RequestError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                RequestErrorJson::with_message(message),
            ),
            RequestError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                RequestErrorJson::with_message(message),
            ),
            RequestError::ServerError => {
                eprintln!("Unexpected server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RequestErrorJson::with_error("Internal Server Error"),
                )
            }
        };
        (status_code, Json(json))
    }
}
