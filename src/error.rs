use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Everything the rendering pipeline can refuse or fail on.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("payload must not be empty")]
    EmptyPayload,

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("could not decode logo image: {0}")]
    Logo(#[source] image::ImageError),

    #[error("unknown color {0:?}")]
    InvalidColor(String),

    #[error("image operation failed: {0}")]
    Image(#[from] image::ImageError),
}

impl RenderError {
    /// True for errors caused by the submitted form rather than the host.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RenderError::EmptyPayload
                | RenderError::Encode(_)
                | RenderError::Logo(_)
                | RenderError::InvalidColor(_)
        )
    }
}

impl ResponseError for RenderError {
    fn status_code(&self) -> StatusCode {
        if self.is_input_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_bad_request() {
        assert_eq!(
            RenderError::EmptyPayload.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RenderError::InvalidColor("blurple".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
