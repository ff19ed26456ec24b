use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("URL no proporcionada")]
    MissingUrl,

    #[error("URL no permitida")]
    ForbiddenTarget,

    #[error("Error al obtener el contenido")]
    Upstream(#[from] reqwest::Error),

    #[error("Error al obtener el contenido")]
    UpstreamStatus(reqwest::StatusCode),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingUrl => StatusCode::BAD_REQUEST,
            AppError::ForbiddenTarget => StatusCode::FORBIDDEN,
            AppError::Upstream { .. } | AppError::UpstreamStatus { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
