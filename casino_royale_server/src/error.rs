use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use casino_royale_core::GameError;
use thiserror::Error;
use tracing::warn;

use crate::store::StoreError;

/// HTTP 层的错误，转换为带状态码的纯文本响应
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Game(GameError::DeckExhausted) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Game(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("请求被拒绝 ({}): {}", status, self);
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(GameError::InvalidArgument("Player")).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(GameError::RoundFinished).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(GameError::DeckExhausted).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::from(StoreError::NotFound("Toby".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(StoreError::AlreadyExists("Toby".into())).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_message_passes_through() {
        let err = ApiError::from(StoreError::NotFound("Toby".into()));
        assert_eq!(err.to_string(), "Player Toby does not exist.");
    }
}
