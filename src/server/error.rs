use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::service::ServiceError;
use crate::validate::ValidationError;

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Invalid request body")]
    InvalidRequestBody,

    #[error("Invalid query string")]
    InvalidQuery,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(&'static str),

    /// Generic per-operation message; the cause is logged, never returned.
    #[error("{0}")]
    Internal(&'static str),
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

impl ApiError {
    /// Map a service failure, logging store errors under `context`.
    pub(crate) fn from_service(err: ServiceError, context: &'static str) -> Self {
        match err {
            ServiceError::Validation(e) => Self::Validation(e),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::Store(e) => {
                tracing::error!(error = %format!("{e:#}"), "{context}");
                Self::Internal(context)
            }
        }
    }

    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody | Self::InvalidQuery | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// `Json` whose rejection is reported in the API's own error shape.
pub(crate) struct ApiJson<T>(pub(crate) T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "rejected request body");
            ApiError::InvalidRequestBody
        })?;
        Ok(Self(value))
    }
}

/// `Query` counterpart of [`ApiJson`].
pub(crate) struct ApiQuery<T>(pub(crate) T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "rejected query string");
                ApiError::InvalidQuery
            })?;
        Ok(Self(value))
    }
}
