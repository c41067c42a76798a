//! Request extractors shared by the handlers.

use std::convert::Infallible;

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::problem::{FieldViolation, Problem, ProblemResponse};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Where a problem happened: the request path plus the request id set by ingress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    pub path: String,
    pub request_id: Option<String>,
}

impl Instance {
    fn from_parts(parts: &Parts) -> Self {
        Self {
            path: parts.uri.path().to_owned(),
            request_id: parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        }
    }
}

impl<S> FromRequestParts<S> for Instance
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// JSON body that is deserialized and then checked with `validator`.
///
/// Malformed JSON, missing fields and rule violations all reject with a
/// 400 problem before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let instance = Instance::from_parts(&parts);
        let req = Request::from_parts(parts, body);

        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Request body rejected");
            ProblemResponse(
                Problem::new(
                    StatusCode::BAD_REQUEST,
                    "Invalid request body",
                    rejection.body_text(),
                )
                .with_code("ZFOOD_BAD_REQUEST")
                .with_instance(&instance),
            )
        })?;

        value.validate().map_err(|errors| {
            ProblemResponse(
                Problem::new(
                    StatusCode::BAD_REQUEST,
                    "Validation error",
                    "Request body failed validation",
                )
                .with_code("ZFOOD_VALIDATION")
                .with_instance(&instance)
                .with_errors(field_violations(&errors)),
            )
        })?;

        Ok(Self(value))
    }
}

/// Query string extractor whose rejections are 400 problems instead of plain text.
#[derive(Debug, Clone)]
pub struct ProblemQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ProblemQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let instance = Instance::from_parts(parts);
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Query string rejected");
                ProblemResponse(
                    Problem::new(
                        StatusCode::BAD_REQUEST,
                        "Invalid query string",
                        rejection.body_text(),
                    )
                    .with_code("ZFOOD_BAD_REQUEST")
                    .with_instance(&instance),
                )
            })?;
        Ok(Self(value))
    }
}

/// Flatten `validator` errors into field/message pairs, sorted by field.
pub fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldViolation {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
