use axum::http::StatusCode;

use super::extract::Instance;
use super::problem::{FieldViolation, Problem, ProblemResponse};
use crate::domain::error::DomainError;
use crate::domain::validation::ValidationFailure;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &Instance,
) -> ProblemResponse {
    ProblemResponse(
        Problem::new(status, title, detail)
            .with_code(code)
            .with_instance(instance),
    )
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &Instance) -> ProblemResponse {
    match e {
        DomainError::NotFound { entity, id } => from_parts(
            StatusCode::NOT_FOUND,
            "ZFOOD_NOT_FOUND",
            "Not found",
            format!("{entity} with id {id} was not found"),
            instance,
        ),
        DomainError::Validation(failure) => {
            let mut resp = from_parts(
                StatusCode::BAD_REQUEST,
                validation_code(failure),
                "Validation error",
                failure.to_string(),
                instance,
            );
            if let Some(field) = failure.field() {
                resp.0 = resp.0.with_errors(vec![FieldViolation {
                    field: field.to_owned(),
                    message: failure.to_string(),
                }]);
            }
            resp
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

fn validation_code(failure: &ValidationFailure) -> &'static str {
    match failure {
        ValidationFailure::Duplicate { .. } => "ZFOOD_DUPLICATE",
        ValidationFailure::InvalidPage { .. } => "ZFOOD_INVALID_PAGE",
        _ => "ZFOOD_VALIDATION",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance {
            path: "/visits/v-1".into(),
            request_id: Some("req-1".into()),
        }
    }

    #[test]
    fn status_per_category() {
        let not_found = map_domain_error(&DomainError::not_found("Visit", "v-1"), &instance());
        assert_eq!(not_found.0.status, 404);
        assert_eq!(not_found.0.instance, "/visits/v-1");
        assert_eq!(not_found.0.request_id.as_deref(), Some("req-1"));

        let dup = map_domain_error(
            &DomainError::validation(ValidationFailure::duplicate("User", "email", "a@b.c")),
            &instance(),
        );
        assert_eq!(dup.0.status, 400);
        assert_eq!(dup.0.code, "ZFOOD_DUPLICATE");
        assert_eq!(dup.0.errors.as_ref().map(Vec::len), Some(1));

        let db = map_domain_error(&DomainError::database("disk I/O error"), &instance());
        assert_eq!(db.0.status, 500);
        assert!(!db.0.detail.contains("disk"));
    }
}
