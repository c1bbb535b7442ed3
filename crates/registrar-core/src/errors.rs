use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// A single rejected field, addressed by its dotted path inside the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub value: Value,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Every failure a guard or store call can abort a write with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    DuplicateRecord(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", join_messages(.0))]
    Validation(Vec<FieldViolation>),

    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::DuplicateRecord(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(
        field: impl Into<String>,
        value: impl Into<Value>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation(vec![FieldViolation::new(field, value, message)])
    }

    pub fn hashing(msg: impl Into<String>) -> Self {
        Self::HashingFailure(msg.into())
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Database(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::DuplicateRecord(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::HashingFailure(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Violations carried by a validation failure, empty for every other kind.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(violations) => json!({
                "error": self.to_string(),
                "fields": violations,
            }),
            // Store internals stay out of the response body
            Self::Database(err) => {
                tracing::error!(error = %err, "store operation failed");
                json!({ "error": "Internal server error" })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();
        collect_violations(None, &errors, &mut violations);
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self::Validation(violations)
    }
}

fn collect_violations(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let value = error.params.get("value").cloned().unwrap_or(Value::Null);
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", path));
                    out.push(FieldViolation::new(path.clone(), value, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_violations(Some(&path), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_violations(Some(&item_path), nested, out);
                }
            }
        }
    }
}
