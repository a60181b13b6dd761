//! API Errors
//!
//! Most handlers fail with a plain [`StatusError`]. Handlers that validate offers use
//! [`ApiError`] so a failed validation can carry the full error list as a JSON body.

use offerdesk::validate::ValidationError;
use salvo::{
    async_trait,
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidationErrorResponse {
    /// 1-based data row number
    pub row: usize,

    /// Offending column
    pub field: String,

    /// Offending raw value, empty when the field was missing
    pub value: String,

    /// Human-readable reason
    pub message: String,

    /// Failed rule identifier
    pub rule: String,
}

impl From<ValidationError> for ValidationErrorResponse {
    fn from(error: ValidationError) -> Self {
        ValidationErrorResponse {
            row: error.row,
            field: error.field.as_str().to_string(),
            value: error.value,
            message: error.message,
            rule: error.rule.as_str().to_string(),
        }
    }
}

/// Body of a 400 response for offers that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidationErrorsResponse {
    /// Summary
    pub message: String,

    /// Every failed rule
    pub errors: Vec<ValidationErrorResponse>,
}

/// Handler error that is either a plain status or a validation report.
#[derive(Debug)]
pub(crate) enum ApiError {
    Status(StatusError),
    Validation(ValidationErrorsResponse),
}

impl ApiError {
    pub(crate) fn validation(message: &str, errors: Vec<ValidationError>) -> Self {
        ApiError::Validation(ValidationErrorsResponse {
            message: message.to_string(),
            errors: errors.into_iter().map(Into::into).collect(),
        })
    }
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        ApiError::Status(error)
    }
}

#[async_trait]
impl Writer for ApiError {
    async fn write(self, req: &mut Request, depot: &mut Depot, res: &mut Response) {
        match self {
            ApiError::Status(error) => error.write(req, depot, res).await,
            ApiError::Validation(body) => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(body));
            }
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        StatusError::register(components, operation);
    }
}
