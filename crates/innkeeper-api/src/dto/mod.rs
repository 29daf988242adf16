//! Request and response data transfer objects.

pub mod request;
pub mod response;

use validator::Validate;

use innkeeper_core::error::AppError;

/// Run validator-derived checks on a payload, folding failures into one
/// validation error.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut parts: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {detail}")
            })
            .collect();
        parts.sort();
        AppError::validation(parts.join("; "))
    })
}
