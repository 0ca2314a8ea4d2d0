//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{AuthValidationError, Error, EventId};

/// Build an `invalid_request` error carrying field context in `details`.
pub(crate) fn field_error(
    message: impl Into<String>,
    field: &'static str,
    code: &'static str,
) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// Map signup/login payload validation to field-tagged request errors.
pub(crate) fn map_auth_validation_error(err: AuthValidationError) -> Error {
    match err {
        AuthValidationError::NameTooShort { .. } => {
            field_error(err.to_string(), "name", "too_short")
        }
        AuthValidationError::InvalidEmail => field_error(err.to_string(), "email", "invalid_email"),
        AuthValidationError::PasswordTooShort { .. } => {
            field_error(err.to_string(), "password", "too_short")
        }
    }
}

/// Parse a path segment into an [`EventId`].
pub(crate) fn parse_event_id(raw: &str) -> Result<EventId, Error> {
    EventId::new(raw).map_err(|_| {
        Error::invalid_request("event id must be a valid UUID").with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn field_errors_carry_field_and_code_details() {
        let err = field_error("name must be at least 2 characters", "name", "too_short");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "name");
        assert_eq!(details["code"], "too_short");
    }

    #[test]
    fn bad_event_id_reports_the_offending_value() {
        let err = parse_event_id("not-a-uuid").expect_err("invalid id");
        assert_eq!(
            err.details().and_then(|d| d.get("value")).and_then(|v| v.as_str()),
            Some("not-a-uuid")
        );
    }
}
