//! Request validation helpers shared by the inbound HTTP handlers.
//!
//! Every failure becomes `invalid_request` with `details { field, code }`
//! and, where useful, the offending `value`.

use serde_json::json;

use crate::domain::{
    CategoryFilter, CredentialsValidationError, Error, ParseCategoryError, ParseStatusError,
    ParseThemeError, StatusFilter, StatusTransition, Theme, TransitionError,
};

/// Machine-readable validation codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    UnknownStatus,
    UnknownCategory,
    InvalidTransition,
    UnknownTheme,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownStatus => "unknown_status",
            Self::UnknownCategory => "unknown_category",
            Self::InvalidTransition => "invalid_transition",
            Self::UnknownTheme => "unknown_theme",
        }
    }
}

/// Newtype wrapper for request field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

const STATUS: FieldName = FieldName::new("status");
const CATEGORY: FieldName = FieldName::new("category");
const THEME: FieldName = FieldName::new("theme");

pub(crate) fn invalid_value_error(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Map a credentials failure, never echoing the password.
pub(crate) fn credentials_error(error: &CredentialsValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

/// Parse an optional `status` query value; blank means all.
pub(crate) fn parse_status_filter(raw: Option<&str>) -> Result<StatusFilter, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(StatusFilter::All),
        Some(value) => value.parse().map_err(|err: ParseStatusError| {
            invalid_value_error(STATUS, ValidationCode::UnknownStatus, err.to_string(), value)
        }),
    }
}

/// Parse an optional `category` query value; blank means all.
pub(crate) fn parse_category_filter(raw: Option<&str>) -> Result<CategoryFilter, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(CategoryFilter::All),
        Some(value) => value.parse().map_err(|err: ParseCategoryError| {
            invalid_value_error(
                CATEGORY,
                ValidationCode::UnknownCategory,
                err.to_string(),
                value,
            )
        }),
    }
}

/// Parse the target of an administrator transition.
pub(crate) fn parse_transition(raw: &str) -> Result<StatusTransition, Error> {
    raw.parse().map_err(|err: TransitionError| {
        let code = match err {
            TransitionError::UnknownStatus(_) => ValidationCode::UnknownStatus,
            TransitionError::NotATarget(_) => ValidationCode::InvalidTransition,
        };
        invalid_value_error(STATUS, code, err.to_string(), raw)
    })
}

pub(crate) fn parse_theme(raw: &str) -> Result<Theme, Error> {
    raw.parse().map_err(|err: ParseThemeError| {
        invalid_value_error(THEME, ValidationCode::UnknownTheme, err.to_string(), raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ComplaintStatus, Credentials, ErrorCode};
    use rstest::rstest;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details()?.get(key)?.as_str()
    }

    #[rstest]
    #[case(None, StatusFilter::All)]
    #[case(Some("  "), StatusFilter::All)]
    #[case(Some("ALL"), StatusFilter::All)]
    #[case(Some("In-Progress"), StatusFilter::Only(ComplaintStatus::InProgress))]
    fn status_filters_parse_leniently(#[case] raw: Option<&str>, #[case] expected: StatusFilter) {
        assert_eq!(parse_status_filter(raw).expect("valid filter"), expected);
    }

    #[rstest]
    #[case(None, CategoryFilter::All)]
    #[case(Some("Healthcare"), CategoryFilter::Only(Category::Healthcare))]
    fn category_filters_parse_leniently(
        #[case] raw: Option<&str>,
        #[case] expected: CategoryFilter,
    ) {
        assert_eq!(parse_category_filter(raw).expect("valid filter"), expected);
    }

    #[rstest]
    fn unknown_filter_values_name_the_field() {
        let status = parse_status_filter(Some("escalated")).expect_err("unknown status");
        assert_eq!(status.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&status, "field"), Some("status"));
        assert_eq!(detail(&status, "code"), Some("unknown_status"));
        assert_eq!(detail(&status, "value"), Some("escalated"));

        let category = parse_category_filter(Some("parks")).expect_err("unknown category");
        assert_eq!(detail(&category, "field"), Some("category"));
        assert_eq!(detail(&category, "code"), Some("unknown_category"));
    }

    #[rstest]
    #[case("resolved", None)]
    #[case("in progress", None)]
    #[case("pending", Some("invalid_transition"))]
    #[case("escalated", Some("unknown_status"))]
    fn transitions_reject_pending_and_unknown_targets(
        #[case] raw: &str,
        #[case] failure: Option<&str>,
    ) {
        match (parse_transition(raw), failure) {
            (Ok(_), None) => {}
            (Err(err), Some(code)) => assert_eq!(detail(&err, "code"), Some(code)),
            (outcome, expected) => panic!("unexpected {outcome:?} for expected {expected:?}"),
        }
    }

    #[rstest]
    fn credentials_errors_omit_the_password() {
        let err = Credentials::for_registration("citizen@example.com", "short")
            .expect_err("too short");
        let mapped = credentials_error(&err);
        assert_eq!(detail(&mapped, "field"), Some("password"));
        assert!(mapped.details().and_then(|d| d.get("value")).is_none());
    }

    #[rstest]
    fn theme_names_are_exact() {
        assert_eq!(parse_theme("dark").expect("valid theme"), Theme::Dark);
        let err = parse_theme("sepia").expect_err("unknown theme");
        assert_eq!(detail(&err, "code"), Some("unknown_theme"));
    }
}
