//! Request validation rules
//!
//! Requests are validated after normalization and before anything is written.
//! A failed validation is never partially applied.
//!
//! # Validation Rules
//!
//! ## Clients
//! - Name must not be blank
//! - Email, when present, must be a syntactically valid address
//!
//! ## Persons
//! - First and last name must not be blank
//! - Email, when present, must be a syntactically valid address
//! - Ownership percentage, when present, must lie within [0, 100]
//! - Date of birth in the future and non ISO-3166 nationality codes are
//!   reported as warnings only

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use validator::{Validate, ValidationErrors};

use crate::error::KycError;
use crate::requests::{CreateClientRequest, CreatePersonRequest};

/// Result of request validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the request is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Converts into a `Result`, keeping the warnings on success
    pub fn into_result(self) -> Result<Vec<String>, KycError> {
        if self.is_valid {
            Ok(self.warnings)
        } else {
            Err(KycError::validation_failed(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for create requests
pub struct RequestValidator;

impl RequestValidator {
    /// Validates a normalized client request
    pub fn validate_client(request: &CreateClientRequest) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if request.name.trim().is_empty() {
            result.add_error("Client name is required");
        }

        if let Err(errors) = request.validate() {
            Self::collect_field_errors(&errors, &mut result);
        }

        result
    }

    /// Validates a normalized person request
    pub fn validate_person(request: &CreatePersonRequest) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if request.first_name.trim().is_empty() {
            result.add_error("First name is required");
        }
        if request.last_name.trim().is_empty() {
            result.add_error("Last name is required");
        }

        if let Err(errors) = request.validate() {
            Self::collect_field_errors(&errors, &mut result);
        }

        if let Some(percentage) = request.ownership_percentage {
            if !Self::is_valid_ownership(percentage) {
                result.add_error(format!(
                    "Ownership percentage must be between 0 and 100, found {}",
                    percentage
                ));
            }
        }

        if let Some(date_of_birth) = request.date_of_birth {
            if date_of_birth > Utc::now().date_naive() {
                result.add_warning("Date of birth is in the future");
            }
        }

        // Nationality format (should be 2-letter ISO code)
        if let Some(ref nationality) = request.nationality {
            if nationality.chars().count() != 2 || !nationality.chars().all(char::is_alphabetic) {
                result.add_warning("Nationality should be a 2-letter ISO country code");
            }
        }

        result
    }

    /// Returns true if the percentage lies within [0, 100]
    pub fn is_valid_ownership(percentage: Decimal) -> bool {
        percentage >= Decimal::ZERO && percentage <= dec!(100)
    }

    fn collect_field_errors(errors: &ValidationErrors, result: &mut ValidationResult) {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                result.add_error(format!("{}: {}", field, message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClientId;
    use crate::client::ClientType;
    use crate::person::RelationshipType;

    fn person_request() -> CreatePersonRequest {
        CreatePersonRequest::new(ClientId::new(), "Jane", "Doe", RelationshipType::Shareholder)
    }

    #[test]
    fn test_valid_client_request() {
        let mut request = CreateClientRequest::new("ABC Corp", ClientType::Company);
        request.email = Some("compliance@abc.example".to_string());
        assert!(RequestValidator::validate_client(&request).is_valid);
    }

    #[test]
    fn test_blank_client_name_rejected() {
        let request = CreateClientRequest::new("   ", ClientType::Company);
        let result = RequestValidator::validate_client(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("name")));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut request = CreateClientRequest::new("ABC Corp", ClientType::Company);
        request.email = Some("not-an-email".to_string());
        let result = RequestValidator::validate_client(&request);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Invalid email format")));
    }

    #[test]
    fn test_ownership_bounds_are_inclusive() {
        assert!(RequestValidator::is_valid_ownership(dec!(0)));
        assert!(RequestValidator::is_valid_ownership(dec!(100.0)));
        assert!(!RequestValidator::is_valid_ownership(dec!(100.01)));
        assert!(!RequestValidator::is_valid_ownership(dec!(-0.5)));
    }

    #[test]
    fn test_person_out_of_range_ownership_rejected() {
        let mut request = person_request();
        request.ownership_percentage = Some(dec!(150));
        let result = RequestValidator::validate_person(&request);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_person_blank_names_collect_both_errors() {
        let mut request = person_request();
        request.first_name = " ".to_string();
        request.last_name = String::new();
        let result = RequestValidator::validate_person(&request);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_nationality_format_is_warning_only() {
        let mut request = person_request();
        request.nationality = Some("Romania".to_string());
        let result = RequestValidator::validate_person(&request);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_nationality_counts_letters_not_bytes() {
        for code in ["RO", "ÅL", "ÉÇ"] {
            let mut request = person_request();
            request.nationality = Some(code.to_string());
            let result = RequestValidator::validate_person(&request);
            assert!(result.warnings.is_empty(), "unexpected warning for {}", code);
        }

        let mut request = person_request();
        request.nationality = Some("R1".to_string());
        assert_eq!(RequestValidator::validate_person(&request).warnings.len(), 1);
    }

    #[test]
    fn test_into_result_maps_errors() {
        let mut result = ValidationResult::ok();
        result.add_error("First name is required");
        let err = result.into_result().unwrap_err();
        assert!(err.is_validation());
    }
}
