//! Property-Based Test Generators
//!
//! Proptest strategies for KYC values and `fake`-backed generators for
//! realistic names and contact details.

use core_kernel::ClientId;
use domain_kyc::{ClientType, CreateClientRequest, CreatePersonRequest, RelationshipType, RiskLevel};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;
use proptest::sample::select;
use rust_decimal::Decimal;

/// Strategy for generating client types
pub fn client_type_strategy() -> impl Strategy<Value = ClientType> {
    select(ClientType::ALL.to_vec())
}

/// Strategy for generating risk levels
pub fn risk_level_strategy() -> impl Strategy<Value = RiskLevel> {
    select(RiskLevel::ALL.to_vec())
}

/// Strategy for generating relationship types
pub fn relationship_type_strategy() -> impl Strategy<Value = RelationshipType> {
    select(RelationshipType::ALL.to_vec())
}

/// Strategy for generating ownership percentages within [0, 100] at two decimals
pub fn ownership_percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating non-blank client names of mixed case
pub fn client_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,23}".prop_map(|s| s.trim_end().to_string())
}

/// Strategy for generating complete client requests
pub fn client_request_strategy() -> impl Strategy<Value = CreateClientRequest> {
    (
        client_name_strategy(),
        client_type_strategy(),
        proptest::option::of(risk_level_strategy()),
    )
        .prop_map(|(name, client_type, risk_level)| CreateClientRequest {
            risk_level,
            ..CreateClientRequest::new(name, client_type)
        })
}

/// Generates a client request with a realistic company name
pub fn fake_client_request() -> CreateClientRequest {
    let name: String = CompanyName().fake();
    let email: String = SafeEmail().fake();
    CreateClientRequest {
        email: Some(email),
        ..CreateClientRequest::new(name, ClientType::Company)
    }
}

/// Generates a person request with a realistic name for the given client
pub fn fake_person_request(
    client_id: ClientId,
    relationship_type: RelationshipType,
) -> CreatePersonRequest {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email: String = SafeEmail().fake();
    CreatePersonRequest {
        email: Some(email),
        ..CreatePersonRequest::new(client_id, first_name, last_name, relationship_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_kyc::RequestValidator;

    proptest! {
        #[test]
        fn test_generated_client_names_are_not_blank(name in client_name_strategy()) {
            prop_assert!(!name.trim().is_empty());
        }

        #[test]
        fn test_generated_ownership_is_valid(percentage in ownership_percentage_strategy()) {
            prop_assert!(RequestValidator::is_valid_ownership(percentage));
        }
    }

    #[test]
    fn test_fake_requests_pass_validation() {
        let client = fake_client_request();
        assert!(RequestValidator::validate_client(&client).is_valid);

        let person = fake_person_request(ClientId::new(), RelationshipType::Owner);
        assert!(RequestValidator::validate_person(&person).is_valid);
    }
}
