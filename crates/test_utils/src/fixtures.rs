//! Pre-built Test Fixtures
//!
//! Ready-to-use requests for common KYC scenarios. Fixtures are fixed and
//! predictable; use the generators for randomized data.

use chrono::NaiveDate;
use core_kernel::ClientId;
use domain_kyc::{ClientType, CreateClientRequest, CreatePersonRequest, RelationshipType, RiskLevel};
use rust_decimal_macros::dec;

/// Fixture for client requests
pub struct ClientFixtures;

impl ClientFixtures {
    /// A low-risk company with full contact details
    pub fn abc_corp() -> CreateClientRequest {
        CreateClientRequest {
            name: "ABC Corp".to_string(),
            client_type: ClientType::Company,
            email: Some("compliance@abccorp.example".to_string()),
            phone: Some("+40 21 000 0000".to_string()),
            registration_number: Some("J40/1234/2020".to_string()),
            risk_level: Some(RiskLevel::Low),
        }
    }

    /// A high-risk trust
    pub fn smith_family_trust() -> CreateClientRequest {
        CreateClientRequest {
            name: "Smith Family Trust".to_string(),
            client_type: ClientType::Trust,
            email: None,
            phone: None,
            registration_number: Some("TR-2021-0042".to_string()),
            risk_level: Some(RiskLevel::High),
        }
    }

    /// An individual without an explicit risk level
    pub fn individual(name: &str) -> CreateClientRequest {
        CreateClientRequest::new(name, ClientType::Individual)
    }

    /// A company with the given name and risk level
    pub fn company(name: &str, risk_level: RiskLevel) -> CreateClientRequest {
        CreateClientRequest {
            risk_level: Some(risk_level),
            ..CreateClientRequest::new(name, ClientType::Company)
        }
    }
}

/// Fixture for person requests
pub struct PersonFixtures;

impl PersonFixtures {
    /// A beneficial owner holding a quarter of the client
    pub fn beneficial_owner(client_id: ClientId) -> CreatePersonRequest {
        CreatePersonRequest {
            email: Some("jane.doe@example.com".to_string()),
            date_of_birth: Some(DateFixtures::adult_birth_date()),
            nationality: Some("RO".to_string()),
            identification_number: Some("1850615123456".to_string()),
            ownership_percentage: Some(dec!(25.00)),
            ..CreatePersonRequest::new(client_id, "Jane", "Doe", RelationshipType::BeneficialOwner)
        }
    }

    /// A director without ownership
    pub fn director(client_id: ClientId) -> CreatePersonRequest {
        CreatePersonRequest {
            position_title: Some("Managing Director".to_string()),
            ..CreatePersonRequest::new(client_id, "John", "Smith", RelationshipType::Director)
        }
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// A birth date well in the past
    pub fn adult_birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
    }
}
