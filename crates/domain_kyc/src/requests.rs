//! Create-request shapes
//!
//! Requests arrive loosely formatted from callers. Before validation they are
//! normalized: every string is trimmed and blank optional strings become `None`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ClientId;
use crate::client::{ClientType, NewClient, RiskLevel};
use crate::person::{NewPerson, RelationshipType};

/// Request for registering a new client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    /// Client name (required)
    pub name: String,
    /// Legal form (required)
    pub client_type: ClientType,
    /// Contact email (optional)
    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone (optional)
    #[serde(default)]
    pub phone: Option<String>,
    /// Registration number (optional)
    #[serde(default)]
    pub registration_number: Option<String>,
    /// Initial risk rating; LOW when omitted
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
}

impl CreateClientRequest {
    /// Creates a request with only the required fields
    pub fn new(name: impl Into<String>, client_type: ClientType) -> Self {
        Self {
            name: name.into(),
            client_type,
            email: None,
            phone: None,
            registration_number: None,
            risk_level: None,
        }
    }

    /// Trims every string field and drops blank optional values
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            client_type: self.client_type,
            email: trim_optional(self.email),
            phone: trim_optional(self.phone),
            registration_number: trim_optional(self.registration_number),
            risk_level: self.risk_level,
        }
    }

    /// Converts this request into an unpersisted client
    pub fn into_new_client(self) -> NewClient {
        NewClient {
            name: self.name,
            client_type: self.client_type,
            email: self.email,
            phone: self.phone,
            registration_number: self.registration_number,
            risk_level: self.risk_level.unwrap_or_default(),
        }
    }
}

/// Request for attaching a person to an existing client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    /// Owning client (required, must exist)
    pub client_id: ClientId,
    /// First name (required)
    pub first_name: String,
    /// Last name (required)
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub identification_number: Option<String>,
    /// Relationship to the client (required)
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub position_title: Option<String>,
    /// Ownership stake in percent, must lie within [0, 100]
    #[serde(default)]
    pub ownership_percentage: Option<Decimal>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CreatePersonRequest {
    /// Creates a request with only the required fields
    pub fn new(
        client_id: ClientId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        Self {
            client_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            phone: None,
            date_of_birth: None,
            nationality: None,
            identification_number: None,
            relationship_type,
            position_title: None,
            ownership_percentage: None,
            address: None,
        }
    }

    /// Trims every string field and drops blank optional values
    pub fn normalized(self) -> Self {
        Self {
            client_id: self.client_id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: trim_optional(self.email),
            phone: trim_optional(self.phone),
            date_of_birth: self.date_of_birth,
            nationality: trim_optional(self.nationality),
            identification_number: trim_optional(self.identification_number),
            relationship_type: self.relationship_type,
            position_title: trim_optional(self.position_title),
            ownership_percentage: self.ownership_percentage,
            address: trim_optional(self.address),
        }
    }

    /// Converts this request into an unpersisted person
    pub fn into_new_person(self) -> NewPerson {
        NewPerson {
            client_id: self.client_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            nationality: self.nationality,
            identification_number: self.identification_number,
            relationship_type: self.relationship_type,
            position_title: self.position_title,
            ownership_percentage: self.ownership_percentage,
            address: self.address,
        }
    }
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_normalization() {
        let request = CreateClientRequest {
            name: "  ABC Corp ".to_string(),
            client_type: ClientType::Company,
            email: Some(" ops@abc.example ".to_string()),
            phone: Some("   ".to_string()),
            registration_number: None,
            risk_level: None,
        }
        .normalized();

        assert_eq!(request.name, "ABC Corp");
        assert_eq!(request.email.as_deref(), Some("ops@abc.example"));
        assert_eq!(request.phone, None);
    }

    #[test]
    fn test_missing_risk_level_defaults_to_low() {
        let new_client = CreateClientRequest::new("ABC Corp", ClientType::Company).into_new_client();
        assert_eq!(new_client.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_client_request_deserializes_camel_case() {
        let json = r#"{
            "name": "Smith Family Trust",
            "clientType": "TRUST",
            "registrationNumber": "TR-42",
            "riskLevel": "MEDIUM"
        }"#;
        let request: CreateClientRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.client_type, ClientType::Trust);
        assert_eq!(request.registration_number.as_deref(), Some("TR-42"));
        assert_eq!(request.risk_level, Some(RiskLevel::Medium));
        assert_eq!(request.email, None);
    }

    #[test]
    fn test_person_request_requires_relationship_type() {
        let json = format!(
            r#"{{"clientId": "{}", "firstName": "Jane", "lastName": "Doe"}}"#,
            uuid::Uuid::new_v4()
        );
        assert!(serde_json::from_str::<CreatePersonRequest>(&json).is_err());
    }
}
