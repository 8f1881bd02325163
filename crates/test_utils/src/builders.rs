//! Test Data Builders
//!
//! Builder patterns for create requests. Tests specify only the fields they
//! care about and get sensible defaults for everything else.

use chrono::NaiveDate;
use core_kernel::ClientId;
use domain_kyc::{ClientType, CreateClientRequest, CreatePersonRequest, RelationshipType, RiskLevel};
use rust_decimal::Decimal;

/// Builder for client create requests
pub struct ClientRequestBuilder {
    request: CreateClientRequest,
}

impl Default for ClientRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientRequestBuilder {
    /// Creates a builder for a LOW risk company named "Test Client"
    pub fn new() -> Self {
        Self {
            request: CreateClientRequest::new("Test Client", ClientType::Company),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.request.name = name.into();
        self
    }

    pub fn with_client_type(mut self, client_type: ClientType) -> Self {
        self.request.client_type = client_type;
        self
    }

    pub fn with_risk_level(mut self, risk_level: RiskLevel) -> Self {
        self.request.risk_level = Some(risk_level);
        self
    }

    /// Removes the risk level so the default applies
    pub fn without_risk_level(mut self) -> Self {
        self.request.risk_level = None;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.request.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.request.phone = Some(phone.into());
        self
    }

    pub fn with_registration_number(mut self, number: impl Into<String>) -> Self {
        self.request.registration_number = Some(number.into());
        self
    }

    /// Builds the request
    pub fn build(self) -> CreateClientRequest {
        self.request
    }
}

/// Builder for person create requests
pub struct PersonRequestBuilder {
    request: CreatePersonRequest,
}

impl PersonRequestBuilder {
    /// Creates a builder for a director of the given client
    pub fn new(client_id: ClientId) -> Self {
        Self {
            request: CreatePersonRequest::new(client_id, "Test", "Person", RelationshipType::Director),
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.request.first_name = first_name.into();
        self.request.last_name = last_name.into();
        self
    }

    pub fn with_relationship(mut self, relationship_type: RelationshipType) -> Self {
        self.request.relationship_type = relationship_type;
        self
    }

    pub fn with_ownership(mut self, percentage: Decimal) -> Self {
        self.request.ownership_percentage = Some(percentage);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.request.email = Some(email.into());
        self
    }

    pub fn with_date_of_birth(mut self, date: NaiveDate) -> Self {
        self.request.date_of_birth = Some(date);
        self
    }

    pub fn with_nationality(mut self, nationality: impl Into<String>) -> Self {
        self.request.nationality = Some(nationality.into());
        self
    }

    /// Builds the request
    pub fn build(self) -> CreatePersonRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_client_builder_defaults() {
        let request = ClientRequestBuilder::new().build();
        assert_eq!(request.name, "Test Client");
        assert_eq!(request.client_type, ClientType::Company);
        assert_eq!(request.risk_level, None);
    }

    #[test]
    fn test_person_builder_overrides() {
        let client_id = ClientId::new();
        let request = PersonRequestBuilder::new(client_id)
            .with_relationship(RelationshipType::BeneficialOwner)
            .with_ownership(dec!(51))
            .build();
        assert_eq!(request.client_id, client_id);
        assert_eq!(request.relationship_type, RelationshipType::BeneficialOwner);
        assert_eq!(request.ownership_percentage, Some(dec!(51)));
    }
}
