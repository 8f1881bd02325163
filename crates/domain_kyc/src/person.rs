//! Person entity
//!
//! Persons are the individuals associated with a client: owners, directors,
//! shareholders, beneficial owners, trustees, signatories and so on. A person
//! always belongs to exactly one client, which must exist when the person is
//! created.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, PersonId};
use crate::error::KycError;

/// How a person relates to the client they are attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Owner,
    Director,
    Shareholder,
    BeneficialOwner,
    AuthorizedSignatory,
    LegalRepresentative,
    Trustee,
    Protector,
    Settlor,
    Beneficiary,
    Partner,
    Other,
}

impl RelationshipType {
    /// Every relationship type, in declaration order
    pub const ALL: [RelationshipType; 12] = [
        RelationshipType::Owner,
        RelationshipType::Director,
        RelationshipType::Shareholder,
        RelationshipType::BeneficialOwner,
        RelationshipType::AuthorizedSignatory,
        RelationshipType::LegalRepresentative,
        RelationshipType::Trustee,
        RelationshipType::Protector,
        RelationshipType::Settlor,
        RelationshipType::Beneficiary,
        RelationshipType::Partner,
        RelationshipType::Other,
    ];

    /// Returns the wire name of the relationship type
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Owner => "OWNER",
            RelationshipType::Director => "DIRECTOR",
            RelationshipType::Shareholder => "SHAREHOLDER",
            RelationshipType::BeneficialOwner => "BENEFICIAL_OWNER",
            RelationshipType::AuthorizedSignatory => "AUTHORIZED_SIGNATORY",
            RelationshipType::LegalRepresentative => "LEGAL_REPRESENTATIVE",
            RelationshipType::Trustee => "TRUSTEE",
            RelationshipType::Protector => "PROTECTOR",
            RelationshipType::Settlor => "SETTLOR",
            RelationshipType::Beneficiary => "BENEFICIARY",
            RelationshipType::Partner => "PARTNER",
            RelationshipType::Other => "OTHER",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| KycError::invalid(format!("Invalid relationship type: {}", s)))
    }
}

/// Reference from a person to its owning client
///
/// The person does not own the client; it only keeps the identifier and the
/// name resolved when the person was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: ClientId,
    pub name: String,
}

/// A persisted person record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub client: ClientRef,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub identification_number: Option<String>,
    pub relationship_type: RelationshipType,
    pub position_title: Option<String>,
    /// Ownership stake in percent, within [0, 100]
    pub ownership_percentage: Option<Decimal>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Returns the full name in "First Last" format
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the person is recorded as a beneficial owner
    pub fn is_beneficial_owner(&self) -> bool {
        self.relationship_type == RelationshipType::BeneficialOwner
    }
}

/// A person that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub identification_number: Option<String>,
    pub relationship_type: RelationshipType,
    pub position_title: Option<String>,
    pub ownership_percentage: Option<Decimal>,
    pub address: Option<String>,
}

impl NewPerson {
    /// Materializes the person attached to its resolved client
    ///
    /// Called by repository adapters once the client has been confirmed to exist.
    pub fn into_person(self, id: PersonId, client: ClientRef, now: DateTime<Utc>) -> Person {
        Person {
            id,
            client,
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
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_person(relationship_type: RelationshipType) -> NewPerson {
        NewPerson {
            client_id: ClientId::new(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            phone: None,
            date_of_birth: None,
            nationality: None,
            identification_number: None,
            relationship_type,
            position_title: None,
            ownership_percentage: Some(dec!(25.5)),
            address: None,
        }
    }

    #[test]
    fn test_full_name_is_recomputed() {
        let client = ClientRef { id: ClientId::new(), name: "ABC Corp".to_string() };
        let mut person = new_person(RelationshipType::Director)
            .into_person(PersonId::new(), client, Utc::now());
        assert_eq!(person.full_name(), "Jane Doe");

        person.last_name = "Smith".to_string();
        assert_eq!(person.full_name(), "Jane Smith");
    }

    #[test]
    fn test_beneficial_owner_flag() {
        let client = ClientRef { id: ClientId::new(), name: "ABC Corp".to_string() };
        let person = new_person(RelationshipType::BeneficialOwner)
            .into_person(PersonId::new(), client, Utc::now());
        assert!(person.is_beneficial_owner());
    }

    #[test]
    fn test_relationship_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&RelationshipType::AuthorizedSignatory).unwrap(),
            "\"AUTHORIZED_SIGNATORY\""
        );
        assert_eq!(
            "beneficial_owner".parse::<RelationshipType>().unwrap(),
            RelationshipType::BeneficialOwner
        );
        for relationship in RelationshipType::ALL {
            let parsed: RelationshipType = relationship.as_str().parse().unwrap();
            assert_eq!(parsed, relationship);
        }
    }
}
