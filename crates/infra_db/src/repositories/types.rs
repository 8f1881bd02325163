//! PostgreSQL enum types and row structs
//!
//! The database enums mirror the domain enums one-to-one; the conversions are
//! total in both directions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use core_kernel::{ClientId, PersonId};
use domain_kyc::{Client, ClientRef, ClientType, Person, RelationshipType, RiskLevel};

/// Client type enumeration (`client_type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "client_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbClientType {
    Individual,
    Company,
    Trust,
    Partnership,
    Other,
}

/// Risk level enumeration (`risk_level`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "risk_level", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbRiskLevel {
    Low,
    Medium,
    High,
}

/// Relationship type enumeration (`relationship_type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "relationship_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbRelationshipType {
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

impl From<ClientType> for DbClientType {
    fn from(value: ClientType) -> Self {
        match value {
            ClientType::Individual => DbClientType::Individual,
            ClientType::Company => DbClientType::Company,
            ClientType::Trust => DbClientType::Trust,
            ClientType::Partnership => DbClientType::Partnership,
            ClientType::Other => DbClientType::Other,
        }
    }
}

impl From<DbClientType> for ClientType {
    fn from(value: DbClientType) -> Self {
        match value {
            DbClientType::Individual => ClientType::Individual,
            DbClientType::Company => ClientType::Company,
            DbClientType::Trust => ClientType::Trust,
            DbClientType::Partnership => ClientType::Partnership,
            DbClientType::Other => ClientType::Other,
        }
    }
}

impl From<RiskLevel> for DbRiskLevel {
    fn from(value: RiskLevel) -> Self {
        match value {
            RiskLevel::Low => DbRiskLevel::Low,
            RiskLevel::Medium => DbRiskLevel::Medium,
            RiskLevel::High => DbRiskLevel::High,
        }
    }
}

impl From<DbRiskLevel> for RiskLevel {
    fn from(value: DbRiskLevel) -> Self {
        match value {
            DbRiskLevel::Low => RiskLevel::Low,
            DbRiskLevel::Medium => RiskLevel::Medium,
            DbRiskLevel::High => RiskLevel::High,
        }
    }
}

impl From<RelationshipType> for DbRelationshipType {
    fn from(value: RelationshipType) -> Self {
        match value {
            RelationshipType::Owner => DbRelationshipType::Owner,
            RelationshipType::Director => DbRelationshipType::Director,
            RelationshipType::Shareholder => DbRelationshipType::Shareholder,
            RelationshipType::BeneficialOwner => DbRelationshipType::BeneficialOwner,
            RelationshipType::AuthorizedSignatory => DbRelationshipType::AuthorizedSignatory,
            RelationshipType::LegalRepresentative => DbRelationshipType::LegalRepresentative,
            RelationshipType::Trustee => DbRelationshipType::Trustee,
            RelationshipType::Protector => DbRelationshipType::Protector,
            RelationshipType::Settlor => DbRelationshipType::Settlor,
            RelationshipType::Beneficiary => DbRelationshipType::Beneficiary,
            RelationshipType::Partner => DbRelationshipType::Partner,
            RelationshipType::Other => DbRelationshipType::Other,
        }
    }
}

impl From<DbRelationshipType> for RelationshipType {
    fn from(value: DbRelationshipType) -> Self {
        match value {
            DbRelationshipType::Owner => RelationshipType::Owner,
            DbRelationshipType::Director => RelationshipType::Director,
            DbRelationshipType::Shareholder => RelationshipType::Shareholder,
            DbRelationshipType::BeneficialOwner => RelationshipType::BeneficialOwner,
            DbRelationshipType::AuthorizedSignatory => RelationshipType::AuthorizedSignatory,
            DbRelationshipType::LegalRepresentative => RelationshipType::LegalRepresentative,
            DbRelationshipType::Trustee => RelationshipType::Trustee,
            DbRelationshipType::Protector => RelationshipType::Protector,
            DbRelationshipType::Settlor => RelationshipType::Settlor,
            DbRelationshipType::Beneficiary => RelationshipType::Beneficiary,
            DbRelationshipType::Partner => RelationshipType::Partner,
            DbRelationshipType::Other => RelationshipType::Other,
        }
    }
}

/// A row of the `clients` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientRow {
    pub id: Uuid,
    pub name: String,
    pub client_type: DbClientType,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
    pub risk_level: DbRiskLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: ClientId::from(row.id),
            name: row.name,
            client_type: row.client_type.into(),
            email: row.email,
            phone: row.phone,
            registration_number: row.registration_number,
            risk_level: row.risk_level.into(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row of `persons` joined with the owning client's name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PersonRow {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub identification_number: Option<String>,
    pub relationship_type: DbRelationshipType,
    pub position_title: Option<String>,
    pub ownership_percentage: Option<Decimal>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: PersonId::from(row.id),
            client: ClientRef {
                id: ClientId::from(row.client_id),
                name: row.client_name,
            },
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            nationality: row.nationality,
            identification_number: row.identification_number,
            relationship_type: row.relationship_type.into(),
            position_title: row.position_title,
            ownership_percentage: row.ownership_percentage,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_conversions_are_total() {
        for client_type in ClientType::ALL {
            assert_eq!(ClientType::from(DbClientType::from(client_type)), client_type);
        }
        for risk_level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from(DbRiskLevel::from(risk_level)), risk_level);
        }
        for relationship in RelationshipType::ALL {
            assert_eq!(
                RelationshipType::from(DbRelationshipType::from(relationship)),
                relationship
            );
        }
    }
}
