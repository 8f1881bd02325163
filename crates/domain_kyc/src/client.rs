//! Client entity
//!
//! A client is the party being onboarded: a natural person, a company, a trust,
//! a partnership, or anything else that holds an account. Every client carries a
//! type and a risk level; the risk level is the only field that changes after
//! creation.
//!
//! A client that has not been persisted yet is a [`NewClient`]. Persisting it
//! through a `ClientRepository` assigns the identifier and timestamps and
//! yields a [`Client`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClientId;
use crate::error::KycError;

/// The legal form of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
    Individual,
    Company,
    Trust,
    Partnership,
    Other,
}

impl ClientType {
    /// Every client type, in declaration order
    pub const ALL: [ClientType; 5] = [
        ClientType::Individual,
        ClientType::Company,
        ClientType::Trust,
        ClientType::Partnership,
        ClientType::Other,
    ];

    /// Returns the wire name of the client type
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Individual => "INDIVIDUAL",
            ClientType::Company => "COMPANY",
            ClientType::Trust => "TRUST",
            ClientType::Partnership => "PARTNERSHIP",
            ClientType::Other => "OTHER",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| KycError::invalid(format!("Invalid client type: {}", s)))
    }
}

/// Compliance risk rating of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Every risk level, lowest first
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Returns the wire name of the risk level
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl Default for RiskLevel {
    /// Clients created without an explicit rating start at LOW
    fn default() -> Self {
        RiskLevel::Low
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| KycError::invalid(format!("Invalid risk level: {}", s)))
    }
}

/// A persisted client record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Identifier assigned on first persistence
    pub id: ClientId,
    /// Registered name
    pub name: String,
    /// Legal form
    pub client_type: ClientType,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Company or trust registration number
    pub registration_number: Option<String>,
    /// Current risk rating
    pub risk_level: RiskLevel,
    /// When the client was first persisted
    pub created_at: DateTime<Utc>,
    /// When the client was last persisted
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Replaces the risk level and returns the previous one
    ///
    /// `updated_at` is refreshed by the repository when the client is saved.
    pub fn change_risk_level(&mut self, new_risk_level: RiskLevel) -> RiskLevel {
        std::mem::replace(&mut self.risk_level, new_risk_level)
    }

    /// Returns true if the client is rated HIGH
    pub fn is_high_risk(&self) -> bool {
        self.risk_level == RiskLevel::High
    }
}

/// A client that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub client_type: ClientType,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
    pub risk_level: RiskLevel,
}

impl NewClient {
    /// Materializes the client with its assigned identity
    ///
    /// Called by repository adapters on first save.
    pub fn into_client(self, id: ClientId, now: DateTime<Utc>) -> Client {
        Client {
            id,
            name: self.name,
            client_type: self.client_type,
            email: self.email,
            phone: self.phone,
            registration_number: self.registration_number,
            risk_level: self.risk_level,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_type_parse_is_case_insensitive() {
        assert_eq!("company".parse::<ClientType>().unwrap(), ClientType::Company);
        assert_eq!(" TRUST ".parse::<ClientType>().unwrap(), ClientType::Trust);
        assert!("LLC".parse::<ClientType>().is_err());
    }

    #[test]
    fn test_risk_level_wire_names() {
        let names: Vec<_> = RiskLevel::ALL.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["LOW", "MEDIUM", "HIGH"]);
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn test_change_risk_level_returns_previous() {
        let mut client = NewClient {
            name: "ABC Corp".to_string(),
            client_type: ClientType::Company,
            email: None,
            phone: None,
            registration_number: None,
            risk_level: RiskLevel::Low,
        }
        .into_client(ClientId::new(), Utc::now());

        let previous = client.change_risk_level(RiskLevel::High);
        assert_eq!(previous, RiskLevel::Low);
        assert!(client.is_high_risk());
    }
}
