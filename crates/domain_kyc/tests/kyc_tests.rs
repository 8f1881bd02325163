//! Tests for domain_kyc entities, views and validation

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal_macros::dec;
use serde_json::json;

use core_kernel::{ClientId, PersonId};
use domain_kyc::{
    ClientRef, ClientType, ClientView, CreateClientRequest, CreatePersonRequest, NewClient,
    NewPerson, PersonView, RelationshipType, RequestValidator, RiskLevel,
};

fn sample_client() -> domain_kyc::Client {
    NewClient {
        name: "ABC Corp".to_string(),
        client_type: ClientType::Company,
        email: Some("ops@abc.example".to_string()),
        phone: None,
        registration_number: Some("J40/1/2020".to_string()),
        risk_level: RiskLevel::Medium,
    }
    .into_client(ClientId::new(), Utc::now())
}

fn sample_person(client: &domain_kyc::Client) -> domain_kyc::Person {
    NewPerson {
        client_id: client.id,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: None,
        phone: None,
        date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 15),
        nationality: Some("RO".to_string()),
        identification_number: None,
        relationship_type: RelationshipType::BeneficialOwner,
        position_title: None,
        ownership_percentage: Some(dec!(40)),
        address: None,
    }
    .into_person(
        PersonId::new(),
        ClientRef {
            id: client.id,
            name: client.name.clone(),
        },
        Utc::now(),
    )
}

// ============================================================================
// View Tests
// ============================================================================

mod view_tests {
    use super::*;

    #[test]
    fn test_client_view_omits_persons_by_default() {
        let client = sample_client();
        let view = ClientView::from_entity(&client);

        assert_eq!(view.id, client.id);
        assert_eq!(view.risk_level, RiskLevel::Medium);
        assert!(view.persons.is_none());
        assert_eq!(ClientView::from(&client), view);
    }

    #[test]
    fn test_client_view_with_persons() {
        let client = sample_client();
        let person = sample_person(&client);
        let view = ClientView::with_persons(&client, &[person.clone()]);

        let persons = view.persons.expect("persons attached");
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0], PersonView::from_entity(&person));
    }

    #[test]
    fn test_person_view_carries_client_reference() {
        let client = sample_client();
        let view = PersonView::from(&sample_person(&client));

        assert_eq!(view.full_name, "Jane Doe");
        assert_eq!(view.client_id, client.id);
        assert_eq!(view.client_name, "ABC Corp");
        assert_eq!(view.ownership_percentage, Some(dec!(40)));
    }

    #[test]
    fn test_client_view_json_shape() {
        let client = sample_client();
        let value = serde_json::to_value(ClientView::from_entity(&client)).unwrap();

        assert_eq!(value["clientType"], json!("COMPANY"));
        assert_eq!(value["riskLevel"], json!("MEDIUM"));
        assert_eq!(value["registrationNumber"], json!("J40/1/2020"));
        assert_eq!(value["persons"], json!(null));
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_person_view_json_shape() {
        let client = sample_client();
        let value = serde_json::to_value(PersonView::from_entity(&sample_person(&client))).unwrap();

        assert_eq!(value["relationshipType"], json!("BENEFICIAL_OWNER"));
        assert_eq!(value["fullName"], json!("Jane Doe"));
        assert_eq!(value["clientName"], json!("ABC Corp"));
        assert_eq!(value["dateOfBirth"], json!("1985-06-15"));
    }

    #[test]
    fn test_list_conversions_preserve_order() {
        let first = sample_client();
        let second = sample_client();
        let views = ClientView::from_list(&[first.clone(), second.clone()]);
        assert_eq!(views.iter().map(|v| v.id).collect::<Vec<_>>(), vec![first.id, second.id]);
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_validation_happens_on_normalized_request() {
        let request = CreateClientRequest {
            email: Some("   ".to_string()),
            ..CreateClientRequest::new("ABC Corp", ClientType::Company)
        }
        .normalized();
        assert!(RequestValidator::validate_client(&request).is_valid);
    }

    #[test]
    fn test_future_birth_date_is_warning() {
        let request = CreatePersonRequest {
            date_of_birth: Some((Utc::now() + Duration::days(30)).date_naive()),
            ..CreatePersonRequest::new(ClientId::new(), "Jane", "Doe", RelationshipType::Owner)
        };
        let result = RequestValidator::validate_person(&request);
        assert!(result.is_valid);
        assert_eq!(result.warnings, vec!["Date of birth is in the future".to_string()]);
    }

    #[test]
    fn test_person_email_is_validated() {
        let request = CreatePersonRequest {
            email: Some("jane@".to_string()),
            ..CreatePersonRequest::new(ClientId::new(), "Jane", "Doe", RelationshipType::Owner)
        };
        let error = RequestValidator::validate_person(&request).into_result().unwrap_err();
        assert!(error.to_string().contains("email"));
    }

    #[test]
    fn test_unknown_enum_values_rejected() {
        assert!("SUPER_HIGH".parse::<RiskLevel>().is_err());
        assert!("GUARANTOR".parse::<RelationshipType>().is_err());
        assert!(serde_json::from_value::<ClientType>(json!("company")).is_err());
    }
}
