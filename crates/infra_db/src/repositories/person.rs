//! PostgreSQL person repository
//!
//! Every read joins `clients` so the returned persons carry their client's
//! current name.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use core_kernel::{
    current_timestamp, ClientId, DomainPort, HealthCheckResult, HealthCheckable, PersonId,
    PortError,
};
use domain_kyc::{ClientRef, NewPerson, Person, PersonRepository, RelationshipType};

use crate::error::to_port_error;
use crate::repositories::check_pool;
use crate::repositories::types::{DbRelationshipType, PersonRow};

const PERSON_COLUMNS: &str = "p.id, p.client_id, c.name AS client_name, p.first_name, \
                              p.last_name, p.email, p.phone, p.date_of_birth, p.nationality, \
                              p.identification_number, p.relationship_type, p.position_title, \
                              p.ownership_percentage, p.address, p.created_at, p.updated_at";

fn select_sql(predicate: &str) -> String {
    format!(
        "SELECT {} FROM persons p JOIN clients c ON c.id = p.client_id \
         WHERE {} ORDER BY p.created_at, p.id",
        PERSON_COLUMNS, predicate
    )
}

/// PostgreSQL-backed implementation of [`PersonRepository`]
#[derive(Debug, Clone)]
pub struct PostgresPersonRepository {
    pool: PgPool,
}

impl PostgresPersonRepository {
    /// Creates a new repository over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PostgresPersonRepository {}

#[async_trait]
impl HealthCheckable for PostgresPersonRepository {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-person-repository").await
    }
}

#[async_trait]
impl PersonRepository for PostgresPersonRepository {
    #[instrument(skip(self), fields(person_id = %id))]
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, PortError> {
        let sql = select_sql("p.id = $1");
        let row = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(to_port_error)?;
        Ok(row.map(Person::from))
    }

    #[instrument(skip(self), fields(client_id = %client_id))]
    async fn find_by_client_id(&self, client_id: ClientId) -> Result<Vec<Person>, PortError> {
        let sql = select_sql("p.client_id = $1");
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(*client_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(to_port_error)?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn find_by_relationship_type(
        &self,
        relationship_type: RelationshipType,
    ) -> Result<Vec<Person>, PortError> {
        let sql = select_sql("p.relationship_type = $1");
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(DbRelationshipType::from(relationship_type))
            .fetch_all(&self.pool)
            .await
            .map_err(to_port_error)?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_full_name_containing(&self, fragment: &str) -> Result<Vec<Person>, PortError> {
        let sql = select_sql("strpos(lower(p.first_name || ' ' || p.last_name), lower($1)) > 0");
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(fragment)
            .fetch_all(&self.pool)
            .await
            .map_err(to_port_error)?;
        debug!(count = rows.len(), "Person name search completed");
        Ok(rows.into_iter().map(Person::from).collect())
    }

    #[instrument(skip(self, person), fields(client_id = %person.client_id))]
    async fn insert(&self, person: NewPerson) -> Result<Person, PortError> {
        let mut tx = self.pool.begin().await.map_err(to_port_error)?;

        // Holds the client row until commit so it cannot vanish under the insert.
        let owner: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM clients WHERE id = $1 FOR SHARE")
                .bind(*person.client_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(to_port_error)?;

        let Some((client_uuid, client_name)) = owner else {
            warn!("Client not found, rolling back person insert");
            tx.rollback().await.map_err(to_port_error)?;
            return Err(PortError::not_found("Client", person.client_id));
        };

        let client = ClientRef {
            id: ClientId::from(client_uuid),
            name: client_name,
        };
        let person = person.into_person(PersonId::new_v7(), client, current_timestamp());

        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            WITH inserted AS (
                INSERT INTO persons (
                    id, client_id, first_name, last_name, email, phone, date_of_birth,
                    nationality, identification_number, relationship_type, position_title,
                    ownership_percentage, address, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                RETURNING *
            )
            SELECT p.id, p.client_id, $16::text AS client_name, p.first_name, p.last_name,
                   p.email, p.phone, p.date_of_birth, p.nationality, p.identification_number,
                   p.relationship_type, p.position_title, p.ownership_percentage, p.address,
                   p.created_at, p.updated_at
            FROM inserted p
            "#,
        )
        .bind(*person.id.as_uuid())
        .bind(*person.client.id.as_uuid())
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.email)
        .bind(&person.phone)
        .bind(person.date_of_birth)
        .bind(&person.nationality)
        .bind(&person.identification_number)
        .bind(DbRelationshipType::from(person.relationship_type))
        .bind(&person.position_title)
        .bind(person.ownership_percentage)
        .bind(&person.address)
        .bind(person.created_at)
        .bind(person.updated_at)
        .bind(&person.client.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(to_port_error)?;

        tx.commit().await.map_err(to_port_error)?;

        debug!(person_id = %person.id, "Person inserted");
        Ok(row.into())
    }
}
