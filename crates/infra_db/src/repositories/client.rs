//! PostgreSQL client repository
//!
//! Name ordering uses the "C" collation so results are byte-wise and do not
//! depend on the server locale.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    current_timestamp, ClientId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_kyc::{Client, ClientQuery, ClientRepository, ClientType, NewClient, RiskLevel};

use crate::error::to_port_error;
use crate::repositories::check_pool;
use crate::repositories::types::{ClientRow, DbClientType, DbRiskLevel};

const CLIENT_COLUMNS: &str = "id, name, client_type, email, phone, registration_number, \
                              risk_level, created_at, updated_at";

const CREATION_ORDER: &str = "created_at, id";

/// PostgreSQL-backed implementation of [`ClientRepository`]
#[derive(Debug, Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a new repository over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_all(&self, sql: &str, bind: Option<QueryArg>) -> Result<Vec<Client>, PortError> {
        let mut query = sqlx::query_as::<_, ClientRow>(sql);
        query = match bind {
            Some(QueryArg::RiskLevel(level)) => query.bind(level),
            Some(QueryArg::ClientType(client_type)) => query.bind(client_type),
            None => query,
        };
        let rows = query.fetch_all(&self.pool).await.map_err(to_port_error)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }
}

/// Single bind parameter for the filtered listings
enum QueryArg {
    RiskLevel(DbRiskLevel),
    ClientType(DbClientType),
}

fn select_sql(predicate: &str, order_by: &str) -> String {
    format!(
        "SELECT {} FROM clients WHERE {} ORDER BY {}",
        CLIENT_COLUMNS, predicate, order_by
    )
}

impl DomainPort for PostgresClientRepository {}

#[async_trait]
impl HealthCheckable for PostgresClientRepository {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-client-repository").await
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    #[instrument(skip(self), fields(client_id = %id))]
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        let sql = select_sql("id = $1", "id");
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(to_port_error)?;
        Ok(row.map(Client::from))
    }

    async fn exists_by_id(&self, id: ClientId) -> Result<bool, PortError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)")
            .bind(*id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(to_port_error)
    }

    #[instrument(skip(self, client), fields(name = %client.name))]
    async fn insert(&self, client: NewClient) -> Result<Client, PortError> {
        let client = client.into_client(ClientId::new_v7(), current_timestamp());
        debug!(client_id = %client.id, "Inserting client");

        let sql = format!(
            "INSERT INTO clients ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            CLIENT_COLUMNS, CLIENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(*client.id.as_uuid())
            .bind(&client.name)
            .bind(DbClientType::from(client.client_type))
            .bind(&client.email)
            .bind(&client.phone)
            .bind(&client.registration_number)
            .bind(DbRiskLevel::from(client.risk_level))
            .bind(client.created_at)
            .bind(client.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(to_port_error)?;
        Ok(row.into())
    }

    #[instrument(skip(self, client), fields(client_id = %client.id))]
    async fn save(&self, client: &Client) -> Result<Client, PortError> {
        // updated_at must move strictly forward even if the clock has not.
        let sql = format!(
            "UPDATE clients SET name = $2, client_type = $3, email = $4, phone = $5, \
             registration_number = $6, risk_level = $7, \
             updated_at = GREATEST($8, updated_at + INTERVAL '1 microsecond') \
             WHERE id = $1 RETURNING {}",
            CLIENT_COLUMNS
        );
        let row = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(*client.id.as_uuid())
            .bind(&client.name)
            .bind(DbClientType::from(client.client_type))
            .bind(&client.email)
            .bind(&client.phone)
            .bind(&client.registration_number)
            .bind(DbRiskLevel::from(client.risk_level))
            .bind(current_timestamp())
            .fetch_optional(&self.pool)
            .await
            .map_err(to_port_error)?;

        row.map(Client::from)
            .ok_or_else(|| PortError::not_found("Client", client.id))
    }

    async fn find_all(&self) -> Result<Vec<Client>, PortError> {
        self.fetch_all(&select_sql("TRUE", CREATION_ORDER), None).await
    }

    async fn find_by_risk_level(&self, risk_level: RiskLevel) -> Result<Vec<Client>, PortError> {
        let sql = select_sql("risk_level = $1", CREATION_ORDER);
        self.fetch_all(&sql, Some(QueryArg::RiskLevel(risk_level.into()))).await
    }

    async fn find_by_risk_level_order_by_name_asc(
        &self,
        risk_level: RiskLevel,
    ) -> Result<Vec<Client>, PortError> {
        let sql = select_sql("risk_level = $1", "name COLLATE \"C\", id");
        self.fetch_all(&sql, Some(QueryArg::RiskLevel(risk_level.into()))).await
    }

    async fn find_by_client_type(&self, client_type: ClientType) -> Result<Vec<Client>, PortError> {
        let sql = select_sql("client_type = $1", CREATION_ORDER);
        self.fetch_all(&sql, Some(QueryArg::ClientType(client_type.into()))).await
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &ClientQuery) -> Result<Vec<Client>, PortError> {
        let sql = select_sql(
            "($1::text IS NULL OR strpos(lower(name), lower($1)) > 0) \
             AND ($2::client_type IS NULL OR client_type = $2) \
             AND ($3::risk_level IS NULL OR risk_level = $3)",
            CREATION_ORDER,
        );
        let rows = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(query.name.as_deref())
            .bind(query.client_type.map(DbClientType::from))
            .bind(query.risk_level.map(DbRiskLevel::from))
            .fetch_all(&self.pool)
            .await
            .map_err(to_port_error)?;
        debug!(count = rows.len(), "Client search completed");
        Ok(rows.into_iter().map(Client::from).collect())
    }
}
