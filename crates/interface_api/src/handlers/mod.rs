//! Request handlers

pub mod clients;
pub mod debug;
pub mod health;
pub mod persons;

use core_kernel::ClientId;

use crate::error::ApiError;

/// Parses a client id path segment, with or without its `CLI-` prefix
pub(crate) fn parse_client_id(raw: &str) -> Result<ClientId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid client ID: {}", raw)))
}
