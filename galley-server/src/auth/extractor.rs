//! Authenticated staff extractor
//!
//! Validates the bearer token and resolves the role string into the closed
//! [`StaffRole`] set before any handler runs. Role/permission decisions
//! downstream work on the enum, never on raw strings.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::order::StaffRole;

use super::jwt::{Claims, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// The staff member behind the current request
#[derive(Debug, Clone)]
pub struct CurrentStaff {
    /// Staff ID ("staff:key")
    pub id: String,
    pub name: String,
    pub role: StaffRole,
}

impl CurrentStaff {
    fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let role = StaffRole::parse(&claims.role)
            .ok_or_else(|| AppError::forbidden(format!("Unknown role '{}'", claims.role)))?;
        Ok(Self {
            id: claims.sub,
            name: claims.name,
            role,
        })
    }
}

impl FromRequestParts<ServerState> for CurrentStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse an earlier extraction on the same request
        if let Some(staff) = parts.extensions.get::<CurrentStaff>() {
            return Ok(staff.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or(AppError::InvalidToken)?,
            None => {
                tracing::warn!(uri = ?parts.uri, "Request without authorization header");
                return Err(AppError::Unauthorized);
            }
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let staff = CurrentStaff::from_claims(claims)?;
                parts.extensions.insert(staff.clone());
                Ok(staff)
            }
            Err(JwtError::ExpiredToken) => Err(AppError::InvalidToken),
            Err(e) => {
                tracing::warn!(error = %e, uri = ?parts.uri, "Token validation failed");
                Err(AppError::InvalidToken)
            }
        }
    }
}
