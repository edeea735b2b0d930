//! Authentication
//!
//! Bearer-token validation only; login and session handling belong to the
//! external auth collaborator.

pub mod extractor;
pub mod jwt;

pub use extractor::CurrentStaff;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
