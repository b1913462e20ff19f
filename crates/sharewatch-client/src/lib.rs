//! # sharewatch-client
//!
//! Collaborator interfaces for the Sharewatch auditor:
//!
//! - [`Session`] — establishes an authenticated session against the cloud
//!   tenant (client-certificate, username/password or device-code sign-in)
//! - [`AuditSource`] — the unified audit log query contract, implemented
//!   over HTTPS by [`Session`] and in memory by [`StaticSource`]
//!
//! Both failure classes are explicit: [`AuthError`] is fatal and aborts a
//! run before any fetch, [`QueryError`] is recoverable per batch.

pub mod auth;
pub mod error;
pub mod source;

pub use auth::Session;
pub use error::{AuthError, QueryError};
pub use source::{AuditSource, StaticSource, SHARING_OPERATIONS};
