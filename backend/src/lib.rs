//! Q&A forum backend.
//!
//! Hexagonal layout: [`domain`] holds entities, vote and acceptance rules
//! and the services behind the driving ports; [`inbound`] exposes them over
//! HTTP; [`outbound`] provides PostgreSQL and in-memory repositories plus
//! password hashing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
