//! Multi-tenant company and user directory.
//!
//! Layout follows ports and adapters: [`domain`] holds the model, access
//! policy and use-cases; [`inbound`] exposes them over HTTP; [`outbound`]
//! provides storage and security adapters.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
