//! Inbound adapters translating HTTP requests into domain service calls.

pub mod http;
