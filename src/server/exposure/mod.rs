//! API exposure modules
//!
//! Each exposure type consumes a `ServerHost` and produces a router for
//! that protocol. The host stays transport-agnostic, so exposures can be
//! added or replaced without touching the dispatch core.

pub mod graphql;

pub use graphql::GraphQLExposure;
