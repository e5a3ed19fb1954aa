//! Server host and exposure layers

pub mod exposure;
pub mod host;

pub use exposure::GraphQLExposure;
pub use host::ServerHost;
