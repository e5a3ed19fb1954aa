//! # Refract
//!
//! A schema-driven query and mutation dispatch framework.
//!
//! Refract holds an explicit in-memory schema: named types with ordered
//! field declarations, and operations bound to resolvers. Incoming requests
//! name an operation, carry an argument payload and a field selection; the
//! dispatcher validates the arguments structurally, invokes the resolver
//! and prunes the raw result down to exactly the requested fields.
//!
//! ## Features
//!
//! - **Explicit schema registry**: types and operations registered through
//!   a builder, validated at startup, immutable afterwards
//! - **Separate namespaces**: the same operation name may exist once as a
//!   query and once as a mutation
//! - **Structural argument validation**: scalar/object/list shape checks
//!   with precise error paths
//! - **Response shaping**: selections prune results recursively, with
//!   strict non-null semantics
//! - **Cooperative cancellation**: in-flight dispatches stop waiting when
//!   the caller's token fires
//! - **Transport-agnostic host**: the bundled HTTP exposure parses GraphQL
//!   query text; other transports can marshal into the same envelope
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use refract::prelude::*;
//!
//! let registry = SchemaBuilder::new()
//!     .register_type(
//!         TypeDescriptor::new("Task")
//!             .with_field(FieldDescriptor::scalar("id", ScalarType::Id).non_null()),
//!     )?
//!     .query("task", "Task", vec![], FnResolver::new(|_args| async {
//!         Ok(json!({"id": "1"}))
//!     }))?
//!     .build()?;
//!
//! let host = Arc::new(ServerHost::new(registry));
//! let app = GraphQLExposure::build_router(host)?;
//! ```

pub mod config;
pub mod core;
pub mod dispatch;
pub mod schema;
pub mod server;
pub mod shape;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            DispatchError, RefractError, RefractResult, RegistrationError, ResolverError,
            ShapingError,
        },
        resolver::{FnResolver, Resolver},
        value::ValueKind,
    };

    // === Schema ===
    pub use crate::schema::{
        ArgumentDescriptor, FieldDescriptor, FieldKind, OperationBinding, OperationKind,
        ScalarType, SchemaBuilder, SchemaRegistry, TypeDescriptor,
    };

    // === Dispatch ===
    pub use crate::dispatch::{
        Dispatcher, ErrorDescriptor, ExecutionRequest, ExecutionResponse,
    };

    // === Shaping ===
    pub use crate::shape::{Selection, SelectionSet, shape};

    // === Config ===
    pub use crate::config::{ConfigError, SchemaConfig};

    // === Server ===
    pub use crate::server::{GraphQLExposure, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;
    pub use tokio_util::sync::CancellationToken;
}
