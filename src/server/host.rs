//! Server host for transport-agnostic API exposure
//!
//! The host owns the frozen schema registry and the dispatcher built over
//! it. It is constructed once at startup and passed by `Arc` to whichever
//! exposure serves it; exposures are interchangeable because the host knows
//! nothing about transports.

use crate::dispatch::Dispatcher;
use crate::schema::registry::SchemaRegistry;
use std::sync::Arc;

/// Host context containing all framework state.
///
/// # Example
///
/// ```rust,ignore
/// let registry = SchemaBuilder::new()
///     .register_type(task_type)?
///     .query("task", "Task", vec![], task_resolver)?
///     .build()?;
///
/// let host = Arc::new(ServerHost::new(registry));
/// let app = GraphQLExposure::build_router(host)?;
/// ```
pub struct ServerHost {
    /// The frozen schema registry
    pub registry: Arc<SchemaRegistry>,

    /// Dispatcher bound to the registry
    pub dispatcher: Dispatcher,
}

impl ServerHost {
    /// Build the host from a frozen registry.
    pub fn new(registry: SchemaRegistry) -> Self {
        let registry = Arc::new(registry);
        let dispatcher = Dispatcher::new(registry.clone());
        Self {
            registry,
            dispatcher,
        }
    }

    /// Check if the host has any operations to serve.
    pub fn is_ready(&self) -> bool {
        self.registry.operation_count() > 0
    }
}
