//! Operation dispatch: argument validation, envelopes and the dispatcher

pub mod arguments;
pub mod dispatcher;
pub mod envelope;

pub use arguments::validate_arguments;
pub use dispatcher::Dispatcher;
pub use envelope::{ErrorDescriptor, ExecutionRequest, ExecutionResponse};
