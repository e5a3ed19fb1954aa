//! Core module containing fundamental traits and types for the framework

pub mod error;
pub mod resolver;
pub mod value;

pub use error::{
    DispatchError, RefractError, RefractResult, RegistrationError, ResolverError, ShapingError,
};
pub use resolver::{FnResolver, Resolver};
pub use value::ValueKind;
