//! Resolver trait and adapters
//!
//! A resolver is the unit of logic bound to an operation. It receives the
//! validated argument payload and produces a raw result value. Resolvers are
//! opaque to the dispatcher: any I/O they perform is their own concern, and
//! the dispatcher only awaits their completion.

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

/// A unit of logic bound to an operation.
///
/// Implementations return `anyhow::Result` so they can surface any error
/// type; the dispatcher wraps failures at its boundary. Resolvers are
/// assumed non-idempotent and are never retried.
///
/// # Example
///
/// ```rust,ignore
/// struct TaskResolver;
///
/// #[async_trait]
/// impl Resolver for TaskResolver {
///     async fn resolve(&self, _arguments: Value) -> anyhow::Result<Value> {
///         Ok(json!({"id": "1"}))
///     }
/// }
/// ```
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Produce a result for the given argument payload.
    async fn resolve(&self, arguments: Value) -> anyhow::Result<Value>;
}

/// Adapter that turns an async closure into a [`Resolver`].
///
/// ```rust,ignore
/// let resolver = FnResolver::new(|_args| async { Ok(json!({"id": "1"})) });
/// ```
pub struct FnResolver<F> {
    f: F,
}

impl<F, Fut> FnResolver<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Resolver for FnResolver<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Value>> + Send,
{
    async fn resolve(&self, arguments: Value) -> anyhow::Result<Value> {
        (self.f)(arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_resolver_passes_arguments_through() {
        let resolver = FnResolver::new(|args: Value| async move {
            Ok(json!({ "echo": args }))
        });

        let result = resolver
            .resolve(json!({"id": 7}))
            .await
            .expect("resolve should succeed");
        assert_eq!(result["echo"]["id"], 7);
    }

    #[tokio::test]
    async fn test_fn_resolver_propagates_errors() {
        let resolver =
            FnResolver::new(|_args: Value| async { anyhow::bail!("backend unavailable") });

        let err = resolver
            .resolve(Value::Null)
            .await
            .expect_err("resolve should fail");
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[tokio::test]
    async fn test_fn_resolver_is_object_safe() {
        let resolver: Box<dyn Resolver> =
            Box::new(FnResolver::new(|_args: Value| async { Ok(json!(1)) }));
        let result = resolver.resolve(Value::Null).await.expect("should resolve");
        assert_eq!(result, json!(1));
    }
}
