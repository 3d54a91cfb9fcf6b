//! Outbound boundary to the IME engine.
//!
//! The controller never talks to the engine directly; it goes through an
//! [`EngineBoundary`]. How the calls travel (worker thread, socket, in-process
//! library) is up to the implementation. Calls may fail, and failures come
//! back as `anyhow::Error`.
//!
//! Calls have no timeout. A call that never resolves keeps the calling
//! protocol suspended for good.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait EngineBoundary: Send + Sync {
    /// Set a boolean option, or enable/disable a variant id.
    async fn set_option(&self, option: &str, value: bool) -> Result<()>;

    /// Activate a schema.
    async fn set_ime(&self, schema_id: &str) -> Result<()>;
}

#[async_trait]
impl<T: EngineBoundary + ?Sized> EngineBoundary for Arc<T> {
    async fn set_option(&self, option: &str, value: bool) -> Result<()> {
        (**self).set_option(option, value).await
    }

    async fn set_ime(&self, schema_id: &str) -> Result<()> {
        (**self).set_ime(schema_id).await
    }
}
