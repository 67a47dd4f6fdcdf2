//! Storage abstraction for persistence.
//!
//! A backend is a small key-value store of text blobs. The board and the
//! two sticky preferences each live under their own key.

mod file;
mod memory;
mod persistence;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persistence::{
    ACTIVE_TAB_KEY, BOARD_KEY, Persistence, THEME_KEY, create_default_storage,
};

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for key-value storage backends.
pub trait Storage: Send + Sync {
    /// Store text under a key, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Read the text stored under a key.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Remove a key. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
