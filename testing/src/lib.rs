pub mod article;
pub mod mock;

/// Asserts at compile time that the type may be shared across threads.
pub fn is_send_sync<T: Send + Sync>(_: &T) {}
