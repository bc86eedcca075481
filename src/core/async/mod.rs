//! Asynchronous coordination of store writers
//!
//! The synchronous `ResponseStore` is safe for one writer. This module adds
//! the in-process single-writer discipline needed when several tasks or
//! threads submit responses at once:
//!
//! - **AppendQueue**: serializes appends through one worker that owns the store

pub mod append_queue;

pub use append_queue::AppendQueue;
