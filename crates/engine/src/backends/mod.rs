//! Engine backend implementations.
//!
//! A backend implements the query traits over some store of process data.
//! The crate ships the in-memory backend, which doubles as the reference
//! implementation of the query semantics and as the test engine for the
//! layers built on top.

pub mod memory;
