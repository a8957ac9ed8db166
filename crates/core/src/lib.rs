//! Pure domain logic for the movie catalog.
//!
//! Nothing in this crate performs I/O: the runtime codec, the movie record
//! and its JSON projection, and the validation check-list all operate on
//! in-memory values.

pub mod error;
pub mod movie;
pub mod pagination;
pub mod runtime;
pub mod types;
pub mod validation;
