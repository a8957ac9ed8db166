//! Row structs mapping database tables onto domain types.

pub mod movie;
