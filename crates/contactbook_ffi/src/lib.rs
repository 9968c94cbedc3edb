//! Flutter-facing FFI crate for Contactbook.

pub mod api;
