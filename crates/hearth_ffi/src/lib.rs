//! Flutter-facing FFI crate for Hearth.

pub mod api;
