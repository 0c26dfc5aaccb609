//! FFI crate wiring the habitline core to the mobile UI runtime.

pub mod api;
