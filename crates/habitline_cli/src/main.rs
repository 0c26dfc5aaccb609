//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitline_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Why: a tiny probe validates core crate wiring independently from the
    // mobile/FFI runtime setup.
    println!("habitline_core ping={}", habitline_core::ping());
    println!("habitline_core version={}", habitline_core::core_version());
}
