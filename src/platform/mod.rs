//! Platform abstraction layer
//!
//! Browser-only pieces:
//! - `storage`: LocalStorage-backed [`crate::KeyValueStore`]
//! - `web`: requestAnimationFrame loop, keyboard/touch input, JS bindings
//!
//! Native builds drive [`crate::App`] directly (see the headless runner).

#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;
