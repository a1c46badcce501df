//! Configuration loading
//!
//! Reads a TOML file when one is given, otherwise the default configuration
//! compiled into the binary. Either way the result is validated before any
//! component is built.

pub mod loader;

pub use loader::load;
