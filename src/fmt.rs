//! Logging shim
//!
//! Forwards to `defmt` when the `defmt` feature is enabled and compiles to
//! nothing otherwise, so diagnostics cost no flash on builds without a logger.
//! The fallbacks still borrow their arguments so that values only used for
//! logging do not trigger unused warnings.

#![allow(unused_macros, unused_imports)]

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, trace, warn};

#[cfg(not(feature = "defmt"))]
macro_rules! trace_ {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($(&$x,)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug_ {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($(&$x,)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn_ {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($(&$x,)*);
    }};
}

#[cfg(not(feature = "defmt"))]
pub(crate) use {debug_ as debug, trace_ as trace, warn_ as warn};
