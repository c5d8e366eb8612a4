//! BBCode format tests
//!
//! Rendering (BBCode → HTML) through the default tag registry, and the
//! HTML → BBCode reduction.

mod reduce;
mod render;
