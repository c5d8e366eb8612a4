//! Markdown format tests
//!
//! Tests for Markdown → HTML (comrak) and HTML → Markdown (tree walker).

mod export;
mod import;
