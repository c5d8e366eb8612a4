//! Chat dialect tests
//!
//! cf and Discord output: emphasis markers and flattened links.

mod cf;
mod discord;
