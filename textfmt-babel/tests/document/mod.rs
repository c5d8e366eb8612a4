//! Document facade tests
//!
//! Construction from every input format, every accessor, and sanitizing.

mod facade;
mod sanitize;
