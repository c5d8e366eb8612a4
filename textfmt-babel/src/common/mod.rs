//! Helpers shared by several formats: HTML tree access and link rewriting.

pub mod dom;
pub mod links;
