// This file is required to make `cargo test` discover tests in subdirectories.

#[cfg(test)]
mod bbcode;

#[cfg(test)]
mod chat;

#[cfg(test)]
mod document;

#[cfg(test)]
mod markdown;
