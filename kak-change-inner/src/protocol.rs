//! Protocol used to talk back to Kakoune.
//!
//! Kakoune runs the binary from a shell expansion and evaluates whatever it prints.

pub mod response;
