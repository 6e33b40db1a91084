//! Core library components.
//!
//! Detection, traversal, decryption and matching, independent of the
//! command-line front end.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod detect;
pub mod matcher;
pub mod report;
pub mod secret;
pub mod walk;
