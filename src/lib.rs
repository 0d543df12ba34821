//! cursor-id-reset library
//!
//! Reads and regenerates the telemetry identifiers Cursor keeps in
//! `globalStorage/storage.json`, and stops or restarts the IDE.
//!
//! # Disclaimer
//!
//! This tool is not affiliated with or endorsed by Anysphere, Inc. (Cursor).
//! It only modifies locally stored files on your machine.

pub mod config;
pub mod cursor;
pub mod error;
