//! CLI commands

pub mod open_dir;
pub mod reset;
pub mod restart;
pub mod show;
pub mod smart;
pub mod utils;

#[cfg(test)]
pub mod testing;
