//! Console output
//!
//! Colored status lines and pretty-printed JSON responses. Responses go to
//! stdout; diagnostics go through `tracing` on stderr.

use colored::*;
use serde::Serialize;
use tracing::warn;

pub fn info(message: &str) {
    println!("{}", message.truecolor(0x56, 0xc5, 0xfd).bold());
}

pub fn success(message: &str) {
    println!("{}", message.truecolor(0x59, 0xf6, 0x8c).bold());
}

pub fn warning(message: &str) {
    println!("{}", message.truecolor(0xf1, 0xf8, 0x9b).bold());
}

pub fn danger(message: &str) {
    eprintln!("{}", message.truecolor(0xfe, 0x5c, 0x56).bold());
}

/// Print a response as indented JSON
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{}", pretty),
        Err(e) => warn!("Failed to render response: {}", e),
    }
}
