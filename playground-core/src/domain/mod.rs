//! Core domain types
//!
//! This module contains the domain structures shared between the HTTP client
//! (which decodes them) and the CLI workflow (which prints and polls them).

pub mod id;
pub mod job;
pub mod permission;
pub mod resource;
