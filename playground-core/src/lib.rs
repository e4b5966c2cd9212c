//! Playground Core
//!
//! Core types shared by the playground client and CLI.
//!
//! This crate contains:
//! - Domain types: asynchronous jobs, generic resources, permissions, ids
//! - DTOs: request bodies sent to the backend API

pub mod domain;
pub mod dto;
