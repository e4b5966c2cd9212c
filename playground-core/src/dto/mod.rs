//! Data Transfer Objects for the backend API
//!
//! Request bodies sent by the client. Field names are serialized in the
//! camelCase form the API expects; optional fields are omitted when unset.

pub mod database;
pub mod function;
pub mod storage;
pub mod user;
