//! Scheduler layer for the playground
//!
//! Waits on server-side asynchronous jobs (deployment builds and
//! asynchronous executions) until they reach a terminal status.

pub mod poller;

pub use poller::CompletionPoller;
