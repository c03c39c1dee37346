//! Taskboard: an in-memory task board served over HTTP.
//!
//! Layers, leaf first: [`storage`] owns the tasks, [`service`] normalizes
//! input and shapes reads, [`api`] maps it all onto axum routes.

pub mod api;
pub mod cli;
pub mod error;
pub mod service;
pub mod storage;
