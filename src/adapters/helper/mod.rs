//! OneNote helper bridge
//!
//! Implements [`crate::adapters::NotebookAutomation`] on top of the external
//! helper program that hosts OneNote's COM API.

pub mod client;
pub mod models;

pub use client::{candidate_paths, HelperClient, HELPER_EXECUTABLE};
pub use models::{RpcRequest, RpcResponse};
