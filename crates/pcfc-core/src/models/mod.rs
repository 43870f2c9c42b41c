//! Data models shared by the extractors and the transport layer.

pub mod config;
pub mod result;
