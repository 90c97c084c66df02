//! Network layer - HTTP request execution
//!
//! The dispatcher sends one built request per call and hands back a
//! formatted result. Callers that must not block run it through
//! [`Dispatcher::spawn`] and await the handle where they render.

pub mod client;

pub use client::{join_result, pretty_json, DispatchConfig, DispatchResult, Dispatcher};
