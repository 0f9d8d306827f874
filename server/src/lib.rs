//! Relay Server
//!
//! Webhook ingress for an external agent loop: durably queues every inbound
//! Telegram update as one JSONL line, nudges the agent over a named pipe,
//! and relays out-of-band cancellation requests. The agent loop itself runs
//! as a separate process and only shares the filesystem with this server.

pub mod access;
pub mod api;
pub mod config;
pub mod ingest;
pub mod queue;
pub mod signal;
pub mod telegram;
