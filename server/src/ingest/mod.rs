//! Webhook Ingestion
//!
//! The receive path for inbound Telegram updates: secret gating, JSON
//! validation, durable enqueue, wakeup, and control-command routing.

pub mod handlers;
pub mod update;
