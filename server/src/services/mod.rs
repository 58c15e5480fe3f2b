//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own store access, timers, and logging so route handlers
//! can stay focused on request parsing and status mapping.

pub mod call;
pub mod chat;
pub mod playground;
pub mod topic;
