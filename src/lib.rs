//! # ambimon
//!
//! Request/response client for serial-line ambient monitors:
//! - Current temperature and humidity
//! - Device-tracked extremes and their reset
//! - Reply polling bounded by a configurable timeout
//! - Structural reply validation with device error reporting
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AmbientClient                          │
//! │      flush → write → await_reply → read → validate          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Protocol   │          │  Transport  │
//!   │ (text codec)│          │   (trait)   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                      ┌────────────┴────────────┐
//!                      ▼                         ▼
//!               ┌─────────────┐          ┌─────────────┐
//!               │     TCP     │          │    Mock     │
//!               │  (bridge)   │          │ (scripted)  │
//!               └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod transport;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{AmbientError, ProtocolError, Result};
pub use config::Config;
pub use client::AmbientClient;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ambimon
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
