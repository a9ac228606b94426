//! Tower of Hanoi HTTP game server.
//!
//! The transport adapter around [`hanoi_engine`]: an axum JSON API
//! that exposes game snapshots and accepts move, reset, start, and
//! advance requests from a browser client. The engine is the single
//! authority; the client renders snapshots and never decides legality.
//!
//! # Architecture
//!
//! - **Api**: routes, request/response types, error-to-status mapping
//! - **Session**: one independent [`hanoi_engine::RoundController`]
//!   per session, mutated under a lock
//! - **Config**: TOML file + CLI overrides

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
mod config;
mod session;

pub use api::{ApiState, ErrorBody, MoveRequest, ResetRequest, StateResponse, router};
pub use config::{ConfigError, ServerConfig};
pub use session::{DEFAULT_SESSION, GameSession, SessionId, SessionManager};
