//! Core systems for Prism Stage.
//!
//! This crate provides the shared foundations of the Prism Stage toolkit:
//!
//! - **Signal/Slot System**: type-safe pub/sub used by sprites and the
//!   audio engine to announce clicks, value changes and playback
//!   transitions
//! - **Logging**: `tracing` target constants and a scope timer
//!
//! # Signal/Slot Example
//!
//! ```
//! use prism_stage_core::Signal;
//!
//! let clicked = Signal::<()>::new();
//!
//! let conn_id = clicked.connect(|_| {
//!     println!("clicked!");
//! });
//!
//! clicked.emit(());
//! clicked.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
