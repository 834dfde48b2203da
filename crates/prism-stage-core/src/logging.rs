//! Logging facilities for Prism Stage.
//!
//! Prism Stage uses the `tracing` crate for instrumentation. The toolkit
//! never installs a subscriber itself; do that in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! The [`targets`] constants can be used with `tracing` filter directives
//! to narrow logs to a subsystem, e.g.
//! `RUST_LOG=prism_stage::scene=trace,prism_stage_multimedia=debug`.

use std::time::Instant;

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "prism_stage_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "prism_stage_core::signal";
    /// Scene dispatch and hit testing target.
    pub const SCENE: &str = "prism_stage::scene";
    /// Pointer/touch tracking target.
    pub const INPUT: &str = "prism_stage::input";
    /// Audio sprite engine target.
    pub const AUDIO: &str = "prism_stage_multimedia";
}

/// A scope timer that logs its elapsed wall time when dropped.
///
/// Useful for coarse profiling of per-frame work without wiring a full
/// profiler.
///
/// # Example
///
/// ```
/// use prism_stage_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("dispatch");
///     // ... timed work ...
/// } // logs "dispatch took ..." at debug level here
/// ```
pub struct PerfSpan {
    name: &'static str,
    start: Instant,
}

impl PerfSpan {
    /// Start timing a named operation.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Elapsed time since the span started.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfSpan {
    fn drop(&mut self) {
        tracing::debug!(
            target: "prism_stage_core",
            name = self.name,
            elapsed_us = self.start.elapsed().as_micros() as u64,
            "perf span finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perf_span_measures_time() {
        let span = PerfSpan::new("test_operation");
        assert!(span.elapsed().as_nanos() < u128::MAX);
    }
}
