//! Tracing spans for the long-running operations.

use tracing::{info_span, Span};

/// Span covering one toolkit generation.
pub fn generate_span(toolkit: &str, domain: &str) -> Span {
    info_span!("generate", toolkit = %toolkit, domain = %domain)
}

/// Span covering one template sync run.
pub fn sync_span(source: &str) -> Span {
    info_span!("sync", source = %source)
}

/// Span covering a dispatched toolkit command.
pub fn toolkit_span(toolkit: &str, command: &str) -> Span {
    info_span!("toolkit", name = %toolkit, command = %command)
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn with_subscriber<F>(f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_nested_spans() {
        with_subscriber(|| {
            let generate = generate_span("my-spec-kit", "generic");
            let _g1 = generate.enter();
            let toolkit = toolkit_span("spec-kit", "init");
            let _g2 = toolkit.enter();
            tracing::info!("nested operation");
        });
    }

    #[test]
    fn test_timed_macro() {
        with_subscriber(|| {
            let result = crate::timed!("macro_test", { "success" });
            assert_eq!(result, "success");
        });
    }
}
