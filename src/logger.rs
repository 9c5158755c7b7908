//! Pluggable debug logging for request and response traces.
//!
//! The geocoder writes one line with the rendered request URI and one with the
//! raw response body for every call. Where those lines go is up to the caller:
//! install a static [`Logger`], or a resolver that picks a logger from the
//! per-call [`http::Extensions`].

use http::Extensions;
use std::fmt;
use std::sync::Arc;

/// Sink for the geocoder's debug traces.
pub trait Logger: Send + Sync {
    /// Records a debug message.
    fn debug(&self, message: fmt::Arguments<'_>);
}

/// Picks a logger for a single call from its request-scoped extensions.
pub type LoggerResolver = Arc<dyn Fn(&Extensions) -> Option<Arc<dyn Logger>> + Send + Sync>;

/// A [`Logger`] that forwards to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: fmt::Arguments<'_>) {
        tracing::debug!(target: "mapbox_geocoding", "{}", message);
    }
}

/// Logger selection configured on a geocoder.
#[derive(Clone, Default)]
pub(crate) struct LoggerConfig {
    pub(crate) logger: Option<Arc<dyn Logger>>,
    pub(crate) resolver: Option<LoggerResolver>,
}

impl LoggerConfig {
    /// Runs `f` with the logger for this call. The resolver wins over the
    /// static logger; nothing runs when neither yields one.
    pub(crate) fn with_logger(&self, extensions: &Extensions, f: impl FnOnce(&dyn Logger)) {
        if let Some(resolver) = &self.resolver {
            if let Some(logger) = resolver(extensions) {
                f(logger.as_ref());
            }
            return;
        }

        if let Some(logger) = &self.logger {
            f(logger.as_ref());
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("logger", &self.logger.is_some())
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}
