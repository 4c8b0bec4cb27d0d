//! Request middleware settings, fixed once at start-up.

use std::sync::OnceLock;

use crate::config::observability::ObservabilityConfig;

#[derive(Debug, Clone, Copy)]
struct RequestSettings {
    slow_request_threshold_ms: u64,
    parent_propagation: bool,
}

const DEFAULTS: RequestSettings = RequestSettings {
    slow_request_threshold_ms: 1_000,
    parent_propagation: false,
};

static SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

/// Later calls are ignored.
pub(super) fn apply(config: &ObservabilityConfig) {
    _ = SETTINGS.set(RequestSettings {
        slow_request_threshold_ms: config.slow_request_threshold_ms,
        parent_propagation: config.otel_enabled && config.otel_parent_propagation_enabled,
    });
}

fn current() -> RequestSettings {
    SETTINGS.get().copied().unwrap_or(DEFAULTS)
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    current().slow_request_threshold_ms
}

pub(super) fn parent_propagation_enabled() -> bool {
    current().parent_propagation
}
