use once_cell::sync::{Lazy, OnceCell};
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::error;

static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);
static REGISTER_ONCE: OnceCell<()> = OnceCell::new();

pub fn register_metrics() {
    REGISTER_ONCE.get_or_init(|| {
        a11y_report::metrics::register_metrics(global_registry());
    });
}

pub fn global_registry() -> &'static Registry {
    &GLOBAL_REGISTRY
}

/// Prometheus text exposition of every audit metric.
pub fn render_metrics() -> String {
    register_metrics();
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(err) = encoder.encode(&global_registry().gather(), &mut buffer) {
        error!(?err, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposition_includes_audit_counters() {
        register_metrics();
        register_metrics();
        let text = render_metrics();
        assert!(text.contains("a11y_audit_pages_total"));
    }
}
