use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::EngineError;

/// Installs the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init_tracing(level: &str, json: bool) -> Result<(), EngineError> {
    let level: Level = level
        .parse()
        .map_err(|_| EngineError::Telemetry(format!("invalid log level: {level}")))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    result.map_err(|err| EngineError::Telemetry(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_levels() {
        assert!(matches!(
            init_tracing("chatty", false),
            Err(EngineError::Telemetry(_))
        ));
    }
}
