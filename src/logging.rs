//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing` con un subscriber `fmt`. `RUST_LOG` tiene prioridad
//! sobre el nivel que viene de la configuración.

use crate::error::{Result, ServerError};
use tracing_subscriber::{fmt, EnvFilter};

/// Instala el subscriber global de tracing
///
/// Falla si ya había uno instalado (por ejemplo, en tests).
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))?;

    tracing::debug!(level, "tracing inicializado");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // El primero puede fallar si otro test ya instaló un subscriber
        let _ = init_tracing("debug");
        let second = init_tracing("debug");

        assert!(matches!(second, Err(ServerError::Logging(_))));
    }
}
