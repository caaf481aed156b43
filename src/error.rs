//! # Errores del Servidor
//! src/error.rs
//!
//! Errores de transporte, configuración y arranque. Los errores de protocolo
//! (400, 404, 405) y de seguridad (403) no pasan por acá: se convierten
//! directamente en responses.

use thiserror::Error;

/// Errores del servidor de paquetes
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo abrir el socket de escucha (fatal al arrancar)
    #[error("bind failed on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Error de I/O durante accept o dentro de una conexión
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuración inválida
    #[error("configuration error: {0}")]
    Config(String),

    /// Catálogo inválido (nombres duplicados, nombre vacío)
    #[error("catalog error: {0}")]
    Catalog(String),

    /// El archivo de catálogo no es JSON válido
    #[error("catalog format error: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    /// No se pudo instalar el subscriber de tracing
    #[error("logging error: {0}")]
    Logging(String),

    /// No se pudo registrar el handler de Ctrl-C
    #[error("signal handler error: {0}")]
    Signal(#[from] ctrlc::Error),
}

impl ServerError {
    /// Código estable para cada tipo de error
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::Bind { .. } => "PKG001",
            ServerError::Io(_) => "PKG002",
            ServerError::Config(_) => "PKG003",
            ServerError::Catalog(_) => "PKG004",
            ServerError::CatalogFormat(_) => "PKG005",
            ServerError::Logging(_) => "PKG006",
            ServerError::Signal(_) => "PKG007",
        }
    }
}

/// Result del crate
pub type Result<T> = std::result::Result<T, ServerError>;
