//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del repositorio de paquetes con soporte para argumentos CLI
//! y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./pkg_server --backend directory --package-root ./packages --port 40000
//! ./pkg_server --backend catalog --catalog ./catalog.json
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! PKG_PORT=40000 PKG_ROOT=/srv/packages ./pkg_server
//! ```

use crate::error::{Result, ServerError};
use crate::http::ReadLimits;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// De dónde salen los paquetes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Subdirectorios y archivos bajo `--package-root`
    Directory,

    /// Tabla fija en memoria (built-in o `--catalog`)
    Catalog,
}

/// Configuración del servidor de paquetes
#[derive(Debug, Clone, Parser)]
#[command(name = "pkg_server")]
#[command(about = "Repositorio de paquetes sobre HTTP/1.0 (un solo thread, solo GET)")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "PKG_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "40000", env = "PKG_PORT")]
    pub port: u16,

    /// Backend de paquetes
    #[arg(long, value_enum, default_value = "directory", env = "PKG_BACKEND")]
    pub backend: BackendKind,

    /// Directorio raíz de paquetes (backend `directory`)
    #[arg(long = "package-root", default_value = "./packages", env = "PKG_ROOT")]
    pub package_root: PathBuf,

    /// Archivo JSON con el catálogo (backend `catalog`); sin él se usa el built-in
    #[arg(long = "catalog", env = "PKG_CATALOG")]
    pub catalog_file: Option<PathBuf>,

    // === Lectura de requests ===

    /// Tope de bytes leídos por request
    #[arg(long = "max-request-bytes", default_value = "4096", env = "PKG_MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Tamaño de cada lectura del socket
    #[arg(long = "read-chunk-bytes", default_value = "512", env = "PKG_READ_CHUNK_BYTES")]
    pub read_chunk_bytes: usize,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "PKG_READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    // === Logging ===

    /// Nivel de log (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "PKG_LOG")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use pkg_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:40000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Límites para el lector de requests
    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits {
            chunk_bytes: self.read_chunk_bytes,
            max_bytes: self.max_request_bytes,
        }
    }

    /// Timeout de lectura, `None` cuando está desactivado
    pub fn read_timeout(&self) -> Option<Duration> {
        match self.read_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::Config("host must not be empty".to_string()));
        }
        if self.max_request_bytes == 0 {
            return Err(ServerError::Config("max request bytes must be >= 1".to_string()));
        }
        if self.read_chunk_bytes == 0 {
            return Err(ServerError::Config("read chunk bytes must be >= 1".to_string()));
        }
        if self.read_chunk_bytes > self.max_request_bytes {
            return Err(ServerError::Config(
                "read chunk bytes must not exceed max request bytes".to_string(),
            ));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        tracing::info!(address = %self.address(), backend = ?self.backend, "configuración de red");
        match self.backend {
            BackendKind::Directory => {
                tracing::info!(package_root = %self.package_root.display(), "backend de filesystem");
            }
            BackendKind::Catalog => match &self.catalog_file {
                Some(path) => tracing::info!(catalog = %path.display(), "backend de catálogo"),
                None => tracing::info!("backend de catálogo (built-in)"),
            },
        }
        tracing::info!(
            max_request_bytes = self.max_request_bytes,
            read_chunk_bytes = self.read_chunk_bytes,
            read_timeout_ms = self.read_timeout_ms,
            "lectura de requests"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 40000,
            backend: BackendKind::Directory,
            package_root: PathBuf::from("./packages"),
            catalog_file: None,
            max_request_bytes: 4096,
            read_chunk_bytes: 512,
            read_timeout_ms: 0,
            log_level: "info".to_string(),
        }
    }
}
