//! # Package Server
//! src/lib.rs
//!
//! Repositorio de paquetes sobre HTTP/1.0: un solo thread, solo GET, una
//! response por conexión. Los paquetes salen de un catálogo fijo en memoria
//! o de un directorio restringido en disco.
//!
//! ## Arquitectura
//!
//! ```text
//! Listener → Reader → Parser → Router → Response Writer → cerrar socket
//! ```
//!
//! - `http`: lectura del request, request line, responses y status codes
//! - `packages`: backends (catálogo estático y filesystem)
//! - `router`: reglas `(matcher, handler)` sobre un backend
//! - `server`: listener TCP serial y apagado ordenado
//! - `config`: configuración CLI / variables de entorno
//! - `error`, `logging`: errores tipados y tracing
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use pkg_server::config::Config;
//! use pkg_server::router::Router;
//! use pkg_server::server::Server;
//!
//! let config = Config::default();
//! let router = Router::from_config(&config).expect("router");
//! let server = Server::bind(&config, router).expect("bind");
//! server.run().expect("run");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod packages;
pub mod router;
pub mod server;

pub use error::{Result, ServerError};
