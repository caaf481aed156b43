//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el listener TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones de a una
//! 3. Lee y parsea el request
//! 4. Genera y envía la response y cierra la conexión

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{respond, Server, ShutdownHandle};
