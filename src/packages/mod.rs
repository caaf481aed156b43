//! # Backends de Paquetes
//! src/packages/mod.rs
//!
//! Un backend sabe hacer dos cosas: listar los nombres de paquetes y
//! buscar uno por nombre. El router no sabe de dónde salen los bytes.
//!
//! - `catalog`: tabla fija en memoria, inmutable desde el arranque
//! - `directory`: subdirectorios y archivos bajo un package root, con
//!   verificación de que el path resuelto no escape del root

pub mod catalog;
pub mod directory;

pub use catalog::{Catalog, CatalogEntry};
pub use directory::DirectoryBackend;

use crate::http::ContentType;

/// Contenido de un paquete encontrado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Bytes exactos a devolver
    pub body: Vec<u8>,

    /// Tipo de contenido a anunciar
    pub content_type: ContentType,
}

/// Resultado de buscar un paquete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// El paquete existe
    Found(Package),

    /// No existe (o el root no existe)
    Missing,

    /// El nombre resuelve fuera del package root
    Forbidden,
}

/// Capacidades de un backend de paquetes
pub trait PackageBackend: Send + Sync {
    /// Nombres de paquetes, en el orden en que se deben listar
    fn list(&self) -> Vec<String>;

    /// Busca un paquete por nombre (o path relativo)
    fn fetch(&self, name: &str) -> Fetched;
}
