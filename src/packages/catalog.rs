//! # Catálogo Estático
//! src/packages/catalog.rs
//!
//! Tabla ordenada `nombre → texto`, construida una sola vez al arrancar y
//! pasada al router por valor. No hay forma de mutarla después.
//!
//! ## Formato del archivo de catálogo
//!
//! Un array JSON; el orden del array es el orden del listado:
//!
//! ```json
//! [
//!   {"name": "hello", "body": "Hello from the package system!\n"},
//!   {"name": "demo",  "body": "Package: demo\n"}
//! ]
//! ```

use super::{Fetched, Package, PackageBackend};
use crate::error::{Result, ServerError};
use crate::http::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Una entrada del catálogo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub body: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// Catálogo inmutable de paquetes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Construye un catálogo validando los nombres
    ///
    /// Rechaza nombres vacíos y duplicados.
    ///
    /// # Ejemplo
    /// ```
    /// use pkg_server::packages::{Catalog, CatalogEntry};
    ///
    /// let catalog = Catalog::new(vec![CatalogEntry::new("hello", "hi\n")]).unwrap();
    /// assert_eq!(catalog.len(), 1);
    ///
    /// let dup = Catalog::new(vec![CatalogEntry::new("a", "1"), CatalogEntry::new("a", "2")]);
    /// assert!(dup.is_err());
    /// ```
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        validate_names(&entries)?;
        Ok(Self { entries })
    }

    /// Carga el catálogo desde un archivo JSON
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parsea el catálogo desde texto JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Catálogo que viene compilado en el binario
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, body)| CatalogEntry::new(*name, *body))
            .collect();
        Self { entries }
    }

    /// Busca el texto de un paquete (comparación exacta)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.body.as_str())
    }

    /// Itera las entradas en orden
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PackageBackend for Catalog {
    fn list(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    fn fetch(&self, name: &str) -> Fetched {
        match self.get(name) {
            Some(body) => Fetched::Found(Package {
                body: body.as_bytes().to_vec(),
                content_type: ContentType::TextPlain,
            }),
            None => Fetched::Missing,
        }
    }
}

fn validate_names(entries: &[CatalogEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.name.is_empty() {
            return Err(ServerError::Catalog("package name must not be empty".to_string()));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(ServerError::Catalog(format!("duplicate package name: {}", entry.name)));
        }
    }

    Ok(())
}

const BUILTIN: &[(&str, &str)] = &[
    (
        "test",
        "Package: test\nStatus: Working\nDescription: This is a test package to verify the system.\n",
    ),
    (
        "demo",
        "Package: demo\nStatus: Working\nDescription: This is a demo package showing off the OS capabilities.\n",
    ),
    (
        "neofetch",
        "   .      .     UwU OS v1.0.0\n  ( `\\--/' )    -------------\n   ) O  O (     OS: UwU OS x86\n  (  \\  /  )    Kernel: 1.0.0-uwu\n   \\  `'  /     Uptime: 1 min\n    `----'      Packages: 5 (pkg)\n                Shell: UwU Shell\n                CPU: x86 Virtual CPU\n                Memory: 128MB\n",
    ),
    (
        "hello",
        "Hello from the UwU OS package system!\nEverything is working perfectly.\n",
    ),
    (
        "sysinfo",
        "System Information:\n-------------------\nOS: UwU OS\nArch: x86\nFS: Custom RAMFS\nNet: RTL8139 / E1000\nStatus: All systems nominal.\n",
    ),
    (
        "cowsay",
        " _______\n< moo!! >\n -------\n        \\   ^__^\n         \\  (oo)\\_______\n            (__)\\       )\\/\\\n                ||----w |\n                ||     ||\n",
    ),
    (
        "fortune",
        "You will successfully implement TCP/IP today.\n...or maybe tomorrow.\n...actually probably next week.\n",
    ),
    (
        "panic",
        "KERNEL PANIC - not syncing: VFS: Unable to mount root fs\n\nRelax. Everything is fine.\n",
    ),
];
