//! # Backend de Filesystem
//! src/packages/directory.rs
//!
//! Sirve paquetes desde un directorio raíz (package root):
//!
//! - `list()`: subdirectorios inmediatos del root, ordenados por nombre.
//!   Se recalcula en cada request, sin cache.
//! - `fetch(rel)`: archivo regular bajo el root.
//!
//! ## Verificación de contención
//!
//! Nada de lo que llegue en `rel` puede resolver fuera del root:
//!
//! ```text
//! root = /srv/packages                (canonicalizado)
//! rel  = demo/../../etc/passwd
//!        /srv/packages/demo           Normal  → push
//!        /srv/packages                ..      → pop
//!        /srv                         ..      → pop   ← fuera del root
//!        /srv/etc/passwd
//! → /srv/etc/passwd no empieza con /srv/packages → 403
//! ```
//!
//! Primero se pliega `rel` de forma léxica sobre el root canonicalizado y se
//! compara por componentes (no por substring, así `/srv/packages2` no pasa).
//! Si el path existe se canonicaliza de nuevo, resolviendo symlinks, y se
//! vuelve a comparar: un symlink dentro del root que apunte afuera también
//! es 403. Lo que se lee es siempre el path canónico ya verificado.

use super::{Fetched, Package, PackageBackend};
use crate::http::ContentType;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resultado de resolver un path relativo contra el root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Dentro del root y existente
    Inside {
        /// Path plegado léxicamente (decide el content type)
        lexical: PathBuf,
        /// Path canónico (el que se lee)
        canonical: PathBuf,
    },

    /// Dentro del root pero no existe (o el root no existe)
    NotFound,

    /// Escapa del root
    Outside,
}

/// Paquetes servidos desde un directorio
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    /// El root no tiene que existir todavía; se revisa en cada request
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root tal como fue configurado
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resuelve `relative` contra el root verificando contención
    ///
    /// # Ejemplo
    /// ```
    /// use pkg_server::packages::directory::{DirectoryBackend, Resolution};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let backend = DirectoryBackend::new(dir.path());
    ///
    /// assert_eq!(backend.resolve("../../etc/passwd"), Resolution::Outside);
    /// assert_eq!(backend.resolve("missing.txt"), Resolution::NotFound);
    /// ```
    pub fn resolve(&self, relative: &str) -> Resolution {
        let root = match fs::canonicalize(&self.root) {
            Ok(root) => root,
            Err(_) => return Resolution::NotFound,
        };

        let lexical = fold_onto(&root, Path::new(relative));
        if !lexical.starts_with(&root) {
            return Resolution::Outside;
        }

        match fs::canonicalize(&lexical) {
            Ok(canonical) if canonical.starts_with(&root) => Resolution::Inside { lexical, canonical },
            Ok(_) => Resolution::Outside,
            Err(_) => Resolution::NotFound,
        }
    }
}

impl PackageBackend for DirectoryBackend {
    fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        // `Path::is_dir` sigue symlinks
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();

        names.sort();
        names
    }

    fn fetch(&self, name: &str) -> Fetched {
        let (lexical, canonical) = match self.resolve(name) {
            Resolution::Inside { lexical, canonical } => (lexical, canonical),
            Resolution::NotFound => return Fetched::Missing,
            Resolution::Outside => return Fetched::Forbidden,
        };

        if !canonical.is_file() {
            return Fetched::Missing;
        }

        match fs::read(&canonical) {
            Ok(body) => Fetched::Found(Package {
                body,
                content_type: ContentType::for_path(&lexical),
            }),
            Err(e) => {
                tracing::warn!(package = name, error = %e, "no se pudo leer el archivo del paquete");
                Fetched::Missing
            }
        }
    }
}

/// Pliega `relative` sobre `base` sin tocar el filesystem
///
/// `.` se ignora, `..` sube un nivel, y un componente absoluto reinicia
/// desde la raíz del filesystem.
fn fold_onto(base: &Path, relative: &Path) -> PathBuf {
    let mut out = base.to_path_buf();

    for component in relative.components() {
        match component {
            Component::Prefix(prefix) => out = PathBuf::from(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}
