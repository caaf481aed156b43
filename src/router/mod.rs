//! # Sistema de Routing
//! src/router/mod.rs
//!
//! El router es una lista ordenada de reglas `(matcher, handler)` sobre un
//! backend de paquetes elegido al construirlo.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router::dispatch → (405 si no es GET)
//!                            → primera regla que matchea → Handler → Response
//!                            → 404 si ninguna matchea
//! ```
//!
//! Los dos despliegues solo difieren en la tabla de reglas:
//!
//! | Catálogo                          | Filesystem                           |
//! |-----------------------------------|--------------------------------------|
//! | `= /packages/list` → índice       | `= /ping` → pong                     |
//! | `^ /packages/` → paquete          | `= /packages`, `= /packages/` → lista|
//! |                                   | `^ /packages/` → archivo             |

pub mod handlers;

use crate::config::{BackendKind, Config};
use crate::error::Result;
use crate::http::{Method, Request, Response};
use crate::packages::{Catalog, DirectoryBackend, PackageBackend};

/// Tipo de función handler
///
/// Recibe el backend y lo que sobra del path después del matcher.
pub type Handler = fn(&dyn PackageBackend, &str) -> Response;

/// Cómo una regla compara el path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// El path tiene que ser exactamente este
    Exact(&'static str),

    /// El path empieza con este prefijo y sigue con algo no vacío
    Prefix(&'static str),
}

impl Matcher {
    /// Retorna el resto del path si matchea
    ///
    /// # Ejemplo
    /// ```
    /// use pkg_server::router::Matcher;
    ///
    /// let prefix = Matcher::Prefix("/packages/");
    /// assert_eq!(prefix.matches("/packages/demo"), Some("demo"));
    /// assert_eq!(prefix.matches("/packages/"), None);
    /// assert_eq!(Matcher::Exact("/ping").matches("/ping"), Some(""));
    /// ```
    pub fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            Matcher::Exact(expected) => (path == *expected).then_some(""),
            Matcher::Prefix(prefix) => path.strip_prefix(*prefix).filter(|rest| !rest.is_empty()),
        }
    }
}

/// Una regla de routing
#[derive(Clone, Copy)]
pub struct Route {
    pub matcher: Matcher,
    pub handler: Handler,
}

/// Router que mapea paths a handlers sobre un backend
pub struct Router {
    backend: Box<dyn PackageBackend>,
    routes: Vec<Route>,
}

impl Router {
    /// Crea un router sin reglas sobre el backend dado
    pub fn new(backend: impl PackageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            routes: Vec::new(),
        }
    }

    /// Router del catálogo estático
    pub fn catalog(catalog: Catalog) -> Self {
        let mut router = Self::new(catalog);
        router.register(Matcher::Exact("/packages/list"), handlers::catalog_index);
        router.register(Matcher::Prefix("/packages/"), handlers::fetch);
        router
    }

    /// Router del backend de filesystem
    pub fn directory(backend: DirectoryBackend) -> Self {
        let mut router = Self::new(backend);
        router.register(Matcher::Exact("/ping"), handlers::ping);
        router.register(Matcher::Exact("/packages"), handlers::directory_index);
        router.register(Matcher::Exact("/packages/"), handlers::directory_index);
        router.register(Matcher::Prefix("/packages/"), handlers::fetch);
        router
    }

    /// Construye el router del backend elegido en la configuración
    ///
    /// Con `--backend catalog` y sin `--catalog` se usa el catálogo built-in.
    pub fn from_config(config: &Config) -> Result<Self> {
        let router = match config.backend {
            BackendKind::Directory => Self::directory(DirectoryBackend::new(&config.package_root)),
            BackendKind::Catalog => {
                let catalog = match &config.catalog_file {
                    Some(path) => Catalog::from_json_file(path)?,
                    None => Catalog::builtin(),
                };
                Self::catalog(catalog)
            }
        };

        Ok(router)
    }

    /// Agrega una regla al final (menor prioridad que las anteriores)
    pub fn register(&mut self, matcher: Matcher, handler: Handler) {
        self.routes.push(Route { matcher, handler });
    }

    /// Reglas en orden de prioridad
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Responde un request ya parseado
    ///
    /// Cualquier método distinto de GET es 405, sin importar el path.
    ///
    /// # Ejemplo
    /// ```
    /// use pkg_server::http::{Request, StatusCode};
    /// use pkg_server::packages::Catalog;
    /// use pkg_server::router::Router;
    ///
    /// let router = Router::catalog(Catalog::builtin());
    ///
    /// let request = Request::parse("GET /packages/hello HTTP/1.0\r\n\r\n").unwrap();
    /// assert_eq!(router.dispatch(&request).status(), StatusCode::Ok);
    ///
    /// let request = Request::parse("DELETE /packages/hello HTTP/1.0\r\n\r\n").unwrap();
    /// assert_eq!(router.dispatch(&request).status(), StatusCode::MethodNotAllowed);
    /// ```
    pub fn dispatch(&self, request: &Request) -> Response {
        if request.method() != &Method::Get {
            return handlers::method_not_allowed();
        }

        self.route(request.target())
    }

    /// Encuentra y ejecuta el handler de un path
    ///
    /// Si ninguna regla matchea, retorna 404 Not Found.
    pub fn route(&self, path: &str) -> Response {
        for route in &self.routes {
            if let Some(rest) = route.matcher.matches(path) {
                return (route.handler)(self.backend.as_ref(), rest);
            }
        }

        handlers::not_found()
    }
}
