//! # Handlers de Rutas
//! src/router/handlers.rs
//!
//! Cada handler recibe el backend y el resto del path que dejó el matcher
//! (vacío para rutas exactas) y arma la response completa.

use crate::http::{Response, StatusCode};
use crate::packages::{Fetched, PackageBackend};

/// Primera línea del índice del catálogo
pub const CATALOG_INDEX_HEADER: &str = "Available Packages:";

pub const NOT_FOUND_BODY: &str = "Not Found\n";
pub const PACKAGE_NOT_FOUND_BODY: &str = "Package not found\n";
pub const FORBIDDEN_BODY: &str = "Forbidden\n";
pub const BAD_REQUEST_BODY: &str = "Bad Request\n";
pub const GET_ONLY_BODY: &str = "GET only\n";

/// `/ping`: liveness, no toca el filesystem
pub fn ping(_backend: &dyn PackageBackend, _rest: &str) -> Response {
    Response::text(StatusCode::Ok, "pong\n")
}

/// `/packages/list` del catálogo: encabezado + una línea `- nombre` por paquete
pub fn catalog_index(backend: &dyn PackageBackend, _rest: &str) -> Response {
    let mut body = format!("{}\n", CATALOG_INDEX_HEADER);
    for name in backend.list() {
        body.push_str("- ");
        body.push_str(&name);
        body.push('\n');
    }

    Response::text(StatusCode::Ok, &body)
}

/// `/packages` del filesystem: nombres ordenados, uno por línea
pub fn directory_index(backend: &dyn PackageBackend, _rest: &str) -> Response {
    Response::text(StatusCode::Ok, &backend.list().join("\n"))
}

/// `/packages/<nombre>`: contenido exacto del paquete
///
/// El 403 nunca incluye el path resuelto.
pub fn fetch(backend: &dyn PackageBackend, name: &str) -> Response {
    match backend.fetch(name) {
        Fetched::Found(package) => Response::bytes(StatusCode::Ok, package.body, package.content_type),
        Fetched::Missing => Response::text(StatusCode::NotFound, PACKAGE_NOT_FOUND_BODY),
        Fetched::Forbidden => {
            tracing::warn!(requested = name, "path fuera del package root, rechazado");
            Response::text(StatusCode::Forbidden, FORBIDDEN_BODY)
        }
    }
}

/// Response para cualquier path sin ruta
pub fn not_found() -> Response {
    Response::text(StatusCode::NotFound, NOT_FOUND_BODY)
}

/// Response para request lines malformadas
pub fn bad_request() -> Response {
    Response::text(StatusCode::BadRequest, BAD_REQUEST_BODY)
}

/// Response para métodos distintos de GET
pub fn method_not_allowed() -> Response {
    Response::text(StatusCode::MethodNotAllowed, GET_ONLY_BODY)
}
