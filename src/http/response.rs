//! # Construcción de Respuestas HTTP
//!
//! Este módulo arma las respuestas HTTP/1.0 del repositorio de paquetes y
//! las convierte a bytes listos para el socket.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Length: 5\r\n
//! Content-Type: text/plain\r\n
//! Connection: close\r\n
//! \r\n
//! pong\n
//! ```
//!
//! Solo se emiten esos tres headers, siempre en ese orden. `Content-Length`
//! se calcula en `to_bytes` a partir del body final, así que nunca puede
//! quedar desincronizado.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use pkg_server::http::{ContentType, Response, StatusCode};
//!
//! let response = Response::text(StatusCode::Ok, "pong\n");
//! assert_eq!(response.content_type(), ContentType::TextPlain);
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\npong\n"));
//! ```

use super::StatusCode;
use std::path::Path;

/// Tipos de contenido que el servidor sabe anunciar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// `text/plain` (default para todo lo demás)
    TextPlain,

    /// `application/json` (archivos con sufijo `.json`)
    Json,
}

impl ContentType {
    /// Valor del header `Content-Type`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TextPlain => "text/plain",
            ContentType::Json => "application/json",
        }
    }

    /// Decide el tipo según el sufijo del path
    ///
    /// # Ejemplo
    /// ```
    /// use pkg_server::http::ContentType;
    ///
    /// assert_eq!(ContentType::for_path("demo/manifest.json"), ContentType::Json);
    /// assert_eq!(ContentType::for_path("demo/README"), ContentType::TextPlain);
    /// ```
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("json") => ContentType::Json,
            _ => ContentType::TextPlain,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa una respuesta HTTP/1.0 completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Tipo de contenido del body
    content_type: ContentType,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta vacía `text/plain` con el código especificado
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: ContentType::TextPlain,
            body: Vec::new(),
        }
    }

    /// Crea una respuesta de texto plano
    ///
    /// El texto se codifica a UTF-8 antes de medir el `Content-Length`.
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status).with_body(body)
    }

    /// Crea una respuesta con bytes crudos y un tipo de contenido explícito
    ///
    /// # Ejemplo
    /// ```
    /// use pkg_server::http::{ContentType, Response, StatusCode};
    ///
    /// let response = Response::bytes(StatusCode::Ok, b"{}".to_vec(), ContentType::Json);
    /// assert_eq!(response.body(), b"{}");
    /// ```
    pub fn bytes(status: StatusCode, body: Vec<u8>, content_type: ContentType) -> Self {
        Self::new(status)
            .with_content_type(content_type)
            .with_body_bytes(body)
    }

    /// Cambia el tipo de contenido
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Establece el cuerpo de la respuesta desde un string
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.0:
    /// - Status line: `HTTP/1.0 200 OK\r\n`
    /// - `Content-Length`, `Content-Type` y `Connection: close`
    /// - Línea vacía: `\r\n`
    /// - Body sin ninguna transformación
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.0 {}\r\nContent-Length: {}\r\nContent-Type: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.body.len(),
            self.content_type
        );

        let mut result = Vec::with_capacity(head.len() + self.body.len());
        result.extend_from_slice(head.as_bytes());
        result.extend_from_slice(&self.body);
        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el tipo de contenido
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
