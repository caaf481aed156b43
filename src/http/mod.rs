//! # Módulo HTTP
//!
//! Subconjunto mínimo de HTTP/1.0 que necesita el repositorio de paquetes:
//!
//! - Lectura del request crudo desde el socket (`reader`)
//! - Parsing de la request line (`request`)
//! - Construcción de responses (`response`)
//! - Códigos de estado (`status`)
//!
//! ## Especificación HTTP/1.0
//!
//! El protocolo HTTP/1.0 (RFC 1945) es más simple que HTTP/1.1:
//! - No requiere el header `Host`
//! - No tiene chunked transfer encoding
//! - No mantiene conexiones persistentes por defecto
//!
//! ### Formato de Request (solo se mira la primera línea)
//!
//! ```text
//! GET /packages/demo HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Length: 5\r\n
//! Content-Type: text/plain\r\n
//! Connection: close\r\n
//! \r\n
//! pong\n
//! ```

pub mod reader;    // Lectura hasta \r\n\r\n o el tope de bytes
pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use reader::{read_request, ReadLimits};
pub use request::{Method, ParseError, Request};
pub use response::{ContentType, Response};
pub use status::StatusCode;
