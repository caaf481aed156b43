//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! Del request solo se interpreta la primera línea:
//!
//! ```text
//! GET /packages/demo HTTP/1.0\r\n
//! Host: localhost:40000\r\n      <- ignorado
//! \r\n
//! ```
//!
//! La línea se separa por whitespace. Con menos de dos tokens el request es
//! malformado (400). El token 0 es el método y el token 1 el target, que se
//! guarda tal cual: no se parsea query string ni se decodifican `%XX`.

use thiserror::Error;

/// Método HTTP del request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - el único método que el servidor atiende
    Get,

    /// Cualquier otro token (POST, HEAD, basura...) → 405
    Other(String),
}

impl Method {
    /// Interpreta el token del método (comparación exacta, sensible a mayúsculas)
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(token) => token,
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// La primera línea no tiene método y target
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
}

/// Request line ya parseada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    target: String,
    version: Option<String>,
}

impl Request {
    /// Parsea el texto crudo que devolvió el lector
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use pkg_server::http::{Method, Request};
    ///
    /// let request = Request::parse("GET /packages/demo HTTP/1.0\r\n\r\n").unwrap();
    /// assert_eq!(request.method(), &Method::Get);
    /// assert_eq!(request.target(), "/packages/demo");
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let first_line = text.lines().next().unwrap_or("");
        let mut tokens = first_line.split_whitespace();

        let (method, target) = match (tokens.next(), tokens.next()) {
            (Some(method), Some(target)) => (method, target),
            _ => return Err(ParseError::MalformedRequestLine(first_line.to_string())),
        };

        Ok(Request {
            method: Method::from_token(method),
            target: target.to_string(),
            version: tokens.next().map(str::to_string),
        })
    }

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el target tal como vino en la request line
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Versión declarada por el cliente, si la hay (no se valida)
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let request = Request::parse("GET / HTTP/1.0\r\n\r\n").unwrap();

        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.target(), "/");
        assert_eq!(request.version(), Some("HTTP/1.0"));
    }

    #[test]
    fn test_parse_without_version() {
        let request = Request::parse("GET /ping\r\n\r\n").unwrap();

        assert_eq!(request.target(), "/ping");
        assert_eq!(request.version(), None);
    }

    #[test]
    fn test_target_is_opaque() {
        let request = Request::parse("GET /packages/a%20b?x=1 HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.target(), "/packages/a%20b?x=1");
    }

    #[test]
    fn test_headers_are_ignored() {
        let raw = "GET /ping HTTP/1.0\r\nHost: localhost\r\nbroken header line\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.target(), "/ping");
    }

    #[test]
    fn test_bare_newlines_and_extra_whitespace() {
        let request = Request::parse("  GET \t /packages  HTTP/1.0\n\n").unwrap();

        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.target(), "/packages");
    }

    #[test]
    fn test_other_methods_parse() {
        let request = Request::parse("POST /packages HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.method(), &Method::Other("POST".to_string()));

        // Sensible a mayúsculas
        let request = Request::parse("get /packages HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(request.method().as_str(), "get");
        assert_ne!(request.method(), &Method::Get);
    }

    #[test]
    fn test_single_token_is_malformed() {
        let result = Request::parse("GET\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
    }

    #[test]
    fn test_blank_first_line_is_malformed() {
        assert!(Request::parse("\r\n\r\n").is_err());
        assert!(Request::parse("   \r\nGET / HTTP/1.0\r\n\r\n").is_err());
        assert!(Request::parse("").is_err());
    }
}
