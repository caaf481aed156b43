//! # Servidor TCP Serial
//! src/server/tcp.rs
//!
//! Acepta una conexión, la atiende completa (leer → parsear → rutear →
//! escribir → cerrar) y recién después acepta la siguiente. No hay threads
//! ni estado compartido mutable: un peer lento bloquea al resto, y eso es
//! aceptado (el timeout de lectura configurable es la única mitigación).
//!
//! Cualquier error dentro de una conexión se registra y el loop sigue.

use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::http::{read_request, ReadLimits, Request, Response};
use crate::router::{handlers, Router};
use std::io::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Servidor HTTP/1.0 de paquetes
pub struct Server {
    listener: TcpListener,
    router: Router,
    limits: ReadLimits,
    read_timeout: Option<Duration>,
    shutdown: Arc<AtomicBool>,
}

/// Permite detener el accept loop desde otro contexto (handler de Ctrl-C)
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake: SocketAddr,
}

impl ShutdownHandle {
    /// Marca el apagado y despierta el `accept` bloqueado
    pub fn trigger(&self) {
        if self.flag.swap(true, Ordering::SeqCst) {
            return;
        }

        // El loop revisa la bandera después de cada accept
        if let Err(e) = TcpStream::connect_timeout(&self.wake, Duration::from_secs(1)) {
            warn!(error = %e, "no se pudo despertar el accept loop");
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl Server {
    /// Abre el socket de escucha
    ///
    /// Un fallo acá es fatal: el binario termina con diagnóstico.
    pub fn bind(config: &Config, router: Router) -> Result<Self> {
        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
        info!(%address, "socket de escucha abierto");

        Ok(Self {
            listener,
            router,
            limits: config.read_limits(),
            read_timeout: config.read_timeout(),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle para detener `run` desde otro lado
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        let mut wake = self.local_addr()?;
        if wake.ip().is_unspecified() {
            match wake {
                SocketAddr::V4(_) => wake.set_ip(Ipv4Addr::LOCALHOST.into()),
                SocketAddr::V6(_) => wake.set_ip(Ipv6Addr::LOCALHOST.into()),
            }
        }

        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            wake,
        })
    }

    /// Accept loop serial; retorna cuando se dispara el shutdown
    pub fn run(&self) -> Result<()> {
        for stream in self.listener.incoming() {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            match stream {
                Ok(stream) => {
                    if let Err(e) = self.handle_connection(stream) {
                        error!(code = e.code(), error = %e, "error atendiendo la conexión");
                    }
                }
                Err(e) => {
                    error!(error = %e, "error al aceptar conexión");
                }
            }
        }

        info!("bye");
        Ok(())
    }

    /// Atiende una conexión completa; el socket se cierra al salir
    pub fn handle_connection(&self, mut stream: TcpStream) -> Result<()> {
        let start = Instant::now();
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        debug!(%peer, "nueva conexión");

        stream.set_read_timeout(self.read_timeout)?;
        let raw = read_request(&mut stream, self.limits)?;

        let response = match respond(&self.router, &raw) {
            Some(response) => response,
            None => {
                debug!(%peer, "request vacío, cerrando sin responder");
                return Ok(());
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        info!(
            %peer,
            status = %response.status(),
            bytes = response.body().len(),
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            "response enviada"
        );
        Ok(())
    }
}

/// Pipeline puro: texto crudo → response
///
/// `None` cuando el peer no mandó nada (no se responde).
///
/// # Ejemplo
/// ```
/// use pkg_server::http::StatusCode;
/// use pkg_server::packages::Catalog;
/// use pkg_server::router::Router;
/// use pkg_server::server::respond;
///
/// let router = Router::catalog(Catalog::builtin());
/// assert!(respond(&router, "").is_none());
///
/// let response = respond(&router, "GET\r\n\r\n").unwrap();
/// assert_eq!(response.status(), StatusCode::BadRequest);
/// ```
pub fn respond(router: &Router, raw: &str) -> Option<Response> {
    if raw.is_empty() {
        return None;
    }

    let response = match Request::parse(raw) {
        Ok(request) => {
            info!("REQ: {} {}", request.method().as_str(), request.target());
            router.dispatch(&request)
        }
        Err(e) => {
            warn!(error = %e, "request line inválida");
            handlers::bad_request()
        }
    };

    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;
    use crate::packages::{Catalog, DirectoryBackend};
    use std::io::Read;
    use std::net::Shutdown;
    use std::thread;

    fn local_config() -> Config {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 0;
        config
    }

    /// Levanta el servidor en un thread y retorna (addr, handle, join)
    fn spawn(router: Router) -> (SocketAddr, ShutdownHandle, thread::JoinHandle<Result<()>>) {
        let server = Server::bind(&local_config(), router).unwrap();
        let addr = server.local_addr().unwrap();
        let handle = server.shutdown_handle().unwrap();
        let join = thread::spawn(move || server.run());
        (addr, handle, join)
    }

    fn exchange(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
        let mut client = TcpStream::connect(addr).unwrap();
        client.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        client.write_all(raw).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        buf
    }

    // ==================== respond ====================

    #[test]
    fn test_respond_empty() {
        let router = Router::catalog(Catalog::builtin());
        assert!(respond(&router, "").is_none());
    }

    #[test]
    fn test_respond_malformed() {
        let router = Router::catalog(Catalog::builtin());
        for raw in ["GET\r\n\r\n", "\r\n\r\n", "   ", "\u{FFFD}\u{FFFD}"] {
            let response = respond(&router, raw).unwrap();
            assert_eq!(response.status(), StatusCode::BadRequest, "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_respond_routes() {
        let router = Router::catalog(Catalog::builtin());
        let response = respond(&router, "GET /packages/cowsay HTTP/1.0\r\n\r\n").unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(String::from_utf8_lossy(response.body()).contains("moo!!"));
    }

    // ==================== Conexiones ====================

    #[test]
    fn test_handle_connection_ping() {
        let (addr, handle, join) = spawn(Router::directory(DirectoryBackend::new("/nowhere")));

        let reply = exchange(addr, b"GET /ping HTTP/1.0\r\n\r\n");
        assert_eq!(
            reply,
            b"HTTP/1.0 200 OK\r\nContent-Length: 5\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\npong\n"
        );

        handle.trigger();
        join.join().unwrap().unwrap();
    }

    #[test]
    fn test_peer_closed_immediately_then_next_request() {
        let (addr, handle, join) = spawn(Router::catalog(Catalog::builtin()));

        // Conecta y cierra sin mandar nada: no hay response
        let reply = exchange(addr, b"");
        assert!(reply.is_empty());

        // El loop sigue vivo
        let reply = exchange(addr, b"GET /packages/list HTTP/1.0\r\n\r\n");
        assert!(String::from_utf8_lossy(&reply).starts_with("HTTP/1.0 200 OK\r\n"));

        handle.trigger();
        join.join().unwrap().unwrap();
    }

    #[test]
    fn test_connections_served_in_order() {
        let (addr, handle, join) = spawn(Router::catalog(Catalog::builtin()));

        for (raw, status) in [
            ("GET /packages/demo HTTP/1.0\r\n\r\n", "200 OK"),
            ("POST /packages/demo HTTP/1.0\r\n\r\n", "405 Method Not Allowed"),
            ("GET\r\n\r\n", "400 Bad Request"),
            ("GET /nope HTTP/1.0\r\n\r\n", "404 Not Found"),
        ] {
            let reply = exchange(addr, raw.as_bytes());
            let text = String::from_utf8_lossy(&reply);
            assert!(text.starts_with(&format!("HTTP/1.0 {}\r\n", status)), "got {}", text);
        }

        handle.trigger();
        join.join().unwrap().unwrap();
    }

    #[test]
    fn test_read_timeout_releases_silent_peer() {
        let mut config = local_config();
        config.read_timeout_ms = 100;
        let server = Server::bind(&config, Router::catalog(Catalog::builtin())).unwrap();
        let addr = server.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = server.listener.accept().unwrap();
            server.handle_connection(stream)
        });

        // Conecta y no manda nada ni cierra
        let _client = TcpStream::connect(addr).unwrap();
        let result = t.join().unwrap();
        assert!(matches!(result, Err(ServerError::Io(_))));
    }

    #[test]
    fn test_bind_failure() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut config = local_config();
        config.port = taken.local_addr().unwrap().port();

        let result = Server::bind(&config, Router::catalog(Catalog::builtin()));
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }

    #[test]
    fn test_shutdown_handle_wakes_unspecified_address() {
        let mut config = local_config();
        config.host = "0.0.0.0".to_string();
        let server = Server::bind(&config, Router::catalog(Catalog::builtin())).unwrap();
        let handle = server.shutdown_handle().unwrap();

        assert!(handle.wake.ip().is_loopback());
        assert!(!handle.is_triggered());

        let join = thread::spawn(move || server.run());
        handle.trigger();
        handle.trigger();
        assert!(handle.is_triggered());
        join.join().unwrap().unwrap();
    }
}
