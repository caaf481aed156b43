//! # Lectura del Request desde el Socket
//! src/http/reader.rs
//!
//! Lee bloques del stream hasta encontrar el terminador de headers
//! (`\r\n\r\n`), hasta llegar al tope de bytes, o hasta que el peer cierre.
//! El resultado se decodifica de forma permisiva: los bytes que no son UTF-8
//! válido se reemplazan en vez de fallar.

use std::io::{self, ErrorKind, Read};

/// Marca el fin de la sección de headers
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Límites de lectura de un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Tamaño de cada `read` individual
    pub chunk_bytes: usize,

    /// Tope duro de bytes acumulados
    pub max_bytes: usize,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            chunk_bytes: 512,
            max_bytes: 4096,
        }
    }
}

/// Lee un request del stream y lo retorna como texto
///
/// Retorna un string vacío si el peer cerró sin mandar nada.
///
/// # Ejemplo
/// ```
/// use pkg_server::http::{read_request, ReadLimits};
///
/// let mut raw: &[u8] = b"GET /ping HTTP/1.0\r\n\r\nbody ignorado";
/// let text = read_request(&mut raw, ReadLimits { chunk_bytes: 8, max_bytes: 4096 }).unwrap();
/// assert!(text.starts_with("GET /ping"));
/// ```
pub fn read_request<R: Read>(stream: &mut R, limits: ReadLimits) -> io::Result<String> {
    let mut buffer: Vec<u8> = Vec::with_capacity(limits.max_bytes);
    let mut chunk = vec![0u8; limits.chunk_bytes.max(1)];

    while buffer.len() < limits.max_bytes && !contains_terminator(&buffer) {
        let want = chunk.len().min(limits.max_bytes - buffer.len());

        let n = match stream.read(&mut chunk[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        buffer.extend_from_slice(&chunk[..n]);
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn contains_terminator(buffer: &[u8]) -> bool {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .any(|window| window == HEADER_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Stream que entrega bytes de a pedazos fijos y cuenta las lecturas
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        reads: usize,
    }

    impl Trickle {
        fn new(data: &[u8], step: usize) -> Self {
            Self { data: data.to_vec(), pos: 0, step, reads: 0 }
        }
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            let end = (self.pos + self.step.min(buf.len())).min(self.data.len());
            let n = end - self.pos;
            buf[..n].copy_from_slice(&self.data[self.pos..end]);
            self.pos = end;
            Ok(n)
        }
    }

    /// Stream que falla una vez con `Interrupted` y después delega
    struct Flaky<R> {
        inner: R,
        interrupted: bool,
    }

    impl<R: Read> Read for Flaky<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_reads_until_terminator() {
        let mut stream = Trickle::new(b"GET / HTTP/1.0\r\n\r\nEXTRA-NEVER-READ", 4);
        let text = read_request(&mut stream, ReadLimits { chunk_bytes: 4, max_bytes: 4096 }).unwrap();

        // Se detiene en el primer chunk que completa el terminador
        assert!(text.starts_with("GET / HTTP/1.0\r\n\r\n"));
        assert!(!text.contains("NEVER"));
        assert_eq!(stream.reads, 5);
    }

    #[test]
    fn test_terminator_split_across_chunks() {
        let mut stream = Trickle::new(b"GET /ping HTTP/1.0\r\n\r\ntrailing", 3);
        let text = read_request(&mut stream, ReadLimits { chunk_bytes: 3, max_bytes: 4096 }).unwrap();

        assert!(text.starts_with("GET /ping HTTP/1.0\r\n\r\n"));
        assert!(text.len() <= "GET /ping HTTP/1.0\r\n\r\n".len() + 2);
    }

    #[test]
    fn test_stops_at_cap() {
        let data = vec![b'A'; 10_000];
        let mut stream = Cursor::new(data);
        let text = read_request(&mut stream, ReadLimits::default()).unwrap();

        assert_eq!(text.len(), 4096);
    }

    #[test]
    fn test_cap_not_multiple_of_chunk() {
        let data = vec![b'A'; 100];
        let mut stream = Cursor::new(data);
        let text = read_request(&mut stream, ReadLimits { chunk_bytes: 7, max_bytes: 20 }).unwrap();

        assert_eq!(text.len(), 20);
    }

    #[test]
    fn test_eof_without_terminator() {
        let mut stream = Cursor::new(b"GET /ping HTTP/1.0".to_vec());
        let text = read_request(&mut stream, ReadLimits::default()).unwrap();

        assert_eq!(text, "GET /ping HTTP/1.0");
    }

    #[test]
    fn test_empty_stream() {
        let mut stream = Trickle::new(b"", 512);
        let text = read_request(&mut stream, ReadLimits::default()).unwrap();

        assert!(text.is_empty());
        assert_eq!(stream.reads, 1);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut stream = Cursor::new(b"GET /pa\xFFckages HTTP/1.0\r\n\r\n".to_vec());
        let text = read_request(&mut stream, ReadLimits::default()).unwrap();

        assert!(text.starts_with("GET /pa"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_interrupted_is_retried() {
        let mut stream = Flaky {
            inner: Cursor::new(b"GET /ping HTTP/1.0\r\n\r\n".to_vec()),
            interrupted: false,
        };
        let text = read_request(&mut stream, ReadLimits::default()).unwrap();

        assert_eq!(text, "GET /ping HTTP/1.0\r\n\r\n");
    }
}
