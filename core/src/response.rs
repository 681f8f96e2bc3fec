//! Response bodies: streamed through to the caller or decoded into a type.
//!
//! # Design
//! A `ResponseStream` owns the connection behind a successful exchange.
//! Releasing it is idempotent: `close` may be called any number of times and
//! `Drop` releases whatever is still open, so a stream that goes out of scope
//! on an error path cannot leak. Structured decode takes the stream by value,
//! which releases it on every exit path, including a failed parse.

use std::fmt;
use std::io::{self, BufReader, Cursor, Read};

use serde::de::DeserializeOwned;

use crate::error::{classify_decode, Result};

/// Live body of a successful exchange.
///
/// Reads go straight to the underlying connection with no buffering and no
/// size limit. A closed stream reads as end-of-file.
pub struct ResponseStream {
    reader: Option<Box<dyn Read + Send>>,
}

impl ResponseStream {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
        }
    }

    /// A stream over bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(bytes.into()))
    }

    /// Release the underlying connection. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.reader = None;
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    /// Read everything that is left and release the stream.
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Parse the whole body as JSON into `T`, releasing the stream.
    pub fn decode<T: DeserializeOwned>(mut self) -> Result<T> {
        serde_json::from_reader(BufReader::new(&mut self)).map_err(classify_decode)
    }
}

impl Read for ResponseStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(reader) => reader.read(buf),
            None => Ok(0),
        }
    }
}

impl Drop for ResponseStream {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStream")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    use serde::Deserialize;

    use super::*;

    /// Reader that flags when it has been dropped, standing in for a
    /// connection.
    struct Tracked {
        inner: Cursor<Vec<u8>>,
        released: Arc<AtomicBool>,
    }

    impl Read for Tracked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn tracked(body: &str) -> (ResponseStream, Arc<AtomicBool>) {
        let released = Arc::new(AtomicBool::new(false));
        let stream = ResponseStream::new(Tracked {
            inner: Cursor::new(body.as_bytes().to_vec()),
            released: Arc::clone(&released),
        });
        (stream, released)
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    #[test]
    fn stream_yields_exact_bytes() {
        let stream = ResponseStream::from_bytes("hey now!");
        assert_eq!(stream.into_bytes().unwrap(), b"hey now!");
    }

    #[test]
    fn close_is_idempotent() {
        let (mut stream, released) = tracked("hey now!");
        stream.close();
        assert!(released.load(Ordering::SeqCst));
        stream.close();
        assert!(stream.is_closed());
    }

    #[test]
    fn closed_stream_reads_as_eof() {
        let mut stream = ResponseStream::from_bytes("data");
        stream.close();
        let mut buf = [0u8; 4];
        assert_eq!(stream.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn drop_releases_the_connection() {
        let (stream, released) = tracked("x");
        drop(stream);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn decode_releases_on_success() {
        let (stream, released) = tracked(r#"[{"id":1},{"id":2}]"#);
        let items: Vec<Item> = stream.decode().unwrap();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn decode_releases_on_failure() {
        let (stream, released) = tracked("hey now!");
        let err = stream.decode::<Vec<Item>>().unwrap_err();
        assert!(err.is_decode());
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn stream_can_be_read_on_another_thread() {
        let (stream, released) = tracked("hey now!");
        let bytes = thread::spawn(move || stream.into_bytes().unwrap())
            .join()
            .unwrap();
        assert_eq!(bytes, b"hey now!");
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn trailing_garbage_is_a_decode_error() {
        let err = ResponseStream::from_bytes(r#"{"id":1} extra"#)
            .decode::<Item>()
            .unwrap_err();
        assert!(err.is_decode());
    }
}
