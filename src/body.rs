//! Request body stream.
//!
//! A [`Body`] is single-pass: hyper hands the server a stream of frames and
//! whoever reads it consumes it. Middleware that needs to look at the bytes
//! reads the stream to the end and puts a fresh [`Body`] over the buffered
//! bytes back on the request.

use std::convert::Infallible;
use std::error::Error as StdError;

use bytes::{Bytes, BytesMut};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};

/// Boxed error produced by the underlying body stream.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A streaming request body.
pub struct Body(UnsyncBoxBody<Bytes, BoxError>);

impl Body {
    /// A body with no bytes.
    pub fn empty() -> Self {
        Self(Empty::new().map_err(never).boxed_unsync())
    }

    /// Wraps any `http_body::Body` stream (e.g. hyper's `Incoming`).
    pub fn from_stream<B>(body: B) -> Self
    where
        B: hyper::body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        Self(body.map_err(Into::into).boxed_unsync())
    }

    /// Reads the whole stream into memory.
    pub async fn read_to_end(self) -> Result<Bytes, BoxError> {
        Ok(self.0.collect().await?.to_bytes())
    }

    /// Reads the stream until it ends or fails.
    ///
    /// Unlike [`read_to_end`](Body::read_to_end), the bytes received before a
    /// failure are kept and returned alongside the error.
    pub async fn read_partial(mut self) -> (Bytes, Option<BoxError>) {
        let mut buf = BytesMut::new();
        while let Some(frame) = self.0.frame().await {
            match frame {
                Ok(frame) => {
                    if let Ok(data) = frame.into_data() {
                        buf.extend_from_slice(&data);
                    }
                }
                Err(e) => return (buf.freeze(), Some(e)),
            }
        }
        (buf.freeze(), None)
    }
}

impl Default for Body {
    fn default() -> Self { Self::empty() }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self(Full::new(bytes).map_err(never).boxed_unsync())
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self { Self::from(Bytes::from_static(s.as_bytes())) }
}

fn never(e: Infallible) -> BoxError {
    match e {}
}
