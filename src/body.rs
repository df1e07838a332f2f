use bytes::Bytes;
use futures::{future, stream, Future, Stream};

use crate::{Error, Result};

/// A type which can be used as the body of a HTTP request or response.
///
/// Bodies travel between the server backend and handlers as a [`BodyStream`], a boxed
/// stream of byte chunks. Implementing this trait for a type describes how to collect
/// such a stream into the type, and how to turn the type back into a stream, which is
/// what allows handlers with different body types to be chained together.
///
/// [`BodyStream`]: type.BodyStream.html
pub trait Body
where
    Self: Send + Sized + 'static,
{
    /// The future returned when collecting a stream into this body type.
    type Future: Future<Item = Self, Error = Error> + Send;

    /// Collects a stream of byte chunks into this body type.
    fn from_stream(stream: BodyStream) -> Self::Future;

    /// Turns this body back into a stream of byte chunks.
    fn into_stream(self) -> BodyStream;
}

/// A boxed stream of byte chunks, the common currency all bodies convert through.
pub type BodyStream = Box<dyn Stream<Item = Bytes, Error = Error> + Send>;

impl Body for BodyStream {
    type Future = future::FutureResult<BodyStream, Error>;

    fn from_stream(stream: BodyStream) -> Self::Future {
        future::ok(stream)
    }

    fn into_stream(self) -> BodyStream {
        self
    }
}

/// `()` ignores the request body entirely. Handlers which don't care about the body
/// (such as the static file handlers) use it to avoid buffering the request.
impl Body for () {
    type Future = future::FutureResult<(), Error>;

    fn from_stream(_: BodyStream) -> Self::Future {
        future::ok(())
    }

    fn into_stream(self) -> BodyStream {
        empty_body()
    }
}

impl Body for Vec<u8> {
    type Future = future::Map<stream::Concat2<BodyStream>, fn(Bytes) -> Vec<u8>>;

    fn from_stream(stream: BodyStream) -> Self::Future {
        stream.concat2().map(|bytes| bytes.to_vec())
    }

    fn into_stream(self) -> BodyStream {
        Box::new(stream::once(Ok(Bytes::from(self))))
    }
}

impl Body for String {
    type Future =
        future::AndThen<stream::Concat2<BodyStream>, Result<String>, fn(Bytes) -> Result<String>>;

    fn from_stream(stream: BodyStream) -> Self::Future {
        stream.concat2().and_then(|bytes| {
            let string = String::from_utf8(bytes.to_vec())?;
            Ok(string)
        })
    }

    fn into_stream(self) -> BodyStream {
        Box::new(stream::once(Ok(Bytes::from(self))))
    }
}

/// Returns a `BodyStream` containing no bytes.
pub fn empty_body() -> BodyStream {
    Box::new(stream::once(Ok(Bytes::new())))
}
