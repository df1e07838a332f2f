use futures::{Future, IntoFuture};
use http;

use crate::{Body, BodyStream, Error};

/// A HTTP response future with erased body and responder types.
pub type BoxedResponse = Box<dyn Future<Item = http::Response<BodyStream>, Error = Error> + Send>;

/// A value describing a HTTP response.
///
/// Handlers may return responses in a number of shapes: a plain `http::Response`, a
/// `Result` of one (as produced by `ResponseBuilder::body`), or a future resolving to
/// one. This trait unifies them by converting each into a [`BoxedResponse`], with the
/// body lowered to a byte stream.
///
/// It is implemented for anything that converts into a future of `http::Response<B>`
/// whose error converts into the crate [`Error`].
///
/// [`BoxedResponse`]: type.BoxedResponse.html
/// [`Error`]: type.Error.html
pub trait Responder: Send + 'static {
    /// The body type of the underlying response.
    type Body: Body;

    /// Converts into a type-erased response future.
    fn into_response(self) -> BoxedResponse;
}

impl<T, B> Responder for T
where
    T: IntoFuture<Item = http::Response<B>> + Send + 'static,
    T::Error: Into<Error>,
    T::Future: Send + 'static,
    B: Body,
{
    type Body = B;

    fn into_response(self) -> BoxedResponse {
        let fut = self.into_future()
            .map(|resp| resp.map(Body::into_stream))
            .map_err(Into::into);
        Box::new(fut) as BoxedResponse
    }
}
