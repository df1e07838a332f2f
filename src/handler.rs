use std::sync::Arc;

use futures::Future;
use http;

use crate::{Body, BodyStream, BoxedResponse, Responder, ResponseBuilder};

/// A type which can respond to a HTTP request.
///
/// The trait is implemented automatically for functions of the form:
///
/// ```ignore
/// Fn(http::Request<impl Body>, ResponseBuilder) -> impl Responder
/// ```
///
/// which is how most handlers in this crate are written, including the
/// [static file handlers] and everything produced by the middlewares. It can also be
/// implemented manually for types carrying their own state.
///
/// To store handlers with differing body or responder types in one place (as the
/// middleware [`Stack`] does), erase their types with [`box_handler`].
///
/// [static file handlers]: handlers/static_files/index.html
/// [`Stack`]: middlewares/struct.Stack.html
/// [`box_handler`]: fn.box_handler.html
pub trait Handler<ReqBody>
where
    ReqBody: Body,
    Self: Send + Sync + 'static,
{
    /// The `Responder` returned by this handler.
    type Resp: Responder;

    /// Handles an incoming HTTP request.
    fn handle(&self, req: http::Request<ReqBody>, resp: ResponseBuilder) -> Self::Resp;
}

impl<Func, ReqBody, Resp> Handler<ReqBody> for Func
where
    Func: Fn(http::Request<ReqBody>, ResponseBuilder) -> Resp + Send + Sync + 'static,
    ReqBody: Body,
    Resp: Responder,
{
    type Resp = Resp;

    fn handle(&self, req: http::Request<ReqBody>, resp: ResponseBuilder) -> Resp {
        (self)(req, resp)
    }
}

/// A `Box<Handler>` with request body and responder types erased.
///
/// Middlewares in a [`Stack`] receive and return this type, so that handlers using
/// different body types can form one chain.
///
/// [`Stack`]: middlewares/struct.Stack.html
pub type BoxedHandler = Box<dyn Handler<BodyStream, Resp = BoxedResponse> + Send + Sync>;

/// Erases the body and responder types of a handler, boxing it.
///
/// The returned handler takes the raw request body stream, collects it into the body
/// type the inner handler expects, and lowers the inner handler's response back into a
/// type-erased response future.
pub fn box_handler<H, ReqBody>(handler: H) -> BoxedHandler
where
    H: Handler<ReqBody>,
    ReqBody: Body,
{
    let handler = Arc::new(handler);
    let closure = move |req: http::Request<BodyStream>, resp: ResponseBuilder| -> BoxedResponse {
        let handler = handler.clone();
        let (parts, body) = req.into_parts();
        let fut = ReqBody::from_stream(body)
            .map(move |body| http::Request::from_parts(parts, body))
            .and_then(move |req| handler.handle(req, resp).into_response());
        Box::new(fut) as BoxedResponse
    };
    Box::new(closure)
}
