//! Middlewares which wrap handlers with behavior shared across an application.
//!
//! A middleware in this crate is any function from one [`Handler`] to another. Two
//! shapes are provided:
//!
//!  - generic wrappers such as [`with_stdout_logging`], applied directly to a handler;
//!  - chain middlewares such as [`log_requests`], with the type-erased signature
//!    `Fn(BoxedHandler) -> BoxedHandler`, for composition through a [`Stack`].
//!
//! [`Handler`]: ../trait.Handler.html
//! [`with_stdout_logging`]: fn.with_stdout_logging.html
//! [`log_requests`]: fn.log_requests.html
//! [`Stack`]: struct.Stack.html

mod stack;

use std::sync::Arc;

use futures::Future;
use http;

use crate::{box_handler, Body, BodyStream, BoxedHandler, BoxedResponse, Error, Handler, Responder,
     ResponseBuilder};

pub use self::stack::Stack;

/// Wraps a handler, logging one line per request to stdout.
///
/// The line has the form `<method> <path> <status>` and is written once the wrapped
/// handler's response has resolved.
pub fn with_stdout_logging<B: Body>(handler: impl Handler<B>) -> impl Handler<B> {
    move |req: http::Request<B>, resp: ResponseBuilder| {
        let method = req.method().clone();
        let uri = req.uri().clone();

        handler.handle(req, resp).into_response().map(move |resp| {
            println!("{} {} {}", method, uri.path(), resp.status());
            resp
        })
    }
}

/// The request logging middleware in chain shape, for use with a [`Stack`].
///
/// Equivalent to [`with_stdout_logging`], with its types erased so it can sit at any
/// position in a chain.
///
/// [`Stack`]: struct.Stack.html
/// [`with_stdout_logging`]: fn.with_stdout_logging.html
pub fn log_requests(next: BoxedHandler) -> BoxedHandler {
    let next = Arc::new(next);
    let forward = move |req: http::Request<BodyStream>, resp: ResponseBuilder| -> BoxedResponse {
        next.handle(req, resp)
    };
    box_handler(with_stdout_logging(forward))
}

/// Builds a handler from a function taking some shared context as its first argument.
///
/// The context is cloned for every request, so it is usually an `Arc`, a `PathBuf`, or
/// similar cheap-to-clone data.
pub fn with_context<Ctx, Func, ReqBody, Resp>(ctx: Ctx, handler: Func) -> impl Handler<ReqBody>
where
    Ctx: Clone + Send + Sync + 'static,
    Func: Fn(Ctx, http::Request<ReqBody>, ResponseBuilder) -> Resp + Send + Sync + 'static,
    ReqBody: Body,
    Resp: Responder,
{
    move |req, resp| handler(ctx.clone(), req, resp)
}

/// Wraps a handler, routing any error it produces through a recovery function.
///
/// The recovery function may turn the error into a response (as the static file
/// handlers do for I/O errors, serving a 404) or return it unchanged, in which case it
/// propagates to the server boundary and becomes a 500.
pub fn with_error_handling<H, B, Func, Resp>(handler: H, error_handler: Func) -> impl Handler<B>
where
    H: Handler<B>,
    B: Body,
    Func: Fn(Error) -> Resp + Send + Sync + 'static,
    Resp: Responder,
{
    let error_handler = Arc::new(error_handler);
    move |req: http::Request<B>, resp: ResponseBuilder| -> BoxedResponse {
        let error_handler = error_handler.clone();
        let fut = handler
            .handle(req, resp)
            .into_response()
            .or_else(move |error| error_handler(error).into_response());
        Box::new(fut) as BoxedResponse
    }
}
