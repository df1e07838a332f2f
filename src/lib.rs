//! A small HTTP toolkit for serving a directory of files.
//!
//! `servedir` is built around three pieces:
//!
//!  - A [`Handler`] trait, describing anything which can turn a HTTP request into a
//!    HTTP response. Plain functions of the form
//!    `Fn(http::Request<impl Body>, ResponseBuilder) -> impl Responder` implement it
//!    automatically.
//!  - A [middleware stack], an ordered sequence of middlewares, each of which is given
//!    the next handler in the chain and may act on the request/response around it.
//!  - A [hyper server backend], which binds a listening socket and serves a handler.
//!
//! The `servedir` binary wires these together: a request logging middleware, followed
//! by a [static file handler] rooted at the current working directory, served on the
//! port named by the `PORT` environment variable (3000 if unset).
//!
//! [`Handler`]: trait.Handler.html
//! [middleware stack]: middlewares/struct.Stack.html
//! [hyper server backend]: servers/hyper/struct.Server.html
//! [static file handler]: handlers/static_files/fn.static_files_handler.html

extern crate bytes;
extern crate futures;
extern crate http;
extern crate hyper;
#[cfg(feature = "mime_guess")]
extern crate mime_guess;

mod body;
mod handler;
mod responder;

pub mod config;
pub mod handlers;
pub mod middlewares;
pub mod servers;

pub use body::{empty_body, Body, BodyStream};
pub use handler::{box_handler, BoxedHandler, Handler};
pub use responder::{BoxedResponse, Responder};

/// The crate-wide error type.
///
/// Handlers and the bootstrap propagate errors without recovering from them: any error
/// reaching `main` terminates the process, and any error reaching the server boundary
/// becomes an empty `500 Internal Server Error` response.
pub type Error = Box<dyn ::std::error::Error + Send + Sync>;

/// A `Result` whose error is the crate-wide [`Error`](type.Error.html).
pub type Result<T> = ::std::result::Result<T, Error>;

/// Builder for HTTP responses, passed to every [`Handler`](trait.Handler.html).
pub type ResponseBuilder = http::response::Builder;
