//! A [`hyper`]-backed HTTP server which serves a [`Handler`].
//!
//! [`hyper`]: https://hyper.rs
//! [`Handler`]: ../../trait.Handler.html

use std::marker::PhantomData;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::{Future, Stream};
use http;
use hyper;
use hyper::server::Server as HyperServer;

use crate::{Body, BodyStream, Error, Handler, Responder, Result};

/// A HTTP server which listens on a socket and responds using a [`Handler`].
///
/// The socket is bound when the server is constructed, so a port conflict (or any
/// other bind failure) is reported by [`new`] rather than later: there is no retry
/// and no port-hunting. [`run`] then drives the default [`tokio`] runtime, serving
/// requests on its thread pool until the process is terminated.
///
/// Binding eagerly also means port `0` can be used to listen on an OS-assigned port,
/// with [`addr`] reporting the actual one — which is how the integration tests run
/// many servers in one process.
///
/// [`Handler`]: ../../trait.Handler.html
/// [`new`]: #method.new
/// [`run`]: #method.run
/// [`addr`]: #method.addr
/// [`tokio`]: https://tokio.rs
///
/// # Example
///
/// ```no_run
/// # extern crate servedir;
/// # extern crate http;
/// #
/// # use servedir::{Responder, ResponseBuilder, Result};
/// # use http::Request;
/// #
/// # fn handler(_req: Request<()>, mut resp: ResponseBuilder) -> impl Responder {
/// #    resp.body("Hello, world!".to_owned())
/// # }
/// #
/// # fn main() -> Result<()> {
/// let addr = "127.0.0.1:3000".parse()?;
/// servedir::servers::hyper::Server::new(addr, handler)?.run()
/// # }
/// ```
pub struct Server<H, ReqBody>
where
    H: Handler<ReqBody>,
    ReqBody: Body,
{
    addr: SocketAddr,
    serve: Box<dyn FnOnce() -> Result<()> + Send>,
    marker: PhantomData<(H, ReqBody)>,
}

impl<H, ReqBody> Server<H, ReqBody>
where
    H: Handler<ReqBody>,
    ReqBody: Body,
{
    /// Binds the provided address and creates a server which will respond to requests
    /// using the provided [`Handler`].
    ///
    /// Returns an error if the address cannot be bound (for example, if the port is
    /// already in use).
    ///
    /// [`Handler`]: ../../trait.Handler.html
    pub fn new(addr: SocketAddr, handler: H) -> Result<Server<H, ReqBody>> {
        let handler = Arc::new(handler);
        let new_service = move || {
            let handler = handler.clone();
            hyper::service::service_fn(move |req| {
                let handler = handler.clone();
                let builder = http::Response::builder();

                map_request_body(req)
                    .and_then(move |req| handler.handle(req, builder).into_response())
                    .map(map_response_body)
                    .or_else(|err| internal_server_error(&err))
            })
        };

        let server = HyperServer::try_bind(&addr)?.serve(new_service);
        let addr = server.local_addr();

        let serve: Box<dyn FnOnce() -> Result<()> + Send> = Box::new(move || {
            hyper::rt::run(server.map_err(|e| {
                eprintln!("server error: {}", e);
            }));
            Ok(())
        });

        Ok(Server {
            addr,
            serve,
            marker: PhantomData,
        })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Runs the server, blocking until the process is terminated.
    pub fn run(self) -> Result<()> {
        (self.serve)()
    }
}

fn map_request_body<ReqBody>(
    req: http::Request<hyper::Body>,
) -> impl Future<Item = http::Request<ReqBody>, Error = Error>
where
    ReqBody: Body,
{
    let (parts, body) = req.into_parts();
    let stream = body.map(hyper::Chunk::into_bytes).map_err(Box::from);
    ReqBody::from_stream(Box::new(stream) as BodyStream)
        .map(move |body| http::Request::from_parts(parts, body))
}

fn map_response_body(resp: http::Response<BodyStream>) -> http::Response<hyper::Body> {
    resp.map(hyper::Body::wrap_stream)
}

// Errors escaping the handler chain have no response to send, so answer with an
// empty 500 and keep serving.
fn internal_server_error(err: &Error) -> Result<http::Response<hyper::Body>> {
    eprintln!("server error: {}", err);

    let resp = http::Response::builder()
        .status(http::StatusCode::INTERNAL_SERVER_ERROR)
        .body(hyper::Body::empty())?;
    Ok(resp)
}
