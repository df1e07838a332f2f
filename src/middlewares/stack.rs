use std::sync::Arc;

use http;

use crate::{box_handler, Body, BodyStream, BoxedHandler, BoxedResponse, Handler, ResponseBuilder};

/// An ordered middleware chain.
///
/// A `Stack` holds a sequence of middlewares, each a function which is given the next
/// handler in the chain and returns the handler that wraps it. Calling
/// [`into_handler`] with a terminal handler folds the chain into a single handler, in
/// which the **first** middleware pushed is the **outermost**: it sees the request
/// first and the response last.
///
/// [`into_handler`]: #method.into_handler
///
/// # Example
///
/// ```no_run
/// extern crate servedir;
///
/// use servedir::handlers::static_files::static_files_handler;
/// use servedir::middlewares::{self, Stack};
/// use servedir::servers::hyper::Server;
/// use servedir::Result;
///
/// fn main() -> Result<()> {
///     let mut stack = Stack::new();
///     stack.push(middlewares::log_requests);
///     let handler = stack.into_handler(static_files_handler(".")?);
///
///     let addr = "127.0.0.1:3000".parse()?;
///     Server::new(addr, handler)?.run()
/// }
/// ```
#[derive(Default)]
pub struct Stack {
    middlewares: Vec<Box<dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync>>,
}

impl Stack {
    /// Creates an empty `Stack`.
    pub fn new() -> Stack {
        Stack::default()
    }

    /// Appends a middleware to the chain.
    ///
    /// Middlewares run in the order they are pushed.
    pub fn push<M>(&mut self, middleware: M)
    where
        M: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
    {
        self.middlewares.push(Box::new(middleware));
    }

    /// Folds the chain around a terminal handler, producing a single handler.
    ///
    /// The terminal handler sits innermost; middlewares wrap it back to front, so the
    /// first middleware pushed ends up outermost.
    pub fn into_handler<H, ReqBody>(self, terminal: H) -> impl Handler<BodyStream>
    where
        H: Handler<ReqBody>,
        ReqBody: Body,
    {
        let mut handler = box_handler(terminal);
        for middleware in self.middlewares.into_iter().rev() {
            handler = middleware(handler);
        }

        let handler = Arc::new(handler);
        move |req: http::Request<BodyStream>, resp: ResponseBuilder| -> BoxedResponse {
            handler.handle(req, resp)
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use futures::Future;
    use http;

    use super::Stack;
    use crate::{box_handler, empty_body, BodyStream, BoxedHandler, BoxedResponse, Handler, Responder,
         ResponseBuilder};

    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    fn recording(name: &'static str, log: CallLog) -> impl Fn(BoxedHandler) -> BoxedHandler {
        move |next: BoxedHandler| -> BoxedHandler {
            let log = log.clone();
            let next = Arc::new(next);
            box_handler(
                move |req: http::Request<BodyStream>, resp: ResponseBuilder| -> BoxedResponse {
                    log.lock().unwrap().push(name);
                    next.handle(req, resp)
                },
            )
        }
    }

    fn call(handler: &impl Handler<BodyStream>) -> http::Response<BodyStream> {
        let req = http::Request::builder().body(empty_body()).unwrap();
        let builder = http::Response::builder();
        handler.handle(req, builder).into_response().wait().unwrap()
    }

    #[test]
    fn first_pushed_runs_first() {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));

        let mut stack = Stack::new();
        stack.push(recording("outer", log.clone()));
        stack.push(recording("inner", log.clone()));

        let terminal_log = log.clone();
        let handler = stack.into_handler(
            move |_: http::Request<()>, mut resp: ResponseBuilder| {
                terminal_log.lock().unwrap().push("terminal");
                resp.body(())
            },
        );

        call(&handler);
        assert_eq!(*log.lock().unwrap(), vec!["outer", "inner", "terminal"]);
    }

    #[test]
    fn empty_stack_is_just_the_terminal_handler() {
        let handler = Stack::new().into_handler(|_: http::Request<()>, mut resp: ResponseBuilder| {
            resp.status(http::StatusCode::NO_CONTENT).body(())
        });

        let resp = call(&handler);
        assert_eq!(resp.status(), http::StatusCode::NO_CONTENT);
    }
}
