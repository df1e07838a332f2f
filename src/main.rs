extern crate servedir;

use servedir::handlers::static_files::static_files_handler;
use servedir::middlewares::{self, Stack};
use servedir::servers::hyper::Server;
use servedir::{config, Result};

// Serves the working directory on $PORT (3000 if unset), logging each request.
// Startup failures propagate out of main and kill the process.
fn main() -> Result<()> {
    let addr = config::listen_addr()?;

    let mut stack = Stack::new();
    stack.push(middlewares::log_requests);
    let handler = stack.into_handler(static_files_handler(".")?);

    println!("Listening on http://{}", addr);
    Server::new(addr, handler)?.run()
}
