extern crate http;
extern crate reqwest;
extern crate servedir;

use std::net::SocketAddr;
use std::thread;

use http::Request;
use servedir::handlers::static_files::{static_file_handler, static_files_handler};
use servedir::middlewares::{self, Stack};
use servedir::{Body, Handler, ResponseBuilder};

struct Server {
    addr: SocketAddr,
}

impl Server {
    fn start_in_thread<B: Body>(handler: impl Handler<B>) -> Self {
        let addr = "127.0.0.1:0".parse().unwrap();
        let server = servedir::servers::hyper::Server::new(addr, handler).unwrap();
        let addr = server.addr();
        thread::spawn(move || server.run());
        Server { addr }
    }

    fn path(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

#[test]
fn serves_file_from_content_root() {
    let handler = static_files_handler("./tests/fixtures/").unwrap();
    let server = Server::start_in_thread(handler);

    let mut resp = reqwest::get(&server.path("/hello.txt")).unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().unwrap(), "hello");
}

#[test]
fn missing_path_is_a_deterministic_not_found() {
    let handler = static_files_handler("./tests/fixtures/").unwrap();
    let server = Server::start_in_thread(handler);

    for _ in 0..2 {
        let mut resp = reqwest::get(&server.path("/no-such-file")).unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
        assert_eq!(resp.text().unwrap(), "404 - not found");
    }
}

#[test]
fn directory_request_serves_its_index() {
    let handler = static_files_handler("./tests/fixtures/").unwrap();
    let server = Server::start_in_thread(handler);

    let mut resp = reqwest::get(&server.path("/")).unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert!(resp.text().unwrap().contains("fixture index"));
}

#[test]
fn single_file_handler_ignores_request_path() {
    let handler = static_file_handler("./tests/fixtures/hello.txt");
    let server = Server::start_in_thread(handler);

    let mut resp = reqwest::get(&server.path("/anything/at/all")).unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().unwrap(), "hello");
}

#[test]
fn missing_content_root_fails_at_construction() {
    assert!(static_files_handler("./tests/no-such-dir/").is_err());
}

// The bootstrap composition: logging middleware stacked in front of a handler. The
// logger writes to stdout, so this only asserts the request still flows through the
// chain unchanged.
#[test]
fn stacked_logging_passes_requests_through() {
    let mut stack = Stack::new();
    stack.push(middlewares::log_requests);
    let handler = stack.into_handler(|req: Request<String>, mut resp: ResponseBuilder| {
        resp.body(req.into_body())
    });
    let server = Server::start_in_thread(handler);

    let client = reqwest::Client::new();
    let mut resp = client
        .post(&server.path("/"))
        .body("some body")
        .send()
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.text().unwrap(), "some body");
}

#[test]
fn binding_an_already_bound_port_fails_at_startup() {
    let handler = |_: Request<()>, mut resp: ResponseBuilder| resp.body(());

    let addr = "127.0.0.1:0".parse().unwrap();
    let first = servedir::servers::hyper::Server::new(addr, handler).unwrap();

    let second = servedir::servers::hyper::Server::new(first.addr(), handler);
    assert!(second.is_err());
}
