//! Handlers which serve files from disk.
//!
//! Two handlers are provided:
//!
//!  - [`static_files_handler(root)`]: serves files from a directory, resolving the path
//!    of each incoming request against the directory.
//!  - [`static_file_handler(path)`]: serves a single file from disk, whatever the
//!    request path.
//!
//! [`static_files_handler(root)`]: fn.static_files_handler.html
//! [`static_file_handler(path)`]: fn.static_file_handler.html
//!
//! # Path resolution
//!
//! A request for `GET /a/b.html` is resolved to `root/a/b.html`. Resolved paths are
//! canonicalized and checked to still lie under the content root, so a request cannot
//! traverse out of the directory being served. A request whose path resolves to a
//! directory is served that directory's `index.html`.
//!
//! # Not-found behavior
//!
//! Every I/O error raised while resolving or reading a file (nonexistent path,
//! permission failure, path escaping the root) is mapped to the same deterministic
//! response: status `404` with the plain-text body `404 - not found`.
//!
//! # MIME types
//!
//! The `Content-Type` of a response is guessed from the file extension using the
//! [`mime_guess` crate]. Disabling the `mime_guess` cargo feature removes that
//! dependency, and every response is then served as `application/octet-stream`.
//!
//! [`mime_guess` crate]: https://github.com/abonander/mime_guess
//!
//! # Security
//!
//! These handlers are meant for serving a directory in development. Production assets
//! belong behind a dedicated file server such as nginx.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use http;
#[cfg(feature = "mime_guess")]
use mime_guess;

use crate::middlewares;
use crate::{Error, Handler, ResponseBuilder, Result};

/// Serves files from a directory, based on the path of incoming requests.
///
/// The directory is canonicalized once, when the handler is constructed; a missing or
/// unreadable directory is reported as an error here rather than on the first request.
///
/// See the [module level documentation] for path resolution, not-found and MIME typing
/// behavior.
///
/// [module level documentation]: index.html
pub fn static_files_handler<P>(root: P) -> Result<impl Handler<()>>
where
    P: AsRef<Path>,
{
    let root = root.as_ref().canonicalize()?;

    let handler = middlewares::with_context(root, |root, req, resp| {
        let path = resolve(root, req.uri().path())?;
        serve_file(path, resp)
    });
    Ok(middlewares::with_error_handling(handler, not_found_on_io_error))
}

/// Serves one file from disk, in response to any request.
///
/// The file is read per request, so changes on disk are picked up without restarting.
/// I/O errors are served as the same `404` response used by
/// [`static_files_handler`](fn.static_files_handler.html).
pub fn static_file_handler<P>(path: P) -> impl Handler<()>
where
    P: AsRef<Path> + Clone + Send + Sync + 'static,
{
    let handler = middlewares::with_context(path, |path, _, resp| serve_file(path, resp));
    middlewares::with_error_handling(handler, not_found_on_io_error)
}

fn not_found_on_io_error(error: Error) -> Result<http::Response<String>> {
    match error.downcast::<io::Error>() {
        Ok(_) => {
            let resp = http::Response::builder()
                .status(http::StatusCode::NOT_FOUND)
                .body("404 - not found".to_owned())?;
            Ok(resp)
        }
        Err(error) => Err(error),
    }
}

/// Maps a request path to a file under `root`.
///
/// Escaping the root is reported as `NotFound`, indistinguishable from a file that
/// isn't there. Directories resolve to the `index.html` they contain.
fn resolve(root: PathBuf, request_path: &str) -> Result<PathBuf> {
    let relative = Path::new(request_path).strip_prefix("/")?;
    let resolved = root.join(relative).canonicalize()?;

    if !resolved.starts_with(&root) {
        return Err(io::Error::from(io::ErrorKind::NotFound).into());
    }

    if resolved.is_dir() {
        return Ok(resolved.join("index.html"));
    }
    Ok(resolved)
}

fn serve_file<P>(path: P, mut resp: ResponseBuilder) -> Result<http::Response<Vec<u8>>>
where
    P: AsRef<Path>,
{
    let content = read_file(&path)?;
    let resp = resp.header(http::header::CONTENT_TYPE, mime_type(path).as_str())
        .body(content)?;
    Ok(resp)
}

fn read_file<P>(path: P) -> Result<Vec<u8>>
where
    P: AsRef<Path>,
{
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

#[cfg(feature = "mime_guess")]
fn mime_type<P>(path: P) -> String
where
    P: AsRef<Path>,
{
    let mime = mime_guess::guess_mime_type(path);
    format!("{}", mime)
}

#[cfg(not(feature = "mime_guess"))]
fn mime_type<P>(_: P) -> String
where
    P: AsRef<Path>,
{
    "application/octet-stream".to_owned()
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::resolve;

    fn fixtures_root() -> ::std::path::PathBuf {
        // Relative to the crate root, where cargo runs tests from.
        Path::new("tests/fixtures").to_path_buf().canonicalize().unwrap()
    }

    #[test]
    fn resolve_file_in_directory() {
        let root = fixtures_root();
        let path = resolve(root.clone(), "/hello.txt").unwrap();
        assert_eq!(path, root.join("hello.txt"));
    }

    #[test]
    fn resolve_directory_serves_its_index() {
        let root = fixtures_root();
        let path = resolve(root.clone(), "/").unwrap();
        assert_eq!(path, root.join("index.html"));
    }

    #[test]
    fn resolve_missing_file_is_not_found() {
        let result = resolve(fixtures_root(), "/no-such-file.txt");
        assert!(result.is_err());
    }

    #[test]
    fn resolve_refuses_directory_traversal() {
        let result = resolve(fixtures_root(), "/../../Cargo.toml");
        assert!(result.is_err());
    }

    #[cfg(feature = "mime_guess")]
    #[test]
    fn mime_type_guessed_from_extension() {
        assert_eq!(super::mime_type("index.html"), "text/html");
    }
}
