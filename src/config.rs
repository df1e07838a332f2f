//! Startup configuration, read once from the environment.

use std::env;
use std::net::SocketAddr;

use crate::Result;

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 3000;

/// Resolves the address to listen on: `0.0.0.0` on the port named by the `PORT`
/// environment variable, or [`DEFAULT_PORT`] if the variable is unset or empty.
///
/// The variable's value is not validated here. A non-numeric value fails when the
/// address is parsed, surfacing as a startup error, consistent with the policy of
/// crashing on any startup failure rather than guessing.
///
/// [`DEFAULT_PORT`]: constant.DEFAULT_PORT.html
pub fn listen_addr() -> Result<SocketAddr> {
    addr_from_port(&port_from_env("PORT"))
}

fn port_from_env(key: &str) -> String {
    match env::var(key) {
        Ok(ref value) if !value.is_empty() => value.clone(),
        _ => DEFAULT_PORT.to_string(),
    }
}

fn addr_from_port(port: &str) -> Result<SocketAddr> {
    let addr = format!("0.0.0.0:{}", port).parse()?;
    Ok(addr)
}
