//! Raw HTTP traffic dumps for diagnostics
//!
//! A [`Tracer`] receives a text rendering of every outbound request and its
//! response. Recording is a side channel: it cannot fail a call, and the
//! bearer token and client secret are masked before a dump leaves the client.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Request, StatusCode, Version};
use std::borrow::Cow;
use std::fmt::Write as _;

const REDACTED: &str = "<redacted>";

/// Sink for formatted request/response dumps
pub trait Tracer: Send + Sync {
    /// Record one dump
    fn record(&self, dump: &str);
}

impl<F> Tracer for F
where
    F: Fn(&str) + Send + Sync,
{
    fn record(&self, dump: &str) {
        self(dump);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn record(&self, _dump: &str) {}
}

/// Forwards dumps to `tracing` at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn record(&self, dump: &str) {
        tracing::debug!(target: "ingram_api_client::trace", "\n{dump}");
    }
}

/// Render a request the way it goes on the wire
pub(crate) fn dump_request(request: &Request) -> String {
    let url = request.url();
    let mut out = String::new();

    let target = match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    };
    let _ = write!(out, "{} {target} {:?}\r\n", request.method(), request.version());

    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = write!(out, "Host: {host}:{port}\r\n");
            }
            None => {
                let _ = write!(out, "Host: {host}\r\n");
            }
        }
    }
    write_headers(&mut out, request.headers());
    out.push_str("\r\n");

    if let Some(bytes) = request.body().and_then(reqwest::Body::as_bytes) {
        out.push_str(&redact_form_secret(&String::from_utf8_lossy(bytes)));
    }

    out
}

/// Render a response; the body has already been read by the caller
pub(crate) fn dump_response(
    status: StatusCode,
    version: Version,
    headers: &HeaderMap,
    body: &str,
) -> String {
    let mut out = format!("{version:?} {status}\r\n");
    write_headers(&mut out, headers);
    out.push_str("\r\n");
    out.push_str(body);
    out
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let value = if *name == AUTHORIZATION {
            Cow::Borrowed(REDACTED)
        } else {
            String::from_utf8_lossy(value.as_bytes())
        };
        let _ = write!(out, "{name}: {value}\r\n");
    }
}

/// Mask `client_secret` in a form-encoded body
fn redact_form_secret(body: &str) -> String {
    if !body.contains("client_secret=") {
        return body.to_string();
    }

    body.split('&')
        .map(|pair| {
            if pair.starts_with("client_secret=") {
                format!("client_secret={REDACTED}")
            } else {
                pair.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
