//! Plain-text renderings of requests and responses for verbose mode.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Request, StatusCode};
use std::borrow::Cow;

pub(crate) const TARGET: &str = "solarmanager::dump";

pub(crate) fn request(request: &Request) -> String {
    let mut out = format!("{} {}\n", request.method(), request.url());
    write_headers(&mut out, request.headers());
    if let Some(body) = request.body().and_then(|body| body.as_bytes()) {
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}

pub(crate) fn response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> String {
    let mut out = format!("{status}\n");
    write_headers(&mut out, headers);
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let value = if name == AUTHORIZATION {
            Cow::Borrowed("***")
        } else {
            String::from_utf8_lossy(value.as_bytes())
        };
        out.push_str(&format!("{name}: {value}\n"));
    }
}
