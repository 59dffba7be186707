//! Wire-level request/response dumps for the debug log channel.
//!
//! Enabled by [`ClientConfig::trace_http`](crate::config::ClientConfig).
//! Every emitted line is indented by four spaces so the dumps stand apart
//! from surrounding log output. Octet bodies are suppressed.

use std::fmt::Write as _;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use tracing::debug;

use super::transport::Body;

const INDENT: &str = "    ";

pub(crate) fn trace_request(method: &Method, url: &str, headers: &HeaderMap, body: Option<&Body>) {
    let mut dump = format!("{method} {url}\n");
    write_headers(&mut dump, headers);
    match body {
        Some(Body::Json(value)) => {
            let rendered =
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            let _ = write!(dump, "{rendered}");
        }
        Some(Body::Octet(bytes)) => {
            let _ = write!(dump, "<{} octet-stream bytes suppressed>", bytes.len());
        }
        None => {}
    }
    debug!("request:\n{}", indent(&dump));
}

pub(crate) fn trace_response(status: StatusCode, headers: &HeaderMap, body: &str) {
    let mut dump = format!("{status}\n");
    write_headers(&mut dump, headers);
    let _ = write!(dump, "{body}");
    debug!("response:\n{}", indent(&dump));
}

fn write_headers(dump: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<non-ascii>");
        let _ = writeln!(dump, "{name}: {value}");
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_is_indented_by_four_spaces() {
        let indented = indent("GET /api\nAccept: application/json\n{\"a\":1}");
        for line in indented.lines() {
            assert!(line.starts_with(INDENT), "line {line:?}");
        }
    }

    #[test]
    fn indent_preserves_line_count() {
        assert_eq!(indent("a\nb\nc").lines().count(), 3);
    }
}
