use super::input::Input;
use super::types::{
    Archive, Browser, Content, Cookie, Creator, Entry, Headers, Page, QueryParam, Request,
    Response,
};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

static NULL: Value = Value::Null;

/// Decode a HAR document into an [`Archive`].
///
/// Streams are read to completion first. The whole document is parsed
/// before any mapping happens, so either a complete archive is returned or
/// nothing is. Keys missing from the document decode to empty or zero
/// values rather than failing.
pub fn decode<'a>(input: impl Into<Input<'a>>) -> Result<Archive> {
    let text = input.into().into_text()?;

    tracing::debug!("Parsing HAR document ({} bytes)", text.len());
    let document: Value = serde_json::from_str(&text)?;

    let root = document.as_object().ok_or_else(|| {
        Error::InvalidStructure(format!(
            "document root must be a JSON object, found {}",
            json_kind(&document)
        ))
    })?;
    let log = root.get("log").unwrap_or(&NULL);

    tracing::debug!("Mapping HAR document onto archive model");
    let archive = Archive {
        creator: extract_creator(log),
        browser: extract_browser(log),
        pages: extract_pages(log),
        entries: extract_entries(log),
    };

    if archive.entries.is_empty() {
        tracing::warn!("HAR document contains no entries");
    }

    tracing::info!(
        "Decoded HAR archive with {} pages and {} entries",
        archive.pages.len(),
        archive.entries.len()
    );

    Ok(archive)
}

/// Convenience entry points mirroring the common input sources
pub struct ArchiveDecoder;

impl ArchiveDecoder {
    /// Read and decode a HAR file from the given path
    pub fn from_file(path: &Path) -> Result<Archive> {
        decode(Input::from_path(path)?)
    }

    /// Decode a HAR document held in a string
    pub fn from_str(content: &str) -> Result<Archive> {
        decode(content)
    }

    /// Read a stream to completion and decode it
    pub fn from_reader<R: Read>(reader: R) -> Result<Archive> {
        decode(Input::stream(reader))
    }
}

fn extract_creator(log: &Value) -> Creator {
    let creator = child(log, "creator");
    Creator {
        name: string(creator, "name"),
        version: string(creator, "version"),
    }
}

fn extract_browser(log: &Value) -> Browser {
    let browser = child(log, "browser");
    Browser {
        name: string(browser, "name"),
        version: string(browser, "version"),
    }
}

fn extract_pages(log: &Value) -> Vec<Page> {
    array(log, "pages")
        .iter()
        .map(|page| {
            let timings = child(page, "pageTimings");
            Page {
                started_date_time: string(page, "startedDateTime"),
                id: string(page, "id"),
                title: string(page, "title"),
                on_content_load: timing(timings, "onContentLoad"),
                on_load: timing(timings, "onLoad"),
            }
        })
        .collect()
}

fn extract_entries(log: &Value) -> Vec<Entry> {
    array(log, "entries")
        .iter()
        .map(|entry| Entry {
            pageref: string(entry, "pageref"),
            started_date_time: string(entry, "startedDateTime"),
            time: number(entry, "time"),
            request: extract_request(child(entry, "request")),
            response: extract_response(child(entry, "response")),
            cache: child(entry, "cache").as_object().cloned().unwrap_or_default(),
            timings: extract_timings(child(entry, "timings")),
            server_ip_address: string(entry, "serverIPAddress"),
            connection: string(entry, "connection"),
        })
        .collect()
}

fn extract_request(request: &Value) -> Request {
    Request {
        method: string(request, "method"),
        url: string(request, "url"),
        http_version: string(request, "httpVersion"),
        cookies: extract_cookies(request),
        query_string: array(request, "queryString")
            .iter()
            .map(|param| QueryParam {
                name: string(param, "name"),
                value: string(param, "value"),
            })
            .collect(),
        headers: fold_headers(array(request, "headers")),
        headers_size: integer(request, "headersSize"),
        body_size: integer(request, "bodySize"),
    }
}

fn extract_response(response: &Value) -> Response {
    let content = child(response, "content");
    Response {
        status: integer(response, "status"),
        status_text: string(response, "statusText"),
        http_version: string(response, "httpVersion"),
        cookies: extract_cookies(response),
        content: Content {
            mime_type: string(content, "mimeType"),
            size: content.get("size").and_then(as_integer),
            compression: content.get("compression").and_then(as_integer),
            text: optional_string(content, "text"),
            encoding: optional_string(content, "encoding"),
        },
        redirect_url: string(response, "redirectURL"),
        headers: fold_headers(array(response, "headers")),
        headers_size: integer(response, "headersSize"),
        body_size: integer(response, "bodySize"),
    }
}

fn extract_cookies(message: &Value) -> Vec<Cookie> {
    array(message, "cookies")
        .iter()
        .map(|cookie| Cookie {
            name: string(cookie, "name"),
            value: string(cookie, "value"),
            path: optional_string(cookie, "path"),
            domain: optional_string(cookie, "domain"),
            expires: optional_string(cookie, "expires"),
            http_only: cookie.get("httpOnly").and_then(Value::as_bool),
            secure: cookie.get("secure").and_then(Value::as_bool),
        })
        .collect()
}

/// Fold a `[{name, value}, ...]` list into a map, applying pairs in list
/// order so a repeated name keeps its last value. Names match exactly.
fn fold_headers(pairs: &[Value]) -> Headers {
    pairs.iter().fold(Headers::new(), |mut headers, pair| {
        if let Some(name) = pair.get("name").and_then(Value::as_str) {
            headers.insert(name.to_string(), string(pair, "value"));
        }
        headers
    })
}

fn extract_timings(timings: &Value) -> BTreeMap<String, f64> {
    timings
        .as_object()
        .map(|phases| {
            phases
                .iter()
                .filter_map(|(phase, ms)| ms.as_f64().map(|ms| (phase.clone(), ms)))
                .collect()
        })
        .unwrap_or_default()
}

fn child<'v>(value: &'v Value, key: &str) -> &'v Value {
    value.get(key).unwrap_or(&NULL)
}

fn array<'v>(value: &'v Value, key: &str) -> &'v [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string(value: &Value, key: &str) -> String {
    optional_string(value, key).unwrap_or_default()
}

fn optional_string(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn integer(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(as_integer).unwrap_or(0)
}

fn number(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// HAR uses -1 for timings that were not recorded
fn timing(value: &Value, key: &str) -> Option<f64> {
    value
        .get(key)
        .and_then(Value::as_f64)
        .filter(|ms| *ms >= 0.0)
}

fn as_integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|number| number as i64))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ENTRY_HAR: &str = r#"{
        "log": {
            "version": "1.2",
            "creator": {"name": "Firebug", "version": "1.11"},
            "browser": {"name": "Firefox", "version": "21.0"},
            "pages": [{
                "startedDateTime": "2013-05-28T22:16:19.883+02:00",
                "id": "page_1",
                "title": "Example",
                "pageTimings": {"onContentLoad": 4994, "onLoad": 6745}
            }],
            "entries": [{
                "pageref": "page_1",
                "startedDateTime": "2013-05-28T22:16:19.883+02:00",
                "time": 54,
                "request": {
                    "method": "GET",
                    "url": "http://example.com/",
                    "httpVersion": "HTTP/1.1",
                    "cookies": [{"name": "sid", "value": "abc", "httpOnly": true}],
                    "queryString": [{"name": "q", "value": "1"}],
                    "headers": [
                        {"name": "Host", "value": "example.com"},
                        {"name": "X-Dup", "value": "1"},
                        {"name": "x-dup", "value": "lower"},
                        {"name": "X-Dup", "value": "2"}
                    ],
                    "headersSize": 316,
                    "bodySize": -1
                },
                "response": {
                    "status": 302,
                    "statusText": "Moved Temporarily",
                    "httpVersion": "HTTP/1.1",
                    "cookies": [],
                    "content": {"mimeType": "text/html", "size": 0},
                    "redirectURL": "blog/index.php",
                    "headers": [{"name": "Location", "value": "blog/index.php"}],
                    "headersSize": 281,
                    "bodySize": 0
                },
                "cache": {},
                "timings": {"blocked": 15, "dns": 0, "send": 0, "wait": 39, "receive": 0, "comment": "x"},
                "serverIPAddress": "91.239.200.165",
                "connection": "80"
            }]
        }
    }"#;

    #[test]
    fn test_decode_populates_model() {
        let archive = decode(ENTRY_HAR).unwrap();

        assert_eq!(archive.creator.name, "Firebug");
        assert_eq!(archive.creator.version, "1.11");
        assert_eq!(archive.browser.name, "Firefox");
        assert_eq!(archive.browser.version, "21.0");

        let page = &archive.pages[0];
        assert_eq!(page.id, "page_1");
        assert_eq!(page.on_content_load, Some(4994.0));
        assert_eq!(page.on_load, Some(6745.0));

        let entry = &archive.entries[0];
        assert_eq!(entry.pageref, "page_1");
        assert_eq!(entry.time, 54.0);
        assert_eq!(entry.server_ip_address, "91.239.200.165");
        assert_eq!(entry.connection, "80");
        assert!(entry.cache.is_empty());

        assert_eq!(entry.request.method, "GET");
        assert_eq!(entry.request.headers_size, 316);
        assert_eq!(entry.request.body_size, -1);
        assert_eq!(entry.request.cookies[0].name, "sid");
        assert_eq!(entry.request.cookies[0].http_only, Some(true));
        assert_eq!(entry.request.cookies[0].secure, None);
        assert_eq!(entry.request.query_string[0].value, "1");

        assert_eq!(entry.response.status, 302);
        assert_eq!(entry.response.redirect_url, "blog/index.php");
        assert_eq!(entry.response.content.mime_type, "text/html");
        assert_eq!(entry.response.content.size, Some(0));
        assert_eq!(
            entry.response.headers.get("Location").map(String::as_str),
            Some("blog/index.php")
        );
    }

    #[test]
    fn test_duplicate_headers_keep_last_value() {
        let archive = decode(ENTRY_HAR).unwrap();
        let headers = &archive.entries[0].request.headers;

        assert_eq!(headers["X-Dup"], "2");
        // names are case sensitive
        assert_eq!(headers["x-dup"], "lower");
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_timings_keep_numeric_phases_only() {
        let archive = decode(ENTRY_HAR).unwrap();
        let timings = &archive.entries[0].timings;

        assert_eq!(timings.len(), 5);
        assert_eq!(timings["wait"], 39.0);
        assert!(!timings.contains_key("comment"));
    }

    #[test]
    fn test_missing_sections_decode_to_defaults() {
        let archive = decode(r#"{"log": {"version": "1.1"}}"#).unwrap();

        assert_eq!(archive.creator, Creator::default());
        assert_eq!(archive.browser, Browser::default());
        assert!(archive.pages.is_empty());
        assert!(archive.entries.is_empty());
    }

    #[test]
    fn test_missing_log_decodes_to_empty_archive() {
        let archive = decode("{}").unwrap();
        assert_eq!(archive, Archive::default());
    }

    #[test]
    fn test_missing_entry_fields_are_zero_values() {
        let archive = decode(r#"{"log": {"entries": [{}]}}"#).unwrap();
        let entry = &archive.entries[0];

        assert_eq!(entry.request.method, "");
        assert!(entry.request.headers.is_empty());
        assert_eq!(entry.request.headers_size, 0);
        assert_eq!(entry.response.status, 0);
        assert_eq!(entry.response.content.size, None);
        assert!(entry.timings.is_empty());
    }

    #[test]
    fn test_non_object_elements_still_count() {
        let archive = decode(r#"{"log": {"pages": [1], "entries": [null, "x", {}]}}"#).unwrap();
        assert_eq!(archive.pages.len(), 1);
        assert_eq!(archive.entries.len(), 3);
        assert_eq!(archive.entries[1], Entry::default());
    }

    #[test]
    fn test_unrecorded_page_timings_are_none() {
        let archive = decode(
            r#"{"log": {"pages": [{"id": "p", "pageTimings": {"onContentLoad": -1}}]}}"#,
        )
        .unwrap();

        assert_eq!(archive.pages[0].on_content_load, None);
        assert_eq!(archive.pages[0].on_load, None);
    }

    #[test]
    fn test_fractional_times_are_kept() {
        let archive = decode(r#"{"log": {"entries": [{"time": 12.5, "response": {"content": {"size": 10.0}}}]}}"#)
            .unwrap();

        assert_eq!(archive.entries[0].time, 12.5);
        assert_eq!(archive.entries[0].response.content.size, Some(10));
    }

    #[test]
    fn test_header_without_name_is_skipped() {
        let archive = decode(
            r#"{"log": {"entries": [{"request": {"headers": [{"value": "x"}, {"name": "A"}]}}]}}"#,
        )
        .unwrap();
        let headers = &archive.entries[0].request.headers;

        assert_eq!(headers.len(), 1);
        assert_eq!(headers["A"], "");
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let result = decode("not json");
        assert!(matches!(result, Err(Error::MalformedJson(_))));
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let result = decode("[1, 2, 3]");
        assert!(matches!(result, Err(Error::InvalidStructure(_))));
    }

    #[test]
    fn test_decode_from_stream() {
        let archive = ArchiveDecoder::from_reader(Cursor::new(ENTRY_HAR.as_bytes())).unwrap();
        assert_eq!(archive.entries.len(), 1);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let first = decode(ENTRY_HAR).unwrap();
        let second = ArchiveDecoder::from_str(ENTRY_HAR).unwrap();
        assert_eq!(first, second);
    }
}
