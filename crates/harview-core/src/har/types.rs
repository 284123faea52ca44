use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Header name to value. Names keep their original case; when a name
/// repeats in the source list the last value is kept.
pub type Headers = BTreeMap<String, String>;

/// A decoded HTTP Archive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Archive {
    pub creator: Creator,
    pub browser: Browser,
    pub pages: Vec<Page>,
    pub entries: Vec<Entry>,
}

impl Archive {
    /// Look up a page by its id
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.id == id)
    }

    /// Entries that reference the given page, in archive order
    pub fn entries_for_page<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |entry| entry.pageref == id)
    }
}

/// Tool that produced the archive, e.g. Firebug
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Creator {
    pub name: String,
    pub version: String,
}

/// Browser the traffic was recorded in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Browser {
    pub name: String,
    pub version: String,
}

/// One tracked page load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub started_date_time: String,
    pub id: String,
    pub title: String,
    /// Milliseconds until the content was loaded, `None` when not recorded
    pub on_content_load: Option<f64>,
    /// Milliseconds until the page was loaded, `None` when not recorded
    pub on_load: Option<f64>,
}

impl Page {
    pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.started_date_time).ok()
    }
}

/// One recorded request/response interaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    /// Id of the page this entry belongs to. Not checked against `pages`.
    pub pageref: String,
    pub started_date_time: String,
    /// Total elapsed time in milliseconds
    pub time: f64,
    pub request: Request,
    pub response: Response,
    pub cache: Map<String, Value>,
    pub timings: BTreeMap<String, f64>,
    pub server_ip_address: String,
    /// Client or server port, e.g. "80"
    pub connection: String,
}

impl Entry {
    pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.started_date_time).ok()
    }
}

/// HTTP request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub http_version: String,
    pub cookies: Vec<Cookie>,
    pub query_string: Vec<QueryParam>,
    pub headers: Headers,
    /// -1 when unknown
    pub headers_size: i64,
    /// -1 when unknown
    pub body_size: i64,
}

/// HTTP response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub status: i64,
    pub status_text: String,
    pub http_version: String,
    pub cookies: Vec<Cookie>,
    pub content: Content,
    /// Target of the `Location` header, may be empty
    pub redirect_url: String,
    pub headers: Headers,
    pub headers_size: i64,
    /// 0 when the response was served from cache
    pub body_size: i64,
}

/// Cookie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<String>,
    pub http_only: Option<bool>,
    pub secure: Option<bool>,
}

/// Query parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

/// Response content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub mime_type: String,
    /// Body size in bytes as reported by the capturing tool. Left as `None`
    /// when the source omits it.
    pub size: Option<i64>,
    pub compression: Option<i64>,
    pub text: Option<String>,
    pub encoding: Option<String>,
}
