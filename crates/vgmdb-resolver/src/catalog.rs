//! VGMdb catalog client (search + album detail) and the raw record shapes.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::lang::LocalizedNames;

pub const DEFAULT_BASE_URL: &str = "https://vgmdb.info";
pub const DEFAULT_USER_AGENT: &str = concat!("vgmdb-resolver/", env!("CARGO_PKG_VERSION"));

/// Length of the `album/` prefix on album links.
pub const ALBUM_LINK_PREFIX_LEN: usize = 6;

const MAX_BODY_BYTES: u64 = 2_000_000;
const ERROR_SNIPPET_CHARS: usize = 300;

/// Blocking "GET this URL, give me JSON" boundary.
///
/// The production implementation is [`UreqFetch`]; tests swap in canned
/// responses.
pub trait JsonFetch {
    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CatalogError>;
}

/// [`JsonFetch`] backed by a `ureq` agent.
pub struct UreqFetch {
    agent: ureq::Agent,
}

impl UreqFetch {
    pub fn new(user_agent: &str) -> Self {
        let config = ureq::Agent::config_builder()
            .user_agent(user_agent)
            .build();
        Self::with_agent(ureq::Agent::new_with_config(config))
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl JsonFetch for UreqFetch {
    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CatalogError> {
        let resp = self
            .agent
            .get(url)
            .config()
            .http_status_as_error(false)
            .build()
            .call()
            .map_err(|err| CatalogError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        let code = resp.status().as_u16();
        let body = resp
            .into_body()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string();

        if code == 404 {
            return Err(CatalogError::NotFound {
                url: url.to_string(),
            });
        }
        if code >= 400 {
            let body = body.unwrap_or_default();
            let trimmed = body.trim();
            let mut message = format!("status {code}");
            if !trimmed.is_empty() {
                let snippet: String = trimmed.chars().take(ERROR_SNIPPET_CHARS).collect();
                let suffix = if trimmed.chars().count() > ERROR_SNIPPET_CHARS {
                    "..."
                } else {
                    ""
                };
                message.push_str(&format!(": {snippet}{suffix}"));
            }
            return Err(CatalogError::Transport {
                url: url.to_string(),
                message,
            });
        }

        let body = body.map_err(|err| CatalogError::Transport {
            url: url.to_string(),
            message: format!("read body: {err}"),
        })?;
        serde_json::from_str(&body).map_err(|err| CatalogError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

/// Thin wrapper over the two catalog endpoints the resolver needs.
pub struct CatalogClient<F> {
    base_url: String,
    fetch: F,
}

impl<F: JsonFetch> CatalogClient<F> {
    pub fn new(base_url: &str, fetch: F) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            fetch,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetch
    }

    /// Run an album search. `text` should already be normalized.
    pub fn search_albums(&self, text: &str) -> Result<Vec<SearchHit>, CatalogError> {
        let url = format!(
            "{}/search/albums/{}?format=json",
            self.base_url,
            urlencoding::encode(text)
        );
        tracing::debug!(url = %url, "vgmdb album search");
        let body: SearchResponse = decode(&url, self.fetch.fetch_json(&url)?)?;
        Ok(body.results.albums)
    }

    /// Fetch one album record by catalog identifier.
    pub fn fetch_album(&self, id: &str) -> Result<RawAlbum, CatalogError> {
        let url = format!(
            "{}/album/{}?format=json",
            self.base_url,
            urlencoding::encode(id)
        );
        tracing::debug!(url = %url, album_id = %id, "vgmdb album fetch");
        let value = self.fetch.fetch_json(&url)?;
        serde_json::from_value(value)
            .map_err(|err| CatalogError::malformed(format!("album {id}: {err}")))
    }
}

fn decode<T: DeserializeOwned>(url: &str, value: serde_json::Value) -> Result<T, CatalogError> {
    serde_json::from_value(value).map_err(|err| CatalogError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: SearchResults,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    albums: Vec<SearchHit>,
}

/// One album entry from the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Relative link, e.g. `album/79`.
    pub link: String,
    #[serde(default)]
    pub catalog: Option<String>,
}

impl SearchHit {
    /// Catalog identifier carried in the link, if the link is long enough.
    pub fn album_id(&self) -> Option<&str> {
        self.link
            .get(ALBUM_LINK_PREFIX_LEN..)
            .filter(|id| !id.is_empty())
    }
}

/// Album detail record as served by `vgmdb.info`.
///
/// Only the fields the normalizer reads are modeled. Required fields that are
/// missing turn into [`CatalogError::MalformedRecord`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawAlbum {
    pub name: String,
    #[serde(default)]
    pub names: LocalizedNames,
    pub link: String,
    pub catalog: String,
    #[serde(default)]
    pub release_date: Option<String>,
    pub media_format: String,
    pub publisher: RawPublisher,
    #[serde(default)]
    pub discs: Vec<RawDisc>,
    #[serde(default)]
    pub composers: Vec<RawCredit>,
    #[serde(default)]
    pub performers: Vec<RawCredit>,
    pub vgmdb_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPublisher {
    #[serde(default)]
    pub names: LocalizedNames,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDisc {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub names: LocalizedNames,
    pub track_length: String,
}

/// A composer or performer credit.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCredit {
    #[serde(default)]
    pub names: LocalizedNames,
    #[serde(default)]
    pub link: Option<String>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::Mutex;

    use serde_json::json;

    /// Serve fixed `(path, status, body)` answers on a loopback port; unknown
    /// paths get a 404. Returns the base URL.
    pub(crate) fn serve_canned(routes: &[(&str, u16, &str)]) -> String {
        let routes: Vec<(String, u16, String)> = routes
            .iter()
            .map(|(path, status, body)| (path.to_string(), *status, body.to_string()))
            .collect();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let Ok(read_half) = stream.try_clone() else {
                    continue;
                };
                let mut reader = BufReader::new(read_half);
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                loop {
                    let mut header = String::new();
                    match reader.read_line(&mut header) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if header == "\r\n" => break,
                        Ok(_) => {}
                    }
                }
                let path = request_line.split_whitespace().nth(1).unwrap_or("");
                let (status, body) = routes
                    .iter()
                    .find(|(route, _, _)| route == path)
                    .map(|(_, status, body)| (*status, body.as_str()))
                    .unwrap_or((404, ""));
                let response = format!(
                    "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });
        format!("http://{addr}")
    }

    /// Agent that ignores proxy environment variables so loopback stays local.
    pub(crate) fn loopback_fetch() -> UreqFetch {
        let config = ureq::Agent::config_builder()
            .user_agent(DEFAULT_USER_AGENT)
            .proxy(None)
            .build();
        UreqFetch::with_agent(ureq::Agent::new_with_config(config))
    }

    #[derive(Default)]
    struct CannedFetch {
        responses: HashMap<String, serde_json::Value>,
        requested: Mutex<Vec<String>>,
    }

    impl JsonFetch for CannedFetch {
        fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CatalogError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound {
                    url: url.to_string(),
                })
        }
    }

    fn client(responses: Vec<(&str, serde_json::Value)>) -> CatalogClient<CannedFetch> {
        let fetch = CannedFetch {
            responses: responses
                .into_iter()
                .map(|(url, value)| (url.to_string(), value))
                .collect(),
            ..CannedFetch::default()
        };
        CatalogClient::new("https://vgmdb.info/", fetch)
    }

    #[test]
    fn ureq_fetch_maps_http_answers_to_errors() {
        let base = serve_canned(&[
            ("/boom", 500, "boom"),
            ("/html", 200, "<html>"),
            ("/ok", 200, r#"{"a":1}"#),
        ]);
        let fetch = loopback_fetch();

        let err = fetch.fetch_json(&format!("{base}/missing")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }), "{err:?}");

        match fetch.fetch_json(&format!("{base}/boom")).unwrap_err() {
            CatalogError::Transport { message, .. } => assert_eq!(message, "status 500: boom"),
            other => panic!("unexpected error {other:?}"),
        }

        let err = fetch.fetch_json(&format!("{base}/html")).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }), "{err:?}");

        let value = fetch.fetch_json(&format!("{base}/ok")).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn search_url_percent_encodes_query() {
        let client = client(vec![(
            "https://vgmdb.info/search/albums/Chrono%20Trigger?format=json",
            json!({"results": {"albums": [{"link": "album/316", "catalog": "PSCN-5021"}]}}),
        )]);
        let hits = client.search_albums("Chrono Trigger").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].album_id(), Some("316"));
        assert_eq!(hits[0].catalog.as_deref(), Some("PSCN-5021"));
    }

    #[test]
    fn search_without_results_envelope_is_decode_error() {
        let client = client(vec![(
            "https://vgmdb.info/search/albums/x?format=json",
            json!({"albums": []}),
        )]);
        let err = client.search_albums("x").unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn fetch_album_missing_field_is_malformed() {
        let client = client(vec![(
            "https://vgmdb.info/album/79?format=json",
            json!({"name": "FF7", "link": "album/79"}),
        )]);
        let err = client.fetch_album("79").unwrap_err();
        match err {
            CatalogError::MalformedRecord(msg) => assert!(msg.contains("catalog"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn fetch_album_passes_not_found_through() {
        let client = client(Vec::new());
        let err = client.fetch_album("404").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert_eq!(
            client.fetcher().requested.lock().unwrap().as_slice(),
            ["https://vgmdb.info/album/404?format=json"]
        );
    }

    #[test]
    fn fetch_album_accepts_null_release_date() {
        let client = client(vec![(
            "https://vgmdb.info/album/5?format=json",
            json!({
                "name": "Album",
                "names": {"en": "Album"},
                "link": "album/5",
                "catalog": "N/A",
                "release_date": null,
                "media_format": "CD",
                "publisher": {"names": {"en": "Label"}},
                "discs": [],
                "composers": [],
                "vgmdb_link": "https://vgmdb.net/album/5"
            }),
        )]);
        let raw = client.fetch_album("5").unwrap();
        assert!(raw.release_date.is_none());
        assert!(raw.performers.is_empty());
    }

    #[test]
    fn short_link_has_no_album_id() {
        let hit = SearchHit {
            link: "album/".to_string(),
            catalog: None,
        };
        assert_eq!(hit.album_id(), None);
    }

    #[test]
    #[ignore]
    fn live_search_and_fetch() {
        let client = CatalogClient::new(DEFAULT_BASE_URL, UreqFetch::new(DEFAULT_USER_AGENT));
        let hits = client
            .search_albums("Final Fantasy VII Original Soundtrack")
            .expect("search albums");
        assert!(!hits.is_empty(), "expected search hits");
        let id = hits[0].album_id().expect("album id");
        let raw = client.fetch_album(id).expect("fetch album");
        assert!(!raw.discs.is_empty(), "expected discs");
    }
}
