//! Blocking HTTP client for the theory store's interview extension.

use std::time::Duration;

use reqwest::blocking::{Client, ClientBuilder, RequestBuilder};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::{StoreError, StoreReply, StoreSettings, TheoryStore, mpath};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const TCP_KEEPALIVE_SECS: u64 = 60;

const QUERY_PATH: &str = ":query";
const TEXT_BODY: &str = "text/plain; charset=UTF-8";
const XML_BODY: &str = "application/xml";

fn base_client_builder() -> ClientBuilder {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        "User-Agent",
        HeaderValue::from_static(concat!("mosis/", env!("CARGO_PKG_VERSION"))),
    );

    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .default_headers(default_headers)
}

/// [`TheoryStore`] backed by a running store server.
#[derive(Debug, Clone)]
pub struct HttpTheoryStore {
    client: Client,
    base_url: Url,
    settings: StoreSettings,
}

impl HttpTheoryStore {
    pub fn new(settings: StoreSettings) -> Result<Self, StoreError> {
        let base_url = Url::parse(&settings.base_url).map_err(|err| {
            StoreError::new(format!(
                "invalid theory store URL '{}': {err}",
                settings.base_url
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::new(format!(
                "theory store URL '{base_url}' cannot carry a path"
            )));
        }
        let client = base_client_builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| StoreError::new(format!("could not build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url,
            settings,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    fn mpath(&self, name: &str) -> String {
        mpath(&self.settings.namespace, name)
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    fn interview_endpoint(&self, action: &str, query: &[(&str, &str)]) -> Url {
        self.endpoint(&[self.settings.extension.as_str(), action], query)
    }

    fn send(&self, url: &Url, request: RequestBuilder) -> Result<StoreReply, StoreError> {
        tracing::debug!(url = %url, "theory store request");
        let response = request.send().map_err(|err| {
            tracing::warn!(url = %url, "theory store unreachable: {err}");
            StoreError::new(format!("could not reach the theory store at {url}: {err}"))
        })?;
        let status = response.status();
        let body = response.text().map_err(|err| {
            StoreError::new(format!("could not read the theory store's reply: {err}"))
        })?;

        let reply = StoreReply::parse(body)?;
        if !status.is_success() {
            return Err(StoreError::with_detail(
                format!("theory store answered {status}"),
                reply.raw(),
            ));
        }
        Ok(reply)
    }

    fn get(&self, url: Url) -> Result<StoreReply, StoreError> {
        let request = self.client.get(url.clone());
        self.send(&url, request)
    }

    fn post(&self, url: Url, content_type: &'static str, body: &str) -> Result<StoreReply, StoreError> {
        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, content_type)
            .body(body.to_owned());
        self.send(&url, request)
    }
}

impl TheoryStore for HttpTheoryStore {
    fn namespace(&self) -> &str {
        &self.settings.namespace
    }

    fn create_theory(&self, name: &str) -> Result<StoreReply, StoreError> {
        let theory = self.mpath(name);
        let url = self.interview_endpoint(
            "new",
            &[("theory", &theory), ("meta", &self.settings.meta_theory)],
        );
        self.get(url)
    }

    fn create_view(&self, name: &str, from: &str, to: &str) -> Result<StoreReply, StoreError> {
        let (view, from, to) = (self.mpath(name), self.mpath(from), self.mpath(to));
        let url = self.interview_endpoint("new", &[("view", &view), ("from", &from), ("to", &to)]);
        self.get(url)
    }

    fn add_declaration(&self, theory: &str, declaration: &str) -> Result<StoreReply, StoreError> {
        let container = self.mpath(theory);
        let url = self.interview_endpoint("new", &[("decl", "d"), ("cont", &container)]);
        self.post(url, TEXT_BODY, declaration)
    }

    fn infer_type(&self, theory: &str, term: &str) -> Result<String, StoreError> {
        let container = self.mpath(theory);
        let url = self.interview_endpoint("infer", &[("cont", &container)]);
        let reply = self.post(url, TEXT_BODY, term)?;
        Ok(reply.inferred_type())
    }

    fn query(&self, name: &str) -> Result<StoreReply, StoreError> {
        let body = format!(
            r#"<function name="presentDecl" param="xml"><literal><uri path="{}"/></literal></function>"#,
            self.mpath(name)
        );
        let url = self.endpoint(&[QUERY_PATH], &[]);
        self.post(url, XML_BODY, &body)
    }
}
