use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use search_core::{Query, QueryError, SearchResult, Searcher};
use serde_json::Value;
use thiserror::Error;

use crate::config::{DEFAULT_HOST, RuntimeConfig};

const PUBLIC_API_BASE: &str = "https://api.github.com/";
const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("nils-gh-search-cli/", env!("CARGO_PKG_VERSION"));
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum GitHubApiError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
    #[error("failed to build github client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid github url: {0}")]
    InvalidUrl(String),
    #[error("github api request failed")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("github api error ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("invalid github api response")]
    InvalidResponse(#[source] serde_json::Error),
}

// No Debug: the token must not end up in logs.
#[derive(Clone)]
pub struct GitHubSearcher {
    client: Client,
    host: String,
    token: Option<String>,
}

impl GitHubSearcher {
    pub fn new(config: &RuntimeConfig) -> Result<Self, GitHubApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| GitHubApiError::Client { source })?;

        Ok(Self {
            client,
            host: config.host.clone(),
            token: config.token.clone(),
        })
    }

    fn fetch_page(
        &self,
        endpoint: &Url,
        query: &Query,
        page: u32,
    ) -> Result<SearchResult, GitHubApiError> {
        let params = build_query_params(query, page);
        let mut request = self
            .client
            .get(endpoint.clone())
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .query(&params);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request
            .send()
            .map_err(|source| GitHubApiError::Transport { source })?;
        let status_code = response.status().as_u16();
        let body = response
            .text()
            .map_err(|source| GitHubApiError::Transport { source })?;

        tracing::debug!(page, status = status_code, "github search page received");
        parse_search_response(status_code, &body)
    }
}

impl Searcher for GitHubSearcher {
    type Error = GitHubApiError;

    fn search(&self, query: &Query) -> Result<SearchResult, GitHubApiError> {
        query.validate()?;
        let endpoint = search_endpoint(&self.host, &query.kind)?;
        tracing::info!(kind = %query.kind, q = %query, limit = query.limit, "searching github");

        let page_size = per_page(query.limit);
        let mut combined = SearchResult::default();
        let mut page = 1;

        loop {
            let result = self.fetch_page(&endpoint, query, page)?;
            let received = result.items.len();
            merge_page(&mut combined, result, query.limit);

            let exhausted = received < page_size as usize
                || combined.items.len() as u64 >= combined.total_count;
            if combined.items.len() >= query.limit as usize || exhausted {
                break;
            }
            page += 1;
        }

        Ok(combined)
    }

    fn url(&self, query: &Query) -> String {
        web_search_url(&self.host, query)
    }
}

pub fn api_base(host: &str) -> String {
    if host == DEFAULT_HOST {
        PUBLIC_API_BASE.to_string()
    } else {
        format!("https://{host}/api/v3/")
    }
}

pub fn search_endpoint(host: &str, kind: &str) -> Result<Url, GitHubApiError> {
    let raw = format!("{}search/{kind}", api_base(host));
    Url::parse(&raw).map_err(|_| GitHubApiError::InvalidUrl(raw))
}

pub fn per_page(limit: u32) -> u32 {
    limit.clamp(1, MAX_PER_PAGE)
}

pub fn build_query_params(query: &Query, page: u32) -> Vec<(String, String)> {
    vec![
        ("q".to_string(), query.query_string()),
        ("per_page".to_string(), per_page(query.limit).to_string()),
        ("page".to_string(), page.to_string()),
    ]
}

/// Browser URL for the query on the configured host.
pub fn web_search_url(host: &str, query: &Query) -> String {
    let base = format!("https://{host}/search");
    match Url::parse(&base) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair("q", &query.query_string())
                .append_pair("type", &query.kind);
            url.to_string()
        }
        Err(_) => base,
    }
}

/// Appends one page, keeping at most `limit` items overall.
pub fn merge_page(combined: &mut SearchResult, page: SearchResult, limit: u32) {
    combined.total_count = page.total_count;
    combined.incomplete_results |= page.incomplete_results;

    let remaining = (limit as usize).saturating_sub(combined.items.len());
    combined
        .items
        .extend(page.items.into_iter().take(remaining));
}

pub fn parse_search_response(status_code: u16, body: &str) -> Result<SearchResult, GitHubApiError> {
    if !(200..=299).contains(&status_code) {
        let message = extract_error_message(body).unwrap_or_else(|| format!("HTTP {status_code}"));
        return Err(GitHubApiError::Http {
            status: status_code,
            message,
        });
    }

    serde_json::from_str(body).map_err(GitHubApiError::InvalidResponse)
}

fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;

    first_non_empty_string(&[
        value
            .get("errors")
            .and_then(|errors| errors.get(0))
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str),
        value.get("message").and_then(Value::as_str),
    ])
}

fn first_non_empty_string(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
