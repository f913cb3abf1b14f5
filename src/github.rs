//! GitHub REST client: typed response records, single-resource fetches,
//! and the paginated list fetcher.
//!
//! Responses are validated once, here, at the fetch boundary. Every field
//! the service may omit deserializes to a default so that a sparse payload
//! never fails a report.

use crate::config::AppConfig;
use crate::types::RepoId;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Fixed page size for list endpoints; pagination terminates on the first
/// page shorter than this.
pub const PAGE_SIZE: usize = 100;

const NOT_FOUND_MESSAGE: &str = "Not Found";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

#[derive(Debug, Error)]
pub enum FetchError {
    /// The target repository does not exist upstream.
    #[error("repository not found")]
    NotFound,

    /// The service answered with an error payload instead of the resource.
    #[error("GitHub API error: {message}")]
    Api { message: String },

    /// A single-resource payload that does not match its expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Transport-level failure: timeout, DNS, TLS, connection reset.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The `repos/{owner}/{repo}` resource, reduced to the fields the reports
/// consume.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: Option<String>,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub owner: Option<Account>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub language: Option<String>,
    /// Size in KB, as reported by the service.
    pub size: u64,
    pub private: bool,
    pub archived: bool,
    pub is_template: bool,
    pub has_issues: bool,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub subscribers_count: u64,
    pub license: Option<License>,
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Account {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contributor {
    pub login: Option<String>,
    pub contributions: u64,
}

/// An item from the issues collection. The service returns pull requests
/// here too, marked by the `pull_request` field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueItem {
    pub created_at: Option<String>,
    pub closed_at: Option<String>,
    pull_request: Option<Value>,
}

impl IssueItem {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PullItem {
    pub created_at: Option<String>,
    pub closed_at: Option<String>,
}

/// One entry of a recursive tree listing; `kind` is `blob` for files.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TreeResponse {
    tree: Option<Vec<TreeEntry>>,
    truncated: bool,
}

/// GitHub REST client. One instance per session; every operation issues
/// fresh, independent requests.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &AppConfig, token: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("token {token}"))
            .context("credential contains characters not valid in a header")?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        // GitHub rejects requests without a User-Agent.
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-health/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.github_api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%url, "GitHub API request");
        let response = self.http.get(&url).query(query).send().await?;
        Ok(response.json().await?)
    }

    /// Fetches the single repository resource.
    pub async fn get_repository(&self, id: &RepoId) -> Result<Repository, FetchError> {
        let body = self
            .get_json(&format!("repos/{}/{}", id.owner, id.repo), &[])
            .await?;
        parse_resource(body)
    }

    /// Fetches the first page of contributors.
    ///
    /// Deliberately unpaginated: the display is capped at a handful of
    /// entries, and walking every contributor of a large repository would
    /// overwhelm it anyway. A non-list payload yields an empty list.
    pub async fn get_contributors(&self, id: &RepoId) -> Result<Vec<Contributor>, FetchError> {
        let body = self
            .get_json(&format!("repos/{}/{}/contributors", id.owner, id.repo), &[])
            .await?;
        match classify_page(body) {
            PageBody::Items(items) => Ok(items),
            PageBody::End => Ok(Vec::new()),
        }
    }

    /// Fetches the recursive file tree for a branch.
    pub async fn get_tree(&self, id: &RepoId, branch: &str) -> Result<Vec<TreeEntry>, FetchError> {
        let body = self
            .get_json(
                &format!("repos/{}/{}/git/trees/{}", id.owner, id.repo, branch),
                &[("recursive", "1".to_string())],
            )
            .await?;
        if let Some(message) = error_message(&body) {
            return Err(api_error(message));
        }
        let parsed: TreeResponse = serde_json::from_value(body)?;
        if parsed.truncated {
            tracing::warn!(%id, branch = branch, "file tree was truncated by the service");
        }
        parsed.tree.ok_or_else(|| FetchError::Api {
            message: "response did not include a file tree".to_string(),
        })
    }

    /// Walks a paged list endpoint to exhaustion and returns every item.
    ///
    /// `extra` is merged into the query string but can never override the
    /// `per_page`/`page` pair.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, &str)],
    ) -> Result<Vec<T>, FetchError> {
        let source = EndpointPages {
            client: self,
            path,
            extra,
        };
        collect_pages(&source).await
    }
}

/// A supplier of raw page bodies, one request per page number.
///
/// The indirection keeps the pagination loop testable without a network.
#[async_trait]
pub(crate) trait PageSource: Sync {
    async fn page(&self, page: u32) -> Result<Value, FetchError>;
}

struct EndpointPages<'a> {
    client: &'a GitHubClient,
    path: &'a str,
    extra: &'a [(&'a str, &'a str)],
}

#[async_trait]
impl PageSource for EndpointPages<'_> {
    async fn page(&self, page: u32) -> Result<Value, FetchError> {
        let mut query: Vec<(&str, String)> = vec![
            ("per_page", PAGE_SIZE.to_string()),
            ("page", page.to_string()),
        ];
        for (key, value) in self.extra {
            if *key != "per_page" && *key != "page" {
                query.push((key, (*value).to_string()));
            }
        }
        self.client.get_json(self.path, &query).await
    }
}

/// Drives pagination to exhaustion.
///
/// A collection is complete only when a short page is observed; an empty
/// page or an error-shaped body also ends the stream, keeping the results
/// accumulated so far. A transport failure aborts the whole operation.
pub(crate) async fn collect_pages<T, S>(source: &S) -> Result<Vec<T>, FetchError>
where
    T: DeserializeOwned,
    S: PageSource,
{
    let mut results = Vec::new();
    let mut page: u32 = 1;
    loop {
        let body = source.page(page).await?;
        let items: Vec<T> = match classify_page(body) {
            PageBody::Items(items) => items,
            PageBody::End => break,
        };
        let last_page = items.len() < PAGE_SIZE;
        results.extend(items);
        if last_page {
            break;
        }
        page += 1;
    }
    tracing::debug!(pages = page, count = results.len(), "paginated fetch complete");
    Ok(results)
}

/// Outcome of classifying one page body.
pub(crate) enum PageBody<T> {
    Items(Vec<T>),
    End,
}

/// Classifies a list-endpoint body. Anything that is not a non-empty JSON
/// array — an empty array, an error-shaped `{"message": ...}` object, or a
/// page that fails typed conversion — ends the stream.
pub(crate) fn classify_page<T: DeserializeOwned>(body: Value) -> PageBody<T> {
    match body {
        Value::Array(items) if items.is_empty() => PageBody::End,
        Value::Array(items) => match serde_json::from_value(Value::Array(items)) {
            Ok(parsed) => PageBody::Items(parsed),
            Err(error) => {
                tracing::warn!(%error, "stopping pagination on a page that failed to parse");
                PageBody::End
            }
        },
        other => {
            match error_message(&other) {
                Some(message) => {
                    tracing::warn!(message = message, "list endpoint answered with an error payload");
                }
                None => tracing::warn!("list endpoint answered with a non-list payload"),
            }
            PageBody::End
        }
    }
}

fn error_message(body: &Value) -> Option<&str> {
    body.as_object()?.get("message")?.as_str()
}

fn api_error(message: &str) -> FetchError {
    if message == NOT_FOUND_MESSAGE {
        FetchError::NotFound
    } else {
        FetchError::Api {
            message: message.to_string(),
        }
    }
}

/// Validates a single-resource body: a `message`-shaped payload becomes a
/// typed error, anything else must deserialize into the expected record.
fn parse_resource<T: DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    if let Some(message) = error_message(&body) {
        return Err(api_error(message));
    }
    Ok(serde_json::from_value(body)?)
}
