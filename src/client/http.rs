// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! HTTP search client over a list of cluster hosts.
//!
//! ```text
//! search → POST {host}/{index}/_search?from=..&size=..[&_source=false]
//!          body: the document's `body` block (or {})
//! get    → GET  {host}/{index}/_doc/{id}
//! ```
//!
//! Index names and document ids are pushed as single percent-encoded path
//! segments, so an id like `a/b?x#y` stays one id.
//!
//! Hosts are used round-robin, one host per call. Failed calls are not
//! retried here.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{Map, Value};
use tracing::debug;

use super::SearchClient;
use crate::config::QuelasticConfig;
use crate::error::QueryError;
use crate::search::RequestDocument;

pub struct HttpSearchClient {
    client: Client,
    hosts: Vec<Url>,
    next_host: AtomicUsize,
}

impl HttpSearchClient {
    pub fn new(config: &QuelasticConfig) -> Result<Self, QueryError> {
        let hosts = config
            .hosts
            .iter()
            .map(|h| h.trim().trim_end_matches('/'))
            .filter(|h| !h.is_empty())
            .map(parse_host)
            .collect::<Result<Vec<_>, _>>()?;
        if hosts.is_empty() {
            return Err(QueryError::NoHosts);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            hosts,
            next_host: AtomicUsize::new(0),
        })
    }

    pub fn hosts(&self) -> &[Url] {
        &self.hosts
    }

    fn host(&self) -> &Url {
        let i = self.next_host.fetch_add(1, Ordering::Relaxed) % self.hosts.len();
        &self.hosts[i]
    }

    /// Next host with `segments` appended to its path, each one encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.host().clone();
        // parse_host only admits base URLs, which always have path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, QueryError> {
        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(status = status.as_u16(), error = %e, "Unreadable error body");
                    String::new()
                }
            };
            return Err(QueryError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, request: &RequestDocument) -> Result<Value, QueryError> {
        let index = request.index().ok_or(QueryError::MissingIndex)?;
        let url = self.endpoint(&[index, "_search"]);
        let body = request
            .body()
            .cloned()
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(Map::new()));

        debug!(url = %url, "POST _search");
        let response = self
            .client
            .post(url)
            .query(&request.url_params())
            .json(&body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn get(&self, index: &str, id: &str) -> Result<Value, QueryError> {
        let url = self.endpoint(&[index, "_doc", id]);

        debug!(url = %url, "GET _doc");
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }
}

fn parse_host(host: &str) -> Result<Url, QueryError> {
    let url = Url::parse(host).map_err(|e| QueryError::InvalidHost(format!("{}: {}", host, e)))?;
    if url.cannot_be_a_base() {
        return Err(QueryError::InvalidHost(host.to_string()));
    }
    Ok(url)
}
