//! HTTP transport for suggestion providers

use super::{ProviderClient, ProviderCursor, ProviderRequest, VecCursor};
use crate::config::OutgoingSettings;
use crate::results::SuggestionRow;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Query parameter carrying the selection template
pub const SELECTION_PARAM: &str = "selection";

/// Query parameter carrying one bound selection argument
pub const SELECTION_ARG_PARAM: &str = "selection_arg";

/// Provider client that reaches each authority over HTTP
///
/// `content://<authority>/<path>?<params>` is sent as a GET to
/// `<endpoint>/<path>?<params>`, where the endpoint is configured per
/// authority. The response is a JSON array of row objects.
#[derive(Clone)]
pub struct HttpProviderClient {
    client: Client,
    endpoints: HashMap<String, Url>,
    extra_headers: HashMap<String, String>,
}

impl HttpProviderClient {
    /// Create a client with default settings and no endpoints
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a client from outgoing settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .build()?;

        let mut endpoints = HashMap::new();
        for (authority, base) in &settings.provider_endpoints {
            let url = Url::parse(base)
                .with_context(|| format!("invalid endpoint for {}: {}", authority, base))?;
            endpoints.insert(authority.clone(), url);
        }

        Ok(Self {
            client,
            endpoints,
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Register the endpoint serving an authority
    pub fn add_endpoint(&mut self, authority: impl Into<String>, base: Url) {
        self.endpoints.insert(authority.into(), base);
    }

    /// HTTP URL a provider request is sent to
    pub fn endpoint_url(&self, request: &ProviderRequest) -> Result<Url> {
        let authority = request
            .authority()
            .ok_or_else(|| anyhow!("provider uri has no authority: {}", request.uri))?;
        let base = self
            .endpoints
            .get(authority)
            .ok_or_else(|| anyhow!("no endpoint configured for authority {}", authority))?;

        // HTTP paths cannot carry dot segments at all
        if let Some(segment) = request.path.iter().find(|s| *s == "." || *s == "..") {
            bail!("path segment {:?} cannot be sent to {}", segment, base);
        }

        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("endpoint cannot be a base: {}", base))?;
            segments.pop_if_empty();
            segments.extend(&request.path);
        }
        url.set_query(request.uri.query());

        if let Some(ref selection) = request.selection {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(SELECTION_PARAM, selection);
            for arg in &request.selection_args {
                pairs.append_pair(SELECTION_ARG_PARAM, arg);
            }
        }

        Ok(url)
    }

    fn parse_rows(body: &str) -> Result<Vec<SuggestionRow>> {
        let objects: Vec<Map<String, Value>> =
            serde_json::from_str(body).context("provider response is not a JSON array of rows")?;

        Ok(objects
            .into_iter()
            .map(|object| {
                object
                    .into_iter()
                    .filter_map(|(column, value)| match value {
                        Value::Null => None,
                        Value::String(s) => Some((column, s)),
                        other => Some((column, other.to_string())),
                    })
                    .collect::<SuggestionRow>()
            })
            .collect())
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn query(&self, request: &ProviderRequest) -> Result<Option<Box<dyn ProviderCursor>>> {
        let url = self.endpoint_url(request)?;
        debug!("GET {}", url);

        let mut req_builder = self.client.get(url.clone());
        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        let response = req_builder.send().await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            bail!("provider {} returned HTTP {}", url, status.as_u16());
        }

        let text = response.text().await?;
        let rows = Self::parse_rows(&text)?;
        Ok(Some(Box::new(VecCursor::new(rows))))
    }
}
