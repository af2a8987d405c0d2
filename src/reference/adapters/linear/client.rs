//! GraphQL transport for the Linear API.
//!
//! Uses reqwest with the API key sent verbatim in the `Authorization`
//! header. All queries target a single GraphQL endpoint.

use super::wire::{
    CredentialCheck, GraphQlResponse, ISSUE_QUERY, IssueData, SEARCH_PAGE_SIZE, SEARCH_QUERY,
    SearchData, VERIFY_QUERY, decode_credentials, decode_issue, decode_search,
};
use crate::reference::{
    domain::IssueSnapshot,
    ports::{TrackerError, TrackerResult},
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt;

/// Production GraphQL endpoint.
pub const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

const USER_AGENT: &str = concat!("trackline/", env!("CARGO_PKG_VERSION"));

/// Connected Linear GraphQL client.
pub struct LinearClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for LinearClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Local endpoints bypass any system proxy configuration.
fn is_loopback(endpoint: &str) -> bool {
    reqwest::Url::parse(endpoint).is_ok_and(|url| {
        url.host_str()
            .is_some_and(|host| matches!(host, "localhost" | "127.0.0.1" | "[::1]"))
    })
}

impl LinearClient {
    /// Builds the HTTP client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Connect`] when the HTTP client cannot be
    /// constructed.
    pub fn connect(api_key: &str, endpoint: &str) -> TrackerResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if is_loopback(endpoint) {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(TrackerError::connect)?;
        Ok(Self {
            http,
            endpoint: endpoint.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> TrackerResult<GraphQlResponse<T>> {
        let body = json!({ "query": query, "variables": variables });
        let response = self
            .http
            .post(self.endpoint.as_str())
            .header(AUTHORIZATION, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(TrackerError::request)?;

        let status = response.status();
        let text = response.text().await.map_err(TrackerError::request)?;

        if !status.is_success() {
            // Linear reports unknown entities and validation failures with
            // a GraphQL error body on non-2xx statuses.
            if let Ok(envelope) = serde_json::from_str::<GraphQlResponse<T>>(&text)
                && envelope.has_errors()
            {
                return Ok(envelope);
            }
            return Err(TrackerError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|err| TrackerError::Decode(err.to_string()))
    }

    /// Fetches one issue by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the request or decoding fails.
    pub async fn issue(
        &self,
        issue_id: &str,
        fallback_team_key: &str,
    ) -> TrackerResult<Option<IssueSnapshot>> {
        let response: GraphQlResponse<IssueData> =
            self.graphql(ISSUE_QUERY, json!({ "id": issue_id })).await?;
        decode_issue(response, fallback_team_key)
    }

    /// Searches issues whose title contains `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the request or decoding fails.
    pub async fn search(&self, query: &str) -> TrackerResult<Vec<IssueSnapshot>> {
        let response: GraphQlResponse<SearchData> = self
            .graphql(
                SEARCH_QUERY,
                json!({ "query": query, "first": SEARCH_PAGE_SIZE }),
            )
            .await?;
        decode_search(response)
    }

    /// Fetches the viewer and organization the key belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the key is rejected or the request
    /// fails.
    pub async fn verify(&self) -> TrackerResult<CredentialCheck> {
        let response: GraphQlResponse<CredentialCheck> =
            self.graphql(VERIFY_QUERY, json!({})).await?;
        decode_credentials(response)
    }
}
