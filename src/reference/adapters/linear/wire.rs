//! GraphQL documents and response shapes for the Linear API.

use crate::reference::{
    domain::{IssueSnapshot, IssueState, IssueTeam, UNKNOWN_NAME},
    ports::{TrackerError, TrackerResult},
};
use serde::{Deserialize, Serialize};

/// Maximum number of issues returned by a search.
pub const SEARCH_PAGE_SIZE: u32 = 50;

pub(super) const ISSUE_QUERY: &str = r"query Issue($id: String!) {
    issue(id: $id) {
        id identifier title url
        state { name type }
        team { key name }
    }
}";

pub(super) const SEARCH_QUERY: &str = r"query SearchIssues($query: String!, $first: Int!) {
    issues(first: $first, filter: { title: { contains: $query } }) {
        nodes {
            id identifier title url
            state { name type }
            team { key name }
        }
    }
}";

pub(super) const VERIFY_QUERY: &str = r"query Verify {
    viewer { id name email }
    organization { id name }
}";

const NOT_FOUND_CODE: &str = "ENTITY_NOT_FOUND";
const NOT_FOUND_MESSAGE: &str = "entity not found";

/// Raw GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorExtensions {
    code: Option<String>,
}

impl GraphQlError {
    fn is_not_found(&self) -> bool {
        let coded = self
            .extensions
            .as_ref()
            .and_then(|extensions| extensions.code.as_deref())
            == Some(NOT_FOUND_CODE);
        coded
            || self
                .message
                .to_ascii_lowercase()
                .starts_with(NOT_FOUND_MESSAGE)
    }
}

impl<T> GraphQlResponse<T> {
    pub(super) const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Unwraps the payload.
    ///
    /// Returns `Ok(None)` when every reported error is an entity-not-found
    /// error, which Linear uses for unknown identifiers.
    fn into_data(self) -> TrackerResult<Option<T>> {
        if !self.errors.is_empty() {
            if self.errors.iter().all(GraphQlError::is_not_found) {
                return Ok(None);
            }
            let messages: Vec<&str> = self
                .errors
                .iter()
                .map(|error| error.message.as_str())
                .collect();
            return Err(TrackerError::GraphQl(messages.join("; ")));
        }
        self.data
            .map(Some)
            .ok_or_else(|| TrackerError::Decode("missing 'data' in response".to_owned()))
    }
}

/// Payload of the single-issue query.
#[derive(Debug, Deserialize)]
pub struct IssueData {
    issue: Option<IssueNode>,
}

/// Payload of the search query.
#[derive(Debug, Deserialize)]
pub struct SearchData {
    issues: IssueConnection,
}

#[derive(Debug, Deserialize)]
struct IssueConnection {
    nodes: Vec<IssueNode>,
}

#[derive(Debug, Deserialize)]
struct IssueNode {
    id: String,
    identifier: String,
    title: String,
    url: String,
    state: Option<StateNode>,
    team: Option<TeamNode>,
}

#[derive(Debug, Deserialize)]
struct StateNode {
    name: Option<String>,
    #[serde(rename = "type")]
    state_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamNode {
    key: Option<String>,
    name: Option<String>,
}

impl IssueNode {
    fn into_snapshot(self, fallback_team_key: &str) -> IssueSnapshot {
        let state = self.state.map_or_else(IssueState::unknown, |state| {
            IssueState::new(
                state.name.unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
                state.state_type.unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            )
        });
        let (team_key, team_name) = match self.team {
            Some(team) => (team.key, team.name),
            None => (None, None),
        };
        IssueSnapshot {
            id: self.id,
            identifier: self.identifier,
            title: self.title,
            state,
            team: IssueTeam::new(
                team_key.unwrap_or_else(|| fallback_team_key.to_owned()),
                team_name.unwrap_or_else(|| UNKNOWN_NAME.to_owned()),
            ),
            url: self.url,
        }
    }
}

/// Decodes a single-issue response.
///
/// A missing team key falls back to `fallback_team_key`.
///
/// # Errors
///
/// Returns [`TrackerError`] for GraphQL errors other than not-found and for
/// payloads without data.
pub fn decode_issue(
    response: GraphQlResponse<IssueData>,
    fallback_team_key: &str,
) -> TrackerResult<Option<IssueSnapshot>> {
    Ok(response
        .into_data()?
        .and_then(|data| data.issue)
        .map(|node| node.into_snapshot(fallback_team_key)))
}

/// Decodes a search response, preserving tracker order.
///
/// # Errors
///
/// Returns [`TrackerError`] for GraphQL errors and payloads without data.
pub fn decode_search(
    response: GraphQlResponse<SearchData>,
) -> TrackerResult<Vec<IssueSnapshot>> {
    Ok(response
        .into_data()?
        .map(|data| {
            data.issues
                .nodes
                .into_iter()
                .map(|node| node.into_snapshot(""))
                .collect()
        })
        .unwrap_or_default())
}

/// Authenticated user returned by the credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearViewer {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Workspace returned by the credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearOrganization {
    /// Organization identifier.
    pub id: String,
    /// Organization name.
    pub name: String,
}

/// Result of verifying an API key against Linear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCheck {
    /// The user the key belongs to.
    pub viewer: LinearViewer,
    /// The workspace the key is scoped to, when visible.
    pub organization: Option<LinearOrganization>,
}

/// Decodes a credential check response.
///
/// # Errors
///
/// Returns [`TrackerError`] for any GraphQL error and for payloads without
/// data.
pub fn decode_credentials(
    response: GraphQlResponse<CredentialCheck>,
) -> TrackerResult<CredentialCheck> {
    response
        .into_data()?
        .ok_or_else(|| TrackerError::GraphQl("credential check rejected".to_owned()))
}
