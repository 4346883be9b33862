//! Content store backed by the GitHub REST contents API.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, RepositoryRef};
use crate::error::{Error, Result};
use crate::store::{ContentStore, Entry, EntryKind, StoredFile};

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    sha: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Dir(Vec<ContentItem>),
    File(ContentItem),
}

#[derive(Debug, Serialize)]
struct PutRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: ContentItem,
}

/// GitHub repository accessed through `/repos/{owner}/{repo}/contents`.
///
/// Revisions are blob SHAs, which is what the API expects back on update.
pub struct GitHubStore {
    agent: ureq::Agent,
    api_base: String,
    repository: RepositoryRef,
    branch: Option<String>,
    token: String,
}

impl GitHubStore {
    pub fn new(repository: RepositoryRef, token: String, config: &Config) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Self {
            agent: agent_config.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repository,
            branch: config.branch.clone(),
            token,
        }
    }

    fn contents_url(&self, path: &str) -> String {
        contents_url(&self.api_base, &self.repository, path)
    }

    fn get_contents(&self, path: &str) -> Result<ContentsResponse> {
        let url = self.contents_url(path);
        debug!("GET {}", url);

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", user_agent());
        if let Some(branch) = &self.branch {
            request = request.query("ref", branch);
        }

        let mut response = request.call().map_err(|e| status_error(path, e))?;
        Ok(response.body_mut().read_json::<ContentsResponse>()?)
    }
}

fn user_agent() -> String {
    format!("labscore/{}", env!("CARGO_PKG_VERSION"))
}

fn contents_url(api_base: &str, repository: &RepositoryRef, path: &str) -> String {
    let mut url = format!(
        "{}/repos/{}/{}/contents",
        api_base,
        urlencoding::encode(&repository.owner),
        urlencoding::encode(&repository.name)
    );
    for part in path.split('/').filter(|p| !p.is_empty()) {
        url.push('/');
        url.push_str(&urlencoding::encode(part));
    }
    url
}

fn status_error(path: &str, e: ureq::Error) -> Error {
    match e {
        ureq::Error::StatusCode(404) => Error::NotFound(path.to_string()),
        other => match Error::from(other) {
            Error::Http(message) => Error::store(path, message),
            err => err,
        },
    }
}

/// Map a failed PUT. A 409 is a stale `sha`; a 422 only means "file already
/// exists" when no `sha` was sent, otherwise it is some other validation error.
fn write_error(path: &str, prior_revision: Option<&str>, e: ureq::Error) -> Error {
    match e {
        ureq::Error::StatusCode(409) => Error::RevisionConflict {
            path: path.to_string(),
        },
        ureq::Error::StatusCode(422) if prior_revision.is_none() => Error::RevisionConflict {
            path: path.to_string(),
        },
        other => status_error(path, other),
    }
}

fn decode_content(path: &str, item: &ContentItem) -> Result<String> {
    if let Some(encoding) = item.encoding.as_deref()
        && encoding != "base64"
    {
        return Err(Error::Encoding(format!(
            "{}: unsupported content encoding {:?}",
            path, encoding
        )));
    }

    // The API wraps base64 content at 60 columns.
    let packed: String = item
        .content
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(packed)
        .map_err(|e| Error::Encoding(format!("{}: {}", path, e)))?;

    String::from_utf8(bytes).map_err(|e| Error::Encoding(format!("{} is not UTF-8: {}", path, e)))
}

fn to_entry(item: ContentItem) -> Option<Entry> {
    let kind = match item.kind.as_str() {
        "file" => EntryKind::File,
        "dir" => EntryKind::Dir,
        _ => return None,
    };
    Some(Entry {
        url: item.html_url.unwrap_or_default(),
        name: item.name,
        path: item.path,
        kind,
    })
}

impl ContentStore for GitHubStore {
    fn list_entries(&self, path: &str) -> Result<Vec<Entry>> {
        match self.get_contents(path)? {
            ContentsResponse::Dir(items) => {
                let mut entries: Vec<Entry> = items.into_iter().filter_map(to_entry).collect();
                entries.sort_by(|a, b| a.name.cmp(&b.name));
                Ok(entries)
            }
            ContentsResponse::File(_) => Err(Error::store(path, "not a directory")),
        }
    }

    fn read_text(&self, path: &str) -> Result<StoredFile> {
        match self.get_contents(path)? {
            ContentsResponse::File(item) if item.kind == "file" => {
                let content = decode_content(path, &item)?;
                Ok(StoredFile {
                    path: item.path,
                    content,
                    revision: item.sha,
                    url: item.html_url.unwrap_or_default(),
                })
            }
            _ => Err(Error::store(path, "not a file")),
        }
    }

    fn write_text(
        &mut self,
        path: &str,
        message: &str,
        content: &str,
        prior_revision: Option<&str>,
    ) -> Result<String> {
        let url = self.contents_url(path);
        let body = PutRequest {
            message,
            content: STANDARD.encode(content.as_bytes()),
            sha: prior_revision,
            branch: self.branch.as_deref(),
        };
        debug!("PUT {}", url);

        let result = self
            .agent
            .put(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", user_agent())
            .send_json(&body);

        let mut response = result.map_err(|e| write_error(path, prior_revision, e))?;

        let put: PutResponse = response.body_mut().read_json()?;
        info!("Committed {} to {} ({})", path, self.repository, put.content.sha);
        Ok(put.content.sha)
    }
}
