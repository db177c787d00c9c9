//! Ordered mirror server lists.

use url::Url;

use super::error::FetchError;

/// Priority-ordered base URLs of servers carrying the same content.
///
/// The first server is tried first for every path; later ones are fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorList {
    servers: Vec<String>,
}

impl MirrorList {
    /// Validates and stores base URLs in the given order.
    ///
    /// Trailing slashes are trimmed so `{server}/{path}` never doubles them.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidServer`] if a base URL does not parse, is
    /// not `http`/`https`, or has no host.
    pub fn new<I, S>(servers: I) -> Result<Self, FetchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let servers = servers
            .into_iter()
            .map(|server| validate_server(server.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { servers })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Iterates base URLs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.servers.iter().map(String::as_str)
    }

    /// Builds the request URL for `relative` on the server at `index`.
    #[must_use]
    pub fn url_for(&self, index: usize, relative: &str) -> Option<String> {
        self.servers
            .get(index)
            .map(|server| format!("{server}/{relative}"))
    }
}

fn validate_server(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| FetchError::invalid_server(raw, e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(FetchError::invalid_server(
                raw,
                format!("scheme '{scheme}' is not supported"),
            ));
        }
    }

    if parsed.host().is_none() {
        return Err(FetchError::invalid_server(raw, "URL has no host"));
    }

    Ok(trimmed.to_string())
}
