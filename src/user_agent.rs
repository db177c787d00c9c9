//! User-Agent string sent to mirror servers.

/// Default User-Agent for mirror requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("gamezipper/{version}")
}
