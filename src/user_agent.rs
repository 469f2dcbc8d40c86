//! User-Agent sent with every request to both game servers.
//!
//! Both servers ask API clients to identify themselves with a way to reach
//! the maintainer, so the header carries the project URL and a contact address.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/pgn-downloader/pgn-downloader";

/// Contact address for server operators.
const CONTACT_ADDRESS: &str = "pgn-downloader@users.noreply.github.com";

/// Default User-Agent for all outbound requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("pgn-downloader/{version} (+{PROJECT_UA_URL}; contact: {CONTACT_ADDRESS})")
}
