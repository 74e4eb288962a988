//! Error taxonomy for Trello interactions
//!
//! Every variant carries enough context (the identifier that failed to
//! resolve, the HTTP status, the path) for the user to retry manually.
//! No variant is retried automatically.

use thiserror::Error;

/// Errors surfaced by credential resolution and the Trello API client.
#[derive(Debug, Error)]
pub enum TrelloError {
    /// The API key environment variable is absent. Fatal, pre-network.
    #[error("TRELLO_API_KEY is not configured. Export it before running trel.")]
    MissingApiKey,

    /// The card identifier did not resolve.
    #[error("card '{0}' was not found. Check the short link or card id.")]
    CardNotFound(String),

    /// The board identifier did not resolve.
    #[error("board '{0}' was not found. Check the board short link or id.")]
    BoardNotFound(String),

    /// A list name matched nothing on the board.
    #[error("no list named '{list}' on board '{board}'")]
    ListNotFound {
        /// The list name or id that failed to resolve
        list: String,
        /// The board the lists were fetched from
        board: String,
    },

    /// Trello rejected the key/token pair.
    #[error(
        "Trello rejected the credentials (HTTP {status}). \
         Run `trel auth url` to create a fresh token and update TRELLO_TOKEN."
    )]
    AuthRejected {
        /// The HTTP status Trello answered with (401 or 403)
        status: u16,
    },

    /// Any other non-success HTTP response.
    #[error("Trello returned HTTP {status} for {path}: {body}")]
    Api {
        /// The HTTP status code
        status: u16,
        /// The request path that failed
        path: String,
        /// The response body, verbatim
        body: String,
    },

    /// The request never produced an HTTP response.
    #[error("unable to reach Trello: {0}")]
    Network(String),

    /// The response body did not match the expected schema.
    #[error("failed to decode the Trello response for {path}: {detail}")]
    Decode {
        /// The request path whose response failed to decode
        path: String,
        /// The underlying deserialization error
        detail: String,
    },
}
