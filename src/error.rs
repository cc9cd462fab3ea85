/// Failure taxonomy shared by every client operation.
///
/// Validation messages carry the product's user-facing text; everything else
/// is technical and mapped to user-facing copy by the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No stored credential. The operation was refused before any network
    /// call; the caller must route to login.
    #[error("not logged in")]
    NotLoggedIn,

    /// The server rejected the credential (HTTP 401). The stored session has
    /// already been cleared and the `on_unauthorized` hook has fired.
    #[error("session expired")]
    SessionExpired,

    /// Input failed local validation; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The server refused the request and provided a user-facing message,
    /// surfaced verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The server failed without a usable message (5xx, or 4xx with no
    /// `message` field).
    #[error("request failed with status {status}")]
    Fault { status: u16 },

    /// The request produced no response at all.
    #[error("network unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the endpoint's schema.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A successful response carried no `data` where the operation requires a
    /// payload.
    #[error("response contained no data")]
    MissingData,

    /// Credential store operation failed.
    #[error("token store error: {0}")]
    Store(String),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means the caller must route to the login entry
    /// point before retrying anything.
    #[must_use]
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NotLoggedIn | Self::SessionExpired)
    }

    /// The message to show the user directly, when one exists: the server's
    /// own `message` for [`Error::Rejected`], or the local validation text
    /// for [`Error::Validation`]. Everything else gets per-action copy from
    /// the caller.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } | Self::Validation(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_login_only_for_auth_failures() {
        assert!(Error::NotLoggedIn.requires_login());
        assert!(Error::SessionExpired.requires_login());
        assert!(!Error::Fault { status: 500 }.requires_login());
        assert!(!Error::Validation("x".into()).requires_login());
    }

    #[test]
    fn user_message_passes_server_text_through() {
        let err = Error::Rejected {
            status: 400,
            message: "오늘 이미 작성한 독후감이 존재합니다.".into(),
        };
        assert_eq!(err.user_message(), Some("오늘 이미 작성한 독후감이 존재합니다."));
        assert_eq!(err.to_string(), "오늘 이미 작성한 독후감이 존재합니다.");
    }

    #[test]
    fn fault_has_no_user_message() {
        assert_eq!(Error::Fault { status: 500 }.user_message(), None);
    }
}
