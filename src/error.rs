use reqwest::StatusCode;

/// Everything that can go wrong talking to the backend.
///
/// There is deliberately no validation variant: the client never validates
/// payloads, the backend does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The request never completed (connection refused, TLS, reset, ...).
  #[error("request failed: {0}")]
  Network(#[from] reqwest::Error),
  /// The backend answered with a non-2xx status.
  #[error("backend returned {status}: {body}")]
  Http { status: StatusCode, body: String },
  #[error(transparent)]
  Decode(#[from] serde_json::Error),
  #[error("base url `{0}` is not usable")]
  InvalidBaseUrl(String),
  #[error("record has no id")]
  MissingId,
}

impl Error {
  /// The response body for HTTP errors, or the error message otherwise.
  pub fn detail(&self) -> String {
    match self {
      Self::Http { body, .. } if !body.is_empty() => body.clone(),
      _ => self.to_string(),
    }
  }

  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Http { status, .. } => Some(*status),
      Self::Network(err) => err.status(),
      _ => None,
    }
  }
}
