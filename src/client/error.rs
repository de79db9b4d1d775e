use thiserror::Error;

/// Failures surfaced by [`crate::client::RecipeClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a readable response (connection refused,
    /// timeout, broken body).
    #[error("Failed to reach the recipe API: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error envelope.
    #[error("Recipe API error ({status}): {}", .messages.join("; "))]
    Api { status: u16, messages: Vec<String> },

    /// The API answered with something that is not an envelope.
    #[error("Unexpected response from recipe API ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Http(_))
    }

    /// Messages the server put in its error envelope, if any.
    pub fn server_messages(&self) -> Option<&[String]> {
        match self {
            ClientError::Api { messages, .. } if !messages.is_empty() => Some(messages),
            _ => None,
        }
    }

    /// Text to show a user: the server's messages verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_messages()
            .map(|messages| messages.join("\n"))
            .unwrap_or_else(|| fallback.to_string())
    }
}
