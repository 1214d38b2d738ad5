use serde::{Deserialize, Serialize};

/// Error payload of the `{Error: ...}` envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiError {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Extra")]
    pub extra: String,
    #[serde(rename = "IsRecoverable", alias = "Recoverable")]
    pub recoverable: bool,
}

impl ApiError {
    pub const GENERAL_MESSAGE: &'static str = "An error occurred in this app.";
    pub const GENERAL_EXTRA: &'static str = "Please reload this page.";

    /// Used whenever the server gave us nothing structured to show.
    pub fn general() -> Self {
        Self {
            message: Self::GENERAL_MESSAGE.to_string(),
            extra: Self::GENERAL_EXTRA.to_string(),
            recoverable: false,
        }
    }

    /// Client-side validation failure, never sent to the server.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: String::new(),
            recoverable: true,
        }
    }
}
