use thiserror::Error;

/// Message shown when a draw is requested before a file has been analyzed
pub const NO_FILE_MESSAGE: &str = "Please upload a CSV or XLSX file first.";

/// The two user-facing request flows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Analyze,
    Draw,
}

impl Flow {
    /// Panel text used when the server rejects a request without a message
    pub fn fallback_message(self) -> &'static str {
        match self {
            Flow::Analyze => "Failed to analyze file.",
            Flow::Draw => "Failed to draw winners.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Analyze => "analyze",
            Flow::Draw => "draw",
        }
    }
}

/// Why a flow invocation ended on its failure branch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// The request could not be sent or the response body could not be read
    #[error("Error: {0}")]
    Transport(String),

    /// The server answered but reported `ok: false` or a non-success status
    #[error("Request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Draw requested without an analyzed file
    #[error("{}", NO_FILE_MESSAGE)]
    NoFile,
}

impl FlowError {
    /// Text for the flow's inline error panel
    pub fn user_message(&self, flow: Flow) -> String {
        match self {
            FlowError::Transport(description) => format!("Error: {}", description),
            FlowError::Rejected { message: Some(message) } => message.clone(),
            FlowError::Rejected { message: None } => flow.fallback_message().to_string(),
            FlowError::NoFile => NO_FILE_MESSAGE.to_string(),
        }
    }
}

/// Failures raised by a `Transport` implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Decode(String),
}

impl From<TransportError> for FlowError {
    fn from(err: TransportError) -> Self {
        FlowError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(format!("Invalid JSON response: {}", err))
    }
}

/// Configuration loading errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
