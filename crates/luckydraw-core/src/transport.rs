//! Seam between the flows and the HTTP client

use async_trait::async_trait;

use crate::api::{AnalyzeResponse, DrawParams, DrawResponse, Reply};
use crate::error::TransportError;

/// A file chosen by the user, held until the next selection
pub trait SelectedFile: Clone {
    fn file_name(&self) -> String;
}

/// In-memory upload, for native callers and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl SelectedFile for Upload {
    fn file_name(&self) -> String {
        self.name.clone()
    }
}

/// Multipart client for the two endpoints
///
/// Implementations send `file` (plus the draw parameters for `draw`) and
/// decode the JSON body whatever the HTTP status. Only failures to send or
/// decode are errors; rejections travel inside the `Reply`.
#[async_trait(?Send)]
pub trait Transport {
    type File: SelectedFile;

    async fn analyze(&self, file: &Self::File) -> Result<Reply<AnalyzeResponse>, TransportError>;

    async fn draw(
        &self,
        file: &Self::File,
        params: &DrawParams,
    ) -> Result<Reply<DrawResponse>, TransportError>;
}
