//! Streaming download responses

use futures_util::{Stream, StreamExt};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap};

use crate::error::{PandaDocError, Result};

/// A successful response whose body has not been read yet.
///
/// The caller owns the body: consume it with [`bytes`](Self::bytes),
/// [`chunk`](Self::chunk) or [`bytes_stream`](Self::bytes_stream), or release
/// it with [`close`](Self::close) (dropping the value does the same).
#[derive(Debug)]
pub struct DownloadResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub content_length: Option<u64>,
    response: reqwest::Response,
}

impl DownloadResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        let headers = response.headers().clone();
        let header_text = |name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header_text(CONTENT_TYPE);
        let content_disposition = header_text(CONTENT_DISPOSITION);
        Self {
            status: response.status(),
            content_length: response.content_length(),
            content_type,
            content_disposition,
            headers,
            response,
        }
    }

    /// File name from `Content-Disposition`, if the server sent one.
    pub fn file_name(&self) -> Option<String> {
        let disposition = self.content_disposition.as_deref()?;
        disposition.split(';').map(str::trim).find_map(|param| {
            let value = param.strip_prefix("filename=")?;
            let value = value.trim_matches('"');
            (!value.is_empty()).then(|| value.to_string())
        })
    }

    /// Read the whole body.
    pub async fn bytes(self) -> Result<Vec<u8>> {
        let bytes = self
            .response
            .bytes()
            .await
            .map_err(PandaDocError::Transport)?;
        Ok(bytes.to_vec())
    }

    /// Read the next chunk of the body; `None` at the end.
    pub async fn chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let chunk = self
            .response
            .chunk()
            .await
            .map_err(PandaDocError::Transport)?;
        Ok(chunk.map(|c| c.to_vec()))
    }

    /// Turn the body into a stream of chunks.
    pub fn bytes_stream(self) -> impl Stream<Item = Result<Vec<u8>>> + Send {
        self.response.bytes_stream().map(|chunk| {
            chunk
                .map(|c| c.to_vec())
                .map_err(PandaDocError::Transport)
        })
    }

    /// Release the body without reading it.
    pub fn close(self) {
        drop(self.response);
    }
}
