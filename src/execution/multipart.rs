//! multipart/form-data payloads
//!
//! The body is encoded to bytes once so every retry attempt replays it.

use rand::Rng;
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::defaults;
use crate::error::{PandaDocError, Result};

/// One file part of a multipart upload.
pub struct FilePart {
    field_name: String,
    file_name: String,
    content_type: Option<String>,
    source: Option<Box<dyn Read + Send>>,
}

impl FilePart {
    /// A file part with no source yet. Encoding fails with `NilFileReader`
    /// until one is attached.
    pub fn new(field_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            content_type: None,
            source: None,
        }
    }

    /// A file part read from `reader` at encode time.
    pub fn from_reader<R>(field_name: impl Into<String>, file_name: impl Into<String>, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::new(field_name, file_name).reader(reader)
    }

    /// A file part holding `bytes`.
    pub fn from_bytes(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self::from_reader(field_name, file_name, std::io::Cursor::new(bytes.into()))
    }

    /// A file part reading the file at `path`; the file name is taken from the path.
    pub fn from_path(field_name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            PandaDocError::Configuration(format!("open upload file {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_reader(field_name, file_name, file))
    }

    /// Attach the byte source.
    pub fn reader<R>(mut self, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        self.source = Some(Box::new(reader));
        self
    }

    /// Set an explicit part content type instead of guessing from the file name.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

/// Plain fields followed by file parts, encoded in the order given.
#[derive(Debug, Default)]
pub struct MultipartPayload {
    fields: Vec<(String, String)>,
    files: Vec<FilePart>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain text field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append several plain text fields in order.
    pub fn fields<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields
            .extend(fields.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set a plain text field, replacing the value of an existing field with
    /// the same name in place. Appends when the name is new.
    pub fn set_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter().position(|(n, _)| *n == name) {
            Some(index) => {
                self.fields[index].1 = value;
                let mut seen = false;
                self.fields.retain(|(n, _)| {
                    let keep = *n != name || !seen;
                    seen |= *n == name;
                    keep
                });
            }
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Append a file part.
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    pub fn field_pairs(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    /// Encode to `(body, content_type)`. Every file part is checked for a
    /// source before anything is read.
    pub(crate) fn encode(self) -> Result<(Vec<u8>, String)> {
        if self.files.iter().any(|f| f.source.is_none()) {
            return Err(PandaDocError::NilFileReader);
        }

        let boundary = random_boundary();
        let mut body = Vec::new();

        for (name, value) in &self.fields {
            write_part_header(&mut body, &boundary, name, None, None);
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }

        for file in self.files {
            let field = non_empty_or(&file.field_name, defaults::multipart::FILE_FIELD);
            let file_name = non_empty_or(&file.file_name, defaults::multipart::FILE_NAME);
            let content_type = file
                .content_type
                .clone()
                .unwrap_or_else(|| guess_content_type(file_name));
            write_part_header(&mut body, &boundary, field, Some(file_name), Some(&content_type));

            if let Some(mut source) = file.source {
                source
                    .read_to_end(&mut body)
                    .map_err(|e| PandaDocError::EncodeMultipart {
                        field: field.to_string(),
                        source: e,
                    })?;
            }
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        Ok((body, format!("multipart/form-data; boundary={boundary}")))
    }
}

fn write_part_header(
    body: &mut Vec<u8>,
    boundary: &str,
    name: &str,
    file_name: Option<&str>,
    content_type: Option<&str>,
) {
    let mut header = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"",
        escape_quotes(name)
    );
    if let Some(file_name) = file_name {
        header.push_str(&format!("; filename=\"{}\"", escape_quotes(file_name)));
    }
    header.push_str("\r\n");
    if let Some(content_type) = content_type {
        header.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    header.push_str("\r\n");
    body.extend_from_slice(header.as_bytes());
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or(defaults::multipart::OCTET_STREAM)
        .to_string()
}

fn random_boundary() -> String {
    let bytes: [u8; 16] = rand::thread_rng().r#gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
