//! Plain-text transcript export.
//!
//! Formatting is pure: [`export_transcript`] only reads the messages it is
//! given. Writing the result to disk is a separate, explicit step.

use base64::Engine as _;
use chrono::{DateTime, Local, TimeZone};
use std::error::Error as StdError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::core::config::data::path_display;
use crate::core::message::Message;

const FILENAME_TIMESTAMP: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug)]
pub enum ExportError {
    AlreadyExists(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::AlreadyExists(path) => {
                write!(f, "File '{}' already exists", path_display(path))
            }
            ExportError::Io { path, source } => {
                write!(f, "Failed to write {}: {}", path_display(path), source)
            }
            ExportError::Decode(detail) => write!(f, "Invalid export blob: {detail}"),
        }
    }
}

impl StdError for ExportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ExportError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A formatted transcript plus the filename it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTranscript {
    pub filename: String,
    pub text: String,
}

impl ExportedTranscript {
    /// Base64 encoding of the transcript text.
    pub fn encoded(&self) -> String {
        base64::prelude::BASE64_STANDARD.encode(self.text.as_bytes())
    }

    /// HTML anchor carrying the transcript as a `data:` URI.
    pub fn download_link(&self) -> String {
        format!(
            r#"<a href="data:file/txt;base64,{}" download="{}">Download Chat History</a>"#,
            self.encoded(),
            self.filename
        )
    }

    /// Write the text into `dir` under the generated filename. Existing files
    /// are never overwritten.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        let io_error = |source: std::io::Error| ExportError::Io {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(io_error)?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(ExportError::AlreadyExists(path.clone()))
            }
            Err(err) => return Err(io_error(err)),
        };
        file.write_all(self.text.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;

        tracing::info!(path = %path.display(), "transcript exported");
        Ok(path)
    }
}

/// Decode a blob produced by [`ExportedTranscript::encoded`] back to text.
pub fn decode_blob(blob: &str) -> Result<String, ExportError> {
    let bytes = base64::prelude::BASE64_STANDARD
        .decode(blob.trim())
        .map_err(|err| ExportError::Decode(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Decode(err.to_string()))
}

/// Each message as `"<Role>: <content>"`, joined by newlines.
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::labelled)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_filename<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("chat_history_{}.txt", timestamp.format(FILENAME_TIMESTAMP))
}

pub fn export_transcript(messages: &[Message]) -> ExportedTranscript {
    export_transcript_at(messages, &Local::now())
}

pub fn export_transcript_at<Tz: TimeZone>(
    messages: &[Message],
    timestamp: &DateTime<Tz>,
) -> ExportedTranscript
where
    Tz::Offset: fmt::Display,
{
    ExportedTranscript {
        filename: export_filename(timestamp),
        text: format_transcript(messages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample() -> Vec<Message> {
        vec![Message::user("hi"), Message::assistant("NeX: hello")]
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, 9, 5, 3).unwrap()
    }

    #[test]
    fn formats_roles_capitalized_and_newline_joined() {
        let export = export_transcript(&sample());
        assert_eq!(export.text, "User: hi\nAssistant: NeX: hello");
    }

    #[test]
    fn blob_decodes_back_to_text() {
        let export = export_transcript(&sample());
        assert_eq!(
            decode_blob(&export.encoded()).expect("decode"),
            "User: hi\nAssistant: NeX: hello"
        );
        assert!(decode_blob("!!not base64!!").is_err());
    }

    #[test]
    fn filename_embeds_timestamp() {
        let export = export_transcript_at(&sample(), &fixed_time());
        assert_eq!(export.filename, "chat_history_2024-08-01_09-05-03.txt");
        assert!(export
            .download_link()
            .ends_with(r#"download="chat_history_2024-08-01_09-05-03.txt">Download Chat History</a>"#));
    }

    #[test]
    fn empty_transcript_exports_empty_text() {
        assert_eq!(export_transcript(&[]).text, "");
    }

    #[test]
    fn write_to_refuses_to_overwrite() {
        let dir = TempDir::new().expect("temp dir");
        let export = export_transcript_at(&sample(), &fixed_time());

        let path = export.write_to(dir.path()).expect("first write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read back"),
            "User: hi\nAssistant: NeX: hello"
        );

        assert!(matches!(
            export.write_to(dir.path()),
            Err(ExportError::AlreadyExists(_))
        ));
    }
}
