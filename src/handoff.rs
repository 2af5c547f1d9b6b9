//! Hand-off to the external tag-writer collaborator.
//!
//! The tag writer is a sibling application, not part of this program: it is
//! reachable only through a fixed message contract, and its absence just
//! disables write-back - metadata display is unaffected.
//!
//! The contract is a flat JSON object with exactly the keys in
//! [`MESSAGE_KEYS`] (empty string, never absent, when a field is
//! unresolved), plus `COVER_PATH` pointing at the spooled image when a cover
//! was found. The message is piped to the configured command's stdin.
//!
//! The cover image itself travels through [`CoverSpool`], a transient
//! directory owned by the run; stale entries from prior runs are cleared
//! before each write so the consumer can never pick up an old image.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::resolve::{CoverArt, ResolvedMetadata};

/// The tag-writer contract keys, in wire order.
pub const MESSAGE_KEYS: [&str; 8] = [
    "TITLE",
    "ARTIST",
    "ALBUM",
    "ALBUM_ARTIST",
    "YEAR",
    "COUNTRY",
    "TRACK",
    "TRACK_TOTAL",
];

/// One outgoing tag-writer message.
#[derive(Debug, Clone)]
pub struct TagWriterMessage {
    fields: Vec<(&'static str, String)>,
    /// Spooled cover image, when one was found
    pub cover_path: Option<PathBuf>,
}

impl TagWriterMessage {
    /// Build the message for one resolved record.
    pub fn new(metadata: &ResolvedMetadata, cover_path: Option<PathBuf>) -> Self {
        let values = [
            metadata.title.clone(),
            metadata.artist.clone(),
            metadata.album.clone(),
            metadata.album_artist.clone(),
            metadata.year.clone(),
            metadata.country.clone(),
            metadata.track_number.clone(),
            metadata.track_total.clone(),
        ];

        Self {
            fields: MESSAGE_KEYS.into_iter().zip(values).collect(),
            cover_path,
        }
    }

    /// Key/value pairs in contract order.
    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    /// Serialize for the wire.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (key, value) in &self.fields {
            object.insert((*key).to_string(), serde_json::Value::String(value.clone()));
        }
        if let Some(ref path) = self.cover_path {
            object.insert(
                "COVER_PATH".to_string(),
                serde_json::Value::String(path.to_string_lossy().into_owned()),
            );
        }
        serde_json::Value::Object(object)
    }
}

/// Transient directory handing fetched covers to the external collaborator.
pub struct CoverSpool {
    dir: PathBuf,
}

impl CoverSpool {
    /// Use an explicit directory (tests, custom setups).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Spool under the OS cache directory.
    pub fn for_current_user() -> Option<Self> {
        dirs::cache_dir().map(|d| Self::at(d.join("songid").join("covers")))
    }

    /// Write the cover into the spool, clearing stale entries first.
    ///
    /// Returns the path of the written image, suitable for `COVER_PATH`.
    pub fn store(&self, art: &CoverArt) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        // Clear prior runs' images; a leftover would confuse the consumer
        for entry in std::fs::read_dir(&self.dir)? {
            let stale = entry?.path();
            if let Err(e) = std::fs::remove_file(&stale) {
                tracing::warn!("Couldn't delete stale cover {:?}: {}", stale, e);
            }
        }

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = self
            .dir
            .join(format!("cover-{stamp}.{}", extension_for(&art.mime_type)));
        std::fs::write(&path, &art.data)?;
        Ok(path)
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        _ => "jpg",
    }
}

/// Handle to the external tag-writer command, if it is installed.
pub struct TagWriter {
    command: PathBuf,
}

impl TagWriter {
    /// Detect the collaborator.
    ///
    /// `None` (not configured, or configured but missing on disk) means the
    /// write-back affordance is unavailable; nothing else changes.
    pub fn detect(command: Option<&Path>) -> Option<Self> {
        let command = command?;
        if command.exists() {
            Some(Self {
                command: command.to_path_buf(),
            })
        } else {
            tracing::info!("Tag writer {:?} not present, write-back disabled", command);
            None
        }
    }

    /// Send one message to the collaborator's stdin.
    pub fn send(&self, message: &TagWriterMessage) -> std::io::Result<()> {
        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .spawn()?;

        // Taking stdin drops it at scope end, closing the pipe so the
        // child sees EOF before we wait on it
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(message.to_json().to_string().as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(std::io::Error::other(format!(
                "tag writer exited with {status}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> ResolvedMetadata {
        ResolvedMetadata {
            title: "Song".to_string(),
            artist: "Band".to_string(),
            album: "Album".to_string(),
            album_artist: "Band".to_string(),
            year: "2001".to_string(),
            country: "US".to_string(),
            track_number: "3".to_string(),
            track_total: "10".to_string(),
        }
    }

    #[test]
    fn test_message_has_exactly_the_contract_keys_in_order() {
        let message = TagWriterMessage::new(&sample_metadata(), None);

        let keys: Vec<_> = message.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, MESSAGE_KEYS);
    }

    #[test]
    fn test_unresolved_fields_are_empty_strings_not_absent() {
        let message = TagWriterMessage::new(&ResolvedMetadata::default(), None);

        assert_eq!(message.entries().len(), 8);
        for (_, value) in message.entries() {
            assert_eq!(value, "");
        }

        let json = message.to_json();
        for key in MESSAGE_KEYS {
            assert_eq!(json[key], "");
        }
        assert!(json.get("COVER_PATH").is_none());
    }

    #[test]
    fn test_message_json_carries_cover_path() {
        let message =
            TagWriterMessage::new(&sample_metadata(), Some(PathBuf::from("/tmp/c.jpg")));

        let json = message.to_json();
        assert_eq!(json["TITLE"], "Song");
        assert_eq!(json["TRACK_TOTAL"], "10");
        assert_eq!(json["COVER_PATH"], "/tmp/c.jpg");
    }

    #[test]
    fn test_spool_clears_stale_entries_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("cover-old.jpg");
        std::fs::write(&stale, b"old image").unwrap();

        let spool = CoverSpool::at(dir.path());
        let art = CoverArt {
            data: b"new image".to_vec(),
            mime_type: "image/png".to_string(),
            url: "http://example.com/front".to_string(),
        };
        let written = spool.store(&art).unwrap();

        assert!(!stale.exists());
        assert!(written.exists());
        assert_eq!(written.extension().unwrap(), "png");
        assert_eq!(std::fs::read(&written).unwrap(), b"new image");

        // The spool only ever holds the current run's image
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_spool_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let spool = CoverSpool::at(dir.path().join("nested").join("covers"));
        let art = CoverArt {
            data: vec![1, 2, 3],
            mime_type: "image/jpeg".to_string(),
            url: String::new(),
        };

        let written = spool.store(&art).unwrap();
        assert!(written.exists());
        assert_eq!(written.extension().unwrap(), "jpg");
    }

    #[test]
    fn test_tag_writer_detection() {
        // Not configured
        assert!(TagWriter::detect(None).is_none());

        // Configured but missing on disk
        assert!(TagWriter::detect(Some(Path::new("/nonexistent/tag-writer"))).is_none());

        // Present
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(TagWriter::detect(Some(file.path())).is_some());
    }
}
