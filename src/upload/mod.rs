// SPDX-License-Identifier: MPL-2.0
//! Image selection, validation and reading.
//!
//! A picked or dropped file goes through two checks:
//!
//! 1. [`inspect`] looks at the file name and size only, so oversized or
//!    non-image files are rejected before anything is read.
//! 2. [`read_with_progress`] reads the file in chunks, reporting the real
//!    progress, then sniffs the bytes to confirm they hold an image.
//!
//! A failed check never touches the currently held image.

use futures_util::stream::{self, Stream};
use image_rs::ImageFormat;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Largest accepted upload (16 MiB, inclusive).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Size of each read while loading a file.
pub const READ_CHUNK_BYTES: usize = 64 * 1024;

/// Extensions offered by the file picker.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

/// File name given to images downloaded from a URL.
pub const SAMPLE_FILE_NAME: &str = "sample-image.jpg";

/// Reasons an image cannot be used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// File exceeds [`MAX_UPLOAD_BYTES`].
    TooLarge { size: u64 },
    /// File type is not an image.
    NotAnImage,
    /// File could not be read.
    Io(String),
}

impl UploadError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadError::TooLarge { .. } => "error-upload-too-large",
            UploadError::NotAnImage => "error-upload-not-image",
            UploadError::Io(_) => "error-upload-io",
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::TooLarge { size } => write!(
                f,
                "file is {size} bytes, limit is {MAX_UPLOAD_BYTES} bytes"
            ),
            UploadError::NotAnImage => write!(f, "file is not an image"),
            UploadError::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for UploadError {}

/// An image held in memory, ready to be previewed and uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    file_name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl UploadedImage {
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Builds an image from downloaded bytes, deriving the MIME type from content.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let size = bytes.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { size });
        }
        let mime_type = sniff_mime(&bytes).ok_or(UploadError::NotAnImage)?;
        Ok(Self::new(file_name, mime_type, bytes))
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A file that passed the name and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
    pub size: u64,
}

/// Returns the `image/*` MIME type matching the file extension, if any.
#[must_use]
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with("image/"))
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image_rs::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type())
        .filter(|mime| mime.starts_with("image/"))
}

/// Checks a candidate file from its path and size.
///
/// The size limit is checked first, then the type.
pub fn validate(path: &Path, size: u64) -> Result<ValidatedFile, UploadError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    let mime_type = mime_from_path(path).ok_or(UploadError::NotAnImage)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    Ok(ValidatedFile {
        path: path.to_path_buf(),
        file_name,
        mime_type,
        size,
    })
}

/// Reads the file metadata and validates it.
pub fn inspect(path: &Path) -> Result<ValidatedFile, UploadError> {
    let metadata = std::fs::metadata(path).map_err(|e| UploadError::Io(e.to_string()))?;
    if !metadata.is_file() {
        return Err(UploadError::NotAnImage);
    }
    validate(path, metadata.len())
}

/// Events produced while reading a validated file.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadEvent {
    /// Fraction of the file read so far (0.0 - 1.0).
    Progress(f32),
    /// Reading ended.
    Finished(Result<UploadedImage, UploadError>),
}

enum ReadPhase {
    Opening(ValidatedFile),
    Reading {
        file: tokio::fs::File,
        meta: ValidatedFile,
        buffer: Vec<u8>,
        chunk: Vec<u8>,
    },
    Done,
}

/// Reads a validated file chunk by chunk.
///
/// Emits `Progress` after every chunk and exactly one `Finished` at the end.
pub fn read_with_progress(file: ValidatedFile) -> impl Stream<Item = ReadEvent> + Send + 'static {
    stream::unfold(ReadPhase::Opening(file), |phase| async move {
        match phase {
            ReadPhase::Opening(meta) => match tokio::fs::File::open(&meta.path).await {
                Ok(file) => {
                    let capacity = usize::try_from(meta.size).unwrap_or(0);
                    Some((
                        ReadEvent::Progress(0.0),
                        ReadPhase::Reading {
                            file,
                            meta,
                            buffer: Vec::with_capacity(capacity),
                            chunk: vec![0; READ_CHUNK_BYTES],
                        },
                    ))
                }
                Err(e) => Some((
                    ReadEvent::Finished(Err(UploadError::Io(e.to_string()))),
                    ReadPhase::Done,
                )),
            },
            ReadPhase::Reading {
                mut file,
                meta,
                mut buffer,
                mut chunk,
            } => match file.read(&mut chunk).await {
                Ok(0) => Some((ReadEvent::Finished(finish(meta, buffer)), ReadPhase::Done)),
                Ok(n) => {
                    buffer.extend_from_slice(&chunk[..n]);
                    let read = buffer.len() as u64;
                    if read > MAX_UPLOAD_BYTES {
                        return Some((
                            ReadEvent::Finished(Err(UploadError::TooLarge { size: read })),
                            ReadPhase::Done,
                        ));
                    }
                    Some((
                        ReadEvent::Progress(fraction(read, meta.size)),
                        ReadPhase::Reading {
                            file,
                            meta,
                            buffer,
                            chunk,
                        },
                    ))
                }
                Err(e) => Some((
                    ReadEvent::Finished(Err(UploadError::Io(e.to_string()))),
                    ReadPhase::Done,
                )),
            },
            ReadPhase::Done => None,
        }
    })
}

#[allow(clippy::cast_precision_loss)]
fn fraction(read: u64, total: u64) -> f32 {
    if total == 0 {
        return 1.0;
    }
    (read as f64 / total as f64).min(1.0) as f32
}

fn finish(meta: ValidatedFile, buffer: Vec<u8>) -> Result<UploadedImage, UploadError> {
    // The extension said image; the content has to agree.
    if image_rs::guess_format(&buffer).is_err() {
        return Err(UploadError::NotAnImage);
    }
    Ok(UploadedImage::new(meta.file_name, meta.mime_type, buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tempfile::tempdir;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn fake_png(len: usize) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.resize(len.max(PNG_SIGNATURE.len()), 0);
        bytes
    }

    #[test]
    fn oversized_file_is_rejected() {
        let result = validate(Path::new("photo.png"), MAX_UPLOAD_BYTES + 1);
        assert_eq!(
            result,
            Err(UploadError::TooLarge {
                size: MAX_UPLOAD_BYTES + 1
            })
        );
    }

    #[test]
    fn file_at_the_limit_is_accepted() {
        let file = validate(Path::new("photo.png"), MAX_UPLOAD_BYTES).expect("limit is inclusive");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.file_name, "photo.png");
    }

    #[test]
    fn size_is_checked_before_type() {
        let result = validate(Path::new("notes.txt"), MAX_UPLOAD_BYTES * 2);
        assert!(matches!(result, Err(UploadError::TooLarge { .. })));
    }

    #[test]
    fn non_image_extension_is_rejected() {
        assert_eq!(
            validate(Path::new("notes.txt"), 10),
            Err(UploadError::NotAnImage)
        );
        assert_eq!(
            validate(Path::new("no_extension"), 10),
            Err(UploadError::NotAnImage)
        );
    }

    #[test]
    fn common_image_extensions_map_to_image_mime_types() {
        assert_eq!(mime_from_path(Path::new("a.jpg")), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("a.JPEG")), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("a.webp")), Some("image/webp"));
        assert_eq!(mime_from_path(Path::new("a.gif")), Some("image/gif"));
        assert_eq!(mime_from_path(Path::new("a.pdf")), None);
    }

    #[test]
    fn picker_extensions_are_all_recognized() {
        for ext in IMAGE_EXTENSIONS {
            let path = PathBuf::from(format!("photo.{ext}"));
            assert!(mime_from_path(&path).is_some(), "{ext} not recognized");
        }
    }

    #[test]
    fn inspect_rejects_directories() {
        let dir = tempdir().expect("failed to create temp dir");
        assert_eq!(inspect(dir.path()), Err(UploadError::NotAnImage));
    }

    #[test]
    fn inspect_reports_missing_files() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = inspect(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(UploadError::Io(_))));
    }

    #[test]
    fn from_bytes_sniffs_the_mime_type() {
        let image = UploadedImage::from_bytes(SAMPLE_FILE_NAME, fake_png(32)).expect("png bytes");
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.file_name(), SAMPLE_FILE_NAME);
        assert_eq!(image.len(), 32);
    }

    #[test]
    fn from_bytes_rejects_non_images() {
        let result = UploadedImage::from_bytes("page.html", b"<html></html>".to_vec());
        assert_eq!(result, Err(UploadError::NotAnImage));
    }

    #[tokio::test]
    async fn read_reports_progress_and_finishes_with_the_image() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("cat.png");
        let content = fake_png(READ_CHUNK_BYTES * 2 + 10);
        std::fs::write(&path, &content).expect("write image");

        let file = inspect(&path).expect("valid file");
        let events: Vec<ReadEvent> = read_with_progress(file).collect().await;

        let progress: Vec<f32> = events
            .iter()
            .filter_map(|e| match e {
                ReadEvent::Progress(p) => Some(*p),
                ReadEvent::Finished(_) => None,
            })
            .collect();
        assert_eq!(progress.first(), Some(&0.0));
        assert_eq!(progress.last(), Some(&1.0));
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));

        match events.last() {
            Some(ReadEvent::Finished(Ok(image))) => {
                assert_eq!(image.bytes(), content.as_slice());
                assert_eq!(image.mime_type(), "image/png");
            }
            other => panic!("expected finished image, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn read_rejects_content_that_is_not_an_image() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"definitely not a png").expect("write file");

        let file = inspect(&path).expect("extension passes");
        let events: Vec<ReadEvent> = read_with_progress(file).collect().await;

        assert_eq!(
            events.last(),
            Some(&ReadEvent::Finished(Err(UploadError::NotAnImage)))
        );
    }
}
