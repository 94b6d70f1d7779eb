use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use encoding_rs::WINDOWS_1252;
use log::debug;
use walkdir::WalkDir;
use crate::errors::SubtitleError;

// @module: File and directory utilities

// @const: Bytes left undefined by code page 1252, which WINDOWS_1252 passes through as C1 controls
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(extension) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    /// Read a subtitle file as text.
    ///
    /// The bytes are decoded as UTF-8 first, falling back to Windows-1252.
    /// Bytes with no Windows-1252 mapping fail with `SubtitleError::Decode`.
    /// A leading byte order mark is dropped and CRLF line endings become LF.
    pub fn read_subtitle_text<P: AsRef<Path>>(path: P) -> Result<String, SubtitleError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SubtitleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                debug!("{:?} is not valid UTF-8, retrying as Windows-1252", path);
                if e.as_bytes().iter().any(|byte| CP1252_UNDEFINED.contains(byte)) {
                    return Err(SubtitleError::Decode { path: path.to_path_buf() });
                }
                WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(e.as_bytes())
                    .map(|text| text.into_owned())
                    .ok_or_else(|| SubtitleError::Decode { path: path.to_path_buf() })?
            }
        };

        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        Ok(text.replace("\r\n", "\n"))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
