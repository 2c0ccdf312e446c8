use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".avi", ".mkv", ".mov"];

/// Extensions called out one by one in the scan summary.
pub const NOTABLE_EXTENSIONS: [&str; 3] = [".exe", ".bat", ".txt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Lower-cased, dot included, empty when the name has no extension.
    pub extension: String,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        let extension = extension_of(&path);
        FileEntry { path, extension }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_video(&self) -> bool {
        is_video_extension(&self.extension)
    }
}

pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

pub fn is_video_extension(ext: &str) -> bool {
    VIDEO_EXTENSIONS.contains(&ext)
}

/// Files found under one root, grouped by extension.
///
/// Walk order is depth-first with each directory's entries sorted by file
/// name. It is stable within one scan; it is not a promise about how the
/// same tree is ordered on another filesystem.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: Vec<FileEntry>,
    buckets: BTreeMap<String, Vec<usize>>,
}

impl Catalog {
    /// Walks `root` and records every regular file. Symlinks to files are
    /// recorded under the link's own path; symlinked directories are not
    /// descended into.
    pub fn scan(root: &Path) -> Result<Catalog> {
        if !std::fs::metadata(root)?.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            )));
        }

        let mut catalog = Catalog::default();
        for entry_result in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(Error::Io(err.into_io_error().unwrap_or_else(|| {
                        std::io::Error::new(
                            std::io::ErrorKind::Other,
                            format!("Error reading directory {}", root.display()),
                        )
                    })));
                }
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                    continue;
                }
            };

            if entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file()) {
                catalog.push(FileEntry::new(entry.into_path()));
            }
        }

        debug!(
            "Scanned {}: {} files in {} buckets",
            root.display(),
            catalog.len(),
            catalog.buckets.len()
        );
        Ok(catalog)
    }

    fn push(&mut self, entry: FileEntry) {
        self.buckets
            .entry(entry.extension.clone())
            .or_default()
            .push(self.entries.len());
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every file in walk order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(|k| k.as_str())
    }

    pub fn bucket(&self, ext: &str) -> Vec<&FileEntry> {
        self.buckets
            .get(&ext.to_lowercase())
            .map(|indices| indices.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    pub fn bucket_len(&self, ext: &str) -> usize {
        self.buckets
            .get(&ext.to_lowercase())
            .map(|indices| indices.len())
            .unwrap_or(0)
    }

    pub fn find_first(&self, ext: &str) -> Option<&FileEntry> {
        self.buckets
            .get(&ext.to_lowercase())
            .and_then(|indices| indices.first())
            .map(|&i| &self.entries[i])
    }

    /// Case-insensitive match on the bare file name, first in walk order.
    pub fn find_executable(&self, name: &str) -> Option<&FileEntry> {
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.file_name().to_lowercase() == wanted)
    }

    pub fn video_files(&self) -> Vec<&FileEntry> {
        self.entries.iter().filter(|entry| entry.is_video()).collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        let notable = NOTABLE_EXTENSIONS
            .iter()
            .filter(|ext| self.buckets.contains_key(**ext))
            .map(|ext| NotableCount {
                extension: ext.to_string(),
                file_names: self.bucket(ext).iter().map(|e| e.file_name()).collect(),
            })
            .collect();

        let video_count = self.entries.iter().filter(|e| e.is_video()).count();
        let other_count = self
            .entries
            .iter()
            .filter(|e| !e.is_video() && !NOTABLE_EXTENSIONS.contains(&e.extension.as_str()))
            .count();

        CatalogSummary {
            total: self.len(),
            notable,
            video_count,
            other_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotableCount {
    pub extension: String,
    pub file_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub notable: Vec<NotableCount>,
    pub video_count: usize,
    pub other_count: usize,
}

impl CatalogSummary {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Found {} file(s) in total.", self.total)];
        for count in &self.notable {
            lines.push(format!(
                "Found {} {} file(s): {}",
                count.file_names.len(),
                count.extension,
                count.file_names.join(", ")
            ));
        }
        if self.video_count > 0 {
            lines.push(format!("Found {} video file(s)", self.video_count));
        }
        if self.other_count > 0 {
            lines.push(format!("Found {} other file(s)", self.other_count));
        }
        lines
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
