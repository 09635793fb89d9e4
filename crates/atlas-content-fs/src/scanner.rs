//! Content discovery by filesystem walking.
//!
//! The scanner only finds files: it maps the directory layout to URL paths and
//! returns lightweight references. Reading front matter is left to
//! `FsContentSource`, which owns the mtime cache.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use atlas_content::path;

/// Reference to a discovered content entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntryRef {
    /// A directory holding at least one page somewhere beneath it.
    Dir(DirRef),
    /// A markdown page.
    Page { url_path: String, file: PathBuf },
}

impl EntryRef {
    fn url_path(&self) -> &str {
        match self {
            Self::Dir(dir) => &dir.url_path,
            Self::Page { url_path, .. } => url_path,
        }
    }
}

/// Reference to a directory and its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirRef {
    /// URL path (e.g., "/", "/physics/mechanics").
    pub url_path: String,
    /// Page whose front matter describes the directory: its own `index.md`,
    /// or else a same-named page beside it (`guide.md` for `guide/`).
    pub index: Option<PathBuf>,
    /// Entries sorted by URL path.
    pub entries: Vec<EntryRef>,
}

/// Walks a source directory into [`EntryRef`] trees.
#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the entry at a URL path.
    ///
    /// The root always resolves to the source directory. Other paths resolve
    /// to a directory holding pages first and then to a `.md` file. When both
    /// exist the file only supplies the directory's front matter. Returns
    /// `Ok(None)` when nothing exists at the path or the path tries to leave
    /// the source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory itself cannot be read.
    pub fn scan(&self, url_path: &str) -> io::Result<Option<EntryRef>> {
        let url_path = path::normalize(url_path);
        if url_path == path::ROOT {
            return self
                .scan_directory(&self.source_dir, &url_path)
                .map(|dir| Some(EntryRef::Dir(dir)));
        }

        let Some(fs_path) = self.fs_path(&url_path) else {
            return Ok(None);
        };

        let mut page = fs_path.clone().into_os_string();
        page.push(".md");
        let page = Some(PathBuf::from(page)).filter(|page| page.is_file());

        if fs_path.is_dir() {
            let mut dir = self.scan_directory(&fs_path, &url_path)?;
            if !dir.entries.is_empty() {
                if dir.index.is_none() {
                    dir.index = page;
                }
                return Ok(Some(EntryRef::Dir(dir)));
            }
        }

        Ok(page.map(|file| EntryRef::Page { url_path, file }))
    }

    /// Map a normalized URL path to a location under the source directory.
    ///
    /// Returns `None` for hidden, `.` or `..` segments.
    pub fn fs_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut fs_path = self.source_dir.clone();
        for segment in path::segments(url_path) {
            if segment.starts_with('.') {
                return None;
            }
            fs_path.push(segment);
        }
        Some(fs_path)
    }

    fn scan_directory(&self, dir_path: &Path, url_path: &str) -> io::Result<DirRef> {
        let mut dir = DirRef {
            url_path: url_path.to_owned(),
            index: None,
            entries: Vec::new(),
        };
        let mut pages = Vec::new();

        for entry in fs::read_dir(dir_path)?.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let entry_path = entry.path();

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                match self.scan_directory(&entry_path, &path::join(url_path, &name)) {
                    Ok(child) if !child.entries.is_empty() => {
                        dir.entries.push(EntryRef::Dir(child));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(path = %entry_path.display(), error = %e, "Failed to read directory, skipping");
                    }
                }
            } else if let Some(stem) = name.strip_suffix(".md") {
                if name.eq_ignore_ascii_case("index.md") {
                    dir.index = Some(entry_path.clone());
                }
                pages.push((path::join(url_path, stem), entry_path));
            }
        }

        // A page named like a sibling directory describes that directory.
        for (page_url, file) in pages {
            let twin = dir.entries.iter_mut().find_map(|entry| match entry {
                EntryRef::Dir(child) if child.url_path == page_url => Some(child),
                EntryRef::Dir(_) | EntryRef::Page { .. } => None,
            });
            if let Some(child) = twin {
                if child.index.is_none() {
                    child.index = Some(file);
                }
                continue;
            }
            dir.entries.push(EntryRef::Page {
                url_path: page_url,
                file,
            });
        }
        dir.entries.sort_by(|a, b| a.url_path().cmp(b.url_path()));

        Ok(dir)
    }
}
