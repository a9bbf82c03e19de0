//! Finding the `.mod` files in the two places where they are installed.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;
use strum_macros::Display;
use walkdir::WalkDir;

use crate::errors::UpversionError;
use crate::modfile::mod_id;

/// The directory under the user's documents where Paradox games keep their local files.
pub const PARADOX_DIR: &str = "Paradox Interactive";

/// Where a `.mod` file was found.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Directly in the game's `mod` directory under the user's documents.
    #[strum(serialize = "User doc")]
    Local,
    /// In a mod's own directory in the Steam workshop folder.
    #[strum(serialize = "Steam doc")]
    Workshop,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    /// Full pathname of the `.mod` file
    path: PathBuf,
    kind: FileKind,
    /// The workshop id or local name of the mod, if it could be worked out from the path
    mod_id: Option<String>,
}

impl FileEntry {
    pub fn new(path: PathBuf, kind: FileKind, mod_id: Option<String>) -> Self {
        Self { path, kind, mod_id }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn mod_id(&self) -> Option<&str> {
        self.mod_id.as_deref()
    }
}

/// The game's `mod` directory under the user's documents,
/// for example `Documents/Paradox Interactive/Hearts of Iron IV/mod`.
pub fn local_mod_dir(documents: &Path, game_dir_name: &str) -> PathBuf {
    // Collecting the components makes all the slashes lean the same way on Windows.
    documents.join(PARADOX_DIR).join(game_dir_name).join("mod").components().collect()
}

/// List the files directly in the local `mod` directory, in order of name.
/// Each one is taken to be a mod descriptor.
pub fn scan_local(mod_dir: &Path) -> Result<Vec<FileEntry>, UpversionError> {
    let mut files = Vec::new();
    for entry in walk(mod_dir, 1) {
        let entry = entry.map_err(|err| unreadable(mod_dir, err))?;
        // The launcher also keeps the unpacked local mods in here, as directories.
        if !entry.file_type().is_file() {
            continue;
        }
        let mod_id = entry.file_name().to_str().and_then(mod_id).map(str::to_owned);
        files.push(FileEntry::new(entry.into_path(), FileKind::Local, mod_id));
    }
    Ok(files)
}

/// List the `.mod` files one level down in the workshop folder, which has one directory per mod.
/// The directory name is the mod's workshop id.
pub fn scan_workshop(workshop_dir: &Path) -> Result<Vec<FileEntry>, UpversionError> {
    let mut files = Vec::new();
    for entry in walk(workshop_dir, 2) {
        let entry = entry.map_err(|err| unreadable(workshop_dir, err))?;
        if !entry.file_type().is_file() || entry.path().extension() != Some(OsStr::new("mod")) {
            continue;
        }
        let mod_id = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .and_then(OsStr::to_str)
            .map(str::to_owned);
        files.push(FileEntry::new(entry.into_path(), FileKind::Workshop, mod_id));
    }
    Ok(files)
}

fn walk(root: &Path, depth: usize) -> WalkDir {
    WalkDir::new(root).min_depth(depth).max_depth(depth).follow_links(true).sort_by_file_name()
}

fn unreadable(root: &Path, source: walkdir::Error) -> UpversionError {
    let path = source.path().unwrap_or(root).to_path_buf();
    UpversionError::UnreadableDir { path, source }
}
