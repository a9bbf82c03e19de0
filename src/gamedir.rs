//! Finding the installed game that a workshop mod folder belongs to, and that game's version.

use std::fmt::{Display, Formatter};
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{absolute, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::errors::UpversionError;

/// The directory under `steamapps` where Steam installs the games themselves.
pub const GAMES_DIR: &str = "common";
/// Contains the numeric Steam app id of an installed game.
pub const APPID_FILE: &str = "steam_appid.txt";
/// Written by the Paradox launcher. Its `version` field holds the game version.
pub const LAUNCHER_SETTINGS: &str = "launcher-settings.json";

static LAUNCHER_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v(\d+\.\d+\.\d+)").unwrap());

/// The version of the installed game, or the reason it could not be found out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameVersion {
    Resolved(String),
    Unresolved(String),
}

impl GameVersion {
    pub fn resolved(&self) -> Option<&str> {
        match self {
            GameVersion::Resolved(version) => Some(version),
            GameVersion::Unresolved(_) => None,
        }
    }
}

impl Display for GameVersion {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        match self {
            GameVersion::Resolved(version) => write!(f, "{version}"),
            GameVersion::Unresolved(_) => write!(f, "Version not found"),
        }
    }
}

/// The installed game whose `steam_appid.txt` matches the workshop mod folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectedGame {
    pub app_id: String,
    /// The game's installation directory under `steamapps/common`.
    pub game_dir: PathBuf,
    pub version: GameVersion,
    /// Other installation directories that claimed the same app id. They were not used.
    pub duplicates: Vec<PathBuf>,
}

/// The workshop folder is `steamapps/workshop/content/<app id>`, so the installed games are in
/// `steamapps/common`, three levels up.
pub fn games_dir(mod_folder: &Path) -> Result<PathBuf, UpversionError> {
    let bad = || UpversionError::BadModFolder { path: mod_folder.to_path_buf() };
    let full = absolute(mod_folder).map_err(|_| bad())?;
    full.ancestors().nth(3).map(|steamapps| steamapps.join(GAMES_DIR)).ok_or_else(bad)
}

/// The Steam app id is the last component of the workshop folder.
/// A relative folder such as `.` is made absolute first.
pub fn workshop_app_id(mod_folder: &Path) -> Option<String> {
    let full = absolute(mod_folder).ok()?;
    full.file_name().and_then(|name| name.to_str()).map(str::to_owned)
}

/// Look through the installed games for the one the workshop mod folder belongs to.
///
/// The game directories are tried in order of name and the first one that matches is used.
/// Directories without a `steam_appid.txt` are not games and are skipped.
pub fn detect_game(mod_folder: &Path) -> Result<DetectedGame, UpversionError> {
    let app_id = workshop_app_id(mod_folder)
        .ok_or_else(|| UpversionError::BadModFolder { path: mod_folder.to_path_buf() })?;
    let games_dir = games_dir(mod_folder)?;

    let mut found = None;
    let mut duplicates = Vec::new();
    let walker =
        WalkDir::new(&games_dir).min_depth(1).max_depth(1).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken links and the like among the games are not our concern.
            Err(err) if err.depth() > 0 => continue,
            Err(source) => {
                return Err(UpversionError::UnreadableDir { path: games_dir, source });
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let appid_path = entry.path().join(APPID_FILE);
        let contents = match read_to_string(&appid_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(source) => return Err(UpversionError::UnreadableFile { path: appid_path, source }),
        };
        if contents.trim() == app_id {
            if found.is_none() {
                found = Some(entry.into_path());
            } else {
                duplicates.push(entry.into_path());
            }
        }
    }

    let Some(game_dir) = found else {
        return Err(UpversionError::NoGameDetected { app_id, games_dir });
    };
    let version = read_launcher_version(&game_dir)?;
    Ok(DetectedGame { app_id, game_dir, version, duplicates })
}

/// Read the game version from the launcher settings in the game directory.
///
/// A missing or unusable settings file is not an error here; it results in
/// [`GameVersion::Unresolved`] and it's up to the caller to decide what to do about that.
pub fn read_launcher_version(game_dir: &Path) -> Result<GameVersion, UpversionError> {
    let path = game_dir.join(LAUNCHER_SETTINGS);
    let json = match read_to_string(&path) {
        Ok(json) => json,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let reason = format!("{} does not exist", path.display());
            return Ok(GameVersion::Unresolved(reason));
        }
        Err(source) => return Err(UpversionError::UnreadableFile { path, source }),
    };
    Ok(match parse_launcher_version(&json) {
        Ok(version) => GameVersion::Resolved(version),
        Err(reason) => GameVersion::Unresolved(format!("{}: {reason}", path.display())),
    })
}

/// Take the `1.12.14` out of a launcher `version` such as `"Trial of Allegiance v1.12.14.ab01 (ed8f)"`.
pub fn parse_launcher_version(json: &str) -> Result<String, String> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|err| format!("not valid json ({err})"))?;
    let Some(version) = value["version"].as_str() else {
        return Err("no version field".to_owned());
    };
    LAUNCHER_VERSION_RE
        .captures(version)
        .map(|c| c[1].to_owned())
        .ok_or_else(|| format!("version {version:?} does not contain vX.Y.Z"))
}
