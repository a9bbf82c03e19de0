//! Bringing the `supported_version` of every installed mod in line with the installed game.

use std::path::PathBuf;

use crate::errors::UpversionError;
use crate::fileset::{scan_local, scan_workshop, FileEntry};
use crate::gamedir::{DetectedGame, GameVersion};
use crate::modfile::{is_outdated, parse_modfile, ModFileText};
use crate::report::{ReconciliationEvent, ReportSink, Summary};

/// What is known about the game before any mod files are looked at.
#[derive(Clone, Debug)]
pub struct ReconcileContext {
    /// The Steam workshop folder for the game, `steamapps/workshop/content/<app id>`.
    pub mod_folder: PathBuf,
    pub game: DetectedGame,
}

impl ReconcileContext {
    pub fn new(mod_folder: PathBuf, game: DetectedGame) -> Self {
        Self { mod_folder, game }
    }

    /// The version to write into outdated descriptors.
    /// It's an error if the game version could not be determined.
    pub fn current_version(&self) -> Result<&str, UpversionError> {
        match &self.game.version {
            GameVersion::Resolved(version) => Ok(version),
            GameVersion::Unresolved(reason) => {
                Err(UpversionError::VersionUnresolved { reason: reason.clone() })
            }
        }
    }
}

/// The two directories that hold `.mod` files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModRoots {
    /// `<documents>/Paradox Interactive/<game>/mod`, one descriptor per mod.
    pub local: PathBuf,
    /// The workshop folder, one directory per mod.
    pub workshop: PathBuf,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Report the outdated mods but don't change any files.
    pub dry_run: bool,
}

/// Check every descriptor in both mod directories, local ones first, and rewrite the outdated ones.
///
/// Any file that can't be read or written ends the pass. Files that were already rewritten stay
/// that way.
pub fn reconcile(
    context: &ReconcileContext,
    roots: &ModRoots,
    options: Options,
    sink: &mut dyn ReportSink,
) -> Result<Summary, UpversionError> {
    sink.game_detected(context);
    for duplicate in &context.game.duplicates {
        sink.duplicate_game(duplicate);
    }
    let current = context.current_version()?;

    let mut summary = Summary::new(current, options.dry_run);
    for entry in scan_local(&roots.local)? {
        reconcile_file(&entry, current, options, sink, &mut summary)?;
    }
    for entry in scan_workshop(&roots.workshop)? {
        reconcile_file(&entry, current, options, sink, &mut summary)?;
    }

    sink.finished(&summary);
    Ok(summary)
}

fn reconcile_file(
    entry: &FileEntry,
    current: &str,
    options: Options,
    sink: &mut dyn ReportSink,
    summary: &mut Summary,
) -> Result<(), UpversionError> {
    let mut text = ModFileText::read(entry.path())?;
    summary.checked += 1;
    let fields = parse_modfile(text.as_str());
    let Some(old_version) =
        fields.supported_version.filter(|declared| is_outdated(Some(declared.as_str()), current))
    else {
        return Ok(());
    };

    let event = ReconciliationEvent {
        path: entry.path().to_path_buf(),
        kind: entry.kind(),
        mod_id: entry.mod_id().map(str::to_owned),
        display_name: fields.name,
        old_version,
        new_version: current.to_owned(),
    };
    sink.outdated(&event);
    if !options.dry_run && text.replace_version(&event.old_version, current) {
        text.write(entry.path())?;
    }
    summary.record(event);
    Ok(())
}
