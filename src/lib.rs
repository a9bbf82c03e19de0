//! This library forms the bulk of the -upversion tools. It finds the version of an installed
//! Paradox game and updates the `supported_version` of the locally installed mods to match.
//!
//! The mods are looked for in two places: the game's `mod` directory under the user's documents,
//! and the Steam workshop folder for the game.

#![warn(missing_debug_implementations)]

pub use crate::errors::UpversionError;
pub use crate::fileset::{local_mod_dir, scan_local, scan_workshop, FileEntry, FileKind};
pub use crate::gamedir::{
    detect_game, games_dir, parse_launcher_version, read_launcher_version, workshop_app_id,
    DetectedGame, GameVersion,
};
pub use crate::modfile::{
    is_outdated, mod_id, parse_modfile, rewrite_version, ModFields, ModFileText, VERSION_KEY,
};
pub use crate::reconcile::{reconcile, ModRoots, Options, ReconcileContext};
pub use crate::report::{
    Collect, ConsoleReporter, OutputStyle, ReconciliationEvent, ReportSink, Styled, Summary,
};

mod errors;
mod fileset;
mod gamedir;
mod modfile;
mod reconcile;
mod report;
