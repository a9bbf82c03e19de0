//! Telling the user what the reconciliation pass found and did.

use std::path::{Path, PathBuf};

pub use output_style::{OutputStyle, Styled};
pub use report_struct::{ReconciliationEvent, Summary};
pub use writer::ConsoleReporter;

use crate::reconcile::ReconcileContext;

mod output_style;
mod report_struct;
mod writer;

/// Receives the results of a reconciliation pass as they happen.
pub trait ReportSink {
    /// Called once, before any files are looked at.
    fn game_detected(&mut self, _context: &ReconcileContext) {}
    /// Another installed game claimed the same app id and was ignored.
    fn duplicate_game(&mut self, _game_dir: &Path) {}
    /// Called for each outdated descriptor, before it is rewritten.
    fn outdated(&mut self, event: &ReconciliationEvent);
    /// Called once after both mod directories have been handled.
    fn finished(&mut self, _summary: &Summary) {}
}

/// A sink that just keeps everything it is told.
#[derive(Debug, Default)]
pub struct Collect {
    pub events: Vec<ReconciliationEvent>,
    pub duplicates: Vec<PathBuf>,
    pub summary: Option<Summary>,
}

impl ReportSink for Collect {
    fn duplicate_game(&mut self, game_dir: &Path) {
        self.duplicates.push(game_dir.to_path_buf());
    }

    fn outdated(&mut self, event: &ReconciliationEvent) {
        self.events.push(event.clone());
    }

    fn finished(&mut self, summary: &Summary) {
        self.summary = Some(summary.clone());
    }
}
