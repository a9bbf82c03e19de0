use std::path::PathBuf;

use serde::Serialize;

use crate::fileset::FileKind;

/// Describes one descriptor that declared a different game version than the installed one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReconciliationEvent {
    pub path: PathBuf,
    pub kind: FileKind,
    pub mod_id: Option<String>,
    /// The `name` field of the descriptor.
    pub display_name: Option<String>,
    pub old_version: String,
    pub new_version: String,
}

impl ReconciliationEvent {
    /// The best available way to refer to the mod in messages.
    pub fn label(&self) -> String {
        if let Some(name) = &self.display_name {
            name.clone()
        } else if let Some(mod_id) = &self.mod_id {
            mod_id.clone()
        } else {
            self.path.display().to_string()
        }
    }
}

/// The outcome of a whole reconciliation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// The installed game version that the descriptors were compared to.
    pub version: String,
    /// How many descriptor files were read.
    pub checked: usize,
    pub found_outdated: bool,
    /// True if nothing was written.
    pub dry_run: bool,
    pub events: Vec<ReconciliationEvent>,
}

impl Summary {
    pub fn new(version: &str, dry_run: bool) -> Self {
        Self { version: version.to_owned(), dry_run, ..Self::default() }
    }

    pub(crate) fn record(&mut self, event: ReconciliationEvent) {
        self.found_outdated = true;
        self.events.push(event);
    }
}
