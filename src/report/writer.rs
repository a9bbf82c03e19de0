use std::path::Path;

use ansiterm::{ANSIString, ANSIStrings};

use crate::reconcile::ReconcileContext;
use crate::report::output_style::Styled;
use crate::report::{OutputStyle, ReconciliationEvent, ReportSink, Summary};

/// Prints the progress of a reconciliation pass to the terminal.
#[derive(Debug)]
pub struct ConsoleReporter {
    styles: OutputStyle,
    /// Say "would fix" instead of "fixing".
    dry_run: bool,
}

impl ConsoleReporter {
    pub fn new(styles: OutputStyle, dry_run: bool) -> Self {
        Self { styles, dry_run }
    }

    fn paint<S: Into<String>>(&self, styled: Styled, text: S) -> ANSIString<'static> {
        self.styles.style(styled).paint(text.into())
    }

    /// Log the last line of a completed run.
    pub fn done(&self) {
        println!("{}", self.done_line());
    }

    fn done_line(&self) -> String {
        self.paint(Styled::Done, "Done!").to_string()
    }

    fn banner_line(&self, context: &ReconcileContext) -> String {
        let line: &[ANSIString<'static>] = &[
            self.paint(Styled::Default, "Mod dir path is: "),
            self.paint(Styled::Path, context.mod_folder.display().to_string()),
            self.paint(Styled::Default, " and steam ID is "),
            self.paint(Styled::AppId, context.game.app_id.as_str()),
            self.paint(Styled::Default, ".\n Current game version is: "),
            self.paint(Styled::Version, context.game.version.to_string()),
        ];
        ANSIStrings(line).to_string()
    }

    fn outdated_line(&self, event: &ReconciliationEvent) -> String {
        let action = if self.dry_run { "Would fix." } else { "Fixing..." };
        let line: &[ANSIString<'static>] = &[
            self.paint(Styled::Notice, format!("[{}] Mod {} is outdated (", event.kind, event.label())),
            self.paint(Styled::OldVersion, event.old_version.as_str()),
            self.paint(Styled::Notice, format!("). {action}")),
        ];
        ANSIStrings(line).to_string()
    }

    fn finished_line(&self, summary: &Summary) -> Option<String> {
        if !summary.found_outdated {
            Some(self.paint(Styled::Notice, "No outdated mods were detected.").to_string())
        } else if summary.dry_run {
            let msg = format!("{} of {} mods would be updated.", summary.events.len(), summary.checked);
            Some(self.paint(Styled::Notice, msg).to_string())
        } else {
            None
        }
    }
}

impl ReportSink for ConsoleReporter {
    fn game_detected(&mut self, context: &ReconcileContext) {
        println!("{}", self.banner_line(context));
    }

    fn duplicate_game(&mut self, game_dir: &Path) {
        eprintln!("Ignoring {}, which has the same steam app id.", game_dir.display());
    }

    fn outdated(&mut self, event: &ReconciliationEvent) {
        println!("{}", self.outdated_line(event));
    }

    fn finished(&mut self, summary: &Summary) {
        if let Some(line) = self.finished_line(summary) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::fileset::FileKind;
    use crate::gamedir::{DetectedGame, GameVersion};

    fn plain(dry_run: bool) -> ConsoleReporter {
        ConsoleReporter::new(OutputStyle::no_color(), dry_run)
    }

    fn event(kind: FileKind) -> ReconciliationEvent {
        ReconciliationEvent {
            path: PathBuf::from("mod/ugc_2077003.mod"),
            kind,
            mod_id: Some("2077003".to_owned()),
            display_name: Some("Better Supply".to_owned()),
            old_version: "1.11.0".to_owned(),
            new_version: "1.12.0".to_owned(),
        }
    }

    #[test]
    fn banner() {
        let game = DetectedGame {
            app_id: "394360".to_owned(),
            game_dir: PathBuf::from("common/Hearts of Iron IV"),
            version: GameVersion::Unresolved("missing".to_owned()),
            duplicates: Vec::new(),
        };
        let context = ReconcileContext::new(PathBuf::from("content/394360"), game);
        assert_eq!(
            plain(false).banner_line(&context),
            format!(
                "Mod dir path is: {} and steam ID is 394360.\n Current game version is: Version not found",
                Path::new("content/394360").display()
            )
        );
    }

    #[test]
    fn outdated_lines() {
        assert_eq!(
            plain(false).outdated_line(&event(FileKind::Local)),
            "[User doc] Mod Better Supply is outdated (1.11.0). Fixing..."
        );
        assert_eq!(
            plain(true).outdated_line(&event(FileKind::Workshop)),
            "[Steam doc] Mod Better Supply is outdated (1.11.0). Would fix."
        );
    }

    #[test]
    fn finished_lines() {
        let reporter = plain(false);
        let mut summary = Summary::new("1.12.0", false);
        summary.checked = 3;
        assert_eq!(reporter.finished_line(&summary).as_deref(), Some("No outdated mods were detected."));
        summary.record(event(FileKind::Local));
        assert_eq!(reporter.finished_line(&summary), None);
        summary.dry_run = true;
        assert_eq!(reporter.finished_line(&summary).as_deref(), Some("1 of 3 mods would be updated."));
        assert_eq!(reporter.done_line(), "Done!");
    }

    #[test]
    fn colored_outdated_line() {
        let reporter = ConsoleReporter::new(OutputStyle::default(), false);
        let line = reporter.outdated_line(&event(FileKind::Local));
        assert!(line.contains("\x1b["));
        assert!(line.contains("1.11.0"));
    }
}
