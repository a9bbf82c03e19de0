use std::collections::HashMap;

use ansiterm::Colour::{Green, Red, Yellow};
use ansiterm::Style;

/// For looking up the style to use for the various parts of the output.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Styled {
    #[default]
    Default,
    /// Directory and file names.
    Path,
    /// The Steam app id of the game.
    AppId,
    /// The installed game version.
    Version,
    /// A version number that is being replaced.
    OldVersion,
    /// The line announcing an outdated mod, and the final "nothing found" line.
    Notice,
    /// The very last line of output.
    Done,
}

#[derive(Debug)]
pub struct OutputStyle {
    map: HashMap<Styled, Style>,
}

impl Default for OutputStyle {
    /// Constructs an instance of `OutputStyle` that uses default, hard-coded color values.
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(Styled::Default, Style::new());

        map.insert(Styled::Path, Green.normal());
        map.insert(Styled::AppId, Red.normal());
        map.insert(Styled::Version, Yellow.normal());
        map.insert(Styled::OldVersion, Red.normal());
        map.insert(Styled::Notice, Yellow.normal());
        map.insert(Styled::Done, Green.normal());

        OutputStyle { map }
    }
}

impl OutputStyle {
    /// Construct a version of the `OutputStyle` that always returns the default, no-colour style.
    /// Use this to effectively disable any ANSI characters in the output.
    pub fn no_color() -> Self {
        let mut map = HashMap::new();
        map.insert(Styled::Default, Style::new());
        OutputStyle { map }
    }

    pub fn style(&self, output: Styled) -> Style {
        self.map.get(&output).or_else(|| self.map.get(&Styled::Default)).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_is_plain() {
        let styles = OutputStyle::no_color();
        assert_eq!(styles.style(Styled::Path).paint("x").to_string(), "x");
    }

    #[test]
    fn default_has_colors() {
        let styles = OutputStyle::default();
        assert_eq!(styles.style(Styled::OldVersion), Red.normal());
        assert_ne!(styles.style(Styled::Path).paint("x").to_string(), "x");
    }
}
