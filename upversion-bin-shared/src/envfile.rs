//! Reading `KEY=VALUE` settings from a `.env` file.

use std::fs::read_to_string;
use std::io::{self, ErrorKind};
use std::path::Path;

/// The file looked for in the current directory.
pub const ENV_FILE: &str = ".env";

/// Look up `key` in the given `.env` file. If the key is set more than once, the last one counts.
/// A missing file, or a key that's missing or empty, gives `None`.
pub fn env_file_value(path: &Path, key: &str) -> io::Result<Option<String>> {
    let contents = match read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    Ok(contents
        .lines()
        .filter_map(parse_line)
        .rfind(|(k, _)| *k == key)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty()))
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let value = value.trim();
    let value = ['"', '\'']
        .iter()
        .find_map(|&q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value);
    Some((key.trim(), value))
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn lines() {
        assert_eq!(parse_line("HOI4_PATH=C:/steam"), Some(("HOI4_PATH", "C:/steam")));
        assert_eq!(parse_line("  HOI4_PATH = \"D:/My Games\" "), Some(("HOI4_PATH", "D:/My Games")));
        assert_eq!(parse_line("export HOI4_PATH='/mnt/c/x'"), Some(("HOI4_PATH", "/mnt/c/x")));
        assert_eq!(parse_line("# HOI4_PATH=commented"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("garbage"), None);
        assert_eq!(parse_line("A=\"unbalanced"), Some(("A", "\"unbalanced")));
    }

    #[test]
    fn file_lookup() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(ENV_FILE);
        write(&path, "# settings\nOTHER=1\nHOI4_PATH=/old\nHOI4_PATH=/steam/content/394360\n")
            .unwrap();
        assert_eq!(env_file_value(&path, "HOI4_PATH").unwrap().as_deref(), Some("/steam/content/394360"));
        assert_eq!(env_file_value(&path, "MISSING").unwrap(), None);
    }

    #[test]
    fn empty_and_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(ENV_FILE);
        assert_eq!(env_file_value(&path, "HOI4_PATH").unwrap(), None);
        write(&path, "HOI4_PATH=\n").unwrap();
        assert_eq!(env_file_value(&path, "HOI4_PATH").unwrap(), None);
    }
}
