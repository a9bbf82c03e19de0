//! Reading, parsing, and rewriting the `.mod` descriptor files.

use std::borrow::Cow;
use std::fs::{read, write};
use std::path::Path;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use regex::Regex;

use crate::errors::UpversionError;

/// The descriptor field that declares which game version a mod was made for.
pub const VERSION_KEY: &str = "supported_version";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r#"\b{VERSION_KEY}="(.*?)""#)).unwrap());
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bname="(.*?)""#).unwrap());

/// The fields of a `.mod` file that matter for reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModFields {
    /// The `supported_version` value, if the field is present and well formed.
    pub supported_version: Option<String>,
    /// The mod's name in human-friendly form, if available.
    pub name: Option<String>,
}

/// Extract the fields from the text of a `.mod` file.
///
/// Only the first `key="value"` occurrence of each key counts. Text that does not contain a key
/// simply leaves that field empty.
pub fn parse_modfile(text: &str) -> ModFields {
    let capture = |re: &Regex| re.captures(text).map(|c| c[1].to_owned());
    ModFields { supported_version: capture(&*VERSION_RE), name: capture(&*NAME_RE) }
}

/// A mod is outdated only if it declares a version and that version is not the game's.
pub fn is_outdated(declared: Option<&str>, current: &str) -> bool {
    declared.is_some_and(|declared| declared != current)
}

/// Replace the value of the `supported_version` field that [`parse_modfile`] reads, if that value
/// is exactly `old`. Returns the text unchanged otherwise.
pub fn rewrite_version<'a>(text: &'a str, old: &str, new: &str) -> Cow<'a, str> {
    match VERSION_RE.captures(text).and_then(|c| c.get(1)) {
        Some(value) if value.as_str() == old && old != new => {
            let mut rewritten = String::with_capacity(text.len() - old.len() + new.len());
            rewritten.push_str(&text[..value.start()]);
            rewritten.push_str(new);
            rewritten.push_str(&text[value.end()..]);
            Cow::Owned(rewritten)
        }
        _ => Cow::Borrowed(text),
    }
}

/// Derive the mod id from the filename of a descriptor in the user's `mod` directory.
///
/// The launcher names them `ugc_<workshop id>.mod`; hand-made ones can have any stem.
/// Returns `None` for files that are not `.mod` files at all.
pub fn mod_id(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(".mod")?;
    Some(stem.strip_prefix("ugc_").unwrap_or(stem))
}

/// The text of a `.mod` file together with the encoding it was stored in, so that it can be
/// written back byte for byte apart from the parts that were changed.
#[derive(Clone, Debug)]
pub struct ModFileText {
    text: String,
    encoding: &'static Encoding,
}

impl ModFileText {
    pub fn read(pathname: &Path) -> Result<Self, UpversionError> {
        let bytes = read(pathname)
            .map_err(|source| UpversionError::UnreadableFile { path: pathname.into(), source })?;
        Ok(Self::decode(bytes))
    }

    /// Interpret the bytes as UTF-8, falling back to Windows-1252 which the older launchers used.
    /// A byte order mark is kept as part of the text.
    pub fn decode(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self { text, encoding: UTF_8 },
            Err(err) => {
                let (text, _) = WINDOWS_1252.decode_without_bom_handling(err.as_bytes());
                Self { text: text.into_owned(), encoding: WINDOWS_1252 }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Returns whether the text was changed.
    pub fn replace_version(&mut self, old: &str, new: &str) -> bool {
        if let Cow::Owned(text) = rewrite_version(&self.text, old, new) {
            self.text = text;
            true
        } else {
            false
        }
    }

    pub fn encode(&self) -> Cow<'_, [u8]> {
        let (bytes, _, _) = self.encoding.encode(&self.text);
        bytes
    }

    /// Overwrite the whole file with the current text.
    pub fn write(&self, pathname: &Path) -> Result<(), UpversionError> {
        write(pathname, self.encode())
            .map_err(|source| UpversionError::UnwritableFile { path: pathname.into(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = "version=\"2.3\"\ntags={\n\t\"Gameplay\"\n}\nname=\"Better Supply\"\nsupported_version=\"1.11.0\"\nremote_file_id=\"2077003\"\n";

    #[test]
    fn parse_fields() {
        let fields = parse_modfile(DESCRIPTOR);
        assert_eq!(fields.supported_version.as_deref(), Some("1.11.0"));
        assert_eq!(fields.name.as_deref(), Some("Better Supply"));
    }

    #[test]
    fn parse_missing_fields() {
        let fields = parse_modfile("version=\"2.3\"\npath=\"mod/x\"\n");
        assert_eq!(fields, ModFields::default());
    }

    #[test]
    fn parse_tolerates_garbage() {
        let fields = parse_modfile("supported_version=\"1.0\nname=\u{0}{{{\"\"");
        assert_eq!(fields.supported_version, None);
        assert_eq!(fields.name, None);
    }

    #[test]
    fn parse_stops_at_closing_quote() {
        let fields = parse_modfile("name=\"A\" picture=\"thumbnail.png\"");
        assert_eq!(fields.name.as_deref(), Some("A"));
    }

    #[test]
    fn parse_name_needs_whole_key() {
        let fields = parse_modfile("file_name=\"wrong\"\nname=\"right\"");
        assert_eq!(fields.name.as_deref(), Some("right"));
    }

    #[test]
    fn parse_empty_version() {
        let fields = parse_modfile("supported_version=\"\"");
        assert_eq!(fields.supported_version.as_deref(), Some(""));
        assert!(is_outdated(fields.supported_version.as_deref(), "1.12.0"));
    }

    #[test]
    fn outdated_classification() {
        assert!(!is_outdated(None, "1.0"));
        assert!(!is_outdated(Some("1.0"), "1.0"));
        assert!(is_outdated(Some("1.0"), "1.1"));
    }

    #[test]
    fn rewrite_touches_only_the_field() {
        let rewritten = rewrite_version(DESCRIPTOR, "1.11.0", "1.12.0");
        assert_eq!(rewritten, DESCRIPTOR.replace("1.11.0", "1.12.0"));
        assert!(rewritten.contains("version=\"2.3\""));
    }

    #[test]
    fn rewrite_is_idempotent() {
        let once = rewrite_version(DESCRIPTOR, "1.11.0", "1.12.0").into_owned();
        let twice = rewrite_version(&once, "1.11.0", "1.12.0");
        assert_eq!(once, twice);
        assert!(matches!(twice, Cow::Borrowed(_)));
    }

    #[test]
    fn rewrite_without_field_is_noop() {
        let text = "name=\"No version here\"\n";
        assert!(matches!(rewrite_version(text, "1.0", "1.1"), Cow::Borrowed(t) if t == text));
    }

    #[test]
    fn rewrite_requires_exact_value() {
        let text = "supported_version=\"1.11.0.1\"";
        assert_eq!(rewrite_version(text, "1.11.0", "1.12.0"), text);
    }

    #[test]
    fn rewrite_skips_longer_keys() {
        let text = "name=\"A\"\nold_supported_version=\"1.11.0\"\nsupported_version=\"1.11.0\"\n";
        assert_eq!(parse_modfile(text).supported_version.as_deref(), Some("1.11.0"));
        assert_eq!(
            rewrite_version(text, "1.11.0", "1.12.0"),
            "name=\"A\"\nold_supported_version=\"1.11.0\"\nsupported_version=\"1.12.0\"\n"
        );
    }

    #[test]
    fn rewrite_only_the_first_field() {
        let text = "supported_version=\"1.11.0\"\nsupported_version=\"1.11.0\"";
        assert_eq!(
            rewrite_version(text, "1.11.0", "1.12.0"),
            "supported_version=\"1.12.0\"\nsupported_version=\"1.11.0\""
        );
    }

    #[test]
    fn mod_ids() {
        assert_eq!(mod_id("ugc_2077003.mod"), Some("2077003"));
        assert_eq!(mod_id("local.mod"), Some("local"));
        assert_eq!(mod_id("ugc_.mod"), Some(""));
        assert_eq!(mod_id("readme.txt"), None);
        assert_eq!(mod_id("ugc_123"), None);
    }

    #[test]
    fn utf8_bom_roundtrip() {
        let bytes = b"\xef\xbb\xbfname=\"X\"\nsupported_version=\"1.0\"".to_vec();
        let mut text = ModFileText::decode(bytes);
        assert_eq!(text.encoding(), UTF_8);
        assert!(text.replace_version("1.0", "1.1"));
        assert_eq!(&*text.encode(), b"\xef\xbb\xbfname=\"X\"\nsupported_version=\"1.1\"");
    }

    #[test]
    fn windows_1252_roundtrip() {
        let bytes = b"name=\"Caf\xe9 \x80\"\nsupported_version=\"1.0\"".to_vec();
        let mut text = ModFileText::decode(bytes);
        assert_eq!(text.encoding(), WINDOWS_1252);
        assert_eq!(parse_modfile(text.as_str()).name.as_deref(), Some("Café €"));
        assert!(text.replace_version("1.0", "1.1"));
        assert_eq!(&*text.encode(), b"name=\"Caf\xe9 \x80\"\nsupported_version=\"1.1\"");
    }
}
