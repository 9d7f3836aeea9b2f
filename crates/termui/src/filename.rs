//! Display formatting for file names.

use std::path::Path;

/// Formats `path` for display, replacing invalid UTF-8 with U+FFFD.
///
/// With `shorten`, only the final component is kept.
pub fn format_filename(path: impl AsRef<Path>, shorten: bool) -> String {
    let path = path.as_ref();
    let shown = if shorten {
        path.file_name().map(Path::new).unwrap_or(path)
    } else {
        path
    };
    shown.to_string_lossy().into_owned()
}
