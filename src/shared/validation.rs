use lazy_static::lazy_static;
use regex::Regex;

use crate::shared::constants::DEFAULT_EXTENSION;

lazy_static! {
    /// Regex for extensions that may be spliced into a stored file name
    /// - Valid: "jpg", "png", "webp", "jp2"
    /// - Invalid: "", "tar.gz", "p/ng", "../x", "averyverylongext"
    pub static ref EXTENSION_REGEX: Regex = Regex::new(r"^[a-z0-9]{1,10}$").unwrap();
}

/// Derive the stored extension from a client-declared file name.
///
/// Takes the segment after the last `.`, lower-cased. Falls back to
/// [`DEFAULT_EXTENSION`] when there is no dot or the segment is not a plain
/// alphanumeric extension.
pub fn extension_from_filename(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| EXTENSION_REGEX.is_match(ext))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// First gate against path traversal on requested file names
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(extension_from_filename("photo.JPG"), "jpg");
        assert_eq!(extension_from_filename("Screen.Shot.PNG"), "png");
        assert_eq!(extension_from_filename("anim.gif"), "gif");
    }

    #[test]
    fn test_extension_defaults_to_jpg() {
        assert_eq!(extension_from_filename("photo"), "jpg");
        assert_eq!(extension_from_filename(""), "jpg");
        assert_eq!(extension_from_filename("trailing."), "jpg");
        assert_eq!(extension_from_filename("x./etc/passwd"), "jpg");
        assert_eq!(extension_from_filename("x.p\\ng"), "jpg");
    }

    #[test]
    fn test_safe_filename() {
        assert!(is_safe_filename("image-1700000000000.png"));
        assert!(is_safe_filename("nonexistent.png"));

        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename(".."));
        assert!(!is_safe_filename("..secret"));
        assert!(!is_safe_filename("a/b.png"));
        assert!(!is_safe_filename("a\\b.png"));
        assert!(!is_safe_filename("../../etc/passwd"));
    }
}
