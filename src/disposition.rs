//! `Content-Disposition` filename extraction.
//!
//! GLPI announces the original filename of a downloaded document in the
//! `Content-Disposition` response header, in either the plain
//! (`filename="report.pdf"`) or the RFC 5987 (`filename*=UTF-8''...`) form.

use std::sync::LazyLock;

use regex::Regex;

/// Matches both `filename=` and `filename*=`, with optional quoting.
static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"filename\*?=["']?([^;"]+)"#).expect("invalid filename regex"));

/// Extracts a filename from a `Content-Disposition` header value.
///
/// Surrounding quotes and trailing semicolons are stripped. RFC 5987
/// values are returned raw, charset prefix and percent-encoding included;
/// no decoding is performed.
///
/// Returns `None` when the header carries no filename parameter.
pub fn extract_filename(content_disposition: &str) -> Option<&str> {
    FILENAME_RE
        .captures(content_disposition)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches(|c| c == '"' || c == ';'))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            extract_filename(r#"attachment; filename="report.pdf""#),
            Some("report.pdf")
        );
    }

    #[test]
    fn test_unquoted_filename() {
        assert_eq!(
            extract_filename("attachment; filename=report.pdf"),
            Some("report.pdf")
        );
    }

    #[test]
    fn test_rfc5987_form_is_not_decoded() {
        assert_eq!(
            extract_filename("attachment; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"),
            Some("UTF-8''r%C3%A9sum%C3%A9.pdf")
        );
    }

    #[test]
    fn test_no_filename_parameter() {
        assert_eq!(extract_filename("attachment"), None);
    }

    #[test]
    fn test_filename_with_trailing_parameter() {
        assert_eq!(
            extract_filename(r#"attachment; filename="inventory.csv"; size=120"#),
            Some("inventory.csv")
        );
    }

    #[test]
    fn test_single_quoted_filename() {
        assert_eq!(
            extract_filename("attachment; filename='notes.txt'"),
            Some("notes.txt'")
        );
    }

    #[test]
    fn test_filename_with_spaces() {
        assert_eq!(
            extract_filename(r#"attachment; filename="weekly report.xlsx""#),
            Some("weekly report.xlsx")
        );
    }
}
