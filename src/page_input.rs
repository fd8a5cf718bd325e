//! The page-number field of the toolbar: what the user typed, and whether
//! the last submit was accepted.

use thiserror::Error;

/// Why a submitted page number was refused. These are validation results
/// shown next to the field, not failures.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PageInputError {
    #[error("Enter a page number")]
    NotANumber,
    #[error("Page must be between 1 and {page_count}")]
    OutOfRange { page_count: usize },
    #[error("Document is still loading")]
    NotLoaded,
}

/// Checks `text` against the document bounds and returns the page to show.
pub fn validate(text: &str, page_count: Option<usize>) -> Result<usize, PageInputError> {
    let page_count = page_count.ok_or(PageInputError::NotLoaded)?;
    let text = text.trim();
    let value: i64 = text.parse().map_err(|_| {
        // Whole numbers too long for i64 are still numbers, just far off.
        let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            PageInputError::OutOfRange { page_count }
        } else {
            PageInputError::NotANumber
        }
    })?;
    usize::try_from(value)
        .ok()
        .filter(|n| (1..=page_count).contains(n))
        .ok_or(PageInputError::OutOfRange { page_count })
}

/// The editable page-number field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInput {
    text: String,
    error: Option<PageInputError>,
}

impl PageInput {
    pub fn showing(page: usize) -> Self {
        Self {
            text: page.to_string(),
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn error(&self) -> Option<PageInputError> {
        self.error
    }

    pub const fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    /// Replaces the text while the user is typing. The error flag is kept
    /// until the next submit so the field does not flicker.
    pub fn edit(&mut self, text: String) {
        self.text = text;
    }

    /// Validates the current text. On success the field is normalized to the
    /// accepted page; on failure the text is left as typed and flagged.
    pub fn submit(&mut self, page_count: Option<usize>) -> Result<usize, PageInputError> {
        match validate(&self.text, page_count) {
            Ok(page) => {
                *self = Self::showing(page);
                Ok(page)
            }
            Err(err) => {
                self.error = Some(err);
                Err(err)
            }
        }
    }

    /// Mirrors a page change made by other controls.
    pub fn sync(&mut self, page: usize) {
        *self = Self::showing(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        assert_eq!(validate("1", Some(10)), Ok(1));
        assert_eq!(validate("10", Some(10)), Ok(10));
        assert_eq!(validate(" 7 ", Some(10)), Ok(7));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = PageInputError::OutOfRange { page_count: 10 };
        assert_eq!(validate("0", Some(10)), Err(err));
        assert_eq!(validate("-3", Some(10)), Err(err));
        assert_eq!(validate("11", Some(10)), Err(err));
    }

    #[test]
    fn test_validate_huge_numbers_are_out_of_range() {
        let err = PageInputError::OutOfRange { page_count: 10 };
        assert_eq!(validate("99999999999999999999", Some(10)), Err(err));
        assert_eq!(validate("-99999999999999999999", Some(10)), Err(err));
        assert_eq!(validate("9999999999999999999x", Some(10)), Err(PageInputError::NotANumber));
        assert_eq!(validate("-", Some(10)), Err(PageInputError::NotANumber));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert_eq!(validate("", Some(10)), Err(PageInputError::NotANumber));
        assert_eq!(validate("two", Some(10)), Err(PageInputError::NotANumber));
        assert_eq!(validate("2.5", Some(10)), Err(PageInputError::NotANumber));
    }

    #[test]
    fn test_validate_without_page_count() {
        assert_eq!(validate("1", None), Err(PageInputError::NotLoaded));
        assert_eq!(validate("abc", None), Err(PageInputError::NotLoaded));
    }

    #[test]
    fn test_submit_normalizes_text() {
        let mut input = PageInput::showing(1);
        input.edit("  004".into());
        assert_eq!(input.submit(Some(5)), Ok(4));
        assert_eq!(input.text(), "4");
        assert!(!input.is_invalid());
    }

    #[test]
    fn test_submit_keeps_invalid_text() {
        let mut input = PageInput::showing(3);
        input.edit("42".into());
        assert!(input.submit(Some(5)).is_err());
        assert_eq!(input.text(), "42");
        assert_eq!(
            input.error(),
            Some(PageInputError::OutOfRange { page_count: 5 })
        );
    }

    #[test]
    fn test_error_messages() {
        insta::assert_snapshot!(
            PageInputError::OutOfRange { page_count: 12 }.to_string(),
            @"Page must be between 1 and 12"
        );
    }
}
