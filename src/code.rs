/// Classification of a country code string.
///
/// A code identifies a country by one of the three ISO 3166-1 forms. The
/// numeric check runs first so a 3-digit string is never mistaken for a
/// malformed alpha-3 code. Case is not normalized: lowercase letters are
/// rejected, not folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Two uppercase ASCII letters, e.g. "CL".
    Alpha2,
    /// Three uppercase ASCII letters, e.g. "CHL".
    Alpha3,
    /// Three ASCII digits, e.g. "152".
    Numeric,
}

impl CodeKind {
    /// Classify a code string. Returns `None` for anything that is not
    /// exactly one of the three accepted shapes.
    pub fn classify(code: &str) -> Option<CodeKind> {
        let bytes = code.as_bytes();
        if bytes.len() == 3 && bytes.iter().all(|b| b.is_ascii_digit()) {
            return Some(CodeKind::Numeric);
        }
        if bytes.len() == 2 && bytes.iter().all(|b| b.is_ascii_uppercase()) {
            return Some(CodeKind::Alpha2);
        }
        if bytes.len() == 3 && bytes.iter().all(|b| b.is_ascii_uppercase()) {
            return Some(CodeKind::Alpha3);
        }
        None
    }
}

/// Whether a string is a well-formed country code of any kind.
pub fn is_valid_code(code: &str) -> bool {
    CodeKind::classify(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_alpha2() {
        assert_eq!(CodeKind::classify("CL"), Some(CodeKind::Alpha2));
        assert_eq!(CodeKind::classify("NO"), Some(CodeKind::Alpha2));
    }

    #[test]
    fn test_classify_alpha3() {
        assert_eq!(CodeKind::classify("CHL"), Some(CodeKind::Alpha3));
        assert_eq!(CodeKind::classify("NOR"), Some(CodeKind::Alpha3));
    }

    #[test]
    fn test_classify_numeric() {
        assert_eq!(CodeKind::classify("152"), Some(CodeKind::Numeric));
        assert_eq!(CodeKind::classify("000"), Some(CodeKind::Numeric));
    }

    #[test]
    fn test_numeric_wins_over_alpha3_length() {
        // A 3-char all-digit string must classify as numeric, never as a
        // malformed alpha-3.
        assert_eq!(CodeKind::classify("840"), Some(CodeKind::Numeric));
    }

    #[test]
    fn test_lowercase_rejected() {
        assert_eq!(CodeKind::classify("cl"), None);
        assert_eq!(CodeKind::classify("chl"), None);
        assert_eq!(CodeKind::classify("Cl"), None);
    }

    #[test]
    fn test_wrong_lengths_rejected() {
        assert_eq!(CodeKind::classify(""), None);
        assert_eq!(CodeKind::classify("C"), None);
        assert_eq!(CodeKind::classify("CHLE"), None);
        assert_eq!(CodeKind::classify("1"), None);
        assert_eq!(CodeKind::classify("15"), None);
        assert_eq!(CodeKind::classify("1522"), None);
    }

    #[test]
    fn test_mixed_and_unicode_rejected() {
        assert_eq!(CodeKind::classify("C1"), None);
        assert_eq!(CodeKind::classify("1A2"), None);
        assert_eq!(CodeKind::classify("CH-"), None);
        assert_eq!(CodeKind::classify("ÅL"), None);
        assert_eq!(CodeKind::classify("１５２"), None);
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("CL"));
        assert!(is_valid_code("CHL"));
        assert!(is_valid_code("152"));
        assert!(!is_valid_code("cl"));
        assert!(!is_valid_code(""));
    }
}
