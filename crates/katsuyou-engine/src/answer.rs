//! Lenient comparison of typed answers against a computed form.

use katsuyou_types::ConjugationResult;

/// Drop all whitespace (ideographic space included), one trailing です, and
/// fold case.
pub fn normalize_answer(input: &str) -> String {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let bare = compact.strip_suffix("です").unwrap_or(&compact);
    bare.to_lowercase()
}

/// True when `input` matches the result's surface or its reading.
pub fn check_answer(input: &str, result: &ConjugationResult) -> bool {
    let answer = normalize_answer(input);
    !answer.is_empty()
        && (answer == normalize_answer(&result.surface)
            || answer == normalize_answer(&result.reading))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(surface: &str, reading: &str) -> ConjugationResult {
        ConjugationResult {
            surface: surface.into(),
            reading: reading.into(),
            romaji: Some("tabemasu".into()),
        }
    }

    #[test]
    fn normalizes_whitespace_copula_and_case() {
        assert_eq!(normalize_answer("  た べ ます "), "たべます");
        assert_eq!(normalize_answer("たべ\u{3000}ます"), "たべます");
        assert_eq!(normalize_answer("高いです"), "高い");
        assert_eq!(normalize_answer("ですです"), "です");
        assert_eq!(normalize_answer("TaBeMaSu"), "tabemasu");
    }

    #[test]
    fn accepts_surface_or_reading() {
        let r = result("食べます", "たべます");
        assert!(check_answer("食べます", &r));
        assert!(check_answer(" たべます ", &r));
        assert!(!check_answer("たべません", &r));
    }

    #[test]
    fn romaji_and_empty_input_never_match() {
        let r = result("食べます", "たべます");
        assert!(!check_answer("tabemasu", &r));
        assert!(!check_answer("   ", &r));
        assert!(!check_answer("です", &r));
    }

    #[test]
    fn polite_adjective_accepts_plain_answer() {
        let r = result("高いです", "たかいです");
        assert!(check_answer("高い", &r));
        assert!(check_answer("たかいです", &r));
    }
}
