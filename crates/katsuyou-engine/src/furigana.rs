//! Furigana alignment of a written form against its kana reading.

use katsuyou_types::FuriganaSegment;

use crate::kana::{contains_kanji, is_kana};

/// Split `text` into plain-kana and kanji-with-reading segments.
///
/// Kana shared by the end of `text` and `reading` is peeled off first, then
/// kana shared by the start of what remains. The interior, which holds every
/// kanji, carries the leftover reading. Pairs that cannot be split end up as
/// one segment with the whole reading.
pub fn align_furigana(text: &str, reading: &str) -> Vec<FuriganaSegment> {
    if reading.is_empty() || reading == text || !contains_kanji(text) {
        return vec![FuriganaSegment::plain(text)];
    }

    let text_chars: Vec<char> = text.chars().collect();
    let reading_chars: Vec<char> = reading.chars().collect();

    let trailing = text_chars
        .iter()
        .rev()
        .zip(reading_chars.iter().rev())
        .take_while(|(t, r)| is_kana(**t) && t == r)
        .count();
    let text_end = text_chars.len() - trailing;
    let reading_end = reading_chars.len() - trailing;

    let leading = text_chars[..text_end]
        .iter()
        .zip(&reading_chars[..reading_end])
        .take_while(|(t, r)| is_kana(**t) && t == r)
        .count();

    let interior_text: String = text_chars[leading..text_end].iter().collect();
    let interior_reading: String = reading_chars[leading..reading_end].iter().collect();
    if interior_text.is_empty() || interior_reading.is_empty() {
        return vec![FuriganaSegment::ruby(text, reading)];
    }

    let mut segments = Vec::with_capacity(3);
    if leading > 0 {
        segments.push(FuriganaSegment::plain(
            text_chars[..leading].iter().collect::<String>(),
        ));
    }
    segments.push(FuriganaSegment::ruby(interior_text, interior_reading));
    if trailing > 0 {
        segments.push(FuriganaSegment::plain(
            text_chars[text_end..].iter().collect::<String>(),
        ));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(segments: &[FuriganaSegment]) -> Vec<(&str, &str)> {
        segments
            .iter()
            .map(|s| (s.text.as_str(), s.reading.as_str()))
            .collect()
    }

    #[test]
    fn okurigana_is_left_plain() {
        assert_eq!(
            pairs(&align_furigana("食べる", "たべる")),
            [("食", "た"), ("べる", "")]
        );
        assert_eq!(
            pairs(&align_furigana("新しい", "あたらしい")),
            [("新", "あたら"), ("しい", "")]
        );
    }

    #[test]
    fn leading_kana_is_peeled_off() {
        assert_eq!(
            pairs(&align_furigana("お茶", "おちゃ")),
            [("お", ""), ("茶", "ちゃ")]
        );
        assert_eq!(
            pairs(&align_furigana("お弁当です", "おべんとうです")),
            [("お", ""), ("弁当", "べんとう"), ("です", "")]
        );
    }

    #[test]
    fn kana_between_kanji_stays_in_the_interior() {
        assert_eq!(
            pairs(&align_furigana("持って来る", "もってくる")),
            [("持って来", "もってく"), ("る", "")]
        );
    }

    #[test]
    fn unannotated_cases() {
        assert_eq!(pairs(&align_furigana("たべる", "たべる")), [("たべる", "")]);
        assert_eq!(pairs(&align_furigana("たべる", "")), [("たべる", "")]);
        assert_eq!(pairs(&align_furigana("食べる", "")), [("食べる", "")]);
        let same = align_furigana("食べる", "食べる");
        assert_eq!(pairs(&same), [("食べる", "")]);
        assert!(!same[0].has_reading());
        assert_eq!(pairs(&align_furigana("テスト", "てすと")), [("テスト", "")]);
    }

    #[test]
    fn mismatched_pair_falls_back_to_one_segment() {
        assert_eq!(
            pairs(&align_furigana("食べる", "べる")),
            [("食べる", "べる")]
        );
    }

    #[test]
    fn segments_reconstruct_the_text() {
        let cases = [
            ("食べる", "たべる"),
            ("お茶", "おちゃ"),
            ("勉強する", "べんきょうする"),
            ("来させられる", "こさせられる"),
            ("日本", "にほん"),
            ("食べる", "べる"),
        ];
        for (text, reading) in cases {
            let segments = align_furigana(text, reading);
            let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
            assert_eq!(joined, text);
            for s in &segments {
                assert!(!s.has_reading() || contains_kanji(&s.text), "{s:?}");
            }
            for w in segments.windows(2) {
                assert!(w[0].has_reading() || w[1].has_reading());
            }
        }
    }
}
