//! Character classes used by the classifier and the furigana aligner.

use katsuyou_types::StemRow;
use wana_kana::ConvertJapanese;

/// Inclusive `(min, max)` code point range.
type CodepointRange = (u32, u32);

const HIRAGANA_RANGE: CodepointRange = (0x3040, 0x309f);
const KATAKANA_RANGE: CodepointRange = (0x30a0, 0x30ff);

const CJK_IDEOGRAPH_RANGES: [CodepointRange; 7] = [
    (0x4e00, 0x9fff),   // CJK unified ideographs
    (0x3400, 0x4dbf),   // Extension A
    (0x20000, 0x2a6df), // Extension B
    (0x2a700, 0x2ebef), // Extensions C-F
    (0x30000, 0x323af), // Extensions G-H
    (0xf900, 0xfaff),   // Compatibility ideographs
    (0x2f800, 0x2fa1f), // Compatibility supplement
];

// Iteration mark and shime, both written in place of a kanji.
const KANJI_MARKS: [char; 2] = ['々', '〆'];

#[rustfmt::skip]
const ROWS: [(StemRow, &str); 5] = [
    (StemRow::A, "あかがさざただなはばぱまやらわ"),
    (StemRow::I, "いきぎしじちぢにひびぴみり"),
    (StemRow::U, "うくぐすずつづぬふぶぷむゆる"),
    (StemRow::E, "えけげせぜてでねへべぺめれ"),
    (StemRow::O, "おこごそぞとどのほぼぽもよろを"),
];

fn in_range(c: char, (min, max): CodepointRange) -> bool {
    let cp = c as u32;
    cp >= min && cp <= max
}

pub fn is_kanji(c: char) -> bool {
    KANJI_MARKS.contains(&c) || CJK_IDEOGRAPH_RANGES.iter().any(|r| in_range(c, *r))
}

pub fn is_hiragana(c: char) -> bool {
    in_range(c, HIRAGANA_RANGE)
}

pub fn is_kana(c: char) -> bool {
    in_range(c, HIRAGANA_RANGE) || in_range(c, KATAKANA_RANGE)
}

pub fn contains_kanji(text: &str) -> bool {
    text.chars().any(is_kanji)
}

/// Vowel row of a full-size hiragana character.
pub fn vowel_row(c: char) -> Option<StemRow> {
    ROWS.iter()
        .find(|(_, chars)| chars.contains(c))
        .map(|(row, _)| *row)
}

/// Hepburn romanization of a kana reading.
pub fn to_romaji(reading: &str) -> String {
    reading.to_romaji()
}
