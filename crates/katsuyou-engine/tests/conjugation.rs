use katsuyou_engine::{
    ConjugationStrategy, InflectionKey, Stem, StemSelector, Word, adjective_rule, align_furigana, check_answer,
    conjugate, conjugate_adjective, conjugate_all, contains_kanji, exception_table,
    strategy_for,
};
use katsuyou_types::{
    AdjectiveForm, AdjectiveType, ConjugationForm, ConjugationResult, LexicalEntry, VerbGroup,
};

fn verb(df: &str, reading: &str, group: VerbGroup) -> LexicalEntry {
    LexicalEntry::verb(df, reading, Some(group))
}

fn pair(result: &ConjugationResult) -> (&str, &str) {
    (result.surface.as_str(), result.reading.as_str())
}

#[test]
fn textbook_examples() -> anyhow::Result<()> {
    let taberu = verb("食べる", "たべる", VerbGroup::Ichidan);
    assert_eq!(pair(&conjugate(&taberu, ConjugationForm::MasuPositive)?), ("食べます", "たべます"));

    let kaku = verb("書く", "かく", VerbGroup::Godan);
    assert_eq!(pair(&conjugate(&kaku, ConjugationForm::TeForm)?), ("書いて", "かいて"));

    let kuru = verb("来る", "くる", VerbGroup::IrregularKuru);
    assert_eq!(pair(&conjugate(&kuru, ConjugationForm::PlainNegative)?), ("来ない", "こない"));

    let suru = verb("する", "する", VerbGroup::IrregularSuru);
    assert_eq!(pair(&conjugate(&suru, ConjugationForm::PotentialPositive)?), ("できる", "できる"));
    Ok(())
}

#[test]
fn ku_verbs_take_ite_except_iku() -> anyhow::Result<()> {
    let ku_verbs = [
        ("書く", "かく"),
        ("聞く", "きく"),
        ("歩く", "あるく"),
        ("働く", "はたらく"),
        ("置く", "おく"),
        ("泣く", "なく"),
    ];
    for (df, reading) in ku_verbs {
        let te = conjugate(&verb(df, reading, VerbGroup::Godan), ConjugationForm::TeForm)?;
        assert!(te.surface.ends_with("いて"), "{df}: {}", te.surface);
    }
    for (df, reading) in [("行く", "いく"), ("いく", ""), ("ゆく", "")] {
        let entry = verb(df, reading, VerbGroup::Godan);
        assert!(conjugate(&entry, ConjugationForm::TeForm)?.surface.ends_with("って"));
        assert!(conjugate(&entry, ConjugationForm::PlainPastPositive)?.surface.ends_with("った"));
    }
    let iku = verb("行く", "いく", VerbGroup::Godan);
    assert_eq!(pair(&conjugate(&iku, ConjugationForm::TeIru)?), ("行っている", "いっている"));
    assert_eq!(pair(&conjugate(&iku, ConjugationForm::ConditionalTara)?), ("行ったら", "いったら"));
    // Forms outside the sound change are untouched.
    assert_eq!(conjugate(&iku, ConjugationForm::MasuPositive)?.surface, "行きます");
    Ok(())
}

#[test]
fn aru_negative_is_lexical() -> anyhow::Result<()> {
    let aru = verb("ある", "ある", VerbGroup::Godan);
    assert_eq!(conjugate(&aru, ConjugationForm::PlainNegative)?.surface, "ない");
    assert_eq!(conjugate(&aru, ConjugationForm::PlainPastNegative)?.surface, "なかった");
    assert_eq!(conjugate(&aru, ConjugationForm::MasuNegative)?.surface, "ありません");
    Ok(())
}

#[test]
fn suru_compounds_and_full_suru_table() -> anyhow::Result<()> {
    use ConjugationForm::*;
    let suru = verb("する", "する", VerbGroup::IrregularSuru);
    let cases = [
        (PlainNegative, "しない"),
        (PlainPastPositive, "した"),
        (TeForm, "して"),
        (VolitionalPositive, "しよう"),
        (PotentialNegative, "できない"),
        (ConditionalBa, "すれば"),
        (Passive, "される"),
        (Causative, "させる"),
        (CausativePassive, "させられる"),
        (ImperativePositive, "しろ"),
    ];
    for (form, expected) in cases {
        assert_eq!(conjugate(&suru, form)?.surface, expected, "{form}");
    }
    let benkyou = verb("勉強する", "べんきょうする", VerbGroup::IrregularSuru);
    assert_eq!(
        pair(&conjugate(&benkyou, MasuPastPositive)?),
        ("勉強しました", "べんきょうしました")
    );
    Ok(())
}

#[test]
fn kana_kuru_and_compound_kuru() -> anyhow::Result<()> {
    let kuru = verb("くる", "", VerbGroup::IrregularKuru);
    assert_eq!(conjugate(&kuru, ConjugationForm::MasuPositive)?.surface, "きます");
    let motte = verb("持って来る", "もってくる", VerbGroup::IrregularKuru);
    assert_eq!(
        pair(&conjugate(&motte, ConjugationForm::PlainPastPositive)?),
        ("持って来た", "もってきた")
    );
    Ok(())
}

#[test]
fn every_form_conjugates_for_every_group() -> anyhow::Result<()> {
    let verbs = [
        verb("食べる", "たべる", VerbGroup::Ichidan),
        verb("見る", "みる", VerbGroup::Ichidan),
        verb("書く", "かく", VerbGroup::Godan),
        verb("泳ぐ", "およぐ", VerbGroup::Godan),
        verb("話す", "はなす", VerbGroup::Godan),
        verb("待つ", "まつ", VerbGroup::Godan),
        verb("死ぬ", "しぬ", VerbGroup::Godan),
        verb("遊ぶ", "あそぶ", VerbGroup::Godan),
        verb("読む", "よむ", VerbGroup::Godan),
        verb("帰る", "かえる", VerbGroup::Godan),
        verb("買う", "かう", VerbGroup::Godan),
        verb("する", "する", VerbGroup::IrregularSuru),
        verb("来る", "くる", VerbGroup::IrregularKuru),
    ];
    for entry in &verbs {
        let table = conjugate_all(entry)?;
        assert_eq!(table.len(), ConjugationForm::ALL.len());
        for (form, result) in table {
            assert!(!result.surface.is_empty(), "{} {form}", entry.dictionary_form);
            assert!(!contains_kanji(&result.reading), "{} {form}", entry.dictionary_form);
            assert!(result.romaji.is_some());
        }
    }
    Ok(())
}

#[test]
fn sound_change_clusters_per_ending() -> anyhow::Result<()> {
    let cases = [
        ("泳ぐ", "およぐ", "泳いで"),
        ("話す", "はなす", "話して"),
        ("待つ", "まつ", "待って"),
        ("死ぬ", "しぬ", "死んで"),
        ("遊ぶ", "あそぶ", "遊んで"),
        ("読む", "よむ", "読んで"),
        ("帰る", "かえる", "帰って"),
        ("買う", "かう", "買って"),
    ];
    for (df, reading, expected) in cases {
        let te = conjugate(&verb(df, reading, VerbGroup::Godan), ConjugationForm::TeForm)?;
        assert_eq!(te.surface, expected);
    }
    Ok(())
}

// Reading used when a table entry does not pin one.
fn reading_for(lexeme: &str) -> &str {
    match lexeme {
        "行く" => "いく",
        "有る" => "ある",
        other if !contains_kanji(other) => other,
        other => panic!("no reading known for {other}"),
    }
}

#[test]
fn every_exception_fires_and_changes_the_generic_result() {
    let mut fired = 0;
    for exception in exception_table() {
        let reading = exception.reading.unwrap_or_else(|| reading_for(exception.lexeme));
        let word = Word::new(exception.lexeme, reading).unwrap();
        let (actual, generic) = match exception.key {
            InflectionKey::Verb(form) => {
                let entry = verb(exception.lexeme, reading, VerbGroup::Godan);
                let rule = strategy_for(VerbGroup::Godan).rule(form);
                assert!(!matches!(rule.stem, StemSelector::Derived(_)));
                let generic = strategy_for(VerbGroup::Godan)
                    .stem(&word, rule.stem)
                    .unwrap()
                    .attach(rule.suffix, rule.reading_suffix);
                (conjugate(&entry, form).unwrap(), generic)
            }
            InflectionKey::Adjective(form) => {
                let entry =
                    LexicalEntry::adjective(exception.lexeme, reading, Some(AdjectiveType::I));
                let rule = adjective_rule(AdjectiveType::I, form);
                let stem = Stem {
                    surface: exception.lexeme.strip_suffix('い').unwrap().to_string(),
                    reading: reading.strip_suffix('い').unwrap().to_string(),
                };
                (conjugate_adjective(&entry, form).unwrap(), stem.attach(rule.suffix, rule.suffix))
            }
        };
        assert_eq!(actual, exception.apply(&word), "{} {:?}", exception.lexeme, exception.key);
        assert_ne!(
            (&actual.surface, &actual.reading),
            (&generic.surface, &generic.reading),
            "{} {:?}",
            exception.lexeme,
            exception.key
        );
        fired += 1;
    }
    assert_eq!(fired, exception_table().count());
    assert!(fired > 0);
}

#[test]
fn answers_can_be_typed_in_kana() -> anyhow::Result<()> {
    let taberu = verb("食べる", "たべる", VerbGroup::Ichidan);
    let result = conjugate(&taberu, ConjugationForm::MasuPositive)?;
    assert_eq!(result.surface, "食べます");
    assert!(check_answer("たべます", &result));
    assert!(check_answer("食べます", &result));
    Ok(())
}

#[test]
fn furigana_for_conjugated_forms() -> anyhow::Result<()> {
    let kuru = verb("来る", "くる", VerbGroup::IrregularKuru);
    let result = conjugate(&kuru, ConjugationForm::CausativePassive)?;
    let segments = align_furigana(&result.surface, &result.reading);
    assert_eq!(segments[0].text, "来");
    assert_eq!(segments[0].reading, "こ");
    assert_eq!(segments[1].text, "させられる");
    assert!(!segments[1].has_reading());

    let ii = LexicalEntry::adjective("いい", "いい", Some(AdjectiveType::I));
    let past = conjugate_adjective(&ii, AdjectiveForm::Past)?;
    assert_eq!(align_furigana(&past.surface, &past.reading).len(), 1);
    Ok(())
}
