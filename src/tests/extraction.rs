use crate::extraction::{ExtractedScore, ExtractionError, ScoreRules};

fn extracted(score: i64, game_name: &str) -> Result<ExtractedScore, ExtractionError> {
    Ok(ExtractedScore {
        score,
        game_name: game_name.to_owned(),
    })
}

#[test]
fn every_hud_format_is_recognized() {
    let rules = ScoreRules::standard();

    let samples = [
        ("1UP\nSCORE 12345\nHI 50000", 12345, "Gun Smoke"),
        ("PLAYER\nCORE-00042 TIME 0300", 42, "Castlevania"),
        ("CORE=1700 STAGE 01", 1700, "Castlevania"),
        ("ip 20100\nREST 2", 20100, "Contra"),
        ("1p 300\nHI 20000", 300, "Contra"),
    ];
    for (text, score, game_name) in samples {
        assert_eq!(rules.extract(text), extracted(score, game_name), "{:?}", text);
    }
}

#[test]
fn gun_smoke_score() {
    let rules = ScoreRules::standard();
    assert_eq!(rules.extract("SCORE 12345"), extracted(12345, "Gun Smoke"));
}

#[test]
fn castlevania_score_with_leading_zeros() {
    let rules = ScoreRules::standard();
    assert_eq!(rules.extract("CORE-00042"), extracted(42, "Castlevania"));
}

#[test]
fn unknown_text_fails() {
    let rules = ScoreRules::standard();
    assert_eq!(
        rules.extract("GAME OVER\nPRESS START"),
        Err(ExtractionError::NoMatch)
    );
    assert_eq!(rules.extract(""), Err(ExtractionError::NoMatch));
    // Pattern is case sensitive
    assert_eq!(rules.extract("score 100"), Err(ExtractionError::NoMatch));
}

#[test]
fn first_matching_rule_wins() {
    let rules = ScoreRules::standard();

    // Rule order decides, not position in the text
    assert_eq!(rules.extract("1p 50\nSCORE 10"), extracted(10, "Gun Smoke"));
    assert_eq!(rules.extract("1p 7 ip 9"), extracted(9, "Contra"));
    assert_eq!(rules.extract("CORE=5 CORE-6"), extracted(6, "Castlevania"));
}

#[test]
fn only_ascii_digits_count() {
    let rules = ScoreRules::standard();
    assert_eq!(
        rules.extract("SCORE \u{0661}\u{0662}\u{0663}\n1p 500"),
        extracted(500, "Contra")
    );
    assert_eq!(
        rules.extract("SCORE \u{FF11}\u{FF12}"),
        Err(ExtractionError::NoMatch)
    );
}

#[test]
fn oversized_score_is_invalid() {
    let rules = ScoreRules::standard();
    assert_eq!(
        rules.extract("SCORE 99999999999999999999"),
        Err(ExtractionError::InvalidScore {
            digits: "99999999999999999999".to_owned()
        })
    );
}

#[test]
fn game_names_are_distinct_and_ordered() {
    let rules = ScoreRules::standard();
    assert_eq!(rules.game_names(), vec!["Gun Smoke", "Castlevania", "Contra"]);
}

#[test]
fn custom_rules() {
    let rules = ScoreRules::new([(r"PTS:(\d+)", "Pinball")]).unwrap();
    assert_eq!(rules.extract("PTS:900"), extracted(900, "Pinball"));
    assert!(ScoreRules::new([(r"(unclosed", "Broken")]).is_err());
}
