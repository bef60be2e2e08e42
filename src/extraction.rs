use regex::Regex;

/// HUD formats of the supported games, in the order they are tried.
/// OCR often reads the "S" of "SCORE" as something else and "1P" as "ip".
/// Digits are ASCII only, other scripts fall through to the next rule.
const STANDARD_RULES: &[(&str, &str)] = &[
    (r"SCORE ([0-9]+)", "Gun Smoke"),
    (r"CORE-([0-9]+)", "Castlevania"),
    (r"CORE=([0-9]+)", "Castlevania"),
    (r"ip ([0-9]+)", "Contra"),
    (r"1p ([0-9]+)", "Contra"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedScore {
    pub score: i64,
    pub game_name: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no known score format found in the text")]
    NoMatch,
    #[error("captured score {digits:?} is not a valid integer")]
    InvalidScore { digits: String },
}

struct ScoreRule {
    pattern: Regex,
    game_name: String,
}

/// An ordered list of score patterns, each bound to a game.
/// The first pattern that matches decides both the score and the game.
pub struct ScoreRules {
    rules: Vec<ScoreRule>,
}

impl ScoreRules {
    /// Builds a rule set from `(pattern, game name)` pairs.
    /// The first capture group of each pattern must hold the score digits.
    pub fn new<'a>(
        rules: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, regex::Error> {
        let rules = rules
            .into_iter()
            .map(|(pattern, game_name)| {
                Ok(ScoreRule {
                    pattern: Regex::new(pattern)?,
                    game_name: game_name.to_owned(),
                })
            })
            .collect::<Result<_, regex::Error>>()?;
        Ok(Self { rules })
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.iter().copied()).expect("built-in score patterns are valid")
    }

    pub fn extract(&self, text: &str) -> Result<ExtractedScore, ExtractionError> {
        let (rule, captures) = self
            .rules
            .iter()
            .find_map(|rule| rule.pattern.captures(text).map(|captures| (rule, captures)))
            .ok_or(ExtractionError::NoMatch)?;

        let digits = captures.get(1).map_or("", |group| group.as_str());
        let score = digits
            .parse()
            .map_err(|_| ExtractionError::InvalidScore {
                digits: digits.to_owned(),
            })?;

        Ok(ExtractedScore {
            score,
            game_name: rule.game_name.clone(),
        })
    }

    /// Distinct game names in the order they first appear.
    pub fn game_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !names.contains(&rule.game_name.as_str()) {
                names.push(&rule.game_name);
            }
        }
        names
    }
}
