//! Rule-based sentiment classification for feedback text.
//!
//! Word valences from a fixed lexicon are adjusted for nearby degree modifiers,
//! negation, capitalisation and a contrastive "but", summed, and squashed into a
//! compound score in [-1, 1]:
//!
//! ```text
//! compound = sum / sqrt(sum² + 15)
//! ```
//!
//! The label is `positive` at compound >= 0.1, `negative` at compound <= -0.1 and
//! `neutral` in between. The stored confidence is |compound|.
//!
//! Classification is pure: the same text always yields the same result.

mod lexicon;

use crate::models::feedback::Sentiment;
use lexicon::{BOOSTERS, NEGATORS};

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const CAPS_INCREMENT: f64 = 0.733;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const BEFORE_BUT: f64 = 0.5;
const AFTER_BUT: f64 = 1.5;

/// Modifiers further than three tokens back are ignored.
const LOOKBACK_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

/// Outcome of classifying one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,

    /// |compound|, always within [0, 1]
    pub score: f64,

    pub compound: f64,
}

/// Classify `text`. Never fails; text without polarity words is neutral with score 0.
pub fn classify(text: &str) -> Classification {
    let compound = compound_score(text);

    Classification {
        sentiment: label_for(compound),
        score: compound.abs().clamp(0.0, 1.0),
        compound,
    }
}

pub fn label_for(compound: f64) -> Sentiment {
    if compound >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

struct Token<'a> {
    raw: &'a str,
    /// Lower-cased with apostrophes removed, used for every lookup.
    key: String,
}

impl Token<'_> {
    fn is_negator(&self) -> bool {
        NEGATORS.contains(&self.key.as_str()) || self.raw.to_lowercase().ends_with("n't")
    }

    fn is_shouting(&self) -> bool {
        self.raw.chars().any(char::is_alphabetic) && !self.raw.chars().any(char::is_lowercase)
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(|raw| Token {
            raw,
            key: raw
                .chars()
                .filter(|c| *c != '\'' && *c != '\u{2019}')
                .flat_map(char::to_lowercase)
                .collect(),
        })
        .collect()
}

/// Raw compound score in [-1, 1].
pub fn compound_score(text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }

    let shouting = tokens.iter().filter(|t| t.is_shouting()).count();
    let mixed_case = shouting > 0 && shouting < tokens.len();

    let mut valences: Vec<f64> = (0..tokens.len())
        .map(|i| token_valence(&tokens, i, mixed_case))
        .collect();

    if let Some(pivot) = tokens.iter().position(|t| t.key == "but") {
        for (i, valence) in valences.iter_mut().enumerate() {
            if i < pivot {
                *valence *= BEFORE_BUT;
            } else if i > pivot {
                *valence *= AFTER_BUT;
            }
        }
    }

    let mut sum: f64 = valences.iter().sum();
    if sum == 0.0 {
        return 0.0;
    }

    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    sum += sum.signum() * exclamations as f64 * EXCLAMATION_INCREMENT;

    normalize(sum)
}

fn token_valence(tokens: &[Token<'_>], index: usize, mixed_case: bool) -> f64 {
    let token = &tokens[index];
    let Some(base) = lexicon::valence(&token.key) else {
        return 0.0;
    };

    let mut valence = base;
    if mixed_case && token.is_shouting() {
        valence += base.signum() * CAPS_INCREMENT;
    }

    for (distance, damping) in LOOKBACK_DAMPING.iter().enumerate() {
        let Some(prior) = index.checked_sub(distance + 1).map(|j| &tokens[j]) else {
            break;
        };

        if let Some(&increment) = BOOSTERS.get(prior.key.as_str()) {
            valence += valence.signum() * increment * damping;
        }
        if prior.is_negator() {
            valence *= NEGATION_SCALAR;
        }
    }

    valence
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_polarity_is_neutral_with_zero_score() {
        for text in ["", "   ", "The button is blue", "?!?"] {
            let result = classify(text);
            assert_eq!(result.sentiment, Sentiment::Neutral, "{text:?}");
            assert_eq!(result.score, 0.0);
        }
    }

    #[test]
    fn single_negative_word() {
        let result = classify("crashes on load");
        assert_eq!(result.sentiment, Sentiment::Negative);
        // -1.9 / sqrt(1.9² + 15)
        assert!((result.compound + 0.4404).abs() < 1e-3, "{}", result.compound);
    }

    #[test]
    fn praise_is_positive() {
        let result = classify("I love this product, the setup was easy.");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!(result.score > 0.5);
    }

    #[test]
    fn negation_flips_polarity() {
        assert_eq!(classify("It is good").sentiment, Sentiment::Positive);
        assert_eq!(classify("It is not good").sentiment, Sentiment::Negative);
        assert_eq!(classify("It isn't good").sentiment, Sentiment::Negative);
    }

    #[test]
    fn boosters_and_dampeners_move_magnitude() {
        let plain = classify("This is good").compound;
        let boosted = classify("This is very good").compound;
        let dampened = classify("This is slightly good").compound;
        assert!(boosted > plain);
        assert!(dampened < plain);
    }

    #[test]
    fn clause_after_but_dominates() {
        assert_eq!(
            classify("The design is good but the app is terrible").sentiment,
            Sentiment::Negative
        );
    }

    #[test]
    fn exclamations_and_caps_add_emphasis() {
        let calm = classify("this is great").compound;
        assert!(classify("this is great!!").compound > calm);
        assert!(classify("this is GREAT").compound > calm);
    }

    #[test]
    fn weak_words_stay_below_threshold_after_dampening() {
        assert_eq!(classify("hard").sentiment, Sentiment::Negative);

        let result = classify("slightly hard");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert!(result.score < POSITIVE_THRESHOLD);
    }

    #[test]
    fn everyday_feedback_vocabulary_is_scored() {
        for text in [
            "I like it",
            "I really like this widget",
            "Terrific support",
            "Setup keeps improving",
        ] {
            assert_eq!(classify(text).sentiment, Sentiment::Positive, "{text:?}");
        }

        for text in [
            "Checkout keeps failing",
            "The page keeps freezing",
            "This is unacceptable",
            "The app is glitchy and unresponsive",
            "Search keeps glitching",
        ] {
            assert_eq!(classify(text).sentiment, Sentiment::Negative, "{text:?}");
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "Checkout is slow and the search keeps failing!";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn score_is_bounded() {
        let result = classify("best best best best best best best best amazing awesome!!!!!");
        assert!(result.score <= 1.0);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(label_for(0.1), Sentiment::Positive);
        assert_eq!(label_for(-0.1), Sentiment::Negative);
        assert_eq!(label_for(0.099), Sentiment::Neutral);
    }
}
