//! Sentiment scoring for news headlines.
//!
//! Scores are VADER compound scores: the summed word valences of a text are
//! normalized into `[-1.0, 1.0]`, where positive values mean positive tone.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound sentiment scorer backed by the VADER lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compound score of `text`, rounded to four decimals.
    ///
    /// Returns 0.0 for text without any sentiment-bearing words.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stockdash_core::sentiment::SentimentAnalyzer;
    ///
    /// let analyzer = SentimentAnalyzer::default();
    /// assert_eq!(analyzer.compound("good"), 0.4404);
    /// assert!(analyzer.compound("Shares fall after a bad quarter") < 0.0);
    /// ```
    pub fn compound(&self, text: &str) -> f64 {
        // Typographic apostrophes would hide contractions like "isn't"
        let text = text.replace('\u{2019}', "'");
        if text.trim().is_empty() {
            return 0.0;
        }

        // The analyzer only borrows the static lexicons
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(&text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);
        if compound.is_finite() {
            round4(compound)
        } else {
            0.0
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_word() {
        let analyzer = SentimentAnalyzer::default();
        assert_eq!(analyzer.compound("good"), 0.4404);
        assert_eq!(analyzer.compound("Good."), 0.4404);
        assert_eq!(analyzer.compound("bad"), -0.5423);
    }

    #[test]
    fn test_common_words_are_scored() {
        let analyzer = SentimentAnalyzer::default();
        assert!(analyzer.compound("investors love the new iPhone") > 0.0);
        assert!(analyzer.compound("a terrible week for the stock") < 0.0);
    }

    #[test]
    fn test_neutral_text() {
        let analyzer = SentimentAnalyzer::default();
        assert_eq!(analyzer.compound(""), 0.0);
        assert_eq!(analyzer.compound("   "), 0.0);
        assert_eq!(analyzer.compound("Apple to hold annual meeting on Tuesday"), 0.0);
        assert_eq!(analyzer.compound("!!!"), 0.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let analyzer = SentimentAnalyzer::default();
        let negated = analyzer.compound("not good");
        // 1.9 * -0.74 = -1.406
        assert_abs_diff_eq!(negated, -0.3412, epsilon = 1e-4);
        assert!(analyzer.compound("results were not bad") > 0.0);
    }

    #[test]
    fn test_booster_and_dampener() {
        let analyzer = SentimentAnalyzer::default();
        let plain = analyzer.compound("good");
        assert!(analyzer.compound("very good") > plain);
        assert!(analyzer.compound("slightly good") < plain);
        assert!(analyzer.compound("very bad") < analyzer.compound("bad"));
    }

    #[test]
    fn test_but_shifts_weight() {
        let analyzer = SentimentAnalyzer::default();
        assert!(analyzer.compound("Revenue was good but guidance was bad") < 0.0);
        assert!(analyzer.compound("Revenue was bad but profit was great") > 0.0);
    }

    #[test]
    fn test_exclamation_amplifies() {
        let analyzer = SentimentAnalyzer::default();
        assert!(analyzer.compound("great!!") > analyzer.compound("great"));
        assert!(analyzer.compound("bad!!") < analyzer.compound("bad"));
    }

    #[test]
    fn test_headlines() {
        let analyzer = SentimentAnalyzer::default();
        assert!(analyzer.compound("Apple posts great quarter on strong demand") > 0.5);
        assert!(analyzer.compound("Terrible results and bad guidance") < -0.5);
        // Typographic apostrophe treated like ASCII
        assert_eq!(
            analyzer.compound("Nvidia isn\u{2019}t good"),
            analyzer.compound("Nvidia isn't good")
        );
        assert!(analyzer.compound("Nvidia isn't good") < 0.0);
    }

    #[test]
    fn test_scores_are_bounded() {
        let analyzer = SentimentAnalyzer::default();
        let score = analyzer.compound(&"great ".repeat(200));
        assert!(score <= 1.0 && score > 0.99);

        let score = analyzer.compound(&"bad ".repeat(200));
        assert!(score >= -1.0 && score < -0.99);
    }
}
