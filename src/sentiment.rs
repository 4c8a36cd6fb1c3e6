//! Sentiment polarity for product descriptions.
//!
//! [`SentimentProvider`] is the seam for any polarity backend. The bundled
//! [`LexiconSentiment`] is a keyword-based analyzer with no external
//! dependencies. [`SentimentAdapter`] wraps a provider so a failure for one
//! description becomes a neutral score instead of an error.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::SentimentError;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "superb",
        "outstanding", "brilliant", "love", "loved", "loving", "best", "better",
        "positive", "happy", "joy", "joyful", "beautiful", "perfect", "awesome",
        "incredible", "magnificent", "delightful", "pleasant", "satisfying", "satisfied",
        "recommend", "recommended", "impressive", "exceptional", "remarkable",
        "efficient", "effective", "helpful", "reliable", "durable", "sturdy", "quality",
        "valuable", "comfortable", "soft", "stylish", "elegant", "premium", "attractive",
        "trendy", "fashionable", "lovely", "nice", "fine", "smooth", "bright", "fresh",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "hate",
        "hated", "dislike", "disappointing", "disappointed", "failure", "failed", "fail",
        "negative", "sad", "unhappy", "angry", "annoyed", "frustrated", "frustrating",
        "problem", "problems", "issue", "issues", "broken", "defective", "damaged",
        "faulty", "wrong", "useless", "waste", "fake", "unreliable", "unstable", "slow",
        "difficult", "uncomfortable", "cheap", "flimsy", "overpriced", "worthless",
        "garbage", "trash", "rubbish", "pathetic", "mediocre", "subpar", "inferior",
        "ugly", "dull", "noisy", "leaky",
    ]
    .into_iter()
    .collect()
});

static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec!["not", "no", "never", "nothing", "hardly", "isn", "wasn", "don", "doesn", "didn"]
        .into_iter()
        .collect()
});

/// How far back a negator reaches.
const NEGATION_WINDOW: usize = 3;

/// A backend that scores text polarity in `[-1, 1]`.
pub trait SentimentProvider: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}

/// Keyword-based polarity.
///
/// Every lexicon hit counts `+1` or `-1`, flipped when a negator appears in
/// the preceding three tokens. The polarity is the mean over hits, so text
/// without any sentiment words is neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl SentimentProvider for LexiconSentiment {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let lowercase_text = text.to_lowercase();
        let words: Vec<&str> = lowercase_text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .collect();

        let mut total = 0.0;
        let mut hits = 0usize;
        for (i, word) in words.iter().enumerate() {
            let base = if POSITIVE_WORDS.contains(word) {
                1.0
            } else if NEGATIVE_WORDS.contains(word) {
                -1.0
            } else {
                continue;
            };

            let negated = (1..=NEGATION_WINDOW).any(|k| i >= k && NEGATORS.contains(&words[i - k]));
            total += if negated { -base } else { base };
            hits += 1;
        }

        if hits == 0 {
            return Ok(0.0);
        }
        Ok(total / hits as f64)
    }
}

/// Provider wrapper that never fails.
#[derive(Clone)]
pub struct SentimentAdapter {
    provider: Arc<dyn SentimentProvider>,
}

impl SentimentAdapter {
    pub fn new(provider: Arc<dyn SentimentProvider>) -> Self {
        Self { provider }
    }

    /// Polarity in `[-1, 1]`; `0.0` whenever the provider errors or returns
    /// something that is not a finite number. Not retried.
    pub fn score(&self, text: &str) -> f64 {
        match self.provider.polarity(text) {
            Ok(p) if p.is_finite() => p.clamp(-1.0, 1.0),
            Ok(p) => {
                tracing::debug!("Sentiment provider returned {}; treating as neutral", p);
                0.0
            }
            Err(e) => {
                tracing::debug!("{}; treating as neutral", e);
                0.0
            }
        }
    }
}

impl Default for SentimentAdapter {
    fn default() -> Self {
        Self::new(Arc::new(LexiconSentiment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl SentimentProvider for Failing {
        fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
            Err(SentimentError::Unavailable("model not loaded".into()))
        }
    }

    struct Fixed(f64);

    impl SentimentProvider for Fixed {
        fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_positive_sentiment() {
        let text = "This product is amazing and wonderful. I love it so much. Best purchase ever!";
        let polarity = LexiconSentiment.polarity(text).unwrap();
        assert!(polarity > 0.5);
    }

    #[test]
    fn test_negative_sentiment() {
        let text = "This is terrible and horrible. I hate it. Worst experience ever, total failure.";
        let polarity = LexiconSentiment.polarity(text).unwrap();
        assert_eq!(polarity, -1.0);
    }

    #[test]
    fn test_neutral_sentiment() {
        let text = "The item arrived on time. It works as described in the listing.";
        assert_eq!(LexiconSentiment.polarity(text).unwrap(), 0.0);
        assert_eq!(LexiconSentiment.polarity("").unwrap(), 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert_eq!(LexiconSentiment.polarity("not good at all").unwrap(), -1.0);
        assert_eq!(LexiconSentiment.polarity("never a bad day").unwrap(), 1.0);
        assert_eq!(LexiconSentiment.polarity("good and bad").unwrap(), 0.0);
    }

    #[test]
    fn test_adapter_defaults_to_neutral_on_failure() {
        let adapter = SentimentAdapter::new(Arc::new(Failing));
        assert_eq!(adapter.score("excellent"), 0.0);
    }

    #[test]
    fn test_adapter_sanitizes_output() {
        assert_eq!(SentimentAdapter::new(Arc::new(Fixed(f64::NAN))).score("x"), 0.0);
        assert_eq!(SentimentAdapter::new(Arc::new(Fixed(3.0))).score("x"), 1.0);
        assert_eq!(SentimentAdapter::new(Arc::new(Fixed(-0.25))).score("x"), -0.25);
    }

    #[test]
    fn test_default_adapter_uses_lexicon() {
        assert_eq!(SentimentAdapter::default().score("excellent quality"), 1.0);
    }
}
