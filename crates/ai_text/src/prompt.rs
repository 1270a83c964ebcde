//! System-prompt construction
//!
//! Tone and target length both come in as numbers; the vendor only sees
//! the finished instruction string, so every adapter shares this builder.

use domain::ToneLevel;

/// Style instruction for a tone level
fn style_for(tone: ToneLevel) -> &'static str {
    match tone.value() {
        5 => "intense, vivid and unrestrained; hold nothing back",
        4 => "mature and sensual, evocative but never crude",
        3 => "romantic with a clear spark, suggestive rather than explicit",
        2 => "soft and warm, hints and glances only",
        _ => "gentle and entirely family-friendly",
    }
}

/// Word-count guidance for a target listening length
fn length_for(minutes: f32) -> &'static str {
    if minutes >= 5.0 {
        "700-900 words"
    } else if minutes >= 3.0 {
        "400-600 words"
    } else {
        "200-350 words"
    }
}

/// Build the system prompt sent alongside the user's own prompt
#[must_use]
pub fn build_system_prompt(tone: ToneLevel, minutes: f32, language: &str) -> String {
    format!(
        "You are a skilled storyteller. Write the story in {language}. \
         Aim for {length}. The tone should be {style}. \
         Use natural dialogue and give the story a proper ending.",
        length = length_for(minutes),
        style = style_for(tone),
    )
}

/// Sampling temperature for a tone level
#[must_use]
pub fn temperature_for(tone: ToneLevel) -> f32 {
    if tone.value() >= 5 { 1.0 } else { 0.8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_embedded_verbatim() {
        let prompt = build_system_prompt(ToneLevel::default(), 3.0, "sv");
        assert!(prompt.contains("in sv"));
    }

    #[test]
    fn long_stories_get_the_big_word_budget() {
        let prompt = build_system_prompt(ToneLevel::default(), 5.0, "en");
        assert!(prompt.contains("700-900 words"));
    }

    #[test]
    fn mid_length_stories_get_the_middle_budget() {
        let prompt = build_system_prompt(ToneLevel::default(), 3.0, "en");
        assert!(prompt.contains("400-600 words"));
    }

    #[test]
    fn short_stories_get_the_small_budget() {
        let prompt = build_system_prompt(ToneLevel::default(), 1.0, "en");
        assert!(prompt.contains("200-350 words"));
    }

    #[test]
    fn each_tone_level_has_a_distinct_style() {
        let styles: Vec<_> = (1..=5u8)
            .map(|level| style_for(ToneLevel::new(level)))
            .collect();
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn only_max_tone_raises_temperature() {
        assert!((temperature_for(ToneLevel::MAX) - 1.0).abs() < f32::EPSILON);
        for level in 1..=4u8 {
            assert!((temperature_for(ToneLevel::new(level)) - 0.8).abs() < f32::EPSILON);
        }
    }
}
