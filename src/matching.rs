use crate::sample::SampleText;
use itertools::Itertools;

/// How a single reference character is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CharClass {
    Untyped,
    Correct,
    Incorrect,
}

/// Snapshot of the three numbers shown in the stats panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: usize,
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Number of input positions that match the reference at the same position.
///
/// Input characters past the end of the reference never count.
pub fn correct_chars(input: &str, sample: &SampleText) -> usize {
    input
        .chars()
        .zip(sample.chars())
        .filter(|&(typed, expected)| chars_eq_ignore_case(typed, expected))
        .count()
}

/// Whitespace-separated tokens typed so far.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// round(words / minutes), zero when no time has elapsed.
pub fn words_per_minute(words: usize, elapsed_secs: u64) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }
    let minutes = elapsed_secs as f64 / 60.0;
    (words as f64 / minutes).round() as u32
}

fn percentage(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole.max(1) as f64) * 100.0).round() as u32
}

/// Metrics while a test is in progress, relative to what has been typed.
pub fn live_metrics(input: &str, elapsed_secs: u64, sample: &SampleText) -> Metrics {
    let input_len = input.chars().count();
    let correct = correct_chars(input, sample);

    Metrics {
        wpm: words_per_minute(count_words(input), elapsed_secs),
        accuracy: percentage(correct, input_len),
        errors: input_len - correct,
    }
}

/// Metrics once a test is over, relative to the whole reference text.
pub fn final_metrics(input: &str, elapsed_secs: u64, sample: &SampleText) -> Metrics {
    let correct = correct_chars(input, sample);

    Metrics {
        wpm: words_per_minute(sample.word_count(), elapsed_secs),
        accuracy: percentage(correct, sample.char_len()),
        errors: sample.char_len() - correct,
    }
}

/// Classifies every reference character against the current input.
pub fn classify(input: &str, sample: &SampleText) -> Vec<(char, CharClass)> {
    let mut typed = input.chars();
    sample
        .chars()
        .map(|expected| {
            let class = match typed.next() {
                None => CharClass::Untyped,
                Some(c) if chars_eq_ignore_case(c, expected) => CharClass::Correct,
                Some(_) => CharClass::Incorrect,
            };
            (expected, class)
        })
        .collect()
}

/// Collapses a classification into runs of equally classified text, the unit
/// the renderer styles.
pub fn highlight_runs(classes: &[(char, CharClass)]) -> Vec<(CharClass, String)> {
    classes
        .iter()
        .chunk_by(|(_, class)| *class)
        .into_iter()
        .map(|(class, run)| (class, run.map(|(c, _)| *c).collect()))
        .collect()
}
