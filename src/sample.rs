/// The reference sentence every test is typed against.
pub const SAMPLE_TEXT: &str =
    "The quick brown fox jumps over the lazy dog . this is a typing test to measure your speed and accuracy.";

/// Immutable reference text with its lengths precomputed.
///
/// Lengths are counted in `char`s so that position-aligned matching and the
/// highlight renderer agree on what "position i" means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleText {
    text: String,
    char_len: usize,
    word_count: usize,
}

impl SampleText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        let word_count = text.split(' ').count();
        Self {
            text,
            char_len,
            word_count,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// L: number of characters in the reference.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// W: number of pieces the reference splits into on single spaces.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    /// Case-insensitive equality, the completion condition of a test.
    pub fn matches(&self, input: &str) -> bool {
        input.to_lowercase() == self.text.to_lowercase()
    }
}

impl Default for SampleText {
    fn default() -> Self {
        Self::new(SAMPLE_TEXT)
    }
}
