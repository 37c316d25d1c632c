//! Word distribution
//!
//! Splits sign text into exactly three upper-cased section strings:
//! - up to three words: one word per section, in order
//! - more words: contiguous chunks of `ceil(n / 3)` words joined by spaces

use super::SECTION_COUNT;

/// Sign text as entered: one string or several lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignText {
    Single(String),
    Lines(Vec<String>),
}

impl SignText {
    /// All whitespace-separated words, in order
    pub fn words(&self) -> Vec<&str> {
        match self {
            SignText::Single(text) => text.split_whitespace().collect(),
            SignText::Lines(lines) => lines.iter().flat_map(|l| l.split_whitespace()).collect(),
        }
    }
}

impl From<&str> for SignText {
    fn from(text: &str) -> Self {
        SignText::Single(text.to_string())
    }
}

impl From<String> for SignText {
    fn from(text: String) -> Self {
        SignText::Single(text)
    }
}

impl From<Vec<String>> for SignText {
    fn from(lines: Vec<String>) -> Self {
        SignText::Lines(lines)
    }
}

impl From<&[&str]> for SignText {
    fn from(lines: &[&str]) -> Self {
        SignText::Lines(lines.iter().map(|l| l.to_string()).collect())
    }
}

/// Distribute words across the three sections
pub fn distribute_words(text: &SignText) -> [String; SECTION_COUNT] {
    let words: Vec<String> = text.words().into_iter().map(str::to_uppercase).collect();

    if words.len() <= SECTION_COUNT {
        return std::array::from_fn(|i| words.get(i).cloned().unwrap_or_default());
    }

    let row_size = words.len().div_ceil(SECTION_COUNT);
    let mut chunks = words.chunks(row_size);
    std::array::from_fn(|_| chunks.next().map(|c| c.join(" ")).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> [String; SECTION_COUNT] {
        distribute_words(&SignText::from(text))
    }

    #[test]
    fn test_single_word_fills_top_section() {
        assert_eq!(rows("hello"), ["HELLO", "", ""]);
    }

    #[test]
    fn test_three_words_one_per_section() {
        assert_eq!(rows("open all night"), ["OPEN", "ALL", "NIGHT"]);
    }

    #[test]
    fn test_empty_text_gives_three_empty_rows() {
        assert_eq!(rows("   "), ["", "", ""]);
    }

    #[test]
    fn test_seven_words_split_three_three_one() {
        let out = rows("a b c d e f g");
        assert_eq!(out, ["A B C", "D E F", "G"]);
    }

    #[test]
    fn test_four_words_leave_last_section_empty() {
        // ceil(4 / 3) = 2, so the chunks are 2, 2, 0
        assert_eq!(rows("one two three four"), ["ONE TWO", "THREE FOUR", ""]);
    }

    #[test]
    fn test_eight_words_fill_every_section() {
        let out = rows("we are open late every single night here");
        assert!(out.iter().all(|row| !row.is_empty()));
        assert_eq!(out[2], "NIGHT HERE");
    }

    #[test]
    fn test_many_words_preserve_order_without_loss() {
        let input: Vec<String> = (0..17).map(|i| format!("w{i}")).collect();
        let out = distribute_words(&SignText::Lines(input.clone()));

        let rejoined: Vec<String> = out
            .iter()
            .flat_map(|row| row.split(' '))
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        let expected: Vec<String> = input.iter().map(|w| w.to_uppercase()).collect();
        assert_eq!(rejoined, expected);
    }

    #[test]
    fn test_lines_are_flattened() {
        let lines: &[&str] = &["club  night", "", "tonight"];
        assert_eq!(
            distribute_words(&SignText::from(lines)),
            ["CLUB", "NIGHT", "TONIGHT"]
        );
    }
}
