// Fragment cleanup — two independent pure string transforms.
//
// Kept separate from the extraction loop so each can be tested in
// isolation: one strips section labels, the other enforces the topic
// charset. Neither trims; trimming happens once, before both run.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Matches a section label like "Unit 3:", "chapter 12-", or "Unit 4",
/// including any whitespace hugging the label. Case-insensitive.
fn label_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(unit|chapter)\s*\d+\s*[:-]?\s*").expect("label pattern compiles")
    })
}

/// Remove every occurrence of a section label from the fragment.
///
/// Note this is a substring replace, not an anchored strip: a label-looking
/// run in the middle of a fragment is removed too. Syllabi in the wild only
/// prefix labels, so in practice this only fires at the front.
pub fn strip_section_labels(fragment: &str) -> String {
    label_pattern().replace_all(fragment, "").into_owned()
}

/// Drop every character that is not a letter, digit, space, parenthesis,
/// or hyphen. Idempotent: running it twice is a no-op.
pub fn filter_charset(fragment: &str) -> String {
    fragment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '(' | ')' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unit_and_chapter_labels() {
        assert_eq!(strip_section_labels("Unit 1: Algebra"), "Algebra");
        assert_eq!(strip_section_labels("chapter 12- Geometry"), "Geometry");
        assert_eq!(strip_section_labels("Unit 4 Probability"), "Probability");
    }

    #[test]
    fn strips_labels_anywhere_in_the_fragment() {
        // Substring-replace semantics: mid-string labels go too.
        assert_eq!(strip_section_labels("Intro Unit 3: Sets"), "Intro Sets");
    }

    #[test]
    fn leaves_unlabeled_fragments_alone() {
        assert_eq!(strip_section_labels("Linear Algebra"), "Linear Algebra");
        // "unit" without a number is not a label
        assert_eq!(strip_section_labels("unit testing"), "unit testing");
    }

    #[test]
    fn filter_keeps_only_the_topic_charset() {
        assert_eq!(filter_charset("Trigonometry!!!"), "Trigonometry");
        assert_eq!(filter_charset("Graphs (BFS & DFS)"), "Graphs (BFS  DFS)");
        assert_eq!(filter_charset("C++ basics?"), "C basics");
    }

    #[test]
    fn filter_is_idempotent() {
        let once = filter_charset("Sets, maps & trees!");
        assert_eq!(filter_charset(&once), once);
    }
}
