//! Checkbox state derivation for questionnaire options.

use crate::answers::{Answer, Answers};

pub const TICK: char = '\u{2612}';
pub const EMPTY: char = '\u{2610}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Checked,
    Unchecked,
}

impl Glyph {
    pub fn from_bool(checked: bool) -> Self {
        if checked { Self::Checked } else { Self::Unchecked }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Checked => TICK,
            Self::Unchecked => EMPTY,
        }
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YesNo {
    pub yes: Glyph,
    pub no: Glyph,
}

/// Leading `N.` / `N.M.` numbering of an option label, e.g. `"4.2."` for
/// `"4.2. Tak, poza gminą obecnego pobytu"`.
///
/// The prefix starts with a digit and runs over digits and periods, ending at
/// the last period of that run. Labels without such numbering have none.
pub fn option_prefix(label: &str) -> Option<&str> {
    let label = label.trim_start();
    if !label.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let run = label
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(label.len());
    let end = label[..run].rfind('.')? + 1;
    Some(&label[..end])
}

fn matches(stored: &str, label: &str, prefix: Option<&str>) -> bool {
    let stored = stored.trim().to_lowercase();
    if stored == label {
        return true;
    }
    // "4.2" and "4.2." are the same code
    prefix.is_some_and(|prefix| {
        stored.strip_suffix('.').unwrap_or(stored.as_str()) == &prefix[..prefix.len() - 1]
    })
}

/// Ticked when any stored value for `key` matches `label`.
pub fn resolve(answers: &Answers, key: &str, label: &str) -> Glyph {
    let answer = answers.get(key);
    if answer == Answer::Missing {
        return Glyph::Unchecked;
    }
    let normalized = label.trim().to_lowercase();
    let prefix = option_prefix(&normalized);
    Glyph::from_bool(
        answer
            .iter()
            .any(|stored| matches(stored, &normalized, prefix)),
    )
}

/// Gate predicate for follow-up questions: stored value is exactly `"TAK"`.
pub fn is_yes(answers: &Answers, key: &str) -> bool {
    answers.get(key).as_scalar() == Some("TAK")
}

pub fn yes_no(answers: &Answers, key: &str) -> YesNo {
    let value = answers.get(key).as_scalar();
    YesNo {
        yes: Glyph::from_bool(value == Some("TAK")),
        no: Glyph::from_bool(value == Some("NIE")),
    }
}

#[cfg(test)]
mod tests {
    use super::{Glyph, YesNo, is_yes, option_prefix, resolve, yes_no};
    use crate::answers::Answers;

    fn answers(json: &str) -> Answers {
        Answers::parse(json)
    }

    #[test]
    fn test_option_prefix() {
        assert_eq!(option_prefix("4.2. Tak, poza gminą obecnego pobytu"), Some("4.2."));
        assert_eq!(option_prefix("10.20. odmowa odpowiedzi"), Some("10.20."));
        assert_eq!(option_prefix("1. Noclegownia"), Some("1."));
        assert_eq!(option_prefix("Do 3 miesięcy"), None);
        assert_eq!(option_prefix("1\u{2013}2"), None);
        assert_eq!(option_prefix("Więcej niż 10"), None);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let a = answers(r#"{"p1_plec":"  1.2. mężczyzna "}"#);
        assert_eq!(resolve(&a, "p1_plec", "1.2. Mężczyzna"), Glyph::Checked);
        assert_eq!(resolve(&a, "p1_plec", "1.1. Kobieta"), Glyph::Unchecked);
    }

    #[test]
    fn test_compact_code_matches_verbose_label() {
        let a = answers(r#"{"p4_zameldowanie":"4.2"}"#);
        assert_eq!(
            resolve(&a, "p4_zameldowanie", "4.2. Tak, poza gminą obecnego pobytu"),
            Glyph::Checked
        );
        assert_eq!(
            resolve(&a, "p4_zameldowanie", "4.1. Tak, w gminie obecnego pobytu"),
            Glyph::Unchecked
        );
        let a = answers(r#"{"p4_zameldowanie":"4.2."}"#);
        assert_eq!(
            resolve(&a, "p4_zameldowanie", "4.2. Tak, poza gminą obecnego pobytu"),
            Glyph::Checked
        );
    }

    #[test]
    fn test_numbering_does_not_bleed_between_options() {
        let a = answers(r#"{"p9_dochody":["9.1. zatrudnienie"]}"#);
        assert_eq!(resolve(&a, "p9_dochody", "9.1. zatrudnienie"), Glyph::Checked);
        assert_eq!(resolve(&a, "p9_dochody", "9.10. nie posiadam dochodu"), Glyph::Unchecked);
        assert_eq!(resolve(&a, "p9_dochody", "9.11. odmowa odpowiedzi"), Glyph::Unchecked);
    }

    #[test]
    fn test_list_any_element() {
        let a = answers(r#"{"p9_dochody":["9.1. zatrudnienie","9.10"]}"#);
        assert_eq!(resolve(&a, "p9_dochody", "9.10. nie posiadam dochodu"), Glyph::Checked);
        assert_eq!(resolve(&a, "p9_dochody", "9.2. praca na czarno"), Glyph::Unchecked);
    }

    #[test]
    fn test_missing_key_and_unnumbered_labels() {
        let a = answers(r#"{"p13_1_2_jak_dlugo":"Od 2 do 5 lat"}"#);
        assert_eq!(resolve(&a, "nope", "Do 3 miesięcy"), Glyph::Unchecked);
        assert_eq!(resolve(&a, "p13_1_2_jak_dlugo", "Od 2 do 5 lat"), Glyph::Checked);
        assert_eq!(resolve(&a, "p13_1_2_jak_dlugo", "Od 2 do 5"), Glyph::Unchecked);
    }

    #[test]
    fn test_yes_no() {
        let a = answers(r#"{"a":"TAK","b":"NIE","c":"tak","d":["TAK"]}"#);
        assert_eq!(yes_no(&a, "a"), YesNo { yes: Glyph::Checked, no: Glyph::Unchecked });
        assert_eq!(yes_no(&a, "b"), YesNo { yes: Glyph::Unchecked, no: Glyph::Checked });
        for key in ["c", "d", "missing"] {
            assert_eq!(yes_no(&a, key), YesNo { yes: Glyph::Unchecked, no: Glyph::Unchecked });
        }
        assert!(is_yes(&a, "a"));
        assert!(!is_yes(&a, "c"));
    }

    #[test]
    fn test_glyph_chars() {
        assert_eq!(Glyph::Checked.to_string(), "\u{2612}");
        assert_eq!(Glyph::Unchecked.to_string(), "\u{2610}");
    }
}
