use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use super::errors::*;

lazy_static! {
    static ref STRONGS_NUMBER: Regex = Regex::new(r"^[Hh]?0*([1-9][0-9]{0,4})([a-zA-Z]?)$")
        .expect("The regex is a compile-time constant.");
}

const MAQAF: char = '\u{05BE}';
const PASEQ: char = '\u{05C0}';
const SOF_PASUQ: char = '\u{05C3}';

/// Cantillation marks and vowel points; letters stay.
fn is_mark(c: char) -> bool {
    match c {
        '\u{0591}'..='\u{05AF}' => true,
        '\u{05B0}'..='\u{05BD}' | '\u{05BF}' | '\u{05C1}' | '\u{05C2}' | '\u{05C4}' | '\u{05C5}' | '\u{05C7}' => true,
        _ => false,
    }
}

/// Consonantal form used for searching: points and accents stripped,
/// punctuation turned into spaces, whitespace collapsed.
pub fn search_key(text: &str) -> String {
    let stripped: String = text.nfd()
        .filter(|&c| !is_mark(c))
        .map(|c| match c {
            MAQAF | PASEQ | SOF_PASUQ => ' ',
            c => c,
        })
        .nfc()
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical `H430` form of a Strong's Hebrew number.
pub fn normalize_strongs(number: &str) -> Result<String> {
    let caps = try_or!(STRONGS_NUMBER.captures(number.trim()),
        else return invalid(format!("{:?} is not a Strong's Hebrew number", number)));

    Ok(format!("H{}{}", &caps[1], caps[2].to_lowercase()))
}

pub fn contains_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{05D0}'..='\u{05EA}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_points_and_accents() {
        assert_eq!(search_key("בְּרֵאשִׁ֖ית"), "בראשית");
        assert_eq!(search_key("אֱלֹהִ֑ים"), "אלהים");
    }

    #[test]
    fn maqaf_and_sof_pasuq_split_words() {
        assert_eq!(search_key("כָּל־הָאָ֖רֶץ׃"), "כל הארץ");
        assert_eq!(search_key("  שָׁלוֹם   עֲלֵיכֶם "), "שלום עליכם");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(search_key("shalom"), "shalom");
        assert_eq!(search_key("מלך"), "מלך");
    }

    #[test]
    fn strongs_normalization() {
        assert_eq!(normalize_strongs("h430").unwrap(), "H430");
        assert_eq!(normalize_strongs("H0430").unwrap(), "H430");
        assert_eq!(normalize_strongs("430").unwrap(), "H430");
        assert_eq!(normalize_strongs(" H1254A ").unwrap(), "H1254a");
        assert!(normalize_strongs("G430").is_err());
        assert!(normalize_strongs("H").is_err());
        assert!(normalize_strongs("H0").is_err());
        assert!(normalize_strongs("H123456").is_err());
    }

    #[test]
    fn detects_hebrew_letters() {
        assert!(contains_hebrew("דָּבָר"));
        assert!(!contains_hebrew("davar"));
    }
}
