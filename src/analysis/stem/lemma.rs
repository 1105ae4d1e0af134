//! Dictionary lemmatiser.
//!
//! Irregular forms are resolved through a lexicon; regular English
//! inflections (plural nouns, doubled-consonant participles) are undone by
//! rule. Anything else is returned lower-cased but otherwise unchanged.

use std::collections::HashMap;

use crate::analysis::stem::Stemmer;

/// Irregular English forms and their lemmas.
const ENGLISH_IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("is", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("goes", "go"),
    ("made", "make"),
    ("said", "say"),
    ("saw", "see"),
    ("seen", "see"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("thought", "think"),
    ("brought", "bring"),
    ("began", "begin"),
    ("begun", "begin"),
    ("wrote", "write"),
    ("written", "write"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("diagnoses", "diagnosis"),
    ("hypotheses", "hypothesis"),
    ("theses", "thesis"),
    ("bacteria", "bacterium"),
    ("larvae", "larva"),
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
];

/// Endings that look plural but are not.
const NON_PLURAL_ENDINGS: &[&str] = &["ss", "us", "is", "ous"];

/// Lemmatiser combining an irregular-form lexicon with inflection rules.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    lexicon: HashMap<String, String>,
}

impl DictionaryLemmatizer {
    /// Create a lemmatiser with the built-in English lexicon.
    pub fn english() -> Self {
        let lexicon = ENGLISH_IRREGULAR_FORMS
            .iter()
            .map(|&(form, lemma)| (form.to_string(), lemma.to_string()))
            .collect();
        DictionaryLemmatizer { lexicon }
    }

    /// Add lexicon entries, overriding built-in ones.
    pub fn with_entries<I, S, T>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        for (form, lemma) in entries {
            self.lexicon.insert(form.into().to_lowercase(), lemma.into());
        }
        self
    }

    fn apply_rules(word: &str) -> Option<String> {
        let len = word.len();

        if len > 4 && word.ends_with("ies") {
            return Some(format!("{}y", &word[..len - 3]));
        }
        if word.ends_with("sses") {
            return Some(word[..len - 2].to_string());
        }
        if ["ches", "shes", "xes", "zes"]
            .iter()
            .any(|suffix| word.ends_with(suffix))
        {
            return Some(word[..len - 2].to_string());
        }
        if len > 3
            && word.ends_with('s')
            && !NON_PLURAL_ENDINGS.iter().any(|ending| word.ends_with(ending))
        {
            return Some(word[..len - 1].to_string());
        }
        if len > 4 && word.ends_with("ied") {
            return Some(format!("{}y", &word[..len - 3]));
        }

        // "running" -> "run", "stopped" -> "stop"
        for suffix in ["ing", "ed"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.len() >= 3 && ends_with_doubled_consonant(stem) {
                    return Some(stem[..stem.len() - 1].to_string());
                }
            }
        }

        None
    }
}

fn ends_with_doubled_consonant(word: &str) -> bool {
    let mut chars = word.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(last), Some(prev)) => {
            last == prev
                && last.is_ascii_alphabetic()
                && !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u' | 'l' | 's' | 'z')
        }
        _ => false,
    }
}

impl Stemmer for DictionaryLemmatizer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if let Some(lemma) = self.lexicon.get(&word) {
            return lemma.clone();
        }

        Self::apply_rules(&word).unwrap_or(word)
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irregular_forms() {
        let lemmatizer = DictionaryLemmatizer::english();

        assert_eq!(lemmatizer.stem("was"), "be");
        assert_eq!(lemmatizer.stem("Children"), "child");
        assert_eq!(lemmatizer.stem("bacteria"), "bacterium");
    }

    #[test]
    fn test_regular_inflections() {
        let lemmatizer = DictionaryLemmatizer::english();

        assert_eq!(lemmatizer.stem("diseases"), "disease");
        assert_eq!(lemmatizer.stem("studies"), "study");
        assert_eq!(lemmatizer.stem("boxes"), "box");
        assert_eq!(lemmatizer.stem("running"), "run");
        assert_eq!(lemmatizer.stem("stopped"), "stop");
    }

    #[test]
    fn test_words_left_alone() {
        let lemmatizer = DictionaryLemmatizer::english();

        assert_eq!(lemmatizer.stem("virus"), "virus");
        assert_eq!(lemmatizer.stem("glass"), "glass");
        assert_eq!(lemmatizer.stem("famous"), "famous");
        assert_eq!(lemmatizer.stem("malaria"), "malaria");
        assert_eq!(lemmatizer.stem("falling"), "falling");
    }

    #[test]
    fn test_custom_entries() {
        let lemmatizer = DictionaryLemmatizer::english().with_entries([("agues", "ague")]);
        assert_eq!(lemmatizer.stem("agues"), "ague");
    }
}
