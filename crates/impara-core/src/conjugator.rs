//! Expected conjugated forms.
//!
//! Stored tables always win. When a verb has no complete table for the
//! present tense and is not flagged irregular, the form is derived from the
//! infinitive ending.

use crate::model::{Person, Tense, Verb, PERSON_COUNT};

/// Regular conjugation class, by infinitive ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjugation {
    Are,
    Ere,
    Ire,
}

impl Conjugation {
    pub const ALL: [Conjugation; 3] = [Conjugation::Are, Conjugation::Ere, Conjugation::Ire];

    /// Classify an infinitive; `None` for anything not ending in -are/-ere/-ire.
    pub fn of(infinitive: &str) -> Option<Conjugation> {
        let lower = infinitive.trim().to_lowercase();
        if lower.chars().count() <= 3 {
            return None;
        }
        if lower.ends_with("are") {
            Some(Conjugation::Are)
        } else if lower.ends_with("ere") {
            Some(Conjugation::Ere)
        } else if lower.ends_with("ire") {
            Some(Conjugation::Ire)
        } else {
            None
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Conjugation::Are => "-are",
            Conjugation::Ere => "-ere",
            Conjugation::Ire => "-ire",
        }
    }

    /// Present-tense endings in person order.
    pub fn present_endings(self) -> [&'static str; PERSON_COUNT] {
        match self {
            Conjugation::Are => ["o", "i", "a", "iamo", "ate", "ano"],
            Conjugation::Ere => ["o", "i", "e", "iamo", "ete", "ono"],
            Conjugation::Ire => ["o", "i", "e", "iamo", "ite", "ono"],
        }
    }

    /// Imperative endings for tu and voi.
    pub fn imperative_endings(self) -> [&'static str; 2] {
        match self {
            Conjugation::Are => ["a", "ate"],
            Conjugation::Ere => ["i", "ete"],
            Conjugation::Ire => ["i", "ite"],
        }
    }
}

/// The form a conjugation drill expects, or `None` if nothing is stored and
/// nothing can be derived.
pub fn expected_form(verb: &Verb, tense: Tense, person: Person) -> Option<String> {
    if verb.has_complete_forms(tense) {
        return verb
            .forms(tense)
            .and_then(|forms| forms.get(person.index()))
            .cloned();
    }
    match tense {
        Tense::Present if !verb.irregular => regular_present(&verb.infinitive, person),
        _ => None,
    }
}

/// All six forms for a tense, if every one of them is known.
pub fn table(verb: &Verb, tense: Tense) -> Option<Vec<String>> {
    Person::ALL
        .iter()
        .map(|p| expected_form(verb, tense, *p))
        .collect()
}

fn stem(infinitive: &str) -> String {
    let chars: Vec<char> = infinitive.trim().chars().collect();
    chars[..chars.len() - 3].iter().collect()
}

/// Regular present tense from the infinitive ending.
///
/// `-care`/`-gare` keep the hard sound before `i` (cerchi, paghiamo) and an
/// `-i-` stem does not double its `i` (mangi, mangiamo).
pub fn regular_present(infinitive: &str, person: Person) -> Option<String> {
    let class = Conjugation::of(infinitive)?;
    let stem = stem(infinitive);
    let ending = class.present_endings()[person.index()];
    Some(join_stem(&stem, ending, class))
}

fn join_stem(stem: &str, ending: &str, class: Conjugation) -> String {
    if ending.starts_with('i') {
        if class == Conjugation::Are && (stem.ends_with('c') || stem.ends_with('g')) {
            return format!("{stem}h{ending}");
        }
        if stem.ends_with('i') {
            return format!("{stem}{}", &ending[1..]);
        }
    }
    format!("{stem}{ending}")
}

/// Imperative for `Person::Tu` or `Person::Voi`.
///
/// Uses the stored pair when present; otherwise derives it for regular verbs.
pub fn imperative(verb: &Verb, person: Person) -> Option<String> {
    let slot = match person {
        Person::Tu => 0,
        Person::Voi => 1,
        _ => return None,
    };
    if let Some(stored) = verb.imperative.as_ref().filter(|forms| forms.len() == 2) {
        return stored.get(slot).cloned();
    }
    if verb.irregular {
        return None;
    }
    let class = Conjugation::of(&verb.infinitive)?;
    Some(join_stem(
        &stem(&verb.infinitive),
        class.imperative_endings()[slot],
        class,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present_forms(infinitive: &str) -> Vec<String> {
        Person::ALL
            .iter()
            .map(|p| regular_present(infinitive, *p).unwrap())
            .collect()
    }

    #[test]
    fn regular_are() {
        assert_eq!(
            present_forms("parlare"),
            vec!["parlo", "parli", "parla", "parliamo", "parlate", "parlano"]
        );
    }

    #[test]
    fn regular_ere_and_ire() {
        assert_eq!(
            present_forms("credere"),
            vec!["credo", "credi", "crede", "crediamo", "credete", "credono"]
        );
        assert_eq!(
            present_forms("dormire"),
            vec!["dormo", "dormi", "dorme", "dormiamo", "dormite", "dormono"]
        );
    }

    #[test]
    fn hard_c_and_g_keep_h() {
        assert_eq!(regular_present("cercare", Person::Tu).unwrap(), "cerchi");
        assert_eq!(regular_present("pagare", Person::Noi).unwrap(), "paghiamo");
        assert_eq!(regular_present("pagare", Person::Io).unwrap(), "pago");
    }

    #[test]
    fn i_stem_does_not_double() {
        assert_eq!(regular_present("mangiare", Person::Tu).unwrap(), "mangi");
        assert_eq!(regular_present("mangiare", Person::Noi).unwrap(), "mangiamo");
        assert_eq!(regular_present("mangiare", Person::Voi).unwrap(), "mangiate");
    }

    #[test]
    fn unknown_endings_are_not_derived() {
        assert_eq!(regular_present("porre", Person::Io), None);
        assert_eq!(regular_present("are", Person::Io), None);
    }

    #[test]
    fn stored_forms_win() {
        let verb = Verb::new("andare")
            .irregular()
            .with_forms(Tense::Present, &["vado", "vai", "va", "andiamo", "andate", "vanno"]);
        assert_eq!(
            expected_form(&verb, Tense::Present, Person::Loro).as_deref(),
            Some("vanno")
        );
    }

    #[test]
    fn irregular_without_table_has_no_form() {
        let verb = Verb::new("essere").irregular();
        assert_eq!(expected_form(&verb, Tense::Present, Person::Io), None);
        assert!(table(&verb, Tense::Present).is_none());
    }

    #[test]
    fn incomplete_table_falls_back_to_derivation() {
        let verb = Verb::new("parlare").with_forms(Tense::Present, &["parlo"]);
        assert_eq!(
            expected_form(&verb, Tense::Present, Person::Voi).as_deref(),
            Some("parlate")
        );
        assert_eq!(expected_form(&verb, Tense::Past, Person::Io), None);
    }

    #[test]
    fn imperatives() {
        let parlare = Verb::new("parlare");
        assert_eq!(imperative(&parlare, Person::Tu).as_deref(), Some("parla"));
        assert_eq!(imperative(&parlare, Person::Voi).as_deref(), Some("parlate"));
        assert_eq!(imperative(&parlare, Person::Io), None);

        let mut andare = Verb::new("andare").irregular();
        assert_eq!(imperative(&andare, Person::Tu), None);
        andare.imperative = Some(vec!["va'".into(), "andate".into()]);
        assert_eq!(imperative(&andare, Person::Tu).as_deref(), Some("va'"));
    }
}
