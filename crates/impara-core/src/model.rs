//! Core data model types for impara.
//!
//! Verbs, nouns, and adjectives as they appear in the datasets, plus the
//! small enums (tense, person, direction, filter) every drill is keyed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of grammatical persons in a conjugation table.
pub const PERSON_COUNT: usize = 6;

/// A conjugation tense with a stored six-form table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tense {
    Present,
    Past,
    Future,
}

impl Tense {
    pub const ALL: [Tense; 3] = [Tense::Present, Tense::Past, Tense::Future];

    /// Capitalised name for headings.
    pub fn title(self) -> &'static str {
        match self {
            Tense::Present => "Present",
            Tense::Past => "Past",
            Tense::Future => "Future",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tense::Present => write!(f, "present"),
            Tense::Past => write!(f, "past"),
            Tense::Future => write!(f, "future"),
        }
    }
}

impl FromStr for Tense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" | "presente" => Ok(Tense::Present),
            "past" | "passato" => Ok(Tense::Past),
            "future" | "futuro" => Ok(Tense::Future),
            other => Err(format!("unknown tense: {other}")),
        }
    }
}

/// Grammatical person, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Person {
    Io,
    Tu,
    LuiLei,
    Noi,
    Voi,
    Loro,
}

impl Person {
    pub const ALL: [Person; PERSON_COUNT] = [
        Person::Io,
        Person::Tu,
        Person::LuiLei,
        Person::Noi,
        Person::Voi,
        Person::Loro,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Person> {
        Person::ALL.get(index).copied()
    }

    pub fn italian(self) -> &'static str {
        match self {
            Person::Io => "io",
            Person::Tu => "tu",
            Person::LuiLei => "lui/lei",
            Person::Noi => "noi",
            Person::Voi => "voi",
            Person::Loro => "loro",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Person::Io => "I",
            Person::Tu => "you (sg)",
            Person::LuiLei => "he/she/it",
            Person::Noi => "we",
            Person::Voi => "you (pl)",
            Person::Loro => "they",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.italian())
    }
}

/// Part of speech of a drilled item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pos {
    Verb,
    Noun,
    Adjective,
}

impl Pos {
    pub fn plural(self) -> &'static str {
        match self {
            Pos::Verb => "verbs",
            Pos::Noun => "nouns",
            Pos::Adjective => "adjectives",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pos::Verb => write!(f, "verb"),
            Pos::Noun => write!(f, "noun"),
            Pos::Adjective => write!(f, "adjective"),
        }
    }
}

/// Translation direction for lexical drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexDir {
    /// Given Italian, answer in English.
    #[serde(rename = "it2en")]
    It2En,
    /// Given English, answer in Italian.
    #[serde(rename = "en2it")]
    En2It,
}

impl LexDir {
    pub const ALL: [LexDir; 2] = [LexDir::It2En, LexDir::En2It];

    pub fn arrow(self) -> &'static str {
        match self {
            LexDir::It2En => "it→en",
            LexDir::En2It => "en→it",
        }
    }
}

impl fmt::Display for LexDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexDir::It2En => write!(f, "it2en"),
            LexDir::En2It => write!(f, "en2it"),
        }
    }
}

/// Which verbs a batch may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbFilter {
    Regular,
    Irregular,
    #[default]
    All,
}

impl VerbFilter {
    pub fn matches(self, verb: &Verb) -> bool {
        match self {
            VerbFilter::Regular => !verb.irregular,
            VerbFilter::Irregular => verb.irregular,
            VerbFilter::All => true,
        }
    }
}

impl fmt::Display for VerbFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbFilter::Regular => write!(f, "regular"),
            VerbFilter::Irregular => write!(f, "irregular"),
            VerbFilter::All => write!(f, "all"),
        }
    }
}

impl FromStr for VerbFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Ok(VerbFilter::Regular),
            "irregular" => Ok(VerbFilter::Irregular),
            "all" | "mixed" => Ok(VerbFilter::All),
            other => Err(format!("unknown verb filter: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Translations
// ---------------------------------------------------------------------------

/// Accepted English translations. Datasets may give one string or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TranslationRepr", into = "TranslationRepr")]
pub struct Translations(Vec<String>);

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TranslationRepr {
    One(String),
    Many(Vec<String>),
}

impl From<TranslationRepr> for Translations {
    fn from(repr: TranslationRepr) -> Self {
        let list = match repr {
            TranslationRepr::One(s) => vec![s],
            TranslationRepr::Many(v) => v,
        };
        Translations(
            list.into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

impl From<Translations> for TranslationRepr {
    fn from(t: Translations) -> Self {
        match <[String; 1]>::try_from(t.0) {
            Ok([one]) => TranslationRepr::One(one),
            Err(many) => TranslationRepr::Many(many),
        }
    }
}

impl Translations {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Translations::from(TranslationRepr::Many(
            items.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The translation shown when prompting in the en→it direction.
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// All translations joined for display, or a placeholder when none exist.
    pub fn display(&self) -> String {
        if self.0.is_empty() {
            "(no translation)".to_string()
        } else {
            self.0.join(" / ")
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset records
// ---------------------------------------------------------------------------

/// A verb with optional stored conjugation tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verb {
    /// The infinitive; also the verb's progress key.
    pub infinitive: String,
    #[serde(default)]
    pub irregular: bool,
    #[serde(default, skip_serializing_if = "Translations::is_empty")]
    pub translation: Translations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future: Option<Vec<String>>,
    /// Imperative forms for tu and voi.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imperative: Option<Vec<String>>,
}

impl Verb {
    /// Create a regular verb with no stored tables.
    pub fn new(infinitive: impl Into<String>) -> Self {
        Self {
            infinitive: infinitive.into(),
            irregular: false,
            translation: Translations::default(),
            present: None,
            past: None,
            future: None,
            imperative: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Translations::new([translation.into()]);
        self
    }

    pub fn irregular(mut self) -> Self {
        self.irregular = true;
        self
    }

    pub fn with_forms(mut self, tense: Tense, forms: &[&str]) -> Self {
        let forms = Some(forms.iter().map(|f| f.to_string()).collect());
        match tense {
            Tense::Present => self.present = forms,
            Tense::Past => self.past = forms,
            Tense::Future => self.future = forms,
        }
        self
    }

    /// Stored forms for a tense, whatever their length.
    pub fn forms(&self, tense: Tense) -> Option<&[String]> {
        match tense {
            Tense::Present => self.present.as_deref(),
            Tense::Past => self.past.as_deref(),
            Tense::Future => self.future.as_deref(),
        }
    }

    /// Whether a full six-person table is stored for the tense.
    pub fn has_complete_forms(&self, tense: Tense) -> bool {
        self.forms(tense)
            .is_some_and(|forms| forms.len() == PERSON_COUNT)
    }
}

/// Grammatical gender of a noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
}

impl Gender {
    /// Accepts `m`, `masc`, `masculine` and the feminine equivalents.
    pub fn parse_answer(answer: &str) -> Option<Gender> {
        match answer.trim().to_lowercase().as_str() {
            "m" | "masc" | "masculine" => Some(Gender::Masculine),
            "f" | "fem" | "feminine" => Some(Gender::Feminine),
            _ => None,
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Gender::Masculine => "M",
            Gender::Feminine => "F",
        }
    }
}

/// Singular and plural forms of a noun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NounForms {
    pub sg: String,
    pub pl: String,
}

/// A noun record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Noun {
    pub id: String,
    pub lemma: String,
    #[serde(default)]
    pub translation: Translations,
    pub gender: Gender,
    pub forms: NounForms,
    #[serde(default)]
    pub invariable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
}

/// The noun form a drill asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NounForm {
    Sg,
    Pl,
}

impl NounForm {
    pub fn label(self) -> &'static str {
        match self {
            NounForm::Sg => "singular",
            NounForm::Pl => "plural",
        }
    }
}

/// How an adjective inflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjectiveKind {
    Variable,
    Invariable,
    Irregular,
}

/// Where an adjective usually sits relative to its noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjectivePosition {
    Pre,
    Post,
    Variable,
}

/// One of the four agreement forms of an adjective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjForm {
    Ms,
    Mp,
    Fs,
    Fp,
}

impl AdjForm {
    pub const ALL: [AdjForm; 4] = [AdjForm::Ms, AdjForm::Mp, AdjForm::Fs, AdjForm::Fp];

    pub fn label(self) -> &'static str {
        match self {
            AdjForm::Ms => "masc sing",
            AdjForm::Mp => "masc plur",
            AdjForm::Fs => "fem sing",
            AdjForm::Fp => "fem plur",
        }
    }
}

/// Agreement forms of an adjective; any may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjectiveForms {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fp: Option<String>,
}

impl AdjectiveForms {
    pub fn get(&self, form: AdjForm) -> Option<&str> {
        let value = match form {
            AdjForm::Ms => &self.ms,
            AdjForm::Mp => &self.mp,
            AdjForm::Fs => &self.fs,
            AdjForm::Fp => &self.fp,
        };
        value.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Forms that are present, in ms/mp/fs/fp order.
    pub fn available(&self) -> Vec<AdjForm> {
        AdjForm::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_some())
            .collect()
    }
}

/// An adjective record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjective {
    pub id: String,
    pub lemma: String,
    #[serde(default)]
    pub translation: Translations,
    #[serde(rename = "type")]
    pub kind: AdjectiveKind,
    #[serde(default)]
    pub forms: AdjectiveForms,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<AdjectivePosition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Lexeme abstraction
// ---------------------------------------------------------------------------

/// Anything drilled in the translation warm-up.
pub trait Lexeme {
    /// Part of speech, selecting the progress section the item lives in.
    const POS: Pos;

    /// Stable progress key.
    fn key(&self) -> &str;

    /// The Italian headword.
    fn lemma(&self) -> &str;

    fn translations(&self) -> &Translations;
}

impl Lexeme for Verb {
    const POS: Pos = Pos::Verb;

    fn key(&self) -> &str {
        &self.infinitive
    }

    fn lemma(&self) -> &str {
        &self.infinitive
    }

    fn translations(&self) -> &Translations {
        &self.translation
    }
}

impl Lexeme for Noun {
    const POS: Pos = Pos::Noun;

    fn key(&self) -> &str {
        &self.id
    }

    fn lemma(&self) -> &str {
        &self.lemma
    }

    fn translations(&self) -> &Translations {
        &self.translation
    }
}

impl Lexeme for Adjective {
    const POS: Pos = Pos::Adjective;

    fn key(&self) -> &str {
        &self.id
    }

    fn lemma(&self) -> &str {
        &self.lemma
    }

    fn translations(&self) -> &Translations {
        &self.translation
    }
}

// ---------------------------------------------------------------------------
// Themes catalog
// ---------------------------------------------------------------------------

/// Dataset files belonging to a category, relative to the data directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryFiles {
    #[serde(default)]
    pub verbs: Vec<String>,
    #[serde(default)]
    pub nouns: Vec<String>,
    #[serde(default)]
    pub adjectives: Vec<String>,
}

/// A themed category from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub files: CategoryFiles,
}
