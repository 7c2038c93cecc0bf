//! Header classification.
//!
//! Maps a section header to semantic type labels using substring rules. Each
//! [`TypeRule`] lists substrings that indicate its label and substrings that
//! rule the label out; the rules are matched against the normalized header.
//! These tables are business rules, so they can be replaced through
//! configuration (see [`crate::SectionConfig`]).

use serde::{Deserialize, Serialize};

/// Label returned when no rule applies.
pub const OTHER_TYPE: &str = "Other";

/// Lowercase the header and drop everything that is not a letter.
///
/// "Section 2: Results!" and "results" normalize to the same string.
pub fn normalize_header(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic())
        .collect()
}

/// One label and the substrings that select or exclude it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    pub label: String,
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl TypeRule {
    pub fn new(label: &str, include: &[&str], exclude: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether the rule applies to an already normalized header.
    pub fn matches(&self, normalized: &str) -> bool {
        self.include.iter().any(|s| normalized.contains(s.as_str()))
            && !self.exclude.iter().any(|s| normalized.contains(s.as_str()))
    }
}

/// Ordered collection of type rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    pub rules: Vec<TypeRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<TypeRule>) -> Self {
        Self { rules }
    }

    /// The standard table for patents and biomedical articles.
    ///
    /// Include/exclude strings are matched against normalized headers, so they
    /// contain no spaces ("studydesign", "authorscontributions").
    pub fn standard() -> Self {
        Self::new(vec![
            TypeRule::new("Results", &["result"], &[]),
            TypeRule::new("Background", &["background", "priorart", "relatedart"], &[]),
            TypeRule::new("Field", &["field"], &[]),
            TypeRule::new("Discussion", &["discuss"], &[]),
            TypeRule::new("Conclusion", &["conclu", "summary"], &["invention"]),
            TypeRule::new(
                "Methods",
                &["method", "procedure", "studydesign", "implementation", "experiment"],
                &[],
            ),
            TypeRule::new("Introduction", &["introduction"], &[]),
            TypeRule::new("Acknowledgements", &["acknowledg"], &[]),
            TypeRule::new("Authors' Contributions", &["authorscontributions"], &[]),
            TypeRule::new("Competing Interests", &["competinginterests"], &[]),
            TypeRule::new("Statistical Analysis", &["statistic"], &[]),
            TypeRule::new("Supplementary", &["supplement", "supporting"], &[]),
            TypeRule::new("Figures", &["figure", "illust", "drawing"], &[]),
            TypeRule::new("Tables", &["table"], &["abbreviat"]),
            TypeRule::new("Images", &["image"], &[]),
            TypeRule::new("Examples", &["example"], &[]),
            TypeRule::new("Abbreviations", &["abbreviat"], &[]),
            TypeRule::new("Analysis", &["analysis", "analyses"], &["statistic"]),
            TypeRule::new("Materials", &["material"], &["supplement"]),
            TypeRule::new("Prepublication History", &["prepublicationhistory"], &[]),
            TypeRule::new("Case Report", &["case"], &[]),
            TypeRule::new("Purpose", &["purpose", "objective"], &[]),
            TypeRule::new(
                "Subjects",
                &["subjects", "participants", "patient", "population"],
                &["communication"],
            ),
            TypeRule::new("Government Interest", &["government"], &[]),
            TypeRule::new("Operation", &["operation"], &[]),
            TypeRule::new("Invention", &["invention"], &["field", "background", "summary"]),
            TypeRule::new("Summary", &["summar"], &[]),
            TypeRule::new("References", &["reference"], &[]),
            TypeRule::new("Preferred Embodiments", &["preferredembodiment"], &[]),
            TypeRule::new("Abstract", &["abstract"], &["ion", "e"]),
        ])
    }

    /// Classify a raw header string.
    ///
    /// Returns every applicable label in table order, or `["Other"]` when no
    /// rule applies. Never returns an empty list.
    pub fn classify(&self, header: &str) -> Vec<String> {
        self.classify_normalized(&normalize_header(header))
    }

    /// Classify a header that has already been through [`normalize_header`].
    pub fn classify_normalized(&self, normalized: &str) -> Vec<String> {
        let labels: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(normalized))
            .map(|rule| rule.label.clone())
            .collect();
        if labels.is_empty() {
            vec![OTHER_TYPE.to_string()]
        } else {
            labels
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
