//! Keyword rules that assign a category to each message.
//!
//! A [`RuleSet`] is an ordered list of `(category, keywords)` pairs parsed
//! from plain text, one rule per line:
//!
//! ```text
//! Anular Factura: anular factura
//! Anulación: anular
//! Montos: monto, importe
//! Otros:
//! ```
//!
//! # Precedence
//!
//! Rules are tried in declaration order and the **first** rule with a
//! matching keyword wins. With the rules above, "anular factura 123" is
//! classified as "Anular Factura" even though "anular" also matches
//! "Anulación". Reordering the lines changes the result.
//!
//! # Fallback
//!
//! A rule with no keywords never matches. The first such rule names the
//! fallback category, assigned when nothing else matches. Without one, the
//! fallback is [`DEFAULT_FALLBACK_CATEGORY`] (or whatever
//! [`RuleSet::with_default_fallback`] sets).
//!
//! # Keyword matching
//!
//! Comparison is case-insensitive: keywords are lower-cased when parsed and
//! bodies when classified. [`MatchMode::Substring`] (the default) is plain
//! substring containment, so "monto" also matches "montos".
//! [`MatchMode::WholeWord`] only accepts matches bounded by non-alphanumeric
//! characters.

use serde::{Deserialize, Serialize};

/// Fallback category used when the rules declare none.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Otros";

/// Rules shipped with the tool, used when no rules file is given.
pub const DEFAULT_RULES: &str = "\
Anular Factura: anular factura
Crear Factura: crear factura
Anulación: anular
Cambio de exámenes: cambio examen
Descuentos: descuento
Eliminación: eliminar, eliminación
Montos: monto, importe
Errores: error, fallo
Matrícula: matricula, matrícula
Otros:";

/// How keywords are compared against a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Keyword appears anywhere in the body.
    #[default]
    Substring,
    /// Keyword appears with no letter or digit directly before or after it.
    WholeWord,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "substring" => Ok(MatchMode::Substring),
            "whole_word" | "word" => Ok(MatchMode::WholeWord),
            _ => Err(format!(
                "Unknown match mode: '{}'. Expected one of: substring, whole_word",
                s
            )),
        }
    }
}

/// One category and its keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    category: String,
    keywords: Vec<String>,
}

impl Rule {
    /// Creates a rule. Keywords are trimmed and lower-cased; empty and
    /// repeated keywords are dropped.
    pub fn new<I, S>(category: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for kw in keywords {
            let kw = kw.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !normalized.contains(&kw) {
                normalized.push(kw);
            }
        }
        Self {
            category: category.into().trim().to_string(),
            keywords: normalized,
        }
    }

    /// Returns the category name.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the lower-cased keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns `true` if this rule has no keywords and only names a bucket.
    pub fn is_fallback(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Returns the first keyword found in `lowered_body`.
    fn find_keyword(&self, lowered_body: &str, mode: MatchMode) -> Option<&str> {
        self.keywords
            .iter()
            .find(|kw| keyword_matches(lowered_body, kw, mode))
            .map(String::as_str)
    }
}

fn keyword_matches(body: &str, keyword: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Substring => body.contains(keyword),
        MatchMode::WholeWord => body.match_indices(keyword).any(|(start, _)| {
            let before = body[..start].chars().next_back();
            let after = body[start + keyword.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        }),
    }
}

/// The rule and keyword that decided a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// Position of the rule in declaration order.
    pub index: usize,
    pub category: &'a str,
    pub keyword: &'a str,
}

/// An ordered, immutable set of classification rules.
///
/// Build it once per configuration and pass it by reference to every
/// classification; it holds no per-message state.
///
/// # Example
///
/// ```rust
/// use chataudit::core::rules::RuleSet;
///
/// let rules = RuleSet::parse("Anular Factura: anular factura\nAnulación: anular\nOtros:");
///
/// assert_eq!(rules.classify("Anular factura 123"), "Anular Factura");
/// assert_eq!(rules.classify("hay que anular"), "Anulación");
/// assert_eq!(rules.classify("buen día"), "Otros");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
    default_fallback: String,
    #[serde(default)]
    mode: MatchMode,
}

impl RuleSet {
    /// Creates a rule set from rules in precedence order.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            default_fallback: DEFAULT_FALLBACK_CATEGORY.to_string(),
            mode: MatchMode::default(),
        }
    }

    /// Creates a rule set without rules; everything falls back.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parses rule text, one `Name: kw1, kw2` rule per line.
    ///
    /// Lines without a colon or with an empty name are ignored. Nothing
    /// after the colon declares a keyword-less fallback bucket.
    pub fn parse(text: &str) -> Self {
        let mut rules = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let Some((name, keywords)) = line.split_once(':') else {
                if !line.trim().is_empty() {
                    tracing::debug!(line = idx + 1, "ignoring rule line without ':'");
                }
                continue;
            };

            let name = name.trim();
            if name.is_empty() {
                tracing::debug!(line = idx + 1, "ignoring rule line with empty category name");
                continue;
            }

            rules.push(Rule::new(name, keywords.split(',')));
        }

        tracing::debug!(rules = rules.len(), "parsed rule set");
        Self::new(rules)
    }

    /// Sets the fallback used when no keyword-less rule is declared.
    #[must_use]
    pub fn with_default_fallback(mut self, name: impl Into<String>) -> Self {
        self.default_fallback = name.into();
        self
    }

    /// Sets the keyword matching policy.
    #[must_use]
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the rules in precedence order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the keyword matching policy.
    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the fallback category: the first keyword-less rule, or the
    /// default fallback name.
    pub fn fallback(&self) -> &str {
        self.rules
            .iter()
            .find(|r| r.is_fallback())
            .map_or(self.default_fallback.as_str(), |r| r.category())
    }

    /// Returns category names in declaration order, without repeats,
    /// including the fallback.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !names.contains(&rule.category()) {
                names.push(rule.category());
            }
        }
        let fallback = self.fallback();
        if !names.contains(&fallback) {
            names.push(fallback);
        }
        names
    }

    /// Returns the rule and keyword that classify `body`, or `None` if the
    /// body falls back.
    pub fn explain(&self, body: &str) -> Option<RuleMatch<'_>> {
        let lowered = body.to_lowercase();
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.find_keyword(&lowered, self.mode).map(|keyword| RuleMatch {
                index,
                category: rule.category(),
                keyword,
            })
        })
    }

    /// Returns the category of `body`.
    pub fn classify(&self, body: &str) -> &str {
        self.explain(body)
            .map_or_else(|| self.fallback(), |m| m.category)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::parse(DEFAULT_RULES)
    }
}
