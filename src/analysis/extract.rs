//! Free-text to structured-signal extraction.
//!
//! The analysis service answers in unstructured, multilingual text with no
//! guaranteed field order or formatting. Extraction recovers the fixed
//! signal schema with ordered keyword classification: each candidate line
//! is matched against a declarative rule table, top-down, and the first
//! matching field wins the line.

use crate::types::{SignalField, SignalRecord};

/// One classification rule: a field, its keyword vocabulary, and (through
/// `display_line`) its display template.
pub struct ExtractionRule {
    pub field: SignalField,
    /// Matched by substring containment against the line key. For
    /// take-profit and stop-loss the first term is the bare abbreviation,
    /// which [`DuplicatePolicy::OverwriteTpSl`] treats specially.
    pub vocabulary: &'static [&'static str],
}

/// Classification rules in priority order. A line can populate at most
/// one field, and the earliest matching rule claims it.
///
/// Matching is substring-based, not whole-word: a vocabulary term that
/// happens to be a substring of another field's key can misclassify a
/// line. That is an accepted limitation of the heuristic.
pub const RULES: [ExtractionRule; SignalField::COUNT] = [
    ExtractionRule {
        field: SignalField::Signal,
        vocabulary: &["sinyal", "signal"],
    },
    ExtractionRule {
        field: SignalField::Entry,
        vocabulary: &["entry", "masuk", "ideal"],
    },
    ExtractionRule {
        field: SignalField::TakeProfit,
        vocabulary: &["tp", "take profit"],
    },
    ExtractionRule {
        field: SignalField::StopLoss,
        vocabulary: &["sl", "stop loss"],
    },
    ExtractionRule {
        field: SignalField::Pattern,
        vocabulary: &["pola", "pattern", "engulf", "pinbar", "doji", "double"],
    },
    ExtractionRule {
        field: SignalField::Conclusion,
        vocabulary: &["kesimpulan", "conclusion"],
    },
];

/// How repeated mentions of take-profit / stop-loss are resolved.
///
/// `KeepFirst` is the intended behavior: once a field is filled, later
/// matches are ignored. `OverwriteTpSl` reproduces a known defect of the
/// heuristic this crate re-implements: for TP and SL, a key containing the
/// bare abbreviation ("tp" / "sl") bypasses the already-filled check, so
/// the last such line wins. Kept selectable so integrators relying on the
/// observed behavior can preserve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    KeepFirst,
    OverwriteTpSl,
}

/// Keyword-driven signal extractor. Never fails: unparseable input yields
/// an empty record.
#[derive(Debug, Clone, Default)]
pub struct SignalExtractor {
    policy: DuplicatePolicy,
}

impl SignalExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    /// Extract a structured signal record from raw analysis text.
    pub fn extract(&self, text: &str) -> SignalRecord {
        // Markup emphasis and letter case are not controlled upstream
        let cleaned: String = text
            .chars()
            .filter(|c| !matches!(c, '*' | '_' | '`'))
            .collect::<String>()
            .to_lowercase();

        let mut record = SignalRecord::new();

        for line in cleaned.lines() {
            let line = line.trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            for rule in &RULES {
                if !rule.vocabulary.iter().any(|term| key.contains(term)) {
                    continue;
                }

                let bypass_filled_check = self.policy == DuplicatePolicy::OverwriteTpSl
                    && matches!(rule.field, SignalField::TakeProfit | SignalField::StopLoss)
                    && key.contains(rule.vocabulary[0]);

                if record.is_filled(rule.field) && !bypass_filled_check {
                    // The field is taken; the line may still classify as a
                    // later rule, so keep walking the table.
                    continue;
                }

                record.fill(rule.field, display_line(rule.field, value, line));
                break;
            }
        }

        record
    }
}

/// Render a matched line into its fixed display string. The pattern field
/// carries the whole line since the key prefix itself is informative.
fn display_line(field: SignalField, value: &str, whole_line: &str) -> String {
    match field {
        SignalField::Signal => format!("🔁 Sinyal: {value}"),
        SignalField::Entry => format!("🎯 Entry: {value}"),
        SignalField::TakeProfit => format!("🎯 TP: {value}"),
        SignalField::StopLoss => format!("🛑 SL: {value}"),
        SignalField::Pattern => format!("🕯️ {whole_line}"),
        SignalField::Conclusion => format!("🧠 Kesimpulan: {value}"),
    }
}
