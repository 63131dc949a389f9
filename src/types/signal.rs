use serde::Serialize;

/// The closed set of fields a structured trading signal can carry.
///
/// Variant order is the fixed display order; extraction order never
/// changes how a record is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalField {
    Signal,
    Entry,
    TakeProfit,
    StopLoss,
    Pattern,
    Conclusion,
}

impl SignalField {
    pub const COUNT: usize = 6;

    /// Fixed schema display order.
    pub const ORDER: [SignalField; SignalField::COUNT] = [
        SignalField::Signal,
        SignalField::Entry,
        SignalField::TakeProfit,
        SignalField::StopLoss,
        SignalField::Pattern,
        SignalField::Conclusion,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SignalField::Signal => "signal",
            SignalField::Entry => "entry",
            SignalField::TakeProfit => "take_profit",
            SignalField::StopLoss => "stop_loss",
            SignalField::Pattern => "pattern",
            SignalField::Conclusion => "conclusion",
        }
    }

    fn index(self) -> usize {
        match self {
            SignalField::Signal => 0,
            SignalField::Entry => 1,
            SignalField::TakeProfit => 2,
            SignalField::StopLoss => 3,
            SignalField::Pattern => 4,
            SignalField::Conclusion => 5,
        }
    }
}

/// Structured trading signal: each field holds at most one pre-rendered
/// display string.
#[derive(Debug, Clone, Default)]
pub struct SignalRecord {
    slots: [Option<String>; SignalField::COUNT],
}

impl SignalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_filled(&self, field: SignalField) -> bool {
        self.slots[field.index()].is_some()
    }

    /// Set a field's display string, replacing any previous value.
    /// First-match-wins semantics live in the extractor, which checks
    /// `is_filled` before calling this.
    pub fn fill(&mut self, field: SignalField, text: String) {
        self.slots[field.index()] = Some(text);
    }

    pub fn get(&self, field: SignalField) -> Option<&str> {
        self.slots[field.index()].as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Filled display strings in fixed schema order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &str> {
        SignalField::ORDER
            .iter()
            .filter_map(|field| self.get(*field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // SignalField Tests
    // =========================================================================

    #[test]
    fn test_field_order_is_schema_order() {
        let keys: Vec<&str> = SignalField::ORDER.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec![
                "signal",
                "entry",
                "take_profit",
                "stop_loss",
                "pattern",
                "conclusion"
            ]
        );
    }

    // =========================================================================
    // SignalRecord Tests
    // =========================================================================

    #[test]
    fn test_record_starts_empty() {
        let record = SignalRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert!(!record.is_filled(SignalField::Signal));
    }

    #[test]
    fn test_record_fill_and_get() {
        let mut record = SignalRecord::new();
        record.fill(SignalField::Entry, "🎯 Entry: 65000".to_string());

        assert!(record.is_filled(SignalField::Entry));
        assert_eq!(record.get(SignalField::Entry), Some("🎯 Entry: 65000"));
        assert_eq!(record.len(), 1);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_iter_ordered_ignores_insertion_order() {
        let mut record = SignalRecord::new();
        record.fill(SignalField::Conclusion, "c".to_string());
        record.fill(SignalField::Signal, "a".to_string());
        record.fill(SignalField::StopLoss, "b".to_string());

        let ordered: Vec<&str> = record.iter_ordered().collect();
        assert_eq!(ordered, vec!["a", "b", "c"]);
    }
}
