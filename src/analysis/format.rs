//! Reply formatting for extracted signal records.

use crate::types::SignalRecord;

/// Fixed fallback shown when extraction found no fields at all.
pub const FALLBACK_REPLY: &str = "⚠️ Gagal membaca analisa.";

/// Render a signal record as one display string: the pre-rendered field
/// lines in fixed schema order, separated by blank lines. Pure function,
/// no failure mode.
pub fn format_reply(record: &SignalRecord) -> String {
    if record.is_empty() {
        return FALLBACK_REPLY.to_string();
    }
    record.iter_ordered().collect::<Vec<_>>().join("\n\n")
}
