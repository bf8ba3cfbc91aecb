//! Operator watch list
//!
//! A configured set of callsign fragments to always surface, independent of
//! DXCC novelty. Matching is literal substring containment, case-sensitive
//! unless the configuration says otherwise.

/// Immutable watch list built once from configuration.
pub struct WatchList {
    entries: Vec<String>,
    case_insensitive: bool,
}

impl WatchList {
    /// Build from configured entries.
    ///
    /// Empty entries are dropped; an empty fragment would match every spot.
    /// When case folding is on, entries are folded once here.
    pub fn new(entries: Vec<String>, case_insensitive: bool) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                if case_insensitive {
                    entry.to_ascii_uppercase()
                } else {
                    entry
                }
            })
            .collect();
        Self {
            entries,
            case_insensitive,
        }
    }

    /// Whether any watch entry is a substring of the spotted callsign.
    pub fn matches(&self, spotted: &str) -> bool {
        if self.case_insensitive {
            let folded = spotted.to_ascii_uppercase();
            self.entries.iter().any(|entry| folded.contains(entry))
        } else {
            self.entries.iter().any(|entry| spotted.contains(entry))
        }
    }
}
