use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::feed::Entry;

pub const DEFAULT_LABEL_ICON: &str = "📝";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub name: String,
    pub count: usize,
}

/// Counts category terms across `entries`, most frequent first. Equal counts
/// keep the order in which the terms were first seen. At most `max` labels
/// are returned.
pub fn aggregate_labels(entries: &[Entry], max: usize) -> Vec<Label> {
    let mut labels: Vec<Label> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for term in entries.iter().flat_map(|entry| entry.terms()) {
        match index.get(term) {
            Some(&i) => labels[i].count += 1,
            None => {
                index.insert(term.to_string(), labels.len());
                labels.push(Label {
                    name: term.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable, so ties stay in first-seen order
    labels.sort_by(|a, b| b.count.cmp(&a.count));
    labels.truncate(max);
    labels
}

/// Picks an icon for a label from `icons` (label, icon) pairs. Exact
/// case-insensitive match wins, then containment either way.
pub fn label_icon<'a>(label: &str, icons: &'a [(String, String)]) -> &'a str {
    let wanted = label.to_lowercase();
    if wanted.is_empty() {
        return DEFAULT_LABEL_ICON;
    }

    let lowered: Vec<(String, &str)> = icons
        .iter()
        .map(|(key, icon)| (key.to_lowercase(), icon.as_str()))
        .collect();

    lowered
        .iter()
        .find(|(key, _)| *key == wanted)
        .or_else(|| {
            lowered
                .iter()
                .find(|(key, _)| !key.is_empty() && (wanted.contains(key.as_str()) || key.contains(&wanted)))
        })
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_LABEL_ICON)
}
