//! Weighted text fragments and their normalization

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A piece of text with a positive integer weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: u64,
}

fn default_weight() -> u64 {
    1
}

impl Fragment {
    pub fn new(text: impl Into<String>, weight: u64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }

    /// Trimmed, with line feeds turned into spaces and carriage returns dropped
    pub fn cleaned_text(&self) -> String {
        self.text.trim().replace('\n', " ").replace('\r', "")
    }

    /// Fragments for each distinct string, weighted by occurrence count
    pub fn count_all<I, S>(texts: I) -> Vec<Fragment>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fragments: Vec<Fragment> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for text in texts {
            let text = text.into();
            match index.get(&text) {
                Some(&i) => fragments[i].weight += 1,
                None => {
                    index.insert(text.clone(), fragments.len());
                    fragments.push(Fragment::new(text, 1));
                }
            }
        }
        fragments
    }
}

impl<S: Into<String>> From<(S, u64)> for Fragment {
    fn from((text, weight): (S, u64)) -> Self {
        Fragment::new(text, weight)
    }
}

/// A cleaned, deduplicated fragment with its relative frequency
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFragment {
    pub text: String,
    pub weight: u64,
    /// Weight divided by the largest weight, in (0, 1]
    pub frequency: f64,
}

/// Clean, merge duplicates, order by weight and keep the heaviest `limit`.
///
/// Empty texts and zero weights are dropped. Ties keep first-seen order.
/// The first returned fragment always has frequency 1.0.
pub fn normalize(fragments: &[Fragment], limit: usize) -> Vec<NormalizedFragment> {
    let mut merged: Vec<(String, u64)> = Vec::with_capacity(fragments.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for fragment in fragments {
        let text = fragment.cleaned_text();
        if text.is_empty() || fragment.weight == 0 {
            continue;
        }
        match index.get(&text) {
            Some(&i) => merged[i].1 = merged[i].1.saturating_add(fragment.weight),
            None => {
                index.insert(text.clone(), merged.len());
                merged.push((text, fragment.weight));
            }
        }
    }

    // Stable, so equal weights stay in first-seen order
    merged.sort_by(|a, b| b.1.cmp(&a.1));
    merged.truncate(limit);

    let Some(max_weight) = merged.first().map(|(_, weight)| *weight) else {
        return Vec::new();
    };

    merged
        .into_iter()
        .map(|(text, weight)| NormalizedFragment {
            frequency: weight as f64 / max_weight as f64,
            text,
            weight,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_text() {
        let fragment = Fragment::new("  line one\nline two\r\n ", 1);
        assert_eq!(fragment.cleaned_text(), "line one line two");
    }

    #[test]
    fn test_count_all() {
        let fragments = Fragment::count_all(["a", "b", "a", "c", "a"]);
        assert_eq!(
            fragments,
            vec![
                Fragment::new("a", 3),
                Fragment::new("b", 1),
                Fragment::new("c", 1),
            ]
        );
    }

    #[test]
    fn test_normalize_merges_duplicates() {
        let fragments = [Fragment::new("hi", 1), Fragment::new(" hi ", 2)];
        let normalized = normalize(&fragments, 200);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].text, "hi");
        assert_eq!(normalized[0].weight, 3);
        assert_eq!(normalized[0].frequency, 1.0);
    }

    #[test]
    fn test_normalize_orders_and_scales() {
        let fragments = [
            Fragment::new("small", 1),
            Fragment::new("big", 4),
            Fragment::new("medium", 2),
        ];
        let normalized = normalize(&fragments, 200);
        let texts: Vec<&str> = normalized.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["big", "medium", "small"]);
        assert_eq!(normalized[0].frequency, 1.0);
        assert_eq!(normalized[1].frequency, 0.5);
        assert_eq!(normalized[2].frequency, 0.25);
    }

    #[test]
    fn test_normalize_ties_keep_input_order() {
        let fragments = [
            Fragment::new("first", 2),
            Fragment::new("second", 2),
            Fragment::new("third", 2),
        ];
        let texts: Vec<String> = normalize(&fragments, 200)
            .into_iter()
            .map(|f| f.text)
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn test_normalize_truncates() {
        let fragments: Vec<Fragment> = (1..=10)
            .map(|i| Fragment::new(format!("fragment {i}"), i))
            .collect();
        let normalized = normalize(&fragments, 3);
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].text, "fragment 10");
        assert_eq!(normalized[2].text, "fragment 8");
    }

    #[test]
    fn test_normalize_drops_blank_and_zero() {
        let fragments = [
            Fragment::new("   ", 5),
            Fragment::new("\r\n", 5),
            Fragment::new("zero", 0),
        ];
        assert!(normalize(&fragments, 200).is_empty());
    }

    #[test]
    fn test_fragment_json_default_weight() {
        let fragment: Fragment = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(fragment, Fragment::new("hello", 1));
    }
}
