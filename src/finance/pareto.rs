use std::cmp::Ordering;

use serde::Serialize;
use utoipa::ToSchema;

/// One sector entry of a baseline, ready for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoEntry {
    pub label: String,
    pub cost: f64,
    pub selected: bool,
}

/// A ranked entry with its running cumulative cost and percentage.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankedEntry {
    #[schema(example = "UTI Adulto")]
    pub label: String,

    #[schema(example = 600.0)]
    pub cost: f64,

    pub selected: bool,

    #[schema(example = 600.0)]
    pub cumulative_cost: f64,

    #[schema(example = 60.0)]
    pub cumulative_percent: f64,
}

/// Cost-ranked distribution of a baseline's sectors.
///
/// Entries are sorted descending by cost, ties keeping their input order.
/// The focus set is the smallest prefix whose cumulative percentage first
/// reaches the threshold; with a non-positive total every cumulative
/// percentage is zero and the focus set is empty.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParetoRanking {
    pub entries: Vec<RankedEntry>,

    #[schema(example = 1000.0)]
    pub total_cost: f64,

    #[schema(example = 80.0)]
    pub focus_percent: f64,

    /// Number of leading entries in the focus set.
    #[schema(example = 2)]
    pub focus_len: usize,

    /// Combined cost of the focus set.
    #[schema(example = 900.0)]
    pub focus_cost: f64,
}

/// Rank entries descending by cost with cumulative percentages.
pub fn rank(entries: Vec<ParetoEntry>, focus_percent: f64) -> ParetoRanking {
    let mut sorted = entries;
    // stable sort keeps input order for equal costs
    sorted.sort_by(|a, b| b.cost.partial_cmp(&a.cost).unwrap_or(Ordering::Equal));

    let total_cost: f64 = sorted.iter().map(|e| e.cost).sum();

    let mut cumulative = 0.0;
    let mut focus_len = 0usize;
    let mut focus_cost = 0.0;
    let mut focus_done = total_cost <= 0.0;
    let mut ranked = Vec::with_capacity(sorted.len());

    for (i, entry) in sorted.into_iter().enumerate() {
        cumulative += entry.cost;
        let cumulative_percent = if total_cost > 0.0 {
            cumulative / total_cost * 100.0
        } else {
            0.0
        };

        if !focus_done {
            focus_len = i + 1;
            focus_cost = cumulative;
            if cumulative_percent >= focus_percent {
                focus_done = true;
            }
        }

        ranked.push(RankedEntry {
            label: entry.label,
            cost: entry.cost,
            selected: entry.selected,
            cumulative_cost: cumulative,
            cumulative_percent,
        });
    }

    ParetoRanking {
        entries: ranked,
        total_cost,
        focus_percent,
        focus_len,
        focus_cost,
    }
}

/// Rank only the selected entries, percentages relative to their own total.
pub fn rank_selected(entries: &[ParetoEntry], focus_percent: f64) -> ParetoRanking {
    let selected: Vec<ParetoEntry> = entries.iter().filter(|e| e.selected).cloned().collect();
    rank(selected, focus_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-9;

    fn entry(label: &str, cost: f64) -> ParetoEntry {
        ParetoEntry {
            label: label.to_string(),
            cost,
            selected: false,
        }
    }

    fn selected(label: &str, cost: f64) -> ParetoEntry {
        ParetoEntry {
            selected: true,
            ..entry(label, cost)
        }
    }

    #[test]
    fn ranks_descending_with_cumulative_percent() {
        let ranking = rank(
            vec![entry("a", 100.0), entry("b", 300.0), entry("c", 600.0)],
            80.0,
        );

        let labels: Vec<&str> = ranking.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["c", "b", "a"]);

        let percents: Vec<f64> = ranking.entries.iter().map(|e| e.cumulative_percent).collect();
        assert!((percents[0] - 60.0).abs() < EPS);
        assert!((percents[1] - 90.0).abs() < EPS);
        assert!((percents[2] - 100.0).abs() < EPS);

        assert_eq!(ranking.focus_len, 2);
        assert!((ranking.focus_cost - 900.0).abs() < EPS);
        assert!((ranking.total_cost - 1000.0).abs() < EPS);
    }

    #[test]
    fn cumulative_percent_is_monotonic_and_ends_at_hundred() {
        let ranking = rank(
            vec![
                entry("a", 12.5),
                entry("b", 800.0),
                entry("c", 3.25),
                entry("d", 117.0),
                entry("e", 42.0),
            ],
            80.0,
        );

        let mut previous = 0.0;
        for e in &ranking.entries {
            assert!(e.cumulative_percent >= previous);
            previous = e.cumulative_percent;
        }
        assert!((previous - 100.0).abs() < EPS);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranking = rank(
            vec![entry("first", 50.0), entry("second", 50.0), entry("third", 50.0)],
            80.0,
        );
        let labels: Vec<&str> = ranking.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn zero_total_has_no_focus_set() {
        let ranking = rank(vec![entry("a", 0.0), entry("b", 0.0)], 80.0);
        assert_eq!(ranking.focus_len, 0);
        assert_eq!(ranking.focus_cost, 0.0);
        for e in &ranking.entries {
            assert_eq!(e.cumulative_percent, 0.0);
        }
    }

    #[test]
    fn empty_input() {
        let ranking = rank(Vec::new(), 80.0);
        assert!(ranking.entries.is_empty());
        assert_eq!(ranking.focus_len, 0);
        assert_eq!(ranking.total_cost, 0.0);
    }

    #[test]
    fn single_entry_is_the_whole_focus_set() {
        let ranking = rank(vec![entry("only", 250.0)], 80.0);
        assert_eq!(ranking.focus_len, 1);
        assert!((ranking.entries[0].cumulative_percent - 100.0).abs() < EPS);
    }

    #[test]
    fn selected_subset_is_ranked_against_its_own_total() {
        let entries = vec![
            selected("a", 100.0),
            entry("b", 900.0),
            selected("c", 300.0),
        ];

        let ranking = rank_selected(&entries, 80.0);

        assert_eq!(ranking.entries.len(), 2);
        assert!((ranking.total_cost - 400.0).abs() < EPS);
        assert_eq!(ranking.entries[0].label, "c");
        assert!((ranking.entries[0].cumulative_percent - 75.0).abs() < EPS);
        assert!((ranking.entries[1].cumulative_percent - 100.0).abs() < EPS);
    }

    #[test]
    fn selection_state_does_not_affect_full_ranking() {
        let with_selection = rank(
            vec![selected("a", 100.0), entry("b", 300.0), selected("c", 600.0)],
            80.0,
        );
        let labels: Vec<&str> = with_selection.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["c", "b", "a"]);
        assert_eq!(with_selection.focus_len, 2);
    }
}
