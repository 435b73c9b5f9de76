//! Labelled one-dimensional summaries derived from a table column.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

/// How grouped values are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Mean,
}

/// Ordered `(label, value)` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub points: Vec<(String, f64)>,
}

impl Series {
    /// Frequency of each distinct value, most frequent first. Ties keep the
    /// order in which values were first seen.
    pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for value in values {
            match slots.get(value) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    slots.insert(value, counts.len());
                    counts.push((value, 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Self {
            points: counts
                .into_iter()
                .map(|(label, n)| (label.to_string(), n as f64))
                .collect(),
        }
    }

    /// Groups values by key and combines each group; ordered by key.
    pub fn group_by<K: Ord + Display>(pairs: impl IntoIterator<Item = (K, f64)>, agg: Aggregate) -> Self {
        let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
        for (key, value) in pairs {
            groups.entry(key).or_default().push(value);
        }

        Self {
            points: groups
                .into_iter()
                .map(|(key, values)| {
                    let sum: f64 = values.iter().sum();
                    let value = match agg {
                        Aggregate::Sum => sum,
                        // groups are never empty
                        Aggregate::Mean => sum / values.len() as f64,
                    };
                    (key.to_string(), value)
                })
                .collect(),
        }
    }

    /// Replaces every value by its share of the series total, as a percentage
    /// with two decimals.
    ///
    /// Shares are counted in hundredths of a percent: each is truncated, then
    /// the hundredths lost to truncation go one each to the largest
    /// remainders (earlier points win ties). The full set adds up to exactly
    /// 100.00.
    pub fn proportions(self) -> Self {
        let total = self.total();
        if total == 0.0 {
            return self;
        }

        let exact: Vec<f64> = self.points.iter().map(|(_, v)| v / total * 10_000.0).collect();
        let mut hundredths: Vec<u64> = exact.iter().map(|x| x.floor() as u64).collect();
        let assigned: u64 = hundredths.iter().sum();
        let leftover = 10_000u64.saturating_sub(assigned) as usize;

        let mut by_remainder: Vec<usize> = (0..exact.len()).collect();
        let remainder = |i: usize| exact[i] - exact[i].floor();
        by_remainder.sort_by(|&a, &b| remainder(b).total_cmp(&remainder(a)));
        for &i in by_remainder.iter().take(leftover) {
            hundredths[i] += 1;
        }

        Self {
            points: self
                .points
                .into_iter()
                .zip(hundredths)
                .map(|((label, _), h)| (label, h as f64 / 100.0))
                .collect(),
        }
    }

    /// First `n` points.
    pub fn head(mut self, n: usize) -> Self {
        self.points.truncate(n);
        self
    }

    /// Ascending by value; equal values keep their relative order.
    pub fn sort_by_value(mut self) -> Self {
        self.points.sort_by(|a, b| a.1.total_cmp(&b.1));
        self
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, v)| v).sum()
    }

    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|(_, v)| *v).fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|(l, _)| l.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_orders_by_frequency() {
        let s = Series::value_counts(["Betim", "Contagem", "Contagem", "Ipatinga", "Betim", "Contagem"]);
        assert_eq!(
            s.points,
            vec![
                ("Contagem".to_string(), 3.0),
                ("Betim".to_string(), 2.0),
                ("Ipatinga".to_string(), 1.0),
            ]
        );
    }

    #[test]
    fn test_proportions_round_to_two_decimals() {
        let s = Series::value_counts(["a", "b", "b"]).proportions();
        assert_eq!(s.points, vec![("b".to_string(), 66.67), ("a".to_string(), 33.33)]);
    }

    fn hundredths(s: &Series) -> Vec<i64> {
        s.points.iter().map(|(_, v)| (v * 100.0).round() as i64).collect()
    }

    #[test]
    fn test_top_n_percentages_sum_to_at_most_100() {
        let values: Vec<String> = (0..37).map(|i| format!("city{}", i % 13)).collect();
        let full = Series::value_counts(values.iter().map(String::as_str)).proportions();
        let top = full.clone().head(10);

        assert!(top.total() <= 100.0);
        assert_eq!(hundredths(&full).iter().sum::<i64>(), 10_000);
        for ((_, v), h) in full.points.iter().zip(hundredths(&full)) {
            assert_eq!(*v, h as f64 / 100.0);
        }
    }

    #[test]
    fn test_equal_shares_do_not_exceed_100() {
        let s = Series::value_counts(["a", "b", "c", "d", "e", "f"]).proportions();

        assert_eq!(hundredths(&s), vec![1667, 1667, 1667, 1667, 1666, 1666]);
        assert_eq!(hundredths(&s).iter().sum::<i64>(), 10_000);
        assert!(s.total() <= 100.0 + 1e-9);
    }

    #[test]
    fn test_group_by_mean_and_sum() {
        let pairs = vec![(2020, 30.0), (2019, 40.0), (2020, 50.0)];
        let mean = Series::group_by(pairs.clone(), Aggregate::Mean);
        assert_eq!(mean.points, vec![("2019".to_string(), 40.0), ("2020".to_string(), 40.0)]);

        let sum = Series::group_by(pairs, Aggregate::Sum);
        assert_eq!(sum.points, vec![("2019".to_string(), 40.0), ("2020".to_string(), 80.0)]);
    }

    #[test]
    fn test_sort_by_value_ascending() {
        let s = Series::value_counts(["x", "x", "y"]).sort_by_value();
        assert_eq!(s.labels(), vec!["y", "x"]);
    }
}
