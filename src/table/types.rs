//! Scored results and the ranked table.

use crate::catalog::{Effect, EffectVector};
use std::cmp::Ordering;

/// The evaluation of one subset. Read-only once created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredResult {
    members: Vec<String>,
    totals: EffectVector,
    bonus_totals: EffectVector,
    bonuses: Vec<String>,
    base_score: f64,
    bonus_score: f64,
}

impl ScoredResult {
    pub(crate) fn new(
        members: Vec<String>,
        totals: EffectVector,
        bonus_totals: EffectVector,
        bonuses: Vec<String>,
        base_score: f64,
        bonus_score: f64,
    ) -> Self {
        Self {
            members,
            totals,
            bonus_totals,
            bonuses,
            base_score,
            bonus_score,
        }
    }

    /// Member names in catalog order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether `name` is a member.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Per-effect sums of the members' effect vectors.
    pub fn totals(&self) -> &EffectVector {
        &self.totals
    }

    /// One base total.
    pub fn total(&self, effect: Effect) -> f64 {
        self.totals.get(effect)
    }

    /// Per-effect sums of the unlocked bonuses' effect vectors.
    pub fn bonus_totals(&self) -> &EffectVector {
        &self.bonus_totals
    }

    /// Base total plus bonus total for one effect.
    pub fn combined(&self, effect: Effect) -> f64 {
        self.totals.get(effect) + self.bonus_totals.get(effect)
    }

    /// Unlocked bonus names in rule order.
    pub fn bonuses(&self) -> &[String] {
        &self.bonuses
    }

    /// Whether bonus `name` unlocked.
    pub fn unlocked(&self, name: &str) -> bool {
        self.bonuses.iter().any(|b| b == name)
    }

    /// Weighted base effects.
    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    /// Weighted bonus effects.
    pub fn bonus_score(&self) -> f64 {
        self.bonus_score
    }

    /// Total score: base score plus bonus score.
    pub fn score(&self) -> f64 {
        self.base_score + self.bonus_score
    }

    fn sorted_members(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Ranking order: score descending, then sorted member names ascending.
fn rank_order(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| a.sorted_members().cmp(&b.sorted_members()))
}

/// Scored subsets, best first.
///
/// Sorted by score descending; equal scores are ordered by the
/// lexicographic order of each subset's sorted member names, so a table is
/// reproducible across runs with identical inputs.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<ScoredResult>", into = "Vec<ScoredResult>")
)]
pub struct ResultTable {
    rows: Vec<ScoredResult>,
}

impl ResultTable {
    /// Sorts `rows` into ranking order.
    pub fn new(mut rows: Vec<ScoredResult>) -> Self {
        rows.sort_by(rank_order);
        Self { rows }
    }

    /// A table with no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_sorted(rows: Vec<ScoredResult>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The best row, if any.
    pub fn best(&self) -> Option<&ScoredResult> {
        self.rows.first()
    }

    /// Row at rank `i` (0-based).
    pub fn get(&self, i: usize) -> Option<&ScoredResult> {
        self.rows.get(i)
    }

    /// The first `n` rows, or all of them if fewer.
    pub fn top(&self, n: usize) -> &[ScoredResult] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// All rows in ranking order.
    pub fn as_slice(&self) -> &[ScoredResult] {
        &self.rows
    }

    /// Iterates rows in ranking order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScoredResult> {
        self.rows.iter()
    }

    /// Consumes the table, returning its rows.
    pub fn into_rows(self) -> Vec<ScoredResult> {
        self.rows
    }
}

/// Sorts into ranking order, whatever order the rows arrive in.
impl From<Vec<ScoredResult>> for ResultTable {
    fn from(rows: Vec<ScoredResult>) -> Self {
        Self::new(rows)
    }
}

impl From<ResultTable> for Vec<ScoredResult> {
    fn from(table: ResultTable) -> Self {
        table.rows
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ScoredResult;
    type IntoIter = std::slice::Iter<'a, ScoredResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ResultTable {
    type Item = ScoredResult;
    type IntoIter = std::vec::IntoIter<ScoredResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
