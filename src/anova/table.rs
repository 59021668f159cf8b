//! Sequential ANOVA table.

use crate::core::ModelSpec;

/// One term row of a sequential ANOVA table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaRow {
    /// Term name.
    pub term: String,
    /// Sequential sum of squares: reduction in RSS when the term is added
    /// after all terms listed before it.
    pub sum_sq: f64,
    /// Degrees of freedom (1 per term).
    pub df: usize,
    /// `sum_sq / df`.
    pub mean_sq: f64,
    /// `mean_sq / residual mean square of the full model`.
    pub f_statistic: f64,
    /// Upper-tail p-value from `F(df, residual df)`.
    pub p_value: f64,
}

/// The residual row closing a sequential ANOVA table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualRow {
    /// Residual sum of squares of the full model.
    pub sum_sq: f64,
    /// Residual degrees of freedom `N - (k + 1)`.
    pub df: usize,
    /// `sum_sq / df`.
    pub mean_sq: f64,
}

/// Type I (sequential) ANOVA table.
///
/// The term sums of squares plus the residual sum of squares add up to the
/// total corrected sum of squares of the response, whatever the term order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaTable {
    model: ModelSpec,
    rows: Vec<AnovaRow>,
    residual: ResidualRow,
    corrected_total: f64,
}

impl AnovaTable {
    pub(crate) fn new(
        model: ModelSpec,
        rows: Vec<AnovaRow>,
        residual: ResidualRow,
        corrected_total: f64,
    ) -> Self {
        Self {
            model,
            rows,
            residual,
            corrected_total,
        }
    }

    /// Model the table was computed for, in term order.
    pub fn model(&self) -> &ModelSpec {
        &self.model
    }

    /// Term rows in model order.
    pub fn rows(&self) -> &[AnovaRow] {
        &self.rows
    }

    /// Residual row.
    pub fn residual(&self) -> &ResidualRow {
        &self.residual
    }

    /// Row for the named term.
    pub fn row(&self, term: &str) -> Option<&AnovaRow> {
        self.rows.iter().find(|r| r.term == term)
    }

    /// Sum of the term sums of squares.
    pub fn explained_sum_sq(&self) -> f64 {
        self.rows.iter().map(|r| r.sum_sq).sum()
    }

    /// Sum of every row of the table, residual included.
    pub fn total_sum_sq(&self) -> f64 {
        self.explained_sum_sq() + self.residual.sum_sq
    }

    /// Total corrected sum of squares of the response, computed directly.
    pub fn corrected_total(&self) -> f64 {
        self.corrected_total
    }

    /// Share of the total sum of squares attributed to the named term.
    pub fn proportion(&self, term: &str) -> Option<f64> {
        let row = self.row(term)?;
        if self.corrected_total > 0.0 {
            Some(row.sum_sq / self.corrected_total)
        } else {
            None
        }
    }
}
