//! Sequential (Type I) analysis of variance.

mod sequential;
mod table;

pub use sequential::{sequential_anova, SequentialAnova};
pub use table::{AnovaRow, AnovaTable, ResidualRow};
