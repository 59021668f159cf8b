//! Ordered model term lists.

use std::fmt;

use faer::Mat;

use super::RegressionError;
use crate::data::{Dataset, INTERCEPT};

/// An ordered list of predictor names plus an implicit intercept.
///
/// Order matters: sequential sums of squares attribute shared variance to
/// whichever term is listed first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSpec {
    terms: Vec<String>,
}

impl ModelSpec {
    /// Create a model from predictor names in the given order.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Intercept-only model.
    pub fn intercept_only() -> Self {
        Self { terms: Vec::new() }
    }

    /// Predictor names, excluding the intercept.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of predictor terms, excluding the intercept.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Number of estimated parameters, including the intercept.
    pub fn n_parameters(&self) -> usize {
        self.terms.len() + 1
    }

    /// Model containing only the first `len` terms.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            terms: self.terms[..len.min(self.terms.len())].to_vec(),
        }
    }

    /// Model with one more term appended.
    pub fn with_term(&self, term: impl Into<String>) -> Self {
        let mut terms = self.terms.clone();
        terms.push(term.into());
        Self { terms }
    }

    /// Model with the term order reversed.
    pub fn reversed(&self) -> Self {
        Self {
            terms: self.terms.iter().rev().cloned().collect(),
        }
    }

    /// Model with terms `i` and `j` exchanged.
    pub fn swapped(&self, i: usize, j: usize) -> Result<Self, RegressionError> {
        let k = self.terms.len();
        if i >= k || j >= k {
            return Err(RegressionError::InvalidInput(format!(
                "cannot swap terms {i} and {j} in a model with {k} terms"
            )));
        }
        let mut terms = self.terms.clone();
        terms.swap(i, j);
        Ok(Self { terms })
    }

    /// Build the design matrix `[1 | x_1 ... x_k]` for this model.
    ///
    /// Fails with `UnknownTerm` or `DuplicateTerm` when the names do not
    /// resolve to distinct predictors of `dataset`.
    pub fn design_matrix(&self, dataset: &Dataset) -> Result<Mat<f64>, RegressionError> {
        let columns = dataset.lookup(&self.terms)?;
        Ok(Mat::from_fn(
            dataset.n_observations(),
            self.n_parameters(),
            |i, j| if j == 0 { 1.0 } else { columns[j - 1][i] },
        ))
    }

    /// Names of all coefficients, intercept first.
    pub fn coefficient_names(&self) -> Vec<String> {
        std::iter::once(INTERCEPT.to_string())
            .chain(self.terms.iter().cloned())
            .collect()
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            write!(f, "y ~ 1")
        } else {
            write!(f, "y ~ {}", self.terms.join(" + "))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ModelSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
