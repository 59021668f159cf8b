//! Column-oriented dataset of named predictors and a response.

use std::collections::HashSet;

use faer::{Col, Mat};

use crate::core::RegressionError;

/// Name reserved for the implicit intercept term.
pub const INTERCEPT: &str = "(Intercept)";

/// An immutable set of observations: named predictor columns plus a response.
///
/// All columns have the same length `N >= 2` and contain only finite values.
/// Predictor names are unique and keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    response: Vec<f64>,
    predictors: Vec<(String, Vec<f64>)>,
}

/// A single row of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<'a> {
    /// Response value.
    pub response: f64,
    /// Predictor values in column order.
    pub values: Vec<(&'a str, f64)>,
}

impl Observation<'_> {
    /// Value of the named predictor in this row.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, v)| v)
    }
}

impl Dataset {
    /// Create a dataset holding only a response column.
    pub fn new(response: Vec<f64>) -> Result<Self, RegressionError> {
        if response.len() < 2 {
            return Err(RegressionError::InsufficientObservations {
                needed: 2,
                got: response.len(),
            });
        }
        check_finite("response", &response)?;

        Ok(Self {
            response,
            predictors: Vec::new(),
        })
    }

    /// Create a dataset from a response and a sequence of named predictor columns.
    pub fn from_columns<I, S>(response: Vec<f64>, predictors: I) -> Result<Self, RegressionError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        predictors
            .into_iter()
            .try_fold(Self::new(response)?, |dataset, (name, values)| {
                dataset.with_predictor(name, values)
            })
    }

    /// Return a new dataset with an additional predictor column.
    pub fn with_predictor(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, RegressionError> {
        let name = name.into();

        if name.is_empty() || name == INTERCEPT {
            return Err(RegressionError::InvalidInput(format!(
                "'{name}' is not a valid predictor name"
            )));
        }
        if self.predictor(&name).is_some() {
            return Err(RegressionError::InvalidInput(format!(
                "predictor '{name}' already exists"
            )));
        }
        if values.len() != self.response.len() {
            return Err(RegressionError::DimensionMismatch {
                name,
                expected: self.response.len(),
                got: values.len(),
            });
        }
        check_finite(&name, &values)?;

        self.predictors.push((name, values));
        Ok(self)
    }

    /// Return a new dataset with the response column replaced.
    pub fn with_response(mut self, response: Vec<f64>) -> Result<Self, RegressionError> {
        if response.len() != self.response.len() {
            return Err(RegressionError::DimensionMismatch {
                name: "response".to_string(),
                expected: self.response.len(),
                got: response.len(),
            });
        }
        check_finite("response", &response)?;

        self.response = response;
        Ok(self)
    }

    /// Number of observations.
    pub fn n_observations(&self) -> usize {
        self.response.len()
    }

    /// Number of predictor columns.
    pub fn n_predictors(&self) -> usize {
        self.predictors.len()
    }

    /// Response values.
    pub fn response(&self) -> &[f64] {
        &self.response
    }

    /// Predictor names in insertion order.
    pub fn predictor_names(&self) -> impl Iterator<Item = &str> {
        self.predictors.iter().map(|(name, _)| name.as_str())
    }

    /// Values of the named predictor, if present.
    pub fn predictor(&self, name: &str) -> Option<&[f64]> {
        self.predictors
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Values of the named predictor, failing with `UnknownTerm` if absent.
    pub fn require(&self, name: &str) -> Result<&[f64], RegressionError> {
        self.predictor(name)
            .ok_or_else(|| RegressionError::UnknownTerm(name.to_string()))
    }

    /// The `i`-th observation.
    pub fn observation(&self, i: usize) -> Option<Observation<'_>> {
        let response = *self.response.get(i)?;
        let values = self
            .predictors
            .iter()
            .map(|(name, col)| (name.as_str(), col[i]))
            .collect();
        Some(Observation { response, values })
    }

    /// Response as a column vector.
    pub fn response_col(&self) -> Col<f64> {
        Col::from_fn(self.response.len(), |i| self.response[i])
    }

    /// Matrix whose columns are the named predictors, in the given order.
    ///
    /// Unknown names fail with `UnknownTerm`, repeated names with `DuplicateTerm`.
    pub fn predictor_matrix<S: AsRef<str>>(&self, names: &[S]) -> Result<Mat<f64>, RegressionError> {
        let columns = self.lookup(names)?;
        let n = self.n_observations();
        Ok(Mat::from_fn(n, columns.len(), |i, j| columns[j][i]))
    }

    /// Resolve names to their columns, validating uniqueness and existence.
    pub(crate) fn lookup<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&[f64]>, RegressionError> {
        let mut seen = HashSet::with_capacity(names.len());
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                if !seen.insert(name) {
                    return Err(RegressionError::DuplicateTerm(name.to_string()));
                }
                self.require(name)
            })
            .collect()
    }
}

fn check_finite(name: &str, values: &[f64]) -> Result<(), RegressionError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(RegressionError::InvalidInput(format!(
            "column '{name}' has a non-finite value at row {i}"
        ))),
        None => Ok(()),
    }
}
