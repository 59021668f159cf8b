//! Regression diagnostics.
//!
//! - **VIF**: Variance Inflation Factor for multicollinearity detection
//!
//! # Example
//!
//! ```rust,ignore
//! use collinear_anova::diagnostics::vif;
//!
//! let factors = vif(&dataset, &["X1", "X2"])?;
//! let collinear = factors.high(5.0);
//! ```

mod vif;

pub use vif::{vif, VifCalculator, VifVector};
