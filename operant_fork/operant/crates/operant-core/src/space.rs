//! Box-shaped action and observation spaces.

use crate::error::{OperantError, Result};

/// An n-dimensional box `[low_i, high_i]`, possibly unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl BoxSpace {
    /// Create a box from per-dimension bounds.
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> Result<Self> {
        if low.len() != high.len() {
            return Err(OperantError::config(
                "bounds",
                format!("low has {} dims but high has {}", low.len(), high.len()),
            ));
        }
        if let Some(i) = low.iter().zip(&high).position(|(l, h)| !(l <= h)) {
            return Err(OperantError::config(
                "bounds",
                format!("dimension {i}: low {} exceeds high {}", low[i], high[i]),
            ));
        }
        Ok(Self { low, high })
    }

    /// Box with the same bounds on every dimension.
    pub fn uniform(dim: usize, low: f64, high: f64) -> Self {
        debug_assert!(low <= high);
        Self {
            low: vec![low; dim],
            high: vec![high; dim],
        }
    }

    /// Box spanning the whole real line on every dimension.
    pub fn unbounded(dim: usize) -> Self {
        Self::uniform(dim, f64::NEG_INFINITY, f64::INFINITY)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// True when every dimension has finite bounds.
    pub fn is_bounded(&self) -> bool {
        self.low.iter().chain(&self.high).all(|b| b.is_finite())
    }

    /// Membership test. NaN is never contained.
    pub fn contains(&self, x: &[f64]) -> bool {
        self.check(x).is_ok()
    }

    /// Like [`contains`](Self::contains) but reports the first violation.
    pub fn check(&self, x: &[f64]) -> Result<()> {
        if x.len() != self.dim() {
            return Err(OperantError::ActionDimensionMismatch {
                expected: self.dim(),
                actual: x.len(),
            });
        }
        for (index, ((&value, &low), &high)) in x.iter().zip(&self.low).zip(&self.high).enumerate() {
            if !(low <= value && value <= high) {
                return Err(OperantError::InvalidAction {
                    index,
                    value,
                    low,
                    high,
                });
            }
        }
        Ok(())
    }
}
