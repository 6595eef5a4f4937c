// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::algebra::polynomial::DEFAULT_TOLERANCE;
use std::fmt;

/// Error types for normal form computation
#[derive(Debug, Clone, PartialEq)]
pub enum NormalFormError {
    InvalidConfig(String),
    DimensionMismatch { expected: usize, found: usize },
    ThreadPool(String),
    AlreadyNormalized,
    TaskParse(String),
}

impl fmt::Display for NormalFormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalFormError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            NormalFormError::DimensionMismatch { expected, found } => write!(
                f,
                "Hamiltonian has {} degrees of freedom, configuration expects {}",
                found, expected
            ),
            NormalFormError::ThreadPool(msg) => write!(f, "Failed to build thread pool: {}", msg),
            NormalFormError::AlreadyNormalized => {
                write!(f, "normalize() was already called on this instance")
            }
            NormalFormError::TaskParse(msg) => write!(f, "Task document error: {}", msg),
        }
    }
}

impl std::error::Error for NormalFormError {}

/// Settings captured once when the engine is built.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalFormConfig {
    /// number of degrees of freedom N
    pub dof: usize,
    /// number of retained perturbation orders (series length)
    pub order: usize,
    /// zero / resonance tolerance on each coefficient component
    pub tolerance: f64,
    /// bracket worker threads, 0 means the rayon default
    pub threads: usize,
}

impl NormalFormConfig {
    pub fn new(dof: usize, order: usize) -> Self {
        NormalFormConfig {
            dof,
            order,
            tolerance: DEFAULT_TOLERANCE,
            threads: 0,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<(), NormalFormError> {
        if self.dof == 0 {
            return Err(NormalFormError::InvalidConfig(
                "number of degrees of freedom must be positive".to_string(),
            ));
        }
        if self.order == 0 {
            return Err(NormalFormError::InvalidConfig(
                "normalization order must be positive".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(NormalFormError::InvalidConfig(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for NormalFormConfig {
    /// two degrees of freedom to fifth order, as in the Henon-Heiles example
    fn default() -> Self {
        NormalFormConfig::new(2, 5)
    }
}
