// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Sparse polynomial algebra over the canonical variables `q1..qN, p1..pN`
//!
//! # Example
//! ```
//! use RustedBirkhoff::algebra::polynomial::Polynomial;
//! // {q1, p1} = 1
//! let q1 = Polynomial::coordinate(1, 0);
//! let p1 = Polynomial::coordinate(1, 1);
//! let one = q1.poisson_bracket(&p1);
//! assert_eq!(one.len(), 1);
//! ```
/// exponent vectors: ordering, hashing, exponent-wise product
pub mod monomial;
/// Poisson bracket: single pass over term pairs split across the rayon pool
pub mod poisson_bracket;
/// sparse map monomial -> complex coefficient, arithmetic and zero pruning
pub mod polynomial;
pub mod term;
