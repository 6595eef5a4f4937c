// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Birkhoff normal form near an equilibrium by Lie series
//!
//! # Example
//! ```
//! use RustedBirkhoff::algebra::polynomial::Polynomial;
//! use RustedBirkhoff::normal_form::config::NormalFormConfig;
//! use RustedBirkhoff::normal_form::normal_form_engine::NormalForm;
//! use num_complex::Complex64;
//! // two oscillators with frequencies i and 2i coupled by q1^2 p2 (1:2 resonance) and q1 q2^2
//! let h = Polynomial::from_pairs(2, vec![
//!     (Complex64::new(0.0, 1.0), &[1, 0, 1, 0][..]),
//!     (Complex64::new(0.0, 2.0), &[0, 1, 0, 1][..]),
//!     (Complex64::new(1.0, 0.0), &[2, 0, 0, 1][..]),
//!     (Complex64::new(1.0, 0.0), &[1, 2, 0, 0][..]),
//! ]);
//! let config = NormalFormConfig::new(2, 4).with_threads(2);
//! let mut nf = NormalForm::new(&h, config).unwrap();
//! nf.normalize().unwrap();
//! println!("K = {}", nf.normal_form());
//! println!("S = {}", nf.generating_function());
//! // q1 expressed in normal form coordinates
//! println!("q1 = {}", nf.forward_transform(0));
//! ```
/// engine settings and the error type
pub mod config;
/// normalization and the forward/backward coordinate transforms
pub mod normal_form_engine;
/// Display for polynomials and series (eps^n / n! convention)
pub mod prettyprint;
/// fixed-length sequence of polynomials indexed by perturbation order
pub mod series;
