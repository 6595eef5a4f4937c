// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Birkhoff normal form of polynomial Hamiltonians near an equilibrium by Lie series.
//!
//! - [`algebra`]: monomials, terms, sparse complex polynomials and the Poisson bracket
//! - [`normal_form`]: the Deprit normalization engine and its coordinate transforms
//! - [`Utils`]: logging setup and the task document parser
//! - [`Examples`]: the Henon-Heiles example and friends
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Examples;
pub mod Utils;
pub mod algebra;
pub mod normal_form;
