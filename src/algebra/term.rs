// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::algebra::monomial::{IntPower, Monomial};
use num_complex::Complex64;
use std::ops::Mul;

/// complex coefficient times a monomial
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub coeff: Complex64,
    pub monomial: Monomial,
}

impl Term {
    pub fn new(coeff: Complex64, powers: &[IntPower]) -> Self {
        Term {
            coeff,
            monomial: Monomial::from_powers(powers),
        }
    }

    /// build from an entry of a polynomial's monomial map
    pub fn from_entry((monomial, coeff): (&Monomial, &Complex64)) -> Self {
        Term {
            coeff: *coeff,
            monomial: monomial.clone(),
        }
    }

    /// the canonical coordinate with index `index` as a term of coefficient 1
    pub fn coordinate(dof: usize, index: usize) -> Self {
        Term {
            coeff: Complex64::new(1.0, 0.0),
            monomial: Monomial::var(dof, index),
        }
    }

    pub fn constant(dof: usize, coeff: Complex64) -> Self {
        Term {
            coeff,
            monomial: Monomial::one(dof),
        }
    }
}

/// exponents add, coefficients multiply
impl Mul for &Term {
    type Output = Term;

    fn mul(self, rhs: &Term) -> Term {
        Term {
            coeff: self.coeff * rhs.coeff,
            monomial: &self.monomial * &rhs.monomial,
        }
    }
}

impl Mul for Term {
    type Output = Term;

    fn mul(self, rhs: Term) -> Term {
        &self * &rhs
    }
}
