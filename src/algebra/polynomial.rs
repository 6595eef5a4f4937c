// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Sparse polynomial in the `2N` canonical variables with complex coefficients.
//!
//! Storage is a hash map from [`Monomial`] to coefficient. Arithmetic may leave
//! near-zero coefficients behind; [`Polynomial::simplify`] prunes every entry whose
//! real and imaginary parts are both below the tolerance, and only after that call
//! does "key present" mean "term present".
//!
//! # Example
//! ```
//! use RustedBirkhoff::algebra::polynomial::Polynomial;
//! use RustedBirkhoff::algebra::term::Term;
//! use num_complex::Complex64;
//! // H = q1 p1 + 0.5 q1^2 p1 over one degree of freedom
//! let h = Polynomial::from_terms(1, vec![
//!     Term::new(Complex64::new(1.0, 0.0), &[1, 1]),
//!     Term::new(Complex64::new(0.5, 0.0), &[2, 1]),
//! ]);
//! let mut zero = &h - &h;
//! zero.simplify();
//! assert!(zero.is_empty());
//! ```
use crate::algebra::monomial::{IntPower, Monomial};
use crate::algebra::term::Term;
use num_complex::Complex64;
use std::collections::HashMap;
use std::collections::hash_map;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// absolute tolerance on each coefficient component below which a value counts as zero
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// both components strictly below `tolerance` in absolute value
pub fn is_zero(c: Complex64, tolerance: f64) -> bool {
    c.re.abs() < tolerance && c.im.abs() < tolerance
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    dof: usize,
    terms: HashMap<Monomial, Complex64>,
}

impl Polynomial {
    /// the empty polynomial over `dof` degrees of freedom
    pub fn zero(dof: usize) -> Self {
        Polynomial {
            dof,
            terms: HashMap::new(),
        }
    }

    /// sum of the given terms; coefficients at equal monomials are added
    pub fn from_terms<I>(dof: usize, terms: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        let mut p = Polynomial::zero(dof);
        for t in terms {
            p += t;
        }
        p
    }

    /// build from (coefficient, exponent array) pairs
    pub fn from_pairs<'a, I>(dof: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (Complex64, &'a [IntPower])>,
    {
        Polynomial::from_terms(
            dof,
            pairs
                .into_iter()
                .map(|(coeff, powers)| Term::new(coeff, powers)),
        )
    }

    /// the canonical coordinate `index` (q's first, then p's) as a polynomial
    pub fn coordinate(dof: usize, index: usize) -> Self {
        Polynomial::from_terms(dof, vec![Term::coordinate(dof, index)])
    }

    pub fn dof(&self) -> usize {
        self.dof
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// coefficient at `monomial`, zero if absent
    pub fn coeff(&self, monomial: &Monomial) -> Complex64 {
        self.terms
            .get(monomial)
            .copied()
            .unwrap_or(Complex64::new(0.0, 0.0))
    }

    pub fn contains(&self, monomial: &Monomial) -> bool {
        self.terms.contains_key(monomial)
    }

    /// monomial -> coefficient entries in storage (unspecified) order
    pub fn iter(&self) -> hash_map::Iter<'_, Monomial, Complex64> {
        self.terms.iter()
    }

    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.terms.iter().map(Term::from_entry)
    }

    /// all terms in canonical monomial order, for display and deterministic traversal
    pub fn sorted_terms(&self) -> Vec<Term> {
        let mut terms: Vec<Term> = self.terms().collect();
        terms.sort_by(|a, b| a.monomial.cmp(&b.monomial));
        terms
    }

    fn check_dimension(&self, monomial: &Monomial) {
        assert_eq!(
            monomial.len(),
            2 * self.dof,
            "monomial over {} variables used in a polynomial over {}",
            monomial.len(),
            2 * self.dof
        );
    }

    fn check_same_dof(&self, other: &Polynomial) {
        assert_eq!(
            self.dof, other.dof,
            "polynomials over different numbers of degrees of freedom"
        );
    }

    /// add `coeff` at `monomial`
    pub(crate) fn accumulate(&mut self, monomial: Monomial, coeff: Complex64) {
        *self
            .terms
            .entry(monomial)
            .or_insert(Complex64::new(0.0, 0.0)) += coeff;
    }

    pub fn add_term(&mut self, term: &Term) {
        self.check_dimension(&term.monomial);
        self.accumulate(term.monomial.clone(), term.coeff);
    }

    pub fn sub_term(&mut self, term: &Term) {
        self.check_dimension(&term.monomial);
        self.accumulate(term.monomial.clone(), -term.coeff);
    }

    /// Full cross product of the two term sets. Empty if either operand is empty.
    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        self.check_same_dof(other);
        let mut product = Polynomial::zero(self.dof);
        if self.is_empty() || other.is_empty() {
            return product;
        }
        for (m1, c1) in self.terms.iter() {
            for (m2, c2) in other.terms.iter() {
                product.accumulate(m1 * m2, c1 * c2);
            }
        }
        product
    }

    pub fn scale(&self, r: Complex64) -> Polynomial {
        self.scale_with_tolerance(r, DEFAULT_TOLERANCE)
    }

    /// Scalar multiple. A factor within tolerance of 0 gives the empty polynomial,
    /// a factor within tolerance of 1 returns an untouched copy.
    pub fn scale_with_tolerance(&self, r: Complex64, tolerance: f64) -> Polynomial {
        let mut p = self.clone();
        p.scale_in_place(r, tolerance);
        p
    }

    pub fn scale_in_place(&mut self, r: Complex64, tolerance: f64) {
        if is_zero(r, tolerance) {
            self.terms.clear();
            return;
        }
        if is_zero(r - Complex64::new(1.0, 0.0), tolerance) {
            return;
        }
        for c in self.terms.values_mut() {
            *c *= r;
        }
    }

    pub fn simplify(&mut self) {
        self.simplify_with_tolerance(DEFAULT_TOLERANCE);
    }

    /// drop every entry whose coefficient is zero within `tolerance`
    pub fn simplify_with_tolerance(&mut self, tolerance: f64) {
        self.terms.retain(|_, c| !is_zero(*c, tolerance));
    }

    /// Partial derivative with respect to canonical variable `j`.
    pub fn diff(&self, j: usize) -> Polynomial {
        assert!(j < 2 * self.dof, "variable index {} out of range", j);
        let mut d = Polynomial::zero(self.dof);
        for (m, c) in self.terms.iter() {
            let e = m[j];
            if e == 0 {
                continue;
            }
            let mut dm = m.clone();
            dm[j] -= 1;
            d.accumulate(dm, *c * e as f64);
        }
        d
    }

    /// `self - other` is empty after pruning with `tolerance`
    pub fn approx_eq(&self, other: &Polynomial, tolerance: f64) -> bool {
        let mut d = self - other;
        d.simplify_with_tolerance(tolerance);
        d.is_empty()
    }
}

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        self.check_same_dof(rhs);
        for (m, c) in rhs.terms.iter() {
            self.accumulate(m.clone(), *c);
        }
    }
}

impl SubAssign<&Polynomial> for Polynomial {
    fn sub_assign(&mut self, rhs: &Polynomial) {
        self.check_same_dof(rhs);
        for (m, c) in rhs.terms.iter() {
            self.accumulate(m.clone(), -*c);
        }
    }
}

impl AddAssign<Term> for Polynomial {
    fn add_assign(&mut self, rhs: Term) {
        self.check_dimension(&rhs.monomial);
        self.accumulate(rhs.monomial, rhs.coeff);
    }
}

impl SubAssign<Term> for Polynomial {
    fn sub_assign(&mut self, rhs: Term) {
        self.check_dimension(&rhs.monomial);
        self.accumulate(rhs.monomial, -rhs.coeff);
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let mut p = self.clone();
        p += rhs;
        p
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Polynomial) -> Polynomial {
        self += &rhs;
        self
    }
}

impl Add<Term> for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Term) -> Polynomial {
        self += rhs;
        self
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let mut p = self.clone();
        p -= rhs;
        p
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(mut self, rhs: Polynomial) -> Polynomial {
        self -= &rhs;
        self
    }
}

impl Sub<Term> for Polynomial {
    type Output = Polynomial;

    fn sub(mut self, rhs: Term) -> Polynomial {
        self -= rhs;
        self
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(mut self) -> Polynomial {
        for c in self.terms.values_mut() {
            *c = -*c;
        }
        self
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -self.clone()
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        self.multiply(rhs)
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        self.multiply(&rhs)
    }
}

impl Mul<Complex64> for Polynomial {
    type Output = Polynomial;

    fn mul(mut self, rhs: Complex64) -> Polynomial {
        self.scale_in_place(rhs, DEFAULT_TOLERANCE);
        self
    }
}

impl Mul<Polynomial> for Complex64 {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        rhs * self
    }
}

impl MulAssign<Complex64> for Polynomial {
    fn mul_assign(&mut self, rhs: Complex64) {
        self.scale_in_place(rhs, DEFAULT_TOLERANCE);
    }
}
