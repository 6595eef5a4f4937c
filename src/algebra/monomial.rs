// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Exponent vector over the `2N` canonical variables `q1..qN, p1..pN`.
//!
//! Index `i < N` is the position-like variable `q_{i+1}`, index `i >= N` is its
//! conjugate momentum `p_{i-N+1}`. The length is fixed when the monomial is created
//! and every arithmetic operation keeps it.
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut, Mul, MulAssign};

/// exponent of a single canonical variable
pub type IntPower = u8;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Monomial {
    powers: Vec<IntPower>,
}

impl Monomial {
    /// monomial 1 (all exponents zero) over `2 * dof` variables
    pub fn one(dof: usize) -> Self {
        Monomial {
            powers: vec![0; 2 * dof],
        }
    }

    /// single variable with exponent 1 at `index`
    pub fn var(dof: usize, index: usize) -> Self {
        assert!(
            index < 2 * dof,
            "variable index {} out of range for {} degrees of freedom",
            index,
            dof
        );
        let mut m = Monomial::one(dof);
        m.powers[index] = 1;
        m
    }

    pub fn from_powers(powers: &[IntPower]) -> Self {
        assert!(
            powers.len() % 2 == 0,
            "exponent vector must have even length 2N, got {}",
            powers.len()
        );
        Monomial {
            powers: powers.to_vec(),
        }
    }

    /// number of degrees of freedom N
    pub fn dof(&self) -> usize {
        self.powers.len() / 2
    }

    /// number of canonical variables 2N
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    pub fn powers(&self) -> &[IntPower] {
        &self.powers
    }

    /// sum of all 2N exponents
    pub fn total_degree(&self) -> usize {
        self.powers.iter().map(|&e| e as usize).sum()
    }

    /// exponent of `q_{k+1}`
    pub fn q(&self, k: usize) -> IntPower {
        self.powers[k]
    }

    /// exponent of `p_{k+1}`
    pub fn p(&self, k: usize) -> IntPower {
        self.powers[k + self.dof()]
    }

    /// first degree of freedom whose `q` exponent is nonzero
    pub fn first_q(&self) -> Option<usize> {
        (0..self.dof()).find(|&k| self.q(k) != 0)
    }

    /// `sum_k lambda_k * (e_qk - e_pk)`; zero for resonant monomials
    pub fn resonance<T>(&self, lambda: &[T]) -> T
    where
        T: Copy + std::iter::Sum<T> + Mul<f64, Output = T>,
    {
        assert_eq!(lambda.len(), self.dof(), "frequency vector length mismatch");
        lambda
            .iter()
            .enumerate()
            .map(|(k, &l)| l * (self.q(k) as f64 - self.p(k) as f64))
            .sum()
    }
}

impl Index<usize> for Monomial {
    type Output = IntPower;

    fn index(&self, index: usize) -> &Self::Output {
        &self.powers[index]
    }
}

impl IndexMut<usize> for Monomial {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.powers[index]
    }
}

/// exponent-wise addition
impl MulAssign<&Monomial> for Monomial {
    fn mul_assign(&mut self, rhs: &Monomial) {
        assert_eq!(self.len(), rhs.len(), "monomial dimension mismatch");
        for (e, r) in self.powers.iter_mut().zip(rhs.powers.iter()) {
            *e += *r;
        }
    }
}

impl Mul<&Monomial> for Monomial {
    type Output = Monomial;

    fn mul(mut self, rhs: &Monomial) -> Monomial {
        self *= rhs;
        self
    }
}

impl Mul for &Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &Monomial) -> Monomial {
        self.clone() * rhs
    }
}

/// Canonical order: reverse-lexicographic descending, first index most significant.
/// At the first differing exponent the monomial with the larger exponent sorts first,
/// so `q1^2 < q1 q2 < q2^2 < 1`.
impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        other.powers.cmp(&self.powers)
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `q1^2 p2`; the unit monomial prints as `1`
impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.dof();
        let mut factors = Vec::new();
        for (i, &e) in self.powers.iter().enumerate() {
            if e == 0 {
                continue;
            }
            let name = if i < n {
                format!("q{}", i + 1)
            } else {
                format!("p{}", i + 1 - n)
            };
            if e > 1 {
                factors.push(format!("{}^{}", name, e));
            } else {
                factors.push(name);
            }
        }
        if factors.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", factors.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_one_and_var() {
        let one = Monomial::one(2);
        assert_eq!(one.powers(), &[0, 0, 0, 0]);
        assert_eq!(one.total_degree(), 0);
        let p1 = Monomial::var(2, 2);
        assert_eq!(p1.powers(), &[0, 0, 1, 0]);
        assert_eq!(p1.p(0), 1);
        assert_eq!(p1.q(0), 0);
    }

    #[test]
    #[should_panic]
    fn test_var_out_of_range() {
        let _ = Monomial::var(1, 2);
    }

    #[test]
    #[should_panic]
    fn test_odd_length_rejected() {
        let _ = Monomial::from_powers(&[1, 0, 2]);
    }

    #[test]
    fn test_mul_adds_exponents() {
        let a = Monomial::from_powers(&[1, 0, 2, 1]);
        let b = Monomial::from_powers(&[0, 3, 1, 0]);
        assert_eq!((&a * &b).powers(), &[1, 3, 3, 1]);
        let mut c = a.clone();
        c *= &b;
        assert_eq!(c, &a * &b);
    }

    #[test]
    fn test_mul_commutative_and_associative() {
        let a = Monomial::from_powers(&[1, 2, 0, 1]);
        let b = Monomial::from_powers(&[0, 1, 3, 0]);
        let c = Monomial::from_powers(&[2, 0, 1, 1]);
        assert_eq!(&a * &b, &b * &a);
        assert_eq!((&a * &b) * &c, &a * &(&b * &c));
    }

    #[test]
    #[should_panic]
    fn test_mul_dimension_mismatch() {
        let a = Monomial::one(1);
        let b = Monomial::one(2);
        let _ = &a * &b;
    }

    #[test]
    fn test_canonical_order() {
        let q1q1 = Monomial::from_powers(&[2, 0, 0, 0]);
        let q1q2 = Monomial::from_powers(&[1, 1, 0, 0]);
        let q2q2 = Monomial::from_powers(&[0, 2, 0, 0]);
        let one = Monomial::one(2);
        let mut v = vec![one.clone(), q2q2.clone(), q1q1.clone(), q1q2.clone()];
        v.sort();
        assert_eq!(v, vec![q1q1, q1q2, q2q2, one]);
    }

    #[test]
    fn test_hash_key() {
        let mut map: HashMap<Monomial, f64> = HashMap::new();
        map.insert(Monomial::from_powers(&[1, 0, 1, 0]), 1.0);
        *map.entry(Monomial::from_powers(&[1, 0, 1, 0])).or_insert(0.0) += 2.0;
        assert_eq!(map.len(), 1);
        assert_eq!(map[&Monomial::from_powers(&[1, 0, 1, 0])], 3.0);
    }

    #[test]
    fn test_resonance() {
        // q1^2 p2 with lambda = (1, 2) is a 2:1 resonance
        let m = Monomial::from_powers(&[2, 0, 0, 1]);
        assert_eq!(m.resonance(&[1.0, 2.0]), 0.0);
        assert_eq!(m.resonance(&[1.0, 3.0]), -1.0);
        assert_eq!(m.first_q(), Some(0));
        assert_eq!(Monomial::from_powers(&[0, 0, 1, 1]).first_q(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Monomial::from_powers(&[2, 0, 0, 1]).to_string(), "q1^2 p2");
        assert_eq!(Monomial::one(2).to_string(), "1");
    }
}
