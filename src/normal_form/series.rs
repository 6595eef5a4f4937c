// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::algebra::polynomial::Polynomial;
use crate::algebra::term::Term;
use std::ops::{Index, IndexMut};

/// Fixed-length sequence of polynomials indexed by perturbation order.
/// Slot `n` is the coefficient of `eps^n / n!` in the formal series.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderSeries {
    dof: usize,
    slots: Vec<Polynomial>,
}

impl OrderSeries {
    /// `order` empty slots
    pub fn new(dof: usize, order: usize) -> Self {
        OrderSeries {
            dof,
            slots: vec![Polynomial::zero(dof); order],
        }
    }

    /// Sorts the terms of a Hamiltonian by order: a term of total degree `d` goes to
    /// slot `d - 2`, so the quadratic part lands in slot 0. Terms of degree below 2
    /// or of degree `order + 2` and above are dropped; the second value is how many.
    pub fn from_hamiltonian(h: &Polynomial, order: usize) -> (Self, usize) {
        let mut series = OrderSeries::new(h.dof(), order);
        let mut dropped = 0;
        for (monomial, coeff) in h.iter() {
            let degree = monomial.total_degree();
            if degree >= 2 && degree - 2 < order {
                series.slots[degree - 2] += Term::from_entry((monomial, coeff));
            } else {
                dropped += 1;
            }
        }
        (series, dropped)
    }

    pub fn dof(&self) -> usize {
        self.dof
    }

    /// number of slots (the truncation order)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// every slot is the empty polynomial
    pub fn is_zero(&self) -> bool {
        self.slots.iter().all(|p| p.is_empty())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polynomial> {
        self.slots.iter()
    }

    pub fn simplify_with_tolerance(&mut self, tolerance: f64) {
        for p in self.slots.iter_mut() {
            p.simplify_with_tolerance(tolerance);
        }
    }

    /// total number of stored terms over all slots
    pub fn term_count(&self) -> usize {
        self.slots.iter().map(|p| p.len()).sum()
    }

    pub fn into_vec(self) -> Vec<Polynomial> {
        self.slots
    }
}

impl Index<usize> for OrderSeries {
    type Output = Polynomial;

    fn index(&self, index: usize) -> &Polynomial {
        &self.slots[index]
    }
}

impl IndexMut<usize> for OrderSeries {
    fn index_mut(&mut self, index: usize) -> &mut Polynomial {
        &mut self.slots[index]
    }
}

impl<'a> IntoIterator for &'a OrderSeries {
    type Item = &'a Polynomial;
    type IntoIter = std::slice::Iter<'a, Polynomial>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
