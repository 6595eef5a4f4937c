// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Poisson bracket `{F, G} = sum_j dF/dq_j dG/dp_j - dG/dq_j dF/dp_j`.
//!
//! The bracket is computed in a single pass over term pairs. For a pair `(f, g)` and a
//! degree of freedom `j` the combinatorial factor
//! `diff = e_qj(f) e_pj(g) - e_qj(g) e_pj(f)` is exactly what differentiating and
//! multiplying would have produced, and the resulting monomial is `f * g` with the
//! `q_j` and `p_j` exponents lowered by one. No derivative polynomial is ever built.
//!
//! The pair loop is split over the terms of `F`: they are cut into contiguous chunks,
//! one per worker of the current rayon pool (the last chunk takes the remainder), every
//! worker sums its chunk against all of `G` into a private polynomial, and the partial
//! sums are merged after the join. The merge runs in chunk order and both operands are
//! walked in canonical monomial order, so the result does not depend on scheduling and
//! is bit-identical between runs with the same worker count.
use crate::algebra::polynomial::{DEFAULT_TOLERANCE, Polynomial};
use crate::algebra::term::Term;
use log::trace;
use rayon::prelude::*;

/// contiguous `[start, end)` ranges covering `0..len`, at most `workers` of them,
/// the last one absorbing the remainder
pub(crate) fn chunk_bounds(len: usize, workers: usize) -> Vec<(usize, usize)> {
    if len == 0 {
        return Vec::new();
    }
    let chunks = workers.max(1).min(len);
    let size = len / chunks;
    (0..chunks)
        .map(|i| {
            let start = i * size;
            let end = if i == chunks - 1 { len } else { start + size };
            (start, end)
        })
        .collect()
}

/// private partial sum of one chunk of `F` against all of `G`
fn bracket_chunk(f_terms: &[Term], g_terms: &[Term], dof: usize) -> Polynomial {
    let mut partial = Polynomial::zero(dof);
    for f in f_terms {
        for g in g_terms {
            let mut product = None;
            for j in 0..dof {
                let diff = f.monomial.q(j) as i64 * g.monomial.p(j) as i64
                    - g.monomial.q(j) as i64 * f.monomial.p(j) as i64;
                if diff == 0 {
                    continue;
                }
                let fg = product.get_or_insert_with(|| &f.monomial * &g.monomial);
                let mut monomial = fg.clone();
                monomial[j] -= 1;
                monomial[j + dof] -= 1;
                partial.accumulate(monomial, f.coeff * g.coeff * diff as f64);
            }
        }
    }
    partial
}

impl Polynomial {
    /// `{self, other}` pruned with the default tolerance
    pub fn poisson_bracket(&self, other: &Polynomial) -> Polynomial {
        self.poisson_bracket_with_tolerance(other, DEFAULT_TOLERANCE)
    }

    /// `{self, other}` pruned with `tolerance`; runs on the current rayon pool
    pub fn poisson_bracket_with_tolerance(&self, other: &Polynomial, tolerance: f64) -> Polynomial {
        assert_eq!(
            self.dof(),
            other.dof(),
            "Poisson bracket of polynomials over different numbers of degrees of freedom"
        );
        let dof = self.dof();
        let mut result = Polynomial::zero(dof);
        if self.is_empty() || other.is_empty() {
            return result;
        }
        let f_terms = self.sorted_terms();
        let g_terms = other.sorted_terms();
        let bounds = chunk_bounds(f_terms.len(), rayon::current_num_threads());
        trace!(
            "bracket of {} x {} terms in {} chunks",
            f_terms.len(),
            g_terms.len(),
            bounds.len()
        );
        if bounds.len() == 1 {
            result = bracket_chunk(&f_terms, &g_terms, dof);
        } else {
            let partials: Vec<Polynomial> = bounds
                .par_iter()
                .map(|&(start, end)| bracket_chunk(&f_terms[start..end], &g_terms, dof))
                .collect();
            for partial in &partials {
                result += partial;
            }
        }
        result.simplify_with_tolerance(tolerance);
        result
    }

    /// Bracket assembled from derivative polynomials. Same value as
    /// [`Polynomial::poisson_bracket_with_tolerance`], asymptotically slower; kept as a
    /// cross-check.
    pub fn poisson_bracket_reference(&self, other: &Polynomial, tolerance: f64) -> Polynomial {
        assert_eq!(self.dof(), other.dof());
        let n = self.dof();
        let mut c = Polynomial::zero(n);
        for j in 0..n {
            c += &self.diff(j).multiply(&other.diff(j + n));
            c -= &other.diff(j).multiply(&self.diff(j + n));
        }
        c.simplify_with_tolerance(tolerance);
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::monomial::Monomial;
    use num_complex::Complex64;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_chunk_bounds() {
        assert!(chunk_bounds(0, 4).is_empty());
        assert_eq!(chunk_bounds(3, 8), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(chunk_bounds(10, 3), vec![(0, 3), (3, 6), (6, 10)]);
        assert_eq!(chunk_bounds(5, 0), vec![(0, 5)]);
    }

    #[test]
    fn test_canonical_pair() {
        // {q, p} = 1, {p, q} = -1
        let q = Polynomial::coordinate(1, 0);
        let p = Polynomial::coordinate(1, 1);
        let qp = q.poisson_bracket(&p);
        assert_eq!(qp.len(), 1);
        assert_eq!(qp.coeff(&Monomial::one(1)), c(1.0));
        assert_eq!(p.poisson_bracket(&q).coeff(&Monomial::one(1)), c(-1.0));
        // different degrees of freedom commute
        let q1 = Polynomial::coordinate(2, 0);
        let p2 = Polynomial::coordinate(2, 3);
        assert!(q1.poisson_bracket(&p2).is_empty());
    }

    #[test]
    fn test_bracket_with_quadratic_part() {
        // {lambda q p, q^a p^b} = lambda (b - a) q^a p^b
        let h0 = Polynomial::from_pairs(1, vec![(c(2.0), &[1, 1][..])]);
        let g = Polynomial::from_pairs(1, vec![(c(3.0), &[3, 1][..])]);
        let b = h0.poisson_bracket(&g);
        assert_eq!(b.len(), 1);
        assert_eq!(b.coeff(&Monomial::from_powers(&[3, 1])), c(2.0 * 3.0 * (1.0 - 3.0)));
    }

    #[test]
    fn test_empty_operand() {
        let q = Polynomial::coordinate(1, 0);
        assert!(q.poisson_bracket(&Polynomial::zero(1)).is_empty());
        assert!(Polynomial::zero(1).poisson_bracket(&q).is_empty());
    }

    #[test]
    fn test_matches_reference_on_small_input() {
        let f = Polynomial::from_pairs(
            2,
            vec![
                (c(1.0), &[2, 1, 0, 0][..]),
                (c(-0.5), &[1, 0, 1, 1][..]),
                (Complex64::new(0.0, 2.0), &[0, 0, 2, 1][..]),
            ],
        );
        let g = Polynomial::from_pairs(
            2,
            vec![
                (c(3.0), &[0, 1, 1, 0][..]),
                (c(1.5), &[1, 1, 0, 2][..]),
            ],
        );
        let fast = f.poisson_bracket(&g);
        let slow = f.poisson_bracket_reference(&g, DEFAULT_TOLERANCE);
        assert!(fast.approx_eq(&slow, 1e-12));
        assert!(!fast.is_empty());
    }

    #[test]
    fn test_pool_size_does_not_change_result() {
        let powers: Vec<Vec<u8>> = (0..6u8).map(|k| vec![k, 6 - k]).collect();
        let f = Polynomial::from_pairs(
            1,
            powers
                .iter()
                .enumerate()
                .map(|(k, p)| (c(1.0 + k as f64), p.as_slice())),
        );
        let g = Polynomial::from_pairs(1, vec![(c(0.5), &[2, 1][..]), (c(-1.0), &[1, 3][..])]);
        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| f.poisson_bracket(&g));
        let multi = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| f.poisson_bracket(&g));
        assert!(single.approx_eq(&multi, 1e-12));
    }
}
