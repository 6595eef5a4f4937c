// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Birkhoff normal form by Lie series (Deprit triangle).
//!
//! The Hamiltonian `H` is split by order, `H[n]` holding the terms of total degree
//! `n + 2`. `normalize` builds order by order the normal form `K` and the generating
//! function `S`; afterwards the forward and backward transform of every canonical
//! coordinate can be expanded from `S`. All series are coefficients of `eps^n / n!`.
//!
//! Precondition: the quadratic part `H[0]` is already diagonal, i.e. every term of it is
//! `lambda_k q_k p_k` for a single degree of freedom `k`. This is not checked; a
//! non-diagonal quadratic part silently gives wrong frequencies.
//!
//! # Example
//! ```
//! use RustedBirkhoff::algebra::polynomial::Polynomial;
//! use RustedBirkhoff::normal_form::config::NormalFormConfig;
//! use RustedBirkhoff::normal_form::normal_form_engine::NormalForm;
//! use num_complex::Complex64;
//! // H = i q p + q^2 p, one degree of freedom, three orders
//! let h = Polynomial::from_pairs(1, vec![
//!     (Complex64::new(0.0, 1.0), &[1, 1][..]),
//!     (Complex64::new(1.0, 0.0), &[2, 1][..]),
//! ]);
//! let mut nf = NormalForm::new(&h, NormalFormConfig::new(1, 3)).unwrap();
//! nf.normalize().unwrap();
//! // the cubic term is not resonant and is moved into the generating function
//! assert!(nf.normal_form()[1].is_empty());
//! assert!(!nf.generating_function()[0].is_empty());
//! let q = nf.forward_transform(0);
//! assert_eq!(q.len(), 3);
//! ```
use crate::algebra::polynomial::{Polynomial, is_zero};
use crate::algebra::term::Term;
use crate::normal_form::config::{NormalFormConfig, NormalFormError};
use crate::normal_form::series::OrderSeries;
use log::{debug, info, warn};
use num_complex::Complex64;
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};

/// resonance denominators smaller than this multiple of the tolerance are reported
const SMALL_DIVISOR_FACTOR: f64 = 1e3;

/// binomial coefficient C(n, k) by the multiplicative formula, `k <= n`
pub fn binomial(n: usize, k: usize) -> usize {
    assert!(k <= n, "binomial coefficient C({}, {}) with k > n", n, k);
    let k = k.min(n - k);
    let mut b = 1;
    for i in 1..=k {
        // exact at every step: b * (n - k + i) is divisible by i
        b = b * (n - k + i) / i;
    }
    b
}

fn real(x: usize) -> Complex64 {
    Complex64::new(x as f64, 0.0)
}

pub struct NormalForm {
    config: NormalFormConfig,
    H: OrderSeries,
    K: OrderSeries,
    S: OrderSeries,
    normalized: bool,
    pool: rayon::ThreadPool,
}

impl NormalForm {
    /// Splits `h` by order. Terms of total degree outside `2..order + 2` are dropped:
    /// the Hamiltonian is truncated at the configured order on purpose.
    pub fn new(h: &Polynomial, config: NormalFormConfig) -> Result<Self, NormalFormError> {
        config.validate()?;
        if h.dof() != config.dof {
            return Err(NormalFormError::DimensionMismatch {
                expected: config.dof,
                found: h.dof(),
            });
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| NormalFormError::ThreadPool(e.to_string()))?;
        let (H, dropped) = OrderSeries::from_hamiltonian(h, config.order);
        if dropped > 0 {
            debug!(
                "{} Hamiltonian terms outside degrees 2..{} were truncated",
                dropped,
                config.order + 1
            );
        }
        info!(
            "normal form setup: {} degrees of freedom, order {}, {} terms in H, {} bracket workers",
            config.dof,
            config.order,
            H.term_count(),
            pool.current_num_threads()
        );
        Ok(NormalForm {
            K: OrderSeries::new(config.dof, config.order),
            S: OrderSeries::new(config.dof, config.order),
            H,
            config,
            normalized: false,
            pool,
        })
    }

    pub fn config(&self) -> &NormalFormConfig {
        &self.config
    }

    /// input Hamiltonian by order
    pub fn hamiltonian(&self) -> &OrderSeries {
        &self.H
    }

    /// normal form K
    pub fn normal_form(&self) -> &OrderSeries {
        &self.K
    }

    /// generating function S; slot `n` is written while order `n + 1` is processed
    pub fn generating_function(&self) -> &OrderSeries {
        &self.S
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Frequencies `lambda_k` read off the quadratic part: for each term the first
    /// degree of freedom with a nonzero `q` exponent receives the term's coefficient.
    pub fn frequencies(&self) -> Vec<Complex64> {
        let mut lambda = vec![Complex64::new(0.0, 0.0); self.config.dof];
        for term in self.H[0].sorted_terms() {
            if let Some(k) = term.monomial.first_q() {
                lambda[k] = term.coeff;
            }
        }
        lambda
    }

    /// Computes K and S. May be called once per instance.
    pub fn normalize(&mut self) -> Result<(), NormalFormError> {
        if self.normalized {
            return Err(NormalFormError::AlreadyNormalized);
        }
        let start = Instant::now();
        info!("Get frequencies...");
        let lambda = self.frequencies();
        for (k, l) in lambda.iter().enumerate() {
            info!("lambda_{} = {}", k + 1, l);
        }
        info!("Normalization...");
        let tolerance = self.config.tolerance;
        let H = &self.H;
        let (K, S) = self
            .pool
            .install(|| Self::lie_normalize(H, &lambda, tolerance));
        self.K = K;
        self.S = S;
        self.normalized = true;
        info!(
            "normal form computed in {:?}: {} terms in K, {} terms in S",
            start.elapsed(),
            self.K.term_count(),
            self.S.term_count()
        );
        info!("\n \n NORMAL FORM TERMS \n \n {}", self.summary());
        Ok(())
    }

    /// table of term counts of H, K and S for every order
    pub fn summary(&self) -> String {
        let mut rows = vec![vec![
            "order".to_string(),
            "degree".to_string(),
            "H".to_string(),
            "K".to_string(),
            "S".to_string(),
        ]];
        for n in 0..self.config.order {
            rows.push(vec![
                n.to_string(),
                (n + 2).to_string(),
                self.H[n].len().to_string(),
                self.K[n].len().to_string(),
                self.S[n].len().to_string(),
            ]);
        }
        let mut table = Builder::from(rows).build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    /// Deprit triangle for the Hamiltonian. `L[n][i]` accumulates `i` applications of
    /// the Lie operator of the generating function found so far; `S[n-1]` is solved
    /// from the non-resonant part of `L[n][n]` and the row is then corrected by
    /// `{H[0], S[n-1]}`.
    fn lie_normalize(
        H: &OrderSeries,
        lambda: &[Complex64],
        tolerance: f64,
    ) -> (OrderSeries, OrderSeries) {
        let dof = H.dof();
        let order = H.len();
        let mut K = OrderSeries::new(dof, order);
        let mut S = OrderSeries::new(dof, order);
        let mut L: Vec<Vec<Polynomial>> = Vec::with_capacity(order);
        L.push(vec![H[0].clone()]);
        K[0] = H[0].clone();

        for n in 1..order {
            info!("{}-th order ({}-th in H)", n, n + 2);
            let mut row = vec![Polynomial::zero(dof); n + 1];
            row[0] = H[n].clone();
            for i in 1..=n {
                let mut acc = row[i - 1].clone();
                for k in 0..=(n - i) {
                    let mut ls = L[n - 1 - k][i - 1].poisson_bracket_with_tolerance(&S[k], tolerance);
                    ls.scale_in_place(real(binomial(n - i, k)), tolerance);
                    acc += &ls;
                }
                row[i] = acc;
            }

            let mut removable = 0;
            let mut resonant = 0;
            for term in row[n].sorted_terms() {
                let res = term.monomial.resonance(lambda);
                if is_zero(res, tolerance) {
                    resonant += 1;
                    continue;
                }
                if res.norm() < SMALL_DIVISOR_FACTOR * tolerance {
                    warn!(
                        "small divisor {} for {} at order {}",
                        res, term.monomial, n
                    );
                }
                S[n - 1] += Term {
                    coeff: term.coeff / res,
                    monomial: term.monomial,
                };
                removable += 1;
            }
            debug!(
                "order {}: {} removable terms, {} resonant terms",
                n, removable, resonant
            );

            let dL = H[0].poisson_bracket_with_tolerance(&S[n - 1], tolerance);
            for i in 1..=n {
                row[i] += &dL;
                row[i].simplify_with_tolerance(tolerance);
            }
            K[n] = row[n].clone();
            L.push(row);
        }
        (K, S)
    }

    fn check_coordinate(&self, i: usize) {
        assert!(
            i < 2 * self.config.dof,
            "coordinate index {} out of range for {} canonical variables",
            i,
            2 * self.config.dof
        );
    }

    /// Expansion of coordinate `i` (q's first, then p's) under the Lie transform
    /// generated by S.
    pub fn forward_transform(&self, i: usize) -> OrderSeries {
        self.check_coordinate(i);
        let tolerance = self.config.tolerance;
        let S = &self.S;
        self.pool
            .install(|| Self::forward_series(S, i, tolerance))
    }

    /// Expansion of coordinate `i` under the inverse transform.
    pub fn backward_transform(&self, i: usize) -> OrderSeries {
        self.check_coordinate(i);
        let tolerance = self.config.tolerance;
        let S = &self.S;
        self.pool
            .install(|| Self::backward_series(S, i, tolerance))
    }

    fn forward_series(S: &OrderSeries, index: usize, tolerance: f64) -> OrderSeries {
        let dof = S.dof();
        let order = S.len();
        let mut X = OrderSeries::new(dof, order);
        X[0] = Polynomial::coordinate(dof, index);
        let mut Xnj: Vec<Vec<Polynomial>> = Vec::with_capacity(order);
        Xnj.push(vec![X[0].clone()]);

        for n in 1..order {
            debug!("forward transform of x{}: order {}", index, n);
            let mut row = vec![Polynomial::zero(dof); n + 1];
            for j in 1..=n {
                let mut acc = row[j - 1].clone();
                for k in 0..=(n - j) {
                    let mut xs =
                        Xnj[j + k - 1][j - 1].poisson_bracket_with_tolerance(&S[n - (j + k)], tolerance);
                    xs.scale_in_place(real(binomial(n - j, k)), tolerance);
                    acc += &xs;
                }
                row[j] = acc;
            }
            X[n] = row[n].clone();
            X[n].simplify_with_tolerance(tolerance);
            Xnj.push(row);
        }
        X
    }

    /// Same triangle walked from the diagonal down with the sign flipped, which
    /// composes with `exp(-L_S)` instead of `exp(L_S)`.
    fn backward_series(S: &OrderSeries, index: usize, tolerance: f64) -> OrderSeries {
        let dof = S.dof();
        let order = S.len();
        let mut Y = OrderSeries::new(dof, order);
        Y[0] = Polynomial::coordinate(dof, index);
        let mut Ynj: Vec<Vec<Polynomial>> = Vec::with_capacity(order);
        Ynj.push(vec![Y[0].clone()]);

        for n in 1..order {
            debug!("backward transform of x{}: order {}", index, n);
            // row[n] stays empty
            let mut row = vec![Polynomial::zero(dof); n + 1];
            for j in (1..=n).rev() {
                let mut acc = row[j].clone();
                for k in 0..=(n - j) {
                    let mut ys = Ynj[n - k - 1][j - 1].poisson_bracket_with_tolerance(&S[k], tolerance);
                    ys.scale_in_place(real(binomial(n - j, k)), tolerance);
                    acc -= &ys;
                }
                row[j - 1] = acc;
            }
            Y[n] = row[0].clone();
            Y[n].simplify_with_tolerance(tolerance);
            Ynj.push(row);
        }
        Y
    }
}
