// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::Utils::logger::init_logger;
use crate::Utils::task_parser::NormalFormTask;
use crate::algebra::polynomial::Polynomial;
use crate::algebra::term::Term;
use crate::normal_form::config::{NormalFormConfig, NormalFormError};
use crate::normal_form::normal_form_engine::NormalForm;
use log::LevelFilter;
use num_complex::Complex64;

/// Henon-Heiles Hamiltonian H = (p1^2+p2^2)/2 + (q1^2+q2^2)/2 + q1^2 q2 - q2^3/3
/// written in complex coordinates that diagonalize the linear part:
/// q_k = (Q_k + i P_k)/sqrt(2), p_k = (i Q_k + P_k)/sqrt(2)
pub fn henon_heiles_hamiltonian() -> Polynomial {
    let s = 0.5f64.sqrt();
    let re = Complex64::new(s, 0.0);
    let im = Complex64::new(0.0, s);
    // Q1, Q2, P1, P2 are the canonical coordinates 0..4
    let make = |a: Complex64, qi: usize, b: Complex64, pi: usize| {
        Polynomial::from_terms(
            2,
            vec![
                Term::coordinate(2, qi) * Term::constant(2, a),
                Term::coordinate(2, pi) * Term::constant(2, b),
            ],
        )
    };
    let q1 = make(re, 0, im, 2);
    let p1 = make(im, 0, re, 2);
    let q2 = make(re, 1, im, 3);
    let p2 = make(im, 1, re, 3);

    let quadratic = &(&(&p1 * &p1) + &(&p2 * &p2)) + &(&(&q1 * &q1) + &(&q2 * &q2));
    let cubic = &(&q1 * &q1) * &q2 - Complex64::new(1.0 / 3.0, 0.0) * (&(&q2 * &q2) * &q2);
    let mut h = Complex64::new(0.5, 0.0) * quadratic + cubic;
    h.simplify();
    h
}

/// H, K, S and every forward and backward coordinate transform, 15 digits
pub fn print_normal_form(nf: &NormalForm) {
    let dof = nf.config().dof;
    println!("H=\n{:.15}\n", nf.hamiltonian());
    println!("K=\n{:.15}\n", nf.normal_form());
    println!("S=\n{:.15}\n", nf.generating_function());
    for i in 0..2 * dof {
        println!("X{}=\n{:.15}\n", i, nf.forward_transform(i));
    }
    for i in 0..2 * dof {
        println!("Y{}=\n{:.15}\n", i, nf.backward_transform(i));
    }
}

/// normal form of the Henon-Heiles system to fifth order
pub fn henon_heiles() -> Result<NormalForm, NormalFormError> {
    let h = henon_heiles_hamiltonian();
    let mut nf = NormalForm::new(&h, NormalFormConfig::new(2, 5))?;
    nf.normalize()?;
    Ok(nf)
}

/// reads a task document, sets up logging as it asks and normalizes
pub fn run_task_file(path: &str) -> Result<NormalForm, NormalFormError> {
    let task = NormalFormTask::from_file(path)?;
    init_logger(
        task.log_level.unwrap_or(LevelFilter::Info),
        task.log_file.as_deref(),
    );
    let mut nf = NormalForm::new(&task.hamiltonian, task.config)?;
    nf.normalize()?;
    Ok(nf)
}

pub fn nf_examples(example: usize) {
    match example {
        0 => {
            // Henon-Heiles, normal form coordinates and transforms printed to the console
            init_logger(LevelFilter::Info, None);
            match henon_heiles() {
                Ok(nf) => print_normal_form(&nf),
                Err(e) => eprintln!("{}", e),
            }
        }
        1 => {
            // task document given as the first command line argument
            let Some(path) = std::env::args().nth(1) else {
                eprintln!("usage: RustedBirkhoff <task file>");
                return;
            };
            match run_task_file(&path) {
                Ok(nf) => print_normal_form(&nf),
                Err(e) => eprintln!("{}", e),
            }
        }
        2 => {
            // 1:2 resonance, the resonant cubic term q1^2 p2 survives in K
            init_logger(LevelFilter::Debug, None);
            let h = Polynomial::from_pairs(
                2,
                vec![
                    (Complex64::new(0.0, 1.0), &[1, 0, 1, 0][..]),
                    (Complex64::new(0.0, 2.0), &[0, 1, 0, 1][..]),
                    (Complex64::new(1.0, 0.0), &[2, 0, 0, 1][..]),
                    (Complex64::new(1.0, 0.0), &[0, 0, 2, 1][..]),
                    (Complex64::new(0.5, 0.0), &[1, 2, 0, 0][..]),
                ],
            );
            let result = NormalForm::new(&h, NormalFormConfig::new(2, 4).with_threads(2))
                .and_then(|mut nf| nf.normalize().map(|_| nf));
            match result {
                Ok(nf) => println!("K=\n{}\n\nS=\n{}", nf.normal_form(), nf.generating_function()),
                Err(e) => eprintln!("{}", e),
            }
        }
        _ => {
            println!("no example {}", example);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::monomial::Monomial;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_henon_heiles_hamiltonian() {
        let h = henon_heiles_hamiltonian();
        // quadratic part i (q1 p1 + q2 p2)
        let q1p1 = h.coeff(&Monomial::from_powers(&[1, 0, 1, 0]));
        assert_relative_eq!(q1p1.re, 0.0, epsilon = 1e-14);
        assert_relative_eq!(q1p1.im, 1.0, epsilon = 1e-14);
        assert!(!h.contains(&Monomial::from_powers(&[2, 0, 0, 0])));
        assert!(h.sorted_terms().iter().all(|t| {
            let d = t.monomial.total_degree();
            d == 2 || d == 3
        }));
        // Q1^2 Q2 in the original coordinates: (1/sqrt 2)^3 from q1^2 q2
        let c = h.coeff(&Monomial::from_powers(&[2, 1, 0, 0]));
        assert_relative_eq!(c.re, 0.5f64.powf(1.5), epsilon = 1e-14);
    }

    #[test]
    fn test_run_task_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "settings\n dof: 1\n order: 3\nhamiltonian\n h0: 0.0, 1.0, 1, 1\n h1: 1.0, 0.0, 3, 0\nlogging\n level: warn\n"
        )
        .unwrap();
        let nf = run_task_file(file.path().to_str().unwrap()).unwrap();
        assert!(nf.is_normalized());
        assert!(nf.normal_form()[1].is_empty());
        assert!(!nf.generating_function()[0].is_empty());
    }
}
