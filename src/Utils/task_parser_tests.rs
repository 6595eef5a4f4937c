// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
/////////////////////////////TESTS////////////////////////////////////////////////////
/*
task document tests:
complete document
defaults for optional settings
comments
missing required settings
malformed terms
file-based task
*/

#[cfg(test)]
mod tests {
    use crate::Utils::task_parser::NormalFormTask;
    use crate::algebra::monomial::Monomial;
    use crate::algebra::polynomial::DEFAULT_TOLERANCE;
    use crate::normal_form::config::NormalFormError;
    use log::LevelFilter;
    use num_complex::Complex64;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse_task(input: &str) -> NormalFormTask {
        match input.parse::<NormalFormTask>() {
            Ok(task) => task,
            Err(e) => panic!("task did not parse: {}", e),
        }
    }

    const TASK: &str = "
settings
 dof: 2
 order: 4
 tolerance: 1e-10
 threads: 2
hamiltonian
 t1: 0.0, 1.0, 1, 0, 1, 0
 t2: 0.0, 1.0, 0, 1, 0, 1
 t3: 1, 0, 2, 1, 0, 0
 t4: -0.5, 0.25, 0, 3, 0, 0
logging
 level: debug
 file: nf.log
";

    #[test]
    fn test_complete_task() {
        let task = parse_task(TASK);
        assert_eq!(task.config.dof, 2);
        assert_eq!(task.config.order, 4);
        assert_eq!(task.config.tolerance, 1e-10);
        assert_eq!(task.config.threads, 2);
        assert_eq!(task.hamiltonian.len(), 4);
        assert_eq!(
            task.hamiltonian.coeff(&Monomial::from_powers(&[2, 1, 0, 0])),
            Complex64::new(1.0, 0.0)
        );
        assert_eq!(
            task.hamiltonian.coeff(&Monomial::from_powers(&[0, 3, 0, 0])),
            Complex64::new(-0.5, 0.25)
        );
        assert_eq!(task.log_level, Some(LevelFilter::Debug));
        assert_eq!(task.log_file.as_deref(), Some("nf.log"));
    }

    #[test]
    fn test_defaults_and_comments() {
        let input = "
// one oscillator
settings
 dof: 1
 order: 3
# the quadratic part
hamiltonian
 h0: 0.0, 2.0, 1, 1
 h1: 1.0, 0.0, 3, 0
";
        let task = parse_task(input);
        assert_eq!(task.config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(task.config.threads, 0);
        assert_eq!(task.hamiltonian.len(), 2);
        assert_eq!(task.log_level, None);
        assert_eq!(task.log_file, None);
    }

    #[test]
    fn test_missing_required_settings() {
        let input = "settings\n order: 3\nhamiltonian\n h0: 1.0, 0.0, 1, 1\n";
        let err = input.parse::<NormalFormTask>().unwrap_err();
        assert_eq!(
            err,
            NormalFormError::TaskParse("settings.dof is missing".to_string())
        );
        let input = "settings\n dof: 1\nhamiltonian\n h0: 1.0, 0.0, 1, 1\n";
        assert!(input.parse::<NormalFormTask>().is_err());
        let input = "settings\n dof: 1\n order: 3\n";
        assert!(input.parse::<NormalFormTask>().is_err());
    }

    #[test]
    fn test_invalid_values() {
        // wrong number of exponents
        let input = "settings\n dof: 2\n order: 3\nhamiltonian\n h0: 1.0, 0.0, 1, 1\n";
        assert!(matches!(
            input.parse::<NormalFormTask>(),
            Err(NormalFormError::TaskParse(_))
        ));
        // negative exponent
        let input = "settings\n dof: 1\n order: 3\nhamiltonian\n h0: 1.0, 0.0, -1, 1\n";
        assert!(input.parse::<NormalFormTask>().is_err());
        // coefficient is not a number
        let input = "settings\n dof: 1\n order: 3\nhamiltonian\n h0: one, 0.0, 1, 1\n";
        assert!(input.parse::<NormalFormTask>().is_err());
        // order zero is rejected by the configuration check
        let input = "settings\n dof: 1\n order: 0\nhamiltonian\n h0: 1.0, 0.0, 1, 1\n";
        assert!(matches!(
            input.parse::<NormalFormTask>(),
            Err(NormalFormError::InvalidConfig(_))
        ));
        // unknown log level
        let input = "settings\n dof: 1\n order: 3\nhamiltonian\n h0: 1.0, 0.0, 1, 1\nlogging\n level: loud\n";
        assert!(input.parse::<NormalFormTask>().is_err());
    }

    #[test]
    fn test_task_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TASK.as_bytes()).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let task = NormalFormTask::from_file(&path).unwrap();
        assert_eq!(task, TASK.parse::<NormalFormTask>().unwrap());
        assert!(NormalFormTask::from_file("no/such/task.txt").is_err());
    }
}
