// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use chrono::Local;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

/// file name used when the log file is requested as `auto`
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("normal_form_{}.log", date_and_time)
}

/// Console logger plus an optional file logger at the same level. `auto` as file name
/// gives a timestamped file. A second call, or a file that can not be created, is
/// not an error: the computation runs without that logger.
pub fn init_logger(level: LevelFilter, log_file: Option<&str>) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(name) = log_file {
        let name = if name == "auto" {
            timestamped_log_name()
        } else {
            name.to_string()
        };
        match File::create(&name) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => eprintln!("log file {} not created: {}", name, e),
        }
    }
    let _ = CombinedLogger::init(loggers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_name() {
        let name = timestamped_log_name();
        assert!(name.starts_with("normal_form_"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger(LevelFilter::Warn, None);
        init_logger(LevelFilter::Info, None);
        log::warn!("logger initialized");
    }
}
