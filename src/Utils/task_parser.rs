// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
/// pairs key-vector of values, and read a normalization task from it.
///
/// A task document has three sections:
/// ```text
/// settings
///  dof: 2
///  order: 5
///  tolerance: 1e-8
///  threads: 4
/// hamiltonian
///  t1: 0.0, 1.0, 1, 0, 1, 0
///  t2: 0.0, 1.0, 0, 1, 0, 1
///  t3: 1.0, 0.0, 2, 1, 0, 0
/// logging
///  level: info
///  file: normal_form.log
/// ```
/// Every key of `hamiltonian` is one term: real part, imaginary part and then the `2N`
/// exponents (q's first, then p's). Key names are free. `dof` and `order` are required;
/// the rest of `settings` and the whole `logging` section are optional.
/// Lines starting with //, #, % or ; are comments, and so is anything after //.
use crate::algebra::monomial::IntPower;
use crate::algebra::polynomial::Polynomial;
use crate::algebra::term::Term;
use crate::normal_form::config::{NormalFormConfig, NormalFormError};
use log::LevelFilter;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use num_complex::Complex64;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Option<Vec<Value>>>;
/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// floats and integers alike
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// Parses a title (word characters without spaces)
pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    let (input, result) = parser.parse(input)?;
    // Ignore trailing whitespace and newline characters
    Ok((input.trim(), result))
}

/// Parses a key (word characters without spaces)
pub(crate) fn parse_key(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    // a single value ends at a comma, whitespace, newline or semicolon
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        let s = s.trim();
        // Try parsing as different types in order
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = s.parse::<f64>() {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

pub(crate) fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = multispace0(input)?;
    // delimited drops the spaces around every comma
    let separator_coma = delimited(space0, tag(","), space0);
    let mut value_parser = separated_list0(separator_coma, parse_value);
    value_parser.parse(input)
}

/// Parses a key-value pair where value is a list
pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section with a title and multiple key-value pairs
pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;

    let mut section_map = HashMap::new();
    for (key, values) in pairs {
        section_map.insert(key, values);
    }
    Ok((input, (title, section_map)))
}

/// Filters out comment lines (starting with //, #, %, or ;), trailing // comments and
/// blank lines
pub(crate) fn filter_comments(input: &str) -> String {
    input
        .lines()
        .map(|line| line.split("//").next().unwrap_or(line).trim_end())
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into a HashMap
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;

    let mut result = HashMap::new();
    for (title, section_map) in sections.into_iter() {
        let mut title_map = HashMap::new();
        for (key, values) in section_map {
            title_map.insert(key, Some(values));
        }
        result.insert(title, title_map);
    }
    Ok((input, result))
}

/// Parses a document with comments removed. Every title and key of `template` is present
/// in the result, the ones missing from the document as `None`.
pub fn parse_document_as(input: &str, template: Option<DocumentMap>) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    let mut parsed = match parse_document(&filtered) {
        Ok((remaining, parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            parsed
        }
        Err(e) => return Err(format!("Parsing error: {:?}", e)),
    };
    if let Some(template) = template {
        for (title, keys_map) in template {
            let section_map = parsed.entry(title).or_default();
            for key in keys_map.into_keys() {
                section_map.entry(key).or_insert(None);
            }
        }
    }
    Ok(parsed)
}

/// A normalization job read from a task document.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalFormTask {
    pub config: NormalFormConfig,
    pub hamiltonian: Polynomial,
    pub log_level: Option<LevelFilter>,
    pub log_file: Option<String>,
}

fn task_error(msg: impl Into<String>) -> NormalFormError {
    NormalFormError::TaskParse(msg.into())
}

fn task_template() -> DocumentMap {
    let mut template = HashMap::new();
    let settings: SectionMap = ["dof", "order", "tolerance", "threads"]
        .iter()
        .map(|k| (k.to_string(), None))
        .collect();
    let logging: SectionMap = ["level", "file"]
        .iter()
        .map(|k| (k.to_string(), None))
        .collect();
    template.insert("settings".to_string(), settings);
    template.insert("hamiltonian".to_string(), HashMap::new());
    template.insert("logging".to_string(), logging);
    template
}

/// first value of `section.key`, if the key is present
fn single<'a>(document: &'a DocumentMap, section: &str, key: &str) -> Option<&'a Value> {
    document
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_ref())
        .and_then(|v| v.first())
}

fn non_negative(document: &DocumentMap, key: &str) -> Result<Option<usize>, NormalFormError> {
    match single(document, "settings", key) {
        None => Ok(None),
        Some(v) => v
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .map(Some)
            .ok_or_else(|| task_error(format!("settings.{} must be a non-negative integer, got {}", key, v))),
    }
}

fn parse_term(name: &str, values: &[Value], dof: usize) -> Result<Term, NormalFormError> {
    if values.len() != 2 + 2 * dof {
        return Err(task_error(format!(
            "term {} needs re, im and {} exponents, got {} values",
            name,
            2 * dof,
            values.len()
        )));
    }
    let re = values[0]
        .as_f64()
        .ok_or_else(|| task_error(format!("term {}: real part {} is not a number", name, values[0])))?;
    let im = values[1]
        .as_f64()
        .ok_or_else(|| task_error(format!("term {}: imaginary part {} is not a number", name, values[1])))?;
    let powers = values[2..]
        .iter()
        .map(|v| {
            v.as_integer()
                .and_then(|e| IntPower::try_from(e).ok())
                .ok_or_else(|| task_error(format!("term {}: bad exponent {}", name, v)))
        })
        .collect::<Result<Vec<IntPower>, NormalFormError>>()?;
    Ok(Term::new(Complex64::new(re, im), &powers))
}

impl NormalFormTask {
    pub fn from_file(path: &str) -> Result<Self, NormalFormError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| task_error(format!("cannot read {}: {}", path, e)))?;
        content.parse()
    }

    fn from_document(document: &DocumentMap) -> Result<Self, NormalFormError> {
        let dof = non_negative(document, "dof")?.ok_or_else(|| task_error("settings.dof is missing"))?;
        let order =
            non_negative(document, "order")?.ok_or_else(|| task_error("settings.order is missing"))?;
        let mut config = NormalFormConfig::new(dof, order);
        if let Some(v) = single(document, "settings", "tolerance") {
            let tolerance = v
                .as_f64()
                .ok_or_else(|| task_error(format!("settings.tolerance must be a number, got {}", v)))?;
            config = config.with_tolerance(tolerance);
        }
        if let Some(threads) = non_negative(document, "threads")? {
            config = config.with_threads(threads);
        }
        config.validate()?;

        let mut hamiltonian = Polynomial::zero(dof);
        if let Some(section) = document.get("hamiltonian") {
            let mut names: Vec<&String> = section.keys().collect();
            names.sort();
            for name in names {
                if let Some(values) = &section[name] {
                    hamiltonian += parse_term(name, values, dof)?;
                }
            }
        }
        if hamiltonian.is_empty() {
            return Err(task_error("hamiltonian section has no terms"));
        }

        let log_level = match single(document, "logging", "level") {
            None => None,
            Some(v) => Some(
                LevelFilter::from_str(&v.to_string())
                    .map_err(|_| task_error(format!("unknown log level {}", v)))?,
            ),
        };
        let log_file = single(document, "logging", "file").map(|v| v.to_string());
        Ok(NormalFormTask {
            config,
            hamiltonian,
            log_level,
            log_file,
        })
    }
}

impl FromStr for NormalFormTask {
    type Err = NormalFormError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let document = parse_document_as(input, Some(task_template())).map_err(task_error)?;
        NormalFormTask::from_document(&document)
    }
}
