//! examples of usage of RustedBirkhoff
/// Henon-Heiles normal form, task documents and a resonant system
pub mod henon_heiles;
