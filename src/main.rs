// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
use RustedBirkhoff::Examples::henon_heiles::nf_examples;

fn main() {
    // no argument: Henon-Heiles (0); a number: that example; anything else: a task file (1)
    let example = match std::env::args().nth(1) {
        None => 0,
        Some(arg) => arg.parse::<usize>().unwrap_or(1),
    };
    nf_examples(example);
}
