// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates chaining foreign errors onto a fault and printing the serialized chain.

use strife::{Fault, Outcome, fault};

fn read_config(path: &str) -> Outcome<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Outcome::ok(text),
        Err(e) => Outcome::err(fault!("failed to read config from {path}").chain(e)),
    }
}

fn parse_port(text: &str) -> Result<u16, Fault> {
    text.trim()
        .parse::<u16>()
        .map_err(|e| fault!("invalid port {text:?}").chain(e))
}

fn main() {
    let outcome = read_config("/definitely/missing.toml");
    if let Some(chain) = outcome.to_chain() {
        println!("{:#}", chain.without_stacks());
    }

    if let Err(fault) = parse_port("eighty") {
        println!("{fault:#}");
    }
}
