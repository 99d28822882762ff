// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "test-util")]
#![expect(missing_docs, reason = "Test code")]

mod util;

use std::error::Error;
use std::fmt;

use strife::{ChainConfig, Outcome, assert_chain_shape};
use tracing_test::traced_test;
use util::{ZeroDivisionError, bare};

/// A foreign error that lists itself as its own source.
#[derive(Debug)]
struct Loop;

impl fmt::Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("loop")
    }
}

impl Error for Loop {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self)
    }
}

#[test]
#[traced_test]
fn self_referential_source_is_cut() {
    let fault = bare("top", 1).chain(Loop).chain("after");

    let chain = fault.to_chain();

    assert_chain_shape!(chain, [&["Fault", "Loop", "str"]]);
    assert_eq!(chain.entries()[0].caused_by[1].exc_msg, "after");
    assert!(logs_contain("source chain revisits an error it already reported"));
}

#[test]
#[traced_test]
fn repeated_acyclic_causes_are_silent() {
    let inner = bare("inner", 2).chain(ZeroDivisionError::new());

    let chain = bare("top", 1).chain(inner.clone()).chain(inner).to_chain();

    assert_chain_shape!(chain, [&["Fault", "Fault", "ZeroDivisionError", "Fault", "ZeroDivisionError"]]);
    assert!(!logs_contain("revisits"));
}

#[test]
#[traced_test]
fn depth_limit_truncates() {
    let mut fault = bare("top", 1);
    for _ in 0..5 {
        fault = fault.chain(ZeroDivisionError::new());
    }

    let chain = fault.to_chain_with(&ChainConfig::new().max_depth(3));

    assert_eq!(chain.entries()[0].caused_by.len(), 3);
    assert!(logs_contain("cause chain exceeds the depth limit"));
}

#[test]
#[traced_test]
fn chains_within_the_limit_are_silent() {
    let fault = bare("top", 1).chain(ZeroDivisionError::new());

    let chain = fault.to_chain_with(&ChainConfig::new().max_depth(1));

    assert_eq!(chain.entries()[0].caused_by.len(), 1);
    assert!(!logs_contain("depth limit"));
}

#[test]
#[traced_test]
fn chain_on_success_warns() {
    let misuse = Outcome::<u8>::ok(1).chain(ZeroDivisionError::new()).unwrap_err();

    assert!(misuse.to_string().starts_with("Misuse::unknown::unknown::"));
    assert!(logs_contain("chain called on a successful outcome"));
    assert!(logs_contain("division by zero"));
}
