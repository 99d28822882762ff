// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates deferring an expensive check with `LazyOutcome`.

use strife::{LazyOutcome, Outcome, fault};

fn expensive_check() -> Outcome<u32> {
    println!("running the check");
    Outcome::err(fault!("check failed"))
}

fn main() {
    let lazy = LazyOutcome::new(expensive_check);
    println!("created");

    if lazy.is_err() {
        println!("failed once");
    }
    if lazy.is_err() {
        println!("failed again, without rerunning");
    }
}
