// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared fixtures for building deterministic faults.

#![allow(dead_code, reason = "Not every test binary uses every fixture")]

use strife::test_util::FixedCapture;
use strife::{Fault, Origin};

/// A foreign error standing in for an arithmetic failure raised by another library.
#[derive(Debug, thiserror::Error)]
#[error("{msg}")]
pub struct ZeroDivisionError {
    msg: String,
}

impl ZeroDivisionError {
    pub fn new() -> Self {
        Self {
            msg: "division by zero".to_string(),
        }
    }
}

/// A foreign error with a source of its own.
#[derive(Debug, thiserror::Error)]
#[error("request failed")]
pub struct RequestError {
    #[source]
    pub source: std::io::Error,
}

static FORMAT_ERROR: std::fmt::Error = std::fmt::Error;

/// A foreign error whose source is a value shared by every instance.
#[derive(Debug)]
pub struct Labeled(pub &'static str);

impl std::fmt::Display for Labeled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Labeled {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&FORMAT_ERROR)
    }
}

/// A foreign error whose `Display` and `Debug` implementations both fail.
pub struct Opaque;

impl std::fmt::Display for Opaque {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Err(std::fmt::Error)
    }
}

impl std::fmt::Debug for Opaque {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Err(std::fmt::Error)
    }
}

impl std::error::Error for Opaque {}

/// Builds a fault with a fixed origin and a two-frame stack.
pub fn fixed(message: &'static str, module: &'static str, function: &'static str, line: u32) -> Fault {
    let file = format!("src/{}.rs", module.rsplit("::").next().unwrap_or(module));
    let capture = FixedCapture::new([
        format!("{module}::{function} (at {file}:{line}:9)"),
        "app::main (at src/main.rs:7:5)".to_string(),
    ]);
    Fault::builder(message)
        .origin(Origin::new(module, function, file, line))
        .capture_with(&capture)
        .build()
}

/// Builds a fault with a fixed origin and no stack.
pub fn bare(message: &'static str, line: u32) -> Fault {
    Fault::builder(message)
        .origin(Origin::new("app", "run", "src/app.rs", line))
        .capture_with(&FixedCapture::default())
        .build()
}
