// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Structured faults with captured origins, causal chains, and a stable serialized form.
//!
//! Strife provides a [`Fault`] error value that records where it was raised, the call stack at
//! that moment, and a chain of causes that may mix native faults with any foreign error type. On
//! top of it sits [`Outcome`], a two-variant success/failure container whose failure side can
//! carry an additional upstream fault.
//!
//! Faults serialize into a [`FaultChain`]: a JSON-friendly list of entries with a fixed set of
//! field names, suitable for log pipelines and golden-file tests.
//!
//! # Key Features
//!
//! - [**`fault!`**](crate::fault!): Creates a fault, capturing module, function, file, line and
//!   stack at the call site
//! - [**`FaultBuilder`**](FaultBuilder): Explicit control over origin, stack, type tag and cause
//! - [**`Fault::chain`**](Fault::chain): Attaches a cause at the end of the causal chain
//! - [**`Outcome`**](Outcome): Success or failure, with an optional upstream fault on failure
//! - [**`FaultChain`**](FaultChain): The serialized form, with `serde` support
//!
//! # Quick Start
//!
//! ```rust
//! use strife::{Outcome, fault};
//!
//! fn divide(a: i32, b: i32) -> Outcome<i32> {
//!     match a.checked_div(b) {
//!         Some(value) => Outcome::ok(value),
//!         None => Outcome::err(fault!("cannot divide {a} by {b}")),
//!     }
//! }
//!
//! let outcome = divide(1, 0);
//! assert!(outcome.is_err());
//!
//! let chain = outcome.to_chain().unwrap();
//! let entry = &chain.entries()[0];
//! assert_eq!(entry.exc_info.exc_msg, "cannot divide 1 by 0");
//! assert_eq!(entry.func_name, "divide");
//! ```
//!
//! # Causes
//!
//! Any error that converts into `Box<dyn Error + Send + Sync>` can be chained, including plain
//! strings. Native faults are recognized and kept as such; everything else is wrapped in an
//! [`ExternalFault`] that records the error's type name.
//!
//! ```rust
//! use strife::Fault;
//!
//! let fault = Fault::new("could not load settings")
//!     .chain(std::io::Error::other("permission denied"))
//!     .chain("while reading /etc/app.toml");
//!
//! let chain = fault.to_chain();
//! let causes = &chain.entries()[0].caused_by;
//! assert_eq!(causes[0].exc_type, "Error");
//! assert_eq!(causes[1].exc_type, "str");
//! ```
//!
//! # Stacks
//!
//! Stacks are captured through [`std::backtrace::Backtrace`] and honor `RUST_BACKTRACE` by default.
//! Use [`StackPolicy`] to force or suppress capture, or supply frames directly with
//! [`FaultBuilder::stack`] when the output must be deterministic.
//!
//! # Logging
//!
//! The crate emits [`tracing`] warnings in the rare cases where it degrades silently: a causal
//! chain that is cut short during serialization, and [`Outcome::chain`] called on a success.

#[doc(hidden)]
pub mod __private {
    pub use crate::origin::{function_name, type_name_of};
}

mod builder;
mod cause;
mod chain;
mod describe;
mod fault;
mod lazy;
mod macros;
mod misuse;
mod origin;
mod outcome;
mod schema;
mod stack;

#[cfg(any(feature = "test-util", test))]
pub mod test_util;

pub use builder::FaultBuilder;
pub use cause::{Cause, ExternalFault, STR_TYPE_TAG};
pub use chain::{ChainConfig, DEFAULT_MAX_DEPTH, EntryMode};
pub use describe::Describe;
pub use fault::{DEFAULT_TYPE_TAG, Fault};
pub use lazy::LazyOutcome;
pub use misuse::{MISUSE_TYPE_TAG, Misuse};
pub use origin::{Origin, UNKNOWN};
pub use outcome::Outcome;
pub use schema::{CauseEntry, ChainEntry, ExcInfo, FaultChain};
pub use stack::{BacktraceCapture, Stack, StackCapture, StackPolicy};
