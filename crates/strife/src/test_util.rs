// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test utilities for the strife crate.
//!
//! This module is only available when the `test-util` feature is enabled.

use crate::{Stack, StackCapture};

/// A [`StackCapture`] that always returns the same frames.
///
/// Makes serialized chains reproducible regardless of build profile and environment.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use strife::Fault;
/// use strife::test_util::FixedCapture;
///
/// let capture = FixedCapture::new(["app::main (at src/main.rs:4:5)"]);
/// let fault = Fault::builder("boom").capture_with(&capture).build();
/// assert_eq!(fault.stack().frames(), ["app::main (at src/main.rs:4:5)"]);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixedCapture {
    stack: Stack,
}

impl FixedCapture {
    /// Creates a capture service returning `frames`, innermost-first.
    #[must_use]
    pub fn new<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stack: Stack::from_frames(frames),
        }
    }
}

impl StackCapture for FixedCapture {
    fn capture(&self) -> Stack {
        self.stack.clone()
    }
}

/// Assert the type tags of a [`FaultChain`](crate::FaultChain), entry by entry.
///
/// Each expected entry lists the type tag of the entry's fault followed by the type tags of its
/// `caused_by` sequence.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "test-util")]
/// # {
/// use strife::{Fault, assert_chain_shape};
///
/// let fault = Fault::new("top").chain(std::fmt::Error).chain("detail");
/// assert_chain_shape!(fault.to_chain(), [&["Fault", "Error", "str"]]);
/// # }
/// ```
#[macro_export]
#[cfg_attr(coverage_nightly, coverage(off))] // coverage doesn't handle panics well
macro_rules! assert_chain_shape {
    ($chain:expr, $expected:expr $(,)?) => {{
        let chain: &$crate::FaultChain = &$chain;
        let expected: &[&[&str]] = &$expected;

        let actual: ::std::vec::Vec<::std::vec::Vec<&str>> = chain
            .entries()
            .iter()
            .map(|entry| {
                ::std::iter::once(entry.exc_info.exc_type.as_str())
                    .chain(entry.caused_by.iter().map(|cause| cause.exc_type.as_str()))
                    .collect()
            })
            .collect();
        let expected: ::std::vec::Vec<::std::vec::Vec<&str>> = expected.iter().map(|entry| entry.to_vec()).collect();

        assert_eq!(actual, expected, "chain shape mismatch in {chain}");
    }};
}
