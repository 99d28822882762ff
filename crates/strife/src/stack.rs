// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Stack capture for faults.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// Symbols of frames that belong to the capture machinery rather than to the caller.
const INTERNAL_FRAMES: [&str; 6] = [
    "std::backtrace",
    "strife::stack::",
    "strife::builder::",
    "strife::fault::Fault::",
    "strife::misuse::Misuse::",
    "strife::outcome::Outcome<",
];

/// Policy for capturing stacks when a fault is constructed.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackPolicy {
    /// Capture based on the `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE` environment variables.
    #[default]
    Auto,
    /// Capture even if the environment variables are unset or set to `0`.
    Forced,
    /// Never capture; the fault carries an empty stack.
    Never,
}

/// A service that describes the current call stack.
///
/// Implementations return frame descriptions ordered innermost-first, i.e. the frame closest to
/// the construction site comes first. The frame text is opaque to this crate.
pub trait StackCapture {
    /// Captures the stack of the calling thread.
    fn capture(&self) -> Stack;
}

/// The default [`StackCapture`], backed by [`std::backtrace::Backtrace`].
///
/// Each resolved frame is rendered as `symbol (at file:line:column)`. Leading frames that belong
/// to the backtrace machinery and to this crate are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceCapture {
    policy: StackPolicy,
}

impl BacktraceCapture {
    /// Creates a capture service honoring the given policy.
    #[must_use]
    pub const fn new(policy: StackPolicy) -> Self {
        Self { policy }
    }
}

impl StackCapture for BacktraceCapture {
    #[cfg_attr(test, mutants::skip)] // capture output depends on the environment and debug info
    fn capture(&self) -> Stack {
        let backtrace = match self.policy {
            StackPolicy::Auto => Backtrace::capture(),
            StackPolicy::Forced => Backtrace::force_capture(),
            StackPolicy::Never => return Stack::empty(),
        };

        match backtrace.status() {
            BacktraceStatus::Captured => Stack::from_frames(frames_of(&backtrace.to_string())),
            _ => Stack::empty(),
        }
    }
}

/// Splits the textual rendering of a backtrace into one description per frame.
fn frames_of(rendered: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    let mut symbol: Option<&str> = None;
    let mut location: Option<&str> = None;

    let mut flush = |symbol: Option<&str>, location: Option<&str>| {
        if let Some(symbol) = symbol {
            frames.push(match location {
                Some(location) => format!("{symbol} (at {location})"),
                None => symbol.to_string(),
            });
        }
    };

    for line in rendered.lines() {
        let line = line.trim();
        if let Some(at) = line.strip_prefix("at ") {
            location = location.or(Some(at));
        } else if let Some((index, rest)) = line.split_once(": ")
            && !index.is_empty()
            && index.bytes().all(|b| b.is_ascii_digit())
        {
            flush(symbol, location);
            symbol = Some(rest);
            location = None;
        }
    }
    flush(symbol, location);

    let internal = frames
        .iter()
        .take_while(|frame| INTERNAL_FRAMES.iter().any(|prefix| frame.contains(prefix)))
        .count();
    frames.drain(..internal);
    frames
}

/// An immutable, cheaply clonable sequence of frame descriptions, innermost-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    frames: Arc<[String]>,
}

impl Stack {
    /// Creates an empty stack.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a stack from frame descriptions ordered innermost-first.
    pub fn from_frames<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            frames: frames.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the frame descriptions, innermost-first.
    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frames were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, frame) in self.frames.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{index:>4}: {frame}")?;
        }
        Ok(())
    }
}
