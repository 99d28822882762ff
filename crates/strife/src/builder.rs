// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;

use compact_str::CompactString;

use crate::fault::{DEFAULT_TYPE_TAG, Inner};
use crate::{BacktraceCapture, Cause, Fault, Origin, Stack, StackCapture, StackPolicy};

#[derive(Debug)]
enum StackSource {
    Policy(StackPolicy),
    Fixed(Stack),
}

/// Builder for creating [`Fault`] instances with explicit context.
///
/// By default the origin is the location that called [`Fault::builder`] and the stack is
/// captured with [`StackPolicy::Auto`] when [`build`](Self::build) runs. Both can be supplied
/// by the caller instead, which is how code that reports faults on behalf of others passes the
/// relevant call-site information along.
///
/// # Examples
///
/// ```rust
/// use strife::{Fault, Origin, Stack};
///
/// let fault = Fault::builder("connection refused")
///     .type_tag("NetworkError")
///     .origin(Origin::new("app::net", "connect", "src/net.rs", 88))
///     .stack(Stack::from_frames(["app::net::connect (at src/net.rs:88:17)"]))
///     .build();
///
/// assert_eq!(fault.to_string(), "NetworkError::app::net::connect::88{connection refused}");
/// ```
#[derive(Debug)]
pub struct FaultBuilder {
    message: Cow<'static, str>,
    type_tag: CompactString,
    origin: Origin,
    stack: StackSource,
    cause: Option<Cause>,
}

impl FaultBuilder {
    /// Creates a builder whose origin is the caller's file and line.
    #[must_use]
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            type_tag: CompactString::const_new(DEFAULT_TYPE_TAG),
            origin: Origin::caller(),
            stack: StackSource::Policy(StackPolicy::Auto),
            cause: None,
        }
    }

    /// Sets the type tag reported for the fault.
    #[must_use]
    pub fn type_tag(mut self, type_tag: impl AsRef<str>) -> Self {
        self.type_tag = CompactString::new(type_tag);
        self
    }

    /// Sets the origin of the fault.
    #[must_use]
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Uses the given frames instead of capturing a stack.
    #[must_use]
    pub fn stack(mut self, stack: Stack) -> Self {
        self.stack = StackSource::Fixed(stack);
        self
    }

    /// Sets the policy used to capture the stack when the fault is built.
    #[must_use]
    pub fn stack_policy(mut self, policy: StackPolicy) -> Self {
        self.stack = StackSource::Policy(policy);
        self
    }

    /// Captures the stack right away with a custom capture service.
    #[must_use]
    pub fn capture_with(self, capture: &dyn StackCapture) -> Self {
        self.stack(capture.capture())
    }

    /// Sets the direct cause of the fault.
    #[must_use]
    pub fn cause<E>(self, cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        self.cause_value(Cause::from_error(cause))
    }

    /// Sets the direct cause of the fault from an already normalized [`Cause`].
    #[must_use]
    pub fn cause_value(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Builds the [`Fault`], capturing the stack unless one was supplied.
    #[must_use]
    pub fn build(self) -> Fault {
        let stack = match self.stack {
            StackSource::Fixed(stack) => stack,
            StackSource::Policy(policy) => BacktraceCapture::new(policy).capture(),
        };

        Fault::from_inner(Inner {
            message: self.message,
            type_tag: self.type_tag,
            origin: self.origin,
            stack,
            cause: self.cause,
        })
    }
}
