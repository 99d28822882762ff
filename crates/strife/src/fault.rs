// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use compact_str::CompactString;

use crate::{Cause, ChainConfig, FaultBuilder, FaultChain, Origin, Stack};

/// Type tag of faults that were not given one explicitly.
pub const DEFAULT_TYPE_TAG: &str = "Fault";

/// Internal fault data that is boxed to keep `Fault` lightweight.
#[derive(Debug, Clone)]
pub(crate) struct Inner {
    pub(crate) message: Cow<'static, str>,
    pub(crate) type_tag: CompactString,
    pub(crate) origin: Origin,
    pub(crate) stack: Stack,
    pub(crate) cause: Option<Cause>,
}

/// A structured error carrying a message, the location it was raised at, the stack captured at
/// that moment and an optional cause.
///
/// The data is boxed, so a `Fault` is the size of a pointer and `Result<T, Fault>` stays small.
///
/// The plain [`Display`](fmt::Display) rendering is the canonical one-line form
/// `TypeTag::module::function::line{message}`. The alternate form (`{:#}`) appends the cause
/// chain and the captured stack.
///
/// # Examples
///
/// ```rust
/// use strife::{Fault, fault};
///
/// fn parse_port(text: &str) -> Result<u16, Fault> {
///     text.parse::<u16>()
///         .map_err(|e| fault!("invalid port {text:?}").chain(e))
/// }
///
/// let fault = parse_port("http").unwrap_err();
/// assert_eq!(fault.message(), "invalid port \"http\"");
/// assert_eq!(fault.origin().function(), "parse_port");
/// ```
#[derive(Clone)]
pub struct Fault {
    pub(crate) data: Box<Inner>,
}

impl Fault {
    pub(crate) fn from_inner(inner: Inner) -> Self {
        Self { data: Box::new(inner) }
    }

    /// Creates a fault whose origin is the caller's file and line.
    ///
    /// Module and function names are not available through [`std::panic::Location`], so they are
    /// recorded as `"unknown"`. Use the [`fault!`](crate::fault) macro to capture them too.
    #[must_use]
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        FaultBuilder::new(message).build()
    }

    /// Creates a fault caused by another error.
    #[must_use]
    #[track_caller]
    pub fn caused_by<E>(message: impl Into<Cow<'static, str>>, cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        FaultBuilder::new(message).cause(cause).build()
    }

    /// Creates a [`FaultBuilder`] for explicit control over origin, stack and type tag.
    #[must_use]
    #[track_caller]
    pub fn builder(message: impl Into<Cow<'static, str>>) -> FaultBuilder {
        FaultBuilder::new(message)
    }

    /// The human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.data.message
    }

    /// The fault's type tag, `"Fault"` unless set through the builder.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        &self.data.type_tag
    }

    /// Where the fault was constructed.
    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.data.origin
    }

    /// The stack captured at construction, innermost-first.
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.data.stack
    }

    /// The direct cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        self.data.cause.as_ref()
    }

    /// Attaches `cause` to the end of this fault's causal chain.
    ///
    /// If the fault has no cause yet, `cause` becomes its direct cause. Otherwise it is linked
    /// after the last existing cause, so nothing already recorded is lost.
    #[must_use]
    pub fn chain<E>(self, cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        self.chain_cause(Cause::from_error(cause))
    }

    /// Attaches an already normalized [`Cause`] to the end of this fault's causal chain.
    #[must_use]
    pub fn chain_cause(mut self, cause: Cause) -> Self {
        self.append_cause(cause);
        self
    }

    pub(crate) fn append_cause(&mut self, cause: Cause) {
        match &mut self.data.cause {
            Some(existing) => existing.append(cause),
            None => self.data.cause = Some(cause),
        }
    }

    /// Finds the first error of type `T` in the source chain, not including this fault.
    pub fn find_source<T: StdError + 'static>(&self) -> Option<&T> {
        let mut source = self.source();
        while let Some(err) = source {
            if let Some(target) = err.downcast_ref::<T>() {
                return Some(target);
            }
            source = err.source();
        }
        None
    }

    /// Serializes this fault and its causal chain with the default configuration.
    #[must_use]
    pub fn to_chain(&self) -> FaultChain {
        FaultChain::from_fault(self)
    }

    /// Serializes this fault and its causal chain.
    #[must_use]
    pub fn to_chain_with(&self, config: &ChainConfig) -> FaultChain {
        FaultChain::from_faults_with([self], config)
    }

    /// Serializes this fault and its causal chain into a JSON value.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        self.to_chain().to_value()
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("message", &self.data.message)
            .field("type_tag", &self.data.type_tag)
            .field("origin", &self.data.origin)
            .field("stack", &self.data.stack)
            .field("cause", &self.data.cause)
            .finish()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CAUSED_BY: &str = "caused by:";

        let Inner {
            message,
            type_tag,
            origin,
            stack,
            ..
        } = self.data.as_ref();

        write!(f, "{type_tag}::{origin}{{{message}}}")?;

        if f.alternate() {
            for cause in FaultChain::from_fault(self).entries().iter().flat_map(|e| &e.caused_by) {
                write!(f, "\n{CAUSED_BY} {}", cause.exc_value)?;
            }
            if !stack.is_empty() {
                write!(f, "\n\nStack:\n{stack}")?;
            }
        }

        Ok(())
    }
}

impl StdError for Fault {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.data.cause.as_ref().map(Cause::as_error)
    }
}
