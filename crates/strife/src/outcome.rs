// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The [`Outcome`] success/failure container.

use std::error::Error as StdError;

use tracing::{Level, event};

use crate::describe::display_text;
use crate::{Cause, Fault, FaultChain, Misuse};

/// Either a success value or a fault, with an optional upstream fault on failure.
///
/// `Outcome` plays the role of [`Result`] for code that reports faults through this crate. The
/// failure variant carries the fault itself and, optionally, an `up` fault: an additional fault
/// that originated elsewhere and is reported alongside, distinct from the fault's own cause chain.
///
/// Conversions to and from [`Result`] are provided, so `?` can be used after
/// [`into_result`](Self::into_result).
///
/// # Examples
///
/// ```rust
/// use strife::{Fault, Outcome};
///
/// let outcome: Outcome<u32> = Outcome::err(Fault::new("lookup failed"));
/// let outcome = outcome.chain(std::io::Error::other("timed out")).unwrap();
///
/// assert_eq!(outcome.unwrap_or(0), 0);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub enum Outcome<T, F = Fault> {
    /// The operation succeeded.
    Ok(T),
    /// The operation failed.
    Err {
        /// The fault describing the failure.
        fault: F,
        /// An additional fault reported alongside `fault`.
        up: Option<Fault>,
    },
}

impl<T, F> Outcome<T, F> {
    /// Creates a success.
    pub const fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    /// Creates a failure without an upstream fault.
    pub const fn err(fault: F) -> Self {
        Self::Err { fault, up: None }
    }

    /// Creates a failure with an upstream fault.
    pub const fn err_with_up(fault: F, up: Fault) -> Self {
        Self::Err { fault, up: Some(up) }
    }

    /// Returns `true` for a success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns `true` for a failure.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// The success value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err { .. } => None,
        }
    }

    /// The fault, if this is a failure.
    #[must_use]
    pub const fn fault(&self) -> Option<&F> {
        match self {
            Self::Ok(_) => None,
            Self::Err { fault, .. } => Some(fault),
        }
    }

    /// The upstream fault, if this is a failure that has one.
    #[must_use]
    pub const fn up(&self) -> Option<&Fault> {
        match self {
            Self::Ok(_) => None,
            Self::Err { up, .. } => up.as_ref(),
        }
    }

    /// Converts into the success value, discarding any fault.
    #[must_use]
    pub fn into_ok(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err { .. } => None,
        }
    }

    /// Converts into the fault, discarding any success value.
    #[must_use]
    pub fn into_err(self) -> Option<F> {
        match self {
            Self::Ok(_) => None,
            Self::Err { fault, .. } => Some(fault),
        }
    }

    /// Returns the success value or `default`.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err { .. } => default,
        }
    }

    /// Returns the success value or computes one from the fault.
    pub fn unwrap_or_else(self, op: impl FnOnce(F) -> T) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Err { fault, .. } => op(fault),
        }
    }

    /// Converts into a [`Result`], dropping the upstream fault.
    ///
    /// # Errors
    ///
    /// Returns the fault if this is a failure.
    pub fn into_result(self) -> Result<T, F> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err { fault, .. } => Err(fault),
        }
    }
}

impl<T> Outcome<T, Fault> {
    /// Attaches `cause` to the end of the fault's causal chain.
    ///
    /// # Errors
    ///
    /// Returns a [`Misuse`] located at the caller if this is a success; there is no fault to
    /// attach to. A warning is logged as well.
    #[track_caller]
    pub fn chain<E>(self, cause: E) -> Result<Self, Misuse>
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        self.chain_cause(Cause::from_error(cause))
    }

    /// Attaches an already normalized [`Cause`] to the end of the fault's causal chain.
    ///
    /// # Errors
    ///
    /// Returns a [`Misuse`] if this is a success.
    #[track_caller]
    pub fn chain_cause(self, cause: Cause) -> Result<Self, Misuse> {
        match self {
            Self::Err { fault, up } => Ok(Self::Err {
                fault: fault.chain_cause(cause),
                up,
            }),
            Self::Ok(_) => {
                let misuse = Misuse::new("cannot chain a cause onto a successful outcome");
                event!(
                    Level::WARN,
                    origin = %misuse.fault().origin(),
                    cause = %display_text(&cause),
                    "chain called on a successful outcome"
                );
                Err(misuse)
            }
        }
    }

    /// Serializes the failure: one entry for the fault, followed by one for the upstream fault.
    ///
    /// Returns `None` for a success.
    #[must_use]
    pub fn to_chain(&self) -> Option<FaultChain> {
        match self {
            Self::Ok(_) => None,
            Self::Err { fault, up } => Some(FaultChain::from_faults(std::iter::once(fault).chain(up))),
        }
    }
}

impl<T, F> From<Result<T, F>> for Outcome<T, F> {
    fn from(result: Result<T, F>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(fault) => Self::err(fault),
        }
    }
}

impl<T, F> From<Outcome<T, F>> for Result<T, F> {
    fn from(outcome: Outcome<T, F>) -> Self {
        outcome.into_result()
    }
}
