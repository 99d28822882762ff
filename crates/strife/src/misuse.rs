// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! `Misuse` error type.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::{Fault, Origin};

/// Type tag of the fault carried by a [`Misuse`].
pub const MISUSE_TYPE_TAG: &str = "Misuse";

/// Error returned when an operation is invoked on a value it does not apply to.
///
/// The canonical case is [`Outcome::chain`](crate::Outcome::chain) called on a success, which
/// has no fault to attach a cause to. Instead of panicking, the operation hands back a `Misuse`
/// that records where the mistake was made.
///
/// # Examples
///
/// ```
/// use strife::{MISUSE_TYPE_TAG, Outcome};
///
/// let misuse = Outcome::<u8>::ok(1).chain("too late").unwrap_err();
/// assert_eq!(misuse.fault().type_tag(), MISUSE_TYPE_TAG);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct Misuse {
    fault: Fault,
}

impl Misuse {
    /// Creates a `Misuse` error located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            fault: Fault::builder(message).type_tag(MISUSE_TYPE_TAG).build(),
        }
    }

    /// Creates a `Misuse` error with an explicit origin.
    pub fn at(message: impl Into<Cow<'static, str>>, origin: Origin) -> Self {
        Self {
            fault: Fault::builder(message).type_tag(MISUSE_TYPE_TAG).origin(origin).build(),
        }
    }

    /// The fault describing the misuse.
    #[must_use]
    pub fn fault(&self) -> &Fault {
        &self.fault
    }

    /// Consumes the error, returning the fault describing the misuse.
    #[must_use]
    pub fn into_fault(self) -> Fault {
        self.fault
    }
}

impl fmt::Display for Misuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fault, f)
    }
}

impl StdError for Misuse {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.fault.source()
    }
}

impl From<Misuse> for Fault {
    fn from(misuse: Misuse) -> Self {
        misuse.fault
    }
}
