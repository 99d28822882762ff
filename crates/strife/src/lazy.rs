// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cell::{Cell, OnceCell};
use std::fmt;

use crate::{Fault, Outcome};

/// An [`Outcome`] computed on first access.
///
/// The producer runs at most once; later accesses return the stored outcome. Useful for
/// expensive checks that may never be needed, or whose result is inspected several times.
///
/// # Examples
///
/// ```rust
/// use strife::{LazyOutcome, Outcome};
///
/// let lazy = LazyOutcome::new(|| Outcome::<u32>::ok(42));
/// assert!(lazy.is_ok());
/// assert_eq!(lazy.outcome().value(), Some(&42));
/// ```
pub struct LazyOutcome<T, F = Fault, P = fn() -> Outcome<T, F>> {
    outcome: OnceCell<Outcome<T, F>>,
    producer: Cell<Option<P>>,
}

impl<T, F, P> LazyOutcome<T, F, P>
where
    P: FnOnce() -> Outcome<T, F>,
{
    /// Creates a lazy outcome that calls `producer` on first access.
    pub const fn new(producer: P) -> Self {
        Self {
            outcome: OnceCell::new(),
            producer: Cell::new(Some(producer)),
        }
    }

    /// Returns the outcome, calling the producer if this is the first access.
    ///
    /// # Panics
    ///
    /// Panics if the producer panicked during an earlier access.
    pub fn outcome(&self) -> &Outcome<T, F> {
        self.outcome.get_or_init(|| self.produce())
    }

    /// Returns `true` if the outcome is a success, calling the producer if needed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome().is_ok()
    }

    /// Returns `true` if the outcome is a failure, calling the producer if needed.
    #[must_use]
    pub fn is_err(&self) -> bool {
        self.outcome().is_err()
    }

    /// Returns `true` once the producer has run.
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Consumes the lazy outcome, calling the producer if it has not run yet.
    ///
    /// # Panics
    ///
    /// Panics if the producer panicked during an earlier access.
    pub fn into_outcome(self) -> Outcome<T, F> {
        match self.outcome.into_inner() {
            Some(outcome) => outcome,
            None => {
                let producer = self.producer.into_inner().expect("producer panicked on an earlier access");
                producer()
            }
        }
    }

    fn produce(&self) -> Outcome<T, F> {
        let producer = self.producer.take().expect("producer panicked on an earlier access");
        producer()
    }
}

impl<T: fmt::Debug, F: fmt::Debug, P> fmt::Debug for LazyOutcome<T, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_tuple("LazyOutcome");
        match self.outcome.get() {
            Some(outcome) => debug.field(outcome),
            None => debug.field(&format_args!("<unevaluated>")),
        };
        debug.finish()
    }
}
