// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use crate::Fault;
use crate::describe::{debug_text, display_text};
use crate::origin::UNKNOWN;

/// Type tag given to causes that were supplied as bare string messages.
pub const STR_TYPE_TAG: &str = "str";

const STR_TYPE_IDS: [typeid::ConstTypeId; 3] = [
    typeid::ConstTypeId::of::<&str>(),
    typeid::ConstTypeId::of::<String>(),
    typeid::ConstTypeId::of::<std::borrow::Cow<'_, str>>(),
];

const ERASED_TYPE_ID: typeid::ConstTypeId = typeid::ConstTypeId::of::<Box<dyn StdError + Send + Sync>>();

/// The value that triggered a [`Fault`].
///
/// A cause is either another native fault or a foreign error normalized into an
/// [`ExternalFault`]. Causes form a singly linked chain: each cause may in turn have a cause.
#[derive(Debug, Clone)]
pub enum Cause {
    /// A fault produced by this crate.
    Fault(Fault),
    /// Any other error value.
    External(ExternalFault),
}

impl Cause {
    /// Normalizes an error value into a cause.
    ///
    /// Faults, including faults that were boxed as `dyn Error`, stay native. Everything else
    /// becomes an [`ExternalFault`] tagged with the name of its type.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        let type_tag = type_tag_of::<E>();
        let boxed: Box<dyn StdError + Send + Sync + 'static> = error.into();
        match boxed.downcast::<Fault>() {
            Ok(fault) => Self::Fault(*fault),
            Err(boxed) => Self::External(ExternalFault {
                type_tag,
                error: Arc::from(boxed),
                next: None,
            }),
        }
    }

    /// Returns the cause as a standard error.
    #[must_use]
    pub fn as_error(&self) -> &(dyn StdError + 'static) {
        match self {
            Self::Fault(fault) => fault,
            Self::External(external) => external.error(),
        }
    }

    /// Attaches `cause` after the last link of this chain.
    pub(crate) fn append(&mut self, cause: Self) {
        match self {
            Self::Fault(fault) => fault.append_cause(cause),
            Self::External(external) => match &mut external.next {
                Some(next) => next.append(cause),
                None => external.next = Some(Box::new(cause)),
            },
        }
    }
}

impl From<Fault> for Cause {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

impl From<ExternalFault> for Cause {
    fn from(external: ExternalFault) -> Self {
        Self::External(external)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault(fault) => fmt::Display::fmt(fault, f),
            Self::External(external) => fmt::Display::fmt(external, f),
        }
    }
}

/// A normalized view over a foreign error value.
///
/// The foreign error's own [`source`](StdError::source) chain is part of the causal chain. A
/// cause attached later through [`Fault::chain`] is linked after that source chain.
#[derive(Clone)]
pub struct ExternalFault {
    type_tag: CompactString,
    error: Arc<dyn StdError + Send + Sync>,
    next: Option<Box<Cause>>,
}

impl ExternalFault {
    /// Name of the foreign error's type, or `"unknown"` if it was type-erased.
    #[must_use]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// The foreign error's display text.
    ///
    /// Falls back to `"unknown"` if the error's `Display` implementation fails.
    #[must_use]
    pub fn message(&self) -> String {
        display_text(&*self.error)
    }

    /// The foreign error's debug rendering.
    ///
    /// Falls back to `"unknown"` if the error's `Debug` implementation fails.
    #[must_use]
    pub fn display(&self) -> String {
        debug_text(&*self.error)
    }

    /// The wrapped foreign error.
    #[must_use]
    pub fn error(&self) -> &(dyn StdError + 'static) {
        self.error.as_ref()
    }

    /// The link attached after this error's own source chain, if any.
    #[must_use]
    pub fn next(&self) -> Option<&Cause> {
        self.next.as_deref()
    }
}

impl fmt::Debug for ExternalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalFault")
            .field("type_tag", &self.type_tag)
            .field("error", &self.error)
            .field("next", &self.next)
            .finish()
    }
}

impl fmt::Display for ExternalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_tag, self.error)
    }
}

fn type_tag_of<T>() -> CompactString {
    let type_id = typeid::of::<T>();
    if STR_TYPE_IDS.iter().any(|&id| id == type_id) {
        CompactString::const_new(STR_TYPE_TAG)
    } else if ERASED_TYPE_ID == type_id {
        CompactString::const_new(UNKNOWN)
    } else {
        CompactString::new(short_type_name(std::any::type_name::<T>()))
    }
}

/// Strips the module path and generic arguments from a type name.
fn short_type_name(type_name: &str) -> &str {
    let base = type_name.split_once('<').map_or(type_name, |(base, _)| base);
    let name = base.rsplit_once("::").map_or(base, |(_, name)| name);
    if name.is_empty() { UNKNOWN } else { name }
}
