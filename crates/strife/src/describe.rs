// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Write};

use crate::origin::UNKNOWN;
use crate::{ExcInfo, ExternalFault, Fault};

/// The common view of native and foreign faults used by the chain serializer.
///
/// Every link in a causal chain, whether it is a [`Fault`] or an [`ExternalFault`], is rendered
/// through this trait into the three `exc_*` fields of the serialized schema.
pub trait Describe {
    /// The type name or category of the fault.
    fn type_tag(&self) -> Cow<'_, str>;

    /// The textual message.
    fn message(&self) -> Cow<'_, str>;

    /// The full rendering used as `exc_value`.
    fn display(&self) -> Cow<'_, str>;

    /// Renders the fault into its serialized form.
    fn exc_info(&self) -> ExcInfo {
        ExcInfo {
            exc_msg: self.message().into_owned(),
            exc_type: self.type_tag().into_owned(),
            exc_value: self.display().into_owned(),
        }
    }
}

impl Describe for Fault {
    fn type_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::type_tag(self))
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::message(self))
    }

    fn display(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl Describe for ExternalFault {
    fn type_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::type_tag(self))
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Owned(Self::message(self))
    }

    fn display(&self) -> Cow<'_, str> {
        Cow::Owned(Self::display(self))
    }
}

/// A foreign error reached through another error's `source()`, with its type erased.
pub(crate) struct Foreign<'a>(pub(crate) &'a (dyn StdError + 'static));

impl Describe for Foreign<'_> {
    fn type_tag(&self) -> Cow<'_, str> {
        Cow::Borrowed(UNKNOWN)
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Owned(display_text(self.0))
    }

    fn display(&self) -> Cow<'_, str> {
        Cow::Owned(debug_text(self.0))
    }
}

/// Renders `value` with [`Display`](fmt::Display), or [`UNKNOWN`] if its implementation fails.
pub(crate) fn display_text(value: &(impl fmt::Display + ?Sized)) -> String {
    let mut text = String::new();
    if write!(text, "{value}").is_err() {
        return UNKNOWN.to_string();
    }
    text
}

/// Renders `value` with [`Debug`](fmt::Debug), or [`UNKNOWN`] if its implementation fails.
pub(crate) fn debug_text(value: &(impl fmt::Debug + ?Sized)) -> String {
    let mut text = String::new();
    if write!(text, "{value:?}").is_err() {
        return UNKNOWN.to_string();
    }
    text
}
