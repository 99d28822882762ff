// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt;

/// Placeholder used wherever a piece of metadata could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Source location at which a [`Fault`](crate::Fault) was constructed.
///
/// Origins are normally captured by the [`fault!`](crate::fault) macro, which records the module
/// path, the enclosing function, the file and the line of the call site. Code that constructs
/// faults on behalf of its caller can build an `Origin` explicitly and pass it to
/// [`FaultBuilder::origin`](crate::FaultBuilder::origin).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    module: Cow<'static, str>,
    function: Cow<'static, str>,
    file: Cow<'static, str>,
    line: u32,
}

impl Origin {
    /// Creates an origin from explicit location data.
    #[must_use]
    pub fn new(
        module: impl Into<Cow<'static, str>>,
        function: impl Into<Cow<'static, str>>,
        file: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> Self {
        Self {
            module: module.into(),
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    /// Creates an origin from the location of the caller.
    ///
    /// Only the file and line are known to [`std::panic::Location`], so module and function are
    /// set to [`UNKNOWN`].
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(UNKNOWN, UNKNOWN, location.file(), location.line())
    }

    /// Module path of the construction site, e.g. `my_app::config`.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Name of the function that constructed the fault.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Source file of the construction site.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Line of the construction site.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN, 0)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.module, self.function, self.line)
    }
}

/// Reduces the type name of an item nested in a function to the bare function name.
///
/// `my_app::config::load::__f` becomes `load`; closures and async blocks are skipped so that
/// `my_app::run::{{closure}}::__f` becomes `run`.
#[doc(hidden)]
#[must_use]
pub fn function_name(nested_item: &'static str) -> &'static str {
    let mut path = match nested_item {
        "__f" => "",
        item => item.strip_suffix("::__f").unwrap_or(item),
    };
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    match path.rsplit_once("::") {
        Some((_, name)) => name,
        None if path.is_empty() => UNKNOWN,
        None => path,
    }
}

#[doc(hidden)]
#[must_use]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Captures an [`Origin`] describing the current call site.
#[doc(hidden)]
#[macro_export]
macro_rules! __origin {
    () => {{
        fn __f() {}
        $crate::Origin::new(
            ::core::module_path!(),
            $crate::__private::function_name($crate::__private::type_name_of(__f)),
            ::core::file!(),
            ::core::line!(),
        )
    }};
}
