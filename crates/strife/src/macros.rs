// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Creates a [`Fault`](crate::Fault) located at the call site.
///
/// The origin records the module path, the enclosing function, the file and the line. The stack
/// is captured according to [`StackPolicy::Auto`](crate::StackPolicy::Auto).
///
/// The macro accepts:
/// - A string literal, with inline format arguments: `fault!("missing key {key}")`
/// - A format string with arguments: `fault!("expected {}, found {}", a, b)`
/// - Any expression convertible into `Cow<'static, str>`: `fault!(message)`
///
/// # Examples
///
/// ```rust,standalone_crate
/// use strife::fault;
///
/// fn load(key: &str) -> strife::Fault {
///     fault!("missing key {key}")
/// }
///
/// let fault = load("port");
/// assert_eq!(fault.message(), "missing key port");
/// assert_eq!(fault.origin().function(), "load");
/// assert_eq!(fault.origin().module(), "rust_out");
/// ```
#[macro_export]
macro_rules! fault {
    ($msg:literal $(,)?) => {
        $crate::Fault::builder(::std::format!($msg))
            .origin($crate::__origin!())
            .build()
    };
    ($fmt:literal, $($arg:tt)*) => {
        $crate::Fault::builder(::std::format!($fmt, $($arg)*))
            .origin($crate::__origin!())
            .build()
    };
    ($msg:expr $(,)?) => {
        $crate::Fault::builder($msg)
            .origin($crate::__origin!())
            .build()
    };
}

/// Returns early with a [`Fault`](crate::Fault) located at the call site.
///
/// Accepts the same arguments as [`fault!`](crate::fault!). The fault is converted with
/// [`Into`], so the enclosing function may return `Result<_, E>` for any `E: From<Fault>`.
///
/// # Examples
///
/// ```rust
/// use strife::{Fault, bail};
///
/// fn check(port: u16) -> Result<u16, Fault> {
///     if port == 0 {
///         bail!("port must not be zero");
///     }
///     Ok(port)
/// }
///
/// assert_eq!(check(0).unwrap_err().message(), "port must not be zero");
/// ```
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return ::core::result::Result::Err($crate::fault!($($arg)*).into())
    };
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use crate::{Fault, Outcome};

    fn named() -> Fault {
        fault!("plain")
    }

    #[test]
    fn captures_origin() {
        let fault = named();
        assert_eq!(fault.message(), "plain");
        assert_eq!(fault.type_tag(), crate::DEFAULT_TYPE_TAG);
        assert_eq!(fault.origin().module(), "strife::macros::tests");
        assert_eq!(fault.origin().function(), "named");
        assert!(fault.origin().file().ends_with("macros.rs"));
        assert!(fault.origin().line() > 0);
    }

    #[test]
    fn formats_messages() {
        let key = "port";
        assert_eq!(fault!("missing {key}").message(), "missing port");
        assert_eq!(fault!("{} of {}", 1, 2).message(), "1 of 2");
        let owned = String::from("owned");
        assert_eq!(fault!(owned).message(), "owned");
    }

    #[test]
    fn closures_report_enclosing_function() {
        let make = || fault!("inside");
        assert_eq!(make().origin().function(), "closures_report_enclosing_function");
    }

    #[test]
    fn bail_returns_early() {
        fn guarded(value: i32) -> Result<i32, Fault> {
            if value < 0 {
                bail!("negative: {value}");
            }
            Ok(value)
        }

        fn as_outcome(value: i32) -> Outcome<i32> {
            guarded(value).into()
        }

        assert_eq!(guarded(3).unwrap(), 3);
        assert_eq!(guarded(-1).unwrap_err().message(), "negative: -1");
        assert!(as_outcome(-2).is_err());
    }
}
