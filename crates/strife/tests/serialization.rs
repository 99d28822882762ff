// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "test-util")]
#![expect(missing_docs, reason = "Test code")]

mod util;

use strife::{ChainConfig, EntryMode, Fault, FaultChain, assert_chain_shape};
use util::{Labeled, Opaque, RequestError, ZeroDivisionError, bare, fixed};

#[test]
fn lone_fault() {
    let fault = fixed("Something went wrong...", "app::jobs", "run", 42);

    insta::assert_snapshot!(format!("{:#}", fault.to_chain()), @r#"
    [
      {
        "caused_by": [],
        "exc_info": {
          "exc_msg": "Something went wrong...",
          "exc_type": "Fault",
          "exc_value": "Fault::app::jobs::run::42{Something went wrong...}"
        },
        "file_name": "src/jobs.rs",
        "func_name": "run",
        "lineno": 42,
        "module_name": "app::jobs",
        "stack": [
          "app::jobs::run (at src/jobs.rs:42:9)",
          "app::main (at src/main.rs:7:5)"
        ]
      }
    ]
    "#);
}

#[test]
fn fault_caused_by_foreign_error() {
    let fault = fixed("Something went wrong...", "app::jobs", "run", 42).chain(ZeroDivisionError::new());

    insta::assert_snapshot!(format!("{:#}", fault.to_chain()), @r#"
    [
      {
        "caused_by": [
          {
            "exc_msg": "division by zero",
            "exc_type": "ZeroDivisionError",
            "exc_value": "ZeroDivisionError { msg: \"division by zero\" }"
          }
        ],
        "exc_info": {
          "exc_msg": "Something went wrong...",
          "exc_type": "Fault",
          "exc_value": "Fault::app::jobs::run::42{Something went wrong...}"
        },
        "file_name": "src/jobs.rs",
        "func_name": "run",
        "lineno": 42,
        "module_name": "app::jobs",
        "stack": [
          "app::jobs::run (at src/jobs.rs:42:9)",
          "app::main (at src/main.rs:7:5)"
        ]
      }
    ]
    "#);
}

#[test]
fn batch_of_faults() {
    let first = bare("first", 1);
    let second = bare("second", 2).chain("detail");

    let chain = FaultChain::from_faults([&first, &second]);

    assert_eq!(chain.len(), 2);
    assert_eq!(chain.entries()[0].exc_info.exc_msg, "first");
    assert_eq!(chain.entries()[1].exc_info.exc_msg, "second");
    assert_eq!(chain.entries()[1].lineno, 2);
    assert_chain_shape!(chain, [&["Fault"], &["Fault", "str"]]);
}

#[test]
fn mixed_chain_is_flattened_in_order() {
    let mut fault = bare("top", 1);
    for depth in 0..10 {
        fault = if depth % 2 == 0 {
            fault.chain(bare("native", depth + 2))
        } else {
            fault.chain(ZeroDivisionError::new())
        };
    }

    let chain = fault.to_chain();
    let entry = &chain.entries()[0];
    assert_eq!(entry.caused_by.len(), 10);
    for (depth, cause) in entry.caused_by.iter().enumerate() {
        let expected = if depth % 2 == 0 { "Fault" } else { "ZeroDivisionError" };
        assert_eq!(cause.exc_type, expected, "cause {depth}");
    }
    assert_eq!(entry.caused_by[2].exc_value, "Fault::app::run::4{native}");
}

#[test]
fn sources_of_foreign_errors_are_walked() {
    let fault = bare("top", 1).chain(RequestError {
        source: std::io::Error::other("connection reset"),
    });

    let chain = fault.to_chain();
    assert_chain_shape!(chain, [&["Fault", "RequestError", "unknown"]]);
    let causes = &chain.entries()[0].caused_by;
    assert_eq!(causes[0].exc_msg, "request failed");
    assert_eq!(causes[1].exc_msg, "connection reset");
    assert_eq!(causes[1].exc_value, "Custom { kind: Other, error: \"connection reset\" }");
}

#[test]
fn cloned_fault_chained_twice_keeps_every_cause() {
    let inner = bare("inner", 2).chain(ZeroDivisionError::new());

    let fault = bare("top", 1).chain(inner.clone()).chain(inner);

    let chain = fault.to_chain();
    let messages: Vec<_> = chain.entries()[0].caused_by.iter().map(|c| c.exc_msg.as_str()).collect();
    assert_eq!(messages, ["inner", "division by zero", "inner", "division by zero"]);
}

#[test]
fn errors_sharing_a_static_source_each_report_it() {
    let fault = bare("top", 1).chain(Labeled("a")).chain(Labeled("b"));

    let chain = fault.to_chain();

    assert_chain_shape!(chain, [&["Fault", "Labeled", "unknown", "Labeled", "unknown"]]);
    let messages: Vec<_> = chain.entries()[0].caused_by.iter().map(|c| c.exc_msg.as_str()).collect();
    assert_eq!(
        messages,
        [
            "a",
            "an error occurred when formatting an argument",
            "b",
            "an error occurred when formatting an argument"
        ]
    );
}

#[test]
fn unformattable_error_gets_placeholders() {
    let fault = bare("top", 1).chain(Opaque).chain("after");

    let chain = fault.to_chain();

    assert_chain_shape!(chain, [&["Fault", "Opaque", "str"]]);
    let causes = &chain.entries()[0].caused_by;
    assert_eq!(causes[0].exc_msg, strife::UNKNOWN);
    assert_eq!(causes[0].exc_value, strife::UNKNOWN);
    assert_eq!(causes[1].exc_msg, "after");
}

#[test]
fn per_node_entries() {
    let fault = bare("outer", 1).chain(bare("middle", 2)).chain("why").chain(bare("inner", 3));
    let config = ChainConfig::new().entry_mode(EntryMode::PerNode);

    let chain = fault.to_chain_with(&config);

    assert_chain_shape!(chain, [&["Fault", "Fault", "str", "Fault"], &["Fault", "str", "Fault"], &["Fault"]]);
    let lines: Vec<_> = chain.entries().iter().map(|entry| entry.lineno).collect();
    assert_eq!(lines, [1, 2, 3]);
}

#[test]
fn serialization_is_repeatable() {
    let fault = fixed("again", "app::jobs", "retry", 9).chain(ZeroDivisionError::new());

    let first = fault.to_chain();
    let second = fault.to_chain();

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.to_string(), fault.to_value().to_string());
}

#[test]
fn identical_graphs_render_identically() {
    let build = || fixed("same", "app::jobs", "run", 5).chain(bare("cause", 6)).chain("text");
    assert_eq!(build().to_chain().to_string(), build().to_chain().to_string());
}

#[test]
fn rendered_chain_parses_back() {
    let fault = fixed("round", "app::jobs", "run", 5).chain(ZeroDivisionError::new());
    let chain = fault.to_chain();

    let parsed = FaultChain::from_json(&chain.to_string()).unwrap();

    assert_eq!(parsed, chain);
}

#[test]
fn default_origin_and_stack_for_plain_constructor() {
    let fault = Fault::builder("plain")
        .capture_with(&strife::test_util::FixedCapture::default())
        .build();

    let chain = fault.to_chain();
    let entry = &chain.entries()[0];
    assert_eq!(entry.module_name, strife::UNKNOWN);
    assert_eq!(entry.func_name, strife::UNKNOWN);
    assert!(entry.file_name.ends_with("serialization.rs"));
    assert!(entry.stack.is_empty());
    assert_eq!(entry.exc_info.exc_value, format!("Fault::unknown::unknown::{}{{plain}}", entry.lineno));
}
