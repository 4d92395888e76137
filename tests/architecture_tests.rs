//! Architecture contract tests.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "diesel::",
            "clap::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::infrastructure", "crate::application", "diesel::"],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_does_not_reach_into_adapters() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter", "crate::infrastructure", "diesel::"],
    );

    assert!(
        hits.is_empty(),
        "found adapter imports in application layer: {hits:#?}"
    );
}

#[test]
fn infrastructure_does_not_depend_on_inbound_adapters() {
    let hits = find_lines_containing("src/infrastructure", &["crate::adapter::inbound"]);
    assert!(
        hits.is_empty(),
        "found inbound adapter imports in infrastructure: {hits:#?}"
    );
}

#[test]
fn sql_is_confined_to_the_sqlite_adapter() {
    let hits = find_lines_containing("src/adapter/inbound", &["sql_query", "diesel::"]);
    assert!(hits.is_empty(), "found SQL in inbound adapters: {hits:#?}");
}
