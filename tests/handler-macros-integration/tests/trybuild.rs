//! trybuild compile-time tests for handler_macros

#[test]
fn describe_derive_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/describe_default.rs");
    t.pass("tests/trybuild/describe_constructor.rs");
}
