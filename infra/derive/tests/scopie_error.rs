#[test]
fn scopie_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/scopie_error_pass.rs");
    t.pass("tests/ui/scopie_error_context.rs");
    t.compile_fail("tests/ui/scopie_error_no_context.rs");
    t.compile_fail("tests/ui/scopie_error_bad_context_type.rs");
    t.compile_fail("tests/ui/scopie_error_tuple_variant.rs");
}
