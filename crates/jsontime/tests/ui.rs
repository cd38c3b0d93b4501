#[test]
fn time_fields_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/time_fields_pass.rs");
    t.pass("tests/ui/time_fields_generic_pass.rs");
}
