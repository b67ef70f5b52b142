#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::GeneratorConfig;
use chrono::NaiveDate;

#[test]
fn test_render_replaces_every_occurrence() {
    let r = Replacements::new().with("Name", "User");
    assert_eq!(render("{{Name}} and {{Name}}", &r), "User and User");
}

#[test]
fn test_render_converts_tabs() {
    let r = Replacements::new().with("Body", "\tx = 1;");
    assert_eq!(render("{\n{{Body}}\n}", &r), "{\n    x = 1;\n}");
    assert_eq!(render_raw("\t{{Body}}", &r), "\t\tx = 1;");
}

#[test]
fn test_render_in_insertion_order() {
    let r = Replacements::new()
        .with("Outer", "[{{Inner}}]")
        .with("Inner", "value");
    assert_eq!(render("{{Outer}}", &r), "[value]");

    // A placeholder introduced by a later key stays untouched
    let r = Replacements::new()
        .with("Inner", "value")
        .with("Outer", "[{{Inner}}]");
    assert_eq!(render("{{Outer}}", &r), "[{{Inner}}]");
}

#[test]
fn test_render_triple_brace() {
    let r = Replacements::new().with("EncryptedFields", "\n        private string _x;\n");
    assert_eq!(
        render("    {{{EncryptedFields}}", &r),
        "    {\n        private string _x;\n"
    );
}

#[test]
fn test_unknown_placeholder_left_as_is() {
    let r = Replacements::new().with("A", "1");
    assert_eq!(render("{{A}}{{B}}", &r), "1{{B}}");
    assert_eq!(unresolved_placeholders("{{B}} {{C}} {{B}}"), vec!["B", "C"]);
    assert!(unresolved_placeholders("{ get; set; }").is_empty());
}

#[test]
fn test_set_keeps_position() {
    let mut r = Replacements::new().with("A", "1").with("B", "2");
    r.set("A", "3");
    let keys: Vec<_> = r.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert_eq!(r.get("A"), Some("3"));
}

#[test]
fn test_using_block() {
    let none: [&str; 0] = [];
    assert_eq!(using_block(&none), "");
    assert_eq!(using_block(&["System"]), "using System;\n\n");
    assert_eq!(
        using_block(&["System", "System.Data"]),
        "using System;\nusing System.Data;\n\n"
    );
}

#[test]
fn test_inheritance_clause() {
    let none: [&str; 0] = [];
    assert_eq!(inheritance_clause(&none), "");
    assert_eq!(inheritance_clause(&["IBase"]), " : IBase");
    assert_eq!(inheritance_clause(&["IBase", "IHasIsSystem"]), " : IBase, IHasIsSystem");
}

#[test]
fn test_context_common_values_apply_last() {
    let config = GeneratorConfig::default();
    let ctx = RenderContext::new(&config, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    let r = Replacements::new().with("Filter", "[{{tableSchema}}].[fn_Split]");
    assert_eq!(
        ctx.render("{{Filter}} by {{authorFullName}} on {{currentDate}}", &r),
        "[JFW].[fn_Split] by Jin Jackson on 2024-03-09"
    );
}

#[test]
fn test_context_call_values_win() {
    let config = GeneratorConfig::default();
    let ctx = RenderContext::new(&config, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    let r = Replacements::new().with("currentDate", "2020-01-01");
    assert_eq!(ctx.render("{{currentDate}}", &r), "2020-01-01");
}
