//! The end-to-end input -> output scenarios (§8).

use esquash_core::{minify, MinifyOptions};

fn minify_str(src: &str, options: MinifyOptions) -> String {
    let mut buf = Vec::new();
    minify(src, options, &mut buf).expect("minify failed");
    String::from_utf8(buf).unwrap()
}

#[test]
fn compound_assignment_statement() {
    let out = minify_str("var x = 1; x += 2;", MinifyOptions::default());
    assert_eq!(out, "var x=1;x+=2");
}

#[test]
fn iife_expression_statement_is_wrapped() {
    let out = minify_str("(function(){})()", MinifyOptions::default());
    assert_eq!(out, "(function(){})()");
}

#[test]
fn object_literal_at_statement_start_is_wrapped() {
    let out = minify_str("({a:1}).b", MinifyOptions::default());
    assert_eq!(out, "({a:1}).b");
}

#[test]
fn return_with_space_before_literal() {
    let out = minify_str("return 5", MinifyOptions::default());
    assert_eq!(out, "return 5");
}

#[test]
fn return_with_redundant_parens_drops_them() {
    // The closed AST has no parenthesis node, so grouping parens around a
    // literal that never needed them for precedence are not round-tripped;
    // the mandatory space from the previous scenario still applies.
    let out = minify_str("return(5)", MinifyOptions::default());
    assert_eq!(out, "return 5");
}

#[test]
fn in_operator_inside_for_init_is_parenthesized() {
    let out = minify_str("for ((x in y); ; );", MinifyOptions::default());
    assert_eq!(out, "for((x in y);;);");
}

/// No semicolon after the last case's final statement (§4.4: the separator
/// only goes *between* cases).
#[test]
fn switch_case_has_no_trailing_semicolon_after_last_case() {
    let out = minify_str("switch(x){case 1: a();}", MinifyOptions::default());
    assert_eq!(out, "switch(x){case 1:a()}");
}

#[test]
fn switch_case_separator_goes_between_cases_only() {
    let out = minify_str(
        "switch(x){case 1: a(); case 2: b(); default: c();}",
        MinifyOptions::default(),
    );
    assert_eq!(out, "switch(x){case 1:a();case 2:b();default:c()}");
}

#[test]
fn rename_locals_preserves_protected_outer_scope() {
    let out = minify_str(
        "function f(longName){ return longName + longName; } f(1);",
        MinifyOptions {
            rename_locals: true,
        },
    );
    assert!(out.starts_with("function f("));
    assert!(!out.contains("longName"));
    assert!(out.contains("f(1)"));
}

/// Reparse identity (§8): minifying already-minified output (renaming off)
/// is a no-op — there is nothing left for a second pass to remove.
#[test]
fn minifying_twice_is_idempotent() {
    let sources = [
        "var x = 1; x += 2;",
        "(function(){})()",
        "({a:1}).b",
        "for ((x in y); ; );",
        "function f(a,b){ if(a){ return a-b-1; } else return a*(b+1); } f(1,2);",
        "a ? b : c ? d : e;",
        "var obj = { x: 1, y: [1,2,3,], z: function(){ return this.x; } };",
    ];
    for src in sources {
        let once = minify_str(src, MinifyOptions::default());
        let twice = minify_str(&once, MinifyOptions::default());
        assert_eq!(once, twice, "not idempotent for input: {src}");
    }
}
