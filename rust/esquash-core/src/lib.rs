//! A JavaScript-to-JavaScript minifier core: scope analysis, safe local
//! renaming, and minimal-whitespace code generation.
//!
//! The pipeline is strictly linear:
//!
//! ```text
//! source bytes -> [frontend] -> AST -> [scope_builder] -> AST (scoped)
//!     -> [reference] -> AST (annotated)
//!     -> [rename]    -> AST (renamed)
//!     -> [codegen]   -> token stream -> [sink] -> output bytes
//! ```

pub mod ast;
pub mod codegen;
pub mod error;
pub mod frontend;
pub mod name_gen;
pub mod precedence;
pub mod reference;
pub mod rename;
pub mod scope;
pub mod scope_builder;
pub mod sink;
pub mod token;

pub use error::CompileError;

use std::io::Write;

/// The core's only configuration surface (§4.12).
#[derive(Debug, Clone, Copy, Default)]
pub struct MinifyOptions {
    /// Enables the renaming pass. Off by default, matching the CLI's
    /// `--rename-locals` default.
    pub rename_locals: bool,
}

/// Runs the full pipeline: parse `source`, optionally rename locals per
/// `options`, and write the minified result to `out`.
pub fn minify<W: Write>(source: &str, options: MinifyOptions, out: W) -> Result<(), CompileError> {
    let mut program = frontend::parse(source)?;
    let mut arena = scope_builder::build_scopes(&mut program);
    reference::collect_references(&program, &mut arena);
    rename::rename(&mut program, &mut arena, options.rename_locals);
    codegen::generate(&program, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify_str(src: &str, options: MinifyOptions) -> String {
        let mut buf = Vec::new();
        minify(src, options, &mut buf).expect("minify failed");
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn minifies_a_simple_function_call() {
        let out = minify_str("f(1, 2);", MinifyOptions::default());
        assert_eq!(out, "f(1,2)");
    }

    #[test]
    fn preserves_top_level_names_without_rename_locals() {
        let out = minify_str(
            "function add(a, b) { return a + b; } add(1, 2);",
            MinifyOptions::default(),
        );
        assert!(out.contains("function add(a,b)"));
    }

    #[test]
    fn renames_locals_when_enabled() {
        let out = minify_str(
            "function f(longName){ return longName + longName; } f(1);",
            MinifyOptions {
                rename_locals: true,
            },
        );
        assert!(out.starts_with("function f("));
        assert!(!out.contains("longName"));
    }
}
