//! Scope and rename invariants (§8): protected scopes, shortest-first
//! assignment, and no collision with an outer reference.

use esquash_core::frontend::parse;
use esquash_core::reference::collect_references;
use esquash_core::rename::rename;
use esquash_core::scope_builder::build_scopes;

fn pipeline(src: &str) -> (esquash_core::ast::Program, esquash_core::scope::ScopeArena) {
    let mut program = parse(src).expect("parse failed");
    let mut arena = build_scopes(&mut program);
    collect_references(&program, &mut arena);
    rename(&mut program, &mut arena, true);
    (program, arena)
}

#[test]
fn program_scope_is_always_protected() {
    let (program, arena) = pipeline("var x = 1;");
    let scope = arena.get(program.scope.unwrap());
    assert!(scope.is_protected(arena.eval_is_local(program.scope)));
}

#[test]
fn with_statement_protects_its_scope() {
    let (program, arena) = pipeline("function f(){ with(x){ var y = 1; } } f();");
    let fn_scope = find_function_scope(&program, &arena);
    let scope = arena.get(fn_scope);
    assert!(scope.uses_with);
    assert!(scope.is_protected(arena.eval_is_local(Some(fn_scope))));
    assert!(scope.original_to_new.is_empty());
}

#[test]
fn eval_reference_protects_unless_locally_declared() {
    let (program, arena) = pipeline("function f(){ var a = 1; return eval(a); } f();");
    let fn_scope = find_function_scope(&program, &arena);
    let scope = arena.get(fn_scope);
    assert!(scope.uses_eval);
    assert!(!arena.eval_is_local(Some(fn_scope)));
    assert!(scope.is_protected(false));
    assert!(scope.original_to_new.is_empty());
}

#[test]
fn eval_declared_locally_does_not_protect() {
    let (program, arena) = pipeline("function f(){ var eval = 1; var longLocal = 2; return longLocal; } f();");
    let fn_scope = find_function_scope(&program, &arena);
    let scope = arena.get(fn_scope);
    assert!(arena.eval_is_local(Some(fn_scope)));
    assert!(!scope.is_protected(true));
}

#[test]
fn shortest_first_by_reference_count() {
    let (program, arena) = pipeline(
        "function f(rare, frequent){ frequent(frequent(frequent(rare))); } f(1, 2);",
    );
    let fn_scope = find_function_scope(&program, &arena);
    let scope = arena.get(fn_scope);
    let rare_new = scope.original_to_new.get("rare").unwrap();
    let frequent_new = scope.original_to_new.get("frequent").unwrap();
    assert!(frequent_new.len() <= rare_new.len());
}

#[test]
fn renamed_locals_do_not_collide_with_outer_references() {
    // `used` is referenced often enough (including from inside `g`) that it
    // wins the shortest name in `f`'s scope. `g`'s own local `first` is
    // referenced just as often, but must not be assigned that same short
    // name, since `used` resolves outside `g`.
    let (program, arena) = pipeline(
        "function f(used, other){ \
            function g(first){ return used + first + first + first; } \
            g(1); return other + used + used; \
         } f(1, 2);",
    );
    let outer_scope = find_function_scope(&program, &arena);
    let outer = arena.get(outer_scope);
    let used_new = outer
        .original_to_new
        .get("used")
        .cloned()
        .unwrap_or_else(|| "used".to_string());

    let inner_scope = find_nested_function_scope(&program, &arena);
    let inner = arena.get(inner_scope);
    let first_new = inner
        .original_to_new
        .get("first")
        .cloned()
        .unwrap_or_else(|| "first".to_string());

    assert_ne!(used_new, first_new);
}

fn find_function_scope(
    program: &esquash_core::ast::Program,
    arena: &esquash_core::scope::ScopeArena,
) -> esquash_core::scope::ScopeId {
    use esquash_core::ast::StmtKind;
    for stmt in &program.statements {
        if let StmtKind::FunctionDeclaration(fn_node) = &stmt.kind {
            return fn_node.scope.expect("function missing scope");
        }
    }
    panic!("no function declaration found; scanned {} scopes", arena.len());
}

fn find_nested_function_scope(
    program: &esquash_core::ast::Program,
    arena: &esquash_core::scope::ScopeArena,
) -> esquash_core::scope::ScopeId {
    use esquash_core::ast::StmtKind;
    for stmt in &program.statements {
        if let StmtKind::FunctionDeclaration(fn_node) = &stmt.kind {
            for inner in &fn_node.body {
                if let StmtKind::FunctionDeclaration(inner_fn) = &inner.kind {
                    return inner_fn.scope.expect("nested function missing scope");
                }
            }
        }
    }
    panic!("no nested function declaration found; scanned {} scopes", arena.len());
}
