use pretty_assertions::assert_eq;

use super::*;
use crate::compute_closure;

#[test]
fn closure_of_a_declaration_without_dependencies_is_empty() {
    let registry = classify("export class A {} export class B { x: A; }");
    let closure = compute_closure(sym("A"), &registry);
    assert!(closure.is_empty());
    assert!(!closure.has_external_reachable);

    let closure = compute_closure(sym("B"), &registry);
    assert_eq!(names(&closure.total), vec!["A"]);
    assert!(!closure.has_external_reachable);
}

#[test]
fn closure_is_depth_first_in_dependency_order() {
    let source = "
    export class A { b: B; c: C; }
    export class B { d: D; c: C; }
    export class C { e: E; }
    export class D {}
    export class E {}
    ";
    let registry = classify(source);
    let closure = compute_closure(sym("A"), &registry);
    assert_eq!(names(&closure.total), vec!["B", "D", "C", "E"]);
}

#[test]
fn external_leaves_are_reachable_transitively() {
    let source = "
    export class A { b: B; }
    export class B { x: Missing; }
    ";
    let registry = classify(source);
    let closure = compute_closure(sym("A"), &registry);
    assert_eq!(names(&closure.total), vec!["B", "Missing"]);
    assert!(closure.has_external_reachable);
}

#[test]
fn imported_dependencies_are_not_followed() {
    let source = r#"
    import { Handle } from "./Handle";
    import { Point3d } from "@bentley/geometry-core";
    export class A { h: Handle; p: Point3d; b: B; }
    export class B {}
    "#;
    let registry = classify(source);
    let closure = compute_closure(sym("A"), &registry);
    assert_eq!(names(&closure.total), vec!["B"]);
    assert!(!closure.has_external_reachable);
}

#[test]
fn mutual_dependencies_terminate() {
    let source = "
    export class A { b: B; }
    export class B { a: A; }
    ";
    let registry = classify(source);

    let a = compute_closure(sym("A"), &registry);
    assert_eq!(names(&a.total), vec!["B", "A"]);
    assert_eq!(a.total.iter().filter(|&&name| name == sym("B")).count(), 1);

    let b = compute_closure(sym("B"), &registry);
    assert_eq!(names(&b.total), vec!["A", "B"]);
    assert_eq!(b.total.iter().filter(|&&name| name == sym("A")).count(), 1);
}

#[test]
fn self_reference_is_part_of_the_closure() {
    let registry = classify("export class Node { next: Node; value: Value; }");
    let closure = compute_closure(sym("Node"), &registry);
    assert_eq!(names(&closure.total), vec!["Value", "Node"]);
    assert!(closure.has_external_reachable);
}

#[test]
fn shared_dependencies_are_listed_once() {
    let source = "
    export class Top { l: Left; r: Right; }
    export class Left { s: Shared; }
    export class Right { s: Shared; x: Missing; }
    export class Shared { x: Missing; }
    ";
    let registry = classify(source);
    let closure = compute_closure(sym("Top"), &registry);
    assert_eq!(names(&closure.total), vec!["Left", "Shared", "Missing", "Right"]);
}

#[test]
fn unknown_name_has_an_empty_closure() {
    let registry = classify("export class A { b: B; }");
    assert!(compute_closure(sym("Nowhere"), &registry).is_empty());
}
