// Integration tests for the tailscript interpreter

use pretty_assertions::assert_eq;
use tailscript::interpreter::{Interpreter, MockHost};
use tailscript::parser;

fn run(source: &str) -> Vec<String> {
    run_with_inputs(source, &[])
}

fn run_with_inputs(source: &str, inputs: &[&str]) -> Vec<String> {
    let program = parser::parse(source).expect("Parsing failed");
    let mut interpreter =
        Interpreter::new(&program, MockHost::with_inputs(inputs)).expect("Setup failed");
    interpreter.run().expect("Execution failed");
    interpreter.into_host().outputs
}

#[test]
fn test_hello_world() {
    let source = r#"
        def main() {
            print("hello, ", "world");
        }
    "#;
    assert_eq!(run(source), ["hello, world"]);
}

#[test]
fn test_arithmetic_and_printing() {
    let source = r#"
        def main() {
            print(1 + 2 * 3);
            print(7 / 2);
            print(-7 / 2);
            print(-(3 - 5));
            print("foo" + "bar");
            print(true, " ", false);
        }
    "#;
    assert_eq!(run(source), ["7", "3", "-3", "2", "foobar", "true false"]);
}

#[test]
fn test_while_loop_counts_to_three() {
    let source = r#"
        def main() {
            var ii;
            ii = 0;
            while (ii < 3) {
                print(ii);
                ii = ii + 1;
            }
        }
    "#;
    assert_eq!(run(source), ["0", "1", "2"]);
}

#[test]
fn test_if_else_branches() {
    let source = r#"
        def main() {
            var xi;
            xi = 10;
            if (xi > 5) {
                print("big");
            } else {
                print("small");
            }
            if (xi < 5) {
                print("never");
            }
        }
    "#;
    assert_eq!(run(source), ["big"]);
}

#[test]
fn test_object_member_assignment() {
    let source = r#"
        def main() {
            var o;
            o = @;
            o.vali = 10;
            print(o.vali);
        }
    "#;
    assert_eq!(run(source), ["10"]);
}

#[test]
fn test_nested_object_paths() {
    let source = r#"
        def main() {
            var oo;
            oo = @;
            oo.innero = @;
            oo.innero.names = "deep";
            print(oo.innero.names);
        }
    "#;
    assert_eq!(run(source), ["deep"]);
}

#[test]
fn test_outward_declaration_visible_one_frame_out() {
    let source = r#"
        def main() {
            if (true) {
                var xi;
                xi = 5;
            }
            print(xi);
        }
    "#;
    assert_eq!(run(source), ["5"]);
}

#[test]
fn test_recursion() {
    let source = r#"
        def facti(ni) {
            if (ni < 2) {
                return 1;
            }
            return ni * facti(ni - 1);
        }

        def main() {
            print(facti(5));
        }
    "#;
    assert_eq!(run(source), ["120"]);
}

#[test]
fn test_overload_dispatch_by_argument_kind() {
    let source = r#"
        def tagi(xi) {
            return 1;
        }

        def tagi(xs) {
            return 2;
        }

        def main() {
            print(tagi(10));
            print(tagi("ten"));
        }
    "#;
    assert_eq!(run(source), ["1", "2"]);
}

#[test]
fn test_by_reference_parameter_mutates_caller() {
    let source = r#"
        def bumpv(&xi) {
            xi = xi + 1;
        }

        def stompv(xi) {
            xi = 99;
        }

        def main() {
            var ai;
            ai = 1;
            bumpv(ai);
            print(ai);
            stompv(ai);
            print(ai);
        }
    "#;
    assert_eq!(run(source), ["2", "2"]);
}

#[test]
fn test_object_argument_aliases_without_ref_marker() {
    let source = r#"
        def markv(oo) {
            oo.seenb = true;
        }

        def main() {
            var xo;
            xo = @;
            xo.seenb = false;
            markv(xo);
            print(xo.seenb);
        }
    "#;
    assert_eq!(run(source), ["true"]);
}

#[test]
fn test_lambda_captures_snapshot_of_primitives() {
    let source = r#"
        def main() {
            var zi;
            zi = 5;
            var gf;
            gf = lambdai() { return zi; };
            zi = 9;
            print(gf());
        }
    "#;
    assert_eq!(run(source), ["5"]);
}

#[test]
fn test_lambda_captured_object_stays_shared() {
    let source = r#"
        def main() {
            var xo;
            xo = @;
            xo.vali = 1;
            var gf;
            gf = lambdav() { xo.vali = xo.vali + 1; };
            gf();
            gf();
            print(xo.vali);
        }
    "#;
    assert_eq!(run(source), ["3"]);
}

#[test]
fn test_lambda_parameter_shadows_captured_name() {
    let source = r#"
        def main() {
            var xi;
            xi = 10;
            var gf;
            gf = lambdai(xi) { return xi; };
            print(gf(3));
            print(xi);
        }
    "#;
    assert_eq!(run(source), ["3", "10"]);
}

#[test]
fn test_implicit_receiver_resolves_to_containing_object() {
    let source = r#"
        def bumpv() {
            selfo.valuei = selfo.valuei + 1;
        }

        def main() {
            var oo;
            oo = @;
            oo.valuei = 41;
            oo.bumpf = bumpv;
            oo.bumpf();
            print(oo.valuei);
        }
    "#;
    assert_eq!(run(source), ["42"]);
}

#[test]
fn test_function_return_delegation_forwards_arguments() {
    let source = r#"
        def doublei(xi) {
            return xi + xi;
        }

        def choosef(xi) {
            return doublei;
        }

        def main() {
            print(choosef(21));
        }
    "#;
    assert_eq!(run(source), ["42"]);
}

#[test]
fn test_delegation_to_lambda_literal() {
    let source = r#"
        def pickf(xi) {
            return lambdai(yi) { return yi * 10; };
        }

        def main() {
            print(pickf(4));
        }
    "#;
    assert_eq!(run(source), ["40"]);
}

#[test]
fn test_interface_conformant_argument_accepted() {
    let source = r#"
        interface A {
            vali;
            valb;
        }

        def checkv(xA) {
            print(xA.vali);
        }

        def main() {
            var oo;
            oo = @;
            oo.vali = 7;
            oo.valb = true;
            checkv(oo);
        }
    "#;
    assert_eq!(run(source), ["7"]);
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let source = r#"
        def tattleb(xi) {
            print(xi);
            return xi > 1;
        }

        def main() {
            var rb;
            rb = tattleb(1) && tattleb(2);
            print(rb);
            rb = tattleb(3) || tattleb(4);
            print(rb);
        }
    "#;
    assert_eq!(run(source), ["1", "2", "false", "3", "4", "true"]);
}

#[test]
fn test_equality_identity_for_objects() {
    let source = r#"
        def main() {
            var ao;
            var bo;
            ao = @;
            bo = @;
            print(ao == bo);
            bo = ao;
            print(ao == bo);
            print(1 == "1");
            print(nil != ao);
        }
    "#;
    assert_eq!(run(source), ["false", "true", "false", "true"]);
}

#[test]
fn test_conversion_round_trips() {
    let source = r#"
        def main() {
            print(int(str(42)) + 0);
            print(str(-17));
            print(bool(str(true)));
            print(bool(str(false)));
            print(int("  7  "));
        }
    "#;
    assert_eq!(run(source), ["42", "-17", "true", "false", "7"]);
}

#[test]
fn test_input_builtins() {
    let source = r#"
        def main() {
            var ni;
            ni = inputi("n?");
            var ss;
            ss = inputs();
            print(ni + 1);
            print(ss);
        }
    "#;
    assert_eq!(run_with_inputs(source, &["41", "hello"]), ["n?", "42", "hello"]);
}

#[test]
fn test_falling_off_end_returns_zero_value() {
    let source = r#"
        def geti() {
        }

        def gets() {
            return;
        }

        def getb() {
        }

        def main() {
            print(geti());
            print(gets(), "<");
            print(getb());
        }
    "#;
    assert_eq!(run(source), ["0", "<", "false"]);
}

#[test]
fn test_function_stored_in_variable_is_callable() {
    let source = r#"
        def addi(ai, bi) {
            return ai + bi;
        }

        def main() {
            var opf;
            opf = addi;
            print(opf(2, 3));
        }
    "#;
    assert_eq!(run(source), ["5"]);
}

#[test]
fn test_integer_variable_does_not_shadow_registry_function() {
    let source = r#"
        def geti() {
            return 7;
        }

        def main() {
            var geti;
            geti = 2;
            print(geti());
            print(geti);
        }
    "#;
    assert_eq!(run(source), ["7", "2"]);
}

#[test]
fn test_shared_object_through_two_fields() {
    let source = r#"
        def main() {
            var ao;
            var bo;
            ao = @;
            bo = @;
            ao.sharedo = @;
            bo.sharedo = ao.sharedo;
            ao.sharedo.counti = 1;
            bo.sharedo.counti = bo.sharedo.counti + 1;
            print(ao.sharedo.counti);
        }
    "#;
    assert_eq!(run(source), ["2"]);
}
