// Error handling tests: every failure is one of NAME, TYPE or FAULT and is
// fatal to the running program.

use tailscript::interpreter::{ErrorKind, Interpreter, MockHost};
use tailscript::parser;

fn expect_error(source: &str) -> ErrorKind {
    expect_error_with_inputs(source, &[])
}

fn expect_error_with_inputs(source: &str, inputs: &[&str]) -> ErrorKind {
    let program = parser::parse(source).expect("Parsing failed");
    match Interpreter::new(&program, MockHost::with_inputs(inputs)) {
        Err(err) => err.kind,
        Ok(mut interpreter) => interpreter.run().expect_err("program should fail").kind,
    }
}

#[test]
fn test_undefined_variable_is_name_error() {
    let source = r#"
        def main() {
            print(xi);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_block_scoped_declaration_invisible_outside() {
    let source = r#"
        def main() {
            if (true) {
                local xi;
                xi = 1;
            }
            print(xi);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_outward_declaration_invisible_to_grandparent() {
    let source = r#"
        def main() {
            if (true) {
                if (true) {
                    var xi;
                }
            }
            print(xi);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_duplicate_declaration_is_name_error() {
    let source = r#"
        def main() {
            local xi;
            local xi;
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_outward_declaration_conflicting_with_parent() {
    let source = r#"
        def main() {
            if (true) {
                var xi;
                var xi;
            }
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_declaration_in_body_collides_with_parameter() {
    let source = r#"
        def showv(xi) {
            local xi;
            print(xi);
        }

        def main() {
            showv(1);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_outward_declaration_in_block_collides_with_parameter() {
    let source = r#"
        def showv(xi) {
            if (true) {
                var xi;
            }
        }

        def main() {
            showv(1);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_invalid_suffix_is_type_error() {
    let source = r#"
        def main() {
            var xq;
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_assignment_type_mismatch() {
    let source = r#"
        def main() {
            var xi;
            xi = "not an integer";
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_non_boolean_condition() {
    let source = r#"
        def main() {
            if (1) {
                print("never");
            }
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_mixed_operand_addition() {
    let source = r#"
        def main() {
            print(1 + "a");
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_nil_dereference_is_fault() {
    let source = r#"
        def main() {
            var oo;
            print(oo.vali);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Fault);
}

#[test]
fn test_division_by_zero_is_fault() {
    let source = r#"
        def main() {
            print(1 / 0);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Fault);
}

#[test]
fn test_missing_main_is_name_error() {
    let source = r#"
        def helperv() {
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_missing_overload_is_name_error() {
    let source = r#"
        def tagi(xi) {
            return 1;
        }

        def main() {
            print(tagi("text"));
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_wrong_argument_count_through_variable() {
    let source = r#"
        def main() {
            var gf;
            gf = lambdav(xi) { };
            gf();
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_parameter_type_mismatch() {
    let source = r#"
        def showv(xi) {
            print(xi);
        }

        def main() {
            var gf;
            gf = showv;
            gf("text");
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_interface_conformance_failure() {
    let source = r#"
        interface A {
            vali;
            valb;
        }

        def gv(xA) {
        }

        def main() {
            var oo;
            oo = @;
            oo.vali = 1;
            gv(oo);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_undeclared_interface_is_name_error() {
    let source = r#"
        def gv(xZ) {
        }

        def main() {
            var oo;
            oo = @;
            gv(oo);
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_duplicate_interface_rejected_at_startup() {
    let source = r#"
        interface A { vali; }
        interface A { valb; }

        def main() {
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_malformed_interface_name_rejected() {
    let source = r#"
        interface AB { vali; }

        def main() {
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_duplicate_function_signature_rejected_at_startup() {
    let source = r#"
        def tagi(xi) { return 1; }
        def tagi(yi) { return 2; }

        def main() {
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}

#[test]
fn test_void_function_cannot_return_value() {
    let source = r#"
        def foov() {
            return 1;
        }

        def main() {
            foov();
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_return_type_mismatch() {
    let source = r#"
        def geti() {
            return "text";
        }

        def main() {
            print(geti());
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_void_call_in_expression_position() {
    let source = r#"
        def foov() {
        }

        def main() {
            var xi;
            xi = foov();
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_calling_nil_function_variable() {
    let source = r#"
        def main() {
            var gf;
            gf();
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_invalid_text_to_integer_conversion() {
    let source = r#"
        def main() {
            print(int("abc"));
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_object_conversion_rejected() {
    let source = r#"
        def main() {
            var oo;
            oo = @;
            print(str(oo));
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Type);
}

#[test]
fn test_inputi_rejects_non_integer_input() {
    let source = r#"
        def main() {
            var ni;
            ni = inputi();
        }
    "#;
    assert_eq!(expect_error_with_inputs(source, &["abc"]), ErrorKind::Type);
}

#[test]
fn test_input_builtins_take_at_most_one_argument() {
    let source = r#"
        def main() {
            var ss;
            ss = inputs("a", "b");
        }
    "#;
    assert_eq!(expect_error(source), ErrorKind::Name);
}
