// Integration tests for the interpreter, driven through the library API

use cwalk::{CaptureSink, Interpreter, RunConfig, parse_source, run_captured, run_source};

const ALL_FEATURES: &str = include_str!("fixtures/test_all_features.c");

fn run(source: &str) -> (i64, String) {
    run_captured(source, &RunConfig::default()).expect("program should run")
}

#[test]
fn test_all_features_output() {
    let expected = "\n\
====== Testing all features ======\n\
________Print string________\n\
Hello, world!\n\
________Function calls (no args, two args)________\n\
12\n\
120\n\
________Casting________\n\
123\n\
________Arithmetic________\n\
6\n\
3\n\
1\n\
________Unary minus and logical not________\n\
-5\n\
1\n\
0\n\
________Comparisons________\n\
1\n\
1\n\
1\n\
1\n\
0\n\
1\n\
________Conditional operator________\n\
100\n\
200\n\
________Bitwise________\n\
2\n\
7\n\
5\n\
________Shifts________\n\
16\n\
4\n\
________sizeof________\n\
4\n\
1\n\
________Char literal________\n\
90\n\
________Pointers________\n\
42\n\
________While loop again________\n\
0\n\
1\n\
2\n\
________Simple float literals________\n\
3.14\n\
0.0\n\
2.71828\n\
________Float arithmetic________\n\
4.0\n\
3.75\n\
9.0\n\
4.5\n";

    let (code, output) = run(ALL_FEATURES);
    assert_eq!(code, 42);
    assert_eq!(output, expected);
}

#[test]
fn test_all_features_function_table() {
    let table = parse_source(ALL_FEATURES).expect("fixture should parse");
    let names: Vec<&str> = table
        .in_source_order()
        .iter()
        .map(|function| function.name.as_str())
        .collect();
    assert_eq!(names, vec!["sum", "fact", "main"]);
}

#[test]
fn test_simple_arithmetic() {
    let source = r#"
        int main() {
            int x;
            int y;
            x = 5;
            y = 10;
            return x + y;
        }
    "#;
    assert_eq!(run(source), (15, String::new()));
}

#[test]
fn test_function_call() {
    let source = r#"
        int add(int a, int b) {
            return a + b;
        }

        int main() {
            int result;
            result = add(3, 4);
            return result;
        }
    "#;
    assert_eq!(run(source).0, 7);
}

#[test]
fn test_factorial_edges() {
    let source = r#"
        int fact(int n) {
            int r;
            r = 1;
            while (n > 1) {
                r = r * n;
                n = n - 1;
            }
            return r;
        }

        int main() {
            print(fact(1));
            print(fact(0));
            print(fact(10));
            return fact(5);
        }
    "#;
    assert_eq!(run(source), (120, "1\n1\n3628800\n".to_string()));
}

#[test]
fn test_recursive_fibonacci() {
    let source = r#"
        int fib(int n) {
            if (n < 2) {
                return n;
            }
            return fib(n - 1) + fib(n - 2);
        }

        int main() {
            return fib(15);
        }
    "#;
    assert_eq!(run(source).0, 610);
}

#[test]
fn test_if_else_chain() {
    let source = r#"
        int classify(int n) {
            if (n < 0)
                return -1;
            else if (n == 0)
                return 0;
            else
                return 1;
        }

        int main() {
            print(classify(-8));
            print(classify(0));
            print(classify(3));
            return 0;
        }
    "#;
    assert_eq!(run(source).1, "-1\n0\n1\n");
}

#[test]
fn test_conditional_evaluates_one_branch() {
    let source = r#"
        int bump(int *counter, int value) {
            *counter = *counter + 1;
            return value;
        }

        int main() {
            int calls;
            int r;
            calls = 0;
            r = 1 ? bump(&calls, 10) : bump(&calls, 20);
            print(r);
            r = 0 ? bump(&calls, 10) : bump(&calls, 20);
            print(r);
            return calls;
        }
    "#;
    assert_eq!(run(source), (2, "10\n20\n".to_string()));
}

#[test]
fn test_logical_operators_short_circuit() {
    let source = r#"
        int touch(int *flag) {
            *flag = 1;
            return 1;
        }

        int main() {
            int hit;
            hit = 0;
            print(0 && touch(&hit));
            print(1 || touch(&hit));
            print(hit);
            print(1 && touch(&hit));
            return hit;
        }
    "#;
    assert_eq!(run(source), (1, "0\n1\n0\n1\n".to_string()));
}

#[test]
fn test_void_function_and_statement_call() {
    let source = r#"
        void shout(int n) {
            print(n * 2);
            return;
        }

        void quiet() {
            print("done\n");
        }

        int main() {
            shout(21);
            quiet();
            return 0;
        }
    "#;
    assert_eq!(run(source), (0, "42\ndone\n".to_string()));
}

#[test]
fn test_block_scoping_shadows() {
    let source = r#"
        int main() {
            int x;
            x = 1;
            {
                int x;
                x = 2;
                print(x);
            }
            print(x);
            return x;
        }
    "#;
    assert_eq!(run(source), (1, "2\n1\n".to_string()));
}

#[test]
fn test_uninitialized_values_are_zero() {
    let source = r#"
        int main() {
            int i;
            float f;
            char c;
            print(i);
            print(f);
            print(c);
            return 0;
        }
    "#;
    assert_eq!(run(source).1, "0\n0.0\n0\n");
}

#[test]
fn test_print_without_trailing_newline() {
    let config = RunConfig::default().with_newline_after_value(false);
    let (_, output) = run_captured(
        r#"int main() { print(1); print(" "); print(2.5); print("\n"); return 0; }"#,
        &config,
    )
    .unwrap();
    assert_eq!(output, "1 2.5\n");
}

#[test]
fn test_closure_sink() {
    let mut chunks = Vec::new();
    let code = run_source(
        r#"int main() { print("a"); print(7); return 3; }"#,
        &RunConfig::default(),
        |text: &str| chunks.push(text.to_string()),
    )
    .unwrap();
    assert_eq!(code, 3);
    assert_eq!(chunks, vec!["a", "7", "\n"]);
}

#[test]
fn test_call_function_directly() {
    let table = parse_source("int twice(int n) { return n * 2; } int main() { return 0; }")
        .unwrap();
    let capture = CaptureSink::new();
    let mut interpreter = Interpreter::new(table, RunConfig::default(), capture.clone());
    let value = interpreter
        .call_function("twice", vec![cwalk::memory::Value::Int(21)])
        .unwrap();
    assert_eq!(value, Some(cwalk::memory::Value::Int(42)));
    assert_eq!(interpreter.call_depth(), 0);
}

#[test]
fn test_main_return_value_is_converted() {
    let (code, _) = run("int main() { return 'A'; }");
    assert_eq!(code, 65);
}
