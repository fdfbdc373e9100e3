// Pointers to locals: reads and writes through them, passing them to other
// functions, and what happens once their target is gone

use cwalk::{Error, RunConfig, RuntimeError, run_captured};

fn run(source: &str) -> Result<(i64, String), Error> {
    run_captured(source, &RunConfig::default())
}

#[test]
fn test_deref_of_address_is_value() {
    let source = r#"
        int main() {
            int x;
            x = 42;
            print(*(&x) == x);
            return *&x;
        }
    "#;
    assert_eq!(run(source).unwrap(), (42, "1\n".to_string()));
}

#[test]
fn test_write_through_pointer() {
    let source = r#"
        int main() {
            int x;
            int *p;
            x = 1;
            p = &x;
            *p = 99;
            print(x);
            *p = *p + 1;
            return x;
        }
    "#;
    assert_eq!(run(source).unwrap(), (100, "99\n".to_string()));
}

#[test]
fn test_pointer_into_callee() {
    let source = r#"
        void swap(int *a, int *b) {
            int t;
            t = *a;
            *a = *b;
            *b = t;
        }

        int main() {
            int x;
            int y;
            x = 3;
            y = 8;
            swap(&x, &y);
            print(x);
            print(y);
            return 0;
        }
    "#;
    assert_eq!(run(source).unwrap().1, "8\n3\n");
}

#[test]
fn test_pointer_to_pointer() {
    let source = r#"
        int main() {
            int x;
            int *p;
            int **pp;
            p = &x;
            pp = &p;
            **pp = 7;
            return x;
        }
    "#;
    assert_eq!(run(source).unwrap().0, 7);
}

#[test]
fn test_pointer_to_float_and_char() {
    let source = r#"
        int main() {
            float f;
            float *fp;
            char c;
            char *cp;
            fp = &f;
            cp = &c;
            *fp = 3;
            *cp = 'q';
            print(f);
            print(c);
            return 0;
        }
    "#;
    assert_eq!(run(source).unwrap().1, "3.0\n113\n");
}

#[test]
fn test_pointer_equality() {
    let source = r#"
        int main() {
            int x;
            int y;
            int *p;
            p = &x;
            print(p == &x);
            print(p != &y);
            print(p == &y);
            return 0;
        }
    "#;
    assert_eq!(run(source).unwrap().1, "1\n1\n0\n");
}

#[test]
fn test_returned_local_pointer_dangles() {
    let source = r#"
        int *escape() {
            int local;
            local = 5;
            return &local;
        }

        int main() {
            int *p;
            p = escape();
            return *p;
        }
    "#;
    let err = run(source).unwrap_err();
    assert!(
        matches!(err, Error::Runtime(RuntimeError::DanglingPointer { .. })),
        "{err:?}"
    );
}

#[test]
fn test_pointer_dangles_after_scope_exit() {
    let source = r#"
        int main() {
            int *p;
            {
                int inner;
                inner = 1;
                p = &inner;
                print(*p);
            }
            int reuse;
            reuse = 2;
            *p = 3;
            return reuse;
        }
    "#;
    let err = run(source).unwrap_err();
    match err {
        Error::Runtime(RuntimeError::DanglingPointer { location }) => {
            assert_eq!(location.line, 12);
        }
        other => panic!("expected a dangling pointer error, got {other:?}"),
    }
}

#[test]
fn test_null_pointer_dereference() {
    let source = r#"
        int main() {
            int *p;
            return *p;
        }
    "#;
    assert!(matches!(
        run(source).unwrap_err(),
        Error::Runtime(RuntimeError::NullDereference { .. })
    ));
}

#[test]
fn test_deref_of_non_pointer() {
    let source = "int main() { int x; x = 3; return *x; }";
    assert!(matches!(
        run(source).unwrap_err(),
        Error::Runtime(RuntimeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_pointer_arithmetic_is_rejected() {
    let source = "int main() { int x; int *p; p = &x; p = p + 1; return 0; }";
    assert!(matches!(
        run(source).unwrap_err(),
        Error::Runtime(RuntimeError::TypeMismatch { .. })
    ));
}

#[test]
fn test_print_pointer_is_rejected() {
    let source = "int main() { int x; print(&x); return 0; }";
    assert!(matches!(
        run(source).unwrap_err(),
        Error::Runtime(RuntimeError::TypeMismatch { .. })
    ));
}
