use std::fs;

use stackline::{
    BufferHost, Error,
    error::{RuntimeError, SemanticError},
    interpreter::{
        evaluator::{Options, Outcome},
        value::Value,
    },
    run_source,
};
use walkdir::WalkDir;

#[test]
fn script_corpus_matches_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "sl"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out"))
            .unwrap_or_else(|e| panic!("Missing expected output for {path:?}: {e}"));
        let input = fs::read_to_string(path.with_extension("in")).unwrap_or_default();

        let mut host = BufferHost::with_input(input.lines());
        count += 1;

        match run_source(&source, &Options::default(), &mut host) {
            Ok(Outcome::Completed { .. } | Outcome::Exited { code: 0 }) => {},
            Ok(Outcome::Exited { code }) => panic!("Script {path:?} exited with {code}"),
            Err(e) => panic!("Script {path:?} failed:\n{source}\nError: {e}"),
        }

        let expected: Vec<&str> = expected.lines().collect();
        assert_eq!(host.output(), expected.as_slice(), "output of {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn run(src: &str) -> (Result<Outcome, Error>, BufferHost) {
    let mut host = BufferHost::new();
    let result = run_source(src, &Options::default(), &mut host);

    (result, host)
}

fn assert_success(src: &str) -> Vec<Value> {
    match run(src).0 {
        Ok(Outcome::Completed { stack }) => stack,
        Ok(Outcome::Exited { code }) => panic!("Script exited with {code}"),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str, category: &str) -> Error {
    match run(src).0 {
        Err(e) => {
            assert_eq!(e.category(), category, "unexpected error: {e}");
            e
        },
        Ok(outcome) => panic!("Script succeeded with {outcome:?} but was expected to fail"),
    }
}

fn printed(src: &str) -> Vec<String> {
    let (result, host) = run(src);
    if let Err(e) = result {
        panic!("Script failed: {e}");
    }

    host.output().to_vec()
}

#[test]
fn equality_of_literals() {
    assert_eq!(assert_success("5 EQ 5"), [Value::Bool(true)]);
    assert_eq!(assert_success("\"a b\" EQ \"a b\""), [Value::Bool(true)]);
    assert_eq!(assert_success("True EQ False"), [Value::Bool(false)]);
}

#[test]
fn equality_of_mixed_types_is_semantic() {
    let err = assert_failure("5 EQ True", "Semantic");

    assert!(err.to_string().starts_with("Semantic >> Cannot apply 'EQ' to number and boolean"));
}

#[test]
fn arithmetic_macros() {
    assert_eq!(assert_success("ADD 1 2 SUB 5 3 MUL 2 4 DIV 1 4"),
               [Value::Num(3.0), Value::Num(2.0), Value::Num(8.0), Value::Num(0.25)]);
    assert_eq!(assert_success("ADD STR (left and) \" right\""),
               [Value::from("left and right")]);
    assert_failure("SUB \"a\" 1", "Semantic");
    assert_failure("DIV 4 0", "Runtime");
}

#[test]
fn grouped_logic() {
    assert_eq!(assert_success("((True AND True) OR False)"), [Value::Bool(true)]);
    assert_eq!(assert_success("(NOT (1 GT 2))"), [Value::Bool(true)]);
}

#[test]
fn very_deep_groups_fail_cleanly() {
    let depth = 10_000;
    let source = format!("{}True{}", "(".repeat(depth), ")".repeat(depth));
    let err = assert_failure(&source, "Runtime");

    assert!(matches!(err, Error::Runtime(RuntimeError::NestingTooDeep { .. })));
}

#[test]
fn very_deep_macro_chains_fail_cleanly() {
    let source = format!("{}1 1", "ADD 1 ".repeat(10_000));

    assert_failure(&source, "Runtime");
}

#[test]
fn unmatched_group_is_runtime() {
    let err = assert_failure("(True AND True", "Runtime");

    assert!(matches!(err, Error::Runtime(RuntimeError::UnmatchedParen { .. })));
}

#[test]
fn variables() {
    assert_eq!(assert_success("VAR ASSIGN 5 TO x\nx EQ 5"), [Value::Bool(true)]);
    assert_eq!(assert_success("VAR ASSIGN True TO flag\nflag AND True"), [Value::Bool(true)]);
}

#[test]
fn undefined_variable_is_semantic() {
    let err = assert_failure("ghost EQ 5", "Semantic");

    assert!(matches!(err, Error::Semantic(SemanticError::UndefinedVariable { .. })));
    assert!(err.to_string().contains("not defined"));
}

#[test]
fn jump_runs_section_once() {
    let source = "\
JUMP work IF True
SECTION work
  PRINT \"working\"
END
PRINT \"finished\"";

    assert_eq!(printed(source), ["working", "finished"]);
}

#[test]
fn false_jump_has_no_effect() {
    let source = "\
JUMP work IF (1 GT 2)
SECTION work
  PRINT \"working\"
END";

    assert_eq!(printed(source), Vec::<String>::new());
}

#[test]
fn false_jump_without_any_section_completes() {
    let (result, host) = run("JUMP nowhere IF False\nPRINT 1");

    assert_eq!(result, Ok(Outcome::Completed { stack: Vec::new() }));
    assert_eq!(host.output(), ["1"]);
}

#[test]
fn section_labels_are_unique() {
    assert_failure("SECTION a:\nEND\nSECTION a\nEND", "Semantic");
}

#[test]
fn jump_needs_if() {
    assert_failure("JUMP a PRINT 1\nSECTION a\nEND", "Syntax");
}

#[test]
fn if_blocks() {
    let source = "\
VAR ASSIGN 4 TO size
IF (size GTE 4)
  PRINT \"large\"
END
IF (size LT 4)
  PRINT \"small\"
END";

    assert_eq!(printed(source), ["large"]);
}

#[test]
fn print_concatenates_one_line() {
    assert_eq!(printed("PRINT \"Hello, \" \"world\" 1 True\nPRINT \"next\""),
               ["Hello, world1true", "next"]);
}

#[test]
fn read_input() {
    let mut host = BufferHost::with_input(["7", "0"]);
    let outcome = run_source("READ NUM AND PRINT \"Pick:\"\nREAD BOOL\nREAD",
                             &Options::default(),
                             &mut host).unwrap();

    assert_eq!(outcome,
               Outcome::Completed { stack: vec![Value::Num(7.0), Value::Bool(false), Value::Null] });
    assert_eq!(host.prompts(), ["Pick:"]);
}

#[test]
fn exit_codes() {
    assert_eq!(run("EXIT 4").0, Ok(Outcome::Exited { code: 4 }));
    assert_eq!(run("1 2\nEXIT").0, Ok(Outcome::Exited { code: 0 }));
    assert_failure("EXIT \"four\"", "Semantic");
}

#[test]
fn stack_overflow_and_underflow() {
    let pushes = vec!["1"; 33].join(" ");
    let err = assert_failure(&pushes, "Runtime");
    assert!(err.to_string().contains("Stack overflow"));

    assert_eq!(assert_success(&vec!["1"; 32].join(" ")).len(), 32);

    let err = assert_failure("AND True", "Runtime");
    assert!(err.to_string().contains("Stack underflow"));
}

#[test]
fn stack_capacity_is_configurable() {
    let options = Options { stack_capacity: 2 };
    let err = run_source("1 2 3", &options, BufferHost::new()).unwrap_err();

    assert_eq!(err, Error::Runtime(RuntimeError::StackOverflow { capacity: 2 }));
}

#[test]
fn short_names_take_the_stack_top() {
    assert_eq!(printed("5 VAR ASSIGN s TO total\nPRINT total"), ["5"]);
    assert_failure("VAR ASSIGN Sum TO total", "Runtime");
}

#[test]
fn malformed_literals_are_syntax() {
    assert_failure("NUM abc", "Syntax");
    assert_failure("PRINT \"never closed", "Syntax");
    assert_failure("STR no-paren", "Syntax");
    assert_failure("SECTION 1st\nEND", "Syntax");
}

#[test]
fn comments_are_ignored() {
    assert_eq!(assert_success("# header\n1 # trailing note EQ 2\n"), [Value::Num(1.0)]);
}

#[test]
fn hash_glued_to_a_word_is_not_a_comment() {
    assert_eq!(printed("#note PRINT 1\nPRINT 2"), ["1", "2"]);
    assert_eq!(printed("PRINT \"a\" #tag \"b\""), ["ab"]);
}
