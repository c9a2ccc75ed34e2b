use std::io;
use std::path::Path;

use letlang::ctx::Context;
use letlang::interpreter::Interpreter;
use letlang::lexer::Lexer;
use letlang::parser::Parser;
use letlang::token::TokenKind;

struct Run {
    output: String,
    errors: Vec<String>,
}

fn run(source: &str) -> io::Result<Run> {
    let interp = Interpreter::new();
    let mut output = Vec::new();
    interp.eval(source.as_bytes(), &mut output)?;
    Ok(Run {
        output: String::from_utf8_lossy(&output).into_owned(),
        errors: interp.diagnostics().into_iter().map(|d| d.message).collect(),
    })
}

fn render_expr(source: &str) -> String {
    let ctx = Context::new();
    let expr = Parser::new(source.as_bytes(), None, ctx.clone()).parse_expression();
    assert_eq!(ctx.error_count(), 0);
    expr.to_string()
}

#[test]
fn associativity_and_precedence() {
    assert_eq!(render_expr("1 - 2 - 3;"), "((1 - 2) - 3)");
    assert_eq!(render_expr("1 + 2 * 3;"), "(1 + (2 * 3))");
    assert_eq!(render_expr("(1 + 2) * 3;"), "((1 + 2) * 3)");
}

#[test]
fn factorial_by_hand() -> io::Result<()> {
    let source = r#"
        // 5! computed one step at a time
        let acc = 1;
        let n = 5;
        let acc = acc * n; let n = n - 1;
        let acc = acc * n; let n = n - 1;
        let acc = acc * n; let n = n - 1;
        let acc = acc * n; let n = n - 1;
        print acc;
        print n;
    "#;
    let run = run(source)?;
    assert!(run.errors.is_empty(), "{:?}", run.errors);
    assert_eq!(run.output, "120\n1\n");
    Ok(())
}

#[test]
fn required_leniencies() -> io::Result<()> {
    let run = run("print 5 / 0; print x; let x = x + 1; print x;")?;
    assert!(run.errors.is_empty());
    assert_eq!(run.output, "0\n0\n1\n");
    Ok(())
}

#[test]
fn recovery_keeps_later_statements() -> io::Result<()> {
    let run = run("let = 4; print 2 * 21; print ; print 1;")?;
    assert_eq!(run.output, "42\n0\n1\n");
    assert_eq!(
        run.errors,
        vec![
            "expected identifier, got '=' while parsing let statement",
            "expected primary or unary expression, got ';' while parsing print statement",
        ]
    );
    Ok(())
}

#[test]
fn lexical_errors_are_counted_but_not_fatal() -> io::Result<()> {
    let run = run("print 1 @ + 1; /* unterminated")?;
    assert_eq!(run.output, "2\n");
    assert_eq!(
        run.errors,
        vec!["invalid input char: '@'", "non-terminated multiline comment"]
    );
    Ok(())
}

#[test]
fn dump_is_stable() {
    let interp = Interpreter::new();
    let source = "let y = -(1 + 2) * 3 / 4 - 5; print y + +y;";
    let first = interp.parse(source.as_bytes(), None).render();
    let second = interp.parse(first.as_bytes(), None).render();
    assert_eq!(interp.error_count(), 0);
    assert_eq!(first, second);
    assert_eq!(
        first,
        "let y = ((((-(1 + 2)) * 3) / 4) - 5);\nprint (y + (+y));\n"
    );
}

#[test]
fn diagnostics_carry_path_and_position() {
    let interp = Interpreter::new();
    interp.parse("print 1;\nlet = 2;".as_bytes(), Some(Path::new("demo.let")));
    let diags = interp.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].to_string(),
        "demo.let:2:5: error: expected identifier, got '=' while parsing let statement"
    );
}

#[test]
fn lexer_is_idempotent_at_eof() {
    let mut lexer = Lexer::new("print".as_bytes(), None, Context::new());
    assert_eq!(lexer.lex().kind, TokenKind::Print);
    for _ in 0..5 {
        assert_eq!(lexer.lex().kind, TokenKind::Eof);
    }
}

#[test]
fn deeply_nested_input_is_rejected_not_fatal() -> io::Result<()> {
    let n = 20_000;
    let source = format!(
        "print {}1{}; let y = {}2; print 3;",
        "(".repeat(n),
        ")".repeat(n),
        "-".repeat(n)
    );
    let run = run(&source)?;
    assert_eq!(run.output, "0\n3\n");
    assert_eq!(
        run.errors,
        vec!["expression nested too deeply", "expression nested too deeply"]
    );
    Ok(())
}
