// Integration tests for the eud front end

use eudc::dump;
use eudc::parser::{
    parse, parse_source, tokenize, BinOp, Expr, LexError, ParseError, Parser, Stmt, TokenKind,
};
use std::fs;
use std::path::Path;

fn expression(source: &str) -> Expr {
    let mut parser = Parser::from_source(source, "expr.eud").expect("Lexing failed");
    parser.parse_expression().expect("Parsing failed")
}

#[test]
fn test_function_definition_round_trip() {
    let source = "func add(a: i32, b: i32): i32 { return a + b }";
    let program = parse_source(source, "add.eud").expect("Parsing failed");

    assert_eq!(program.len(), 1);
    let Stmt::FuncDef {
        target,
        return_type,
        params,
        body,
        ..
    } = &program.statements[0]
    else {
        panic!("Expected function definition");
    };

    assert_eq!(target.text, "add");
    assert_eq!(return_type.name(), "i32");
    assert_eq!(params.len(), 2);
    assert!(params.iter().all(|p| p.value_type.name() == "i32"));

    match body.as_slice() {
        [Stmt::Return {
            value: Expr::Binary { op, left, right },
            ..
        }] => {
            assert_eq!(*op, BinOp::Add);
            assert!(matches!(&**left, Expr::Var { token } if token.text == "a"));
            assert!(matches!(&**right, Expr::Var { token } if token.text == "b"));
        }
        other => panic!("Expected a single return of a + b, got {other:?}"),
    }
}

#[test]
fn test_operators_are_right_associative() {
    let expr = expression("1-2-3");
    let Expr::Binary { op, left, right } = &expr else {
        panic!("Expected binary expression");
    };
    assert_eq!(*op, BinOp::Sub);
    assert!(matches!(&**left, Expr::Int { token } if token.text == "1"));
    assert!(matches!(&**right, Expr::Binary { op: BinOp::Sub, .. }));

    assert_eq!(expression("2**2**3").to_string(), "Exp(Int(2), Exp(Int(2), Int(3)))");
    assert_eq!(
        expression("a < b < c").to_string(),
        "LessThan(Var(a), LessThan(Var(b), Var(c)))"
    );
}

#[test]
fn test_leading_zero_lexing() {
    let tokens = tokenize("007", "zero.eud").expect("Lexing failed");
    let ints: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Int)
        .map(|t| t.text.as_str())
        .collect();

    assert_eq!(ints, vec!["0", "0", "7"]);

    // Each zero is a statement of its own
    let program = parse(tokens).expect("Parsing failed");
    assert_eq!(program.len(), 3);
}

#[test]
fn test_assignment_restriction() {
    let program = parse_source("x = 1", "assign.eud").expect("Parsing failed");
    assert_eq!(program.statements[0].to_string(), "Assign(x, Int(1))");

    let err = parse_source("(x) = 1", "assign.eud").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedToken { ref token } if token.kind == TokenKind::Assign
    ));
}

#[test]
fn test_unclosed_constructs_point_inside_source() {
    let source = "func f(: i32 { return 0 }";
    let err = parse_source(source, "bad.eud").unwrap_err();
    let location = err.location().expect("error should carry a location");
    assert_eq!((location.row, location.col), (1, 8));

    let tokens = tokenize("(1 + 2", "bad.eud").unwrap();
    let eof_col = tokens.last().unwrap().location.col;
    let err = parse(tokens).unwrap_err();
    assert!(matches!(err, ParseError::UnclosedParenthesis { .. }));
    assert_ne!(err.location().unwrap().col, eof_col);
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize("", "empty.eud").unwrap_err(), LexError::EmptySource);
    assert!(matches!(
        parse_source("", "empty.eud"),
        Err(ParseError::Lex(LexError::EmptySource))
    ));
    assert_eq!(parse(Vec::new()).unwrap_err(), ParseError::EmptyTokenStream);
}

#[test]
fn test_fixture_program() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/math.eud");
    let source = fs::read_to_string(&path).expect("Failed to read fixture");

    let program = parse_source(&source, "math.eud").expect("Parsing failed");
    assert_eq!(program.len(), 2);

    let names: Vec<&str> = program
        .statements
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::FuncDef { target, .. } => Some(target.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["pow", "main"]);

    let Stmt::FuncDef { body, location, .. } = &program.statements[1] else {
        panic!("Expected function definition");
    };
    assert_eq!((location.row, location.col), (10, 1));
    assert_eq!(body.len(), 3);
    assert_eq!(body[1].to_string(), "Assign(x, FuncCall(Var(pow), [Int(2), Int(10)]))");
    assert!(matches!(body[2], Stmt::IfElse { .. }));
    assert_eq!(body[2].location().row, 13);
}

#[test]
fn test_fixture_json_document() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/math.eud");
    let source = fs::read_to_string(&path).expect("Failed to read fixture");
    let program = parse_source(&source, "math.eud").expect("Parsing failed");

    let doc: serde_json::Value =
        serde_json::from_str(&dump::to_json(&program).unwrap()).expect("invalid JSON");

    let pow = &doc[0];
    assert_eq!(pow["type"], "FuncDefNode");
    assert_eq!(pow["target"]["value"], "pow");
    assert_eq!(pow["valueType"]["token"]["value"], "i64");
    assert_eq!(pow["params"][1]["type"], "TypedDeclNode");
    assert_eq!(pow["params"][1]["valueType"]["token"]["value"], "u8");
    assert_eq!(pow["body"][0]["type"], "VarInitNode");
    assert_eq!(pow["body"][1]["type"], "WhileNode");
    assert_eq!(pow["body"][1]["condition"]["type"], "GreaterThanNode");
    assert_eq!(pow["body"][1]["body"][0]["value"]["type"], "MulNode");
    assert_eq!(pow["body"][2]["type"], "ReturnNode");
    assert_eq!(pow["fp"]["filename"], "math.eud");

    let call = &doc[1]["body"][1]["value"];
    assert_eq!(call["type"], "FuncCallNode");
    assert_eq!(call["args"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_parsers_run_independently_on_threads() {
    let sources = ["x = 1 + 2", "func f(): u8 { return 0 }", "while (a) { a = a - 1 }"];

    let handles: Vec<_> = sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let source = source.to_string();
            std::thread::spawn(move || parse_source(&source, &format!("thread{i}.eud")))
        })
        .collect();

    for handle in handles {
        let program = handle.join().unwrap().expect("Parsing failed");
        assert_eq!(program.len(), 1);
    }
}
