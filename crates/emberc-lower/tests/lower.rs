use emberc_lex::lex;
use emberc_lower::{lower_file, Definition, Expression, Literal, Pattern, Statement, Visibility};
use emberc_parse::parse;
use emberc_util::{FileId, Handler};

fn lower_source(source: &str) -> Vec<Definition> {
    let stream = lex(source, FileId::new(0));
    let handler = Handler::new();
    let tree = parse(&stream, &handler).unwrap_or_else(|err| panic!("{source:?} failed to parse: {err}"));
    let (_, definitions) =
        lower_file(&tree, &handler).unwrap_or_else(|err| panic!("{source:?} failed to lower: {err}"));
    definitions
}

#[test]
fn lowering_scenario_public_integer_value_definition() {
    let defs = lower_source("public let x = 39;");
    assert_eq!(defs.len(), 1);
    let Definition::Value(def) = &defs[0] else {
        panic!("expected a ValueDefinition");
    };
    assert_eq!(def.visibility, Visibility::Public);
    assert_eq!(def.defined_identifier().unwrap().as_str(), "x");
    assert_eq!(def.value, Expression::Literal(Literal::Integer(39)));
}

#[test]
fn bare_expression_procedure_body_lifts_into_a_return_statement() {
    let defs = lower_source("let f() = 1;");
    let Definition::Procedure(def) = &defs[0] else {
        panic!("expected a ProcedureDefinition");
    };
    assert_eq!(def.body.statements.len(), 1);
    assert_eq!(
        def.body.statements[0],
        Statement::ReturnStatement(Expression::Literal(Literal::Integer(1)))
    );
}

#[test]
fn record_pattern_bind_reports_no_defined_identifier() {
    let defs = lower_source("let (a, b) = (a = 1, b = 2);");
    let Definition::Value(def) = &defs[0] else {
        panic!("expected a ValueDefinition");
    };
    assert!(def.defined_identifier().is_none());
    assert!(matches!(def.pattern, Pattern::Record(_)));
}

#[test]
fn bare_identifier_pattern_reports_its_name() {
    let defs = lower_source("let x = 1;");
    let Definition::Value(def) = &defs[0] else {
        panic!("expected a ValueDefinition");
    };
    assert_eq!(def.defined_identifier().unwrap().as_str(), "x");
}

#[test]
fn all_five_literal_kinds_lower() {
    let defs = lower_source(
        r#"
        let a = 1;
        let b = 1.5;
        let c = 'x';
        let d = "hi";
        let e = true;
        let f = poison;
        "#,
    );
    let values: Vec<Expression> = defs
        .into_iter()
        .map(|def| match def {
            Definition::Value(def) => def.value,
            other => panic!("expected a ValueDefinition, got {other:?}"),
        })
        .collect();
    assert_eq!(values[0], Expression::Literal(Literal::Integer(1)));
    assert_eq!(values[1], Expression::Literal(Literal::Decimal(1.5)));
    assert_eq!(values[2], Expression::Literal(Literal::Character('x')));
    assert_eq!(values[3], Expression::Literal(Literal::String("hi".into())));
    assert_eq!(values[4], Expression::Literal(Literal::Boolean(true)));
    assert_eq!(values[5], Expression::Literal(Literal::Poison));
}

#[test]
fn string_literal_decodes_known_escapes() {
    let defs = lower_source(r#"let s = "a\nb";"#);
    let Definition::Value(def) = &defs[0] else {
        panic!("expected a ValueDefinition");
    };
    assert_eq!(def.value, Expression::Literal(Literal::String("a\nb".into())));
}

#[test]
fn pointer_type_definition_lowers_recursively() {
    let defs = lower_source("type t = int ptr ptr;");
    let Definition::Type(def) = &defs[0] else {
        panic!("expected a TypeDefinition");
    };
    use emberc_lower::TypeExpression;
    match &def.definition {
        TypeExpression::PointerType(outer) => match outer.as_ref() {
            TypeExpression::PointerType(inner) => match inner.as_ref() {
                TypeExpression::TypeId(name) => assert_eq!(name.as_str(), "int"),
                other => panic!("expected TypeId, got {other:?}"),
            },
            other => panic!("expected a nested PointerType, got {other:?}"),
        },
        other => panic!("expected PointerType, got {other:?}"),
    }
}

#[test]
fn empty_block_bodied_value_definition_is_unimplemented() {
    let stream = lex("let varname{}", FileId::new(0));
    let handler = Handler::new();
    let tree = parse(&stream, &handler).expect("parses fine");
    let err = lower_file(&tree, &handler).expect_err("an empty block has no scalar value");
    assert!(matches!(err, emberc_lower::LowerError::Unimplemented { .. }));
}

#[test]
fn procedure_definition_records_parameter_and_identifier() {
    let defs = lower_source("let add(a, b) { return a; }");
    let Definition::Procedure(def) = &defs[0] else {
        panic!("expected a ProcedureDefinition");
    };
    assert_eq!(def.identifier.as_str(), "add");
    assert_eq!(def.parameter.items.len(), 2);
}

#[test]
fn symbol_table_resolves_named_definitions_by_symbol() {
    use emberc_util::Symbol;
    let stream = lex("let x = 1; type t = int;", FileId::new(0));
    let handler = Handler::new();
    let tree = parse(&stream, &handler).expect("parses fine");
    let (table, definitions) = lower_file(&tree, &handler).expect("lowers fine");
    assert_eq!(table.len(), definitions.len());
    assert!(table.resolve(Symbol::intern("x")).is_some());
    assert!(table.resolve(Symbol::intern("t")).is_some());
}
