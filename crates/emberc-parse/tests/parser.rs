use emberc_lex::lex;
use emberc_parse::{parse, Construct, ParseTree};
use emberc_util::{FileId, Handler};

fn parse_source(source: &str) -> ParseTree {
    let stream = lex(source, FileId::new(0));
    let handler = Handler::new();
    parse(&stream, &handler).unwrap_or_else(|err| panic!("{source:?} failed to parse: {err}"))
}

fn children<'a>(tree: &'a ParseTree, construct: Construct) -> &'a [ParseTree] {
    let (actual, children) = tree.as_branch().expect("expected a branch node");
    assert_eq!(actual, construct);
    children
}

#[test]
fn scenario_one_bare_block_definition() {
    let file = parse_source("let varname{}");
    let defs = children(&file, Construct::File);
    assert_eq!(defs.len(), 1);
    let def_children = children(&defs[0], Construct::ValueDefinition);
    assert_eq!(def_children.len(), 4);
    assert_eq!(def_children[1].as_leaf().unwrap().lexeme.as_str(), "let");
    assert_eq!(def_children[2].as_leaf().unwrap().lexeme.as_str(), "varname");
    let block_children = children(&def_children[3], Construct::Block);
    assert!(block_children.is_empty());
}

#[test]
fn scenario_two_typed_value_definition() {
    let file = parse_source("int varname = 5;");
    let defs = children(&file, Construct::File);
    let def_children = children(&defs[0], Construct::ValueDefinition);
    assert_eq!(def_children[1].as_leaf().unwrap().lexeme.as_str(), "int");
    assert_eq!(def_children[2].as_leaf().unwrap().lexeme.as_str(), "varname");
    assert_eq!(def_children[3].as_leaf().unwrap().lexeme.as_str(), "5");
}

#[test]
fn scenario_three_procedure_definition_with_unreachable() {
    let file = parse_source("let varname() { unreachable; }");
    let defs = children(&file, Construct::File);
    let def_children = children(&defs[0], Construct::ProcedureDefinition);
    assert_eq!(def_children.len(), 5);
    let parameter = children(&def_children[3], Construct::RecordPattern);
    assert!(parameter.is_empty());
    let block_children = children(&def_children[4], Construct::Block);
    assert_eq!(block_children.len(), 1);
    assert_eq!(
        block_children[0].as_leaf().unwrap().lexeme.as_str(),
        "unreachable"
    );
}

#[test]
fn scenario_four_type_definition() {
    let file = parse_source("type typename = int;");
    let defs = children(&file, Construct::File);
    let def_children = children(&defs[0], Construct::TypeDefinition);
    assert_eq!(def_children[1].as_leaf().unwrap().lexeme.as_str(), "typename");
    assert_eq!(def_children[2].as_leaf().unwrap().lexeme.as_str(), "int");
}

#[test]
fn root_extents_span_all_leaves() {
    let file = parse_source("type t = int; let x = 1;");
    let extents = file.extents();
    assert_eq!(extents.start, 0);
    assert_eq!(extents.end, "type t = int; let x = 1;".len());
}

#[test]
fn record_pattern_supports_keyed_and_bare_items() {
    let file = parse_source("let f(a, b = c) { unreachable; }");
    let defs = children(&file, Construct::File);
    let def_children = children(&defs[0], Construct::ProcedureDefinition);
    let parameter = children(&def_children[3], Construct::RecordPattern);
    assert_eq!(parameter.len(), 2);
    assert!(parameter[0].as_leaf().is_some());
    let item = children(&parameter[1], Construct::RecordPatternItem);
    assert_eq!(item.len(), 2);
}

#[test]
fn conditional_and_procedure_call_round_trip() {
    let file = parse_source("let x = if cond() { return 1; } else { return 2; };");
    let defs = children(&file, Construct::File);
    let def_children = children(&defs[0], Construct::ValueDefinition);
    let conditional = children(&def_children[3], Construct::Conditional);
    assert_eq!(conditional.len(), 3);
    let call = children(&conditional[0], Construct::ProcedureCall);
    assert_eq!(call.len(), 2);
}

#[test]
fn pointer_type_chains_postfix_ptr() {
    let file = parse_source("type t = int ptr ptr;");
    let defs = children(&file, Construct::File);
    let def_children = children(&defs[0], Construct::TypeDefinition);
    let outer = children(&def_children[2], Construct::PointerType);
    assert_eq!(outer.len(), 1);
    let inner = children(&outer[0], Construct::PointerType);
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].as_leaf().unwrap().lexeme.as_str(), "int");
}

#[test]
fn binding_statement_inside_block() {
    let file = parse_source("let f() { let y = 1; return y; }");
    let defs = children(&file, Construct::File);
    let def_children = children(&defs[0], Construct::ProcedureDefinition);
    let block_children = children(&def_children[4], Construct::Block);
    assert_eq!(block_children.len(), 2);
    let binding = children(&block_children[0], Construct::ValueDefinition);
    assert_eq!(binding[2].as_leaf().unwrap().lexeme.as_str(), "y");
    let ret = children(&block_children[1], Construct::ReturnStatement);
    assert_eq!(ret[0].as_leaf().unwrap().lexeme.as_str(), "y");
}

#[test]
fn missing_closing_brace_is_a_fatal_error() {
    let stream = lex("let f() { return 1;", FileId::new(0));
    let handler = Handler::new();
    let result = parse(&stream, &handler);
    assert!(result.is_err());
    assert!(handler.has_errors());
}
