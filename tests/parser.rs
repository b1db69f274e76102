//! Parser behaviour for real-world ESI conditions, precedence and errors.

use esi_expr::{
    BinaryOperator, Error, LexErrorKind, LogicalOperator, MAX_DEPTH, Node, ParseErrorKind,
    UnaryOperator, parse, parse_str,
};

fn exists_cookie(name: &str) -> Node {
    Node::call("exists", vec![Node::member("HTTP_COOKIE", name)])
}

// -----------------------------------------------------------
// Basic expressions.
// -----------------------------------------------------------

#[test]
fn binary_identifier_and_literal() {
    let node = parse("$(access_granted)=='true'").expect("parse");
    let Node::BinaryExpression {
        operator,
        left,
        right,
    } = node
    else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, BinaryOperator::Equal);
    assert_eq!(*left, Node::identifier("access_granted"));
    assert_eq!(*right, Node::string("true"));
}

#[test]
fn call_expression() {
    let node = parse("$exists($(user_email))").expect("parse");
    assert_eq!(
        node,
        Node::call("exists", vec![Node::identifier("user_email")])
    );
}

#[test]
fn call_with_no_arguments() {
    assert_eq!(parse("$time()").expect("parse"), Node::call("time", vec![]));
}

#[test]
fn call_nested_in_arguments() {
    let node = parse("$lower($substr($(s), 0, 3))").expect("parse");
    assert_eq!(
        node,
        Node::call(
            "lower",
            vec![Node::call(
                "substr",
                vec![Node::identifier("s"), Node::number(0), Node::number(3)]
            )]
        )
    );
}

#[test]
fn unary_not_with_call() {
    let node = parse("!$exists($(HTTP_COOKIE{'remember_me'}))").expect("parse");
    let Node::UnaryExpression { operator, argument } = &node else {
        panic!("expected unary expression");
    };
    assert_eq!(*operator, UnaryOperator::Not);
    assert!(operator.prefix());
    assert_eq!(**argument, exists_cookie("remember_me"));
}

#[test]
fn member_expression() {
    let node = parse("$(HTTP_COOKIE{'remember_me'})").expect("parse");
    assert_eq!(node, Node::member("HTTP_COOKIE", "remember_me"));
}

#[test]
fn member_expression_with_index() {
    let node = parse("$(list{2})").expect("parse");
    assert_eq!(node, Node::member_index("list", 2));
}

#[test]
fn array_and_object_literals() {
    let node = parse("{'a': [1, 'two'], 'b': $(c)}").expect("parse");
    assert_eq!(
        node,
        Node::object([
            (
                "a",
                Node::array(vec![Node::number(1), Node::string("two")])
            ),
            ("b", Node::identifier("c")),
        ])
    );
}

#[test]
fn empty_array_and_object() {
    assert_eq!(parse("[]").expect("parse"), Node::array(vec![]));
    assert_eq!(
        parse("{}").expect("parse"),
        Node::object(Vec::<(String, Node)>::new())
    );
}

// -----------------------------------------------------------
// Logical expressions.
// -----------------------------------------------------------

#[test]
fn logical_and_of_comparisons() {
    let node =
        parse("$(HTTP_USER_AGENT{'os'})=='WIN' & $(HTTP_USER_AGENT{'browser'})=='MSIE'")
            .expect("parse");
    assert_eq!(
        node,
        Node::member("HTTP_USER_AGENT", "os")
            .equals(Node::string("WIN"))
            .and(Node::member("HTTP_USER_AGENT", "browser").equals(Node::string("MSIE")))
    );
}

#[test]
fn logical_or_of_calls() {
    let node = parse(
        "$exists($(HTTP_COOKIE{'remember_me'})) | $exists($(HTTP_COOKIE{'accessToken'}))",
    )
    .expect("parse");
    assert_eq!(
        node,
        exists_cookie("remember_me").or(exists_cookie("accessToken"))
    );
}

#[test]
fn logical_with_unary_left() {
    let node = parse(
        "!$exists($(HTTP_COOKIE{'remember_me'})) | $exists($(HTTP_COOKIE{'accessToken'}))",
    )
    .expect("parse");
    assert_eq!(
        node,
        (!exists_cookie("remember_me")).or(exists_cookie("accessToken"))
    );
}

#[test]
fn multiple_ors_nest_to_the_right() {
    let node = parse(
        "$exists($(HTTP_COOKIE{'remember_me'})) | \
         $exists($(HTTP_COOKIE{'accessToken'})) | \
         $exists($(HTTP_COOKIE{'sessionKey'}))",
    )
    .expect("parse");
    assert_eq!(
        node,
        exists_cookie("remember_me")
            .or(exists_cookie("accessToken").or(exists_cookie("sessionKey")))
    );
}

#[test]
fn double_ampersand() {
    let node = parse("$(someVar) == 'a' && $(someVar2) == 'b'").expect("parse");
    assert_eq!(
        node,
        Node::identifier("someVar").equals(Node::string("a")).logical(
            LogicalOperator::DoubleAnd,
            Node::identifier("someVar2").equals(Node::string("b"))
        )
    );
}

#[test]
fn mixed_spellings_share_one_level() {
    let node = parse("$(a) && $(b) | $(c) || $(d)").expect("parse");
    assert_eq!(
        node,
        Node::identifier("a").logical(
            LogicalOperator::DoubleAnd,
            Node::identifier("b").or(Node::identifier("c")
                .logical(LogicalOperator::DoubleOr, Node::identifier("d")))
        )
    );
}

// -----------------------------------------------------------
// Comparisons and numbers.
// -----------------------------------------------------------

#[test]
fn comparison_operators() {
    for (input, operator) in [
        ("$(someVar) == 59", BinaryOperator::Equal),
        ("$(someVar) != 59", BinaryOperator::NotEqual),
        ("$(someVar) < 59", BinaryOperator::Less),
        ("$(someVar) <= 59", BinaryOperator::LessOrEqual),
        ("$(someVar) > 59", BinaryOperator::Greater),
        ("$(someVar) >= 59", BinaryOperator::GreaterOrEqual),
    ] {
        let node = parse(input).expect("parse");
        assert_eq!(
            node,
            Node::identifier("someVar").compare(operator, Node::number(59)),
            "{input}"
        );
    }
}

#[test]
fn negative_number_literal() {
    let node = parse("$(someVar) == -1").expect("parse");
    assert_eq!(node, Node::identifier("someVar").equals(Node::number(-1)));
}

#[test]
fn comparison_is_valid_root() {
    let node = parse("$(someVar) <= 590").expect("parse");
    assert_eq!(node.kind_name(), "BinaryExpression");
}

#[test]
fn comparison_against_negation() {
    let node = parse("$(a) == !$(b)").expect("parse");
    assert_eq!(node, Node::identifier("a").equals(!Node::identifier("b")));
}

#[test]
fn stacked_negation() {
    let node = parse("!!$(a)").expect("parse");
    assert_eq!(node, !!Node::identifier("a"));
}

// -----------------------------------------------------------
// Parentheses.
// -----------------------------------------------------------

#[test]
fn parenthesized_whole_expression() {
    let node = parse("($(someVar) <= 590)").expect("parse");
    assert_eq!(
        node,
        Node::identifier("someVar").less_or_equal(Node::number(590))
    );
}

#[test]
fn parenthesized_operands() {
    let node = parse("($(someVar)) <= (590)").expect("parse");
    assert_eq!(
        node,
        Node::identifier("someVar").less_or_equal(Node::number(590))
    );
}

#[test]
fn parenthesized_logical_sides() {
    let node = parse("($(someVar) == 1) && ($(someVar) == 2)").expect("parse");
    assert_eq!(
        node,
        Node::identifier("someVar").equals(Node::number(1)).logical(
            LogicalOperator::DoubleAnd,
            Node::identifier("someVar").equals(Node::number(2))
        )
    );
}

#[test]
fn deeply_redundant_parentheses() {
    assert_eq!(
        parse("((($(x))))").expect("parse"),
        parse("$(x)").expect("parse")
    );
}

#[test]
fn parentheses_override_right_association() {
    let node = parse("($(a) | $(b)) & $(c)").expect("parse");
    assert_eq!(
        node,
        Node::identifier("a")
            .or(Node::identifier("b"))
            .and(Node::identifier("c"))
    );
}

#[test]
fn parenthesized_logical_in_comparison() {
    let node = parse("($(a) | $(b)) == 'x'").expect("parse");
    assert_eq!(
        node,
        Node::identifier("a")
            .or(Node::identifier("b"))
            .equals(Node::string("x"))
    );
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn error_unbalanced_trailing_paren() {
    let err = parse("$(a)=='WIN' & $(b)=='MSIE')").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedChar(')'));
    assert_eq!(err.to_string(), "Unexpected char ) at 0:26");
}

#[test]
fn error_missing_close_paren() {
    let err = parse("($(a) == 1").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfLine);
    assert_eq!(err.to_string(), "Unexpected end of line");
}

#[test]
fn error_chained_comparison() {
    let err = parse("$(a) < $(b) < $(c)").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected char < at 0:12");
}

#[test]
fn error_trailing_comma_in_call() {
    let err = parse("$f($(a), )").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected char ) at 0:9");
}

#[test]
fn error_trailing_comma_in_array() {
    assert!(parse("[1, 2,]").is_err());
}

#[test]
fn error_trailing_comma_in_object() {
    assert!(parse("{'a': 1,}").is_err());
}

#[test]
fn error_object_key_must_be_literal() {
    let err = parse("{$(a): 1}").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected char $ at 0:1");
}

#[test]
fn error_missing_operand() {
    let err = parse("$(a) ==").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfLine);
    let err = parse("$(a) &").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedEndOfLine);
}

#[test]
fn error_operator_at_start() {
    let err = parse("== 1").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected char = at 0:0");
}

#[test]
fn error_two_expressions() {
    let err = parse("$(a) $(b)").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected char $ at 0:5");
}

#[test]
fn error_member_without_close_brace() {
    let err = parse("$(a{'b')").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected char ) at 0:7");
}

#[test]
fn error_position_on_second_line() {
    let err = parse("$(a) ==\n  ]").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected char ] at 1:2");
}

#[test]
fn lexer_errors_surface_through_parse() {
    let err = parse("$(a) == $time").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Lex(LexErrorKind::UnexpectedEndOfLine));
}

// -----------------------------------------------------------
// Unified error type.
// -----------------------------------------------------------

#[test]
fn parse_str_lex_error() {
    let err = parse_str("$time)").unwrap_err();
    assert!(matches!(err, Error::Lex(_)));
    assert_eq!(err.to_string(), "Unexpected char ) at 0:5");
    assert_eq!(err.position().column, 5);
}

#[test]
fn parse_str_parse_error() {
    let err = parse_str("$(a) $(b)").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn parse_str_matches_parse() {
    let input = "!$exists($(HTTP_COOKIE{'remember_me'})) | $(x) >= 3";
    assert_eq!(
        parse_str(input).expect("parse_str"),
        parse(input).expect("parse")
    );
}

// -----------------------------------------------------------
// Nesting limit.
// -----------------------------------------------------------

#[test]
fn deeply_nested_groups_are_rejected_not_overflowed() {
    let input = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
    let err = parse(&input).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('('));
    assert_eq!(err.position.offset, MAX_DEPTH);
}

#[test]
fn deeply_nested_lists_and_negation_are_rejected() {
    let arrays = format!("{}1", "[".repeat(MAX_DEPTH + 1));
    assert_eq!(
        parse(&arrays).unwrap_err().kind,
        ParseErrorKind::UnexpectedChar('[')
    );
    let negations = format!("{}$(a)", "!".repeat(10_000));
    assert_eq!(
        parse(&negations).unwrap_err().kind,
        ParseErrorKind::UnexpectedChar('!')
    );
}

#[test]
fn long_logical_chain_is_bounded() {
    let chain = |n: usize| vec!["$(a)"; n].join(" & ");
    assert!(parse(&chain(MAX_DEPTH)).is_ok());
    let err = parse(&chain(10_000)).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('&'));
}
