//! Parse grammar description files end to end, then use the described
//! grammar to parse sentences of its own.

use grammar::Symbol;
use parsegen::{describe, lexer, Lexer, Node, ParseError, Parser, TokenKind};

const SINGLE: &str = "$AXIOM S\n$NTERM S\n$TERM \"a\"\n$RULE S = \"a\"";

const ARITHMETIC: &str = "\
$AXIOM E
$NTERM E E' T T' F
$TERM \"+\" \"*\" \"(\" \")\" \"n\"
$RULE E = T E'
$RULE E' = \"+\" T E'
           $EPS
$RULE T = F T'
$RULE T' = \"*\" F T'
           $EPS
$RULE F = \"n\"
          \"(\" E \")\"
";

fn parse(source: &str) -> Result<Node, ParseError> {
    Parser::meta().unwrap().parse(Lexer::new(source))
}

#[test]
fn single_rule_description() {
    let tree = parse(SINGLE).unwrap();
    assert_eq!(tree.symbol(), Symbol::nonterminal("S"));
    assert_eq!(
        tree.production().unwrap().symbols()[..2],
        [TokenKind::AxiomKeyword.symbol(), TokenKind::NTerm.symbol()]
    );

    // The described grammar S -> "a" parses the single word `a`.
    let described = Parser::new(describe::grammar_of(&tree).unwrap()).unwrap();
    let sentence = described.parse_words("a").unwrap();
    assert_eq!(sentence.symbol(), Symbol::nonterminal("S"));
    assert_eq!(
        sentence.production().unwrap().symbols(),
        &[Symbol::terminal("a")][..]
    );
    assert_eq!(sentence.children().len(), 1);
    assert_eq!(sentence.children()[0].text(), Some("a"));
}

#[test]
fn stray_input_after_description() {
    let tests = vec!["@", " x", "$", " =", " \"a\" @"];
    for suffix in tests {
        let source = format!("{}{}", SINGLE, suffix);
        match parse(&source) {
            Err(ParseError::TrailingInput { .. }) => (),
            other => panic!("suffix {:?}: {:?}", suffix, other),
        }
    }
}

#[test]
fn leaves_reproduce_filtered_tokens() {
    let tree = parse(ARITHMETIC).unwrap();
    let leaves: Vec<&str> = tree.leaves().filter_map(|leaf| leaf.text()).collect();
    let tokens: Vec<&str> = lexer::filter(lexer::scan(ARITHMETIC))
        .iter()
        .map(|token| token.text)
        .collect();
    assert_eq!(leaves, tokens);
    assert_eq!(leaves.iter().filter(|text| **text == "\n").count(), 3);
}

#[test]
fn described_grammar_parses_sentences() {
    let tree = parse(ARITHMETIC).unwrap();
    let parser = Parser::new(describe::grammar_of(&tree).unwrap()).unwrap();

    let sentence = parser.parse_words("n * ( n + n )").unwrap();
    let words: Vec<&str> = sentence.leaves().filter_map(|leaf| leaf.text()).collect();
    assert_eq!(words, vec!["n", "*", "(", "n", "+", "n", ")"]);

    let tests = vec![
        ("n +", "1:4: unexpected end of input, expected one of \"(\", \"n\""),
        ("n n", "1:3: trailing input after a complete sentence: \"n\" `n`"),
        ("( n", "1:4: unexpected end of input, expected \")\""),
        ("n -", "1:3: trailing input after a complete sentence: \"-\" `-`"),
        ("n - n", "1:3: unrecognized input `-`"),
        ("n - n - n", "1:3: unrecognized input `-`"),
        ("( - n )", "1:3: unrecognized input `-`"),
    ];
    for (input, expected) in tests {
        let err = parser.parse_words(input).unwrap_err();
        assert_eq!(err.to_string(), expected, "input: {:?}", input);
    }
}

#[test]
fn description_errors() {
    let tests = vec![
        (
            "$AXIOM S\n$TERM \"a\"",
            "2:1: unexpected \"TermKeyword\" `$TERM`, expected \"NTermKeyword\"",
        ),
        (
            "$AXIOM S\n$NTERM S\n$TERM \"a\"\n",
            "4:1: unexpected end of input, expected one of \"RuleKeyword\", \"Term\"",
        ),
        (
            "$AXIOM S\n$NTERM S\n$TERM \"a\"\n$RULE S = @",
            "4:11: unrecognized input `@`",
        ),
        ("$AXIOM s", "1:8: unrecognized input `s`"),
        (
            "$AXIOM S\n$NTERM S\n$TERM \"a\" \"b\"\n$RULE S = \"a\" @ \"b\"",
            "4:15: unrecognized input `@`",
        ),
        (
            "$AXIOM S\n$NTERM S\n$TERM \"a\" \"b\"\n$RULE S = \"a\" @\n$RULE S = \"b\"",
            "4:15: unrecognized input `@`",
        ),
        (
            "$AXIOM S\n$NTERM S\n$TERM \"a\" \"b\"\n$RULE S = \"a\" \"B\"\n$RULE S = \"b\"",
            "4:15: unrecognized input `\\\"`",
        ),
    ];
    for (source, expected) in tests {
        let err = parse(source).unwrap_err();
        assert_eq!(err.to_string(), expected, "source: {:?}", source);
    }
}

#[test]
fn conflicting_description_is_rejected() {
    let source = "$AXIOM S\n$NTERM S\n$TERM \"a\"\n$RULE S = \"a\"\n\"a\" S\n";
    let tree = parse(source).unwrap();
    let err = Parser::new(describe::grammar_of(&tree).unwrap()).unwrap_err();
    assert!(err.to_string().starts_with("grammar is not LL(1): S on \"a\""), "{}", err);
}
