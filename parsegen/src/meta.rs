//! The grammar of grammar description files, over the terminals produced by
//! [`Lexer`](crate::lexer::Lexer).

use grammar::{Grammar, Production, Rules, Symbol};

use crate::tokens::TokenKind;

/// Axiom of the description grammar.
pub const AXIOM: &str = "S";

/// Build the description grammar. Terminal names are token kind names.
pub fn grammar() -> grammar::Result<Grammar> {
    use TokenKind::*;

    let n = Symbol::nonterminal;
    let t = TokenKind::symbol;

    let rules = vec![
        (
            AXIOM,
            vec![
                t(AxiomKeyword),
                t(NTerm),
                t(NTermKeyword),
                t(NTerm),
                n("N"),
                n("T"),
                n("R"),
            ],
        ),
        // Further non-terminal declarations.
        ("N", vec![t(NTerm), n("N")]),
        ("N", vec![]),
        // Terminal declarations, at least one.
        ("T", vec![t(TermKeyword), t(Term), n("T1")]),
        ("T1", vec![t(Term), n("T1")]),
        ("T1", vec![]),
        // Rules, at least one.
        ("R", vec![n("R'"), n("R1")]),
        ("R1", vec![n("R'"), n("R1")]),
        ("R1", vec![]),
        ("R'", vec![t(RuleKeyword), t(NTerm), t(Equal), n("V")]),
        // Alternatives of a rule body, one per line.
        ("V", vec![n("V1"), n("V2")]),
        ("V1", vec![t(Term), n("V3")]),
        ("V1", vec![t(NTerm), n("V3")]),
        ("V1", vec![t(EpsKeyword)]),
        ("V3", vec![t(Term), n("V3")]),
        ("V3", vec![t(NTerm), n("V3")]),
        ("V3", vec![]),
        ("V2", vec![t(NewLine), n("V")]),
        ("V2", vec![]),
    ];

    let mut table = Rules::new();
    for (lhs, symbols) in rules {
        let production = if symbols.is_empty() {
            Production::epsilon()
        } else {
            Production::new(symbols)
        };
        table.add(lhs, production);
    }
    Grammar::new(AXIOM, table)
}
