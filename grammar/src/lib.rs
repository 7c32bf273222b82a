use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt::{self, Display};
use std::str::FromStr;

mod error;
pub use error::GrammarError;
mod parser;
mod sets;
pub use sets::{FirstSets, FollowSets};
mod table;
pub use table::Table;

pub type Result<T> = std::result::Result<T, GrammarError>;

/// A grammar symbol.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Symbol {
    /// Matches a single input token of the same name.
    Terminal(String),
    /// Rewritten by one of its productions.
    NonTerminal(String),
    /// The empty sequence.
    Epsilon,
    /// Marks the end of the input.
    EndOfInput,
}

impl Symbol {
    pub fn terminal(name: &str) -> Self {
        Symbol::Terminal(name.to_owned())
    }

    pub fn nonterminal(name: &str) -> Self {
        Symbol::NonTerminal(name.to_owned())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Name of a terminal or non-terminal. Epsilon and end of input have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => Some(name),
            Symbol::Epsilon | Symbol::EndOfInput => None,
        }
    }
}

/// Terminals are quoted with `"`, or with `'` when the name holds a double
/// quote.
impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::Terminal(name) if name.contains('"') => write!(f, "'{}'", name),
            Symbol::Terminal(name) => write!(f, "\"{}\"", name),
            Symbol::NonTerminal(name) => write!(f, "{}", name),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::EndOfInput => write!(f, "$"),
        }
    }
}

/// The rhs of a rewrite rule. An empty sequence and a lone epsilon both
/// derive the empty string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Production(Vec<Symbol>);

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Production(symbols)
    }

    pub fn epsilon() -> Self {
        Production(vec![Symbol::Epsilon])
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.iter().all(|s| *s == Symbol::Epsilon)
    }
}

impl From<Vec<Symbol>> for Production {
    fn from(symbols: Vec<Symbol>) -> Self {
        Production(symbols)
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{}", Symbol::Epsilon);
        }
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// Productions keyed by the name of the non-terminal they rewrite.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Rules(BTreeMap<String, Vec<Production>>);

impl Rules {
    pub fn new() -> Self {
        Rules(BTreeMap::new())
    }

    /// Append a production for `lhs`. Order among a non-terminal's
    /// productions is preserved.
    pub fn add(&mut self, lhs: &str, production: Production) {
        self.0.entry(lhs.to_owned()).or_default().push(production);
    }

    pub fn get(&self, lhs: &str) -> Option<&[Production]> {
        self.0.get(lhs).map(|p| p.as_slice())
    }

    pub fn contains(&self, lhs: &str) -> bool {
        self.0.contains_key(lhs)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<Production>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An axiom together with the rules reachable from it. Always satisfies
/// closure: every non-terminal used in a production has productions of its
/// own.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grammar {
    axiom: String,
    rules: Rules,
}

impl Grammar {
    pub fn new(axiom: &str, rules: Rules) -> Result<Self> {
        if !rules.contains(axiom) {
            return Err(GrammarError::UndefinedAxiom(axiom.to_owned()));
        }
        for (lhs, productions) in rules.iter() {
            for symbol in productions.iter().flat_map(|p| p.symbols()) {
                match symbol {
                    Symbol::NonTerminal(name) if !rules.contains(name) => {
                        return Err(GrammarError::UndefinedNonTerminal {
                            name: name.clone(),
                            referenced_by: lhs.clone(),
                        })
                    }
                    Symbol::EndOfInput => {
                        return Err(GrammarError::MisplacedEndOfInput(lhs.clone()))
                    }
                    _ => (),
                }
            }
        }
        Ok(Grammar {
            axiom: axiom.to_owned(),
            rules,
        })
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn productions(&self, lhs: &str) -> &[Production] {
        self.rules.get(lhs).unwrap_or(&[])
    }

    /// The terminal alphabet, i.e. every terminal used by some production.
    pub fn terminals(&self) -> BTreeSet<Symbol> {
        self.rules
            .iter()
            .flat_map(|(_, productions)| productions.iter())
            .flat_map(|p| p.symbols())
            .filter(|s| s.is_terminal())
            .cloned()
            .collect()
    }
}

/// Rules in the notation `FromStr` reads, axiom first. Output only parses
/// back when every non-terminal is an identifier and no terminal holds both
/// kinds of quote; grammars read from description files may use other names.
impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let axiom = self.rules.iter().filter(|(lhs, _)| **lhs == self.axiom);
        let rest = self.rules.iter().filter(|(lhs, _)| **lhs != self.axiom);
        for (lhs, productions) in axiom.chain(rest) {
            write!(f, "{} ->", lhs)?;
            for (i, production) in productions.iter().enumerate() {
                if i > 0 {
                    write!(f, " |")?;
                }
                write!(f, " {}", production)?;
            }
            writeln!(f, " ;")?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self> {
        let (_, parsed) = parser::grammar(s)?;
        let axiom = match parsed.first() {
            Some((lhs, _)) => lhs.clone(),
            None => return Err(GrammarError::Syntax("grammar has no rules".to_owned())),
        };
        let mut rules = Rules::new();
        for (lhs, productions) in parsed {
            for production in productions {
                rules.add(&lhs, production);
            }
        }
        Grammar::new(&axiom, rules)
    }
}

impl FromStr for Production {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self> {
        let (_, production) = parser::production(s)?;
        Ok(production)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;
    use std::string::ToString;

    fn assert_lossless_conversion<T, E>(t: T)
    where
        T: ToString + FromStr<Err = E> + Eq + Debug,
        E: std::error::Error,
    {
        let s = t.to_string();
        let t_parse = T::from_str(&s).unwrap();
        assert_eq!(t, t_parse, "To string:\n{}\n", s);
    }

    #[test]
    fn lossless_production() {
        let tests = vec![
            Production::new(vec![Symbol::terminal("a"), Symbol::nonterminal("B")]),
            Production::epsilon(),
            Production::new(vec![Symbol::nonterminal("R'"), Symbol::nonterminal("R1")]),
        ];

        for test in tests {
            assert_lossless_conversion(test);
        }
    }

    #[test]
    fn terminal_quoting() {
        let tests = vec![
            (Symbol::terminal("a"), "\"a\""),
            (Symbol::terminal("a\"b"), "'a\"b'"),
            (Symbol::terminal("'"), "\"'\""),
            (Symbol::nonterminal("E'"), "E'"),
        ];
        for (symbol, expected) in tests {
            assert_eq!(symbol.to_string(), expected);
        }

        let g: Grammar = "S -> '\"' S | 'a\"b' | ε ;".parse().unwrap();
        assert_eq!(g.to_string(), "S -> '\"' S | 'a\"b' | ε ;\n");
        assert_lossless_conversion(g);
    }

    #[test]
    fn lossless_grammar() {
        let g: Grammar = "S -> \"a\" A | ε ; A -> 'b' S ;".parse().unwrap();
        assert_lossless_conversion(g);
    }

    #[test]
    fn axiom_printed_first() {
        let g: Grammar = "Z -> A ; A -> \"a\" ;".parse().unwrap();
        assert_eq!(g.axiom(), "Z");
        assert_eq!(g.to_string(), "Z -> A ;\nA -> \"a\" ;\n");
    }

    #[test]
    fn undefined_nonterminal() {
        let mut rules = Rules::new();
        rules.add("S", Production::new(vec![Symbol::nonterminal("A")]));
        let err = Grammar::new("S", rules).unwrap_err();
        assert_eq!(
            err,
            GrammarError::UndefinedNonTerminal {
                name: "A".to_owned(),
                referenced_by: "S".to_owned(),
            }
        );
    }

    #[test]
    fn undefined_axiom() {
        let mut rules = Rules::new();
        rules.add("A", Production::epsilon());
        let err = Grammar::new("S", rules).unwrap_err();
        assert_eq!(err, GrammarError::UndefinedAxiom("S".to_owned()));
    }

    #[test]
    fn end_of_input_in_production() {
        let mut rules = Rules::new();
        rules.add("S", Production::new(vec![Symbol::EndOfInput]));
        let err = Grammar::new("S", rules).unwrap_err();
        assert_eq!(err, GrammarError::MisplacedEndOfInput("S".to_owned()));
    }

    #[test]
    fn terminal_alphabet() {
        let g: Grammar = "S -> \"a\" S \"b\" | \"c\" | ε ;".parse().unwrap();
        let got: Vec<_> = g.terminals().into_iter().collect();
        assert_eq!(
            got,
            vec![
                Symbol::terminal("a"),
                Symbol::terminal("b"),
                Symbol::terminal("c")
            ]
        );
    }

    #[test]
    fn productions_keep_order() {
        let g: Grammar = "S -> \"x\" | \"y\" | ε ;".parse().unwrap();
        let got: Vec<String> = g.productions("S").iter().map(|p| p.to_string()).collect();
        assert_eq!(got, vec!["\"x\"", "\"y\"", "ε"]);
    }
}
