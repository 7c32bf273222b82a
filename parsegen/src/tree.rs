use std::fmt::{self, Display};

use grammar::{Production, Symbol};

use crate::span::Span;

/// A node of a concrete syntax tree. Each node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A non-terminal, expanded with `production`. Children follow the order
    /// of the production's symbols, with epsilon contributing none.
    Interior {
        name: String,
        production: Production,
        children: Vec<Node>,
    },
    /// A matched terminal and the literal text of its token.
    Leaf {
        name: String,
        text: String,
        span: Span,
    },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Interior { name, .. } | Node::Leaf { name, .. } => name,
        }
    }

    pub fn symbol(&self) -> Symbol {
        match self {
            Node::Interior { name, .. } => Symbol::NonTerminal(name.clone()),
            Node::Leaf { name, .. } => Symbol::Terminal(name.clone()),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Interior { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }

    pub fn production(&self) -> Option<&Production> {
        match self {
            Node::Interior { production, .. } => Some(production),
            Node::Leaf { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Leaf { text, .. } => Some(text),
            Node::Interior { .. } => None,
        }
    }

    /// Iterate over this node and all of its descendants, parents before
    /// children and left before right.
    pub fn dfs(&self) -> Dfs<'_> {
        Dfs { stack: vec![self] }
    }

    /// Leaves from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.dfs().filter(|node| matches!(node, Node::Leaf { .. }))
    }
}

/// Pre-order iterator over a tree.
pub struct Dfs<'t> {
    stack: Vec<&'t Node>,
}

impl<'t> Iterator for Dfs<'t> {
    type Item = &'t Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// One node per line, children indented under their parent.
impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            write!(f, "{:width$}", "", width = depth * 2)?;
            match node {
                Node::Interior {
                    name,
                    production,
                    children,
                } => {
                    writeln!(f, "{} -> {}", name, production)?;
                    stack.extend(children.iter().rev().map(|child| (child, depth + 1)));
                }
                Node::Leaf { name, text, .. } => {
                    writeln!(f, "{} {}", name, text.escape_debug())?;
                }
            }
        }
        Ok(())
    }
}
