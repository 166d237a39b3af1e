use std::fmt;

use crate::token_type::Operator;

/// Expression tree built by the parser. Every `BinaryOp` owns exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    BinaryOp {
        left: Box<Expr>,
        operator: Operator,
        right: Box<Expr>,
    },
    Leaf {
        value: String,
    },
}

impl Expr {
    pub fn binary(left: Expr, operator: Operator, right: Expr) -> Expr {
        Expr::BinaryOp { left: Box::new(left), operator, right: Box::new(right) }
    }

    pub fn leaf(value: impl Into<String>) -> Expr {
        Expr::Leaf { value: value.into() }
    }

    /// Lexemes of the tree in postfix order.
    pub fn postfix(&self) -> Vec<String> {
        let mut output = Vec::new();
        self.write_postorder(&mut output);
        output
    }

    /// Appends left subtree, right subtree, then the operator. Walks with an explicit stack, so
    /// long operator chains do not exhaust the call stack.
    pub fn write_postorder(&self, output: &mut Vec<String>) {
        // (node, children already pushed)
        let mut stack: Vec<(&Expr, bool)> = vec![(self, false)];

        while let Some((node, expanded)) = stack.pop() {
            match node {
                Expr::Leaf { value } => output.push(value.clone()),
                Expr::BinaryOp { operator, .. } if expanded => output.push(operator.to_string()),
                Expr::BinaryOp { left, right, .. } => {
                    stack.push((node, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
            }
        }
    }

    /// Moves both children out, leaving empty leaves behind.
    fn take_children(&mut self) -> Option<(Expr, Expr)> {
        match self {
            Expr::BinaryOp { left, right, .. } => Some((
                std::mem::replace(left.as_mut(), Expr::leaf(String::new())),
                std::mem::replace(right.as_mut(), Expr::leaf(String::new())),
            )),
            Expr::Leaf { .. } => None,
        }
    }
}

/// Tears the tree down iteratively; the derived drop would recurse once per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        if let Some((left, right)) = self.take_children() {
            pending.push(left);
            pending.push(right);
        }

        while let Some(mut node) = pending.pop() {
            if let Some((left, right)) = node.take_children() {
                pending.push(left);
                pending.push(right);
            }
            // `node` now only holds leaves
        }
    }
}

/// Postfix lexemes of an optional tree. An absent tree yields nothing.
pub fn postfix(tree: Option<&Expr>) -> Vec<String> {
    tree.map(Expr::postfix).unwrap_or_default()
}

/// Fully parenthesized infix form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Expr::BinaryOp { left, operator, right } => write!(f, "({} {} {})", left, operator, right),
            Expr::Leaf { value } => write!(f, "{}", value),
        }
    }
}
