/// Recognises the bracketed list literal inside an element-access node.
///
/// The host grammar has no list literal, so `[<1, 2, 3>]` reaches us as an
/// element access whose arguments are comparison nodes around missing
/// operands:
///   - `[<>]`      → one argument `(missing < missing) > missing`
///   - `[<x>]`     → one argument `(missing < x) > missing`
///   - `[<a, b, c>]` → arguments `missing < a`, `b`, `c > missing`
///
/// Anything else is left alone: ordinary indexers share the node kind.
use crate::ast::{BinOp, Expr, ExprKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Candidate<'a> {
    /// One argument: `>` wrapping `<` wrapping zero or one present operand.
    SingleWrapped(Option<&'a Expr>),
    /// Two or more arguments: opening `<` node, plain middles, closing `>` node.
    RangeList {
        first: &'a Expr,
        middles: &'a [Expr],
        last: &'a Expr,
    },
    NoMatch,
}

impl<'a> Candidate<'a> {
    /// Element expressions in source order, or `None` for `NoMatch`.
    pub fn elements(&self) -> Option<Vec<&'a Expr>> {
        match *self {
            Candidate::SingleWrapped(None) => Some(Vec::new()),
            Candidate::SingleWrapped(Some(only)) => Some(vec![only]),
            Candidate::RangeList {
                first,
                middles,
                last,
            } => {
                let (_, _, head) = first.as_binary()?;
                let (_, tail, _) = last.as_binary()?;
                let mut elements = Vec::with_capacity(middles.len() + 2);
                elements.push(head);
                elements.extend(middles.iter());
                elements.push(tail);
                Some(elements)
            }
            Candidate::NoMatch => None,
        }
    }
}

fn is_binary(expr: &Expr, op: BinOp) -> bool {
    matches!(expr.as_binary(), Some((found, _, _)) if found == op)
}

pub fn classify(node: &Expr) -> Candidate<'_> {
    let ExprKind::Index(_, args) = &node.kind else {
        return Candidate::NoMatch;
    };

    match args.as_slice() {
        [] => Candidate::NoMatch,
        [only] => classify_single(only),
        [first, middles @ .., last] => {
            if is_binary(first, BinOp::Lt) && is_binary(last, BinOp::Gt) {
                Candidate::RangeList {
                    first,
                    middles,
                    last,
                }
            } else {
                Candidate::NoMatch
            }
        }
    }
}

fn classify_single(arg: &Expr) -> Candidate<'_> {
    if !is_binary(arg, BinOp::Gt) {
        return Candidate::NoMatch;
    }

    let Some(inner) = arg
        .children()
        .into_iter()
        .find(|child| is_binary(child, BinOp::Lt))
    else {
        return Candidate::NoMatch;
    };

    // Only the `<` node's operands are elements; whatever follows `>` is dropped.
    let present: Vec<&Expr> = inner
        .children()
        .into_iter()
        .filter(|child| !child.is_missing())
        .collect();

    match present.as_slice() {
        [] => Candidate::SingleWrapped(None),
        [only] => Candidate::SingleWrapped(Some(*only)),
        // `(a < b) > c` is a comparison, not a literal
        _ => Candidate::NoMatch,
    }
}

/// Element expressions of the literal encoded by `node`, if it encodes one.
pub fn match_literal(node: &Expr) -> Option<Vec<&Expr>> {
    classify(node).elements()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    struct Build {
        next: u32,
    }

    impl Build {
        fn new() -> Self {
            Build { next: 0 }
        }

        fn node(&mut self, kind: ExprKind) -> Expr {
            self.next += 1;
            Expr {
                id: self.next,
                line: 1,
                col: 1,
                kind,
            }
        }

        fn missing(&mut self) -> Expr {
            self.node(ExprKind::Missing)
        }

        fn int(&mut self, i: i64) -> Expr {
            self.node(ExprKind::Literal(Literal::Int(i)))
        }

        fn ident(&mut self, name: &str) -> Expr {
            self.node(ExprKind::Ident(name.to_string()))
        }

        fn bin(&mut self, op: BinOp, l: Expr, r: Expr) -> Expr {
            self.node(ExprKind::Binary(op, Box::new(l), Box::new(r)))
        }

        fn index(&mut self, receiver: Expr, args: Vec<Expr>) -> Expr {
            self.node(ExprKind::Index(Box::new(receiver), args))
        }

        /// `(l < r) > missing` as a lone bracket argument.
        fn wrapped(&mut self, l: Expr, r: Expr) -> Expr {
            let lt = self.bin(BinOp::Lt, l, r);
            let m = self.missing();
            self.bin(BinOp::Gt, lt, m)
        }
    }

    fn ints(elements: &[&Expr]) -> Vec<i64> {
        elements
            .iter()
            .map(|e| match e.kind {
                ExprKind::Literal(Literal::Int(i)) => i,
                ref other => panic!("expected int literal, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn empty_form_yields_no_elements() {
        let mut b = Build::new();
        let (l, r) = (b.missing(), b.missing());
        let arg = b.wrapped(l, r);
        let receiver = b.missing();
        let node = b.index(receiver, vec![arg]);
        assert_eq!(classify(&node), Candidate::SingleWrapped(None));
        assert_eq!(match_literal(&node), Some(vec![]));
    }

    #[test]
    fn single_form_yields_its_operand() {
        let mut b = Build::new();
        let (l, r) = (b.missing(), b.int(5));
        let arg = b.wrapped(l, r);
        let receiver = b.missing();
        let node = b.index(receiver, vec![arg]);
        let elements = match_literal(&node).expect("should match");
        assert_eq!(ints(&elements), vec![5]);
    }

    #[test]
    fn two_present_operands_do_not_match() {
        let mut b = Build::new();
        let (l, r) = (b.int(1), b.int(2));
        let arg = b.wrapped(l, r);
        let receiver = b.missing();
        let node = b.index(receiver, vec![arg]);
        assert_eq!(classify(&node), Candidate::NoMatch);
    }

    #[test]
    fn greater_than_without_inner_less_than_does_not_match() {
        let mut b = Build::new();
        let (l, r) = (b.ident("a"), b.ident("b"));
        let arg = b.bin(BinOp::Gt, l, r);
        let receiver = b.ident("xs");
        let node = b.index(receiver, vec![arg]);
        assert_eq!(match_literal(&node), None);
    }

    #[test]
    fn inner_less_than_on_the_right_is_found() {
        let mut b = Build::new();
        let (l, r) = (b.missing(), b.int(9));
        let lt = b.bin(BinOp::Lt, l, r);
        let left = b.missing();
        let arg = b.bin(BinOp::Gt, left, lt);
        let receiver = b.missing();
        let node = b.index(receiver, vec![arg]);
        assert_eq!(ints(&match_literal(&node).expect("should match")), vec![9]);
    }

    #[test]
    fn operand_after_closing_bracket_is_not_an_element() {
        let mut b = Build::new();
        let (m, five) = (b.missing(), b.int(5));
        let lt = b.bin(BinOp::Lt, m, five);
        let three = b.int(3);
        let arg = b.bin(BinOp::Gt, lt, three);
        let receiver = b.missing();
        let node = b.index(receiver, vec![arg]);
        assert_eq!(ints(&match_literal(&node).expect("should match")), vec![5]);
    }

    #[test]
    fn range_form_keeps_source_order() {
        let mut b = Build::new();
        let (m1, one) = (b.missing(), b.int(1));
        let first = b.bin(BinOp::Lt, m1, one);
        let two = b.int(2);
        let two_again = b.int(2);
        let (three, m2) = (b.int(3), b.missing());
        let last = b.bin(BinOp::Gt, three, m2);
        let receiver = b.missing();
        let node = b.index(receiver, vec![first, two, two_again, last]);
        assert_eq!(
            ints(&match_literal(&node).expect("should match")),
            vec![1, 2, 2, 3]
        );
    }

    #[test]
    fn range_form_needs_both_delimiters() {
        let mut b = Build::new();
        let (m1, one) = (b.missing(), b.int(1));
        let first = b.bin(BinOp::Lt, m1, one);
        let two = b.int(2);
        let receiver = b.missing();
        let node = b.index(receiver, vec![first, two]);
        assert_eq!(classify(&node), Candidate::NoMatch);
    }

    #[test]
    fn ordinary_indexer_and_other_nodes_do_not_match() {
        let mut b = Build::new();
        let (arr, zero) = (b.ident("arr"), b.int(0));
        let node = b.index(arr, vec![zero]);
        assert_eq!(classify(&node), Candidate::NoMatch);

        let receiver = b.missing();
        let empty = b.index(receiver, vec![]);
        assert_eq!(classify(&empty), Candidate::NoMatch);

        let not_index = b.int(4);
        assert_eq!(classify(&not_index), Candidate::NoMatch);
    }
}
