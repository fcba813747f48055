/// List literal desugaring pass.
///
/// Runs after parsing and after the semantic model is built. Walks every
/// statement and expression; each element access that encodes a bracketed
/// list literal (`[<>]`, `[<x>]`, `[<a, b, c>]`) is replaced with a
/// construction of the configured container (`new List<int> { a, b, c }`).
///
/// The pass is a single traversal with no cross-node state. A replaced
/// node's original subtree is not visited again, so literals nested inside
/// another literal's elements are not rewritten.
pub mod pattern;
pub mod synthesize;

use tracing::{debug, trace, warn};

use crate::ast::{Expr, ExprKind, NodeId, NodeIds, Program, Stmt};
use crate::types::{Type, TypeResolver};

pub use pattern::{classify, match_literal, Candidate};
pub use synthesize::{resolve_element_type, synthesize};

/// What to do when the first element's type cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Leave the literal untouched; validation reports it.
    #[default]
    Abstain,
    /// Rewrite anyway with an unresolved type argument (`new List<?> { ... }`).
    Proceed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Generic container to instantiate.
    pub container: String,
    pub on_unresolved: UnresolvedPolicy,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            container: "List".to_string(),
            on_unresolved: UnresolvedPolicy::default(),
        }
    }
}

/// Result of offering one node to the pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    Unchanged,
    Replaced(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteOutcome {
    Rewritten,
    Abstained,
}

/// One recognised list literal.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralSite {
    pub line: usize,
    pub col: usize,
    pub elements: usize,
    pub element_type: Type,
    pub outcome: SiteOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteReport {
    pub sites: Vec<LiteralSite>,
}

impl RewriteReport {
    pub fn rewritten(&self) -> usize {
        self.count(SiteOutcome::Rewritten)
    }

    pub fn abstained(&self) -> usize {
        self.count(SiteOutcome::Abstained)
    }

    fn count(&self, outcome: SiteOutcome) -> usize {
        self.sites.iter().filter(|s| s.outcome == outcome).count()
    }
}

pub struct Rewriter<'m, R: TypeResolver + ?Sized> {
    resolver: &'m R,
    options: RewriteOptions,
    ids: NodeIds,
    report: RewriteReport,
}

impl<'m, R: TypeResolver + ?Sized> Rewriter<'m, R> {
    pub fn new(resolver: &'m R, options: RewriteOptions) -> Self {
        Rewriter {
            resolver,
            options,
            ids: NodeIds::new(),
            report: RewriteReport::default(),
        }
    }

    /// First id to hand out to synthesized nodes. `rewrite_program` raises it
    /// past the program's own ids on its own.
    pub fn with_next_id(mut self, next: NodeId) -> Self {
        self.ids = NodeIds::starting_at(next);
        self
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    pub fn report(&self) -> &RewriteReport {
        &self.report
    }

    /// Decide for a single node. `Unchanged` leaves recursion into the
    /// node's children to the caller.
    pub fn rewrite_node(&mut self, node: &Expr) -> Rewrite {
        let Some(elements) = match_literal(node) else {
            if matches!(node.kind, ExprKind::Index(..)) {
                trace!(line = node.line, col = node.col, "element access is not a list literal");
            }
            return Rewrite::Unchanged;
        };

        let element_type = resolve_element_type(&elements, self.resolver);
        let mut site = LiteralSite {
            line: node.line,
            col: node.col,
            elements: elements.len(),
            element_type: element_type.clone(),
            outcome: SiteOutcome::Rewritten,
        };

        if !element_type.is_known() && self.options.on_unresolved == UnresolvedPolicy::Abstain {
            warn!(
                line = node.line,
                col = node.col,
                "cannot infer list element type; literal left unchanged"
            );
            site.outcome = SiteOutcome::Abstained;
            self.report.sites.push(site);
            return Rewrite::Unchanged;
        }

        let elements: Vec<Expr> = elements.into_iter().cloned().collect();
        let replacement = synthesize(
            elements,
            &element_type,
            &self.options.container,
            &mut self.ids,
            node,
        );
        debug!(
            line = node.line,
            col = node.col,
            elements = site.elements,
            element_type = %element_type.display(),
            "list literal rewritten"
        );
        self.report.sites.push(site);
        Rewrite::Replaced(replacement)
    }

    pub fn rewrite_program(&mut self, program: Program) -> (Program, RewriteReport) {
        let next = self.ids.peek().max(program.next_id);
        self.ids = NodeIds::starting_at(next);

        let stmts = program
            .stmts
            .into_iter()
            .map(|s| self.rewrite_stmt(s))
            .collect();

        let report = std::mem::take(&mut self.report);
        (
            Program {
                stmts,
                next_id: self.ids.peek(),
            },
            report,
        )
    }

    pub fn rewrite_stmt(&mut self, stmt: Stmt) -> Stmt {
        match stmt {
            Stmt::Local {
                ty,
                name,
                init,
                line,
            } => Stmt::Local {
                ty,
                name,
                init: init.map(|e| self.rewrite_expr(e)),
                line,
            },
            Stmt::Assign(target, value) => {
                Stmt::Assign(self.rewrite_expr(target), self.rewrite_expr(value))
            }
            Stmt::Expr(expr) => Stmt::Expr(self.rewrite_expr(expr)),
            Stmt::Block(stmts) => {
                Stmt::Block(stmts.into_iter().map(|s| self.rewrite_stmt(s)).collect())
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => Stmt::If {
                cond: self.rewrite_expr(cond),
                then_branch: Box::new(self.rewrite_stmt(*then_branch)),
                else_branch: else_branch.map(|s| Box::new(self.rewrite_stmt(*s))),
            },
            Stmt::Foreach {
                ty,
                name,
                iter,
                body,
            } => Stmt::Foreach {
                ty,
                name,
                iter: self.rewrite_expr(iter),
                body: Box::new(self.rewrite_stmt(*body)),
            },
        }
    }

    pub fn rewrite_expr(&mut self, expr: Expr) -> Expr {
        if let Rewrite::Replaced(replacement) = self.rewrite_node(&expr) {
            return replacement;
        }

        let Expr {
            id,
            line,
            col,
            kind,
        } = expr;
        let kind = match kind {
            ExprKind::Missing | ExprKind::Literal(_) | ExprKind::Ident(_) => kind,
            ExprKind::Paren(inner) => ExprKind::Paren(self.rewrite_boxed(inner)),
            ExprKind::Unary(op, operand) => ExprKind::Unary(op, self.rewrite_boxed(operand)),
            ExprKind::Binary(op, left, right) => {
                let left = self.rewrite_boxed(left);
                ExprKind::Binary(op, left, self.rewrite_boxed(right))
            }
            ExprKind::Member(receiver, name) => {
                ExprKind::Member(self.rewrite_boxed(receiver), name)
            }
            ExprKind::Call(callee, args) => {
                let callee = self.rewrite_boxed(callee);
                ExprKind::Call(callee, self.rewrite_all(args))
            }
            ExprKind::Index(receiver, args) => {
                let receiver = self.rewrite_boxed(receiver);
                ExprKind::Index(receiver, self.rewrite_all(args))
            }
            ExprKind::New { ty, args, init } => ExprKind::New {
                ty,
                args: args.map(|a| self.rewrite_all(a)),
                init: init.map(|i| self.rewrite_all(i)),
            },
        };

        Expr {
            id,
            line,
            col,
            kind,
        }
    }

    fn rewrite_boxed(&mut self, expr: Box<Expr>) -> Box<Expr> {
        Box::new(self.rewrite_expr(*expr))
    }

    fn rewrite_all(&mut self, exprs: Vec<Expr>) -> Vec<Expr> {
        exprs.into_iter().map(|e| self.rewrite_expr(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_source;
    use crate::types::SemanticModel;

    fn rewrite_with(src: &str, options: RewriteOptions) -> (Program, RewriteReport) {
        let program = parse_source(src).expect("parse failed");
        let model = SemanticModel::build(&program);
        Rewriter::new(&model, options).rewrite_program(program)
    }

    fn first_init(program: &Program) -> &Expr {
        match &program.stmts[0] {
            Stmt::Local { init: Some(e), .. } => e,
            other => panic!("expected initialized local, got {:?}", other),
        }
    }

    #[test]
    fn replacement_ids_are_fresh() {
        let program = parse_source("var xs = [<1, 2>];").expect("parse failed");
        let before = program.next_id;
        let model = SemanticModel::build(&program);
        let (after, _) = Rewriter::new(&model, RewriteOptions::default()).rewrite_program(program);
        assert_eq!(first_init(&after).id, before);
        assert_eq!(after.next_id, before + 1);
    }

    #[test]
    fn replacement_is_not_a_literal_again() {
        let program = parse_source("var xs = [<1>];").expect("parse failed");
        let model = SemanticModel::build(&program);
        let mut rewriter = Rewriter::new(&model, RewriteOptions::default());
        let (after, _) = rewriter.rewrite_program(program);
        let replacement = first_init(&after);
        assert_eq!(classify(replacement), Candidate::NoMatch);
        assert_eq!(rewriter.rewrite_node(replacement), Rewrite::Unchanged);
    }

    #[test]
    fn abstaining_records_the_site() {
        let (program, report) = rewrite_with("var xs = [<y>];", RewriteOptions::default());
        assert!(matches!(first_init(&program).kind, ExprKind::Index(..)));
        assert_eq!(report.abstained(), 1);
        assert_eq!(report.sites[0].element_type, Type::Unknown);
    }

    #[test]
    fn proceeding_rewrites_with_unknown_type() {
        let options = RewriteOptions {
            on_unresolved: UnresolvedPolicy::Proceed,
            ..RewriteOptions::default()
        };
        let (program, report) = rewrite_with("var xs = [<y>];", options);
        assert!(matches!(first_init(&program).kind, ExprKind::New { .. }));
        assert_eq!(report.rewritten(), 1);
    }

    #[test]
    fn empty_literal_never_abstains() {
        let (program, report) = rewrite_with("var xs = [<>];", RewriteOptions::default());
        assert!(matches!(first_init(&program).kind, ExprKind::New { .. }));
        assert_eq!(report.sites[0].element_type, Type::Object);
    }

    #[test]
    fn nested_literal_inside_elements_is_left_alone() {
        let (program, report) = rewrite_with("var xs = [<1, [<2>], 3>];", RewriteOptions::default());
        assert_eq!(report.sites.len(), 1);
        match &first_init(&program).kind {
            ExprKind::New {
                init: Some(elements),
                ..
            } => assert!(matches!(elements[1].kind, ExprKind::Index(..))),
            other => panic!("expected New, got {:?}", other),
        }
    }
}
