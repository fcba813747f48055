use std::fmt;

use crate::ast::{Expr, ExprKind, Program, Stmt};
use crate::printer::print_type;

/// A problem left in a rewritten program that downstream compilation would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}:{}]: {}", self.line, self.col, self.message)
    }
}

/// Report every missing operand and every unresolved type argument, in source order.
pub fn check_program(program: &Program) -> Vec<Diagnostic> {
    let mut diags = Vec::new();
    for stmt in &program.stmts {
        check_stmt(stmt, &mut diags);
    }
    diags
}

fn check_stmt(stmt: &Stmt, diags: &mut Vec<Diagnostic>) {
    match stmt {
        Stmt::Local { init, .. } => {
            if let Some(init) = init {
                check_expr(init, diags);
            }
        }
        Stmt::Assign(target, value) => {
            check_expr(target, diags);
            check_expr(value, diags);
        }
        Stmt::Expr(expr) => check_expr(expr, diags),
        Stmt::Block(stmts) => {
            for s in stmts {
                check_stmt(s, diags);
            }
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            check_expr(cond, diags);
            check_stmt(then_branch, diags);
            if let Some(else_branch) = else_branch {
                check_stmt(else_branch, diags);
            }
        }
        Stmt::Foreach { iter, body, .. } => {
            check_expr(iter, diags);
            check_stmt(body, diags);
        }
    }
}

fn check_expr(expr: &Expr, diags: &mut Vec<Diagnostic>) {
    match &expr.kind {
        ExprKind::Missing => diags.push(Diagnostic {
            message: "expected expression".to_string(),
            line: expr.line,
            col: expr.col,
        }),
        ExprKind::New { ty, .. } if !ty.is_resolved() => diags.push(Diagnostic {
            message: format!("cannot infer element type for 'new {}'", print_type(ty)),
            line: expr.line,
            col: expr.col,
        }),
        _ => {}
    }

    for child in expr.children() {
        check_expr(child, diags);
    }
}
