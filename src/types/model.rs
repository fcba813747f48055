/// Semantic model: a static type for every expression node of a program.
///
/// Built once, in full, over the tree as parsed. Later passes read it through
/// `TypeResolver` and never trigger re-resolution, so ids introduced after the
/// build resolve to `Type::Unknown`.
use std::collections::HashMap;

use tracing::trace;

use super::Type;
use crate::ast::{BinOp, Expr, ExprKind, Literal, NodeId, Program, Stmt, UnaryOp};

/// Read-only type queries against an already-computed model.
pub trait TypeResolver {
    fn type_of(&self, expr: &Expr) -> Type;
}

#[derive(Debug, Default)]
pub struct SemanticModel {
    types: HashMap<NodeId, Type>,
}

impl SemanticModel {
    pub fn build(program: &Program) -> Self {
        let mut builder = ModelBuilder {
            types: HashMap::new(),
            scopes: vec![HashMap::new()],
        };
        for stmt in &program.stmts {
            builder.stmt(stmt);
        }
        trace!(nodes = builder.types.len(), "semantic model built");
        SemanticModel {
            types: builder.types,
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for SemanticModel {
    fn type_of(&self, expr: &Expr) -> Type {
        self.types.get(&expr.id).cloned().unwrap_or(Type::Unknown)
    }
}

struct ModelBuilder {
    types: HashMap<NodeId, Type>,
    /// Innermost scope last.
    scopes: Vec<HashMap<String, Type>>,
}

impl ModelBuilder {
    fn declare(&mut self, name: &str, ty: Type) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), ty);
        }
    }

    fn lookup(&self, name: &str) -> Type {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).cloned())
            .unwrap_or(Type::Unknown)
    }

    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        self.scopes.push(HashMap::new());
        f(self);
        self.scopes.pop();
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Local { ty, name, init, .. } => {
                let init_ty = init.as_ref().map(|e| self.expr(e));
                let declared = match (ty, init_ty) {
                    (Some(ty), _) => Type::from_type_expr(ty),
                    (None, Some(init_ty)) => init_ty,
                    (None, None) => Type::Unknown,
                };
                self.declare(name, declared);
            }
            Stmt::Assign(target, value) => {
                self.expr(target);
                self.expr(value);
            }
            Stmt::Expr(expr) => {
                self.expr(expr);
            }
            Stmt::Block(stmts) => self.scoped(|b| {
                for s in stmts {
                    b.stmt(s);
                }
            }),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(cond);
                self.scoped(|b| b.stmt(then_branch));
                if let Some(else_branch) = else_branch {
                    self.scoped(|b| b.stmt(else_branch));
                }
            }
            Stmt::Foreach {
                ty,
                name,
                iter,
                body,
            } => {
                let iter_ty = self.expr(iter);
                let var_ty = match ty {
                    Some(ty) => Type::from_type_expr(ty),
                    None => iter_ty.element(),
                };
                self.scoped(|b| {
                    b.declare(name, var_ty);
                    b.stmt(body);
                });
            }
        }
    }

    /// Infer, record and return the type of `expr` and of all its descendants.
    fn expr(&mut self, expr: &Expr) -> Type {
        let ty = match &expr.kind {
            ExprKind::Missing => Type::Unknown,
            ExprKind::Literal(lit) => match lit {
                Literal::Int(_) => Type::Int,
                Literal::Double(_) => Type::Double,
                Literal::Str(_) => Type::Str,
                Literal::Char(_) => Type::Char,
                Literal::Bool(_) => Type::Bool,
                Literal::Null => Type::Unknown,
            },
            ExprKind::Ident(name) => self.lookup(name),
            ExprKind::Paren(inner) => self.expr(inner),
            ExprKind::Unary(op, operand) => {
                let operand_ty = self.expr(operand);
                match op {
                    UnaryOp::Neg if operand_ty == Type::Char => Type::Int,
                    UnaryOp::Neg if operand_ty.is_numeric() => operand_ty,
                    UnaryOp::Not if operand_ty == Type::Bool => Type::Bool,
                    _ => Type::Unknown,
                }
            }
            ExprKind::Binary(op, left, right) => {
                let left_ty = self.expr(left);
                let right_ty = self.expr(right);
                if left.is_missing() || right.is_missing() {
                    Type::Unknown
                } else {
                    binary_type(*op, &left_ty, &right_ty)
                }
            }
            ExprKind::Member(receiver, name) => {
                let receiver_ty = self.expr(receiver);
                match (&receiver_ty, name.as_str()) {
                    (Type::List(_), "Count") => Type::Int,
                    (Type::Array(_) | Type::Str, "Length") => Type::Int,
                    _ => Type::Unknown,
                }
            }
            ExprKind::Call(callee, args) => {
                for arg in args {
                    self.expr(arg);
                }
                self.expr(callee);
                // No method or delegate signatures are modelled besides `ToString()`.
                match &callee.kind {
                    ExprKind::Member(_, name) if name == "ToString" && args.is_empty() => {
                        Type::Str
                    }
                    _ => Type::Unknown,
                }
            }
            ExprKind::Index(receiver, args) => {
                let receiver_ty = self.expr(receiver);
                let arg_tys: Vec<Type> = args.iter().map(|a| self.expr(a)).collect();
                match arg_tys.as_slice() {
                    [Type::Int] => receiver_ty.element(),
                    _ => Type::Unknown,
                }
            }
            ExprKind::New { ty, args, init } => {
                for e in args.iter().flatten().chain(init.iter().flatten()) {
                    self.expr(e);
                }
                Type::from_type_expr(ty)
            }
        };
        self.types.insert(expr.id, ty.clone());
        ty
    }
}

fn binary_type(op: BinOp, left: &Type, right: &Type) -> Type {
    match op {
        BinOp::Add if *left == Type::Str || *right == Type::Str => Type::Str,
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => {
            match (left, right) {
                (Type::Double, r) if r.is_numeric() => Type::Double,
                (l, Type::Double) if l.is_numeric() => Type::Double,
                (l, r) if l.is_numeric() && r.is_numeric() => Type::Int,
                _ => Type::Unknown,
            }
        }
        BinOp::Lt | BinOp::Gt | BinOp::Lte | BinOp::Gte => {
            if left.is_numeric() && right.is_numeric() {
                Type::Bool
            } else {
                Type::Unknown
            }
        }
        BinOp::Eq | BinOp::Neq => Type::Bool,
        BinOp::And | BinOp::Or => {
            if *left == Type::Bool && *right == Type::Bool {
                Type::Bool
            } else {
                Type::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_source;

    fn local_types(src: &str) -> Vec<Type> {
        let program = parse_source(src).expect("parse failed");
        let model = SemanticModel::build(&program);
        program
            .stmts
            .iter()
            .filter_map(|s| match s {
                Stmt::Local { init: Some(e), .. } => Some(model.type_of(e)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn arithmetic_promotes_to_double() {
        assert_eq!(
            local_types("var a = 1 + 2; var b = 1 + 2.5; var c = 'a' + 1;"),
            vec![Type::Int, Type::Double, Type::Int]
        );
    }

    #[test]
    fn string_concatenation_wins() {
        assert_eq!(local_types("var s = 1 + \"x\";"), vec![Type::Str]);
    }

    #[test]
    fn ids_added_after_build_are_unknown() {
        let program = parse_source("var a = 1;").expect("parse failed");
        let model = SemanticModel::build(&program);
        let stranger = Expr {
            id: program.next_id + 10,
            line: 1,
            col: 1,
            kind: ExprKind::Literal(Literal::Int(3)),
        };
        assert_eq!(model.type_of(&stranger), Type::Unknown);
    }
}
