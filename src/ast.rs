/// Syntax tree for the host language.
///
/// Every expression carries a `NodeId` that is unique within its `Program`.
/// The semantic model is keyed by these ids, so passes that build new nodes
/// must draw fresh ids from `NodeIds` rather than reuse existing ones.
pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Double(f64),
    Str(String),
    Char(char),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Lte => "<=",
            BinOp::Gte => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// Type syntax as written in declarations and `new` expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// `int`, `Foo`, `List<int>`, `Dictionary<string, int>`
    Named(String, Vec<TypeExpr>),
    /// `T[]`
    Array(Box<TypeExpr>),
    /// Placeholder for a type argument nobody could infer. Never produced by the parser.
    Unresolved,
}

impl TypeExpr {
    pub fn simple(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into(), Vec::new())
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Named(name.into(), args)
    }

    pub fn is_resolved(&self) -> bool {
        match self {
            TypeExpr::Named(_, args) => args.iter().all(TypeExpr::is_resolved),
            TypeExpr::Array(inner) => inner.is_resolved(),
            TypeExpr::Unresolved => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: NodeId,
    pub line: usize,
    pub col: usize,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// An operand the parser expected but did not find. Zero width.
    Missing,
    Literal(Literal),
    Ident(String),
    Paren(Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `receiver.name`
    Member(Box<Expr>, String),
    /// `callee(args)`
    Call(Box<Expr>, Vec<Expr>),
    /// `receiver[args]`; the receiver is `Missing` for a bare `[...]`.
    Index(Box<Expr>, Vec<Expr>),
    /// `new T(args) { init }` where either part may be absent.
    New {
        ty: TypeExpr,
        args: Option<Vec<Expr>>,
        init: Option<Vec<Expr>>,
    },
}

impl Expr {
    pub fn is_missing(&self) -> bool {
        matches!(self.kind, ExprKind::Missing)
    }

    /// Operator and operands when this is a binary node.
    pub fn as_binary(&self) -> Option<(BinOp, &Expr, &Expr)> {
        match &self.kind {
            ExprKind::Binary(op, left, right) => Some((*op, left, right)),
            _ => None,
        }
    }

    /// Immediate child expressions, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Missing | ExprKind::Literal(_) | ExprKind::Ident(_) => Vec::new(),
            ExprKind::Paren(inner) | ExprKind::Unary(_, inner) | ExprKind::Member(inner, _) => {
                vec![inner.as_ref()]
            }
            ExprKind::Binary(_, left, right) => vec![left.as_ref(), right.as_ref()],
            ExprKind::Call(head, args) | ExprKind::Index(head, args) => {
                std::iter::once(head.as_ref()).chain(args.iter()).collect()
            }
            ExprKind::New { args, init, .. } => args
                .iter()
                .flatten()
                .chain(init.iter().flatten())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var name = init;` (no type) or `T name [= init];`
    Local {
        ty: Option<TypeExpr>,
        name: String,
        init: Option<Expr>,
        line: usize,
    },
    /// `target = value;`
    Assign(Expr, Expr),
    Expr(Expr),
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// `foreach (var name in iter) body` (no type) or `foreach (T name in iter) body`
    Foreach {
        ty: Option<TypeExpr>,
        name: String,
        iter: Expr,
        body: Box<Stmt>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    /// First id not yet used by any node in `stmts`.
    pub next_id: NodeId,
}

/// Sequential id allocator shared by the parser and by rewriting passes.
#[derive(Debug, Clone)]
pub struct NodeIds {
    next: NodeId,
}

impl NodeIds {
    pub fn new() -> Self {
        NodeIds { next: 0 }
    }

    pub fn starting_at(next: NodeId) -> Self {
        NodeIds { next }
    }

    pub fn fresh(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn peek(&self) -> NodeId {
        self.next
    }
}

impl Default for NodeIds {
    fn default() -> Self {
        Self::new()
    }
}
