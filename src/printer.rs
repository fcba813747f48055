/// Canonical source rendering of a program.
///
/// Layout is normalised: four-space indentation, braces on their own line,
/// one statement per line, single spaces around binary operators. Missing
/// nodes render as nothing.
use crate::ast::{Expr, ExprKind, Literal, Program, Stmt, TypeExpr, UnaryOp};

const INDENT: &str = "    ";

pub fn print_program(program: &Program) -> String {
    let mut out = String::new();
    for stmt in &program.stmts {
        print_stmt(stmt, 0, &mut out);
    }
    out
}

pub fn print_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Named(name, args) if args.is_empty() => name.clone(),
        TypeExpr::Named(name, args) => {
            let args: Vec<String> = args.iter().map(print_type).collect();
            format!("{}<{}>", name, args.join(", "))
        }
        TypeExpr::Array(inner) => format!("{}[]", print_type(inner)),
        TypeExpr::Unresolved => "?".to_string(),
    }
}

fn line(depth: usize, text: &str, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

/// Statement used as the body of `if`/`foreach`: blocks stay at the
/// header's depth, anything else is indented one level.
fn print_body(stmt: &Stmt, depth: usize, out: &mut String) {
    match stmt {
        Stmt::Block(_) => print_stmt(stmt, depth, out),
        _ => print_stmt(stmt, depth + 1, out),
    }
}

fn print_stmt(stmt: &Stmt, depth: usize, out: &mut String) {
    match stmt {
        Stmt::Local { ty, name, init, .. } => {
            let ty = ty.as_ref().map(print_type).unwrap_or_else(|| "var".to_string());
            let text = match init {
                Some(init) => format!("{} {} = {};", ty, name, print_expr(init)),
                None => format!("{} {};", ty, name),
            };
            line(depth, &text, out);
        }
        Stmt::Assign(target, value) => {
            line(
                depth,
                &format!("{} = {};", print_expr(target), print_expr(value)),
                out,
            );
        }
        Stmt::Expr(expr) => line(depth, &format!("{};", print_expr(expr)), out),
        Stmt::Block(stmts) => {
            line(depth, "{", out);
            for s in stmts {
                print_stmt(s, depth + 1, out);
            }
            line(depth, "}", out);
        }
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            line(depth, &format!("if ({})", print_expr(cond)), out);
            print_body(then_branch, depth, out);
            if let Some(else_branch) = else_branch {
                line(depth, "else", out);
                print_body(else_branch, depth, out);
            }
        }
        Stmt::Foreach {
            ty,
            name,
            iter,
            body,
        } => {
            let ty = ty.as_ref().map(print_type).unwrap_or_else(|| "var".to_string());
            line(
                depth,
                &format!("foreach ({} {} in {})", ty, name, print_expr(iter)),
                out,
            );
            print_body(body, depth, out);
        }
    }
}

fn print_list(exprs: &[Expr]) -> String {
    exprs.iter().map(print_expr).collect::<Vec<_>>().join(", ")
}

pub fn print_expr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Missing => String::new(),
        ExprKind::Literal(lit) => print_literal(lit),
        ExprKind::Ident(name) => name.clone(),
        ExprKind::Paren(inner) => format!("({})", print_expr(inner)),
        ExprKind::Unary(op, operand) => {
            let sym = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Not => "!",
            };
            format!("{}{}", sym, print_expr(operand))
        }
        ExprKind::Binary(op, left, right) => {
            let parts = [print_expr(left), op.symbol().to_string(), print_expr(right)];
            parts
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(" ")
        }
        ExprKind::Member(receiver, name) => format!("{}.{}", print_expr(receiver), name),
        ExprKind::Call(callee, args) => format!("{}({})", print_expr(callee), print_list(args)),
        ExprKind::Index(receiver, args) => {
            format!("{}[{}]", print_expr(receiver), print_list(args))
        }
        ExprKind::New { ty, args, init } => {
            let mut text = format!("new {}", print_type(ty));
            if let Some(args) = args {
                text.push_str(&format!("({})", print_list(args)));
            }
            match init {
                Some(init) if init.is_empty() => text.push_str(" { }"),
                Some(init) => text.push_str(&format!(" {{ {} }}", print_list(init))),
                None => {}
            }
            text
        }
    }
}

fn print_literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(i) => i.to_string(),
        Literal::Double(f) => print_double(*f),
        Literal::Str(s) => format!("\"{}\"", escape(s, '"')),
        Literal::Char(c) => format!("'{}'", escape(&c.to_string(), '\'')),
        Literal::Bool(b) => b.to_string(),
        Literal::Null => "null".to_string(),
    }
}

/// Plain decimal notation with a fractional part, so the lexer reads it back
/// as a double. `Display` for `f64` never uses an exponent.
fn print_double(f: f64) -> String {
    let text = f.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
