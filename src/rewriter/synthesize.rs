/// Element type inference and construction of the replacement node.
use crate::ast::{Expr, ExprKind, NodeIds, TypeExpr};
use crate::types::{Type, TypeResolver};

/// The first element's static type stands for the whole list; an empty
/// literal is a list of `object`.
pub fn resolve_element_type<R: TypeResolver + ?Sized>(elements: &[&Expr], resolver: &R) -> Type {
    match elements.first() {
        None => Type::Object,
        Some(first) => resolver.type_of(first),
    }
}

/// Build `new Container<T> { e1, e2, ... }`, or `new Container<object>()`
/// when there are no elements. The node takes the position of `at`, the
/// element access it replaces.
pub fn synthesize(
    elements: Vec<Expr>,
    element_type: &Type,
    container: &str,
    ids: &mut NodeIds,
    at: &Expr,
) -> Expr {
    let kind = if elements.is_empty() {
        ExprKind::New {
            ty: TypeExpr::generic(container, vec![TypeExpr::simple("object")]),
            args: Some(Vec::new()),
            init: None,
        }
    } else {
        ExprKind::New {
            ty: TypeExpr::generic(container, vec![element_type.to_type_expr()]),
            args: None,
            init: Some(elements),
        }
    };

    Expr {
        id: ids.fresh(),
        line: at.line,
        col: at.col,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    struct Always(Type);

    impl TypeResolver for Always {
        fn type_of(&self, _expr: &Expr) -> Type {
            self.0.clone()
        }
    }

    fn lit(id: u32, lit: Literal) -> Expr {
        Expr {
            id,
            line: 2,
            col: 7,
            kind: ExprKind::Literal(lit),
        }
    }

    #[test]
    fn empty_list_is_object_regardless_of_resolver() {
        assert_eq!(resolve_element_type(&[], &Always(Type::Str)), Type::Object);
    }

    #[test]
    fn first_element_decides_the_type() {
        let a = lit(1, Literal::Int(1));
        let b = lit(2, Literal::Str("x".to_string()));
        let resolver = Always(Type::Double);
        assert_eq!(resolve_element_type(&[&a, &b], &resolver), Type::Double);
    }

    #[test]
    fn empty_construction_has_argument_list_and_no_initializer() {
        let at = lit(1, Literal::Int(0));
        let mut ids = NodeIds::starting_at(40);
        let node = synthesize(Vec::new(), &Type::Object, "List", &mut ids, &at);
        assert_eq!(node.id, 40);
        assert_eq!((node.line, node.col), (2, 7));
        assert_eq!(
            node.kind,
            ExprKind::New {
                ty: TypeExpr::generic("List", vec![TypeExpr::simple("object")]),
                args: Some(vec![]),
                init: None,
            }
        );
    }

    #[test]
    fn populated_construction_uses_inferred_type_and_keeps_elements() {
        let at = lit(9, Literal::Null);
        let elements = vec![lit(3, Literal::Char('a')), lit(4, Literal::Char('b'))];
        let mut ids = NodeIds::starting_at(10);
        let node = synthesize(elements.clone(), &Type::Char, "Collection", &mut ids, &at);
        match node.kind {
            ExprKind::New { ty, args, init } => {
                assert_eq!(ty, TypeExpr::generic("Collection", vec![TypeExpr::simple("char")]));
                assert_eq!(args, None);
                assert_eq!(init, Some(elements));
            }
            other => panic!("expected New, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_becomes_unresolved_argument() {
        let at = lit(1, Literal::Null);
        let mut ids = NodeIds::new();
        let node = synthesize(vec![lit(2, Literal::Null)], &Type::Unknown, "List", &mut ids, &at);
        match node.kind {
            ExprKind::New { ty, .. } => {
                assert_eq!(ty, TypeExpr::generic("List", vec![TypeExpr::Unresolved]))
            }
            other => panic!("expected New, got {:?}", other),
        }
    }
}
