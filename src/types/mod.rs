/// Static types of the host language and the semantic model built over a
/// parsed program.
///
/// Type annotations in the AST are `TypeExpr` syntax; this module converts
/// them to a structured enum (and back, for synthesized nodes).
///
/// Sub-modules:
/// - `model` — per-node type table and the `TypeResolver` seam
pub mod model;

pub use model::{SemanticModel, TypeResolver};

use crate::ast::TypeExpr;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int,
    Double,
    Bool,
    Char,
    Str,
    /// `object`; also the element type of an empty list literal.
    Object,
    List(Box<Type>),
    Array(Box<Type>),
    /// Any other named type, with its type arguments.
    Named(String, Vec<Type>),
    /// The model could not determine a type (unbound name, `null`, missing operand).
    Unknown,
}

impl Type {
    pub fn is_known(&self) -> bool {
        !matches!(self, Type::Unknown)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Double | Type::Char)
    }

    /// Element type seen by `foreach` and by a single-argument indexer.
    pub fn element(&self) -> Type {
        match self {
            Type::List(inner) | Type::Array(inner) => inner.as_ref().clone(),
            Type::Str => Type::Char,
            _ => Type::Unknown,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Type::Int => "int".to_string(),
            Type::Double => "double".to_string(),
            Type::Bool => "bool".to_string(),
            Type::Char => "char".to_string(),
            Type::Str => "string".to_string(),
            Type::Object => "object".to_string(),
            Type::List(inner) => format!("List<{}>", inner.display()),
            Type::Array(inner) => format!("{}[]", inner.display()),
            Type::Named(name, args) if args.is_empty() => name.clone(),
            Type::Named(name, args) => {
                let args: Vec<String> = args.iter().map(Type::display).collect();
                format!("{}<{}>", name, args.join(", "))
            }
            Type::Unknown => "?".to_string(),
        }
    }

    /// Resolve written type syntax. Predefined names are recognised in their
    /// keyword and BCL spellings (`int` / `Int32`).
    pub fn from_type_expr(ty: &TypeExpr) -> Type {
        match ty {
            TypeExpr::Unresolved => Type::Unknown,
            TypeExpr::Array(inner) => Type::Array(Box::new(Type::from_type_expr(inner))),
            TypeExpr::Named(name, args) if args.is_empty() => match name.as_str() {
                "int" | "Int32" => Type::Int,
                "double" | "Double" => Type::Double,
                "bool" | "Boolean" => Type::Bool,
                "char" | "Char" => Type::Char,
                "string" | "String" => Type::Str,
                "object" | "Object" => Type::Object,
                _ => Type::Named(name.clone(), Vec::new()),
            },
            TypeExpr::Named(name, args) if name == "List" && args.len() == 1 => {
                Type::List(Box::new(Type::from_type_expr(&args[0])))
            }
            TypeExpr::Named(name, args) => Type::Named(
                name.clone(),
                args.iter().map(Type::from_type_expr).collect(),
            ),
        }
    }

    /// Type syntax naming this type, as a synthesized node would spell it.
    pub fn to_type_expr(&self) -> TypeExpr {
        match self {
            Type::Int => TypeExpr::simple("int"),
            Type::Double => TypeExpr::simple("double"),
            Type::Bool => TypeExpr::simple("bool"),
            Type::Char => TypeExpr::simple("char"),
            Type::Str => TypeExpr::simple("string"),
            Type::Object => TypeExpr::simple("object"),
            Type::List(inner) => TypeExpr::generic("List", vec![inner.to_type_expr()]),
            Type::Array(inner) => TypeExpr::Array(Box::new(inner.to_type_expr())),
            Type::Named(name, args) => {
                TypeExpr::generic(name.clone(), args.iter().map(Type::to_type_expr).collect())
            }
            Type::Unknown => TypeExpr::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_generic_display() {
        let ty = Type::List(Box::new(Type::Array(Box::new(Type::Str))));
        assert_eq!(ty.display(), "List<string[]>");
    }

    #[test]
    fn type_expr_conversion_keeps_shape() {
        let syntax = TypeExpr::generic(
            "Dictionary",
            vec![TypeExpr::simple("string"), TypeExpr::generic("List", vec![TypeExpr::simple("Int32")])],
        );
        let ty = Type::from_type_expr(&syntax);
        assert_eq!(
            ty,
            Type::Named(
                "Dictionary".to_string(),
                vec![Type::Str, Type::List(Box::new(Type::Int))]
            )
        );
        assert_eq!(ty.display(), "Dictionary<string, List<int>>");
    }

    #[test]
    fn unknown_maps_to_unresolved_syntax() {
        assert_eq!(Type::Unknown.to_type_expr(), TypeExpr::Unresolved);
        assert!(!Type::List(Box::new(Type::Unknown)).to_type_expr().is_resolved());
    }
}
