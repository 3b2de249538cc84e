use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
    Expr, Ident, ImportSpecifier, Lit, MemberExpr, MemberProp, Number, PropName, UnaryExpr,
    UnaryOp,
};

pub(crate) fn matches_member_pattern(expr: &Expr, object: &str, property: &str) -> bool {
    if let Expr::Member(MemberExpr {
        obj,
        prop: MemberProp::Ident(prop),
        ..
    }) = expr
    {
        if let Expr::Ident(obj) = obj.as_ref() {
            return obj.sym == *object && prop.sym == *property;
        }
    }
    false
}

/// `void 0`, the inert replacement for nodes that sit in expression position.
pub(crate) fn void_zero() -> Expr {
    Expr::Unary(UnaryExpr {
        span: DUMMY_SP,
        op: UnaryOp::Void,
        arg: Box::new(Expr::Lit(Lit::Num(Number {
            span: DUMMY_SP,
            value: 0.0,
            raw: None,
        }))),
    })
}

pub(crate) fn import_local(specifier: &ImportSpecifier) -> &Ident {
    match specifier {
        ImportSpecifier::Named(named) => &named.local,
        ImportSpecifier::Default(default) => &default.local,
        ImportSpecifier::Namespace(namespace) => &namespace.local,
    }
}

pub(crate) fn ident_prop_name(prop: &PropName) -> Option<&str> {
    match prop {
        PropName::Ident(ident) => Some(ident.sym.as_ref()),
        _ => None,
    }
}
