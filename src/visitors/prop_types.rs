use std::sync::Arc;

use swc_core::ecma::ast::{
    AssignOp, AssignTarget, CallExpr, Callee, Class, ClassMember, Expr, MemberProp, Module,
    ModuleItem, Prop, PropOrSpread, SimpleAssignTarget, Stmt,
};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};
use tracing::debug;

use crate::ast::utils::{ident_prop_name, void_zero};
use crate::compiler::Context;
use crate::config::is_exempt;
use crate::visitors::react_component::{Components, DetectError};

const CONTRACT_KEY: &str = "propTypes";

/// Strips `propTypes` declarations from components in their three shapes:
/// static class properties, assignment statements, and `createClass` object
/// keys.
pub struct PropTypes {
    enabled: bool,
    components: Components,
    error: Option<DetectError>,
}

impl PropTypes {
    pub fn new(context: Arc<Context>, path: Option<&str>) -> Self {
        let config = &context.config.prop_types;
        let enabled = config.remove
            && !is_exempt(path, context.filters.prop_types.as_ref())
            && (!config.only_production || context.config.mode.is_prod());
        Self {
            enabled,
            components: Components::default(),
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<DetectError> {
        self.error.take()
    }

    fn is_strippable_contract_stmt(&mut self, stmt: &Stmt) -> bool {
        match stmt {
            Stmt::Expr(expr_stmt) => self.is_strippable_contract_assignment(&expr_stmt.expr),
            _ => false,
        }
    }

    /// `X.propTypes = ...` where `X` is a locally declared component. Paren
    /// wrappers are transparent.
    fn is_strippable_contract_assignment(&mut self, expr: &Expr) -> bool {
        let Expr::Assign(assign) = expr.unwrap_parens() else {
            return false;
        };
        if assign.op != AssignOp::Assign {
            return false;
        }
        let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &assign.left else {
            return false;
        };
        let MemberProp::Ident(prop) = &member.prop else {
            return false;
        };
        if prop.sym != *CONTRACT_KEY {
            return false;
        }
        let Expr::Ident(obj) = member.obj.as_ref() else {
            return false;
        };
        let id = obj.to_id();
        if self.components.is_class_binding(&id) {
            return self.components.is_component_class(&id);
        }
        match self.components.is_function_component(&id) {
            Ok(is_component) => is_component,
            Err(err) => {
                self.error.get_or_insert(err);
                false
            }
        }
    }
}

impl VisitMut for PropTypes {
    fn visit_mut_module(&mut self, module: &mut Module) {
        if !self.enabled {
            return;
        }
        self.components = Components::collect(module);
        module.visit_mut_children_with(self);
    }

    fn visit_mut_class(&mut self, n: &mut Class) {
        n.visit_mut_children_with(self);
        let Some(super_class) = n.super_class.as_deref() else {
            return;
        };
        if !self.components.is_component_subclass(super_class) {
            return;
        }
        n.body.retain(|member| {
            let removable = matches!(
                member,
                ClassMember::ClassProp(prop) if ident_prop_name(&prop.key) == Some(CONTRACT_KEY)
            );
            if removable {
                debug!("remove propTypes class property");
            }
            !removable
        });
    }

    fn visit_mut_call_expr(&mut self, n: &mut CallExpr) {
        n.visit_mut_children_with(self);
        let Callee::Expr(callee) = &n.callee else {
            return;
        };
        let Expr::Member(member) = callee.as_ref() else {
            return;
        };
        let MemberProp::Ident(prop) = &member.prop else {
            return;
        };
        if prop.sym != *"createClass" {
            return;
        }
        for arg in n.args.iter_mut() {
            if arg.spread.is_some() {
                continue;
            }
            if let Expr::Object(object) = arg.expr.as_mut() {
                object.props.retain(|prop| {
                    let removable = match prop {
                        PropOrSpread::Prop(prop) => match prop.as_ref() {
                            Prop::KeyValue(kv) => ident_prop_name(&kv.key) == Some(CONTRACT_KEY),
                            Prop::Shorthand(ident) => ident.sym == *CONTRACT_KEY,
                            _ => false,
                        },
                        PropOrSpread::Spread(_) => false,
                    };
                    if removable {
                        debug!("remove propTypes from createClass spec");
                    }
                    !removable
                });
            }
        }
    }

    fn visit_mut_stmts(&mut self, stmts: &mut Vec<Stmt>) {
        stmts.visit_mut_children_with(self);
        stmts.retain(|stmt| {
            let removable = self.is_strippable_contract_stmt(stmt);
            if removable {
                debug!("remove propTypes assignment");
            }
            !removable
        });
    }

    fn visit_mut_module_items(&mut self, items: &mut Vec<ModuleItem>) {
        items.visit_mut_children_with(self);
        items.retain(|item| {
            let removable = match item {
                ModuleItem::Stmt(stmt) => self.is_strippable_contract_stmt(stmt),
                ModuleItem::ModuleDecl(_) => false,
            };
            if removable {
                debug!("remove propTypes assignment");
            }
            !removable
        });
    }

    // assignments in expression position cannot be dropped, they are
    // replaced with `void 0` instead
    fn visit_mut_expr(&mut self, n: &mut Expr) {
        n.visit_mut_children_with(self);
        if let Expr::Cond(cond) = n {
            for branch in [&mut cond.cons, &mut cond.alt] {
                if self.is_strippable_contract_assignment(branch) {
                    debug!("replace propTypes assignment with void 0");
                    **branch = void_zero();
                }
            }
        }
    }
}
