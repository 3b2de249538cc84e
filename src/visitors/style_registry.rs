use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use swc_core::common::Span;
use swc_core::ecma::ast::{
    Callee, Expr, Id, Ident, MemberExpr, MemberProp, Module, ObjectLit, Pat, Prop, PropOrSpread,
    VarDeclarator,
};
use swc_core::ecma::visit::{Visit, VisitMut, VisitMutWith, VisitWith};
use tracing::debug;

use crate::ast::utils::ident_prop_name;
use crate::compiler::Context;
use crate::config::is_exempt;
use crate::visitors::import_source_collector::ImportSourceCollector;

const STYLE_NAMESPACE: &str = "StyleSheet";
const STYLE_CREATE_METHOD: &str = "create";
const STYLE_LIBRARY: &str = "react-native";

/// Prunes entries from `StyleSheet.create` registries that are only ever
/// accessed through dotted member expressions, keeping the keys in use.
pub struct StyleRegistry {
    enabled: bool,
    prune_plans: HashMap<Id, HashSet<String>>,
}

impl StyleRegistry {
    pub fn new(context: Arc<Context>, path: Option<&str>) -> Self {
        let enabled =
            context.config.styles.remove && !is_exempt(path, context.filters.styles.as_ref());
        Self {
            enabled,
            prune_plans: HashMap::new(),
        }
    }
}

impl VisitMut for StyleRegistry {
    fn visit_mut_module(&mut self, module: &mut Module) {
        if !self.enabled {
            return;
        }
        let sources = ImportSourceCollector::collect(module);
        let mut finder = RegistryFinder {
            sources,
            registries: vec![],
        };
        module.visit_with(&mut finder);
        for registry in finder.registries {
            let mut refs = RegistryRefCollector {
                target: registry.id.clone(),
                target_sym: registry.id.0.to_string(),
                decl_span: registry.decl_span,
                used_keys: HashSet::new(),
                escaped: false,
            };
            module.visit_with(&mut refs);
            if refs.escaped {
                debug!(
                    "skip style registry '{}', it escapes dotted access",
                    registry.id.0
                );
                continue;
            }
            self.prune_plans.insert(registry.id, refs.used_keys);
        }
        module.visit_mut_children_with(self);
    }

    fn visit_mut_var_declarator(&mut self, n: &mut VarDeclarator) {
        n.visit_mut_children_with(self);
        let Pat::Ident(name) = &n.name else {
            return;
        };
        let Some(used_keys) = self.prune_plans.get(&name.id.to_id()) else {
            return;
        };
        if let Some(Expr::Call(call)) = n.init.as_deref_mut() {
            let registry = name.id.sym.to_string();
            for arg in call.args.iter_mut() {
                if arg.spread.is_none() {
                    prune_registry_value(&mut arg.expr, &registry, used_keys);
                }
            }
        }
    }
}

struct RegistryBinding {
    id: Id,
    decl_span: Span,
}

/// Finds `const x = StyleSheet.create(...)` declarations where `StyleSheet`
/// is the react-native import.
struct RegistryFinder {
    sources: ImportSourceCollector,
    registries: Vec<RegistryBinding>,
}

impl Visit for RegistryFinder {
    fn visit_var_declarator(&mut self, n: &VarDeclarator) {
        if let (Pat::Ident(name), Some(Expr::Call(call))) = (&n.name, n.init.as_deref()) {
            if let Callee::Expr(callee) = &call.callee {
                if let Expr::Member(MemberExpr {
                    obj,
                    prop: MemberProp::Ident(prop),
                    ..
                }) = callee.as_ref()
                {
                    if let Expr::Ident(obj) = obj.as_ref() {
                        if obj.sym == *STYLE_NAMESPACE
                            && prop.sym == *STYLE_CREATE_METHOD
                            && self.sources.source_of(&obj.to_id()) == Some(STYLE_LIBRARY)
                        {
                            self.registries.push(RegistryBinding {
                                id: name.id.to_id(),
                                decl_span: name.id.span,
                            });
                        }
                    }
                }
            }
        }
        n.visit_children_with(self);
    }
}

/// Collects the keys read off one registry binding. Any use that is not a
/// dotted member access marks the registry as escaped.
struct RegistryRefCollector {
    target: Id,
    target_sym: String,
    decl_span: Span,
    used_keys: HashSet<String>,
    escaped: bool,
}

impl Visit for RegistryRefCollector {
    fn visit_member_expr(&mut self, n: &MemberExpr) {
        if let Expr::Ident(obj) = n.obj.as_ref() {
            if obj.to_id() == self.target {
                match &n.prop {
                    MemberProp::Ident(prop) => {
                        self.used_keys
                            .insert(format!("{} {}", self.target_sym, prop.sym));
                    }
                    MemberProp::Computed(computed) => {
                        self.escaped = true;
                        computed.visit_children_with(self);
                    }
                    MemberProp::PrivateName(_) => {
                        self.escaped = true;
                    }
                }
                return;
            }
        }
        n.visit_children_with(self);
    }

    fn visit_ident(&mut self, n: &Ident) {
        if n.to_id() == self.target && n.span != self.decl_span {
            self.escaped = true;
        }
    }
}

fn prune_registry_value(expr: &mut Expr, registry: &str, used_keys: &HashSet<String>) {
    match expr {
        Expr::Object(object) => prune_registry_object(object, registry, used_keys),
        Expr::Array(array) => {
            for elem in array.elems.iter_mut().flatten() {
                prune_registry_value(&mut elem.expr, registry, used_keys);
            }
        }
        _ => {}
    }
}

fn prune_registry_object(object: &mut ObjectLit, registry: &str, used_keys: &HashSet<String>) {
    object.props.retain_mut(|prop| match prop {
        PropOrSpread::Prop(prop) => {
            if let Prop::KeyValue(kv) = prop.as_mut() {
                // only object-valued entries are style rules, leaf
                // attributes like `flex: 1` are never candidates
                if matches!(kv.value.as_ref(), Expr::Object(_)) {
                    if let Some(key) = ident_prop_name(&kv.key) {
                        if !used_keys.contains(&format!("{} {}", registry, key)) {
                            debug!("remove unused style '{}' from '{}'", key, registry);
                            return false;
                        }
                    }
                }
                prune_registry_value(&mut kv.value, registry, used_keys);
            }
            true
        }
        PropOrSpread::Spread(spread) => {
            prune_registry_value(&mut spread.expr, registry, used_keys);
            true
        }
    });
}
