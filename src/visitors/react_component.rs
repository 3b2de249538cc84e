use std::collections::{HashMap, HashSet};

use swc_core::ecma::ast::{
    CallExpr, Callee, Class, ClassDecl, Expr, FnDecl, Function, Id, JSXElement, JSXFragment,
    Module, Pat, ReturnStmt, VarDeclarator,
};
use swc_core::ecma::visit::{Visit, VisitWith};
use thiserror::Error;

use crate::ast::utils::matches_member_pattern;

/// Cap on how many return-call hops a component trace may take before the
/// chain is treated as unresolvable.
const MAX_TRACE_DEPTH: usize = 20;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("infinite loop detected while tracing function component returns")]
    RecursionLimit,
}

struct ClassSummary {
    super_is_base: bool,
    super_ident: Option<Id>,
}

struct FuncSummary {
    jsx: bool,
    returned_calls: Vec<Id>,
}

enum DeclSummary {
    Class(ClassSummary),
    Func(FuncSummary),
}

/// Pre-pass summary of every top-level-reachable declaration, queried later
/// to decide whether a binding names a React component.
#[derive(Default)]
pub struct Components {
    decls: HashMap<Id, DeclSummary>,
}

impl Components {
    pub fn collect(module: &Module) -> Self {
        let mut collector = ComponentCollector {
            components: Components::default(),
        };
        module.visit_with(&mut collector);
        collector.components
    }

    /// `React.Component`, `React.PureComponent`, or their destructured names.
    pub fn is_component_base_class(expr: &Expr) -> bool {
        if matches_member_pattern(expr, "React", "Component")
            || matches_member_pattern(expr, "React", "PureComponent")
        {
            return true;
        }
        matches!(expr, Expr::Ident(ident) if ident.sym == *"Component" || ident.sym == *"PureComponent")
    }

    /// Whether a `extends` clause reaches a component base class, directly or
    /// through one level of locally declared superclass.
    pub fn is_component_subclass(&self, super_class: &Expr) -> bool {
        if Self::is_component_base_class(super_class) {
            return true;
        }
        if let Expr::Ident(ident) = super_class {
            return self.class_super_is_base(&ident.to_id());
        }
        false
    }

    pub fn is_class_binding(&self, id: &Id) -> bool {
        matches!(self.decls.get(id), Some(DeclSummary::Class(_)))
    }

    pub fn is_component_class(&self, id: &Id) -> bool {
        match self.decls.get(id) {
            Some(DeclSummary::Class(class)) => {
                if class.super_is_base {
                    return true;
                }
                class
                    .super_ident
                    .as_ref()
                    .is_some_and(|parent| self.class_super_is_base(parent))
            }
            _ => false,
        }
    }

    /// Whether the binding names a function that produces markup, following
    /// `return other()` chains. Cycles resolve to false; chains deeper than
    /// [`MAX_TRACE_DEPTH`] are an error.
    pub fn is_function_component(&self, id: &Id) -> Result<bool, DetectError> {
        let mut visited = HashSet::new();
        self.trace(id, &mut visited, 0)
    }

    fn trace(&self, id: &Id, visited: &mut HashSet<Id>, depth: usize) -> Result<bool, DetectError> {
        if depth > MAX_TRACE_DEPTH {
            return Err(DetectError::RecursionLimit);
        }
        if !visited.insert(id.clone()) {
            return Ok(false);
        }
        match self.decls.get(id) {
            Some(DeclSummary::Func(func)) => {
                if func.jsx {
                    return Ok(true);
                }
                for callee in &func.returned_calls {
                    if self.trace(callee, visited, depth + 1)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn class_super_is_base(&self, id: &Id) -> bool {
        matches!(self.decls.get(id), Some(DeclSummary::Class(class)) if class.super_is_base)
    }
}

struct ComponentCollector {
    components: Components,
}

impl ComponentCollector {
    fn class_summary(class: &Class) -> ClassSummary {
        match class.super_class.as_deref() {
            Some(super_class) => ClassSummary {
                super_is_base: Components::is_component_base_class(super_class),
                super_ident: match super_class {
                    Expr::Ident(ident) => Some(ident.to_id()),
                    _ => None,
                },
            },
            None => ClassSummary {
                super_is_base: false,
                super_ident: None,
            },
        }
    }

    /// Declarator initializers count markup anywhere in the function body.
    fn init_summary(init: &Expr) -> FuncSummary {
        let scanner = Self::scan_returns(init);
        FuncSummary {
            jsx: contains_markup(init),
            returned_calls: scanner.returned_calls,
        }
    }

    /// Function declarations only count markup inside return statements, so
    /// JSX built but never returned does not make the function a component.
    fn decl_summary(function: &Function) -> FuncSummary {
        let scanner = Self::scan_returns(function);
        FuncSummary {
            jsx: scanner.return_jsx,
            returned_calls: scanner.returned_calls,
        }
    }

    fn scan_returns<N: VisitWith<ReturnScanner>>(node: &N) -> ReturnScanner {
        let mut scanner = ReturnScanner {
            return_jsx: false,
            returned_calls: vec![],
        };
        node.visit_with(&mut scanner);
        scanner
    }
}

impl Visit for ComponentCollector {
    fn visit_class_decl(&mut self, n: &ClassDecl) {
        self.components.decls.insert(
            n.ident.to_id(),
            DeclSummary::Class(Self::class_summary(&n.class)),
        );
        n.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, n: &FnDecl) {
        self.components.decls.insert(
            n.ident.to_id(),
            DeclSummary::Func(Self::decl_summary(n.function.as_ref())),
        );
        n.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, n: &VarDeclarator) {
        if let (Pat::Ident(name), Some(init)) = (&n.name, n.init.as_deref()) {
            match init {
                Expr::Fn(_) | Expr::Arrow(_) => {
                    self.components
                        .decls
                        .insert(name.id.to_id(), DeclSummary::Func(Self::init_summary(init)));
                }
                Expr::Class(class_expr) => {
                    self.components.decls.insert(
                        name.id.to_id(),
                        DeclSummary::Class(Self::class_summary(&class_expr.class)),
                    );
                }
                _ => {}
            }
        }
        n.visit_children_with(self);
    }
}

/// Looks for anything that renders: JSX nodes or calls to
/// `React.createElement` / `cloneElement`.
#[derive(Default)]
pub struct JsxFinder {
    found: bool,
}

impl Visit for JsxFinder {
    fn visit_jsx_element(&mut self, _n: &JSXElement) {
        self.found = true;
    }

    fn visit_jsx_fragment(&mut self, _n: &JSXFragment) {
        self.found = true;
    }

    fn visit_call_expr(&mut self, n: &CallExpr) {
        if let Callee::Expr(callee) = &n.callee {
            let is_factory = matches_member_pattern(callee, "React", "createElement")
                || matches_member_pattern(callee, "React", "cloneElement")
                || matches!(callee.as_ref(), Expr::Ident(ident) if ident.sym == *"cloneElement");
            if is_factory {
                self.found = true;
                return;
            }
        }
        n.visit_children_with(self);
    }
}

pub fn contains_markup<N: VisitWith<JsxFinder>>(node: &N) -> bool {
    let mut finder = JsxFinder::default();
    node.visit_with(&mut finder);
    finder.found
}

/// Records which return statements produce markup and which forward to a
/// plain `return other()` call, so indirect components can be traced.
pub struct ReturnScanner {
    return_jsx: bool,
    returned_calls: Vec<Id>,
}

impl Visit for ReturnScanner {
    fn visit_return_stmt(&mut self, n: &ReturnStmt) {
        if n.arg.is_some() {
            if contains_markup(n) {
                self.return_jsx = true;
            } else if let Some(Expr::Call(call)) = n.arg.as_deref() {
                if let Callee::Expr(callee) = &call.callee {
                    if let Expr::Ident(ident) = callee.as_ref() {
                        self.returned_calls.push(ident.to_id());
                    }
                }
            }
        }
        n.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use swc_core::ecma::ast::{Decl, Id, ModuleItem, Pat, Stmt};

    use super::Components;
    use crate::ast::tests::TestUtils;

    fn binding_id(test_utils: &TestUtils, name: &str) -> Id {
        for item in &test_utils.ast.ast.body {
            let ModuleItem::Stmt(Stmt::Decl(decl)) = item else {
                continue;
            };
            match decl {
                Decl::Class(class) if class.ident.sym == *name => return class.ident.to_id(),
                Decl::Fn(func) if func.ident.sym == *name => return func.ident.to_id(),
                Decl::Var(var) => {
                    for declarator in &var.decls {
                        if let Pat::Ident(ident) = &declarator.name {
                            if ident.id.sym == *name {
                                return ident.id.to_id();
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        panic!("no top level binding named {}", name)
    }

    #[test]
    fn test_direct_component_class() {
        let test_utils = TestUtils::gen_js_ast(
            r#"class Button extends React.Component {}
class Plain {}"#,
        );
        let components = Components::collect(&test_utils.ast.ast);
        assert!(components.is_component_class(&binding_id(&test_utils, "Button")));
        assert!(!components.is_component_class(&binding_id(&test_utils, "Plain")));
    }

    #[test]
    fn test_one_level_inherited_component_class() {
        let test_utils = TestUtils::gen_js_ast(
            r#"class Base extends React.PureComponent {}
class Button extends Base {}
class Deep extends Button {}"#,
        );
        let components = Components::collect(&test_utils.ast.ast);
        assert!(components.is_component_class(&binding_id(&test_utils, "Button")));
        assert!(!components.is_component_class(&binding_id(&test_utils, "Deep")));
    }

    #[test]
    fn test_destructured_base_class() {
        let test_utils = TestUtils::gen_js_ast(r#"class Button extends Component {}"#);
        let components = Components::collect(&test_utils.ast.ast);
        assert!(components.is_component_class(&binding_id(&test_utils, "Button")));
    }

    #[test]
    fn test_function_component_with_jsx() {
        let test_utils = TestUtils::gen_js_ast(
            r#"function App() {
    return <View/>;
}
const Arrow = ()=><View/>;
function helper() {
    return 1;
}"#,
        );
        let components = Components::collect(&test_utils.ast.ast);
        assert!(components
            .is_function_component(&binding_id(&test_utils, "App"))
            .unwrap());
        assert!(components
            .is_function_component(&binding_id(&test_utils, "Arrow"))
            .unwrap());
        assert!(!components
            .is_function_component(&binding_id(&test_utils, "helper"))
            .unwrap());
    }

    #[test]
    fn test_fn_decl_with_jsx_outside_return_is_not_a_component() {
        let test_utils = TestUtils::gen_js_ast(
            r#"function helper() {
    const x = <View/>;
    return 1;
}
const builder = function() {
    const x = <View/>;
    return 1;
};"#,
        );
        let components = Components::collect(&test_utils.ast.ast);
        assert!(!components
            .is_function_component(&binding_id(&test_utils, "helper"))
            .unwrap());
        // declarator initializers keep the whole-body check
        assert!(components
            .is_function_component(&binding_id(&test_utils, "builder"))
            .unwrap());
    }

    #[test]
    fn test_create_element_counts_as_markup() {
        let test_utils = TestUtils::gen_js_ast(
            r#"function App() {
    return React.createElement('div');
}"#,
        );
        let components = Components::collect(&test_utils.ast.ast);
        assert!(components
            .is_function_component(&binding_id(&test_utils, "App"))
            .unwrap());
    }

    #[test]
    fn test_indirect_component_through_returned_call() {
        let test_utils = TestUtils::gen_js_ast(
            r#"function inner() {
    return <View/>;
}
function make() {
    return inner();
}"#,
        );
        let components = Components::collect(&test_utils.ast.ast);
        assert!(components
            .is_function_component(&binding_id(&test_utils, "make"))
            .unwrap());
    }

    #[test]
    fn test_mutual_recursion_resolves_to_false() {
        let test_utils = TestUtils::gen_js_ast(
            r#"function ping() {
    return pong();
}
function pong() {
    return ping();
}"#,
        );
        let components = Components::collect(&test_utils.ast.ast);
        assert!(!components
            .is_function_component(&binding_id(&test_utils, "ping"))
            .unwrap());
    }

    #[test]
    fn test_deep_chain_errors() {
        let mut source = String::new();
        for i in 0..25 {
            source.push_str(&format!(
                "function f{}() {{\n    return f{}();\n}}\n",
                i,
                i + 1
            ));
        }
        source.push_str("function f25() {\n    return 1;\n}\n");
        let test_utils = TestUtils::gen_js_ast(&source);
        let components = Components::collect(&test_utils.ast.ast);
        assert!(components
            .is_function_component(&binding_id(&test_utils, "f0"))
            .is_err());
    }

    #[test]
    fn test_class_binding_is_not_function_component() {
        let test_utils = TestUtils::gen_js_ast(r#"class Button extends React.Component {}"#);
        let components = Components::collect(&test_utils.ast.ast);
        let id = binding_id(&test_utils, "Button");
        assert!(components.is_class_binding(&id));
        assert!(!components.is_function_component(&id).unwrap());
    }
}
