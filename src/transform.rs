use std::sync::Arc;

use anyhow::Result;
use swc_core::common::GLOBALS;
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::VisitMutWith;

use crate::ast::js_ast::JsAst;
use crate::compiler::Context;
use crate::visitors::prop_types::PropTypes;
use crate::visitors::style_registry::StyleRegistry;
use crate::visitors::unused_imports::UnusedImports;

/// Runs the three passes over one parsed module. Import cleanup goes first so
/// the later passes see the module the way the runtime would.
pub fn transform(ast: &mut JsAst, context: &Arc<Context>) -> Result<()> {
    let unresolved_mark = ast.unresolved_mark;
    let top_level_mark = ast.top_level_mark;
    GLOBALS.set(&context.meta.script.globals, || {
        ast.ast
            .visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, false));

        let path = ast.path().to_string();
        let path = Some(path.as_str());
        ast.ast
            .visit_mut_with(&mut UnusedImports::new(context.clone(), path));
        ast.ast
            .visit_mut_with(&mut StyleRegistry::new(context.clone(), path));
        let mut prop_types = PropTypes::new(context.clone(), path);
        ast.ast.visit_mut_with(&mut prop_types);
        if let Some(err) = prop_types.take_error() {
            return Err(err.into());
        }
        Ok(())
    })
}
