use std::collections::HashMap;

use swc_core::ecma::ast::{Id, Ident, ImportDecl, Module};
use swc_core::ecma::visit::{Visit, VisitWith};

/// Counts identifier references per binding. Import declarations are skipped
/// so that the declaration site itself does not count as a use.
#[derive(Default)]
pub struct IdentRefCollector {
    refs: HashMap<Id, usize>,
}

impl IdentRefCollector {
    pub fn collect(module: &Module) -> Self {
        let mut collector = Self::default();
        module.visit_with(&mut collector);
        collector
    }

    pub fn is_referenced(&self, id: &Id) -> bool {
        self.refs.contains_key(id)
    }
}

impl Visit for IdentRefCollector {
    fn visit_import_decl(&mut self, _n: &ImportDecl) {}

    fn visit_ident(&mut self, n: &Ident) {
        *self.refs.entry(n.to_id()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use swc_core::ecma::ast::{ImportSpecifier, ModuleDecl, ModuleItem};

    use super::IdentRefCollector;
    use crate::ast::tests::TestUtils;
    use crate::ast::utils::import_local;

    fn import_ids(test_utils: &TestUtils) -> Vec<(String, bool)> {
        let refs = IdentRefCollector::collect(&test_utils.ast.ast);
        test_utils
            .ast
            .ast
            .body
            .iter()
            .filter_map(|item| match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import),
                _ => None,
            })
            .flat_map(|import| &import.specifiers)
            .map(|specifier: &ImportSpecifier| {
                let local = import_local(specifier);
                (local.sym.to_string(), refs.is_referenced(&local.to_id()))
            })
            .collect()
    }

    #[test]
    fn test_unreferenced_import_is_not_counted() {
        let test_utils = TestUtils::gen_js_ast(
            r#"import { a, b } from 'lib';
console.log(a);"#,
        );
        assert_eq!(
            import_ids(&test_utils),
            vec![("a".to_string(), true), ("b".to_string(), false)]
        );
    }

    #[test]
    fn test_shadowed_use_is_not_a_reference() {
        let test_utils = TestUtils::gen_js_ast(
            r#"import { a } from 'lib';
function f(a) {
    return a;
}"#,
        );
        assert_eq!(import_ids(&test_utils), vec![("a".to_string(), false)]);
    }

    #[test]
    fn test_jsx_use_counts() {
        let test_utils = TestUtils::gen_js_ast(
            r#"import { View } from 'react-native';
const app = <View/>;"#,
        );
        assert_eq!(import_ids(&test_utils), vec![("View".to_string(), true)]);
    }
}
