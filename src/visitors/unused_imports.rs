use std::mem;
use std::sync::Arc;

use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
    ImportDecl, ImportDefaultSpecifier, ImportSpecifier, Module, ModuleDecl, ModuleItem,
};
use swc_core::ecma::utils::quote_str;
use swc_core::ecma::visit::VisitMut;
use tracing::debug;

use crate::ast::utils::import_local;
use crate::compiler::Context;
use crate::config::{is_exempt, CustomImportRule};
use crate::visitors::ident_ref_collector::IdentRefCollector;

/// Drops import specifiers with no remaining references and rewrites named
/// imports of configured libraries into per-symbol deep imports.
pub struct UnusedImports {
    context: Arc<Context>,
    exempt: bool,
}

impl UnusedImports {
    pub fn new(context: Arc<Context>, path: Option<&str>) -> Self {
        let exempt = is_exempt(path, context.filters.imports.as_ref());
        Self { context, exempt }
    }
}

impl VisitMut for UnusedImports {
    fn visit_mut_module(&mut self, module: &mut Module) {
        let config = &self.context.config.imports;
        if self.exempt || (!config.remove && config.custom_imports.is_empty()) {
            return;
        }
        let refs = IdentRefCollector::collect(module);
        let items = mem::take(&mut module.body);
        for item in items {
            let mut import = match item {
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => import,
                other => {
                    module.body.push(other);
                    continue;
                }
            };
            let source = import.src.value.to_string();
            // the rewrite below works from the specifier list as written, not
            // the one left after unused removal
            let original = import.specifiers.clone();
            if config.remove && !config.ignore_libraries.contains(&source) {
                import.specifiers.retain(|specifier| {
                    let local = import_local(specifier);
                    let referenced = refs.is_referenced(&local.to_id());
                    if !referenced {
                        debug!("remove unused import {} from '{}'", local.sym, source);
                    }
                    referenced
                });
            }
            let rule = config
                .custom_imports
                .iter()
                .find(|rule| rule.library_name == source);
            if let Some(rule) = rule {
                if matches!(original.first(), Some(ImportSpecifier::Named(_))) {
                    module.body.extend(original.iter().map(|specifier| {
                        ModuleItem::ModuleDecl(ModuleDecl::Import(deep_import_item(
                            specifier, rule,
                        )))
                    }));
                    continue;
                }
            }
            if !original.is_empty() && import.specifiers.is_empty() {
                debug!("remove unused import declaration for '{}'", source);
                continue;
            }
            module
                .body
                .push(ModuleItem::ModuleDecl(ModuleDecl::Import(import)));
        }
    }
}

fn deep_import_item(specifier: &ImportSpecifier, rule: &CustomImportRule) -> ImportDecl {
    let local = import_local(specifier).clone();
    let sub_path = match rule.custom_mapping.get(local.sym.as_ref()) {
        Some(mapped) => mapped.clone(),
        None => format!(
            "{}/{}",
            rule.library_directory.as_deref().unwrap_or("lib"),
            local.sym
        ),
    };
    let src = format!("{}/{}", rule.library_name, sub_path);
    ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![ImportSpecifier::Default(ImportDefaultSpecifier {
            span: DUMMY_SP,
            local,
        })],
        src: Box::new(quote_str!(src)),
        type_only: false,
        with: None,
        phase: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use swc_core::common::GLOBALS;
    use swc_core::ecma::visit::VisitMutWith;

    use super::UnusedImports;
    use crate::ast::tests::TestUtils;
    use crate::config::Config;

    fn run(content: &str) -> String {
        run_with_config(content, Config::default(), Some("src/app.js"))
    }

    fn run_with_config(content: &str, config: Config, path: Option<&str>) -> String {
        let mut test_utils = TestUtils::gen_js_ast_with_config(content, config);
        let mut visitor = UnusedImports::new(test_utils.context.clone(), path);
        GLOBALS.set(&test_utils.context.meta.script.globals, || {
            test_utils.ast.ast.visit_mut_with(&mut visitor);
        });
        test_utils.js_ast_to_code()
    }

    #[test]
    fn test_removes_unused_specifier() {
        let code = run(r#"import { A, B } from 'lib';
console.log(A);"#);
        assert_eq!(
            code,
            r#"import { A } from 'lib';
console.log(A);"#
        );
    }

    #[test]
    fn test_drops_fully_unused_declaration() {
        let code = run(r#"import { A } from 'lib';
console.log(1);"#);
        assert_eq!(code, r#"console.log(1);"#);
    }

    #[test]
    fn test_default_and_namespace_specifiers() {
        let code = run(r#"import def from 'lib';
import * as ns from 'other';
console.log(ns);"#);
        assert_eq!(code, r#"import * as ns from 'other';
console.log(ns);"#);
    }

    #[test]
    fn test_ignored_library_is_untouched() {
        let code = run(r#"import { useState } from 'react';
console.log(1);"#);
        assert_eq!(
            code,
            r#"import { useState } from 'react';
console.log(1);"#
        );
    }

    #[test]
    fn test_side_effect_import_is_kept() {
        let code = run(r#"import 'polyfill';
console.log(1);"#);
        assert_eq!(code, r#"import 'polyfill';
console.log(1);"#);
    }

    #[test]
    fn test_shadowed_binding_does_not_count() {
        let code = run(r#"import { a } from 'lib';
function f(a) {
    return a;
}
f(1);"#);
        assert_eq!(
            code,
            r#"function f(a) {
    return a;
}
f(1);"#
        );
    }

    #[test]
    fn test_remove_disabled_leaves_unused() {
        let config = Config::from_json(r#"{"imports": {"remove": false}}"#).unwrap();
        let source = r#"import { A } from 'lib';
console.log(1);"#;
        assert_eq!(run_with_config(source, config, Some("src/app.js")), source);
    }

    #[test]
    fn test_exempt_filename_is_untouched() {
        let config =
            Config::from_json(r#"{"imports": {"ignoreFilenames": "legacy"}}"#).unwrap();
        let source = r#"import { A } from 'lib';
console.log(1);"#;
        assert_eq!(
            run_with_config(source, config, Some("src/legacy/app.js")),
            source
        );
    }

    #[test]
    fn test_unknown_path_is_exempt() {
        let source = r#"import { A } from 'lib';
console.log(1);"#;
        assert_eq!(run_with_config(source, Config::default(), None), source);
    }

    #[test]
    fn test_custom_import_rewrite() {
        let config = Config::from_json(
            r#"{"imports": {"customImports": {
                "libraryName": "antd",
                "customMapping": {"Button": "customPath/Button"}
            }}}"#,
        )
        .unwrap();
        let code = run_with_config(
            r#"import { Button, DatePicker } from 'antd';
console.log(Button, DatePicker);"#,
            config,
            Some("src/app.js"),
        );
        assert_eq!(
            code,
            r#"import Button from "antd/customPath/Button";
import DatePicker from "antd/lib/DatePicker";
console.log(Button, DatePicker);"#
        );
    }

    #[test]
    fn test_custom_import_rewrite_uses_original_specifiers() {
        let config = Config::from_json(
            r#"{"imports": {"customImports": {
                "libraryName": "antd",
                "libraryDirectory": "es"
            }}}"#,
        )
        .unwrap();
        let code = run_with_config(
            r#"import { Button, Unused } from 'antd';
console.log(Button);"#,
            config,
            Some("src/app.js"),
        );
        assert_eq!(
            code,
            r#"import Button from "antd/es/Button";
import Unused from "antd/es/Unused";
console.log(Button);"#
        );
    }

    #[test]
    fn test_custom_import_skips_default_import() {
        let config = Config::from_json(
            r#"{"imports": {"customImports": {"libraryName": "antd"}}}"#,
        )
        .unwrap();
        let code = run_with_config(
            r#"import antd from 'antd';
console.log(antd);"#,
            config,
            Some("src/app.js"),
        );
        assert_eq!(code, r#"import antd from 'antd';
console.log(antd);"#);
    }
}
