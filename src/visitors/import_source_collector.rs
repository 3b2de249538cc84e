use std::collections::HashMap;

use swc_core::ecma::ast::{Id, ImportDecl, Module};
use swc_core::ecma::visit::{Visit, VisitWith};

use crate::ast::utils::import_local;

/// Maps each imported binding to the module specifier it came from.
#[derive(Default)]
pub struct ImportSourceCollector {
    sources: HashMap<Id, String>,
}

impl ImportSourceCollector {
    pub fn collect(module: &Module) -> Self {
        let mut collector = Self::default();
        module.visit_with(&mut collector);
        collector
    }

    pub fn source_of(&self, id: &Id) -> Option<&str> {
        self.sources.get(id).map(|source| source.as_str())
    }
}

impl Visit for ImportSourceCollector {
    fn visit_import_decl(&mut self, n: &ImportDecl) {
        for specifier in &n.specifiers {
            self.sources
                .insert(import_local(specifier).to_id(), n.src.value.to_string());
        }
    }
}
