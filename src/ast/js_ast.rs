use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use swc_core::common::{FileName, Mark, GLOBALS};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as JsCodegenConfig, Emitter};
use swc_core::ecma::parser::error::SyntaxError;
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

use crate::ast::error;
use crate::ast::file::File;
use crate::compiler::Context;

#[derive(Clone)]
pub struct JsAst {
    pub ast: Module,
    pub unresolved_mark: Mark,
    pub top_level_mark: Mark,
    path: String,
    context: Arc<Context>,
}

impl fmt::Debug for JsAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsAst")
    }
}

impl JsAst {
    pub fn new(file: &File, context: Arc<Context>) -> Result<Self> {
        let fm = context.meta.script.cm.new_source_file(
            FileName::Real(file.path.clone()).into(),
            file.get_content_raw(),
        );
        let extname = &file.extname;
        let syntax = if extname == "ts" || extname == "tsx" {
            Syntax::Typescript(TsSyntax {
                tsx: extname == "tsx",
                decorators: true,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: true,
                decorators: true,
                decorators_before_export: true,
                ..Default::default()
            })
        };
        let lexer = Lexer::new(syntax, EsVersion::EsNext, StringInput::from(&*fm), None);
        let mut parser = Parser::new_from(lexer);
        let ast = parser.parse_module();

        // handle ast errors
        let mut ast_errors = parser.take_errors();
        // ignore with syntax error in strict mode
        ast_errors.retain_mut(|error| !matches!(error.kind(), SyntaxError::WithInStrict));
        if ast.is_err() {
            ast_errors.push(ast.clone().unwrap_err());
        }
        if !ast_errors.is_empty() {
            let messages = ast_errors
                .iter()
                .map(|err| err.kind().msg().to_string())
                .collect::<Vec<String>>();
            return Err(anyhow!(error::ParseError::JsParseError {
                messages: messages.join("\n")
            }));
        }
        let ast = ast./*safe*/unwrap();

        // top level mark and unresolved mark need to be persisted for transform usage
        GLOBALS.set(&context.meta.script.globals, || {
            let top_level_mark = Mark::new();
            let unresolved_mark = Mark::new();
            Ok(JsAst {
                ast,
                unresolved_mark,
                top_level_mark,
                path: file.path.to_string_lossy().to_string(),
                context: context.clone(),
            })
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn generate(&self) -> Result<String> {
        let mut buf = vec![];
        let cm = self.context.meta.script.cm.clone();
        {
            let mut emitter = Emitter {
                cfg: JsCodegenConfig::default().with_target(EsVersion::Es2022),
                cm: cm.clone(),
                comments: None,
                wr: Box::new(JsWriter::new(cm.clone(), "\n", &mut buf, None)),
            };
            emitter.emit_module(&self.ast).map_err(|err| {
                anyhow!(error::GenerateError::JsGenerateError {
                    message: err.to_string()
                })
            })?;
        }
        Ok(String::from_utf8(buf)?)
    }
}
