pub mod ident_ref_collector;
pub mod import_source_collector;
pub mod prop_types;
pub mod react_component;
pub mod style_registry;
pub mod unused_imports;
