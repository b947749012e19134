//! Emit the constant table as Rust source.
//!
//! The container is an uninhabited `pub enum` (it cannot be instantiated) whose associated `pub const` items are the
//! constants, nested in one `pub mod` per namespace segment:
//!
//! ```text
//! pub mod Preprocessor {
//!     pub enum DefineConstants {}
//!     impl DefineConstants {
//!         pub const DEBUG: bool = true;
//!         pub const VERSION: &'static str = "1.2.3";
//!     }
//! }
//! ```
//!
//! ## Notes
//!
//! - Emission produces a Rust syntax tree (`syn`) and formats it via `prettyplease`.
//! - Names that are Rust keywords are emitted as raw identifiers (`r#type`).
//! - Values are emitted from their native form; nothing is re-parsed here.

use defconst_core::kinds::{self, ValueKind};
use defconst_core::{ConstValue, ident};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use super::{ContainerName, EmitError, Emitter};
use crate::table::{Constant, ConstantTable};
use crate::version::DEFCONST_VERSION;

/// Rust source emitter
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceEmitter;

impl SourceEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Emit the table to formatted Rust source, including the generator header.
    #[tracing::instrument(skip_all, fields(const_count = table.len()))]
    pub fn render_source(&self, table: &ConstantTable, container: &ContainerName) -> Result<String, EmitError> {
        let tokens = self.emit_tokens(table, container)?;
        let syntax_tree: syn::File = syn::parse2(tokens).map_err(|e| EmitError::SynParse(e.to_string()))?;
        let formatted = prettyplease::unparse(&syntax_tree);
        Ok(format!(
            "// Generated by defconst v{}. Do not edit.\n\n{}",
            DEFCONST_VERSION, formatted
        ))
    }

    /// Emit the table to tokens (without formatting).
    pub fn emit_tokens(&self, table: &ConstantTable, container: &ContainerName) -> Result<TokenStream, EmitError> {
        let ty = escape_keyword(&container.name);
        let consts = table.iter().map(emit_const).collect::<Result<Vec<_>, _>>()?;

        let mut items = quote! {
            #[doc = " Build-time constants generated by defconst."]
            #[allow(non_camel_case_types)]
            pub enum #ty {}
            #[allow(non_upper_case_globals, clippy::redundant_static_lifetimes)]
            impl #ty {
                #(#consts)*
            }
        };

        // Wrap innermost namespace segment first.
        for segment in container.namespace.iter().rev() {
            let module = escape_keyword(segment);
            items = quote! {
                #[allow(non_snake_case)]
                pub mod #module {
                    #items
                }
            };
        }
        Ok(items)
    }
}

impl Emitter for SourceEmitter {
    fn name(&self) -> &'static str {
        "source"
    }

    fn render(
        &self,
        table: &ConstantTable,
        container: &ContainerName,
        _module_name: &str,
    ) -> Result<Vec<u8>, EmitError> {
        self.render_source(table, container).map(String::into_bytes)
    }
}

fn emit_const(constant: &Constant) -> Result<TokenStream, EmitError> {
    let name = escape_keyword(constant.name());
    let ty = rust_type(constant.kind())?;
    let value = match constant.value() {
        ConstValue::String(s) => quote! { #s },
        ConstValue::Bool(b) => quote! { #b },
        ConstValue::Int(n) => int_literal(*n),
        ConstValue::StringArray(items) => quote! { &[#(#items),*] },
    };
    Ok(quote! { pub const #name: #ty = #value; })
}

/// Accessor type for a kind, as listed in the kind registry.
fn rust_type(kind: ValueKind) -> Result<syn::Type, EmitError> {
    let spelling = kinds::info(kind).rust_type;
    syn::parse_str(spelling).map_err(|e| EmitError::SynParse(format!("type `{}` of kind {}: {}", spelling, kind, e)))
}

/// Unsuffixed integer literal; negatives become unary minus on the magnitude.
fn int_literal(n: i32) -> TokenStream {
    let magnitude = Literal::u32_unsuffixed(n.unsigned_abs());
    if n < 0 {
        quote! { -#magnitude }
    } else {
        quote! { #magnitude }
    }
}

/// Identifier token, spelled `r#name` for Rust keywords.
///
/// Callers only pass names accepted by the identifier rule, which excludes the spellings that cannot be raw.
fn escape_keyword(name: &str) -> Ident {
    if ident::needs_raw(name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::diagnostics::Diagnostics;

    fn table(constants: Vec<Constant>) -> ConstantTable {
        let mut diags = Diagnostics::new();
        let mut table = ConstantTable::new();
        for c in constants {
            table.insert(c, &mut diags);
        }
        table
    }

    fn render(table: &ConstantTable, namespace: &str) -> String {
        let container = ContainerName::parse(namespace, "DefineConstants").unwrap();
        SourceEmitter::new().render_source(table, &container).unwrap()
    }

    #[test]
    fn header_names_the_generator() {
        let code = render(&ConstantTable::new(), "Preprocessor");
        assert!(code.starts_with(&format!("// Generated by defconst v{}", DEFCONST_VERSION)));
    }

    #[test]
    fn each_kind_gets_its_rust_type() {
        let t = table(vec![
            Constant::new("S", ConstValue::String("x".into())),
            Constant::new("B", ConstValue::Bool(false)),
            Constant::new("I", ConstValue::Int(42)),
            Constant::new("A", ConstValue::StringArray(vec!["p".into(), "q".into()])),
        ]);
        let code = render(&t, "Preprocessor");
        assert!(code.contains(r#"pub const S: &'static str = "x";"#), "{code}");
        assert!(code.contains("pub const B: bool = false;"), "{code}");
        assert!(code.contains("pub const I: i32 = 42;"), "{code}");
        assert!(code.contains(r#"pub const A: &'static [&'static str] = &["p", "q"];"#), "{code}");
    }

    #[test]
    fn accessor_types_come_from_the_kind_registry() {
        let t = table(vec![
            Constant::new("S", ConstValue::String("x".into())),
            Constant::new("B", ConstValue::Bool(true)),
            Constant::new("I", ConstValue::Int(1)),
            Constant::new("A", ConstValue::StringArray(vec!["p".into()])),
        ]);
        let code = render(&t, "");
        for constant in &t {
            let declared = format!("pub const {}: {} = ", constant.name(), kinds::info(constant.kind()).rust_type);
            assert!(code.contains(&declared), "{declared:?} missing from {code}");
        }
    }

    #[test]
    fn negative_ints_and_extremes() {
        let t = table(vec![
            Constant::new("LOW", ConstValue::Int(i32::MIN)),
            Constant::new("NEG", ConstValue::Int(-7)),
        ]);
        let code = render(&t, "");
        assert!(code.contains("pub const LOW: i32 = -2147483648;"), "{code}");
        assert!(code.contains("pub const NEG: i32 = -7;"), "{code}");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        let t = table(vec![Constant::new("MSG", ConstValue::String(r#"a "b" \c"#.into()))]);
        let code = render(&t, "");
        assert!(code.contains(r#"pub const MSG: &'static str = "a \"b\" \\c";"#), "{code}");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        let t = table(vec![Constant::new("type", ConstValue::Int(1))]);
        let code = render(&t, "");
        assert!(code.contains("pub const r#type: i32 = 1;"), "{code}");
    }

    #[test]
    fn namespace_segments_nest() {
        let code = render(&ConstantTable::new(), "Company.Build");
        let outer = code.find("pub mod Company {").unwrap();
        let inner = code.find("pub mod Build {").unwrap();
        let ty = code.find("pub enum DefineConstants {}").unwrap();
        assert!(outer < inner && inner < ty, "{code}");
    }

    #[test]
    fn empty_namespace_emits_top_level_container() {
        let code = render(&ConstantTable::new(), "");
        assert!(!code.contains("pub mod"), "{code}");
        assert!(code.contains("pub enum DefineConstants {}"), "{code}");
    }

    #[test]
    fn output_parses_as_rust() {
        let t = table(vec![
            Constant::new("match", ConstValue::Bool(true)),
            Constant::new("LIST", ConstValue::StringArray(vec!["x".into()])),
        ]);
        let code = render(&t, "A::B");
        syn::parse_file(&code).unwrap();
    }
}
