//! Emit the constant table as a binary module image.
//!
//! A module image is an in-memory type definition with one accessor per constant, serialized with `bincode` in a
//! single pass. There is no intermediate textual form: the accessors hold the native [`ConstValue`]s, so a consumer
//! reads values back without parsing or computing anything.
//!
//! ## Format
//!
//! [`ModuleImage`] starts with a [`ModuleHeader`] (magic bytes, format version, generator). The loader decodes the
//! header first and rejects foreign or newer images before decoding the rest.

use std::fs;
use std::path::{Path, PathBuf};

use defconst_core::{ConstValue, ValueKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ContainerName, EmitError, Emitter};
use crate::table::ConstantTable;
use crate::version::DEFCONST_VERSION;

/// Leading bytes of every module image.
pub const MODULE_MAGIC: [u8; 8] = *b"DEFCONST";

/// Current image layout version.
pub const MODULE_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleHeader {
    pub magic: [u8; 8],
    pub format_version: u16,
    /// Version of the defconst build that wrote the image
    pub generator: String,
}

impl ModuleHeader {
    fn current() -> Self {
        Self {
            magic: MODULE_MAGIC,
            format_version: MODULE_FORMAT_VERSION,
            generator: DEFCONST_VERSION.to_string(),
        }
    }
}

/// A complete module: header, module name, and the type definitions it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleImage {
    pub header: ModuleHeader,
    /// Target file stem
    pub name: String,
    pub types: Vec<TypeDef>,
}

impl ModuleImage {
    /// Look a type up by its `A::B::Name` path.
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.full_name() == full_name)
    }
}

/// A static-only type: one parameterless, read-only accessor per constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub namespace: Vec<String>,
    pub name: String,
    pub accessors: Vec<Accessor>,
}

impl TypeDef {
    pub fn full_name(&self) -> String {
        let mut parts: Vec<&str> = self.namespace.iter().map(String::as_str).collect();
        parts.push(&self.name);
        parts.join("::")
    }

    /// Fixed value of an accessor.
    pub fn get(&self, name: &str) -> Option<&ConstValue> {
        self.accessors.iter().find(|a| a.name == name).map(|a| &a.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessor {
    pub name: String,
    pub value: ConstValue,
}

impl Accessor {
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}

/// Binary module emitter
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleEmitter;

impl ModuleEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Build the in-memory image for a table.
    pub fn build_image(&self, table: &ConstantTable, container: &ContainerName, module_name: &str) -> ModuleImage {
        let accessors = table
            .iter()
            .map(|c| Accessor {
                name: c.name().to_string(),
                value: c.value().clone(),
            })
            .collect();
        ModuleImage {
            header: ModuleHeader::current(),
            name: module_name.to_string(),
            types: vec![TypeDef {
                namespace: container.namespace.clone(),
                name: container.name.clone(),
                accessors,
            }],
        }
    }
}

impl Emitter for ModuleEmitter {
    fn name(&self) -> &'static str {
        "module"
    }

    #[tracing::instrument(skip_all, fields(const_count = table.len(), module = module_name))]
    fn render(
        &self,
        table: &ConstantTable,
        container: &ContainerName,
        module_name: &str,
    ) -> Result<Vec<u8>, EmitError> {
        let image = self.build_image(table, container, module_name);
        Ok(bincode::serialize(&image)?)
    }
}

/// Errors while reading a module image back
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read module '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("module image is truncated or corrupt: {0}")]
    Decode(#[from] bincode::Error),

    #[error("not a defconst module image")]
    BadMagic,

    #[error("module format version {found} is not supported (expected {MODULE_FORMAT_VERSION})")]
    UnsupportedVersion { found: u16 },
}

/// Decode a module image from bytes.
pub fn decode_module(bytes: &[u8]) -> Result<ModuleImage, LoadError> {
    // The header is the image's first field and the magic its first member, so both decode from the same prefix.
    let magic: [u8; 8] = bincode::deserialize(bytes)?;
    if magic != MODULE_MAGIC {
        return Err(LoadError::BadMagic);
    }
    let header: ModuleHeader = bincode::deserialize(bytes)?;
    if header.format_version != MODULE_FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion {
            found: header.format_version,
        });
    }
    Ok(bincode::deserialize(bytes)?)
}

/// Read and decode a module image file.
pub fn load_module(path: &Path) -> Result<ModuleImage, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_module(&bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::diagnostics::Diagnostics;
    use crate::table::Constant;

    fn sample_table() -> ConstantTable {
        let mut diags = Diagnostics::new();
        let mut table = ConstantTable::new();
        table.insert(Constant::new("DEBUG", ConstValue::Bool(true)), &mut diags);
        table.insert(Constant::new("LIMIT", ConstValue::Int(-3)), &mut diags);
        table.insert(
            Constant::new("DIRS", ConstValue::StringArray(vec!["a".into(), "b".into()])),
            &mut diags,
        );
        table
    }

    fn container() -> ContainerName {
        ContainerName::parse("Preprocessor", "DefineConstants").unwrap()
    }

    #[test]
    fn image_keeps_table_order_and_values() {
        let image = ModuleEmitter::new().build_image(&sample_table(), &container(), "consts");
        assert_eq!(image.name, "consts");
        let ty = image.find_type("Preprocessor::DefineConstants").unwrap();
        let names: Vec<_> = ty.accessors.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["DEBUG", "LIMIT", "DIRS"]);
        assert_eq!(ty.get("LIMIT"), Some(&ConstValue::Int(-3)));
        assert_eq!(ty.accessors[2].kind(), ValueKind::StringArray);
    }

    #[test]
    fn rendered_bytes_decode_to_the_same_image() {
        let emitter = ModuleEmitter::new();
        let bytes = emitter.render(&sample_table(), &container(), "consts").unwrap();
        assert!(bytes.starts_with(&MODULE_MAGIC));
        let decoded = decode_module(&bytes).unwrap();
        assert_eq!(decoded, emitter.build_image(&sample_table(), &container(), "consts"));
    }

    #[test]
    fn foreign_bytes_are_rejected() {
        let err = decode_module(b"NOTMAGIC and then some more bytes").unwrap_err();
        assert!(matches!(err, LoadError::BadMagic));
    }

    #[test]
    fn truncated_images_are_rejected() {
        let err = decode_module(b"DEF").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn newer_format_versions_are_rejected() {
        let mut image = ModuleEmitter::new().build_image(&sample_table(), &container(), "consts");
        image.header.format_version = MODULE_FORMAT_VERSION + 1;
        let bytes = bincode::serialize(&image).unwrap();
        assert!(matches!(
            decode_module(&bytes).unwrap_err(),
            LoadError::UnsupportedVersion { found } if found == MODULE_FORMAT_VERSION + 1
        ));
    }
}
