use std::{borrow::Cow, io::Read};

use crate::{
    attributes::Attributes, constant_pool::Entries, parser::Parser, version, AccessFlags,
    ConstantPool, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<FieldInfo>,
    pub trailer: Trailer,
}

/// Everything that follows the fields table.
#[derive(Debug, Clone, PartialEq)]
pub enum Trailer {
    Decoded {
        methods: Vec<MethodInfo>,
        attributes: Attributes,
    },
    /// The input ended right after the fields table, so methods and class
    /// attributes were never read.
    Absent,
}

impl ClassFile {
    pub fn parse(bytes: impl Read) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    pub fn class_name(&self) -> Result<Cow<'_, str>> {
        // The value of the this_class item must be a valid index into the constant_pool table.
        // The constant_pool entry at that index must be a CONSTANT_Class_info structure (§4.4.1)
        // representing the class or interface defined by this class file.
        self.constant_pool.resolve_text(self.this_class)
    }

    pub fn super_class(&self) -> Result<Option<Cow<'_, str>>> {
        // If the value of the super_class item is zero, then this class file must represent the class Object,
        // the only class or interface without a direct superclass.
        if self.super_class == 0 {
            return Ok(None);
        }

        self.constant_pool.resolve_text(self.super_class).map(Some)
    }

    pub fn interface_names(&self) -> Result<Vec<Cow<'_, str>>> {
        self.interfaces
            .iter()
            .map(|&index| self.constant_pool.resolve_text(index))
            .collect()
    }

    /// Platform label of the major version, e.g. `"J2SE 8"`.
    pub fn version(&self) -> &'static str {
        version::platform_name(self.major_version)
    }

    /// Reported class modifiers, each followed by a space.
    pub fn modifiers(&self) -> String {
        self.access_flags
            .class_modifiers()
            .iter()
            .map(|name| format!("{} ", name))
            .collect()
    }

    /// The usable constant pool entries with their indices.
    pub fn constants(&self) -> Entries<'_> {
        self.constant_pool.entries()
    }

    pub fn methods(&self) -> Option<&[MethodInfo]> {
        match &self.trailer {
            Trailer::Decoded { methods, .. } => Some(methods),
            Trailer::Absent => None,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match &self.trailer {
            Trailer::Decoded { attributes, .. } => Some(attributes),
            Trailer::Absent => None,
        }
    }

    pub fn field_name(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(field.name_index)
    }

    pub fn field_descriptor(&self, field: &FieldInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(field.descriptor_index)
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(method.name_index)
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(method.descriptor_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}
