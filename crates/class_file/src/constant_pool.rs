use std::{borrow::Cow, convert::TryFrom, fmt};

use crate::{ClassFileError, Result};

/// Longest chain of `Class`/`String`/`MethodType` hops followed by
/// [`ConstantPool::resolve`]. Well-formed files never need more than one.
pub const MAX_RESOLUTION_DEPTH: usize = 8;

// https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Utf8 = 1,
    Integer = 3,
    Float = 4,
    Long = 5,
    Double = 6,
    Class = 7,
    String = 8,
    FieldRef = 9,
    MethodRef = 10,
    InterfaceMethodRef = 11,
    NameAndType = 12,
    MethodHandle = 15,
    MethodType = 16,
    Dynamic = 17,
    InvokeDynamic = 18,
    Module = 19,
    Package = 20,
}

/// How the payload following a tag byte is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// A u16 byte count followed by that many bytes.
    LengthPrefixed,
    Fixed(usize),
}

impl Tag {
    pub fn payload_shape(self) -> PayloadShape {
        match self {
            Tag::Utf8 => PayloadShape::LengthPrefixed,
            Tag::Class | Tag::String | Tag::MethodType | Tag::Module | Tag::Package => {
                PayloadShape::Fixed(2)
            }
            Tag::MethodHandle => PayloadShape::Fixed(3),
            Tag::Integer
            | Tag::Float
            | Tag::FieldRef
            | Tag::MethodRef
            | Tag::InterfaceMethodRef
            | Tag::NameAndType
            | Tag::Dynamic
            | Tag::InvokeDynamic => PayloadShape::Fixed(4),
            Tag::Long | Tag::Double => PayloadShape::Fixed(8),
        }
    }

    /// Number of constant pool slots taken by an entry with this tag.
    ///
    /// All 8-byte constants take up two entries in the constant_pool table.
    pub fn slots(self) -> u16 {
        match self {
            Tag::Long | Tag::Double => 2,
            _ => 1,
        }
    }

    /// Tags whose payload is a single index that [`ConstantPool::resolve`]
    /// follows.
    pub fn is_indirect(self) -> bool {
        matches!(self, Tag::Class | Tag::String | Tag::MethodType)
    }

    pub fn name(self) -> &'static str {
        match self {
            Tag::Utf8 => "Utf8",
            Tag::Integer => "Integer",
            Tag::Float => "Float",
            Tag::Long => "Long",
            Tag::Double => "Double",
            Tag::Class => "Class",
            Tag::String => "String",
            Tag::FieldRef => "Fieldref",
            Tag::MethodRef => "Methodref",
            Tag::InterfaceMethodRef => "InterfaceMethodref",
            Tag::NameAndType => "NameAndType",
            Tag::MethodHandle => "MethodHandle",
            Tag::MethodType => "MethodType",
            Tag::Dynamic => "Dynamic",
            Tag::InvokeDynamic => "InvokeDynamic",
            Tag::Module => "Module",
            Tag::Package => "Package",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Tag::Utf8),
            3 => Ok(Tag::Integer),
            4 => Ok(Tag::Float),
            5 => Ok(Tag::Long),
            6 => Ok(Tag::Double),
            7 => Ok(Tag::Class),
            8 => Ok(Tag::String),
            9 => Ok(Tag::FieldRef),
            10 => Ok(Tag::MethodRef),
            11 => Ok(Tag::InterfaceMethodRef),
            12 => Ok(Tag::NameAndType),
            15 => Ok(Tag::MethodHandle),
            16 => Ok(Tag::MethodType),
            17 => Ok(Tag::Dynamic),
            18 => Ok(Tag::InvokeDynamic),
            19 => Ok(Tag::Module),
            20 => Ok(Tag::Package),
            _ => Err(value),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw constant pool entry: the tag and its payload bytes, exactly as read.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPoolEntry {
    tag: Tag,
    payload: Vec<u8>,
}

impl ConstantPoolEntry {
    pub fn new(tag: Tag, payload: Vec<u8>) -> Self {
        Self { tag, payload }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The payload read as Java's modified UTF-8.
    ///
    /// Invalid sequences are replaced rather than rejected.
    pub fn as_text(&self) -> Cow<'_, str> {
        cesu8::from_java_cesu8(&self.payload)
            .unwrap_or_else(|_| String::from_utf8_lossy(&self.payload))
    }

    pub fn as_integer(&self) -> Option<i32> {
        self.fixed().map(i32::from_be_bytes)
    }

    pub fn as_float(&self) -> Option<f32> {
        self.fixed().map(f32::from_be_bytes)
    }

    pub fn as_long(&self) -> Option<i64> {
        self.fixed().map(i64::from_be_bytes)
    }

    pub fn as_double(&self) -> Option<f64> {
        self.fixed().map(f64::from_be_bytes)
    }

    /// The index carried by a single-index entry (`Class`, `String`,
    /// `MethodType`, `Module`, `Package`).
    pub fn index(&self) -> Option<u16> {
        self.fixed().map(u16::from_be_bytes)
    }

    /// The two indices carried by a 4-byte reference entry, high half first.
    pub fn index_pair(&self) -> Option<(u16, u16)> {
        let [a, b, c, d]: [u8; 4] = self.fixed()?;
        Some((u16::from_be_bytes([a, b]), u16::from_be_bytes([c, d])))
    }

    /// The reference kind and referenced index of a `MethodHandle`.
    pub fn method_handle(&self) -> Option<(u8, u16)> {
        let [kind, hi, lo]: [u8; 3] = self.fixed()?;
        Some((kind, u16::from_be_bytes([hi, lo])))
    }

    fn fixed<const N: usize>(&self) -> Option<[u8; N]> {
        self.payload.as_slice().try_into().ok()
    }
}

fn reference_kind_name(kind: u8) -> Option<&'static str> {
    Some(match kind {
        1 => "REF_getField",
        2 => "REF_getStatic",
        3 => "REF_putField",
        4 => "REF_putStatic",
        5 => "REF_invokeVirtual",
        6 => "REF_invokeStatic",
        7 => "REF_invokeSpecial",
        8 => "REF_newInvokeSpecial",
        9 => "REF_invokeInterface",
        _ => return None,
    })
}

impl fmt::Display for ConstantPoolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self.tag {
            Tag::Utf8 => return f.write_str(&self.as_text()),
            Tag::Integer => self.as_integer().map(|v| write!(f, "Integer({})", v)),
            Tag::Float => self.as_float().map(|v| write!(f, "Float({:?})", v)),
            Tag::Long => self.as_long().map(|v| write!(f, "Long({})", v)),
            Tag::Double => self.as_double().map(|v| write!(f, "Double({:?})", v)),
            Tag::Class | Tag::String | Tag::MethodType | Tag::Module | Tag::Package => {
                self.index().map(|i| write!(f, "#{}", i))
            }
            Tag::FieldRef
            | Tag::MethodRef
            | Tag::InterfaceMethodRef
            | Tag::NameAndType
            | Tag::Dynamic
            | Tag::InvokeDynamic => self.index_pair().map(|(a, b)| write!(f, "#{}:#{}", a, b)),
            Tag::MethodHandle => self.method_handle().map(|(kind, index)| {
                match reference_kind_name(kind) {
                    Some(name) => write!(f, "{}:#{}", name, index),
                    None => write!(f, "REF_{}:#{}", kind, index),
                }
            }),
        };

        rendered.unwrap_or_else(|| {
            write!(f, "({} with {} byte payload)", self.tag, self.payload.len())
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Entry(ConstantPoolEntry),
    /// The slot following a `Long` or `Double`.
    Unusable,
}

/// The 1-indexed constant pool of a class file.
///
/// Indices are only checked when they are looked up.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConstantPool {
    slots: Vec<Slot>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, followed by its unusable slot if it is a wide
    /// constant.
    pub fn push(&mut self, entry: ConstantPoolEntry) {
        let extra_slots = entry.tag.slots() - 1;
        self.slots.push(Slot::Entry(entry));
        (0..extra_slots).for_each(|_| self.slots.push(Slot::Unusable));
    }

    /// The `constant_pool_count` of this pool: one more than the number of
    /// slots, unusable ones included.
    pub fn count(&self) -> usize {
        self.slots.len() + 1
    }

    pub fn get(&self, index: u16) -> Result<&ConstantPoolEntry> {
        let slot = (index as usize)
            .checked_sub(1)
            .and_then(|i| self.slots.get(i));

        match slot {
            Some(Slot::Entry(entry)) => Ok(entry),
            Some(Slot::Unusable) | None => Err(ClassFileError::InvalidConstantIndex(index)),
        }
    }

    pub fn get_tagged(&self, index: u16, expected: Tag) -> Result<&ConstantPoolEntry> {
        let entry = self.get(index)?;
        if entry.tag != expected {
            return Err(ClassFileError::UnexpectedConstantPoolEntry {
                index,
                expected,
                found: entry.tag,
            });
        }

        Ok(entry)
    }

    pub fn utf8(&self, index: u16) -> Result<Cow<'_, str>> {
        Ok(self.get_tagged(index, Tag::Utf8)?.as_text())
    }

    /// Follows `Class`, `String` and `MethodType` entries to the entry they
    /// name. Any other entry resolves to itself.
    pub fn resolve(&self, index: u16) -> Result<&ConstantPoolEntry> {
        let mut current = index;
        for _ in 0..=MAX_RESOLUTION_DEPTH {
            let entry = self.get(current)?;
            match entry.index() {
                Some(next) if entry.tag.is_indirect() => current = next,
                _ => return Ok(entry),
            }
        }

        log::debug!("Gave up resolving #{} at #{}", index, current);
        Err(ClassFileError::ReferenceCycleDetected(index))
    }

    /// Resolves `index` and expects to land on a `Utf8` entry.
    pub fn resolve_text(&self, index: u16) -> Result<Cow<'_, str>> {
        let entry = self.resolve(index)?;
        if entry.tag != Tag::Utf8 {
            return Err(ClassFileError::UnexpectedConstantPoolEntry {
                index,
                expected: Tag::Utf8,
                found: entry.tag,
            });
        }

        Ok(entry.as_text())
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries {
            slots: self.slots.iter().enumerate(),
        }
    }
}

/// Iterator over `(index, entry)` pairs, skipping unusable slots.
pub struct Entries<'a> {
    slots: std::iter::Enumerate<std::slice::Iter<'a, Slot>>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (u16, &'a ConstantPoolEntry);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|(i, slot)| match slot {
            Slot::Entry(entry) => Some((i as u16 + 1, entry)),
            Slot::Unusable => None,
        })
    }
}

impl<'a> IntoIterator for &'a ConstantPool {
    type Item = (u16, &'a ConstantPoolEntry);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}


#[cfg(test)]
mod tag_tests {
    use super::*;

    #[test]
    fn it_should_reject_unknown_tags() {
        for tag in [0u8, 2, 13, 14, 21, 99, 255] {
            assert_eq!(Tag::try_from(tag), Err(tag));
        }
    }

    #[test]
    fn it_should_only_widen_long_and_double() {
        for value in 0..=u8::MAX {
            if let Ok(tag) = Tag::try_from(value) {
                let expected = if matches!(tag, Tag::Long | Tag::Double) { 2 } else { 1 };
                assert_eq!(tag.slots(), expected, "{}", tag);
                assert_eq!(tag as u8, value);
            }
        }
    }
}
