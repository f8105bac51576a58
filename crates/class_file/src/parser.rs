use std::{convert::TryFrom, io::Read};

use crate::{
    attributes::Attributes,
    class_file::{FieldInfo, MethodInfo, Trailer},
    constant_pool::{ConstantPoolEntry, PayloadShape, Tag},
    reader::ByteCursor,
    AccessFlags, Attribute, ClassFile, ClassFileError, ConstantPool, Result,
};

pub const MAGIC_IDENTIFIER: u32 = 0xCAFEBABE;

pub struct Parser<R> {
    r: ByteCursor<R>,
}
impl<R: Read> Parser<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: ByteCursor::new(r),
        }
    }

    pub fn parse(&mut self) -> Result<ClassFile> {
        self.parse_magic_identifier()?;
        let (major_version, minor_version) = self.parse_version()?;
        log::debug!("Class file version {}.{}", major_version, minor_version);

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = AccessFlags::from_bits_truncate(self.r.read_u2()?);
        let this_class = self.r.read_u2()?;
        let super_class = self.r.read_u2()?;

        let interfaces_count = self.r.read_u2()?;
        let interfaces = self.r.read_u2_array(interfaces_count)?;

        let fields_count = self.r.read_u2()?;
        log::debug!(
            "{} interface(s), {} field(s) at offset {}",
            interfaces_count,
            fields_count,
            self.r.position()
        );
        let fields = (0..fields_count)
            .map(|_| self.parse_field_info())
            .collect::<Result<Vec<_>>>()?;

        let trailer = self.parse_trailer()?;

        Ok(ClassFile {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            trailer,
        })
    }

    fn parse_trailer(&mut self) -> Result<Trailer> {
        if self.r.is_exhausted()? {
            log::debug!("Input ends after the fields table");
            return Ok(Trailer::Absent);
        }

        let methods_count = self.r.read_u2()?;
        let methods = (0..methods_count)
            .map(|_| self.parse_method_info())
            .collect::<Result<Vec<_>>>()?;

        let attributes_count = self.r.read_u2()?;
        let attributes = self.parse_attributes(attributes_count)?;

        if !self.r.is_exhausted()? {
            log::warn!(
                "Ignoring trailing data after offset {}",
                self.r.position()
            );
        }

        Ok(Trailer::Decoded {
            methods,
            attributes,
        })
    }

    fn parse_field_info(&mut self) -> Result<FieldInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.r.read_u2()?);
        let name_index = self.r.read_u2()?;
        let descriptor_index = self.r.read_u2()?;
        let attributes_count = self.r.read_u2()?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(FieldInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_method_info(&mut self) -> Result<MethodInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.r.read_u2()?);
        let name_index = self.r.read_u2()?;
        let descriptor_index = self.r.read_u2()?;
        let attributes_count = self.r.read_u2()?;
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<()> {
        match self.r.read_u4()? {
            MAGIC_IDENTIFIER => Ok(()),
            magic_identifier => Err(ClassFileError::BadMagicNumber(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<(u16, u16)> {
        let minor = self.r.read_u2()?;
        let major = self.r.read_u2()?;
        Ok((major, minor))
    }

    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let constant_pool_count = self.r.read_u2()?;

        let mut constant_pool = ConstantPool::new();
        let mut index = 1;
        while index < constant_pool_count {
            let cp_info = self.parse_cp_info()?;
            log::trace!("#{} = {} {}", index, cp_info.tag(), cp_info);

            let slots = cp_info.tag().slots();
            if u32::from(index) + u32::from(slots) > u32::from(constant_pool_count) {
                log::warn!("Wide constant #{} is the last entry of the pool", index);
            }

            constant_pool.push(cp_info);
            index = index.saturating_add(slots);
        }

        Ok(constant_pool)
    }

    fn parse_cp_info(&mut self) -> Result<ConstantPoolEntry> {
        let tag = self.r.read_u1()?;
        let tag = Tag::try_from(tag).map_err(ClassFileError::UnknownConstantTag)?;

        let length = match tag.payload_shape() {
            PayloadShape::LengthPrefixed => self.r.read_u2()? as usize,
            PayloadShape::Fixed(length) => length,
        };
        let payload = self.r.read_bytes(length)?;

        Ok(ConstantPoolEntry::new(tag, payload))
    }

    fn parse_attribute(&mut self) -> Result<Attribute> {
        let attribute_name_index = self.r.read_u2()?;
        let attribute_length = self.r.read_u4()?;
        let info = self.r.read_bytes(attribute_length as usize)?;

        Ok(Attribute {
            attribute_name_index,
            info,
        })
    }

    fn parse_attributes(&mut self, attributes_count: u16) -> Result<Attributes> {
        (0..attributes_count)
            .map(|_| self.parse_attribute())
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }
}

#[cfg(test)]
fn parser_over(bytes: &[u8]) -> Parser<&[u8]> {
    Parser::new(bytes)
}

#[cfg(test)]
mod parse_magic_identifier_tests {
    use super::*;

    #[test]
    fn it_should_be_able_to_parse_the_correct_identifier() {
        assert!(parser_over(&[0xca, 0xfe, 0xba, 0xbe])
            .parse_magic_identifier()
            .is_ok());
    }

    #[test]
    fn it_should_fail_if_there_is_not_enough_data() {
        assert!(matches!(
            parser_over(&[0xca, 0xfe, 0xba]).parse_magic_identifier(),
            Err(ClassFileError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn it_should_fail_if_the_magic_identifier_is_incorrect() {
        let mut parser = parser_over(&[0xca, 0xfe, 0xba, 0xbf, 0x00, 0x00]);

        assert!(matches!(
            parser.parse_magic_identifier(),
            Err(ClassFileError::BadMagicNumber(0xcafebabf))
        ));
        assert_eq!(parser.r.position(), 4);
    }
}

#[cfg(test)]
mod parse_version_tests {
    use super::*;

    #[test]
    fn it_should_read_the_minor_version_first() {
        assert_eq!(
            parser_over(&[0x00, 0x03, 0x00, 0x34])
                .parse_version()
                .unwrap(),
            (52, 3)
        );
    }
}


#[cfg(test)]
mod parse_attribute_tests {
    use super::*;

    #[test]
    fn it_should_keep_the_payload_opaque() {
        let attribute = parser_over(&[0x00, 0x09, 0x00, 0x00, 0x00, 0x02, 0xde, 0xad])
            .parse_attribute()
            .unwrap();

        assert_eq!(attribute.attribute_name_index, 9);
        assert_eq!(attribute.info, vec![0xde, 0xad]);
    }

    #[test]
    fn it_should_fail_if_there_are_not_enough_bytes_read() {
        assert!(matches!(
            parser_over(&[0x00, 0x09, 0x00, 0x00, 0x00, 0x02, 0xde]).parse_attribute(),
            Err(ClassFileError::TruncatedInput { needed: 1, .. })
        ));
    }
}
