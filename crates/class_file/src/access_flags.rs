use bitflags::bitflags;

bitflags! {
    /// Access and property flags shared by classes and fields.
    ///
    /// `SUPER` only has a meaning on classes; `PRIVATE`, `PROTECTED`,
    /// `STATIC`, `VOLATILE` and `TRANSIENT` only on fields.
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const VOLATILE = 0x0040;
        const TRANSIENT = 0x0080;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

const CLASS_FLAG_NAMES: [(AccessFlags, &str); 4] = [
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::INTERFACE, "interface"),
    (AccessFlags::ABSTRACT, "abstract"),
];

const FIELD_FLAG_NAMES: [(AccessFlags, &str); 9] = [
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::PRIVATE, "private"),
    (AccessFlags::PROTECTED, "protected"),
    (AccessFlags::STATIC, "static"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::VOLATILE, "volatile"),
    (AccessFlags::TRANSIENT, "transient"),
    (AccessFlags::SYNTHETIC, "synthetic"),
    (AccessFlags::ENUM, "enum"),
];

impl AccessFlags {
    /// Modifiers reported for a class, in source order. `SUPER` is never
    /// reported.
    pub fn class_modifiers(&self) -> Vec<&'static str> {
        Self::names(*self, &CLASS_FLAG_NAMES)
    }

    pub fn field_modifiers(&self) -> Vec<&'static str> {
        Self::names(*self, &FIELD_FLAG_NAMES)
    }

    fn names(flags: AccessFlags, table: &[(AccessFlags, &'static str)]) -> Vec<&'static str> {
        table
            .iter()
            .filter(|(flag, _)| flags.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}
