use std::fmt::Write;

use anyhow::Result;
use classy_class_file::ClassFile;

/// What to print for each class file.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub indent: usize,
    pub fields: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            fields: false,
        }
    }
}

pub fn render(filename: &str, class_file: &ClassFile, options: &ReportOptions) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{}:", filename)?;
    writeln!(out, "  class: {}", class_file.class_name()?)?;
    writeln!(out, "  version: {}", class_file.version())?;
    writeln!(out, "  access: {}", class_file.modifiers())?;

    if options.fields {
        writeln!(out, "  fields:")?;
        for field in &class_file.fields {
            let mut modifiers = field.access_flags.field_modifiers().join(" ");
            if !modifiers.is_empty() {
                modifiers.push(' ');
            }
            writeln!(
                out,
                "{:indent$}{}{} {}",
                "",
                modifiers,
                class_file.field_name(field)?,
                class_file.field_descriptor(field)?,
                indent = options.indent
            )?;
        }
    }

    writeln!(out, "  constants:")?;
    for (index, entry) in class_file.constants() {
        writeln!(
            out,
            "{:indent$}{:3} = {}",
            "",
            index,
            entry,
            indent = options.indent
        )?;
    }

    Ok(out)
}
