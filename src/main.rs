use std::{
    fs::File,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use classy_class_file::ClassFile;

mod report;

use report::ReportOptions;

/// Prints the version, access flags and constant pool of Java class files
#[derive(Parser)]
#[command(name = "classy")]
#[command(version)]
struct Cli {
    /// Class files to inspect
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Indentation of constant pool rows
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Also list the fields of each class
    #[arg(long)]
    fields: bool,
}

fn inspect(path: &Path) -> Result<ClassFile> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    Ok(ClassFile::parse(file)?)
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let options = ReportOptions {
        indent: cli.indent,
        fields: cli.fields,
    };

    let mut failed = 0;
    for path in &cli.files {
        let report = inspect(path).and_then(|class_file| {
            report::render(&path.display().to_string(), &class_file, &options)
        });

        match report {
            Ok(report) => println!("{}", report),
            Err(e) => {
                log::debug!("{:?}", e);
                eprintln!("Can't inspect '{}': {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::info!("{} of {} file(s) failed", failed, cli.files.len());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
