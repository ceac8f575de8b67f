//! Command-line front end: reads a `.lineage` file and writes its SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputTarget};

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
};

use log::info;

use lineage::{LineageError, TreeBuilder};

/// Renders `args.input` to the target chosen by `args`.
///
/// The output file is only created once the source has parsed, so a broken
/// input never leaves a partial SVG behind.
///
/// # Errors
///
/// Returns [`LineageError`] if the configuration cannot be loaded, the
/// input cannot be read or parsed, or the output cannot be written.
pub fn run(args: &Args) -> Result<(), LineageError> {
    let config = config::load_config(args.config.as_ref())?;
    let builder = TreeBuilder::new(config)?;

    info!(input = args.input.display().to_string(); "Reading family tree");
    let source = fs::read_to_string(&args.input)?;
    let tree = builder.parse(&source)?;

    if args.check {
        info!(members = tree.members_count(); "Source is valid");
        return Ok(());
    }

    match args.output_target() {
        OutputTarget::Stdout => write_to(&builder, &tree, io::stdout().lock()),
        OutputTarget::File(path) => {
            write_to(&builder, &tree, File::create(&path)?)?;
            info!(output = path.display().to_string(); "SVG written");
            Ok(())
        }
    }
}

fn write_to(
    builder: &TreeBuilder,
    tree: &lineage::semantic::FamilyTree,
    target: impl Write,
) -> Result<(), LineageError> {
    let mut writer = BufWriter::new(target);
    builder.write_svg(tree, &mut writer)?;
    writer.flush()?;
    Ok(())
}
