//! Quick commandline utility to draw the chunking and multiscale voxel figures.
//!
//! Every figure has a name in the built-in catalog. Pick one or more by name,
//! or `--all`, and each is written as a PNG into the output directory.

use clap::Parser;
use std::path::Path;

use chunkfig::catalog::{catalog, entry, FigureName, DEFAULT_OUTPUT_DIR};
use chunkfig::generate;
use chunkfig::render::RenderOptions;

// use clap to create commandline interface
#[derive(Parser, Debug)]
#[command(author, about, version, long_about)]
struct Args {
    /// the figures to draw, by catalog name
    #[arg(value_enum, default_values_t = [FigureName::Multiscale])]
    figures: Vec<FigureName>,

    /// draw every figure in the catalog
    #[arg(long, conflicts_with = "figures")]
    all: bool,

    /// print the catalog and exit
    #[arg(short, long)]
    list: bool,

    /// the directory the images are written to, created if missing
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: String,

    /// raster resolution in dots per inch, at least 1
    #[arg(short, long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: u32,
}

/// Main function that parses commandline arguments and runs the program.
///
/// Each selected figure is built, rendered and saved in turn. The first
/// failure stops the run.
fn main() {
    env_logger::init();
    let cli = Args::parse();
    let output_basepath = Path::new(&cli.output_dir);

    if cli.list {
        for e in catalog() {
            println!(
                "{:<20} {:<32} {}",
                e.name.as_str(),
                e.output_path(output_basepath).display(),
                e.illustration
            );
        }
        return;
    }

    let names = if cli.all {
        FigureName::ALL.to_vec()
    } else {
        cli.figures
    };
    let options = RenderOptions { dpi: cli.dpi };

    for name in names {
        let output_path = generate(&entry(name), output_basepath, &options).unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
        println!("Output: {}", output_path.display());
    }
}
