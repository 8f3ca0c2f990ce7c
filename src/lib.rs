//! Voxel illustrations of chunked and multiscale array layouts.
//!
//! Each illustration is built as an explicit [`figure::Figure`] by one of the
//! functions in [`illustrations`], then rasterised by [`render`]. The
//! [`catalog`] names every figure and the file it is saved to.

pub mod catalog;
pub mod common;
pub mod error;
pub mod figure;
pub mod grid;
pub mod illustrations;
pub mod partition;
pub mod projection;
pub mod render;
pub mod style;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::catalog::CatalogEntry;
use crate::error::Result;
use crate::render::{render_to_file, RenderOptions};

/// Build the figure for `entry` and save it under `output_dir`, creating the
/// directory if needed. Returns the path written.
pub fn generate(
    entry: &CatalogEntry,
    output_dir: &Path,
    options: &RenderOptions,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let output_path = entry.output_path(output_dir);
    info!("drawing {} ({})", entry.name, entry.illustration);
    let figure = entry.illustration.build();
    render_to_file(&figure, &output_path, options)?;
    Ok(output_path)
}
