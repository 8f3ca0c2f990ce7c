//! The table of illustrations the tool knows how to draw, and where each one
//! is written.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::common::Shape3;
use crate::figure::Figure;
use crate::illustrations::{
    chunk_tiling, multiscale, request_overlay, OverlayVariant, MULTISCALE_BASE,
    MULTISCALE_LEVELS,
};

/// Directory figures are written to unless told otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "img";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FigureName {
    #[value(name = "2d-stack")]
    TwoDStack,
    #[value(name = "2d-stack-access")]
    TwoDStackAccess,
    #[value(name = "2d-stack-access-bad")]
    TwoDStackAccessBad,
    #[value(name = "stack-small-chunks")]
    StackSmallChunks,
    #[value(name = "stack-big-chunks")]
    StackBigChunks,
    #[value(name = "chunk-access")]
    ChunkAccess,
    #[value(name = "multiscale")]
    Multiscale,
}

impl FigureName {
    pub const ALL: [FigureName; 7] = [
        FigureName::TwoDStack,
        FigureName::TwoDStackAccess,
        FigureName::TwoDStackAccessBad,
        FigureName::StackSmallChunks,
        FigureName::StackBigChunks,
        FigureName::ChunkAccess,
        FigureName::Multiscale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FigureName::TwoDStack => "2d-stack",
            FigureName::TwoDStackAccess => "2d-stack-access",
            FigureName::TwoDStackAccessBad => "2d-stack-access-bad",
            FigureName::StackSmallChunks => "stack-small-chunks",
            FigureName::StackBigChunks => "stack-big-chunks",
            FigureName::ChunkAccess => "chunk-access",
            FigureName::Multiscale => "multiscale",
        }
    }
}

impl fmt::Display for FigureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one illustration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Illustration {
    ChunkTiling { image: Shape3, chunk: Shape3 },
    Overlay(OverlayVariant),
    Multiscale { base: Shape3, levels: usize },
}

impl Illustration {
    pub fn build(&self) -> Figure {
        match *self {
            Illustration::ChunkTiling { image, chunk } => chunk_tiling(image, chunk),
            Illustration::Overlay(variant) => request_overlay(variant),
            Illustration::Multiscale { base, levels } => multiscale(base, levels),
        }
    }
}

impl fmt::Display for Illustration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Illustration::ChunkTiling { image, chunk } => {
                write!(f, "image {image} tiled by chunks of {chunk}")
            }
            Illustration::Overlay(OverlayVariant::Baseline) => {
                write!(f, "request inside a slab read")
            }
            Illustration::Overlay(OverlayVariant::Bad) => {
                write!(f, "column request reading the whole array")
            }
            Illustration::Overlay(OverlayVariant::ChunkAligned) => {
                write!(f, "request inside a chunk-aligned read")
            }
            Illustration::Multiscale { base, levels } => {
                write!(f, "{levels}-level pyramid from {base}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: FigureName,
    pub illustration: Illustration,
    /// File name relative to the output directory.
    pub file_name: &'static str,
}

impl CatalogEntry {
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name)
    }
}

/// Look up the parameters and file name of a figure.
pub fn entry(name: FigureName) -> CatalogEntry {
    let stack = Shape3::new(10, 10, 20);
    let (illustration, file_name) = match name {
        FigureName::TwoDStack => (
            Illustration::ChunkTiling {
                image: stack,
                chunk: Shape3::new(10, 10, 1),
            },
            "2d-stack.png",
        ),
        FigureName::TwoDStackAccess => (
            Illustration::Overlay(OverlayVariant::Baseline),
            "2d-stack-access.png",
        ),
        FigureName::TwoDStackAccessBad => (
            Illustration::Overlay(OverlayVariant::Bad),
            "2d-stack-access-bad.png",
        ),
        FigureName::StackSmallChunks => (
            Illustration::ChunkTiling {
                image: stack,
                chunk: Shape3::new(2, 2, 3),
            },
            "stack-small-chunks.png",
        ),
        FigureName::StackBigChunks => (
            Illustration::ChunkTiling {
                image: stack,
                chunk: Shape3::new(5, 5, 10),
            },
            "stack-big-chunks.png",
        ),
        FigureName::ChunkAccess => (
            Illustration::Overlay(OverlayVariant::ChunkAligned),
            "chunk-access.png",
        ),
        FigureName::Multiscale => (
            Illustration::Multiscale {
                base: MULTISCALE_BASE,
                levels: MULTISCALE_LEVELS,
            },
            "multiscale.png",
        ),
    };
    CatalogEntry {
        name,
        illustration,
        file_name,
    }
}

/// Every entry, in the order the figures appear in the text.
pub fn catalog() -> Vec<CatalogEntry> {
    FigureName::ALL.into_iter().map(entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_files_are_unique() {
        let entries = catalog();
        assert_eq!(entries.len(), 7);
        let names: HashSet<_> = entries.iter().map(|e| e.name).collect();
        let files: HashSet<_> = entries.iter().map(|e| e.file_name).collect();
        assert_eq!(names.len(), 7);
        assert_eq!(files.len(), 7);
        for e in &entries {
            assert!(e.file_name.ends_with(".png"));
            assert!(e.file_name.starts_with(e.name.as_str()));
        }
    }

    #[test]
    fn names_parse_back() {
        for name in FigureName::ALL {
            assert_eq!(FigureName::from_str(name.as_str(), false), Ok(name));
        }
    }

    #[test]
    fn output_path_joins_directory() {
        let path = entry(FigureName::Multiscale).output_path(Path::new(DEFAULT_OUTPUT_DIR));
        assert_eq!(path, Path::new("img/multiscale.png"));
    }

    #[test]
    fn entries_build_their_figures() {
        let small = entry(FigureName::StackSmallChunks).illustration.build();
        assert_eq!(small.layer_count(), 175);
        let big = entry(FigureName::StackBigChunks).illustration.build();
        assert_eq!(big.layer_count(), 8);
        let multi = entry(FigureName::Multiscale).illustration.build();
        assert_eq!(multi.axes.len(), 3);
    }
}
