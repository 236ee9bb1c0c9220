#![forbid(unsafe_code)]

//! Word tree records, dotted-id stratification and radial geometry (headless).
//!
//! The input is a flat JSON array of records whose ids encode their position in the hierarchy
//! (`"ROOT.CHILD.LEAF"`). [`load`] decodes and stratifies them in one step; layout and rendering
//! live in `wordtree-render`.

pub mod config;
pub mod error;
pub mod geom;
pub mod record;
pub mod tree;

pub use config::{LabelMode, LayoutConfig, SiteConfig, ZoomTransform};
pub use error::{Error, Result, StructureError};
pub use record::{Record, decode_records, max_depth};
pub use tree::{NodeIndex, Tree, TreeNode, stratify};

/// Decodes `json` and stratifies the records.
///
/// Returns `Ok(None)` when the payload is an empty array.
pub fn load(json: &str) -> Result<Option<Tree>> {
    let records = decode_records(json)?;
    Ok(stratify(&records)?)
}
