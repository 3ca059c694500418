/// CraftStudio block model and `.csjsmodel` JSON reader
use serde::Deserialize;
use std::io::Read;
use tracing::warn;

use crate::error::Result;
use crate::math::{Vec2i, Vec3, Vec3i};

/// A named, sized box in a CraftStudio model tree
#[derive(Debug, Clone, PartialEq)]
pub struct CraftStudioBlock {
    name: String,
    position: Vec3,
    offset_from_pivot: Vec3,
    size: Vec3i,
    rotation: Vec3,
    tex_offset: Vec2i,
    children: Vec<CraftStudioBlock>,
}

impl CraftStudioBlock {
    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        offset_from_pivot: Vec3,
        size: Vec3i,
        rotation: Vec3,
        tex_offset: Vec2i,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            offset_from_pivot,
            size,
            rotation,
            tex_offset,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: CraftStudioBlock) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: CraftStudioBlock) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pivot position, relative to the parent block
    pub fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Box center relative to the pivot
    pub fn offset_from_pivot(&self) -> &Vec3 {
        &self.offset_from_pivot
    }

    pub fn size(&self) -> &Vec3i {
        &self.size
    }

    /// Rotation in degrees, applied in YXZ order
    pub fn rotation(&self) -> &Vec3 {
        &self.rotation
    }

    pub fn tex_offset(&self) -> &Vec2i {
        &self.tex_offset
    }

    pub fn children(&self) -> &[CraftStudioBlock] {
        &self.children
    }

    /// Number of blocks in this subtree, including this one
    pub fn block_count(&self) -> usize {
        1 + self.children.iter().map(Self::block_count).sum::<usize>()
    }
}

/// A titled forest of CraftStudio blocks
#[derive(Debug, Clone, PartialEq)]
pub struct CraftStudioModel {
    title: String,
    blocks: Vec<CraftStudioBlock>,
}

impl CraftStudioModel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn add_block(&mut self, block: CraftStudioBlock) {
        self.blocks.push(block);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Root blocks, in file order
    pub fn blocks(&self) -> &[CraftStudioBlock] {
        &self.blocks
    }

    /// Number of root blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks across the whole tree
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(CraftStudioBlock::block_count).sum()
    }
}

#[derive(Deserialize)]
struct RawModel {
    title: String,
    tree: Vec<RawBlock>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    name: String,
    position: [f64; 3],
    offset_from_pivot: [f64; 3],
    size: [i32; 3],
    rotation: [f64; 3],
    tex_offset: [i32; 2],
    #[serde(default)]
    children: Vec<RawBlock>,
    vertex_coords: Option<serde_json::Value>,
}

impl From<RawBlock> for CraftStudioBlock {
    fn from(raw: RawBlock) -> Self {
        if raw.vertex_coords.is_some() {
            warn!("Cube \"{}\" has stretch which must be ignored", raw.name);
        }

        let mut block = CraftStudioBlock::new(
            raw.name,
            Vec3::from(raw.position),
            Vec3::from(raw.offset_from_pivot),
            Vec3i::from(raw.size),
            Vec3::from(raw.rotation),
            Vec2i::from(raw.tex_offset),
        );
        for child in raw.children {
            block.add_child(child.into());
        }
        block
    }
}

impl From<RawModel> for CraftStudioModel {
    fn from(raw: RawModel) -> Self {
        let mut model = CraftStudioModel::new(raw.title);
        for block in raw.tree {
            model.add_block(block.into());
        }
        model
    }
}

/// Parse a CraftStudio model from `.csjsmodel` JSON text
pub fn parse_model(input: &str) -> Result<CraftStudioModel> {
    let raw: RawModel = serde_json::from_str(input)?;
    Ok(raw.into())
}

/// Read a CraftStudio model from a `.csjsmodel` JSON stream
pub fn read_model<R: Read>(reader: R) -> Result<CraftStudioModel> {
    let raw: RawModel = serde_json::from_reader(reader)?;
    Ok(raw.into())
}
