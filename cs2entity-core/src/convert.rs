/// Flattening of a CraftStudio block tree into Bedrock entity bones
use tracing::{debug, trace, warn};

use crate::bedrock::{BedrockEntityBone, BedrockEntityCube, BedrockEntityGeometry, BedrockEntityModel};
use crate::craftstudio::{CraftStudioBlock, CraftStudioModel};
use crate::math::{Vec2i, Vec3};
use crate::rotation::{craftstudio_to_entity_rotation, is_zero_rotation};

const VISIBLE_BOUNDS: [i32; 2] = [1, 2];
const VISIBLE_BOUNDS_OFFSET: [f64; 3] = [0.0, 0.0, 0.0];
const TEXTURE_SIZE: [i32; 2] = [128, 128];

/// Convert a CraftStudio model into an entity model holding a single geometry
/// named after the model's title.
pub fn convert(model: &CraftStudioModel) -> BedrockEntityModel {
    let mut geometry = BedrockEntityGeometry::new(
        Vec2i::from(VISIBLE_BOUNDS),
        Vec3::from(VISIBLE_BOUNDS_OFFSET),
        Vec2i::from(TEXTURE_SIZE),
    );

    for block in model.blocks() {
        block_to_bone(&mut geometry, block, None);
    }
    debug!(
        "Converted \"{}\": {} blocks into {} bones",
        model.title(),
        model.block_count(),
        geometry.len()
    );

    let mut result = BedrockEntityModel::new();
    result.put_geometry(model.title(), geometry);
    result
}

/// Convert `block` into a bone and append it to `geometry`, followed by the
/// bones of its rotated descendants.
///
/// Children without rotation are folded into this bone as extra cubes. Their
/// own children are not visited.
pub fn block_to_bone(
    geometry: &mut BedrockEntityGeometry,
    block: &CraftStudioBlock,
    parent: Option<&CraftStudioBlock>,
) {
    let mut pivot = *block.position();
    if let Some(parent) = parent {
        pivot += parent.position();
    }
    let pivot = Vec3::new(pivot.x, pivot.y, -pivot.z);

    let rotation = craftstudio_to_entity_rotation(block.rotation());

    let mut bone = BedrockEntityBone::new(
        block.name(),
        parent.map(|parent| parent.name().to_string()),
        Some(pivot),
        Some(rotation),
    );
    bone.add_cube(block_to_cube(block, parent));

    let (merged, promoted): (Vec<_>, Vec<_>) = block
        .children()
        .iter()
        .partition(|child| is_zero_rotation(child.rotation()));

    for child in merged {
        trace!("Merging \"{}\" into bone \"{}\"", child.name(), block.name());
        if !child.children().is_empty() {
            warn!(
                "Block \"{}\" is merged into \"{}\"; its {} child block(s) are dropped",
                child.name(),
                block.name(),
                child.children().len()
            );
        }
        bone.add_cube(block_to_cube(child, Some(block)));
    }
    geometry.add_bone(bone);

    for child in promoted {
        trace!("Promoting \"{}\" to its own bone", child.name());
        block_to_bone(geometry, child, Some(block));
    }
}

/// Build the cube for `block`, placed relative to its bone-owning `parent`.
///
/// CraftStudio stores box centers, Bedrock stores the minimum corner with the
/// Z axis mirrored.
pub fn block_to_cube(block: &CraftStudioBlock, parent: Option<&CraftStudioBlock>) -> BedrockEntityCube {
    let size = block.size();
    let mut center = block.position() + block.offset_from_pivot();
    if let Some(parent) = parent {
        center += parent.position() + parent.offset_from_pivot();
    }

    let (sx, sy, sz) = (f64::from(size.x), f64::from(size.y), f64::from(size.z));
    let origin = Vec3::new(
        center.x - sx / 2.0,
        center.y - sy / 2.0,
        -(center.z - sz / 2.0) - sz,
    );

    BedrockEntityCube::new(origin, *size, *block.tex_offset())
}
