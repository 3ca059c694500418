/// Bedrock entity geometry model and JSON writer
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;
use tracing::warn;

use crate::error::Result;
use crate::math::{Vec2i, Vec3, Vec3i};

/// Geometry format version written to every entity file
pub const FORMAT_VERSION: &str = "1.8.0";

/// An axis-aligned box attached to a bone
#[derive(Debug, Clone, PartialEq)]
pub struct BedrockEntityCube {
    origin: Vec3,
    size: Vec3i,
    uv: Vec2i,
}

impl BedrockEntityCube {
    pub fn new(origin: Vec3, size: Vec3i, uv: Vec2i) -> Self {
        Self { origin, size, uv }
    }

    /// Minimum corner of the box
    pub fn origin(&self) -> &Vec3 {
        &self.origin
    }

    pub fn size(&self) -> &Vec3i {
        &self.size
    }

    pub fn uv(&self) -> &Vec2i {
        &self.uv
    }
}

/// A named transform node owning a list of cubes.
///
/// The parent is referenced by name only.
#[derive(Debug, Clone, PartialEq)]
pub struct BedrockEntityBone {
    name: String,
    parent: Option<String>,
    pivot: Option<Vec3>,
    rotation: Option<Vec3>,
    cubes: Vec<BedrockEntityCube>,
}

impl BedrockEntityBone {
    pub fn new(
        name: impl Into<String>,
        parent: Option<String>,
        pivot: Option<Vec3>,
        rotation: Option<Vec3>,
    ) -> Self {
        Self {
            name: name.into(),
            parent,
            pivot,
            rotation,
            cubes: Vec::with_capacity(2),
        }
    }

    pub fn add_cube(&mut self, cube: BedrockEntityCube) {
        self.cubes.push(cube);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn pivot(&self) -> Option<&Vec3> {
        self.pivot.as_ref()
    }

    pub fn has_pivot(&self) -> bool {
        self.pivot.is_some()
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> Option<&Vec3> {
        self.rotation.as_ref()
    }

    pub fn has_rotation(&self) -> bool {
        self.rotation.is_some()
    }

    pub fn cubes(&self) -> &[BedrockEntityCube] {
        &self.cubes
    }
}

/// One geometry entry: bounds, texture size and a flat list of bones
#[derive(Debug, Clone, PartialEq)]
pub struct BedrockEntityGeometry {
    visible_bounds: Vec2i,
    visible_bounds_offset: Vec3,
    texture_size: Vec2i,
    bones: Vec<BedrockEntityBone>,
}

impl BedrockEntityGeometry {
    pub fn new(visible_bounds: Vec2i, visible_bounds_offset: Vec3, texture_size: Vec2i) -> Self {
        Self {
            visible_bounds,
            visible_bounds_offset,
            texture_size,
            bones: Vec::with_capacity(16),
        }
    }

    /// Visible bounds as `(width, height)`
    pub fn visible_bounds(&self) -> &Vec2i {
        &self.visible_bounds
    }

    pub fn visible_bounds_offset(&self) -> &Vec3 {
        &self.visible_bounds_offset
    }

    /// Texture size as `(width, height)`
    pub fn texture_size(&self) -> &Vec2i {
        &self.texture_size
    }

    pub fn add_bone(&mut self, bone: BedrockEntityBone) {
        self.bones.push(bone);
    }

    pub fn add_bones(&mut self, bones: impl IntoIterator<Item = BedrockEntityBone>) {
        self.bones.extend(bones);
    }

    /// Bones in emission order
    pub fn bones(&self) -> &[BedrockEntityBone] {
        &self.bones
    }

    pub fn bone(&self, name: &str) -> Option<&BedrockEntityBone> {
        self.bones.iter().find(|bone| bone.name == name)
    }

    pub fn has_bone(&self, name: &str) -> bool {
        self.bone(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Number of cubes across all bones
    pub fn cube_count(&self) -> usize {
        self.bones.iter().map(|bone| bone.cubes.len()).sum()
    }
}

/// Named geometries, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BedrockEntityModel {
    geometries: Vec<(String, BedrockEntityGeometry)>,
}

impl BedrockEntityModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a geometry, replacing any existing one with the same name in place
    pub fn put_geometry(&mut self, name: impl Into<String>, geometry: BedrockEntityGeometry) {
        let name = name.into();
        match self.geometries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = geometry,
            None => self.geometries.push((name, geometry)),
        }
    }

    pub fn geometry(&self, name: &str) -> Option<&BedrockEntityGeometry> {
        self.geometries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, geometry)| geometry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BedrockEntityGeometry)> {
        self.geometries
            .iter()
            .map(|(name, geometry)| (name.as_str(), geometry))
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

fn vec3(v: &Vec3) -> [f64; 3] {
    [v.x, v.y, v.z]
}

impl Serialize for BedrockEntityCube {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("origin", &vec3(&self.origin))?;
        map.serialize_entry("size", &[self.size.x, self.size.y, self.size.z])?;
        map.serialize_entry("uv", &[self.uv.x, self.uv.y])?;
        map.end()
    }
}

impl Serialize for BedrockEntityBone {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        if let Some(parent) = &self.parent {
            map.serialize_entry("parent", parent)?;
        }
        if let Some(pivot) = &self.pivot {
            map.serialize_entry("pivot", &vec3(pivot))?;
        }
        if let Some(rotation) = &self.rotation {
            if self.pivot.is_none() {
                warn!("Bone \"{}\" has a rotation but no pivot", self.name);
            }
            map.serialize_entry("rotation", &vec3(rotation))?;
        }
        map.serialize_entry("cubes", &self.cubes)?;
        map.end()
    }
}

impl Serialize for BedrockEntityGeometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("visible_bounds_width", &self.visible_bounds.x)?;
        map.serialize_entry("visible_bounds_height", &self.visible_bounds.y)?;
        map.serialize_entry("visible_bounds_offset", &vec3(&self.visible_bounds_offset))?;
        map.serialize_entry("texturewidth", &self.texture_size.x)?;
        map.serialize_entry("textureheight", &self.texture_size.y)?;
        map.serialize_entry("bones", &self.bones)?;
        map.end()
    }
}

impl Serialize for BedrockEntityModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.geometries.len() + 1))?;
        map.serialize_entry("format_version", FORMAT_VERSION)?;
        for (name, geometry) in &self.geometries {
            map.serialize_entry(name, geometry)?;
        }
        map.end()
    }
}

/// Write an entity model as JSON, pretty-printed unless `compact` is set
pub fn write_model<W: Write>(model: &BedrockEntityModel, mut writer: W, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut writer, model)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, model)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render an entity model as pretty-printed JSON text
pub fn to_json_string(model: &BedrockEntityModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}
