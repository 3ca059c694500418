/// cs2entity Core Library - CraftStudio to Bedrock entity geometry conversion
///
/// This library provides the stateless core: rotation matrices and Euler angle
/// conversions, the block tree flattening, and the JSON model readers/writers.

pub mod bedrock;
pub mod convert;
pub mod craftstudio;
pub mod error;
pub mod math;
pub mod rotation;

// Re-export commonly used types
pub use bedrock::{BedrockEntityBone, BedrockEntityCube, BedrockEntityGeometry, BedrockEntityModel};
pub use convert::convert;
pub use craftstudio::{CraftStudioBlock, CraftStudioModel};
pub use error::{Error, Result};
pub use math::{RotationMatrix, Vec2i, Vec3, Vec3i, VecExt};
