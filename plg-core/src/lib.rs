/// PLG Core Library - Geometry ingestion for a software 3D renderer
///
/// This library parses PLG polygon-list files into an in-memory object model,
/// precomputes per-polygon normal lengths, and provides the vector and matrix
/// primitives used by the transform and lighting stages.

pub mod config;
pub mod error;
pub mod geometry;
pub mod lexer;
pub mod math;
pub mod plg;
pub mod reader;

// Re-export commonly used types
pub use config::{ConfigError, ImporterConfig};
pub use error::{PlgError, Section};
pub use geometry::{
    ColorDescriptor, Object, ObjectLimits, ObjectState, Polygon, RadiusMode, ShadingMode,
    MAX_POINTS_PER_POLY, MAX_POLYS_PER_OBJECT, MAX_VERTICES_PER_OBJECT,
};
pub use math::{Matrix1x4, Matrix4x4, Point3D, Vector3D};
pub use plg::Importer;
pub use reader::LineReader;
