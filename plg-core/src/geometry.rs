/// Polygonal object model produced by the PLG importer
use serde::{Deserialize, Serialize};

use crate::math::{cross_product, magnitude, make_vector, Point3D, Vector3D};

/// Default most vertices a single object may hold
pub const MAX_VERTICES_PER_OBJECT: usize = 24;
/// Default most polygons a single object may hold
pub const MAX_POLYS_PER_OBJECT: usize = 18;
/// Default most points a single polygon may reference
pub const MAX_POINTS_PER_POLY: usize = 4;
/// Fewest points needed to derive a face normal
pub const MIN_POINTS_PER_POLY: usize = 3;

/// Capacity limits applied while an object is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectLimits {
    pub max_vertices: usize,
    pub max_polys: usize,
    pub max_points_per_poly: usize,
}

impl Default for ObjectLimits {
    fn default() -> Self {
        Self {
            max_vertices: MAX_VERTICES_PER_OBJECT,
            max_polys: MAX_POLYS_PER_OBJECT,
            max_points_per_poly: MAX_POINTS_PER_POLY,
        }
    }
}

/// Lighting model requested by a polygon's color descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    Constant,
    Flat,
    Metallic,
    Glass,
    Other(u32),
}

impl ShadingMode {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => ShadingMode::Constant,
            1 => ShadingMode::Flat,
            2 => ShadingMode::Metallic,
            3 => ShadingMode::Glass,
            other => ShadingMode::Other(other),
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            ShadingMode::Constant => 0,
            ShadingMode::Flat => 1,
            ShadingMode::Metallic => 2,
            ShadingMode::Glass => 3,
            ShadingMode::Other(raw) => raw,
        }
    }
}

/// The two fields packed into a PLG color token.
///
/// Bits 0-7 hold the palette color, bits 12 and up the shading mode.
/// Bits 8-11 are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDescriptor {
    pub palette_color: u8,
    pub shading_mode: ShadingMode,
}

impl ColorDescriptor {
    pub fn decode(raw: u32) -> Self {
        Self {
            palette_color: (raw & 0xFF) as u8,
            shading_mode: ShadingMode::from_raw(raw >> 12),
        }
    }

    pub fn encode(self) -> u32 {
        (self.shading_mode.raw() << 12) | u32::from(self.palette_color)
    }
}

/// A face referencing vertices of its owning [`Object`] by index
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertex_list: Vec<usize>,
    pub color: u8,
    /// Final shade after lighting, starts out as the base color
    pub shade: u8,
    pub shading: ShadingMode,
    pub two_sided: bool,
    pub visible: bool,
    pub active: bool,
    pub clipped: bool,
    /// Magnitude of the unnormalized face normal
    pub normal_length: f32,
}

impl Polygon {
    /// A visible, active, one-sided polygon with no normal computed yet
    pub fn new(vertex_list: Vec<usize>, descriptor: ColorDescriptor) -> Self {
        Self {
            vertex_list,
            color: descriptor.palette_color,
            shade: descriptor.palette_color,
            shading: descriptor.shading_mode,
            two_sided: false,
            visible: true,
            active: true,
            clipped: false,
            normal_length: 0.0,
        }
    }

    pub fn num_points(&self) -> usize {
        self.vertex_list.len()
    }

    /// Unnormalized face normal from the first three listed vertices.
    ///
    /// With `u = v1 - v0` and `w = v2 - v0` this is `w x u`; the operand order
    /// fixes the winding convention used for culling. Returns `None` when the
    /// polygon has fewer than three points or an index is out of range.
    pub fn face_normal(&self, vertices: &[Point3D]) -> Option<Vector3D> {
        let v0 = vertices.get(*self.vertex_list.first()?)?;
        let v1 = vertices.get(*self.vertex_list.get(1)?)?;
        let v2 = vertices.get(*self.vertex_list.get(2)?)?;

        let u = make_vector(v0, v1);
        let w = make_vector(v0, v2);
        Some(cross_product(&w, &u))
    }
}

/// How an object's radius is aggregated from its local vertices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusMode {
    /// Farthest vertex from the local origin
    #[default]
    Max,
    /// Mean distance of all vertices from the local origin
    Average,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectState {
    #[default]
    Empty,
    Loaded,
}

/// An imported polygonal object.
///
/// `vertices_world` and `vertices_camera` are scratch space for the transform
/// stages and always match `vertices_local` in length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub id: u32,
    pub name: String,
    pub state: ObjectState,
    pub radius: f32,
    pub vertices_local: Vec<Point3D>,
    pub vertices_world: Vec<Point3D>,
    pub vertices_camera: Vec<Point3D>,
    pub world_pos: Point3D,
    pub polys: Vec<Polygon>,
}

impl Object {
    pub fn num_vertices(&self) -> usize {
        self.vertices_local.len()
    }

    pub fn num_polys(&self) -> usize {
        self.polys.len()
    }

    /// Append a local vertex, growing the world and camera arrays alongside it
    pub fn push_vertex(&mut self, vertex: Point3D) {
        self.vertices_local.push(vertex);
        self.vertices_world.push(Point3D::ORIGIN);
        self.vertices_camera.push(Point3D::ORIGIN);
    }

    /// Compute, store and return the object's radius
    pub fn compute_radius(&mut self, mode: RadiusMode) -> f32 {
        let distances = self.vertices_local.iter().map(magnitude);
        self.radius = match mode {
            RadiusMode::Max => distances.fold(0.0, f32::max),
            RadiusMode::Average => {
                if self.vertices_local.is_empty() {
                    0.0
                } else {
                    distances.sum::<f32>() / self.vertices_local.len() as f32
                }
            }
        };
        self.radius
    }
}
