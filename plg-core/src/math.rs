/// Vector and matrix primitives shared by every transform, lighting and projection stage
use nalgebra::{Matrix4, Point3, RowVector4, Vector3};

/// A standard 4x4 homogeneous matrix, indexed `m[(row, column)]`
pub type Matrix4x4 = Matrix4<f32>;

/// A 1x4 row vector, multiplied on the right by a [`Matrix4x4`]
pub type Matrix1x4 = RowVector4<f32>;

/// A 3D point along with a normalization factor if needed.
///
/// `w` is carried along untouched by most operations; callers that need a
/// homogeneous coordinate set it explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// A direction or displacement. Shares its representation with [`Point3D`].
pub type Vector3D = Point3D;

impl Point3D {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Multiply x, y and z by `factor`, leaving `w` alone
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
            w: self.w,
        }
    }
}

impl From<Point3D> for Vector3<f32> {
    fn from(p: Point3D) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

impl From<Vector3<f32>> for Point3D {
    fn from(v: Vector3<f32>) -> Self {
        Point3D::new(v.x, v.y, v.z)
    }
}

impl From<Point3D> for Point3<f32> {
    fn from(p: Point3D) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

impl From<Point3<f32>> for Point3D {
    fn from(p: Point3<f32>) -> Self {
        Point3D::new(p.x, p.y, p.z)
    }
}

impl From<Point3D> for Matrix1x4 {
    fn from(p: Point3D) -> Self {
        RowVector4::new(p.x, p.y, p.z, p.w)
    }
}

impl From<Matrix1x4> for Point3D {
    fn from(row: Matrix1x4) -> Self {
        Point3D {
            x: row[0],
            y: row[1],
            z: row[2],
            w: row[3],
        }
    }
}

/// Build the vector running from `init` to `term`
pub fn make_vector(init: &Point3D, term: &Point3D) -> Vector3D {
    Point3D::new(term.x - init.x, term.y - init.y, term.z - init.z)
}

/// Euclidean length of a vector, ignoring `w`
pub fn magnitude(v: &Vector3D) -> f32 {
    Vector3::from(*v).norm()
}

pub fn dot_product(u: &Vector3D, v: &Vector3D) -> f32 {
    Vector3::from(*u).dot(&Vector3::from(*v))
}

/// Cross product `(uy*vz - uz*vy, -(ux*vz - uz*vx), ux*vy - uy*vx)`.
///
/// Swapping the operands negates the result, so callers must agree on a
/// winding direction to get outward-facing normals.
pub fn cross_product(u: &Vector3D, v: &Vector3D) -> Vector3D {
    Point3D::new(
        u.y * v.z - u.z * v.y,
        -(u.x * v.z - u.z * v.x),
        u.x * v.y - u.y * v.x,
    )
}

pub fn identity_4x4() -> Matrix4x4 {
    Matrix4::identity()
}

pub fn zero_4x4() -> Matrix4x4 {
    Matrix4::zeros()
}

/// Element-wise duplicate with independent storage
pub fn copy_4x4(source: &Matrix4x4) -> Matrix4x4 {
    *source
}

/// `result[i][j] = sum_k a[i][k] * b[k][j]`
pub fn multiply_4x4_by_4x4(a: &Matrix4x4, b: &Matrix4x4) -> Matrix4x4 {
    a * b
}

/// `result[j] = sum_k row[k] * m[k][j]`
pub fn multiply_row_by_4x4(row: &Matrix1x4, m: &Matrix4x4) -> Matrix1x4 {
    row * m
}

/// Render a matrix one row per line, for diagnostics
pub fn format_4x4(m: &Matrix4x4) -> String {
    m.row_iter()
        .map(|row| format_1x4(&row.into_owned()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_1x4(row: &Matrix1x4) -> String {
    row.iter()
        .map(|value| format!("{:.6}", value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_matrix(seed: f32) -> Matrix4x4 {
        Matrix4::from_fn(|i, j| ((i * 4 + j) as f32 * 0.37 + seed).sin() * 3.0)
    }

    #[test]
    fn test_make_vector() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(4.0, 0.0, -1.0);
        assert_eq!(make_vector(&a, &b), Point3D::new(3.0, -2.0, -4.0));
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(&Point3D::ORIGIN), 0.0);
        assert_relative_eq!(magnitude(&Point3D::new(3.0, 4.0, 12.0)), 13.0);

        // w is not part of the length
        let mut v = Point3D::new(0.0, 0.0, 2.0);
        v.w = 100.0;
        assert_relative_eq!(magnitude(&v), 2.0);
    }

    #[test]
    fn test_dot_product() {
        let u = Point3D::new(1.0, 2.0, 3.0);
        let v = Point3D::new(-2.0, 0.5, 4.0);
        assert_relative_eq!(dot_product(&u, &v), 11.0);
    }

    #[test]
    fn test_cross_product_axes() {
        let x = Point3D::new(1.0, 0.0, 0.0);
        let y = Point3D::new(0.0, 1.0, 0.0);
        let z = Point3D::new(0.0, 0.0, 1.0);
        assert_eq!(cross_product(&x, &y), z);
        assert_eq!(cross_product(&y, &z), x);
        assert_eq!(cross_product(&z, &x), y);
    }

    #[test]
    fn test_cross_product_anti_commutative() {
        let vectors = [
            Point3D::new(1.0, 2.0, 3.0),
            Point3D::new(-4.5, 0.25, 7.0),
            Point3D::new(0.0, -1.0, 2.0),
            Point3D::new(9.0, 9.0, -3.0),
        ];
        for u in &vectors {
            for v in &vectors {
                let uv = cross_product(u, v);
                let vu = cross_product(v, u);
                assert_relative_eq!(uv.x, -vu.x);
                assert_relative_eq!(uv.y, -vu.y);
                assert_relative_eq!(uv.z, -vu.z);
            }
        }
    }

    #[test]
    fn test_cross_product_is_perpendicular() {
        let u = Point3D::new(1.0, 2.0, 3.0);
        let v = Point3D::new(-4.5, 0.25, 7.0);
        let n = cross_product(&u, &v);
        assert_relative_eq!(dot_product(&n, &u), 0.0, epsilon = 1e-3);
        assert_relative_eq!(dot_product(&n, &v), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_identity_and_zero() {
        let identity = identity_4x4();
        let zero = zero_4x4();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(identity[(i, j)], if i == j { 1.0 } else { 0.0 });
                assert_eq!(zero[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn test_copy_is_independent() {
        let source = sample_matrix(0.5);
        let mut copy = copy_4x4(&source);
        assert_eq!(copy, source);
        copy[(1, 2)] = 42.0;
        assert_ne!(copy, source);
    }

    #[test]
    fn test_identity_multiply() {
        let m = sample_matrix(1.0);
        assert_relative_eq!(multiply_4x4_by_4x4(&identity_4x4(), &m), m);
        assert_relative_eq!(multiply_4x4_by_4x4(&m, &identity_4x4()), m);
    }

    #[test]
    fn test_multiply_matches_definition() {
        let a = sample_matrix(0.1);
        let b = sample_matrix(2.3);
        let result = multiply_4x4_by_4x4(&a, &b);
        for i in 0..4 {
            for j in 0..4 {
                let sum: f32 = (0..4).map(|k| a[(i, k)] * b[(k, j)]).sum();
                assert_relative_eq!(result[(i, j)], sum, epsilon = 1e-4, max_relative = 1e-5);
            }
        }
    }

    #[test]
    fn test_multiply_associative() {
        let a = sample_matrix(0.1);
        let b = sample_matrix(2.3);
        let c = sample_matrix(-1.7);
        let left = multiply_4x4_by_4x4(&multiply_4x4_by_4x4(&a, &b), &c);
        let right = multiply_4x4_by_4x4(&a, &multiply_4x4_by_4x4(&b, &c));
        assert_relative_eq!(left, right, epsilon = 1e-3, max_relative = 1e-4);
    }

    #[test]
    fn test_row_multiply() {
        // Translation in the bottom row, row-vector convention
        let mut translate = identity_4x4();
        translate[(3, 0)] = 10.0;
        translate[(3, 1)] = -5.0;
        translate[(3, 2)] = 2.0;

        let mut point = Point3D::new(1.0, 2.0, 3.0);
        point.w = 1.0;
        let moved = Point3D::from(multiply_row_by_4x4(&point.into(), &translate));
        assert_eq!(moved.x, 11.0);
        assert_eq!(moved.y, -3.0);
        assert_eq!(moved.z, 5.0);
        assert_eq!(moved.w, 1.0);
    }

    #[test]
    fn test_format_4x4() {
        let text = format_4x4(&identity_4x4());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "1.000000 0.000000 0.000000 0.000000");
        assert_eq!(lines[3], "0.000000 0.000000 0.000000 1.000000");
        assert!(!text.ends_with('\n'));
    }
}
