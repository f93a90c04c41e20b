use glam::DVec3;

/// The 20 faces of the icosahedron, counter-clockwise seen from outside.
const FACES: [[u32; 3]; 20] = [
    [1, 3, 8],
    [3, 1, 9],
    [2, 0, 10],
    [0, 2, 11],
    [5, 7, 0],
    [7, 5, 1],
    [6, 4, 2],
    [4, 6, 3],
    [9, 11, 4],
    [11, 9, 5],
    [10, 8, 6],
    [8, 10, 7],
    [7, 1, 8],
    [1, 5, 9],
    [0, 7, 10],
    [5, 0, 11],
    [3, 6, 8],
    [4, 3, 9],
    [6, 2, 10],
    [2, 4, 11],
];

/// The canonical 12-vertex/20-face unit sphere seed mesh.
///
/// Vertices are the golden-ratio rectangle corners projected onto the unit
/// sphere; faces index into them with outward-facing winding. All further
/// subdivision starts from these 20 faces.
#[derive(Clone, Debug)]
pub struct BaseIcosahedron {
    vertices: [DVec3; 12],
}

impl Default for BaseIcosahedron {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseIcosahedron {
    pub fn new() -> Self {
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;

        let vertices = [
            DVec3::new(phi, 0.0, -1.0),
            DVec3::new(-phi, 0.0, -1.0),
            DVec3::new(phi, 0.0, 1.0),
            DVec3::new(-phi, 0.0, 1.0),
            DVec3::new(0.0, -1.0, phi),
            DVec3::new(0.0, -1.0, -phi),
            DVec3::new(0.0, 1.0, phi),
            DVec3::new(0.0, 1.0, -phi),
            DVec3::new(-1.0, phi, 0.0),
            DVec3::new(-1.0, -phi, 0.0),
            DVec3::new(1.0, phi, 0.0),
            DVec3::new(1.0, -phi, 0.0),
        ]
        .map(|v| v.normalize());

        Self { vertices }
    }

    /// Number of faces in the seed mesh.
    pub const FACE_COUNT: usize = 20;

    pub fn vertices(&self) -> &[DVec3; 12] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]; 20] {
        &FACES
    }

    /// The three unit-sphere corners of face `face`, in winding order.
    pub fn face_corners(&self, face: usize) -> [DVec3; 3] {
        let [i, j, k] = FACES[face];
        [
            self.vertices[i as usize],
            self.vertices[j as usize],
            self.vertices[k as usize],
        ]
    }

    /// Edge length of a base face on the unit sphere (all edges are equal).
    pub fn edge_length(&self) -> f64 {
        let [a, b, _] = self.face_corners(0);
        (b - a).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tellus_math::{triangle_centroid, triangle_normal};

    #[test]
    fn test_vertices_on_unit_sphere() {
        let base = BaseIcosahedron::new();
        for v in base.vertices() {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_vertices_distinct() {
        let base = BaseIcosahedron::new();
        let vs = base.vertices();
        for i in 0..vs.len() {
            for j in (i + 1)..vs.len() {
                assert!((vs[i] - vs[j]).length() > 0.5, "vertices {i} and {j} coincide");
            }
        }
    }

    #[test]
    fn test_faces_wind_outward() {
        let base = BaseIcosahedron::new();
        for face in 0..BaseIcosahedron::FACE_COUNT {
            let [a, b, c] = base.face_corners(face);
            let normal = triangle_normal(a, b, c);
            let centroid = triangle_centroid(a, b, c);
            assert!(
                normal.dot(centroid) > 0.0,
                "face {face} winds inward"
            );
        }
    }

    #[test]
    fn test_every_edge_shared_by_two_faces() {
        let base = BaseIcosahedron::new();
        let mut edge_counts = std::collections::HashMap::new();
        for face in base.faces() {
            for e in 0..3 {
                let i = face[e];
                let j = face[(e + 1) % 3];
                let key = (i.min(j), i.max(j));
                *edge_counts.entry(key).or_insert(0u32) += 1;
            }
        }
        assert_eq!(edge_counts.len(), 30);
        for ((i, j), count) in edge_counts {
            assert_eq!(count, 2, "edge ({i}, {j}) shared by {count} faces");
        }
    }

    #[test]
    fn test_edges_equilateral() {
        let base = BaseIcosahedron::new();
        let reference = base.edge_length();
        for face in 0..BaseIcosahedron::FACE_COUNT {
            let [a, b, c] = base.face_corners(face);
            for (p, q) in [(a, b), (b, c), (c, a)] {
                assert!(((p - q).length() - reference).abs() < 1e-12);
            }
        }
    }
}
