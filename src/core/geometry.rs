use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

// Regular icosahedron, faces wound counter-clockwise seen from outside.
const PHI: f32 = 1.618_034;
const ICO_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];
const ICO_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Number of vertices `icosphere` emits for a given detail level.
#[inline]
pub fn icosphere_vertex_count(detail: u32) -> usize {
    let cols = detail as usize + 1;
    ICO_FACES.len() * cols * cols * 3
}

/// Non-indexed geodesic sphere: every icosahedron face is split into
/// `(detail + 1)^2` triangles whose corners are projected onto the sphere.
/// Normals point outward; winding is counter-clockwise from outside.
pub fn icosphere(radius: f32, detail: u32) -> Vec<MeshVertex> {
    let cols = detail as usize + 1;
    let mut out = Vec::with_capacity(icosphere_vertex_count(detail));
    for face in ICO_FACES.iter() {
        let a = Vec3::from_array(ICO_VERTICES[face[0]]);
        let b = Vec3::from_array(ICO_VERTICES[face[1]]);
        let c = Vec3::from_array(ICO_VERTICES[face[2]]);

        // rows[i][j]: i steps from edge ab toward c, j steps from a-side to b-side
        let mut rows: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
        for i in 0..=cols {
            let t = i as f32 / cols as f32;
            let aj = a.lerp(c, t);
            let bj = b.lerp(c, t);
            let n = cols - i;
            let row = if n == 0 {
                vec![aj]
            } else {
                (0..=n).map(|j| aj.lerp(bj, j as f32 / n as f32)).collect()
            };
            rows.push(row);
        }

        for i in 0..cols {
            for j in 0..(2 * (cols - i) - 1) {
                let k = j / 2;
                let tri = if j % 2 == 0 {
                    [rows[i][k + 1], rows[i + 1][k], rows[i][k]]
                } else {
                    [rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]
                };
                for p in tri {
                    let n = p.normalize();
                    out.push(MeshVertex {
                        position: (n * radius).to_array(),
                        normal: n.to_array(),
                    });
                }
            }
        }
    }
    out
}
