//! 内置几何体生成模块
//!
//! 提供手工生成的测试几何体：立方体、地面、交叉面片和线条网格。
//! 三角形网格使用 PNT 顶点（位置/法线/UV），线条使用彩色顶点。

use super::mesh::MeshData;
use super::vertex::{ColorVertex, Vertex};

/// 生成单位立方体（边长 1，中心在原点）
///
/// 每个面4个独立顶点（硬边法线），共24个顶点、36个索引。
pub fn cube() -> MeshData {
    // 每个面：法线 + 四个角的位置（逆时针）
    const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        ([0.0, 0.0, 1.0], [
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
        ]),
        // -Z
        ([0.0, 0.0, -1.0], [
            [0.5, -0.5, -0.5],
            [-0.5, -0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [0.5, 0.5, -0.5],
        ]),
        // +X
        ([1.0, 0.0, 0.0], [
            [0.5, -0.5, 0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [0.5, 0.5, 0.5],
        ]),
        // -X
        ([-1.0, 0.0, 0.0], [
            [-0.5, -0.5, -0.5],
            [-0.5, -0.5, 0.5],
            [-0.5, 0.5, 0.5],
            [-0.5, 0.5, -0.5],
        ]),
        // +Y
        ([0.0, 1.0, 0.0], [
            [-0.5, 0.5, 0.5],
            [0.5, 0.5, 0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
        ]),
        // -Y
        ([0.0, -1.0, 0.0], [
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, -0.5, 0.5],
            [-0.5, -0.5, 0.5],
        ]),
    ];

    const UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut mesh = MeshData::with_name("cube");
    for (normal, corners) in FACES {
        let base = mesh.vertices.len() as u32;
        for (corner, uv) in corners.iter().zip(UVS.iter()) {
            mesh.vertices.push(Vertex::new(*corner, normal, *uv));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// 生成地面平面（y = 0，边长 `2 * half_extent` 的正方形）
pub fn ground(half_extent: f32) -> MeshData {
    let h = half_extent;
    let normal = [0.0, 1.0, 0.0];

    let mut mesh = MeshData::with_name("ground");
    mesh.vertices.push(Vertex::new([-h, 0.0, -h], normal, [0.0, 0.0]));
    mesh.vertices.push(Vertex::new([-h, 0.0, h], normal, [0.0, 1.0]));
    mesh.vertices.push(Vertex::new([h, 0.0, h], normal, [1.0, 1.0]));
    mesh.vertices.push(Vertex::new([h, 0.0, -h], normal, [1.0, 0.0]));
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    mesh
}

/// 生成交叉面片（两个互相垂直的竖直四边形）
///
/// 用于植被等广告牌式几何体，配合不剔除背面的光栅状态使用。
/// `half_width` 为面片半宽，高度为 `2 * half_width`。
pub fn cross_hatch(half_width: f32) -> MeshData {
    let h = half_width;
    let height = 2.0 * h;

    let mut mesh = MeshData::with_name("cross_hatch");

    // 面片 A：位于 z = 0 平面
    let normal_a = [0.0, 0.0, 1.0];
    mesh.vertices.push(Vertex::new([-h, 0.0, 0.0], normal_a, [0.0, 1.0]));
    mesh.vertices.push(Vertex::new([h, 0.0, 0.0], normal_a, [1.0, 1.0]));
    mesh.vertices.push(Vertex::new([h, height, 0.0], normal_a, [1.0, 0.0]));
    mesh.vertices.push(Vertex::new([-h, height, 0.0], normal_a, [0.0, 0.0]));

    // 面片 B：位于 x = 0 平面
    let normal_b = [1.0, 0.0, 0.0];
    mesh.vertices.push(Vertex::new([0.0, 0.0, -h], normal_b, [0.0, 1.0]));
    mesh.vertices.push(Vertex::new([0.0, 0.0, h], normal_b, [1.0, 1.0]));
    mesh.vertices.push(Vertex::new([0.0, height, h], normal_b, [1.0, 0.0]));
    mesh.vertices.push(Vertex::new([0.0, height, -h], normal_b, [0.0, 0.0]));

    mesh.indices
        .extend_from_slice(&[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    mesh
}

/// 生成参考网格线条（y = 0 平面上的等距线条）
///
/// 返回线条列表顶点：每两个顶点为一条线段。
/// `divisions` 为半边上的格子数，总共生成 `2 * (2*divisions + 1)` 条线。
pub fn grid_lines(half_extent: f32, divisions: u32, color: [f32; 4]) -> Vec<ColorVertex> {
    let h = half_extent;
    let step = h / divisions.max(1) as f32;
    let n = divisions as i32;

    let mut vertices = Vec::with_capacity(((2 * n + 1) as usize) * 4);
    for i in -n..=n {
        let offset = i as f32 * step;

        // 平行于 X 轴的线
        vertices.push(ColorVertex::new([-h, 0.0, offset], color));
        vertices.push(ColorVertex::new([h, 0.0, offset], color));

        // 平行于 Z 轴的线
        vertices.push(ColorVertex::new([offset, 0.0, -h], color));
        vertices.push(ColorVertex::new([offset, 0.0, h], color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let mesh = cube();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cube_normals_are_unit_length() {
        let mesh = cube();
        for v in &mesh.vertices {
            let n = v.normal;
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ground_is_flat() {
        let mesh = ground(50.0);
        assert!(mesh.validate().is_ok());
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_cross_hatch_counts() {
        let mesh = cross_hatch(0.5);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_grid_lines_come_in_pairs() {
        let lines = grid_lines(25.0, 25, [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(lines.len() % 2, 0);
        // 2 * (2*25 + 1) 条线，每条2个顶点
        assert_eq!(lines.len(), 2 * (2 * 25 + 1) * 2);
    }
}
