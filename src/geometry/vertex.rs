/// 几何体顶点定义模块
///
/// 定义网格与调试线条使用的顶点结构。
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐。

use bytemuck::{Pod, Zeroable};

/// 网格顶点结构（位置 + 法线 + UV）
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - **总计**: 32 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    ///
    /// 用于光照计算的表面法线，应该是归一化的单位向量。
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)
    pub texcoord: [f32; 2],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }
}

/// 彩色顶点结构（位置 + RGBA 颜色）
///
/// 调试线条和线条网格（grid）使用的顶点格式。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - color: 16 bytes (4 * f32)
/// - **总计**: 28 bytes
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 顶点颜色 (r, g, b, a)
    pub color: [f32; 4],
}

impl ColorVertex {
    /// 创建一个新的彩色顶点
    #[inline]
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        // 3*4 + 3*4 + 2*4 = 32 bytes
        assert_eq!(size_of::<Vertex>(), 32);
    }

    #[test]
    fn test_color_vertex_size() {
        // 3*4 + 4*4 = 28 bytes
        assert_eq!(size_of::<ColorVertex>(), 28);
    }

    #[test]
    fn test_vertex_alignment() {
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
        assert_eq!(std::mem::align_of::<ColorVertex>(), 4);
    }

    #[test]
    fn test_vertex_creation() {
        let vertex = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5]);

        assert_eq!(vertex.position, [1.0, 2.0, 3.0]);
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.texcoord, [0.5, 0.5]);
    }
}
