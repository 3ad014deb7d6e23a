//! 调试线条累积缓冲区
//!
//! 帧作用域的线条累积器：一帧内任意多处代码向缓冲区追加线段，
//! 帧末统一上传并绘制一次，然后清空。容量固定，追加超限是硬错误，
//! 绝不静默截断。
//!
//! # 使用模式
//!
//! ```text
//! 每帧: add_line / add_transform ... -> 上传并绘制 -> clear
//! ```

use tracing::trace;

use crate::core::error::{GraphicsError, Result};
use crate::core::math::{Matrix4, Vector3};
use crate::geometry::vertex::ColorVertex;

/// 默认顶点容量（4096 条线段）
pub const DEFAULT_LINE_VERTEX_CAPACITY: usize = 8192;

/// 调试线条缓冲区
///
/// CPU 侧的线段顶点累积器。顶点按追加顺序存储，
/// 每条线段占两个顶点（起点、终点）。
pub struct DebugLineBuffer {
    vertices: Vec<ColorVertex>,
    capacity: usize,
}

impl DebugLineBuffer {
    /// 创建指定顶点容量的缓冲区
    ///
    /// 容量一经创建不可更改，与 GPU 侧动态缓冲区的大小保持一致。
    pub fn new(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// 追加一条线段（起点、终点各自指定颜色）
    ///
    /// # 错误
    ///
    /// 剩余容量不足两个顶点时返回 `LineCapacityExceeded`，
    /// 缓冲区内容保持不变。
    pub fn add_line(
        &mut self,
        start: Vector3,
        end: Vector3,
        start_color: [f32; 4],
        end_color: [f32; 4],
    ) -> Result<()> {
        let requested = self.vertices.len() + 2;
        if requested > self.capacity {
            return Err(GraphicsError::LineCapacityExceeded {
                requested,
                capacity: self.capacity,
            }
            .into());
        }

        self.vertices
            .push(ColorVertex::new([start.x, start.y, start.z], start_color));
        self.vertices
            .push(ColorVertex::new([end.x, end.y, end.z], end_color));
        Ok(())
    }

    /// 追加一条单色线段
    pub fn add_line_uniform(&mut self, start: Vector3, end: Vector3, color: [f32; 4]) -> Result<()> {
        self.add_line(start, end, color, color)
    }

    /// 追加一个变换矩阵的坐标轴标记
    ///
    /// 从矩阵的平移分量出发，沿三个基向量各画一条线：
    /// X 轴红色、Y 轴绿色、Z 轴蓝色。轴的长度等于基向量的长度，
    /// 因此缩放后的矩阵会画出等比例的标记。
    pub fn add_transform(&mut self, transform: &Matrix4) -> Result<()> {
        let origin = Vector3::new(transform[(0, 3)], transform[(1, 3)], transform[(2, 3)]);

        for axis in 0..3 {
            let basis = Vector3::new(
                transform[(0, axis)],
                transform[(1, axis)],
                transform[(2, axis)],
            );
            let mut color = [0.0, 0.0, 0.0, 1.0];
            color[axis] = 1.0;

            self.add_line_uniform(origin, origin + basis, color)?;
        }
        Ok(())
    }

    /// 清空缓冲区（容量不变）
    ///
    /// 每帧绘制后调用一次，下一帧从索引 0 重新开始累积。
    pub fn clear(&mut self) {
        trace!(vertices = self.vertices.len(), "debug line buffer cleared");
        self.vertices.clear();
    }

    /// 当前累积的顶点切片（按追加顺序）
    pub fn vertices(&self) -> &[ColorVertex] {
        &self.vertices
    }

    /// 当前顶点数
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// 当前线段数
    #[inline]
    pub fn line_count(&self) -> usize {
        self.vertices.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 顶点容量上限
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DebugLineBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_VERTEX_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ViewerError;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

    #[test]
    fn test_each_line_adds_two_vertices() {
        let mut buffer = DebugLineBuffer::new(64);

        for i in 0..10 {
            buffer
                .add_line_uniform(
                    Vector3::new(i as f32, 0.0, 0.0),
                    Vector3::new(i as f32, 1.0, 0.0),
                    RED,
                )
                .unwrap();
        }

        assert_eq!(buffer.len(), 20);
        assert_eq!(buffer.line_count(), 10);
    }

    #[test]
    fn test_vertices_keep_insertion_order() {
        let mut buffer = DebugLineBuffer::new(8);
        buffer
            .add_line(Vector3::zeros(), Vector3::x(), RED, GREEN)
            .unwrap();
        buffer
            .add_line_uniform(Vector3::y(), Vector3::z(), GREEN)
            .unwrap();

        let verts = buffer.vertices();
        assert_eq!(verts[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(verts[0].color, RED);
        assert_eq!(verts[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(verts[1].color, GREEN);
        assert_eq!(verts[2].position, [0.0, 1.0, 0.0]);
        assert_eq!(verts[3].position, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_add_line_beyond_capacity_fails() {
        let mut buffer = DebugLineBuffer::new(4);
        buffer
            .add_line_uniform(Vector3::zeros(), Vector3::x(), RED)
            .unwrap();
        buffer
            .add_line_uniform(Vector3::zeros(), Vector3::y(), RED)
            .unwrap();

        let result = buffer.add_line_uniform(Vector3::zeros(), Vector3::z(), RED);
        assert!(matches!(
            result,
            Err(ViewerError::Graphics(GraphicsError::LineCapacityExceeded {
                requested: 6,
                capacity: 4,
            }))
        ));

        // 失败的追加不改变缓冲区内容
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_clear_resets_to_empty_and_refills_from_start() {
        let mut buffer = DebugLineBuffer::new(16);
        buffer
            .add_line_uniform(Vector3::x(), Vector3::y(), RED)
            .unwrap();
        assert!(!buffer.is_empty());

        buffer.clear();
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 16);

        buffer
            .add_line_uniform(Vector3::zeros(), Vector3::z(), GREEN)
            .unwrap();
        assert_eq!(buffer.vertices()[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(buffer.vertices()[0].color, GREEN);
    }

    #[test]
    fn test_add_transform_identity_draws_unit_axes() {
        let mut buffer = DebugLineBuffer::new(8);
        buffer.add_transform(&Matrix4::identity()).unwrap();

        assert_eq!(buffer.line_count(), 3);
        let verts = buffer.vertices();

        // X 轴：原点到 (1,0,0)，红色
        assert_eq!(verts[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(verts[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(verts[0].color, [1.0, 0.0, 0.0, 1.0]);

        // Y 轴：原点到 (0,1,0)，绿色
        assert_eq!(verts[3].position, [0.0, 1.0, 0.0]);
        assert_eq!(verts[2].color, [0.0, 1.0, 0.0, 1.0]);

        // Z 轴：原点到 (0,0,1)，蓝色
        assert_eq!(verts[5].position, [0.0, 0.0, 1.0]);
        assert_eq!(verts[4].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_add_transform_follows_translation_and_scale() {
        let translation = Matrix4::new_translation(&Vector3::new(2.0, 3.0, 4.0));
        let scale = Matrix4::new_scaling(0.5);
        let transform = translation * scale;

        let mut buffer = DebugLineBuffer::new(8);
        buffer.add_transform(&transform).unwrap();

        let verts = buffer.vertices();
        // 所有轴从平移位置出发
        assert_eq!(verts[0].position, [2.0, 3.0, 4.0]);
        // X 轴终点偏移缩放后的基向量
        assert_eq!(verts[1].position, [2.5, 3.0, 4.0]);
    }

    #[test]
    fn test_add_transform_fails_atomically_near_capacity() {
        // 容量只够一条线，坐标轴标记需要三条
        let mut buffer = DebugLineBuffer::new(2);
        let result = buffer.add_transform(&Matrix4::identity());
        assert!(result.is_err());
        // 第一条轴已写入，调用方收到错误后应视本帧数据为不完整
        assert!(buffer.len() <= 2);
    }

    #[test]
    fn test_default_capacity() {
        let buffer = DebugLineBuffer::default();
        assert_eq!(buffer.capacity(), 8192);
    }
}
