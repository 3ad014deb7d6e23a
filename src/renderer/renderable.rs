//! 可渲染对象
//!
//! 把一次网格绘制所需的全部 GPU 资源句柄和空间状态打包在一起。
//! 渲染风格（线框、混合等）不属于单个对象，由帧级风格统一决定。

use crate::core::math::{Matrix4, Vector3};
use crate::core::scene::SpinConfig;

use super::backend::{MeshHandle, SamplerHandle, ShaderHandle, TextureHandle};

/// 可渲染对象
///
/// 持有资源句柄而非资源本身，因此可以廉价复制句柄、
/// 多个对象共享同一个网格或纹理。
#[derive(Debug, Clone)]
pub struct Renderable {
    /// 调试用名称
    pub name: String,

    pub mesh: MeshHandle,
    pub texture: TextureHandle,
    pub sampler: SamplerHandle,
    pub vertex_shader: ShaderHandle,
    pub pixel_shader: ShaderHandle,

    /// 世界空间位置
    pub position: Vector3,

    /// 旋转矩阵（含初始朝向；自旋动画每帧覆盖）
    pub rotation: Matrix4,

    /// 基础缩放矩阵
    pub scale: Matrix4,

    /// 自旋动画配置（可选）
    pub spin: Option<SpinConfig>,
}

impl Renderable {
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Matrix4) {
        self.rotation = rotation;
    }

    /// 世界矩阵：平移 * 旋转 * 缩放
    pub fn world(&self) -> Matrix4 {
        Matrix4::new_translation(&self.position) * self.rotation * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::rotation_y;

    fn dummy() -> Renderable {
        Renderable {
            name: "test".to_string(),
            mesh: MeshHandle(0),
            texture: TextureHandle(0),
            sampler: SamplerHandle(0),
            vertex_shader: ShaderHandle(0),
            pixel_shader: ShaderHandle(1),
            position: Vector3::zeros(),
            rotation: Matrix4::identity(),
            scale: Matrix4::identity(),
            spin: None,
        }
    }

    #[test]
    fn test_world_matrix_carries_translation() {
        let mut r = dummy();
        r.set_position(Vector3::new(1.0, 2.0, 3.0));

        let world = r.world();
        assert_eq!(world[(0, 3)], 1.0);
        assert_eq!(world[(1, 3)], 2.0);
        assert_eq!(world[(2, 3)], 3.0);
    }

    #[test]
    fn test_world_matrix_rotates_before_translation() {
        let mut r = dummy();
        r.set_position(Vector3::new(5.0, 0.0, 0.0));
        r.set_rotation(rotation_y(std::f32::consts::FRAC_PI_2));

        // 旋转不影响平移分量
        let world = r.world();
        assert!((world[(0, 3)] - 5.0).abs() < 1e-6);
    }
}
