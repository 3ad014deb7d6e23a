//! 统一的数学库模块
//!
//! 提供图形编程常用的数学类型和函数。
//! 基于 `nalgebra` 但提供了更友好的 API。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2/3/4, Matrix4, Quaternion, Color
//! - **矩阵辅助函数**：look_at, perspective, 旋转构造

// 允许未使用的代码，因为这是一个工具库，不是所有函数都会立即使用
#![allow(dead_code)]

pub use nalgebra::{
    Matrix3 as Mat3, Matrix4 as Mat4, Point3, UnitQuaternion,
    Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4,
};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix3 = Mat3<f32>;
pub type Matrix4 = Mat4<f32>;
pub type Quaternion = UnitQuaternion<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建新的颜色
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建 RGB 颜色（alpha = 1.0）
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// 转换为浮点数组
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// 转换为 Vector4
    pub fn to_vec4(&self) -> Vector4 {
        Vector4::new(self.r, self.g, self.b, self.a)
    }

    // 预定义颜色
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    pub const YELLOW: Color = Color { r: 1.0, g: 1.0, b: 0.0, a: 1.0 };
}

/// 绕 Y 轴旋转矩阵
pub fn rotation_y(angle: f32) -> Matrix4 {
    Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
}

/// 绕 Z 轴旋转矩阵
pub fn rotation_z(angle: f32) -> Matrix4 {
    Matrix4::from_axis_angle(&Vector3::z_axis(), angle)
}

/// 绕 X 轴旋转矩阵
pub fn rotation_x(angle: f32) -> Matrix4 {
    Matrix4::from_axis_angle(&Vector3::x_axis(), angle)
}

/// 观察矩阵（右手坐标系）
pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Matrix4 {
    Matrix4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
}

/// 透视投影矩阵
///
/// `fov_y` 为弧度制的垂直视野角。
pub fn perspective(aspect: f32, fov_y: f32, near: f32, far: f32) -> Matrix4 {
    Matrix4::new_perspective(aspect, fov_y, near, far)
}

/// 角度转弧度
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_array() {
        let c = Color::rgb(0.2, 0.3, 0.6);
        assert_eq!(c.to_array(), [0.2, 0.3, 0.6, 1.0]);
    }

    #[test]
    fn test_rotation_y_preserves_y_axis() {
        let m = rotation_y(1.3);
        let v = m.transform_vector(&Vector3::new(0.0, 1.0, 0.0));
        assert!((v - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
    }
}
