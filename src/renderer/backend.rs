//! 统一的渲染后端接口
//!
//! 本模块定义了渲染后端必须实现的统一接口以及相关的资源句柄、
//! 管线状态枚举和常量缓冲区布局。
//!
//! # 设计理念
//!
//! - **抽象化**：隐藏具体图形 API 的实现细节
//! - **统一接口**：上层绘制逻辑只依赖此 trait
//! - **句柄化资源**：所有 GPU 资源通过不透明句柄引用，后端负责生命周期

use bytemuck::{Pod, Zeroable};

use crate::core::error::Result;
use crate::core::math::Matrix4;
use crate::geometry::mesh::MeshData;
use crate::geometry::vertex::ColorVertex;

/// 网格资源句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// 纹理资源句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// 采样器资源句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub u32);

/// 着色器资源句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// 动态线条缓冲区句柄
///
/// 与静态网格不同，线条缓冲区每帧由 CPU 重新填充。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineBufferHandle(pub u32);

/// 光栅化状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterMode {
    /// 实心填充，剔除背面
    Solid,

    /// 实心填充，不剔除（双面几何体和天空盒使用）
    SolidNoCull,

    /// 线框填充，不剔除
    Wireframe,
}

/// 混合状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// 不透明（关闭混合）
    Opaque,

    /// 标准 alpha 混合
    AlphaBlend,
}

/// 深度状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthMode {
    /// 深度测试 + 深度写入
    ReadWrite,

    /// 深度测试但不写入（天空盒、透明物体）
    ReadOnly,

    /// 完全关闭深度测试（调试线条叠加层）
    Disabled,
}

/// 图元拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// 三角形列表
    TriangleList,

    /// 线段列表（每两个顶点一条线）
    LineList,
}

/// 着色器阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

/// 逐物体变换常量块
///
/// 与着色器中的常量缓冲区布局一一对应。
/// 矩阵为列主序的 4x4 浮点数组。
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformsBlock {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformsBlock {
    pub fn new(world: &Matrix4, view: &Matrix4, projection: &Matrix4) -> Self {
        Self {
            world: (*world).into(),
            view: (*view).into(),
            projection: (*projection).into(),
        }
    }
}

/// 光照常量块
///
/// 两盏方向光（方向与颜色），以及一个输出调制颜色。
/// 方向和颜色都填充为 vec4 以满足常量缓冲区对齐要求。
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightsBlock {
    pub light_dir: [[f32; 4]; 2],
    pub light_color: [[f32; 4]; 2],
    pub output_color: [f32; 4],
}

impl Default for LightsBlock {
    fn default() -> Self {
        Self {
            light_dir: [[0.0; 4]; 2],
            light_color: [[0.0; 4]; 2],
            output_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// 单帧渲染统计
///
/// `present` 时由后端返回，用于日志输出和行为验证。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// 本帧的绘制调用总数（含索引与非索引绘制）
    pub draw_calls: u32,

    /// 本帧通过索引绘制提交的三角形数
    pub triangles: u32,

    /// 本帧提交的线条顶点数
    pub line_vertices: u32,
}

/// 统一的渲染后端接口
///
/// 所有具体后端都必须实现此 trait。上层的帧绘制逻辑
/// 只通过这些方法与 GPU 资源交互。
///
/// # 帧生命周期
///
/// 1. `begin_frame`：清屏并重置本帧状态
/// 2. 若干次状态设置、资源绑定和绘制调用
/// 3. `present`：结束本帧并返回统计数据
pub trait RenderBackend {
    /// 创建索引三角形网格
    fn create_mesh(&mut self, data: &MeshData) -> Result<MeshHandle>;

    /// 创建静态线条网格（非索引，线段列表拓扑）
    fn create_line_mesh(&mut self, vertices: &[ColorVertex]) -> Result<MeshHandle>;

    /// 创建动态线条缓冲区，`capacity` 为顶点容量上限
    fn create_line_buffer(&mut self, capacity: usize) -> Result<LineBufferHandle>;

    /// 根据资源名称创建纹理
    ///
    /// 名称不能为空；后端不保证文件内容在创建时就被读取。
    fn create_texture(&mut self, name: &str) -> Result<TextureHandle>;

    /// 创建默认采样器（线性过滤、重复寻址）
    fn create_sampler(&mut self) -> Result<SamplerHandle>;

    /// 根据入口名称创建着色器
    fn create_shader(&mut self, name: &str, stage: ShaderStage) -> Result<ShaderHandle>;

    /// 开始一帧：清空颜色与深度，重置统计
    fn begin_frame(&mut self, clear_color: [f32; 4]);

    fn set_raster_state(&mut self, mode: RasterMode);

    fn set_blend_state(&mut self, mode: BlendMode);

    fn set_depth_state(&mut self, mode: DepthMode);

    /// 绑定网格的顶点/索引缓冲区
    fn bind_mesh(&mut self, mesh: MeshHandle) -> Result<()>;

    fn bind_vertex_shader(&mut self, shader: ShaderHandle) -> Result<()>;

    fn bind_pixel_shader(&mut self, shader: ShaderHandle) -> Result<()>;

    fn bind_texture(&mut self, texture: TextureHandle) -> Result<()>;

    fn bind_sampler(&mut self, sampler: SamplerHandle) -> Result<()>;

    /// 更新逐物体变换常量
    fn update_transforms(&mut self, block: &TransformsBlock);

    /// 更新光照常量
    fn update_lights(&mut self, block: &LightsBlock);

    /// 将 CPU 侧线条顶点上传到动态缓冲区
    ///
    /// 顶点数超过缓冲区容量时返回错误，绝不静默截断。
    fn upload_lines(&mut self, buffer: LineBufferHandle, vertices: &[ColorVertex]) -> Result<()>;

    /// 非索引绘制当前绑定网格的全部顶点
    fn draw(&mut self) -> Result<()>;

    /// 索引绘制当前绑定网格的全部索引
    fn draw_indexed(&mut self) -> Result<()>;

    /// 绘制动态线条缓冲区中的前 `vertex_count` 个顶点
    fn draw_lines(&mut self, buffer: LineBufferHandle, vertex_count: u32) -> Result<()>;

    /// 结束一帧并返回统计数据
    fn present(&mut self) -> Result<FrameStats>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_transforms_block_layout() {
        // 3 个 4x4 矩阵 = 3 * 64 bytes
        assert_eq!(size_of::<TransformsBlock>(), 192);
    }

    #[test]
    fn test_lights_block_layout() {
        // 2 * vec4 + 2 * vec4 + vec4 = 80 bytes
        assert_eq!(size_of::<LightsBlock>(), 80);
    }

    #[test]
    fn test_transforms_block_from_identity() {
        let identity = Matrix4::identity();
        let block = TransformsBlock::new(&identity, &identity, &identity);
        assert_eq!(block.world[0][0], 1.0);
        assert_eq!(block.world[3][3], 1.0);
        assert_eq!(block.world[0][1], 0.0);
    }
}
