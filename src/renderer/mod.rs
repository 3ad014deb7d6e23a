//! 渲染器模块
//!
//! 本模块提供了统一的渲染接口，封装了具体的图形后端实现。
//! 上层代码通过 `Renderer` 与后端交互，而不需要关心具体后端。
//!
//! # 架构设计
//!
//! - `Renderer`：统一的渲染器接口，持有内置着色器、默认资源和调试线条缓冲区
//! - `Backend`：内部枚举，封装不同的后端实现
//! - `backend`：后端 trait、句柄与管线状态定义
//! - `headless`：记录命令的无头后端
//! - `debug_lines`：帧作用域的调试线条累积器
//! - `renderable`：可渲染对象定义
//!
//! # 帧绘制顺序
//!
//! 1. 清屏、更新光照常量
//! 2. 调试视图开启时绘制参考网格
//! 3. 绘制所有 renderable（线框风格时每个绘制两次）
//! 4. 天空盒（开启时；不写深度、不剔除、视图矩阵去掉平移）
//! 5. 调试视图开启时为每盏灯追加坐标轴标记线条
//! 6. 上传并绘制调试线条，然后清空缓冲区
//! 7. present

use tracing::info;

use crate::core::config::{Config, FrameStyle, GraphicsBackend};
use crate::core::error::Result;
use crate::core::math::{Matrix4, Vector3};
use crate::core::scene::{SpinConfig, Transform};
use crate::geometry::mesh::MeshData;
use crate::geometry::vertex::ColorVertex;
use crate::scene::Scene;

pub mod backend;
pub mod debug_lines;
pub mod headless;
pub mod renderable;

pub use backend::{
    BlendMode, DepthMode, FrameStats, LightsBlock, LineBufferHandle, MeshHandle, RasterMode,
    RenderBackend, SamplerHandle, ShaderHandle, ShaderStage, TextureHandle, TransformsBlock,
};
pub use debug_lines::DebugLineBuffer;
pub use headless::HeadlessBackend;
pub use renderable::Renderable;

/// 图形后端枚举
///
/// 封装具体的后端实现。通过枚举模式实现零成本抽象，
/// 避免动态分发的性能开销。
enum Backend {
    Headless(HeadlessBackend),
}

impl Backend {
    fn inner(&mut self) -> &mut dyn RenderBackend {
        match self {
            Backend::Headless(b) => b,
        }
    }
}

/// 统一的渲染器
///
/// 持有后端、内置着色器、默认纹理/采样器和调试线条缓冲区。
pub struct Renderer {
    backend: Backend,

    /// 帧作用域的调试线条累积器
    lines: DebugLineBuffer,
    line_buffer: LineBufferHandle,

    // 内置着色器
    lit_vs: ShaderHandle,
    lit_ps: ShaderHandle,
    /// 线框叠加层使用的纯色像素着色器
    solid_ps: ShaderHandle,
    debug_vs: ShaderHandle,
    debug_ps: ShaderHandle,
    skybox_vs: ShaderHandle,
    skybox_ps: ShaderHandle,

    /// 1x1 白色纹理，非纹理化绘制时的回退绑定
    white_texture: TextureHandle,
    default_sampler: SamplerHandle,

    clear_color: [f32; 4],
    aspect: f32,
}

impl Renderer {
    /// 根据配置创建渲染器并初始化内置资源
    pub fn new(config: &Config) -> Result<Self> {
        let mut backend = match config.graphics.backend {
            GraphicsBackend::Headless => {
                info!("Initializing headless backend");
                Backend::Headless(HeadlessBackend::new())
            }
        };

        let b = backend.inner();
        let lit_vs = b.create_shader("lit_vs", ShaderStage::Vertex)?;
        let lit_ps = b.create_shader("lit_ps", ShaderStage::Pixel)?;
        let solid_ps = b.create_shader("solid_ps", ShaderStage::Pixel)?;
        let debug_vs = b.create_shader("debug_line_vs", ShaderStage::Vertex)?;
        let debug_ps = b.create_shader("debug_line_ps", ShaderStage::Pixel)?;
        let skybox_vs = b.create_shader("skybox_vs", ShaderStage::Vertex)?;
        let skybox_ps = b.create_shader("skybox_ps", ShaderStage::Pixel)?;

        let white_texture = b.create_texture("builtin:white_1x1")?;
        let default_sampler = b.create_sampler()?;
        let line_buffer = b.create_line_buffer(config.graphics.line_capacity)?;

        Ok(Self {
            backend,
            lines: DebugLineBuffer::new(config.graphics.line_capacity),
            line_buffer,
            lit_vs,
            lit_ps,
            solid_ps,
            debug_vs,
            debug_ps,
            skybox_vs,
            skybox_ps,
            white_texture,
            default_sampler,
            clear_color: config.graphics.clear_color,
            aspect: config.aspect_ratio(),
        })
    }

    /// 上传索引三角形网格
    pub fn create_mesh(&mut self, data: &MeshData) -> Result<MeshHandle> {
        self.backend.inner().create_mesh(data)
    }

    /// 上传静态线条网格
    pub fn create_line_mesh(&mut self, vertices: &[ColorVertex]) -> Result<MeshHandle> {
        self.backend.inner().create_line_mesh(vertices)
    }

    /// 根据名称创建纹理
    pub fn create_texture(&mut self, name: &str) -> Result<TextureHandle> {
        self.backend.inner().create_texture(name)
    }

    /// 内置的 1x1 白色纹理
    pub fn white_texture(&self) -> TextureHandle {
        self.white_texture
    }

    /// 天空盒着色器对
    pub fn skybox_shaders(&self) -> (ShaderHandle, ShaderHandle) {
        (self.skybox_vs, self.skybox_ps)
    }

    /// 调试线条缓冲区的可变访问
    ///
    /// 一帧内任意多处代码可以向缓冲区追加线段，
    /// `render_frame` 末尾统一绘制并清空。
    pub fn debug_lines_mut(&mut self) -> &mut DebugLineBuffer {
        &mut self.lines
    }

    /// 创建使用光照着色器的可渲染对象
    ///
    /// `texture` 为 `None` 时绑定白色纹理。
    pub fn create_renderable(
        &mut self,
        name: impl Into<String>,
        mesh: MeshHandle,
        texture: Option<TextureHandle>,
        transform: &Transform,
        spin: Option<SpinConfig>,
    ) -> Renderable {
        Renderable {
            name: name.into(),
            mesh,
            texture: texture.unwrap_or(self.white_texture),
            sampler: self.default_sampler,
            vertex_shader: self.lit_vs,
            pixel_shader: self.lit_ps,
            position: Vector3::from(transform.position),
            rotation: rotation_from(transform),
            scale: Matrix4::new_nonuniform_scaling(&Vector3::from(transform.scale)),
            spin,
        }
    }

    /// 渲染一帧
    ///
    /// `style` 在整帧内不可变；输入处理只在帧之间翻转标志。
    pub fn render_frame(&mut self, scene: &Scene, style: FrameStyle) -> Result<FrameStats> {
        let view = scene.camera.view_matrix();
        let proj = scene.camera.projection_matrix(self.aspect);
        let lights_block = scene.lights_block();

        self.backend.inner().begin_frame(self.clear_color);
        self.backend.inner().update_lights(&lights_block);

        if style.debug_view {
            if let Some(grid) = scene.grid_mesh {
                self.draw_grid(grid, &view, &proj)?;
            }
        }

        for renderable in scene.iter() {
            self.draw_renderable(renderable, style, &view, &proj)?;

            if style.debug_view {
                self.lines.add_transform(&renderable.world())?;
            }
        }

        if style.skybox {
            if let Some(skybox) = &scene.skybox {
                self.draw_skybox(skybox.mesh, skybox.texture, &view, &proj)?;
            }
        }

        // 灯光标记：调试视图下沿光照方向 5 个单位处画 0.2 缩放的坐标轴
        if style.debug_view {
            for light in &scene.lights {
                let marker = Matrix4::new_translation(&(light.direction * 5.0))
                    * Matrix4::new_scaling(0.2);
                self.lines.add_transform(&marker)?;
            }
        }

        self.flush_debug_lines(&view, &proj)?;

        self.backend.inner().present()
    }

    /// 绘制单个 renderable
    ///
    /// 线框风格开启时执行两次绘制：第一次按当前风格实心绘制，
    /// 第二次切换到线框光栅状态和纯色像素着色器覆盖绘制。
    fn draw_renderable(
        &mut self,
        renderable: &Renderable,
        style: FrameStyle,
        view: &Matrix4,
        proj: &Matrix4,
    ) -> Result<()> {
        let b = self.backend.inner();

        b.set_raster_state(if style.cull_none {
            RasterMode::SolidNoCull
        } else {
            RasterMode::Solid
        });
        b.set_blend_state(if style.transparency {
            BlendMode::AlphaBlend
        } else {
            BlendMode::Opaque
        });
        b.set_depth_state(if style.depth_write {
            DepthMode::ReadWrite
        } else {
            DepthMode::ReadOnly
        });

        b.bind_mesh(renderable.mesh)?;
        b.bind_vertex_shader(renderable.vertex_shader)?;
        b.bind_pixel_shader(renderable.pixel_shader)?;

        let texture = if style.textured {
            renderable.texture
        } else {
            self.white_texture
        };
        b.bind_texture(texture)?;
        b.bind_sampler(renderable.sampler)?;

        let world = renderable.world();
        b.update_transforms(&TransformsBlock::new(&world, view, proj));
        b.draw_indexed()?;

        if style.wireframe {
            b.set_raster_state(RasterMode::Wireframe);
            b.bind_pixel_shader(self.solid_ps)?;
            b.draw_indexed()?;
        }

        Ok(())
    }

    /// 绘制参考网格（静态线条网格，世界矩阵为单位阵）
    fn draw_grid(&mut self, grid: MeshHandle, view: &Matrix4, proj: &Matrix4) -> Result<()> {
        let b = self.backend.inner();

        b.set_raster_state(RasterMode::Solid);
        b.set_blend_state(BlendMode::Opaque);
        b.set_depth_state(DepthMode::ReadWrite);

        b.bind_mesh(grid)?;
        b.bind_vertex_shader(self.debug_vs)?;
        b.bind_pixel_shader(self.debug_ps)?;
        b.update_transforms(&TransformsBlock::new(&Matrix4::identity(), view, proj));
        b.draw()
    }

    /// 绘制天空盒
    ///
    /// 视图矩阵的平移被固定为 (0, -0.5, 0)，使天空盒始终跟随相机
    /// 并略微下沉；不写深度、不剔除背面（从立方体内部观察）。
    fn draw_skybox(
        &mut self,
        mesh: MeshHandle,
        texture: TextureHandle,
        view: &Matrix4,
        proj: &Matrix4,
    ) -> Result<()> {
        let sky_view = skybox_view(view);

        let b = self.backend.inner();
        b.set_raster_state(RasterMode::SolidNoCull);
        b.set_blend_state(BlendMode::Opaque);
        b.set_depth_state(DepthMode::ReadOnly);

        b.bind_mesh(mesh)?;
        b.bind_vertex_shader(self.skybox_vs)?;
        b.bind_pixel_shader(self.skybox_ps)?;
        b.bind_texture(texture)?;
        b.bind_sampler(self.default_sampler)?;
        b.update_transforms(&TransformsBlock::new(&Matrix4::identity(), &sky_view, proj));
        b.draw_indexed()
    }

    /// 上传并绘制累积的调试线条，然后清空缓冲区
    ///
    /// 线条作为叠加层绘制：深度测试关闭、线框光栅状态。
    fn flush_debug_lines(&mut self, view: &Matrix4, proj: &Matrix4) -> Result<()> {
        if self.lines.is_empty() {
            return Ok(());
        }

        let b = self.backend.inner();
        b.upload_lines(self.line_buffer, self.lines.vertices())?;

        b.set_depth_state(DepthMode::Disabled);
        b.set_raster_state(RasterMode::Wireframe);
        b.set_blend_state(BlendMode::Opaque);

        b.bind_vertex_shader(self.debug_vs)?;
        b.bind_pixel_shader(self.debug_ps)?;
        b.update_transforms(&TransformsBlock::new(&Matrix4::identity(), view, proj));
        b.draw_lines(self.line_buffer, self.lines.len() as u32)?;

        self.lines.clear();
        Ok(())
    }

    /// 访问无头后端记录的命令（仅 Headless 后端）
    #[cfg(test)]
    pub(crate) fn headless(&self) -> &HeadlessBackend {
        match &self.backend {
            Backend::Headless(b) => b,
        }
    }
}

fn rotation_from(transform: &Transform) -> Matrix4 {
    use crate::core::math::{deg_to_rad, rotation_x, rotation_y, rotation_z};
    rotation_z(deg_to_rad(transform.rotation[2]))
        * rotation_y(deg_to_rad(transform.rotation[1]))
        * rotation_x(deg_to_rad(transform.rotation[0]))
}

/// 天空盒视图矩阵：平移固定为 (0, -0.5, 0)
///
/// 旋转部分保持不变，天空盒跟随相机朝向但不跟随相机位置。
fn skybox_view(view: &Matrix4) -> Matrix4 {
    let mut sky_view = *view;
    sky_view[(0, 3)] = 0.0;
    sky_view[(1, 3)] = -0.5;
    sky_view[(2, 3)] = 0.0;
    sky_view
}
