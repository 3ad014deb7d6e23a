//! 无窗口渲染后端
//!
//! 记录式后端：不依赖任何图形设备，把所有状态设置和绘制调用
//! 记录为命令序列并维护统计数据。用于无显示环境下的运行和
//! 对绘制行为的验证。
//!
//! # 验证规则
//!
//! - 绑定无效句柄返回 `InvalidHandle`
//! - 未绑定网格/着色器就绘制返回 `CommandExecution`
//! - 线条上传超出缓冲区容量返回 `LineCapacityExceeded`

use tracing::debug;

use crate::core::error::{GraphicsError, Result};
use crate::geometry::mesh::MeshData;
use crate::geometry::vertex::ColorVertex;

use super::backend::{
    BlendMode, DepthMode, FrameStats, LightsBlock, LineBufferHandle, MeshHandle,
    PrimitiveTopology, RasterMode, RenderBackend, SamplerHandle, ShaderHandle, ShaderStage,
    TextureHandle, TransformsBlock,
};

/// 记录的渲染命令
///
/// 每一帧从 `BeginFrame` 开始、以 `Present` 结束。
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    BeginFrame { clear_color: [f32; 4] },
    SetRaster(RasterMode),
    SetBlend(BlendMode),
    SetDepth(DepthMode),
    BindMesh(MeshHandle),
    BindVertexShader(ShaderHandle),
    BindPixelShader(ShaderHandle),
    BindTexture(TextureHandle),
    BindSampler(SamplerHandle),
    UpdateTransforms,
    UpdateLights,
    UploadLines { buffer: LineBufferHandle, vertex_count: u32 },
    Draw { vertex_count: u32 },
    DrawIndexed { index_count: u32 },
    DrawLines { buffer: LineBufferHandle, vertex_count: u32 },
    Present,
}

/// 网格资源的记录条目
struct MeshEntry {
    vertex_count: u32,
    index_count: u32,
    topology: PrimitiveTopology,
}

/// 动态线条缓冲区的记录条目
struct LineBufferEntry {
    capacity: usize,
    uploaded: u32,
}

/// 无窗口后端
///
/// 资源以顺序分配的句柄管理，命令按提交顺序记录。
/// `commands()` 返回当前帧（含上一帧未清空时）的命令序列。
pub struct HeadlessBackend {
    meshes: Vec<MeshEntry>,
    line_buffers: Vec<LineBufferEntry>,
    texture_names: Vec<String>,
    sampler_count: u32,
    shader_names: Vec<(String, ShaderStage)>,

    bound_mesh: Option<MeshHandle>,
    bound_vertex_shader: Option<ShaderHandle>,
    bound_pixel_shader: Option<ShaderHandle>,

    commands: Vec<RenderCommand>,
    stats: FrameStats,
    frame_index: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            line_buffers: Vec::new(),
            texture_names: Vec::new(),
            sampler_count: 0,
            shader_names: Vec::new(),
            bound_mesh: None,
            bound_vertex_shader: None,
            bound_pixel_shader: None,
            commands: Vec::new(),
            stats: FrameStats::default(),
            frame_index: 0,
        }
    }

    /// 当前帧已记录的命令序列
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// 当前帧的统计数据
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    fn mesh(&self, handle: MeshHandle) -> Result<&MeshEntry> {
        self.meshes.get(handle.0 as usize).ok_or_else(|| {
            GraphicsError::InvalidHandle(format!("mesh handle {} does not exist", handle.0)).into()
        })
    }

    fn check_draw_bindings(&self) -> Result<MeshHandle> {
        let mesh = self.bound_mesh.ok_or_else(|| {
            GraphicsError::CommandExecution("draw without a bound mesh".to_string())
        })?;
        if self.bound_vertex_shader.is_none() || self.bound_pixel_shader.is_none() {
            return Err(GraphicsError::CommandExecution(
                "draw without bound shaders".to_string(),
            )
            .into());
        }
        Ok(mesh)
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_mesh(&mut self, data: &MeshData) -> Result<MeshHandle> {
        data.validate()
            .map_err(GraphicsError::ResourceCreation)?;

        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(MeshEntry {
            vertex_count: data.vertex_count() as u32,
            index_count: data.index_count() as u32,
            topology: PrimitiveTopology::TriangleList,
        });
        Ok(handle)
    }

    fn create_line_mesh(&mut self, vertices: &[ColorVertex]) -> Result<MeshHandle> {
        if vertices.is_empty() || vertices.len() % 2 != 0 {
            return Err(GraphicsError::ResourceCreation(format!(
                "line mesh requires a non-empty even vertex count, got {}",
                vertices.len()
            ))
            .into());
        }

        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(MeshEntry {
            vertex_count: vertices.len() as u32,
            index_count: 0,
            topology: PrimitiveTopology::LineList,
        });
        Ok(handle)
    }

    fn create_line_buffer(&mut self, capacity: usize) -> Result<LineBufferHandle> {
        if capacity == 0 {
            return Err(GraphicsError::ResourceCreation(
                "line buffer capacity must be positive".to_string(),
            )
            .into());
        }

        let handle = LineBufferHandle(self.line_buffers.len() as u32);
        self.line_buffers.push(LineBufferEntry {
            capacity,
            uploaded: 0,
        });
        Ok(handle)
    }

    fn create_texture(&mut self, name: &str) -> Result<TextureHandle> {
        if name.is_empty() {
            return Err(
                GraphicsError::ResourceCreation("texture name must not be empty".to_string())
                    .into(),
            );
        }

        let handle = TextureHandle(self.texture_names.len() as u32);
        self.texture_names.push(name.to_string());
        debug!("created texture '{}' -> handle {}", name, handle.0);
        Ok(handle)
    }

    fn create_sampler(&mut self) -> Result<SamplerHandle> {
        let handle = SamplerHandle(self.sampler_count);
        self.sampler_count += 1;
        Ok(handle)
    }

    fn create_shader(&mut self, name: &str, stage: ShaderStage) -> Result<ShaderHandle> {
        if name.is_empty() {
            return Err(
                GraphicsError::ResourceCreation("shader name must not be empty".to_string())
                    .into(),
            );
        }

        let handle = ShaderHandle(self.shader_names.len() as u32);
        self.shader_names.push((name.to_string(), stage));
        Ok(handle)
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.commands.clear();
        self.stats = FrameStats::default();
        self.bound_mesh = None;
        self.bound_vertex_shader = None;
        self.bound_pixel_shader = None;
        self.commands.push(RenderCommand::BeginFrame { clear_color });
    }

    fn set_raster_state(&mut self, mode: RasterMode) {
        self.commands.push(RenderCommand::SetRaster(mode));
    }

    fn set_blend_state(&mut self, mode: BlendMode) {
        self.commands.push(RenderCommand::SetBlend(mode));
    }

    fn set_depth_state(&mut self, mode: DepthMode) {
        self.commands.push(RenderCommand::SetDepth(mode));
    }

    fn bind_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        self.mesh(mesh)?;
        self.bound_mesh = Some(mesh);
        self.commands.push(RenderCommand::BindMesh(mesh));
        Ok(())
    }

    fn bind_vertex_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        match self.shader_names.get(shader.0 as usize) {
            Some((_, ShaderStage::Vertex)) => {
                self.bound_vertex_shader = Some(shader);
                self.commands.push(RenderCommand::BindVertexShader(shader));
                Ok(())
            }
            Some((name, _)) => Err(GraphicsError::InvalidHandle(format!(
                "shader '{}' is not a vertex shader",
                name
            ))
            .into()),
            None => Err(GraphicsError::InvalidHandle(format!(
                "shader handle {} does not exist",
                shader.0
            ))
            .into()),
        }
    }

    fn bind_pixel_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        match self.shader_names.get(shader.0 as usize) {
            Some((_, ShaderStage::Pixel)) => {
                self.bound_pixel_shader = Some(shader);
                self.commands.push(RenderCommand::BindPixelShader(shader));
                Ok(())
            }
            Some((name, _)) => Err(GraphicsError::InvalidHandle(format!(
                "shader '{}' is not a pixel shader",
                name
            ))
            .into()),
            None => Err(GraphicsError::InvalidHandle(format!(
                "shader handle {} does not exist",
                shader.0
            ))
            .into()),
        }
    }

    fn bind_texture(&mut self, texture: TextureHandle) -> Result<()> {
        if self.texture_names.get(texture.0 as usize).is_none() {
            return Err(GraphicsError::InvalidHandle(format!(
                "texture handle {} does not exist",
                texture.0
            ))
            .into());
        }
        self.commands.push(RenderCommand::BindTexture(texture));
        Ok(())
    }

    fn bind_sampler(&mut self, sampler: SamplerHandle) -> Result<()> {
        if sampler.0 >= self.sampler_count {
            return Err(GraphicsError::InvalidHandle(format!(
                "sampler handle {} does not exist",
                sampler.0
            ))
            .into());
        }
        self.commands.push(RenderCommand::BindSampler(sampler));
        Ok(())
    }

    fn update_transforms(&mut self, _block: &TransformsBlock) {
        self.commands.push(RenderCommand::UpdateTransforms);
    }

    fn update_lights(&mut self, _block: &LightsBlock) {
        self.commands.push(RenderCommand::UpdateLights);
    }

    fn upload_lines(&mut self, buffer: LineBufferHandle, vertices: &[ColorVertex]) -> Result<()> {
        let entry = self.line_buffers.get_mut(buffer.0 as usize).ok_or_else(|| {
            GraphicsError::InvalidHandle(format!("line buffer handle {} does not exist", buffer.0))
        })?;

        if vertices.len() > entry.capacity {
            return Err(GraphicsError::LineCapacityExceeded {
                requested: vertices.len(),
                capacity: entry.capacity,
            }
            .into());
        }

        entry.uploaded = vertices.len() as u32;
        self.commands.push(RenderCommand::UploadLines {
            buffer,
            vertex_count: vertices.len() as u32,
        });
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let handle = self.check_draw_bindings()?;
        let mesh = self.mesh(handle)?;
        let vertex_count = mesh.vertex_count;
        let topology = mesh.topology;

        self.stats.draw_calls += 1;
        if topology == PrimitiveTopology::LineList {
            self.stats.line_vertices += vertex_count;
        }
        self.commands.push(RenderCommand::Draw { vertex_count });
        Ok(())
    }

    fn draw_indexed(&mut self) -> Result<()> {
        let handle = self.check_draw_bindings()?;
        let mesh = self.mesh(handle)?;

        if mesh.index_count == 0 {
            return Err(GraphicsError::CommandExecution(
                "indexed draw on a mesh without indices".to_string(),
            )
            .into());
        }

        let index_count = mesh.index_count;
        self.stats.draw_calls += 1;
        self.stats.triangles += index_count / 3;
        self.commands.push(RenderCommand::DrawIndexed { index_count });
        Ok(())
    }

    fn draw_lines(&mut self, buffer: LineBufferHandle, vertex_count: u32) -> Result<()> {
        let entry = self.line_buffers.get(buffer.0 as usize).ok_or_else(|| {
            GraphicsError::InvalidHandle(format!("line buffer handle {} does not exist", buffer.0))
        })?;

        if vertex_count > entry.uploaded {
            return Err(GraphicsError::CommandExecution(format!(
                "draw_lines requested {} vertices but only {} were uploaded",
                vertex_count, entry.uploaded
            ))
            .into());
        }
        if self.bound_vertex_shader.is_none() || self.bound_pixel_shader.is_none() {
            return Err(GraphicsError::CommandExecution(
                "draw without bound shaders".to_string(),
            )
            .into());
        }

        self.stats.draw_calls += 1;
        self.stats.line_vertices += vertex_count;
        self.commands.push(RenderCommand::DrawLines {
            buffer,
            vertex_count,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<FrameStats> {
        self.commands.push(RenderCommand::Present);
        self.frame_index += 1;
        debug!(
            frame = self.frame_index,
            draw_calls = self.stats.draw_calls,
            triangles = self.stats.triangles,
            line_vertices = self.stats.line_vertices,
            "frame presented"
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::shapes;

    fn backend_with_cube() -> (HeadlessBackend, MeshHandle, ShaderHandle, ShaderHandle) {
        let mut backend = HeadlessBackend::new();
        let mesh = backend.create_mesh(&shapes::cube()).unwrap();
        let vs = backend.create_shader("lit_vs", ShaderStage::Vertex).unwrap();
        let ps = backend.create_shader("lit_ps", ShaderStage::Pixel).unwrap();
        (backend, mesh, vs, ps)
    }

    #[test]
    fn test_draw_without_bound_mesh_fails() {
        let (mut backend, _mesh, vs, ps) = backend_with_cube();
        backend.begin_frame([0.0; 4]);
        backend.bind_vertex_shader(vs).unwrap();
        backend.bind_pixel_shader(ps).unwrap();

        assert!(backend.draw_indexed().is_err());
    }

    #[test]
    fn test_indexed_draw_counts_triangles() {
        let (mut backend, mesh, vs, ps) = backend_with_cube();
        backend.begin_frame([0.0; 4]);
        backend.bind_mesh(mesh).unwrap();
        backend.bind_vertex_shader(vs).unwrap();
        backend.bind_pixel_shader(ps).unwrap();
        backend.draw_indexed().unwrap();

        let stats = backend.present().unwrap();
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.triangles, 12);
    }

    #[test]
    fn test_line_mesh_draw_counts_line_vertices() {
        let mut backend = HeadlessBackend::new();
        let grid = shapes::grid_lines(5.0, 5, [0.5, 0.5, 0.5, 1.0]);
        let mesh = backend.create_line_mesh(&grid).unwrap();
        let vs = backend.create_shader("debug_line_vs", ShaderStage::Vertex).unwrap();
        let ps = backend.create_shader("debug_line_ps", ShaderStage::Pixel).unwrap();

        backend.begin_frame([0.0; 4]);
        backend.bind_mesh(mesh).unwrap();
        backend.bind_vertex_shader(vs).unwrap();
        backend.bind_pixel_shader(ps).unwrap();
        backend.draw().unwrap();

        let stats = backend.present().unwrap();
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.line_vertices, grid.len() as u32);
        assert_eq!(stats.triangles, 0);
    }

    #[test]
    fn test_bind_invalid_mesh_handle_fails() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.bind_mesh(MeshHandle(42)).is_err());
    }

    #[test]
    fn test_shader_stage_mismatch_rejected() {
        let (mut backend, _mesh, vs, ps) = backend_with_cube();
        assert!(backend.bind_vertex_shader(ps).is_err());
        assert!(backend.bind_pixel_shader(vs).is_err());
    }

    #[test]
    fn test_upload_lines_over_capacity_fails() {
        let mut backend = HeadlessBackend::new();
        let buffer = backend.create_line_buffer(4).unwrap();

        let vertices = vec![ColorVertex::default(); 6];
        let result = backend.upload_lines(buffer, &vertices);
        assert!(matches!(
            result,
            Err(crate::core::error::ViewerError::Graphics(
                GraphicsError::LineCapacityExceeded {
                    requested: 6,
                    capacity: 4
                }
            ))
        ));
    }

    #[test]
    fn test_empty_texture_name_rejected() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.create_texture("").is_err());
        assert!(backend.create_texture("crate.dds").is_ok());
    }

    #[test]
    fn test_begin_frame_resets_commands_and_stats() {
        let (mut backend, mesh, vs, ps) = backend_with_cube();
        backend.begin_frame([0.0; 4]);
        backend.bind_mesh(mesh).unwrap();
        backend.bind_vertex_shader(vs).unwrap();
        backend.bind_pixel_shader(ps).unwrap();
        backend.draw_indexed().unwrap();
        backend.present().unwrap();

        backend.begin_frame([0.0; 4]);
        assert_eq!(backend.stats().draw_calls, 0);
        assert_eq!(backend.commands().len(), 1);
    }
}
