/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器，用于存储生成的或从文件加载的原始几何数据。

use super::vertex::Vertex;

/// CPU侧网格数据
///
/// 存储原始网格数据，包含顶点、索引和可选的漫反射纹理名称。
/// 这是一个简单的数据持有者，不包含GPU资源。
///
/// # 架构说明
///
/// - **CPU侧**: `MeshData` 存储在内存中的原始数据
/// - **GPU侧**: 渲染后端将 `MeshData` 上传到缓冲区并返回句柄
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 索引数组
    ///
    /// 三角形顶点索引，每3个索引定义一个三角形。
    /// 使用32位索引以支持超过65535个顶点的模型。
    pub indices: Vec<u32>,

    /// 网格名称（可选）
    ///
    /// 用于调试和识别。
    pub name: Option<String>,

    /// 漫反射纹理文件名（可选）
    ///
    /// 从模型文件的材质中读取；加载器只保证非空字符串，
    /// 不验证文件内容。
    pub diffuse_texture: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 顶点数组非空
    /// - 索引数量是3的倍数（每个三角形3个顶点）
    /// - 所有索引都在有效范围内
    ///
    /// # 返回
    ///
    /// - `Ok(())`: 数据有效
    /// - `Err(String)`: 数据无效，返回错误描述
    pub fn validate(&self) -> Result<(), String> {
        if self.vertices.is_empty() {
            return Err("Mesh has no vertices".to_string());
        }

        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "Index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.vertices.len() as u32;
        for (i, &index) in self.indices.iter().enumerate() {
            if index >= vertex_count {
                return Err(format!(
                    "Index {} at position {} is out of range (0-{})",
                    index,
                    i,
                    vertex_count - 1
                ));
            }
        }

        Ok(())
    }

    /// 清空所有数据
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.name = None;
        self.diffuse_texture = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_data_creation() {
        let mesh = MeshData::new();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.name.is_none());
        assert!(mesh.diffuse_texture.is_none());
    }

    #[test]
    fn test_mesh_data_with_name() {
        let mesh = MeshData::with_name("TestMesh");

        assert_eq!(mesh.name, Some("TestMesh".to_string()));
    }

    #[test]
    fn test_mesh_data_counts() {
        let mut mesh = MeshData::new();
        mesh.vertices.push(Vertex::default());
        mesh.vertices.push(Vertex::default());
        mesh.vertices.push(Vertex::default());
        mesh.indices.extend_from_slice(&[0, 1, 2]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_mesh_data_validation_valid() {
        let mut mesh = MeshData::new();
        mesh.vertices.push(Vertex::default());
        mesh.vertices.push(Vertex::default());
        mesh.vertices.push(Vertex::default());
        mesh.indices.extend_from_slice(&[0, 1, 2]);

        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_mesh_data_validation_empty() {
        let mesh = MeshData::new();
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_mesh_data_validation_invalid_index_count() {
        let mut mesh = MeshData::new();
        mesh.vertices.push(Vertex::default());
        mesh.vertices.push(Vertex::default());
        mesh.indices.extend_from_slice(&[0, 1]); // 不是3的倍数

        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_mesh_data_validation_invalid_index_range() {
        let mut mesh = MeshData::new();
        mesh.vertices.push(Vertex::default());
        mesh.vertices.push(Vertex::default());
        mesh.indices.extend_from_slice(&[0, 1, 5]); // 索引5超出范围

        let result = mesh.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_mesh_data_clear() {
        let mut mesh = MeshData::with_name("Test");
        mesh.vertices.push(Vertex::default());
        mesh.indices.push(0);

        mesh.clear();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
        assert!(mesh.name.is_none());
    }
}
