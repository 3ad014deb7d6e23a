/// 模型加载器模块
///
/// 提供统一的模型加载接口和各种格式的具体实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use std::path::Path;

pub mod obj_loader;

pub use obj_loader::ObjLoader;

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
/// 这种设计允许轻松添加新的文件格式支持。
///
/// # 实现要求
///
/// - 加载器应该是无状态的（使用静态方法）
/// - 返回 CPU 侧的 `MeshData`，不涉及 GPU 资源
/// - 正确处理错误情况并返回有意义的错误信息
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 返回
    ///
    /// - `Ok(MeshData)`: 加载成功，返回网格数据
    /// - `Err(ViewerError)`: 加载失败（文件不存在、解析错误等）
    fn load_from_file(path: &Path) -> Result<MeshData>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
///
/// # 返回
///
/// - `Ok(MeshData)`: 成功加载
/// - `Err(ViewerError)`: 不支持的格式或加载失败
pub fn load_mesh(path: &Path) -> Result<MeshData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            MeshLoadError::UnsupportedFormat("cannot determine file extension".to_string())
        })?;

    match extension.as_str() {
        "obj" => ObjLoader::load_from_file(path),
        _ => Err(MeshLoadError::UnsupportedFormat(format!(
            "unsupported mesh format: .{}",
            extension
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ViewerError;

    #[test]
    fn test_load_mesh_rejects_unknown_extension() {
        let result = load_mesh(Path::new("model.xyz"));
        assert!(matches!(
            result,
            Err(ViewerError::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_load_mesh_rejects_missing_extension() {
        let result = load_mesh(Path::new("model"));
        assert!(result.is_err());
    }
}
