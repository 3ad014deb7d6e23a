//! 错误处理模块
//!
//! 定义了查看器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//! - 所有初始化失败都是致命的：上层记录日志后以非零状态退出

use std::fmt;
use std::path::PathBuf;

/// 查看器统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, ViewerError>;

/// SimpleViewer 的错误类型
///
/// 包含了查看器运行过程中可能遇到的各种错误情况。
#[derive(Debug)]
pub enum ViewerError {
    /// 配置错误
    Config(ConfigError),

    /// 图形后端错误
    Graphics(GraphicsError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// IO 错误
    Io(std::io::Error),

    /// 初始化错误
    Initialization(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形后端相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 资源创建失败
    ResourceCreation(String),

    /// 渲染命令执行失败
    CommandExecution(String),

    /// 无效的资源句柄
    InvalidHandle(String),

    /// 调试线条缓冲区容量超限
    ///
    /// 原始实现中这是一个仅 debug 构建生效的断言；
    /// 这里改为始终检查的硬错误，绝不静默截断。
    LineCapacityExceeded { requested: usize, capacity: usize },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 解析失败
    ParseError(String),

    /// 数据验证失败
    ValidationError(String),

    /// 几何数据无效
    InvalidGeometry(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Config(e) => write!(f, "Configuration error: {}", e),
            ViewerError::Graphics(e) => write!(f, "Graphics error: {}", e),
            ViewerError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            ViewerError::Io(e) => write!(f, "IO error: {}", e),
            ViewerError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
            GraphicsError::CommandExecution(msg) => write!(f, "Command execution failed: {}", msg),
            GraphicsError::InvalidHandle(msg) => write!(f, "Invalid handle: {}", msg),
            GraphicsError::LineCapacityExceeded { requested, capacity } => write!(
                f,
                "Debug line buffer capacity exceeded: requested {} vertices, capacity {}",
                requested, capacity
            ),
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::ParseError(msg) => write!(f, "Failed to parse mesh: {}", msg),
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
            MeshLoadError::InvalidGeometry(msg) => write!(f, "Invalid geometry data: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}
impl std::error::Error for MeshLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err)
    }
}

impl From<ConfigError> for ViewerError {
    fn from(err: ConfigError) -> Self {
        ViewerError::Config(err)
    }
}

impl From<GraphicsError> for ViewerError {
    fn from(err: GraphicsError) -> Self {
        ViewerError::Graphics(err)
    }
}

impl From<MeshLoadError> for ViewerError {
    fn from(err: MeshLoadError) -> Self {
        ViewerError::MeshLoading(err)
    }
}
