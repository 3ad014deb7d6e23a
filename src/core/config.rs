//! 配置管理模块
//!
//! 提供查看器配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [viewer]
//! width = 1024
//! height = 768
//! frames = 240
//!
//! [graphics]
//! backend = "headless"
//! line_capacity = 8192
//! clear_color = [0.2, 0.3, 0.6, 1.0]
//!
//! [style]
//! wireframe = false
//! textured = true
//! debug_view = true
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 查看器配置
///
/// 包含了查看器运行所需的所有配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// 查看器配置
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 每帧渲染风格的初始值
    #[serde(default)]
    pub style: FrameStyle,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 查看器窗口与主循环配置
///
/// 没有实际窗口时，宽高仅用于计算投影矩阵的宽高比。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// 视口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 视口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 主循环运行的帧数
    #[serde(default = "default_frames")]
    pub frames: u32,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 图形后端选择
    #[serde(default = "default_backend")]
    pub backend: GraphicsBackend,

    /// 调试线条顶点缓冲区容量（顶点数，必须为偶数）
    #[serde(default = "default_line_capacity")]
    pub line_capacity: usize,

    /// 清屏颜色 (RGBA)
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 4],
}

/// 图形后端类型
///
/// 当前只有记录命令的无头后端；这是设备/交换链引导的边界，
/// 真实 GPU 后端在此接入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsBackend {
    /// 无头后端（记录渲染命令，不进行实际绘制）
    Headless,
}

/// 每帧渲染风格标志
///
/// 原始实现中这是一组自由浮动的全局布尔量；这里改为显式的
/// 每帧不可变配置结构，由输入处理翻转、在渲染开始时整体传入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStyle {
    /// 线框叠加绘制（开启时每个 renderable 绘制两次）
    #[serde(default)]
    pub wireframe: bool,

    /// 纹理采样（关闭时绑定生成的 1x1 白色纹理）
    #[serde(default = "default_true")]
    pub textured: bool,

    /// Alpha 混合
    #[serde(default)]
    pub transparency: bool,

    /// 实心填充但不剔除背面
    #[serde(default)]
    pub cull_none: bool,

    /// 深度写入
    #[serde(default = "default_true")]
    pub depth_write: bool,

    /// 天空盒
    #[serde(default)]
    pub skybox: bool,

    /// 调试视图（网格 + 变换坐标轴线条）
    #[serde(default = "default_true")]
    pub debug_view: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default)]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 1024 }
fn default_height() -> u32 { 768 }
fn default_frames() -> u32 { 240 }
fn default_backend() -> GraphicsBackend { GraphicsBackend::Headless }
fn default_line_capacity() -> usize { 8192 }
fn default_clear_color() -> [f32; 4] { [0.2, 0.3, 0.6, 1.0] }
fn default_true() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_log_file() -> String { "simple_viewer.log".to_string() }

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            frames: default_frames(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            line_capacity: default_line_capacity(),
            clear_color: default_clear_color(),
        }
    }
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            wireframe: false,
            textured: true,
            transparency: false,
            cull_none: false,
            depth_write: true,
            skybox: false,
            debug_view: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    #[allow(dead_code)]
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--width <value>`: 设置视口宽度
    /// - `--height <value>`: 设置视口高度
    /// - `--frames <value>`: 设置主循环帧数
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(idx) = args.iter().position(|a| a == "--width") {
            if let Some(width_str) = args.get(idx + 1) {
                if let Ok(width) = width_str.parse() {
                    self.viewer.width = width;
                }
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--height") {
            if let Some(height_str) = args.get(idx + 1) {
                if let Ok(height) = height_str.parse() {
                    self.viewer.height = height;
                }
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--frames") {
            if let Some(frames_str) = args.get(idx + 1) {
                if let Ok(frames) = frames_str.parse() {
                    self.viewer.frames = frames;
                }
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        // 验证视口尺寸
        if self.viewer.width == 0 || self.viewer.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "viewer.width/height".to_string(),
                reason: "Viewport dimensions must be greater than 0".to_string(),
            }
            .into());
        }

        // 验证线条缓冲区容量：每条线段占两个顶点
        if self.graphics.line_capacity == 0 || self.graphics.line_capacity % 2 != 0 {
            return Err(ConfigError::InvalidValue {
                field: "graphics.line_capacity".to_string(),
                reason: "Line capacity must be a positive even vertex count".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// 视口宽高比
    pub fn aspect_ratio(&self) -> f32 {
        self.viewer.width as f32 / self.viewer.height as f32
    }
}

impl GraphicsBackend {
    /// 获取后端名称
    pub fn name(&self) -> &'static str {
        match self {
            GraphicsBackend::Headless => "Headless",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.viewer.width, 1024);
        assert_eq!(config.viewer.height, 768);
        assert_eq!(config.graphics.backend, GraphicsBackend::Headless);
        assert_eq!(config.graphics.line_capacity, 8192);
    }

    #[test]
    fn test_default_style_matches_startup() {
        // 启动默认值：非线框、有纹理、调试视图开启、深度写入开启
        let style = FrameStyle::default();
        assert!(!style.wireframe);
        assert!(style.textured);
        assert!(!style.transparency);
        assert!(!style.cull_none);
        assert!(style.depth_write);
        assert!(!style.skybox);
        assert!(style.debug_view);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.viewer.width = 0;
        assert!(config.validate().is_err());

        config.viewer.width = 1024;
        config.graphics.line_capacity = 3; // 奇数容量无效
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["--width", "800", "--frames", "10"]);
        assert_eq!(config.viewer.width, 800);
        assert_eq!(config.viewer.frames, 10);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            [style]
            wireframe = true

            [graphics]
            line_capacity = 64
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.style.wireframe);
        assert!(config.style.textured); // serde 默认值补齐
        assert_eq!(config.graphics.line_capacity, 64);
    }
}
