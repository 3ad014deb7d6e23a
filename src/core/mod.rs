//! 核心功能模块
//!
//! 本模块提供了查看器的基础功能，包括数学库、日志系统、配置管理、
//! 错误处理和输入处理。这些模块独立于具体的渲染后端。
//!
//! # 模块组织
//!
//! - `math`：数学库，提供向量、矩阵等常用数学类型
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载查看器设置
//! - `error`：错误处理，定义统一的错误类型
//! - `input`：输入处理，把按键事件翻译为渲染风格翻转
//! - `scene`：场景配置（相机、灯光、模型列表）

pub mod config;
pub mod error;
pub mod input;
pub mod log;
pub mod math;
pub mod scene;

// 重新导出常用类型，方便使用
pub use config::{Config, FrameStyle};
pub use error::{Result, ViewerError};
pub use math::{Color, Matrix4, Vector2, Vector3, Vector4};
pub use scene::SceneConfig;
