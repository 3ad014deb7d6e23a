//! SimpleViewer - 教学用场景查看器核心
//!
//! 提供一个小型场景查看器的全部核心逻辑：场景配置、几何体生成与加载、
//! 风格标志驱动的绘制分发和帧作用域的调试线条累积器。
//! 绘制通过统一的后端接口提交，当前内置记录命令的无头后端。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理、输入）
//! - `geometry`: 几何体模块（顶点、网格、内置几何体、OBJ 加载器）
//! - `renderer`: 渲染器模块（后端接口、调试线条、绘制分发）
//! - `scene`: 运行时场景（资源实例化与动画更新）
//!
//! # 架构概览
//!
//! ```text
//! ┌─────────────┐
//! │   main.rs   │  应用程序入口与主循环
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Scene    │  运行时场景（renderable 集合、灯光、动画）
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Renderer   │  统一绘制分发（风格标志 -> 管线状态）
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Headless   │  记录命令的后端实现
//! └─────────────┘
//! ```

pub mod core;
pub mod geometry;
pub mod renderer;
pub mod scene;
