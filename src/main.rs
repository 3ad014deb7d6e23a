//! SimpleViewer - 教学用场景查看器
//!
//! 加载场景配置，构建可渲染对象集合，然后按固定帧数运行主循环：
//! 每帧推进动画、根据当前风格标志分发绘制并输出统计。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用默认配置运行
//! cargo run
//!
//! # 覆盖视口尺寸和帧数
//! cargo run -- --width 800 --height 600 --frames 120
//! ```

use simple_viewer::core::{input, log, Config, SceneConfig};
use simple_viewer::renderer::Renderer;
use simple_viewer::scene::Scene;
use tracing::{error, info};

/// 模拟的按键脚本：在指定帧触发风格翻转
///
/// 无头运行没有真实键盘输入，这里按固定时间表翻转风格标志，
/// 让一次运行覆盖多种绘制路径。
const KEY_SCRIPT: &[(u32, input::KeyCode)] = &[
    (60, input::KeyCode::Key1),  // 线框叠加开
    (120, input::KeyCode::Key0), // 天空盒开
    (180, input::KeyCode::Key1), // 线框叠加关
];

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载查看器配置（config.toml）
/// 2. 应用命令行参数覆盖
/// 3. 验证配置
/// 4. 初始化日志系统
/// 5. 加载场景配置（scene.toml）
/// 6. 创建渲染器和运行时场景
/// 7. 运行主循环
fn main() {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());

    // 3. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 4. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!("SimpleViewer starting...");
    info!(version = env!("CARGO_PKG_VERSION"), "Application initialized");

    // 5. 加载场景配置
    let scene_config = SceneConfig::from_file_or_default("scene.toml");

    info!(
        backend = config.graphics.backend.name(),
        width = config.viewer.width,
        height = config.viewer.height,
        frames = config.viewer.frames,
        "Viewer configuration"
    );

    // 6. 创建渲染器和场景
    let mut renderer = match Renderer::new(&config) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to create renderer: {}", e);
            std::process::exit(1);
        }
    };

    let mut scene = match Scene::from_config(&scene_config, &mut renderer) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };

    // 7. 主循环：固定帧数，逻辑时间按 60fps 推进
    let mut style = config.style;
    for frame in 0..config.viewer.frames {
        for &(at, key) in KEY_SCRIPT {
            if frame == at {
                input::handle_key(&mut style, key);
            }
        }

        let t = frame as f32 / 60.0;
        scene.update(t);

        match renderer.render_frame(&scene, style) {
            Ok(stats) => {
                if frame % 60 == 0 {
                    info!(
                        frame,
                        draw_calls = stats.draw_calls,
                        triangles = stats.triangles,
                        line_vertices = stats.line_vertices,
                        "frame stats"
                    );
                }
            }
            Err(e) => {
                error!(frame, "Render failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    info!("SimpleViewer finished");
}
