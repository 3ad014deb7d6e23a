//! 输入处理模块
//!
//! 将键盘按键事件翻译为渲染风格标志的翻转。
//! 窗口系统只负责投递按键事件；这里不处理按键重复和焦点管理，
//! 每次按下事件恰好翻转一个布尔标志。
//!
//! # 按键绑定
//!
//! - `1`: 线框叠加
//! - `2`: 纹理
//! - `3`: Alpha 混合
//! - `4`: 填充不剔除
//! - `5`: 深度写入
//! - `0`: 天空盒
//! - `Tab`: 调试视图

use tracing::info;

use super::config::FrameStyle;

/// 键盘按键码
///
/// 简化版本，仅包含查看器用到的按键。
/// 完整的键盘支持可以考虑使用 `winit` 或 `sdl2` 等库的按键码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// 数字键 0-9
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,

    /// Tab 键
    Tab,

    /// 其他按键
    ///
    /// 参数为平台相关的虚拟键码
    Other(u32),
}

/// 处理一次按键按下事件
///
/// 翻转 `style` 中对应的标志并记录日志。
///
/// # 返回值
///
/// - `true`: 按键被消费（翻转了某个标志）
/// - `false`: 按键没有绑定任何标志
pub fn handle_key(style: &mut FrameStyle, key: KeyCode) -> bool {
    match key {
        KeyCode::Key1 => {
            style.wireframe = !style.wireframe;
            info!(wireframe = style.wireframe, "Toggled wireframe overlay");
        }
        KeyCode::Key2 => {
            style.textured = !style.textured;
            info!(textured = style.textured, "Toggled texturing");
        }
        KeyCode::Key3 => {
            style.transparency = !style.transparency;
            info!(transparency = style.transparency, "Toggled alpha blending");
        }
        KeyCode::Key4 => {
            style.cull_none = !style.cull_none;
            info!(cull_none = style.cull_none, "Toggled fill-no-cull raster state");
        }
        KeyCode::Key5 => {
            style.depth_write = !style.depth_write;
            info!(depth_write = style.depth_write, "Toggled depth write");
        }
        KeyCode::Key0 => {
            style.skybox = !style.skybox;
            info!(skybox = style.skybox, "Toggled skybox");
        }
        KeyCode::Tab => {
            style.debug_view = !style.debug_view;
            info!(debug_view = style.debug_view, "Toggled debug view");
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_wireframe() {
        let mut style = FrameStyle::default();
        assert!(!style.wireframe);

        assert!(handle_key(&mut style, KeyCode::Key1));
        assert!(style.wireframe);

        assert!(handle_key(&mut style, KeyCode::Key1));
        assert!(!style.wireframe);
    }

    #[test]
    fn test_each_key_flips_exactly_one_flag() {
        let keys = [
            KeyCode::Key1,
            KeyCode::Key2,
            KeyCode::Key3,
            KeyCode::Key4,
            KeyCode::Key5,
            KeyCode::Key0,
            KeyCode::Tab,
        ];

        for key in keys {
            let before = FrameStyle::default();
            let mut after = before;
            assert!(handle_key(&mut after, key));

            let flags = |s: &FrameStyle| {
                [
                    s.wireframe,
                    s.textured,
                    s.transparency,
                    s.cull_none,
                    s.depth_write,
                    s.skybox,
                    s.debug_view,
                ]
            };
            let changed = flags(&before)
                .iter()
                .zip(flags(&after).iter())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1, "{:?} should flip exactly one flag", key);
        }
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut style = FrameStyle::default();
        let before = style;
        assert!(!handle_key(&mut style, KeyCode::Other(42)));
        assert_eq!(style, before);
    }
}
