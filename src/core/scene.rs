//! 场景配置模块
//!
//! 定义场景配置，包括相机、灯光、模型等元素的变换和参数。
//! 场景从 `scene.toml` 加载；文件缺失时使用内置的默认场景。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ConfigError, Result, ViewerError};
use crate::core::math::{self, Matrix4, Vector3};

/// 3D 变换数据
///
/// 包含位置、旋转和缩放信息。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transform {
    /// 位置 (x, y, z)
    #[serde(default = "default_position")]
    pub position: [f32; 3],

    /// 旋转（欧拉角，度数）(pitch, yaw, roll)
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 3],

    /// 缩放 (x, y, z)
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

fn default_position() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_rotation() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}

impl Transform {
    /// 仅包含位置的变换
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
            ..Default::default()
        }
    }

    /// 创建模型矩阵
    ///
    /// 变换顺序：缩放 -> 旋转 -> 平移
    pub fn to_matrix(&self) -> Matrix4 {
        let pitch = math::deg_to_rad(self.rotation[0]);
        let yaw = math::deg_to_rad(self.rotation[1]);
        let roll = math::deg_to_rad(self.rotation[2]);

        let translation = Matrix4::new_translation(&Vector3::new(
            self.position[0],
            self.position[1],
            self.position[2],
        ));

        // 旋转矩阵（欧拉角）
        let rotation =
            math::rotation_z(roll) * math::rotation_y(yaw) * math::rotation_x(pitch);

        let scale = Matrix4::new_nonuniform_scaling(&Vector3::new(
            self.scale[0],
            self.scale[1],
            self.scale[2],
        ));

        // 组合：T * R * S
        translation * rotation * scale
    }
}

/// 相机配置
///
/// 固定相机：位置 + 观察目标 + 投影参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// 相机位置
    #[serde(default = "default_eye")]
    pub position: [f32; 3],

    /// 观察目标
    #[serde(default = "default_target")]
    pub target: [f32; 3],

    /// 视野角度（Field of View，度数）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near_clip")]
    pub near_clip: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far_clip")]
    pub far_clip: f32,
}

fn default_eye() -> [f32; 3] {
    [0.0, 4.0, -10.0]
}

fn default_target() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f32 {
    45.0
}

fn default_near_clip() -> f32 {
    0.01
}

fn default_far_clip() -> f32 {
    1000.0
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_eye(),
            target: default_target(),
            fov: default_fov(),
            near_clip: default_near_clip(),
            far_clip: default_far_clip(),
        }
    }
}

impl CameraConfig {
    /// 创建视图矩阵
    pub fn view_matrix(&self) -> Matrix4 {
        let eye = Vector3::from(self.position);
        let target = Vector3::from(self.target);
        let up = Vector3::new(0.0, 1.0, 0.0);
        math::look_at(eye, target, up)
    }

    /// 创建透视投影矩阵
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Matrix4 {
        math::perspective(
            aspect_ratio,
            math::deg_to_rad(self.fov),
            self.near_clip,
            self.far_clip,
        )
    }
}

/// 方向光配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    /// 光照方向
    pub direction: [f32; 3],

    /// 光照颜色 (RGBA)
    pub color: [f32; 4],

    /// 是否绕原点公转（每帧按时间旋转方向）
    #[serde(default)]
    pub orbit: bool,
}

fn default_lights() -> Vec<LightConfig> {
    vec![
        LightConfig {
            direction: [-0.577, 0.577, -0.577],
            color: [0.75, 0.75, 0.75, 1.0],
            orbit: false,
        },
        LightConfig {
            direction: [0.577, 0.2577, -0.577],
            color: [1.0, 0.75, 0.25, 1.0],
            orbit: true,
        },
    ]
}

/// 内置几何体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// 单位立方体
    Cube,
    /// 地面平面
    Ground,
    /// 交叉面片（植被）
    Crosshatch,
}

/// 自旋轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

/// 自旋动画配置
///
/// 每帧把旋转设置为 `axis` 轴上 `rate * t` 弧度（t 为运行时间）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpinConfig {
    /// 旋转轴
    pub axis: SpinAxis,

    /// 角速度（弧度/秒）
    pub rate: f32,
}

/// 模型配置
///
/// `shape` 与 `path` 二选一：内置几何体或 OBJ 模型文件。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelConfig {
    /// 调试用名称
    #[serde(default)]
    pub name: Option<String>,

    /// 内置几何体
    #[serde(default)]
    pub shape: Option<ShapeKind>,

    /// 模型文件路径
    #[serde(default)]
    pub path: Option<String>,

    /// 纹理名称覆盖（OBJ 材质中的纹理优先级更低）
    #[serde(default)]
    pub texture: Option<String>,

    /// 模型变换
    #[serde(default)]
    pub transform: Transform,

    /// 自旋动画
    #[serde(default)]
    pub spin: Option<SpinConfig>,
}

fn default_models() -> Vec<ModelConfig> {
    vec![
        ModelConfig {
            name: Some("ground".to_string()),
            shape: Some(ShapeKind::Ground),
            texture: Some("ground.dds".to_string()),
            ..Default::default()
        },
        ModelConfig {
            name: Some("crate".to_string()),
            shape: Some(ShapeKind::Cube),
            texture: Some("crate.dds".to_string()),
            transform: Transform::at(-3.0, 0.5, 0.0),
            spin: Some(SpinConfig { axis: SpinAxis::Z, rate: -3.0 }),
            ..Default::default()
        },
        ModelConfig {
            name: Some("crate2".to_string()),
            shape: Some(ShapeKind::Cube),
            texture: Some("crate.dds".to_string()),
            transform: Transform::at(2.0, 1.6, 0.4),
            spin: Some(SpinConfig { axis: SpinAxis::Y, rate: -5.0 }),
            ..Default::default()
        },
        ModelConfig {
            name: Some("bush".to_string()),
            shape: Some(ShapeKind::Crosshatch),
            texture: Some("grass.dds".to_string()),
            transform: Transform::at(-2.0, 0.0, -2.0),
            ..Default::default()
        },
        ModelConfig {
            name: Some("bush2".to_string()),
            shape: Some(ShapeKind::Crosshatch),
            texture: Some("grass.dds".to_string()),
            transform: Transform::at(1.5, 0.0, 3.0),
            ..Default::default()
        },
    ]
}

/// 场景配置
///
/// 包含场景中的所有元素配置：相机、灯光和模型列表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// 相机配置
    #[serde(default)]
    pub camera: CameraConfig,

    /// 灯光列表
    #[serde(default = "default_lights")]
    pub lights: Vec<LightConfig>,

    /// 模型列表
    #[serde(default = "default_models", rename = "model")]
    pub models: Vec<ModelConfig>,

    /// 天空盒纹理（空字符串表示禁用）
    #[serde(default = "default_skybox_texture")]
    pub skybox_texture: String,
}

fn default_skybox_texture() -> String {
    "sky_dawn.dds".to_string()
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            lights: default_lights(),
            models: default_models(),
            skybox_texture: default_skybox_texture(),
        }
    }
}

impl SceneConfig {
    /// 从文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ViewerError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            )))
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            ViewerError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            )))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// 从文件加载，如果文件不存在则返回默认场景
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 验证配置的有效性
    ///
    /// 每个模型必须且只能指定 `shape` 或 `path` 之一。
    pub fn validate(&self) -> Result<()> {
        for (i, model) in self.models.iter().enumerate() {
            match (&model.shape, &model.path) {
                (None, None) => {
                    return Err(ConfigError::InvalidValue {
                        field: format!("model[{}]", i),
                        reason: "Either 'shape' or 'path' must be set".to_string(),
                    }
                    .into());
                }
                (Some(_), Some(_)) => {
                    return Err(ConfigError::InvalidValue {
                        field: format!("model[{}]", i),
                        reason: "'shape' and 'path' are mutually exclusive".to_string(),
                    }
                    .into());
                }
                _ => {}
            }
        }
        Ok(())
    }
}
