//! 运行时场景
//!
//! 把场景配置实例化为 GPU 资源和可渲染对象的集合，
//! 并负责每帧的动画更新（自旋、公转灯光）。
//!
//! 可渲染对象由场景统一持有，外部通过句柄访问和修改，
//! 避免对象在调用方之间按值复制。

use tracing::{info, warn};

use crate::core::error::Result;
use crate::core::math::{rotation_y, Matrix4, Vector3};
use crate::core::scene::{CameraConfig, SceneConfig, ShapeKind, SpinAxis};
use crate::geometry::{loaders, shapes};
use crate::renderer::{LightsBlock, MeshHandle, Renderable, Renderer, TextureHandle};

/// 可渲染对象句柄
///
/// 场景内部存储的索引，创建后保持稳定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderableHandle(usize);

/// 方向光的运行时状态
#[derive(Debug, Clone)]
pub struct LightState {
    /// 配置中的初始方向（公转的基准）
    pub base_direction: Vector3,

    /// 当前方向（每帧更新）
    pub direction: Vector3,

    pub color: [f32; 4],

    /// 是否绕 Y 轴公转
    pub orbit: bool,
}

/// 天空盒资源
#[derive(Debug, Clone, Copy)]
pub struct Skybox {
    pub mesh: MeshHandle,
    pub texture: TextureHandle,
}

/// 网格参考线的尺寸：半边长 25，两侧各 25 格
const GRID_HALF_EXTENT: f32 = 25.0;
const GRID_DIVISIONS: u32 = 25;
const GRID_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

/// 运行时场景
pub struct Scene {
    pub camera: CameraConfig,
    pub lights: Vec<LightState>,

    renderables: Vec<Renderable>,

    /// 参考网格线条（调试视图）
    pub grid_mesh: Option<MeshHandle>,

    pub skybox: Option<Skybox>,

    /// 当前时间（秒）
    pub time: f32,
}

impl Scene {
    /// 根据场景配置创建运行时场景
    ///
    /// 为每个模型生成或加载网格、创建纹理并构建可渲染对象。
    /// 模型文件加载失败会使整个场景创建失败。
    pub fn from_config(config: &SceneConfig, renderer: &mut Renderer) -> Result<Self> {
        let mut scene = Self {
            camera: config.camera.clone(),
            lights: config
                .lights
                .iter()
                .map(|l| {
                    let dir = Vector3::from(l.direction);
                    LightState {
                        base_direction: dir,
                        direction: dir,
                        color: l.color,
                        orbit: l.orbit,
                    }
                })
                .collect(),
            renderables: Vec::new(),
            grid_mesh: None,
            skybox: None,
            time: 0.0,
        };

        for model in &config.models {
            let (mesh_data, name) = match (&model.shape, &model.path) {
                (Some(shape), None) => {
                    let data = match shape {
                        ShapeKind::Cube => shapes::cube(),
                        ShapeKind::Ground => shapes::ground(GRID_HALF_EXTENT),
                        ShapeKind::Crosshatch => shapes::cross_hatch(0.5),
                    };
                    let name = model
                        .name
                        .clone()
                        .or_else(|| data.name.clone())
                        .unwrap_or_else(|| "shape".to_string());
                    (data, name)
                }
                (None, Some(path)) => {
                    let data = loaders::load_mesh(std::path::Path::new(path))?;
                    let name = model
                        .name
                        .clone()
                        .or_else(|| data.name.clone())
                        .unwrap_or_else(|| path.clone());
                    (data, name)
                }
                // validate() 已排除其余组合
                _ => continue,
            };

            // 纹理优先级：配置覆盖 > 模型材质 > 白色回退
            let texture_name = model
                .texture
                .clone()
                .or_else(|| mesh_data.diffuse_texture.clone());
            let texture = match texture_name {
                Some(name) => Some(renderer.create_texture(&name)?),
                None => None,
            };

            let mesh = renderer.create_mesh(&mesh_data)?;
            let renderable =
                renderer.create_renderable(name, mesh, texture, &model.transform, model.spin);
            scene.renderables.push(renderable);
        }

        let grid = shapes::grid_lines(GRID_HALF_EXTENT, GRID_DIVISIONS, GRID_COLOR);
        scene.grid_mesh = Some(renderer.create_line_mesh(&grid)?);

        if config.skybox_texture.is_empty() {
            warn!("skybox texture not set, skybox disabled");
        } else {
            let mesh = renderer.create_mesh(&shapes::cube())?;
            let texture = renderer.create_texture(&config.skybox_texture)?;
            scene.skybox = Some(Skybox { mesh, texture });
        }

        info!(
            renderables = scene.renderables.len(),
            lights = scene.lights.len(),
            "scene created"
        );
        Ok(scene)
    }

    /// 添加可渲染对象，返回其句柄
    pub fn spawn(&mut self, renderable: Renderable) -> RenderableHandle {
        let handle = RenderableHandle(self.renderables.len());
        self.renderables.push(renderable);
        handle
    }

    /// 按句柄访问可渲染对象
    pub fn renderable(&self, handle: RenderableHandle) -> Option<&Renderable> {
        self.renderables.get(handle.0)
    }

    /// 按句柄修改可渲染对象
    pub fn renderable_mut(&mut self, handle: RenderableHandle) -> Option<&mut Renderable> {
        self.renderables.get_mut(handle.0)
    }

    /// 遍历所有可渲染对象（创建顺序）
    pub fn iter(&self) -> impl Iterator<Item = &Renderable> {
        self.renderables.iter()
    }

    pub fn renderable_count(&self) -> usize {
        self.renderables.len()
    }

    /// 推进动画到时间 `t`（秒）
    ///
    /// - 带自旋配置的对象：旋转设为轴上 `rate * t` 弧度
    /// - 公转灯光：方向为基准方向绕 Y 轴旋转 `-t` 弧度
    pub fn update(&mut self, t: f32) {
        self.time = t;

        for renderable in &mut self.renderables {
            if let Some(spin) = renderable.spin {
                let axis = match spin.axis {
                    SpinAxis::X => Vector3::x_axis(),
                    SpinAxis::Y => Vector3::y_axis(),
                    SpinAxis::Z => Vector3::z_axis(),
                };
                renderable.rotation = Matrix4::from_axis_angle(&axis, spin.rate * t);
            }
        }

        for light in &mut self.lights {
            if light.orbit {
                light.direction = rotation_y(-t).transform_vector(&light.base_direction);
            }
        }
    }

    /// 构建光照常量块（最多两盏灯，不足补零）
    pub fn lights_block(&self) -> LightsBlock {
        let mut block = LightsBlock::default();
        for (i, light) in self.lights.iter().take(2).enumerate() {
            let d = light.direction;
            block.light_dir[i] = [d.x, d.y, d.z, 0.0];
            block.light_color[i] = light.color;
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::scene::{ModelConfig, SpinConfig, Transform};

    fn test_scene() -> (Renderer, Scene) {
        let mut renderer = Renderer::new(&Config::default()).unwrap();
        let scene = Scene::from_config(&SceneConfig::default(), &mut renderer).unwrap();
        (renderer, scene)
    }

    #[test]
    fn test_default_scene_builds_all_resources() {
        let (_renderer, scene) = test_scene();
        assert_eq!(scene.renderable_count(), 5);
        assert!(scene.grid_mesh.is_some());
        assert!(scene.skybox.is_some());
        assert_eq!(scene.lights.len(), 2);
    }

    #[test]
    fn test_spawn_returns_stable_handles() {
        let (mut renderer, mut scene) = test_scene();

        let mesh = renderer.create_mesh(&shapes::cube()).unwrap();
        let r = renderer.create_renderable("extra", mesh, None, &Transform::default(), None);
        let handle = scene.spawn(r.clone());
        let handle2 = scene.spawn(r);

        assert_ne!(handle, handle2);
        assert_eq!(scene.renderable(handle).unwrap().name, "extra");

        scene
            .renderable_mut(handle)
            .unwrap()
            .set_position(Vector3::new(9.0, 0.0, 0.0));
        assert_eq!(scene.renderable(handle).unwrap().position.x, 9.0);
        // 另一个对象不受影响
        assert_eq!(scene.renderable(handle2).unwrap().position.x, 0.0);
    }

    #[test]
    fn test_update_applies_spin() {
        let mut renderer = Renderer::new(&Config::default()).unwrap();
        let config = SceneConfig {
            models: vec![ModelConfig {
                name: Some("spinner".to_string()),
                shape: Some(ShapeKind::Cube),
                spin: Some(SpinConfig {
                    axis: SpinAxis::Y,
                    rate: std::f32::consts::PI,
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut scene = Scene::from_config(&config, &mut renderer).unwrap();

        scene.update(1.0);
        let rotation = scene.iter().next().unwrap().rotation;

        // 绕 Y 轴转 PI 弧度：x 基向量翻转
        assert!((rotation[(0, 0)] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_update_orbits_flagged_light_only() {
        let (_renderer, mut scene) = test_scene();
        let static_dir = scene.lights[0].direction;

        scene.update(1.5);

        assert_eq!(scene.lights[0].direction, static_dir);
        let orbiting = &scene.lights[1];
        assert!((orbiting.direction - orbiting.base_direction).norm() > 1e-3);
        // 公转不改变方向向量长度
        assert!(
            (orbiting.direction.norm() - orbiting.base_direction.norm()).abs() < 1e-5
        );
    }

    #[test]
    fn test_lights_block_packs_two_lights() {
        let (_renderer, scene) = test_scene();
        let block = scene.lights_block();

        assert!((block.light_dir[0][0] - (-0.577)).abs() < 1e-6);
        assert_eq!(block.light_color[1], [1.0, 0.75, 0.25, 1.0]);
        assert_eq!(block.output_color, [1.0, 1.0, 1.0, 1.0]);
    }
}
