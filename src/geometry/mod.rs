//! 几何体模块
//!
//! 提供网格数据结构、顶点定义、内置几何体生成和模型文件加载。
//!
//! # 模块组织
//!
//! - `vertex`：顶点结构定义（网格顶点与彩色线条顶点）
//! - `mesh`：CPU 侧网格数据容器
//! - `shapes`：内置几何体生成（立方体、地面、交叉面片、网格线条）
//! - `loaders`：模型文件加载器（OBJ）

pub mod loaders;
pub mod mesh;
pub mod shapes;
pub mod vertex;

pub use loaders::{load_mesh, MeshLoader, ObjLoader};
pub use mesh::MeshData;
pub use vertex::{ColorVertex, Vertex};
