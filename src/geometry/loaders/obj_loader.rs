/// OBJ 文件加载器
///
/// 使用 tobj crate 加载 Wavefront OBJ 格式的3D模型。
/// 支持顶点位置、法线、纹理坐标的加载，并可自动重建缺失的法线。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use crate::geometry::vertex::Vertex;
use std::path::Path;

/// OBJ 格式加载器
///
/// 实现 `MeshLoader` trait，提供 OBJ 文件的加载功能。
///
/// # 特性
///
/// - 使用 tobj 解析 OBJ 文件
/// - 自动三角化（如果需要）
/// - UV 坐标翻转（V轴：1.0 - v）
/// - 自动重建缺失的法线
/// - 提取第一个材质的漫反射纹理文件名
pub struct ObjLoader;

impl MeshLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<MeshData> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let load_options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };

        let (models, materials) = tobj::load_obj(path, &load_options)
            .map_err(|e| MeshLoadError::ParseError(format!("tobj parse failed: {}", e)))?;

        if models.is_empty() {
            return Err(
                MeshLoadError::ValidationError("OBJ file contains no models".to_string()).into(),
            );
        }

        let mut mesh_data = MeshData::with_name(
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Unnamed"),
        );

        let mut has_normals = false;

        // 遍历所有模型（OBJ 可能包含多个对象），合并到同一个顶点数组
        for model in models.iter() {
            let mesh = &model.mesh;

            let vertex_start = mesh_data.vertices.len() as u32;

            let positions = &mesh.positions;
            let normals = &mesh.normals;
            let texcoords = &mesh.texcoords;

            if positions.len() % 3 != 0 {
                return Err(MeshLoadError::InvalidGeometry(format!(
                    "incomplete position data: {} floats",
                    positions.len()
                ))
                .into());
            }

            let vertex_count = positions.len() / 3;

            if !normals.is_empty() {
                has_normals = true;
            }

            for i in 0..vertex_count {
                let position = [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]];

                let normal = if normals.len() >= (i + 1) * 3 {
                    [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]]
                } else {
                    [0.0, 0.0, 0.0]
                };

                // 翻转V坐标
                let texcoord = if texcoords.len() >= (i + 1) * 2 {
                    [texcoords[i * 2], 1.0 - texcoords[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                };

                mesh_data.vertices.push(Vertex {
                    position,
                    normal,
                    texcoord,
                });
            }

            for &index in &mesh.indices {
                mesh_data.indices.push(vertex_start + index);
            }

            // 取第一个带漫反射贴图的材质
            if mesh_data.diffuse_texture.is_none() {
                if let (Some(mat_id), Ok(materials)) = (mesh.material_id, materials.as_ref()) {
                    if let Some(texture) = materials
                        .get(mat_id)
                        .and_then(|m| m.diffuse_texture.as_ref())
                    {
                        if !texture.is_empty() {
                            mesh_data.diffuse_texture = Some(texture.clone());
                        }
                    }
                }
            }
        }

        // 先验证索引范围，重建法线会按索引访问顶点数组
        mesh_data
            .validate()
            .map_err(MeshLoadError::ValidationError)?;

        // 后处理：重建法线（如果缺失）
        if !has_normals {
            tracing::info!("OBJ file has no normals, reconstructing...");
            reconstruct_normals(&mut mesh_data.vertices, &mesh_data.indices);
        }

        tracing::info!(
            "loaded OBJ file: {} vertices, {} triangles",
            mesh_data.vertex_count(),
            mesh_data.triangle_count(),
        );

        Ok(mesh_data)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

/// 根据三角形面重建逐顶点法线
///
/// 每个顶点的法线为其参与的所有三角形面法线之和（按面积加权），
/// 最后归一化。
fn reconstruct_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for v in vertices.iter_mut() {
        v.normal = [0.0, 0.0, 0.0];
    }

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let p0 = vertices[i0].position;
        let p1 = vertices[i1].position;
        let p2 = vertices[i2].position;

        let e1 = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
        let e2 = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];

        // 叉积，长度与三角形面积成正比
        let face_normal = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];

        for &i in &[i0, i1, i2] {
            vertices[i].normal[0] += face_normal[0];
            vertices[i].normal[1] += face_normal[1];
            vertices[i].normal[2] += face_normal[2];
        }
    }

    for v in vertices.iter_mut() {
        let n = v.normal;
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 1e-8 {
            v.normal = [n[0] / len, n[1] / len, n[2] / len];
        } else {
            v.normal = [0.0, 1.0, 0.0];
        }
    }
}
