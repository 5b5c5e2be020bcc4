use glam::{vec2, vec3, vec4, Vec3};

use crate::{Material, Materials, Mesh, MeshVertex, Meshes, Params};

#[derive(Clone, Debug)]
pub struct TestParams;

impl Params for TestParams {
    type MeshHandle = &'static str;
    type MaterialHandle = &'static str;
}

fn vertex(x: f32, y: f32) -> MeshVertex {
    MeshVertex::new(vec3(x, y, 0.0))
        .with_normal(Vec3::Z)
        .with_tangent(vec4(1.0, 0.0, 0.0, -1.0))
        .with_uv(vec2(x, y))
}

/// Returns meshes `quad` (indexed, two triangles spanning `0..1` on XY) and
/// `triangle` (not indexed), plus materials `red` and `blue`.
pub fn assets() -> (Meshes<TestParams>, Materials<TestParams>) {
    let mut meshes = Meshes::default();

    meshes.insert(
        "quad",
        Mesh::new(vec![
            vertex(0.0, 0.0),
            vertex(1.0, 0.0),
            vertex(1.0, 1.0),
            vertex(0.0, 1.0),
        ])
        .with_indices(vec![0, 1, 2, 0, 2, 3]),
    );

    meshes.insert(
        "triangle",
        Mesh::new(vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0)]),
    );

    let mut materials = Materials::default();

    materials.insert("red", Material::default());
    materials.insert("blue", Material::default());

    (meshes, materials)
}
