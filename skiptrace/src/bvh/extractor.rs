use glam::{Mat3, Vec4Swizzles};

use super::BvhTriangle;
use crate::{gpu, Materials, Meshes, Object, ObjectFilter, Params};

/// World-space geometry of the scene, ready to be turned into a tree.
#[derive(Clone, Debug, Default)]
pub struct ExtractedGeometry {
    pub triangles: Vec<BvhTriangle>,

    /// Shading attributes, parallel to `triangles` (i.e. the triangle with
    /// id `n` has its attributes at `attributes[n]`).
    pub attributes: Vec<gpu::TriangleAttributes>,
}

/// Flattens participating objects into triangles, object by object and then
/// triangle by triangle within each mesh.
///
/// Degenerate triangles are passed through as they are.
pub fn run<P>(
    objects: &[Object<P>],
    meshes: &Meshes<P>,
    materials: &Materials<P>,
    filter: &ObjectFilter,
) -> ExtractedGeometry
where
    P: Params,
{
    let mut out = ExtractedGeometry::default();

    for (object_idx, object) in objects.iter().enumerate() {
        if !filter.contains(object_idx, objects.len()) {
            log::debug!("Object #{object_idx} skipped (filtered out)");
            continue;
        }

        let Some(mesh) = meshes.get(&object.mesh_handle) else {
            log::warn!(
                "Object #{object_idx} skipped: mesh {:?} is not available",
                object.mesh_handle
            );

            continue;
        };

        let Some(material_id) = materials.lookup(&object.material_handle)
        else {
            log::warn!(
                "Object #{object_idx} skipped: material {:?} is not available",
                object.material_handle
            );

            continue;
        };

        let uv_transform = materials[material_id].uv_transform;
        let normal_xform = Mat3::from_mat4(object.transform);

        for vertices in mesh.triangles() {
            let triangle_id = gpu::TriangleId::new(out.triangles.len() as u32);

            assert!(
                triangle_id.get() < gpu::MAX_EXACT_INDEX,
                "scene has too many triangles to address them exactly"
            );

            let positions = vertices
                .map(|vertex| object.transform.transform_point3(vertex.position));

            let normals = vertices
                .map(|vertex| (normal_xform * vertex.normal).normalize_or_zero());

            let tangents = vertices.map(|vertex| {
                (normal_xform * vertex.tangent.xyz())
                    .normalize_or_zero()
                    .extend(vertex.tangent.w)
            });

            let uvs =
                vertices.map(|vertex| uv_transform.transform_point2(vertex.uv));

            out.triangles
                .push(BvhTriangle::new(positions, triangle_id, material_id));

            out.attributes
                .push(gpu::TriangleAttributes::new(normals, tangents, uvs));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec2, vec3, vec4, Affine2, Mat4, Vec3};

    use super::*;
    use crate::test_utils::{self, TestParams};
    use crate::{Material, Mesh, MeshVertex};

    fn positions(out: &ExtractedGeometry) -> Vec<[Vec3; 3]> {
        out.triangles
            .iter()
            .map(|triangle| triangle.positions)
            .collect()
    }

    #[test]
    fn preserves_order() {
        let (meshes, materials) = test_utils::assets();

        let objects = vec![
            Object::<TestParams>::new("quad", "red", Mat4::IDENTITY),
            Object::new(
                "triangle",
                "blue",
                Mat4::from_translation(vec3(0.0, 0.0, 5.0)),
            ),
        ];

        let target = run(&objects, &meshes, &materials, &ObjectFilter::All);

        assert_eq!(3, target.triangles.len());
        assert_eq!(3, target.attributes.len());

        let ids: Vec<_> = target
            .triangles
            .iter()
            .map(|triangle| {
                (triangle.triangle_id.get(), triangle.material_id.get())
            })
            .collect();

        assert_eq!(vec![(0, 0), (1, 0), (2, 1)], ids);

        assert_eq!(
            vec![
                [Vec3::ZERO, vec3(1.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0)],
                [Vec3::ZERO, vec3(1.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0)],
                [
                    vec3(0.0, 0.0, 5.0),
                    vec3(1.0, 0.0, 5.0),
                    vec3(0.0, 1.0, 5.0)
                ],
            ],
            positions(&target),
        );
    }

    #[test]
    fn transforms_directions_without_translation() {
        let (meshes, materials) = test_utils::assets();

        let transform = Mat4::from_translation(vec3(3.0, 0.0, 0.0))
            * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2)
            * Mat4::from_scale(Vec3::splat(2.0));

        let objects =
            vec![Object::<TestParams>::new("triangle", "red", transform)];

        let target = run(&objects, &meshes, &materials, &ObjectFilter::All);
        let attributes = target.attributes[0];

        // Rotating +Z by 90 degrees around X yields -Y
        for idx in 0..3 {
            let normal = attributes.normal(idx);

            assert_relative_eq!(0.0, normal.x, epsilon = 1e-6);
            assert_relative_eq!(-1.0, normal.y, epsilon = 1e-6);
            assert_relative_eq!(0.0, normal.z, epsilon = 1e-6);

            let tangent = attributes.tangent(idx);

            assert_relative_eq!(1.0, tangent.x, epsilon = 1e-6);
            assert_relative_eq!(-1.0, tangent.w);
        }

        let [p0, p1, p2] = target.triangles[0].positions;

        assert_relative_eq!(3.0, p0.x);
        assert_relative_eq!(5.0, p1.x);
        assert_relative_eq!(3.0, p2.x);
        assert_relative_eq!(2.0, p2.z, epsilon = 1e-6);
    }

    #[test]
    fn transforms_uvs() {
        let (meshes, mut materials) = test_utils::assets();

        let uv_transform = Affine2::from_scale_angle_translation(
            vec2(2.0, 2.0),
            0.0,
            vec2(0.5, 0.0),
        );

        materials
            .insert("red", Material::default().with_uv_transform(uv_transform));

        let objects =
            vec![Object::<TestParams>::new("triangle", "red", Mat4::IDENTITY)];

        let target = run(&objects, &meshes, &materials, &ObjectFilter::All);
        let attributes = target.attributes[0];

        assert_eq!(vec2(0.5, 0.0), attributes.uv(0));
        assert_eq!(vec2(2.5, 0.0), attributes.uv(1));
        assert_eq!(vec2(0.5, 2.0), attributes.uv(2));
        assert_eq!(vec4(0.5, 2.0, 0.0, 0.0), attributes.uvs[1]);
    }

    #[test]
    fn filters_objects() {
        let (meshes, materials) = test_utils::assets();

        let objects: Vec<_> = (0..3)
            .map(|idx| {
                Object::<TestParams>::new(
                    "triangle",
                    "red",
                    Mat4::from_translation(vec3(idx as f32, 0.0, 0.0)),
                )
            })
            .collect();

        let target =
            run(&objects, &meshes, &materials, &ObjectFilter::AllButLast);

        assert_eq!(2, target.triangles.len());
        assert_eq!(1.0, target.triangles[1].positions[0].x);

        let target =
            run(&objects, &meshes, &materials, &ObjectFilter::Only(vec![2]));

        assert_eq!(1, target.triangles.len());
        assert_eq!(0, target.triangles[0].triangle_id.get());
        assert_eq!(2.0, target.triangles[0].positions[0].x);
    }

    #[test]
    fn skips_unresolved_handles() {
        let (mut meshes, materials) = test_utils::assets();

        meshes.insert(
            "degenerate",
            Mesh::new(vec![MeshVertex::new(Vec3::ONE); 3]),
        );

        let objects = vec![
            Object::<TestParams>::new("missing", "red", Mat4::IDENTITY),
            Object::new("triangle", "missing", Mat4::IDENTITY),
            Object::new("degenerate", "blue", Mat4::IDENTITY),
        ];

        let target = run(&objects, &meshes, &materials, &ObjectFilter::All);

        assert_eq!(1, target.triangles.len());
        assert_eq!([Vec3::ONE; 3], target.triangles[0].positions);
        assert_eq!(1, target.triangles[0].material_id.get());
    }
}
