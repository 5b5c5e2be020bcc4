use std::ops::Index;

use derivative::Derivative;
use fxhash::FxHashMap;

use crate::{gpu, Material, Params};

/// Material table; maps the host application's handles into dense ids that
/// end up in the serialized leaves.
#[derive(Debug, Derivative)]
#[derivative(Default(bound = ""))]
pub struct Materials<P>
where
    P: Params,
{
    materials: Vec<Material>,
    ids: FxHashMap<P::MaterialHandle, gpu::MaterialId>,
}

impl<P> Materials<P>
where
    P: Params,
{
    /// Inserts or replaces a material; replacing keeps its id.
    pub fn insert(
        &mut self,
        material_handle: P::MaterialHandle,
        material: Material,
    ) -> gpu::MaterialId {
        if let Some(&material_id) = self.ids.get(&material_handle) {
            self.materials[material_id.get() as usize] = material;
            return material_id;
        }

        let material_id = gpu::MaterialId::new(self.materials.len() as u32);

        self.materials.push(material);
        self.ids.insert(material_handle, material_id);

        material_id
    }

    pub fn lookup(
        &self,
        material_handle: &P::MaterialHandle,
    ) -> Option<gpu::MaterialId> {
        self.ids.get(material_handle).copied()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl<P> Index<gpu::MaterialId> for Materials<P>
where
    P: Params,
{
    type Output = Material;

    fn index(&self, index: gpu::MaterialId) -> &Self::Output {
        &self.materials[index.get() as usize]
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, Affine2};

    use super::*;
    use crate::test_utils::TestParams;

    #[test]
    fn insert() {
        let mut target = Materials::<TestParams>::default();

        let id_a = target.insert("a", Material::default());
        let id_b = target.insert("b", Material::default());

        assert_eq!(gpu::MaterialId::new(0), id_a);
        assert_eq!(gpu::MaterialId::new(1), id_b);
        assert_eq!(Some(id_b), target.lookup(&"b"));
        assert_eq!(None, target.lookup(&"c"));

        let uv_transform = Affine2::from_translation(vec2(0.5, 0.0));

        let id_a2 = target.insert(
            "a",
            Material::default().with_uv_transform(uv_transform),
        );

        assert_eq!(id_a, id_a2);
        assert_eq!(2, target.len());
        assert_eq!(uv_transform, target[id_a].uv_transform);
    }
}
