use super::error::StructureError;
use super::structure::Structure;
use crate::core::models::{Bond, EntityKind};
use nalgebra::Point3;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Every chain sharing one name.
    Chain,
    /// Every chain whose name is in a set.
    Chains,
    /// Every chain of one model.
    Model,
}

/// A read-only projection of a [`Structure`] onto a subset of its chains.
///
/// The view holds a mask over the parent's atom index space. Every accessor
/// forces the parent's cached array and filters it through the mask, so a view
/// never decodes anything itself and always agrees with its parent.
#[derive(Debug, Clone)]
pub struct StructureView<'a> {
    parent: &'a Structure,
    id: String,
    kind: ViewKind,
    chains: Vec<usize>,
    models: Vec<usize>,
    mask: Vec<bool>,
    atom_count: usize,
}

impl<'a> StructureView<'a> {
    /// `chains` must be ascending.
    fn from_chains(
        parent: &'a Structure,
        id: String,
        kind: ViewKind,
        chains: Vec<usize>,
        models: Option<Vec<usize>>,
    ) -> Self {
        let index = parent.index();
        let mut mask = vec![false; parent.atom_count()];
        let mut atom_count = 0;
        for &chain in &chains {
            let range = index.chain_to_atom.range(chain);
            atom_count += range.len();
            mask[range].fill(true);
        }
        let models = models.unwrap_or_else(|| {
            let mut models: Vec<usize> = chains
                .iter()
                .filter_map(|&c| index.model_of_chain(c))
                .collect();
            models.dedup();
            models
        });
        Self {
            parent,
            id,
            kind,
            chains,
            models,
            mask,
            atom_count,
        }
    }

    /// Selects the chains among `candidates` whose name is in `names`.
    pub(crate) fn by_names(
        parent: &'a Structure,
        parent_id: &str,
        candidates: &[usize],
        names: &[&str],
        kind: ViewKind,
    ) -> Result<Self, StructureError> {
        let chains = match parent.per_chain_names()? {
            Some(all) => candidates
                .iter()
                .copied()
                .filter(|&c| names.iter().any(|name| **name == *all[c]))
                .collect(),
            None => Vec::new(),
        };
        let id = format!("{parent_id}.{}", names.join(","));
        Ok(Self::from_chains(parent, id, kind, chains, None))
    }

    /// One chain view per distinct name among `candidates`, in order of first appearance.
    pub(crate) fn per_name(
        parent: &'a Structure,
        parent_id: &str,
        candidates: &[usize],
    ) -> Result<Vec<Self>, StructureError> {
        let Some(all) = parent.per_chain_names()? else {
            return Ok(Vec::new());
        };
        let mut seen = HashSet::new();
        let names: Vec<&str> = candidates
            .iter()
            .map(|&c| &*all[c])
            .filter(|name| seen.insert(*name))
            .collect();
        names
            .into_iter()
            .map(|name| Self::by_names(parent, parent_id, candidates, &[name], ViewKind::Chain))
            .collect()
    }

    pub(crate) fn for_model(parent: &'a Structure, model: usize) -> Self {
        let chains = parent.index().model_to_chain.range(model).collect();
        let id = format!("{}/{model}", parent.id());
        Self::from_chains(parent, id, ViewKind::Model, chains, Some(vec![model]))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn parent(&self) -> &'a Structure {
        self.parent
    }

    /// Mask over the parent's atoms.
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Parent chain indices covered by the view, ascending.
    pub fn chain_indices(&self) -> &[usize] {
        &self.chains
    }

    /// Parent model indices covered by the view, ascending.
    pub fn model_indices(&self) -> &[usize] {
        &self.models
    }

    /// Parent group indices covered by the view, ascending.
    pub fn group_indices(&self) -> Vec<usize> {
        let table = &self.parent.index().chain_to_group;
        self.chains.iter().flat_map(|&c| table.range(c)).collect()
    }

    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    pub fn group_count(&self) -> usize {
        let table = &self.parent.index().chain_to_group;
        self.chains.iter().map(|&c| table.range(c).len()).sum()
    }

    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Chains of this view named `name`; on a model view only that model's chains qualify.
    pub fn chain(&self, name: &str) -> Result<StructureView<'a>, StructureError> {
        Self::by_names(self.parent, &self.id, &self.chains, &[name], ViewKind::Chain)
    }

    pub fn chains(&self) -> Result<Vec<StructureView<'a>>, StructureError> {
        Self::per_name(self.parent, &self.id, &self.chains)
    }

    pub fn select_chains(&self, names: &[&str]) -> Result<StructureView<'a>, StructureError> {
        Self::by_names(self.parent, &self.id, &self.chains, names, ViewKind::Chains)
    }

    fn project<T: Clone>(&self, values: &[T]) -> Vec<T> {
        values
            .iter()
            .zip(&self.mask)
            .filter_map(|(value, &keep)| keep.then(|| value.clone()))
            .collect()
    }

    fn project_opt<T: Clone>(&self, values: Option<&[T]>) -> Option<Vec<T>> {
        values.map(|v| self.project(v))
    }

    pub fn x_coords(&self) -> Result<Option<Vec<f32>>, StructureError> {
        Ok(self.project_opt(self.parent.x_coords()?))
    }

    pub fn y_coords(&self) -> Result<Option<Vec<f32>>, StructureError> {
        Ok(self.project_opt(self.parent.y_coords()?))
    }

    pub fn z_coords(&self) -> Result<Option<Vec<f32>>, StructureError> {
        Ok(self.project_opt(self.parent.z_coords()?))
    }

    pub fn coords(&self) -> Result<Option<Vec<Point3<f32>>>, StructureError> {
        Ok(self.project_opt(self.parent.coords()?))
    }

    pub fn b_factors(&self) -> Result<Option<Vec<f32>>, StructureError> {
        Ok(self.project_opt(self.parent.b_factors()?))
    }

    pub fn occupancies(&self) -> Result<Option<Vec<f32>>, StructureError> {
        Ok(self.project_opt(self.parent.occupancies()?))
    }

    pub fn atom_ids(&self) -> Result<Option<Vec<i32>>, StructureError> {
        Ok(self.project_opt(self.parent.atom_ids()?))
    }

    pub fn alt_locs(&self) -> Result<Option<Vec<Option<char>>>, StructureError> {
        Ok(self.project_opt(self.parent.alt_locs()?))
    }

    pub fn chain_names(&self) -> Result<Option<Vec<Arc<str>>>, StructureError> {
        Ok(self.project_opt(self.parent.chain_names()?))
    }

    pub fn chain_ids(&self) -> Result<Option<Vec<Arc<str>>>, StructureError> {
        Ok(self.project_opt(self.parent.chain_ids()?))
    }

    pub fn group_ids(&self) -> Result<Option<Vec<i32>>, StructureError> {
        Ok(self.project_opt(self.parent.group_ids()?))
    }

    pub fn group_numbers(&self) -> Result<Option<Vec<Arc<str>>>, StructureError> {
        Ok(self.project_opt(self.parent.group_numbers()?))
    }

    pub fn sequence_positions(&self) -> Result<Option<Vec<i32>>, StructureError> {
        Ok(self.project_opt(self.parent.sequence_positions()?))
    }

    pub fn group_names(&self) -> Vec<Arc<str>> {
        self.project(self.parent.group_names())
    }

    pub fn atom_names(&self) -> Vec<Arc<str>> {
        self.project(self.parent.atom_names())
    }

    pub fn elements(&self) -> Vec<Arc<str>> {
        self.project(self.parent.elements())
    }

    pub fn chem_classes(&self) -> Vec<Arc<str>> {
        self.project(self.parent.chem_classes())
    }

    pub fn one_letter_codes(&self) -> Vec<char> {
        self.project(self.parent.one_letter_codes())
    }

    pub fn formal_charges(&self) -> Vec<i32> {
        self.project(self.parent.formal_charges())
    }

    pub fn group_serials(&self) -> Vec<usize> {
        self.project(self.parent.group_serials())
    }

    pub fn chain_serials(&self) -> Vec<usize> {
        self.project(self.parent.chain_serials())
    }

    pub fn model_serials(&self) -> Vec<usize> {
        self.project(self.parent.model_serials())
    }

    pub fn polymer_flags(&self) -> Option<Vec<bool>> {
        self.project_opt(self.parent.polymer_flags())
    }

    pub fn entity_indices(&self) -> Option<Vec<Option<usize>>> {
        self.project_opt(self.parent.entity_indices())
    }

    pub fn entity_kinds(&self) -> Option<Vec<EntityKind>> {
        self.project_opt(self.parent.entity_kinds())
    }

    /// Inter-group bonds with both atoms inside the view, in parent atom indices.
    pub fn bonds(&self) -> Result<Vec<Bond>, StructureError> {
        Ok(self
            .parent
            .bonds()?
            .iter()
            .filter(|b| self.mask[b.first] && self.mask[b.second])
            .copied()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DecodeOptions;
    use crate::test_support::counting::CountingCodec;
    use crate::test_support::fixtures::{
        SCENARIO_MODEL_ZERO_ATOMS, small_container, two_model_container,
    };

    fn scenario() -> Structure {
        Structure::from_container(&two_model_container(), &DecodeOptions::default()).unwrap()
    }

    fn masked<T: Clone>(mask: &[bool], values: &[T]) -> Vec<T> {
        values
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(v, _)| v.clone())
            .collect()
    }

    mod consistency {
        use super::*;

        #[test]
        fn chain_view_attributes_are_masked_parent_attributes() {
            let structure = scenario();
            for view in structure.chains().unwrap() {
                let mask = view.mask();
                assert_eq!(mask.len(), structure.atom_count());
                assert_eq!(
                    view.x_coords().unwrap().unwrap(),
                    masked(mask, structure.x_coords().unwrap().unwrap())
                );
                assert_eq!(
                    view.b_factors().unwrap().unwrap(),
                    masked(mask, structure.b_factors().unwrap().unwrap())
                );
                assert_eq!(view.atom_names(), masked(mask, structure.atom_names()));
                assert_eq!(
                    view.group_numbers().unwrap().unwrap(),
                    masked(mask, structure.group_numbers().unwrap().unwrap())
                );
                assert_eq!(
                    view.polymer_flags().unwrap(),
                    masked(mask, structure.polymer_flags().unwrap())
                );
                let names = view.chain_names().unwrap().unwrap();
                assert_eq!(names.len(), view.atom_count());
                assert!(names.iter().all(|n| **n == *view.id().rsplit('.').next().unwrap()));
            }
        }

        #[test]
        fn views_never_decode_on_their_own() {
            let codec = std::sync::Arc::new(CountingCodec::default());
            let structure =
                Structure::with_codec(&two_model_container(), &DecodeOptions::default(), codec.clone())
                    .unwrap();
            let view = structure.chain("A").unwrap();
            let after_selection = codec.decodes();

            let before = view.occupancies().unwrap().unwrap();
            assert_eq!(codec.decodes(), after_selection + 1);
            structure.occupancies().unwrap();
            let after = view.occupancies().unwrap().unwrap();
            assert_eq!(before, after);
            assert_eq!(codec.decodes(), after_selection + 1);

            let again = structure.chain("A").unwrap();
            assert_eq!(again.occupancies().unwrap(), Some(after));
            assert_eq!(codec.decodes(), after_selection + 1);
        }
    }

    mod selection {
        use super::*;

        #[test]
        fn view_ids_describe_the_selection() {
            let structure = scenario();
            assert_eq!(structure.chain("B").unwrap().id(), "1SYN.B");
            assert_eq!(structure.select_chains(&["A", "C"]).unwrap().id(), "1SYN.A,C");
            assert_eq!(structure.model(1).unwrap().id(), "1SYN/1");
            assert_eq!(structure.model(1).unwrap().chain("A").unwrap().id(), "1SYN/1.A");
        }

        #[test]
        fn chain_on_a_model_view_stays_inside_the_model() {
            let structure = scenario();
            let everywhere = structure.chain("A").unwrap();
            assert_eq!(everywhere.chain_indices(), &[0, 2]);
            assert_eq!(everywhere.model_indices(), &[0, 1]);

            let model_one = structure.model(1).unwrap();
            let local = model_one.chain("A").unwrap();
            assert_eq!(local.chain_indices(), &[2]);
            assert_eq!(local.model_count(), 1);
            assert_eq!(local.atom_count(), everywhere.atom_count() / 2);
            assert_eq!(model_one.chain("Z").unwrap().atom_count(), 0);
        }

        #[test]
        fn chains_of_a_model_view_are_that_models_names() {
            let structure = scenario();
            let ids: Vec<String> = structure
                .model(0)
                .unwrap()
                .chains()
                .unwrap()
                .iter()
                .map(|v| v.id().to_string())
                .collect();
            assert_eq!(ids, vec!["1SYN/0.A", "1SYN/0.B"]);
        }

        #[test]
        fn chain_subset_counts_every_selected_chain() {
            let structure = scenario();
            let subset = structure.select_chains(&["B", "C"]).unwrap();
            assert_eq!(subset.kind(), ViewKind::Chains);
            assert_eq!(subset.chain_indices(), &[1, 3, 4]);
            assert_eq!(subset.chain_count(), 3);
            assert_eq!(subset.group_count(), 85 + 85 + 1);
            assert_eq!(subset.atom_count(), 85 + 85 + 1);
            assert_eq!(subset.model_count(), 2);
            assert_eq!(subset.group_indices().len(), subset.group_count());
        }

        #[test]
        fn model_views_cover_their_offset_range() {
            let structure = scenario();
            let model = structure.model(0).unwrap();
            assert_eq!(model.kind(), ViewKind::Model);
            assert_eq!(model.atom_count(), SCENARIO_MODEL_ZERO_ATOMS);
            assert!(model.mask()[..SCENARIO_MODEL_ZERO_ATOMS].iter().all(|&m| m));
            assert!(model.mask()[SCENARIO_MODEL_ZERO_ATOMS..].iter().all(|&m| !m));
            assert!(model.model_serials().iter().all(|&m| m == 0));
        }

        #[test]
        fn bonds_are_limited_to_the_view() {
            let structure = scenario();
            assert_eq!(structure.model(0).unwrap().bonds().unwrap(), vec![Bond::new(2, 8, Some(1))]);
            assert!(structure.chain("B").unwrap().bonds().unwrap().is_empty());
        }

        #[test]
        fn empty_view_has_empty_attributes() {
            let structure =
                Structure::from_container(&small_container(), &DecodeOptions::default()).unwrap();
            let view = structure.chain("Z").unwrap();
            assert_eq!(view.atom_count(), 0);
            assert_eq!(view.group_count(), 0);
            assert_eq!(view.model_count(), 0);
            assert_eq!(view.coords().unwrap(), Some(Vec::new()));
            assert!(view.elements().is_empty());
            assert_eq!(view.entity_kinds(), Some(Vec::new()));
        }
    }
}
