//! Dimension combination enumeration.

use crate::content::repository::DimensionDefinition;
use crate::types::DimensionCombination;

/// Source of the dimension combinations a search runs over.
///
/// An empty result means "search the default combination only".
pub trait DimensionEnumerator: Send + Sync {
    fn all_combinations(&self) -> Vec<DimensionCombination>;
}

/// Cartesian product of configured dimension presets.
///
/// Dimensions vary in declaration order with the last dimension varying
/// fastest; presets keep their declaration order.
pub struct PresetDimensionCombinator {
    dimensions: Vec<DimensionDefinition>,
}

impl PresetDimensionCombinator {
    pub fn new(dimensions: &[DimensionDefinition]) -> Self {
        Self {
            dimensions: dimensions.to_vec(),
        }
    }
}

impl DimensionEnumerator for PresetDimensionCombinator {
    fn all_combinations(&self) -> Vec<DimensionCombination> {
        if self.dimensions.is_empty() {
            return Vec::new();
        }
        let mut combinations = vec![DimensionCombination::new()];
        for dimension in &self.dimensions {
            combinations = combinations
                .iter()
                .flat_map(|base| {
                    dimension
                        .presets
                        .iter()
                        .map(move |preset| base.clone().with(dimension.name.clone(), preset.value.clone()))
                })
                .collect();
        }
        combinations
    }
}

/// Fixed list of combinations
#[derive(Debug, Clone, Default)]
pub struct StaticDimensions(pub Vec<DimensionCombination>);

impl DimensionEnumerator for StaticDimensions {
    fn all_combinations(&self) -> Vec<DimensionCombination> {
        self.0.clone()
    }
}

/// Combinations to search: the enumerator's, or the default combination alone.
pub fn combinations_to_search(enumerator: &dyn DimensionEnumerator) -> Vec<DimensionCombination> {
    let combinations = enumerator.all_combinations();
    if combinations.is_empty() {
        vec![DimensionCombination::default()]
    } else {
        combinations
    }
}
