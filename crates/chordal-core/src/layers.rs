use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const MAX_LAYERS: u8 = 32;

/// Set of layer ids, one bit per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const EMPTY: LayerMask = LayerMask(0);

    pub fn from_layers(layers: &[u8]) -> Result<Self, ConfigError> {
        let mut mask = Self::EMPTY;
        for &layer in layers {
            mask.insert(layer)?;
        }
        Ok(mask)
    }

    pub fn insert(&mut self, layer: u8) -> Result<(), ConfigError> {
        if layer >= MAX_LAYERS {
            return Err(ConfigError::LayerOutOfRange(layer));
        }
        self.0 |= 1 << layer;
        Ok(())
    }

    pub fn contains(self, layer: u8) -> bool {
        layer < MAX_LAYERS && self.0 & (1 << layer) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..MAX_LAYERS).filter(move |l| self.contains(*l))
    }
}

/// Answers "is this layer currently active", owned by the host.
pub trait LayerOracle {
    fn is_layer_active(&self, layer: u8) -> bool;
}

/// A mask read as the set of currently active layers.
impl LayerOracle for LayerMask {
    fn is_layer_active(&self, layer: u8) -> bool {
        self.contains(layer)
    }
}

impl<F> LayerOracle for F
where
    F: Fn(u8) -> bool,
{
    fn is_layer_active(&self, layer: u8) -> bool {
        self(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_membership() {
        let mask = LayerMask::from_layers(&[1, 3, 31]).unwrap();
        assert_eq!(mask.0, (1 << 1) | (1 << 3) | (1 << 31));
        assert!(mask.contains(3));
        assert!(!mask.contains(0));
        assert!(!mask.contains(40));
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![1, 3, 31]);
    }

    #[test]
    fn test_out_of_range_layer() {
        assert_eq!(
            LayerMask::from_layers(&[2, 32]),
            Err(ConfigError::LayerOutOfRange(32))
        );
    }

    #[test]
    fn test_closure_oracle() {
        let active = 2u8;
        let oracle = move |layer: u8| layer == active;
        assert!(oracle.is_layer_active(2));
        assert!(!oracle.is_layer_active(1));
        assert!(LayerMask::EMPTY.iter().next().is_none());
    }
}
