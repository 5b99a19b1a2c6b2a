use crate::models::InteractionKind;
use std::collections::HashMap;

/// Interest-confidence band for one interaction kind. The effective
/// weight is the band midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBand {
    pub low: f64,
    pub high: f64,
}

impl WeightBand {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Maps interaction kinds to interest weights. Immutable after
/// construction; a kind without a band weighs 0.0.
#[derive(Debug, Clone)]
pub struct WeightTable {
    bands: HashMap<InteractionKind, WeightBand>,
}

impl Default for WeightTable {
    fn default() -> Self {
        let bands = HashMap::from([
            (InteractionKind::Purchase, WeightBand::new(0.95, 1.0)),
            (InteractionKind::Cart, WeightBand::new(0.70, 0.85)),
            (InteractionKind::Like, WeightBand::new(0.50, 0.65)),
            (InteractionKind::View, WeightBand::new(0.30, 0.45)),
            (InteractionKind::Skip, WeightBand::new(0.00, 0.15)),
        ]);
        Self { bands }
    }
}

impl WeightTable {
    pub fn new(bands: HashMap<InteractionKind, WeightBand>) -> Self {
        Self { bands }
    }

    /// Interest weight for a kind: band midpoint, or 0.0 when the table
    /// carries no band for it.
    pub fn weight(&self, kind: InteractionKind) -> f64 {
        self.bands.get(&kind).map(WeightBand::midpoint).unwrap_or(0.0)
    }

    /// Kind → effective weight, for every kind in the table.
    pub fn all_weights(&self) -> HashMap<InteractionKind, f64> {
        self.bands
            .iter()
            .map(|(kind, band)| (*kind, band.midpoint()))
            .collect()
    }
}
