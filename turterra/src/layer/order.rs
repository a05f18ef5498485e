//! Draw order enforcement.
//!
//! Layers are stacked by category: countries at the bottom, then the range fill, the range
//! outline, all sub-regions and finally the occurrence points. Within the country and the
//! sub-region categories the relative order is kept as is.

use crate::engine::MapEngine;
use crate::layer::LayerId;

/// Restacks managed layers of the engine into the draw order.
///
/// Every layer is moved to the top in category order, so after the call the managed layers are
/// above any layer the engine had on its own (base map style layers) and sorted among
/// themselves. Missing singleton layers are skipped. Calling this twice in a row gives the same
/// stack as calling it once.
pub fn ensure_layer_order<E: MapEngine + ?Sized>(engine: &mut E) {
    let ordered = draw_order(&engine.layer_ids());
    for id in &ordered {
        engine.move_layer(id);
    }

    log::trace!("Layer order enforced for {} layers", ordered.len());
}

/// Returns the given layers sorted into the draw order, bottom first. The sort is stable, so
/// layers of the same category keep their relative order.
pub fn draw_order(ids: &[LayerId]) -> Vec<LayerId> {
    let mut ordered = ids.to_vec();
    ordered.sort_by_key(LayerId::category);
    ordered
}

/// Returns true if the layers (bottom first) satisfy the draw order.
pub fn is_ordered(ids: &[LayerId]) -> bool {
    ids.windows(2)
        .all(|pair| pair[0].category() <= pair[1].category())
}
