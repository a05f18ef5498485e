use crate::layer::{LayerId, LayerPosition, LayerSpec, Paint};

/// Ordered collection of layers, bottom first.
///
/// The renderer draws layers in the order they are stored in the stack, so the last layer ends
/// up on top. Layers are addressed by their [`LayerId`], which is unique within the stack.
///
/// ```no_run
/// use turterra::engine::LayerStack;
/// use turterra::layer::{LayerId, LayerPosition, LayerSpec, Paint};
/// use turterra::Color;
///
/// let paint = Paint::Line { color: Color::BLACK, width: 1.0 };
/// let mut stack = LayerStack::default();
/// stack.insert(LayerSpec::new(LayerId::RangeFill, paint), LayerPosition::Top);
/// stack.insert(LayerSpec::new(LayerId::Occurrences, paint), LayerPosition::Top);
/// stack.move_to_top(&LayerId::RangeFill);
///
/// assert_eq!(stack.ids(), vec![LayerId::Occurrences, LayerId::RangeFill]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct LayerStack(Vec<LayerSpec>);

impl LayerStack {
    /// Number of layers in the stack.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the stack has no layers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of the layer counting from the bottom.
    pub fn position(&self, id: &LayerId) -> Option<usize> {
        self.0.iter().position(|layer| &layer.id == id)
    }

    /// Returns true if the layer is in the stack.
    pub fn contains(&self, id: &LayerId) -> bool {
        self.position(id).is_some()
    }

    /// Inserts a layer at the given position and returns true, or returns false without changing
    /// anything if a layer with the same id is already in the stack.
    ///
    /// [`LayerPosition::Above`] a layer that is not in the stack inserts the layer on top.
    pub fn insert(&mut self, spec: LayerSpec, position: LayerPosition) -> bool {
        if self.contains(&spec.id) {
            return false;
        }

        let index = match position {
            LayerPosition::Top => self.0.len(),
            LayerPosition::Above(anchor) => self
                .position(&anchor)
                .map(|index| index + 1)
                .unwrap_or(self.0.len()),
        };

        self.0.insert(index, spec);
        true
    }

    /// Removes a layer from the stack and returns it.
    pub fn remove(&mut self, id: &LayerId) -> Option<LayerSpec> {
        let index = self.position(id)?;
        Some(self.0.remove(index))
    }

    /// Moves a layer to the top of the stack. Returns false if the layer is not in the stack.
    pub fn move_to_top(&mut self, id: &LayerId) -> bool {
        match self.position(id) {
            Some(index) => {
                let layer = self.0.remove(index);
                self.0.push(layer);
                true
            }
            None => false,
        }
    }

    /// Returns the layer with the given id.
    pub fn get(&self, id: &LayerId) -> Option<&LayerSpec> {
        self.0.iter().find(|layer| &layer.id == id)
    }

    /// Returns mutable paint of the layer with the given id.
    pub fn paint_mut(&mut self, id: &LayerId) -> Option<&mut Paint> {
        self.0
            .iter_mut()
            .find(|layer| &layer.id == id)
            .map(|layer| &mut layer.paint)
    }

    /// Iterates over layers, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &LayerSpec> + '_ {
        self.0.iter()
    }

    /// Layer ids, bottom first.
    pub fn ids(&self) -> Vec<LayerId> {
        self.iter().map(|spec| spec.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn spec(id: LayerId) -> LayerSpec {
        LayerSpec::new(
            id,
            Paint::Line {
                color: Color::BLACK,
                width: 1.0,
            },
        )
    }

    fn country(slug: &str) -> LayerId {
        LayerId::Country(turterra_types::normalize(slug))
    }

    #[test]
    fn insert_above() {
        let mut stack = LayerStack::default();
        assert!(stack.insert(spec(country("a")), LayerPosition::Top));
        assert!(stack.insert(spec(country("b")), LayerPosition::Top));
        assert!(stack.insert(spec(LayerId::RangeFill), LayerPosition::Above(country("a"))));

        assert_eq!(
            stack.ids(),
            vec![country("a"), LayerId::RangeFill, country("b")]
        );
    }

    #[test]
    fn insert_above_missing_goes_on_top() {
        let mut stack = LayerStack::default();
        stack.insert(spec(country("a")), LayerPosition::Top);
        stack.insert(spec(LayerId::Occurrences), LayerPosition::Above(country("zzz")));

        assert_eq!(stack.ids(), vec![country("a"), LayerId::Occurrences]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut stack = LayerStack::default();
        assert!(stack.insert(spec(country("a")), LayerPosition::Top));
        assert!(!stack.insert(spec(country("a")), LayerPosition::Top));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn remove_and_move() {
        let mut stack = LayerStack::default();
        stack.insert(spec(country("a")), LayerPosition::Top);
        stack.insert(spec(country("b")), LayerPosition::Top);
        stack.insert(spec(country("c")), LayerPosition::Top);

        assert!(stack.move_to_top(&country("a")));
        assert!(!stack.move_to_top(&country("x")));
        assert_eq!(stack.ids(), vec![country("b"), country("c"), country("a")]);

        assert!(stack.remove(&country("c")).is_some());
        assert!(stack.remove(&country("c")).is_none());
        assert_eq!(stack.ids(), vec![country("b"), country("a")]);
        assert!(!stack.is_empty());
    }
}
