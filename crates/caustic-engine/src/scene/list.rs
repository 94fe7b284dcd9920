use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw stream recorded for one frame.
///
/// - `push()` is O(1)
/// - paint-order iteration sorts lazily into an index buffer that is reused
///   across frames, so a warmed list does not allocate
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });
        self.sorted_dirty = true;
    }

    /// Items back-to-front without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        let items = &self.items;
        // Keys are unique (insertion order is part of them), so unstable is fine.
        self.sorted_indices.sort_unstable_by_key(|&i| items[i].key);

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn dot_x(item: &DrawItem) -> f32 {
        match &item.cmd {
            DrawCmd::Dot(d) => d.center.x,
            other => panic!("expected a dot, got {other:?}"),
        }
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_dot(ZIndex(2), Vec2::new(0.0, 0.0), 1.0, Color::RED);
        list.push_dot(ZIndex(1), Vec2::new(1.0, 0.0), 1.0, Color::RED);
        list.push_dot(ZIndex(2), Vec2::new(2.0, 0.0), 1.0, Color::RED);
        list.push_dot(ZIndex(1), Vec2::new(3.0, 0.0), 1.0, Color::RED);

        let xs: Vec<f32> = list.iter_in_paint_order().map(dot_x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut list = DrawList::new();
        list.push_dot(ZIndex(5), Vec2::new(0.0, 0.0), 1.0, Color::RED);
        list.push_dot(ZIndex(0), Vec2::new(1.0, 0.0), 1.0, Color::RED);
        assert_eq!(dot_x(&list.items()[0]), 0.0);
    }

    #[test]
    fn pushing_after_iteration_resorts() {
        let mut list = DrawList::new();
        list.push_dot(ZIndex(1), Vec2::new(0.0, 0.0), 1.0, Color::RED);
        assert_eq!(list.iter_in_paint_order().count(), 1);

        list.push_dot(ZIndex(0), Vec2::new(9.0, 0.0), 1.0, Color::RED);
        let first = list.iter_in_paint_order().next().map(dot_x);
        assert_eq!(first, Some(9.0));
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.push_dot(ZIndex(0), Vec2::new(0.0, 0.0), 1.0, Color::RED);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter_in_paint_order().count(), 0);

        list.push_dot(ZIndex(0), Vec2::new(0.0, 0.0), 1.0, Color::RED);
        assert_eq!(list.items()[0].key.order, 0);
    }
}
