/// Layer of a draw item. Higher values paint over lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

/// Paint-order key: `z` ascending, then insertion `order` ascending.
///
/// Field order matters; the derived `Ord` compares `z` first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_insertion_order() {
        let back_late = SortKey::new(ZIndex(0), 10);
        let front_early = SortKey::new(ZIndex(1), 0);
        assert!(back_late < front_early);
    }

    #[test]
    fn equal_z_keeps_insertion_order() {
        assert!(SortKey::new(ZIndex(3), 1) < SortKey::new(ZIndex(3), 2));
    }

    #[test]
    fn negative_layers_sort_first() {
        assert!(ZIndex(-1) < ZIndex::default());
    }
}
