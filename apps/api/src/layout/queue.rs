//! Print queue: expands `(image, quantity)` items into one entry per physical copy.

/// A source image plus how many copies of it should be printed.
///
/// `item_ref` is opaque to the layout engine: it can be an upload id, a URL or
/// a data URI. The engine only clones it into the placements it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem<R> {
    pub item_ref: R,
    pub quantity: u32,
}

impl<R> LayoutItem<R> {
    pub fn new(item_ref: R, quantity: u32) -> Self {
        Self { item_ref, quantity }
    }
}

/// Flattened, order-preserving sequence of copies to place.
///
/// Order matters: it decides left-to-right, top-to-bottom fill order and
/// therefore which copies share a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintQueue<R> {
    entries: Vec<R>,
}

impl<R: Clone> PrintQueue<R> {
    /// Expands each item into `quantity` consecutive entries.
    ///
    /// An item with `quantity == 0` contributes nothing.
    pub fn from_items(items: &[LayoutItem<R>]) -> Self {
        let total: usize = items.iter().map(|item| item.quantity as usize).sum();
        let mut entries = Vec::with_capacity(total);
        for item in items {
            entries.extend(std::iter::repeat(item.item_ref.clone()).take(item.quantity as usize));
        }
        Self { entries }
    }
}

impl<R> PrintQueue<R> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn into_entries(self) -> Vec<R> {
        self.entries
    }
}
