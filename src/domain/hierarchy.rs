//! Reconstructs the tag tree from flat, path-encoded tag names.

use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::tag::{Tag, TagCount, TagPath};

/// Builds the tag tree from flat `(path, count)` rows.
///
/// Rows with a zero count are dropped entirely, so they never appear even
/// as intermediate nodes. A row whose parent path did not survive becomes a
/// root of its own. Rows sharing a path are merged and their counts summed.
/// Roots and every children list are ordered by display name using the
/// root locale's collation at secondary strength, so accents count but case
/// does not. Full paths break ties.
pub fn build_tag_tree(flat: impl IntoIterator<Item = TagCount>) -> Vec<Tag> {
    let mut counts: BTreeMap<TagPath, u32> = BTreeMap::new();
    for row in flat.into_iter().filter(|row| row.note_count > 0) {
        *counts.entry(row.path).or_default() += row.note_count;
    }

    let mut children_of: HashMap<TagPath, Vec<TagPath>> = HashMap::new();
    let mut roots: Vec<TagPath> = Vec::new();

    for path in counts.keys() {
        match path.parent().filter(|parent| counts.contains_key(parent)) {
            Some(parent) => children_of.entry(parent).or_default().push(path.clone()),
            None => roots.push(path.clone()),
        }
    }

    let order = TagOrder::new();
    let mut tree: Vec<Tag> = roots
        .into_iter()
        .map(|path| assemble(path, &counts, &mut children_of, &order))
        .collect();
    tree.sort_by(|a, b| order.compare(a, b));
    tree
}

fn assemble(
    path: TagPath,
    counts: &BTreeMap<TagPath, u32>,
    children_of: &mut HashMap<TagPath, Vec<TagPath>>,
    order: &TagOrder,
) -> Tag {
    let count = counts.get(&path).copied().unwrap_or_default();
    let child_paths = children_of.remove(&path).unwrap_or_default();

    let mut node = Tag::new(path, count);
    let children = node.children_mut();
    for child in child_paths {
        children.push(assemble(child, counts, children_of, order));
    }
    children.sort_by(|a, b| order.compare(a, b));
    node
}

/// Sibling ordering for tag nodes.
struct TagOrder {
    /// `None` only if the compiled collation data fails to load, in which
    /// case names compare by lowercase code points.
    collator: Option<Collator>,
}

impl TagOrder {
    fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        Self {
            collator: Collator::try_new(&Default::default(), options).ok(),
        }
    }

    fn compare(&self, a: &Tag, b: &Tag) -> Ordering {
        let by_name = match &self.collator {
            Some(collator) => collator.compare(a.display_name(), b.display_name()),
            None => a
                .display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase()),
        };
        by_name.then_with(|| a.full_path().cmp(b.full_path()))
    }
}
