//! # Tree Mutation Engine
//!
//! Pure operations over the component forest. Each public function takes the
//! current tree by reference and returns a new one; the input is never
//! touched. Targets are found by id anywhere in the forest, through both
//! container `children` and each column's per-column list.
//!
//! Unknown ids leave the tree unchanged.
//!
//! Column nodes may carry fewer child lists than `columnWidths` (for example
//! after widths were edited). Missing lists read as empty and are backfilled
//! before anything is inserted into them.

use crate::patch::ComponentPatch;
use mailcraft_model::{ComponentKind, EmailComponent, IdSource};
use serde::{Deserialize, Serialize};

/// Direction for sibling swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Where a dropped or added component lands: index `index` in the list owned
/// by `parent_id` (column `column_index` when the parent is a column), or in
/// the root forest when `parent_id` is `None`. A missing index appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl DropTarget {
    /// Append to the root forest
    pub fn root() -> Self {
        Self::default()
    }

    pub fn root_at(index: usize) -> Self {
        Self {
            index: Some(index),
            ..Self::default()
        }
    }

    /// Append inside a container
    pub fn inside(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }

    /// Append inside one column of a column layout
    pub fn in_column(parent_id: impl Into<String>, column_index: usize) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            column_index: Some(column_index),
            index: None,
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// A component addressed by id, or by position within one nesting level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentRef {
    Id(String),
    #[serde(rename_all = "camelCase")]
    Index {
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column_index: Option<usize>,
    },
}

impl From<&str> for ComponentRef {
    fn from(id: &str) -> Self {
        ComponentRef::Id(id.to_string())
    }
}

impl From<String> for ComponentRef {
    fn from(id: String) -> Self {
        ComponentRef::Id(id)
    }
}

impl ComponentRef {
    pub fn root_index(index: usize) -> Self {
        ComponentRef::Index {
            index,
            parent_id: None,
            column_index: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find a component anywhere in the forest
pub fn find_component<'a>(tree: &'a [EmailComponent], id: &str) -> Option<&'a EmailComponent> {
    for component in tree {
        if component.id == id {
            return Some(component);
        }
        let found = match &component.kind {
            ComponentKind::Container { children } => find_component(children, id),
            ComponentKind::Column { children, .. } => children
                .iter()
                .find_map(|column| find_component(column, id)),
            _ => None,
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

pub fn contains_component(tree: &[EmailComponent], id: &str) -> bool {
    find_component(tree, id).is_some()
}

fn find_component_mut<'a>(
    tree: &'a mut [EmailComponent],
    id: &str,
) -> Option<&'a mut EmailComponent> {
    for component in tree.iter_mut() {
        if component.id == id {
            return Some(component);
        }
        let found = match &mut component.kind {
            ComponentKind::Container { children } => find_component_mut(children, id),
            ComponentKind::Column { children, .. } => children
                .iter_mut()
                .find_map(|column| find_component_mut(column, id)),
            _ => None,
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

/// The ordered list at one nesting level.
///
/// `None` when the parent is missing or cannot hold children. A column list
/// that was never backfilled reads as empty.
pub fn level<'a>(
    tree: &'a [EmailComponent],
    parent_id: Option<&str>,
    column_index: Option<usize>,
) -> Option<&'a [EmailComponent]> {
    let Some(parent_id) = parent_id else {
        return Some(tree);
    };

    match &find_component(tree, parent_id)?.kind {
        ComponentKind::Container { children } => Some(children),
        ComponentKind::Column { children, .. } => Some(
            children
                .get(column_index.unwrap_or(0))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        ),
        _ => None,
    }
}

/// Resolve a reference to the id it names
pub fn resolve_ref(tree: &[EmailComponent], target: &ComponentRef) -> Option<String> {
    match target {
        ComponentRef::Id(id) => contains_component(tree, id).then(|| id.clone()),
        ComponentRef::Index {
            index,
            parent_id,
            column_index,
        } => level(tree, parent_id.as_deref(), *column_index)?
            .get(*index)
            .map(|component| component.id.clone()),
    }
}

/// True when `id` is `ancestor_id` or lies inside its subtree
pub fn is_within(tree: &[EmailComponent], ancestor_id: &str, id: &str) -> bool {
    find_component(tree, ancestor_id)
        .map(|ancestor| ancestor.id == id || contains_component(std::slice::from_ref(ancestor), id))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Insert `component` at `target`.
///
/// Column parents are backfilled to one list per column width before the
/// insert. A column index past the last width leaves the tree unchanged.
pub fn add_component(
    tree: &[EmailComponent],
    component: EmailComponent,
    target: &DropTarget,
) -> Vec<EmailComponent> {
    let mut next = tree.to_vec();
    insert_at(&mut next, component, target);
    next
}

/// Shallow-merge `patch` into the component with `id`
pub fn update_component(
    tree: &[EmailComponent],
    id: &str,
    patch: &ComponentPatch,
) -> Vec<EmailComponent> {
    let mut next = tree.to_vec();
    if let Some(component) = find_component_mut(&mut next, id) {
        patch.apply_to(component);
    }
    next
}

/// Remove every component with `id`, wherever it is nested
pub fn delete_component(tree: &[EmailComponent], id: &str) -> Vec<EmailComponent> {
    let mut next = tree.to_vec();
    remove_all(&mut next, id);
    next
}

/// Swap the component with its neighbour in its own list.
///
/// Moving the first element up or the last element down does nothing.
pub fn move_component(
    tree: &[EmailComponent],
    id: &str,
    direction: Direction,
) -> Vec<EmailComponent> {
    let mut next = tree.to_vec();
    with_sibling_list(&mut next, id, &mut |siblings: &mut Vec<EmailComponent>, position: usize| {
        let neighbour = match direction {
            Direction::Up => position.checked_sub(1),
            Direction::Down => Some(position + 1).filter(|&n| n < siblings.len()),
        };
        if let Some(neighbour) = neighbour {
            siblings.swap(position, neighbour);
        }
    });
    next
}

/// Deep-clone the component directly after itself.
///
/// Every node in the copy gets a fresh id from `ids`.
pub fn duplicate_component(
    tree: &[EmailComponent],
    id: &str,
    ids: &mut dyn IdSource,
) -> Vec<EmailComponent> {
    let mut next = tree.to_vec();
    with_sibling_list(&mut next, id, &mut |siblings: &mut Vec<EmailComponent>, position: usize| {
        let mut copy = siblings[position].clone();
        refresh_ids(&mut copy, ids);
        siblings.insert(position + 1, copy);
    });
    next
}

/// Move an existing component to `target`.
///
/// The target index is read against the tree with the component already
/// removed. Targets inside the component's own subtree are ignored.
pub fn relocate_component(
    tree: &[EmailComponent],
    id: &str,
    target: &DropTarget,
) -> Vec<EmailComponent> {
    if let Some(parent_id) = target.parent_id.as_deref() {
        if is_within(tree, id, parent_id) || !contains_component(tree, parent_id) {
            return tree.to_vec();
        }
    }

    let mut next = tree.to_vec();
    let Some(component) = take_first(&mut next, id) else {
        return next;
    };
    if insert_at(&mut next, component, target) {
        next
    } else {
        tree.to_vec()
    }
}

/// Assign fresh ids to `component` and all of its descendants
pub fn refresh_ids(component: &mut EmailComponent, ids: &mut dyn IdSource) {
    component.id = ids.new_id();
    match &mut component.kind {
        ComponentKind::Container { children } => {
            for child in children {
                refresh_ids(child, ids);
            }
        }
        ComponentKind::Column { children, .. } => {
            for child in children.iter_mut().flatten() {
                refresh_ids(child, ids);
            }
        }
        _ => {}
    }
}

/// Grow a column's child lists to `needed` entries
pub(crate) fn backfill_columns(children: &mut Vec<Vec<EmailComponent>>, needed: usize) {
    if children.len() < needed {
        children.resize_with(needed, Vec::new);
    }
}

// ---------------------------------------------------------------------------
// In-place helpers
// ---------------------------------------------------------------------------

fn insert_at(tree: &mut Vec<EmailComponent>, component: EmailComponent, target: &DropTarget) -> bool {
    let list = match target.parent_id.as_deref() {
        None => tree,
        Some(parent_id) => {
            let Some(parent) = find_component_mut(tree, parent_id) else {
                return false;
            };
            match &mut parent.kind {
                ComponentKind::Container { children } => children,
                ComponentKind::Column {
                    column_widths,
                    children,
                } => {
                    let column = target.column_index.unwrap_or(0);
                    if column >= column_widths.len() {
                        return false;
                    }
                    backfill_columns(children, column_widths.len());
                    &mut children[column]
                }
                _ => return false,
            }
        }
    };

    let index = target.index.unwrap_or(list.len()).min(list.len());
    list.insert(index, component);
    true
}

fn child_lists_mut(component: &mut EmailComponent) -> Vec<&mut Vec<EmailComponent>> {
    match &mut component.kind {
        ComponentKind::Container { children } => vec![children],
        ComponentKind::Column { children, .. } => children.iter_mut().collect(),
        _ => Vec::new(),
    }
}

/// Run `f` on the list that directly holds `id`, with its position
fn with_sibling_list<R>(
    list: &mut Vec<EmailComponent>,
    id: &str,
    f: &mut impl FnMut(&mut Vec<EmailComponent>, usize) -> R,
) -> Option<R> {
    if let Some(position) = list.iter().position(|component| component.id == id) {
        return Some(f(list, position));
    }

    for component in list.iter_mut() {
        for children in child_lists_mut(component) {
            if let Some(result) = with_sibling_list(children, id, f) {
                return Some(result);
            }
        }
    }
    None
}

fn remove_all(list: &mut Vec<EmailComponent>, id: &str) {
    list.retain(|component| component.id != id);
    for component in list.iter_mut() {
        for children in child_lists_mut(component) {
            remove_all(children, id);
        }
    }
}

fn take_first(list: &mut Vec<EmailComponent>, id: &str) -> Option<EmailComponent> {
    with_sibling_list(list, id, &mut |siblings: &mut Vec<EmailComponent>, position: usize| {
        siblings.remove(position)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcraft_model::SequentialIds;
    use pretty_assertions::assert_eq;

    fn text(id: &str) -> EmailComponent {
        EmailComponent::new(
            id,
            ComponentKind::Text {
                content: id.to_string(),
            },
        )
    }

    fn container(id: &str, children: Vec<EmailComponent>) -> EmailComponent {
        EmailComponent::new(id, ComponentKind::Container { children })
    }

    fn columns(id: &str, children: Vec<Vec<EmailComponent>>) -> EmailComponent {
        EmailComponent::new(
            id,
            ComponentKind::Column {
                column_widths: vec!["50%".to_string(), "50%".to_string()],
                children,
            },
        )
    }

    fn ids(tree: &[EmailComponent]) -> Vec<&str> {
        tree.iter().map(|c| c.id.as_str()).collect()
    }

    fn column_lists(component: &EmailComponent) -> &Vec<Vec<EmailComponent>> {
        match &component.kind {
            ComponentKind::Column { children, .. } => children,
            other => panic!("Expected column, got {:?}", other),
        }
    }

    #[test]
    fn test_find_inside_column_inside_container() {
        let tree = vec![container(
            "box",
            vec![columns("cols", vec![vec![], vec![text("deep")]])],
        )];

        assert_eq!(find_component(&tree, "deep").map(|c| c.id.as_str()), Some("deep"));
        assert!(find_component(&tree, "missing").is_none());
    }

    #[test]
    fn test_add_to_root_at_index() {
        let tree = vec![text("a"), text("b")];
        let next = add_component(&tree, text("new"), &DropTarget::root_at(1));

        assert_eq!(ids(&next), vec!["a", "new", "b"]);
        assert_eq!(ids(&tree), vec!["a", "b"]);
    }

    #[test]
    fn test_add_clamps_index() {
        let tree = vec![text("a")];
        let next = add_component(&tree, text("new"), &DropTarget::root_at(99));
        assert_eq!(ids(&next), vec!["a", "new"]);
    }

    #[test]
    fn test_add_into_column_backfills() {
        let tree = vec![columns("cols", vec![])];
        let next = add_component(&tree, text("x"), &DropTarget::in_column("cols", 1));

        let lists = column_lists(&next[0]);
        assert_eq!(lists.len(), 2);
        assert!(lists[0].is_empty());
        assert_eq!(ids(&lists[1]), vec!["x"]);
    }

    #[test]
    fn test_add_past_last_column_is_noop() {
        let tree = vec![columns("cols", vec![vec![], vec![]])];

        let next = add_component(&tree, text("x"), &DropTarget::in_column("cols", 2));
        assert_eq!(next, tree);

        let next = add_component(&tree, text("x"), &DropTarget::in_column("cols", usize::MAX));
        assert_eq!(next, tree);
    }

    #[test]
    fn test_relocate_past_last_column_keeps_node() {
        let tree = vec![text("a"), columns("cols", vec![vec![], vec![]])];
        let next = relocate_component(&tree, "a", &DropTarget::in_column("cols", 5));
        assert_eq!(next, tree);
    }

    #[test]
    fn test_add_into_leaf_is_noop() {
        let tree = vec![text("a")];
        let next = add_component(&tree, text("x"), &DropTarget::inside("a"));
        assert_eq!(next, tree);
    }

    #[test]
    fn test_delete_nested() {
        let tree = vec![
            text("a"),
            container("box", vec![text("b"), columns("cols", vec![vec![text("c")], vec![text("d")]])]),
        ];
        let next = delete_component(&tree, "c");

        let expected = vec![
            text("a"),
            container("box", vec![text("b"), columns("cols", vec![vec![], vec![text("d")]])]),
        ];
        assert_eq!(next, expected);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let tree = vec![text("a"), container("box", vec![text("b")])];
        assert_eq!(delete_component(&tree, "zzz"), tree);
    }

    #[test]
    fn test_move_within_container() {
        let tree = vec![container("box", vec![text("a"), text("b"), text("c")])];

        let next = move_component(&tree, "c", Direction::Up);
        match &next[0].kind {
            ComponentKind::Container { children } => assert_eq!(ids(children), vec!["a", "c", "b"]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let tree = vec![text("a"), text("b")];
        assert_eq!(move_component(&tree, "a", Direction::Up), tree);
        assert_eq!(move_component(&tree, "b", Direction::Down), tree);
    }

    #[test]
    fn test_duplicate_inserts_adjacent_with_fresh_ids() {
        let tree = vec![
            container("box", vec![text("inner")]),
            text("tail"),
        ];
        let mut gen = SequentialIds::new("dup");
        let next = duplicate_component(&tree, "box", &mut gen);

        assert_eq!(ids(&next), vec!["box", "dup-1", "tail"]);
        match &next[1].kind {
            ComponentKind::Container { children } => assert_eq!(ids(children), vec!["dup-2"]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_relocate_into_column() {
        let tree = vec![text("a"), columns("cols", vec![vec![], vec![]])];
        let next = relocate_component(&tree, "a", &DropTarget::in_column("cols", 1).at(0));

        assert_eq!(ids(&next), vec!["cols"]);
        assert_eq!(ids(&column_lists(&next[0])[1]), vec!["a"]);
    }

    #[test]
    fn test_relocate_into_own_subtree_is_noop() {
        let tree = vec![container("outer", vec![container("inner", vec![])])];
        let next = relocate_component(&tree, "outer", &DropTarget::inside("inner"));
        assert_eq!(next, tree);
    }

    #[test]
    fn test_level_reads_short_column_as_empty() {
        let tree = vec![columns("cols", vec![vec![text("a")]])];
        assert_eq!(level(&tree, Some("cols"), Some(1)).map(<[_]>::len), Some(0));
        assert!(level(&tree, Some("nope"), None).is_none());
    }

    #[test]
    fn test_resolve_index_ref() {
        let tree = vec![columns("cols", vec![vec![], vec![text("x"), text("y")]])];
        let target = ComponentRef::Index {
            index: 1,
            parent_id: Some("cols".to_string()),
            column_index: Some(1),
        };
        assert_eq!(resolve_ref(&tree, &target).as_deref(), Some("y"));
        assert_eq!(resolve_ref(&tree, &ComponentRef::root_index(3)), None);
    }
}
