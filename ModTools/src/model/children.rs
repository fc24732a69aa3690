//! Typed child collections
//!
//! [`Children`] is the surface mod code uses to patch loaded game data:
//! find a node, filter, merge a second file into the first by key, and so on.
//! Every insertion re-checks that the node's kind is allowed here.

use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;

use super::node::Node;
use super::schema::Schema;
use crate::error::{Error, Result};

/// An ordered sequence of nodes restricted to a fixed set of kinds.
#[derive(Debug, Clone)]
pub struct Children {
    owner: String,
    allowed: Vec<Arc<Schema>>,
    items: Vec<Node>,
}

impl PartialEq for Children {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Children {
    /// An empty collection. `owner` names the container in error messages.
    #[must_use]
    pub fn new(owner: impl Into<String>, allowed: &[Arc<Schema>]) -> Self {
        Children {
            owner: owner.into(),
            allowed: allowed.to_vec(),
            items: Vec::new(),
        }
    }

    /// The kinds this collection accepts.
    #[must_use]
    pub fn allowed(&self) -> &[Arc<Schema>] {
        &self.allowed
    }

    #[must_use]
    pub fn allows(&self, schema: &Schema) -> bool {
        self.allowed.iter().any(|s| **s == *schema)
    }

    /// Fail with every offending kind, not just the first.
    fn check<'a>(&self, nodes: impl IntoIterator<Item = &'a Node>) -> Result<()> {
        let mut kinds: Vec<String> = Vec::new();
        for node in nodes {
            if !self.allows(node.schema()) && !kinds.iter().any(|k| k == node.id()) {
                kinds.push(node.id().to_string());
            }
        }
        if kinds.is_empty() {
            Ok(())
        } else {
            Err(Error::DisallowedChildren {
                parent: self.owner.clone(),
                kinds,
            })
        }
    }

    /// Append one node.
    pub fn push(&mut self, node: Node) -> Result<()> {
        self.check([&node])?;
        self.items.push(node);
        Ok(())
    }

    /// Append several nodes. Nothing is added if any node is rejected.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) -> Result<()> {
        let nodes: Vec<Node> = nodes.into_iter().collect();
        self.check(&nodes)?;
        self.items.extend(nodes);
        Ok(())
    }

    /// Insert at `index`, shifting later nodes. An index past the end appends.
    pub fn insert(&mut self, index: usize, node: Node) -> Result<()> {
        self.check([&node])?;
        let index = index.min(self.items.len());
        self.items.insert(index, node);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }

    /// First node matching `pred`, or `None`.
    pub fn find<P>(&self, mut pred: P) -> Option<&Node>
    where
        P: FnMut(&Node) -> bool,
    {
        self.items.iter().find(|n| pred(n))
    }

    pub fn find_mut<P>(&mut self, mut pred: P) -> Option<&mut Node>
    where
        P: FnMut(&Node) -> bool,
    {
        self.items.iter_mut().find(|n| pred(n))
    }

    /// All nodes matching `pred`, in order.
    pub fn findall<P>(&self, mut pred: P) -> Vec<&Node>
    where
        P: FnMut(&Node) -> bool,
    {
        self.items.iter().filter(|n| pred(n)).collect()
    }

    /// Lazily iterate the nodes matching `pred`.
    pub fn finditer<'a, P>(&'a self, mut pred: P) -> impl Iterator<Item = &'a Node> + 'a
    where
        P: FnMut(&Node) -> bool + 'a,
    {
        self.items.iter().filter(move |n| pred(n))
    }

    /// Keep only the nodes matching `pred`.
    pub fn keepall<P>(&mut self, mut pred: P)
    where
        P: FnMut(&Node) -> bool,
    {
        self.items.retain(|n| pred(n));
    }

    /// Drop the nodes matching `pred`. Returns how many were removed.
    pub fn removeall<P>(&mut self, mut pred: P) -> usize
    where
        P: FnMut(&Node) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|n| !pred(n));
        before - self.items.len()
    }

    /// Deduplicate by `key`. For each key the last node wins and takes the
    /// position where that key was first seen.
    pub fn unique<K, F>(&mut self, key: F)
    where
        K: Hash + Eq,
        F: FnMut(&Node) -> K,
    {
        let items = std::mem::take(&mut self.items);
        self.items = dedupe_last_wins(items, key);
    }

    /// Upsert `incoming` by `key`.
    ///
    /// A node whose key matches an existing node replaces it in place;
    /// unmatched nodes are appended. Collisions resolve last-wins, including
    /// collisions inside `incoming` itself.
    pub fn update<K, F>(&mut self, incoming: impl IntoIterator<Item = Node>, key: F) -> Result<()>
    where
        K: Hash + Eq,
        F: FnMut(&Node) -> K,
    {
        let incoming: Vec<Node> = incoming.into_iter().collect();
        self.check(&incoming)?;

        let before = self.items.len();
        let mut items = std::mem::take(&mut self.items);
        let added = incoming.len();
        items.extend(incoming);
        self.items = dedupe_last_wins(items, key);

        tracing::debug!(
            "Merged {} nodes into '{}': {} -> {}",
            added,
            self.owner,
            before,
            self.items.len()
        );
        Ok(())
    }

    /// Stable in-place sort by key.
    pub fn sort_by_key<K, F>(&mut self, key: F)
    where
        K: Ord,
        F: FnMut(&Node) -> K,
    {
        self.items.sort_by_key(key);
    }

    /// Stable in-place sort by comparator.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Node, &Node) -> std::cmp::Ordering,
    {
        self.items.sort_by(compare);
    }

    /// Shallow copy restricted to the nodes matching `pred`.
    #[must_use]
    pub fn filtered<P>(&self, mut pred: P) -> Self
    where
        P: FnMut(&Node) -> bool,
    {
        Children {
            owner: self.owner.clone(),
            allowed: self.allowed.clone(),
            items: self.items.iter().filter(|n| pred(n)).cloned().collect(),
        }
    }

    /// Consume into the plain node list.
    #[must_use]
    pub fn into_vec(self) -> Vec<Node> {
        self.items
    }
}

/// Key function selecting a node's schema key value, for [`Children::unique`]
/// and [`Children::update`].
#[must_use]
pub fn by_key(node: &Node) -> Option<String> {
    node.key_value().map(str::to_string)
}

fn dedupe_last_wins<K, F>(items: Vec<Node>, mut key: F) -> Vec<Node>
where
    K: Hash + Eq,
    F: FnMut(&Node) -> K,
{
    let mut by_key: IndexMap<K, Node> = IndexMap::with_capacity(items.len());
    for node in items {
        by_key.insert(key(&node), node);
    }
    by_key.into_values().collect()
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Children {
    type Item = &'a mut Node;
    type IntoIter = std::slice::IterMut<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl IntoIterator for Children {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::DataType;
    use pretty_assertions::assert_eq;

    fn item_schema() -> Arc<Schema> {
        Schema::builder("Item")
            .key("Key", DataType::Int32)
            .attribute("Value", DataType::LSString)
            .build()
    }

    fn item(schema: &Arc<Schema>, key: i32, value: &str) -> Node {
        Node::builder(schema)
            .attr("Key", key)
            .attr("Value", value)
            .build()
            .unwrap()
    }

    fn key_of(node: &Node) -> Option<String> {
        node.str_value("Key").map(str::to_string)
    }

    fn values(children: &Children) -> Vec<String> {
        children
            .iter()
            .map(|n| format!("{}={}", n.str_value("Key").unwrap(), n.str_value("Value").unwrap()))
            .collect()
    }

    #[test]
    fn test_extend_reports_every_offending_kind() {
        let schema = item_schema();
        let other = Schema::builder("Other").build();
        let third = Schema::builder("Third").build();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);

        let nodes = vec![
            item(&schema, 1, "ok"),
            Node::builder(&other).build().unwrap(),
            Node::builder(&third).build().unwrap(),
            Node::builder(&other).build().unwrap(),
        ];
        let err = children.extend(nodes).unwrap_err();
        match err {
            Error::DisallowedChildren { parent, kinds } => {
                assert_eq!(parent, "root");
                assert_eq!(kinds, vec!["Other".to_string(), "Third".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(children.is_empty());
    }

    #[test]
    fn test_find_and_filters() {
        let schema = item_schema();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        children
            .extend((1..=5).map(|i| item(&schema, i, if i % 2 == 0 { "even" } else { "odd" })))
            .unwrap();

        assert!(children.find(|n| n.str_value("Key") == Some("9")).is_none());
        assert_eq!(children.find(|n| n.str_value("Value") == Some("even")).unwrap().str_value("Key"), Some("2"));
        assert_eq!(children.findall(|n| n.str_value("Value") == Some("odd")).len(), 3);
        assert_eq!(children.finditer(|n| n.str_value("Value") == Some("even")).count(), 2);

        let odd = children.filtered(|n| n.str_value("Value") == Some("odd"));
        assert_eq!(odd.len(), 3);
        assert_eq!(children.len(), 5);

        assert_eq!(children.removeall(|n| n.str_value("Value") == Some("odd")), 3);
        assert_eq!(values(&children), ["2=even", "4=even"]);

        children.keepall(|n| n.str_value("Key") == Some("4"));
        assert_eq!(values(&children), ["4=even"]);
    }

    #[test]
    fn test_findall_with_borrowing_predicate() {
        let schema = item_schema();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        children
            .extend([item(&schema, 1, "a"), item(&schema, 2, "b"), item(&schema, 3, "a")])
            .unwrap();

        let wanted = String::from("a");
        let found = children.findall(|n| n.str_value("Value") == Some(wanted.as_str()));
        let keys: Vec<_> = found.iter().filter_map(|n| n.str_value("Key")).collect();
        assert_eq!(keys, ["1", "3"]);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let schema = item_schema();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        children.extend([item(&schema, 1, "a")]).unwrap();

        children.insert(0, item(&schema, 0, "head")).unwrap();
        children.insert(99, item(&schema, 2, "tail")).unwrap();
        assert_eq!(values(&children), ["0=head", "1=a", "2=tail"]);
    }

    #[test]
    fn test_unique_keeps_last() {
        let schema = item_schema();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        children
            .extend([item(&schema, 1, "first"), item(&schema, 2, "x"), item(&schema, 1, "second")])
            .unwrap();

        children.unique(key_of);
        assert_eq!(values(&children), ["1=second", "2=x"]);
    }

    #[test]
    fn test_update_is_upsert_by_key() {
        let schema = item_schema();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        children
            .extend([item(&schema, 1, "old"), item(&schema, 2, "b")])
            .unwrap();

        children
            .update([item(&schema, 1, "new"), item(&schema, 3, "c")], key_of)
            .unwrap();
        assert_eq!(values(&children), ["1=new", "2=b", "3=c"]);
    }

    #[test]
    fn test_update_with_incoming_first() {
        let schema = item_schema();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        children.extend([item(&schema, 3, "c")]).unwrap();

        children
            .update([item(&schema, 3, "c2"), item(&schema, 1, "a"), item(&schema, 1, "a2")], key_of)
            .unwrap();
        assert_eq!(values(&children), ["3=c2", "1=a2"]);
    }

    #[test]
    fn test_update_rejects_foreign_kind() {
        let schema = item_schema();
        let other = Schema::builder("Other").build();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        let result = children.update([Node::builder(&other).build().unwrap()], |n| n.id().to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_is_stable() {
        let schema = item_schema();
        let mut children = Children::new("root", &[Arc::clone(&schema)]);
        children
            .extend([item(&schema, 2, "a"), item(&schema, 1, "b"), item(&schema, 2, "c")])
            .unwrap();

        children.sort_by_key(|n| n.str_value("Key").map(str::to_string));
        assert_eq!(values(&children), ["1=b", "2=a", "2=c"]);
    }
}
