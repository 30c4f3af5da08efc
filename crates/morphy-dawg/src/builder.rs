// Automaton construction.
//
// Keys are first inserted into a plain trie, which is then minimized by
// hash-consing: two nodes are merged when they carry the same payloads and
// the same labelled edges to already-merged children.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

use bytemuck::Zeroable;
use hashbrown::HashMap;

use crate::automaton::Dawg;
use crate::record::{EdgeRecord, NodeRecord, Record};

/// Collects `(key, payload)` pairs and produces a minimized [`Dawg`].
///
/// Payloads under the same key are deduplicated and stored in ascending
/// order.
#[derive(Debug, Clone)]
pub struct DawgBuilder<P> {
    entries: BTreeMap<String, BTreeSet<P>>,
}

impl<P> Default for DawgBuilder<P> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
struct TrieNode<P> {
    children: BTreeMap<char, usize>,
    payloads: Vec<P>,
}

impl<P> TrieNode<P> {
    fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            payloads: Vec::new(),
        }
    }
}

/// Right-language signature of a node once its children are canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Signature<P> {
    payloads: Vec<P>,
    children: Vec<(u32, u32)>,
}

impl<P: Record + Ord + Hash> DawgBuilder<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `payload` to `key`.
    pub fn insert(&mut self, key: &str, payload: P) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .insert(payload);
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the minimized automaton. The root is always node 0.
    pub fn build(&self) -> Dawg<P> {
        let mut trie = vec![TrieNode::new()];
        for (key, payloads) in &self.entries {
            let mut node = 0usize;
            for c in key.chars() {
                node = match trie[node].children.get(&c) {
                    Some(&child) => child,
                    None => {
                        let child = trie.len();
                        trie.push(TrieNode::new());
                        trie[node].children.insert(c, child);
                        child
                    }
                };
            }
            trie[node].payloads.extend(payloads.iter().copied());
        }

        let mut registry: HashMap<Signature<P>, u32> = HashMap::new();
        let mut unique: Vec<Signature<P>> = Vec::new();
        let root = canonicalize(&trie, 0, &mut registry, &mut unique);

        // Root first, every other node keeps its relative order.
        let final_index = |id: u32| -> u32 {
            match id.cmp(&root) {
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Less => id + 1,
                std::cmp::Ordering::Greater => id,
            }
        };
        let mut order: Vec<u32> = Vec::with_capacity(unique.len());
        order.push(root);
        order.extend((0..unique.len() as u32).filter(|&id| id != root));

        let mut nodes = vec![NodeRecord::zeroed(); unique.len()];
        let mut edges = Vec::new();
        let mut payloads = Vec::new();
        for (index, &id) in order.iter().enumerate() {
            let sig = &unique[id as usize];
            nodes[index] = NodeRecord {
                first_edge: edges.len() as u32,
                edge_count: sig.children.len() as u32,
                first_payload: payloads.len() as u32,
                payload_count: sig.payloads.len() as u32,
            };
            edges.extend(sig.children.iter().map(|&(label, target)| EdgeRecord {
                label,
                target: final_index(target),
            }));
            payloads.extend(sig.payloads.iter().copied());
        }

        log::debug!(
            "built automaton: {} keys, {} trie nodes -> {} nodes, {} edges, {} payloads",
            self.entries.len(),
            trie.len(),
            nodes.len(),
            edges.len(),
            payloads.len()
        );
        Dawg::from_raw(nodes, edges, payloads)
    }
}

/// Post-order canonicalization; returns the canonical id of `node`.
fn canonicalize<P: Record + Hash + Eq>(
    trie: &[TrieNode<P>],
    node: usize,
    registry: &mut HashMap<Signature<P>, u32>,
    unique: &mut Vec<Signature<P>>,
) -> u32 {
    let children = trie[node]
        .children
        .iter()
        .map(|(&c, &child)| (c as u32, canonicalize(trie, child, registry, unique)))
        .collect();
    let signature = Signature {
        payloads: trie[node].payloads.clone(),
        children,
    };
    if let Some(&id) = registry.get(&signature) {
        return id;
    }
    let id = unique.len() as u32;
    unique.push(signature.clone());
    registry.insert(signature, id);
    id
}
