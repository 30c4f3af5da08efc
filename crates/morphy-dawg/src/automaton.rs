// Loaded automaton: lookup, substitution-aware lookup and prefix completion.

use std::io::{self, Read, Write};

use crate::completer::Completions;
use crate::reader::ByteReader;
use crate::record::{EdgeRecord, NodeRecord, Record};
use crate::writer::ByteWriter;
use crate::{FormatError, Substitutions};

/// Index of the root node.
pub const ROOT: u32 = 0;

/// A minimized acyclic automaton mapping string keys to payload records.
///
/// Nodes, edges and payloads live in three flat tables. Each node owns a
/// contiguous, label-sorted run of edges and a contiguous run of payloads; a
/// node is accepting when its payload run is non-empty. Keys are sequences
/// of Unicode scalar values, one per edge.
#[derive(Debug, Clone)]
pub struct Dawg<P> {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    payloads: Vec<P>,
}

impl<P: Record> Dawg<P> {
    /// Build an automaton from raw tables, validating every invariant.
    pub fn from_parts(
        nodes: Vec<NodeRecord>,
        edges: Vec<EdgeRecord>,
        payloads: Vec<P>,
        section: &'static str,
    ) -> Result<Self, FormatError> {
        let dawg = Self {
            nodes,
            edges,
            payloads,
        };
        dawg.validate(section)?;
        Ok(dawg)
    }

    /// Wrap tables produced by the builder, which upholds the invariants.
    pub(crate) fn from_raw(
        nodes: Vec<NodeRecord>,
        edges: Vec<EdgeRecord>,
        payloads: Vec<P>,
    ) -> Self {
        Self {
            nodes,
            edges,
            payloads,
        }
    }

    /// Decode an automaton from the reader's current position.
    ///
    /// Layout: `varint nodes | varint edges | varint payloads | node records |
    /// edge records | payload records`.
    pub fn read<R: Read>(reader: &mut ByteReader<R>) -> Result<Self, FormatError> {
        let node_count = reader.read_len()?;
        let edge_count = reader.read_len()?;
        let payload_count = reader.read_len()?;
        let nodes = reader.read_records::<NodeRecord>(node_count)?;
        let edges = reader.read_records::<EdgeRecord>(edge_count)?;
        let payloads = reader.read_records::<P>(payload_count)?;
        let section = reader.section();
        log::trace!(
            "{section}: automaton with {node_count} nodes, {edge_count} edges, {payload_count} payloads"
        );
        Self::from_parts(nodes, edges, payloads, section)
    }

    /// Encode the automaton in the writer's byte order.
    pub fn write_to<W: Write>(&self, writer: &mut ByteWriter<W>) -> io::Result<()> {
        writer.write_len(self.nodes.len())?;
        writer.write_len(self.edges.len())?;
        writer.write_len(self.payloads.len())?;
        writer.write_records(&self.nodes)?;
        writer.write_records(&self.edges)?;
        writer.write_records(&self.payloads)
    }

    fn validate(&self, section: &'static str) -> Result<(), FormatError> {
        if self.nodes.is_empty() {
            return Err(FormatError::inconsistent(section, "automaton has no root node"));
        }
        let node_count = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            let edges_end = node.first_edge as u64 + node.edge_count as u64;
            if edges_end > self.edges.len() as u64 {
                return Err(FormatError::inconsistent(
                    section,
                    format!("node {index} edge range out of bounds"),
                ));
            }
            let payloads_end = node.first_payload as u64 + node.payload_count as u64;
            if payloads_end > self.payloads.len() as u64 {
                return Err(FormatError::inconsistent(
                    section,
                    format!("node {index} payload range out of bounds"),
                ));
            }
            let mut previous: Option<u32> = None;
            for edge in &self.edges[node.edge_range()] {
                if char::from_u32(edge.label).is_none() {
                    return Err(FormatError::inconsistent(
                        section,
                        format!("node {index} has invalid label {:#x}", edge.label),
                    ));
                }
                if previous.is_some_and(|p| p >= edge.label) {
                    return Err(FormatError::inconsistent(
                        section,
                        format!("node {index} edges are not strictly ascending"),
                    ));
                }
                if edge.target as usize >= node_count {
                    return Err(FormatError::inconsistent(
                        section,
                        format!("node {index} edge target {} out of bounds", edge.target),
                    ));
                }
                previous = Some(edge.label);
            }
        }
        self.check_acyclic(section)
    }

    /// Iterative three-colour DFS over the whole node table.
    fn check_acyclic(&self, section: &'static str) -> Result<(), FormatError> {
        const WHITE: u8 = 0;
        const GREY: u8 = 1;
        const BLACK: u8 = 2;

        let mut colour = vec![WHITE; self.nodes.len()];
        // (node, next edge offset)
        let mut stack: Vec<(u32, u32)> = Vec::new();
        for start in 0..self.nodes.len() {
            if colour[start] != WHITE {
                continue;
            }
            colour[start] = GREY;
            stack.push((start as u32, 0));
            while let Some(top) = stack.last_mut() {
                let node = self.nodes[top.0 as usize];
                if top.1 < node.edge_count {
                    let edge = self.edges[(node.first_edge + top.1) as usize];
                    top.1 += 1;
                    let target = edge.target as usize;
                    match colour[target] {
                        WHITE => {
                            colour[target] = GREY;
                            stack.push((edge.target, 0));
                        }
                        GREY => {
                            return Err(FormatError::inconsistent(
                                section,
                                format!("cycle through node {target}"),
                            ));
                        }
                        _ => {}
                    }
                } else {
                    colour[top.0 as usize] = BLACK;
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn payload_count(&self) -> usize {
        self.payloads.len()
    }

    /// Follow the edge labelled `c` out of `node`.
    #[inline]
    pub fn follow(&self, node: u32, c: char) -> Option<u32> {
        let record = self.nodes.get(node as usize)?;
        let edges = &self.edges[record.edge_range()];
        let label = c as u32;
        edges
            .binary_search_by_key(&label, |e| e.label)
            .ok()
            .map(|i| edges[i].target)
    }

    /// Follow every character of `s` starting at `node`.
    pub fn follow_str(&self, node: u32, s: &str) -> Option<u32> {
        s.chars().try_fold(node, |n, c| self.follow(n, c))
    }

    /// Payloads attached to `node` (empty for non-accepting nodes).
    #[inline]
    pub fn payloads(&self, node: u32) -> &[P] {
        match self.nodes.get(node as usize) {
            Some(record) => &self.payloads[record.payload_range()],
            None => &[],
        }
    }

    pub(crate) fn node(&self, node: u32) -> Option<&NodeRecord> {
        self.nodes.get(node as usize)
    }

    pub(crate) fn edges_of(&self, record: &NodeRecord) -> &[EdgeRecord] {
        &self.edges[record.edge_range()]
    }

    /// Payloads stored under `key`; empty when the key is absent.
    pub fn lookup(&self, key: &str) -> &[P] {
        match self.follow_str(ROOT, key) {
            Some(node) => self.payloads(node),
            None => &[],
        }
    }

    /// Whether `key` is accepted.
    pub fn contains(&self, key: &str) -> bool {
        self.follow_str(ROOT, key)
            .and_then(|n| self.node(n))
            .is_some_and(NodeRecord::is_final)
    }

    /// Look `key` up, also trying every configured character replacement.
    ///
    /// At each position both the original character and its replacement
    /// string (if any) are followed, so a key containing `n` substitutable
    /// characters explores at most `2^n` spellings. Returns each stored
    /// spelling together with one of its payloads; spellings reached through
    /// the original characters come first.
    pub fn lookup_with_substitutions<S>(&self, key: &str, substitutions: &S) -> Vec<(String, P)>
    where
        S: Substitutions + ?Sized,
    {
        let chars: Vec<char> = key.chars().collect();
        let mut results = Vec::new();
        // (node, position in key, spelling so far)
        let mut stack: Vec<(u32, usize, String)> = vec![(ROOT, 0, String::with_capacity(key.len()))];
        while let Some((node, pos, spelled)) = stack.pop() {
            if pos == chars.len() {
                for payload in self.payloads(node) {
                    results.push((spelled.clone(), *payload));
                }
                continue;
            }
            let c = chars[pos];
            // Pushed first so that it is explored after the original character.
            if let Some(replacement) = substitutions.replacement(c) {
                let differs = {
                    let mut it = replacement.chars();
                    !(it.next() == Some(c) && it.next().is_none())
                };
                if differs {
                    if let Some(next) = self.follow_str(node, replacement) {
                        let mut s = spelled.clone();
                        s.push_str(replacement);
                        stack.push((next, pos + 1, s));
                    }
                }
            }
            if let Some(next) = self.follow(node, c) {
                let mut s = spelled;
                s.push(c);
                stack.push((next, pos + 1, s));
            }
        }
        results
    }

    /// Lazily enumerate keys starting with `prefix`, at most `max_results`.
    ///
    /// Yields `(suffix, payload)` pairs in depth-first, label-ascending order,
    /// where `suffix` is the remainder of the key after `prefix`.
    pub fn predict_by_prefix(&self, prefix: &str, max_results: usize) -> Completions<'_, P> {
        match self.follow_str(ROOT, prefix) {
            Some(node) => Completions::new(self, node, max_results),
            None => Completions::empty(self),
        }
    }

    /// Enumerate every `(key, payload)` pair in key order.
    pub fn iter(&self) -> Completions<'_, P> {
        Completions::new(self, ROOT, usize::MAX)
    }
}
