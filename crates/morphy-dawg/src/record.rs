// Fixed-size record layouts stored in automaton sections.

use bytemuck::{Pod, Zeroable};

/// A plain-old-data record that can be bulk-copied from a bundle.
///
/// Implementors must be `#[repr(C)]` without padding. `swap_bytes` reverses
/// the byte order of every field and is applied when a bundle was written on
/// a platform of the opposite endianness.
pub trait Record: Pod {
    fn swap_bytes(self) -> Self;
}

/// Automaton node (16 bytes).
///
/// Outgoing edges occupy `edges[first_edge..first_edge + edge_count]`,
/// sorted by label. Payloads attached to the node (non-empty only for
/// accepting nodes) occupy `payloads[first_payload..first_payload + payload_count]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct NodeRecord {
    pub first_edge: u32,
    pub edge_count: u32,
    pub first_payload: u32,
    pub payload_count: u32,
}

impl NodeRecord {
    #[inline]
    pub fn is_final(&self) -> bool {
        self.payload_count > 0
    }

    #[inline]
    pub(crate) fn edge_range(&self) -> std::ops::Range<usize> {
        let start = self.first_edge as usize;
        start..start + self.edge_count as usize
    }

    #[inline]
    pub(crate) fn payload_range(&self) -> std::ops::Range<usize> {
        let start = self.first_payload as usize;
        start..start + self.payload_count as usize
    }
}

impl Record for NodeRecord {
    fn swap_bytes(self) -> Self {
        Self {
            first_edge: self.first_edge.swap_bytes(),
            edge_count: self.edge_count.swap_bytes(),
            first_payload: self.first_payload.swap_bytes(),
            payload_count: self.payload_count.swap_bytes(),
        }
    }
}

/// Labelled edge (8 bytes). `label` is a Unicode scalar value.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct EdgeRecord {
    pub label: u32,
    pub target: u32,
}

impl EdgeRecord {
    /// The edge label as a character.
    ///
    /// Labels are validated when an automaton is loaded, so the replacement
    /// character only appears for hand-built invalid records.
    #[inline]
    pub fn label_char(&self) -> char {
        char::from_u32(self.label).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl Record for EdgeRecord {
    fn swap_bytes(self) -> Self {
        Self {
            label: self.label.swap_bytes(),
            target: self.target.swap_bytes(),
        }
    }
}

impl Record for u32 {
    fn swap_bytes(self) -> Self {
        u32::swap_bytes(self)
    }
}

// Compile-time layout checks.
const _: () = assert!(std::mem::size_of::<NodeRecord>() == 16);
const _: () = assert!(std::mem::size_of::<EdgeRecord>() == 8);
