// Payload records stored in the word and prediction automatons.

use bytemuck::{Pod, Zeroable};
use morphy_core::FormRef;
use morphy_dawg::Record;

/// Payload of the word automaton: the paradigm form a stored word realizes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
pub struct WordPayload {
    pub paradigm: u16,
    pub form: u16,
}

impl WordPayload {
    pub fn form_ref(&self) -> FormRef {
        FormRef {
            paradigm: self.paradigm,
            form: self.form,
        }
    }
}

impl Record for WordPayload {
    fn swap_bytes(self) -> Self {
        Self {
            paradigm: self.paradigm.swap_bytes(),
            form: self.form.swap_bytes(),
        }
    }
}

/// Payload of a prediction automaton: how often words with this ending
/// realize a given paradigm form.
///
/// Field order makes the derived ordering sort by count first.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
pub struct SuffixPayload {
    pub count: u16,
    pub paradigm: u16,
    pub form: u16,
    pub reserved: u16,
}

impl SuffixPayload {
    pub fn form_ref(&self) -> FormRef {
        FormRef {
            paradigm: self.paradigm,
            form: self.form,
        }
    }
}

impl Record for SuffixPayload {
    fn swap_bytes(self) -> Self {
        Self {
            count: self.count.swap_bytes(),
            paradigm: self.paradigm.swap_bytes(),
            form: self.form.swap_bytes(),
            reserved: self.reserved.swap_bytes(),
        }
    }
}

const _: () = assert!(std::mem::size_of::<WordPayload>() == 4);
const _: () = assert!(std::mem::size_of::<SuffixPayload>() == 8);
