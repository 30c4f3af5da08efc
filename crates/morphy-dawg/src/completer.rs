// Lazy key enumeration below a node.
//
// Uses an explicit DFS stack instead of recursion so that a long chain of
// single-child nodes cannot exhaust the call stack, and so that iteration
// can stop after any number of results without doing extra work.

use crate::automaton::Dawg;
use crate::record::Record;

/// One level of the traversal stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: u32,
    /// Next payload offset of `node` still to be yielded.
    next_payload: u32,
    /// Next outgoing edge offset of `node` still to be descended.
    next_edge: u32,
}

impl Frame {
    fn new(node: u32) -> Self {
        Self {
            node,
            next_payload: 0,
            next_edge: 0,
        }
    }
}

/// Iterator over `(suffix, payload)` pairs below a starting node.
///
/// Created by [`Dawg::predict_by_prefix`] and [`Dawg::iter`]. Payloads of a
/// node are yielded before any key extending it; children are visited in
/// ascending label order.
pub struct Completions<'a, P> {
    dawg: &'a Dawg<P>,
    stack: Vec<Frame>,
    suffix: String,
    remaining: usize,
}

impl<'a, P: Record> Completions<'a, P> {
    pub(crate) fn new(dawg: &'a Dawg<P>, start: u32, max_results: usize) -> Self {
        Self {
            dawg,
            stack: vec![Frame::new(start)],
            suffix: String::new(),
            remaining: max_results,
        }
    }

    pub(crate) fn empty(dawg: &'a Dawg<P>) -> Self {
        Self {
            dawg,
            stack: Vec::new(),
            suffix: String::new(),
            remaining: 0,
        }
    }
}

impl<'a, P: Record> Iterator for Completions<'a, P> {
    type Item = (String, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        let dawg = self.dawg;
        while self.remaining > 0 {
            let top = self.stack.last_mut()?;
            let Some(node) = dawg.node(top.node) else {
                self.stack.clear();
                return None;
            };

            if top.next_payload < node.payload_count {
                let payload = &dawg.payloads(top.node)[top.next_payload as usize];
                top.next_payload += 1;
                self.remaining -= 1;
                return Some((self.suffix.clone(), payload));
            }

            if top.next_edge < node.edge_count {
                let edge = dawg.edges_of(node)[top.next_edge as usize];
                top.next_edge += 1;
                self.suffix.push(edge.label_char());
                self.stack.push(Frame::new(edge.target));
                continue;
            }

            self.stack.pop();
            // Every frame above the starting one was entered through an edge.
            if !self.stack.is_empty() {
                self.suffix.pop();
            }
        }
        None
    }
}
