// Compile small word lists into VFST blobs
//
// Only used to produce test and benchmark dictionaries. The result is a
// trie over surface strings, with the analysis string of each entry emitted
// on a chain of epsilon-input arcs after the surface has been consumed.

use std::collections::BTreeSet;

use crate::format::{self, Layout};
use crate::raw::{
    OVERFLOW_MARK, UNWEIGHTED_FINAL, UnweightedCell, WEIGHTED_FINAL, WeightedCell,
};

#[derive(Default)]
struct Node {
    /// `(input symbol, output symbol, target node)`
    arcs: Vec<(String, String, usize)>,
    final_weight: Option<i16>,
}

/// Builds a VFST blob from `(surface, output)` pairs.
///
/// Both strings are split into symbols: `[...]` is one tag, `@...@` is one
/// flag diacritic, every other character is a symbol of its own. Surface
/// characters are consumed with an epsilon output, so a lookup of the
/// surface prints exactly `output`. A flag in the surface is placed on both
/// sides of its arc.
///
/// ```
/// use kielo_fst::builder::VfstBuilder;
/// use kielo_fst::TransducerStore;
///
/// let blob = VfstBuilder::new().entry("koira", "[Ln]koira").build();
/// let store = TransducerStore::from_bytes(&blob).unwrap();
/// let word: Vec<char> = "koira".chars().collect();
/// assert_eq!(store.exact_lookup(&word)[0].output, "[Ln]koira");
/// ```
pub struct VfstBuilder {
    nodes: Vec<Node>,
    layout: Layout,
}

impl Default for VfstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VfstBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            layout: Layout::Unweighted,
        }
    }

    /// Emit the weighted layout instead of the unweighted one.
    pub fn weighted(mut self) -> Self {
        self.layout = Layout::Weighted;
        self
    }

    /// Add an entry with weight 0.
    pub fn entry(self, surface: &str, output: &str) -> Self {
        self.weighted_entry(surface, output, 0)
    }

    /// Add an entry whose final state carries `weight`. Weights are dropped
    /// by the unweighted layout.
    pub fn weighted_entry(mut self, surface: &str, output: &str, weight: i16) -> Self {
        let mut node = 0;
        for sym in split_symbols(surface) {
            // Surface characters print nothing; flags sit on both sides.
            let out = if is_flag(&sym) { sym.clone() } else { String::new() };
            let existing = self.nodes[node]
                .arcs
                .iter()
                .find(|(input, o, _)| *input == sym && *o == out)
                .map(|&(_, _, target)| target);
            node = match existing {
                Some(target) => target,
                None => self.add_arc(node, sym, out),
            };
        }

        let mut outputs = split_symbols(output);
        if outputs.is_empty() {
            outputs.push(String::new());
        }
        for sym in outputs {
            node = self.add_arc(node, String::new(), sym);
        }
        self.nodes[node].final_weight = Some(weight);
        self
    }

    fn add_arc(&mut self, from: usize, input: String, output: String) -> usize {
        let target = self.nodes.len();
        self.nodes.push(Node::default());
        self.nodes[from].arcs.push((input, output, target));
        target
    }

    /// Serialize to VFST bytes.
    pub fn build(&self) -> Vec<u8> {
        let table = SymbolLayout::new(&self.nodes);

        // Cell offset of every node: optional final marker, then arcs, plus
        // an overflow cell when a state has more than 255 extra cells.
        let mut offsets = Vec::with_capacity(self.nodes.len());
        let mut next = 0u32;
        for node in &self.nodes {
            offsets.push(next);
            next += cell_count(node);
        }

        let mut out = format::header_bytes(self.layout).to_vec();
        out.extend_from_slice(&(table.symbols.len() as u16).to_le_bytes());
        for s in &table.symbols {
            out.extend_from_slice(s.as_bytes());
            out.push(0);
        }
        out.resize(out.len().next_multiple_of(self.layout.cell_size()), 0);

        for node in &self.nodes {
            let mut cells: Vec<(u32, u32, u32, i16)> = Vec::new();
            if let Some(w) = node.final_weight {
                cells.push((u32::MAX, 0, 0, w));
            }
            for (input, output, target) in &node.arcs {
                cells.push((table.id(input), table.id(output), offsets[*target], 0));
            }
            if cells.is_empty() {
                // A node without arcs is always final in a trie, but keep the
                // table well-formed regardless.
                cells.push((u32::MAX, 0, 0, 0));
            }
            let extra = cells.len() - 1;
            for (i, &(sym_in, sym_out, target, weight)) in cells.iter().enumerate() {
                let more = match i {
                    0 if extra >= usize::from(OVERFLOW_MARK) => OVERFLOW_MARK,
                    0 => extra as u8,
                    _ => 0,
                };
                self.push_cell(&mut out, sym_in, sym_out, target, weight, more);
                if i == 0 && more == OVERFLOW_MARK {
                    self.push_overflow(&mut out, extra as u32);
                }
            }
        }
        out
    }

    fn push_cell(&self, out: &mut Vec<u8>, sym_in: u32, sym_out: u32, target: u32, weight: i16, more: u8) {
        match self.layout {
            Layout::Unweighted => {
                let cell = UnweightedCell {
                    sym_in: if sym_in == u32::MAX {
                        UNWEIGHTED_FINAL
                    } else {
                        sym_in as u16
                    },
                    sym_out: sym_out as u16,
                    info: (u32::from(more) << 24) | (target & 0x00FF_FFFF),
                };
                out.extend_from_slice(bytemuck::bytes_of(&cell));
            }
            Layout::Weighted => {
                let cell = WeightedCell {
                    sym_in: if sym_in == u32::MAX { WEIGHTED_FINAL } else { sym_in },
                    sym_out,
                    target,
                    weight,
                    more,
                    reserved: 0,
                };
                out.extend_from_slice(bytemuck::bytes_of(&cell));
            }
        }
    }

    fn push_overflow(&self, out: &mut Vec<u8>, count: u32) {
        out.extend_from_slice(&count.to_le_bytes());
        out.resize(out.len() + self.layout.cell_size() - 4, 0);
    }
}

fn cell_count(node: &Node) -> u32 {
    let cells = node.arcs.len() + usize::from(node.final_weight.is_some() || node.arcs.is_empty());
    let overflow = usize::from(cells > usize::from(OVERFLOW_MARK));
    (cells + overflow) as u32
}

fn is_flag(symbol: &str) -> bool {
    symbol.len() > 1 && symbol.starts_with('@') && symbol.ends_with('@')
}

/// Split a string into transducer symbols.
pub fn split_symbols(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let close = match chars[i] {
            '[' => Some(']'),
            '@' => Some('@'),
            _ => None,
        };
        let end = close
            .and_then(|c| chars[i + 1..].iter().position(|&x| x == c))
            .map(|p| i + 1 + p + 1)
            .unwrap_or(i + 1);
        out.push(chars[i..end].iter().collect());
        i = end;
    }
    out
}

/// Symbols in table order: epsilon, flags, single characters, tags.
struct SymbolLayout {
    symbols: Vec<String>,
}

impl SymbolLayout {
    fn new(nodes: &[Node]) -> Self {
        let mut flags = BTreeSet::new();
        let mut chars = BTreeSet::new();
        let mut tags = BTreeSet::new();
        for (input, output, _) in nodes.iter().flat_map(|n| &n.arcs) {
            for s in [input, output] {
                if s.is_empty() {
                    continue;
                }
                if is_flag(s) {
                    flags.insert(s.clone());
                } else if s.chars().count() == 1 {
                    chars.insert(s.clone());
                } else {
                    tags.insert(s.clone());
                }
            }
        }
        let mut symbols = vec![String::new()];
        symbols.extend(flags);
        symbols.extend(chars);
        symbols.extend(tags);
        Self { symbols }
    }

    fn id(&self, symbol: &str) -> u32 {
        if symbol.is_empty() {
            return 0;
        }
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map_or(0, |p| p as u32)
    }
}
