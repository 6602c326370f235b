// Exact and prefix lookups: depth-first enumeration of accepting paths

use crate::flags::FlagState;
use crate::store::{StateId, TransducerStore};
use crate::symbols::{Symbol, SymbolId};
use crate::{MAX_LOOP_COUNT, MAX_PATH_DEPTH};

/// One accepting path of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// Concatenated output symbols. Epsilon and flags contribute nothing.
    pub output: String,
    /// Sum of arc weights plus the final weight.
    pub weight: i32,
    /// Number of input characters consumed by the path.
    pub consumed: usize,
}

/// The first accepting prefix found by [`TransducerStore::prefix_lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch {
    pub len: usize,
    pub output: String,
}

struct Frame {
    state: StateId,
    /// 0 means "finality not checked yet", `n` means arc `n - 1` is next.
    cursor: usize,
    pos: usize,
    weight: i32,
    /// Output length before the arc that led here.
    output_len: usize,
    /// Flag feature changed by the arc that led here, with its old value.
    undo: Option<(u16, u16)>,
}

/// Lazy iterator over the accepting paths for one input.
///
/// Paths are explored depth first with an explicit stack. Each call to
/// `next` is limited to [`MAX_LOOP_COUNT`] steps; hitting the limit ends the
/// iteration.
pub struct Lookup<'s> {
    store: &'s TransducerStore,
    input: Vec<Option<SymbolId>>,
    stack: Vec<Frame>,
    flags: FlagState,
    output: Vec<SymbolId>,
    accept_prefix: bool,
}

impl<'s> Lookup<'s> {
    fn new(store: &'s TransducerStore, input: &[char], accept_prefix: bool) -> Self {
        let symbols = store.symbols();
        Self {
            store,
            input: input.iter().map(|&c| symbols.lookup_char(c)).collect(),
            stack: vec![Frame {
                state: store.start(),
                cursor: 0,
                pos: 0,
                weight: 0,
                output_len: 0,
                undo: None,
            }],
            flags: FlagState::new(symbols.feature_count()),
            output: Vec::new(),
            accept_prefix,
        }
    }

    fn pop(&mut self) {
        if let Some(frame) = self.stack.pop() {
            if let Some((feature, value)) = frame.undo {
                self.flags.restore(feature, value);
            }
            self.output.truncate(frame.output_len);
        }
    }

    fn render(&self, weight: i32, consumed: usize) -> LookupResult {
        let symbols = self.store.symbols();
        LookupResult {
            output: self.output.iter().map(|&s| symbols.output_text(s)).collect(),
            weight,
            consumed,
        }
    }
}

impl Iterator for Lookup<'_> {
    type Item = LookupResult;

    fn next(&mut self) -> Option<LookupResult> {
        let store = self.store;
        let symbols = store.symbols();
        let mut steps = 0u32;

        while let Some(top) = self.stack.last_mut() {
            steps += 1;
            if steps > MAX_LOOP_COUNT {
                log::warn!("lookup stopped after {MAX_LOOP_COUNT} steps");
                self.stack.clear();
                return None;
            }

            if top.cursor == 0 {
                top.cursor = 1;
                let complete = self.accept_prefix || top.pos == self.input.len();
                if let (true, Some(final_weight)) = (complete, store.final_weight(top.state)) {
                    let (weight, pos) = (top.weight + final_weight, top.pos);
                    return Some(self.render(weight, pos));
                }
                continue;
            }

            let arcs = store.arcs(top.state);
            let Some(&arc) = arcs.get(top.cursor - 1) else {
                self.pop();
                continue;
            };
            top.cursor += 1;

            let wanted = self.input.get(top.pos).copied().flatten();
            let (pos, undo) = match symbols.get(arc.input) {
                Symbol::Epsilon => (top.pos, None),
                Symbol::Flag(flag) => match self.flags.apply(&flag) {
                    Some(old) => (top.pos, Some((flag.feature, old))),
                    None => continue,
                },
                Symbol::Char(_) | Symbol::Tag(_) => match wanted {
                    Some(sym) if sym == arc.input => (top.pos + 1, None),
                    Some(sym) if arc.input < sym => {
                        // Arcs are sorted: jump straight to the wanted symbol.
                        let skip = arcs[top.cursor - 1..].partition_point(|a| a.input < sym);
                        top.cursor += skip;
                        continue;
                    }
                    _ => {
                        top.cursor = arcs.len() + 1;
                        continue;
                    }
                },
            };

            let parent_weight = top.weight;
            if self.stack.len() >= MAX_PATH_DEPTH {
                if let Some((feature, old)) = undo {
                    self.flags.restore(feature, old);
                }
                continue;
            }

            let frame = Frame {
                state: arc.target,
                cursor: 0,
                pos,
                weight: parent_weight + arc.weight,
                output_len: self.output.len(),
                undo,
            };
            if !symbols.is_silent(arc.output) {
                self.output.push(arc.output);
            }
            self.stack.push(frame);
        }
        None
    }
}

impl TransducerStore {
    /// Iterate over every accepting path that consumes all of `word`.
    pub fn lookup(&self, word: &[char]) -> Lookup<'_> {
        Lookup::new(self, word, false)
    }

    /// Collect every accepting output for `word`. Unknown words give an
    /// empty list.
    pub fn exact_lookup(&self, word: &[char]) -> Vec<LookupResult> {
        self.lookup(word).collect()
    }

    /// `true` if at least one path accepts `word`.
    pub fn accepts(&self, word: &[char]) -> bool {
        self.lookup(word).next().is_some()
    }

    /// Find the first accepting path that consumes a non-empty prefix of
    /// `text`, in depth-first order.
    pub fn prefix_lookup(&self, text: &[char]) -> Option<PrefixMatch> {
        Lookup::new(self, text, true)
            .find(|r| r.consumed > 0)
            .map(|r| PrefixMatch {
                len: r.consumed,
                output: r.output,
            })
    }
}
