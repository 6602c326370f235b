// Loading VFST data into a normalized arc table

use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::FstError;
use crate::format::{self, HEADER_SIZE, Layout};
use crate::raw::{self, Cell, OVERFLOW_MARK};
use crate::symbols::{Symbol, SymbolId, SymbolTable};

/// Dense state number. The start state is always 0.
pub type StateId = u32;

/// One transition in the normalized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub input: SymbolId,
    pub output: SymbolId,
    pub target: StateId,
    pub weight: i32,
}

/// A transition with its symbols resolved, as handed to search code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a> {
    pub input: Symbol<'a>,
    pub output: Symbol<'a>,
    pub target: StateId,
    pub weight: i32,
}

#[derive(Debug, Clone, Copy)]
struct State {
    first_arc: u32,
    arc_count: u32,
    final_weight: Option<i32>,
}

/// An immutable, loaded transducer.
///
/// States reachable from the start state are renumbered densely in
/// breadth-first order, and each state's arcs are sorted by input symbol.
/// Epsilon and flag arcs therefore come before character arcs.
#[derive(Debug)]
pub struct TransducerStore {
    symbols: SymbolTable,
    states: Vec<State>,
    arcs: Vec<Arc>,
    layout: Layout,
}

impl TransducerStore {
    /// Parse a VFST blob of either layout.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FstError> {
        let layout = format::parse_header(data)?;
        let (symbols, symbols_end) = SymbolTable::parse(data, HEADER_SIZE)?;

        let align = layout.cell_size();
        let table_start = symbols_end.next_multiple_of(align);
        let section = data.get(table_start..).ok_or(FstError::TooShort {
            expected: table_start,
            actual: data.len(),
        })?;
        let cells = raw::decode_cells(layout, section);
        if cells.is_empty() {
            return Err(FstError::TooShort {
                expected: table_start + align,
                actual: data.len(),
            });
        }

        let (states, arcs) = normalize(&cells)?;
        log::debug!(
            "loaded {layout:?} transducer: {} symbols, {} states, {} arcs",
            symbols.len(),
            states.len(),
            arcs.len()
        );

        Ok(Self {
            symbols,
            states,
            arcs,
            layout,
        })
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn is_weighted(&self) -> bool {
        self.layout == Layout::Weighted
    }

    pub fn start(&self) -> StateId {
        0
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_weight(state).is_some()
    }

    /// Weight of accepting in `state`, `None` if it does not accept.
    pub fn final_weight(&self, state: StateId) -> Option<i32> {
        self.states.get(state as usize)?.final_weight
    }

    /// Raw outgoing arcs of `state`, sorted by input symbol.
    pub fn arcs(&self, state: StateId) -> &[Arc] {
        match self.states.get(state as usize) {
            Some(s) => {
                let start = s.first_arc as usize;
                &self.arcs[start..start + s.arc_count as usize]
            }
            None => &[],
        }
    }

    /// Outgoing transitions of `state` with classified symbols.
    pub fn transitions_from(&self, state: StateId) -> impl Iterator<Item = Transition<'_>> {
        self.arcs(state).iter().map(|arc| Transition {
            input: self.symbols.get(arc.input),
            output: self.symbols.get(arc.output),
            target: arc.target,
            weight: arc.weight,
        })
    }
}

/// Walk the raw cell table from cell 0 and build dense states.
fn normalize(cells: &[Cell]) -> Result<(Vec<State>, Vec<Arc>), FstError> {
    let cell_at = |index: u64| -> Result<&Cell, FstError> {
        cells.get(index as usize).ok_or_else(|| {
            FstError::CorruptData(format!(
                "cell {index} is outside the table of {} cells",
                cells.len()
            ))
        })
    };

    let mut ids: HashMap<u32, StateId> = HashMap::new();
    let mut order: Vec<u32> = Vec::new();
    let mut queue = VecDeque::from([0u32]);
    ids.insert(0, 0);
    order.push(0);

    let mut states = Vec::new();
    let mut arcs = Vec::new();
    // Targets are raw cell indices until every state has an id.
    let mut pending: Vec<(usize, u32)> = Vec::new();

    while let Some(head) = queue.pop_front() {
        let first = cell_at(u64::from(head))?;
        let (last_slot, skip_slot) = if first.more == OVERFLOW_MARK {
            (u64::from(cell_at(u64::from(head) + 1)?.head) + 1, Some(1))
        } else {
            (u64::from(first.more), None)
        };

        let first_arc = arcs.len();
        let mut final_weight = None;
        for slot in 0..=last_slot {
            if Some(slot) == skip_slot {
                continue;
            }
            let cell = cell_at(u64::from(head) + slot)?;
            if cell.is_final {
                final_weight = Some(cell.weight);
                continue;
            }
            cell_at(u64::from(cell.target))?;
            if !ids.contains_key(&cell.target) {
                let id = StateId::try_from(order.len())
                    .map_err(|_| FstError::CorruptData("too many states".into()))?;
                ids.insert(cell.target, id);
                order.push(cell.target);
                queue.push_back(cell.target);
            }
            pending.push((arcs.len(), cell.target));
            arcs.push(Arc {
                input: cell.sym_in,
                output: cell.sym_out,
                target: 0,
                weight: cell.weight,
            });
        }

        states.push(State {
            first_arc: to_u32(first_arc)?,
            arc_count: to_u32(arcs.len() - first_arc)?,
            final_weight,
        });
    }

    for (arc_index, raw_target) in pending {
        arcs[arc_index].target = ids[&raw_target];
    }
    for state in &states {
        let start = state.first_arc as usize;
        arcs[start..start + state.arc_count as usize].sort_by_key(|a| a.input);
    }

    Ok((states, arcs))
}

fn to_u32(n: usize) -> Result<u32, FstError> {
    u32::try_from(n).map_err(|_| FstError::CorruptData("transition table too large".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{UNWEIGHTED_FINAL, UnweightedCell, WEIGHTED_FINAL, WeightedCell};

    fn symbol_section(symbols: &[&str], align: usize) -> Vec<u8> {
        let mut buf = format::header_bytes(if align == 16 {
            Layout::Weighted
        } else {
            Layout::Unweighted
        })
        .to_vec();
        buf.extend_from_slice(&(symbols.len() as u16).to_le_bytes());
        for s in symbols {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
        }
        buf.resize(buf.len().next_multiple_of(align), 0);
        buf
    }

    fn cell(sym_in: u16, sym_out: u16, target: u32, more: u8) -> UnweightedCell {
        UnweightedCell {
            sym_in,
            sym_out,
            info: (u32::from(more) << 24) | target,
        }
    }

    fn unweighted(symbols: &[&str], cells: &[UnweightedCell]) -> Vec<u8> {
        let mut data = symbol_section(symbols, 8);
        for c in cells {
            data.extend_from_slice(bytemuck::bytes_of(c));
        }
        data
    }

    // Accepts "ab" with output "xy":
    // cell 0: a:x -> 1, cell 1: b:y -> 2, cell 2: final
    fn ab_to_xy() -> Vec<u8> {
        unweighted(
            &["", "a", "b", "x", "y"],
            &[
                cell(1, 3, 1, 0),
                cell(2, 4, 2, 0),
                cell(UNWEIGHTED_FINAL, 0, 0, 0),
            ],
        )
    }

    #[test]
    fn loads_linear_transducer() {
        let store = TransducerStore::from_bytes(&ab_to_xy()).unwrap();
        assert_eq!(store.state_count(), 3);
        assert_eq!(store.arc_count(), 2);
        assert!(!store.is_weighted());
        assert!(!store.is_final(0));
        assert!(store.is_final(2));
        assert_eq!(store.final_weight(2), Some(0));

        let t: Vec<_> = store.transitions_from(0).collect();
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].input, Symbol::Char('a'));
        assert_eq!(t[0].output, Symbol::Char('x'));
        assert_eq!(t[0].target, 1);
    }

    #[test]
    fn arcs_are_sorted_by_input() {
        // state 0 has three arcs (more = 2) listed c, a, b
        let data = unweighted(
            &["", "a", "b", "c"],
            &[
                cell(3, 3, 3, 2),
                cell(1, 1, 3, 0),
                cell(2, 2, 3, 0),
                cell(UNWEIGHTED_FINAL, 0, 0, 0),
            ],
        );
        let store = TransducerStore::from_bytes(&data).unwrap();
        let inputs: Vec<_> = store.arcs(0).iter().map(|a| a.input).collect();
        assert_eq!(inputs, vec![1, 2, 3]);
    }

    #[test]
    fn overflow_cell_is_skipped() {
        // 256 arcs from the start state need an overflow cell.
        let n = 256u32;
        let mut symbols = vec![String::new()];
        symbols.extend((0..n).map(|i| char::from_u32(0x100 + i).unwrap().to_string()));
        let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();

        let final_cell = n + 1;
        let mut cells = vec![cell(1, 1, final_cell, OVERFLOW_MARK)];
        cells.push(UnweightedCell {
            sym_in: (n - 1) as u16,
            sym_out: 0,
            info: 0,
        });
        for i in 1..n {
            cells.push(cell((i + 1) as u16, (i + 1) as u16, final_cell, 0));
        }
        cells.push(cell(UNWEIGHTED_FINAL, 0, 0, 0));

        let store = TransducerStore::from_bytes(&unweighted(&refs, &cells)).unwrap();
        assert_eq!(store.arcs(0).len(), n as usize);
        assert_eq!(store.state_count(), 2);
        assert!(store.is_final(1));
    }

    #[test]
    fn target_outside_table_is_corrupt() {
        let data = unweighted(&["", "a"], &[cell(1, 1, 40, 0)]);
        assert!(matches!(
            TransducerStore::from_bytes(&data),
            Err(FstError::CorruptData(_))
        ));
    }

    #[test]
    fn truncated_state_is_corrupt() {
        // The start state claims three arcs but the table ends after one.
        let data = unweighted(&["", "a"], &[cell(1, 1, 0, 2)]);
        assert!(matches!(
            TransducerStore::from_bytes(&data),
            Err(FstError::CorruptData(_))
        ));
    }

    #[test]
    fn missing_transition_section() {
        let data = symbol_section(&["", "a"], 8);
        assert!(matches!(
            TransducerStore::from_bytes(&data),
            Err(FstError::TooShort { .. })
        ));
    }

    #[test]
    fn weighted_layout_keeps_weights() {
        let mut data = symbol_section(&["", "a"], 16);
        let cells = [
            WeightedCell {
                sym_in: 1,
                sym_out: 1,
                target: 1,
                weight: 3,
                more: 0,
                reserved: 0,
            },
            WeightedCell {
                sym_in: WEIGHTED_FINAL,
                sym_out: 0,
                target: 0,
                weight: 2,
                more: 0,
                reserved: 0,
            },
        ];
        for c in &cells {
            data.extend_from_slice(bytemuck::bytes_of(c));
        }
        let store = TransducerStore::from_bytes(&data).unwrap();
        assert!(store.is_weighted());
        assert_eq!(store.arcs(0)[0].weight, 3);
        assert_eq!(store.final_weight(1), Some(2));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(TransducerStore::from_bytes(b"not a transducer at all").is_err());
        assert!(TransducerStore::from_bytes(&[]).is_err());
    }
}
