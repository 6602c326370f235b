// On-disk transition cells of both layouts

use bytemuck::{Pod, Zeroable};

use crate::format::Layout;

/// Input symbol that marks a final state in unweighted tables.
pub(crate) const UNWEIGHTED_FINAL: u16 = 0xFFFF;
/// Input symbol that marks a final state in weighted tables.
pub(crate) const WEIGHTED_FINAL: u32 = 0xFFFF_FFFF;
/// `more` value announcing that the next cell holds the real count.
pub(crate) const OVERFLOW_MARK: u8 = 255;

/// 8-byte unweighted cell. `info` packs the target cell index (low 24 bits)
/// and the count of further transitions of the state (high 8 bits).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct UnweightedCell {
    pub sym_in: u16,
    pub sym_out: u16,
    pub info: u32,
}

/// 16-byte weighted cell.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct WeightedCell {
    pub sym_in: u32,
    pub sym_out: u32,
    pub target: u32,
    pub weight: i16,
    pub more: u8,
    pub reserved: u8,
}

/// A cell of either layout, widened.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell {
    pub sym_in: u32,
    pub sym_out: u32,
    pub target: u32,
    pub weight: i32,
    pub more: u8,
    pub is_final: bool,
    /// The first four bytes read as one little-endian word. Overflow cells
    /// keep their transition count there.
    pub head: u32,
}

/// Decode every cell of the transition section.
pub(crate) fn decode_cells(layout: Layout, bytes: &[u8]) -> Vec<Cell> {
    let size = layout.cell_size();
    bytes
        .chunks_exact(size)
        .map(|chunk| match layout {
            Layout::Unweighted => {
                let c: UnweightedCell = bytemuck::pod_read_unaligned(chunk);
                Cell {
                    sym_in: u32::from(c.sym_in),
                    sym_out: u32::from(c.sym_out),
                    target: c.info & 0x00FF_FFFF,
                    weight: 0,
                    more: (c.info >> 24) as u8,
                    is_final: c.sym_in == UNWEIGHTED_FINAL,
                    head: u32::from(c.sym_in) | (u32::from(c.sym_out) << 16),
                }
            }
            Layout::Weighted => {
                let c: WeightedCell = bytemuck::pod_read_unaligned(chunk);
                Cell {
                    sym_in: c.sym_in,
                    sym_out: c.sym_out,
                    target: c.target,
                    weight: i32::from(c.weight),
                    more: c.more,
                    is_final: c.sym_in == WEIGHTED_FINAL,
                    head: c.sym_in,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_sizes_match_layout() {
        assert_eq!(size_of::<UnweightedCell>(), Layout::Unweighted.cell_size());
        assert_eq!(size_of::<WeightedCell>(), Layout::Weighted.cell_size());
    }

    #[test]
    fn unpacks_unweighted_info() {
        let cell = UnweightedCell {
            sym_in: 3,
            sym_out: 4,
            info: (2 << 24) | 0x01_0203,
        };
        let decoded = decode_cells(Layout::Unweighted, bytemuck::bytes_of(&cell));
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].target, 0x01_0203);
        assert_eq!(decoded[0].more, 2);
        assert_eq!(decoded[0].head, 3 | (4 << 16));
        assert!(!decoded[0].is_final);
    }

    #[test]
    fn weighted_final_marker() {
        let cell = WeightedCell {
            sym_in: WEIGHTED_FINAL,
            sym_out: 0,
            target: 0,
            weight: -7,
            more: 0,
            reserved: 0,
        };
        let decoded = decode_cells(Layout::Weighted, bytemuck::bytes_of(&cell));
        assert!(decoded[0].is_final);
        assert_eq!(decoded[0].weight, -7);
    }

    #[test]
    fn partial_trailing_cell_is_dropped() {
        let cell = UnweightedCell {
            sym_in: 1,
            sym_out: 1,
            info: 0,
        };
        let mut bytes = bytemuck::bytes_of(&cell).to_vec();
        bytes.extend_from_slice(&[0, 0, 0]);
        assert_eq!(decode_cells(Layout::Unweighted, &bytes).len(), 1);
    }
}
