//! BIFF8 byte encoding of compiled token streams.

use crate::ptg::{CellRef, Ptg, TokenClass, MAX_COL};

const PTG_PAREN: u8 = 0x15;
const PTG_MISS_ARG: u8 = 0x16;
const PTG_STR: u8 = 0x17;
const PTG_ATTR: u8 = 0x19;
const PTG_ERR: u8 = 0x1C;
const PTG_BOOL: u8 = 0x1D;
const PTG_INT: u8 = 0x1E;
const PTG_NUM: u8 = 0x1F;

// Base ids of class-carrying tokens; `TokenClass::ptg_id` adds the class bits.
const PTG_FUNC: u8 = 0x01;
const PTG_FUNC_VAR: u8 = 0x02;
const PTG_NAME: u8 = 0x03;
const PTG_REF: u8 = 0x04;
const PTG_AREA: u8 = 0x05;

const COL_RELATIVE_BIT: u16 = 0x4000;
const ROW_RELATIVE_BIT: u16 = 0x8000;

/// Concatenate the encoded bytes of `tokens` into an `rgce` stream.
pub fn encode_rgce(tokens: &[Ptg]) -> Vec<u8> {
    let len = tokens.iter().map(Ptg::encoded_size).sum();
    let mut out = Vec::with_capacity(len);
    for token in tokens {
        token.write_to(&mut out);
    }
    out
}

// `ParseNode::new` has already bounded the column by `MAX_COL`, well clear of the flag bits.
fn col_field(cell: &CellRef) -> u16 {
    debug_assert!(cell.col <= MAX_COL, "column {} overlaps the relative flags", cell.col);
    let mut field = cell.col;
    if cell.col_relative {
        field |= COL_RELATIVE_BIT;
    }
    if cell.row_relative {
        field |= ROW_RELATIVE_BIT;
    }
    field
}

fn push_class_id(out: &mut Vec<u8>, class: TokenClass, base: u8) {
    out.push(class.ptg_id(base));
}

impl Ptg {
    /// Append this token's BIFF8 bytes to `out`. Writes exactly `encoded_size()` bytes.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Ptg::Binary(op) => out.push(op.ptg_id()),
            Ptg::Unary(op) => out.push(op.ptg_id()),
            Ptg::Paren => out.push(PTG_PAREN),
            Ptg::MissArg => out.push(PTG_MISS_ARG),
            Ptg::Str(s) => {
                out.push(PTG_STR);
                // `PtgStr::new` caps the length at 255 UTF-16 units.
                out.push(s.units() as u8);
                if s.is_compressed() {
                    out.push(0x00);
                    out.extend(s.as_str().chars().map(|c| c as u32 as u8));
                } else {
                    out.push(0x01);
                    for unit in s.as_str().encode_utf16() {
                        out.extend_from_slice(&unit.to_le_bytes());
                    }
                }
            }
            Ptg::Err(code) => out.extend_from_slice(&[PTG_ERR, *code]),
            Ptg::Bool(b) => out.extend_from_slice(&[PTG_BOOL, u8::from(*b)]),
            Ptg::Int(n) => {
                out.push(PTG_INT);
                out.extend_from_slice(&n.to_le_bytes());
            }
            Ptg::Num(n) => {
                out.push(PTG_NUM);
                out.extend_from_slice(&n.to_le_bytes());
            }
            Ptg::Func { id, class } => {
                push_class_id(out, *class, PTG_FUNC);
                out.extend_from_slice(&id.to_le_bytes());
            }
            Ptg::FuncVar { id, argc, class } => {
                push_class_id(out, *class, PTG_FUNC_VAR);
                // Bounded when the node is built, so the fPrompt / fCeFunc bits stay clear.
                out.push(*argc);
                out.extend_from_slice(&id.to_le_bytes());
            }
            Ptg::Name { index, class } => {
                push_class_id(out, *class, PTG_NAME);
                out.extend_from_slice(&index.to_le_bytes());
                out.extend_from_slice(&[0, 0]);
            }
            Ptg::Ref { cell, class } => {
                push_class_id(out, *class, PTG_REF);
                out.extend_from_slice(&cell.row.to_le_bytes());
                out.extend_from_slice(&col_field(cell).to_le_bytes());
            }
            Ptg::Area { first, last, class } => {
                push_class_id(out, *class, PTG_AREA);
                out.extend_from_slice(&first.row.to_le_bytes());
                out.extend_from_slice(&last.row.to_le_bytes());
                out.extend_from_slice(&col_field(first).to_le_bytes());
                out.extend_from_slice(&col_field(last).to_le_bytes());
            }
            Ptg::Attr(jump) => {
                out.extend_from_slice(&[PTG_ATTR, jump.kind().grbit()]);
                out.extend_from_slice(&jump.distance().to_le_bytes());
            }
        }
    }
}
