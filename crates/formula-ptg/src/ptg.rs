//! BIFF8 formula tokens (`Ptg`s).
//!
//! Every token knows its own encoded byte size; with the `encode` feature it can also write its
//! bytes. Layouts follow MS-XLS section 2.5.198 ("Formulas"):
//!
//! | Token | Layout | Size |
//! |-------|--------|------|
//! | operators, `PtgParen`, `PtgMissArg` | `[ptg]` | 1 |
//! | `PtgStr` | `[0x17][cch: u8][fHighByte: u8][chars]` | 3 + cch or 3 + 2*cch |
//! | `PtgErr` / `PtgBool` | `[ptg][u8]` | 2 |
//! | `PtgInt` | `[0x1E][u16]` | 3 |
//! | `PtgNum` | `[0x1F][f64]` | 9 |
//! | `PtgFunc` | `[ptg][iftab: u16]` | 3 |
//! | `PtgFuncVar` | `[ptg][cparams: u8][tab: u16]` | 4 |
//! | `PtgName` | `[ptg][ilbl: u16][reserved: u16]` | 5 |
//! | `PtgRef` | `[ptg][rw: u16][col: u16]` | 5 |
//! | `PtgArea` | `[ptg][rwFirst][rwLast][colFirst][colLast]` | 9 |
//! | `PtgAttr` | `[0x19][grbit: u8][wAttr: u16]` | 4 |

use crate::error::TokenError;
use crate::function_ids::{function_spec_from_id, function_spec_from_name, FUNCTION_ID_IF};
use crate::jump::{JumpKind, ResolvedJump, ATTR_SIZE};

/// Maximum number of characters in a `PtgStr` literal.
pub const MAX_STR_LEN: usize = 255;

/// Last column of a BIFF8 sheet (`IV`).
pub const MAX_COL: u16 = 0x00FF;

/// Operand class of a token (reference, value or array), encoded in bits 5-6 of the ptg id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenClass {
    Reference,
    #[default]
    Value,
    Array,
}

impl TokenClass {
    #[cfg(feature = "encode")]
    pub(crate) fn ptg_id(self, base: u8) -> u8 {
        let bits = match self {
            TokenClass::Reference => 0x20,
            TokenClass::Value => 0x40,
            TokenClass::Array => 0x60,
        };
        base | bits
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Concat,
    Lt,
    Le,
    Eq,
    Gt,
    Ge,
    Ne,
    Intersect,
    Union,
    Range,
}

impl BinaryOp {
    pub fn ptg_id(self) -> u8 {
        match self {
            BinaryOp::Add => 0x03,
            BinaryOp::Sub => 0x04,
            BinaryOp::Mul => 0x05,
            BinaryOp::Div => 0x06,
            BinaryOp::Pow => 0x07,
            BinaryOp::Concat => 0x08,
            BinaryOp::Lt => 0x09,
            BinaryOp::Le => 0x0A,
            BinaryOp::Eq => 0x0B,
            BinaryOp::Gt => 0x0C,
            BinaryOp::Ge => 0x0D,
            BinaryOp::Ne => 0x0E,
            BinaryOp::Intersect => 0x0F,
            BinaryOp::Union => 0x10,
            BinaryOp::Range => 0x11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Percent,
}

impl UnaryOp {
    pub fn ptg_id(self) -> u8 {
        match self {
            UnaryOp::Plus => 0x12,
            UnaryOp::Minus => 0x13,
            UnaryOp::Percent => 0x14,
        }
    }
}

/// Cell coordinate as stored in `PtgRef` / `PtgArea` (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: u16,
    /// At most [`MAX_COL`]; `ParseNode::new` rejects anything wider.
    pub col: u16,
    pub row_relative: bool,
    pub col_relative: bool,
}

impl CellRef {
    /// `A1`-style reference (both axes relative).
    pub fn relative(row: u16, col: u16) -> Self {
        Self {
            row,
            col,
            row_relative: true,
            col_relative: true,
        }
    }

    /// `$A$1`-style reference.
    pub fn absolute(row: u16, col: u16) -> Self {
        Self {
            row,
            col,
            row_relative: false,
            col_relative: false,
        }
    }
}

/// A string literal short enough for `PtgStr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PtgStr {
    text: String,
    units: usize,
    compressed: bool,
}

impl PtgStr {
    pub fn new(text: impl Into<String>) -> Result<Self, TokenError> {
        let text = text.into();
        let units = text.encode_utf16().count();
        if units > MAX_STR_LEN {
            return Err(TokenError::StringTooLong { len: units });
        }
        let compressed = text.chars().all(|c| (c as u32) < 0x100);
        Ok(Self {
            text,
            units,
            compressed,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[cfg(feature = "encode")]
    pub(crate) fn units(&self) -> usize {
        self.units
    }

    /// Whether every character fits in one byte (`fHighByte = 0`).
    #[cfg(feature = "encode")]
    pub(crate) fn is_compressed(&self) -> bool {
        self.compressed
    }

    fn encoded_size(&self) -> usize {
        let width = if self.compressed { 1 } else { 2 };
        3 + self.units * width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ptg {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Paren,
    MissArg,
    Str(PtgStr),
    /// BIFF error code (`0x07` = `#DIV/0!`, ...).
    Err(u8),
    Bool(bool),
    Int(u16),
    Num(f64),
    /// Fixed-arity function call.
    Func { id: u16, class: TokenClass },
    /// Variable-arity function call; `argc` is the number of operands it pops.
    FuncVar { id: u16, argc: u8, class: TokenClass },
    /// Defined name, by 1-based index into the workbook's name table.
    Name { index: u16, class: TokenClass },
    Ref { cell: CellRef, class: TokenClass },
    Area {
        first: CellRef,
        last: CellRef,
        class: TokenClass,
    },
    /// `tAttrIf` / `tAttrSkip`. Only ever produced by the compiler.
    Attr(ResolvedJump),
}

impl Ptg {
    /// Build a call token for a registered function, picking `PtgFunc` for fixed-arity
    /// functions and `PtgFuncVar` otherwise.
    pub fn function(name: &str, argc: usize) -> Result<Ptg, TokenError> {
        let spec = function_spec_from_name(name)
            .ok_or_else(|| TokenError::UnknownFunction(name.to_string()))?;
        if !spec.accepts(argc) {
            return Err(TokenError::ArgCountOutOfRange {
                name: spec.name,
                min: spec.min_args,
                max: spec.max_args,
                argc,
            });
        }
        if spec.is_fixed_arity() {
            Ok(Ptg::Func {
                id: spec.id,
                class: TokenClass::Value,
            })
        } else {
            Ok(Ptg::FuncVar {
                id: spec.id,
                // `accepts` bounds argc by `MAX_FUNC_ARGS`.
                argc: argc as u8,
                class: TokenClass::Value,
            })
        }
    }

    pub fn string(text: impl Into<String>) -> Result<Ptg, TokenError> {
        PtgStr::new(text).map(Ptg::Str)
    }

    pub fn cell(cell: CellRef) -> Ptg {
        Ptg::Ref {
            cell,
            class: TokenClass::Reference,
        }
    }

    pub fn area(first: CellRef, last: CellRef) -> Ptg {
        Ptg::Area {
            first,
            last,
            class: TokenClass::Reference,
        }
    }

    /// Whether this token is a call of `IF`, the one function compiled with jump markup.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Ptg::FuncVar { id, .. } if *id == FUNCTION_ID_IF)
    }

    /// Number of operands this token consumes from the evaluation stack, when that is known
    /// from the token alone. Unregistered fixed-arity functions and `PtgAttr` report `None`.
    pub fn operand_count(&self) -> Option<usize> {
        match self {
            Ptg::Binary(_) => Some(2),
            Ptg::Unary(_) | Ptg::Paren => Some(1),
            Ptg::MissArg
            | Ptg::Str(_)
            | Ptg::Err(_)
            | Ptg::Bool(_)
            | Ptg::Int(_)
            | Ptg::Num(_)
            | Ptg::Name { .. }
            | Ptg::Ref { .. }
            | Ptg::Area { .. } => Some(0),
            Ptg::Func { id, .. } => function_spec_from_id(*id)
                .filter(|spec| spec.is_fixed_arity())
                .map(|spec| spec.min_args as usize),
            Ptg::FuncVar { argc, .. } => Some(*argc as usize),
            Ptg::Attr(_) => None,
        }
    }

    pub fn encoded_size(&self) -> usize {
        match self {
            Ptg::Binary(_) | Ptg::Unary(_) | Ptg::Paren | Ptg::MissArg => 1,
            Ptg::Str(s) => s.encoded_size(),
            Ptg::Err(_) | Ptg::Bool(_) => 2,
            Ptg::Int(_) => 3,
            Ptg::Num(_) => 9,
            Ptg::Func { .. } => 3,
            Ptg::FuncVar { .. } => 4,
            Ptg::Name { .. } | Ptg::Ref { .. } => 5,
            Ptg::Area { .. } => 9,
            Ptg::Attr(_) => ATTR_SIZE,
        }
    }

    /// Short token name used in diagnostics.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Ptg::Binary(_) => "PtgBinary",
            Ptg::Unary(_) => "PtgUnary",
            Ptg::Paren => "PtgParen",
            Ptg::MissArg => "PtgMissArg",
            Ptg::Str(_) => "PtgStr",
            Ptg::Err(_) => "PtgErr",
            Ptg::Bool(_) => "PtgBool",
            Ptg::Int(_) => "PtgInt",
            Ptg::Num(_) => "PtgNum",
            Ptg::Func { .. } => "PtgFunc",
            Ptg::FuncVar { .. } => "PtgFuncVar",
            Ptg::Name { .. } => "PtgName",
            Ptg::Ref { .. } => "PtgRef",
            Ptg::Area { .. } => "PtgArea",
            Ptg::Attr(jump) => match jump.kind() {
                JumpKind::BranchIfFalse => "PtgAttrIf",
                JumpKind::Skip => "PtgAttrSkip",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_is_the_only_conditional_call() {
        assert!(Ptg::function("IF", 2).unwrap().is_conditional());
        assert!(Ptg::function("if", 3).unwrap().is_conditional());
        assert!(!Ptg::function("SUM", 3).unwrap().is_conditional());
        // `PtgFunc` never carries IF.
        assert!(!Ptg::Func {
            id: FUNCTION_ID_IF,
            class: TokenClass::Value
        }
        .is_conditional());
    }

    #[test]
    fn fixed_arity_functions_use_ptg_func() {
        assert_eq!(
            Ptg::function("ABS", 1).unwrap(),
            Ptg::Func {
                id: 0x0018,
                class: TokenClass::Value
            }
        );
        assert_eq!(Ptg::function("ABS", 1).unwrap().encoded_size(), 3);
        assert_eq!(Ptg::function("SUM", 2).unwrap().encoded_size(), 4);
    }

    #[test]
    fn function_rejects_unknown_names_and_bad_arity() {
        assert_eq!(
            Ptg::function("NOPE", 1),
            Err(TokenError::UnknownFunction("NOPE".to_string()))
        );
        assert_eq!(
            Ptg::function("IF", 4),
            Err(TokenError::ArgCountOutOfRange {
                name: "IF",
                min: 2,
                max: 3,
                argc: 4
            })
        );
    }

    #[test]
    fn string_size_depends_on_character_width() {
        assert_eq!(Ptg::string("abc").unwrap().encoded_size(), 6);
        assert_eq!(Ptg::string("caf\u{e9}").unwrap().encoded_size(), 7);
        assert_eq!(Ptg::string("\u{3042}\u{3044}").unwrap().encoded_size(), 7);
        assert_eq!(
            Ptg::string("x".repeat(256)),
            Err(TokenError::StringTooLong { len: 256 })
        );
    }
}
