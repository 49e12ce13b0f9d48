//! BIFF8 formula token compiler.
//!
//! This crate turns a parsed formula tree ([`ParseNode`]) into the flat `Ptg` sequence a BIFF
//! `rgce` stores and Excel's stack-based evaluator executes:
//! - [`to_token_array`]: post-order flattening, with `tAttrIf`/`tAttrSkip` jump markup for `IF`
//! - [`encode_rgce`] / [`compile_rgce`] (feature `encode`): BIFF8 bytes of a token stream
//!
//! Parsing formula text is out of scope; callers build the tree from their own parser output.
//! Trees are validated when they are built, so compilation only fails on internal defects
//! ([`InvariantViolation`]) or on jumps wider than a `tAttr` operand.

mod collector;
mod compiler;
#[cfg(feature = "encode")]
mod encode;
mod error;
mod function_ids;
mod jump;
mod parse_node;
mod ptg;

pub use compiler::to_token_array;
pub use error::{CompileError, InvalidTree, InvariantViolation, TokenError};
pub use function_ids::{
    function_id_to_name, function_name_to_id, function_spec_from_id, function_spec_from_name,
    FunctionSpec, FUNCTION_ID_IF, MAX_FUNCTION_ID, MAX_FUNC_ARGS,
};
pub use jump::{JumpKind, ResolvedJump, UnresolvedJump, ATTR_SIZE};
pub use parse_node::ParseNode;
pub use ptg::{BinaryOp, CellRef, Ptg, PtgStr, TokenClass, UnaryOp, MAX_COL, MAX_STR_LEN};

#[cfg(feature = "encode")]
pub use compiler::compile_rgce;
#[cfg(feature = "encode")]
pub use encode::encode_rgce;
