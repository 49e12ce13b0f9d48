//! Flattening of a [`ParseNode`] tree into the `Ptg` sequence stored in a BIFF formula.
//!
//! Operands are emitted before the operator or function that consumes them (post-order), which
//! is the order the stack-based evaluator executes them in. `IF` calls additionally get
//! `tAttrIf`/`tAttrSkip` markup so the evaluator can skip the branch it does not take:
//!
//! ```text
//! IF(c, t)    => c  tAttrIf  t  tAttrSkip  IF
//! IF(c, t, f) => c  tAttrIf  t  tAttrSkip  f  tAttrSkip  IF
//! ```
//!
//! `tAttrIf` jumps to the start of the false branch (or to the `IF` call). Skip distances are
//! stored one less than the number of bytes up to the end of the `IF` call.

use crate::collector::TokenCollector;
use crate::error::CompileError;
use crate::jump::{UnresolvedJump, ATTR_SIZE};
use crate::parse_node::ParseNode;
use crate::ptg::Ptg;

/// Encoded size of the `PtgFuncVar` that closes every `IF`.
const IF_CALL_SIZE: usize = 4;

/// Compile `root` into its token sequence. The result has exactly `root.token_count()` tokens.
pub fn to_token_array(root: &ParseNode) -> Result<Vec<Ptg>, CompileError> {
    let result = flatten(root);
    if let Err(err) = &result {
        log::error!("failed to flatten formula tree: {err}");
    }
    result
}

/// Compile `root` and concatenate the encoded tokens into an `rgce` byte stream.
#[cfg(feature = "encode")]
pub fn compile_rgce(root: &ParseNode) -> Result<Vec<u8>, CompileError> {
    let tokens = to_token_array(root)?;
    Ok(crate::encode::encode_rgce(&tokens))
}

fn flatten(root: &ParseNode) -> Result<Vec<Ptg>, CompileError> {
    let mut collector = TokenCollector::new(root.token_count());
    collect(root, &mut collector)?;
    Ok(collector.finish()?)
}

fn collect(node: &ParseNode, out: &mut TokenCollector) -> Result<(), CompileError> {
    if node.is_conditional() {
        return collect_if(node, out);
    }
    for child in node.children() {
        collect(child, out)?;
    }
    out.append(node.token().clone())?;
    Ok(())
}

fn collect_if(node: &ParseNode, out: &mut TokenCollector) -> Result<(), CompileError> {
    let children = node.children();

    collect(&children[0], out)?;
    let if_index = out.reserve_placeholder()?;

    collect(&children[1], out)?;
    let skip_after_true_index = out.reserve_placeholder()?;
    let true_size = out.sum_encoded_sizes(if_index + 1, skip_after_true_index)?;

    let attr_if = UnresolvedJump::branch_if_false().resolve(true_size + ATTR_SIZE)?;

    if let Some(false_branch) = children.get(2) {
        collect(false_branch, out)?;
        let skip_after_false_index = out.reserve_placeholder()?;
        let false_size =
            out.sum_encoded_sizes(skip_after_true_index + 1, skip_after_false_index)?;

        let skip_after_true =
            UnresolvedJump::skip().resolve(false_size + ATTR_SIZE + IF_CALL_SIZE - 1)?;
        let skip_after_false = UnresolvedJump::skip().resolve(IF_CALL_SIZE - 1)?;

        log::trace!(
            "IF at slots {if_index}/{skip_after_true_index}/{skip_after_false_index}: \
             if={} skip={} skip={}",
            attr_if.distance(),
            skip_after_true.distance(),
            skip_after_false.distance()
        );

        out.patch(if_index, Ptg::Attr(attr_if))?;
        out.patch(skip_after_true_index, Ptg::Attr(skip_after_true))?;
        out.patch(skip_after_false_index, Ptg::Attr(skip_after_false))?;
    } else {
        let skip_after_true = UnresolvedJump::skip().resolve(IF_CALL_SIZE - 1)?;

        log::trace!(
            "IF at slots {if_index}/{skip_after_true_index}: if={} skip={}",
            attr_if.distance(),
            skip_after_true.distance()
        );

        out.patch(if_index, Ptg::Attr(attr_if))?;
        out.patch(skip_after_true_index, Ptg::Attr(skip_after_true))?;
    }

    out.append(node.token().clone())?;
    Ok(())
}
