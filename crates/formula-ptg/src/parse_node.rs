use crate::error::InvalidTree;
use crate::function_ids::{MAX_FUNCTION_ID, MAX_FUNC_ARGS};
use crate::ptg::{CellRef, Ptg, MAX_COL};

/// One syntactic element of a parsed formula: a token plus the operand subtrees it consumes.
///
/// Nodes are immutable once built. The number of tokens the subtree compiles to is computed
/// up front, since the compiler sizes its output buffer from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    token: Ptg,
    children: Vec<ParseNode>,
    is_conditional: bool,
    token_count: usize,
}

impl ParseNode {
    pub fn new(token: Ptg, children: Vec<ParseNode>) -> Result<Self, InvalidTree> {
        check_encodable(&token)?;
        let is_conditional = token.is_conditional();
        if is_conditional && !(2..=3).contains(&children.len()) {
            return Err(InvalidTree::ConditionalArity {
                children: children.len(),
            });
        }
        if let Some(declared) = token.operand_count() {
            if declared != children.len() {
                return Err(InvalidTree::ArgCountMismatch {
                    ptg: token.mnemonic(),
                    declared,
                    children: children.len(),
                });
            }
        }

        let mut token_count = 1 + children.iter().map(ParseNode::token_count).sum::<usize>();
        if is_conditional {
            // One tAttrIf plus one tAttrSkip per branch.
            token_count += children.len();
        }

        Ok(Self {
            token,
            children,
            is_conditional,
            token_count,
        })
    }

    /// Build a node from parser output in which some operands may not have been produced.
    pub fn from_slots(token: Ptg, slots: Vec<Option<ParseNode>>) -> Result<Self, InvalidTree> {
        let mut children = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(child) => children.push(child),
                None => {
                    return Err(InvalidTree::MissingChild {
                        index,
                        ptg: token.mnemonic(),
                    })
                }
            }
        }
        Self::new(token, children)
    }

    pub fn leaf(token: Ptg) -> Result<Self, InvalidTree> {
        Self::new(token, Vec::new())
    }

    pub fn unary(token: Ptg, child: ParseNode) -> Result<Self, InvalidTree> {
        Self::new(token, vec![child])
    }

    pub fn binary(token: Ptg, lhs: ParseNode, rhs: ParseNode) -> Result<Self, InvalidTree> {
        Self::new(token, vec![lhs, rhs])
    }

    pub fn token(&self) -> &Ptg {
        &self.token
    }

    pub fn children(&self) -> &[ParseNode] {
        &self.children
    }

    pub fn is_conditional(&self) -> bool {
        self.is_conditional
    }

    /// Number of tokens this subtree compiles to, including injected `tAttr` tokens.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    #[cfg(test)]
    pub(crate) fn with_token_count(mut self, token_count: usize) -> Self {
        self.token_count = token_count;
        self
    }
}

/// Reject token fields that have no BIFF8 encoding, and jump markup that only the compiler
/// may place.
fn check_encodable(token: &Ptg) -> Result<(), InvalidTree> {
    let check_col = |cell: &CellRef| {
        if cell.col > MAX_COL {
            return Err(InvalidTree::ColumnOutOfRange { col: cell.col });
        }
        Ok(())
    };
    match token {
        Ptg::FuncVar { id, argc, .. } => {
            if *argc > MAX_FUNC_ARGS {
                return Err(InvalidTree::TooManyArguments {
                    ptg: token.mnemonic(),
                    argc: *argc as usize,
                });
            }
            if *id > MAX_FUNCTION_ID {
                return Err(InvalidTree::FunctionIdOutOfRange { id: *id });
            }
            Ok(())
        }
        Ptg::Ref { cell, .. } => check_col(cell),
        Ptg::Area { first, last, .. } => {
            check_col(first)?;
            check_col(last)
        }
        Ptg::Attr(_) => Err(InvalidTree::CompilerOnlyToken {
            ptg: token.mnemonic(),
        }),
        _ => Ok(()),
    }
}
