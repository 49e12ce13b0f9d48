//! Two-phase payload of the `PtgAttr` control-flow tokens emitted for `IF`.
//!
//! A jump is created as an [`UnresolvedJump`] when its slot is reserved and turned into a
//! [`ResolvedJump`] once the bytes it skips have been emitted. `resolve` consumes the builder,
//! so a distance can only ever be set once and a resolved jump is never mutated afterwards.

use crate::error::CompileError;

/// Encoded size of any `PtgAttr` token: `[0x19][grbit: u8][wAttr: u16]`.
pub const ATTR_SIZE: usize = 4;

pub(crate) const T_ATTR_IF: u8 = 0x02;
pub(crate) const T_ATTR_SKIP: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    /// `tAttrIf`: evaluator jumps forward when the condition on the stack is false.
    BranchIfFalse,
    /// `tAttrSkip`: unconditional forward jump.
    Skip,
}

impl JumpKind {
    pub fn grbit(self) -> u8 {
        match self {
            JumpKind::BranchIfFalse => T_ATTR_IF,
            JumpKind::Skip => T_ATTR_SKIP,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[must_use = "an unresolved jump has to be resolved before it can be emitted"]
pub struct UnresolvedJump {
    kind: JumpKind,
}

impl UnresolvedJump {
    pub fn branch_if_false() -> Self {
        Self {
            kind: JumpKind::BranchIfFalse,
        }
    }

    pub fn skip() -> Self {
        Self {
            kind: JumpKind::Skip,
        }
    }

    pub fn kind(&self) -> JumpKind {
        self.kind
    }

    /// Fix the jump distance (in bytes, as stored in `wAttr`).
    pub fn resolve(self, distance: usize) -> Result<ResolvedJump, CompileError> {
        let distance =
            u16::try_from(distance).map_err(|_| CompileError::JumpOutOfRange { distance })?;
        Ok(ResolvedJump {
            kind: self.kind,
            distance,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedJump {
    kind: JumpKind,
    distance: u16,
}

impl ResolvedJump {
    pub fn kind(&self) -> JumpKind {
        self.kind
    }

    pub fn distance(&self) -> u16 {
        self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_kind_and_distance() {
        let jump = UnresolvedJump::branch_if_false().resolve(9).unwrap();
        assert_eq!(jump.kind(), JumpKind::BranchIfFalse);
        assert_eq!(jump.distance(), 9);
        assert_eq!(jump.kind().grbit(), 0x02);
    }

    #[test]
    fn resolve_rejects_distances_wider_than_u16() {
        let err = UnresolvedJump::skip().resolve(70_000).unwrap_err();
        assert_eq!(err, CompileError::JumpOutOfRange { distance: 70_000 });
    }
}
