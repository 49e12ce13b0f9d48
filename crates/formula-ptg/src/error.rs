use thiserror::Error;

/// A `ParseNode` could not be built from the supplied token and children.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTree {
    #[error("child {index} of {ptg} is missing")]
    MissingChild { index: usize, ptg: &'static str },
    #[error("IF takes 2 or 3 arguments, got {children}")]
    ConditionalArity { children: usize },
    #[error("{ptg} declares {declared} argument(s) but has {children} child node(s)")]
    ArgCountMismatch {
        ptg: &'static str,
        declared: usize,
        children: usize,
    },
    #[error("{ptg} takes {argc} arguments (max 30)")]
    TooManyArguments { ptg: &'static str, argc: usize },
    #[error("function id {id:#06x} does not fit in a PtgFuncVar")]
    FunctionIdOutOfRange { id: u16 },
    #[error("column {col} is past the last BIFF8 column (255)")]
    ColumnOutOfRange { col: u16 },
    #[error("{ptg} is produced by the compiler and cannot appear in a parse tree")]
    CompilerOnlyToken { ptg: &'static str },
}

/// A token could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    #[error("{name} accepts {min}..={max} arguments, got {argc}")]
    ArgCountOutOfRange {
        name: &'static str,
        min: u8,
        max: u8,
        argc: usize,
    },
    #[error("string literal has {len} characters (max 255)")]
    StringTooLong { len: usize },
}

/// Internal bookkeeping of the compiler went wrong.
///
/// These never describe the input tree (which was validated when it was built); they mean the
/// flattening algorithm itself is broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("token slot {index} was written twice")]
    PlaceholderAlreadyWritten { index: usize },
    #[error("token slot {index} was never reserved as a placeholder")]
    NotAPlaceholder { index: usize },
    #[error("token slot {index} was read before it was written")]
    UnwrittenSlot { index: usize },
    #[error("token buffer of length {len} overflowed")]
    BufferOverflow { len: usize },
    #[error("token buffer declared length {declared} but {written} slot(s) were filled")]
    LengthMismatch { declared: usize, written: usize },
}

/// A validated tree could not be compiled to a token array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("compiler invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
    #[error("jump distance {distance} does not fit in a tAttr operand")]
    JumpOutOfRange { distance: usize },
}
