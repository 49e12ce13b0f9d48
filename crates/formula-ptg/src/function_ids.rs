#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    pub id: u16,
    pub name: &'static str,
    pub min_args: u8,
    pub max_args: u8,
}

impl FunctionSpec {
    const fn new(id: u16, name: &'static str, min_args: u8, max_args: u8) -> Self {
        Self {
            id,
            name,
            min_args,
            max_args,
        }
    }

    /// Fixed-arity functions are stored as `PtgFunc`, everything else as `PtgFuncVar`.
    pub fn is_fixed_arity(&self) -> bool {
        self.min_args == self.max_args
    }

    pub fn accepts(&self, argc: usize) -> bool {
        (self.min_args as usize..=self.max_args as usize).contains(&argc)
    }
}

/// BIFF `iftab` of `IF`, the only function whose calls get `tAttrIf`/`tAttrSkip` markup.
pub const FUNCTION_ID_IF: u16 = 0x0001;

/// Most operands a BIFF8 function call may take (`cparams` is 7 bits, Excel stops at 30).
pub const MAX_FUNC_ARGS: u8 = 30;

/// Largest `iftab` a `PtgFuncVar` can carry; bit 15 is `fCeFunc`.
pub const MAX_FUNCTION_ID: u16 = 0x7FFF;

// NOTE: ids are BIFF8 built-in function indices (`iftab`). Only functions a formula parser
// commonly hands us are listed; anything else has to be built with an explicit id.
pub(crate) const FUNCTION_SPECS: &[FunctionSpec] = &[
    // Statistics / Math
    FunctionSpec::new(0x0000, "COUNT", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x0004, "SUM", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x0005, "AVERAGE", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x0006, "MIN", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x0007, "MAX", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x0013, "PI", 0, 0),
    FunctionSpec::new(0x0018, "ABS", 1, 1),
    FunctionSpec::new(0x0019, "INT", 1, 1),
    FunctionSpec::new(0x001B, "ROUND", 2, 2),
    FunctionSpec::new(0x001D, "INDEX", 2, 4),
    FunctionSpec::new(0x0027, "MOD", 2, 2),
    FunctionSpec::new(0x00A9, "COUNTA", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x00D4, "ROUNDUP", 2, 2),
    FunctionSpec::new(0x00D5, "ROUNDDOWN", 2, 2),
    FunctionSpec::new(0x015B, "COUNTBLANK", 1, 1),
    // Text
    FunctionSpec::new(0x001F, "MID", 3, 3),
    FunctionSpec::new(0x0020, "LEN", 1, 1),
    FunctionSpec::new(0x0052, "SEARCH", 2, 3),
    FunctionSpec::new(0x0073, "LEFT", 1, 2),
    FunctionSpec::new(0x0074, "RIGHT", 1, 2),
    FunctionSpec::new(0x0076, "TRIM", 1, 1),
    FunctionSpec::new(0x0077, "UPPER", 1, 1),
    FunctionSpec::new(0x0078, "LOWER", 1, 1),
    FunctionSpec::new(0x007C, "FIND", 2, 3),
    FunctionSpec::new(0x0150, "CONCATENATE", 1, MAX_FUNC_ARGS),
    // Logical
    FunctionSpec::new(FUNCTION_ID_IF, "IF", 2, 3),
    FunctionSpec::new(0x0003, "ISERROR", 1, 1),
    FunctionSpec::new(0x0024, "AND", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x0025, "OR", 1, MAX_FUNC_ARGS),
    FunctionSpec::new(0x0026, "NOT", 1, 1),
    // Lookup
    FunctionSpec::new(0x0040, "MATCH", 2, 3),
    FunctionSpec::new(0x0065, "HLOOKUP", 3, 4),
    FunctionSpec::new(0x0066, "VLOOKUP", 3, 4),
    // Date / time
    FunctionSpec::new(0x0041, "DATE", 3, 3),
    FunctionSpec::new(0x0043, "DAY", 1, 1),
    FunctionSpec::new(0x0044, "MONTH", 1, 1),
    FunctionSpec::new(0x0045, "YEAR", 1, 1),
    FunctionSpec::new(0x004A, "NOW", 0, 0),
    FunctionSpec::new(0x00DD, "TODAY", 0, 0),
];

pub fn function_spec_from_name(name: &str) -> Option<FunctionSpec> {
    let upper = name.trim().to_ascii_uppercase();
    FUNCTION_SPECS
        .iter()
        .find(|spec| spec.name == upper)
        .copied()
}

pub fn function_spec_from_id(id: u16) -> Option<FunctionSpec> {
    FUNCTION_SPECS.iter().find(|spec| spec.id == id).copied()
}

pub fn function_name_to_id(name: &str) -> Option<u16> {
    function_spec_from_name(name).map(|spec| spec.id)
}

pub fn function_id_to_name(id: u16) -> Option<&'static str> {
    function_spec_from_id(id).map(|spec| spec.name)
}
