/// Function call kinds supported by both backends.
///
/// Date parts extract an integer component from a date-time value; the
/// string functions follow the remote service's semantics (0-based indices,
/// -1 for "not found"), which the SQL writer emulates on top of the
/// embedded engine's 1-based builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCallKind {
    // Date parts
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,

    // Math
    /// Round half away from zero
    Round,
    /// Largest integer not greater than the argument
    Floor,
    /// Smallest integer not less than the argument
    Ceiling,

    // String
    ToLower,
    ToUpper,
    Length,
    Trim,
    /// Whether the first argument starts with the second
    StartsWith,
    /// Whether the first argument ends with the second
    EndsWith,
    /// Whether the first argument occurs within the second
    SubstringOf,
    Concat,
    /// 0-based index of the second argument in the first, -1 if absent
    IndexOf,
    /// Substring from a 0-based position, with an optional length
    Substring,
    Replace,
}
