/// Interrupt vector numbers and the half-open ranges the emitter walks.
/// These are plain values: created once per generation pass and never mutated.
use std::fmt;

/// First vector the kernel leaves to generated stubs; 0..19 have hand-written handlers.
pub const DEFAULT_LOWER: u32 = 19;

/// One past the last vector. The x86 IDT holds 256 gates.
pub const DEFAULT_UPPER: u32 = 256;

/// Number of gate slots in the x86 IDT.
pub const IDT_ENTRIES: u32 = 256;

/// A single interrupt vector number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorIndex(pub u32);

impl VectorIndex {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VectorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The half-open range `[lower, upper)` of vectors to generate.
/// A range with `lower >= upper` is empty, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorRange {
    pub lower: u32,
    pub upper: u32,
}

impl Default for VectorRange {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER,
            upper: DEFAULT_UPPER,
        }
    }
}

impl VectorRange {
    pub fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    pub fn len(&self) -> usize {
        self.upper.saturating_sub(self.lower) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.lower >= self.upper
    }

    /// Returns true if some vector in the range has no slot in a 256-entry IDT.
    pub fn exceeds_idt(&self) -> bool {
        !self.is_empty() && self.upper > IDT_ENTRIES
    }

    /// Ascending, step 1, no gaps.
    pub fn iter(&self) -> impl Iterator<Item = VectorIndex> {
        (self.lower..self.upper).map(VectorIndex)
    }
}

impl fmt::Display for VectorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}
