//! Configuration options for validation behavior
//!
//! Both knobs default to the typed reading of a schema. The alternatives
//! reproduce how records were judged by the dynamically typed validator this
//! library replaces, for callers that need identical verdicts.

// ============================================================================
// Zero-valued Bounds
// ============================================================================

/// How a bound equal to zero (`min`, `max`, `minLength`, `maxLength`) is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroBounds {
    /// Zero is a real bound: `min: 0` rejects `-5` (default)
    #[default]
    Enforce,
    /// Zero means "no bound": `min: 0` accepts `-5`
    Ignore,
}

// ============================================================================
// String Length Unit
// ============================================================================

/// What `minLength`/`maxLength` count on a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Unicode scalar values (default)
    #[default]
    Chars,
    /// UTF-16 code units
    Utf16,
}

impl LengthUnit {
    /// Length of `s` in this unit
    pub fn measure(self, s: &str) -> usize {
        match self {
            Self::Chars => s.chars().count(),
            Self::Utf16 => s.encode_utf16().count(),
        }
    }
}

// ============================================================================
// Validator Config
// ============================================================================

/// Configuration options for validation behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Treatment of zero-valued bounds
    pub zero_bounds: ZeroBounds,

    /// Unit for string length bounds
    pub length_unit: LengthUnit,
}

impl ValidatorConfig {
    /// Create a new validator config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Verdict-for-verdict compatibility with the legacy validator
    pub fn legacy() -> Self {
        Self {
            zero_bounds: ZeroBounds::Ignore,
            length_unit: LengthUnit::Utf16,
        }
    }

    /// Set zero-bound handling
    pub fn zero_bounds(mut self, zero_bounds: ZeroBounds) -> Self {
        self.zero_bounds = zero_bounds;
        self
    }

    /// Set string length unit
    pub fn length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }

    /// Filter a length bound through the zero-bound policy
    pub(crate) fn length_bound(&self, bound: Option<usize>) -> Option<usize> {
        match (bound, self.zero_bounds) {
            (Some(0), ZeroBounds::Ignore) => None,
            (bound, _) => bound,
        }
    }

    /// Filter a numeric bound through the zero-bound policy
    pub(crate) fn numeric_bound(&self, bound: Option<f64>) -> Option<f64> {
        match (bound, self.zero_bounds) {
            // -0.0 == 0.0, so both signs are ignored
            (Some(b), ZeroBounds::Ignore) if b == 0.0 => None,
            (bound, _) => bound,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
