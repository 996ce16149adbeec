//! # Built-in Functions
//!
//! Math functions callable from equations. All take and return `f64`.
//!
//! | Name | Arity | Meaning |
//! |------|-------|---------|
//! | `sin cos tan asin acos atan` | 1 | trigonometry (radians) |
//! | `sinh cosh tanh` | 1 | hyperbolic |
//! | `atan2(y, x)` | 2 | four-quadrant arc tangent |
//! | `sqrt abs exp ln log log10 log2` | 1 | `log` is the natural logarithm |
//! | `pow(a, b)` | 2 | `a^b` |
//! | `floor ceil round fract sign` | 1 | rounding helpers |
//! | `min max` | ≥ 2 | |
//! | `mod(a, b)` | 2 | floored modulo, result has the sign of `b` |
//! | `clamp(x, lo, hi)` | 3 | |
//! | `mix(a, b, t)` | 3 | linear interpolation |
//! | `step(edge, x)` | 2 | `0` below edge, `1` otherwise |
//! | `smoothstep(e0, e1, x)` | 3 | Hermite interpolation |
//! | `deg rad` | 1 | angle conversion |

// =============================================================================
// ARITY
// =============================================================================

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many.
    Exact(usize),
    /// At least this many.
    AtLeast(usize),
}

impl Arity {
    /// Check whether `count` arguments are accepted.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }

    /// Human readable form for error messages.
    pub fn describe(self) -> String {
        match self {
            Self::Exact(n) => n.to_string(),
            Self::AtLeast(n) => format!("at least {n}"),
        }
    }
}

// =============================================================================
// FUNCTION
// =============================================================================

/// A built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Abs,
    Exp,
    Ln,
    Log10,
    Log2,
    Pow,
    Floor,
    Ceil,
    Round,
    Fract,
    Sign,
    Min,
    Max,
    Mod,
    Clamp,
    Mix,
    Step,
    Smoothstep,
    Deg,
    Rad,
}

impl Function {
    /// Look up a function by name.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use geom_equation::functions::Function;
    ///
    /// assert_eq!(Function::lookup("sqrt"), Some(Function::Sqrt));
    /// assert_eq!(Function::lookup("nope"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "atan2" => Self::Atan2,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "pow" => Self::Pow,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "fract" => Self::Fract,
            "sign" => Self::Sign,
            "min" => Self::Min,
            "max" => Self::Max,
            "mod" => Self::Mod,
            "clamp" => Self::Clamp,
            "mix" => Self::Mix,
            "step" => Self::Step,
            "smoothstep" => Self::Smoothstep,
            "deg" => Self::Deg,
            "rad" => Self::Rad,
            _ => return None,
        };
        Some(function)
    }

    /// Accepted argument count.
    pub fn arity(self) -> Arity {
        match self {
            Self::Atan2 | Self::Pow | Self::Mod | Self::Step => Arity::Exact(2),
            Self::Clamp | Self::Mix | Self::Smoothstep => Arity::Exact(3),
            Self::Min | Self::Max => Arity::AtLeast(2),
            _ => Arity::Exact(1),
        }
    }

    /// Apply the function to already evaluated arguments.
    ///
    /// The argument count must satisfy [`Function::arity`]; this is checked
    /// when the program is compiled.
    pub fn apply(self, args: &[f64]) -> f64 {
        let a = args.first().copied().unwrap_or(0.0);
        let b = args.get(1).copied().unwrap_or(0.0);
        let c = args.get(2).copied().unwrap_or(0.0);
        match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Atan2 => a.atan2(b),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Sqrt => a.sqrt(),
            Self::Abs => a.abs(),
            Self::Exp => a.exp(),
            Self::Ln => a.ln(),
            Self::Log10 => a.log10(),
            Self::Log2 => a.log2(),
            Self::Pow => a.powf(b),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Round => a.round(),
            Self::Fract => a - a.floor(),
            Self::Sign => {
                if a > 0.0 {
                    1.0
                } else if a < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            Self::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Mod => a - b * (a / b).floor(),
            Self::Clamp => a.max(b).min(c),
            Self::Mix => a + (b - a) * c,
            Self::Step => {
                if b < a {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Smoothstep => {
                let t = ((c - a) / (b - a)).clamp(0.0, 1.0);
                t * t * (3.0 - 2.0 * t)
            }
            Self::Deg => a.to_degrees(),
            Self::Rad => a.to_radians(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
