//! # Compiled Programs
//!
//! A [`Program`] is an equation whose names have been bound to numeric
//! slots. The caller owns the input slots and reads the outputs back from
//! the same slice after [`Program::run`]; locals created by assignment live
//! in a scratch area owned by the run, on the stack for up to
//! [`INLINE_LOCALS`] locals.
//!
//! ## Example
//!
//! ```rust
//! use geom_equation::Program;
//!
//! let program = Program::compile("t = x * 2; y = t + 1", &["x", "y"]).unwrap();
//! let mut slots = [3.0, 0.0];
//! program.run(&mut slots);
//! assert_eq!(slots[1], 7.0);
//! ```

use std::collections::HashMap;

use crate::ast::{BinaryOp, Expr, Statement, UnaryOp};
use crate::error::ParseError;
use crate::functions::Function;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// Named constants available to every equation unless shadowed.
const BUILTIN_CONSTANTS: [(&str, f64); 4] = [
    ("PI", std::f64::consts::PI),
    ("pi", std::f64::consts::PI),
    ("TAU", std::f64::consts::TAU),
    ("E", std::f64::consts::E),
];

// =============================================================================
// NODES
// =============================================================================

/// Resolved expression node.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Const(f64),
    Slot(usize),
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Ternary(Box<Node>, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

/// One resolved statement.
#[derive(Debug, Clone, PartialEq)]
struct Step {
    /// Slot written by an assignment, `None` for a bare expression.
    target: Option<usize>,
    node: Node,
}

#[inline]
fn truth(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

// =============================================================================
// PROGRAM
// =============================================================================

/// Locals a run keeps on the stack; larger programs allocate per run.
pub const INLINE_LOCALS: usize = 16;

/// A compiled equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    steps: Vec<Step>,
    /// Number of caller supplied slots.
    inputs: usize,
    /// Number of locals introduced by assignment.
    locals: usize,
}

impl Program {
    /// Compile an equation against a list of variable names.
    ///
    /// The i-th name is bound to slot `i` of the slice passed to
    /// [`Program::run`]. Assigning to an undeclared name creates a local.
    ///
    /// ## Errors
    ///
    /// Any syntax error, a read of a name that is neither declared, a
    /// constant nor assigned earlier, an unknown function or a wrong
    /// argument count.
    pub fn compile(source: &str, variables: &[&str]) -> Result<Self, ParseError> {
        Self::compile_with_constants(source, variables, &[])
    }

    /// Compile with additional named constants.
    ///
    /// Constants are folded into the program. Declared variables shadow
    /// constants of the same name, and constants shadow the built-in `PI`,
    /// `TAU` and `E`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use geom_equation::Program;
    ///
    /// let program = Program::compile_with_constants("x * k", &["x"], &[("k", 4.0)]).unwrap();
    /// assert_eq!(program.run(&mut [2.0]), 8.0);
    /// ```
    pub fn compile_with_constants(
        source: &str,
        variables: &[&str],
        constants: &[(&str, f64)],
    ) -> Result<Self, ParseError> {
        let statements = Parser::new(Lexer::new(source).tokenize()).parse()?;

        let mut scope = Scope::new(variables, constants);
        let steps = statements
            .iter()
            .map(|statement| scope.resolve_statement(statement))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            steps,
            inputs: variables.len(),
            locals: scope.locals,
        })
    }

    /// Number of caller supplied slots the program expects.
    pub fn input_count(&self) -> usize {
        self.inputs
    }

    /// Run the program.
    ///
    /// Reads and writes `slots` in place. Missing slots read as zero and
    /// writes to them are dropped.
    ///
    /// ## Returns
    ///
    /// Value of the last statement.
    pub fn run(&self, slots: &mut [f64]) -> f64 {
        if self.locals <= INLINE_LOCALS {
            let mut locals = [0.0; INLINE_LOCALS];
            self.run_in(slots, &mut locals[..self.locals])
        } else {
            self.run_in(slots, &mut vec![0.0; self.locals])
        }
    }

    fn run_in(&self, slots: &mut [f64], locals: &mut [f64]) -> f64 {
        let mut frame = Frame {
            inputs: slots,
            locals,
            base: self.inputs,
        };
        let mut last = 0.0;
        for step in &self.steps {
            last = frame.eval(&step.node);
            if let Some(target) = step.target {
                frame.store(target, last);
            }
        }
        last
    }
}

// =============================================================================
// NAME RESOLUTION
// =============================================================================

struct Scope<'a> {
    names: HashMap<&'a str, usize>,
    constants: HashMap<&'a str, f64>,
    next_slot: usize,
    locals: usize,
}

impl<'a> Scope<'a> {
    fn new(variables: &[&'a str], constants: &[(&'a str, f64)]) -> Self {
        let names = variables.iter().enumerate().map(|(i, name)| (*name, i)).collect();
        let mut table: HashMap<&str, f64> = BUILTIN_CONSTANTS.iter().copied().collect();
        table.extend(constants.iter().copied());
        Self {
            names,
            constants: table,
            next_slot: variables.len(),
            locals: 0,
        }
    }

    fn resolve_statement(&mut self, statement: &'a Statement) -> Result<Step, ParseError> {
        match statement {
            Statement::Assign { name, value, .. } => {
                // Right side first so `t = t + 1` on a new local is an error
                let node = self.resolve(value)?;
                let target = match self.names.get(name.as_str()) {
                    Some(&slot) => slot,
                    None => {
                        let slot = self.next_slot;
                        self.next_slot += 1;
                        self.locals += 1;
                        self.names.insert(name.as_str(), slot);
                        slot
                    }
                };
                Ok(Step {
                    target: Some(target),
                    node,
                })
            }
            Statement::Expr(expr) => Ok(Step {
                target: None,
                node: self.resolve(expr)?,
            }),
        }
    }

    fn resolve(&self, expr: &Expr) -> Result<Node, ParseError> {
        let node = match expr {
            Expr::Number(value) => Node::Const(*value),
            Expr::Variable { name, offset } => {
                if let Some(&slot) = self.names.get(name.as_str()) {
                    Node::Slot(slot)
                } else if let Some(&value) = self.constants.get(name.as_str()) {
                    Node::Const(value)
                } else {
                    return Err(ParseError::UnknownVariable {
                        name: name.clone(),
                        offset: *offset,
                    });
                }
            }
            Expr::Unary { op, operand } => Node::Unary(*op, Box::new(self.resolve(operand)?)),
            Expr::Binary { op, lhs, rhs } => Node::Binary(
                *op,
                Box::new(self.resolve(lhs)?),
                Box::new(self.resolve(rhs)?),
            ),
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => Node::Ternary(
                Box::new(self.resolve(cond)?),
                Box::new(self.resolve(then)?),
                Box::new(self.resolve(otherwise)?),
            ),
            Expr::Call { name, args, offset } => {
                let function = Function::lookup(name).ok_or_else(|| ParseError::UnknownFunction {
                    name: name.clone(),
                    offset: *offset,
                })?;
                if !function.arity().accepts(args.len()) {
                    return Err(ParseError::WrongArgCount {
                        name: name.clone(),
                        expected: function.arity().describe(),
                        found: args.len(),
                    });
                }
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Node::Call(function, args)
            }
        };
        Ok(node)
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

struct Frame<'s> {
    inputs: &'s mut [f64],
    locals: &'s mut [f64],
    /// First slot index that refers to a local.
    base: usize,
}

impl Frame<'_> {
    fn load(&self, slot: usize) -> f64 {
        if slot < self.base {
            self.inputs.get(slot).copied().unwrap_or(0.0)
        } else {
            self.locals.get(slot - self.base).copied().unwrap_or(0.0)
        }
    }

    fn store(&mut self, slot: usize, value: f64) {
        let cell = if slot < self.base {
            self.inputs.get_mut(slot)
        } else {
            self.locals.get_mut(slot - self.base)
        };
        if let Some(cell) = cell {
            *cell = value;
        }
    }

    fn eval(&self, node: &Node) -> f64 {
        match node {
            Node::Const(value) => *value,
            Node::Slot(slot) => self.load(*slot),
            Node::Unary(op, operand) => {
                let value = self.eval(operand);
                match op {
                    UnaryOp::Neg => -value,
                    UnaryOp::Plus => value,
                    UnaryOp::Not => truth(value == 0.0),
                }
            }
            Node::Binary(BinaryOp::And, lhs, rhs) => {
                truth(self.eval(lhs) != 0.0 && self.eval(rhs) != 0.0)
            }
            Node::Binary(BinaryOp::Or, lhs, rhs) => {
                truth(self.eval(lhs) != 0.0 || self.eval(rhs) != 0.0)
            }
            Node::Binary(op, lhs, rhs) => {
                let a = self.eval(lhs);
                let b = self.eval(rhs);
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Rem => a % b,
                    BinaryOp::Pow => a.powf(b),
                    BinaryOp::Eq => truth(a == b),
                    BinaryOp::Ne => truth(a != b),
                    BinaryOp::Lt => truth(a < b),
                    BinaryOp::Le => truth(a <= b),
                    BinaryOp::Gt => truth(a > b),
                    BinaryOp::Ge => truth(a >= b),
                    BinaryOp::And => truth(a != 0.0 && b != 0.0),
                    BinaryOp::Or => truth(a != 0.0 || b != 0.0),
                }
            }
            Node::Ternary(cond, then, otherwise) => {
                if self.eval(cond) != 0.0 {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            Node::Call(function, args) => {
                let mut values = [0.0; 3];
                if args.len() <= values.len() {
                    for (value, arg) in values.iter_mut().zip(args) {
                        *value = self.eval(arg);
                    }
                    function.apply(&values[..args.len()])
                } else {
                    let values: Vec<f64> = args.iter().map(|arg| self.eval(arg)).collect();
                    function.apply(&values)
                }
            }
        }
    }
}
