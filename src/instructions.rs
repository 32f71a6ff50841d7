//! Instruction scan over corrupted memory.
//!
//! Only `mul(a,b)`, `do()` and `don't()` are recognised; everything else in
//! the input is noise.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

fn instruction_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(mul|do|don't)\(([0-9,]*?)\)").expect("instruction pattern is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionError {
    /// `mul` did not get exactly two integer arguments
    InvalidArguments { instruction: String },
}

impl fmt::Display for InstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionError::InvalidArguments { instruction } => {
                write!(f, "Invalid arguments in {:?}", instruction)
            }
        }
    }
}

impl std::error::Error for InstructionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Mul(i64, i64),
    Do,
    Dont,
}

impl Instruction {
    fn from_parts(text: &str, name: &str, arguments: &str) -> Result<Self, InstructionError> {
        match name {
            "do" => Ok(Instruction::Do),
            "don't" => Ok(Instruction::Dont),
            _ => {
                let invalid = || InstructionError::InvalidArguments {
                    instruction: text.to_string(),
                };
                let (a, b) = arguments.split_once(',').ok_or_else(invalid)?;
                let a = a.parse().map_err(|_| invalid())?;
                let b = b.parse().map_err(|_| invalid())?;
                Ok(Instruction::Mul(a, b))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanTotals {
    /// Sum of every `mul`
    pub all: i64,
    /// Sum of `mul`s that ran while enabled
    pub enabled: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Instructions {
    instructions: Vec<Instruction>,
}

impl Instructions {
    pub fn scan(text: &str) -> Result<Self, InstructionError> {
        let instructions = instruction_pattern()
            .captures_iter(text)
            .map(|captures| Instruction::from_parts(&captures[0], &captures[1], &captures[2]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { instructions })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Run the program. Starts enabled; `don't()` disables and `do()`
    /// re-enables later `mul`s for the enabled total.
    pub fn totals(&self) -> ScanTotals {
        let mut totals = ScanTotals::default();
        let mut enabled = true;

        for instruction in &self.instructions {
            match *instruction {
                Instruction::Mul(a, b) => {
                    let product = a.saturating_mul(b);
                    totals.all = totals.all.saturating_add(product);
                    if enabled {
                        totals.enabled = totals.enabled.saturating_add(product);
                    }
                }
                Instruction::Do => enabled = true,
                Instruction::Dont => enabled = false,
            }
        }

        totals
    }
}
