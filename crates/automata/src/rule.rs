use std::fmt;

use crate::Error;

/// Maps each three-cell neighborhood to the next value of its center cell.
///
/// A neighborhood packs `(left, center, right)` into the code
/// `left * 4 + center * 2 + right`. Bit `i` of a rule number is the output
/// for code `i`, so rule 90 is the classic left-XOR-right rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleTable {
    outputs: [bool; 8],
}

impl RuleTable {
    /// Expands a rule number in `0..=255`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `number` is above 255.
    pub fn from_number(number: u32) -> Result<Self, Error> {
        u8::try_from(number)
            .map(Self::from)
            .map_err(|_| Error::invalid("rule", format!("must be in 0..=255, got {number}")))
    }

    /// Builds a table from its outputs, indexed by neighborhood code.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if any entry is not 0 or 1.
    pub fn from_table(table: [u8; 8]) -> Result<Self, Error> {
        let mut outputs = [false; 8];
        for (code, (&entry, output)) in table.iter().zip(&mut outputs).enumerate() {
            *output = match entry {
                0 => false,
                1 => true,
                _ => {
                    return Err(Error::invalid(
                        "rule",
                        format!("table entry {code} must be 0 or 1, got {entry}"),
                    ));
                }
            };
        }
        Ok(Self { outputs })
    }

    /// Returns the next value for a neighborhood.
    #[must_use]
    pub fn lookup(&self, left: bool, center: bool, right: bool) -> bool {
        let code = (usize::from(left) << 2) | (usize::from(center) << 1) | usize::from(right);
        self.outputs[code]
    }

    /// Returns the rule number this table expands from.
    #[must_use]
    pub fn number(&self) -> u8 {
        self.outputs
            .iter()
            .enumerate()
            .filter(|&(_, &output)| output)
            .fold(0, |number, (code, _)| number | (1 << code))
    }

    /// Returns the outputs as 0/1, indexed by neighborhood code.
    #[must_use]
    pub fn table(&self) -> [u8; 8] {
        self.outputs.map(u8::from)
    }
}

impl From<u8> for RuleTable {
    fn from(number: u8) -> Self {
        Self {
            outputs: std::array::from_fn(|code| (number >> code) & 1 == 1),
        }
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.number())
    }
}
