//! Random password generation from a fixed set of character-class tiers.
//!
//! Raw form input is validated into a [`GenerationRequest`] before anything is
//! generated; a request that fails validation never produces output or writes
//! history.

use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::GeneratorConfig;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LETTERS_DIGITS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LETTERS_DIGITS_PUNCTUATION: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Character-class tier controlling the generation alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    /// Lowercase letters
    Low,
    /// Upper and lowercase letters
    Medium,
    /// Letters and digits
    High,
    /// Letters, digits and ASCII punctuation
    Max,
}

impl Complexity {
    pub const ALL: [Complexity; 4] = [
        Complexity::Low,
        Complexity::Medium,
        Complexity::High,
        Complexity::Max,
    ];

    pub fn alphabet(&self) -> &'static [u8] {
        match self {
            Complexity::Low => LOWERCASE,
            Complexity::Medium => LETTERS,
            Complexity::High => LETTERS_DIGITS,
            Complexity::Max => LETTERS_DIGITS_PUNCTUATION,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
            Complexity::Max => "max",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(Complexity::Low),
            "medium" => Ok(Complexity::Medium),
            "high" => Ok(Complexity::High),
            "max" => Ok(Complexity::Max),
            other => Err(GeneratorError::UnknownComplexity(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must be a positive integer")]
    InvalidNumber(&'static str),

    #[error("{field} must not exceed {max}")]
    TooLarge { field: &'static str, max: usize },

    #[error("unknown complexity '{0}', expected low, medium, high or max")]
    UnknownComplexity(String),
}

/// A validated generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub count: usize,
    pub complexity: Complexity,
}

impl GenerationRequest {
    pub fn new(
        length: usize,
        count: usize,
        complexity: Complexity,
        limits: &GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        check_range("length", length, limits.max_length)?;
        check_range("count", count, limits.max_count)?;
        Ok(Self {
            length,
            count,
            complexity,
        })
    }

    /// Validate raw form fields
    pub fn parse(
        length: Option<&str>,
        count: Option<&str>,
        complexity: Option<&str>,
        limits: &GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        let length = parse_number("length", length)?;
        let count = parse_number("count", count)?;
        let complexity = complexity
            .filter(|c| !c.trim().is_empty())
            .ok_or(GeneratorError::MissingField("complexity"))?
            .parse::<Complexity>()?;
        Self::new(length, count, complexity, limits)
    }
}

fn parse_number(field: &'static str, raw: Option<&str>) -> Result<usize, GeneratorError> {
    let raw = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(GeneratorError::MissingField(field))?;
    raw.parse::<usize>()
        .map_err(|_| GeneratorError::InvalidNumber(field))
}

fn check_range(field: &'static str, value: usize, max: usize) -> Result<(), GeneratorError> {
    if value == 0 {
        return Err(GeneratorError::InvalidNumber(field));
    }
    if value > max {
        return Err(GeneratorError::TooLarge { field, max });
    }
    Ok(())
}

/// One password of `length` characters drawn uniformly, with replacement
pub fn generate_password<R: Rng + ?Sized>(length: usize, complexity: Complexity, rng: &mut R) -> String {
    let alphabet = complexity.alphabet();
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Exactly `request.count` independent passwords
pub fn generate_batch<R: Rng + ?Sized>(request: &GenerationRequest, rng: &mut R) -> Vec<String> {
    (0..request.count)
        .map(|_| generate_password(request.length, request.complexity, rng))
        .collect()
}
