//! The line-oriented commands of the interactive driver.
//!
//! Each line of input is one command:
//! ```text
//! 17              insert 17
//! insert 17       insert 17
//! 5,1,100         insert 5 random keys between 1 and 100
//! delete 17       (or `del 17`)
//! search 17       (or `find 17`)
//! print
//! quit            (or `exit`)
//! ```

use std::fmt;
use std::num::ParseIntError;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::trees::basic_tree;
use crate::trees::llrb::LLRBTree;
use crate::trees::observer::Observer;

/// The key type the driver works with.
pub type Key = i64;

/// The largest batch a single line may ask for.
pub const MAX_BATCH: usize = 1_000_000;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Insert(Key),
    /// Insert `count` random keys drawn uniformly from `range`.
    InsertRandom {
        count: usize,
        range: RangeInclusive<Key>,
    },
    Delete(Key),
    Search(Key),
    Print,
    Quit,
}

/// What running a [`Command`] did.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// How many of the given keys were new.
    Inserted { new: usize, given: usize },
    Deleted(bool),
    Found(bool),
    Printed(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{0}' needs a key")]
    MissingArgument(&'static str),

    #[error("'{input}' is not a valid key")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("a batch insert is '<count>,<lower>,<upper>', got '{0}'")]
    InvalidBatch(String),

    #[error("cannot draw keys from the empty range {lower}..={upper}")]
    EmptyRange { lower: Key, upper: Key },

    #[error("a batch of {count} keys is larger than the limit of {max}")]
    BatchTooLarge { count: usize, max: usize },
}

fn parse_number<T: std::str::FromStr<Err = ParseIntError>>(input: &str) -> Result<T, CommandError> {
    let input = input.trim();
    input.parse().map_err(|source| CommandError::InvalidNumber {
        input: input.to_string(),
        source,
    })
}

/// Parses either a single key or a `<count>,<lower>,<upper>` batch.
fn parse_insert(argument: &str) -> Result<Command, CommandError> {
    if !argument.contains(',') {
        return Ok(Command::Insert(parse_number(argument)?));
    }
    let parts: Vec<&str> = argument.split(',').collect();
    if parts.len() != 3 {
        return Err(CommandError::InvalidBatch(argument.to_string()));
    }
    let count = parse_number(parts[0])?;
    if count > MAX_BATCH {
        return Err(CommandError::BatchTooLarge {
            count,
            max: MAX_BATCH,
        });
    }
    let lower = parse_number(parts[1])?;
    let upper = parse_number(parts[2])?;
    if lower > upper {
        return Err(CommandError::EmptyRange { lower, upper });
    }
    Ok(Command::InsertRandom {
        count,
        range: lower..=upper,
    })
}

impl Command {
    /// Parses one line of input. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let mut words = line.splitn(2, char::is_whitespace);
        let head = words.next().unwrap_or_default();
        let argument = words.next().map(str::trim).filter(|arg| !arg.is_empty());

        let needs_key = |name: &'static str| argument.ok_or(CommandError::MissingArgument(name));

        let command = match head.to_ascii_lowercase().as_str() {
            "insert" | "add" => parse_insert(needs_key("insert")?)?,
            "delete" | "del" => Command::Delete(parse_number(needs_key("delete")?)?),
            "search" | "find" => Command::Search(parse_number(needs_key("search")?)?),
            "print" => Command::Print,
            "quit" | "exit" => Command::Quit,
            _ if head.starts_with(|c: char| c == '-' || c.is_ascii_digit()) => parse_insert(line)?,
            _ => return Err(CommandError::UnknownCommand(head.to_string())),
        };
        Ok(Some(command))
    }

    /// Runs the command against `tree`. Random batches draw from `rng`.
    pub fn apply<O, R>(&self, tree: &mut LLRBTree<Key, O>, rng: &mut R) -> Outcome
    where
        O: Observer<Key>,
        R: Rng,
    {
        match self {
            Command::Insert(key) => {
                let new = if tree.insert(*key) { 1 } else { 0 };
                Outcome::Inserted { new, given: 1 }
            }
            Command::InsertRandom { count, range } => {
                // once every key of the range was inserted, no draw can add one
                let span = (*range.end() as i128 - *range.start() as i128 + 1) as u128;
                let mut new = 0;
                for _ in 0..*count {
                    if new as u128 == span {
                        break;
                    }
                    if tree.insert(rng.gen_range(range.clone())) {
                        new += 1;
                    }
                }
                Outcome::Inserted { new, given: *count }
            }
            Command::Delete(key) => Outcome::Deleted(tree.delete(key)),
            Command::Search(key) => Outcome::Found(tree.search(key)),
            Command::Print => Outcome::Printed(basic_tree::print(tree.inner(), "")),
            Command::Quit => Outcome::Quit,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Inserted { new, given } => write!(f, "inserted {new} new of {given} keys"),
            Outcome::Deleted(true) => write!(f, "deleted"),
            Outcome::Deleted(false) => write!(f, "not present, nothing deleted"),
            Outcome::Found(true) => write!(f, "found"),
            Outcome::Found(false) => write!(f, "not found"),
            Outcome::Printed(tree) => write!(f, "{tree}"),
            Outcome::Quit => write!(f, "bye"),
        }
    }
}
