use log::{debug, trace, warn};
use neu_vector::{ArrayError, NeuVector};
use thiserror::Error;

use crate::script::{self, Command, ScriptError, Statement};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ScriptError),

    #[error("no live array; start with `new <capacity>`")]
    NoArray,

    #[error("negative index {0}")]
    NegativeIndex(i64),

    #[error("invalid initial capacity {0}")]
    InvalidCapacity(i64),

    #[error(transparent)]
    Array(#[from] ArrayError),

    #[error("line {line} (`{command}`): {source}")]
    AtLine {
        line: usize,
        command: Command,
        #[source]
        source: Box<RunError>,
    },
}

impl RunError {
    /// Bad indices leave the array untouched, so a script may go on after them.
    pub fn is_index_error(&self) -> bool {
        match self {
            RunError::NegativeIndex(_) => true,
            RunError::Array(e) => e.is_index_error(),
            RunError::AtLine { source, .. } => source.is_index_error(),
            _ => false,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RunOptions {
    /// Record index errors and continue with the next command.
    pub keep_going: bool,
}

/// A recovered failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub line: usize,
    pub message: String,
}

/// What a script produced: one entry per value-returning command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: Vec<String>,
    pub failures: Vec<Failure>,
}

/// Executes commands against at most one live array.
#[derive(Debug, Default)]
pub struct Session {
    array: Option<NeuVector>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn array(&self) -> Option<&NeuVector> {
        self.array.as_ref()
    }

    /// Runs one command. Returns the line it prints, if any.
    pub fn execute(&mut self, command: Command) -> Result<Option<String>, RunError> {
        trace!("execute `{command}`");
        let printed = match command {
            Command::New(capacity) => {
                self.create(capacity)?;
                None
            }
            Command::Release => {
                self.array.take().ok_or(RunError::NoArray)?.release();
                None
            }
            Command::Append(value) => {
                self.live()?.append(value)?;
                None
            }
            Command::Insert(index, value) => {
                self.live()?.insert(to_index(index)?, value)?;
                None
            }
            Command::Set(index, value) => {
                self.live()?.set(to_index(index)?, value)?;
                None
            }
            Command::Get(index) => Some(self.live()?.get(to_index(index)?)?.to_string()),
            Command::Remove(index) => Some(self.live()?.remove(to_index(index)?)?.to_string()),
            Command::Pop => Some(self.live()?.pop()?.to_string()),
            Command::Find(value) => Some(self.live()?.find(&value).to_string()),
            Command::Size => Some(self.live()?.size().to_string()),
            Command::Capacity => Some(self.live()?.capacity().to_string()),
            Command::Print => Some(self.live()?.print_string()),
            Command::Show => Some(self.live()?.to_debug_string()),
        };
        Ok(printed)
    }

    fn create(&mut self, capacity: i64) -> Result<(), RunError> {
        let capacity = usize::try_from(capacity).map_err(|_| RunError::InvalidCapacity(capacity))?;
        let array = NeuVector::with_capacity(capacity)?;
        if let Some(old) = self.array.replace(array) {
            debug!("replacing live array {old}");
            old.release();
        }
        Ok(())
    }

    fn live(&mut self) -> Result<&mut NeuVector, RunError> {
        self.array.as_mut().ok_or(RunError::NoArray)
    }

    /// Runs statements in order, stopping at the first unrecoverable error.
    pub fn run(
        &mut self,
        statements: &[Statement],
        options: RunOptions,
    ) -> Result<Report, RunError> {
        let mut report = Report::default();
        for statement in statements {
            match self.execute(statement.command) {
                Ok(Some(line)) => report.output.push(line),
                Ok(None) => {}
                Err(e) if options.keep_going && e.is_index_error() => {
                    warn!("line {}: {e}", statement.line);
                    report.failures.push(Failure {
                        line: statement.line,
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    return Err(RunError::AtLine {
                        line: statement.line,
                        command: statement.command,
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(report)
    }
}

/// Parses and runs a whole script in a fresh session.
pub fn run_source(source: &str, options: RunOptions) -> Result<Report, RunError> {
    let statements = script::parse(source)?;
    debug!("parsed {} statements", statements.len());
    Session::new().run(&statements, options)
}

fn to_index(index: i64) -> Result<usize, RunError> {
    usize::try_from(index).map_err(|_| RunError::NegativeIndex(index))
}
