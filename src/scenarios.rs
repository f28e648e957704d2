//! Built-in scripts run by `neuvec --test`.

use thiserror::Error;

use crate::runner::{self, Report, RunError, RunOptions};

pub struct Scenario {
    pub name: &'static str,
    pub source: &'static str,
    pub keep_going: bool,
    pub expected: &'static [&'static str],
    /// Number of recovered index errors.
    pub expected_failures: usize,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("{name}: {source}")]
    Run {
        name: &'static str,
        #[source]
        source: RunError,
    },

    #[error("{name}: expected output {expected:?}, got {actual:?}")]
    Output {
        name: &'static str,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("{name}: expected {expected} recovered errors, got {actual}")]
    Failures {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl Scenario {
    pub fn check(&self) -> Result<Report, ScenarioError> {
        let options = RunOptions {
            keep_going: self.keep_going,
        };
        let report =
            runner::run_source(self.source, options).map_err(|source| ScenarioError::Run {
                name: self.name,
                source,
            })?;

        if report.output != self.expected {
            return Err(ScenarioError::Output {
                name: self.name,
                expected: self.expected.iter().map(|s| s.to_string()).collect(),
                actual: report.output,
            });
        }
        if report.failures.len() != self.expected_failures {
            return Err(ScenarioError::Failures {
                name: self.name,
                expected: self.expected_failures,
                actual: report.failures.len(),
            });
        }
        Ok(report)
    }
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "code_along",
        source: CODE_ALONG,
        keep_going: false,
        expected: &["2", "4", "[10, 99, 20, 30]", "4", "10", "[99, 20, 30]"],
        expected_failures: 0,
    },
    Scenario {
        name: "doubling",
        source: DOUBLING,
        keep_going: false,
        expected: &["1", "1", "2", "4", "4", "8"],
        expected_failures: 0,
    },
    Scenario {
        name: "find",
        source: FIND,
        keep_going: false,
        expected: &["0", "1", "-1", "7", "7", "-1"],
        expected_failures: 0,
    },
    Scenario {
        name: "rendering",
        source: RENDERING,
        keep_going: false,
        expected: &["[]", "Vector: []", "[5]", "Vector: [5, -6]"],
        expected_failures: 0,
    },
    Scenario {
        name: "pop",
        source: POP,
        keep_going: false,
        expected: &["2", "1", "0", "2"],
        expected_failures: 0,
    },
    Scenario {
        name: "out_of_range",
        source: OUT_OF_RANGE,
        keep_going: true,
        expected: &["[1]", "1", "0"],
        expected_failures: 6,
    },
];

const CODE_ALONG: &str = r#"
new 2
append 10
append 20
capacity
append 30
capacity
insert 1 99
show
capacity
remove 0
show
release
"#;

const DOUBLING: &str = r#"
new 1
capacity
append 1
capacity
append 2
capacity
append 3
capacity
append 4
capacity
append 5
capacity
"#;

const FIND: &str = r#"
new 4
append 7
append 3
append 7
find 7
find 3
find 9
pop
remove 0
find 7 # gone once removed
"#;

const RENDERING: &str = r#"
new 3
show
print
append 5
show
append -6
print
"#;

const POP: &str = r#"
new 2
append 1
append 2
pop
pop
size
capacity
"#;

const OUT_OF_RANGE: &str = r#"
new 2
append 1
get 1
set 1 5
remove 1
insert 2 5
get -1
show
pop
pop
size
"#;
