//! Drives a parser through the fixture suite and collects per-fixture results.
//!
//! Each fixture is probed in isolation: a rejection, a wrong value and even a
//! panic inside the parser are all recorded as an [`Actual`] outcome, and the
//! run always continues with the next fixture.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::fixtures::{Case, Fixture, Section, Suite};
use crate::{CivilDateTime, Iso8601Parser, Rejected};

/// What a parser actually did with one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Actual {
    Produced(CivilDateTime),
    Rejected,
    /// The parser panicked instead of returning an outcome
    Panicked(String),
}

impl fmt::Display for Actual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Produced(value) => write!(f, "{value}"),
            Self::Rejected => f.write_str("rejected"),
            Self::Panicked(message) => write!(f, "panicked: {message}"),
        }
    }
}

impl Actual {
    /// Whether this outcome satisfies `fixture`.
    ///
    /// Acceptance requires a field-for-field match with the expected value.
    /// `CivilDateTime` has no zone component, so a produced value can never
    /// carry zone information.
    pub fn satisfies(&self, fixture: &Fixture) -> bool {
        match (fixture, self) {
            (Fixture::Accept { expected, .. }, Self::Produced(value)) => value.fields() == *expected,
            (Fixture::Reject { .. }, Self::Rejected) => true,
            _ => false,
        }
    }
}

/// A fixture the parser got wrong, with what it produced instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureFailure {
    pub fixture: Fixture,
    pub actual:  Actual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    pub description: &'static str,
    pub passed:      usize,
    pub failures:    Vec<FixtureFailure>,
}

impl CaseReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed()
    }

    pub fn is_pass(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub title: &'static str,
    pub cases: Vec<CaseReport>,
}

impl SectionReport {
    /// Fixtures that passed across all cases
    pub fn passed(&self) -> usize {
        self.cases.iter().map(|case| case.passed).sum()
    }

    /// Fixtures that failed across all cases
    pub fn failed(&self) -> usize {
        self.cases.iter().map(CaseReport::failed).sum()
    }

    pub fn total(&self) -> usize {
        self.passed() + self.failed()
    }

    pub fn cases_passed(&self) -> usize {
        self.cases.iter().filter(|case| case.is_pass()).count()
    }

    pub fn cases_failed(&self) -> usize {
        self.cases.len() - self.cases_passed()
    }

    pub fn is_pass(&self) -> bool {
        self.cases.iter().all(CaseReport::is_pass)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FixtureFailure> {
        self.cases.iter().flat_map(|case| case.failures.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub title:      &'static str,
    pub parser:     String,
    /// UTC wall-clock time the run started, if the system clock is usable
    pub started_at: Option<CivilDateTime>,
    pub sections:   Vec<SectionReport>,
    pub elapsed:    Duration,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.sections.iter().map(SectionReport::passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.sections.iter().map(SectionReport::failed).sum()
    }

    pub fn is_pass(&self) -> bool {
        self.sections.iter().all(SectionReport::is_pass)
    }
}

/// Runs fixtures through an injected parser.
pub struct Verifier<'p, P: ?Sized> {
    parser: &'p P,
}

impl<'p, P> Verifier<'p, P>
where
    P: Iso8601Parser + ?Sized,
{
    pub const fn new(parser: &'p P) -> Self {
        Self { parser }
    }

    /// Calls the parser once, turning a panic into [`Actual::Panicked`].
    ///
    /// The panic hook stays quiet for panics caught here; the message is
    /// logged at warn level instead.
    pub fn probe(&self, input: &str) -> Actual {
        install_quiet_hook();
        QUIET_PANICS.with(|quiet| quiet.set(true));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.parser.parse(input)));
        QUIET_PANICS.with(|quiet| quiet.set(false));

        match outcome {
            Ok(Ok(value)) => Actual::Produced(value),
            Ok(Err(Rejected)) => Actual::Rejected,
            Err(payload) => {
                let message = panic_message(&*payload);
                warn!(input, %message, "parser panicked");
                Actual::Panicked(message)
            },
        }
    }

    /// Probes `fixture` and returns the failure, if any.
    pub fn check(&self, fixture: &Fixture) -> Option<FixtureFailure> {
        let actual = self.probe(fixture.input());
        let pass = actual.satisfies(fixture);
        debug!(input = fixture.input(), %actual, pass, "checked fixture");
        if pass {
            None
        } else {
            Some(FixtureFailure {
                fixture: *fixture,
                actual,
            })
        }
    }

    pub fn run_case(&self, case: &Case) -> CaseReport {
        let mut passed = 0;
        let mut failures = Vec::new();
        for fixture in case.fixtures {
            match self.check(fixture) {
                None => passed += 1,
                Some(failure) => failures.push(failure),
            }
        }
        CaseReport {
            description: case.description,
            passed,
            failures,
        }
    }

    pub fn run_section(&self, section: &Section) -> SectionReport {
        let _span = info_span!("section", title = section.title).entered();
        let report = SectionReport {
            title: section.title,
            cases: section.cases.iter().map(|case| self.run_case(case)).collect(),
        };
        info!(
            passed = report.passed(),
            failed = report.failed(),
            "section finished"
        );
        report
    }

    /// Runs every section of `suite` in declaration order.
    pub fn run(&self, suite: &Suite) -> SuiteReport {
        let started_at = CivilDateTime::now_utc();
        let start = Instant::now();
        let sections = suite
            .sections
            .iter()
            .map(|section| self.run_section(section))
            .collect();
        SuiteReport {
            title: suite.title,
            parser: self.parser.name().to_owned(),
            started_at,
            sections,
            elapsed: start.elapsed(),
        }
    }
}

/// Grades `parser` against `suite`.
pub fn verify<P>(parser: &P, suite: &Suite) -> SuiteReport
where
    P: Iso8601Parser + ?Sized,
{
    Verifier::new(parser).run(suite)
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wraps the current panic hook so it is skipped while this thread is inside
/// [`Verifier::probe`]. Panics anywhere else still reach the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
