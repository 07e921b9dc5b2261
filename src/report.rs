//! Plain-text rendering of a [`SuiteReport`].
//!
//! The layout is a fixed-width console report: a header, one block per
//! section with a `[ PASS ]`/`[ FAIL ]` line per case, optional failure
//! details, and a summary table at the end.

use std::io::{self, Write};

use crate::fixtures::Fixture;
use crate::verifier::{CaseReport, FixtureFailure, SectionReport, SuiteReport};

const PLACEHOLDER: &str = "...";
/// Narrowest report whose case lines still fit a description and the status
pub const MIN_REPORT_WIDTH: usize = 23;
const SUMMARY_NAME_WIDTH: usize = 30;

/// Rendering configuration for the text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Overrides the suite title in the header
    pub title:     Option<String>,
    /// Name printed in the header, if any
    pub user:      Option<String>,
    /// 0: pass/fail per case. 1: adds fixture counts. 2+: adds failure details.
    pub verbosity: u8,
    pub max_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title:     None,
            user:      None,
            verbosity: 0,
            max_width: 100,
        }
    }
}

/// Writes the full text report for `report` to `out`.
///
/// # Errors
/// Returns any I/O error from `out`.
pub fn write_text<W: Write>(out: &mut W, report: &SuiteReport, options: &ReportOptions) -> io::Result<()> {
    let mut writer = TextWriter { out, options };
    writer.header(report)?;
    for section in &report.sections {
        writer.section(section)?;
    }
    writer.footer(report)
}

struct TextWriter<'a, W> {
    out:     &'a mut W,
    options: &'a ReportOptions,
}

impl<W: Write> TextWriter<'_, W> {
    fn verbose(&self) -> bool {
        self.options.verbosity > 0
    }

    fn writeln(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", shorten(text, self.options.max_width))
    }

    fn separator(&mut self, c: char) -> io::Result<()> {
        let line: String = std::iter::repeat_n(c, self.options.max_width).collect();
        writeln!(self.out, "{line}")
    }

    fn header(&mut self, report: &SuiteReport) -> io::Result<()> {
        let options = self.options;
        let title = options.title.as_deref().unwrap_or(report.title);
        self.separator('=')?;
        self.writeln(title)?;
        self.separator('=')?;
        if let Some(started) = report.started_at {
            self.writeln(&format!(
                "Date: {:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
                started.year(),
                started.month(),
                started.day(),
                started.hour(),
                started.minute(),
                started.second()
            ))?;
        }
        self.writeln(&format!("Parser: {}", report.parser))?;
        if let Some(user) = options.user.as_deref() {
            self.writeln(&format!("User: {user}"))?;
        }
        self.writeln("")
    }

    fn section(&mut self, section: &SectionReport) -> io::Result<()> {
        let counts_width = if self.verbose() { 14 } else { 0 };
        let title_width = self.options.max_width.saturating_sub(10 + counts_width);
        let mut title = fixed_width(section.title, title_width);
        if self.verbose() {
            title.push_str("   P   F   T");
        }

        self.writeln("")?;
        self.separator('=')?;
        writeln!(self.out, "{title}")?;
        self.separator('=')?;

        for case in &section.cases {
            self.case(case)?;
        }
        Ok(())
    }

    fn case(&mut self, case: &CaseReport) -> io::Result<()> {
        let description_width = self.options.max_width.saturating_sub(23);
        write!(self.out, "{}", fixed_width(case.description, description_width))?;
        if self.verbose() {
            write!(
                self.out,
                "{:>3} {:>3} {:>3}    ",
                case.passed,
                case.failed(),
                case.total()
            )?;
        } else {
            write!(self.out, "{:15}", "")?;
        }
        writeln!(self.out, "{}", if case.is_pass() { "[ PASS ]" } else { "[ FAIL ]" })?;

        if self.options.verbosity > 1 && !case.is_pass() {
            for failure in &case.failures {
                self.failure(failure)?;
            }
            self.separator('-')?;
            self.writeln("")?;
        }
        Ok(())
    }

    fn failure(&mut self, failure: &FixtureFailure) -> io::Result<()> {
        let expected = match failure.fixture {
            Fixture::Accept { expected, .. } => expected.to_string(),
            Fixture::Reject { .. } => "rejection".to_owned(),
        };

        self.writeln("")?;
        self.separator('-')?;
        self.writeln("Failing test case:")?;
        self.writeln(&format!("  Input:             {:?}", failure.fixture.input()))?;
        self.writeln(&format!("  Expected output:   {expected}"))?;
        self.writeln(&format!("  Test result:       {}", failure.actual))
    }

    fn footer(&mut self, report: &SuiteReport) -> io::Result<()> {
        self.writeln("")?;
        self.writeln("")?;
        self.separator('=')?;
        self.writeln("Test Suite Summary")?;
        self.separator('=')?;
        writeln!(
            self.out,
            "{:SUMMARY_NAME_WIDTH$} PASSED   FAILED   TOTAL   RESULT",
            ""
        )?;
        for section in &report.sections {
            let name = shorten(section.title, SUMMARY_NAME_WIDTH);
            writeln!(
                self.out,
                "{name:<SUMMARY_NAME_WIDTH$}  {:^6}   {:^6}  {:^5}    {}",
                section.cases_passed(),
                section.cases_failed(),
                section.cases.len(),
                if section.is_pass() { "PASS" } else { "FAIL" }
            )?;
        }
        self.separator('-')?;
        self.writeln(&format!(
            "Fixtures: {} passed, {} failed",
            report.passed(),
            report.failed()
        ))?;
        self.writeln(&format!(
            "Total running time: {:.3}s",
            report.elapsed.as_secs_f64()
        ))
    }
}

/// Truncates `text` to at most `width` characters, ending in `...` when cut.
fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width < PLACEHOLDER.len() {
        return text.chars().take(width).collect();
    }
    let keep = width.saturating_sub(PLACEHOLDER.len());
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str(PLACEHOLDER);
    shortened
}

/// Shortens `text` to `width` and pads it with spaces to exactly that width.
fn fixed_width(text: &str, width: usize) -> String {
    format!("{:<width$}", shorten(text, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::qualifier_suite;
    use crate::{CivilDateTime, ParseOutcome, Rejected, StrictParser, parse_iso8601, verify};

    fn render(report: &SuiteReport, options: &ReportOptions) -> String {
        let mut buffer = Vec::new();
        write_text(&mut buffer, report, options).expect("writing to a Vec cannot fail");
        String::from_utf8(buffer).expect("report is UTF-8")
    }

    fn dates_only(input: &str) -> ParseOutcome {
        if input.contains('T') { Err(Rejected) } else { parse_iso8601(input) }
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("short", 10), "short");
        assert_eq!(shorten("exactly10!", 10), "exactly10!");
        assert_eq!(shorten("this is too long", 10), "this is...");
        assert_eq!(shorten("abc", 2), "ab");
        assert_eq!(shorten("abcd", 3), "...");
        assert_eq!(shorten("abc", 0), "");
    }

    #[test]
    fn test_fixed_width_pads() {
        assert_eq!(fixed_width("ab", 5), "ab   ");
        assert_eq!(fixed_width("abcdefgh", 6), "abc...");
    }

    #[test]
    fn test_passing_report() {
        let report = verify(&StrictParser, qualifier_suite());
        let text = render(&report, &ReportOptions::default());

        assert!(text.contains("ISO 8601 Qualifier: Test Suite"));
        assert!(text.contains("Parser: strict"));
        assert!(text.contains("Basic Requirements"));
        assert!(text.contains("Advanced Requirements"));
        assert!(!text.contains("[ FAIL ]"));
        assert_eq!(text.matches("[ PASS ]").count(), 5);
        assert!(text.contains("Test Suite Summary"));
        assert!(text.contains("Total running time:"));
        assert!(!text.contains("Failing test case:"));
    }

    #[test]
    fn test_case_lines_are_aligned() {
        let report = verify(&StrictParser, qualifier_suite());
        let text = render(&report, &ReportOptions::default());
        for line in text.lines().filter(|line| line.ends_with("[ PASS ]")) {
            assert_eq!(line.chars().count(), 100 - 23 + 15 + 8, "{line:?}");
        }
    }

    #[test]
    fn test_verbose_counts() {
        let report = verify(&dates_only, qualifier_suite());
        let options = ReportOptions {
            verbosity: 1,
            ..ReportOptions::default()
        };
        let text = render(&report, &options);

        assert!(text.contains("   P   F   T"));
        let datetime_line = text
            .lines()
            .find(|line| line.starts_with("Parser parses valid datetime strings"))
            .expect("datetime case line");
        assert!(datetime_line.contains("  0   9   9"), "{datetime_line:?}");
        assert!(datetime_line.ends_with("[ FAIL ]"));
        assert!(!text.contains("Failing test case:"));
    }

    #[test]
    fn test_failure_details_at_high_verbosity() {
        let report = verify(&dates_only, qualifier_suite());
        let options = ReportOptions {
            verbosity: 2,
            user: Some("Ves Zappa".to_owned()),
            ..ReportOptions::default()
        };
        let text = render(&report, &options);

        assert!(text.contains("User: Ves Zappa"));
        assert_eq!(text.matches("Failing test case:").count(), 9);
        assert!(text.contains(r#"  Input:             "2019-12-18T21:10:48""#));
        assert!(text.contains("  Expected output:   2019-12-18T21:10:48"));
        assert!(text.contains("  Test result:       rejected"));
    }

    #[test]
    fn test_summary_table() {
        let report = verify(&dates_only, qualifier_suite());
        let text = render(&report, &ReportOptions::default());
        let summary: Vec<_> = text
            .lines()
            .skip_while(|line| *line != "Test Suite Summary")
            .collect();

        let basic = summary
            .iter()
            .find(|line| line.starts_with("Basic Requirements"))
            .expect("basic summary row");
        assert!(basic.ends_with("FAIL"), "{basic:?}");
        assert!(basic.contains("  2   ") && basic.contains("  1   "), "{basic:?}");

        let advanced = summary
            .iter()
            .find(|line| line.starts_with("Advanced Requirements"))
            .expect("advanced summary row");
        assert!(advanced.ends_with("PASS"), "{advanced:?}");
        assert!(text.contains("Fixtures: 38 passed, 9 failed"));
    }

    #[test]
    fn test_title_override_and_narrow_width() {
        let report = verify(&StrictParser, qualifier_suite());
        let options = ReportOptions {
            title: Some("A rather long custom title for the report".to_owned()),
            max_width: 20,
            ..ReportOptions::default()
        };
        let text = render(&report, &options);
        assert!(text.contains("A rather long cus..."));
        assert!(text.lines().all(|line| !line.starts_with("=") || line.len() == 20));
    }

    #[test]
    fn test_minimum_width_keeps_case_lines_in_bounds() {
        let report = verify(&StrictParser, qualifier_suite());
        let options = ReportOptions {
            max_width: MIN_REPORT_WIDTH,
            ..ReportOptions::default()
        };
        let text = render(&report, &options);
        let case_lines: Vec<_> = text.lines().filter(|line| line.ends_with("[ PASS ]")).collect();
        assert_eq!(case_lines.len(), 5);
        for line in case_lines {
            assert_eq!(line.chars().count(), MIN_REPORT_WIDTH, "{line:?}");
        }
    }

    #[test]
    fn test_date_line() {
        let mut report = verify(&StrictParser, qualifier_suite());
        report.started_at = Some(CivilDateTime::from_unix_seconds(1_700_000_000).expect("in range"));
        let text = render(&report, &ReportOptions::default());
        assert!(text.contains("Date: 2023-11-14 22:13:20 UTC"), "{text}");

        report.started_at = None;
        let text = render(&report, &ReportOptions::default());
        assert!(!text.contains("Date:"));
    }
}
