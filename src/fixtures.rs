//! The qualifier suite: fixed acceptance and rejection fixtures, grouped into
//! described cases and requirement sections.

use serde::Serialize;

use crate::DateTimeFields;

/// One input string and the outcome a correct parser must produce for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "expect", rename_all = "snake_case")]
pub enum Fixture {
    /// The parser must succeed with exactly these fields
    Accept {
        input:    &'static str,
        expected: DateTimeFields,
    },
    /// The parser must reject the input
    Reject { input: &'static str },
}

impl Fixture {
    pub const fn input(&self) -> &'static str {
        match *self {
            Self::Accept { input, .. } | Self::Reject { input } => input,
        }
    }

    /// Expected fields for an acceptance fixture, `None` for a rejection fixture
    pub const fn expected(&self) -> Option<DateTimeFields> {
        match *self {
            Self::Accept { expected, .. } => Some(expected),
            Self::Reject { .. } => None,
        }
    }

    pub const fn is_accept(&self) -> bool {
        matches!(self, Self::Accept { .. })
    }
}

const fn accept(input: &'static str, expected: DateTimeFields) -> Fixture {
    Fixture::Accept { input, expected }
}

const fn reject(input: &'static str) -> Fixture {
    Fixture::Reject { input }
}

/// A described group of fixtures. A case passes only if all of its fixtures pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Case {
    pub description: &'static str,
    pub fixtures:    &'static [Fixture],
}

/// A requirement tier of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub cases: &'static [Case],
}

impl Section {
    pub fn fixtures(&self) -> impl Iterator<Item = &'static Fixture> {
        self.cases.iter().flat_map(|case| case.fixtures.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suite {
    pub title:    &'static str,
    pub sections: &'static [Section],
}

impl Suite {
    pub fn fixtures(&self) -> impl Iterator<Item = &'static Fixture> {
        self.sections.iter().flat_map(Section::fixtures)
    }

    /// All acceptance fixtures, in declaration order
    pub fn accepted(&self) -> impl Iterator<Item = &'static Fixture> {
        self.fixtures().filter(|fixture| fixture.is_accept())
    }

    /// All rejection fixtures, in declaration order
    pub fn rejected(&self) -> impl Iterator<Item = &'static Fixture> {
        self.fixtures().filter(|fixture| !fixture.is_accept())
    }
}

pub const VALID_DATES: &[Fixture] = &[
    // Year 1583 is the first year the standard covers without agreement
    accept("1583-01-01", DateTimeFields::date(1583, 1, 1)),
    accept("2000-02-29", DateTimeFields::date(2000, 2, 29)),
    accept("2020-01-10", DateTimeFields::date(2020, 1, 10)),
    accept("9999-12-31", DateTimeFields::date(9999, 12, 31)),
    accept("2020-02-29", DateTimeFields::date(2020, 2, 29)),
];

pub const VALID_DATETIMES: &[Fixture] = &[
    // HH:MM:SS
    accept("2019-12-18T21:10:48", DateTimeFields::new(2019, 12, 18, 21, 10, 48)),
    accept("2028-02-29T00:00:00", DateTimeFields::new(2028, 2, 29, 0, 0, 0)),
    accept("2399-08-31T23:59:59", DateTimeFields::new(2399, 8, 31, 23, 59, 59)),
    // HH:MM
    accept("1956-01-31T08:17", DateTimeFields::new(1956, 1, 31, 8, 17, 0)),
    accept("1910-06-22T11:11", DateTimeFields::new(1910, 6, 22, 11, 11, 0)),
    accept("1905-12-22T23:59", DateTimeFields::new(1905, 12, 22, 23, 59, 0)),
    // HH
    accept("1912-06-23T00", DateTimeFields::new(1912, 6, 23, 0, 0, 0)),
    accept("1791-12-26T23", DateTimeFields::new(1791, 12, 26, 23, 0, 0)),
    accept("1596-03-31T12", DateTimeFields::new(1596, 3, 31, 12, 0, 0)),
];

pub const INVALID_DATETIMES: &[Fixture] = &[
    // Invalid values in a valid format
    reject("2001-02-29"),
    reject("1989-13-01"),
    reject("1990-01-32"),
    reject("2345-2-10"),
    reject("1788-12-1"),
    // Valid values in an invalid format
    reject("2012/10/02"),
    reject("1999:10:02"),
    reject("2012 10 02"),
    reject("17-12-2019"),
    reject("90-03-14"),
    reject("2019-1012"),
    reject("201910-12"),
];

pub const OUT_OF_SUBSET: &[Fixture] = &[
    reject("1900-02-29"),
    reject("0000-01-01"),
    reject("2019-04-31"),
    reject("2019-12-18T24:00"),
    reject("2019-12-18T23:60"),
    reject("2019-12-18T23:59:60"),
    reject("2019-12-18T21:10:48Z"),
    reject("2019-12-18T21:10:48+01:00"),
    reject("2019-12-18T21:10:48.5"),
    reject("2019-12-18T2110"),
    reject("2019-12-18T"),
    reject("2019-12-18 21:10:48"),
    reject(" 2019-12-18"),
    reject("2019-12-18t21"),
    reject("+2019-12-18"),
    reject(""),
];

pub const BASIC_REQUIREMENTS: Section = Section {
    title: "Basic Requirements",
    cases: &[
        Case {
            description: "Parser parses valid date strings",
            fixtures:    VALID_DATES,
        },
        Case {
            description: "Parser parses valid datetime strings",
            fixtures:    VALID_DATETIMES,
        },
        Case {
            description: "Parser rejects invalid datetime strings",
            fixtures:    INVALID_DATETIMES,
        },
    ],
};

pub const ADVANCED_REQUIREMENTS: Section = Section {
    title: "Advanced Requirements",
    cases: &[
        Case {
            description: "Parser parses valid date strings",
            fixtures:    VALID_DATES,
        },
        Case {
            description: "Parser rejects boundary and out-of-subset strings",
            fixtures:    OUT_OF_SUBSET,
        },
    ],
};

pub const QUALIFIER_SUITE: Suite = Suite {
    title:    "ISO 8601 Qualifier: Test Suite",
    sections: &[BASIC_REQUIREMENTS, ADVANCED_REQUIREMENTS],
};

pub const fn qualifier_suite() -> &'static Suite {
    &QUALIFIER_SUITE
}
