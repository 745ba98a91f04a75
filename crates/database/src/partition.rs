use chrono::{Datelike, NaiveDate, TimeDelta};
use core_types::TimeWindow;
use std::fmt;

/// One calendar month of hand history, stored as its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Partition {
    year: i32,
    month: u32,
}

impl Partition {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Year and zero-padded month, e.g. `202506`.
    pub fn label(&self) -> String {
        format!("{}{:02}", self.year, self.month)
    }

    pub fn collection_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.label())
    }

    /// Every month touching `[from, to]`, both end months included.
    /// Empty when `from` is after `to`.
    pub fn covering(from: NaiveDate, to: NaiveDate) -> Vec<Partition> {
        let mut partitions = Vec::new();
        if from > to {
            return partitions;
        }

        let last = Self::containing(to);
        let mut current = Self::containing(from);
        while current <= last {
            partitions.push(current);
            current = current.next();
        }
        partitions
    }

    /// Every month holding at least one instant of the half-open window.
    pub fn for_window(window: &TimeWindow) -> Vec<Partition> {
        if window.start >= window.end {
            return Vec::new();
        }
        let last_instant = window.end - TimeDelta::nanoseconds(1);
        Self::covering(window.start.date_naive(), last_instant.date_naive())
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
