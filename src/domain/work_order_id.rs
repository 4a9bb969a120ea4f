use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const PREFIX: &str = "wo_";
const DATE_FORMAT: &str = "%Y%m%d";

/// Identifier of the form `wo_<YYYYMMDD>_<NNN>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkOrderId {
    date: NaiveDate,
    sequence: u32,
}

impl WorkOrderId {
    pub fn new(date: NaiveDate, sequence: u32) -> Self {
        Self { date, sequence }
    }

    /// Next id for `date` given every id already stored.
    ///
    /// Ids from other days are ignored. This is a read-then-write scheme:
    /// two callers working from the same snapshot get the same id.
    /// Returns `None` once the day's sequence is exhausted.
    pub fn next_for_date<'a, I>(existing: I, date: NaiveDate) -> Option<Self>
    where
        I: IntoIterator<Item = &'a WorkOrderId>,
    {
        let max_sequence = existing
            .into_iter()
            .filter(|id| id.date == date)
            .map(|id| id.sequence)
            .max()
            .unwrap_or(0);

        max_sequence
            .checked_add(1)
            .map(|sequence| Self::new(date, sequence))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl FromStr for WorkOrderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid work order id: {}", s);

        let rest = s.strip_prefix(PREFIX).ok_or_else(invalid)?;
        let (date_part, sequence_part) = rest.split_once('_').ok_or_else(invalid)?;

        if date_part.len() != 8 || sequence_part.len() < 3 {
            return Err(invalid());
        }
        if !sequence_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| invalid())?;
        let sequence = sequence_part.parse::<u32>().map_err(|_| invalid())?;

        Ok(Self { date, sequence })
    }
}

impl TryFrom<String> for WorkOrderId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WorkOrderId> for String {
    fn from(id: WorkOrderId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{:03}",
            PREFIX,
            self.date.format(DATE_FORMAT),
            self.sequence
        )
    }
}
