use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::NaiveDate;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::prelude::*;

/// Billing month, written as `YYYY-MM`.
#[must_use]
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, SerializeDisplay, DeserializeFromStr,
)]
pub struct Month(NaiveDate);

#[cfg(test)]
impl Month {
    pub fn try_new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .with_context(|| format!("invalid month: {year}-{month}"))
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
            .map(Self)
            .with_context(|| format!("`{text}` is not a `YYYY-MM` month"))
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}
