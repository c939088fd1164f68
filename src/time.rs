//! Date text to epoch-day timestamps

use chrono::{Datelike, NaiveDate};

use crate::{PrepError, Result};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// `num_days_from_ce` of 1970-01-01
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Days since 1970-01-01 for the `YYYY-MM-DD` date leading `datestr`.
///
/// Only the first whitespace-separated token is read. Dates are naive
/// proleptic Gregorian; no timezone is applied.
pub fn from_date_text_to_timestamp(datestr: &str) -> Result<f64> {
    let token = datestr
        .split_whitespace()
        .next()
        .ok_or_else(|| PrepError::format(format!("no date in {:?}", datestr)))?;

    let parts: Vec<&str> = token.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(PrepError::format(format!(
            "date {:?} is not of the form YYYY-MM-DD",
            token
        )));
    };

    let year: i32 = parse_component(year, token)?;
    let month: u32 = parse_component(month, token)?;
    let day: u32 = parse_component(day, token)?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(PrepError::format(format!(
            "year {} in {:?} is outside {}..={}",
            year, token, MIN_YEAR, MAX_YEAR
        )));
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| PrepError::format(format!("invalid calendar date {:?}", token)))?;

    Ok(f64::from(date.num_days_from_ce() - EPOCH_DAYS_FROM_CE))
}

fn parse_component<T: std::str::FromStr>(component: &str, token: &str) -> Result<T> {
    component.parse().map_err(|_| {
        PrepError::format(format!(
            "non-integer component {:?} in date {:?}",
            component, token
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_epoch_offsets() {
        assert_eq!(from_date_text_to_timestamp("1970-01-01").unwrap(), 0.0);
        assert_eq!(from_date_text_to_timestamp("1970-01-02 extra text").unwrap(), 1.0);
        assert_eq!(from_date_text_to_timestamp("1969-12-31").unwrap(), -1.0);
        assert_eq!(from_date_text_to_timestamp("2000-03-01").unwrap(), 11017.0);
        assert_eq!(from_date_text_to_timestamp("  2020-02-29\t12:00").unwrap(), 18321.0);
    }

    #[test]
    fn test_invalid_dates() {
        for bad in [
            "",
            "   ",
            "2020-02-30",
            "2021-02-29",
            "2020-13-01",
            "2020-00-10",
            "2020-1-32",
            "2020-01",
            "2020-01-01-01",
            "2020/01/01",
            "20x0-01-01",
            "0000-01-01",
        ] {
            assert!(
                matches!(from_date_text_to_timestamp(bad), Err(PrepError::Format(_))),
                "expected format error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_unpadded_components() {
        assert_eq!(from_date_text_to_timestamp("1970-1-2").unwrap(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_consecutive_days(days in -719_000i32..2_900_000) {
            let date = NaiveDate::from_num_days_from_ce_opt(EPOCH_DAYS_FROM_CE + days).unwrap();
            let text = date.format("%Y-%m-%d").to_string();
            let ts = from_date_text_to_timestamp(&text).unwrap();
            prop_assert_eq!(ts, days as f64);
            prop_assert_eq!(from_date_text_to_timestamp(&text).unwrap(), ts);
        }
    }
}
