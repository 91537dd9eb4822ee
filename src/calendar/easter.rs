use chrono::NaiveDate;

/// Month and day of Easter Sunday in the Gregorian calendar.
///
/// Anonymous Gregorian computus (Meeus/Jones/Butcher). Exact for years from
/// 1583 on; earlier years go through the same arithmetic but the result has
/// no historical meaning.
pub fn compute_easter(year: i32) -> (u32, u32) {
    let y = i64::from(year);
    let a = y.rem_euclid(19);
    let b = y.div_euclid(100);
    let c = y.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let g = (8 * b + 13).div_euclid(25);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;

    // n lies in 114..=160, so month is 3 or 4 and day 1..=31.
    ((n / 31) as u32, (n % 31 + 1) as u32)
}

/// Easter Sunday as a date, `None` only outside chrono's representable range.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let (month, day) = compute_easter(year);
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_easter_dates() {
        assert_eq!(compute_easter(2000), (4, 23));
        assert_eq!(compute_easter(2023), (4, 9));
        assert_eq!(compute_easter(2024), (3, 31));
        assert_eq!(compute_easter(2025), (4, 20));
        assert_eq!(compute_easter(2026), (4, 5));
        assert_eq!(compute_easter(1954), (4, 18));
        assert_eq!(compute_easter(2285), (3, 22));
        assert_eq!(compute_easter(2038), (4, 25));
    }

    #[test]
    fn always_a_sunday_between_march_22_and_april_25() {
        use chrono::{Datelike, Weekday};

        for year in 1583..=2500 {
            let date = easter_sunday(year).expect("in range");
            assert_eq!(date.weekday(), Weekday::Sun, "year {year}");
            let earliest = NaiveDate::from_ymd_opt(year, 3, 22).expect("valid date");
            let latest = NaiveDate::from_ymd_opt(year, 4, 25).expect("valid date");
            assert!(date >= earliest && date <= latest, "year {year}: {date}");
        }
    }
}
