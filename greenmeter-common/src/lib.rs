//! # Shared Status Model (Classifier ↔ Display)
//!
//! Pure classification of a green-energy percentage into one of the fixed
//! status colors. Kept free of I/O and of `std` so any display front-end
//! can reuse it.
//!
//! ## Buckets
//!
//! | Percentage        | Day          | Night          |
//! |-------------------|--------------|----------------|
//! | `p <= 40`         | [`DayRed`]   | [`NightRed`]   |
//! | `40 < p <= 80`    | [`DayYellow`]| [`NightYellow`]|
//! | `p > 80`          | [`DayGreen`] | [`NightGreen`] |
//! | fetch failed      | [`Grey`]     | [`Grey`]       |
//!
//! Zero and negative percentages land in the red bucket. Grey only ever
//! means "no value could be fetched".
//!
//! [`DayRed`]: StatusColor::DayRed
//! [`NightRed`]: StatusColor::NightRed
//! [`DayYellow`]: StatusColor::DayYellow
//! [`NightYellow`]: StatusColor::NightYellow
//! [`DayGreen`]: StatusColor::DayGreen
//! [`NightGreen`]: StatusColor::NightGreen
//! [`Grey`]: StatusColor::Grey

#![cfg_attr(not(test), no_std)]

// ============================================================================
// Thresholds
// ============================================================================

/// Upper bound (inclusive) of the red bucket
pub const RED_MAX_PERCENT: i64 = 40;

/// Upper bound (inclusive) of the yellow bucket
pub const YELLOW_MAX_PERCENT: i64 = 80;

/// First local hour counted as night
pub const NIGHT_START_HOUR: u32 = 21;

/// First local hour counted as day
pub const DAY_START_HOUR: u32 = 6;

// ============================================================================
// Colors
// ============================================================================

/// Plain 8-bit RGB triple, independent of any rendering library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Display status derived from one metric reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusColor {
    NightRed,
    DayRed,
    NightYellow,
    DayYellow,
    NightGreen,
    DayGreen,
    /// No value available (fetch failed or nothing fetched yet)
    #[default]
    Grey,
}

impl StatusColor {
    /// Color for the outcome of a fetch: grey on failure, classified otherwise
    #[must_use]
    pub fn for_outcome<E>(outcome: &Result<i64, E>, is_night: bool) -> Self {
        match outcome {
            Ok(percentage) => classify(*percentage, is_night),
            Err(_) => StatusColor::Grey,
        }
    }

    /// Fixed palette. Night variants are dimmed so the kiosk does not light
    /// up a dark room.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            StatusColor::NightRed => Rgb(139, 0, 0),
            StatusColor::DayRed => Rgb(255, 0, 0),
            StatusColor::NightYellow => Rgb(128, 128, 0),
            StatusColor::DayYellow => Rgb(255, 255, 0),
            StatusColor::NightGreen => Rgb(0, 100, 0),
            StatusColor::DayGreen => Rgb(0, 255, 0),
            StatusColor::Grey => Rgb(128, 128, 128),
        }
    }

    /// Short name for logs and headless output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            StatusColor::NightRed => "night-red",
            StatusColor::DayRed => "day-red",
            StatusColor::NightYellow => "night-yellow",
            StatusColor::DayYellow => "day-yellow",
            StatusColor::NightGreen => "night-green",
            StatusColor::DayGreen => "day-green",
            StatusColor::Grey => "grey",
        }
    }

    #[must_use]
    pub const fn is_night_variant(self) -> bool {
        matches!(
            self,
            StatusColor::NightRed | StatusColor::NightYellow | StatusColor::NightGreen
        )
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Map a percentage and the day/night flag to a status color.
///
/// The percentage is not clamped: values above 100 are green, values at or
/// below zero are red.
#[must_use]
pub const fn classify(percentage: i64, is_night: bool) -> StatusColor {
    if percentage <= RED_MAX_PERCENT {
        if is_night {
            StatusColor::NightRed
        } else {
            StatusColor::DayRed
        }
    } else if percentage <= YELLOW_MAX_PERCENT {
        if is_night {
            StatusColor::NightYellow
        } else {
            StatusColor::DayYellow
        }
    } else if is_night {
        StatusColor::NightGreen
    } else {
        StatusColor::DayGreen
    }
}

/// Night is 21:00 up to (excluding) 06:00 local time.
#[must_use]
pub const fn is_night(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour < DAY_START_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_bucket() {
        for p in 1..=40 {
            assert_eq!(classify(p, false), StatusColor::DayRed, "p={p}");
            assert_eq!(classify(p, true), StatusColor::NightRed, "p={p}");
        }
    }

    #[test]
    fn test_yellow_bucket() {
        for p in 41..=80 {
            assert_eq!(classify(p, false), StatusColor::DayYellow, "p={p}");
            assert_eq!(classify(p, true), StatusColor::NightYellow, "p={p}");
        }
    }

    #[test]
    fn test_green_bucket() {
        for p in [81, 90, 100] {
            assert_eq!(classify(p, false), StatusColor::DayGreen);
            assert_eq!(classify(p, true), StatusColor::NightGreen);
        }
    }

    #[test]
    fn test_zero_and_negative_are_red_not_grey() {
        assert_eq!(classify(0, false), StatusColor::DayRed);
        assert_eq!(classify(-5, true), StatusColor::NightRed);
    }

    #[test]
    fn test_above_hundred_is_green() {
        assert_eq!(classify(250, false), StatusColor::DayGreen);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(40, false), StatusColor::DayRed);
        assert_eq!(classify(41, false), StatusColor::DayYellow);
        assert_eq!(classify(80, false), StatusColor::DayYellow);
        assert_eq!(classify(81, false), StatusColor::DayGreen);
    }

    #[test]
    fn test_is_night_hours() {
        for hour in (21..=23).chain(0..=5) {
            assert!(is_night(hour), "hour={hour}");
        }
        for hour in 6..=20 {
            assert!(!is_night(hour), "hour={hour}");
        }
    }

    #[test]
    fn test_error_outcome_is_grey() {
        let failed: Result<i64, &str> = Err("connection refused");
        assert_eq!(StatusColor::for_outcome(&failed, false), StatusColor::Grey);
        assert_eq!(StatusColor::for_outcome(&failed, true), StatusColor::Grey);

        let ok: Result<i64, &str> = Ok(44);
        assert_eq!(StatusColor::for_outcome(&ok, false), StatusColor::DayYellow);
    }

    #[test]
    fn test_night_variants_are_dimmer() {
        let pairs = [
            (StatusColor::NightRed, StatusColor::DayRed),
            (StatusColor::NightYellow, StatusColor::DayYellow),
            (StatusColor::NightGreen, StatusColor::DayGreen),
        ];
        for (night, day) in pairs {
            let Rgb(nr, ng, nb) = night.rgb();
            let Rgb(dr, dg, db) = day.rgb();
            assert!(u32::from(nr) + u32::from(ng) + u32::from(nb) < u32::from(dr) + u32::from(dg) + u32::from(db));
            assert!(night.is_night_variant());
            assert!(!day.is_night_variant());
        }
    }
}
