/*
 * OSPREY Toolkit
 * Copyright (C) 2023 the OSPREY contributors (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://docs.rs/osprey/
 */

use crate::errors::{InvalidRiseSetSnafu, PhysicsResult};
use crate::time::Date;
use core::fmt;
use core::ops::{BitAnd, BitOr, Sub};
use hifitime::{Duration, TimeUnits};
use snafu::ensure;

/// Statistic selector for gap and access-time queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stat {
    Min,
    Max,
    Mean,
}

/// A set of visibility windows as a flat, strictly ascending list of
/// rise/set instants (offsets from some reference epoch).
///
/// Supports the interval algebra access analysis is built from: union,
/// intersection, and difference, plus gap and access-time statistics.
/// Touching windows merge under union; touching is not overlap for
/// intersection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiseSetArray {
    risesets: Vec<Duration>,
}

impl RiseSetArray {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validated construction from a flat rise/set list.
    pub fn new(risesets: Vec<Duration>) -> PhysicsResult<Self> {
        ensure!(
            risesets.len() % 2 == 0,
            InvalidRiseSetSnafu {
                reason: "must hold an even count of instants".to_string(),
            }
        );
        for pair in risesets.windows(2) {
            ensure!(
                pair[0] < pair[1],
                InvalidRiseSetSnafu {
                    reason: "instants must be strictly ascending and unique".to_string(),
                }
            );
        }
        Ok(Self { risesets })
    }

    /// Construction from whole seconds, the common test and scripting form.
    pub fn from_seconds(seconds: &[f64]) -> PhysicsResult<Self> {
        Self::new(seconds.iter().map(|s| s.seconds()).collect())
    }

    /// Builds windows from an ordered list of crossing dates relative to an
    /// epoch. `start_above` says whether the interval begins in visibility
    /// (so the first crossing is a set rather than a rise); `span_end` closes
    /// a trailing open window.
    pub fn from_crossings(
        crossings: &[Date],
        epoch: Date,
        start_above: bool,
        span_end: Duration,
    ) -> PhysicsResult<Self> {
        let mut instants = Vec::with_capacity(crossings.len() + 2);
        if start_above {
            instants.push(Duration::ZERO);
        }
        for date in crossings {
            instants.push(*date - epoch);
        }
        if instants.len() % 2 == 1 {
            instants.push(span_end);
        }
        Self::new(instants)
    }

    /// Number of stored instants (twice the window count).
    pub fn len(&self) -> usize {
        self.risesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risesets.is_empty()
    }

    pub fn as_slice(&self) -> &[Duration] {
        &self.risesets
    }

    /// Iterates over the (rise, set) window pairs.
    pub fn windows(&self) -> impl Iterator<Item = (Duration, Duration)> + '_ {
        self.risesets.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Appends a window at the end; an out-of-order window is routed through
    /// the general insertion.
    pub fn append(&mut self, rise: Duration, set: Duration) -> PhysicsResult<()> {
        if let Some(&last) = self.risesets.last() {
            if rise < last {
                return self.insert(rise, set);
            }
        }
        ensure!(
            rise < set,
            InvalidRiseSetSnafu {
                reason: "window set must follow its rise".to_string(),
            }
        );
        self.risesets.push(rise);
        self.risesets.push(set);
        Ok(())
    }

    /// Prepends a window; an overlapping window is routed through the
    /// general insertion.
    pub fn prepend(&mut self, rise: Duration, set: Duration) -> PhysicsResult<()> {
        if let Some(&first) = self.risesets.first() {
            if set > first {
                return self.insert(rise, set);
            }
        }
        ensure!(
            rise < set,
            InvalidRiseSetSnafu {
                reason: "window set must follow its rise".to_string(),
            }
        );
        self.risesets.insert(0, set);
        self.risesets.insert(0, rise);
        Ok(())
    }

    /// Inserts a window anywhere, merging overlaps.
    pub fn insert(&mut self, rise: Duration, set: Duration) -> PhysicsResult<()> {
        let single = Self::new(vec![rise, set])?;
        *self = self.union(&single);
        Ok(())
    }

    /// Set union: windows that touch or overlap merge.
    pub fn union(&self, other: &Self) -> Self {
        let mut windows: Vec<(Duration, Duration)> =
            self.windows().chain(other.windows()).collect();
        windows.sort_by_key(|(rise, _)| *rise);

        let mut merged: Vec<Duration> = Vec::with_capacity(windows.len() * 2);
        for (rise, set) in windows {
            match merged.last_mut() {
                Some(last_set) if rise <= *last_set => {
                    if set > *last_set {
                        *last_set = set;
                    }
                }
                _ => {
                    merged.push(rise);
                    merged.push(set);
                }
            }
        }
        Self { risesets: merged }
    }

    /// Set intersection: only strict overlaps survive.
    pub fn intersection(&self, other: &Self) -> Self {
        let a: Vec<_> = self.windows().collect();
        let b: Vec<_> = other.windows().collect();
        let mut result = Vec::new();

        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let rise = a[i].0.max(b[j].0);
            let set = a[i].1.min(b[j].1);
            if rise < set {
                result.push(rise);
                result.push(set);
            }
            if a[i].1 <= b[j].1 {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self { risesets: result }
    }

    /// Set difference: the parts of `self` not covered by `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let clips: Vec<_> = other.windows().collect();
        let mut result = Vec::new();

        for (rise, set) in self.windows() {
            let mut cursor = rise;
            for &(clip_rise, clip_set) in &clips {
                if clip_set <= cursor || clip_rise >= set {
                    continue;
                }
                if clip_rise > cursor {
                    result.push(cursor);
                    result.push(clip_rise);
                }
                cursor = cursor.max(clip_set);
                if cursor >= set {
                    break;
                }
            }
            if cursor < set {
                result.push(cursor);
                result.push(set);
            }
        }
        Self { risesets: result }
    }

    /// Gap statistics over the dark intervals between windows.
    pub fn gap(&self, stat: Stat) -> Duration {
        if self.risesets.len() <= 2 {
            return Duration::ZERO;
        }
        let gaps: Vec<f64> = self
            .risesets
            .windows(2)
            .skip(1)
            .step_by(2)
            .map(|pair| (pair[1] - pair[0]).to_seconds())
            .collect();
        statistic(&gaps)
            .map(|(min, max, mean)| match stat {
                Stat::Min => min,
                Stat::Max => max,
                Stat::Mean => mean,
            })
            .unwrap_or(0.0)
            .seconds()
    }

    /// Access-time statistics over the windows themselves.
    pub fn access_time(&self, stat: Stat) -> Duration {
        let accesses: Vec<f64> = self
            .windows()
            .map(|(rise, set)| (set - rise).to_seconds())
            .collect();
        statistic(&accesses)
            .map(|(min, max, mean)| match stat {
                Stat::Min => min,
                Stat::Max => max,
                Stat::Mean => mean,
            })
            .unwrap_or(0.0)
            .seconds()
    }
}

fn statistic(samples: &[f64]) -> Option<(f64, f64, f64)> {
    if samples.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &sample in samples {
        min = min.min(sample);
        max = max.max(sample);
        sum += sample;
    }
    Some((min, max, sum / samples.len() as f64))
}

impl BitOr for &RiseSetArray {
    type Output = RiseSetArray;

    fn bitor(self, other: &RiseSetArray) -> RiseSetArray {
        self.union(other)
    }
}

impl BitAnd for &RiseSetArray {
    type Output = RiseSetArray;

    fn bitand(self, other: &RiseSetArray) -> RiseSetArray {
        self.intersection(other)
    }
}

impl Sub for &RiseSetArray {
    type Output = RiseSetArray;

    fn sub(self, other: &RiseSetArray) -> RiseSetArray {
        self.difference(other)
    }
}

impl fmt::Display for RiseSetArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, instant) in self.risesets.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{instant}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod ut_riseset {
    use super::*;

    fn rsa(seconds: &[f64]) -> RiseSetArray {
        RiseSetArray::from_seconds(seconds).unwrap()
    }

    #[test]
    fn test_validation() {
        assert!(RiseSetArray::from_seconds(&[0.0, 1.0, 2.0]).is_err());
        assert!(RiseSetArray::from_seconds(&[1.0, 0.0]).is_err());
        assert!(RiseSetArray::from_seconds(&[1.0, 1.0]).is_err());
        assert!(RiseSetArray::from_seconds(&[]).is_ok());
    }

    #[test]
    fn test_union() {
        let a = rsa(&[0.0, 2.0]);
        let b = rsa(&[1.0, 2.0]);
        let expected = rsa(&[0.0, 2.0]);
        assert_eq!(a.union(&b), expected);
        assert_eq!(b.union(&a), expected);
    }

    #[test]
    fn test_union_varied() {
        let a = rsa(&[0.0, 3.0]);
        let b = rsa(&[1.0, 2.0, 3.0, 4.0]);
        let expected = rsa(&[0.0, 4.0]);
        assert_eq!(a.union(&b), expected);
        assert_eq!(b.union(&a), expected);
    }

    #[test]
    fn test_union_touching_windows_merge() {
        let a = rsa(&[0.0, 1.0, 2.0, 3.0]);
        let b = rsa(&[1.0, 2.0, 3.0, 4.0]);
        let expected = rsa(&[0.0, 4.0]);
        assert_eq!(a.union(&b), expected);
        assert_eq!(b.union(&a), expected);
    }

    #[test]
    fn test_union_empty() {
        let a = rsa(&[0.0, 1.0]);
        let b = RiseSetArray::empty();
        assert_eq!(a.union(&b), a);
        assert_eq!(b.union(&a), a);
    }

    #[test]
    fn test_intersection() {
        let a = rsa(&[0.0, 2.0]);
        let b = rsa(&[1.0, 2.0]);
        let expected = rsa(&[1.0, 2.0]);
        assert_eq!(a.intersection(&b), expected);
        assert_eq!(b.intersection(&a), expected);
    }

    #[test]
    fn test_intersection_varied() {
        let a = rsa(&[0.0, 3.0]);
        let b = rsa(&[1.0, 2.0, 3.0, 4.0]);
        let expected = rsa(&[1.0, 2.0]);
        assert_eq!(a.intersection(&b), expected);
        assert_eq!(b.intersection(&a), expected);
    }

    #[test]
    fn test_intersection_touching_is_empty() {
        let a = rsa(&[0.0, 1.0, 2.0, 3.0]);
        let b = rsa(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.intersection(&b), RiseSetArray::empty());
        assert_eq!(b.intersection(&a), RiseSetArray::empty());
    }

    #[test]
    fn test_intersection_empty() {
        let a = rsa(&[0.0, 1.0]);
        let b = RiseSetArray::empty();
        assert_eq!(a.intersection(&b), RiseSetArray::empty());
        assert_eq!(b.intersection(&a), RiseSetArray::empty());
    }

    #[test]
    fn test_difference() {
        let a = rsa(&[0.0, 2.0]);
        let b = rsa(&[1.0, 2.0]);
        assert_eq!(a.difference(&b), rsa(&[0.0, 1.0]));
        assert_eq!(b.difference(&a), RiseSetArray::empty());
    }

    #[test]
    fn test_difference_varied() {
        let a = rsa(&[0.0, 3.0]);
        let b = rsa(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.difference(&b), rsa(&[0.0, 1.0, 2.0, 3.0]));
        assert_eq!(b.difference(&a), rsa(&[3.0, 4.0]));
    }

    #[test]
    fn test_difference_no_overlap() {
        let a = rsa(&[0.0, 1.0, 2.0, 3.0]);
        let b = rsa(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.difference(&b), a);
        assert_eq!(b.difference(&a), b);
    }

    #[test]
    fn test_operators() {
        let a = rsa(&[0.0, 2.0]);
        let b = rsa(&[1.0, 2.0]);
        assert_eq!(&a | &b, rsa(&[0.0, 2.0]));
        assert_eq!(&a & &b, rsa(&[1.0, 2.0]));
        assert_eq!(&a - &b, rsa(&[0.0, 1.0]));
    }

    #[test]
    fn test_append_prepend_insert() {
        let mut windows = rsa(&[10.0, 20.0]);
        windows.append(30.0.seconds(), 40.0.seconds()).unwrap();
        assert_eq!(windows, rsa(&[10.0, 20.0, 30.0, 40.0]));

        windows.prepend(0.0.seconds(), 5.0.seconds()).unwrap();
        assert_eq!(windows, rsa(&[0.0, 5.0, 10.0, 20.0, 30.0, 40.0]));

        // Overlapping insert merges.
        windows.insert(15.0.seconds(), 35.0.seconds()).unwrap();
        assert_eq!(windows, rsa(&[0.0, 5.0, 10.0, 40.0]));
    }

    #[test]
    fn test_stats() {
        let windows = rsa(&[0.0, 10.0, 20.0, 25.0, 40.0, 50.0]);
        assert_eq!(windows.access_time(Stat::Min), 5.0.seconds());
        assert_eq!(windows.access_time(Stat::Max), 10.0.seconds());
        assert_eq!(
            windows.access_time(Stat::Mean),
            (25.0 / 3.0).seconds()
        );

        assert_eq!(windows.gap(Stat::Min), 10.0.seconds());
        assert_eq!(windows.gap(Stat::Max), 15.0.seconds());
        assert_eq!(windows.gap(Stat::Mean), 12.5.seconds());

        // A single window has no gaps.
        assert_eq!(rsa(&[0.0, 1.0]).gap(Stat::Mean), Duration::ZERO);
    }

    #[test]
    fn test_from_crossings() {
        let epoch = Date::j2000();
        let crossings = [epoch + 10.0.seconds(), epoch + 20.0.seconds()];
        let windows =
            RiseSetArray::from_crossings(&crossings, epoch, false, 100.0.seconds()).unwrap();
        assert_eq!(windows, rsa(&[10.0, 20.0]));

        // Starting above the horizon, the first crossing closes a window.
        let windows =
            RiseSetArray::from_crossings(&crossings, epoch, true, 100.0.seconds()).unwrap();
        assert_eq!(windows, rsa(&[0.0, 10.0, 20.0, 100.0]));
    }
}
