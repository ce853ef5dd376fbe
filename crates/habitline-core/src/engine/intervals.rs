//! Coverage-interval construction and snapping.
//!
//! For non-daily habits, a qualifying cluster of repetitions implicitly
//! covers a whole window of days. For a weekly habit, one repetition
//! covers seven days; for a twice-a-week habit, two repetitions close
//! enough together cover seven days. Each such window is an [`Interval`].
//! Intervals exist only transiently while checkmarks are being built.

use crate::day::Day;
use crate::frequency::Frequency;
use crate::habit::Repetition;

/// A coverage window derived from one qualifying cluster of repetitions.
///
/// `begin` is the oldest repetition in the cluster, `center` the newest,
/// and `end = begin + (denominator - 1)` before snapping. Invariant:
/// `begin <= center <= end`, preserved by snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Interval {
    pub begin: Day,
    pub center: Day,
    pub end: Day,
}

impl Interval {
    pub fn length(&self) -> i64 {
        self.begin.days_until(self.end) + 1
    }
}

/// Build the ascending list of coverage intervals for a repetition run.
///
/// Slides a window of `numerator` consecutive repetitions across `reps`
/// (which must be ascending by day). Windows whose endpoints are spread
/// over `denominator` days or more do not satisfy the frequency and are
/// skipped. For `numerator = 1` this degenerates to one interval per
/// repetition, spanning `denominator` days forward.
pub(crate) fn build(frequency: Frequency, reps: &[Repetition]) -> Vec<Interval> {
    let num = frequency.numerator() as usize;
    let den = frequency.denominator() as i64;

    let mut intervals = Vec::new();
    if reps.len() < num {
        return intervals;
    }
    for i in 0..=(reps.len() - num) {
        let first = &reps[i];
        let last = &reps[i + num - 1];

        let distance = first.day.days_until(last.day);
        if distance >= den {
            continue;
        }

        intervals.push(Interval {
            begin: first.day,
            center: last.day,
            end: first.day.plus(den - 1),
        });
    }
    intervals
}

/// Close gaps between chronologically adjacent intervals.
///
/// One left-to-right pass: each interval is shifted backward in time by
/// the size of the gap separating it from its predecessor, clamped so
/// that `end` never moves earlier than `center` (the window must still
/// contain the repetition that produced it). Forward slack propagates
/// backward, eliminating avoidable unchecked gaps without ever covering
/// a day before the underlying repetition occurred.
pub(crate) fn snap(intervals: &mut [Interval]) {
    for i in 1..intervals.len() {
        let prev_end = intervals[i - 1].end;
        let curr = intervals[i];

        let gap = prev_end.days_until(curr.begin) - 1;
        if gap <= 0 {
            continue;
        }

        let shift = gap.min(curr.center.days_until(curr.end));
        intervals[i].begin = curr.begin.minus(shift);
        intervals[i].end = curr.end.minus(shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> Day {
        Day::from_days(n).unwrap()
    }

    fn reps(days: &[i64]) -> Vec<Repetition> {
        days.iter().map(|&d| Repetition::checked(day(d))).collect()
    }

    fn freq(num: u32, den: u32) -> Frequency {
        Frequency::new(num, den).unwrap()
    }

    #[test]
    fn empty_repetitions_build_no_intervals() {
        assert!(build(Frequency::WEEKLY, &[]).is_empty());
    }

    #[test]
    fn weekly_builds_one_interval_per_repetition() {
        let intervals = build(Frequency::WEEKLY, &reps(&[100, 120]));
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].begin, day(100));
        assert_eq!(intervals[0].center, day(100));
        assert_eq!(intervals[0].end, day(106));
        assert_eq!(intervals[0].length(), 7);
    }

    #[test]
    fn daily_intervals_have_length_one() {
        let intervals = build(Frequency::DAILY, &reps(&[100, 101, 103]));
        assert_eq!(intervals.len(), 3);
        for interval in &intervals {
            assert_eq!(interval.length(), 1);
            assert_eq!(interval.begin, interval.end);
        }
    }

    #[test]
    fn spread_out_window_is_skipped() {
        // Two reps 8 days apart never satisfy 2-per-7.
        let intervals = build(freq(2, 7), &reps(&[100, 108]));
        assert!(intervals.is_empty());

        // 6 days apart qualifies.
        let intervals = build(freq(2, 7), &reps(&[100, 106]));
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].begin, day(100));
        assert_eq!(intervals[0].center, day(106));
        assert_eq!(intervals[0].end, day(106));
    }

    #[test]
    fn snap_closes_gap_between_intervals() {
        // Weekly reps at 100 and 110: interval ends at 106, next begins at
        // 110, leaving a 3-day gap (107..109) that snapping closes.
        let mut intervals = build(Frequency::WEEKLY, &reps(&[100, 110]));
        snap(&mut intervals);

        assert_eq!(intervals[0].end, day(106));
        assert_eq!(intervals[1].begin, day(107));
        assert_eq!(intervals[1].end, day(113));
        // Shifted interval still contains its repetition.
        assert!(intervals[1].center <= intervals[1].end);
        assert_eq!(intervals[1].center, day(110));
    }

    #[test]
    fn snap_never_moves_end_before_center() {
        // 2-per-7 windows where the second interval's center sits at its
        // end: the full 4-day gap cannot be absorbed, only part of it.
        let mut intervals = vec![
            Interval { begin: day(100), center: day(101), end: day(106) },
            Interval { begin: day(111), center: day(115), end: day(117) },
        ];
        snap(&mut intervals);

        assert_eq!(intervals[1].begin, day(109));
        assert_eq!(intervals[1].end, day(115));
        assert_eq!(intervals[1].center, day(115));
        assert!(intervals[1].center <= intervals[1].end);
    }

    #[test]
    fn snap_leaves_touching_intervals_alone() {
        let mut intervals = build(Frequency::WEEKLY, &reps(&[100, 104]));
        let before = intervals.clone();
        snap(&mut intervals);
        assert_eq!(intervals, before);
    }

    #[test]
    fn built_intervals_are_monotonic() {
        let intervals = build(freq(3, 7), &reps(&[100, 102, 104, 106, 110]));
        for interval in &intervals {
            assert!(interval.begin <= interval.center);
            assert!(interval.center <= interval.end);
        }
    }
}
