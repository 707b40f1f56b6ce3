//! The merge automaton.
//!
//! A [`Mode`] lists the lanes that still hold elements, ordered by their current heads. After the
//! head of the first lane has been written out, only that lane's new head has to be ranked
//! against the others, whose relative order is already known. Comparing it against the runner up
//! first settles the common case with a single comparison, the last lane is only looked at when
//! the refilled head falls behind the runner up.
//!
//! Ranking uses `(value, lane number)`, ties go to the lower numbered lane. Lanes are numbered
//! left to right, so equal elements leave the merge in input order.

use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lane {
    First,
    Second,
    Third,
}

/// Lanes that still hold elements, smallest head first. `M231` means lane 2 holds the smallest
/// head, followed by lane 3, followed by lane 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    M123,
    M132,
    M213,
    M231,
    M312,
    M321,
    M12,
    M13,
    M21,
    M23,
    M31,
    M32,
    M1,
    M2,
    M3,
}

/// How the refilled head ranks against the head of another lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rank {
    Ahead,
    Behind,
}

impl Rank {
    /// `ord` is the comparison of the refilled head of `refilled` against the head of `other`.
    #[inline]
    pub fn of(ord: Ordering, refilled: Lane, other: Lane) -> Self {
        match ord {
            Ordering::Less => Rank::Ahead,
            Ordering::Greater => Rank::Behind,
            Ordering::Equal if refilled < other => Rank::Ahead,
            Ordering::Equal => Rank::Behind,
        }
    }
}

/// Result of ranking the refilled head against the runner up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Settled(Mode),
    /// The refilled head is behind the runner up, its rank against this lane decides.
    CompareLast(Lane),
}

pub const ALL_MODES: [Mode; 15] = [
    Mode::M123,
    Mode::M132,
    Mode::M213,
    Mode::M231,
    Mode::M312,
    Mode::M321,
    Mode::M12,
    Mode::M13,
    Mode::M21,
    Mode::M23,
    Mode::M31,
    Mode::M32,
    Mode::M1,
    Mode::M2,
    Mode::M3,
];

impl Mode {
    pub const fn lanes(self) -> &'static [Lane] {
        use Lane::*;

        match self {
            Mode::M123 => &[First, Second, Third],
            Mode::M132 => &[First, Third, Second],
            Mode::M213 => &[Second, First, Third],
            Mode::M231 => &[Second, Third, First],
            Mode::M312 => &[Third, First, Second],
            Mode::M321 => &[Third, Second, First],
            Mode::M12 => &[First, Second],
            Mode::M13 => &[First, Third],
            Mode::M21 => &[Second, First],
            Mode::M23 => &[Second, Third],
            Mode::M31 => &[Third, First],
            Mode::M32 => &[Third, Second],
            Mode::M1 => &[First],
            Mode::M2 => &[Second],
            Mode::M3 => &[Third],
        }
    }

    /// The mode listing exactly `lanes`, in that order.
    pub fn from_lanes(lanes: &[Lane]) -> Option<Mode> {
        ALL_MODES.into_iter().find(|mode| mode.lanes() == lanes)
    }

    /// Lane whose head is written next.
    #[inline]
    pub fn head(self) -> Lane {
        self.lanes()[0]
    }

    #[inline]
    pub fn runner_up(self) -> Option<Lane> {
        match self.lanes() {
            [_, runner_up, ..] => Some(*runner_up),
            _ => None,
        }
    }

    /// Only one lane left, it can be copied out without comparing.
    #[inline]
    pub const fn is_drain(self) -> bool {
        matches!(self, Mode::M1 | Mode::M2 | Mode::M3)
    }

    /// Mode after the head lane ran out of elements.
    #[inline]
    pub const fn exhausted(self) -> Mode {
        match self {
            Mode::M123 => Mode::M23,
            Mode::M132 => Mode::M32,
            Mode::M213 => Mode::M13,
            Mode::M231 => Mode::M31,
            Mode::M312 => Mode::M12,
            Mode::M321 => Mode::M21,
            Mode::M12 => Mode::M2,
            Mode::M13 => Mode::M3,
            Mode::M21 => Mode::M1,
            Mode::M23 => Mode::M3,
            Mode::M31 => Mode::M1,
            Mode::M32 => Mode::M2,
            Mode::M1 | Mode::M2 | Mode::M3 => self,
        }
    }

    /// First step of re-ranking the refilled head lane: its rank against the runner up.
    #[inline]
    pub const fn after_runner_up(self, rank: Rank) -> Transition {
        match (self, rank) {
            (_, Rank::Ahead) => Transition::Settled(self),
            (Mode::M123, Rank::Behind) => Transition::CompareLast(Lane::Third),
            (Mode::M132, Rank::Behind) => Transition::CompareLast(Lane::Second),
            (Mode::M213, Rank::Behind) => Transition::CompareLast(Lane::Third),
            (Mode::M231, Rank::Behind) => Transition::CompareLast(Lane::First),
            (Mode::M312, Rank::Behind) => Transition::CompareLast(Lane::Second),
            (Mode::M321, Rank::Behind) => Transition::CompareLast(Lane::First),
            (Mode::M12, Rank::Behind) => Transition::Settled(Mode::M21),
            (Mode::M13, Rank::Behind) => Transition::Settled(Mode::M31),
            (Mode::M21, Rank::Behind) => Transition::Settled(Mode::M12),
            (Mode::M23, Rank::Behind) => Transition::Settled(Mode::M32),
            (Mode::M31, Rank::Behind) => Transition::Settled(Mode::M13),
            (Mode::M32, Rank::Behind) => Transition::Settled(Mode::M23),
            (Mode::M1 | Mode::M2 | Mode::M3, Rank::Behind) => Transition::Settled(self),
        }
    }

    /// Second step, only for three lane modes whose refilled head fell behind the runner up.
    #[inline]
    pub const fn after_last(self, rank: Rank) -> Mode {
        match (self, rank) {
            (Mode::M123, Rank::Ahead) => Mode::M213,
            (Mode::M123, Rank::Behind) => Mode::M231,
            (Mode::M132, Rank::Ahead) => Mode::M312,
            (Mode::M132, Rank::Behind) => Mode::M321,
            (Mode::M213, Rank::Ahead) => Mode::M123,
            (Mode::M213, Rank::Behind) => Mode::M132,
            (Mode::M231, Rank::Ahead) => Mode::M321,
            (Mode::M231, Rank::Behind) => Mode::M312,
            (Mode::M312, Rank::Ahead) => Mode::M132,
            (Mode::M312, Rank::Behind) => Mode::M123,
            (Mode::M321, Rank::Ahead) => Mode::M231,
            (Mode::M321, Rank::Behind) => Mode::M213,
            (_, _) => self,
        }
    }
}
