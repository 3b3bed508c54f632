//! Weekly block placement for one section.
//!
//! # Algorithm
//!
//! 1. Pick a random starting day once per call.
//! 2. Visit the configured days in rotation from that start. On each day,
//!    skip if the teacher already reached the daily cap; otherwise collect
//!    the eligible blocks and commit one chosen by [`PlacementPolicy`].
//! 3. Repeat rounds until the required hours are placed or the round
//!    budget is spent.
//!
//! A block is eligible on a day when it fits the remaining hours, keeps the
//! teacher within the daily cap, and every hour mark it spans is free for
//! both the teacher and the room.
//!
//! A round that commits nothing leaves the book unchanged, so every later
//! round would commit nothing too; the loop stops there.
//!
//! # Complexity
//! O(r * d * b) where r=rounds, d=days, b=blocks.

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::availability::AvailabilityBook;
use crate::config::SchedulerConfig;
use crate::models::{MeetingTime, RoomId, SchoolDay, TeacherId, TimeBlock};

/// How a block is chosen among the eligible ones on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPolicy {
    /// Uniform choice among the `k` longest eligible blocks.
    LongestTopK(usize),
    /// The longest eligible block, earliest start first. Deterministic.
    LongestEarliest,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::LongestTopK(3)
    }
}

impl PlacementPolicy {
    /// Chooses one block. `eligible` is reordered in place.
    pub fn choose<R: Rng>(
        &self,
        eligible: &mut [TimeBlock],
        rng: &mut R,
    ) -> Option<TimeBlock> {
        match *self {
            Self::LongestTopK(k) => {
                // Stable: equal-length blocks keep catalog order
                eligible.sort_by(|a, b| b.duration().cmp(&a.duration()));
                let top = &eligible[..k.min(eligible.len())];
                top.choose(rng).copied()
            }
            Self::LongestEarliest => eligible
                .iter()
                .copied()
                .min_by_key(|b| (std::cmp::Reverse(b.duration()), b.start_hour)),
        }
    }
}

/// One section's placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub required_hours: u8,
    /// Daily teaching cap for this teacher.
    pub daily_cap: u8,
}

/// Outcome of placing one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Committed meetings, in placement order.
    pub meetings: Vec<MeetingTime>,
    /// Hours that could not be placed.
    pub remaining_hours: u8,
    /// Rounds used.
    pub rounds: u32,
}

impl Placement {
    /// Whether all required hours were placed.
    pub fn is_complete(&self) -> bool {
        self.remaining_hours == 0
    }
}

/// Places a section's weekly hours into fixed blocks.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyBlockScheduler<'a> {
    config: &'a SchedulerConfig,
}

impl<'a> WeeklyBlockScheduler<'a> {
    pub fn new(config: &'a SchedulerConfig) -> Self {
        Self { config }
    }

    /// Places `request.required_hours` hours, reserving every committed
    /// block in `book`.
    pub fn schedule<R: Rng>(
        &self,
        request: &PlacementRequest,
        book: &mut AvailabilityBook,
        rng: &mut R,
    ) -> Placement {
        let days = &self.config.days;
        let mut placement = Placement {
            meetings: Vec::new(),
            remaining_hours: request.required_hours,
            rounds: 0,
        };
        if days.is_empty() || placement.remaining_hours == 0 {
            return placement;
        }

        let start = rng.random_range(0..days.len());

        while placement.remaining_hours > 0 && placement.rounds < self.config.max_rounds {
            placement.rounds += 1;
            let mut progressed = false;

            for offset in 0..days.len() {
                if placement.remaining_hours == 0 {
                    break;
                }
                let day = days[(start + offset) % days.len()];
                if book.daily_hours(request.teacher_id, day) >= request.daily_cap {
                    continue;
                }

                let mut eligible =
                    self.eligible_blocks(request, day, placement.remaining_hours, book);
                let Some(block) = self.config.placement.choose(&mut eligible, rng) else {
                    continue;
                };

                book.reserve(request.teacher_id, request.room_id, day, &block);
                placement.meetings.push(block.on(day));
                placement.remaining_hours -= block.duration();
                progressed = true;

                debug!(
                    teacher_id = request.teacher_id,
                    room_id = request.room_id,
                    day = %day,
                    start = block.start_hour,
                    end = block.end_hour,
                    remaining = placement.remaining_hours,
                    "block placed"
                );
            }

            if !progressed {
                break;
            }
        }

        placement
    }

    /// Blocks placeable on `day` for this request, in catalog order.
    pub fn eligible_blocks(
        &self,
        request: &PlacementRequest,
        day: SchoolDay,
        remaining_hours: u8,
        book: &AvailabilityBook,
    ) -> Vec<TimeBlock> {
        let taught = book.daily_hours(request.teacher_id, day);
        self.config
            .blocks
            .iter()
            .filter(|b| b.duration() <= remaining_hours)
            .filter(|b| taught + b.duration() <= request.daily_cap)
            .filter(|b| book.is_free(request.teacher_id, request.room_id, day, b))
            .copied()
            .collect()
    }
}
