// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;

use crate::srs::DEFAULT_EASE_FACTOR;
use crate::srs::Ease;
use crate::srs::FIRST_INTERVAL;
use crate::srs::IntervalDays;
use crate::srs::Retention;
use crate::srs::interval_after_success;
use crate::srs::penalize_ease;
use crate::srs::retention_from_ease;
use crate::srs::reward_ease;
use crate::types::timestamp::Timestamp;
use crate::types::word_id::WordId;

/// When a word is next due, and the state needed to schedule it again.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    pub word_id: WordId,
    /// The earliest moment the word is eligible for review.
    pub next_review: Timestamp,
    /// Days from `last_reviewed` to `next_review`.
    pub interval_days: IntervalDays,
    pub ease_factor: Ease,
    /// Consecutive correct answers since the last reset.
    pub repetitions: u32,
    /// The review that produced this schedule.
    pub last_reviewed: Timestamp,
}

impl ReviewSchedule {
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }
}

/// A word's scheduling state before a review.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ReviewState {
    /// The word has never been reviewed.
    New,
    /// The word has a schedule from an earlier review.
    Scheduled(ReviewSchedule),
}

impl ReviewState {
    pub fn is_new(&self) -> bool {
        matches!(self, ReviewState::New)
    }
}

impl From<Option<ReviewSchedule>> for ReviewState {
    fn from(value: Option<ReviewSchedule>) -> Self {
        match value {
            Some(schedule) => ReviewState::Scheduled(schedule),
            None => ReviewState::New,
        }
    }
}

/// Computes a word's next schedule from its current state and the outcome of
/// the review that just happened at `reviewed_at`.
///
/// The first review of a new word always schedules the next one for the
/// following day, whatever the answer. The interval never reaches past the
/// end of the calendar, so `next_review` is always `interval_days` after
/// `reviewed_at`, except within a day of the calendar's end.
pub fn schedule_review_at(
    word_id: WordId,
    correct: bool,
    state: ReviewState,
    reviewed_at: Timestamp,
) -> ReviewSchedule {
    let (interval_days, ease_factor, repetitions) = match state {
        ReviewState::New => (FIRST_INTERVAL, DEFAULT_EASE_FACTOR, 0),
        ReviewState::Scheduled(ReviewSchedule {
            interval_days,
            ease_factor,
            repetitions,
            ..
        }) => {
            if correct {
                let repetitions = repetitions.saturating_add(1);
                let interval = interval_after_success(repetitions, interval_days, ease_factor);
                (interval, reward_ease(ease_factor), repetitions)
            } else {
                (FIRST_INTERVAL, penalize_ease(ease_factor), 0)
            }
        }
    };
    let interval_days = interval_days
        .min(reviewed_at.days_until_end())
        .max(FIRST_INTERVAL);
    ReviewSchedule {
        word_id,
        next_review: reviewed_at.plus_days(interval_days),
        interval_days,
        ease_factor,
        repetitions,
        last_reviewed: reviewed_at,
    }
}

/// Like [`schedule_review_at`], reviewed now.
#[cfg(feature = "clock")]
pub fn schedule_review(word_id: WordId, correct: bool, state: ReviewState) -> ReviewSchedule {
    schedule_review_at(word_id, correct, state, Timestamp::now())
}

/// The schedules due at `now`, most overdue first, at most `limit` of them.
/// Schedules due at the same moment keep their input order.
pub fn get_due_words_at(
    schedules: &[ReviewSchedule],
    limit: usize,
    now: Timestamp,
) -> Vec<ReviewSchedule> {
    let mut due: Vec<ReviewSchedule> = schedules
        .iter()
        .filter(|schedule| schedule.is_due(now))
        .copied()
        .collect();
    due.sort_by_key(|schedule| schedule.next_review);
    due.truncate(limit);
    due
}

/// Like [`get_due_words_at`], due now.
#[cfg(feature = "clock")]
pub fn get_due_words(schedules: &[ReviewSchedule], limit: usize) -> Vec<ReviewSchedule> {
    get_due_words_at(schedules, limit, Timestamp::now())
}

/// The mean ease factor of a collection, if it has any schedules.
pub fn average_ease(schedules: &[ReviewSchedule]) -> Option<Ease> {
    if schedules.is_empty() {
        return None;
    }
    let total: Ease = schedules.iter().map(|s| s.ease_factor).sum();
    Some(total / schedules.len() as f64)
}

/// Estimated retention across a collection, derived from the mean ease
/// factor. See [`retention_from_ease`] for the mapping. Zero when there is
/// nothing to measure.
pub fn calculate_retention_rate(schedules: &[ReviewSchedule]) -> Retention {
    average_ease(schedules).map_or(0.0, retention_from_ease)
}
