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

//! SM-2 style interval and ease arithmetic.

pub type Ease = f64;
pub type IntervalDays = i64;
pub type Retention = f64;

pub const DEFAULT_EASE_FACTOR: Ease = 2.5;
pub const MIN_EASE_FACTOR: Ease = 1.3;
pub const MAX_EASE_FACTOR: Ease = 4.0;

/// Ease gained by a correct answer.
pub const EASE_REWARD: Ease = 0.1;

/// Ease lost by a wrong answer.
pub const EASE_PENALTY: Ease = 0.2;

/// The first two intervals after a reset are fixed.
pub const FIRST_INTERVAL: IntervalDays = 1;
pub const SECOND_INTERVAL: IntervalDays = 6;

/// Intervals stop growing at a hundred years.
pub const MAX_INTERVAL_DAYS: IntervalDays = 36_500;

/// How many due words a review queue holds unless told otherwise.
pub const DEFAULT_DUE_LIMIT: usize = 20;

const MIN_RETENTION: Retention = 0.6;
const MAX_RETENTION: Retention = 0.95;
const RETENTION_SPAN: Retention = 0.35;

/// Pulls an ease factor into `[MIN_EASE_FACTOR, MAX_EASE_FACTOR]`.
///
/// Rewards and penalties clamp on both sides, so a stored ease that is
/// already out of range is corrected by its next update.
pub fn clamp_ease(e: Ease) -> Ease {
    e.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR)
}

pub fn reward_ease(e: Ease) -> Ease {
    clamp_ease(e + EASE_REWARD)
}

pub fn penalize_ease(e: Ease) -> Ease {
    clamp_ease(e - EASE_PENALTY)
}

/// The interval after a correct answer. `repetitions` is the streak length
/// including this answer; `interval` and `ease` are the values before it.
/// Growth is capped at [`MAX_INTERVAL_DAYS`].
pub fn interval_after_success(
    repetitions: u32,
    interval: IntervalDays,
    ease: Ease,
) -> IntervalDays {
    match repetitions {
        0 | 1 => FIRST_INTERVAL,
        2 => SECOND_INTERVAL,
        _ => {
            let grown = (interval as f64 * ease).floor() as IntervalDays;
            grown.clamp(1, MAX_INTERVAL_DAYS)
        }
    }
}

/// Maps a mean ease factor onto an estimated retention rate.
///
/// This is a heuristic, not a statistical estimate: ease 1.3 reads as 60%
/// retention, ease 4.0 as 95%, linear in between.
pub fn retention_from_ease(avg_ease: Ease) -> Retention {
    let normalized = (avg_ease - MIN_EASE_FACTOR) / (MAX_EASE_FACTOR - MIN_EASE_FACTOR);
    (MIN_RETENTION + normalized * RETENTION_SPAN).clamp(MIN_RETENTION, MAX_RETENTION)
}
