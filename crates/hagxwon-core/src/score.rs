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

//! Scoring for game rounds.

use serde::Deserialize;
use serde::Serialize;

use crate::types::word_id::WordId;

/// Points for each correct answer.
pub const POINTS_PER_CORRECT: u64 = 100;

/// Share of the base score paid out again, scaled by accuracy.
const ACCURACY_BONUS_RATE: f64 = 0.5;

const FAST_ANSWER_MS: i64 = 3000;
const FAST_ANSWER_BONUS: u64 = 25;
const QUICK_ANSWER_MS: i64 = 5000;
const QUICK_ANSWER_BONUS: u64 = 10;

/// One answered item in a round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameItem {
    pub word_id: WordId,
    pub correct: bool,
    /// Response time in milliseconds.
    pub time_ms: i64,
}

/// The aggregate result of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct: usize,
    pub total: usize,
    /// Percentage of correct items, 0 to 100.
    pub accuracy: f64,
    /// Words per minute.
    pub wpm: f64,
    pub score: u64,
}

/// Scores a round.
///
/// `duration_sec` is the wall-clock length of the round. When it is absent or
/// not positive, the sum of the items' response times is used instead.
pub fn score_round(items: &[GameItem], duration_sec: Option<f64>) -> ScoreResult {
    if items.is_empty() {
        return ScoreResult::default();
    }

    let total: usize = items.len();
    let correct: usize = items.iter().filter(|item| item.correct).count();
    let accuracy: f64 = (correct as f64 / total as f64) * 100.0;
    let wpm: f64 = words_per_minute(items, duration_sec);

    let base_score: u64 = correct as u64 * POINTS_PER_CORRECT;
    // Applied to the base score, so the bonus grows with the square of the
    // number of correct answers.
    let accuracy_bonus: u64 =
        (base_score as f64 * (accuracy / 100.0) * ACCURACY_BONUS_RATE).floor() as u64;
    let speed_bonus: u64 = items.iter().map(speed_bonus_for).sum();

    ScoreResult {
        correct,
        total,
        accuracy,
        wpm,
        score: base_score + accuracy_bonus + speed_bonus,
    }
}

fn words_per_minute(items: &[GameItem], duration_sec: Option<f64>) -> f64 {
    let total = items.len() as f64;
    match duration_sec {
        Some(duration_sec) if duration_sec > 0.0 => total / (duration_sec / 60.0),
        _ => {
            let total_time_ms: i64 = items
                .iter()
                .map(|item| item.time_ms)
                .fold(0, i64::saturating_add);
            if total_time_ms > 0 {
                total / (total_time_ms as f64 / 60_000.0)
            } else {
                0.0
            }
        }
    }
}

/// Wrong answers earn nothing however fast they were. Negative times count
/// as fast.
fn speed_bonus_for(item: &GameItem) -> u64 {
    if !item.correct {
        0
    } else if item.time_ms < FAST_ANSWER_MS {
        FAST_ANSWER_BONUS
    } else if item.time_ms < QUICK_ANSWER_MS {
        QUICK_ANSWER_BONUS
    } else {
        0
    }
}
