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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::score::GameItem;
use crate::score::ScoreResult;
use crate::score::score_round;
use crate::types::schedule::ReviewSchedule;
use crate::types::schedule::ReviewState;
use crate::types::schedule::schedule_review_at;
use crate::types::timestamp::Timestamp;
use crate::types::word_id::WordId;

/// Where review schedules are kept between reviews. Implementations are
/// expected to be the only writer for a given word.
pub trait ScheduleStore {
    fn load(&self, word_id: WordId) -> Fallible<Option<ReviewSchedule>>;

    /// Inserts the schedule, or replaces the word's existing one.
    fn save(&mut self, schedule: ReviewSchedule) -> Fallible<()>;
}

impl ScheduleStore for BTreeMap<WordId, ReviewSchedule> {
    fn load(&self, word_id: WordId) -> Fallible<Option<ReviewSchedule>> {
        Ok(self.get(&word_id).copied())
    }

    fn save(&mut self, schedule: ReviewSchedule) -> Fallible<()> {
        self.insert(schedule.word_id, schedule);
        Ok(())
    }
}

/// The outcome of submitting a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub result: ScoreResult,
    /// The updated schedule for each item, in submission order.
    pub schedules: Vec<ReviewSchedule>,
}

/// Scores a finished round and reschedules every word in it.
///
/// Items are applied in order, so a word answered twice in one round is
/// rescheduled twice.
pub fn submit_round<S: ScheduleStore>(
    store: &mut S,
    items: &[GameItem],
    duration_sec: Option<f64>,
    reviewed_at: Timestamp,
) -> Fallible<RoundSummary> {
    let result = score_round(items, duration_sec);
    log::debug!(
        "Scored round: {}/{} correct, score {}",
        result.correct,
        result.total,
        result.score
    );
    let mut schedules = Vec::with_capacity(items.len());
    for item in items {
        let state: ReviewState = store.load(item.word_id)?.into();
        let schedule = schedule_review_at(item.word_id, item.correct, state, reviewed_at);
        log::debug!(
            "Word {}: next review in {} day(s)",
            item.word_id,
            schedule.interval_days
        );
        store.save(schedule)?;
        schedules.push(schedule);
    }
    Ok(RoundSummary { result, schedules })
}
