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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;

use clap::ValueEnum;
use hagxwon_core::error::Fallible;
use hagxwon_core::round::ScheduleStore;
use hagxwon_core::types::schedule::ReviewSchedule;
use hagxwon_core::types::schedule::ReviewState;
use hagxwon_core::types::schedule::schedule_review_at;
use hagxwon_core::types::timestamp::Timestamp;
use hagxwon_core::types::word_id::WordId;

use crate::store::ScheduleFile;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum Answer {
    /// The word was recalled.
    Correct,
    /// The word was missed.
    Incorrect,
}

impl Answer {
    pub fn is_correct(self) -> bool {
        self == Answer::Correct
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Correct => write!(f, "correct"),
            Answer::Incorrect => write!(f, "incorrect"),
        }
    }
}

pub fn review_word(schedules: &Path, word_id: WordId, answer: Answer) -> Fallible<()> {
    let schedule = review_word_at(schedules, word_id, answer, Timestamp::now())?;
    println!("{}", serde_json::to_string_pretty(&schedule)?);
    Ok(())
}

fn review_word_at(
    schedules: &Path,
    word_id: WordId,
    answer: Answer,
    reviewed_at: Timestamp,
) -> Fallible<ReviewSchedule> {
    let mut file = ScheduleFile::open(schedules)?;
    let state: ReviewState = file.load(word_id)?.into();
    let schedule = schedule_review_at(word_id, answer.is_correct(), state, reviewed_at);
    log::debug!(
        "Word {word_id} answered {answer}: {} repetition(s), next review {}",
        schedule.repetitions,
        schedule.next_review
    );
    file.save(schedule)?;
    file.commit()?;
    Ok(schedule)
}
