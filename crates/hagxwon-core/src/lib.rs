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

//! hagxwon-core: review scheduling and round scoring for the HagXwon
//! Korean vocabulary app.
//!
//! This library provides pure, I/O-free building blocks for:
//! - SM-2 style review scheduling of vocabulary words
//! - Scoring game rounds (accuracy, words per minute, bonuses)
//! - Translating untyped JSON records into typed values
//! - Submitting a round against a schedule store

pub mod error;
pub mod record;
pub mod round;
pub mod score;
pub mod srs;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use record::{Record, RecordError, schedule_review_from_record, score_round_from_records};
pub use round::{RoundSummary, ScheduleStore, submit_round};
pub use score::{GameItem, ScoreResult, score_round};
#[cfg(feature = "clock")]
pub use types::schedule::{get_due_words, schedule_review};
pub use types::schedule::{
    ReviewSchedule, ReviewState, average_ease, calculate_retention_rate, get_due_words_at,
    schedule_review_at,
};
pub use types::timestamp::{Timestamp, TimestampError};
pub use types::word_id::WordId;
