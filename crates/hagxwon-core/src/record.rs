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

//! Conversion between untyped JSON objects, as they arrive from API
//! payloads, and the typed values the engines work on. Nothing here is
//! defaulted: a missing key or a bad timestamp is an error.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde_json::Map;
use serde_json::Value;

use crate::score::GameItem;
use crate::score::ScoreResult;
use crate::score::score_round;
use crate::types::schedule::ReviewSchedule;
use crate::types::schedule::ReviewState;
use crate::types::schedule::schedule_review_at;
use crate::types::timestamp::Timestamp;
use crate::types::timestamp::TimestampError;
use crate::types::word_id::WordId;

pub type Record = Map<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub enum RecordError {
    /// The value is not a JSON object.
    NotAnObject,
    MissingField(&'static str),
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    InvalidTimestamp {
        field: &'static str,
        source: TimestampError,
    },
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::NotAnObject => write!(f, "expected a JSON object."),
            RecordError::MissingField(field) => write!(f, "missing required field `{field}`."),
            RecordError::InvalidField { field, expected } => {
                write!(f, "field `{field}` must be {expected}.")
            }
            RecordError::InvalidTimestamp { field, source } => {
                write!(f, "field `{field}`: {source}")
            }
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecordError::InvalidTimestamp { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub fn as_record(value: &Value) -> Result<&Record, RecordError> {
    value.as_object().ok_or(RecordError::NotAnObject)
}

fn field<'a>(record: &'a Record, name: &'static str) -> Result<&'a Value, RecordError> {
    record.get(name).ok_or(RecordError::MissingField(name))
}

fn int_field(record: &Record, name: &'static str) -> Result<i64, RecordError> {
    field(record, name)?
        .as_i64()
        .ok_or(RecordError::InvalidField {
            field: name,
            expected: "an integer",
        })
}

fn count_field(record: &Record, name: &'static str) -> Result<u32, RecordError> {
    field(record, name)?
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(RecordError::InvalidField {
            field: name,
            expected: "a non-negative integer",
        })
}

fn float_field(record: &Record, name: &'static str) -> Result<f64, RecordError> {
    field(record, name)?
        .as_f64()
        .ok_or(RecordError::InvalidField {
            field: name,
            expected: "a number",
        })
}

fn bool_field(record: &Record, name: &'static str) -> Result<bool, RecordError> {
    field(record, name)?
        .as_bool()
        .ok_or(RecordError::InvalidField {
            field: name,
            expected: "a boolean",
        })
}

fn timestamp_field(record: &Record, name: &'static str) -> Result<Timestamp, RecordError> {
    let text = field(record, name)?
        .as_str()
        .ok_or(RecordError::InvalidField {
            field: name,
            expected: "a timestamp string",
        })?;
    Timestamp::parse(text).map_err(|source| RecordError::InvalidTimestamp {
        field: name,
        source,
    })
}

impl GameItem {
    /// Reads an item from an object with the keys `word_id`, `correct`, and
    /// `time_ms`.
    pub fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(GameItem {
            word_id: WordId::new(int_field(record, "word_id")?),
            correct: bool_field(record, "correct")?,
            time_ms: int_field(record, "time_ms")?,
        })
    }
}

impl ReviewSchedule {
    pub fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(ReviewSchedule {
            word_id: WordId::new(int_field(record, "word_id")?),
            next_review: timestamp_field(record, "next_review")?,
            interval_days: int_field(record, "interval_days")?,
            ease_factor: float_field(record, "ease_factor")?,
            repetitions: count_field(record, "repetitions")?,
            last_reviewed: timestamp_field(record, "last_reviewed")?,
        })
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("word_id".into(), self.word_id.into_inner().into());
        record.insert("next_review".into(), self.next_review.to_string().into());
        record.insert("interval_days".into(), self.interval_days.into());
        record.insert("ease_factor".into(), self.ease_factor.into());
        record.insert("repetitions".into(), self.repetitions.into());
        record.insert("last_reviewed".into(), self.last_reviewed.to_string().into());
        record
    }
}

impl ScoreResult {
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("correct".into(), self.correct.into());
        record.insert("total".into(), self.total.into());
        record.insert("accuracy".into(), self.accuracy.into());
        record.insert("wpm".into(), self.wpm.into());
        record.insert("score".into(), self.score.into());
        record
    }
}

/// Scores a round given as item records. Fails on the first malformed item.
pub fn score_round_from_records(
    records: &[Record],
    duration_sec: Option<f64>,
) -> Result<Record, RecordError> {
    let items: Vec<GameItem> = records
        .iter()
        .map(GameItem::from_record)
        .collect::<Result<_, _>>()?;
    Ok(score_round(&items, duration_sec).to_record())
}

/// Schedules a review for a word whose current schedule, if any, is given as
/// a record.
pub fn schedule_review_from_record(
    word_id: WordId,
    correct: bool,
    current: Option<&Record>,
    reviewed_at: Timestamp,
) -> Result<Record, RecordError> {
    let state: ReviewState = current
        .map(ReviewSchedule::from_record)
        .transpose()?
        .into();
    Ok(schedule_review_at(word_id, correct, state, reviewed_at).to_record())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Fallible;
    use crate::srs::MAX_EASE_FACTOR;
    use crate::srs::MIN_EASE_FACTOR;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn now() -> Timestamp {
        Timestamp::parse("2024-06-01T10:00:00").unwrap()
    }

    fn schedule_record() -> Record {
        record(json!({
            "word_id": 1,
            "next_review": "2024-06-01T09:00:00.250000",
            "interval_days": 15,
            "ease_factor": 3.0,
            "repetitions": 5,
            "last_reviewed": "2024-05-17T09:00:00.250000",
        }))
    }

    #[test]
    fn test_item_from_record() -> Fallible<()> {
        let item = GameItem::from_record(&record(json!({
            "word_id": 4,
            "correct": true,
            "time_ms": 2500,
        })))?;
        assert_eq!(
            item,
            GameItem {
                word_id: WordId::new(4),
                correct: true,
                time_ms: 2500,
            }
        );
        Ok(())
    }

    #[test]
    fn test_item_missing_fields() {
        let cases = [
            (json!({"correct": true, "time_ms": 1}), "word_id"),
            (json!({"word_id": 1, "time_ms": 1}), "correct"),
            (json!({"word_id": 1, "correct": true}), "time_ms"),
        ];
        for (value, missing) in cases {
            let err = GameItem::from_record(&record(value)).unwrap_err();
            assert_eq!(err, RecordError::MissingField(missing));
        }
    }

    #[test]
    fn test_item_wrong_types() {
        let err = GameItem::from_record(&record(json!({
            "word_id": 1,
            "correct": "yes",
            "time_ms": 1,
        })))
        .unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidField {
                field: "correct",
                expected: "a boolean",
            }
        );
    }

    #[test]
    fn test_as_record() {
        assert!(as_record(&json!({"a": 1})).is_ok());
        assert_eq!(as_record(&json!([1, 2])), Err(RecordError::NotAnObject));
    }

    #[test]
    fn test_score_from_records() -> Fallible<()> {
        let records = vec![
            record(json!({"word_id": 1, "correct": true, "time_ms": 2000})),
            record(json!({"word_id": 2, "correct": false, "time_ms": 5000})),
            record(json!({"word_id": 3, "correct": true, "time_ms": 3000})),
        ];
        let result = score_round_from_records(&records, Some(60.0))?;
        assert_eq!(result["correct"], 2);
        assert_eq!(result["total"], 3);
        assert!((result["accuracy"].as_f64().unwrap() - 66.67).abs() < 0.1);
        assert_eq!(result["wpm"], 3.0);
        assert_eq!(result["score"], 301);
        Ok(())
    }

    #[test]
    fn test_score_from_records_empty() -> Fallible<()> {
        let result = score_round_from_records(&[], None)?;
        assert_eq!(Value::Object(result), json!({
            "correct": 0,
            "total": 0,
            "accuracy": 0.0,
            "wpm": 0.0,
            "score": 0,
        }));
        Ok(())
    }

    #[test]
    fn test_score_from_records_missing_key() {
        let records = vec![record(json!({"word_id": 1, "time_ms": 2000}))];
        let err = score_round_from_records(&records, None).unwrap_err();
        assert_eq!(err, RecordError::MissingField("correct"));
    }

    #[test]
    fn test_schedule_record_roundtrip() -> Fallible<()> {
        let schedule = ReviewSchedule::from_record(&schedule_record())?;
        assert_eq!(schedule.to_record(), schedule_record());
        Ok(())
    }

    #[test]
    fn test_schedule_bad_timestamp() {
        let mut bad = schedule_record();
        bad.insert("last_reviewed".into(), json!("last tuesday"));
        let err = ReviewSchedule::from_record(&bad).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidTimestamp {
                field: "last_reviewed",
                source: TimestampError {
                    input: "last tuesday".to_string(),
                },
            }
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_schedule_negative_repetitions() {
        let mut bad = schedule_record();
        bad.insert("repetitions".into(), json!(-1));
        assert!(matches!(
            ReviewSchedule::from_record(&bad),
            Err(RecordError::InvalidField {
                field: "repetitions",
                ..
            })
        ));
    }

    #[test]
    fn test_schedule_new_word_from_record() -> Fallible<()> {
        let result = schedule_review_from_record(WordId::new(1), true, None, now())?;
        assert_eq!(result["word_id"], 1);
        assert_eq!(result["interval_days"], 1);
        assert_eq!(result["ease_factor"], 2.5);
        assert_eq!(result["repetitions"], 0);
        assert_eq!(result["last_reviewed"], "2024-06-01T10:00:00.000000");
        assert_eq!(result["next_review"], "2024-06-02T10:00:00.000000");
        Ok(())
    }

    #[test]
    fn test_wrong_answer_from_record() -> Fallible<()> {
        let current = schedule_record();
        let result = schedule_review_from_record(WordId::new(1), false, Some(&current), now())?;
        assert_eq!(result["interval_days"], 1);
        assert_eq!(result["repetitions"], 0);
        assert!(result["ease_factor"].as_f64().unwrap() < 3.0);
        Ok(())
    }

    #[test]
    fn test_invalid_current_is_not_defaulted() {
        let mut bad = schedule_record();
        bad.remove("ease_factor");
        let err = schedule_review_from_record(WordId::new(1), true, Some(&bad), now()).unwrap_err();
        assert_eq!(err, RecordError::MissingField("ease_factor"));
    }

    #[test]
    fn test_repeated_updates_through_records() -> Fallible<()> {
        let mut current: Option<Record> = None;
        let mut at = now();
        for i in 0..10 {
            let next =
                schedule_review_from_record(WordId::new(1), true, current.as_ref(), at)?;
            assert_eq!(next["repetitions"], i);
            let schedule = ReviewSchedule::from_record(&next)?;
            assert!(schedule.interval_days >= 1);
            assert!(schedule.ease_factor >= MIN_EASE_FACTOR);
            assert!(schedule.ease_factor <= MAX_EASE_FACTOR);
            assert!(schedule.next_review > schedule.last_reviewed);
            at = schedule.next_review;
            current = Some(next);
        }
        Ok(())
    }
}
