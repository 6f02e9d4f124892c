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

use std::path::PathBuf;

use clap::Parser;
use hagxwon_core::error::Fallible;
use hagxwon_core::srs::DEFAULT_DUE_LIMIT;
use hagxwon_core::types::word_id::WordId;

use crate::cmd::due::list_due;
use crate::cmd::review::Answer;
use crate::cmd::review::review_word;
use crate::cmd::score::score_items;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::submit::submit_items;
use crate::store::DEFAULT_SCHEDULES_PATH;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Record the outcome of reviewing one word and print its new schedule.
    Review {
        /// The id of the reviewed word.
        word_id: i64,
        /// Whether the word was recalled.
        answer: Answer,
        /// Path to the schedule file.
        #[arg(long, default_value = DEFAULT_SCHEDULES_PATH)]
        schedules: PathBuf,
    },
    /// List the words due for review, most overdue first.
    Due {
        /// Maximum number of words to list.
        #[arg(long, default_value_t = DEFAULT_DUE_LIMIT)]
        limit: usize,
        /// Path to the schedule file.
        #[arg(long, default_value = DEFAULT_SCHEDULES_PATH)]
        schedules: PathBuf,
    },
    /// Print collection statistics.
    Stats {
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        /// Path to the schedule file.
        #[arg(long, default_value = DEFAULT_SCHEDULES_PATH)]
        schedules: PathBuf,
    },
    /// Score a round without updating any schedules.
    Score {
        /// Path to a JSON array of items with `word_id`, `correct` and `time_ms`.
        items: PathBuf,
        /// Length of the round in seconds. By default, the items' response times are summed.
        #[arg(long)]
        duration_sec: Option<f64>,
    },
    /// Score a round and reschedule every word in it.
    Submit {
        /// Path to a JSON array of items with `word_id`, `correct` and `time_ms`.
        items: PathBuf,
        /// Length of the round in seconds. By default, the items' response times are summed.
        #[arg(long)]
        duration_sec: Option<f64>,
        /// Path to the schedule file.
        #[arg(long, default_value = DEFAULT_SCHEDULES_PATH)]
        schedules: PathBuf,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Review {
            word_id,
            answer,
            schedules,
        } => review_word(&schedules, WordId::new(word_id), answer),
        Command::Due { limit, schedules } => list_due(&schedules, limit),
        Command::Stats { format, schedules } => print_stats(&schedules, format),
        Command::Score {
            items,
            duration_sec,
        } => score_items(&items, duration_sec),
        Command::Submit {
            items,
            duration_sec,
            schedules,
        } => submit_items(&items, &schedules, duration_sec),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_review() {
        let cli = Command::try_parse_from(["hagxwon", "review", "42", "incorrect"]).unwrap();
        match cli {
            Command::Review {
                word_id,
                answer,
                schedules,
            } => {
                assert_eq!(word_id, 42);
                assert_eq!(answer, Answer::Incorrect);
                assert_eq!(schedules, PathBuf::from(DEFAULT_SCHEDULES_PATH));
            }
            _ => panic!("expected review"),
        }
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Command::try_parse_from(["hagxwon", "due"]).unwrap();
        assert!(matches!(cli, Command::Due { limit: 20, .. }));
        let cli = Command::try_parse_from(["hagxwon", "stats", "--format", "json"]).unwrap();
        assert!(matches!(
            cli,
            Command::Stats {
                format: StatsFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_submit() {
        let cli = Command::try_parse_from([
            "hagxwon",
            "submit",
            "round.json",
            "--duration-sec",
            "90",
            "--schedules",
            "words.json",
        ])
        .unwrap();
        match cli {
            Command::Submit {
                items,
                duration_sec,
                schedules,
            } => {
                assert_eq!(items, PathBuf::from("round.json"));
                assert_eq!(duration_sec, Some(90.0));
                assert_eq!(schedules, PathBuf::from("words.json"));
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn test_review_requires_answer() {
        assert!(Command::try_parse_from(["hagxwon", "review", "42"]).is_err());
        assert!(Command::try_parse_from(["hagxwon", "review", "42", "maybe"]).is_err());
    }
}
