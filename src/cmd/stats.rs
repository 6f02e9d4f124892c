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
use hagxwon_core::types::schedule::ReviewSchedule;
use hagxwon_core::types::schedule::average_ease;
use hagxwon_core::types::schedule::calculate_retention_rate;
use hagxwon_core::types::timestamp::Timestamp;
use serde::Serialize;

use crate::store::ScheduleFile;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatsFormat {
    /// Human-readable lines.
    Text,
    /// A JSON object.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
struct Stats {
    words: usize,
    due: usize,
    average_ease: f64,
    /// Estimated from the ease factors, not measured.
    retention_rate: f64,
}

impl Stats {
    fn collect(schedules: &[ReviewSchedule], now: Timestamp) -> Self {
        Stats {
            words: schedules.len(),
            due: schedules.iter().filter(|s| s.is_due(now)).count(),
            average_ease: average_ease(schedules).unwrap_or(0.0),
            retention_rate: calculate_retention_rate(schedules),
        }
    }

    fn render(&self, format: StatsFormat) -> Fallible<String> {
        match format {
            StatsFormat::Text => Ok(format!(
                "Words: {}\nDue now: {}\nAverage ease: {:.2}\nEstimated retention: {:.1}%",
                self.words,
                self.due,
                self.average_ease,
                self.retention_rate * 100.0
            )),
            StatsFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

pub fn print_stats(schedules: &Path, format: StatsFormat) -> Fallible<()> {
    let file = ScheduleFile::open(schedules)?;
    let stats = Stats::collect(&file.schedules(), Timestamp::now());
    println!("{}", stats.render(format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use hagxwon_core::types::schedule::ReviewState;
    use hagxwon_core::types::schedule::schedule_review_at;
    use hagxwon_core::types::word_id::WordId;

    use super::*;

    fn fixture() -> Fallible<(Vec<ReviewSchedule>, Timestamp)> {
        let at = Timestamp::parse("2024-04-01T07:00:00")?;
        let fresh = schedule_review_at(WordId::new(1), true, ReviewState::New, at);
        let missed = schedule_review_at(
            WordId::new(2),
            false,
            ReviewState::Scheduled(fresh),
            at.plus_days(3),
        );
        Ok((vec![fresh, missed], at.plus_days(3)))
    }

    #[test]
    fn test_collect() -> Fallible<()> {
        let (schedules, now) = fixture()?;
        let stats = Stats::collect(&schedules, now);
        assert_eq!(stats.words, 2);
        assert_eq!(stats.due, 1);
        assert!((stats.average_ease - 2.4).abs() < 1e-9);
        assert!((stats.retention_rate - (0.6 + 1.1 / 2.7 * 0.35)).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_collect_empty() -> Fallible<()> {
        let (_, now) = fixture()?;
        let stats = Stats::collect(&[], now);
        assert_eq!(
            stats,
            Stats {
                words: 0,
                due: 0,
                average_ease: 0.0,
                retention_rate: 0.0,
            }
        );
        Ok(())
    }

    #[test]
    fn test_render_text() -> Fallible<()> {
        let (schedules, now) = fixture()?;
        let text = Stats::collect(&schedules, now).render(StatsFormat::Text)?;
        assert_eq!(
            text,
            "Words: 2\nDue now: 1\nAverage ease: 2.40\nEstimated retention: 74.3%"
        );
        Ok(())
    }

    #[test]
    fn test_render_json() -> Fallible<()> {
        let (schedules, now) = fixture()?;
        let json = Stats::collect(&schedules, now).render(StatsFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["words"], 2);
        assert_eq!(value["due"], 1);
        Ok(())
    }
}
