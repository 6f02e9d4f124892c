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

use std::path::Path;

use hagxwon_core::error::Fallible;
use hagxwon_core::round::RoundSummary;
use hagxwon_core::round::submit_round;
use hagxwon_core::score::GameItem;
use hagxwon_core::types::timestamp::Timestamp;

use crate::cmd::read_records;
use crate::store::ScheduleFile;

/// Scores a round and reschedules every word in it.
pub fn submit_items(items: &Path, schedules: &Path, duration_sec: Option<f64>) -> Fallible<()> {
    let summary = submit_at(items, schedules, duration_sec, Timestamp::now())?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn submit_at(
    items: &Path,
    schedules: &Path,
    duration_sec: Option<f64>,
    reviewed_at: Timestamp,
) -> Fallible<RoundSummary> {
    let items: Vec<GameItem> = read_records(items)?
        .iter()
        .map(GameItem::from_record)
        .collect::<Result<_, _>>()?;
    let mut file = ScheduleFile::open(schedules)?;
    let summary = submit_round(&mut file, &items, duration_sec, reviewed_at)?;
    file.commit()?;
    Ok(summary)
}
