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
use hagxwon_core::types::schedule::ReviewSchedule;
use hagxwon_core::types::schedule::get_due_words_at;
use hagxwon_core::types::timestamp::Timestamp;

use crate::store::ScheduleFile;

/// Prints the words due for review now, most overdue first.
pub fn list_due(schedules: &Path, limit: usize) -> Fallible<()> {
    let due = due_at(schedules, limit, Timestamp::now())?;
    println!("{}", serde_json::to_string_pretty(&due)?);
    Ok(())
}

fn due_at(schedules: &Path, limit: usize, now: Timestamp) -> Fallible<Vec<ReviewSchedule>> {
    let file = ScheduleFile::open(schedules)?;
    let due = get_due_words_at(&file.schedules(), limit, now);
    log::debug!("{} word(s) due at {now}", due.len());
    Ok(due)
}
