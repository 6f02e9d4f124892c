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
use hagxwon_core::record::Record;
use hagxwon_core::record::score_round_from_records;
use serde_json::Value;

use crate::cmd::read_records;

/// Scores a round read from a file of item objects, without touching any
/// schedules.
pub fn score_items(items: &Path, duration_sec: Option<f64>) -> Fallible<()> {
    let result = score_file(items, duration_sec)?;
    println!("{}", serde_json::to_string_pretty(&Value::Object(result))?);
    Ok(())
}

fn score_file(items: &Path, duration_sec: Option<f64>) -> Fallible<Record> {
    let records = read_records(items)?;
    log::debug!("Scoring {} item(s) from {}", records.len(), items.display());
    Ok(score_round_from_records(&records, duration_sec)?)
}
