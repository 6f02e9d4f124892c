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

pub mod due;
pub mod review;
pub mod score;
pub mod stats;
pub mod submit;

use std::fs::read_to_string;
use std::path::Path;

use hagxwon_core::error::Fallible;
use hagxwon_core::record::Record;
use hagxwon_core::record::as_record;
use serde_json::Value;

/// Reads a JSON array of objects, such as the items of a round.
pub fn read_records(path: &Path) -> Fallible<Vec<Record>> {
    let text = read_to_string(path)?;
    let values: Vec<Value> = serde_json::from_str(&text)?;
    let mut records = Vec::with_capacity(values.len());
    for value in &values {
        records.push(as_record(value)?.clone());
    }
    Ok(records)
}
