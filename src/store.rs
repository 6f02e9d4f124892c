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
use std::fs::read_to_string;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use hagxwon_core::error::Fallible;
use hagxwon_core::error::fail;
use hagxwon_core::round::ScheduleStore;
use hagxwon_core::types::schedule::ReviewSchedule;
use hagxwon_core::types::word_id::WordId;
use tempfile::NamedTempFile;

pub const DEFAULT_SCHEDULES_PATH: &str = "schedules.json";

/// Review schedules kept in a JSON file, as an array of schedule objects.
/// Changes stay in memory until [`ScheduleFile::commit`].
pub struct ScheduleFile {
    path: PathBuf,
    schedules: BTreeMap<WordId, ReviewSchedule>,
}

impl ScheduleFile {
    /// Opens a schedule file. A file that does not exist yet is an empty
    /// collection.
    pub fn open(path: impl AsRef<Path>) -> Fallible<Self> {
        let path = path.as_ref().to_path_buf();
        let mut schedules = BTreeMap::new();
        if path.exists() {
            let text = read_to_string(&path)?;
            let list: Vec<ReviewSchedule> = serde_json::from_str(&text)?;
            for schedule in list {
                if schedules.insert(schedule.word_id, schedule).is_some() {
                    return fail(format!(
                        "{}: more than one schedule for word {}.",
                        path.display(),
                        schedule.word_id
                    ));
                }
            }
            log::debug!("Loaded {} schedules from {}", schedules.len(), path.display());
        } else {
            log::debug!("{} does not exist, starting empty", path.display());
        }
        Ok(Self { path, schedules })
    }

    /// All schedules, ordered by word id.
    pub fn schedules(&self) -> Vec<ReviewSchedule> {
        self.schedules.values().copied().collect()
    }

    /// Writes the schedules back. The file is replaced in one step, and a
    /// failed write leaves no temporary file behind.
    pub fn commit(&self) -> Fallible<()> {
        let text = serde_json::to_string_pretty(&self.schedules())?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        log::debug!("Wrote {} schedules to {}", self.schedules.len(), self.path.display());
        Ok(())
    }
}

impl ScheduleStore for ScheduleFile {
    fn load(&self, word_id: WordId) -> Fallible<Option<ReviewSchedule>> {
        self.schedules.load(word_id)
    }

    fn save(&mut self, schedule: ReviewSchedule) -> Fallible<()> {
        self.schedules.save(schedule)
    }
}
