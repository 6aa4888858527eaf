//! The six record stores behind one handle, plus the read helpers the web
//! layer needs (sorted listings, calendar dates, preset suggestions).

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};

use crate::core::refresh::RefreshManager;
use crate::core::settings::Settings;
use crate::records::{Activity, Habit, Media, MediaStatus, Preset, Record, Workout, WorkoutTemplate};
use crate::shared::errors::StoreResult;
use crate::store::RecordStore;

pub struct Tracker {
    media: Arc<RecordStore<Media>>,
    workouts: Arc<RecordStore<Workout>>,
    templates: Arc<RecordStore<WorkoutTemplate>>,
    habits: Arc<RecordStore<Habit>>,
    activities: Arc<RecordStore<Activity>>,
    presets: Arc<RecordStore<Preset>>,
    refresher: RefreshManager,
    refresh_interval: Duration,
}

impl Tracker {
    /// Opens every store and loads its cache once.
    pub fn open(settings: &Settings) -> StoreResult<Self> {
        Ok(Self {
            media: open_store(settings)?,
            workouts: open_store(settings)?,
            templates: open_store(settings)?,
            habits: open_store(settings)?,
            activities: open_store(settings)?,
            presets: open_store(settings)?,
            refresher: RefreshManager::new(),
            refresh_interval: settings.refresh_interval(),
        })
    }

    /// Starts one background refresher per kind. Requires a tokio runtime.
    pub fn start_refreshing(&self) {
        let interval = self.refresh_interval;
        self.refresher.start(self.media.clone(), interval);
        self.refresher.start(self.workouts.clone(), interval);
        self.refresher.start(self.templates.clone(), interval);
        self.refresher.start(self.habits.clone(), interval);
        self.refresher.start(self.activities.clone(), interval);
        self.refresher.start(self.presets.clone(), interval);
    }

    pub fn refresher(&self) -> &RefreshManager {
        &self.refresher
    }

    pub async fn shutdown(&self) {
        self.refresher.stop_all().await;
        tracing::info!(target: "system", "Tracker shut down");
    }

    pub fn media(&self) -> &RecordStore<Media> {
        &self.media
    }

    pub fn workouts(&self) -> &RecordStore<Workout> {
        &self.workouts
    }

    pub fn templates(&self) -> &RecordStore<WorkoutTemplate> {
        &self.templates
    }

    pub fn habits(&self) -> &RecordStore<Habit> {
        &self.habits
    }

    pub fn activities(&self) -> &RecordStore<Activity> {
        &self.activities
    }

    pub fn presets(&self) -> &RecordStore<Preset> {
        &self.presets
    }

    pub fn media_by_status(&self, status: MediaStatus) -> Vec<Media> {
        let mut media: Vec<Media> = self
            .media
            .list()
            .iter()
            .filter(|m| m.status == status)
            .cloned()
            .collect();
        media.sort_by_cached_key(|m| m.name.to_lowercase());
        media
    }

    pub fn workouts_newest_first(&self) -> Vec<Workout> {
        let mut workouts = self.workouts.list().to_vec();
        workouts.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
        workouts
    }

    /// Distinct days in the month with at least one workout, ascending.
    pub fn workout_dates_in_month(&self, year: i32, month: u32) -> Vec<NaiveDate> {
        self.workouts
            .list()
            .iter()
            .map(|w| w.date)
            .filter(|d| d.year() == year && d.month() == month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn templates_by_name(&self) -> Vec<WorkoutTemplate> {
        sorted_by_name(self.templates.list().to_vec(), |t| &t.name)
    }

    pub fn habits_by_name(&self) -> Vec<Habit> {
        sorted_by_name(self.habits.list().to_vec(), |h| &h.name)
    }

    pub fn presets_by_name(&self) -> Vec<Preset> {
        sorted_by_name(self.presets.list().to_vec(), |p| &p.name)
    }

    /// Activities by date, then name. `Some(date)` keeps only that day.
    pub fn activities_on(&self, date: Option<NaiveDate>) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self
            .activities
            .list()
            .iter()
            .filter(|a| date.map_or(true, |d| a.date == d))
            .cloned()
            .collect();
        activities.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        activities
    }

    /// Every name used by an activity or a preset, sorted and deduplicated.
    pub fn preset_names(&self) -> Vec<String> {
        let activities = self.activities.list();
        let presets = self.presets.list();
        activities
            .iter()
            .map(|a| a.name.clone())
            .chain(presets.iter().map(|p| p.name.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Flips the habit's completion for `date`. The read and the write happen
    /// under the habit store's mutation lock.
    pub fn toggle_habit_completion(&self, habit_id: &str, date: NaiveDate) -> StoreResult<Habit> {
        let mut completed = false;
        let habit = self
            .habits
            .modify(habit_id, |habit| completed = habit.toggle_completion(date))?;
        tracing::debug!(
            target: "store",
            kind = %Habit::KIND,
            id = %habit_id,
            date = %date,
            completed = completed,
            "Toggled habit completion"
        );
        Ok(habit)
    }
}

fn open_store<R: Record>(settings: &Settings) -> StoreResult<Arc<RecordStore<R>>> {
    RecordStore::open(settings.dir_for(R::KIND), settings.file_extension.as_str()).map(Arc::new)
}

fn sorted_by_name<T>(mut items: Vec<T>, name: impl Fn(&T) -> &String) -> Vec<T> {
    items.sort_by_cached_key(|item| name(item).to_lowercase());
    items
}
