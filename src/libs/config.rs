//! Configuration stored as pretty JSON in the data directory.
//!
//! A missing file is not an error: every setting has a default, so the timer
//! works before `tomato init` was ever run.
//!
//! ```json
//! {
//!   "timer": {
//!     "focus_minutes": 25,
//!     "break_minutes": 5,
//!     "sound": true,
//!     "recent_limit": 5
//!   }
//! }
//! ```

use super::data_storage::DataStorage;
use super::timer::{TimerSettings, BREAK_MINUTES_RANGE, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, FOCUS_MINUTES_RANGE};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// How many recent task labels `start` suggests by default.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    /// Ring the terminal bell when an interval completes.
    pub sound: bool,
    pub recent_limit: usize,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            sound: true,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl TimerConfig {
    /// Interval lengths, clamped into the supported ranges.
    pub fn settings(&self) -> TimerSettings {
        TimerSettings::new(self.focus_minutes, self.break_minutes)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Remove the configuration file. Returns false if there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    pub fn timer(&self) -> TimerConfig {
        self.timer.clone().unwrap_or_default()
    }

    /// Interactive wizard; current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.timer();

        msg_print!(Message::ConfigModuleTimer);
        let focus_minutes: u32 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptFocusMinutes.to_string())
            .default(default.focus_minutes)
            .validate_with(|value: &u32| in_range(*value, FOCUS_MINUTES_RANGE.start(), FOCUS_MINUTES_RANGE.end()))
            .interact_text()?;

        let break_minutes: u32 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBreakMinutes.to_string())
            .default(default.break_minutes)
            .validate_with(|value: &u32| in_range(*value, BREAK_MINUTES_RANGE.start(), BREAK_MINUTES_RANGE.end()))
            .interact_text()?;

        let sound = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSound.to_string())
            .default(default.sound)
            .interact()?;

        let recent_limit: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRecentLimit.to_string())
            .default(default.recent_limit)
            .interact_text()?;

        config.timer = Some(TimerConfig {
            focus_minutes,
            break_minutes,
            sound,
            recent_limit,
        });
        Ok(config)
    }
}

fn in_range(value: u32, min: &u32, max: &u32) -> Result<(), String> {
    if (*min..=*max).contains(&value) {
        Ok(())
    } else {
        Err(Message::ValueOutOfRange(*min, *max).to_string())
    }
}
