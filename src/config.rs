use crate::limits::*;
use crate::model::Minutes;

/// Scheduling rules for one engine. Defaults come from [`crate::limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub day_start: Minutes,
    pub day_end: Minutes,
    pub quantum: Minutes,
    pub min_slot_duration: Minutes,
    pub default_slot_duration: Minutes,
    pub availability_days: u32,
    pub recurrence_weeks: u32,
    pub max_slots_per_date: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start: DAY_START_MIN,
            day_end: DAY_END_MIN,
            quantum: QUANTUM_MIN,
            min_slot_duration: MIN_SLOT_DURATION_MIN,
            default_slot_duration: DEFAULT_SLOT_DURATION_MIN,
            availability_days: AVAILABILITY_DAYS,
            recurrence_weeks: RECURRENCE_WEEKS,
            max_slots_per_date: MAX_SLOTS_PER_DATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    DayWindow { start: Minutes, end: Minutes },
    Quantum(Minutes),
    MinDuration(Minutes),
    Horizon(u32),
    RecurrenceWeeks(u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::DayWindow { start, end } => {
                write!(f, "day window [{start}, {end}) must lie inside [0, {MINUTES_PER_DAY}]")
            }
            ConfigError::Quantum(q) => {
                write!(f, "quantum {q} must be positive and divide the day window")
            }
            ConfigError::MinDuration(d) => {
                write!(f, "minimum slot duration {d} must be a positive multiple of the quantum")
            }
            ConfigError::Horizon(days) => write!(
                f,
                "availability horizon of {days} days must be between 1 and {MAX_AVAILABILITY_DAYS}"
            ),
            ConfigError::RecurrenceWeeks(weeks) => write!(
                f,
                "recurrence walk of {weeks} weeks must be between 1 and {MAX_RECURRENCE_WEEKS}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl ScheduleConfig {
    /// Defaults overridden by `SLOTBOARD_*` environment variables. Unparseable
    /// values fall back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let d = Self::default();
        let config = Self {
            day_start: env_or("SLOTBOARD_DAY_START", d.day_start),
            day_end: env_or("SLOTBOARD_DAY_END", d.day_end),
            quantum: env_or("SLOTBOARD_QUANTUM", d.quantum),
            min_slot_duration: env_or("SLOTBOARD_MIN_SLOT", d.min_slot_duration),
            default_slot_duration: env_or("SLOTBOARD_DEFAULT_SLOT", d.default_slot_duration),
            availability_days: env_or("SLOTBOARD_AVAILABILITY_DAYS", d.availability_days),
            recurrence_weeks: env_or("SLOTBOARD_RECURRENCE_WEEKS", d.recurrence_weeks),
            max_slots_per_date: env_or("SLOTBOARD_MAX_SLOTS_PER_DATE", d.max_slots_per_date),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.day_start < 0 || self.day_end > MINUTES_PER_DAY || self.day_start >= self.day_end {
            return Err(ConfigError::DayWindow {
                start: self.day_start,
                end: self.day_end,
            });
        }
        if self.quantum <= 0 || (self.day_end - self.day_start) % self.quantum != 0 {
            return Err(ConfigError::Quantum(self.quantum));
        }
        if self.min_slot_duration <= 0
            || self.min_slot_duration % self.quantum != 0
            || self.min_slot_duration > self.day_end - self.day_start
        {
            return Err(ConfigError::MinDuration(self.min_slot_duration));
        }
        if self.availability_days == 0 || self.availability_days > MAX_AVAILABILITY_DAYS {
            return Err(ConfigError::Horizon(self.availability_days));
        }
        if self.recurrence_weeks == 0 || self.recurrence_weeks > MAX_RECURRENCE_WEEKS {
            return Err(ConfigError::RecurrenceWeeks(self.recurrence_weeks));
        }
        Ok(())
    }

    /// Round to the nearest quantum, then clamp into the day window.
    pub fn quantize(&self, minutes: Minutes) -> Minutes {
        let q = self.quantum;
        let rounded = (minutes + q / 2).div_euclid(q) * q;
        rounded.clamp(self.day_start, self.day_end)
    }
}
