//! Pattern manager
//!
//! Holds the named pattern generators. Any subset can be active at once;
//! update, enumeration and counts only touch the active ones. A disabled
//! pattern is frozen as-is: its bullets and its emission timer are kept and
//! resume when it is enabled again.

use serde::{Deserialize, Serialize};

use super::pattern::Pattern;
use super::projectile::Projectile;
use crate::error::ConfigResult;
use crate::settings::Settings;

/// Toggle command coming from external input mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternCommand {
    Enable(String),
    Disable(String),
    Toggle(String),
}

impl PatternCommand {
    pub fn name(&self) -> &str {
        match self {
            PatternCommand::Enable(name)
            | PatternCommand::Disable(name)
            | PatternCommand::Toggle(name) => name,
        }
    }
}

/// A live bullet tagged with the pattern that owns it
#[derive(Debug, Clone, Copy)]
pub struct LiveProjectile<'a> {
    pub pattern: &'a str,
    pub projectile: &'a Projectile,
}

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    pattern: Pattern,
    enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PatternManager {
    /// Insertion order; this is also the update order
    slots: Vec<Slot>,
    /// Emissions are skipped while the active live total is at or above this
    max_live: Option<usize>,
}

impl PatternManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_live(max_live: Option<usize>) -> Self {
        Self {
            slots: Vec::new(),
            max_live,
        }
    }

    /// Build every configured pattern
    pub fn from_settings(settings: &Settings) -> ConfigResult<Self> {
        settings.validate()?;
        let mut manager = Self::with_max_live(settings.max_live);
        for config in &settings.patterns {
            let pattern = Pattern::new(config, settings.playfield)?;
            manager.add(config.name.clone(), pattern, config.enabled);
        }
        log::info!(
            "Pattern manager ready: {} patterns, {} active, cap {:?}",
            manager.slots.len(),
            manager.slots.iter().filter(|s| s.enabled).count(),
            manager.max_live
        );
        Ok(manager)
    }

    /// Register a pattern. An existing name is replaced in place.
    pub fn add(&mut self, name: impl Into<String>, pattern: Pattern, initially_enabled: bool) {
        let name = name.into();
        let slot = Slot {
            name,
            pattern,
            enabled: initially_enabled,
        };
        match self.slots.iter_mut().find(|s| s.name == slot.name) {
            Some(existing) => *existing = slot,
            None => self.slots.push(slot),
        }
    }

    pub fn enable(&mut self, name: &str) {
        self.set(name, |_| true);
    }

    pub fn disable(&mut self, name: &str) {
        self.set(name, |_| false);
    }

    pub fn toggle(&mut self, name: &str) {
        self.set(name, |enabled| !enabled);
    }

    /// Apply an external command. Returns false for an unknown name.
    pub fn apply(&mut self, command: &PatternCommand) -> bool {
        match command {
            PatternCommand::Enable(name) => self.set(name, |_| true),
            PatternCommand::Disable(name) => self.set(name, |_| false),
            PatternCommand::Toggle(name) => self.set(name, |enabled| !enabled),
        }
    }

    fn set(&mut self, name: &str, f: impl FnOnce(bool) -> bool) -> bool {
        match self.slots.iter_mut().find(|s| s.name == name) {
            Some(slot) => {
                slot.enabled = f(slot.enabled);
                true
            }
            None => {
                log::debug!("Ignoring command for unknown pattern `{}`", name);
                false
            }
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.name == name && s.enabled)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.iter().any(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.slots.iter().find(|s| s.name == name).map(|s| &s.pattern)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    pub fn max_live(&self) -> Option<usize> {
        self.max_live
    }

    /// Advance every active pattern one tick, in insertion order
    pub fn update(&mut self) {
        let max_live = self.max_live;
        let mut live = self.total_live_count();

        for slot in self.slots.iter_mut().filter(|s| s.enabled) {
            let allow_spawn = max_live.is_none_or(|cap| live < cap);
            let before = slot.pattern.live_count();
            slot.pattern.update_gated(allow_spawn);
            live = live - before + slot.pattern.live_count();
        }
    }

    /// Bullets of every active pattern
    pub fn projectiles(&self) -> impl Iterator<Item = LiveProjectile<'_>> {
        self.slots.iter().filter(|s| s.enabled).flat_map(|s| {
            s.pattern.projectiles().iter().map(|projectile| LiveProjectile {
                pattern: s.name.as_str(),
                projectile,
            })
        })
    }

    /// Live bullets across active patterns only
    pub fn total_live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.pattern.live_count())
            .sum()
    }
}
