//! Selection of the per-message logging hooks.
//!
//! A directive string is a comma separated list. Bare names replace the
//! default set, `+name` adds a hook and `-name` removes one:
//!
//! ```
//! use netdns_domain::{LogHook, LogHooks};
//!
//! let hooks: LogHooks = "+recv,-reply".parse().unwrap();
//! assert!(hooks.contains(LogHook::Recv));
//! assert!(!hooks.contains(LogHook::Reply));
//! assert!(hooks.contains(LogHook::Request));
//! ```

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogHook {
    Recv,
    Send,
    Request,
    Reply,
    Truncated,
    Error,
    Data,
}

impl LogHook {
    pub const ALL: [LogHook; 7] = [
        LogHook::Recv,
        LogHook::Send,
        LogHook::Request,
        LogHook::Reply,
        LogHook::Truncated,
        LogHook::Error,
        LogHook::Data,
    ];

    pub const DEFAULT: [LogHook; 4] = [
        LogHook::Request,
        LogHook::Reply,
        LogHook::Truncated,
        LogHook::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogHook::Recv => "recv",
            LogHook::Send => "send",
            LogHook::Request => "request",
            LogHook::Reply => "reply",
            LogHook::Truncated => "truncated",
            LogHook::Error => "error",
            LogHook::Data => "data",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|hook| hook.as_str() == name)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for LogHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of enabled hooks.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogHooks(u8);

impl LogHooks {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Self::from_iter(LogHook::ALL)
    }

    pub fn contains(&self, hook: LogHook) -> bool {
        self.0 & hook.bit() != 0
    }

    pub fn insert(&mut self, hook: LogHook) {
        self.0 |= hook.bit();
    }

    pub fn remove(&mut self, hook: LogHook) {
        self.0 &= !hook.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = LogHook> + '_ {
        LogHook::ALL.into_iter().filter(move |hook| self.contains(*hook))
    }
}

impl Default for LogHooks {
    fn default() -> Self {
        Self::from_iter(LogHook::DEFAULT)
    }
}

impl FromIterator<LogHook> for LogHooks {
    fn from_iter<I: IntoIterator<Item = LogHook>>(iter: I) -> Self {
        let mut hooks = Self::none();
        for hook in iter {
            hooks.insert(hook);
        }
        hooks
    }
}

impl fmt::Debug for LogHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for LogHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|hook| hook.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

/// Unknown hook names are ignored, so parsing never fails.
impl FromStr for LogHooks {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entries: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();

        let replacements: Vec<&str> = entries
            .iter()
            .copied()
            .filter(|entry| !entry.starts_with('+') && !entry.starts_with('-'))
            .collect();

        let mut hooks = if replacements.is_empty() {
            LogHooks::default()
        } else {
            replacements
                .into_iter()
                .filter_map(LogHook::from_name)
                .collect()
        };

        for name in entries.iter().filter_map(|entry| entry.strip_prefix('+')) {
            if let Some(hook) = LogHook::from_name(name.trim()) {
                hooks.insert(hook);
            }
        }
        for name in entries.iter().filter_map(|entry| entry.strip_prefix('-')) {
            if let Some(hook) = LogHook::from_name(name.trim()) {
                hooks.remove(hook);
            }
        }

        Ok(hooks)
    }
}
