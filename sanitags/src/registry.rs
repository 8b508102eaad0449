//! Policy functions and the process-wide registry that holds them.
//!
//! Cleaning algorithms are supplied by the caller: the registry only maps each
//! [`PolicyName`] to a function. The mapping is replaced wholesale under a
//! mutex and looked up under the same mutex; the lock is never held while a
//! sanitize function runs, so a slow transform cannot stall reconfiguration or
//! other lookups.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{error::SanitizeError, policy::PolicyName};

/// A caller-supplied text transform implementing one policy.
pub type SanitizeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The functions backing each policy.
///
/// Exactly two slots exist, one per [`PolicyName`]. A slot left empty is only
/// an error once a field actually asks for that policy.
///
/// ```rust
/// use sanitags::{PolicyConfig, PolicyName, PolicyResolver};
///
/// let config = PolicyConfig::new().with_strip_all(|s| s.trim().to_string());
/// let strip = config.resolve(PolicyName::StripAll).unwrap();
/// assert_eq!(strip("  hi "), "hi");
/// assert!(config.resolve(PolicyName::SafeUserGeneratedContent).is_err());
/// ```
#[derive(Clone, Default)]
pub struct PolicyConfig {
    strip_all: Option<SanitizeFn>,
    safe_user_generated_content: Option<SanitizeFn>,
}

impl PolicyConfig {
    /// Constructs a configuration with both slots empty.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strip_all: None,
            safe_user_generated_content: None,
        }
    }

    /// Installs the function behind `"strip-all"`.
    #[must_use]
    pub fn with_strip_all<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.with_policy(PolicyName::StripAll, Arc::new(f))
    }

    /// Installs the function behind `"safe-user-generated-content"`.
    #[must_use]
    pub fn with_safe_user_generated_content<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.with_policy(PolicyName::SafeUserGeneratedContent, Arc::new(f))
    }

    /// Installs an already shared function for `name`.
    #[must_use]
    pub fn with_policy(mut self, name: PolicyName, f: SanitizeFn) -> Self {
        *self.slot_mut(name) = Some(f);
        self
    }

    /// Returns the function installed for `name`, if any.
    pub fn get(&self, name: PolicyName) -> Option<&SanitizeFn> {
        match name {
            PolicyName::StripAll => self.strip_all.as_ref(),
            PolicyName::SafeUserGeneratedContent => self.safe_user_generated_content.as_ref(),
        }
    }

    /// Returns `true` when every policy has a function installed.
    pub fn is_complete(&self) -> bool {
        PolicyName::ALL.into_iter().all(|name| self.get(name).is_some())
    }

    fn slot_mut(&mut self, name: PolicyName) -> &mut Option<SanitizeFn> {
        match name {
            PolicyName::StripAll => &mut self.strip_all,
            PolicyName::SafeUserGeneratedContent => &mut self.safe_user_generated_content,
        }
    }
}

impl fmt::Debug for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("PolicyConfig");
        for name in PolicyName::ALL {
            let state = if self.get(name).is_some() {
                "configured"
            } else {
                "unset"
            };
            debug.field(name.as_str(), &state);
        }
        debug.finish()
    }
}

/// Looks up the function behind a policy.
///
/// The record walk reads policies only through this trait, so the same
/// derived code runs against the process-wide registry, a private
/// [`PolicyRegistry`], a plain [`PolicyConfig`], or a decorator around any of
/// them.
pub trait PolicyResolver {
    /// Returns the function for `name`, or
    /// [`SanitizeError::PolicyNotConfigured`] when its slot is empty.
    fn resolve(&self, name: PolicyName) -> Result<SanitizeFn, SanitizeError>;

    /// Parses `name` and resolves it.
    ///
    /// Fails with [`SanitizeError::UnknownPolicy`] for identifiers outside the
    /// recognized set.
    fn resolve_str(&self, name: &str) -> Result<SanitizeFn, SanitizeError> {
        self.resolve(name.parse()?)
    }
}

impl<R> PolicyResolver for &R
where
    R: PolicyResolver + ?Sized,
{
    fn resolve(&self, name: PolicyName) -> Result<SanitizeFn, SanitizeError> {
        (**self).resolve(name)
    }

    fn resolve_str(&self, name: &str) -> Result<SanitizeFn, SanitizeError> {
        (**self).resolve_str(name)
    }
}

impl PolicyResolver for PolicyConfig {
    fn resolve(&self, name: PolicyName) -> Result<SanitizeFn, SanitizeError> {
        self.get(name)
            .cloned()
            .ok_or(SanitizeError::PolicyNotConfigured(name))
    }
}

/// A swappable, thread-safe policy mapping.
///
/// [`PolicyRegistry::configure`] replaces the whole mapping at once. A
/// resolution observes either the old or the new mapping, never a mix, and a
/// function resolved before a swap keeps working after it.
pub struct PolicyRegistry {
    config: Mutex<PolicyConfig>,
}

impl PolicyRegistry {
    /// Constructs a registry with no functions installed.
    pub const fn new() -> Self {
        Self {
            config: Mutex::new(PolicyConfig::new()),
        }
    }

    /// Constructs a registry holding `config`.
    pub fn with_config(config: PolicyConfig) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }

    /// Replaces the mapping.
    pub fn configure(&self, config: PolicyConfig) {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a consistent mapping.
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Returns a copy of the current mapping.
    pub fn snapshot(&self) -> PolicyConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("config", &self.snapshot())
            .finish()
    }
}

impl PolicyResolver for PolicyRegistry {
    fn resolve(&self, name: PolicyName) -> Result<SanitizeFn, SanitizeError> {
        let config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        config.resolve(name)
    }
}

static GLOBAL: PolicyRegistry = PolicyRegistry::new();

/// Installs `config` as the process-wide policy mapping.
///
/// Call this before the first [`crate::sanitize_record`]. Calling it again
/// swaps the mapping for every later resolution.
pub fn setup(config: PolicyConfig) {
    GLOBAL.configure(config);
}

/// Returns the process-wide registry used by [`crate::sanitize_record`].
pub fn global() -> &'static PolicyRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn upper() -> PolicyConfig {
        PolicyConfig::new()
            .with_strip_all(str::to_uppercase)
            .with_safe_user_generated_content(str::to_lowercase)
    }

    #[test]
    fn empty_config_reports_every_policy_unconfigured() {
        let config = PolicyConfig::new();
        for name in PolicyName::ALL {
            assert_eq!(
                config.resolve(name).err(),
                Some(SanitizeError::PolicyNotConfigured(name))
            );
        }
        assert!(!config.is_complete());
    }

    #[test]
    fn config_resolves_each_slot_independently() {
        let config = upper();
        assert!(config.is_complete());
        assert_eq!(config.resolve(PolicyName::StripAll).unwrap()("Ab"), "AB");
        assert_eq!(
            config.resolve(PolicyName::SafeUserGeneratedContent).unwrap()("Ab"),
            "ab"
        );
    }

    #[test]
    fn resolve_str_rejects_unknown_names() {
        let config = upper();
        assert_eq!(
            config.resolve_str("stripall").err(),
            Some(SanitizeError::UnknownPolicy("stripall".to_string()))
        );
        assert_eq!(config.resolve_str("strip-all").unwrap()("a"), "A");
    }

    #[test]
    fn new_registry_is_unconfigured() {
        let registry = PolicyRegistry::new();
        assert_eq!(
            registry.resolve(PolicyName::StripAll).err(),
            Some(SanitizeError::PolicyNotConfigured(PolicyName::StripAll))
        );
    }

    #[test]
    fn configure_is_visible_to_later_resolutions() {
        let registry = PolicyRegistry::new();
        registry.configure(upper());
        assert_eq!(registry.resolve(PolicyName::StripAll).unwrap()("x"), "X");

        registry.configure(PolicyConfig::new().with_strip_all(|_| "replaced".to_string()));
        assert_eq!(
            registry.resolve(PolicyName::StripAll).unwrap()("x"),
            "replaced"
        );
        assert!(registry
            .resolve(PolicyName::SafeUserGeneratedContent)
            .is_err());
    }

    #[test]
    fn resolved_function_survives_reconfiguration() {
        let registry = PolicyRegistry::with_config(upper());
        let before = registry.resolve(PolicyName::StripAll).unwrap();
        registry.configure(PolicyConfig::new());
        assert_eq!(before("still works"), "STILL WORKS");
    }

    #[test]
    fn lock_is_not_held_while_a_function_runs() {
        let registry = Arc::new(PolicyRegistry::new());
        let (entered_tx, entered_rx) = mpsc::channel::<()>();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let entered_tx = Mutex::new(entered_tx);
        let release_rx = Mutex::new(release_rx);
        registry.configure(PolicyConfig::new().with_strip_all(move |s| {
            entered_tx.lock().unwrap().send(()).unwrap();
            release_rx.lock().unwrap().recv().unwrap();
            s.to_string()
        }));

        let slow = registry.resolve(PolicyName::StripAll).unwrap();
        let worker = std::thread::spawn(move || slow("blocked"));
        entered_rx.recv().unwrap();

        // The transform is parked; the registry must still be usable.
        registry.configure(upper());
        assert_eq!(registry.resolve(PolicyName::StripAll).unwrap()("y"), "Y");

        release_tx.send(()).unwrap();
        assert_eq!(worker.join().unwrap(), "blocked");
    }

    #[test]
    fn poisoned_registry_still_resolves() {
        let registry = Arc::new(PolicyRegistry::with_config(upper()));
        let poisoner = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.config.lock().unwrap();
            panic!("poison the registry lock");
        })
        .join();

        assert_eq!(registry.resolve(PolicyName::StripAll).unwrap()("z"), "Z");
        registry.configure(PolicyConfig::new());
        assert!(registry.resolve(PolicyName::StripAll).is_err());
    }

    #[test]
    fn debug_reports_slot_state_only() {
        let config = PolicyConfig::new().with_strip_all(str::to_string);
        let rendered = format!("{config:?}");
        assert!(rendered.contains("strip-all: \"configured\""));
        assert!(rendered.contains("safe-user-generated-content: \"unset\""));
    }
}
