use crate::error::TimeError;
use crate::scope;
use fxhash::FxHashMap;
use jsontime_layout::{Layout, Zone};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub(crate) struct Registry {
    pub(crate) default_layout: Layout,
    pub(crate) default_zone: Zone,
    pub(crate) layouts: FxHashMap<String, Layout>,
    pub(crate) zones: FxHashMap<String, Zone>,
    /// Literal patterns compiled on first use, keyed by their text.
    pub(crate) literals: FxHashMap<String, Layout>,
}

/// Time-format configuration: the default `(layout, zone)` pair plus the alias registries.
///
/// `TimeConfig` is a handle over shared state guarded by a single lock. Clones
/// share the same state, so a registration through one clone is visible through
/// all of them. Use [`TimeConfig::fork`] for an independent copy.
///
/// Aliases are last-write-wins and cannot be removed.
///
/// # Example
///
/// ```rust
/// use jsontime::{Layout, TimeConfig, Zone};
///
/// # fn main() -> Result<(), jsontime::TimeError> {
/// let config = TimeConfig::builder()
///     .default_zone("Asia/Shanghai".parse()?)
///     .layout("sql_datetime", "%Y-%m-%d %H:%M:%S".parse()?)
///     .build();
///
/// config.register_zone("shanghai", "Asia/Shanghai".parse()?);
/// assert_eq!(config.layout("sql_datetime")?.source(), "%Y-%m-%d %H:%M:%S");
/// assert!(config.zone("berlin").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimeConfig {
    pub(crate) inner: Arc<RwLock<Registry>>,
}

impl TimeConfig {
    /// Creates a config with the built-in default: `rfc3339` in `UTC`, no aliases.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "The builder must be finished with `build`"]
    pub fn builder() -> TimeConfigBuilder {
        TimeConfigBuilder::default()
    }

    /// Returns an independent copy of the current state.
    #[must_use]
    pub fn fork(&self) -> Self {
        let registry = self.inner.read().clone();
        Self { inner: Arc::new(RwLock::new(registry)) }
    }

    /// Replaces the default `(layout, zone)` pair used by unannotated fields.
    pub fn set_default(&self, layout: Layout, zone: Zone) {
        debug!(layout = %layout, zone = %zone, "Setting default time format");
        let mut registry = self.inner.write();
        registry.default_layout = layout;
        registry.default_zone = zone;
    }

    pub fn set_default_layout(&self, layout: Layout) {
        debug!(layout = %layout, "Setting default time layout");
        self.inner.write().default_layout = layout;
    }

    pub fn set_default_zone(&self, zone: Zone) {
        debug!(zone = %zone, "Setting default time zone");
        self.inner.write().default_zone = zone;
    }

    #[must_use]
    pub fn default_layout(&self) -> Layout {
        self.inner.read().default_layout.clone()
    }

    #[must_use]
    pub fn default_zone(&self) -> Zone {
        self.inner.read().default_zone
    }

    /// Binds `name` to `layout`, replacing any previous binding.
    pub fn register_layout(&self, name: impl Into<String>, layout: Layout) {
        let name = name.into();
        debug!(alias = %name, layout = %layout, "Registering time layout alias");
        if let Some(previous) = self.inner.write().layouts.insert(name.clone(), layout) {
            debug!(alias = %name, previous = %previous, "Replaced time layout alias");
        }
    }

    /// Compiles `pattern` (well-known name, strftime or reference-time) and registers it.
    ///
    /// # Errors
    /// Returns [`TimeError::Layout`] if the pattern does not compile.
    pub fn register_format(&self, name: impl Into<String>, pattern: &str) -> Result<(), TimeError> {
        let layout: Layout = pattern.parse()?;
        self.register_layout(name, layout);
        Ok(())
    }

    /// Binds `name` to `zone`, replacing any previous binding.
    pub fn register_zone(&self, name: impl Into<String>, zone: Zone) {
        let name = name.into();
        debug!(alias = %name, zone = %zone, "Registering time zone alias");
        if let Some(previous) = self.inner.write().zones.insert(name.clone(), zone) {
            debug!(alias = %name, previous = %previous, "Replaced time zone alias");
        }
    }

    /// Returns the layout registered under `name`.
    ///
    /// # Errors
    /// Returns [`TimeError::UnknownLayout`] if no layout is registered under `name`.
    pub fn layout(&self, name: &str) -> Result<Layout, TimeError> {
        self.inner
            .read()
            .layouts
            .get(name)
            .cloned()
            .ok_or_else(|| TimeError::UnknownLayout { name: name.to_owned() })
    }

    /// Returns the zone registered under `name`.
    ///
    /// # Errors
    /// Returns [`TimeError::UnknownZone`] if no zone is registered under `name`.
    pub fn zone(&self, name: &str) -> Result<Zone, TimeError> {
        self.inner.read().zones.get(name).copied().ok_or_else(|| TimeError::UnknownZone {
            name: name.to_owned(),
            source: jsontime_layout::LayoutError::InvalidZone {
                name: name.to_owned(),
                message: "no zone registered under this alias".into(),
            },
        })
    }

    /// Runs `f` with this config active for field helpers on the current thread.
    ///
    /// Use this to drive serde formats other than JSON; [`Codec`](crate::Codec)
    /// does it for every call. Scopes nest and are restored when `f` returns or
    /// unwinds.
    pub fn scoped<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = scope::enter(self);
        f()
    }
}

/// A builder for [`TimeConfig`].
#[derive(Debug, Default)]
pub struct TimeConfigBuilder {
    default_layout: Option<Layout>,
    default_zone: Option<Zone>,
    layouts: Vec<(String, Layout)>,
    zones: Vec<(String, Zone)>,
}

impl TimeConfigBuilder {
    #[must_use = "The builder must be finished with `build`"]
    pub fn default_layout(mut self, layout: Layout) -> Self {
        self.default_layout = Some(layout);
        self
    }

    #[must_use = "The builder must be finished with `build`"]
    pub const fn default_zone(mut self, zone: Zone) -> Self {
        self.default_zone = Some(zone);
        self
    }

    /// Adds a layout alias. Later entries with the same name win.
    #[must_use = "The builder must be finished with `build`"]
    pub fn layout(mut self, name: impl Into<String>, layout: Layout) -> Self {
        self.layouts.push((name.into(), layout));
        self
    }

    /// Adds a zone alias. Later entries with the same name win.
    #[must_use = "The builder must be finished with `build`"]
    pub fn zone(mut self, name: impl Into<String>, zone: Zone) -> Self {
        self.zones.push((name.into(), zone));
        self
    }

    pub fn build(self) -> TimeConfig {
        let registry = Registry {
            default_layout: self.default_layout.unwrap_or_default(),
            default_zone: self.default_zone.unwrap_or_default(),
            layouts: self.layouts.into_iter().collect(),
            zones: self.zones.into_iter().collect(),
            literals: FxHashMap::default(),
        };
        debug!(
            layout = %registry.default_layout,
            zone = %registry.default_zone,
            layouts = registry.layouts.len(),
            zones = registry.zones.len(),
            "Time config built"
        );
        TimeConfig { inner: Arc::new(RwLock::new(registry)) }
    }
}
