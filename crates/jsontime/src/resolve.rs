//! Per-field resolution of the effective `(layout, zone)` pair.

use crate::config::TimeConfig;
use crate::error::TimeError;
use jsontime_layout::{Layout, Zone};
use tracing::trace;

/// The raw `format` / `zone` annotations of a single field.
///
/// Both are optional and resolve independently: an absent annotation falls
/// back to the config default for that half only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    pub format: Option<&'a str>,
    pub zone: Option<&'a str>,
}

impl<'a> FieldSpec<'a> {
    /// A field without annotations.
    pub const DEFAULT: Self = Self { format: None, zone: None };

    #[must_use]
    pub const fn new(format: Option<&'a str>, zone: Option<&'a str>) -> Self {
        Self { format, zone }
    }
}

/// The effective layout and zone for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub layout: Layout,
    pub zone: Zone,
}

impl TimeConfig {
    /// Resolves a field annotation against this config.
    ///
    /// `format` is looked up as a registered alias, then a well-known layout
    /// name, then a literal strftime pattern (anything containing `%`).
    /// `zone` is looked up as a registered alias, then parsed as a zone literal.
    ///
    /// # Errors
    /// * [`TimeError::UnknownLayout`] if `format` matches none of the above.
    /// * [`TimeError::Layout`] if a strftime literal does not compile.
    /// * [`TimeError::UnknownZone`] if `zone` is neither an alias nor a zone.
    pub fn resolve(&self, spec: &FieldSpec<'_>) -> Result<Resolved, TimeError> {
        // One snapshot: both defaults and all alias lookups.
        let (layout, zone) = {
            let registry = self.inner.read();
            let layout = match spec.format {
                None => Ok(registry.default_layout.clone()),
                Some(name) => registry
                    .layouts
                    .get(name)
                    .or_else(|| registry.literals.get(name))
                    .cloned()
                    .ok_or(name),
            };
            let zone = match spec.zone {
                None => Ok(registry.default_zone),
                Some(name) => registry.zones.get(name).copied().ok_or(name),
            };
            (layout, zone)
        };

        let layout = match layout {
            Ok(layout) => layout,
            Err(name) => self.compile_layout(name)?,
        };
        let zone = match zone {
            Ok(zone) => zone,
            Err(name) => name
                .parse()
                .map_err(|source| TimeError::UnknownZone { name: name.to_owned(), source })?,
        };

        trace!(format = ?spec.format, zone = ?spec.zone, layout = %layout, resolved_zone = %zone, "Resolved time field");
        Ok(Resolved { layout, zone })
    }

    /// Well-known name or strftime literal; literals are cached on success.
    fn compile_layout(&self, name: &str) -> Result<Layout, TimeError> {
        if let Some(layout) = Layout::well_known(name) {
            return Ok(layout);
        }
        if !name.contains('%') {
            return Err(TimeError::UnknownLayout { name: name.to_owned() });
        }

        let layout = Layout::strftime(name)?;
        Ok(self.inner.write().literals.entry(name.to_owned()).or_insert(layout).clone())
    }
}
