use locale_collate_core::{Category, LoadStatus, LocalePart, is_default_locale, parse_locale_part};
use tracing::{debug, info, warn};

use crate::error::{RuntimeError, RuntimeResult};
use crate::provider::LocaleDataProvider;

/// Cache for a line-oriented locale category such as `LC_MONETARY` or `LC_TIME`.
#[derive(Debug, Clone)]
pub struct PartCache {
    category: Category,
    min_lines: usize,
    max_lines: usize,
    part: Option<LocalePart>,
    using_locale: bool,
}

impl PartCache {
    pub fn new(category: Category, min_lines: usize, max_lines: usize) -> Self {
        Self {
            category,
            min_lines,
            max_lines,
            part: None,
            using_locale: false,
        }
    }

    pub fn load_locale_part<P>(&mut self, provider: &P, name: &str) -> RuntimeResult<LoadStatus>
    where
        P: LocaleDataProvider + ?Sized,
    {
        if is_default_locale(name) {
            debug!(category = %self.category, locale = name, "using built-in rules");
            self.using_locale = false;
            return Ok(LoadStatus::Cached);
        }

        if self.part.as_ref().map(LocalePart::name) == Some(name) {
            debug!(category = %self.category, locale = name, "locale part cache hit");
            self.using_locale = true;
            return Ok(LoadStatus::Cached);
        }

        let Some(blob) = provider.locale_data(self.category, name) else {
            warn!(category = %self.category, locale = name, "no locale data");
            return Err(RuntimeError::NotFound {
                category: self.category,
                name: name.to_string(),
            });
        };
        let part = parse_locale_part(name, &blob, self.min_lines, self.max_lines).inspect_err(
            |err| warn!(category = %self.category, locale = name, error = %err, "rejected locale part"),
        )?;

        info!(
            category = %self.category,
            locale = name,
            lines = part.line_count(),
            "locale part loaded"
        );
        self.part = Some(part);
        self.using_locale = true;
        Ok(LoadStatus::Loaded)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn using_locale(&self) -> bool {
        self.using_locale
    }

    /// The cached part, if the last load selected locale data.
    pub fn part(&self) -> Option<&LocalePart> {
        if self.using_locale {
            self.part.as_ref()
        } else {
            None
        }
    }

    /// `max_lines` slots; all `None` while the built-in rules are selected.
    pub fn fields(&self) -> Vec<Option<&[u8]>> {
        match self.part() {
            Some(part) => part.fields(),
            None => vec![None; self.max_lines],
        }
    }
}
