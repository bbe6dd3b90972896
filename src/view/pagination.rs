#[cfg(test)]
#[path = "pagination_test.rs"]
mod pagination_test;

use std::ops::RangeInclusive;

use crate::net::types::Pagination;

/// Pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

/// One button in a pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageControl {
    First,
    Prev(u32),
    Page { number: u32, current: bool },
    Next(u32),
    Last(u32),
}

impl PageControl {
    /// Page this control navigates to; `None` for the disabled current page.
    #[must_use]
    pub fn target(self) -> Option<u32> {
        match self {
            Self::First => Some(1),
            Self::Prev(page) | Self::Next(page) | Self::Last(page) => Some(page),
            Self::Page { current: true, .. } => None,
            Self::Page { number, .. } => Some(number),
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::First => "« Primera".to_owned(),
            Self::Prev(_) => "‹ Anterior".to_owned(),
            Self::Page { number, .. } => number.to_string(),
            Self::Next(_) => "Siguiente ›".to_owned(),
            Self::Last(_) => "Última »".to_owned(),
        }
    }
}

/// Page numbers around `current`, clamped to `[1, total]`.
#[must_use]
pub fn page_window(current: u32, total: u32) -> RangeInclusive<u32> {
    let total = total.max(1);
    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = current.saturating_add(WINDOW_RADIUS).min(total);
    start..=end
}

/// Build the pagination bar for `info`.
///
/// First/previous appear only when the server reports a previous page,
/// next/last only when it reports a next one.
#[must_use]
pub fn page_controls(info: &Pagination) -> Vec<PageControl> {
    let current = info.pagina_actual;
    let mut controls = Vec::new();

    if info.has_prev {
        controls.push(PageControl::First);
        controls.push(PageControl::Prev(current.saturating_sub(1).max(1)));
    }

    controls.extend(page_window(current, info.total_paginas).map(|number| PageControl::Page {
        number,
        current: number == current,
    }));

    if info.has_next {
        controls.push(PageControl::Next(current.saturating_add(1)));
        controls.push(PageControl::Last(info.total_paginas));
    }

    controls
}

/// "Mostrando first - last de total usuarios | Página p de t".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSummary {
    /// 1-based index of the first row shown; 0 when the listing is empty.
    pub first: u64,
    pub last: u64,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl PageSummary {
    #[must_use]
    pub fn from_pagination(info: &Pagination) -> Self {
        let per_page = u64::from(info.por_pagina);
        let page = u64::from(info.pagina_actual.max(1));
        let (first, last) = if info.total_usuarios == 0 {
            (0, 0)
        } else {
            let first = (page - 1) * per_page + 1;
            (first, (first + per_page).saturating_sub(1).min(info.total_usuarios))
        };
        Self { first, last, total: info.total_usuarios, page: info.pagina_actual, total_pages: info.total_paginas }
    }

    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "Mostrando {} - {} de {} usuarios | Página {} de {}",
            self.first, self.last, self.total, self.page, self.total_pages
        )
    }
}
