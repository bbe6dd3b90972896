#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::fmt;
use std::str::FromStr;

use crate::net::types::Pagination;

/// Rows per page offered by the listing's page-size selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [Self::TwentyFive, Self::Fifty, Self::Hundred];

    #[must_use]
    pub fn get(self) -> u32 {
        match self {
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    #[must_use]
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == value)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_value)
            .ok_or_else(|| format!("page size must be 25, 50 or 100, got '{s}'"))
    }
}

/// Query parameters for one `GET /admin/usuarios` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserQuery {
    pub page: u32,
    pub page_size: PageSize,
    pub search: String,
}

impl UserQuery {
    /// Pairs in the order and naming the server expects.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pagina", self.page.to_string()),
            ("por_pagina", self.page_size.get().to_string()),
            ("busqueda", self.search.clone()),
        ]
    }
}

/// Client-side paging and search state for the user listing.
///
/// Invariant: `1 <= current_page <= total_pages`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
    total_pages: u32,
    /// Set once a server response has reported the page count.
    total_known: bool,
    pub page_size: PageSize,
    pub search_term: String,
}

impl Default for PageState {
    fn default() -> Self {
        Self { current_page: 1, total_pages: 1, total_known: false, page_size: PageSize::default(), search_term: String::new() }
    }
}

impl PageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether `page` is a page the listing currently has.
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    /// Clamp `page` into `[1, total_pages]`.
    #[must_use]
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages)
    }

    /// Set the search term and rewind to the first page.
    pub fn set_search(&mut self, term: &str) {
        term.clone_into(&mut self.search_term);
        self.current_page = 1;
    }

    /// Set the page size and rewind to the first page.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.current_page = 1;
    }

    /// Page to actually request for `page`: clamped into range once the
    /// page count is known, passed through before the first response.
    #[must_use]
    pub fn request_page(&self, page: u32) -> u32 {
        if self.total_known { self.clamp(page) } else { page.max(1) }
    }

    #[must_use]
    pub fn query(&self, page: u32) -> UserQuery {
        UserQuery { page, page_size: self.page_size, search: self.search_term.clone() }
    }

    /// Adopt the server's view of the listing. A reported total of 0 pages
    /// (empty directory) is stored as 1.
    pub fn apply(&mut self, info: &Pagination) {
        self.total_pages = info.total_paginas.max(1);
        self.total_known = true;
        self.current_page = self.clamp(info.pagina_actual);
    }
}
