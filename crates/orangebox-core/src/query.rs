// ── List query state ──
//
// Pagination, sort and filter for one list view, plus the mapping to
// the backend's `page/per_page/sort/direction/search` parameters.

use std::fmt;
use std::str::FromStr;

use orangebox_api::ListParams;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

// ── Page size ───────────────────────────────────────────────────────

/// Rows per page. Only these three sizes are offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Twenty,
}

impl PageSize {
    pub const fn get(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Twenty => 20,
        }
    }

    /// Cycle 5 → 10 → 20 → 5.
    pub const fn next(self) -> Self {
        match self {
            Self::Five => Self::Ten,
            Self::Ten => Self::Twenty,
            Self::Twenty => Self::Five,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            20 => Ok(Self::Twenty),
            other => Err(format!("page size must be 5, 10 or 20 (got {other})")),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ── Sort ────────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Header glyph for the active sort column.
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// A column the backend can sort one resource by.
pub trait SortField:
    Copy
    + Eq
    + Default
    + fmt::Debug
    + fmt::Display
    + FromStr
    + IntoEnumIterator
    + Into<&'static str>
    + Send
    + Sync
    + 'static
{
    /// Query-string value (`sort=<key>`).
    fn key(self) -> &'static str {
        self.into()
    }

    /// Column header text.
    fn label(self) -> &'static str;
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ProductSortField {
    #[default]
    Id,
    Name,
    Price,
    Description,
    Stock,
    ProviderName,
}

impl SortField for ProductSortField {
    fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Price => "Price",
            Self::Description => "Description",
            Self::Stock => "Stock",
            Self::ProviderName => "Provider",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ProviderSortField {
    #[default]
    Id,
    Name,
    Address,
    Phone,
    Description,
}

impl SortField for ProviderSortField {
    fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Address => "Address",
            Self::Phone => "Phone",
            Self::Description => "Description",
        }
    }
}

// ── Query state ─────────────────────────────────────────────────────

/// Everything that determines which rows a list shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<F> {
    /// 1-based.
    pub page: u32,
    pub page_size: PageSize,
    pub sort_field: F,
    pub direction: SortDirection,
    pub filter: String,
}

impl<F: SortField> Default for QueryState<F> {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            sort_field: F::default(),
            direction: SortDirection::default(),
            filter: String::new(),
        }
    }
}

impl<F: SortField> QueryState<F> {
    /// Same field flips direction; another field starts ascending.
    pub fn toggle_sort(&mut self, field: F) {
        if self.sort_field == field {
            self.direction = self.direction.flip();
        } else {
            self.sort_field = field;
            self.direction = SortDirection::Asc;
        }
    }

    /// Backend query parameters. All five are always sent.
    pub fn to_params(&self) -> ListParams {
        ListParams {
            page: Some(self.page),
            per_page: Some(i64::from(self.page_size.get())),
            sort: Some(self.sort_field.key().to_owned()),
            direction: Some(<&'static str>::from(self.direction).to_owned()),
            search: Some(self.filter.clone()),
        }
    }
}
