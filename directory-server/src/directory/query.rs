//! Listing parameter validation and translation
//!
//! Raw `employees(...)` arguments become an [`EmployeeQuery`]: a search
//! filter, a validated sort and an offset/limit window. Sort values outside
//! the allow-lists are rejected before any storage access.

use shared::error::{AppError, AppResult};
use shared::models::EmployeeRecord;

/// Allowed sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// first name, then last name
    Name,
    Company,
    Department,
    Status,
    Created,
    Updated,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Name,
        SortField::Company,
        SortField::Department,
        SortField::Status,
        SortField::Created,
        SortField::Updated,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Company => "company",
            SortField::Department => "department",
            SortField::Status => "status",
            SortField::Created => "created",
            SortField::Updated => "updated",
        }
    }

    /// Exact, case-sensitive match against the wire names
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Validated `(field, direction)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Order two records by this sort. Ties fall back to id so windows are stable.
    ///
    /// Text fields compare lower-cased, by code point. `PgStore` orders by
    /// `LOWER(col) COLLATE "C"` so both stores return the same windows.
    pub fn compare(&self, a: &EmployeeRecord, b: &EmployeeRecord) -> std::cmp::Ordering {
        let ordering = match self.field {
            SortField::Name => folded(&a.first_name)
                .cmp(&folded(&b.first_name))
                .then_with(|| folded(&a.last_name).cmp(&folded(&b.last_name))),
            SortField::Company => folded(&a.company).cmp(&folded(&b.company)),
            SortField::Department => folded(&a.department).cmp(&folded(&b.department)),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Created => a.created_at.cmp(&b.created_at),
            SortField::Updated => a.updated_at.cmp(&b.updated_at),
        };
        let ordering = match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

fn folded(s: &str) -> String {
    s.to_lowercase()
}

/// Columns covered by free-text search
pub const SEARCH_COLUMNS: [&str; 5] = ["first_name", "last_name", "email", "department", "position"];

/// Case-insensitive "contains" over [`SEARCH_COLUMNS`], OR-ed together.
/// An empty term matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    term: Option<String>,
}

impl SearchFilter {
    pub fn new(text: &str) -> Self {
        Self {
            term: (!text.is_empty()).then(|| text.to_string()),
        }
    }

    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        let Some(term) = &self.term else {
            return true;
        };
        let needle = term.to_lowercase();
        [
            &record.first_name,
            &record.last_name,
            &record.email,
            &record.department,
            &record.position,
        ]
        .into_iter()
        .any(|value| value.to_lowercase().contains(&needle))
    }

    /// `ILIKE` pattern with `\` as the escape character
    pub fn like_pattern(&self) -> Option<String> {
        self.term.as_ref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for c in term.chars() {
                if matches!(c, '\\' | '%' | '_') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

/// Storage-facing query descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeQuery {
    pub filter: SearchFilter,
    pub sort: SortSpec,
    pub offset: i64,
    pub limit: i64,
    /// Page number after coercion, echoed back in the page metadata
    pub page: i64,
}

/// Named defaults for listing arguments the client leaves out
#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub default_page: i64,
    pub default_page_size: i64,
    pub default_sort: SortSpec,
    pub default_search: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            default_sort: SortSpec {
                field: SortField::Name,
                direction: SortDirection::Asc,
            },
            default_search: String::new(),
        }
    }
}

/// Raw listing arguments as they arrive from the client
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_field: Option<String>,
    pub sort_dir: Option<String>,
    pub search: Option<String>,
}

impl PageRequest {
    /// Validate and translate into a storage query
    ///
    /// Page and page size are coerced to at least 1.
    pub fn translate(&self, config: &ListingConfig) -> AppResult<EmployeeQuery> {
        let field = match self.sort_field.as_deref() {
            Some(raw) => SortField::parse(raw),
            None => Some(config.default_sort.field),
        };
        let direction = match self.sort_dir.as_deref() {
            Some(raw) => SortDirection::parse(raw),
            None => Some(config.default_sort.direction),
        };
        let (Some(field), Some(direction)) = (field, direction) else {
            return Err(AppError::invalid_sort(
                self.sort_field.as_deref().unwrap_or(config.default_sort.field.as_str()),
                self.sort_dir.as_deref().unwrap_or(config.default_sort.direction.as_str()),
            ));
        };

        let page = self.page.unwrap_or(config.default_page).max(1);
        let limit = self.page_size.unwrap_or(config.default_page_size).max(1);
        let offset = (page - 1).saturating_mul(limit);

        let filter = SearchFilter::new(self.search.as_deref().unwrap_or(&config.default_search));

        Ok(EmployeeQuery {
            filter,
            sort: SortSpec { field, direction },
            offset,
            limit,
            page,
        })
    }
}
