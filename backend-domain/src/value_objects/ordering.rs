// Ordering value objects
// Only these enums ever reach SQL as identifiers

use crate::value_objects::InvalidArgument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Case-insensitive `asc`/`desc`; blank means descending.
    pub fn parse(raw: Option<&str>) -> Result<Self, InvalidArgument> {
        let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(SortDirection::Desc);
        };
        if value.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(InvalidArgument::new("order must be 'asc' or 'desc'"))
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeLogOrderColumn {
    #[default]
    Timestamp,
    Id,
}

impl ChangeLogOrderColumn {
    pub fn parse(raw: Option<&str>) -> Result<Self, InvalidArgument> {
        let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(ChangeLogOrderColumn::Timestamp);
        };
        match value.to_ascii_lowercase().as_str() {
            "timestamp" => Ok(ChangeLogOrderColumn::Timestamp),
            "id" => Ok(ChangeLogOrderColumn::Id),
            _ => Err(InvalidArgument::new(
                "orderColumn must be 'timestamp' or 'id'",
            )),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            ChangeLogOrderColumn::Timestamp => "timestamp",
            ChangeLogOrderColumn::Id => "id",
        }
    }
}
