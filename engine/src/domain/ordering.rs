//! Row ordering for the delivery-point table.
//!
//! Three base orderings are available: the default natural-code order, an
//! ad-hoc column sort, and a saved custom order. Whatever the base
//! ordering, rows whose schedule is active today are always grouped ahead
//! of inactive rows; the partition is applied last and is stable.
//!
//! The row-position editor drives the create/update flow for saved
//! orders: every row gets an editable 1-based position string which is
//! validated before anything is reordered or persisted.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::distance::{DistanceMode, GeoPoint, RowDistance, annotate_rows, format_km};
use crate::domain::points::{DeliveryPoint, Route, SavedRowOrder};

/// Sortable columns of the delivery-point table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Code,
    Name,
    Schedule,
}

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active base ordering of a route's delivery points.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOrdering {
    /// Natural-code order with no implied visiting sequence.
    Default,
    /// Ad-hoc sort on one column.
    Column {
        key: SortKey,
        direction: SortDirection,
    },
    /// A saved custom order applied by code.
    Saved(SavedRowOrder),
}

/// Returns the distance mode implied by an ordering.
///
/// The default ordering carries no visiting sequence, so every row is
/// measured from the origin; any explicit ordering implies a sequence and
/// switches the Km column to chained distances.
pub const fn distance_mode_for(ordering: &RowOrdering) -> DistanceMode {
    match ordering {
        RowOrdering::Default => DistanceMode::Direct,
        RowOrdering::Column { .. } | RowOrdering::Saved(_) => DistanceMode::Chain,
    }
}

/// Orders a route's delivery points for display.
///
/// The base ordering is applied first, then the stable active-today
/// partition: for any two rows where one is active on `today` and the
/// other is not, the active row comes first.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use engine::domain::ordering::{RowOrdering, order_points};
/// # use engine::domain::points::{DeliveryPoint, DeliveryPointDraft, DeliverySchedule};
/// # fn point(code: &str) -> DeliveryPoint {
/// #     DeliveryPoint::new(DeliveryPointDraft {
/// #         code: code.to_owned(),
/// #         name: code.to_owned(),
/// #         schedule: DeliverySchedule::Daily,
/// #         latitude: 32.0,
/// #         longitude: 34.8,
/// #         descriptions: Vec::new(),
/// #         qr_code_image_url: None,
/// #         qr_code_destination_url: None,
/// #     })
/// #     .expect("valid point")
/// # }
///
/// let today = NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date");
/// let rows = order_points(&[point("9"), point("10"), point("2")], &RowOrdering::Default, today);
/// let codes: Vec<&str> = rows.iter().map(|p| p.code()).collect();
/// assert_eq!(codes, ["2", "9", "10"]);
/// ```
pub fn order_points(
    points: &[DeliveryPoint],
    ordering: &RowOrdering,
    today: NaiveDate,
) -> Vec<DeliveryPoint> {
    let mut rows = points.to_vec();

    match ordering {
        RowOrdering::Default => {
            rows.sort_by(|a, b| natord::compare(a.code(), b.code()));
        }
        RowOrdering::Column { key, direction } => {
            rows.sort_by(|a, b| {
                let cmp = match key {
                    SortKey::Code => a.code().cmp(b.code()),
                    SortKey::Name => a.name().cmp(b.name()),
                    SortKey::Schedule => a.schedule().as_str().cmp(b.schedule().as_str()),
                };
                match direction {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            });
        }
        RowOrdering::Saved(order) => {
            rows.sort_by_key(|point| {
                order
                    .codes
                    .iter()
                    .position(|code| code == point.code())
                    .unwrap_or(usize::MAX)
            });
        }
    }

    // Stable, so the base ordering survives within each group.
    rows.sort_by_key(|point| !point.schedule().is_active_on(today));
    rows
}

/// Orders the route list itself: pinned routes first, stable otherwise.
pub fn order_routes(routes: &[Route], pinned_route_ids: &[Uuid]) -> Vec<Route> {
    let mut ordered = routes.to_vec();
    ordered.sort_by_key(|route| !pinned_route_ids.contains(&route.id()));
    ordered
}

/// One fully annotated display row: the point plus its Km column values.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    point: DeliveryPoint,
    distance: RowDistance,
}

impl DisplayRow {
    /// Returns the delivery point behind this row.
    pub fn point(&self) -> &DeliveryPoint {
        &self.point
    }

    /// Returns the computed distances for this row.
    pub const fn distance(&self) -> RowDistance {
        self.distance
    }

    /// Returns the formatted Km label, or `None` for points without
    /// coordinates.
    pub fn km_label(&self) -> Option<String> {
        if self.point.geo_point().is_missing() {
            None
        } else {
            Some(format_km(self.distance.display()))
        }
    }
}

/// Produces the ordered, distance-annotated rows for one route.
pub fn display_rows(
    route: &Route,
    ordering: &RowOrdering,
    origin: GeoPoint,
    today: NaiveDate,
) -> Vec<DisplayRow> {
    let points = order_points(route.delivery_points(), ordering, today);
    let distances = annotate_rows(&points, origin, distance_mode_for(ordering));
    points
        .into_iter()
        .zip(distances)
        .map(|(point, distance)| DisplayRow { point, distance })
        .collect()
}

/// Validation errors raised by the row-position editor.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderingValidationError {
    DuplicatePosition { position: u32 },
    IncompletePositions,
    UnparsablePosition { value: String },
    UnknownCode { code: String },
}

impl fmt::Display for OrderingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePosition { position } => {
                write!(f, "position {position} is assigned to more than one row")
            }
            Self::IncompletePositions => write!(f, "every row needs a position"),
            Self::UnparsablePosition { value } => {
                write!(f, "position '{value}' is not a number")
            }
            Self::UnknownCode { code } => {
                write!(f, "no row with code {code} in the position editor")
            }
        }
    }
}

impl std::error::Error for OrderingValidationError {}

/// One editable row of the position editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRow {
    code: String,
    name: String,
    position: String,
}

impl PositionRow {
    /// Returns the row's delivery-point code.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Returns the row's delivery-point name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the current position string, as typed.
    pub fn position(&self) -> &str {
        self.position.as_str()
    }
}

/// Editor for assigning explicit 1-based positions to a route's rows.
///
/// Positions are kept as raw strings until validated so the caller can
/// round-trip exactly what the operator typed. Validation never mutates
/// the draft: a failed apply leaves every row untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPositionEditor {
    rows: Vec<PositionRow>,
}

impl RowPositionEditor {
    /// Seeds the editor from points in their current display order.
    pub fn new(points: &[DeliveryPoint]) -> Self {
        let rows = points
            .iter()
            .enumerate()
            .map(|(index, point)| PositionRow {
                code: point.code().to_owned(),
                name: point.name().to_owned(),
                position: (index + 1).to_string(),
            })
            .collect();
        Self { rows }
    }

    /// Returns the editor rows in their current order.
    pub fn rows(&self) -> &[PositionRow] {
        self.rows.as_slice()
    }

    /// Overwrites the position string of one row.
    pub fn set_position(
        &mut self,
        code: &str,
        position: impl Into<String>,
    ) -> Result<(), OrderingValidationError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.code == code)
            .ok_or_else(|| OrderingValidationError::UnknownCode {
                code: code.to_owned(),
            })?;
        row.position = position.into();
        Ok(())
    }

    /// Applies the typed positions: validates, reorders the editor rows,
    /// renumbers them contiguously from 1, and returns the codes in their
    /// new order.
    ///
    /// # Errors
    ///
    /// [`OrderingValidationError::IncompletePositions`] if any position is
    /// blank, [`OrderingValidationError::UnparsablePosition`] if one is
    /// not a number, and [`OrderingValidationError::DuplicatePosition`] if
    /// two rows share a position. The draft is unchanged on error.
    pub fn apply_positions(&mut self) -> Result<Vec<String>, OrderingValidationError> {
        let parsed = self.parsed_positions()?;

        let mut indexed: Vec<(u32, usize)> = parsed
            .iter()
            .enumerate()
            .map(|(index, position)| (*position, index))
            .collect();
        indexed.sort_by_key(|(position, _)| *position);

        let mut reordered = Vec::with_capacity(self.rows.len());
        for (new_position, (_, old_index)) in indexed.iter().enumerate() {
            let Some(row) = self.rows.get(*old_index) else {
                continue;
            };
            let mut row = row.clone();
            row.position = (new_position + 1).to_string();
            reordered.push(row);
        }

        self.rows = reordered;
        Ok(self.rows.iter().map(|row| row.code.clone()).collect())
    }

    /// Builds a new saved order from the typed positions.
    ///
    /// Duplicates and blanks are rejected like [`Self::apply_positions`],
    /// but gaps are tolerated: positions `1, 5, 9` are a valid saved
    /// order. The editor itself is not reordered.
    pub fn save_order(&self, today: NaiveDate) -> Result<SavedRowOrder, OrderingValidationError> {
        let parsed = self.parsed_positions()?;

        let mut indexed: Vec<(u32, &PositionRow)> =
            parsed.iter().copied().zip(self.rows.iter()).collect();
        indexed.sort_by_key(|(position, _)| *position);

        Ok(SavedRowOrder {
            id: Uuid::new_v4(),
            label: format!("Custom order {}", today.format("%Y-%m-%d")),
            codes: indexed.into_iter().map(|(_, row)| row.code.clone()).collect(),
        })
    }

    fn parsed_positions(&self) -> Result<Vec<u32>, OrderingValidationError> {
        let mut parsed = Vec::with_capacity(self.rows.len());
        let mut seen = HashSet::new();
        for row in &self.rows {
            let trimmed = row.position.trim();
            if trimmed.is_empty() {
                return Err(OrderingValidationError::IncompletePositions);
            }
            let position: u32 = trimmed.parse().map_err(|_| {
                OrderingValidationError::UnparsablePosition {
                    value: row.position.clone(),
                }
            })?;
            if !seen.insert(position) {
                return Err(OrderingValidationError::DuplicatePosition { position });
            }
            parsed.push(position);
        }
        Ok(parsed)
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod tests;
