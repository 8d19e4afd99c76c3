//! Edit-session lifecycle for the delivery-point board.
//!
//! Entering edit mode snapshots the full route collection. Every
//! mutation runs against the live working set; delivery-point field
//! edits additionally mark the touched cell so the view can highlight
//! unsaved values. Discarding restores the snapshot verbatim. Committing
//! persists the working set, diffs it against the snapshot, and records
//! the resulting change descriptions through the changelog port.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::changelog::{RouteChanges, diff_routes};
use crate::domain::error::EngineError;
use crate::domain::points::{
    DeliveryPoint, DeliveryPointDraft, DeliverySchedule, DescriptionEntry, PointValidationError,
    Route, RouteDraft, code_in_use, validate_latitude, validate_longitude,
};
use crate::domain::ports::{
    ChangelogRepository, ChangelogRepositoryError, RouteRepository, RouteRepositoryError,
};

/// Editable cell fields of a delivery point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointField {
    Code,
    Name,
    Schedule,
    Latitude,
    Longitude,
    Descriptions,
    QrCodeImageUrl,
    QrCodeDestinationUrl,
}

impl PointField {
    /// Returns the stable field name used by the highlight surface.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Name => "name",
            Self::Schedule => "delivery",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Descriptions => "descriptions",
            Self::QrCodeImageUrl => "qrCodeImageUrl",
            Self::QrCodeDestinationUrl => "qrCodeDestinationUrl",
        }
    }
}

impl fmt::Display for PointField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unsaved cell: a delivery-point code plus the edited field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingEdit {
    code: String,
    field: PointField,
}

impl PendingEdit {
    /// Creates a marker for one cell.
    pub fn new(code: impl Into<String>, field: PointField) -> Self {
        Self {
            code: code.into(),
            field,
        }
    }

    /// Returns the delivery-point code the marker refers to.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Returns the edited field.
    pub const fn field(&self) -> PointField {
        self.field
    }
}

/// A typed field-level edit applied to one delivery point.
#[derive(Debug, Clone, PartialEq)]
pub enum PointEdit {
    /// Change the point's board-wide unique code.
    Rename { new_code: String },
    SetName(String),
    SetSchedule(DeliverySchedule),
    SetLatitude(f64),
    SetLongitude(f64),
    SetDescriptions(Vec<DescriptionEntry>),
    SetQrCodeImageUrl(Option<String>),
    SetQrCodeDestinationUrl(Option<String>),
}

impl PointEdit {
    const fn field(&self) -> PointField {
        match self {
            Self::Rename { .. } => PointField::Code,
            Self::SetName(_) => PointField::Name,
            Self::SetSchedule(_) => PointField::Schedule,
            Self::SetLatitude(_) => PointField::Latitude,
            Self::SetLongitude(_) => PointField::Longitude,
            Self::SetDescriptions(_) => PointField::Descriptions,
            Self::SetQrCodeImageUrl(_) => PointField::QrCodeImageUrl,
            Self::SetQrCodeDestinationUrl(_) => PointField::QrCodeDestinationUrl,
        }
    }
}

/// Scalar route fields reported in the changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScalarField {
    Name,
    Code,
    Shift,
}

/// Validation errors raised by working-set mutations.
///
/// These are caught at the boundary where the mutation is attempted and
/// never corrupt the working set.
#[derive(Debug, Clone, PartialEq)]
pub enum EditValidationError {
    DuplicatePointCode { code: String },
    UnknownRoute { route_id: Uuid },
    UnknownPoint { code: String },
    InvalidPoint(PointValidationError),
}

impl fmt::Display for EditValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePointCode { code } => {
                write!(f, "delivery point code {code} is already in use on the board")
            }
            Self::UnknownRoute { route_id } => write!(f, "route {route_id} does not exist"),
            Self::UnknownPoint { code } => {
                write!(f, "no delivery point with code {code} on the board")
            }
            Self::InvalidPoint(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for EditValidationError {}

impl From<PointValidationError> for EditValidationError {
    fn from(value: PointValidationError) -> Self {
        Self::InvalidPoint(value)
    }
}

/// One active edit session: the pre-edit snapshot, the live working set,
/// and the unsaved-cell markers.
///
/// The session owns the working set exclusively; there is no locking
/// because only one session exists at a time. All transitions are plain
/// methods, so the whole lifecycle is testable without any port.
///
/// # Examples
///
/// ```
/// use engine::domain::session::EditSession;
///
/// let session = EditSession::begin(Vec::new());
/// assert!(session.pending_edits().is_empty());
/// let restored = session.discard();
/// assert!(restored.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    snapshot: Vec<Route>,
    working: Vec<Route>,
    pending: HashSet<PendingEdit>,
}

impl EditSession {
    /// Starts a session over the given routes, snapshotting them first.
    pub fn begin(routes: Vec<Route>) -> Self {
        Self {
            snapshot: routes.clone(),
            working: routes,
            pending: HashSet::new(),
        }
    }

    /// Returns the live working set.
    pub fn routes(&self) -> &[Route] {
        self.working.as_slice()
    }

    /// Returns the pre-edit snapshot.
    pub fn snapshot(&self) -> &[Route] {
        self.snapshot.as_slice()
    }

    /// Returns the unsaved-cell markers.
    pub fn pending_edits(&self) -> &HashSet<PendingEdit> {
        &self.pending
    }

    /// Returns whether a specific cell has unsaved changes.
    pub fn is_marked(&self, code: &str, field: PointField) -> bool {
        self.pending
            .iter()
            .any(|edit| edit.code == code && edit.field == field)
    }

    /// Abandons the session, returning the snapshot unchanged.
    pub fn discard(self) -> Vec<Route> {
        self.snapshot
    }

    /// Applies one typed field edit to the point with `code` and marks
    /// the cell as unsaved.
    ///
    /// # Errors
    ///
    /// Renames are validated against every code on the board; latitude
    /// and longitude edits are range-checked. On error nothing changes.
    pub fn apply_point_edit(
        &mut self,
        code: &str,
        edit: PointEdit,
    ) -> Result<(), EditValidationError> {
        match &edit {
            PointEdit::Rename { new_code } => {
                if new_code.trim().is_empty() {
                    return Err(PointValidationError::EmptyCode.into());
                }
                if code_in_use(&self.working, new_code, Some(code)) {
                    return Err(EditValidationError::DuplicatePointCode {
                        code: new_code.clone(),
                    });
                }
            }
            PointEdit::SetLatitude(value) => validate_latitude(*value)?,
            PointEdit::SetLongitude(value) => validate_longitude(*value)?,
            _ => {}
        }

        let field = edit.field();
        let point = self
            .point_mut(code)
            .ok_or_else(|| EditValidationError::UnknownPoint {
                code: code.to_owned(),
            })?;

        match edit {
            PointEdit::Rename { new_code } => point.code = new_code,
            PointEdit::SetName(name) => point.name = name,
            PointEdit::SetSchedule(schedule) => point.schedule = schedule,
            PointEdit::SetLatitude(latitude) => point.latitude = latitude,
            PointEdit::SetLongitude(longitude) => point.longitude = longitude,
            PointEdit::SetDescriptions(descriptions) => point.descriptions = descriptions,
            PointEdit::SetQrCodeImageUrl(url) => point.qr_code_image_url = url,
            PointEdit::SetQrCodeDestinationUrl(url) => point.qr_code_destination_url = url,
        }

        let marker_code = point.code.clone();
        self.pending.insert(PendingEdit::new(marker_code, field));
        Ok(())
    }

    /// Adds a new delivery point to a route.
    pub fn add_point(
        &mut self,
        route_id: Uuid,
        draft: DeliveryPointDraft,
    ) -> Result<(), EditValidationError> {
        let point = DeliveryPoint::new(draft)?;
        if code_in_use(&self.working, point.code(), None) {
            return Err(EditValidationError::DuplicatePointCode {
                code: point.code().to_owned(),
            });
        }
        let route = self
            .route_mut(route_id)
            .ok_or(EditValidationError::UnknownRoute { route_id })?;
        route.delivery_points.push(point);
        Ok(())
    }

    /// Removes the delivery point with `code`, returning it.
    pub fn remove_point(&mut self, code: &str) -> Result<DeliveryPoint, EditValidationError> {
        for route in &mut self.working {
            if let Some(index) = route
                .delivery_points
                .iter()
                .position(|point| point.code == code)
            {
                return Ok(route.delivery_points.remove(index));
            }
        }
        Err(EditValidationError::UnknownPoint {
            code: code.to_owned(),
        })
    }

    /// Moves the point with `code` onto another route.
    ///
    /// The remove and the add happen inside one working-set update: the
    /// destination is checked before anything is detached, so a failed
    /// move leaves the board exactly as it was.
    pub fn move_point(&mut self, code: &str, to_route_id: Uuid) -> Result<(), EditValidationError> {
        if self.route_mut(to_route_id).is_none() {
            return Err(EditValidationError::UnknownRoute {
                route_id: to_route_id,
            });
        }
        let point = self.remove_point(code)?;
        let destination = self
            .route_mut(to_route_id)
            .ok_or(EditValidationError::UnknownRoute {
                route_id: to_route_id,
            })?;
        destination.delivery_points.push(point);
        Ok(())
    }

    /// Updates one scalar field of a route.
    pub fn update_route_field(
        &mut self,
        route_id: Uuid,
        field: RouteScalarField,
        value: impl Into<String>,
    ) -> Result<(), EditValidationError> {
        let route = self
            .route_mut(route_id)
            .ok_or(EditValidationError::UnknownRoute { route_id })?;
        let value = value.into();
        match field {
            RouteScalarField::Name => route.name = value,
            RouteScalarField::Code => route.code = value,
            RouteScalarField::Shift => route.shift = value,
        }
        Ok(())
    }

    /// Adds a new route, returning its id.
    pub fn add_route(&mut self, draft: RouteDraft) -> Result<Uuid, EditValidationError> {
        let route = Route::new(draft)?;
        for point in route.delivery_points() {
            if code_in_use(&self.working, point.code(), None) {
                return Err(EditValidationError::DuplicatePointCode {
                    code: point.code().to_owned(),
                });
            }
        }
        let id = route.id();
        self.working.push(route);
        Ok(id)
    }

    /// Removes a route and all of its points, returning it.
    pub fn remove_route(&mut self, route_id: Uuid) -> Result<Route, EditValidationError> {
        let index = self
            .working
            .iter()
            .position(|route| route.id == route_id)
            .ok_or(EditValidationError::UnknownRoute { route_id })?;
        Ok(self.working.remove(index))
    }

    /// Returns a copy of the working set with `updated_at` stamped on
    /// every route whose content differs from the snapshot (and on every
    /// new route). The working set itself is untouched so a failed save
    /// keeps it byte-for-byte intact.
    pub fn stamped_routes(&self, now: DateTime<Utc>) -> Vec<Route> {
        self.working
            .iter()
            .map(|route| {
                let mut route = route.clone();
                let changed = self
                    .snapshot
                    .iter()
                    .find(|previous| previous.id == route.id)
                    .is_none_or(|previous| route.content_differs(previous));
                if changed {
                    route.updated_at = Some(now);
                }
                route
            })
            .collect()
    }

    fn point_mut(&mut self, code: &str) -> Option<&mut DeliveryPoint> {
        self.working
            .iter_mut()
            .flat_map(|route| route.delivery_points.iter_mut())
            .find(|point| point.code == code)
    }

    fn route_mut(&mut self, route_id: Uuid) -> Option<&mut Route> {
        self.working.iter_mut().find(|route| route.id == route_id)
    }
}

/// Board display state: browsing the persisted routes or editing them.
#[derive(Debug)]
enum BoardState {
    Viewing { routes: Vec<Route> },
    Editing(EditSession),
}

/// Stateful session manager wiring the edit lifecycle to its ports.
///
/// One manager owns one board. `commit` takes `&mut self`, so a second
/// commit cannot start while one is awaiting the store.
pub struct EditSessionManager<R, C> {
    route_repo: Arc<R>,
    changelog_repo: Arc<C>,
    clock: Arc<dyn Clock>,
    state: BoardState,
}

impl<R, C> EditSessionManager<R, C> {
    /// Creates a manager with an empty board.
    pub fn new(route_repo: Arc<R>, changelog_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self::with_routes(route_repo, changelog_repo, clock, Vec::new())
    }

    /// Creates a manager already viewing a known route collection.
    pub fn with_routes(
        route_repo: Arc<R>,
        changelog_repo: Arc<C>,
        clock: Arc<dyn Clock>,
        routes: Vec<Route>,
    ) -> Self {
        Self {
            route_repo,
            changelog_repo,
            clock,
            state: BoardState::Viewing { routes },
        }
    }

    /// Returns the routes the board currently shows: the working set
    /// while editing, the persisted collection otherwise.
    pub fn routes(&self) -> &[Route] {
        match &self.state {
            BoardState::Viewing { routes } => routes.as_slice(),
            BoardState::Editing(session) => session.routes(),
        }
    }

    /// Returns whether an edit session is active.
    pub fn is_editing(&self) -> bool {
        matches!(self.state, BoardState::Editing(_))
    }

    /// Returns the active session, if any.
    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            BoardState::Editing(session) => Some(session),
            BoardState::Viewing { .. } => None,
        }
    }

    /// Returns the active session's mutation surface, if any.
    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match &mut self.state {
            BoardState::Editing(session) => Some(session),
            BoardState::Viewing { .. } => None,
        }
    }

    /// Starts an edit session. A no-op while one is already active.
    pub fn enter_edit_mode(&mut self) {
        if self.is_editing() {
            return;
        }
        let BoardState::Viewing { routes } =
            std::mem::replace(&mut self.state, BoardState::Viewing { routes: Vec::new() })
        else {
            return;
        };
        self.state = BoardState::Editing(EditSession::begin(routes));
    }

    /// Abandons the active session, restoring the pre-edit state.
    ///
    /// Synchronous and infallible; a no-op when nothing is being edited.
    pub fn discard(&mut self) {
        if let BoardState::Editing(_) = &self.state {
            let BoardState::Editing(session) =
                std::mem::replace(&mut self.state, BoardState::Viewing { routes: Vec::new() })
            else {
                return;
            };
            self.state = BoardState::Viewing {
                routes: session.discard(),
            };
        }
    }
}

impl<R, C> EditSessionManager<R, C>
where
    R: RouteRepository,
    C: ChangelogRepository,
{
    /// Fetches the route collection through the repository.
    ///
    /// Refusing to reload mid-session keeps the snapshot authoritative.
    pub async fn load(&mut self) -> Result<&[Route], EngineError> {
        if self.is_editing() {
            return Err(EngineError::conflict(
                "cannot reload routes while an edit session is active",
            ));
        }
        let routes = self
            .route_repo
            .load_routes()
            .await
            .map_err(map_route_repository_error)?;
        self.state = BoardState::Viewing { routes };
        Ok(self.routes())
    }

    /// Persists the working set and records the changelog.
    ///
    /// On success the pending markers are cleared, the board returns to
    /// viewing the just-persisted routes, and the per-route change
    /// descriptions are returned. On failure the session, its markers,
    /// and the working set are left exactly as they were so the operator
    /// can retry.
    pub async fn commit(&mut self) -> Result<Vec<RouteChanges>, EngineError> {
        let (stamped, changes) = {
            let BoardState::Editing(session) = &self.state else {
                return Err(EngineError::conflict("no active edit session to commit"));
            };

            let stamped = session.stamped_routes(self.clock.utc());
            tracing::debug!(routes = stamped.len(), "persisting route collection");
            self.route_repo
                .save_routes(&stamped)
                .await
                .map_err(map_route_repository_error)?;

            (stamped.clone(), diff_routes(session.snapshot(), &stamped))
        };

        // The save has succeeded; nothing past this point may undo it.
        // Changelog writes are best-effort by contract.
        for route_changes in &changes {
            for entry in &route_changes.entries {
                if let Err(err) = self
                    .changelog_repo
                    .append(route_changes.route_id, entry)
                    .await
                {
                    log_changelog_failure(route_changes.route_id, &err);
                }
            }
        }

        self.state = BoardState::Viewing { routes: stamped };
        Ok(changes)
    }
}

fn log_changelog_failure(route_id: Uuid, err: &ChangelogRepositoryError) {
    tracing::warn!(error = %err, route_id = %route_id, "changelog append failed");
}

fn map_route_repository_error(error: RouteRepositoryError) -> EngineError {
    match error {
        RouteRepositoryError::Connection { message } => {
            EngineError::service_unavailable(format!("route repository unavailable: {message}"))
        }
        RouteRepositoryError::Query { message } => {
            EngineError::internal(format!("route repository error: {message}"))
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
