//! Widget lifecycle, selection transitions and event handling.

use std::time::Duration;

use pickpoint_api::{DeliveryApiClient, PointListing};
use pickpoint_core::{Coordinates, CostQuote, Destination, Point, WidgetConfig};

use crate::cache::GeocodeCache;
use crate::debounce::Debouncer;
use crate::error::WidgetError;
use crate::host::WidgetHost;
use crate::index::PointIndex;
use crate::map::{GeoCandidate, MapAdapter, MarkerStyle, COURIER_MARKER_ID};
use crate::pipeline::CostPipeline;
use crate::selection::SelectionState;
use crate::suggest::{SuggestAction, SuggestDropdown, SuggestKey};

/// Notice raised when the backend listing contains no points.
const NO_POINTS_NOTICE: &str = "No pickup points are available";

/// Headless delivery-point selection widget.
///
/// The embedding application forwards map SDK events into the `handle_*`
/// methods and renders whatever the [`WidgetHost`] callbacks tell it to.
/// All methods take `&mut self`; within one event the steps run strictly
/// in order, and racing events (drags whose address resolutions come back
/// out of order) are reconciled through the resolution sequence number,
/// not through locking.
pub struct DeliveryWidget<M: MapAdapter, H: WidgetHost> {
    config: WidgetConfig,
    api: DeliveryApiClient,
    map: M,
    host: H,
    index: PointIndex,
    selection: SelectionState,
    geocode_cache: GeocodeCache,
    suggest: SuggestDropdown,
    debouncer: Debouncer,
    request_seq: u64,
}

impl<M: MapAdapter, H: WidgetHost> DeliveryWidget<M, H> {
    /// Initializes the widget: fetches the point listing, renders markers,
    /// optionally auto-locates, then fires [`WidgetHost::on_ready`].
    ///
    /// # Errors
    ///
    /// - [`WidgetError::InitTimeout`] when the listing fetch does not
    ///   complete within the configured ceiling.
    /// - [`WidgetError::Api`] when the fetch itself fails.
    pub async fn init(
        config: WidgetConfig,
        api: DeliveryApiClient,
        map: M,
        host: H,
    ) -> Result<Self, WidgetError> {
        let mut widget = Self {
            index: PointIndex::default(),
            selection: SelectionState::NoSelection,
            geocode_cache: GeocodeCache::new(config.geocode_cache_capacity),
            suggest: SuggestDropdown::default(),
            debouncer: Debouncer::new(Duration::from_millis(config.geocode_debounce_ms)),
            request_seq: 0,
            config,
            api,
            map,
            host,
        };

        let init_secs = widget.config.init_timeout_secs;
        let listings = tokio::time::timeout(
            Duration::from_secs(init_secs),
            widget.api.list_points(),
        )
        .await
        .map_err(|_| WidgetError::InitTimeout { secs: init_secs })??;

        let points: Vec<Point> = listings.into_iter().map(PointListing::into_point).collect();
        widget.load_points(points);

        let mut center = widget.config.default_center;
        if widget.config.auto_locate {
            if let Some(position) = widget.map.locate().await {
                center = position;
            }
        }
        widget.map.pan_to(center, Some(widget.config.default_zoom));

        widget.host.on_ready();
        Ok(widget)
    }

    /// Replaces the point index and re-renders all markers.
    ///
    /// Any selection is dropped. An empty listing leaves an empty index
    /// and surfaces a "no points" notice; there is no partial state.
    pub fn load_points(&mut self, points: Vec<Point>) {
        self.map.clear_markers();
        self.selection = SelectionState::NoSelection;
        self.index.rebuild(points);

        if self.index.is_empty() {
            tracing::info!("point listing is empty");
            self.host.notify(NO_POINTS_NOTICE);
            return;
        }

        for point in self.index.iter() {
            self.map
                .add_marker(&point.id, point.coordinates, MarkerStyle::Default, false);
        }
        self.map.enable_clustering();
        tracing::debug!(count = self.index.len(), "rendered pickup point markers");
    }

    /// Selects a pickup point by id (marker click or a list "choose"
    /// action). Accepts both namespaced and provider-native ids.
    ///
    /// Selecting the already-selected point is a no-op. Otherwise the
    /// previous active marker reverts to the default style before the new
    /// one is activated, so at most one marker is ever active.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownPoint`] when the id is not in the
    /// loaded index.
    pub fn select_point(&mut self, id: &str) -> Result<(), WidgetError> {
        let (point_id, coordinates) = match self.index.get(id) {
            Some(point) => (point.id.clone(), point.coordinates),
            None => return Err(WidgetError::UnknownPoint(id.to_owned())),
        };

        if self.selection.selected_point_id() == Some(point_id.as_str()) {
            tracing::debug!(point = %point_id, "point already selected");
            return Ok(());
        }

        self.deactivate_current_marker();
        self.map.remove_marker(COURIER_MARKER_ID);
        self.map.set_marker_style(&point_id, MarkerStyle::Active);
        self.map.pan_to(coordinates, None);
        self.selection = SelectionState::PickupPoint { point_id };
        Ok(())
    }

    /// Forwards a marker click. Clicks on the courier marker are ignored;
    /// anything else is treated as a pickup point selection.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::UnknownPoint`] for markers that are not in
    /// the index.
    pub fn handle_marker_click(&mut self, marker_id: &str) -> Result<(), WidgetError> {
        if marker_id == COURIER_MARKER_ID {
            return Ok(());
        }
        self.select_point(marker_id)
    }

    /// Handles a click on empty map space: starts a courier-address
    /// selection at the clicked coordinates.
    pub async fn handle_map_click(&mut self, coordinates: Coordinates) {
        let seq = self.begin_address_resolution();
        let address = self.resolve_address(coordinates).await;
        self.apply_resolved_address(seq, coordinates, address);
    }

    /// Handles a courier marker drag to new coordinates.
    ///
    /// Drags racing with in-flight resolutions are reconciled by sequence
    /// number: only the resolution of the last *issued* drag is applied,
    /// regardless of response arrival order.
    pub async fn handle_courier_drag(&mut self, coordinates: Coordinates) {
        let seq = self.begin_address_resolution();
        let address = self.resolve_address(coordinates).await;
        self.apply_resolved_address(seq, coordinates, address);
    }

    /// Issues the next address-resolution sequence number, invalidating
    /// every in-flight resolution.
    ///
    /// Embedders that run resolutions concurrently pair this with
    /// [`Self::apply_resolved_address`]; the convenience handlers above do
    /// both for the sequential case.
    pub fn begin_address_resolution(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    /// Resolves coordinates to an address: backend reverse geocode first,
    /// the map SDK's geocoder second, empty string last. Never fails.
    pub async fn resolve_address(&self, coordinates: Coordinates) -> String {
        match self.api.reverse_geocode(coordinates).await {
            Ok(address) if !address.is_empty() => return address,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(error = %e, "backend reverse geocode failed; falling back to map SDK");
            }
        }
        self.map
            .reverse_geocode(coordinates)
            .await
            .unwrap_or_default()
    }

    /// Applies a resolved courier address if `seq` is still current.
    ///
    /// Stale resolutions (superseded by a newer click or drag) are dropped
    /// silently; the in-flight request itself is not cancelled, its answer
    /// is simply ignored on arrival.
    pub fn apply_resolved_address(&mut self, seq: u64, coordinates: Coordinates, address: String) {
        if seq != self.request_seq {
            tracing::debug!(
                seq,
                current = self.request_seq,
                "dropping stale address resolution"
            );
            return;
        }

        self.deactivate_current_marker();
        self.map.remove_marker(COURIER_MARKER_ID);
        self.map
            .add_marker(COURIER_MARKER_ID, coordinates, MarkerStyle::Courier, true);
        self.map.open_balloon(COURIER_MARKER_ID);
        self.selection = SelectionState::CourierAddress {
            coordinates,
            resolved_address: address,
            request_seq: seq,
        };
    }

    /// Drops any selection: reverts marker styling, removes the courier
    /// marker and clears the displayed cost.
    ///
    /// Called on an empty-space click when nothing new is being chosen, or
    /// programmatically before the embedding page starts a new flow.
    pub fn clear_selection(&mut self) {
        self.deactivate_current_marker();
        self.map.remove_marker(COURIER_MARKER_ID);
        self.selection = SelectionState::NoSelection;
        self.host.clear_cost();
    }

    /// Runs the choose-destination pipeline for the current selection.
    ///
    /// Returns `Ok(None)` when the destination is not deliverable (the
    /// host has already been notified). A failed cost calculation still
    /// completes, with an error marker inside the quote's calculation.
    ///
    /// # Errors
    ///
    /// - [`WidgetError::NothingSelected`] when no destination is selected.
    /// - [`WidgetError::UnknownPoint`] when the selected point vanished
    ///   from the index (stale selection across a reload).
    pub async fn choose(&mut self) -> Result<Option<CostQuote>, WidgetError> {
        let (destination, point) = match &self.selection {
            SelectionState::NoSelection => return Err(WidgetError::NothingSelected),
            SelectionState::PickupPoint { point_id } => {
                let point = self
                    .index
                    .get(point_id)
                    .ok_or_else(|| WidgetError::UnknownPoint(point_id.clone()))?;
                (
                    Destination::SelfPickup {
                        code: point.raw_id.clone(),
                    },
                    Some(point.clone()),
                )
            }
            SelectionState::CourierAddress {
                coordinates,
                resolved_address,
                ..
            } => (
                Destination::TimeInterval {
                    address: resolved_address.clone(),
                    coordinates: *coordinates,
                },
                None,
            ),
        };

        let pipeline = CostPipeline::new(&self.api, &self.host);
        let Some(quote) = pipeline.choose(destination).await else {
            return Ok(None);
        };

        self.host.on_choose(point.as_ref(), &quote);
        Ok(Some(quote))
    }

    /// Handles a change of the search box text.
    ///
    /// Debounced: rapid successive calls collapse into the last one, which
    /// performs a cache-first geocode lookup and fills the suggestion
    /// dropdown. Clearing the text dismisses the dropdown and invalidates
    /// any pending lookup.
    pub async fn handle_search_input(&mut self, query: &str) {
        let query = query.trim().to_owned();
        if query.is_empty() {
            self.debouncer.schedule();
            self.suggest.clear();
            return;
        }

        let token = self.debouncer.schedule();
        if !self.debouncer.wait(token).await {
            return;
        }

        let candidates = self.lookup(&query).await;
        self.suggest.set_candidates(candidates);
    }

    /// Forwards a key press to the suggestion dropdown. Committing a
    /// candidate fits the map to its bounds (or pans to its coordinates)
    /// and closes the dropdown.
    pub fn handle_suggest_key(&mut self, key: SuggestKey) {
        match self.suggest.handle_key(key) {
            SuggestAction::Select(candidate) => match candidate.bounds {
                Some(bounds) => self.map.fit_bounds(bounds),
                None => self.map.pan_to(candidate.coordinates, None),
            },
            SuggestAction::None | SuggestAction::Dismiss => {}
        }
    }

    /// Removes all map state. The embedding page drops its event wiring
    /// alongside; the widget is consumed.
    pub fn teardown(mut self) {
        self.map.clear_markers();
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn suggest(&self) -> &SuggestDropdown {
        &self.suggest
    }

    #[must_use]
    pub fn index(&self) -> &PointIndex {
        &self.index
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Cache-first forward geocode. Failures and empty results are cached
    /// as empty lists so the same query is not retried this session.
    async fn lookup(&mut self, query: &str) -> Vec<GeoCandidate> {
        if let Some(cached) = self.geocode_cache.get(query) {
            tracing::debug!(query, count = cached.len(), "geocode cache hit");
            return cached.to_vec();
        }

        let candidates = self.map.geocode(query, self.config.suggest_limit).await;
        self.geocode_cache
            .insert(query.to_owned(), candidates.clone());
        candidates
    }

    /// Reverts the active pickup marker, if any, to the default style.
    /// Transitions call this before styling anything new, so two markers
    /// can never show the active style at once.
    fn deactivate_current_marker(&mut self) {
        if let SelectionState::PickupPoint { point_id } = &self.selection {
            let id = point_id.clone();
            self.map.set_marker_style(&id, MarkerStyle::Default);
        }
    }
}
