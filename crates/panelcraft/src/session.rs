use panelcraft_core::{
    Dimension, DraggingInfo, EngineConfig, MotifSpec, Plate, PlateList, SocketGroup,
};
use panelcraft_layout::{
    DragController, DragOutcome, PointerEvent, RowLayout, SocketBoard, SocketCircle, SocketError,
    SurfaceBox, compute_layout, socket_screen_circles,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfiguratorError {
    #[error(transparent)]
    Plate(#[from] panelcraft_core::Error),
    #[error(transparent)]
    Socket(#[from] SocketError),
    #[error(
        "motif size must be at least {min} cm on both sides (got {width_cm}×{height_cm} cm)",
        min = panelcraft_core::MIN_MOTIF_SIZE_CM
    )]
    InvalidMotif { width_cm: f64, height_cm: f64 },
    #[cfg(feature = "render")]
    #[error(transparent)]
    Render(#[from] panelcraft_render::RenderError),
}

pub type Result<T> = std::result::Result<T, ConfiguratorError>;

/// A removed plate and the socket groups that pointed at it. The groups stay on the board until
/// [`Configurator::prune_orphans`] is called; until then they are skipped everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateRemoval {
    pub plate: Plate,
    pub orphaned_groups: Vec<String>,
}

/// One editing session: the plate row, its socket groups, the motif and the drawing surface.
///
/// Every successful mutation bumps [`revision`](Configurator::revision) and marks the session
/// dirty; rejected edits change neither.
#[derive(Debug)]
pub struct Configurator {
    config: EngineConfig,
    plates: PlateList,
    board: SocketBoard,
    motif_spec: MotifSpec,
    surface: SurfaceBox,
    drag: DragController,
    revision: u64,
    dirty: bool,
    #[cfg(feature = "render")]
    motif: panelcraft_render::MotifState,
    #[cfg(feature = "render")]
    socket_icon: Option<panelcraft_render::RasterImage>,
}

impl Configurator {
    /// Starts from the default row (250×128 and 30×30) with sockets switched off.
    pub fn new(config: EngineConfig, surface: SurfaceBox) -> Self {
        Self::from_parts(config, PlateList::default_row(), SocketBoard::default(), surface)
    }

    pub fn from_parts(
        config: EngineConfig,
        plates: PlateList,
        board: SocketBoard,
        surface: SurfaceBox,
    ) -> Self {
        let motif_spec = MotifSpec::from(&config.motif);
        Self {
            config,
            plates,
            board,
            motif_spec,
            surface,
            drag: DragController::new(),
            revision: 0,
            dirty: true,
            #[cfg(feature = "render")]
            motif: panelcraft_render::MotifState::Pending,
            #[cfg(feature = "render")]
            socket_icon: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn plates(&self) -> &PlateList {
        &self.plates
    }

    pub fn board(&self) -> &SocketBoard {
        &self.board
    }

    pub fn motif_spec(&self) -> MotifSpec {
        self.motif_spec
    }

    pub fn surface(&self) -> SurfaceBox {
        self.surface
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether a redraw was pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn dragging_info(&self) -> Option<&DraggingInfo> {
        self.drag.dragging()
    }

    /// Layout of the current row in the current surface; `None` if nothing is drawable.
    pub fn layout(&self) -> Option<RowLayout> {
        compute_layout(
            self.plates.as_slice(),
            self.config.plates.spacing_cm,
            self.surface,
        )
    }

    /// Screen circles of every visible socket, live drag position included.
    pub fn socket_circles(&self) -> Vec<SocketCircle> {
        let Some(layout) = self.layout() else {
            return Vec::new();
        };
        self.board
            .visible_groups()
            .iter()
            .flat_map(|g| {
                socket_screen_circles(&layout, g, self.drag.dragging(), &self.config.sockets)
            })
            .collect()
    }

    /// Groups that currently break a commit rule (for example after a plate was shrunk).
    pub fn violations(&self) -> Vec<(String, SocketError)> {
        self.board
            .violations(self.plates.as_slice(), &self.config.sockets)
    }

    pub fn set_surface(&mut self, surface: SurfaceBox) {
        if surface != self.surface {
            self.surface = surface;
            self.touch();
        }
    }

    pub fn set_motif_spec(&mut self, spec: MotifSpec) -> Result<()> {
        if !spec.is_valid() {
            return Err(ConfiguratorError::InvalidMotif {
                width_cm: spec.width_cm,
                height_cm: spec.height_cm,
            });
        }
        self.motif_spec = spec;
        self.sync_motif_spec();
        self.touch();
        Ok(())
    }

    /// Appends a default-sized plate and returns its id.
    pub fn add_plate(&mut self) -> Result<String> {
        let id = self.plates.add_default(&self.config.plates)?.id.clone();
        self.touch();
        Ok(id)
    }

    pub fn remove_plate(&mut self, plate_id: &str) -> Result<PlateRemoval> {
        let plate = self.plates.remove(plate_id)?;
        let orphaned_groups = self
            .board
            .groups()
            .iter()
            .filter(|g| g.plate_id == plate.id)
            .map(|g| g.id.clone())
            .collect();
        self.touch();
        Ok(PlateRemoval {
            plate,
            orphaned_groups,
        })
    }

    /// Drops socket groups whose plate is gone; returns their ids.
    pub fn prune_orphans(&mut self) -> Vec<String> {
        let removed = self.board.prune_orphans(self.plates.as_slice());
        if !removed.is_empty() {
            self.touch();
        }
        removed
    }

    pub fn resize_plate(&mut self, plate_id: &str, width_cm: f64, height_cm: f64) -> Result<()> {
        self.plates
            .resize(plate_id, width_cm, height_cm, &self.config.plates)?;
        self.touch();
        Ok(())
    }

    pub fn set_plate_width(&mut self, plate_id: &str, width_cm: f64) -> Result<()> {
        self.set_plate_dimension(plate_id, Dimension::Width, width_cm)
    }

    pub fn set_plate_height(&mut self, plate_id: &str, height_cm: f64) -> Result<()> {
        self.set_plate_dimension(plate_id, Dimension::Height, height_cm)
    }

    fn set_plate_dimension(
        &mut self,
        plate_id: &str,
        dimension: Dimension,
        value: f64,
    ) -> Result<()> {
        self.plates
            .set_dimension(plate_id, dimension, value, &self.config.plates)?;
        self.touch();
        Ok(())
    }

    pub fn move_plate(&mut self, from: usize, to: usize) -> Result<()> {
        self.plates.move_plate(from, to)?;
        if from != to {
            self.touch();
        }
        Ok(())
    }

    pub fn set_sockets_enabled(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.board.is_enabled() {
            return Ok(());
        }
        self.board
            .set_enabled(enabled, self.plates.as_slice(), &self.config.sockets)?;
        if !enabled {
            self.drag.cancel();
        }
        self.touch();
        Ok(())
    }

    /// Adds a single-socket group at the first free spot and returns its id.
    pub fn add_socket_group(&mut self) -> Result<String> {
        let id = self
            .board
            .add_group(self.plates.as_slice(), &self.config.sockets)?
            .id
            .clone();
        self.touch();
        Ok(id)
    }

    pub fn delete_socket_group(&mut self, group_id: &str) -> Result<SocketGroup> {
        let removed = self.board.delete_group(group_id)?;
        self.end_drag_of(group_id);
        self.touch();
        Ok(removed)
    }

    /// Applies a typed edit of a socket group (plate, position, count, direction).
    ///
    /// Committing the group that is being dragged ends the drag, so the committed position is what
    /// gets drawn.
    pub fn commit_socket_group(&mut self, group: SocketGroup) -> Result<()> {
        let group_id = group.id.clone();
        self.board
            .commit_edit(group, self.plates.as_slice(), &self.config.sockets)?;
        self.end_drag_of(&group_id);
        self.touch();
        Ok(())
    }

    /// Feeds a pointer event to the drag controller. Anything but an ignored or blocked event
    /// changes what is drawn and marks the session dirty.
    pub fn pointer(&mut self, event: PointerEvent) -> DragOutcome {
        let layout = self.layout();
        let outcome = self.drag.handle(
            event,
            layout.as_ref(),
            self.plates.as_slice(),
            &mut self.board,
            &self.config.sockets,
        );
        match outcome {
            DragOutcome::Ignored | DragOutcome::Blocked { .. } => {}
            _ => self.touch(),
        }
        outcome
    }

    fn end_drag_of(&mut self, group_id: &str) {
        if self.drag.dragging().is_some_and(|info| info.group_id == group_id) {
            self.drag.cancel();
            tracing::debug!(group_id, "drag ended by a direct edit");
        }
    }

    #[cfg(not(feature = "render"))]
    fn sync_motif_spec(&mut self) {}

    fn touch(&mut self) {
        self.revision += 1;
        self.dirty = true;
        tracing::trace!(revision = self.revision, "configurator changed");
    }
}

#[cfg(feature = "render")]
impl Configurator {
    /// Installs a decoded motif image; it is drawn at the current motif size.
    pub fn set_motif_image(&mut self, image: panelcraft_render::RasterImage) {
        self.motif = panelcraft_render::MotifState::Ready(panelcraft_render::Motif::new(
            self.motif_spec,
            image,
        ));
        self.touch();
    }

    fn sync_motif_spec(&mut self) {
        if let panelcraft_render::MotifState::Ready(motif) = &mut self.motif {
            motif.spec = self.motif_spec;
        }
    }

    /// Forgets the motif, for example while a replacement is loading.
    pub fn clear_motif(&mut self) {
        self.motif = panelcraft_render::MotifState::Pending;
        self.touch();
    }

    pub fn set_socket_icon(&mut self, icon: Option<panelcraft_render::RasterImage>) {
        self.socket_icon = icon;
        self.touch();
    }

    /// Render options derived from the configured style.
    pub fn render_options(&self) -> panelcraft_render::RenderOptions {
        panelcraft_render::RenderOptions {
            style: self.config.render.clone(),
            ..Default::default()
        }
    }

    /// Encodes the latest committed state. `Ok(None)` while the motif is pending or nothing is
    /// drawable.
    pub fn render(
        &self,
        format: panelcraft_render::RasterFormat,
        options: &panelcraft_render::RenderOptions,
    ) -> Result<Option<Vec<u8>>> {
        let layout = self.layout();
        let scene = panelcraft_render::Scene {
            layout: layout.as_ref(),
            board: &self.board,
            dragging: self.drag.dragging(),
            rules: &self.config.sockets,
            motif: &self.motif,
            socket_icon: self.socket_icon.as_ref(),
        };
        Ok(panelcraft_render::render_to(&scene, options, format)?)
    }
}
