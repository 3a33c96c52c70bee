use anyhow::{bail, Context, Result};
use smithay_client_toolkit::{
    delegate_output, delegate_registry,
    output::{OutputHandler, OutputInfo, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
};
use tracing::{debug, info, warn};
use wayland_client::backend::ObjectId;
use wayland_client::{globals::registry_queue_init, protocol::wl_output, Connection, Proxy, QueueHandle};

use crate::layout::DisplayArea;

/// Output the panel is placed on
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryDisplay {
    /// Compositor output name (e.g. "DP-1"), used to target the layer surface
    pub name: Option<String>,
    pub area: DisplayArea,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetectedOutput {
    pub name: Option<String>,
    pub area: DisplayArea,
}

/// Outputs in announcement order, keyed by their protocol object so that
/// outputs without a name stay distinct
#[derive(Debug)]
pub struct KnownOutputs<K> {
    entries: Vec<(K, DetectedOutput)>,
}

impl<K: PartialEq> KnownOutputs<K> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn insert(&mut self, key: K, output: DetectedOutput) {
        match self.entries.iter_mut().find(|(known, _)| *known == key) {
            Some((_, existing)) => *existing = output,
            None => self.entries.push((key, output)),
        }
    }

    /// Refresh the rectangle of a known output. Unknown keys are ignored.
    pub fn update_area(&mut self, key: &K, area: DisplayArea) {
        if let Some((_, known)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            known.area = area;
        }
    }

    pub fn remove(&mut self, key: &K) {
        self.entries.retain(|(k, _)| k != key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_outputs(self) -> Vec<DetectedOutput> {
        self.entries.into_iter().map(|(_, output)| output).collect()
    }
}

impl<K: PartialEq> Default for KnownOutputs<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects outputs and their logical rectangles via Wayland
pub struct OutputDetector {
    registry_state: RegistryState,
    output_state: OutputState,
    outputs: KnownOutputs<ObjectId>,
}

impl OutputHandler for OutputDetector {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        output: wl_output::WlOutput,
    ) {
        if let Some(info) = self.output_state.info(&output) {
            match output_area(&info) {
                Some(area) => {
                    debug!("Output detected: {:?} ({}) {:?}", info.name, info.model, area);
                    self.outputs.insert(output.id(), DetectedOutput { name: info.name.clone(), area });
                }
                None => warn!("Output {:?} reported no usable size, skipping", info.name),
            }
        }
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        output: wl_output::WlOutput,
    ) {
        let Some(info) = self.output_state.info(&output) else { return };
        let Some(area) = output_area(&info) else { return };
        self.outputs.update_area(&output.id(), area);
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        output: wl_output::WlOutput,
    ) {
        self.outputs.remove(&output.id());
    }
}

impl ProvidesRegistryState for OutputDetector {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }
    registry_handlers![OutputState];
}

delegate_output!(OutputDetector);
delegate_registry!(OutputDetector);

/// Logical rectangle of an output, falling back to the current mode divided
/// by the integer scale when xdg-output is unavailable
fn output_area(info: &OutputInfo) -> Option<DisplayArea> {
    let (x, y) = info.logical_position.unwrap_or(info.location);
    let (width, height) = info.logical_size.or_else(|| {
        let scale = info.scale_factor.max(1);
        info.modes
            .iter()
            .find(|mode| mode.current)
            .map(|mode| (mode.dimensions.0 / scale, mode.dimensions.1 / scale))
    })?;

    if width <= 0 || height <= 0 {
        return None;
    }

    Some(DisplayArea::from_top_left(x as f64, y as f64, width as f64, height as f64))
}

/// Enumerate connected outputs via Wayland
pub fn enumerate_outputs() -> Result<Vec<DetectedOutput>> {
    let conn = Connection::connect_to_env().context("Failed to connect to Wayland")?;
    let (globals, mut event_queue) =
        registry_queue_init(&conn).context("Failed to initialize registry")?;
    let qh = event_queue.handle();

    let mut detector = OutputDetector {
        registry_state: RegistryState::new(&globals),
        output_state: OutputState::new(&globals, &qh),
        outputs: KnownOutputs::new(),
    };

    // Second roundtrip picks up xdg-output logical geometry
    event_queue.roundtrip(&mut detector)?;
    event_queue.roundtrip(&mut detector)?;

    if detector.outputs.is_empty() {
        warn!("Compositor announced no usable outputs");
    } else {
        debug!("Detected {} output(s)", detector.outputs.len());
    }

    Ok(detector.outputs.into_outputs())
}

/// Pick the output that should host the panel: the focused one when the
/// compositor can tell us, otherwise the first one announced
pub fn select_primary(outputs: &[DetectedOutput], focused: Option<&str>) -> Option<PrimaryDisplay> {
    let chosen = focused
        .and_then(|name| outputs.iter().find(|o| o.name.as_deref() == Some(name)))
        .or_else(|| outputs.first())?;

    Some(PrimaryDisplay { name: chosen.name.clone(), area: chosen.area })
}

/// Resolve the primary display. Failing here aborts startup before any
/// window exists.
pub fn primary_display() -> Result<PrimaryDisplay> {
    let outputs = enumerate_outputs()?;
    let focused = focused_monitor();

    let Some(primary) = select_primary(&outputs, focused.as_deref()) else {
        bail!("No display available to show the notification on");
    };

    info!("Using display {:?} {:?}", primary.name, primary.area);
    Ok(primary)
}

/// Currently focused monitor from Hyprland, if running under it
fn focused_monitor() -> Option<String> {
    use hyprland::data::Monitors;
    use hyprland::prelude::*;

    std::env::var_os("HYPRLAND_INSTANCE_SIGNATURE")?;

    Monitors::get().ok().and_then(|monitors| {
        monitors
            .iter()
            .find(|m| m.focused)
            .map(|m| m.name.clone())
    })
}
