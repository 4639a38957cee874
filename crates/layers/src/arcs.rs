//! Animated great-circle arcs.
//!
//! [`ArcLayer::extract`] turns the visible groups of a [`FrameView`] into
//! per-instance attribute tuples plus the one per-frame uniform the arc shader
//! reads. [`shade_fragment`] is the CPU reference of that shader's fragment
//! stage, used by tests and software renderers.

use foundation::math::{GeoPoint, sample_arc};
use foundation::time::TimeWindow;
use formats::AnimationConfig;
use scene::animator::FrameView;
use scene::flights::AnimatedSegment;

use crate::layer::{Layer, LayerId, LayerKind};
use crate::symbology::{FlightPalette, Rgba8, rgba8_to_unit};

/// Half-width of the progress highlight band, as a fraction of the arc.
pub const PROGRESS_HIGHLIGHT_BAND: f64 = 0.03;
pub const PROGRESS_HIGHLIGHT_RGB: [f32; 3] = [1.0, 0.0, 0.0];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcLayerStyle {
    /// Arc apex height as a multiple of the arc length.
    pub height: f64,
    pub width: f64,
    pub num_segments: usize,
    pub great_circle: bool,
}

impl Default for ArcLayerStyle {
    fn default() -> Self {
        Self {
            height: 0.3,
            width: 2.0,
            num_segments: 100,
            great_circle: true,
        }
    }
}

impl From<&AnimationConfig> for ArcLayerStyle {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            height: config.arc_height,
            width: config.arc_width,
            num_segments: config.num_segments,
            great_circle: true,
        }
    }
}

/// One instanced arc.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcInstance {
    /// `[lon, lat, altitude]`.
    pub source_position: [f64; 3],
    pub target_position: [f64; 3],
    pub source_timestamp: f64,
    pub target_timestamp: f64,
    pub source_color: Rgba8,
    pub target_color: Rgba8,
    pub height: f64,
    pub width: f64,
    /// Percent, 0..=100.
    pub progress: f64,
    pub flight_index: usize,
}

impl ArcInstance {
    pub fn from_segment(seg: &AnimatedSegment, style: &ArcLayerStyle, color: Rgba8) -> Self {
        Self {
            source_position: [seg.source.lon, seg.source.lat, seg.altitude_source],
            target_position: [seg.target.lon, seg.target.lat, seg.altitude_target],
            source_timestamp: seg.time1,
            target_timestamp: seg.time2,
            source_color: color,
            target_color: color,
            height: style.height,
            width: style.width,
            progress: seg.progress,
            flight_index: seg.flight_index,
        }
    }

    /// Interpolated timestamp at `ratio` along the arc.
    pub fn timestamp_at(&self, ratio: f64) -> f64 {
        self.source_timestamp + (self.target_timestamp - self.source_timestamp) * ratio
    }

    pub fn color_at(&self, ratio: f64) -> [f32; 4] {
        let a = rgba8_to_unit(self.source_color);
        let b = rgba8_to_unit(self.target_color);
        let r = ratio as f32;
        [
            a[0] + (b[0] - a[0]) * r,
            a[1] + (b[1] - a[1]) * r,
            a[2] + (b[2] - a[2]) * r,
            a[3] + (b[3] - a[3]) * r,
        ]
    }

    /// Vertices the renderer draws, `num_segments + 1` of them.
    pub fn path(&self, num_segments: usize) -> Vec<[f64; 3]> {
        let [slon, slat, salt] = self.source_position;
        let [tlon, tlat, talt] = self.target_position;
        sample_arc(
            GeoPoint::new(slon, slat),
            GeoPoint::new(tlon, tlat),
            salt,
            talt,
            self.height,
            num_segments,
        )
    }

    /// Fragment colour at `ratio` along the arc, `None` if discarded.
    pub fn shade(&self, ratio: f64, uniforms: &TripsUniforms) -> Option<[f32; 4]> {
        shade_fragment(
            self.color_at(ratio),
            self.timestamp_at(ratio),
            ratio,
            self.progress,
            uniforms,
        )
    }
}

/// Per-frame uniform block of the arc shader.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TripsUniforms {
    pub time_range: [f64; 2],
}

impl TripsUniforms {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.time_range[0], self.time_range[1])
    }
}

impl From<TimeWindow> for TripsUniforms {
    fn from(window: TimeWindow) -> Self {
        Self {
            time_range: window.as_array(),
        }
    }
}

/// Fragment filter of the animated arc shader.
///
/// Fragments outside the time range are discarded. Alpha is scaled by the
/// position in the window, so the head of the trail is opaque and the tail
/// fades out. Fragments within [`PROGRESS_HIGHLIGHT_BAND`] of the flight's
/// progress are painted [`PROGRESS_HIGHLIGHT_RGB`].
pub fn shade_fragment(
    color: [f32; 4],
    timestamp: f64,
    segment_ratio: f64,
    progress: f64,
    uniforms: &TripsUniforms,
) -> Option<[f32; 4]> {
    let window = uniforms.window();
    if !window.contains(timestamp) {
        return None;
    }

    let mut out = color;
    out[3] *= window.fade(timestamp) as f32;

    if (segment_ratio - progress / 100.0).abs() < PROGRESS_HIGHLIGHT_BAND {
        out[0] = PROGRESS_HIGHLIGHT_RGB[0];
        out[1] = PROGRESS_HIGHLIGHT_RGB[1];
        out[2] = PROGRESS_HIGHLIGHT_RGB[2];
    }
    Some(out)
}

/// Instances of one visible group; one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcBatch {
    pub start_time: f64,
    pub end_time: f64,
    pub instances: Vec<ArcInstance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcLayerSnapshot {
    pub uniforms: TripsUniforms,
    pub batches: Vec<ArcBatch>,
    /// Groups culled this frame.
    pub hidden_groups: usize,
}

impl ArcLayerSnapshot {
    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(|b| b.instances.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcLayer {
    id: LayerId,
    pub style: ArcLayerStyle,
    pub palette: FlightPalette,
    pub selected: Option<usize>,
}

impl ArcLayer {
    pub fn new(id: u64, style: ArcLayerStyle) -> Self {
        Self {
            id: LayerId(id),
            style,
            palette: FlightPalette::default(),
            selected: None,
        }
    }

    pub fn extract(&self, view: &FrameView<'_>) -> ArcLayerSnapshot {
        let batches: Vec<ArcBatch> = view
            .visible()
            .map(|group| ArcBatch {
                start_time: group.start_time,
                end_time: group.end_time,
                instances: group
                    .members
                    .iter()
                    .map(|seg| {
                        let color = self.palette.arc(self.selected == Some(seg.flight_index));
                        ArcInstance::from_segment(seg, &self.style, color)
                    })
                    .collect(),
            })
            .collect();

        ArcLayerSnapshot {
            uniforms: TripsUniforms::from(view.window),
            hidden_groups: view.groups.len() - batches.len(),
            batches,
        }
    }
}

impl Layer for ArcLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Arcs
    }
}
