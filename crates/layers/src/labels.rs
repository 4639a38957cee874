use foundation::math::{GeoPoint, Vec3, faces_camera, to_sphere};

use crate::layer::{Layer, LayerId, LayerKind};
use crate::lines::LINE_RADIUS;

/// Labels sit just outside the line shell.
pub const LABEL_RADIUS_FACTOR: f64 = 1.05;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_size_px: f32,
    pub color: [f32; 4],
    pub background: [f32; 4],
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size_px: 14.0,
            color: [1.0, 1.0, 1.0, 1.0],
            background: [0.0, 0.0, 0.0, 0.5],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    pub text: String,
    pub at: GeoPoint,
    pub position: Vec3,
    pub visible: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelsLayerSnapshot {
    pub style: LabelStyle,
    pub labels: Vec<LabelAnchor>,
}

impl LabelsLayerSnapshot {
    pub fn visible(&self) -> impl Iterator<Item = &LabelAnchor> {
        self.labels.iter().filter(|l| l.visible)
    }

    /// Re-evaluate back-face visibility for a new camera position.
    pub fn update_visibility(&mut self, enabled: bool, camera: Vec3) {
        for label in &mut self.labels {
            label.visible = enabled && faces_camera(camera, label.position);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelsLayer {
    id: LayerId,
    /// Master toggle; hidden labels keep their anchors.
    pub enabled: bool,
    pub radius: f64,
    pub style: LabelStyle,
}

impl LabelsLayer {
    pub fn new(id: u64, enabled: bool) -> Self {
        Self {
            id: LayerId(id),
            enabled,
            radius: LINE_RADIUS * LABEL_RADIUS_FACTOR,
            style: LabelStyle::default(),
        }
    }

    /// Anchors for `labels`, with visibility for a camera at `camera`.
    /// Blank names are skipped.
    pub fn extract<'a>(
        &self,
        labels: impl IntoIterator<Item = (&'a str, GeoPoint)>,
        camera: Vec3,
    ) -> LabelsLayerSnapshot {
        let mut snapshot = LabelsLayerSnapshot {
            style: self.style.clone(),
            labels: labels
                .into_iter()
                .filter_map(|(text, at)| {
                    let text = text.trim();
                    (!text.is_empty() && at.is_finite()).then(|| LabelAnchor {
                        text: text.to_string(),
                        at,
                        position: to_sphere(at, self.radius),
                        visible: false,
                    })
                })
                .collect(),
        };
        snapshot.update_visibility(self.enabled, camera);
        snapshot
    }
}

impl Layer for LabelsLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Labels
    }
}
