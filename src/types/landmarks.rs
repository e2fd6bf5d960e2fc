//! Landmark frames as delivered by the pose-estimation producer
//!
//! Field-name variants used by different producers (`faceLandmarks`,
//! `hand_landmarks`, blendshape category lists vs. maps) are normalized
//! here, once, during deserialization.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A single landmark (normalized image coordinates, optional depth)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Both planar coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Depth, if present and finite
    pub fn depth(&self) -> Option<f64> {
        self.z.filter(|z| z.is_finite())
    }

    /// Planar (x, y) distance
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Indexable point sequence; individual points may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Option<Point>>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Option<Point>>) -> Self {
        Self { points }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().map(Some).collect(),
        }
    }

    /// Empty set with `len` missing slots
    pub fn with_len(len: usize) -> Self {
        Self {
            points: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Safe accessor: `None` for out-of-range, missing or non-finite points
    pub fn point(&self, idx: usize) -> Option<Point> {
        self.points
            .get(idx)
            .copied()
            .flatten()
            .filter(Point::is_finite)
    }

    /// Set a point, growing the set with missing slots if needed
    pub fn set(&mut self, idx: usize, point: Point) {
        if idx >= self.points.len() {
            self.points.resize(idx + 1, None);
        }
        self.points[idx] = Some(point);
    }

    /// Valid points among `indices`
    pub fn points_at<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = Point> + 'a {
        indices.iter().filter_map(move |&idx| self.point(idx))
    }
}

/// Named facial expression activations (e.g. "mouthSmileLeft")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlendshapes", into = "BTreeMap<String, f64>")]
pub struct Blendshapes(HashMap<String, f64>);

impl Blendshapes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        self.0.insert(name.into(), score);
    }

    /// Score for a category; 0.0 when missing or non-finite
    pub fn score(&self, name: &str) -> f64 {
        self.0
            .get(name)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Blendshapes {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Blendshapes> for BTreeMap<String, f64> {
    fn from(value: Blendshapes) -> Self {
        value.0.into_iter().collect()
    }
}

/// Accepted wire shapes for blendshapes
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBlendshapes {
    Nested { categories: Vec<RawCategory> },
    Map(HashMap<String, f64>),
    List(Vec<RawCategory>),
}

#[derive(Deserialize)]
struct RawCategory {
    #[serde(alias = "categoryName", alias = "category_name")]
    name: Option<String>,
    #[serde(default)]
    score: Option<f64>,
}

impl From<RawBlendshapes> for Blendshapes {
    fn from(raw: RawBlendshapes) -> Self {
        match raw {
            RawBlendshapes::Map(map) => Self(map),
            RawBlendshapes::Nested { categories } | RawBlendshapes::List(categories) => categories
                .into_iter()
                .filter_map(|c| c.name.map(|name| (name, c.score.unwrap_or(0.0))))
                .collect(),
        }
    }
}

/// One detected face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    #[serde(alias = "points")]
    pub landmarks: LandmarkSet,
    #[serde(default, alias = "faceBlendshapes", alias = "face_blendshapes")]
    pub blendshapes: Option<Blendshapes>,
}

impl FaceLandmarks {
    pub fn new(landmarks: LandmarkSet) -> Self {
        Self {
            landmarks,
            blendshapes: None,
        }
    }

    pub fn with_blendshapes(mut self, blendshapes: Blendshapes) -> Self {
        self.blendshapes = Some(blendshapes);
        self
    }
}

/// One detected hand (21 MediaPipe points)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandLandmarks(pub LandmarkSet);

impl HandLandmarks {
    pub fn point(&self, idx: usize) -> Option<Point> {
        self.0.point(idx)
    }
}

impl From<LandmarkSet> for HandLandmarks {
    fn from(set: LandmarkSet) -> Self {
        Self(set)
    }
}

/// Everything the producer reports for one camera frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Producer timestamp, monotonic milliseconds
    #[serde(alias = "timestampMs", alias = "ts_ms")]
    pub timestamp_ms: f64,
    /// Zero or one face
    #[serde(default, alias = "faceLandmarks", alias = "face_landmarks")]
    pub face: Option<FaceLandmarks>,
    /// `None` when hand inference did not run for this frame
    #[serde(default, alias = "handLandmarks", alias = "hand_landmarks")]
    pub hands: Option<Vec<HandLandmarks>>,
    /// Caller-triggered recalibration, applied before this frame is scored
    #[serde(default)]
    pub recalibrate: bool,
}

impl LandmarkFrame {
    pub fn new(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            ..Self::default()
        }
    }

    pub fn with_face(mut self, face: FaceLandmarks) -> Self {
        self.face = Some(face);
        self
    }

    pub fn with_hands(mut self, hands: Vec<HandLandmarks>) -> Self {
        self.hands = Some(hands);
        self
    }
}
