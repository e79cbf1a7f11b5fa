//! Depot track layout derivation.
//!
//! The depot layout is an ephemeral, client-derived view: it is rebuilt from
//! each train's `status` and `depotLocation` on every load and never
//! persisted. Two sides exist (side 1 = Muttom Yard, side 2 = Muttom Depot),
//! each with a stabling line (SL), maintenance line (ML), working line (WK)
//! and running line (RN).

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{Train, TrainStatus, TrainUpdate};

lazy_static! {
    /// Exact track ids the backend may already store in `depotLocation`.
    static ref TRACK_ID: Regex = Regex::new(r"^(SL|ML|WK|RN)[12]$").unwrap();

    /// Location names that end in a digit carry their side in the suffix.
    static ref TRAILING_DIGIT: Regex = Regex::new(r"\d$").unwrap();
}

/// Physical role of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackType {
    Stabling,
    Washing,
    Maintenance,
    Mainline,
}

/// One stabling/maintenance/washing/running line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(rename = "type")]
    pub track_type: TrackType,
    /// Usable length in meters.
    pub length: u32,
    /// Train ids currently placed on this track, as display keys.
    pub trains: Vec<String>,
}

/// Which half of the depot a train belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepotSide {
    /// Side 1 — Muttom Yard.
    Yard,
    /// Side 2 — Muttom Depot.
    Depot,
}

impl DepotSide {
    fn suffix(self) -> char {
        match self {
            DepotSide::Yard => '1',
            DepotSide::Depot => '2',
        }
    }
}

/// Infer the depot side from a free-form location name.
///
/// Unknown locations default to the depot side, like an unset one.
pub fn side_from_location(location: Option<&str>) -> DepotSide {
    let Some(location) = location else {
        return DepotSide::Depot;
    };
    let value = location.trim().to_lowercase();
    match value.as_str() {
        "muttom yard" => DepotSide::Yard,
        "muttom depot" => DepotSide::Depot,
        _ if TRAILING_DIGIT.is_match(&value) => {
            if value.ends_with('1') {
                DepotSide::Yard
            } else {
                DepotSide::Depot
            }
        }
        _ => {
            tracing::debug!(location = %value, "unrecognized depot location, defaulting to depot side");
            DepotSide::Depot
        }
    }
}

/// Resolve the track a train stands on.
///
/// A `depotLocation` that is already an exact track id wins; otherwise the
/// side is inferred from the location name and the line from the status
/// (MAINTENANCE -> ML, IN_SERVICE -> RN, everything else stables on SL).
pub fn track_for_train(train: &Train) -> String {
    let location = train.depot_location.as_deref().unwrap_or("").trim();
    if TRACK_ID.is_match(location) {
        return location.to_string();
    }
    let side = side_from_location(train.depot_location.as_deref());
    let line = match train.status {
        TrainStatus::Maintenance => "ML",
        TrainStatus::InService => "RN",
        TrainStatus::Active | TrainStatus::Retired => "SL",
    };
    format!("{}{}", line, side.suffix())
}

/// Status implied by a track's role, for trains placed there.
pub fn status_for_track_type(track_type: TrackType) -> TrainStatus {
    match track_type {
        TrackType::Maintenance => TrainStatus::Maintenance,
        TrackType::Mainline => TrainStatus::InService,
        // Trains keep ACTIVE while stabled or in the washing line.
        TrackType::Stabling | TrackType::Washing => TrainStatus::Active,
    }
}

/// The derived depot view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotLayout {
    pub tracks: Vec<Track>,
}

impl DepotLayout {
    /// The standard eight-track layout, empty.
    pub fn standard() -> Self {
        let lines: [(&str, TrackType, u32); 8] = [
            ("SL1", TrackType::Stabling, 150),
            ("SL2", TrackType::Stabling, 150),
            ("ML1", TrackType::Maintenance, 120),
            ("ML2", TrackType::Maintenance, 120),
            // Working lines are treated as mainline-type tracks.
            ("WK1", TrackType::Mainline, 140),
            ("WK2", TrackType::Mainline, 140),
            ("RN1", TrackType::Mainline, 160),
            ("RN2", TrackType::Mainline, 160),
        ];
        DepotLayout {
            tracks: lines
                .into_iter()
                .map(|(id, track_type, length)| Track {
                    id: id.to_string(),
                    track_type,
                    length,
                    trains: Vec::new(),
                })
                .collect(),
        }
    }

    /// Rebuild the layout from current train state.
    pub fn derive(trains: &[Train]) -> Self {
        let mut layout = Self::standard();
        for track in &mut layout.tracks {
            track.trains = trains
                .iter()
                .filter(|train| track_for_train(train) == track.id)
                .map(|train| train.train_id.to_string())
                .collect();
        }
        layout
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }
}

/// Plan the update a move to `target_track` persists.
///
/// Returns `None` when the target does not exist or the train already stands
/// there. The exact track id is written back as `depotLocation`; the new
/// status follows the track id prefix, falling back to the track's type.
pub fn plan_move(train: &Train, layout: &DepotLayout, target_track: &str) -> Option<TrainUpdate> {
    let source = track_for_train(train);
    if source == target_track {
        return None;
    }
    let target = layout.track(target_track)?;
    let status = if target.id.starts_with("ML") {
        TrainStatus::Maintenance
    } else if target.id.starts_with("RN") {
        TrainStatus::InService
    } else if target.id.starts_with("SL") || target.id.starts_with("WK") {
        TrainStatus::Active
    } else {
        status_for_track_type(target.track_type)
    };
    Some(TrainUpdate {
        depot_location: Some(target.id.clone()),
        status: Some(status),
        ..Default::default()
    })
}
