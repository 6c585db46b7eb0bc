use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use egui::Color32;
use serde::{Deserialize, Serialize};

/// Which task endpoints a dependency connector links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    FinishToStart,
    StartToStart,
    FinishToFinish,
    StartToFinish,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 4] = [
        RelationshipKind::FinishToStart,
        RelationshipKind::StartToStart,
        RelationshipKind::FinishToFinish,
        RelationshipKind::StartToFinish,
    ];

    /// Two-letter abbreviation drawn on the connector.
    pub fn abbreviation(self) -> &'static str {
        match self {
            RelationshipKind::FinishToStart => "FS",
            RelationshipKind::StartToStart => "SS",
            RelationshipKind::FinishToFinish => "FF",
            RelationshipKind::StartToFinish => "SF",
        }
    }

    /// Human-readable label used in tooltips.
    pub fn label(self) -> &'static str {
        match self {
            RelationshipKind::FinishToStart => "Finish to Start",
            RelationshipKind::StartToStart => "Start to Start",
            RelationshipKind::FinishToFinish => "Finish to Finish",
            RelationshipKind::StartToFinish => "Start to Finish",
        }
    }

    /// Whether the connector leaves the source task from its end (true) or start.
    pub fn from_source_end(self) -> bool {
        matches!(
            self,
            RelationshipKind::FinishToStart | RelationshipKind::FinishToFinish
        )
    }

    /// Whether the connector enters the target task at its end (true) or start.
    pub fn into_target_end(self) -> bool {
        matches!(
            self,
            RelationshipKind::FinishToFinish | RelationshipKind::StartToFinish
        )
    }
}

/// A dependency edge between two tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    /// Id of the predecessor task.
    pub source: String,
    /// Id of the successor task.
    pub target: String,
    pub kind: RelationshipKind,
    /// Signed offset in units of the active view mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag: Option<f32>,
}

impl Relationship {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind,
            lag: None,
        }
    }

    pub fn with_lag(mut self, lag: f32) -> Self {
        self.lag = Some(lag);
        self
    }
}

/// A single bar in the chart. Supplied by the host, never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(with = "flexible_datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "flexible_datetime")]
    pub end: NaiveDateTime,
    /// Percent complete, nominally 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    /// Bar color; the theme's bar color when absent.
    #[serde(
        default,
        with = "crate::model::hex_color::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Color32>,
    /// Informational only; connectors come from [`Relationship`]s.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Opaque host payload, carried along but never interpreted.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Create a task spanning `start..end`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            progress: None,
            color: None,
            dependencies: Vec::new(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a task spanning whole days, midnight to midnight.
    pub fn from_dates(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self::new(id, name, start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = Some(color);
        self
    }

    /// Whole days covered, rounded up. Inverted ranges count as zero.
    pub fn duration_days(&self) -> i64 {
        let millis = (self.end - self.start).num_milliseconds().max(0);
        (millis as f64 / 86_400_000.0).ceil() as i64
    }
}

/// Accepts either `YYYY-MM-DD` or a full `YYYY-MM-DDTHH:MM:SS` timestamp.
mod flexible_datetime {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", s)))
    }

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        for fmt in FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    }
}
