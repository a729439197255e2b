//! Core types for the Synheart Cohort generator
//!
//! This module defines the record kinds emitted per simulated day and the
//! dataset envelope that wraps the four persona record sets. Field names are
//! the serialization contract consumed by downstream graphing and diagnostic
//! tooling and must not be renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hidden regime state driving episode overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Normal,
    Elevated,
}

impl Regime {
    pub fn is_elevated(&self) -> bool {
        matches!(self, Regime::Elevated)
    }
}

impl From<bool> for Regime {
    fn from(elevated: bool) -> Self {
        if elevated {
            Regime::Elevated
        } else {
            Regime::Normal
        }
    }
}

/// One day of wearable biomarker data. Exactly one per simulated day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WearableRecord {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Average heart rate (bpm)
    pub heart_rate_avg: f64,
    /// Resting heart rate (bpm)
    pub heart_rate_resting: f64,
    /// Heart rate variability (ms, RMSSD)
    pub heart_rate_variability: f64,
    /// Total sleep duration (hours)
    pub sleep_duration_hours: f64,
    /// Sleep efficiency (percentage, persona-specific clamp within [45, 95])
    pub sleep_efficiency: f64,
    /// Deep sleep duration (hours)
    pub deep_sleep_hours: f64,
    /// REM sleep duration (hours)
    pub rem_sleep_hours: f64,
    /// Step count
    pub steps: u32,
    /// Active calorie estimate (kcal)
    pub active_calories: u32,
    /// Exercise minutes
    pub exercise_minutes: u32,
    /// Stand hours
    pub stand_hours: u32,
    /// Composite stress score (0-100, higher = more stressed)
    pub stress_score: f64,
}

/// Weekly depression screen (PHQ-5 style): five ordinal sub-scores 0-3
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub date: String,
    pub little_interest: u8,
    pub feeling_down: u8,
    pub sleep_trouble: u8,
    pub tired_energy: u8,
    pub appetite: u8,
    /// Sum of the five sub-scores (0-15)
    pub total_score: u8,
}

/// Free-form mood diary entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryRecord {
    pub date: String,
    /// Mood rating (1-10)
    pub mood_rating: f64,
    /// Anxiety level (1-10)
    pub anxiety_level: f64,
    /// Craving intensity (0-10)
    pub craving_intensity: f64,
    /// Energy level (1-10)
    pub energy_level: f64,
    /// Subjective sleep quality (1-10)
    pub sleep_quality: f64,
    /// Pain level (0-10)
    pub pain_level: f64,
    /// Trigger tags for the day
    pub triggers: Vec<String>,
    /// Coping strategies used
    pub coping_strategies: Vec<String>,
    /// Free-text note
    pub notes: String,
    /// Word count of the full (unstored) entry
    pub word_count: u32,
}

/// One support-chat interaction; zero or more per day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub date: String,
    /// Time of day (HH:MM)
    pub time: String,
    /// Messages exchanged in the interaction
    pub message_count: u32,
    /// Average response latency (hours)
    pub avg_response_time_hours: f64,
    /// Sentiment score (-1 to 1)
    pub sentiment_score: f64,
    /// Topic tags
    pub topics: Vec<String>,
    /// Whether crisis language was flagged
    pub crisis_indicators: bool,
    /// Engagement score (1-10)
    pub engagement_level: f64,
}

/// Daily sobriety tracking. Exactly one per simulated day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SobrietyRecord {
    pub date: String,
    /// Consecutive sober days; resets to a small value on a relapse day
    pub days_sober: u32,
    /// Relapse risk (0.05-0.9, higher = higher risk)
    pub relapse_risk_score: f64,
    /// Treatment-enrollment flag
    pub in_treatment: bool,
    /// Medication adherence ratio (0-1)
    pub medication_adherence: f64,
    /// Support-meeting attendance (meetings per week)
    pub meeting_attendance: u32,
    /// Whether a relapse event fired on this day
    pub relapse_occurred: bool,
}

/// All records emitted by one persona run, five ordered sequences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaRecordSet {
    /// Display name
    pub persona: String,
    /// Category tag
    pub persona_type: String,
    pub wearable: Vec<WearableRecord>,
    pub survey: Vec<SurveyRecord>,
    pub mood_diary: Vec<DiaryRecord>,
    pub chat: Vec<InteractionRecord>,
    pub sobriety: Vec<SobrietyRecord>,
}

/// Metadata attached to every generated dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInfo {
    /// First simulated calendar date (YYYY-MM-DD)
    pub start_date: String,
    /// Number of simulated days per persona
    pub days_generated: u32,
    /// Method tag identifying the generation algorithm family
    pub generation_method: String,
    /// Wall-clock timestamp of the generation run
    pub generation_timestamp: DateTime<Utc>,
    /// Global seed the per-persona streams were derived from
    pub seed: u64,
    /// Unique id for this generation run
    pub dataset_id: Uuid,
}

/// Complete generated dataset: metadata plus one record set per persona,
/// keyed by persona identifier in fixed generation order.
///
/// Serialized manually (not via derive) so the persona list appears on the
/// wire as a JSON object keyed by persona id, matching the consumer contract.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub generation_info: GenerationInfo,
    /// Persona id -> record set, in generation order
    pub personas: Vec<(String, PersonaRecordSet)>,
}

impl Dataset {
    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.as_json_value()?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.as_json_value()?)
    }

    /// Parse a dataset back from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let generation_info = serde_json::from_value(value["generation_info"].clone())?;
        let mut personas = Vec::new();
        if let Some(map) = value["personas"].as_object() {
            for (id, set) in map {
                personas.push((id.clone(), serde_json::from_value(set.clone())?));
            }
        }
        Ok(Self {
            generation_info,
            personas,
        })
    }

    /// Build the serialized shape: personas as a JSON object keyed by id.
    ///
    /// serde_json is built with `preserve_order`, so the fixed generation
    /// order is kept on the wire.
    fn as_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut personas = serde_json::Map::new();
        for (id, set) in &self.personas {
            personas.insert(id.clone(), serde_json::to_value(set)?);
        }
        let mut root = serde_json::Map::new();
        root.insert(
            "generation_info".to_string(),
            serde_json::to_value(&self.generation_info)?,
        );
        root.insert("personas".to_string(), serde_json::Value::Object(personas));
        Ok(serde_json::Value::Object(root))
    }

    /// Look up a persona record set by id
    pub fn persona(&self, id: &str) -> Option<&PersonaRecordSet> {
        self.personas
            .iter()
            .find(|(pid, _)| pid == id)
            .map(|(_, set)| set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn empty_set(name: &str) -> PersonaRecordSet {
        PersonaRecordSet {
            persona: name.to_string(),
            persona_type: "test".to_string(),
            wearable: vec![],
            survey: vec![],
            mood_diary: vec![],
            chat: vec![],
            sobriety: vec![],
        }
    }

    #[test]
    fn test_dataset_round_trip_keeps_persona_order() {
        let dataset = Dataset {
            generation_info: GenerationInfo {
                start_date: "2024-01-01".to_string(),
                days_generated: 0,
                generation_method: "test".to_string(),
                generation_timestamp: Utc::now(),
                seed: 42,
                dataset_id: Uuid::nil(),
            },
            personas: vec![
                ("zeta".to_string(), empty_set("Zeta")),
                ("alpha".to_string(), empty_set("Alpha")),
            ],
        };

        let json = dataset.to_json().unwrap();
        let parsed = Dataset::from_json(&json).unwrap();

        let ids: Vec<&str> = parsed.personas.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(parsed.generation_info.seed, 42);
    }

    #[test]
    fn test_record_field_names_are_stable() {
        let record = SobrietyRecord {
            date: "2024-01-01".to_string(),
            days_sober: 46,
            relapse_risk_score: 0.55,
            in_treatment: true,
            medication_adherence: 0.92,
            meeting_attendance: 3,
            relapse_occurred: false,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["days_sober"], 46);
        assert_eq!(value["relapse_risk_score"], 0.55);
        assert_eq!(value["relapse_occurred"], false);
    }
}
