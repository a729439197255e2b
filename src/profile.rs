//! Persona profiles
//!
//! A [`PersonaProfile`] is an immutable bundle of distributional parameters
//! describing one simulated patient: channel baselines and persistence,
//! episode regime parameters, the relapse rule, and the shaping constants for
//! each record kind. The four builtin profiles share one simulator; only the
//! tables below differ.

use crate::error::GenError;
use crate::processes::RegimeParams;
use crate::risk::{RiskCurve, RISK_CEILING, RISK_FLOOR};

/// Episode axis driving a persona's regime-switching overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeKind {
    WorkStress,
    Ptsd,
    SocialPressure,
    Depression,
}

impl EpisodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeKind::WorkStress => "work_stress",
            EpisodeKind::Ptsd => "ptsd",
            EpisodeKind::SocialPressure => "social_pressure",
            EpisodeKind::Depression => "depression",
        }
    }
}

/// AR(1) parameters for one biomarker channel plus its regime coupling
#[derive(Debug, Clone, Copy)]
pub struct ChannelParams {
    pub mean: f64,
    pub std: f64,
    /// AR(1) persistence coefficient, must lie in [0, 1)
    pub phi: f64,
    /// Additive shift applied on elevated-regime days (sign encodes direction)
    pub high_regime_shift: f64,
    /// Weekly-seasonality amplitude, if the channel has a weekday pattern
    pub seasonality: Option<f64>,
    /// Physiological clamp bounds, if any
    pub clamp: Option<(f64, f64)>,
}

/// Stochastic relapse/reset rule
#[derive(Debug, Clone, Copy)]
pub struct RelapseRule {
    /// Scaling constant applied to the day's risk when drawing a relapse;
    /// intentionally tiny so relapses are rare over 180 days
    pub scale: f64,
    /// Minimum sober days before a relapse can fire (avoids reset loops)
    pub min_days: u32,
    /// Inclusive range the sober counter resets into on a relapse
    pub reset_range: (u32, u32),
}

/// Shaping constants for the daily wearable record
#[derive(Debug, Clone, Copy)]
pub struct WearableShape {
    /// Uniform offset added to resting HR to get average HR (bpm)
    pub hr_avg_offset: (u32, u32),
    /// Deep-sleep fraction of total sleep: (mean, std)
    pub deep_sleep_ratio: (f64, f64),
    /// REM fraction of total sleep: (mean, std)
    pub rem_sleep_ratio: (f64, f64),
    /// Active calories per step
    pub calorie_factor: f64,
    pub calorie_noise_std: f64,
    /// Exercise minutes Normal(mean, std), emitted with `exercise_probability`
    pub exercise_minutes: (f64, f64),
    pub exercise_probability: f64,
    pub stand_hours_weekday: (u32, u32),
    pub stand_hours_weekend: (u32, u32),
    /// stress_score = risk * slope + intercept + N(0, noise)
    pub stress_slope: f64,
    pub stress_intercept: f64,
    pub stress_noise_std: f64,
}

/// Shaping constants for the weekly survey record
#[derive(Debug, Clone, Copy)]
pub struct SurveyShape {
    /// Days between surveys
    pub cadence_days: u32,
    /// Depressive-severity starting point the sub-scores build on
    pub baseline_severity: f64,
    /// Sober days per one-point severity improvement
    pub recovery_divisor: u32,
}

/// Shaping constants for diary entries
#[derive(Debug, Clone)]
pub struct DiaryShape {
    pub entry_probability_normal: f64,
    pub entry_probability_elevated: f64,
    /// mood = mood_base - risk * mood_risk_coef + N(0, mood_noise_std)
    pub mood_base: f64,
    pub mood_risk_coef: f64,
    pub mood_noise_std: f64,
    /// anxiety = anxiety_base + n_triggers + risk * anxiety_risk_coef
    pub anxiety_base: f64,
    pub anxiety_risk_coef: f64,
    /// craving = risk * craving_risk_coef + n_triggers * craving_trigger_coef
    ///           + N(0, craving_noise_std)
    pub craving_risk_coef: f64,
    pub craving_trigger_coef: f64,
    pub craving_noise_std: f64,
    /// energy = energy_base - n_triggers - risk * energy_risk_coef
    pub energy_base: f64,
    pub energy_risk_coef: f64,
    /// sleep_quality = sleep_efficiency / divisor
    pub sleep_quality_divisor: f64,
    /// Pain rating: fixed 0, or chronic uniform range
    pub pain_range: Option<(u32, u32)>,
    pub word_count: (u32, u32),
    /// Episode trigger vocabulary, sampled on elevated days
    pub trigger_pool: &'static [&'static str],
    pub triggers_per_entry: (usize, usize),
    /// Extra weekday-keyed trigger, e.g. Friday social pressure: (tag, weekday, prob)
    pub weekday_trigger: Option<(&'static str, chrono::Weekday, f64)>,
    /// Tags appended on a relapse day
    pub relapse_tags: &'static [&'static str],
    /// Tags appended while sober count is below `early_recovery_days`
    pub early_recovery_tags: &'static [&'static str],
    pub early_recovery_days: u32,
    pub coping_when_triggered: &'static [&'static str],
    pub coping_triggered_count: (usize, usize),
    pub coping_when_calm: &'static [&'static str],
    pub coping_calm_count: (usize, usize),
    pub note_style: NoteStyle,
}

/// Free-text note voice, one per persona
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteStyle {
    Professional,
    Veteran,
    Student,
    Retired,
}

impl NoteStyle {
    /// Render the day's note in this persona's voice
    pub fn render(&self, sober_days: u32, relapsed: bool, elevated: bool, triggered: bool) -> String {
        match self {
            NoteStyle::Professional => {
                let status = if relapsed {
                    "Just relapsed - need to reset and focus"
                } else if elevated {
                    "Challenging period"
                } else {
                    "Staying focused on recovery"
                };
                format!("Day {sober_days} sober. {status}.")
            }
            NoteStyle::Veteran => {
                let status = if relapsed {
                    "Slipped. Back to basics"
                } else if elevated {
                    "Rough night"
                } else {
                    "Steady"
                };
                format!("Day {sober_days}. {status}")
            }
            NoteStyle::Student => {
                let status = if relapsed {
                    "Starting over - not giving up"
                } else if triggered {
                    "Challenging but staying strong"
                } else {
                    "Grateful for support"
                };
                format!("Day {sober_days} clean! \u{1F31F} {status}")
            }
            NoteStyle::Retired => {
                let status = if relapsed {
                    "Slipped up. Trying again"
                } else if triggered {
                    "Tough day"
                } else {
                    "Getting by"
                };
                format!("{sober_days} days. {status}")
            }
        }
    }
}

/// How many chat interactions a persona logs on a given day
#[derive(Debug, Clone, Copy)]
pub enum ChatCadence {
    /// Several per day: count ~ U[max(1, base-1), base+2], with `base`
    /// swapped for `elevated` on elevated days and `post_relapse_bonus`
    /// added after a relapse or in early recovery
    Burst {
        base: u32,
        elevated: u32,
        post_relapse_bonus: u32,
    },
    /// At most one per day, Bernoulli; probability inflated after a relapse
    Sparse {
        probability: f64,
        post_relapse_probability: f64,
    },
    /// Fixed uniform range every day, plus a post-relapse bonus
    Range { lo: u32, hi: u32, post_relapse_bonus: u32 },
}

/// Shaping constants for chat interactions
#[derive(Debug, Clone)]
pub struct ChatShape {
    pub cadence: ChatCadence,
    /// Hour-of-day window interactions fall into
    pub hour_range: (u32, u32),
    pub message_count: (u32, u32),
    /// Uniform response-latency range (hours)
    pub response_time_hours: (f64, f64),
    /// sentiment = base - risk * risk_coef - n_triggers * trigger_coef
    ///             - relapse_penalty + N(0, noise), clamped
    pub sentiment_base: f64,
    pub sentiment_risk_coef: f64,
    pub sentiment_trigger_coef: f64,
    pub sentiment_relapse_penalty: f64,
    pub sentiment_noise_std: f64,
    pub sentiment_clamp: (f64, f64),
    /// crisis_indicators = elevated regime AND risk above this threshold
    pub crisis_risk_threshold: f64,
    /// engagement = base - risk * risk_coef, clamped to [1, 10]
    pub engagement_base: f64,
    pub engagement_risk_coef: f64,
    pub topics_calm: &'static [&'static str],
    pub topics_elevated: &'static [&'static str],
    pub topics_relapse: &'static [&'static str],
    pub topics_early_recovery: &'static [&'static str],
    pub early_recovery_days: u32,
}

/// Shaping constants for the daily sobriety record
#[derive(Debug, Clone, Copy)]
pub struct SobrietyShape {
    pub adherence_mean: f64,
    pub adherence_std: f64,
    pub adherence_floor: f64,
    pub meetings_per_week: (u32, u32),
}

/// Complete configuration for one simulated patient
#[derive(Debug, Clone)]
pub struct PersonaProfile {
    /// Stable identifier used as the dataset key
    pub id: &'static str,
    pub name: &'static str,
    pub persona_type: &'static str,
    pub initial_sober_days: u32,
    pub episode: EpisodeKind,
    pub regime: RegimeParams,
    pub risk_curve: RiskCurve,
    /// Persona-specific upper clamp on total risk (never above [`RISK_CEILING`])
    pub risk_ceiling: f64,
    pub relapse: RelapseRule,
    pub resting_hr: ChannelParams,
    pub hrv: ChannelParams,
    pub sleep_duration: ChannelParams,
    pub sleep_efficiency: ChannelParams,
    pub steps: ChannelParams,
    pub wearable: WearableShape,
    pub survey: SurveyShape,
    pub diary: DiaryShape,
    pub chat: ChatShape,
    pub sobriety: SobrietyShape,
}

impl PersonaProfile {
    /// Check the numeric preconditions the generators rely on.
    ///
    /// The generation loop itself never fails; all out-of-domain math is
    /// rejected here before a run starts.
    pub fn validate(&self) -> Result<(), GenError> {
        for (label, ch) in [
            ("resting_hr", &self.resting_hr),
            ("hrv", &self.hrv),
            ("sleep_duration", &self.sleep_duration),
            ("sleep_efficiency", &self.sleep_efficiency),
            ("steps", &self.steps),
        ] {
            if ch.std < 0.0 || !ch.std.is_finite() {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("channel {label}: std must be finite and non-negative"),
                ));
            }
            if !(0.0..1.0).contains(&ch.phi) {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("channel {label}: phi {} outside [0, 1)", ch.phi),
                ));
            }
            if let Some((lo, hi)) = ch.clamp {
                if lo > hi {
                    return Err(GenError::invalid_profile(
                        self.id,
                        format!("channel {label}: clamp range inverted"),
                    ));
                }
            }
        }

        if self.regime.base_std < 0.0 || self.regime.high_std < 0.0 {
            return Err(GenError::invalid_profile(self.id, "regime std must be non-negative"));
        }
        for (label, p) in [
            ("p_enter_high", self.regime.p_enter_high),
            ("p_exit_high", self.regime.p_exit_high),
            ("relapse scale", self.relapse.scale),
            ("diary probability (normal)", self.diary.entry_probability_normal),
            ("diary probability (elevated)", self.diary.entry_probability_elevated),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("{label} {p} outside [0, 1]"),
                ));
            }
        }

        let (lo, hi) = self.relapse.reset_range;
        if lo < 1 || lo > hi {
            return Err(GenError::invalid_profile(self.id, "relapse reset range must satisfy 1 <= lo <= hi"));
        }

        if self.survey.cadence_days == 0 {
            return Err(GenError::invalid_profile(self.id, "survey cadence_days must be >= 1"));
        }
        if self.survey.recovery_divisor == 0 {
            return Err(GenError::invalid_profile(self.id, "survey recovery_divisor must be >= 1"));
        }

        // Every (lo, hi) pair below feeds an inclusive uniform draw or a
        // clamp at the emission site, so inverted pairs would panic mid-run
        for (label, (lo, hi)) in [
            ("wearable hr_avg_offset", self.wearable.hr_avg_offset),
            ("wearable stand_hours_weekday", self.wearable.stand_hours_weekday),
            ("wearable stand_hours_weekend", self.wearable.stand_hours_weekend),
            ("diary word_count", self.diary.word_count),
            ("chat hour_range", self.chat.hour_range),
            ("chat message_count", self.chat.message_count),
            ("sobriety meetings_per_week", self.sobriety.meetings_per_week),
        ] {
            if lo > hi {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("{label}: range ({lo}, {hi}) inverted"),
                ));
            }
        }
        if let Some((lo, hi)) = self.diary.pain_range {
            if lo > hi {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("diary pain_range: range ({lo}, {hi}) inverted"),
                ));
            }
        }
        for (label, (lo, hi)) in [
            ("diary triggers_per_entry", self.diary.triggers_per_entry),
            ("diary coping_triggered_count", self.diary.coping_triggered_count),
            ("diary coping_calm_count", self.diary.coping_calm_count),
        ] {
            if lo > hi {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("{label}: range ({lo}, {hi}) inverted"),
                ));
            }
        }
        for (label, (lo, hi)) in [
            ("chat response_time_hours", self.chat.response_time_hours),
            ("chat sentiment_clamp", self.chat.sentiment_clamp),
        ] {
            if lo > hi {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("{label}: range ({lo}, {hi}) inverted"),
                ));
            }
        }
        if let ChatCadence::Range { lo, hi, .. } = self.chat.cadence {
            if lo > hi {
                return Err(GenError::invalid_profile(
                    self.id,
                    format!("chat cadence: range ({lo}, {hi}) inverted"),
                ));
            }
        }

        if !(RISK_FLOOR < self.risk_ceiling && self.risk_ceiling <= RISK_CEILING) {
            return Err(GenError::invalid_profile(
                self.id,
                format!("risk ceiling {} outside ({RISK_FLOOR}, {RISK_CEILING}]", self.risk_ceiling),
            ));
        }

        Ok(())
    }
}

/// The four builtin personas, in fixed generation order
pub fn builtin_profiles() -> Vec<PersonaProfile> {
    vec![sarah_chen(), marcus_rodriguez(), jessica_thompson(), robert_williams()]
}

/// Sarah Chen: tech professional, 45 days sober, work-stress episodes
/// lasting ~4 days on average.
pub fn sarah_chen() -> PersonaProfile {
    PersonaProfile {
        id: "sarah_chen",
        name: "Sarah Chen",
        persona_type: "tech_savvy_professional",
        initial_sober_days: 45,
        episode: EpisodeKind::WorkStress,
        regime: RegimeParams {
            base_mean: 0.0,
            base_std: 0.05,
            high_mean: 0.15,
            high_std: 0.08,
            p_enter_high: 0.08,
            p_exit_high: 0.25,
        },
        risk_curve: RiskCurve::REALISTIC,
        risk_ceiling: 0.9,
        relapse: RelapseRule {
            scale: 0.01,
            min_days: 30,
            reset_range: (1, 7),
        },
        resting_hr: ChannelParams {
            mean: 80.0,
            std: 3.0,
            phi: 0.8,
            high_regime_shift: 8.0,
            seasonality: Some(0.02),
            clamp: None,
        },
        hrv: ChannelParams {
            mean: 25.0,
            std: 2.0,
            phi: 0.8,
            high_regime_shift: -6.0,
            seasonality: None,
            clamp: Some((10.0, 45.0)),
        },
        sleep_duration: ChannelParams {
            mean: 7.5,
            std: 0.5,
            phi: 0.6,
            high_regime_shift: -0.8,
            seasonality: None,
            clamp: Some((5.0, 10.0)),
        },
        sleep_efficiency: ChannelParams {
            mean: 85.0,
            std: 5.0,
            phi: 0.7,
            high_regime_shift: -12.0,
            seasonality: None,
            clamp: Some((60.0, 95.0)),
        },
        steps: ChannelParams {
            mean: 8000.0,
            std: 1500.0,
            phi: 0.5,
            high_regime_shift: 0.0,
            seasonality: Some(0.15),
            clamp: Some((3000.0, 15000.0)),
        },
        wearable: WearableShape {
            hr_avg_offset: (15, 25),
            deep_sleep_ratio: (0.18, 0.02),
            rem_sleep_ratio: (0.25, 0.03),
            calorie_factor: 0.04,
            calorie_noise_std: 20.0,
            exercise_minutes: (25.0, 15.0),
            exercise_probability: 0.6,
            stand_hours_weekday: (8, 12),
            stand_hours_weekend: (4, 9),
            stress_slope: 60.0,
            stress_intercept: 30.0,
            stress_noise_std: 5.0,
        },
        survey: SurveyShape {
            cadence_days: 7,
            baseline_severity: 3.0,
            recovery_divisor: 60,
        },
        diary: DiaryShape {
            entry_probability_normal: 0.95,
            entry_probability_elevated: 0.85,
            mood_base: 7.5,
            mood_risk_coef: 4.0,
            mood_noise_std: 0.8,
            anxiety_base: 4.0,
            anxiety_risk_coef: 3.0,
            craving_risk_coef: 8.0,
            craving_trigger_coef: 0.0,
            craving_noise_std: 1.0,
            energy_base: 8.0,
            energy_risk_coef: 2.0,
            sleep_quality_divisor: 10.0,
            pain_range: None,
            word_count: (80, 200),
            trigger_pool: &["work deadline", "presentation", "long hours", "conflict"],
            triggers_per_entry: (1, 3),
            weekday_trigger: Some(("social pressure", chrono::Weekday::Fri, 0.3)),
            relapse_tags: &["guilt", "shame", "restart anxiety"],
            early_recovery_tags: &["early recovery", "vulnerability"],
            early_recovery_days: 30,
            coping_when_triggered: &["meditation", "deep breathing", "call therapist", "exercise"],
            coping_triggered_count: (1, 3),
            coping_when_calm: &["journaling", "gratitude", "exercise", "routine"],
            coping_calm_count: (1, 2),
            note_style: NoteStyle::Professional,
        },
        chat: ChatShape {
            cadence: ChatCadence::Burst {
                base: 3,
                elevated: 5,
                post_relapse_bonus: 3,
            },
            hour_range: (8, 22),
            message_count: (2, 15),
            response_time_hours: (0.1, 3.0),
            sentiment_base: 0.3,
            sentiment_risk_coef: 0.8,
            sentiment_trigger_coef: 0.2,
            sentiment_relapse_penalty: 0.4,
            sentiment_noise_std: 0.2,
            sentiment_clamp: (-0.8, 0.8),
            crisis_risk_threshold: 0.5,
            engagement_base: 8.0,
            engagement_risk_coef: 3.0,
            topics_calm: &["progress", "goals", "routine"],
            topics_elevated: &["work stress", "coping strategies", "sleep"],
            topics_relapse: &["relapse", "guilt", "restart", "support"],
            topics_early_recovery: &["early recovery", "cravings", "support", "routine"],
            early_recovery_days: 30,
        },
        sobriety: SobrietyShape {
            adherence_mean: 0.92,
            adherence_std: 0.05,
            adherence_floor: 0.7,
            meetings_per_week: (2, 3),
        },
    }
}

/// Marcus Rodriguez: veteran with six months of sobriety and infrequent but
/// intense PTSD episodes.
pub fn marcus_rodriguez() -> PersonaProfile {
    PersonaProfile {
        id: "marcus_rodriguez",
        name: "Marcus Rodriguez",
        persona_type: "veteran_in_recovery",
        initial_sober_days: 180,
        episode: EpisodeKind::Ptsd,
        regime: RegimeParams {
            base_mean: 0.0,
            base_std: 0.03,
            high_mean: 0.25,
            high_std: 0.12,
            p_enter_high: 0.05,
            p_exit_high: 0.4,
        },
        risk_curve: RiskCurve::REALISTIC,
        risk_ceiling: 0.8,
        relapse: RelapseRule {
            scale: 0.012,
            min_days: 90,
            reset_range: (1, 14),
        },
        resting_hr: ChannelParams {
            mean: 72.0,
            std: 4.0,
            phi: 0.8,
            high_regime_shift: 15.0,
            seasonality: None,
            clamp: None,
        },
        hrv: ChannelParams {
            mean: 28.0,
            std: 3.0,
            phi: 0.8,
            high_regime_shift: -10.0,
            seasonality: None,
            clamp: Some((12.0, 45.0)),
        },
        sleep_duration: ChannelParams {
            mean: 6.5,
            std: 0.6,
            phi: 0.7,
            high_regime_shift: -1.2,
            seasonality: None,
            clamp: Some((4.0, 9.0)),
        },
        sleep_efficiency: ChannelParams {
            mean: 75.0,
            std: 6.0,
            phi: 0.7,
            high_regime_shift: -15.0,
            seasonality: None,
            clamp: Some((50.0, 90.0)),
        },
        steps: ChannelParams {
            mean: 12000.0,
            std: 2000.0,
            phi: 0.6,
            high_regime_shift: 0.0,
            seasonality: Some(0.2),
            clamp: Some((5000.0, 18000.0)),
        },
        wearable: WearableShape {
            hr_avg_offset: (12, 20),
            deep_sleep_ratio: (0.15, 0.02),
            rem_sleep_ratio: (0.20, 0.03),
            calorie_factor: 0.05,
            calorie_noise_std: 30.0,
            exercise_minutes: (15.0, 10.0),
            exercise_probability: 0.3,
            stand_hours_weekday: (10, 14),
            stand_hours_weekend: (4, 8),
            stress_slope: 70.0,
            stress_intercept: 25.0,
            stress_noise_std: 8.0,
        },
        survey: SurveyShape {
            cadence_days: 7,
            baseline_severity: 2.0,
            recovery_divisor: 90,
        },
        diary: DiaryShape {
            entry_probability_normal: 0.6,
            entry_probability_elevated: 0.4,
            mood_base: 6.5,
            mood_risk_coef: 3.0,
            mood_noise_std: 0.0,
            anxiety_base: 5.0,
            anxiety_risk_coef: 2.0,
            craving_risk_coef: 6.0,
            craving_trigger_coef: 2.0,
            craving_noise_std: 0.0,
            energy_base: 6.0,
            energy_risk_coef: 0.0,
            sleep_quality_divisor: 12.0,
            pain_range: Some((3, 7)),
            word_count: (15, 50),
            trigger_pool: &["nightmare", "flashback", "loud noise", "crowd"],
            triggers_per_entry: (1, 2),
            weekday_trigger: None,
            relapse_tags: &["shame", "guilt"],
            early_recovery_tags: &["early recovery"],
            early_recovery_days: 30,
            coping_when_triggered: &["breathing exercises", "walk"],
            coping_triggered_count: (2, 2),
            coping_when_calm: &["work", "routine"],
            coping_calm_count: (2, 2),
            note_style: NoteStyle::Veteran,
        },
        chat: ChatShape {
            cadence: ChatCadence::Sparse {
                probability: 0.35,
                post_relapse_probability: 0.7,
            },
            hour_range: (18, 21),
            message_count: (2, 8),
            response_time_hours: (3.0, 12.0),
            sentiment_base: 0.1,
            sentiment_risk_coef: 0.6,
            sentiment_trigger_coef: 0.0,
            sentiment_relapse_penalty: 0.4,
            sentiment_noise_std: 0.0,
            sentiment_clamp: (-0.6, 0.4),
            crisis_risk_threshold: 0.5,
            engagement_base: 6.0,
            engagement_risk_coef: 2.0,
            topics_calm: &["work", "routine", "meetings"],
            topics_elevated: &["PTSD", "pain", "family"],
            topics_relapse: &["relapse", "support"],
            topics_early_recovery: &["early recovery", "support"],
            early_recovery_days: 30,
        },
        sobriety: SobrietyShape {
            adherence_mean: 0.95,
            adherence_std: 0.03,
            adherence_floor: 0.85,
            meetings_per_week: (3, 5),
        },
    }
}

/// Jessica Thompson: college student in early recovery with frequent
/// social-pressure episodes and volatile sleep.
pub fn jessica_thompson() -> PersonaProfile {
    PersonaProfile {
        id: "jessica_thompson",
        name: "Jessica Thompson",
        persona_type: "young_adult_student",
        initial_sober_days: 30,
        episode: EpisodeKind::SocialPressure,
        regime: RegimeParams {
            base_mean: 0.0,
            base_std: 0.06,
            high_mean: 0.20,
            high_std: 0.10,
            p_enter_high: 0.12,
            p_exit_high: 0.3,
        },
        risk_curve: RiskCurve::REALISTIC,
        risk_ceiling: 0.85,
        relapse: RelapseRule {
            scale: 0.02,
            min_days: 30,
            reset_range: (1, 14),
        },
        resting_hr: ChannelParams {
            mean: 82.0,
            std: 5.0,
            phi: 0.7,
            high_regime_shift: 12.0,
            seasonality: None,
            clamp: None,
        },
        hrv: ChannelParams {
            mean: 32.0,
            std: 4.0,
            phi: 0.6,
            high_regime_shift: -8.0,
            seasonality: None,
            clamp: Some((15.0, 50.0)),
        },
        sleep_duration: ChannelParams {
            mean: 6.8,
            std: 1.2,
            phi: 0.5,
            high_regime_shift: 0.0,
            seasonality: Some(0.25),
            clamp: Some((4.0, 11.0)),
        },
        sleep_efficiency: ChannelParams {
            mean: 78.0,
            std: 8.0,
            phi: 0.6,
            high_regime_shift: -10.0,
            seasonality: None,
            clamp: Some((60.0, 92.0)),
        },
        steps: ChannelParams {
            mean: 9000.0,
            std: 2500.0,
            phi: 0.4,
            high_regime_shift: 0.0,
            seasonality: None,
            clamp: Some((3000.0, 16000.0)),
        },
        wearable: WearableShape {
            hr_avg_offset: (18, 28),
            deep_sleep_ratio: (0.20, 0.03),
            rem_sleep_ratio: (0.28, 0.04),
            calorie_factor: 0.045,
            calorie_noise_std: 25.0,
            exercise_minutes: (35.0, 20.0),
            exercise_probability: 0.7,
            stand_hours_weekday: (6, 11),
            stand_hours_weekend: (6, 11),
            stress_slope: 65.0,
            stress_intercept: 25.0,
            stress_noise_std: 10.0,
        },
        survey: SurveyShape {
            cadence_days: 7,
            baseline_severity: 2.0,
            recovery_divisor: 60,
        },
        diary: DiaryShape {
            entry_probability_normal: 0.92,
            entry_probability_elevated: 0.92,
            mood_base: 7.2,
            mood_risk_coef: 3.5,
            mood_noise_std: 0.0,
            anxiety_base: 5.0,
            anxiety_risk_coef: 2.5,
            craving_risk_coef: 7.0,
            craving_trigger_coef: 1.5,
            craving_noise_std: 0.0,
            energy_base: 7.5,
            energy_risk_coef: 1.5,
            sleep_quality_divisor: 10.0,
            pain_range: None,
            word_count: (150, 350),
            trigger_pool: &["party invite", "peer pressure", "exam stress", "social anxiety"],
            triggers_per_entry: (1, 3),
            weekday_trigger: None,
            relapse_tags: &["guilt", "shame", "restart anxiety"],
            early_recovery_tags: &["early recovery", "cravings"],
            early_recovery_days: 30,
            coping_when_triggered: &["text friend", "music", "exercise"],
            coping_triggered_count: (3, 3),
            coping_when_calm: &["study", "gratitude"],
            coping_calm_count: (2, 2),
            note_style: NoteStyle::Student,
        },
        chat: ChatShape {
            cadence: ChatCadence::Range {
                lo: 4,
                hi: 9,
                post_relapse_bonus: 2,
            },
            hour_range: (7, 23),
            message_count: (6, 25),
            response_time_hours: (0.05, 2.0),
            sentiment_base: 0.4,
            sentiment_risk_coef: 0.7,
            sentiment_trigger_coef: 0.0,
            sentiment_relapse_penalty: 0.4,
            sentiment_noise_std: 0.0,
            sentiment_clamp: (-0.7, 0.8),
            crisis_risk_threshold: 0.6,
            engagement_base: 8.5,
            engagement_risk_coef: 2.0,
            topics_calm: &["progress", "career", "recovery"],
            topics_elevated: &["college stress", "social pressure", "future goals"],
            topics_relapse: &["relapse", "guilt", "support"],
            topics_early_recovery: &["early recovery", "cravings", "support"],
            early_recovery_days: 30,
        },
        sobriety: SobrietyShape {
            adherence_mean: 0.88,
            adherence_std: 0.08,
            adherence_floor: 0.7,
            meetings_per_week: (2, 4),
        },
    }
}

/// Robert Williams: older adult three months sober with long
/// loneliness/depression episodes and very low activity.
pub fn robert_williams() -> PersonaProfile {
    PersonaProfile {
        id: "robert_williams",
        name: "Robert Williams",
        persona_type: "empty_nester",
        initial_sober_days: 90,
        episode: EpisodeKind::Depression,
        regime: RegimeParams {
            base_mean: 0.0,
            base_std: 0.04,
            high_mean: 0.18,
            high_std: 0.09,
            p_enter_high: 0.06,
            p_exit_high: 0.2,
        },
        risk_curve: RiskCurve::REALISTIC,
        risk_ceiling: 0.75,
        relapse: RelapseRule {
            scale: 0.015,
            min_days: 60,
            reset_range: (1, 10),
        },
        resting_hr: ChannelParams {
            mean: 68.0,
            std: 3.0,
            phi: 0.85,
            high_regime_shift: 8.0,
            seasonality: None,
            clamp: None,
        },
        hrv: ChannelParams {
            mean: 22.0,
            std: 2.0,
            phi: 0.8,
            high_regime_shift: -5.0,
            seasonality: None,
            clamp: Some((12.0, 35.0)),
        },
        sleep_duration: ChannelParams {
            mean: 8.5,
            std: 0.8,
            phi: 0.8,
            // Hypersomnia: sleeps more during depressive episodes
            high_regime_shift: 1.2,
            seasonality: None,
            clamp: Some((6.0, 12.0)),
        },
        sleep_efficiency: ChannelParams {
            mean: 68.0,
            std: 6.0,
            phi: 0.8,
            high_regime_shift: -10.0,
            seasonality: None,
            clamp: Some((45.0, 80.0)),
        },
        steps: ChannelParams {
            mean: 3500.0,
            std: 800.0,
            phi: 0.7,
            high_regime_shift: -800.0,
            seasonality: None,
            clamp: Some((1200.0, 6000.0)),
        },
        wearable: WearableShape {
            hr_avg_offset: (8, 15),
            deep_sleep_ratio: (0.12, 0.02),
            rem_sleep_ratio: (0.16, 0.02),
            calorie_factor: 0.03,
            calorie_noise_std: 15.0,
            exercise_minutes: (10.0, 8.0),
            exercise_probability: 0.2,
            stand_hours_weekday: (4, 8),
            stand_hours_weekend: (4, 8),
            stress_slope: 55.0,
            stress_intercept: 35.0,
            stress_noise_std: 8.0,
        },
        survey: SurveyShape {
            cadence_days: 7,
            baseline_severity: 4.0,
            recovery_divisor: 90,
        },
        diary: DiaryShape {
            entry_probability_normal: 0.45,
            entry_probability_elevated: 0.25,
            mood_base: 5.2,
            mood_risk_coef: 2.5,
            mood_noise_std: 0.0,
            anxiety_base: 4.0,
            anxiety_risk_coef: 1.5,
            craving_risk_coef: 5.5,
            craving_trigger_coef: 2.0,
            craving_noise_std: 0.0,
            energy_base: 4.5,
            energy_risk_coef: 1.5,
            sleep_quality_divisor: 10.0,
            pain_range: Some((4, 8)),
            word_count: (8, 30),
            trigger_pool: &["loneliness", "missing family", "boredom"],
            triggers_per_entry: (1, 2),
            weekday_trigger: None,
            relapse_tags: &["shame", "regret"],
            early_recovery_tags: &["early recovery"],
            early_recovery_days: 30,
            coping_when_triggered: &["TV", "nap"],
            coping_triggered_count: (2, 2),
            coping_when_calm: &["routine", "walk"],
            coping_calm_count: (2, 2),
            note_style: NoteStyle::Retired,
        },
        chat: ChatShape {
            cadence: ChatCadence::Sparse {
                probability: 0.25,
                post_relapse_probability: 0.6,
            },
            hour_range: (14, 19),
            message_count: (1, 5),
            response_time_hours: (6.0, 24.0),
            sentiment_base: -0.2,
            sentiment_risk_coef: 0.5,
            sentiment_trigger_coef: 0.0,
            sentiment_relapse_penalty: 0.4,
            sentiment_noise_std: 0.0,
            sentiment_clamp: (-0.8, 0.2),
            crisis_risk_threshold: 0.4,
            engagement_base: 4.5,
            engagement_risk_coef: 2.0,
            topics_calm: &["routine", "court", "medication"],
            topics_elevated: &["loneliness", "health", "family"],
            topics_relapse: &["relapse", "support"],
            topics_early_recovery: &["early recovery"],
            early_recovery_days: 30,
        },
        sobriety: SobrietyShape {
            adherence_mean: 0.97,
            adherence_std: 0.02,
            adherence_floor: 0.9,
            meetings_per_week: (2, 4),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_validate() {
        let profiles = builtin_profiles();
        assert_eq!(profiles.len(), 4);
        for profile in &profiles {
            profile.validate().unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn test_builtin_order_is_fixed() {
        let ids: Vec<&str> = builtin_profiles().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec!["sarah_chen", "marcus_rodriguez", "jessica_thompson", "robert_williams"]
        );
    }

    #[test]
    fn test_explosive_phi_rejected() {
        let mut profile = sarah_chen();
        profile.resting_hr.phi = 1.0;
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("phi"));
    }

    #[test]
    fn test_negative_std_rejected() {
        let mut profile = marcus_rodriguez();
        profile.hrv.std = -2.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_zero_survey_cadence_rejected() {
        // cadence_days feeds `t % cadence` in the day loop; zero must be
        // caught here, not surface as a remainder-by-zero panic mid-run
        let mut profile = sarah_chen();
        profile.survey.cadence_days = 0;
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("cadence_days"));
    }

    #[test]
    fn test_zero_recovery_divisor_rejected() {
        let mut profile = marcus_rodriguez();
        profile.survey.recovery_divisor = 0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_inverted_emission_ranges_rejected() {
        let mut profile = sarah_chen();
        profile.diary.word_count = (200, 80);
        assert!(profile.validate().is_err());

        let mut profile = robert_williams();
        profile.chat.hour_range = (19, 14);
        assert!(profile.validate().is_err());

        let mut profile = marcus_rodriguez();
        profile.diary.pain_range = Some((7, 3));
        assert!(profile.validate().is_err());

        let mut profile = jessica_thompson();
        profile.chat.cadence = ChatCadence::Range {
            lo: 9,
            hi: 4,
            post_relapse_bonus: 2,
        };
        assert!(profile.validate().is_err());

        let mut profile = sarah_chen();
        profile.chat.sentiment_clamp = (0.8, -0.8);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_inverted_reset_range_rejected() {
        let mut profile = jessica_thompson();
        profile.relapse.reset_range = (14, 1);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_note_styles_reflect_relapse() {
        for style in [
            NoteStyle::Professional,
            NoteStyle::Veteran,
            NoteStyle::Student,
            NoteStyle::Retired,
        ] {
            let relapse_note = style.render(3, true, false, false);
            let calm_note = style.render(120, false, false, false);
            assert_ne!(relapse_note, calm_note);
        }
    }
}
