//! Typed wire shapes for the agent service.
//!
//! Field names follow the service payloads exactly, including the kebab-case
//! keys, so these structs decode the raw JSON without any remapping layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a queued signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStatus {
    Received,
    Consumed,
}

impl SignalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStatus::Received => "RECEIVED",
            SignalStatus::Consumed => "CONSUMED",
        }
    }
}

impl fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SignalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RECEIVED" => Ok(SignalStatus::Received),
            "CONSUMED" => Ok(SignalStatus::Consumed),
            other => Err(format!("unknown signal status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pending,
    Finished,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalStatus {
    Active,
    Abandoned,
    Satisfied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanStatus {
    Pending,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    Planned,
    Executing,
    Impassed,
    Deferred,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionStatus {
    Current,
    Expired,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Finished => "FINISHED",
            ReportStatus::Failed => "FAILED",
        }
    }
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "ACTIVE",
            GoalStatus::Abandoned => "ABANDONED",
            GoalStatus::Satisfied => "SATISFIED",
        }
    }
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "PENDING",
            PlanStatus::Finished => "FINISHED",
        }
    }
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Planned => "PLANNED",
            StepStatus::Executing => "EXECUTING",
            StepStatus::Impassed => "IMPASSED",
            StepStatus::Deferred => "DEFERRED",
            StepStatus::Finished => "FINISHED",
        }
    }
}

impl OptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionStatus::Current => "CURRENT",
            OptionStatus::Expired => "EXPIRED",
        }
    }
}

/// A memory frame: its id plus every slot/facet/filler triple hanging off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePayload {
    pub id: String,
    pub fillers: Vec<Filler>,
}

/// One slot/facet/filler triple of a frame.
///
/// `kind` is the service's filler classification: `relation/direct`,
/// `relation/inverse`, or `attribute/<text|number|boolean|enum|exec|other>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filler {
    pub slot: String,
    pub facet: String,
    pub filler: Value,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Bookkeeping frame the agenda keeps for a raised signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalAnchor {
    pub anchor: String,
    pub status: SignalStatus,
    /// Nanoseconds since the epoch.
    pub timestamp: u64,
    /// Root frame of the signal contents.
    pub root: String,
    /// Report ids attached while the signal was processed.
    pub reports: Vec<String>,
}

/// Reply of `/api/signal`: the anchor plus the full content frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    #[serde(rename = "signal-anchor")]
    pub anchor: SignalAnchor,
    #[serde(rename = "signal-contents")]
    pub contents: Vec<FramePayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpassePayload {
    pub anchor: String,
    #[serde(rename = "detect-module")]
    pub detect_module: String,
    #[serde(rename = "detect-class")]
    pub detect_class: String,
    /// Source text of the detection executable.
    pub source: String,
    pub resolutions: Vec<ResolutionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionPayload {
    pub anchor: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub anchor: String,
    #[serde(rename = "executable-module")]
    pub executable_module: String,
    #[serde(rename = "executable-class")]
    pub executable_class: String,
    pub status: ReportStatus,
    pub validation: bool,
    /// Nanoseconds since the epoch.
    pub timestamp: u64,
    pub contents: FramePayload,
}

/// Whole-agenda snapshot: goal tree plus decision options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaPayload {
    pub goals: Vec<GoalPayload>,
    pub options: Vec<OptionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPayload {
    pub anchor: String,
    pub status: GoalStatus,
    pub priority: f64,
    pub plans: Vec<PlanPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPayload {
    pub anchor: String,
    pub status: PlanStatus,
    pub cost: f64,
    pub steps: Vec<StepPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepPayload {
    pub anchor: String,
    pub status: StepStatus,
    pub impasses: Vec<String>,
    pub subgoals: Vec<String>,
    pub xmr: Option<String>,
    pub effector: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionPayload {
    pub anchor: String,
    pub goal: String,
    pub plan: String,
    pub step: String,
    /// Nanoseconds since the epoch.
    pub timestamp: u64,
    pub status: OptionStatus,
    pub selected: bool,
    pub score: f64,
}

/// One entry of the knowledge-resource listing returned by `/ontolang/load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeResource {
    pub package: String,
    pub file: String,
    pub loaded: bool,
}

/// Reply of `/ontolang/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntoLangResult {
    pub message: String,
    pub frames: Vec<FramePayload>,
    pub success: bool,
}

/// Speaker of a speech signal.
///
/// Either the id of a frame already in memory, or a bag of attributes the
/// service builds a fresh agent frame from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Speaker {
    Id(String),
    Attributes(serde_json::Map<String, Value>),
}

impl From<&str> for Speaker {
    fn from(id: &str) -> Self {
        Speaker::Id(id.to_string())
    }
}

impl From<String> for Speaker {
    fn from(id: String) -> Self {
        Speaker::Id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_frame_payload_from_service_json() {
        let raw = json!({
            "id": "@TEST.FRAME.1",
            "fillers": [
                {"slot": "AGENT", "facet": "SEM", "filler": "@TEST.HUMAN.1", "type": "relation/direct"},
                {"slot": "VOLUME", "facet": "VALUE", "filler": 0.5, "type": "attribute/number"}
            ]
        });

        let frame: FramePayload = serde_json::from_value(raw).unwrap();
        assert_eq!(frame.id, "@TEST.FRAME.1");
        assert_eq!(frame.fillers.len(), 2);
        assert_eq!(frame.fillers[0].kind, "relation/direct");
        assert_eq!(frame.fillers[1].filler, json!(0.5));
    }

    #[test]
    fn test_signal_payload_kebab_keys() {
        let raw = json!({
            "signal-anchor": {
                "anchor": "@IO.SIGNAL.1",
                "status": "RECEIVED",
                "timestamp": 1_600_000_000_000_000_000u64,
                "root": "@IO.SPEAK.1",
                "reports": ["@EXE.SYSTEM-REPORT.1"]
            },
            "signal-contents": [
                {"id": "@IO.SPEAK.1", "fillers": []}
            ]
        });

        let signal: SignalPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(signal.anchor.status, SignalStatus::Received);
        assert_eq!(signal.anchor.reports.len(), 1);
        assert_eq!(signal.contents[0].id, "@IO.SPEAK.1");
    }

    #[test]
    fn test_impasse_payload_kebab_keys() {
        let raw = json!({
            "anchor": "@EXE.IMPASSE.1",
            "detect-module": "agent.impasses",
            "detect-class": "MissingEffectorImpasse",
            "source": "class MissingEffectorImpasse:\n    pass\n",
            "resolutions": [
                {"anchor": "@EXE.RESOLUTION.1", "goal": "@EXE.GOAL.2"}
            ]
        });

        let impasse: ImpassePayload = serde_json::from_value(raw).unwrap();
        assert_eq!(impasse.detect_class, "MissingEffectorImpasse");
        assert_eq!(impasse.resolutions[0].goal, "@EXE.GOAL.2");
    }

    #[test]
    fn test_report_payload() {
        let raw = json!({
            "anchor": "@EXE.SYSTEM-REPORT.1",
            "executable-module": "agent.effectors",
            "executable-class": "SpeakEffector",
            "status": "FINISHED",
            "validation": true,
            "timestamp": 1_600_000_000_000_000_000u64,
            "contents": {"id": "@EXE.REPORT-CONTENT.1", "fillers": []}
        });

        let report: ReportPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(report.status, ReportStatus::Finished);
        assert!(report.validation);
        assert_eq!(report.contents.id, "@EXE.REPORT-CONTENT.1");
    }

    #[test]
    fn test_agenda_payload_nested_tree() {
        let raw = json!({
            "goals": [{
                "anchor": "@EXE.GOAL.1",
                "status": "ACTIVE",
                "priority": 0.75,
                "plans": [{
                    "anchor": "@EXE.PLAN.1",
                    "status": "PENDING",
                    "cost": 0.25,
                    "steps": [{
                        "anchor": "@EXE.STEP.1",
                        "status": "EXECUTING",
                        "impasses": [],
                        "subgoals": ["@EXE.GOAL.2"],
                        "xmr": null,
                        "effector": "@EXE.EFFECTOR.1"
                    }]
                }]
            }],
            "options": [{
                "anchor": "@EXE.OPTION.1",
                "goal": "@EXE.GOAL.1",
                "plan": "@EXE.PLAN.1",
                "step": "@EXE.STEP.1",
                "timestamp": 1_600_000_000_000_000_000u64,
                "status": "CURRENT",
                "selected": false,
                "score": 0.5
            }]
        });

        let agenda: AgendaPayload = serde_json::from_value(raw).unwrap();
        let step = &agenda.goals[0].plans[0].steps[0];
        assert_eq!(step.status, StepStatus::Executing);
        assert_eq!(step.xmr, None);
        assert_eq!(step.effector.as_deref(), Some("@EXE.EFFECTOR.1"));
        assert_eq!(agenda.options[0].status, OptionStatus::Current);
        assert!(!agenda.options[0].selected);
    }

    #[test]
    fn test_speaker_serializes_as_plain_id() {
        let speaker = Speaker::from("@TEST.HUMAN.1");
        let json = serde_json::to_value(&speaker).unwrap();

        assert_eq!(json, json!("@TEST.HUMAN.1"));
    }

    #[test]
    fn test_speaker_serializes_as_attribute_map() {
        let mut attributes = serde_json::Map::new();
        attributes.insert("NAME".to_string(), json!("Jake"));
        let speaker = Speaker::Attributes(attributes);

        let json = serde_json::to_value(&speaker).unwrap();
        assert_eq!(json, json!({"NAME": "Jake"}));
    }

    #[test]
    fn test_signal_status_parsing() {
        assert_eq!("received".parse::<SignalStatus>(), Ok(SignalStatus::Received));
        assert_eq!("CONSUMED".parse::<SignalStatus>(), Ok(SignalStatus::Consumed));
        assert!("EXPIRED".parse::<SignalStatus>().is_err());
    }

    #[test]
    fn test_status_enums_use_wire_names() {
        assert_eq!(serde_json::to_value(StepStatus::Impassed).unwrap(), json!("IMPASSED"));
        assert_eq!(serde_json::to_value(GoalStatus::Satisfied).unwrap(), json!("SATISFIED"));
        assert_eq!(serde_json::to_value(ReportStatus::Failed).unwrap(), json!("FAILED"));
        assert_eq!(serde_json::to_value(PlanStatus::Finished).unwrap(), json!("FINISHED"));
    }
}
