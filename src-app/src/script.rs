//! Event scripts replayed against a reading surface

use reading_engine::{SurfaceEvent, Viewport};
use reading_model::Document;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One event delivered at a host timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    pub event: SurfaceEvent,
}

/// A document plus a timed sequence of host events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Viewport,
    pub document: Document,
    pub steps: Vec<Step>,
    /// Time to advance to after the last step so pending timers can fire
    #[serde(default)]
    pub end_ms: Option<u64>,
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Steps must be given in time order
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(pair) = self.steps.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            anyhow::bail!(
                "step at {}ms comes after a step at {}ms",
                pair[1].at_ms,
                pair[0].at_ms
            );
        }
        Ok(())
    }

    pub fn end_ms(&self) -> u64 {
        let last = self.steps.last().map(|s| s.at_ms).unwrap_or(0);
        self.end_ms.unwrap_or(last).max(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_script_parses() {
        let script: Script =
            serde_json::from_str(include_str!("../scripts/highlight.json")).unwrap();
        script.validate().unwrap();
        assert_eq!(script.document.title, "The Beginning of Infinity");
        assert!(!script.steps.is_empty());
        assert_eq!(script.end_ms(), 5000);
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let json = r#"{
            "document": { "title": "Book", "paragraphs": ["One"] },
            "steps": [
                { "at_ms": 100, "event": { "type": "tap" } },
                { "at_ms": 50, "event": { "type": "tap" } }
            ]
        }"#;
        let script: Script = serde_json::from_str(json).unwrap();
        assert!(script.validate().is_err());
        assert_eq!(script.viewport, Viewport::default());
    }
}
