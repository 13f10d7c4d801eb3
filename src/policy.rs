//! Rule table turning current ward conditions into policy actions.

use serde::{Deserialize, Serialize};

/// Source attribution shares for a ward, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceShares {
    pub vehicular: f64,
    pub construction: f64,
    pub industrial: f64,
    pub waste_burning: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    High,
    Medium,
    Low,
}

impl ActionPriority {
    /// Storage form; matches the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A recommended intervention for a ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub priority: ActionPriority,
    pub estimated_impact: String,
}

/// Generate the action list for a ward from its latest AQI, category and
/// source attribution. The thresholds and wording are fixed; the health
/// advisory is always present and escalates with severe AQI.
pub fn recommend_actions(aqi: f64, category: &str, sources: SourceShares) -> Vec<PolicyAction> {
    let mut actions = Vec::new();

    if aqi >= 300.0 {
        actions.push(PolicyAction {
            kind: "traffic".to_string(),
            title: "Implement Odd-Even Vehicle Restriction".to_string(),
            description: "Restrict vehicle movement based on registration numbers during \
                          peak hours (8 AM - 8 PM)"
                .to_string(),
            priority: ActionPriority::High,
            estimated_impact: "Expected 15-20% reduction in vehicular emissions".to_string(),
        });
    }

    if sources.construction > 20.0 {
        actions.push(PolicyAction {
            kind: "construction".to_string(),
            title: "Suspend Construction Activities".to_string(),
            description: "Temporarily halt all non-essential construction work until AQI \
                          improves below 200"
                .to_string(),
            priority: ActionPriority::High,
            estimated_impact: "Immediate 20-25% reduction in PM10 and PM2.5".to_string(),
        });
    }

    if sources.vehicular > 50.0 {
        actions.push(PolicyAction {
            kind: "sweeping".to_string(),
            title: "Intensify Mechanical Road Sweeping".to_string(),
            description: "Deploy additional mechanical sweepers on major arterial roads \
                          twice daily"
                .to_string(),
            priority: ActionPriority::Medium,
            estimated_impact: "Reduction in road dust resuspension by 30%".to_string(),
        });
    }

    if aqi >= 250.0 {
        actions.push(PolicyAction {
            kind: "enforcement".to_string(),
            title: "Strengthen Pollution Control Enforcement".to_string(),
            description: "Increase monitoring and penalize violations of construction dust \
                          norms and vehicle emissions"
                .to_string(),
            priority: ActionPriority::High,
            estimated_impact: "Improved compliance and 10-15% emission reduction".to_string(),
        });
    }

    actions.push(PolicyAction {
        kind: "health".to_string(),
        title: "Issue Health Advisory".to_string(),
        description: format!(
            "Alert citizens about {category} air quality. Advise vulnerable groups to \
             avoid outdoor activities"
        ),
        priority: if aqi >= 300.0 {
            ActionPriority::High
        } else {
            ActionPriority::Medium
        },
        estimated_impact: "Public awareness and health protection".to_string(),
    });

    actions
}
