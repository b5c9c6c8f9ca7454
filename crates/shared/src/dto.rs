//! Wire-format DTOs
//!
//! Field names follow the JSON the browser client and the template files
//! already use (`totalHP`, `currentHP`, `imageUrl`).

use serde::{Deserialize, Serialize};

use vdm_domain::{
    Combatant, CombatantTemplate, DomainError, Faction, HealthBand, HpChange, PortraitRef,
    TemplateCategory, TemplatesByCategory, TurnOrder,
};

fn default_ally() -> bool {
    true
}

// =============================================================================
// Templates
// =============================================================================

/// One entry of a template file, and the body of "load premade".
///
/// Template files hold a JSON array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    pub name: String,
    #[serde(rename = "totalHP")]
    pub total_hp: i64,
    #[serde(default = "default_ally")]
    pub ally: bool,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TryFrom<TemplateData> for CombatantTemplate {
    type Error = DomainError;

    fn try_from(data: TemplateData) -> Result<Self, Self::Error> {
        CombatantTemplate::new(
            data.name,
            data.total_hp,
            Faction::from_ally_flag(data.ally),
            data.image_url.and_then(PortraitRef::parse),
        )
    }
}

impl From<&CombatantTemplate> for TemplateData {
    fn from(template: &CombatantTemplate) -> Self {
        Self {
            name: template.name().to_string(),
            total_hp: i64::from(template.total_hp()),
            ally: template.is_ally(),
            image_url: template.portrait().map(|p| p.to_string()),
        }
    }
}

/// A template together with the category it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTemplateData {
    #[serde(flatten)]
    pub template: TemplateData,
    pub category: TemplateCategory,
}

impl StoredTemplateData {
    pub fn new(template: &CombatantTemplate, category: TemplateCategory) -> Self {
        Self {
            template: TemplateData::from(template),
            category,
        }
    }
}

/// Templates grouped the way the load dialog shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokensByCategory {
    pub default: Vec<TemplateData>,
    pub custom: Vec<TemplateData>,
}

impl From<&TemplatesByCategory> for TokensByCategory {
    fn from(grouped: &TemplatesByCategory) -> Self {
        Self {
            default: grouped.default.iter().map(TemplateData::from).collect(),
            custom: grouped.custom.iter().map(TemplateData::from).collect(),
        }
    }
}

// =============================================================================
// Tracker
// =============================================================================

/// Colour band for an HP bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBandData {
    Healthy,
    Wounded,
    Critical,
}

impl From<HealthBand> for HealthBandData {
    fn from(band: HealthBand) -> Self {
        match band {
            HealthBand::Healthy => Self::Healthy,
            HealthBand::Wounded => Self::Wounded,
            HealthBand::Critical => Self::Critical,
        }
    }
}

/// One combatant as the tracker displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenView {
    pub index: usize,
    pub name: String,
    #[serde(rename = "currentHP")]
    pub current_hp: u32,
    #[serde(rename = "totalHP")]
    pub total_hp: u32,
    pub initiative: i32,
    pub ally: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub hp_percentage: f64,
    pub health_band: HealthBandData,
    pub is_dead: bool,
}

impl TokenView {
    pub fn new(index: usize, combatant: &Combatant) -> Self {
        let hp = combatant.hit_points();
        Self {
            index,
            name: combatant.name().to_string(),
            current_hp: hp.current(),
            total_hp: hp.total(),
            initiative: combatant.initiative(),
            ally: combatant.is_ally(),
            image_url: combatant.portrait().map(|p| p.to_string()),
            hp_percentage: hp.percentage(),
            health_band: hp.band().into(),
            is_dead: combatant.is_dead(),
        }
    }
}

/// Full tracker state returned by every tracker endpoint.
///
/// `roster`, `allies` and `enemies` hold indices into `tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerView {
    pub tokens: Vec<TokenView>,
    pub current_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<TokenView>,
    pub roster: Vec<usize>,
    pub allies: Vec<usize>,
    pub enemies: Vec<usize>,
}

impl From<&TurnOrder> for TrackerView {
    fn from(order: &TurnOrder) -> Self {
        let tokens: Vec<TokenView> = order
            .combatants()
            .iter()
            .enumerate()
            .map(|(index, combatant)| TokenView::new(index, combatant))
            .collect();
        let current = tokens.get(order.cursor()).cloned();
        Self {
            current_index: order.cursor(),
            current,
            roster: order.roster().iter().map(|e| e.index).collect(),
            allies: order.allies().iter().map(|e| e.index).collect(),
            enemies: order.enemies().iter().map(|e| e.index).collect(),
            tokens,
        }
    }
}

/// What an HP mutation did, so a client can pick a damage or heal cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HpChangeData {
    Unchanged {
        hp: u32,
    },
    Damaged {
        amount: u32,
        #[serde(rename = "remainingHP")]
        remaining_hp: u32,
    },
    Downed {
        amount: u32,
    },
    Healed {
        amount: u32,
        #[serde(rename = "newHP")]
        new_hp: u32,
    },
    Revived {
        #[serde(rename = "newHP")]
        new_hp: u32,
    },
}

impl From<HpChange> for HpChangeData {
    fn from(change: HpChange) -> Self {
        match change {
            HpChange::Unchanged { hp } => Self::Unchanged { hp },
            HpChange::Damaged {
                amount,
                remaining_hp,
            } => Self::Damaged {
                amount,
                remaining_hp,
            },
            HpChange::Downed { amount } => Self::Downed { amount },
            HpChange::Healed { amount, new_hp } => Self::Healed { amount, new_hp },
            HpChange::Revived { new_hp } => Self::Revived { new_hp },
        }
    }
}
