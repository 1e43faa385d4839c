//! Declarative transition and animation configs.
//!
//! These are attached to graph nodes and links by the application and read
//! by the transition resolver. The serde shape is the stable wire format:
//!
//! ```json
//! {
//!   "trigger": "enter",
//!   "configs": [{ "delay": 0, "duration": 300, "easing": "ease-in", "from": { "opacity": 0 } }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::value::{Property, PropertyMap};

/// Structural event a config reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Enter,
    Update,
    Leave,
}

fn default_duration() -> f64 {
    300.0
}

/// One transition: timing plus either endpoints or a property allow-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionConfig {
    #[serde(default)]
    pub delay: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub easing: Easing,
    /// Update trigger only: restrict the diff to these properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<PropertyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<PropertyMap>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            delay: 0.0,
            duration: default_duration(),
            easing: Easing::Linear,
            properties: None,
            from: None,
            to: None,
        }
    }
}

impl TransitionConfig {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn from(mut self, property: Property, value: impl Into<crate::Value>) -> Self {
        self.from
            .get_or_insert_with(PropertyMap::new)
            .insert(property, value.into());
        self
    }

    pub fn to(mut self, property: Property, value: impl Into<crate::Value>) -> Self {
        self.to
            .get_or_insert_with(PropertyMap::new)
            .insert(property, value.into());
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.properties = Some(properties.into_iter().collect());
        self
    }
}

/// Transitions of one element for one trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTransition {
    pub trigger: Trigger,
    #[serde(default)]
    pub configs: Vec<TransitionConfig>,
}

impl NodeTransition {
    pub fn new(trigger: Trigger, configs: impl IntoIterator<Item = TransitionConfig>) -> Self {
        Self {
            trigger,
            configs: configs.into_iter().collect(),
        }
    }
}

/// One keyframe of an [`AnimationConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationFrame {
    /// Offset in `[0, 1]`; frames without one are spread evenly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Easing of the segment starting at this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
    #[serde(default)]
    pub properties: PropertyMap,
}

/// Keyframe animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    #[serde(default)]
    pub delay: f64,
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub frames: Vec<AnimationFrame>,
}

/// Keyframe animations of one element for one trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAnimation {
    pub trigger: Trigger,
    #[serde(default)]
    pub configs: Vec<AnimationConfig>,
}

/// True if the transitions or animations would produce at least one leave tween.
pub fn has_leave_animations(transitions: &[NodeTransition], animations: &[NodeAnimation]) -> bool {
    let leave_transition = transitions
        .iter()
        .filter(|t| t.trigger == Trigger::Leave)
        .flat_map(|t| &t.configs)
        .any(|c| c.to.as_ref().is_some_and(|to| !to.is_empty()));
    let leave_animation = animations
        .iter()
        .filter(|a| a.trigger == Trigger::Leave)
        .flat_map(|a| &a.configs)
        .any(|c| c.frames.iter().any(|f| !f.properties.is_empty()));
    leave_transition || leave_animation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_transition_wire_format() {
        let json = r#"{
            "trigger": "update",
            "configs": [{ "duration": 200, "easing": "ease-in", "properties": ["y"] }]
        }"#;
        let transition: NodeTransition = serde_json::from_str(json).unwrap();
        assert_eq!(transition.trigger, Trigger::Update);
        let config = &transition.configs[0];
        assert_eq!(config.delay, 0.0);
        assert_eq!(config.duration, 200.0);
        assert_eq!(config.easing, Easing::EaseIn);
        assert_eq!(config.properties.as_deref(), Some(&[Property::Y][..]));
    }

    #[test]
    fn test_builder() {
        let config = TransitionConfig::new(300.0).from(Property::Opacity, 0.0);
        assert_eq!(
            config.from.unwrap().get(&Property::Opacity),
            Some(&Value::Number(0.0))
        );
        assert!(config.to.is_none());
    }

    #[test]
    fn test_has_leave_animations() {
        let leave = NodeTransition::new(
            Trigger::Leave,
            [TransitionConfig::new(300.0).to(Property::Opacity, 0.0)],
        );
        assert!(has_leave_animations(&[leave], &[]));

        // a leave config without `to` never yields a tween
        let empty = NodeTransition::new(Trigger::Leave, [TransitionConfig::new(300.0)]);
        assert!(!has_leave_animations(&[empty], &[]));

        let enter = NodeTransition::new(
            Trigger::Enter,
            [TransitionConfig::new(300.0).to(Property::Opacity, 0.0)],
        );
        assert!(!has_leave_animations(&[enter], &[]));
    }
}
