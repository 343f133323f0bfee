//! Tour configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a click on the overlay does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayClickBehavior {
    #[default]
    Close,
    NextStep,
}

impl OverlayClickBehavior {
    pub fn name(self) -> &'static str {
        match self {
            OverlayClickBehavior::Close => "close",
            OverlayClickBehavior::NextStep => "nextStep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopoverButton {
    Next,
    Previous,
    Close,
}

impl PopoverButton {
    pub fn name(self) -> &'static str {
        match self {
            PopoverButton::Next => "next",
            PopoverButton::Previous => "previous",
            PopoverButton::Close => "close",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "next" => Some(PopoverButton::Next),
            "previous" => Some(PopoverButton::Previous),
            "close" => Some(PopoverButton::Close),
            _ => None,
        }
    }
}

/// A config value as seen through [`Config::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tour config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown config option '{0}'")]
    UnknownOption(String),

    #[error("config option '{option}' expects {expected}")]
    TypeMismatch {
        option: String,
        expected: &'static str,
    },
}

/// Tour options.
///
/// Options that are `Option` are unset by default and read through an
/// accessor that applies the fallback, so [`Config::get`] can still tell
/// "unset" apart from an explicit value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Config {
    pub animate: bool,
    pub allow_close: bool,
    pub overlay_click_behavior: OverlayClickBehavior,
    pub overlay_color: String,
    pub overlay_opacity: f64,
    pub smooth_scroll: bool,
    /// Block pointer interaction with the highlighted element.
    pub disable_active_interaction: bool,
    pub show_progress: bool,
    pub stage_padding: u32,
    pub stage_radius: u32,
    pub popover_offset: u32,
    pub popover_class: Option<String>,
    pub show_buttons: Vec<PopoverButton>,
    pub disable_buttons: Vec<PopoverButton>,
    /// Translate Escape / ArrowLeft / ArrowRight into tour commands.
    /// Unset means enabled.
    pub allow_keyboard_control: Option<bool>,
    pub progress_text: Option<String>,
    pub next_btn_text: Option<String>,
    pub prev_btn_text: Option<String>,
    pub done_btn_text: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animate: true,
            allow_close: true,
            overlay_click_behavior: OverlayClickBehavior::Close,
            overlay_color: "#000".to_string(),
            overlay_opacity: 0.7,
            smooth_scroll: false,
            disable_active_interaction: false,
            show_progress: false,
            stage_padding: 10,
            stage_radius: 5,
            popover_offset: 10,
            popover_class: None,
            show_buttons: vec![
                PopoverButton::Next,
                PopoverButton::Previous,
                PopoverButton::Close,
            ],
            disable_buttons: Vec::new(),
            allow_keyboard_control: None,
            progress_text: None,
            next_btn_text: None,
            prev_btn_text: None,
            done_btn_text: None,
        }
    }
}

const DEFAULT_PROGRESS_TEXT: &str = "{{current}} of {{total}}";

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of options. Missing options take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable or disable keyboard control.
    pub fn allow_keyboard(mut self, allow: bool) -> Self {
        self.allow_keyboard_control = Some(allow);
        self
    }

    pub fn allow_keyboard_control(&self) -> bool {
        self.allow_keyboard_control.unwrap_or(true)
    }

    pub fn progress_text(&self) -> &str {
        self.progress_text.as_deref().unwrap_or(DEFAULT_PROGRESS_TEXT)
    }

    /// Look up an option by its camelCase name. `None` for unset options
    /// and unknown names.
    pub fn get(&self, option: &str) -> Option<ConfigValue> {
        let text = |v: &Option<String>| v.clone().map(ConfigValue::Text);
        let buttons = |v: &[PopoverButton]| {
            ConfigValue::List(v.iter().map(|b| b.name().to_string()).collect())
        };

        let value = match option {
            "animate" => ConfigValue::Bool(self.animate),
            "allowClose" => ConfigValue::Bool(self.allow_close),
            "overlayClickBehavior" => {
                ConfigValue::Text(self.overlay_click_behavior.name().to_string())
            }
            "overlayColor" => ConfigValue::Text(self.overlay_color.clone()),
            "overlayOpacity" => ConfigValue::Number(self.overlay_opacity),
            "smoothScroll" => ConfigValue::Bool(self.smooth_scroll),
            "disableActiveInteraction" => ConfigValue::Bool(self.disable_active_interaction),
            "showProgress" => ConfigValue::Bool(self.show_progress),
            "stagePadding" => ConfigValue::Number(self.stage_padding.into()),
            "stageRadius" => ConfigValue::Number(self.stage_radius.into()),
            "popoverOffset" => ConfigValue::Number(self.popover_offset.into()),
            "popoverClass" => return text(&self.popover_class),
            "showButtons" => buttons(&self.show_buttons),
            "disableButtons" => buttons(&self.disable_buttons),
            "allowKeyboardControl" => return self.allow_keyboard_control.map(ConfigValue::Bool),
            "progressText" => return text(&self.progress_text),
            "nextBtnText" => return text(&self.next_btn_text),
            "prevBtnText" => return text(&self.prev_btn_text),
            "doneBtnText" => return text(&self.done_btn_text),
            _ => return None,
        };
        Some(value)
    }

    /// Set an option by its camelCase name.
    pub fn set(&mut self, option: &str, value: ConfigValue) -> Result<(), ConfigError> {
        let mismatch = |expected| ConfigError::TypeMismatch {
            option: option.to_string(),
            expected,
        };

        match (option, value) {
            ("animate", ConfigValue::Bool(v)) => self.animate = v,
            ("allowClose", ConfigValue::Bool(v)) => self.allow_close = v,
            ("smoothScroll", ConfigValue::Bool(v)) => self.smooth_scroll = v,
            ("disableActiveInteraction", ConfigValue::Bool(v)) => {
                self.disable_active_interaction = v
            }
            ("showProgress", ConfigValue::Bool(v)) => self.show_progress = v,
            ("allowKeyboardControl", ConfigValue::Bool(v)) => {
                self.allow_keyboard_control = Some(v)
            }
            (
                "animate" | "allowClose" | "smoothScroll" | "disableActiveInteraction"
                | "showProgress" | "allowKeyboardControl",
                _,
            ) => return Err(mismatch("a boolean")),

            ("overlayOpacity", ConfigValue::Number(v)) => self.overlay_opacity = v,
            ("stagePadding", ConfigValue::Number(v)) => self.stage_padding = to_u32(v, mismatch)?,
            ("stageRadius", ConfigValue::Number(v)) => self.stage_radius = to_u32(v, mismatch)?,
            ("popoverOffset", ConfigValue::Number(v)) => {
                self.popover_offset = to_u32(v, mismatch)?
            }
            ("overlayOpacity" | "stagePadding" | "stageRadius" | "popoverOffset", _) => {
                return Err(mismatch("a number"));
            }

            ("overlayClickBehavior", ConfigValue::Text(v)) => {
                self.overlay_click_behavior = match v.as_str() {
                    "close" => OverlayClickBehavior::Close,
                    "nextStep" => OverlayClickBehavior::NextStep,
                    _ => return Err(mismatch("\"close\" or \"nextStep\"")),
                }
            }
            ("overlayColor", ConfigValue::Text(v)) => self.overlay_color = v,
            ("popoverClass", ConfigValue::Text(v)) => self.popover_class = Some(v),
            ("progressText", ConfigValue::Text(v)) => self.progress_text = Some(v),
            ("nextBtnText", ConfigValue::Text(v)) => self.next_btn_text = Some(v),
            ("prevBtnText", ConfigValue::Text(v)) => self.prev_btn_text = Some(v),
            ("doneBtnText", ConfigValue::Text(v)) => self.done_btn_text = Some(v),
            (
                "overlayClickBehavior" | "overlayColor" | "popoverClass" | "progressText"
                | "nextBtnText" | "prevBtnText" | "doneBtnText",
                _,
            ) => return Err(mismatch("a string")),

            ("showButtons" | "disableButtons", ConfigValue::List(names)) => {
                let parsed = names
                    .iter()
                    .map(|n| PopoverButton::from_name(n))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| mismatch("a list of next/previous/close"))?;
                if option == "showButtons" {
                    self.show_buttons = parsed;
                } else {
                    self.disable_buttons = parsed;
                }
            }
            ("showButtons" | "disableButtons", _) => {
                return Err(mismatch("a list of next/previous/close"));
            }

            (other, _) => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}

fn to_u32(
    v: f64,
    mismatch: impl FnOnce(&'static str) -> ConfigError,
) -> Result<u32, ConfigError> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Ok(v as u32)
    } else {
        Err(mismatch("a non-negative whole number"))
    }
}
