use crate::input::keybindings::Shortcut;
use crate::model::ordering::OrderBy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Menu configuration
///
/// Every field has a default, so `{}` is a complete configuration. Field names
/// follow Rust conventions; the widget-attribute spellings (`menuposition`,
/// `showonhover`, `itemlabel`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MenuConfig {
    /// Widget name used in the named-widget registry (e.g., "mainMenu")
    #[serde(default)]
    pub name: Option<String>,

    /// Where the dropdown opens relative to its trigger
    #[serde(default, alias = "menuposition")]
    pub menu_position: MenuPosition,

    /// How items are laid out inside the dropdown
    #[serde(default, alias = "menulayout")]
    pub menu_layout: MenuLayout,

    /// Horizontal alignment of the dropdown against the trigger
    #[serde(default, alias = "menualign")]
    pub menu_align: MenuAlign,

    /// Open the menu and its submenus on pointer hover instead of click
    #[serde(default, alias = "showonhover")]
    pub show_on_hover: bool,

    /// When the menu opens without user interaction
    #[serde(default, alias = "autoopen")]
    pub auto_open: AutoOpen,

    /// When the menu closes on its own
    #[serde(default, alias = "autoclose")]
    pub auto_close: AutoClose,

    /// Global accelerator toggling the menu (e.g., "ctrl+m", "alt+f")
    #[serde(default, alias = "shortcutkey")]
    pub shortcut_key: Option<String>,

    /// Text direction of the host page
    #[serde(default)]
    pub direction: TextDirection,

    /// Record field holding the display label
    #[serde(default = "default_label_field", alias = "itemlabel")]
    pub item_label: String,

    /// Record field holding the icon name
    #[serde(default = "default_icon_field", alias = "itemicon")]
    pub item_icon: String,

    /// Record field holding the navigation target
    #[serde(default = "default_link_field", alias = "itemlink")]
    pub item_link: String,

    /// Record field holding nested child records
    #[serde(default = "default_children_field", alias = "itemchildren")]
    pub item_children: String,

    /// Ordering directive, `field:asc|desc[,field:asc|desc,...]`
    #[serde(default, alias = "orderby")]
    pub order_by: Option<String>,

    /// Record field holding the selection value (falls back to the label)
    #[serde(default = "default_value_field", alias = "datavalue")]
    pub data_value: String,

    /// Keep expanded submenus expanded across dataset rebuilds
    #[serde(default)]
    pub preserve_expansion: bool,

    /// Hover-intent timing
    #[serde(default)]
    pub hover: HoverConfig,
}

fn default_label_field() -> String {
    "label".to_string()
}

fn default_icon_field() -> String {
    "icon".to_string()
}

fn default_link_field() -> String {
    "link".to_string()
}

fn default_children_field() -> String {
    "children".to_string()
}

fn default_value_field() -> String {
    "value".to_string()
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            name: None,
            menu_position: MenuPosition::default(),
            menu_layout: MenuLayout::default(),
            menu_align: MenuAlign::default(),
            show_on_hover: false,
            auto_open: AutoOpen::default(),
            auto_close: AutoClose::default(),
            shortcut_key: None,
            direction: TextDirection::default(),
            item_label: default_label_field(),
            item_icon: default_icon_field(),
            item_link: default_link_field(),
            item_children: default_children_field(),
            order_by: None,
            data_value: default_value_field(),
            preserve_expansion: false,
            hover: HoverConfig::default(),
        }
    }
}

/// Hover-intent delays in milliseconds. Zero means the transition is applied
/// synchronously without scheduling a timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HoverConfig {
    /// Delay before a hovered node counts as hovered
    #[serde(default)]
    pub enter_delay_ms: u64,
    /// Grace delay before a left node stops counting as hovered
    #[serde(default)]
    pub leave_delay_ms: u64,
}

impl HoverConfig {
    pub fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }

    pub fn leave_delay(&self) -> Duration {
        Duration::from_millis(self.leave_delay_ms)
    }
}

/// Vertical direction in which the dropdown opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Down,
    Up,
}

/// Horizontal direction in which submenus open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Right,
    Left,
}

/// Open-position of the dropdown: `(vertical, horizontal)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MenuPosition {
    #[default]
    #[serde(rename = "down,right")]
    DownRight,
    #[serde(rename = "down,left")]
    DownLeft,
    #[serde(rename = "up,right")]
    UpRight,
    #[serde(rename = "up,left")]
    UpLeft,
}

impl MenuPosition {
    pub fn vertical(self) -> Vertical {
        match self {
            MenuPosition::DownRight | MenuPosition::DownLeft => Vertical::Down,
            MenuPosition::UpRight | MenuPosition::UpLeft => Vertical::Up,
        }
    }

    pub fn horizontal(self) -> Horizontal {
        match self {
            MenuPosition::DownRight | MenuPosition::UpRight => Horizontal::Right,
            MenuPosition::DownLeft | MenuPosition::UpLeft => Horizontal::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MenuLayout {
    #[default]
    Vertical,
    Horizontal,
    Grid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MenuAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Auto-open policy, evaluated once when the menu is mounted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AutoOpen {
    #[default]
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "always")]
    Always,
    /// Open when some node links to the current location
    #[serde(rename = "activePage", alias = "activepage")]
    ActivePage,
}

/// Auto-close policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AutoClose {
    /// Only explicit toggles, Escape and Tab close the menu
    #[serde(rename = "never")]
    Never,
    /// Outside clicks and leaf activation close the menu
    #[default]
    #[serde(rename = "always")]
    Always,
    /// Outside clicks close the menu, leaf activation does not
    #[serde(rename = "outsideClick", alias = "outsideclick")]
    OutsideClick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl MenuConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_json_str(&contents)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: MenuConfig =
            serde_json::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Err(e) = config.validate() {
            tracing::warn!("Rejecting menu config: {}", e);
            return Err(e);
        }

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Parsed shortcut accelerator, if one is configured
    pub fn shortcut(&self) -> Result<Option<Shortcut>, ConfigError> {
        match self.shortcut_key.as_deref() {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => Shortcut::parse(s)
                .map(Some)
                .map_err(|e| ConfigError::ValidationError(e.to_string())),
        }
    }

    /// Parsed ordering directive, if one is configured
    pub fn ordering(&self) -> Result<Option<OrderBy>, ConfigError> {
        match self.order_by.as_deref() {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => OrderBy::parse(s)
                .map(Some)
                .map_err(|e| ConfigError::ValidationError(e.to_string())),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_label.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "item_label must name a record field".to_string(),
            ));
        }
        if self.item_children.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "item_children must name a record field".to_string(),
            ));
        }
        self.shortcut()?;
        self.ordering()?;
        Ok(())
    }

    /// JSON Schema of the configuration, for editors and validation tools
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(MenuConfig);
        serde_json::to_value(&schema).unwrap_or(serde_json::Value::Null)
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
