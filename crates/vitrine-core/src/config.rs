//! Storefront configuration.
//!
//! Every field has a default matching the markup and endpoints the storefront
//! server renders, so an empty document is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vitrine_observability::LoggingConfig;

use crate::error::ConfigError;
use crate::ids::{CartItemId, ProductId};
use crate::money::Currency;

/// Placeholder substituted by the identifier in endpoint templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Currency of the totals the server reports.
    pub currency: Currency,
    /// Cart API endpoints.
    pub endpoints: EndpointConfig,
    /// CSS selectors and class names of the DOM contract.
    pub selectors: SelectorConfig,
    /// Animation and auto-hide timings.
    pub timings: TimingConfig,
    /// User-facing texts.
    pub messages: MessageConfig,
    /// Mutation behaviour.
    pub mutations: MutationConfig,
    /// In-page event names.
    pub events: EventConfig,
    /// Diagnostics.
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        if path.ends_with(".json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoints.validate()
    }
}

/// Cart API endpoints. Item endpoints are templates containing `{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Prepended to every path. The browser build leaves it unset (same origin).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Add-to-cart template, keyed by product id.
    pub add_item: String,
    /// Update-quantity template, keyed by cart item id.
    pub update_item: String,
    /// Remove-item template, keyed by cart item id.
    pub remove_item: String,
    /// Cart count path.
    pub cart_count: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            add_item: "/adicionar-carrinho/{id}".to_string(),
            update_item: "/atualizar-carrinho/{id}".to_string(),
            remove_item: "/remover-carrinho/{id}".to_string(),
            cart_count: "/api/carrinho/count".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Path of the add-to-cart call for `product`.
    pub fn add_item_path(&self, product: &ProductId) -> String {
        self.add_item.replace(ID_PLACEHOLDER, product.as_str())
    }

    /// Path of the update-quantity call for `item`.
    pub fn update_item_path(&self, item: &CartItemId) -> String {
        self.update_item.replace(ID_PLACEHOLDER, item.as_str())
    }

    /// Path of the remove-item call for `item`.
    pub fn remove_item_path(&self, item: &CartItemId) -> String {
        self.remove_item.replace(ID_PLACEHOLDER, item.as_str())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let templates = [
            ("add_item", &self.add_item),
            ("update_item", &self.update_item),
            ("remove_item", &self.remove_item),
        ];
        for (name, template) in templates {
            if !template.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::MissingPlaceholder {
                    name,
                    template: template.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Selectors and class names the runtime binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub gallery_thumb: String,
    pub gallery_main: String,
    pub quantity_button: String,
    pub quantity_group: String,
    pub quantity_input: String,
    /// Class (not selector) marking a decrement button.
    pub decrement_class: String,
    /// Class (not selector) marking an increment button.
    pub increment_class: String,
    pub add_to_cart: String,
    pub product_actions: String,
    pub cart_quantity: String,
    pub remove_item: String,
    pub cart_row: String,
    pub cart_total: String,
    /// Element id of the count badge.
    pub cart_count_id: String,
    pub cart_icon: String,
    /// Element id of the shared toast.
    pub toast_id: String,
    pub toast_header: String,
    pub toast_body: String,
    pub confirm: String,
    pub validated_form: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            gallery_thumb: ".produto-thumb".to_string(),
            gallery_main: ".produto-img-principal".to_string(),
            quantity_button: ".btn-quantidade".to_string(),
            quantity_group: ".input-group".to_string(),
            quantity_input: ".quantidade-input".to_string(),
            decrement_class: "btn-minus".to_string(),
            increment_class: "btn-plus".to_string(),
            add_to_cart: ".btn-add-to-cart".to_string(),
            product_actions: ".product-actions".to_string(),
            cart_quantity: ".cart-item-quantity".to_string(),
            remove_item: ".btn-remove-cart-item".to_string(),
            cart_row: ".cart-item".to_string(),
            cart_total: ".cart-total".to_string(),
            cart_count_id: "cart-count".to_string(),
            cart_icon: ".cart-icon".to_string(),
            toast_id: "toastCarrinho".to_string(),
            toast_header: ".toast-header".to_string(),
            toast_body: ".toast-body".to_string(),
            confirm: "[data-confirm]".to_string(),
            validated_form: "form.needs-validation".to_string(),
        }
    }
}

/// Animation and auto-hide timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fade_out_ms: u32,
    pub fade_in_ms: u32,
    pub pulse_ms: u32,
    pub toast_autohide_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fade_out_ms: 200,
            fade_in_ms: 300,
            pulse_ms: 1000,
            toast_autohide_ms: 5000,
        }
    }
}

impl TimingConfig {
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(u64::from(self.fade_out_ms))
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(u64::from(self.fade_in_ms))
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(u64::from(self.pulse_ms))
    }

    pub fn toast_autohide(&self) -> Duration {
        Duration::from_millis(u64::from(self.toast_autohide_ms))
    }
}

/// User-facing texts. Server messages take precedence where present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub adding_label: String,
    pub add_succeeded: String,
    pub add_failed: String,
    pub update_failed: String,
    pub remove_succeeded: String,
    pub remove_failed: String,
    pub remove_confirm: String,
    pub connection_failed: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            adding_label: "Adicionando...".to_string(),
            add_succeeded: "Produto adicionado ao carrinho".to_string(),
            add_failed: "Erro ao adicionar ao carrinho".to_string(),
            update_failed: "Erro ao atualizar carrinho".to_string(),
            remove_succeeded: "Item removido do carrinho".to_string(),
            remove_failed: "Erro ao remover item".to_string(),
            remove_confirm: "Tem certeza que deseja remover este item do carrinho?".to_string(),
            connection_failed: "Erro ao conectar com o servidor".to_string(),
        }
    }
}

/// Mutation behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Drop a mutation while another one for the same product or cart item is
    /// still in flight.
    pub exclusive: bool,
}

/// In-page event names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// DOM event re-dispatched on `document` after each successful mutation.
    pub cart_updated: String,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            cart_updated: "carrinhoUpdated".to_string(),
        }
    }
}
