//! Cosmetic catalog and the per-user inventory.
//!
//! Items are a closed set: app themes, avatar frames and accessories for the
//! Bananín mascot. Ownership and activation are tracked separately so a user
//! can own several frames while wearing one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{StoreError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Classic,
    Midnight,
    Tropical,
    Sunset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    Gold,
    Silver,
    Squats,
    Veggie,
    Bookworm,
    Fire,
    DiamondGlow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessory {
    Hat,
    Sunglasses,
    Headband,
    Cape,
}

/// Anything that can be bought in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CosmeticItem {
    Theme(Theme),
    Frame(Frame),
    Accessory(Accessory),
}

impl CosmeticItem {
    /// Every item in shop order.
    pub fn catalog() -> Vec<CosmeticItem> {
        let themes = [Theme::Classic, Theme::Midnight, Theme::Tropical, Theme::Sunset]
            .into_iter()
            .map(CosmeticItem::Theme);
        let frames = [
            Frame::Silver,
            Frame::Gold,
            Frame::Squats,
            Frame::Veggie,
            Frame::Bookworm,
            Frame::Fire,
            Frame::DiamondGlow,
        ]
        .into_iter()
        .map(CosmeticItem::Frame);
        let accessories = [
            Accessory::Hat,
            Accessory::Sunglasses,
            Accessory::Headband,
            Accessory::Cape,
        ]
        .into_iter()
        .map(CosmeticItem::Accessory);
        themes.chain(frames).chain(accessories).collect()
    }

    /// Price in diamonds.
    pub fn price(&self) -> u64 {
        match self {
            CosmeticItem::Theme(Theme::Classic) => 0,
            CosmeticItem::Theme(_) => 150,
            CosmeticItem::Frame(Frame::Silver) => 100,
            CosmeticItem::Frame(Frame::Gold) => 250,
            CosmeticItem::Frame(Frame::DiamondGlow) => 500,
            CosmeticItem::Frame(_) => 120,
            CosmeticItem::Accessory(Accessory::Headband) => 60,
            CosmeticItem::Accessory(Accessory::Cape) => 200,
            CosmeticItem::Accessory(_) => 80,
        }
    }

    /// Badge shown on the avatar, for frames that carry one.
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            CosmeticItem::Frame(Frame::Squats) => Some("🏋️"),
            CosmeticItem::Frame(Frame::Veggie) => Some("🥦"),
            CosmeticItem::Frame(Frame::Bookworm) => Some("🤓"),
            CosmeticItem::Frame(Frame::Fire) => Some("🔥"),
            CosmeticItem::Frame(Frame::DiamondGlow) => Some("✨"),
            _ => None,
        }
    }

    fn slug(&self) -> (&'static str, &'static str) {
        match self {
            CosmeticItem::Theme(t) => (
                "theme",
                match t {
                    Theme::Classic => "classic",
                    Theme::Midnight => "midnight",
                    Theme::Tropical => "tropical",
                    Theme::Sunset => "sunset",
                },
            ),
            CosmeticItem::Frame(f) => (
                "frame",
                match f {
                    Frame::Gold => "gold",
                    Frame::Silver => "silver",
                    Frame::Squats => "squats",
                    Frame::Veggie => "veggie",
                    Frame::Bookworm => "bookworm",
                    Frame::Fire => "fire",
                    Frame::DiamondGlow => "diamond_glow",
                },
            ),
            CosmeticItem::Accessory(a) => (
                "accessory",
                match a {
                    Accessory::Hat => "hat",
                    Accessory::Sunglasses => "sunglasses",
                    Accessory::Headband => "headband",
                    Accessory::Cape => "cape",
                },
            ),
        }
    }
}

impl fmt::Display for CosmeticItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, id) = self.slug();
        write!(f, "{kind}:{id}")
    }
}

/// Parses the `kind:id` form used by [`fmt::Display`], e.g. `frame:gold`.
impl FromStr for CosmeticItem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        CosmeticItem::catalog()
            .into_iter()
            .find(|item| item.to_string() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "item".to_string(),
                message: format!("unknown cosmetic '{s}' (expected kind:id, e.g. frame:gold)"),
            })
    }
}

/// What changed after an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    ThemeApplied(Theme),
    FrameApplied(Frame),
    AccessoryEquipped(Accessory),
    AccessoryRemoved(Accessory),
}

/// Owned cosmetics and which of them are in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    owned: BTreeSet<CosmeticItem>,
    active_theme: Theme,
    #[serde(default)]
    active_frame: Option<Frame>,
    #[serde(default)]
    equipped_accessories: BTreeSet<Accessory>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            owned: BTreeSet::from([CosmeticItem::Theme(Theme::Classic)]),
            active_theme: Theme::Classic,
            active_frame: None,
            equipped_accessories: BTreeSet::new(),
        }
    }
}

impl Inventory {
    pub fn owns(&self, item: CosmeticItem) -> bool {
        self.owned.contains(&item)
    }

    pub fn owned(&self) -> impl Iterator<Item = CosmeticItem> + '_ {
        self.owned.iter().copied()
    }

    pub fn active_theme(&self) -> Theme {
        self.active_theme
    }

    pub fn active_frame(&self) -> Option<Frame> {
        self.active_frame
    }

    pub fn equipped_accessories(&self) -> impl Iterator<Item = Accessory> + '_ {
        self.equipped_accessories.iter().copied()
    }

    pub fn is_active(&self, item: CosmeticItem) -> bool {
        match item {
            CosmeticItem::Theme(t) => self.active_theme == t,
            CosmeticItem::Frame(f) => self.active_frame == Some(f),
            CosmeticItem::Accessory(a) => self.equipped_accessories.contains(&a),
        }
    }

    /// Record ownership. Callers charge the price first.
    pub fn grant(&mut self, item: CosmeticItem) -> Result<(), StoreError> {
        if !self.owned.insert(item) {
            return Err(StoreError::AlreadyOwned(item));
        }
        Ok(())
    }

    /// Themes and frames replace the current one; accessories toggle.
    pub fn activate(&mut self, item: CosmeticItem) -> Result<Activation, StoreError> {
        if !self.owns(item) {
            return Err(StoreError::NotOwned(item));
        }
        let activation = match item {
            CosmeticItem::Theme(t) => {
                self.active_theme = t;
                Activation::ThemeApplied(t)
            }
            CosmeticItem::Frame(f) => {
                self.active_frame = Some(f);
                Activation::FrameApplied(f)
            }
            CosmeticItem::Accessory(a) => {
                if self.equipped_accessories.remove(&a) {
                    Activation::AccessoryRemoved(a)
                } else {
                    self.equipped_accessories.insert(a);
                    Activation::AccessoryEquipped(a)
                }
            }
        };
        Ok(activation)
    }

    /// Remove the avatar frame; returns the frame that was active.
    pub fn clear_frame(&mut self) -> Option<Frame> {
        self.active_frame.take()
    }
}
