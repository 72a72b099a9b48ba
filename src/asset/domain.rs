use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, api_client::zero_if_null};

/// The kind of thing an asset is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    Investment,
    Vehicle,
    Property,
    Other,
}

impl AssetType {
    pub const ALL: [AssetType; 4] = [
        AssetType::Investment,
        AssetType::Vehicle,
        AssetType::Property,
        AssetType::Other,
    ];

    /// The value used in forms and the API, e.g. "VEHICLE".
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Investment => "INVESTMENT",
            AssetType::Vehicle => "VEHICLE",
            AssetType::Property => "PROPERTY",
            AssetType::Other => "OTHER",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetType::Investment => "Investment",
            AssetType::Vehicle => "Vehicle",
            AssetType::Property => "Property",
            AssetType::Other => "Other",
        }
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Something the user owns that counts towards their net worth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub value: f64,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

/// The combined value of `assets`.
pub fn total_asset_value(assets: &[Asset]) -> f64 {
    assets.iter().map(|asset| asset.value).sum()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetForm {
    pub name: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

/// A validated asset ready to be sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub name: String,
    pub value: f64,
    pub asset_type: AssetType,
}

impl NewAsset {
    /// # Errors
    ///
    /// Returns an error if the name is blank or the value is not greater than zero.
    pub fn from_form(form: &AssetForm) -> Result<Self, Error> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyField("Asset name"));
        }

        if !form.value.is_finite() || form.value <= 0.0 {
            return Err(Error::NonPositiveAmount);
        }

        Ok(Self {
            name: name.to_owned(),
            value: form.value,
            asset_type: form.asset_type,
        })
    }
}
