//! Investments, vehicles, property and other assets that make up net worth.

mod api;
mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod page;

pub use api::{create_asset, delete_asset, get_assets, update_asset};
pub use create::{create_asset_endpoint, get_new_asset_page};
pub use delete::delete_asset_endpoint;
pub use domain::{Asset, AssetForm, AssetType, NewAsset, total_asset_value};
pub use edit::{get_edit_asset_page, update_asset_endpoint};
pub use page::get_assets_page;
