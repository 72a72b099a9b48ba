//! REST API calls for assets.

use serde::Serialize;

use crate::{
    Error,
    api_client::ApiClient,
    asset::{Asset, AssetType, NewAsset},
};

const ASSETS_PATH: &str = "/assets";

#[derive(Serialize)]
struct AssetRequest<'a> {
    name: &'a str,
    value: f64,
    #[serde(rename = "type")]
    asset_type: AssetType,
}

impl<'a> From<&'a NewAsset> for AssetRequest<'a> {
    fn from(asset: &'a NewAsset) -> Self {
        Self {
            name: &asset.name,
            value: asset.value,
            asset_type: asset.asset_type,
        }
    }
}

pub async fn get_assets(api: &ApiClient, token: &str) -> Result<Vec<Asset>, Error> {
    Ok(api.get(token, ASSETS_PATH).await?)
}

pub async fn create_asset(api: &ApiClient, token: &str, asset: &NewAsset) -> Result<(), Error> {
    Ok(api.post(token, ASSETS_PATH, &AssetRequest::from(asset)).await?)
}

pub async fn update_asset(
    api: &ApiClient,
    token: &str,
    id: i64,
    asset: &NewAsset,
) -> Result<(), Error> {
    Ok(api
        .put(token, &format!("{ASSETS_PATH}/{id}"), &AssetRequest::from(asset))
        .await?)
}

pub async fn delete_asset(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api.delete(token, &format!("{ASSETS_PATH}/{id}")).await?)
}
