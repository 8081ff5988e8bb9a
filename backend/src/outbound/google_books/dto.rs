//! DTOs for decoding Google Books volume JSON.
//!
//! Responses decode into these transport DTOs first, then map into domain
//! catalog items in one pass.

use serde::Deserialize;

use crate::domain::{CatalogItem, CatalogItemId, VolumeInfo};

#[derive(Debug, Deserialize)]
pub(super) struct VolumesResponseDto {
    #[serde(default)]
    pub(super) items: Vec<VolumeDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VolumeDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) volume_info: VolumeInfoDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VolumeInfoDto {
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) authors: Vec<String>,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) categories: Vec<String>,
    #[serde(default)]
    pub(super) published_date: String,
    pub(super) page_count: Option<u32>,
    pub(super) image_links: Option<ImageLinksDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImageLinksDto {
    pub(super) thumbnail: Option<String>,
    pub(super) small_thumbnail: Option<String>,
}

impl VolumesResponseDto {
    pub(super) fn into_domain_items(self) -> Result<Vec<CatalogItem>, String> {
        self.items
            .into_iter()
            .map(VolumeDto::into_domain_item)
            .collect()
    }
}

impl VolumeDto {
    pub(super) fn into_domain_item(self) -> Result<CatalogItem, String> {
        let id = CatalogItemId::new(&self.id)
            .map_err(|error| format!("volume has an unusable id: {error}"))?;
        let info = self.volume_info;
        let links = info.image_links.unwrap_or_default();

        Ok(CatalogItem {
            id,
            volume: VolumeInfo {
                title: info.title,
                authors: info.authors,
                description: info.description,
                categories: info.categories,
                published_date: info.published_date,
                page_count: info.page_count,
                thumbnail: links.thumbnail,
                small_thumbnail: links.small_thumbnail,
            },
        })
    }
}
