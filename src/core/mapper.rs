use crate::core::opening_hours;
use crate::domain::model::{scalar_text, LibraryRecord, RawFeature};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 地址欄位缺少時的預設值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressDefaults {
    pub city: String,
    pub region: String,
    pub country: String,
}

impl Default for AddressDefaults {
    fn default() -> Self {
        Self {
            city: "Praha".to_string(),
            region: "Hlavní město Praha".to_string(),
            country: "Česká republika".to_string(),
        }
    }
}

/// 將一個 RawFeature 轉成 LibraryRecord，缺少的欄位只影響該格，不會失敗
#[derive(Debug, Clone, Default)]
pub struct RecordMapper {
    defaults: AddressDefaults,
}

impl RecordMapper {
    pub fn new(defaults: AddressDefaults) -> Self {
        Self { defaults }
    }

    pub fn map(&self, feature: &RawFeature) -> LibraryRecord {
        let properties = &feature.properties;
        let address = properties.get("address").unwrap_or(&Value::Null);
        let (longitude, latitude) = coordinates(&feature.geometry);

        LibraryRecord {
            id: text_field(properties, "id"),
            name: text_field(properties, "name"),
            street: text_field(address, "street_address"),
            postal_code: text_field(address, "postal_code"),
            city: text_field(address, "locality").unwrap_or_else(|| self.defaults.city.clone()),
            region: text_field(address, "region").unwrap_or_else(|| self.defaults.region.clone()),
            country: text_field(address, "country")
                .unwrap_or_else(|| self.defaults.country.clone()),
            latitude,
            longitude,
            opening_hours: opening_hours::normalize(
                properties.get("opening_hours").unwrap_or(&Value::Null),
            ),
        }
    }

    pub fn map_all(&self, features: &[RawFeature]) -> Vec<LibraryRecord> {
        features.iter().map(|feature| self.map(feature)).collect()
    }
}

/// 數字（例如 id、PSČ）轉成文字
fn text_field(parent: &Value, key: &str) -> Option<String> {
    parent.get(key).and_then(scalar_text)
}

/// GeoJSON 座標順序是 [經度, 緯度]；格式不符時兩者皆為 None
fn coordinates(geometry: &Value) -> (Option<f64>, Option<f64>) {
    let pair = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .filter(|coords| coords.len() >= 2)
        .and_then(|coords| Some((coords[0].as_f64()?, coords[1].as_f64()?)));

    match pair {
        Some((lon, lat)) => (Some(lon), Some(lat)),
        None => (None, None),
    }
}
