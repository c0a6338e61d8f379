use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Golemio 回傳的 GeoJSON FeatureCollection，只保留需要的 `features`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Option<Vec<Value>>,
}

impl FeatureCollection {
    /// `features` 缺少或為 null 時視為空清單
    pub fn into_features(self) -> Vec<RawFeature> {
        self.features
            .unwrap_or_default()
            .into_iter()
            .map(RawFeature::from)
            .collect()
    }
}

/// 單一圖書館的原始資料，`properties` 與 `geometry` 缺少時為 `Value::Null`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawFeature {
    pub properties: Value,
    pub geometry: Value,
}

impl From<Value> for RawFeature {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut obj) => Self {
                properties: obj.remove("properties").unwrap_or(Value::Null),
                geometry: obj.remove("geometry").unwrap_or(Value::Null),
            },
            other => {
                tracing::warn!("⚠️ Feature is not a JSON object, keeping an empty row: {}", other);
                Self::default()
            }
        }
    }
}

/// 正規化後的一列輸出，欄位名稱即 CSV 標題
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryRecord {
    #[serde(rename = "id_kniznice")]
    pub id: Option<String>,
    #[serde(rename = "nazov_kniznice")]
    pub name: Option<String>,
    #[serde(rename = "ulica")]
    pub street: Option<String>,
    #[serde(rename = "psc")]
    pub postal_code: Option<String>,
    #[serde(rename = "mesto")]
    pub city: String,
    #[serde(rename = "kraj")]
    pub region: String,
    #[serde(rename = "krajina")]
    pub country: String,
    #[serde(rename = "zemepisna_sirka")]
    pub latitude: Option<f64>,
    #[serde(rename = "zemepisna_dlzka")]
    pub longitude: Option<f64>,
    #[serde(rename = "cas_otvorenia")]
    pub opening_hours: String,
}

impl LibraryRecord {
    pub const COLUMNS: [&'static str; 10] = [
        "id_kniznice",
        "nazov_kniznice",
        "ulica",
        "psc",
        "mesto",
        "kraj",
        "krajina",
        "zemepisna_sirka",
        "zemepisna_dlzka",
        "cas_otvorenia",
    ];
}

/// 依 API 回應順序排列，一個 feature 對應一筆
pub type ResultSet = Vec<LibraryRecord>;

/// 純量欄位轉文字：字串原樣、數字轉字串，布林、陣列、物件與 null 一律視為缺少
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 空字串與數值 0 都算「沒有值」
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => scalar_text(value).is_none(),
    }
}
