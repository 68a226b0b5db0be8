// src/config/consts.rs

// Endpoint
pub const BROWSE_URL: &str = "https://www.bcliquorstores.com/ajax/browse";
pub const CATEGORIES: &[&str] = &["wine", "beer", "spirits", "coolers/ciders"];
pub const SORT: &str = "name.raw:asc";
pub const PAGE_SIZE: usize = 5000;
pub const USER_AGENT: &str = concat!("bc_liquor/", env!("CARGO_PKG_VERSION"));

// Full export
pub const DEFAULT_OUT_DIR: &str = ".";
pub const SNAPSHOT_CSV: &str = "bcliquordata.csv";
pub const SNAPSHOT_JSON: &str = "bcliquordata.json";

// Periodic
pub const PERIODIC_DIR: &str = "periodicdata";
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Per-run time series projection, in file order.
pub const HISTORY_COLUMNS: &[&str] = &[
    "time", "sku", "currentPrice", "availableUnits", "storeCount", "consumerRating", "votes",
];

/// Static product attributes kept in the yearly/monthly legend files.
pub const LEGEND_COLUMNS: &[&str] = &[
    "sku", "alcoholPercentage", "category_id", "category", "certificates", "class_id", "class",
    "color", "countryCode", "countryName", "grapeType", "image", "inventoryCode", "isBCCraft",
    "isBCSpirit", "isBCVQA", "isCraft", "isDealcoholizedWine", "isDraft", "isExclusive",
    "isKosher", "isOntarioVQA", "isOrganic", "isVQA", "name", "namePrefix", "nameSanitized",
    "nameSuffix", "productCategory", "productSubCategory", "productType", "redVarietal",
    "region", "regularPrice", "restrictionCode", "sort", "style", "subCategory",
    "subCategory_id", "subRegion", "sweetness", "tastingDescription", "totalAlcoholContent",
    "totalVolume", "unitSize", "upc", "volume", "whiteVarietal",
];

/// Legend columns re-parsed to floats whenever a stored legend is reloaded.
pub const LEGEND_NUMERIC: &[&str] = &["alcoholPercentage", "regularPrice", "volume"];
