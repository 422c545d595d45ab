/// Tag for the Custom Store Created event.
pub const STORE_CREATED_TAG: u8 = u8::MAX - 1;

/// Tag for the Custom Article Listed event.
pub const ARTICLE_LISTED_TAG: u8 = u8::MAX - 2;

/// Tag for the Custom Article Purchased event.
pub const ARTICLE_PURCHASED_TAG: u8 = u8::MAX - 3;

/// Tag for the Custom Role Granted event.
pub const ROLE_GRANTED_TAG: u8 = u8::MAX - 4;

/// First identifier handed out by the store and article registries.
pub const FIRST_ID: u64 = 1;
