/// Application name
pub const APP_NAME: &str = "Artfolio";

/// Database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "ArtGallery.db";

/// Directory (under the data directory) holding imported images
pub const IMAGE_DIR_NAME: &str = "images";

/// Rendered in place of an artist phone number that is missing or blank
pub const PHONE_NOT_AVAILABLE: &str = "Not available";

/// Purchase dates are persisted as calendar dates in this format
pub const PURCHASE_DATE_FORMAT: &str = "%Y-%m-%d";
