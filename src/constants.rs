pub mod geo {

    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    pub const MAX_LATITUDE: f64 = 90.0;

    pub const MAX_LONGITUDE: f64 = 180.0;

    /// Fractional digits kept for stored coordinates (`DECIMAL(10,8)` / `DECIMAL(11,8)`).
    pub const COORDINATE_SCALE: i32 = 8;
}

pub mod prize {

    pub const MIN_VALUE: u32 = 10;

    pub const MAX_VALUE: u32 = 30;
}

pub mod search {

    pub const DEFAULT_FANOUT_CONCURRENCY: usize = 8;

    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
}

pub mod messages {

    pub const TREASURES_RETRIEVED: &str = "Successfully retrieved treasures.";

    pub const TREASURE_CREATED: &str = "Successfully created a treasure.";

    pub const TREASURE_BOX_CREATED: &str = "Successfully created a treasure box.";

    pub const ROUTE_NOT_FOUND: &str = "Route does not exists.";

    pub const TREASURE_NOT_FOUND: &str = "Treasure does not exists.";

    pub const TREASURE_EXISTS: &str = "Treasure name or id already exists.";
}
