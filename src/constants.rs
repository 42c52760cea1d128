pub mod network {
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
}

pub mod pagination {
    pub const FIRST_PAGE: u64 = 0;
    pub const PROJECT_PAGE_SIZE: u64 = 12;
    pub const API_PAGE_SIZE: u64 = 8;
    pub const PROJECT_SORT: &str = "name,asc";
}

pub mod api {
    pub const PATH_PREFIX: &str = "/api/v1";
}

pub mod protocols {
    pub const ALLOWED_HTTP: &[&str] = &["http", "https"];
}
