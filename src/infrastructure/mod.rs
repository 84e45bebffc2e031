mod crawler_paginated;
mod extractor_html;
mod fetcher_http;
mod navigator_html;
mod store_json;

pub use crawler_paginated::*;
pub use extractor_html::*;
pub use fetcher_http::*;
pub use navigator_html::*;
pub use store_json::*;
