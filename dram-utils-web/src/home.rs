//! Front page and the HTML 404 for everything outside `/api`.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>dram-utils</title>
</head>
<body>
<h1>dram-utils</h1>
<p>Network diagnostics over HTTP. Every endpoint takes a <code>host</code> query parameter.</p>
<ul>
<li><a href="/api/dns?host=example.com"><code>/api/dns</code></a>: resolve a host name</li>
<li><a href="/api/http_ping?host=example.com"><code>/api/http_ping</code></a>: check HTTP reachability (3 s timeout)</li>
<li><a href="/api/whois?host=example.com"><code>/api/whois</code></a>: WHOIS lookup; add <code>see=true</code> for the full record</li>
</ul>
</body>
</html>
"#;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .default_service(web::to(not_found_page));
}

async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(HOME_PAGE)
}

async fn not_found_page() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body("<h1>Not Found</h1>")
}
