//! Root page handler.
//!
//! Serves a static HTML page linking every API route.

use axum::response::Html;

/// Static index page
pub const INDEX_HTML: &str = r#"<html>
    <head>
        <title>Hawaii climate API</title>
    </head>
    <body>
        <h1>Available routes:</h1>
        <ul>
            <li><a href="/api/v1.0/precipitation">Precipitation</a></li>
            <li><a href="/api/v1.0/stations">List of Stations With the Number of Observations</a></li>
            <li><a href="/api/v1.0/tobs">Temperature Observations (tobs)</a></li>
            <li><a href="/api/v1.0/start">Temperature Statistics on 2016-08-23</a></li>
            <li><a href="/api/v1.0/start/end">Temperature Statistics for 2016 - 2017</a></li>
        </ul>
    </body>
</html>
"#;

/// Handle GET / requests
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
