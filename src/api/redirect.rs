use axum::{http::StatusCode, response::Html};

const FORWARD_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Spotify Data Tools</title></head>
  <body>
    <p>Completing authorization&hellip;</p>
    <script>
      var fragment = window.location.hash.replace(/^#/, "");
      var query = window.location.search.replace(/^\?/, "");
      window.location.replace("/token?" + (fragment || query));
    </script>
  </body>
</html>
"#;

/// Serves the page forwarding the URL fragment to the `/token` route.
///
/// When the user denies access the provider redirects with `?error=...` in the
/// query instead of a fragment; the script forwards that query unchanged so
/// the token route can report it.
pub async fn redirect() -> Html<&'static str> {
    Html(FORWARD_PAGE)
}

pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html("<h4>Not found.</h4>"))
}
