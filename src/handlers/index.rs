use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>GhostDrop</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 600px;
            margin: 0 auto;
            padding: 2rem;
            background: #f5f5f5;
        }
        .container {
            background: white;
            padding: 2rem;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        h1 {
            color: #333;
            text-align: center;
        }
        .note {
            text-align: center;
            color: #666;
            margin-top: 1rem;
        }
        form {
            display: flex;
            flex-direction: column;
            gap: 1rem;
            margin-top: 1.5rem;
        }
        button {
            padding: 0.6rem;
            border: none;
            border-radius: 4px;
            background: #333;
            color: white;
            font-size: 1rem;
            cursor: pointer;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>&#x1F47B; GhostDrop</h1>
        <form action="/upload" method="post" enctype="multipart/form-data">
            <input type="file" name="files" multiple>
            <button type="submit">Send Files</button>
        </form>
        <p class="note">The server shuts down after one upload.</p>
    </div>
</body>
</html>
"#;

/// Serve the embedded upload page.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
