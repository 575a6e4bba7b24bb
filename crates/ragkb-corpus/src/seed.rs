//! Builtin starter chunks.
//!
//! A small set of boilerplate snippets so retrieval has something to answer
//! from before the user adds material of their own.

use ragkb_core::types::{Chunk, SourceTag};

const SEEDS: &[(&str, &str)] = &[
    (
        "Starter HTML page template",
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <title>Start</title>
  <style>body{font-family:Arial;margin:40px}</style>
</head>
<body>
  <h1>Hello, world!</h1>
  <p>This is a starter template.</p>
</body>
</html>"#,
    ),
    (
        "JavaScript: fetching weather without API keys",
        r#"Open-Meteo example (no API keys required):

```javascript
async function getWeather(lat = 55.75, lon = 37.62) {
  const url = `https://api.open-meteo.com/v1/forecast?latitude=${lat}&longitude=${lon}&current_weather=true&timezone=auto`;
  const r = await fetch(url);
  const data = await r.json();
  return data.current_weather;
}
getWeather().then(console.log);
```"#,
    ),
    (
        "Node.js Express server template",
        r#"Minimal server:

```javascript
const express = require('express');
const app = express();
app.use(express.json());
app.get('/ping', (req, res) => res.json({ ok: true }));
app.listen(3000, () => console.log('http://localhost:3000'));
```"#,
    ),
    (
        "CSS: basic responsive container",
        r#"```css
.container{max-width:960px;margin:0 auto;padding:0 16px}
@media (max-width:600px){.container{padding:0 10px}}
```"#,
    ),
];

/// Materialize the builtin seed set. Ids are stable across runs.
pub fn builtin_chunks() -> Vec<Chunk> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, (topic, body))| Chunk {
            id: format!("builtin_{i}"),
            text: format!("Topic: {topic}\n{body}"),
            source: SourceTag::Builtin,
        })
        .collect()
}
